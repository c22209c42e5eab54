use std::collections::HashMap;

use mongodb::options::FindOptions;

use quill_models::v0::{ReportReason, ReportStats, ReportStatusString, ReportedTarget};
use quill_result::Result;

use crate::{FieldsReport, IntoDocumentPath, MongoDb, PartialReport, Report};

use super::{week_ago_id, AbstractReports};

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for MongoDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        query!(self, insert_one, COL, &report).map(|_| ())
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch reports, newest first
    async fn fetch_reports(
        &self,
        status: Option<&ReportStatusString>,
        target_type: Option<&str>,
        author_id: Option<&str>,
        before_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Report>> {
        let mut filter = doc! {};

        if let Some(status) = status {
            filter.insert("status", status.as_str());
        }

        if let Some(target_type) = target_type {
            filter.insert("target.type", target_type);
        }

        if let Some(author_id) = author_id {
            filter.insert("author_id", author_id);
        }

        if let Some(before_id) = before_id {
            filter.insert(
                "_id",
                doc! {
                    "$lt": before_id
                },
            );
        }

        query!(
            self,
            find_with_options,
            COL,
            filter,
            FindOptions::builder()
                .sort(doc! {
                    "_id": -1
                })
                .limit(limit)
                .build()
        )
    }

    /// Fetch the open report a user holds against a piece of content,
    /// if any
    async fn fetch_open_report_by_target(
        &self,
        author_id: &str,
        target: &ReportedTarget,
    ) -> Result<Option<Report>> {
        query!(
            self,
            find_one,
            COL,
            doc! {
                "author_id": author_id,
                "target.type": target.type_name(),
                "target.id": target.id(),
                "status": {
                    "$in": ["Pending", "Reviewed"]
                }
            }
        )
    }

    /// Update a report with new information
    async fn update_report(
        &self,
        id: &str,
        partial: &PartialReport,
        remove: Vec<FieldsReport>,
    ) -> Result<()> {
        query!(
            self,
            update_one_by_id,
            COL,
            id,
            partial,
            remove.iter().map(|x| x as &dyn IntoDocumentPath).collect(),
            None
        )
        .map(|_| ())
    }

    /// Aggregate counts over reports that have not been soft-deleted
    async fn generate_report_stats(&self) -> Result<ReportStats> {
        let live = doc! {
            "is_deleted": {
                "$ne": true
            }
        };

        let mut status = HashMap::new();
        for entry in [
            ReportStatusString::Pending,
            ReportStatusString::Reviewed,
            ReportStatusString::Resolved,
            ReportStatusString::Dismissed,
        ] {
            let mut filter = live.clone();
            filter.insert("status", entry.as_str());
            status.insert(
                entry.as_str().to_string(),
                query!(self, count_documents, COL, filter)?,
            );
        }

        let mut targets = HashMap::new();
        for entry in ["Post", "Comment"] {
            let mut filter = live.clone();
            filter.insert("target.type", entry);
            targets.insert(
                entry.to_string(),
                query!(self, count_documents, COL, filter)?,
            );
        }

        let mut reasons = HashMap::new();
        for entry in ReportReason::ALL {
            let mut filter = live.clone();
            filter.insert("target.report_reason", entry.as_str());
            reasons.insert(
                entry.as_str().to_string(),
                query!(self, count_documents, COL, filter)?,
            );
        }

        let mut filter = live.clone();
        filter.insert(
            "_id",
            doc! {
                "$gte": week_ago_id()
            },
        );
        let past_week = query!(self, count_documents, COL, filter)?;

        Ok(ReportStats {
            status,
            targets,
            reasons,
            past_week,
        })
    }
}

impl IntoDocumentPath for FieldsReport {
    fn as_path(&self) -> Option<&'static str> {
        match self {
            FieldsReport::ResolvedBy => Some("resolved_by"),
            FieldsReport::ResolvedAt => Some("resolved_at"),
            FieldsReport::DeletedAt => Some("deleted_at"),
        }
    }
}
