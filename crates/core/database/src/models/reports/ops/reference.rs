use std::collections::HashMap;

use quill_models::v0::{ReportReason, ReportStats, ReportStatusString, ReportedTarget};
use quill_result::Result;

use crate::{FieldsReport, PartialReport, ReferenceDb, Report};

use super::{week_ago_id, AbstractReports};

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert", "report"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
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
        let reports = self.reports.lock().await;
        let mut reports: Vec<Report> = reports
            .values()
            .filter(|report| {
                status
                    .map(|status| {
                        report.status.as_string().as_str() == status.as_str()
                    })
                    .unwrap_or(true)
                    && target_type
                        .map(|target_type| report.target.type_name() == target_type)
                        .unwrap_or(true)
                    && author_id
                        .map(|author_id| report.author_id == author_id)
                        .unwrap_or(true)
                    && before_id
                        .map(|before_id| report.id.as_str() < before_id)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();

        reports.sort_by(|a, b| b.id.cmp(&a.id));

        if limit > 0 {
            reports.truncate(limit as usize);
        }

        Ok(reports)
    }

    /// Fetch the open report a user holds against a piece of content,
    /// if any
    async fn fetch_open_report_by_target(
        &self,
        author_id: &str,
        target: &ReportedTarget,
    ) -> Result<Option<Report>> {
        let reports = self.reports.lock().await;
        Ok(reports
            .values()
            .find(|report| {
                report.author_id == author_id
                    && report.target.type_name() == target.type_name()
                    && report.target.id() == target.id()
                    && report.status.is_open()
            })
            .cloned())
    }

    /// Update a report with new information
    async fn update_report(
        &self,
        id: &str,
        partial: &PartialReport,
        remove: Vec<FieldsReport>,
    ) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            for field in &remove {
                report.remove_field(field);
            }

            report.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Aggregate counts over reports that have not been soft-deleted
    async fn generate_report_stats(&self) -> Result<ReportStats> {
        let reports = self.reports.lock().await;
        let live: Vec<&Report> = reports
            .values()
            .filter(|report| !report.is_deleted)
            .collect();

        let mut status = HashMap::new();
        for entry in [
            ReportStatusString::Pending,
            ReportStatusString::Reviewed,
            ReportStatusString::Resolved,
            ReportStatusString::Dismissed,
        ] {
            status.insert(
                entry.as_str().to_string(),
                live.iter()
                    .filter(|report| report.status.as_string().as_str() == entry.as_str())
                    .count() as u64,
            );
        }

        let mut targets = HashMap::new();
        for entry in ["Post", "Comment"] {
            targets.insert(
                entry.to_string(),
                live.iter()
                    .filter(|report| report.target.type_name() == entry)
                    .count() as u64,
            );
        }

        let mut reasons = HashMap::new();
        for entry in ReportReason::ALL {
            reasons.insert(
                entry.as_str().to_string(),
                live.iter()
                    .filter(|report| report.target.reason().as_str() == entry.as_str())
                    .count() as u64,
            );
        }

        // ULIDs sort lexicographically by creation time
        let threshold = week_ago_id();
        let past_week = live
            .iter()
            .filter(|report| report.id >= threshold)
            .count() as u64;

        Ok(ReportStats {
            status,
            targets,
            reasons,
            past_week,
        })
    }
}
