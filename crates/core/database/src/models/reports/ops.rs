use quill_models::v0::{ReportStats, ReportStatusString, ReportedTarget};
use quill_result::Result;

use crate::{FieldsReport, PartialReport, Report};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch reports, newest first
    ///
    /// All arguments are direct matches; before_id and limit paginate.
    async fn fetch_reports(
        &self,
        status: Option<&ReportStatusString>,
        target_type: Option<&str>,
        author_id: Option<&str>,
        before_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Report>>;

    /// Fetch the open report a user holds against a piece of content,
    /// if any
    async fn fetch_open_report_by_target(
        &self,
        author_id: &str,
        target: &ReportedTarget,
    ) -> Result<Option<Report>>;

    /// Update a report with new information
    async fn update_report(
        &self,
        id: &str,
        partial: &PartialReport,
        remove: Vec<FieldsReport>,
    ) -> Result<()>;

    /// Aggregate counts over reports that have not been soft-deleted
    async fn generate_report_stats(&self) -> Result<ReportStats>;
}

/// Smallest id a report created within the past seven days can have
///
/// Report ids are ULIDs, so time-range queries reduce to id-range
/// queries.
pub(crate) fn week_ago_id() -> String {
    let ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
        .saturating_sub(7 * 24 * 60 * 60 * 1000);

    ulid::Ulid::from_parts(ms, 0).to_string()
}
