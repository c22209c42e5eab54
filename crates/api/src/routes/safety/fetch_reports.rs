use quill_database::{Database, Report, ReportWithReporter, User};
use quill_models::v0::ReportStatusString;
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use schemars::JsonSchema;
use serde::Deserialize;

/// Maximum page size when listing reports
static MAX_PAGE_SIZE: i64 = 100;

/// # Query Parameters
#[derive(Deserialize, JsonSchema, FromForm)]
pub struct OptionsFetchReports {
    /// Report status to include in search
    status: Option<String>,

    /// Target type to include in search (`Post` or `Comment`)
    target_type: Option<String>,

    /// Find reports created by user
    author_id: Option<String>,

    /// Only return reports older than this id
    before: Option<String>,

    /// Maximum number of reports to return
    limit: Option<i64>,
}

/// # Fetch Reports
///
/// Fetch all available reports, newest first, with the reporter's
/// identity attached to each entry.
#[openapi(tag = "User Safety")]
#[get("/reports?<options..>")]
pub async fn fetch_reports(
    db: &State<Database>,
    user: User,
    options: OptionsFetchReports,
) -> Result<Json<Vec<ReportWithReporter>>> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    let status = match options.status.as_deref() {
        Some("Pending") => Some(ReportStatusString::Pending),
        Some("Reviewed") => Some(ReportStatusString::Reviewed),
        Some("Resolved") => Some(ReportStatusString::Resolved),
        Some("Dismissed") => Some(ReportStatusString::Dismissed),
        Some(_) => return Err(create_error!(InvalidProperty)),
        None => None,
    };

    if let Some(target_type) = options.target_type.as_deref() {
        if !matches!(target_type, "Post" | "Comment") {
            return Err(create_error!(InvalidProperty));
        }
    }

    let limit = options
        .limit
        .unwrap_or(MAX_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let reports = db
        .fetch_reports(
            status.as_ref(),
            options.target_type.as_deref(),
            options.author_id.as_deref(),
            options.before.as_deref(),
            limit,
        )
        .await?;

    Ok(Json(Report::with_reporters(db, reports).await))
}
