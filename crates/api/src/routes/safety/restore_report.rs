use quill_database::util::reference::Reference;
use quill_database::{Database, Report, User};
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Restore Report
///
/// Restore a previously soft-deleted report.
#[openapi(tag = "User Safety")]
#[post("/reports/<report>/restore")]
pub async fn restore_report(
    db: &State<Database>,
    user: User,
    report: Reference<'_>,
) -> Result<Json<Report>> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    let mut report = report.as_report(db).await?;
    report.restore(db).await?;

    Ok(Json(report))
}
