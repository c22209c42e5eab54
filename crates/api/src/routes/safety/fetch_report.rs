use quill_database::util::reference::Reference;
use quill_database::{Database, Report, User};
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Report
///
/// Fetch a report by its id.
#[openapi(tag = "User Safety")]
#[get("/reports/<report>")]
pub async fn fetch_report(
    db: &State<Database>,
    user: User,
    report: Reference<'_>,
) -> Result<Json<Report>> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    Ok(Json(report.as_report(db).await?))
}
