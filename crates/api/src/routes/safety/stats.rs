use quill_database::{Database, User};
use quill_models::v0::ReportStats;
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Report Stats
///
/// Fetch aggregate statistics over the reports collection.
#[openapi(tag = "Moderation")]
#[get("/stats")]
pub async fn stats(db: &State<Database>, user: User) -> Result<Json<ReportStats>> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    Ok(Json(db.generate_report_stats().await?))
}
