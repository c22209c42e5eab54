use quill_database::util::reference::Reference;
use quill_database::{Database, User};
use quill_result::{create_error, Result};
use rocket::State;

/// # Delete Report
///
/// Soft-delete a report. The report can be restored later.
#[openapi(tag = "User Safety")]
#[delete("/reports/<report>")]
pub async fn delete_report(
    db: &State<Database>,
    user: User,
    report: Reference<'_>,
) -> Result<()> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    report.as_report(db).await?.delete(db).await
}
