use quill_database::util::reference::Reference;
use quill_database::{Database, PartialReport, Report, User};
use quill_models::v0::ReportStatusString;
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

/// # Report Data
#[derive(Validate, Deserialize, JsonSchema)]
pub struct DataEditReport {
    /// New report status
    status: Option<ReportStatusString>,
    /// Report notes
    #[validate(length(min = 0, max = 1000))]
    notes: Option<String>,
}

/// # Edit Report
///
/// Edit a report.
#[openapi(tag = "User Safety")]
#[patch("/reports/<report>", data = "<edit>")]
pub async fn edit_report(
    db: &State<Database>,
    user: User,
    report: Reference<'_>,
    edit: Json<DataEditReport>,
) -> Result<Json<Report>> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    // Validate data
    let edit = edit.into_inner();
    edit.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    // Create and apply update to report
    let mut report = report.as_report(db).await?;
    if let Some(status) = edit.status {
        report
            .update_status(db, &user, status, edit.notes)
            .await?;
    } else {
        report
            .update(
                db,
                PartialReport {
                    notes: edit.notes,
                    ..Default::default()
                },
                vec![],
            )
            .await?;
    }

    Ok(Json(report))
}
