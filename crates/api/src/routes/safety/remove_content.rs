use std::sync::Arc;

use quill_database::events::sink::Sink;
use quill_database::util::reference::Reference;
use quill_database::{Database, RemovedContent, User};
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

/// # Removal Data
#[derive(Validate, Deserialize, JsonSchema)]
pub struct DataRemoveContent {
    /// Notes shown to the content's owner
    #[validate(length(min = 0, max = 1000))]
    notes: Option<String>,
}

/// # Remove Content
///
/// Remove the content a report points at from the community and
/// resolve the report. The content's owner is notified.
#[openapi(tag = "Moderation")]
#[post("/reports/<report>/remove", data = "<data>")]
pub async fn remove_content(
    db: &State<Database>,
    sink: &State<Arc<dyn Sink>>,
    user: User,
    report: Reference<'_>,
    data: Json<DataRemoveContent>,
) -> Result<Json<RemovedContent>> {
    // Must be privileged for this route
    if !user.privileged {
        return Err(create_error!(NotPrivileged));
    }

    // Validate data
    let data = data.into_inner();
    data.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    let mut report = report.as_report(db).await?;
    Ok(Json(
        report
            .remove_content(db, sink.inner().as_ref(), &user, data.notes)
            .await?,
    ))
}
