use std::sync::Arc;

use quill_database::events::sink::Sink;
use quill_database::{Database, Report, User};
use quill_models::v0::ReportedTarget;
use quill_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;
use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

/// # Report Data
#[derive(Validate, Deserialize, JsonSchema)]
pub struct DataReportContent {
    /// Content being reported
    target: ReportedTarget,
    /// Additional report description
    #[validate(length(min = 0, max = 1000))]
    #[serde(default)]
    description: String,
}

/// # Report Content
///
/// Report a piece of content to the moderation team.
#[openapi(tag = "User Safety")]
#[post("/report", data = "<data>")]
pub async fn report_content(
    db: &State<Database>,
    sink: &State<Arc<dyn Sink>>,
    user: User,
    data: Json<DataReportContent>,
) -> Result<Json<Report>> {
    let data = data.into_inner();
    data.validate().map_err(|error| {
        create_error!(FailedValidation {
            error: error.to_string()
        })
    })?;

    Ok(Json(
        Report::create(
            db,
            sink.inner().as_ref(),
            &user,
            data.target,
            data.description,
        )
        .await?,
    ))
}
