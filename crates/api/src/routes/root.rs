use quill_result::Result;
use rocket::serde::json::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// # Server Configuration
#[derive(Serialize, JsonSchema, Debug)]
pub struct ApiConfig {
    /// API revision
    pub revision: String,
    /// URL of the application serving this API
    pub app: String,
    /// URL of the events server
    pub ws: String,
}

/// # Query Node
///
/// Fetch the server configuration for this node.
#[openapi(tag = "Core")]
#[get("/")]
pub async fn root() -> Result<Json<ApiConfig>> {
    let config = quill_config::config().await;

    Ok(Json(ApiConfig {
        revision: env!("CARGO_PKG_VERSION").to_string(),
        app: config.hosts.app,
        ws: config.hosts.events,
    }))
}
