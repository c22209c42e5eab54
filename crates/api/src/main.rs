#[macro_use]
extern crate log;
#[macro_use]
extern crate rocket;
#[macro_use]
extern crate rocket_okapi;
#[macro_use]
extern crate serde_json;

pub mod routes;

use std::str::FromStr;
use std::sync::Arc;

use quill_database::events::sink::{PubSub, Sink};
use quill_database::DatabaseInfo;
use rocket_cors::AllowedOrigins;

#[launch]
async fn rocket() -> _ {
    quill_config::configure!();

    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: [
            "Get", "Put", "Post", "Delete", "Options", "Head", "Trace", "Connect", "Patch",
        ]
        .iter()
        .map(|s| FromStr::from_str(s).unwrap())
        .collect(),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to create CORS.");

    // Setup database
    let db = DatabaseInfo::Auto
        .connect()
        .await
        .expect("Database connection failed.");
    db.migrate_database()
        .await
        .expect("Failed to migrate the database.");

    // Events go out through Redis pub/sub
    let sink: Arc<dyn Sink> = Arc::new(PubSub);

    // Bind to the configured host
    let config = quill_config::config().await;
    let (address, port) = config
        .api
        .host
        .split_once(':')
        .expect("`api.host` should look like `0.0.0.0:8000`");
    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", port.parse::<u16>().expect("Invalid `api.host` port.")));

    info!("Starting API server on {}", config.api.host);

    let rocket = rocket::custom(figment);
    routes::mount(rocket)
        .mount("/", rocket_cors::catch_all_options_routes())
        .mount(
            "/swagger/",
            rocket_okapi::swagger_ui::make_swagger_ui(&rocket_okapi::swagger_ui::SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .manage(db)
        .manage(sink)
        .manage(cors.clone())
        .attach(cors)
}
