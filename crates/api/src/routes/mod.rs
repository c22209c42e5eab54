use rocket_okapi::{okapi::openapi3::OpenApi, settings::OpenApiSettings};
use rocket::{Build, Rocket};

mod root;
mod safety;

pub fn mount(mut rocket: Rocket<Build>) -> Rocket<Build> {
    let settings = OpenApiSettings::default();

    mount_endpoints_and_merged_docs! {
        rocket, "/".to_owned(), settings,
        "/" => (vec![], custom_openapi_spec()),
        "" => openapi_get_routes_spec![root::root],
        "/safety" => safety::routes()
    };

    rocket
}

fn custom_openapi_spec() -> OpenApi {
    use rocket_okapi::okapi::openapi3::*;

    let mut extensions = schemars::Map::new();
    extensions.insert(
        "x-tagGroups".to_owned(),
        json!([
            {
                "name": "Quill",
                "tags": [
                    "Core"
                ]
            },
            {
                "name": "Safety",
                "tags": [
                    "User Safety",
                    "Moderation"
                ]
            }
        ]),
    );

    OpenApi {
        openapi: OpenApi::default_version(),
        info: Info {
            title: "Quill API".to_owned(),
            description: Some("Moderation and safety API for the Quill diary platform.".to_owned()),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            extensions,
            ..Default::default()
        },
        ..Default::default()
    }
}
