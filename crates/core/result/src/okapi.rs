use rocket_okapi::okapi;
use rocket_okapi::okapi::openapi3;

use crate::Error;

impl rocket_okapi::response::OpenApiResponderInner for Error {
    fn responses(
        gen: &mut rocket_okapi::gen::OpenApiGenerator,
    ) -> std::result::Result<openapi3::Responses, rocket_okapi::OpenApiError> {
        let schema = gen.json_schema::<Error>();

        let mut content = okapi::Map::new();
        content.insert(
            "application/json".to_string(),
            openapi3::MediaType {
                schema: Some(schema),
                ..Default::default()
            },
        );

        Ok(openapi3::Responses {
            default: Some(openapi3::RefOr::Object(openapi3::Response {
                content,
                description: "An error occurred.".to_string(),
                ..Default::default()
            })),
            ..Default::default()
        })
    }
}
