//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::setup::routes::health::{self, HealthCheckResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mediadrop API",
        version = "0.1.0",
        description = "Anonymous file drop: uploads are sniffed and published under a random slot."
    ),
    paths(
        handlers::upload::upload_files,
        handlers::ping::ping,
        health::health_check,
    ),
    components(schemas(ErrorResponse, HealthCheckResponse)),
    tags(
        (name = "upload", description = "File upload"),
        (name = "health", description = "Liveness and storage health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
