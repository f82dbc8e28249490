//! OpenAPI document and Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, GenerateResponse, UppercaseResponse};
use crate::error::ErrorResponse;
use crate::transform::Capitalization;

/// Path serving the OpenAPI JSON document.
pub const OPENAPI_PATH: &str = "/apispec_1.json";
/// Path serving the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/apidocs";

/// OpenAPI description of the text endpoints.
#[derive(OpenApi)]
#[openapi(
    info(description = "Uppercase text and generate duplicated strings from query parameters."),
    paths(handlers::uppercase, handlers::generate),
    components(schemas(UppercaseResponse, GenerateResponse, ErrorResponse, Capitalization)),
    tags(
        (name = "Text Processing", description = "Case conversion of a single text value"),
        (name = "String Processing", description = "Generation of strings from a message")
    )
)]
pub struct ApiDoc;

/// Swagger UI bound to the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}
