//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::UserResponse;

/// OpenAPI documentation for the user registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry",
        version = "0.1.0",
        description = "User registration API with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:1234", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::list_users,
    ),
    components(
        schemas(
            UserResponse,
            user_handler::CreateUserRequest,
        )
    ),
    tags(
        (name = "Users", description = "User registration and listing")
    )
)]
pub struct ApiDoc;
