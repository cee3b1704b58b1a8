//! OpenAPI document served at `/openapi.json`.

use crate::handlers::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::upload::{UploadForm, UploadResponse};
use crate::models::{Memory, MemoryInput, MemorySummary, User, UserInput};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "memories-api",
        description = "Users, memories and uploads REST backend."
    ),
    paths(
        crate::handlers::users::list_users,
        crate::handlers::users::read_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::memories::list_memories,
        crate::handlers::memories::read_memory,
        crate::handlers::memories::create_memory,
        crate::handlers::memories::update_memory,
        crate::handlers::memories::delete_memory,
        crate::handlers::auth::register,
        crate::handlers::upload::upload
    ),
    components(schemas(
        User,
        UserInput,
        Memory,
        MemoryInput,
        MemorySummary,
        RegisterRequest,
        RegisterResponse,
        UploadForm,
        UploadResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Users", description = "User records"),
        (name = "Memories", description = "Per-user memories; bearer token required"),
        (name = "Auth", description = "GitHub sign-in"),
        (name = "Uploads", description = "Image and video uploads")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_and_bearer_scheme() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in ["/users", "/users/{id}", "/memories", "/memories/{id}", "/register", "/upload"] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
    }
}
