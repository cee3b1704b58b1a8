use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored user. `id` is assigned by the service on insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub github_id: i64,
    pub name: String,
    pub login: String,
    pub avatar_url: String,
}

/// Body of `POST /users` and `PUT /users/:id`. Every field is required; update replaces all four.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub github_id: i64,
    pub name: String,
    pub login: String,
    pub avatar_url: String,
}

impl User {
    pub fn from_input(id: Uuid, input: UserInput) -> Self {
        User {
            id,
            github_id: input.github_id,
            name: input.name,
            login: input.login,
            avatar_url: input.avatar_url,
        }
    }
}
