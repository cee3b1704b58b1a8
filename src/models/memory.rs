use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Characters of `content` kept in a list excerpt.
pub const EXCERPT_CHARS: usize = 115;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cover_url: String,
    pub content: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInput {
    pub content: String,
    pub cover_url: String,
    #[serde(default)]
    pub is_public: bool,
}

/// List view of a memory: content is cut down to an excerpt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub id: Uuid,
    pub cover_url: String,
    pub excerpt: String,
    pub created_at: DateTime<Utc>,
}

impl Memory {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Visible to `viewer` when public or owned.
    pub fn is_visible_to(&self, viewer: Uuid) -> bool {
        self.is_public || self.is_owned_by(viewer)
    }

    pub fn summary(&self) -> MemorySummary {
        MemorySummary {
            id: self.id,
            cover_url: self.cover_url.clone(),
            excerpt: excerpt(&self.content),
            created_at: self.created_at,
        }
    }
}

/// First [`EXCERPT_CHARS`] characters followed by `...`. Always appends the ellipsis.
pub fn excerpt(content: &str) -> String {
    let mut out: String = content.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
