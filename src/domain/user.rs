//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate user record, without the password digest.
///
/// Carries the identifying fields of a registration request; the
/// plaintext secret travels separately so it can be dropped as soon as
/// hashing completes.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub user_name: String,
    pub email: String,
}

/// User response (safe to return to client, digest omitted)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Given name
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name
    #[schema(example = "Lovelace")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Unique username
    #[schema(example = "ada")]
    pub user_name: String,
    /// Unique email address
    #[schema(example = "ada@x.com")]
    pub email: String,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
    /// Record update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            user_name: user.user_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
