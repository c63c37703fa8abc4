use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub email: String,              // normalised (lowercase) email
    pub created_at: OffsetDateTime, // creation timestamp
}

/// Pending login link. Only the keyed digest of the token is kept.
#[derive(Debug, Clone, FromRow)]
pub struct LoginToken {
    pub id: Uuid,
    pub email: String,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
}
