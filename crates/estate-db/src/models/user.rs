//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
///
/// The password hash is never selected into this model; it is read on its
/// own by `get_password_hash`.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
