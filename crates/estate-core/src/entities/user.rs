//! User entity - an account that lists offers and writes comments

use chrono::{DateTime, Utc};

use crate::value_objects::{ObjectId, UserType};

/// User entity
///
/// The password hash lives only in the persistence layer and is never
/// loaded into this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: ObjectId, name: String, email: String, user_type: UserType) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            avatar: None,
            user_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user has a pro account
    #[inline]
    pub fn is_pro(&self) -> bool {
        self.user_type == UserType::Pro
    }

    /// Update the avatar
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}
