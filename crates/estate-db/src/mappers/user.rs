//! User entity <-> model mapper

use estate_core::{DomainError, User};

use crate::models::UserModel;

use super::{parse_column, parse_id};

/// Convert UserModel to User entity
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: parse_id("users.id", &model.id)?,
            name: model.name,
            email: model.email,
            avatar: model.avatar,
            user_type: parse_column("users.user_type", &model.user_type)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// User entity values for database insertion
pub struct UserInsert<'a> {
    pub id: String,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub avatar: Option<&'a str>,
    pub user_type: &'static str,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.to_hex(),
            name: &user.name,
            email: &user.email,
            password_hash,
            avatar: user.avatar.as_deref(),
            user_type: user.user_type.as_str(),
        }
    }
}
