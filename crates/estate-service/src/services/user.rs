//! User service
//!
//! Handles account creation and profile lookups.

use async_trait::async_trait;
use estate_common::auth::hash_password;
use estate_core::{ObjectId, User};
use tracing::{info, instrument};

use crate::dto::CreateUserRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::exists::DocumentExists;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Find a user by id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ObjectId) -> ServiceResult<Option<User>> {
        Ok(self.ctx.user_repo().find_by_id(id).await?)
    }

    /// Find a user by email
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.ctx.user_repo().find_by_email(email).await?)
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<User> {
        if self.find_by_email(&request.email).await?.is_some() {
            return Err(ServiceError::conflict("User with this email already exists"));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            self.ctx.generate_id(),
            request.name,
            request.email,
            request.user_type,
        );

        // The store enforces uniqueness too; a concurrent duplicate surfaces as Conflict
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Store a new avatar file name
    #[instrument(skip(self))]
    pub async fn update_avatar(&self, id: ObjectId, file_name: &str) -> ServiceResult<User> {
        let mut user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_hex()))?;

        self.ctx.user_repo().update_avatar(id, file_name).await?;
        user.set_avatar(Some(file_name.to_string()));

        info!(user_id = %id, "Avatar updated");

        Ok(user)
    }

    /// Check whether a user exists
    #[instrument(skip(self))]
    pub async fn exists(&self, id: ObjectId) -> ServiceResult<bool> {
        Ok(self.ctx.user_repo().exists(id).await?)
    }
}

#[async_trait]
impl DocumentExists for UserService<'_> {
    fn document_kind(&self) -> &'static str {
        "User"
    }

    async fn exists(&self, id: ObjectId) -> ServiceResult<bool> {
        UserService::exists(self, id).await
    }
}
