//! Service context - dependency container for services
//!
//! Holds the repositories and shared helpers needed by services.

use std::sync::Arc;

use estate_common::auth::JwtService;
use estate_core::traits::{CommentRepository, OfferRepository, UserRepository};
use estate_core::{ObjectId, ObjectIdGenerator};
use estate_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent for the in-memory backend
    pool: Option<PgPool>,

    // Repositories
    offer_repo: Arc<dyn OfferRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    id_generator: Arc<ObjectIdGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        offer_repo: Arc<dyn OfferRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        user_repo: Arc<dyn UserRepository>,
        jwt_service: Arc<JwtService>,
        id_generator: Arc<ObjectIdGenerator>,
    ) -> Self {
        Self {
            pool,
            offer_repo,
            comment_repo,
            user_repo,
            jwt_service,
            id_generator,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if the context is backed by one
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the offer repository
    pub fn offer_repo(&self) -> &dyn OfferRepository {
        self.offer_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new document id
    pub fn generate_id(&self) -> ObjectId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("postgres", &self.pool.is_some())
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    offer_repo: Option<Arc<dyn OfferRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    id_generator: Option<Arc<ObjectIdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            offer_repo: None,
            comment_repo: None,
            user_repo: None,
            jwt_service: None,
            id_generator: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn offer_repo(mut self, repo: Arc<dyn OfferRepository>) -> Self {
        self.offer_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn id_generator(mut self, generator: Arc<ObjectIdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// The pool is optional and an id generator is created when none is given.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a repository or the JWT service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.offer_repo
                .ok_or_else(|| ServiceError::internal("offer_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::internal("comment_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::internal("jwt_service is required"))?,
            self.id_generator.unwrap_or_default(),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
