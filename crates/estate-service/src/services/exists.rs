//! Existence check shared by services whose documents are addressed by id

use async_trait::async_trait;

use estate_core::ObjectId;

use super::error::ServiceResult;

/// A service that can tell whether a document with the given id exists
#[async_trait]
pub trait DocumentExists: Send + Sync {
    /// Human readable document kind, used in not-found messages
    fn document_kind(&self) -> &'static str;

    async fn exists(&self, id: ObjectId) -> ServiceResult<bool>;
}
