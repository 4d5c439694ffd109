//! `?limit=` query extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use estate_service::dto::LimitQuery;

use crate::response::ApiError;

/// Requested list size; the service applies its default and clamps the value
#[derive(Debug, Clone, Copy, Default)]
pub struct Limit(pub Option<i64>);

#[async_trait]
impl<S> FromRequestParts<S> for Limit
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<LimitQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Limit(query.limit))
    }
}
