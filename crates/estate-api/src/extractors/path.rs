//! Path parameter extractors
//!
//! Route parameters are read by name so the same step works for every
//! route that carries the parameter.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use estate_core::{City, ObjectId};

use crate::response::{origin, ApiError, ApiResult};

/// A route parameter holding a document id
pub trait IdParam: Send + Sync + 'static {
    /// Parameter name as written in the route, e.g. `offerId`
    const NAME: &'static str;
}

/// `:offerId`
#[derive(Debug, Clone, Copy)]
pub struct OfferIdParam;

impl IdParam for OfferIdParam {
    const NAME: &'static str = "offerId";
}

/// `:userId`
#[derive(Debug, Clone, Copy)]
pub struct UserIdParam;

impl IdParam for UserIdParam {
    const NAME: &'static str = "userId";
}

/// Read one named path parameter
async fn path_param<S>(parts: &mut Parts, state: &S, name: &str) -> ApiResult<String>
where
    S: Send + Sync,
{
    let Path(mut params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_path(e.body_text()))?;

    params
        .remove(name)
        .ok_or_else(|| ApiError::invalid_path(format!("Missing path parameter {name}")))
}

/// A well-formed document id taken from the `P` route parameter
pub struct ValidObjectId<P> {
    pub id: ObjectId,
    _param: PhantomData<P>,
}

impl<P> fmt::Debug for ValidObjectId<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidObjectId").field(&self.id).finish()
    }
}

#[async_trait]
impl<S, P> FromRequestParts<S> for ValidObjectId<P>
where
    S: Send + Sync,
    P: IdParam,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state, P::NAME)
            .await
            .map_err(|e| e.with_origin(origin::VALIDATE_OBJECT_ID))?;

        let id = ObjectId::parse(&raw).map_err(|_| {
            ApiError::invalid_id(format!("{raw} is invalid ObjectID"))
                .with_origin(origin::VALIDATE_OBJECT_ID)
        })?;

        Ok(Self {
            id,
            _param: PhantomData,
        })
    }
}

/// `:city` parsed into a known city
#[derive(Debug, Clone, Copy)]
pub struct CityParam(pub City);

#[async_trait]
impl<S> FromRequestParts<S> for CityParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state, "city")
            .await
            .map_err(|e| e.with_origin(origin::OFFER_CONTROLLER))?;

        raw.parse::<City>().map(CityParam).map_err(|e| {
            ApiError::invalid_path(e.to_string()).with_origin(origin::OFFER_CONTROLLER)
        })
    }
}

/// `:status` of the favorite toggle, `1` to set and `0` to clear
#[derive(Debug, Clone, Copy)]
pub struct FavoriteStatus(pub bool);

#[async_trait]
impl<S> FromRequestParts<S> for FavoriteStatus
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state, "status")
            .await
            .map_err(|e| e.with_origin(origin::OFFER_CONTROLLER))?;

        match raw.as_str() {
            "1" => Ok(FavoriteStatus(true)),
            "0" => Ok(FavoriteStatus(false)),
            _ => Err(ApiError::invalid_path(format!("Favorite status must be 0 or 1, got {raw}"))
                .with_origin(origin::OFFER_CONTROLLER)),
        }
    }
}
