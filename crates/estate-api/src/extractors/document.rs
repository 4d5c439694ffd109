//! Existence and ownership steps
//!
//! Both run before the handler reads the body, so a missing or foreign
//! document is rejected before anything is written.

use std::fmt;
use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use estate_core::{ObjectId, Offer};
use estate_service::{DocumentExists, OfferService, ServiceContext, UserService};

use super::auth::AuthUser;
use super::path::{IdParam, OfferIdParam, UserIdParam, ValidObjectId};
use crate::response::{origin, ApiError, WithOrigin};
use crate::state::AppState;

/// An id parameter whose document can be looked up
pub trait DocumentParam: IdParam {
    fn checker(ctx: &ServiceContext) -> Box<dyn DocumentExists + '_>;
}

impl DocumentParam for OfferIdParam {
    fn checker(ctx: &ServiceContext) -> Box<dyn DocumentExists + '_> {
        Box::new(OfferService::new(ctx))
    }
}

impl DocumentParam for UserIdParam {
    fn checker(ctx: &ServiceContext) -> Box<dyn DocumentExists + '_> {
        Box::new(UserService::new(ctx))
    }
}

/// Id of a document that exists at extraction time
pub struct Existing<P> {
    pub id: ObjectId,
    _param: PhantomData<P>,
}

impl<P> fmt::Debug for Existing<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Existing").field(&self.id).finish()
    }
}

#[async_trait]
impl<S, P> FromRequestParts<S> for Existing<P>
where
    S: Send + Sync,
    AppState: FromRef<S>,
    P: DocumentParam,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ValidObjectId { id, .. } = ValidObjectId::<P>::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let checker = P::checker(app_state.service_context());

        if !checker.exists(id).await.origin(origin::DOCUMENT_EXISTS)? {
            return Err(ApiError::not_found(format!(
                "{} with id {id} not found.",
                checker.document_kind()
            ))
            .with_origin(origin::DOCUMENT_EXISTS));
        }

        Ok(Self {
            id,
            _param: PhantomData,
        })
    }
}

/// An offer listed by the authenticated user
#[derive(Debug, Clone)]
pub struct OwnedOffer {
    pub user: AuthUser,
    pub offer: Offer,
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnedOffer
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let Existing { id, .. } =
            Existing::<OfferIdParam>::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let offer = OfferService::new(app_state.service_context())
            .find_by_id(id)
            .await
            .origin(origin::CHECK_OWNER)?
            .ok_or_else(|| {
                ApiError::not_found(format!("Offer with id {id} not found."))
                    .with_origin(origin::DOCUMENT_EXISTS)
            })?;

        OfferService::ensure_author(&offer, user.user_id).origin(origin::CHECK_OWNER)?;

        Ok(Self { user, offer })
    }
}

/// The authenticated user's own account, named by `:userId`
#[derive(Debug, Clone)]
pub struct OwnAccount {
    pub user: AuthUser,
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnAccount
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let Existing { id, .. } = Existing::<UserIdParam>::from_request_parts(parts, state).await?;

        if id != user.user_id {
            return Err(ApiError::forbidden("Only the account owner may change it")
                .with_origin(origin::CHECK_OWNER));
        }

        Ok(Self { user })
    }
}
