//! # estate-api
//!
//! REST API server built with Axum framework.
//!
//! Every handler declares its request pipeline through extractors: token
//! check, object id validation, existence check, ownership check, DTO
//! validation, and multipart upload. A failing step rejects the request
//! before the handler body runs.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod storage;

pub use server::{create_app, create_app_state, run, serve};
pub use state::AppState;
