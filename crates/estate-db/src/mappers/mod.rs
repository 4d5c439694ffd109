//! Entity to model mappers
//!
//! This module provides conversions between domain entities (estate-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod comment;
mod offer;
mod user;

pub use comment::CommentInsert;
pub use offer::{OfferInsert, OfferUpdate};
pub use user::UserInsert;

use std::str::FromStr;

use estate_core::{DomainError, ObjectId};

/// Parse a stored text column into a typed value
fn parse_column<T>(column: &'static str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DomainError::DatabaseError(format!("corrupt {column} value {value:?}: {e}")))
}

/// Parse a stored object id column
fn parse_id(column: &'static str, value: &str) -> Result<ObjectId, DomainError> {
    parse_column(column, value)
}
