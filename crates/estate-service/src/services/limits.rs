//! Result-size limits for list queries

/// Offers returned by `GET /offers` when no limit is given
pub const DEFAULT_OFFER_LIMIT: i64 = 60;

/// Premium offers returned per city
pub const DEFAULT_PREMIUM_LIMIT: i64 = 3;

/// Favorite offers returned when no limit is given
pub const DEFAULT_FAVORITE_LIMIT: i64 = 60;

/// Comments returned per offer
pub const DEFAULT_COMMENT_LIMIT: i64 = 50;

/// Upper bound for any client-supplied limit
pub const MAX_LIMIT: i64 = 100;

/// Resolve a client-supplied limit, clamping it to `1..=MAX_LIMIT`
pub fn resolve_limit(requested: Option<i64>, default: i64) -> i64 {
    requested.map_or(default, |limit| limit.clamp(1, MAX_LIMIT))
}
