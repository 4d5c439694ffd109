//! In-memory backend
//!
//! Implements the same repository traits as the PostgreSQL backend on top of
//! a shared [`MemoryStore`]. Selected with `DATABASE_URL=memory://` for local
//! runs and tests. Foreign keys and cascades are enforced by the store itself.

mod comment;
mod offer;
mod store;
mod user;

pub use comment::MemoryCommentRepository;
pub use offer::MemoryOfferRepository;
pub use store::MemoryStore;
pub use user::MemoryUserRepository;

use estate_core::Offer;

/// Newest first; the id breaks ties between offers created in the same instant
fn sort_newest_first(offers: &mut [Offer]) {
    offers.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Convert a query limit into a `take` count
fn take_count(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}
