//! Integration test utilities for the estate server
//!
//! Spawns the full server on an ephemeral port and drives it through
//! `estate-client`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
