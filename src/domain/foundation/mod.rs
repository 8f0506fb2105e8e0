//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and identifiers that form the vocabulary
//! of the messaging domain.

mod ids;
mod timestamp;

pub use ids::{DraftId, UserKey};
pub use timestamp::Timestamp;
