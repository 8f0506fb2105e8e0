//! Recipient resolution.
//!
//! Reconciles a draft's spoken recipient against structured contact
//! data (when the contact service supplied candidates) or against the
//! raw text itself, producing the final delivery address and the name
//! spoken back in the confirmation prompt.

mod contact;
mod resolver;

pub use contact::{ContactCandidate, PhoneField};
pub use resolver::{digits_only, format_national, resolve_recipient, Resolution};
