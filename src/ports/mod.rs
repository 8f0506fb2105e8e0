//! Ports - Interfaces to the hosting framework and delivery channels.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the skill core and the outside world. Adapters implement them: the
//! hosting framework's dialog/TTS layer behind `DialogRenderer`, and
//! the mobile-device or provider channels behind `DeliveryChannel`.

mod delivery;
mod dialog;

pub use delivery::{DeliveryChannel, DeliveryError};
pub use dialog::{Dialog, DialogError, DialogRenderer};
