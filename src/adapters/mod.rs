//! Adapters - implementations of the skill's ports.
//!
//! `memory` holds recording adapters for tests; `console` holds the
//! stdout adapters the demo binary wires in. The real hosting framework
//! supplies its own implementations in production.

pub mod console;
pub mod memory;

pub use console::{ConsoleDelivery, ConsoleDialog};
pub use memory::{EmailHandoff, RecordingDelivery, RecordingDialog, SmsHandoff, StaticVocabulary};
