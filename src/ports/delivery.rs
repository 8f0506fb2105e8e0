//! Delivery channel port.
//!
//! Actual transmission is delegated to an external channel (the paired
//! mobile device or an email provider) reached through a side channel.
//! These calls are fire-and-forget handoffs made only after the user
//! confirmed the draft; retry policy belongs to the channel, not here.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a delivery channel at handoff time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("delivery channel rejected the {kind} handoff: {reason}")]
    Rejected { kind: &'static str, reason: String },

    #[error("no delivery channel is available for {0}")]
    Unavailable(&'static str),
}

/// Hands confirmed drafts to the delivery side channel.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Hands off a confirmed email.
    async fn send_email(&self, recipient: &str, subject: &str, body: &str)
        -> Result<(), DeliveryError>;

    /// Hands off a confirmed SMS. `number` is digits only.
    async fn send_sms(&self, number: &str, text: &str) -> Result<(), DeliveryError>;

    /// Starts a confirmed call. `number` is digits only.
    async fn place_call(&self, number: &str) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_channel_is_object_safe() {
        fn _accepts_dyn(_channel: &dyn DeliveryChannel) {}
    }

    #[test]
    fn errors_name_the_failing_kind() {
        let err = DeliveryError::Rejected {
            kind: "sms",
            reason: "device offline".to_string(),
        };
        assert!(err.to_string().contains("sms"));
        assert!(err.to_string().contains("device offline"));
    }
}
