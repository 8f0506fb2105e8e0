//! Message kinds a draft can be composed for.

use serde::{Deserialize, Serialize};

/// The channel a draft will be delivered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    /// An email with recipient, subject, and multi-line body.
    Email,

    /// An SMS with recipient and a single message.
    TextMessage,

    /// A phone call; address-complete at creation.
    Call,
}

impl DraftKind {
    /// The label used when speaking about the draft ("send your email...").
    pub fn spoken_label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::TextMessage => "text message",
            Self::Call => "call",
        }
    }

    /// The label for the kind of address this draft needs, used in the
    /// contact-not-found notice.
    pub fn address_type_label(&self) -> &'static str {
        match self {
            Self::Email => "email address",
            Self::TextMessage => "phone number",
            Self::Call => "contact info",
        }
    }

    /// Returns true if this kind is addressed by a phone number.
    pub fn uses_phone_number(&self) -> bool {
        matches!(self, Self::TextMessage | Self::Call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_labels_match_the_dialog_vocabulary() {
        assert_eq!(DraftKind::Email.spoken_label(), "email");
        assert_eq!(DraftKind::TextMessage.spoken_label(), "text message");
        assert_eq!(DraftKind::Call.spoken_label(), "call");
    }

    #[test]
    fn address_type_labels_cover_every_kind() {
        assert_eq!(DraftKind::Email.address_type_label(), "email address");
        assert_eq!(DraftKind::TextMessage.address_type_label(), "phone number");
        assert_eq!(DraftKind::Call.address_type_label(), "contact info");
    }

    #[test]
    fn phone_addressing_applies_to_sms_and_calls_only() {
        assert!(!DraftKind::Email.uses_phone_number());
        assert!(DraftKind::TextMessage.uses_phone_number());
        assert!(DraftKind::Call.uses_phone_number());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&DraftKind::TextMessage).unwrap();
        assert_eq!(json, "\"text_message\"");
    }
}
