//! Draft stage machine.
//!
//! The stage cursor records what the next user turn must supply. Each
//! kind has a fixed linear sequence; the cursor only ever moves forward
//! along it (skipping stages already answered by the first utterance is
//! allowed). Regression requires starting a new draft.

use serde::{Deserialize, Serialize};

use super::kind::DraftKind;

/// What the next user turn must supply for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStage {
    /// Waiting for the recipient name or address.
    Recipient,

    /// Waiting for the email subject line.
    Subject,

    /// Collecting email body lines until the user says "done".
    Body,

    /// Waiting for the SMS message text.
    Message,

    /// Waiting for a yes/no answer to the confirmation prompt.
    Confirmation,
}

impl DraftStage {
    /// The fixed stage sequence for a kind.
    pub fn sequence(kind: DraftKind) -> &'static [DraftStage] {
        use DraftStage::*;
        match kind {
            DraftKind::Email => &[Recipient, Subject, Body, Confirmation],
            DraftKind::TextMessage => &[Recipient, Message, Confirmation],
            DraftKind::Call => &[Confirmation],
        }
    }

    /// The stage a freshly created draft of the given kind starts in.
    pub fn initial(kind: DraftKind) -> DraftStage {
        Self::sequence(kind)[0]
    }

    /// Position of this stage within the kind's sequence, if it belongs.
    pub fn position_in(&self, kind: DraftKind) -> Option<usize> {
        Self::sequence(kind).iter().position(|s| s == self)
    }

    /// Returns true if moving from this stage to `target` is a forward
    /// step along the kind's sequence.
    pub fn can_advance_to(&self, target: DraftStage, kind: DraftKind) -> bool {
        match (self.position_in(kind), target.position_in(kind)) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_sequence_runs_recipient_to_confirmation() {
        assert_eq!(
            DraftStage::sequence(DraftKind::Email),
            &[
                DraftStage::Recipient,
                DraftStage::Subject,
                DraftStage::Body,
                DraftStage::Confirmation,
            ]
        );
    }

    #[test]
    fn sms_sequence_has_no_subject_or_body() {
        assert_eq!(
            DraftStage::sequence(DraftKind::TextMessage),
            &[DraftStage::Recipient, DraftStage::Message, DraftStage::Confirmation]
        );
    }

    #[test]
    fn call_drafts_start_at_confirmation() {
        assert_eq!(DraftStage::initial(DraftKind::Call), DraftStage::Confirmation);
    }

    #[test]
    fn forward_steps_are_allowed_including_skips() {
        assert!(DraftStage::Recipient.can_advance_to(DraftStage::Subject, DraftKind::Email));
        // A first utterance carrying recipient and subject skips straight to body.
        assert!(DraftStage::Recipient.can_advance_to(DraftStage::Body, DraftKind::Email));
        assert!(DraftStage::Recipient.can_advance_to(DraftStage::Confirmation, DraftKind::TextMessage));
    }

    #[test]
    fn regression_is_rejected() {
        assert!(!DraftStage::Body.can_advance_to(DraftStage::Recipient, DraftKind::Email));
        assert!(!DraftStage::Confirmation.can_advance_to(DraftStage::Message, DraftKind::TextMessage));
    }

    #[test]
    fn stages_outside_the_kind_sequence_are_rejected() {
        // SMS drafts have no subject stage in either direction.
        assert!(!DraftStage::Recipient.can_advance_to(DraftStage::Subject, DraftKind::TextMessage));
        assert!(!DraftStage::Subject.can_advance_to(DraftStage::Confirmation, DraftKind::TextMessage));
    }

    #[test]
    fn staying_in_place_is_not_an_advance() {
        assert!(!DraftStage::Body.can_advance_to(DraftStage::Body, DraftKind::Email));
    }
}
