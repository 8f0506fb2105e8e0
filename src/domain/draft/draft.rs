//! Draft entity - one in-progress message per user.

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{DraftId, Timestamp};

use super::kind::DraftKind;
use super::stage::DraftStage;

/// Errors raised by draft mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("a {kind:?} draft cannot move from {from:?} to {to:?}")]
    StageRegression {
        kind: DraftKind,
        from: DraftStage,
        to: DraftStage,
    },
}

/// An in-progress message being composed turn-by-turn.
///
/// Content fields are populated incrementally; which of them matter
/// depends on `kind`. The `recipient` starts as raw spoken text and is
/// replaced with the resolved delivery address during confirmation.
/// The `context` payload is carried through to dialog rendering
/// untouched; the skill never interprets it.
#[derive(Debug, Clone)]
pub struct Draft {
    id: DraftId,
    kind: DraftKind,
    recipient: String,
    subject: String,
    body: String,
    message: String,
    number: Option<String>,
    name: Option<String>,
    stage: DraftStage,
    context: Value,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Draft {
    fn new(kind: DraftKind, context: Value) -> Self {
        let now = Timestamp::now();
        Self {
            id: DraftId::new(),
            kind,
            recipient: String::new(),
            subject: String::new(),
            body: String::new(),
            message: String::new(),
            number: None,
            name: None,
            stage: DraftStage::initial(kind),
            context,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an empty email draft awaiting a recipient.
    pub fn email(context: Value) -> Self {
        Self::new(DraftKind::Email, context)
    }

    /// Creates an empty SMS draft awaiting a recipient.
    pub fn text_message(context: Value) -> Self {
        Self::new(DraftKind::TextMessage, context)
    }

    /// Creates a call draft. Calls arrive address-complete from the
    /// invoking intent and go straight to confirmation.
    pub fn call(recipient: impl Into<String>, number: Option<String>, context: Value) -> Self {
        let mut draft = Self::new(DraftKind::Call, context);
        draft.recipient = recipient.into();
        draft.number = number;
        draft
    }

    // === Accessors ===

    pub fn id(&self) -> DraftId {
        self.id
    }

    pub fn kind(&self) -> DraftKind {
        self.kind
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn stage(&self) -> DraftStage {
        self.stage
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The content spoken back in the confirmation prompt: the subject
    /// for an email, the message for an SMS, nothing for a call.
    pub fn confirmation_excerpt(&self) -> Option<&str> {
        match self.kind {
            DraftKind::Email => Some(&self.subject),
            DraftKind::TextMessage => Some(&self.message),
            DraftKind::Call => None,
        }
    }

    // === Stage transitions ===

    /// Advances the stage cursor. Only forward steps along the kind's
    /// fixed sequence are accepted.
    pub fn advance(&mut self, to: DraftStage) -> Result<(), DraftError> {
        if !self.stage.can_advance_to(to, self.kind) {
            return Err(DraftError::StageRegression {
                kind: self.kind,
                from: self.stage,
                to,
            });
        }
        self.stage = to;
        self.touch();
        Ok(())
    }

    // === Content mutators ===

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
        self.touch();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
        self.touch();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.touch();
    }

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = Some(number.into());
        self.touch();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
        self.touch();
    }

    /// Appends one dictated line to the email body.
    pub fn append_body_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    /// Rewrites the freshness timestamp, for expiry tests.
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, seconds: i64) {
        self.updated_at = self.updated_at.minus_seconds(seconds);
    }
}
