//! Dialog rendering port.
//!
//! The hosting framework owns the per-language dialog templates and the
//! TTS pipeline. The skill speaks by naming a template and its
//! substitutions; the host renders and voices it.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::UserKey;

/// Errors surfaced by the host's dialog layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog rendering failed: {0}")]
    Render(String),
}

/// A dialog template plus its substitutions.
///
/// Variant names mirror the host's template files; the fields are the
/// values interpolated into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// "Your {kind} to {name} {address} says {message}. Should I send it?"
    ConfirmMessage {
        kind: String,
        name: String,
        address: String,
        message: String,
    },
    /// "Calling {name} {number}. Is that right?"
    ConfirmCall { name: String, number: String },
    /// Follow-up question after an email confirmation readback.
    ConfirmEmail,
    /// Follow-up question after an SMS confirmation readback.
    ConfirmSend,
    /// "I couldn't find a {kind} for {recipient}."
    ContactNotFound { kind: String, recipient: String },
    /// Discard notice after a declined confirmation.
    DiscardDraft,
    EmailSent,
    TextSent,
    /// "Calling {name}."
    CallStarted { name: String },
    /// Generic failure notice.
    ErrorDialog,
    /// "Who should receive the {kind}?"
    GetRecipientAddress { kind: String },
    GetEmailSubject,
    GetEmailBody,
    /// "What is the message?"
    GetMessageContent,
    /// "I can only {action} from mobile devices right now."
    OnlyMobile { action: String },
}

impl Dialog {
    /// The host-side template name this dialog renders with.
    pub fn template(&self) -> &'static str {
        match self {
            Dialog::ConfirmMessage { .. } => "ConfirmMessage",
            Dialog::ConfirmCall { .. } => "ConfirmCall",
            Dialog::ConfirmEmail => "ConfirmEmail",
            Dialog::ConfirmSend => "ConfirmSend",
            Dialog::ContactNotFound { .. } => "ContactNotFound",
            Dialog::DiscardDraft => "DiscardDraft",
            Dialog::EmailSent => "EmailSent",
            Dialog::TextSent => "TextSent",
            Dialog::CallStarted { .. } => "CallStarted",
            Dialog::ErrorDialog => "ErrorDialog",
            Dialog::GetRecipientAddress { .. } => "GetRecipientAddress",
            Dialog::GetEmailSubject => "GetEmailSubject",
            Dialog::GetEmailBody => "GetEmailBody",
            Dialog::GetMessageContent => "GetMessageContent",
            Dialog::OnlyMobile { .. } => "OnlyMobile",
        }
    }

    /// Whether the host should keep this line out of shared transcripts.
    ///
    /// Message drafting is private conversation; only the final sent
    /// notice for an SMS is public.
    pub fn is_private(&self) -> bool {
        !matches!(self, Dialog::TextSent)
    }

    /// Whether the host should reopen the microphone for an answer.
    pub fn expects_response(&self) -> bool {
        matches!(
            self,
            Dialog::ConfirmEmail
                | Dialog::ConfirmSend
                | Dialog::GetRecipientAddress { .. }
                | Dialog::GetEmailSubject
                | Dialog::GetEmailBody
                | Dialog::GetMessageContent
        )
    }
}

/// Renders dialog lines through the hosting framework.
#[async_trait]
pub trait DialogRenderer: Send + Sync {
    /// Speaks a dialog line to the user.
    ///
    /// The `context` payload is the draft's opaque conversational
    /// context; the host uses it to route the utterance back to the
    /// right channel. The skill never inspects it.
    async fn speak_dialog(
        &self,
        user: &UserKey,
        dialog: Dialog,
        context: &Value,
    ) -> Result<(), DialogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_expect_a_response() {
        assert!(Dialog::GetEmailSubject.expects_response());
        assert!(Dialog::ConfirmSend.expects_response());
        assert!(Dialog::GetMessageContent.expects_response());
    }

    #[test]
    fn notices_do_not_expect_a_response() {
        assert!(!Dialog::DiscardDraft.expects_response());
        assert!(!Dialog::EmailSent.expects_response());
        assert!(!Dialog::ErrorDialog.expects_response());
    }

    #[test]
    fn only_the_sms_sent_notice_is_public() {
        assert!(!Dialog::TextSent.is_private());
        assert!(Dialog::EmailSent.is_private());
        assert!(Dialog::ConfirmEmail.is_private());
    }

    #[test]
    fn dialog_renderer_is_object_safe() {
        fn _accepts_dyn(_renderer: &dyn DialogRenderer) {}
    }
}
