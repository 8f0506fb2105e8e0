//! Console adapters for the demo binary.
//!
//! Render dialog lines and delivery handoffs to stdout so the draft
//! flow can be exercised without a hosting framework.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::UserKey;
use crate::ports::{DeliveryChannel, DeliveryError, Dialog, DialogError, DialogRenderer};

/// Speaks dialog lines by printing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDialog;

impl ConsoleDialog {
    pub fn new() -> Self {
        Self
    }
}

/// A plain-English rendering of each template, standing in for the
/// host's per-language dialog files.
fn render(dialog: &Dialog) -> String {
    match dialog {
        Dialog::ConfirmMessage {
            kind,
            name,
            address,
            message,
        } => format!("Your {} to {} {} says: {}", kind, name, address, message),
        Dialog::ConfirmCall { name, number } => format!("Calling {} {}.", name, number),
        Dialog::ConfirmEmail => "Should I send the email?".to_string(),
        Dialog::ConfirmSend => "Should I send it?".to_string(),
        Dialog::ContactNotFound { kind, recipient } => {
            format!("I couldn't find a {} for {}.", kind, recipient)
        }
        Dialog::DiscardDraft => "Okay, I discarded the draft.".to_string(),
        Dialog::EmailSent => "Email sent.".to_string(),
        Dialog::TextSent => "Text message sent.".to_string(),
        Dialog::CallStarted { name } => format!("Calling {}.", name),
        Dialog::ErrorDialog => "Sorry, something went wrong.".to_string(),
        Dialog::GetRecipientAddress { kind } => {
            format!("Who should receive the {}?", kind)
        }
        Dialog::GetEmailSubject => "What is the subject?".to_string(),
        Dialog::GetEmailBody => "Go ahead with the body, and say done to finish.".to_string(),
        Dialog::GetMessageContent => "What is the message?".to_string(),
        Dialog::OnlyMobile { action } => {
            format!("I'm only able to {} from mobile devices right now.", action)
        }
    }
}

#[async_trait]
impl DialogRenderer for ConsoleDialog {
    async fn speak_dialog(
        &self,
        user: &UserKey,
        dialog: Dialog,
        _context: &Value,
    ) -> Result<(), DialogError> {
        println!("[{}] {}", user, render(&dialog));
        Ok(())
    }
}

/// Delivery channel that prints handoffs instead of transmitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDelivery;

impl ConsoleDelivery {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryChannel for ConsoleDelivery {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DeliveryError> {
        println!("--- email handoff ---");
        println!("to: {}\nsubject: {}\n{}", recipient, subject, body);
        Ok(())
    }

    async fn send_sms(&self, number: &str, text: &str) -> Result<(), DeliveryError> {
        println!("--- sms handoff: {} <- {:?} ---", number, text);
        Ok(())
    }

    async fn place_call(&self, number: &str) -> Result<(), DeliveryError> {
        println!("--- dialing {} ---", number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dialog_renders_nonempty_text() {
        let dialogs = [
            Dialog::ConfirmEmail,
            Dialog::ConfirmSend,
            Dialog::DiscardDraft,
            Dialog::EmailSent,
            Dialog::TextSent,
            Dialog::ErrorDialog,
            Dialog::GetEmailSubject,
            Dialog::GetEmailBody,
            Dialog::GetMessageContent,
        ];
        for dialog in dialogs {
            assert!(!render(&dialog).is_empty());
        }
    }
}
