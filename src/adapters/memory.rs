//! In-memory adapters for testing.
//!
//! # Security Note
//!
//! These adapters are for **testing and demos only**. They use
//! `.expect()` on lock operations which will panic if locks are
//! poisoned; production hosts implement the ports themselves.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::domain::foundation::UserKey;
use crate::domain::vocabulary::{VocabSet, VocabularyMatcher};
use crate::ports::{DeliveryChannel, DeliveryError, Dialog, DialogError, DialogRenderer};

static LEXICON: Lazy<HashMap<VocabSet, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            VocabSet::Yes,
            &["yes", "confirm", "affirmative", "send", "okay", "go", "sure", "ok"][..],
        ),
        (
            VocabSet::No,
            &["no", "cancel", "discard", "nope", "stop", "don't"][..],
        ),
        (VocabSet::InternalChat, &["chat"][..]),
        (VocabSet::Email, &["email", "e-mail"][..]),
        (VocabSet::Sms, &["sms", "text", "text message"][..]),
    ])
});

/// Default English vocabulary matcher.
///
/// Matches on word boundaries: entries are compared against whole
/// tokens (multi-word entries against token runs), so "note" never
/// satisfies the `No` vocabulary. Hosts with per-language vocabulary
/// files supply their own `VocabularyMatcher` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticVocabulary;

impl StaticVocabulary {
    pub fn new() -> Self {
        Self
    }
}

impl VocabularyMatcher for StaticVocabulary {
    fn matches(&self, utterance: &str, vocab: VocabSet) -> bool {
        let Some(entries) = LEXICON.get(&vocab) else {
            return false;
        };
        let normalized = normalize(utterance);
        let padded = format!(" {} ", normalized);
        entries
            .iter()
            .any(|entry| padded.contains(&format!(" {} ", entry)))
    }
}

/// Lowercases and strips edge punctuation so "Yes!" matches "yes".
fn normalize(utterance: &str) -> String {
    utterance
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\''))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dialog renderer that records every line instead of speaking it.
#[derive(Debug, Default)]
pub struct RecordingDialog {
    spoken: Mutex<Vec<(UserKey, Dialog)>>,
}

impl RecordingDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every dialog spoken so far, in order.
    pub fn spoken(&self) -> Vec<Dialog> {
        self.spoken
            .lock()
            .expect("dialog lock poisoned")
            .iter()
            .map(|(_, dialog)| dialog.clone())
            .collect()
    }

    /// The most recent dialog, if any.
    pub fn last(&self) -> Option<Dialog> {
        self.spoken().pop()
    }
}

#[async_trait]
impl DialogRenderer for RecordingDialog {
    async fn speak_dialog(
        &self,
        user: &UserKey,
        dialog: Dialog,
        _context: &Value,
    ) -> Result<(), DialogError> {
        self.spoken
            .lock()
            .expect("dialog lock poisoned")
            .push((user.clone(), dialog));
        Ok(())
    }
}

/// An email the skill handed off for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailHandoff {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// An SMS the skill handed off for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsHandoff {
    pub number: String,
    pub text: String,
}

/// Delivery channel that records handoffs instead of transmitting.
#[derive(Debug, Default)]
pub struct RecordingDelivery {
    emails: Mutex<Vec<EmailHandoff>>,
    smses: Mutex<Vec<SmsHandoff>>,
    calls: Mutex<Vec<String>>,
    unavailable: bool,
}

impl RecordingDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that rejects every handoff, for failure-path tests.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn emails(&self) -> Vec<EmailHandoff> {
        self.emails.lock().expect("delivery lock poisoned").clone()
    }

    pub fn smses(&self) -> Vec<SmsHandoff> {
        self.smses.lock().expect("delivery lock poisoned").clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("delivery lock poisoned").clone()
    }

    pub fn handoff_count(&self) -> usize {
        self.emails().len() + self.smses().len() + self.calls().len()
    }

    fn gate(&self, kind: &'static str) -> Result<(), DeliveryError> {
        if self.unavailable {
            Err(DeliveryError::Unavailable(kind))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DeliveryChannel for RecordingDelivery {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DeliveryError> {
        self.gate("email")?;
        self.emails
            .lock()
            .expect("delivery lock poisoned")
            .push(EmailHandoff {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }

    async fn send_sms(&self, number: &str, text: &str) -> Result<(), DeliveryError> {
        self.gate("sms")?;
        self.smses
            .lock()
            .expect("delivery lock poisoned")
            .push(SmsHandoff {
                number: number.to_string(),
                text: text.to_string(),
            });
        Ok(())
    }

    async fn place_call(&self, number: &str) -> Result<(), DeliveryError> {
        self.gate("call")?;
        self.calls
            .lock()
            .expect("delivery lock poisoned")
            .push(number.to_string());
        Ok(())
    }
}
