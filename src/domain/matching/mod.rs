//! Cross-skill matching.
//!
//! The hosting framework arbitrates ambiguous utterances across
//! competing skills. These comparators are this skill's contribution:
//! they score how strongly a candidate phrase looks like a message or
//! call request, without touching any draft state.

use serde::{Deserialize, Serialize};

use crate::domain::extract::{extract_email_content, extract_sms_content};
use crate::domain::vocabulary::{VocabSet, VocabularyMatcher};

/// Confidence reported back to the skill arbitration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    /// Weak structural match; recipient found but little else.
    Loose,
    /// Phrasing carried a channel-specific marker.
    Media,
    /// An explicit channel keyword or a fully-specified number.
    Exact,
}

/// The channel a matched message phrase targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    InternalChat,
    Email,
    Sms,
}

/// Outcome of scoring a candidate message phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMatch {
    pub kind: ChannelKind,
    pub level: MatchLevel,
    pub recipient: Option<String>,
    pub message: Option<String>,
    pub subject: Option<String>,
}

impl MessageMatch {
    fn keyword(kind: ChannelKind) -> Self {
        Self {
            kind,
            level: MatchLevel::Exact,
            recipient: None,
            message: None,
            subject: None,
        }
    }
}

/// Outcome of scoring a candidate call phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMatch {
    pub level: MatchLevel,
    /// Concatenated digits when the phrase spelled out a number.
    pub number: Option<String>,
    /// The raw contact text, kept for later contact resolution.
    pub recipient: String,
}

/// Scores a candidate phrase as a message request.
///
/// Explicit channel keywords win at `Exact` confidence. Failing that,
/// SMS extraction is attempted, then email extraction; either degrades
/// to `Loose` when only a recipient could be found. `None` means the
/// phrase is not ours and another skill should take it.
pub fn match_message_phrase(
    request: &str,
    vocab: &dyn VocabularyMatcher,
) -> Option<MessageMatch> {
    if vocab.matches(request, VocabSet::InternalChat) {
        return Some(MessageMatch::keyword(ChannelKind::InternalChat));
    }
    if vocab.matches(request, VocabSet::Email) {
        return Some(MessageMatch::keyword(ChannelKind::Email));
    }
    if vocab.matches(request, VocabSet::Sms) {
        return Some(MessageMatch::keyword(ChannelKind::Sms));
    }

    if let Some(content) = extract_sms_content(request) {
        let level = if content.message.is_some() {
            content.level
        } else {
            MatchLevel::Loose
        };
        return Some(MessageMatch {
            kind: ChannelKind::Sms,
            level,
            recipient: Some(content.recipient),
            message: content.message,
            subject: None,
        });
    }

    let content = extract_email_content(request)?;
    let level = if content.subject.is_some() {
        MatchLevel::Media
    } else {
        MatchLevel::Loose
    };
    Some(MessageMatch {
        kind: ChannelKind::Email,
        level,
        recipient: Some(content.recipient),
        message: None,
        subject: content.subject,
    })
}

/// Scores a candidate phrase as a call target.
///
/// Seven or more digit characters make a fully-specified number at
/// `Exact` confidence; anything shorter is treated as a contact name at
/// `Media`, with the number left for later contact resolution.
pub fn match_call_phrase(contact: &str) -> CallMatch {
    let digits: String = contact.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 7 {
        CallMatch {
            level: MatchLevel::Exact,
            number: Some(digits),
            recipient: contact.to_string(),
        }
    } else {
        CallMatch {
            level: MatchLevel::Media,
            number: None,
            recipient: contact.to_string(),
        }
    }
}
