//! Typed host events.
//!
//! The hosting framework delivers loosely-structured messages; these
//! structs are their typed rendering at the skill boundary. Matched
//! request data travels as a tagged union per kind instead of an
//! untyped dictionary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::UserKey;
use crate::domain::resolve::ContactCandidate;

/// Where a request originated. Composition is only available when the
/// paired mobile device can deliver the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOrigin {
    Mobile,
    Desktop,
    #[default]
    Server,
}

impl RequestOrigin {
    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

/// Request data attached by the cross-skill matcher or an intent, one
/// variant per message kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillRequest {
    Sms {
        #[serde(default)]
        recipient: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    Email {
        #[serde(default)]
        recipient: Option<String>,
        #[serde(default)]
        subject: Option<String>,
    },
    Call {
        recipient: String,
        #[serde(default)]
        number: Option<String>,
    },
    InternalChat,
}

/// One user turn delivered by the host: an utterance plus its envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnEvent {
    /// The user this turn belongs to.
    pub user: UserKey,
    /// The raw recognized utterance.
    pub utterance: String,
    /// Structured data from the matcher/intent, when present.
    #[serde(default)]
    pub request: Option<SkillRequest>,
    /// Where the request came from.
    #[serde(default)]
    pub origin: RequestOrigin,
    /// Opaque conversational context, carried through to dialog
    /// rendering and never interpreted here.
    #[serde(default)]
    pub context: Value,
}

impl TurnEvent {
    /// Creates a turn event with no request data and empty context.
    pub fn new(user: impl Into<UserKey>, utterance: impl Into<String>, origin: RequestOrigin) -> Self {
        Self {
            user: user.into(),
            utterance: utterance.into(),
            request: None,
            origin,
            context: Value::Null,
        }
    }

    /// Attaches matched request data.
    pub fn with_request(mut self, request: SkillRequest) -> Self {
        self.request = Some(request);
        self
    }

    /// Attaches the host's conversational context payload.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }
}

/// The asynchronous contact-lookup answer: resolution for a user's open
/// draft, with candidates when the contact service found any.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationEvent {
    /// The user whose draft is being confirmed.
    pub sender: UserKey,
    /// Ordered contact candidates, absent when no lookup ran.
    #[serde(default)]
    pub contacts: Option<Vec<ContactCandidate>>,
    /// Opaque conversational context for dialog routing.
    #[serde(default)]
    pub context: Value,
}

impl ConfirmationEvent {
    /// Creates a confirmation event with no contact data.
    pub fn without_contacts(sender: impl Into<UserKey>, context: Value) -> Self {
        Self {
            sender: sender.into(),
            contacts: None,
            context,
        }
    }

    /// Creates a confirmation event carrying lookup results.
    pub fn with_contacts(
        sender: impl Into<UserKey>,
        contacts: Vec<ContactCandidate>,
        context: Value,
    ) -> Self {
        Self {
            sender: sender.into(),
            contacts: Some(contacts),
            context,
        }
    }
}

/// Whether this skill handled a turn. `NotConsumed` tells the host to
/// offer the utterance to other skills; it is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Consumed,
    NotConsumed,
}

impl TurnOutcome {
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skill_requests_deserialize_from_tagged_payloads() {
        let request: SkillRequest = serde_json::from_value(json!({
            "kind": "sms",
            "recipient": "bob",
            "message": "pick up milk",
        }))
        .unwrap();
        assert_eq!(
            request,
            SkillRequest::Sms {
                recipient: Some("bob".to_string()),
                message: Some("pick up milk".to_string()),
            }
        );
    }

    #[test]
    fn call_requests_may_omit_the_number() {
        let request: SkillRequest = serde_json::from_value(json!({
            "kind": "call",
            "recipient": "mom",
        }))
        .unwrap();
        assert_eq!(
            request,
            SkillRequest::Call {
                recipient: "mom".to_string(),
                number: None,
            }
        );
    }

    #[test]
    fn turn_events_default_to_a_server_origin() {
        let event: TurnEvent = serde_json::from_value(json!({
            "user": "alice",
            "utterance": "hello",
        }))
        .unwrap();
        assert_eq!(event.origin, RequestOrigin::Server);
        assert!(!event.origin.is_mobile());
    }
}
