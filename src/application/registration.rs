//! Skill registration data.
//!
//! The hosting framework owns intent registration; the skill just
//! describes what it wants registered. Keyword intents are expressed as
//! required/optional vocabulary names the host resolves against its
//! per-language keyword files.

use serde::Serialize;

/// A keyword intent the host should register for this skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentDefinition {
    /// Intent name, unique within the skill.
    pub name: &'static str,
    /// Keyword vocabularies that must all be present.
    pub required: &'static [&'static str],
    /// Keyword vocabularies that may be present.
    pub optional: &'static [&'static str],
}

/// Everything the host needs to wire this skill up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillManifest {
    pub intents: &'static [IntentDefinition],
    /// Event name the contact-lookup answer arrives on.
    pub confirmation_event: &'static str,
}

/// The draft-email command intent plus the confirmation event channel.
pub fn manifest() -> SkillManifest {
    SkillManifest {
        intents: &[IntentDefinition {
            name: "DraftEmailIntent",
            required: &["draft", "email"],
            optional: &["wake_word", "message"],
        }],
        confirmation_event: "messaging.confirmation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_registers_the_draft_email_intent() {
        let manifest = manifest();
        assert_eq!(manifest.intents.len(), 1);
        assert_eq!(manifest.intents[0].name, "DraftEmailIntent");
        assert!(manifest.intents[0].required.contains(&"email"));
    }

    #[test]
    fn manifest_names_the_confirmation_event() {
        assert_eq!(manifest().confirmation_event, "messaging.confirmation");
    }
}
