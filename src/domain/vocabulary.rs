//! Vocabulary matching capability.
//!
//! The hosting framework ships per-language vocabulary files and a
//! matcher over them. The skill consumes that capability through this
//! trait; a default English word-list adapter lives in `adapters`.

use serde::{Deserialize, Serialize};

/// The named vocabularies this skill consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabSet {
    /// Affirmative answers at the confirmation prompt.
    Yes,
    /// Negative answers at the confirmation prompt.
    No,
    /// Explicit internal-chat channel keywords.
    InternalChat,
    /// Explicit email channel keywords.
    Email,
    /// Explicit SMS channel keywords.
    Sms,
}

/// Matches an utterance against a named vocabulary.
///
/// Implementations match on word boundaries, not raw substrings: "note"
/// must not satisfy the `No` vocabulary. Matching is case-insensitive.
pub trait VocabularyMatcher: Send + Sync {
    /// Returns true if the utterance contains an entry of the vocabulary.
    fn matches(&self, utterance: &str, vocab: VocabSet) -> bool;
}
