//! SMS recipient/message extraction.

use crate::domain::matching::MatchLevel;

use super::remainder_after_to;

/// Recipient and message parsed out of a single SMS utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsContent {
    /// Raw spoken recipient, possibly multi-word.
    pub recipient: String,
    /// Message text, when the utterance carried one.
    pub message: Option<String>,
    /// How strongly the phrasing marked this as an SMS request.
    pub level: MatchLevel,
}

/// Parses an SMS request like "text to bob saying pick up milk".
///
/// The first token after ` to ` is the recipient seed. A "that says" or
/// "saying" marker separates any extra recipient words from the message
/// and yields `Media` confidence; with no marker the whole remainder is
/// taken as the message at `Loose` confidence. Returns `None` when the
/// utterance has no standalone `to` token to anchor on.
pub fn extract_sms_content(utterance: &str) -> Option<SmsContent> {
    let remainder = remainder_after_to(utterance)?;
    let mut words = remainder.split_whitespace();
    let recipient = words.next()?.to_string();
    let rest = words.collect::<Vec<_>>().join(" ");

    if let Some((lead, message)) = rest.split_once("that says ") {
        return Some(SmsContent {
            recipient: join_recipient(&recipient, lead),
            message: Some(message.to_string()),
            level: MatchLevel::Media,
        });
    }
    if let Some((lead, message)) = rest.split_once("saying ") {
        return Some(SmsContent {
            recipient: join_recipient(&recipient, lead),
            message: Some(message.to_string()),
            level: MatchLevel::Media,
        });
    }
    if rest.len() <= 1 {
        // Nothing left that could be a message; the leftover (if any)
        // belongs to the recipient.
        return Some(SmsContent {
            recipient: join_recipient(&recipient, &rest),
            message: None,
            level: MatchLevel::Media,
        });
    }
    Some(SmsContent {
        recipient,
        message: Some(rest),
        level: MatchLevel::Loose,
    })
}

fn join_recipient(recipient: &str, extra: &str) -> String {
    let joined = format!("{} {}", recipient, extra);
    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn saying_marker_splits_recipient_and_message() {
        let content = extract_sms_content("text to bob saying pick up milk").unwrap();
        assert_eq!(content.recipient, "bob");
        assert_eq!(content.message.as_deref(), Some("pick up milk"));
        assert_eq!(content.level, MatchLevel::Media);
    }

    #[test]
    fn that_says_marker_absorbs_multi_word_names() {
        let content =
            extract_sms_content("send a text to aunt carol that says happy birthday").unwrap();
        assert_eq!(content.recipient, "aunt carol");
        assert_eq!(content.message.as_deref(), Some("happy birthday"));
        assert_eq!(content.level, MatchLevel::Media);
    }

    #[test]
    fn recipient_only_utterances_have_no_message() {
        let content = extract_sms_content("send a text message to bob").unwrap();
        assert_eq!(content.recipient, "bob");
        assert_eq!(content.message, None);
        assert_eq!(content.level, MatchLevel::Media);
    }

    #[test]
    fn unmarked_remainders_become_a_loose_message() {
        let content = extract_sms_content("text to bob pick up milk").unwrap();
        assert_eq!(content.recipient, "bob");
        assert_eq!(content.message.as_deref(), Some("pick up milk"));
        assert_eq!(content.level, MatchLevel::Loose);
    }

    #[test]
    fn missing_to_token_fails_the_parse() {
        assert_eq!(extract_sms_content("text bob hello"), None);
        // "tomorrow" contains "to" but is not the standalone token.
        assert_eq!(extract_sms_content("text tomorrow"), None);
    }

    #[test]
    fn trailing_to_fails_the_parse() {
        assert_eq!(extract_sms_content("send a text to"), None);
    }

    proptest! {
        #[test]
        fn utterances_without_to_never_yield_a_recipient(
            words in proptest::collection::vec("[a-su-z][a-z]{0,7}", 0..8)
        ) {
            // Alphabet excludes 't' starts that could form a bare "to";
            // filter defensively anyway.
            let utterance = words
                .into_iter()
                .filter(|w| w != "to")
                .collect::<Vec<_>>()
                .join(" ");
            prop_assert!(extract_sms_content(&utterance).is_none());
        }
    }
}
