//! Email recipient/subject extraction.
//!
//! Besides splitting out the subject line, this parser repairs the
//! speech-to-text rendering of addresses: spoken "dot" and "at" words
//! become punctuation, and spurious spaces around the local part and
//! domain labels are stripped.

use super::remainder_after_to;

/// Recipient and subject parsed out of a single email utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    /// Recipient text: a contact name, or a repaired address.
    pub recipient: String,
    /// Subject line, when the utterance carried one.
    pub subject: Option<String>,
}

/// Parses an email request like
/// "email to jane smith subject meeting notes" or
/// "send a message to john dot smith at example dot com".
///
/// Returns `None` when the utterance has no standalone `to` token, or
/// when a `subject` token appears without the surrounding spaces the
/// split needs.
pub fn extract_email_content(utterance: &str) -> Option<EmailContent> {
    let remainder = remainder_after_to(utterance)?;

    let (recipient_text, subject) = if remainder.split_whitespace().any(|t| t == "subject") {
        let (extended, subject) = remainder.split_once(" subject ")?;
        let recipient = if extended.split_whitespace().any(|t| t == "with") {
            extended.split_once(" with").map(|(r, _)| r).unwrap_or(extended)
        } else {
            extended
        };
        (recipient.to_string(), Some(subject.to_string()))
    } else {
        (remainder.to_string(), None)
    };

    let recipient = normalize_recipient(recipient_text);
    if recipient.trim().is_empty() {
        return None;
    }
    Some(EmailContent { recipient, subject })
}

/// Turns spoken address words into a clean address. Text with no
/// spoken-address markers passes through untouched (a contact name).
fn normalize_recipient(recipient: String) -> String {
    let mut recipient = recipient;
    if recipient.split_whitespace().any(|t| t == "dot") {
        recipient = recipient.replace(" dot ", ".");
    }
    if recipient.split_whitespace().any(|t| t == "at") {
        recipient = recipient.replace(" at ", "@").to_lowercase();
    }
    if recipient.contains('@') {
        recipient = reassemble_address(&recipient);
    }
    recipient
}

/// Strips stray spaces out of `local@domain.tld[.tld2...]`, keeping the
/// first whitespace-delimited word of each trailing domain label.
fn reassemble_address(address: &str) -> String {
    let (local, domain_text) = match address.split_once('@') {
        Some(parts) => parts,
        None => return address.to_string(),
    };
    let local = local.replace(' ', "");
    let mut labels = domain_text.split('.');
    let domain = labels.next().unwrap_or_default().replace(' ', "");
    let tld = labels
        .filter_map(|part| part.split_whitespace().next())
        .collect::<Vec<_>>()
        .join(".");
    if tld.is_empty() {
        format!("{}@{}", local, domain)
    } else {
        format!("{}@{}.{}", local, domain, tld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn spoken_punctuation_becomes_an_address() {
        let content =
            extract_email_content("send a message to john dot smith at example dot com").unwrap();
        assert_eq!(content.recipient, "john.smith@example.com");
        assert_eq!(content.subject, None);
    }

    #[test]
    fn subject_token_splits_recipient_and_subject() {
        let content = extract_email_content("email to jane smith subject meeting notes").unwrap();
        assert_eq!(content.recipient, "jane smith");
        assert_eq!(content.subject.as_deref(), Some("meeting notes"));
    }

    #[test]
    fn with_clause_is_trimmed_from_the_recipient() {
        let content =
            extract_email_content("email to jane with the agenda subject friday plans").unwrap();
        assert_eq!(content.recipient, "jane");
        assert_eq!(content.subject.as_deref(), Some("friday plans"));
    }

    #[test]
    fn stray_spaces_around_the_domain_are_repaired() {
        let content =
            extract_email_content("email to john smith at example dot com subject hi").unwrap();
        // "at" lowercases and joins; local-part spaces are stripped.
        assert_eq!(content.recipient, "johnsmith@example.com");
        assert_eq!(content.subject.as_deref(), Some("hi"));
    }

    #[test]
    fn multi_part_tlds_are_rejoined() {
        let content =
            extract_email_content("email to bob at example dot co dot uk").unwrap();
        assert_eq!(content.recipient, "bob@example.co.uk");
    }

    #[test]
    fn plain_contact_names_pass_through() {
        let content = extract_email_content("send an email to grandma").unwrap();
        assert_eq!(content.recipient, "grandma");
        assert_eq!(content.subject, None);
    }

    #[test]
    fn missing_to_token_fails_the_parse() {
        assert_eq!(extract_email_content("email jane about the meeting"), None);
    }

    #[test]
    fn empty_recipients_are_declined() {
        assert_eq!(extract_email_content("send a message to "), None);
    }

    proptest! {
        #[test]
        fn utterances_without_to_never_yield_a_recipient(
            words in proptest::collection::vec("[a-su-z][a-z]{0,7}", 0..8)
        ) {
            let utterance = words
                .into_iter()
                .filter(|w| w != "to")
                .collect::<Vec<_>>()
                .join(" ");
            prop_assert!(extract_email_content(&utterance).is_none());
        }
    }
}
