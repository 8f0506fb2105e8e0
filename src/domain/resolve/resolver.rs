//! Address resolution for the confirmation step.

use phonenumber::country;
use tracing::{debug, warn};

use crate::domain::draft::{Draft, DraftKind};

use super::contact::ContactCandidate;

/// Outcome of resolving a draft's recipient into a delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A usable address was found; confirmation can proceed.
    Resolved {
        /// The concrete delivery address.
        address: String,
        /// The name spoken back in the confirmation prompt.
        display_name: String,
    },
    /// Recipient text exists but no address could be attached to it.
    PartiallyUnresolved { recipient: String },
    /// The draft has no recipient at all.
    Unresolved,
}

/// Resolves a draft's recipient using contact candidates when present,
/// falling back to the raw recipient text.
///
/// With candidates, the first one is taken (deterministic first match;
/// disambiguation is out of scope) and its address selected per kind:
/// phone slots in fixed priority order for SMS/call, the `email` slot
/// for email. Without candidates, the raw recipient is accepted only
/// when it is already a usable address for the kind: containing `@`
/// for email, fully numeric after hyphen removal for SMS, or the stored
/// number for a call.
pub fn resolve_recipient(
    draft: &Draft,
    candidates: &[ContactCandidate],
    region: country::Id,
) -> Resolution {
    if let Some(candidate) = candidates.first() {
        if candidates.len() > 1 {
            debug!(
                matches = candidates.len(),
                chosen = %candidate.name,
                "multiple contact matches; taking the first"
            );
        }
        let address = match draft.kind() {
            DraftKind::TextMessage | DraftKind::Call => candidate.phone_by_priority(),
            DraftKind::Email => candidate.email(),
        };
        return match address {
            Some(address) => Resolution::Resolved {
                address: address.to_string(),
                display_name: candidate.name.clone(),
            },
            None => Resolution::PartiallyUnresolved {
                recipient: candidate.name.clone(),
            },
        };
    }

    let recipient = draft.recipient();
    match draft.kind() {
        DraftKind::Email if recipient.contains('@') => Resolution::Resolved {
            address: recipient.to_string(),
            display_name: recipient.to_string(),
        },
        DraftKind::TextMessage if is_spoken_number(recipient) => Resolution::Resolved {
            address: recipient.to_string(),
            display_name: format_national(recipient, region)
                .unwrap_or_else(|| recipient.to_string()),
        },
        DraftKind::Call if draft.number().is_some() => {
            let number = draft.number().unwrap_or_default().trim().to_string();
            let display_name =
                format_national(recipient, region).unwrap_or_else(|| recipient.to_string());
            // A number dictated directly is both recipient and address;
            // confirm it in its formatted form.
            let address = if number == recipient {
                display_name.clone()
            } else {
                number
            };
            Resolution::Resolved {
                address,
                display_name,
            }
        }
        _ if !recipient.is_empty() => Resolution::PartiallyUnresolved {
            recipient: recipient.to_string(),
        },
        _ => Resolution::Unresolved,
    }
}

/// True for recipient text that is a phone number once hyphens are
/// removed ("555-123-4567").
fn is_spoken_number(recipient: &str) -> bool {
    let bare = recipient.replace('-', "");
    !bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit())
}

/// Formats a phone number into the regional national display form used
/// in spoken confirmations. Returns `None` when the text does not parse
/// as a number; callers fall back to the raw string.
pub fn format_national(raw: &str, region: country::Id) -> Option<String> {
    match phonenumber::parse(Some(region), raw) {
        Ok(number) => Some(
            number
                .format()
                .mode(phonenumber::Mode::National)
                .to_string(),
        ),
        Err(err) => {
            warn!(error = %err, "could not format recipient as a phone number");
            None
        }
    }
}

/// Strips everything but digits, for the delivery handoff.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sms_draft(recipient: &str) -> Draft {
        let mut draft = Draft::text_message(Value::Null);
        draft.set_recipient(recipient);
        draft
    }

    fn email_draft(recipient: &str) -> Draft {
        let mut draft = Draft::email(Value::Null);
        draft.set_recipient(recipient);
        draft
    }

    #[test]
    fn candidate_phone_is_selected_by_priority_for_sms() {
        let draft = sms_draft("bob");
        let candidates = vec![ContactCandidate::new("Bob Jones")
            .with_address("home", "555-111-2222")
            .with_address("mobile", "555-333-4444")];
        let resolution = resolve_recipient(&draft, &candidates, country::US);
        assert_eq!(
            resolution,
            Resolution::Resolved {
                address: "555-333-4444".to_string(),
                display_name: "Bob Jones".to_string(),
            }
        );
    }

    #[test]
    fn first_candidate_wins_deterministically() {
        let draft = sms_draft("bob");
        let candidates = vec![
            ContactCandidate::new("Bob Jones").with_address("mobile", "111"),
            ContactCandidate::new("Bob Smith").with_address("mobile", "222"),
        ];
        let resolution = resolve_recipient(&draft, &candidates, country::US);
        assert!(matches!(
            resolution,
            Resolution::Resolved { ref address, .. } if address == "111"
        ));
    }

    #[test]
    fn candidate_without_the_needed_slot_is_partially_unresolved() {
        let draft = email_draft("bob");
        let candidates =
            vec![ContactCandidate::new("Bob Jones").with_address("mobile", "555-333-4444")];
        let resolution = resolve_recipient(&draft, &candidates, country::US);
        assert_eq!(
            resolution,
            Resolution::PartiallyUnresolved {
                recipient: "Bob Jones".to_string()
            }
        );
    }

    #[test]
    fn raw_email_addresses_resolve_directly() {
        let draft = email_draft("jane@example.com");
        let resolution = resolve_recipient(&draft, &[], country::US);
        assert_eq!(
            resolution,
            Resolution::Resolved {
                address: "jane@example.com".to_string(),
                display_name: "jane@example.com".to_string(),
            }
        );
    }

    #[test]
    fn raw_names_without_contact_data_are_partially_unresolved() {
        let draft = email_draft("grandma");
        let resolution = resolve_recipient(&draft, &[], country::US);
        assert_eq!(
            resolution,
            Resolution::PartiallyUnresolved {
                recipient: "grandma".to_string()
            }
        );
    }

    #[test]
    fn empty_recipients_are_unresolved() {
        let draft = sms_draft("");
        assert_eq!(resolve_recipient(&draft, &[], country::US), Resolution::Unresolved);
    }

    #[test]
    fn dictated_numbers_resolve_with_a_formatted_display_name() {
        let draft = sms_draft("555-123-4567");
        match resolve_recipient(&draft, &[], country::US) {
            Resolution::Resolved {
                address,
                display_name,
            } => {
                assert_eq!(address, "555-123-4567");
                // National formatting keeps the digits either way.
                assert_eq!(digits_only(&display_name), "5551234567");
            }
            other => panic!("expected resolution, got {:?}", other),
        }
    }

    #[test]
    fn alphabetic_sms_recipients_do_not_resolve_directly() {
        let draft = sms_draft("bob-and-carol");
        assert!(matches!(
            resolve_recipient(&draft, &[], country::US),
            Resolution::PartiallyUnresolved { .. }
        ));
    }

    #[test]
    fn unparseable_numbers_fall_back_to_the_raw_display() {
        assert_eq!(format_national("grandma", country::US), None);
    }

    #[test]
    fn digits_only_strips_punctuation() {
        assert_eq!(digits_only("(555) 123-4567"), "5551234567");
    }
}
