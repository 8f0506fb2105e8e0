//! Console demo for the drafting flow.
//!
//! Wires the skill to stdout adapters and drives it from stdin lines,
//! standing in for the hosting framework: each line goes to the
//! converse loop first, then to the cross-skill matcher, and a stub
//! contact lookup answers confirmation-stage drafts with no candidates.

use std::io::{self, BufRead};
use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use missive::adapters::{ConsoleDelivery, ConsoleDialog, StaticVocabulary};
use missive::application::{
    ConfirmationEvent, MessagingSkill, RequestOrigin, SkillRequest, TurnEvent,
};
use missive::config::SkillConfig;
use missive::domain::draft::DraftStage;
use missive::domain::matching::ChannelKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("missive=info")),
        )
        .init();

    let config = match SkillConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "falling back to default configuration");
            SkillConfig::default()
        }
    };

    let skill = MessagingSkill::new(
        &config,
        Arc::new(ConsoleDialog::new()),
        Arc::new(ConsoleDelivery::new()),
        Arc::new(StaticVocabulary::new()),
    );

    let user = "console";
    println!("missive demo - try \"text to 555-123-4567 saying pick up milk\" or \"call 555-123-4567\"");

    let mut lookup_answered = false;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        let event = TurnEvent::new(user, utterance, RequestOrigin::Mobile);

        // An open draft gets the utterance first, like the host's
        // converse loop.
        match skill.converse(&event).await {
            Ok(outcome) if outcome.is_consumed() => {
                answer_contact_lookup(&skill, user, &mut lookup_answered).await;
                continue;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("turn failed: {}", err);
                continue;
            }
        }

        if let Err(err) = dispatch(&skill, event).await {
            eprintln!("request failed: {}", err);
        }
        answer_contact_lookup(&skill, user, &mut lookup_answered).await;
    }
    Ok(())
}

/// Routes a fresh utterance the way the host's arbitration would.
async fn dispatch(
    skill: &MessagingSkill,
    event: TurnEvent,
) -> Result<(), missive::application::SkillError> {
    if let Some(rest) = event.utterance.strip_prefix("call ") {
        let matched = skill.match_call_phrase(rest);
        let event = event.with_request(SkillRequest::Call {
            recipient: matched.recipient,
            number: matched.number,
        });
        return skill.handle_place_call(&event).await;
    }

    match skill.match_message_phrase(&event.utterance) {
        Some(matched) => {
            let request = match matched.kind {
                ChannelKind::Sms => SkillRequest::Sms {
                    recipient: matched.recipient,
                    message: matched.message,
                },
                ChannelKind::Email => SkillRequest::Email {
                    recipient: matched.recipient,
                    subject: matched.subject,
                },
                ChannelKind::InternalChat => SkillRequest::InternalChat,
            };
            skill.handle_common_message(&event.with_request(request)).await
        }
        None => {
            println!("(not a message request)");
            Ok(())
        }
    }
}

/// Stands in for the host's contact lookup side channel: the first time
/// a draft reaches the confirmation stage, answer with no candidates so
/// resolution falls back to the raw recipient.
async fn answer_contact_lookup(skill: &MessagingSkill, user: &str, answered: &mut bool) {
    match skill.drafts().snapshot(&user.into()).await {
        Some(draft) if draft.stage() == DraftStage::Confirmation => {
            if !*answered {
                *answered = true;
                skill
                    .handle_confirmation(&ConfirmationEvent::without_contacts(
                        user,
                        draft.context().clone(),
                    ))
                    .await;
            }
        }
        _ => *answered = false,
    }
}
