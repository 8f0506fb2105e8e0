//! The messaging skill engine.
//!
//! Entry points mirror what the host can deliver: the send-email /
//! send-SMS / place-call intents, the common-message callback from the
//! cross-skill matcher, the asynchronous confirmation event carrying
//! contact-lookup results, and the converse loop that receives every
//! follow-up utterance while a draft is open.

use std::sync::Arc;

use phonenumber::country;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::SkillConfig;
use crate::domain::draft::{Draft, DraftError, DraftKind, DraftStage, DraftStore};
use crate::domain::extract::{extract_email_content, extract_sms_content};
use crate::domain::foundation::UserKey;
use crate::domain::matching::{self, CallMatch, MessageMatch};
use crate::domain::resolve::{digits_only, resolve_recipient, Resolution};
use crate::domain::vocabulary::{VocabSet, VocabularyMatcher};
use crate::ports::{DeliveryChannel, DeliveryError, Dialog, DialogError, DialogRenderer};

use super::events::{ConfirmationEvent, SkillRequest, TurnEvent, TurnOutcome};
use super::registration::{self, SkillManifest};

/// Errors the skill surfaces to the host.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// What a converse turn decided, computed under the store lock and
/// performed after it is released.
enum TurnAction {
    Prompt(Dialog),
    PromptMany(Vec<Dialog>),
    /// Consumed without speaking; the next move belongs to the host.
    Silent,
    Discard,
    Finalize,
    NotConsumed,
}

/// What the confirmation event decided.
enum ConfirmStep {
    Prompt(Vec<Dialog>, Value),
    NotFound(Dialog, Value),
    Failed(Value),
}

/// The per-user, multi-turn draft state machine.
pub struct MessagingSkill {
    store: DraftStore,
    dialog: Arc<dyn DialogRenderer>,
    delivery: Arc<dyn DeliveryChannel>,
    vocab: Arc<dyn VocabularyMatcher>,
    region: country::Id,
}

impl MessagingSkill {
    /// Builds the skill against the host-provided collaborators.
    pub fn new(
        config: &SkillConfig,
        dialog: Arc<dyn DialogRenderer>,
        delivery: Arc<dyn DeliveryChannel>,
        vocab: Arc<dyn VocabularyMatcher>,
    ) -> Self {
        Self {
            store: DraftStore::with_ttl(config.draft_ttl()),
            dialog,
            delivery,
            vocab,
            region: config.region_id(),
        }
    }

    /// What the host should register for this skill.
    pub fn manifest() -> SkillManifest {
        registration::manifest()
    }

    /// The draft store, exposed for host maintenance (expiry sweeps).
    pub fn drafts(&self) -> &DraftStore {
        &self.store
    }

    // === Cross-skill matching ===

    /// Scores a candidate phrase for the host's message arbitration.
    pub fn match_message_phrase(&self, request: &str) -> Option<MessageMatch> {
        matching::match_message_phrase(request, self.vocab.as_ref())
    }

    /// Scores a candidate phrase for the host's call arbitration.
    pub fn match_call_phrase(&self, contact: &str) -> CallMatch {
        matching::match_call_phrase(contact)
    }

    // === Intent entry points ===

    /// Routes the common-message callback by the matched request kind.
    pub async fn handle_common_message(&self, event: &TurnEvent) -> Result<(), SkillError> {
        match &event.request {
            Some(SkillRequest::Sms { .. }) => self.handle_send_sms(event).await,
            Some(SkillRequest::Email { .. }) => self.handle_send_email(event).await,
            Some(SkillRequest::Call { .. }) => self.handle_place_call(event).await,
            Some(SkillRequest::InternalChat) => self.handle_send_internal_chat(event).await,
            None => {
                error!(user = %event.user, "common message callback with no request data");
                Ok(())
            }
        }
    }

    /// Opens (or completes in one shot) an email draft.
    pub async fn handle_send_email(&self, event: &TurnEvent) -> Result<(), SkillError> {
        debug!(user = %event.user, "email draft requested");
        if !event.origin.is_mobile() {
            return self
                .speak(&event.user, only_mobile("send emails"), &event.context)
                .await
                .map_err(Into::into);
        }

        let (mut recipient, mut subject) = match &event.request {
            Some(SkillRequest::Email { recipient, subject }) => {
                (recipient.clone(), subject.clone())
            }
            _ => (None, None),
        };
        if recipient.is_none() && subject.is_none() {
            if let Some(content) = extract_email_content(&event.utterance) {
                recipient = Some(content.recipient);
                subject = content.subject;
            }
        }

        let mut draft = Draft::email(event.context.clone());
        let prompt = match (recipient, subject) {
            (Some(recipient), Some(subject)) => {
                draft.set_recipient(recipient);
                draft.set_subject(subject);
                draft.advance(DraftStage::Body)?;
                Dialog::GetEmailBody
            }
            (Some(recipient), _) => {
                draft.set_recipient(recipient);
                draft.advance(DraftStage::Subject)?;
                Dialog::GetEmailSubject
            }
            _ => Dialog::GetRecipientAddress {
                kind: DraftKind::Email.spoken_label().to_string(),
            },
        };
        self.store.insert(event.user.clone(), draft).await;
        self.speak(&event.user, prompt, &event.context).await?;
        Ok(())
    }

    /// Opens (or completes in one shot) an SMS draft.
    pub async fn handle_send_sms(&self, event: &TurnEvent) -> Result<(), SkillError> {
        debug!(user = %event.user, "sms draft requested");
        if !event.origin.is_mobile() {
            return self
                .speak(&event.user, only_mobile("send text messages"), &event.context)
                .await
                .map_err(Into::into);
        }

        let (mut recipient, mut message) = match &event.request {
            Some(SkillRequest::Sms { recipient, message }) => (recipient.clone(), message.clone()),
            _ => (None, None),
        };
        if recipient.is_none() && message.is_none() {
            if let Some(content) = extract_sms_content(&event.utterance) {
                recipient = Some(content.recipient);
                message = content.message;
            }
        }

        let mut draft = Draft::text_message(event.context.clone());
        let prompt = match (recipient, message) {
            (Some(recipient), Some(message)) => {
                draft.set_recipient(recipient);
                draft.set_message(message);
                draft.advance(DraftStage::Confirmation)?;
                // Addressing continues through the host's contact
                // lookup; its answer arrives on the confirmation event.
                None
            }
            (Some(recipient), _) => {
                draft.set_recipient(recipient);
                draft.advance(DraftStage::Message)?;
                Some(Dialog::GetMessageContent)
            }
            _ => Some(Dialog::GetRecipientAddress {
                kind: DraftKind::TextMessage.spoken_label().to_string(),
            }),
        };
        self.store.insert(event.user.clone(), draft).await;
        if let Some(prompt) = prompt {
            self.speak(&event.user, prompt, &event.context).await?;
        }
        Ok(())
    }

    /// Opens a call draft; with a number it confirms immediately.
    pub async fn handle_place_call(&self, event: &TurnEvent) -> Result<(), SkillError> {
        if !event.origin.is_mobile() {
            return self
                .speak(&event.user, only_mobile("call phone numbers"), &event.context)
                .await
                .map_err(Into::into);
        }

        let Some(SkillRequest::Call { recipient, number }) = &event.request else {
            error!(user = %event.user, "call intent with no call request data");
            return Ok(());
        };
        debug!(user = %event.user, recipient = %recipient, "call requested");

        let draft = Draft::call(recipient.clone(), number.clone(), event.context.clone());
        let has_number = number.is_some();
        self.store.insert(event.user.clone(), draft).await;

        if has_number {
            self.handle_confirmation(&ConfirmationEvent::without_contacts(
                event.user.clone(),
                event.context.clone(),
            ))
            .await;
        }
        // Without a number the host's contact lookup answers through
        // the confirmation event channel.
        Ok(())
    }

    async fn handle_send_internal_chat(&self, event: &TurnEvent) -> Result<(), SkillError> {
        // TODO: draft and send over the internal chat channel.
        warn!(user = %event.user, "internal chat drafting requested but not supported");
        Ok(())
    }

    // === Confirmation event ===

    /// Handles the contact-lookup answer for a user's open draft.
    ///
    /// Failures here are caught, logged, and voiced as a generic error;
    /// the draft is not guaranteed to be removed on that path.
    pub async fn handle_confirmation(&self, event: &ConfirmationEvent) {
        if let Err(err) = self.confirm_draft(event).await {
            error!(user = %event.sender, error = %err, "confirmation handling failed");
            let _ = self
                .speak(&event.sender, Dialog::ErrorDialog, &event.context)
                .await;
        }
    }

    async fn confirm_draft(&self, event: &ConfirmationEvent) -> Result<(), SkillError> {
        let candidates = event.contacts.as_deref().unwrap_or(&[]);
        let region = self.region;

        let step = self
            .store
            .update(&event.sender, |draft| {
                match resolve_recipient(draft, candidates, region) {
                    Resolution::Resolved {
                        address,
                        display_name,
                    } => {
                        debug!(draft = %draft.id(), name = %display_name, "recipient resolved");
                        // Spoken only when the name does not already
                        // carry the address.
                        let spoken_address = if display_name == address {
                            String::new()
                        } else {
                            format!("({})", address)
                        };
                        let excerpt = draft
                            .confirmation_excerpt()
                            .unwrap_or_default()
                            .to_string();
                        draft.set_recipient(address.clone());

                        let dialogs = match draft.kind() {
                            DraftKind::Call => {
                                draft.set_number(address);
                                draft.set_name(display_name.clone());
                                vec![Dialog::ConfirmCall {
                                    name: display_name,
                                    number: spoken_address,
                                }]
                            }
                            kind => vec![
                                Dialog::ConfirmMessage {
                                    kind: kind.spoken_label().to_string(),
                                    name: display_name,
                                    address: spoken_address,
                                    message: excerpt,
                                },
                                if kind == DraftKind::Email {
                                    Dialog::ConfirmEmail
                                } else {
                                    Dialog::ConfirmSend
                                },
                            ],
                        };
                        ConfirmStep::Prompt(dialogs, draft.context().clone())
                    }
                    Resolution::PartiallyUnresolved { recipient } => ConfirmStep::NotFound(
                        Dialog::ContactNotFound {
                            kind: draft.kind().address_type_label().to_string(),
                            recipient,
                        },
                        draft.context().clone(),
                    ),
                    Resolution::Unresolved => {
                        warn!(draft = %draft.id(), "draft has no recipient to resolve");
                        ConfirmStep::Failed(draft.context().clone())
                    }
                }
            })
            .await;

        match step {
            None => {
                warn!(user = %event.sender, "confirmation event without an open draft");
                self.speak(&event.sender, Dialog::ErrorDialog, &event.context)
                    .await?;
            }
            Some(ConfirmStep::Prompt(dialogs, context)) => {
                for dialog in dialogs {
                    self.speak(&event.sender, dialog, &context).await?;
                }
            }
            Some(ConfirmStep::NotFound(dialog, context)) => {
                self.speak(&event.sender, dialog, &context).await?;
                self.store.remove(&event.sender).await;
            }
            Some(ConfirmStep::Failed(context)) => {
                self.speak(&event.sender, Dialog::ErrorDialog, &context).await?;
                self.store.remove(&event.sender).await;
            }
        }
        Ok(())
    }

    // === Converse loop ===

    /// Feeds a follow-up utterance to the user's open draft.
    ///
    /// `NotConsumed` means this turn was not ours: there is no open
    /// draft, or the utterance did not answer the pending question.
    pub async fn converse(&self, event: &TurnEvent) -> Result<TurnOutcome, SkillError> {
        let utterance = event.utterance.as_str();
        let Some(step) = self
            .store
            .update(&event.user, |draft| {
                self.converse_step(draft, utterance, event.origin.is_mobile())
            })
            .await
        else {
            return Ok(TurnOutcome::NotConsumed);
        };

        let (action, context) = step?;
        match action {
            TurnAction::Prompt(dialog) => {
                self.speak(&event.user, dialog, &context).await?;
                Ok(TurnOutcome::Consumed)
            }
            TurnAction::PromptMany(dialogs) => {
                for dialog in dialogs {
                    self.speak(&event.user, dialog, &context).await?;
                }
                Ok(TurnOutcome::Consumed)
            }
            TurnAction::Silent => Ok(TurnOutcome::Consumed),
            TurnAction::Discard => {
                self.speak(&event.user, Dialog::DiscardDraft, &context).await?;
                self.store.remove(&event.user).await;
                Ok(TurnOutcome::Consumed)
            }
            TurnAction::Finalize => {
                self.finalize(&event.user).await?;
                Ok(TurnOutcome::Consumed)
            }
            TurnAction::NotConsumed => Ok(TurnOutcome::NotConsumed),
        }
    }

    /// One turn of the draft state machine, run under the store lock.
    fn converse_step(
        &self,
        draft: &mut Draft,
        utterance: &str,
        from_mobile: bool,
    ) -> Result<(TurnAction, Value), DraftError> {
        let context = draft.context().clone();
        let action = match draft.kind() {
            DraftKind::Email => match draft.stage() {
                DraftStage::Recipient => {
                    // Spoken names arrive space-separated; addresses
                    // dot-join them ("john smith" -> "john.smith").
                    draft.set_recipient(utterance.trim().replace(' ', "."));
                    draft.advance(DraftStage::Subject)?;
                    TurnAction::Prompt(Dialog::GetEmailSubject)
                }
                DraftStage::Subject => {
                    draft.set_subject(utterance.trim());
                    draft.advance(DraftStage::Body)?;
                    TurnAction::Prompt(Dialog::GetEmailBody)
                }
                DraftStage::Body if utterance == "done" => {
                    draft.advance(DraftStage::Confirmation)?;
                    info!(draft = %draft.id(), "email dictation complete");
                    if from_mobile {
                        // The host's contact lookup answers through the
                        // confirmation event channel.
                        TurnAction::Silent
                    } else {
                        TurnAction::PromptMany(vec![
                            Dialog::ConfirmMessage {
                                kind: DraftKind::Email.spoken_label().to_string(),
                                name: draft.recipient().to_string(),
                                address: String::new(),
                                message: draft.subject().to_string(),
                            },
                            Dialog::ConfirmSend,
                        ])
                    }
                }
                DraftStage::Confirmation => self.confirmation_answer(utterance),
                _ => {
                    draft.append_body_line(utterance);
                    TurnAction::Silent
                }
            },
            DraftKind::TextMessage => match draft.stage() {
                DraftStage::Recipient => {
                    draft.set_recipient(utterance.trim());
                    draft.advance(DraftStage::Message)?;
                    TurnAction::Prompt(Dialog::GetMessageContent)
                }
                DraftStage::Message => {
                    draft.set_message(utterance.trim());
                    draft.advance(DraftStage::Confirmation)?;
                    // Addressing continues through the host's contact
                    // lookup and the confirmation event channel.
                    TurnAction::Silent
                }
                DraftStage::Confirmation => self.confirmation_answer(utterance),
                _ => TurnAction::NotConsumed,
            },
            DraftKind::Call => self.confirmation_answer(utterance),
        };
        Ok((action, context))
    }

    /// Classifies a yes/no answer at the confirmation prompt. Anything
    /// else is not ours and falls back to the host.
    fn confirmation_answer(&self, utterance: &str) -> TurnAction {
        if self.vocab.matches(utterance, VocabSet::No) {
            TurnAction::Discard
        } else if self.vocab.matches(utterance, VocabSet::Yes) {
            TurnAction::Finalize
        } else {
            TurnAction::NotConsumed
        }
    }

    /// Hands a confirmed draft to its delivery channel.
    ///
    /// The draft is removed before the handoff, so a replayed
    /// confirmation can never send twice.
    async fn finalize(&self, user: &UserKey) -> Result<(), SkillError> {
        let Some(draft) = self.store.remove(user).await else {
            return Ok(());
        };
        match draft.kind() {
            DraftKind::Email => {
                self.speak(user, Dialog::EmailSent, draft.context()).await?;
                info!(draft = %draft.id(), "handing email off for delivery");
                self.delivery
                    .send_email(draft.recipient(), draft.subject(), draft.body())
                    .await?;
            }
            DraftKind::TextMessage => {
                self.speak(user, Dialog::TextSent, draft.context()).await?;
                let recipient = draft.recipient();
                let number = if recipient.chars().any(|c| c.is_alphabetic()) {
                    error!(draft = %draft.id(), "sms recipient is not a number");
                    recipient.to_string()
                } else {
                    digits_only(recipient)
                };
                info!(draft = %draft.id(), "handing sms off for delivery");
                self.delivery.send_sms(&number, draft.message()).await?;
            }
            DraftKind::Call => {
                let name = draft.name().unwrap_or_else(|| draft.recipient()).to_string();
                self.speak(user, Dialog::CallStarted { name }, draft.context())
                    .await?;
                match draft.number() {
                    Some(number) => {
                        info!(draft = %draft.id(), "handing call off for dialing");
                        self.delivery.place_call(&digits_only(number)).await?;
                    }
                    None => error!(draft = %draft.id(), "confirmed call draft has no number"),
                }
            }
        }
        Ok(())
    }

    async fn speak(
        &self,
        user: &UserKey,
        dialog: Dialog,
        context: &Value,
    ) -> Result<(), DialogError> {
        debug!(user = %user, template = dialog.template(), "speaking dialog");
        self.dialog.speak_dialog(user, dialog, context).await
    }
}

fn only_mobile(action: &str) -> Dialog {
    Dialog::OnlyMobile {
        action: action.to_string(),
    }
}
