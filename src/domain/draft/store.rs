//! Keyed draft store.
//!
//! Holds at most one draft per user. The map is guarded by an async
//! mutex with short lock scopes; the hosting framework delivers one
//! utterance per user at a time, so per-user turns are serial by
//! construction and never interleave inside a turn.

use std::collections::HashMap;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::foundation::UserKey;

use super::draft::Draft;

/// Per-user draft storage with an optional freshness policy.
///
/// With no TTL configured (the default) drafts live until they are
/// explicitly removed. With a TTL, a draft whose last mutation is older
/// than the limit is treated as absent and reaped on next access.
pub struct DraftStore {
    drafts: Mutex<HashMap<UserKey, Draft>>,
    ttl: Option<Duration>,
}

impl DraftStore {
    /// Creates a store without draft expiry.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    /// Creates a store with an optional time-to-live for idle drafts.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            drafts: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Inserts a draft for a user, returning any draft it replaced.
    ///
    /// A new send intent while a draft is open silently overwrites it.
    pub async fn insert(&self, user: UserKey, draft: Draft) -> Option<Draft> {
        let mut drafts = self.drafts.lock().await;
        let replaced = drafts.insert(user.clone(), draft);
        if replaced.is_some() {
            debug!(user = %user, "open draft overwritten by a new send intent");
        }
        replaced
    }

    /// Removes and returns the user's draft.
    pub async fn remove(&self, user: &UserKey) -> Option<Draft> {
        self.drafts.lock().await.remove(user)
    }

    /// Returns a clone of the user's live draft.
    pub async fn snapshot(&self, user: &UserKey) -> Option<Draft> {
        let mut drafts = self.drafts.lock().await;
        self.live_entry(&mut drafts, user).cloned()
    }

    /// Returns true if the user has a live draft.
    pub async fn contains(&self, user: &UserKey) -> bool {
        let mut drafts = self.drafts.lock().await;
        self.live_entry(&mut drafts, user).is_some()
    }

    /// Runs an exclusive read-modify-write against the user's draft.
    ///
    /// Returns `None` when the user has no live draft; otherwise the
    /// closure's result. The lock is held for the duration of the
    /// closure only.
    pub async fn update<R>(&self, user: &UserKey, f: impl FnOnce(&mut Draft) -> R) -> Option<R> {
        let mut drafts = self.drafts.lock().await;
        self.live_entry(&mut drafts, user).map(f)
    }

    /// Removes every expired draft, returning how many were reaped.
    ///
    /// A no-op when no TTL is configured.
    pub async fn reap_expired(&self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let mut drafts = self.drafts.lock().await;
        let before = drafts.len();
        drafts.retain(|user, draft| {
            let keep = draft.updated_at().elapsed() <= ttl;
            if !keep {
                debug!(user = %user, draft = %draft.id(), "reaping expired draft");
            }
            keep
        });
        before - drafts.len()
    }

    fn live_entry<'a>(
        &self,
        drafts: &'a mut HashMap<UserKey, Draft>,
        user: &UserKey,
    ) -> Option<&'a mut Draft> {
        if let Some(ttl) = self.ttl {
            let expired = drafts
                .get(user)
                .map(|d| d.updated_at().elapsed() > ttl)
                .unwrap_or(false);
            if expired {
                if let Some(draft) = drafts.remove(user) {
                    debug!(user = %user, draft = %draft.id(), "reaping expired draft");
                }
                return None;
            }
        }
        drafts.get_mut(user)
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::DraftStage;
    use serde_json::Value;

    fn user() -> UserKey {
        UserKey::from("alice")
    }

    #[tokio::test]
    async fn insert_then_snapshot_round_trips() {
        let store = DraftStore::new();
        store.insert(user(), Draft::text_message(Value::Null)).await;
        let draft = store.snapshot(&user()).await.unwrap();
        assert_eq!(draft.stage(), DraftStage::Recipient);
    }

    #[tokio::test]
    async fn a_new_draft_silently_overwrites_the_open_one() {
        let store = DraftStore::new();
        store.insert(user(), Draft::text_message(Value::Null)).await;
        let replaced = store.insert(user(), Draft::email(Value::Null)).await;
        assert!(replaced.is_some());
        let draft = store.snapshot(&user()).await.unwrap();
        assert_eq!(draft.kind(), crate::domain::draft::DraftKind::Email);
    }

    #[tokio::test]
    async fn update_mutates_in_place() {
        let store = DraftStore::new();
        store.insert(user(), Draft::text_message(Value::Null)).await;
        store
            .update(&user(), |draft| draft.set_recipient("bob"))
            .await
            .unwrap();
        assert_eq!(store.snapshot(&user()).await.unwrap().recipient(), "bob");
    }

    #[tokio::test]
    async fn update_returns_none_for_unknown_user() {
        let store = DraftStore::new();
        assert!(store.update(&user(), |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn without_a_ttl_drafts_never_expire() {
        let store = DraftStore::new();
        let mut draft = Draft::text_message(Value::Null);
        draft.backdate(86_400);
        store.insert(user(), draft).await;
        assert!(store.contains(&user()).await);
        assert_eq!(store.reap_expired().await, 0);
    }

    #[tokio::test]
    async fn stale_drafts_are_absent_once_a_ttl_is_set() {
        let store = DraftStore::with_ttl(Some(Duration::seconds(300)));
        let mut draft = Draft::text_message(Value::Null);
        draft.backdate(301);
        store.insert(user(), draft).await;
        assert!(!store.contains(&user()).await);
        assert!(store.snapshot(&user()).await.is_none());
    }

    #[tokio::test]
    async fn fresh_drafts_survive_the_ttl() {
        let store = DraftStore::with_ttl(Some(Duration::seconds(300)));
        store.insert(user(), Draft::text_message(Value::Null)).await;
        assert!(store.contains(&user()).await);
    }

    #[tokio::test]
    async fn reap_expired_sweeps_every_stale_draft() {
        let store = DraftStore::with_ttl(Some(Duration::seconds(60)));
        let mut stale = Draft::text_message(Value::Null);
        stale.backdate(120);
        store.insert(UserKey::from("alice"), stale).await;
        store.insert(UserKey::from("bob"), Draft::email(Value::Null)).await;

        assert_eq!(store.reap_expired().await, 1);
        assert!(store.contains(&UserKey::from("bob")).await);
    }
}
