//! In-flight OAuth login state. Entries are single-use: `consume`
//! deletes on read so a `(code, state)` pair can never be replayed.
//! Process-local by design; a restart invalidates in-flight logins.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::models::auth::OAuthState;

pub const STATE_TTL_MINUTES: i64 = 15;
const SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Default)]
pub struct OAuthStateStore {
    entries: RwLock<HashMap<String, OAuthState>>,
}

impl OAuthStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, state: String, entry: OAuthState) {
        self.entries.write().await.insert(state, entry);
    }

    /// Removes and returns the entry for `state`. Returns `None` when
    /// the state is unknown, already consumed, or older than the TTL
    /// (the caller cannot distinguish these, by design).
    pub async fn consume(&self, state: &str) -> Option<OAuthState> {
        let entry = self.entries.write().await.remove(state)?;
        let age = Utc::now() - entry.created_at;
        if age > Duration::minutes(STATE_TTL_MINUTES) {
            return None;
        }
        Some(entry)
    }

    /// Removes entries strictly older than the TTL. A callback racing
    /// the sweep is safe: fresh entries are never touched.
    pub async fn sweep_expired(&self) -> usize {
        let cutoff = Utc::now() - Duration::minutes(STATE_TTL_MINUTES);
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.created_at >= cutoff);
        before - entries.len()
    }

    pub fn spawn_sweeper(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(SWEEP_INTERVAL_SECS));

            loop {
                interval.tick().await;
                let removed = self.sweep_expired().await;
                if removed > 0 {
                    tracing::debug!("Swept {} expired OAuth states", removed);
                }
            }
        })
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_aged(minutes: i64) -> OAuthState {
        OAuthState {
            wallet_address: "0xabc".to_string(),
            code_verifier: "verifier".to_string(),
            created_at: Utc::now() - Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn state_is_single_use() {
        let store = OAuthStateStore::new();
        store.insert("st1".to_string(), entry_aged(0)).await;

        assert!(store.consume("st1").await.is_some());
        // Replay of the same state must fail.
        assert!(store.consume("st1").await.is_none());
    }

    #[tokio::test]
    async fn expired_state_is_rejected() {
        let store = OAuthStateStore::new();
        store.insert("old".to_string(), entry_aged(16)).await;

        assert!(store.consume("old").await.is_none());
    }

    #[tokio::test]
    async fn unknown_state_is_rejected() {
        let store = OAuthStateStore::new();
        assert!(store.consume("never-issued").await.is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_stale_entries() {
        let store = OAuthStateStore::new();
        store.insert("fresh".to_string(), entry_aged(1)).await;
        store.insert("stale".to_string(), entry_aged(20)).await;

        let removed = store.sweep_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.consume("fresh").await.is_some());
    }
}
