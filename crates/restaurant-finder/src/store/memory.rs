//! In-memory preference store, used in tests and for `:memory:` setups

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PreferenceStore;
use crate::error::Result;
use crate::model::{PreferenceUpdate, Preferences};

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    users: RwLock<HashMap<String, Preferences>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn upsert(&self, user_id: &str, update: PreferenceUpdate) -> Result<()> {
        self.users
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .merge(update);
        Ok(())
    }

    async fn fetch(&self, user_id: &str) -> Result<Preferences> {
        Ok(self
            .users
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_gets_default() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.fetch("nobody").await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_upsert_merges() {
        let store = MemoryPreferenceStore::new();
        store
            .upsert(
                "u1",
                PreferenceUpdate {
                    cuisines_liked: Some(vec!["Italian".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .upsert(
                "u1",
                PreferenceUpdate {
                    cuisines_liked: Some(vec!["Thai".into(), "Italian".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let prefs = store.fetch("u1").await.unwrap();
        assert_eq!(prefs.cuisines_liked, ["Italian", "Thai"]);
        assert_eq!(store.fetch("u2").await.unwrap(), Preferences::default());
    }
}
