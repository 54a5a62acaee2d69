//! Preference Storage
//!
//! Per-user dining preferences that persist across conversations.

mod memory;
mod sqlite;

pub use memory::MemoryPreferenceStore;
pub use sqlite::SqlitePreferenceStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{PreferenceUpdate, Preferences};

/// Preference store trait
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Merge `update` into the user's stored preferences, creating the
    /// user on first write.
    async fn upsert(&self, user_id: &str, update: PreferenceUpdate) -> Result<()>;

    /// Stored preferences, or the empty default for an unknown user
    async fn fetch(&self, user_id: &str) -> Result<Preferences>;
}
