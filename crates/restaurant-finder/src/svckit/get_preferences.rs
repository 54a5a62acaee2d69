//! Get Preferences Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolSchema};

use crate::model::Preferences;
use crate::store::PreferenceStore;

#[derive(Clone, Debug, Deserialize)]
pub struct GetPreferencesInput {
    pub user_id: String,
}

/// Stored preferences tagged with their owner
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GetPreferencesOutput {
    pub user_id: String,
    #[serde(flatten)]
    pub preferences: Preferences,
}

/// Tool for reading user preferences
pub struct GetPreferencesTool {
    store: Arc<dyn PreferenceStore>,
}

impl GetPreferencesTool {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetPreferencesTool {
    type Input = GetPreferencesInput;
    type Output = GetPreferencesOutput;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_preferences".into(),
            description: "Retrieve the stored food/restaurant preferences for the current user.".into(),
            parameters: vec![ParameterSchema::string("user_id", "Unique user identifier").required()],
        }
    }

    async fn execute(&self, input: GetPreferencesInput) -> CoreResult<GetPreferencesOutput> {
        let preferences = self.store.fetch(&input.user_id).await?;
        Ok(GetPreferencesOutput {
            user_id: input.user_id,
            preferences,
        })
    }
}
