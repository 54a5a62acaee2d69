//! Tool System
//!
//! Typed tool framework for agent capabilities. Each tool declares its input
//! and output records; the registry is the only place JSON arguments are
//! decoded into those records and outputs are encoded back.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, integer, number, boolean, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Item type for array parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
}

impl ParameterSchema {
    pub fn new(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: false,
            default: None,
            enum_values: None,
            items: None,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, "string", description)
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, "integer", description)
    }

    /// Array of strings
    pub fn string_list(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut param = Self::new(name, "array", description);
        param.items = Some("string".into());
        param
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn property(&self) -> serde_json::Value {
        let mut prop = serde_json::Map::new();
        prop.insert("type".into(), self.param_type.clone().into());
        prop.insert("description".into(), self.description.clone().into());
        if let Some(items) = &self.items {
            prop.insert("items".into(), serde_json::json!({ "type": items }));
        }
        if let Some(values) = &self.enum_values {
            prop.insert("enum".into(), values.clone().into());
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        serde_json::Value::Object(prop)
    }
}

/// Tool definition schema (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

impl ToolSchema {
    /// JSON Schema object describing the arguments
    pub fn input_schema(&self) -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.property()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Tool trait - implement to add new capabilities
///
/// `Input` field names must match the schema's property names.
#[async_trait]
pub trait Tool: Send + Sync + 'static {
    /// Arguments record decoded from the model's request
    type Input: DeserializeOwned + Send;

    /// Result record encoded into the tool-result payload
    type Output: Serialize + Send;

    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with decoded arguments
    async fn execute(&self, input: Self::Input) -> Result<Self::Output>;
}

/// Object-safe view of a `Tool` working on JSON values
#[async_trait]
trait ErasedTool: Send + Sync {
    fn schema(&self) -> ToolSchema;

    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value>;
}

#[async_trait]
impl<T: Tool> ErasedTool for T {
    fn schema(&self) -> ToolSchema {
        Tool::schema(self)
    }

    async fn call(&self, input: serde_json::Value) -> Result<serde_json::Value> {
        let input: T::Input = serde_json::from_value(input)
            .map_err(|e| AgentError::ToolValidation(e.to_string()))?;
        let output = self.execute(input).await?;
        Ok(serde_json::to_value(output)?)
    }
}

/// Registry for available tools
///
/// Schemas are reported in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ErasedTool>>,
    index: HashMap<String, usize>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a new tool
    ///
    /// Fails with `Config` if a tool with the same name is already present.
    pub fn register<T: Tool>(&mut self, tool: T) -> Result<()> {
        let name = Tool::schema(&tool).name;
        if self.index.contains_key(&name) {
            return Err(AgentError::Config(format!(
                "Tool '{}' registered twice",
                name
            )));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(Arc::new(tool));
        Ok(())
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Invoke a tool by name, propagating every failure.
    ///
    /// An unregistered name yields `ToolNotFound`.
    pub async fn dispatch(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let tool = self
            .index
            .get(name)
            .map(|&i| Arc::clone(&self.tools[i]))
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;

        tool.call(input).await
    }

    /// Get all tool schemas, in registration order
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Get tool names, in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.schema().name).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
