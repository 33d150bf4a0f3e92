use serde::Deserialize;
use std::fmt;

pub const DEFAULT_MODEL_NAME: &str = "Claude";
pub const DEFAULT_CONTEXT_WINDOW_SIZE: f64 = 200_000.0;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InputModel {
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InputContextWindow {
    pub used_percentage: Option<f64>,
    pub context_window_size: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InputWorkspace {
    pub current_dir: Option<String>,
}

/// Statusline payload sent by the host on stdin. Every field is optional.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct StatusInput {
    pub model: Option<InputModel>,
    pub context_window: Option<InputContextWindow>,
    pub workspace: Option<InputWorkspace>,
}

/// Marker for stdin that is not a JSON document at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidJson;

impl fmt::Display for InvalidJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid JSON")
    }
}

impl std::error::Error for InvalidJson {}

impl StatusInput {
    /// Parse raw stdin. Syntax errors (including empty input) surface as
    /// [`InvalidJson`]; well-formed JSON of the wrong shape is a regular error.
    pub fn parse(bytes: &[u8]) -> anyhow::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|_| anyhow::Error::new(InvalidJson))?;
        if !value.is_object() {
            anyhow::bail!("expected a JSON object, found {}", json_kind(&value));
        }
        let input = serde_json::from_value(value)?;
        Ok(input)
    }

    pub fn model_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.display_name.as_deref())
            .unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn used_percentage(&self) -> f64 {
        self.context_window
            .as_ref()
            .and_then(|c| c.used_percentage)
            .unwrap_or(0.0)
    }

    /// Zero counts as unset, like a missing field.
    pub fn context_window_size(&self) -> f64 {
        match self.context_window.as_ref().and_then(|c| c.context_window_size) {
            Some(size) if size != 0.0 => size,
            _ => DEFAULT_CONTEXT_WINDOW_SIZE,
        }
    }

    pub fn current_dir(&self) -> Option<&str> {
        self.workspace.as_ref().and_then(|w| w.current_dir.as_deref())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
