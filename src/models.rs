use crate::celebration::Effect;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub position: usize,
    pub checked: bool,
}

/// Raw settings values as typed into the modal. Fields accept any JSON so a
/// badly typed value falls back instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    #[serde(default)]
    pub goal: Value,
    #[serde(default)]
    pub step: Value,
    #[serde(default)]
    pub confetti_interval: Value,
    #[serde(default)]
    pub confetti_enabled: Value,
}

impl SettingsRequest {
    pub fn goal_text(&self) -> String {
        raw_text(&self.goal)
    }

    pub fn step_text(&self) -> String {
        raw_text(&self.step)
    }

    pub fn interval_text(&self) -> String {
        raw_text(&self.confetti_interval)
    }

    /// Anything but `true` counts as unchecked.
    pub fn confetti_enabled(&self) -> bool {
        self.confetti_enabled.as_bool().unwrap_or(false)
    }
}

/// Strings pass through and numbers are printed; every other JSON type
/// becomes empty text.
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

/// Same as [`SettingsRequest`] for plain form posts, where an unchecked
/// checkbox is simply missing.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub confetti_interval: String,
    pub confetti_enabled: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxView {
    pub index: usize,
    pub value: u64,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerView {
    pub boxes: Vec<BoxView>,
    pub checked_count: usize,
    pub box_count: usize,
    pub total: u64,
    pub total_label: String,
    pub goal_label: String,
    pub percent: f64,
    pub summary: String,
    pub settings: Settings,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub state: TrackerView,
    pub effects: Vec<Effect>,
}
