use crate::progress::MAX_BOXES;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_GOAL: u64 = 100_000;
pub const DEFAULT_STEP: u64 = 1_000;
pub const DEFAULT_CONFETTI_INTERVAL: u64 = 10_000;

pub const MIN_GOAL: u64 = 1_000;
pub const MIN_STEP: u64 = 1;
pub const MIN_CONFETTI_INTERVAL: u64 = 1;

/// Tracker tunables, persisted as the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub goal: u64,
    pub step: u64,
    pub confetti_enabled: bool,
    pub confetti_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            step: DEFAULT_STEP,
            confetti_enabled: true,
            confetti_interval: DEFAULT_CONFETTI_INTERVAL,
        }
    }
}

impl Settings {
    /// Reads a stored record leniently: every well-typed field overrides the
    /// default, anything else is ignored. Returns `None` unless the record is
    /// a JSON object.
    pub fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let defaults = Self::default();

        let settings = Self {
            goal: number_field(fields, "goal").unwrap_or(defaults.goal),
            step: number_field(fields, "step").unwrap_or(defaults.step),
            confetti_enabled: fields
                .get("confettiEnabled")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.confetti_enabled),
            confetti_interval: number_field(fields, "confettiInterval")
                .unwrap_or(defaults.confetti_interval),
        };

        Some(settings.clamped())
    }

    /// Builds the next settings from raw form input.
    ///
    /// Empty, unparseable or zero numbers keep the previous goal and step. The
    /// interval falls back to [`DEFAULT_CONFETTI_INTERVAL`] instead of the
    /// previous value. The result goes through [`Settings::clamped`].
    pub fn apply(
        &self,
        raw_goal: &str,
        raw_step: &str,
        raw_interval: &str,
        confetti_enabled: bool,
    ) -> Self {
        let goal = parse_raw(raw_goal).unwrap_or(self.goal as i64);
        let step = parse_raw(raw_step).unwrap_or(self.step as i64);
        let interval = parse_raw(raw_interval).unwrap_or(DEFAULT_CONFETTI_INTERVAL as i64);

        Self {
            goal: goal.max(MIN_GOAL as i64) as u64,
            step: step.max(MIN_STEP as i64) as u64,
            confetti_enabled,
            confetti_interval: interval.max(MIN_CONFETTI_INTERVAL as i64) as u64,
        }
        .clamped()
    }

    /// Applies the floors, and caps the goal at `step * MAX_BOXES` so the
    /// grid stays renderable.
    pub fn clamped(self) -> Self {
        let step = self.step.max(MIN_STEP);
        let max_goal = step.saturating_mul(MAX_BOXES as u64);
        Self {
            goal: self.goal.max(MIN_GOAL).min(max_goal),
            step,
            confetti_enabled: self.confetti_enabled,
            confetti_interval: self.confetti_interval.max(MIN_CONFETTI_INTERVAL),
        }
    }
}

fn parse_raw(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    Some(value.trunc() as i64)
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = fields.get(key)?.as_f64()?;
    Some(value.trunc().max(0.0) as u64)
}
