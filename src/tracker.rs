use crate::celebration::{self, Effect, GOAL_MESSAGE};
use crate::format::format_amount;
use crate::models::{BoxView, TrackerView};
use crate::progress::Progress;
use crate::settings::Settings;

/// Everything the page shows, owned in one place.
///
/// Commands return the records that must be written back instead of writing
/// them, so the caller decides how persistence happens.
#[derive(Debug, Clone)]
pub struct Tracker {
    settings: Settings,
    progress: Progress,
    checked_values: Vec<u64>,
    previous_total: u64,
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub checked_values: Vec<u64>,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsOutcome {
    pub settings: Settings,
    pub effects: Vec<Effect>,
}

impl Tracker {
    pub fn new(settings: Settings, checked_values: Vec<u64>) -> Self {
        let progress = Progress::build(settings.goal, settings.step, &checked_values);
        let previous_total = progress.total();
        Self {
            settings,
            progress,
            checked_values,
            previous_total,
            message: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Toggles the box at 0-based `position`. `None` leaves the tracker
    /// untouched.
    pub fn toggle_box(&mut self, position: usize, checked: bool) -> Option<ToggleOutcome> {
        let checked_values = self.progress.toggle(position, checked)?;
        self.checked_values = checked_values.clone();

        let new_total = self.progress.total();
        let celebration = celebration::evaluate(self.previous_total, new_total, &self.settings);
        self.previous_total = new_total;

        if celebration.clear_message {
            self.message = None;
        }
        if celebration.major {
            self.message = Some(GOAL_MESSAGE.to_string());
        }

        Some(ToggleOutcome {
            checked_values,
            effects: celebration.effects(),
        })
    }

    /// Replaces the settings from raw form input and rebuilds the grid from
    /// the last saved checked values. No celebration fires.
    pub fn apply_settings(
        &mut self,
        raw_goal: &str,
        raw_step: &str,
        raw_interval: &str,
        confetti_enabled: bool,
    ) -> SettingsOutcome {
        self.settings = self
            .settings
            .apply(raw_goal, raw_step, raw_interval, confetti_enabled);
        self.progress = Progress::build(self.settings.goal, self.settings.step, &self.checked_values);
        self.previous_total = self.progress.total();

        let mut effects = Vec::new();
        if self.previous_total < self.settings.goal {
            self.message = None;
            effects.push(Effect::ClearMessage);
        }

        SettingsOutcome {
            settings: self.settings,
            effects,
        }
    }

    pub fn view(&self) -> TrackerView {
        let progress = &self.progress;
        let total_label = format_amount(progress.total());
        let boxes = progress
            .boxes()
            .into_iter()
            .map(|b| BoxView {
                index: b.index,
                value: b.value,
                label: format_amount(b.value),
                checked: b.checked,
            })
            .collect();

        TrackerView {
            boxes,
            checked_count: progress.checked_count(),
            box_count: progress.box_count(),
            total: progress.total(),
            summary: format!(
                "Avkryssede bokser: {} / {}  •  Totalt: {}",
                progress.checked_count(),
                progress.box_count(),
                total_label
            ),
            total_label,
            goal_label: format!("Mål: {}", format_amount(self.settings.goal)),
            percent: progress.percent(),
            settings: self.settings,
            message: self.message.clone(),
        }
    }
}
