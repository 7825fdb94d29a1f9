use crate::settings::Settings;
use serde::Serialize;

pub const GOAL_MESSAGE: &str = "Gratulerer! Du nådde sparemålet ditt 🎉";

/// A visual response to one change in the saved total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    ClearMessage,
    Minor,
    Major { message: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Celebration {
    pub clear_message: bool,
    pub minor: bool,
    pub major: bool,
}

impl Celebration {
    pub fn effects(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.clear_message {
            effects.push(Effect::ClearMessage);
        }
        if self.minor {
            effects.push(Effect::Minor);
        }
        if self.major {
            effects.push(Effect::Major {
                message: GOAL_MESSAGE.to_string(),
            });
        }
        effects
    }
}

/// Compares the totals before and after one event.
///
/// A minor burst fires once when at least one interval boundary is crossed
/// upwards, however many were skipped. A major burst fires when the goal is
/// reached from below. Both may fire together.
pub fn evaluate(previous_total: u64, new_total: u64, settings: &Settings) -> Celebration {
    let mut celebration = Celebration {
        clear_message: new_total < settings.goal,
        ..Celebration::default()
    };

    if new_total <= previous_total {
        return celebration;
    }

    let interval = settings.confetti_interval;
    if settings.confetti_enabled && interval > 0 {
        celebration.minor = new_total / interval > previous_total / interval;
    }

    celebration.major = previous_total < settings.goal && new_total >= settings.goal;
    celebration
}
