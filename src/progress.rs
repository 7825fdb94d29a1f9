use serde::Serialize;

/// Upper bound on the grid size. Settings keep `goal / step` within it.
pub const MAX_BOXES: usize = 10_000;

/// One increment on the grid. `index` is 1-based and `value = index * step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavingsBox {
    pub index: usize,
    pub value: u64,
    pub checked: bool,
}

/// The ordered box sequence for a goal/step pair.
///
/// Only the length of the checked prefix is stored, so boxes `1..=checked_count`
/// are always the checked ones and the prefix invariant cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    goal: u64,
    step: u64,
    box_count: usize,
    checked_count: usize,
}

impl Progress {
    /// Rebuilds the grid from persisted checked values.
    ///
    /// Only the largest value is trusted: every box worth at most that much
    /// is checked, which heals gaps in a stored set.
    pub fn build(goal: u64, step: u64, checked_values: &[u64]) -> Self {
        let step = step.max(1);
        let box_count = box_count(goal, step);
        let max_checked = checked_values.iter().copied().max().unwrap_or(0);
        let checked_count = usize::try_from(max_checked / step)
            .unwrap_or(usize::MAX)
            .min(box_count);

        Self {
            goal,
            step,
            box_count,
            checked_count,
        }
    }

    /// Applies a toggle on the box at 0-based `position` and returns the new
    /// checked values, or `None` when the position is outside the grid.
    ///
    /// Checking makes the prefix end at the box, unchecking makes it end
    /// just before it, whatever the previous state was.
    pub fn toggle(&mut self, position: usize, checked: bool) -> Option<Vec<u64>> {
        if position >= self.box_count {
            return None;
        }

        self.checked_count = if checked { position + 1 } else { position };
        Some(self.checked_values())
    }

    pub fn boxes(&self) -> Vec<SavingsBox> {
        (1..=self.box_count)
            .map(|index| SavingsBox {
                index,
                value: (index as u64).saturating_mul(self.step),
                checked: index <= self.checked_count,
            })
            .collect()
    }

    pub fn checked_values(&self) -> Vec<u64> {
        (1..=self.checked_count)
            .map(|index| (index as u64).saturating_mul(self.step))
            .collect()
    }

    pub fn goal(&self) -> u64 {
        self.goal
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn box_count(&self) -> usize {
        self.box_count
    }

    pub fn checked_count(&self) -> usize {
        self.checked_count
    }

    pub fn total(&self) -> u64 {
        total_of(self.checked_count, self.step)
    }

    pub fn percent(&self) -> f64 {
        percent_of(self.total(), self.goal)
    }
}

/// `max(1, round(goal / step))`, rounding halves up, at most [`MAX_BOXES`].
pub fn box_count(goal: u64, step: u64) -> usize {
    let step = u128::from(step.max(1));
    let rounded = (u128::from(goal) * 2 + step) / (step * 2);
    usize::try_from(rounded).unwrap_or(usize::MAX).clamp(1, MAX_BOXES)
}

pub fn total_of(checked_count: usize, step: u64) -> u64 {
    (checked_count as u64).saturating_mul(step)
}

pub fn percent_of(amount: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (amount as f64 * 100.0 / goal as f64).min(100.0)
}
