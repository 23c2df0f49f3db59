//! Terminal progress display for maze generation

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_REDRAW_STEPS};

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Upper bound on generator steps for a grid of `cell_count` cells
///
/// Every carve is undone by exactly one backtrack, and the final step
/// finishes without moving.
pub const fn step_bound(cell_count: usize) -> usize {
    (2 * cell_count).saturating_sub(1)
}

/// Single progress bar tracking generator steps
pub struct ProgressManager {
    bar: ProgressBar,
    step_limit: usize,
}

impl ProgressManager {
    /// Create a bar sized for a grid of `cell_count` cells
    pub fn new(label: &str, cell_count: usize) -> Self {
        let step_limit = step_bound(cell_count);
        let bar = ProgressBar::new(step_limit as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar, step_limit }
    }

    /// Report the number of steps taken so far
    ///
    /// Redraws are throttled to every `PROGRESS_REDRAW_STEPS` steps.
    pub fn update_steps(&self, steps: usize) {
        if steps.is_multiple_of(PROGRESS_REDRAW_STEPS) {
            self.bar.set_position(steps.min(self.step_limit) as u64);
            let width = self.step_limit.to_string().len();
            self.bar
                .set_message(format!("{steps:>width$}/{}", self.step_limit));
        }
    }

    /// Fill the bar and report the final step count
    pub fn finish(&self, steps: usize) {
        self.bar.set_position(self.step_limit as u64);
        self.bar.finish_with_message(format!("✓ {steps} steps"));
    }
}
