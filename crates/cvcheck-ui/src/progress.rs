use cvcheck_core::upload::{StageState, stage_display};
use cvcheck_types::ProgressUpdate;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::theme::Palette;
use crate::views;

const BAR_TEMPLATE: &str = "  {bar:40.cyan/blue} {pos:>3}% {msg}";

/// Progress bar of a running analysis. Drawn on stderr, and hidden when
/// stderr is not a terminal. The stage list is reprinted whenever the step
/// changes.
pub struct AnalysisProgress {
    bar: ProgressBar,
    shown_step: u8,
}

impl AnalysisProgress {
    pub fn start() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), target);
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        bar.set_style(style);
        bar.set_message(stage_display(1)[0].label);

        // The processing view already lists the stages at step 1
        Self { bar, shown_step: 1 }
    }

    /// Move the bar and return the stage lines when the step changed
    pub fn update(&mut self, update: &ProgressUpdate, palette: &Palette) -> Vec<String> {
        self.bar
            .set_position(update.progress.clamp(0.0, 100.0).round() as u64);

        let stages = stage_display(update.step);
        if let Some(current) = stages.iter().find(|s| s.state == StageState::Current) {
            self.bar.set_message(current.label);
        }

        if update.step == self.shown_step {
            return Vec::new();
        }
        self.shown_step = update.step;

        stages.iter().map(|stage| views::stage(stage, palette)).collect()
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Run `f` with the bar cleared from the terminal
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
