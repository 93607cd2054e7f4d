//! Terminal spinner progress handler

use super::{ProgressEvent, ProgressHandler};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Handler that drives an indicatif spinner on stderr.
pub struct SpinnerHandler {
    bar: ProgressBar,
}

impl SpinnerHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}").expect("valid template"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Clear the spinner before printing final output.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for SpinnerHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressHandler for SpinnerHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { recipe } => {
                self.bar.set_message(format!("Reading recipe {recipe}"));
            }
            ProgressEvent::ProfileStarted { profile } => {
                self.bar.set_message(format!("Processing profile {profile}"));
            }
            ProgressEvent::ZonesResolved {
                profile, assigned, ..
            } => {
                self.bar
                    .set_message(format!("{profile}: {assigned} zone(s) mapped"));
            }
            ProgressEvent::ProfileComplete { profile, keys } => {
                self.bar
                    .set_message(format!("{profile}: {keys} fields extracted"));
            }
            ProgressEvent::Completed { .. } => {
                self.bar.finish_and_clear();
            }
            ProgressEvent::Failed { .. } => {
                self.bar.abandon();
            }
        }
    }
}
