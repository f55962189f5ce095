//! Progress reporting for artifact loading
//!
//! Loading a large reference table can take a few seconds, so a spinner is
//! shown while the context is built.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Template used by the loading spinner
pub const SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Create a spinner progress bar for operations without a known length
///
/// When `enabled` is false a hidden bar is returned, so callers never need
/// to branch on the setting.
#[must_use]
pub fn create_spinner(message: Option<&str>, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Finish a progress bar and clear it from display
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
