// Progress indicators and spinners

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use edwh_files_http::transfer::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

use crate::logging::VerbosityLevel;

const TRANSFER_TEMPLATE: &str =
    "{msg} {percent:>3}% [{bar:40.cyan/blue}] {bytes}/{total_bytes} {binary_bytes_per_sec}";
const UNKNOWN_LENGTH_TEMPLATE: &str = "{spinner:.cyan} {msg} {bytes} {binary_bytes_per_sec}";

/// Create a spinner for long-running operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to create spinner template: {}", e);
            ProgressStyle::default_spinner()
        });
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Create a byte progress bar for a transfer of known size
pub fn create_transfer_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(TRANSFER_TEMPLATE)
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to create progress bar template: {}", e);
            ProgressStyle::default_bar()
        })
        .progress_chars("=>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Progress display fed by transfer callbacks.
///
/// Starts as a byte bar; switches to a byte-counting spinner when the
/// server does not announce a length. Hidden in quiet mode.
#[derive(Clone)]
pub struct TransferProgress {
    bar: ProgressBar,
    unknown_length: Arc<AtomicBool>,
}

impl TransferProgress {
    pub fn new(message: &str) -> Self {
        let bar = if VerbosityLevel::Normal.should_output() {
            create_transfer_bar(0, message)
        } else {
            ProgressBar::hidden()
        };
        Self {
            bar,
            unknown_length: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Record `done` bytes out of `total`
    pub fn update(&self, done: u64, total: Option<u64>) {
        match total {
            Some(total) => {
                if self.bar.length() != Some(total) {
                    self.bar.set_length(total);
                }
            }
            None => {
                if !self.unknown_length.swap(true, Ordering::Relaxed) {
                    if let Ok(style) =
                        ProgressStyle::default_spinner().template(UNKNOWN_LENGTH_TEMPLATE)
                    {
                        self.bar.set_style(style);
                    }
                }
            }
        }
        self.bar.set_position(done);
    }

    /// Callback handed to the transfer client
    pub fn callback(&self) -> ProgressCallback {
        let progress = self.clone();
        Arc::new(move |done, total| progress.update(done, total))
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        if self.unknown_length.load(Ordering::Relaxed) {
            None
        } else {
            self.bar.length()
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
