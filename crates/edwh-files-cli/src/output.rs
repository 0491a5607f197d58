// Output formatting and styling

use colored::Colorize;
use serde::Serialize;

use crate::error::{CliError, CliResult};
use crate::logging::VerbosityLevel;

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputStyle {
    /// Styling for stderr messages
    pub fn stderr() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }

    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg.red())
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format header
    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format a URL or path the user will want to copy
    pub fn link(&self, text: &str) -> String {
        if self.use_colors {
            text.cyan().underline().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Print error message (always shown)
pub fn print_error(msg: &str) {
    eprintln!("{}", OutputStyle::stderr().error(msg));
}

/// Print success message
pub fn print_success(msg: &str) {
    if VerbosityLevel::Normal.should_output() {
        eprintln!("{}", OutputStyle::stderr().success(msg));
    }
}

/// Print warning message
pub fn print_warning(msg: &str) {
    if VerbosityLevel::Normal.should_output() {
        eprintln!("{}", OutputStyle::stderr().warning(msg));
    }
}

/// Print info message
pub fn print_info(msg: &str) {
    if VerbosityLevel::Normal.should_output() {
        eprintln!("{}", OutputStyle::stderr().info(msg));
    }
}

/// Render a command result as pretty JSON
pub fn render_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Internal(format!("could not serialize result: {e}")))
}

/// Print a command result to stdout (shown even in quiet mode)
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", render_json(value)?);
    Ok(())
}
