// edwh-files CLI library

pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod plugin;
pub mod progress;
pub mod router;

pub use config::FilesConfig;
pub use error::{CliError, CliResult};
pub use logging::{init_logging, VerbosityLevel};
pub use progress::{create_spinner, create_transfer_bar, TransferProgress};
pub use router::{Cli, CommandRouter, Commands};
