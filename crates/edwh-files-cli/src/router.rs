// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use edwh_files_http::{DownloadOptions, UploadOptions};

use crate::commands::*;
use crate::completion::generate_completions;
use crate::config::FilesConfig;
use crate::error::{CliError, CliResult};
use crate::plugin;

/// edwh-file - share files through a transfer.sh server
#[derive(Parser, Debug)]
#[command(name = "edwh-file")]
#[command(bin_name = "edwh-file")]
#[command(about = "Upload, download and delete files on a transfer.sh server")]
#[command(
    long_about = "edwh-file: the `file` task namespace.\n\nUpload files (directories are packed first), download them again, and delete them through the link the server hands out.\n\nQuick start:\n  • edwh-file upload report.pdf\n  • edwh-file download https://files.edwh.nl/abc/report.pdf\n  • edwh-file delete <deletion url>"
)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (default: $CONFIG_DIR/edwh/files.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Upload a file; directories are packed first
    #[command(visible_alias = "add")]
    Upload {
        /// File or directory to upload
        #[arg(value_name = "FILENAME")]
        filename: PathBuf,

        /// Server to upload to (default: configured server)
        #[arg(long)]
        server: Option<String>,

        /// Remove the file after this many downloads
        #[arg(long, value_name = "N")]
        max_downloads: Option<u32>,

        /// Remove the file after this many days
        #[arg(long, value_name = "N")]
        max_days: Option<u32>,

        /// Have the server encrypt the file with this password
        #[arg(long, value_name = "PASSWORD")]
        encrypt: Option<String>,

        /// Pack plain files too
        #[arg(long)]
        compress: bool,

        /// Archive format to pack with (zip, tgz, gz)
        #[arg(long, value_name = "EXT")]
        compression: Option<String>,

        /// Compression level 1-9
        #[arg(long, value_name = "N")]
        level: Option<u32>,
    },

    /// Download a file
    #[command(visible_alias = "get")]
    Download {
        /// URL of the file (https:// is assumed when missing)
        #[arg(value_name = "URL")]
        url: String,

        /// Where to save the file (default: last URL segment)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Password the file was encrypted with
        #[arg(long, value_name = "PASSWORD")]
        decrypt: Option<String>,

        /// Unpack the file after downloading
        #[arg(long)]
        unpack: bool,
    },

    /// Delete an upload through its deletion URL
    #[command(visible_alias = "remove")]
    Delete {
        /// Deletion URL printed by upload
        #[arg(value_name = "DELETION_URL")]
        url: String,
    },

    /// Pack a file or directory into an archive
    Compress {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Archive path (default: next to the source)
        #[arg(value_name = "TARGET")]
        target: Option<PathBuf>,

        /// Archive format (zip, tgz, gz; default: best available)
        #[arg(long, value_name = "EXT")]
        format: Option<String>,

        /// Compression level 1-9
        #[arg(long, value_name = "N")]
        level: Option<u32>,

        /// Leave an existing target alone
        #[arg(long)]
        no_overwrite: bool,
    },

    /// Unpack an archive
    Decompress {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output path (default: the source without its last extension)
        #[arg(value_name = "TARGET")]
        target: Option<PathBuf>,

        /// Leave an existing target alone
        #[arg(long)]
        no_overwrite: bool,
    },

    /// List the tasks and compression formats
    Tasks,

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}

/// Global options that take a separate value (`--config PATH`)
const GLOBAL_VALUE_OPTIONS: &[&str] = &["--config"];

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse_from(Self::normalize_args(std::env::args()));

        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli).await
    }

    /// Accept namespaced task names (`file.add`) as the subcommand
    pub fn normalize_args<I>(args: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args: Vec<String> = args.into_iter().collect();
        let mut position = None;
        let mut index = 1;
        while index < args.len() {
            let arg = args[index].as_str();
            if arg == "--" {
                break;
            }
            if GLOBAL_VALUE_OPTIONS.contains(&arg) {
                // the next argument is this option's value
                index += 2;
                continue;
            }
            if !arg.starts_with('-') {
                position = Some(index);
                break;
            }
            index += 1;
        }
        if let Some(index) = position {
            if args[index].contains('.') {
                if let Some(task) = plugin::resolve(&args[index]) {
                    args[index] = task.name.to_string();
                }
            }
        }
        args
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        if let Commands::Completions { shell } = &cli.command {
            return generate_completions(shell).map_err(CliError::invalid_argument);
        }

        let config = FilesConfig::load(cli.config.as_deref())?;

        match &cli.command {
            Commands::Upload {
                filename,
                server,
                max_downloads,
                max_days,
                encrypt,
                compress,
                compression,
                level,
            } => {
                let options = UploadOptions {
                    max_downloads: *max_downloads,
                    max_days: *max_days,
                    encrypt: encrypt.clone(),
                };
                let cmd = UploadCommand::new(filename.clone(), config)
                    .with_server(server.clone())
                    .with_options(options)
                    .with_compress(*compress)
                    .with_compression(compression.clone())
                    .with_level(*level);
                cmd.execute().await
            }
            Commands::Download {
                url,
                output,
                decrypt,
                unpack,
            } => {
                let options = DownloadOptions {
                    decrypt: decrypt.clone(),
                };
                let cmd = DownloadCommand::new(url.clone(), config)
                    .with_output(output.clone())
                    .with_options(options)
                    .with_unpack(*unpack);
                cmd.execute().await
            }
            Commands::Delete { url } => {
                let cmd = DeleteCommand::new(url.clone(), config);
                cmd.execute().await
            }
            Commands::Compress {
                source,
                target,
                format,
                level,
                no_overwrite,
            } => {
                let cmd = CompressCommand::new(source.clone(), config)
                    .with_target(target.clone())
                    .with_format(format.clone())
                    .with_level(*level)
                    .with_overwrite(!*no_overwrite);
                cmd.execute().await
            }
            Commands::Decompress {
                source,
                target,
                no_overwrite,
            } => {
                let cmd = DecompressCommand::new(source.clone())
                    .with_target(target.clone())
                    .with_overwrite(!*no_overwrite);
                cmd.execute().await
            }
            Commands::Tasks => TasksCommand::new().execute().await,
            Commands::Config => ConfigCommand::new(config, cli.config.clone()).execute().await,
            Commands::Completions { .. } => Ok(()),
        }
    }
}
