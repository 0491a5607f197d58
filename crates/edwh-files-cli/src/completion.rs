// Shell completion generation

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::router::Cli;

fn parse_shell(shell: &str) -> Result<Shell, String> {
    match shell.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        _ => Err(format!("Unknown shell: {}", shell)),
    }
}

/// Write completions for `shell` into `out`
pub fn write_completions(shell: &str, out: &mut dyn Write) -> Result<(), String> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "edwh-file", out);
    Ok(())
}

/// Generate shell completions on stdout
pub fn generate_completions(shell: &str) -> Result<(), String> {
    write_completions(shell, &mut io::stdout())
}
