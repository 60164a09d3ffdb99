//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "reserva";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Returns a one-line install hint for shells that need one.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("eval \"$(reserva completions bash)\"  # in ~/.bashrc"),
        Shell::Zsh => Some("reserva completions zsh > ~/.zsh/completions/_reserva"),
        Shell::Fish => Some("reserva completions fish | source  # in config.fish"),
        Shell::PowerShell => {
            Some("reserva completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    ///
    /// The script goes to stdout; the install hint goes to stderr unless
    /// `--quiet` is set.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# To enable {} completions:", self.shell);
                eprintln!("#   {hint}");
            }
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
