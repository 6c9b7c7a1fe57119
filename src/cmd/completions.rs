//! Completions command implementation
//!
//! Handles `obfuscation-impact completions <SHELL>`, which writes a shell
//! completion script to stdout.

use clap::{Arg, ArgAction, Command};
use clap_complete::{generate, Shell};
use std::io::Write;

const BIN_NAME: &str = "obfuscation-impact";

fn command() -> Command {
    let config_arg = || {
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .help("Configuration file to use instead of ./.obfuscation-impact.toml")
    };

    Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Measure how obfuscators change compiled artifacts")
        .arg(
            Arg::new("no-emoji")
                .long("no-emoji")
                .help("Disable emoji output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("analyze")
                .about("Compile, obfuscate and compare every source file under ROOT")
                .arg(Arg::new("root").value_name("ROOT").required(true))
                .arg(config_arg())
                .arg(
                    Arg::new("keep-artifacts")
                        .long("keep-artifacts")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tools")
                .about("Check that the configured tools are installed")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("init")
                .about("Write a default .obfuscation-impact.toml")
                .arg(Arg::new("force").long("force").action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("completions").about("Generate shell completions"))
}

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    generate(shell, &mut command(), BIN_NAME, out);
}

/// Generate shell completion scripts
///
/// # Examples
///
/// ```bash
/// # Bash
/// obfuscation-impact completions bash > /etc/bash_completion.d/obfuscation-impact
///
/// # Zsh
/// obfuscation-impact completions zsh > ~/.zfunc/_obfuscation-impact
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_mention_every_subcommand() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let mut out = Vec::new();
            write_completions(shell, &mut out);
            let script = String::from_utf8(out).unwrap();

            for subcommand in ["analyze", "tools", "init", "completions"] {
                assert!(
                    script.contains(subcommand),
                    "{shell:?} completions miss {subcommand}"
                );
            }
        }
    }

    #[test]
    fn test_command_definition_is_consistent() {
        command().debug_assert();
    }
}
