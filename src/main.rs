use clap::{Parser, Subcommand};
use clap_complete::Shell;
use obfuscation_impact::cmd;
use std::path::PathBuf;
use std::process;

/// Obfuscator impact analyzer
///
/// obfuscation-impact compiles every source file under a directory, runs each
/// configured obfuscator on the result, and reports how methods, fields,
/// size, constant pool and call flow changed.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile, obfuscate and compare every source file under ROOT
    Analyze {
        /// Directory (or single source file) to analyze
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Configuration file to use instead of ./.obfuscation-impact.toml
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Keep the compiled baselines next to their sources
        #[arg(long)]
        keep_artifacts: bool,
    },

    /// Check that the configured tools are installed
    Tools {
        /// Configuration file to use instead of ./.obfuscation-impact.toml
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Write a default .obfuscation-impact.toml
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Analyze {
            root,
            config,
            keep_artifacts,
        }) => cmd::cmd_analyze(cmd::AnalyzeOptions {
            root,
            config: config.as_deref(),
            keep_artifacts: *keep_artifacts,
        }),
        Some(Commands::Tools { config }) => cmd::cmd_tools(config.as_deref()),
        Some(Commands::Init { force }) => cmd::cmd_init(*force),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("obfuscation-impact v{}", env!("CARGO_PKG_VERSION"));
            println!("Obfuscator impact analyzer\n");
            println!("Usage: obfuscation-impact <COMMAND>\n");
            println!("Commands:");
            println!("  analyze      Compile, obfuscate and compare every source file under ROOT");
            println!("  tools        Check that the configured tools are installed");
            println!("  init         Write a default .obfuscation-impact.toml");
            println!("  completions  Generate shell completions");
            println!(
                "\nRun 'obfuscation-impact <COMMAND> --help' for more information on a command."
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        use obfuscation_impact::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
