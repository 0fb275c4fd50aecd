use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod errors;

use commands::{FormatOptions, FormatOutcome, PolicyFileArgs};

/// approval-policy: check the team approval policy of a repository
#[derive(Parser)]
#[command(name = "approval-policy")]
#[command(about = "Validate and format team approval policy files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the policy file decodes
    Validate(PolicyFileArgs),

    /// Rewrite the policy file in canonical form
    Format {
        #[command(flatten)]
        file: PolicyFileArgs,

        /// Fail instead of writing when the file is not formatted
        #[arg(long)]
        check: bool,

        /// Rewrite the file even though its comments will be removed
        #[arg(long)]
        discard_comments: bool,
    },

    /// Show the CLI version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("APPROVAL_POLICY_LOG"))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Validate(args) => match commands::validate(&args.policy_path()) {
            Ok(summary) => {
                println!(
                    "Policy is valid: {} rule set(s), {} rule(s), {} alert(s)",
                    summary.rule_sets, summary.rules, summary.alerts
                );
                std::process::exit(0);
            }
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Format {
            file,
            check,
            discard_comments,
        } => match commands::format(
            &file.policy_path(),
            FormatOptions {
                check: *check,
                discard_comments: *discard_comments,
            },
        ) {
            Ok(FormatOutcome::Unchanged) => {
                println!("Policy is already formatted");
                std::process::exit(0);
            }
            Ok(FormatOutcome::Rewritten) => {
                println!("Policy formatted");
                std::process::exit(0);
            }
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Version => {
            println!("approval-policy version {}", env!("CARGO_PKG_VERSION"));
            std::process::exit(0);
        }
    }
}
