//! Tweak Runner CLI
//!
//! A command-line tool for applying, analyzing, and rolling back system
//! tweaks from declarative templates.

use clap::Parser;
use tweak_runner::cli::{
    args::{Cli, Commands, SessionsAction},
    commands::{analyze, execute, rollback, sessions, validate},
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run the appropriate command
    match cli.command {
        Commands::Analyze {
            template,
            output,
            groups,
        } => {
            analyze::analyze(&template, output.as_deref(), &groups)?;
        }

        Commands::Execute {
            template,
            output,
            groups,
        } => {
            execute::execute(&template, output.as_deref(), &groups)?;
        }

        Commands::Rollback {
            template,
            output,
            groups,
        } => {
            rollback::rollback(&template, output.as_deref(), &groups)?;
        }

        Commands::Validate { template } => {
            validate::validate(&template)?;
        }

        Commands::Sessions { action } => match action {
            SessionsAction::List => {
                sessions::list_sessions()?;
            }
            SessionsAction::Show { session_id } => {
                sessions::show_session(&session_id)?;
            }
        },
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("tweak_runner=debug")
    } else {
        EnvFilter::new("tweak_runner=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
