//! Slipguard CLI - Command-line utility for zip extraction with zip-slip
//! protection.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose)?;

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let action = cli.action();
    if action == cli::Action::Usage {
        cli::Cli::command().print_help()?;
        return Ok(());
    }

    let result = match &action {
        cli::Action::Usage => Ok(()),
        cli::Action::Extract {
            archive,
            dest_dir,
            preview_entry,
        } => commands::extract::execute(
            archive,
            dest_dir,
            *preview_entry,
            &*formatter,
            cli.quiet || cli.json,
        ),
        cli::Action::List { archive } => commands::list::execute(archive, &*formatter),
        cli::Action::Comment { archive } => commands::comment::execute(archive, &*formatter),
    };

    if cli.json
        && let Err(err) = &result
    {
        output::print_json_error(action.operation(), err);
    }
    result
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides the
/// default level, which is `warn`, or `info` with `--verbose`.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env()?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
    Ok(())
}
