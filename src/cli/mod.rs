//! Command-line interface
//!
//! - init: create an empty data file
//! - export / import: bulk data interchange
//! - add-* / remove-*: registry operations on single records
//! - list: dump one record kind

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, KindArg, ModeArg};
pub use commands::{run_command, Config};
pub use errors::{CliError, CliResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Parses arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    init_logger();
    run_command(Cli::parse_args())
}

fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roadbase=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}
