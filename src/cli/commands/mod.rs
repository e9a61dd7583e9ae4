//! Command implementations for the hydro-formats CLI
//!
//! Each command is implemented in its own module:
//! - `inspect`: read one file of any supported kind and summarise it
//! - `structures`: read a structures file against a schema, optionally rewrite it
//! - `import`: batch import with progress and a per-file summary

pub mod import;
pub mod inspect;
pub mod shared;
pub mod structures;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Main command runner, dispatching to the subcommand handler
pub async fn run(args: Args, cancellation: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Inspect(inspect_args)) => {
            inspect::run_inspect(&inspect_args, cancellation).await
        }
        Some(Commands::Structures(structures_args)) => {
            structures::run_structures(&structures_args, cancellation).await
        }
        Some(Commands::Import(import_args)) => import::run_import(&import_args, cancellation).await,
        None => Err(Error::invalid_argument("No command given")),
    }
}
