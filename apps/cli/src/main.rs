//! `faultline` demo driver

mod calculator;
mod chain;

use clap::{Parser, Subcommand};
use faultline_error::{ChainError, ResultExt};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "faultline", version, about = "Panic barriers and error context chains")]
struct Cli {
    /// Log filter, in `RUST_LOG` syntax
    #[arg(long, env = "FAULTLINE_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run arithmetic that panics, each step behind its own barrier
    Calculator,
    /// Wrap a sentinel error repeatedly and render the chain
    Chain {
        /// Number of notes to add
        #[arg(long, default_value_t = 6)]
        depth: usize,
        /// Return the chain from `main` instead of printing it
        #[arg(long)]
        fail: bool,
    },
}

fn init_logging(filter: &str) -> Result<(), ChainError> {
    let filter = EnvFilter::try_new(filter).wrap_err_with(|| format!("invalid log filter `{filter}`"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Run `f` with panics logged at debug instead of dumped to stderr, then put
/// the previous hook back.
///
/// Only for work whose panics a barrier absorbs and reports on its own.
fn quiet_panics<T>(f: impl FnOnce() -> T) -> T {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic raised");
    }));
    let value = f();
    std::panic::set_hook(previous);
    value
}

fn main() -> Result<(), ChainError> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Calculator => {
            let is_ok = quiet_panics(calculator::run);
            println!("isOk : {is_ok}");
        }
        Command::Chain { depth, fail: true } => chain::fail(depth)?,
        Command::Chain { depth, fail: false } => println!("{}", chain::run(depth)),
    }
    Ok(())
}
