//! kasten - a personal knowledge base that indexes notes by their header tags

pub mod cli;
pub mod domain;
pub mod index;
pub mod infra;
pub mod kasten;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_attr, handle_check, handle_filter, handle_put, handle_read, handle_tags},
};

pub use kasten::{Kasten, KastenError, KastenResult};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "KASTEN_LOG";

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let home = config.home_dir(cli.home.as_ref());
    tracing::debug!(home = %home.display(), "resolved store directory");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Put(args) => handle_put(args, &home, &mut out),
        Command::Read(args) => handle_read(args, &home, &mut out),
        Command::Filter(args) => handle_filter(args, &home, &config, &mut out),
        Command::Tags(args) => handle_tags(args, &home, &config, &mut out),
        Command::Attr(args) => handle_attr(args, &home, &mut out),
        Command::Check => handle_check(&home, &mut out),
        Command::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "kasten", &mut out);
            Ok(())
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `KASTEN_LOG` takes any `EnvFilter` directive; without it the level is
/// `warn`, or `debug` for this crate when `-v` is given.
fn init_tracing(verbose: u8) {
    let default = if verbose > 0 { "warn,kasten=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
