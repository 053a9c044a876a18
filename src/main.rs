//! Fake Store CLI - browse the Fake Store catalog from the terminal
//!
//! Lists products and categories, shows product details, and keeps a
//! shopping cart that survives between runs.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fakestore::cart::CartManager;
use fakestore::cli::Cli;
use fakestore::config::Settings;
use fakestore::storefront::{CommandError, Storefront};

/// Sends log output to stderr, quiet unless `-v` or `RUST_LOG` asks otherwise
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "fakestore=debug" } else { "fakestore=error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_cli(cli)?;
    let cart = CartManager::hydrate(settings.cart_storage()?);
    let mut storefront = Storefront::new(settings.catalog_client(), cart);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let stdin = io::stdin();
    storefront
        .execute(&cli.command(), &mut stdout.lock(), &mut stderr.lock(), &mut stdin.lock())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            let retryable = e
                .downcast_ref::<CommandError>()
                .is_some_and(CommandError::is_retryable);
            if retryable {
                eprintln!("Please check your connection and try again.");
            }
            ExitCode::FAILURE
        }
    }
}
