//! Vaultshift - copy, move and import hierarchical secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultshift::cli::output;
use vaultshift::cli::{execute, Cli};
use vaultshift::core::constants;
use vaultshift::error::{ConfigError, Error, ImportError, StoreError, TransferError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vaultshift=debug")
        } else {
            EnvFilter::new("vaultshift=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

/// Follow-up advice for errors the operator can fix directly.
fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Store(StoreError::UnknownMount(_)) => Some("run: vaultshift mount <mount>"),
        Error::Store(StoreError::EngineMismatch { .. }) => {
            Some("omit --engine-type to use the mount's engine")
        }
        Error::Store(StoreError::MappingValue(_)) => {
            Some("import the mapping as a document so each key becomes its own secret")
        }
        Error::Transfer(TransferError::Overlap { .. }) => {
            Some("move to a path outside the source, or use copy")
        }
        Error::Transfer(TransferError::Export { source, .. }) => suggestion(source),
        Error::Import(ImportError::MissingPrivateKey) => {
            Some("pass the age identity file with --private-key")
        }
        Error::Config(ConfigError::UnsupportedAddress(_)) => {
            Some("point --address or VAULTSHIFT_ADDR at a store file")
        }
        _ => None,
    }
}
