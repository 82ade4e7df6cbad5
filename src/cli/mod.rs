//! Command-line interface.

pub mod completions;
pub mod copy;
pub mod delete;
pub mod export;
pub mod import;
pub mod mount;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod relocate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Connection;
use crate::core::constants;
use crate::core::document::Format;
use crate::core::mount::EngineType;
use crate::error::Result;

/// Vaultshift - copy, move and import hierarchical secrets.
#[derive(Parser)]
#[command(
    name = "vaultshift",
    about = "Copy, move and import hierarchical secrets inside a KV secret store",
    version
)]
pub struct Cli {
    /// Store address (path to the store file, optionally prefixed with file://)
    #[arg(long, global = true, env = constants::ENV_ADDRESS)]
    pub address: Option<String>,

    /// Namespace inside the store
    #[arg(long, global = true, env = constants::ENV_NAMESPACE)]
    pub namespace: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Copy every secret under a path to another path
    Copy {
        /// Source path, including the mount (e.g. secret/app)
        source: String,
        /// Target path prefix
        target: String,
        /// Engine type (kv1 or kv2); defaults to each mount's engine
        #[arg(long, value_name = "TYPE")]
        engine_type: Option<EngineType>,
    },

    /// Move every secret under a path, deleting the source after confirmation
    Move {
        /// Source path, including the mount
        source: String,
        /// Target path prefix
        target: String,
        /// Delete the source without asking
        #[arg(short = 'y', long)]
        auto_approve: bool,
        /// Engine type (kv1 or kv2); defaults to each mount's engine
        #[arg(long, value_name = "TYPE")]
        engine_type: Option<EngineType>,
    },

    /// Delete every secret under a path after confirmation
    Delete {
        /// Path to delete, including the mount
        path: String,
        /// Delete without asking
        #[arg(short = 'y', long)]
        auto_approve: bool,
        /// Engine type (kv1 or kv2); defaults to the mount's engine
        #[arg(long, value_name = "TYPE")]
        engine_type: Option<EngineType>,
    },

    /// List the sub-paths under a path that hold nested secrets
    Paths {
        /// Root path, including the mount
        path: String,
        /// Engine type (kv1 or kv2); defaults to the mount's engine
        #[arg(long, value_name = "TYPE")]
        engine_type: Option<EngineType>,
    },

    /// Import YAML or JSON documents under a path
    Import {
        /// Target path prefix, including the mount
        vault_path: String,
        /// Files, directories, or - for stdin
        #[arg(required = true)]
        sources: Vec<String>,
        /// Decrypt sources with age before parsing
        #[arg(short, long)]
        decrypt: bool,
        /// age identity file used with --decrypt
        #[arg(short, long, requires = "decrypt")]
        private_key: Option<PathBuf>,
        /// Engine type (kv1 or kv2); defaults to the mount's engine
        #[arg(long, value_name = "TYPE")]
        engine_type: Option<EngineType>,
    },

    /// Print the secrets under a path as a document
    Export {
        /// Path to export, including the mount
        path: String,
        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Engine type (kv1 or kv2); defaults to the mount's engine
        #[arg(long, value_name = "TYPE")]
        engine_type: Option<EngineType>,
    },

    /// Register a mount in the store
    Mount {
        /// Mount path (e.g. secret)
        path: String,
        /// Engine type of the new mount
        #[arg(long, value_name = "TYPE", default_value = "kv2")]
        engine_type: EngineType,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns error if the command execution fails.
pub fn execute(cli: Cli) -> Result<()> {
    let connect = || Connection::resolve(cli.address.as_deref(), cli.namespace.as_deref());

    match cli.command {
        Command::Copy {
            ref source,
            ref target,
            engine_type,
        } => copy::execute(&connect()?, source, target, engine_type),
        Command::Move {
            ref source,
            ref target,
            auto_approve,
            engine_type,
        } => relocate::execute(&connect()?, source, target, auto_approve, engine_type),
        Command::Delete {
            ref path,
            auto_approve,
            engine_type,
        } => delete::execute(&connect()?, path, auto_approve, engine_type),
        Command::Paths {
            ref path,
            engine_type,
        } => paths::execute(&connect()?, path, engine_type),
        Command::Import {
            ref vault_path,
            ref sources,
            decrypt,
            ref private_key,
            engine_type,
        } => import::execute(
            &connect()?,
            vault_path,
            sources,
            decrypt,
            private_key.as_deref(),
            engine_type,
        ),
        Command::Export {
            ref path,
            format,
            ref output,
            engine_type,
        } => export::execute(&connect()?, path, format, output.as_deref(), engine_type),
        Command::Mount {
            ref path,
            engine_type,
        } => mount::execute(&connect()?, path, engine_type),
        Command::Completions { ref shell } => completions::execute(shell.clone()),
    }
}
