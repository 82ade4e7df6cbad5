//! Error types.
//!
//! Each concern has its own enum; they all fold into [`Error`] so command
//! handlers can use `?` across layers.

use thiserror::Error;

/// Top-level error for all vaultshift operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Secret store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no mount matches path '{0}'")]
    UnknownMount(String),

    #[error("mount '{0}' already exists")]
    MountExists(String),

    #[error("mount '{mount}' is {actual}, but {requested} was requested")]
    EngineMismatch {
        mount: String,
        actual: String,
        requested: String,
    },

    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("cannot write '{path}': {reason}")]
    Conflict { path: String, reason: String },

    #[error("secret '{0}' holds a mapping; secret values must be scalars or lists")]
    MappingValue(String),

    #[error("failed to read store file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write store file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("store file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Document parsing, serialization and navigation errors.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("document root must be a mapping")]
    NotAMapping,

    #[error("path '{0}' does not exist in the document")]
    PathNotFound(String),
}

/// Errors raised by the copy/move pipeline.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("export of '{path}' failed: {source}")]
    Export {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("no secrets found under '{0}'")]
    EmptySource(String),

    #[error("scratch file error: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("secrets under '{0}' changed shape in the scratch file")]
    LossyRoundTrip(String),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("cannot move '{source_path}' into '{target_path}': the paths overlap")]
    Overlap {
        source_path: String,
        target_path: String,
    },

    #[error("failed to delete {} secret(s): {}", .failed.len(), summarize(.failed))]
    Delete { failed: Vec<(String, String)> },
}

/// Import source errors.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read {source_name}: {reason}")]
    Source { source_name: String, reason: String },

    #[error("--decrypt requires --private-key")]
    MissingPrivateKey,
}

/// Decryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("no age identity found in {0}")]
    NoIdentity(String),

    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported store address '{0}': only file stores are supported")]
    UnsupportedAddress(String),

    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid engine type '{0}' (expected kv1 or kv2)")]
    InvalidEngine(String),

    #[error("invalid format '{0}' (expected yaml or json)")]
    InvalidFormat(String),
}

/// Secret path errors.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),
}

fn summarize(failed: &[(String, String)]) -> String {
    failed
        .iter()
        .map(|(path, reason)| format!("{} ({})", path, reason))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
