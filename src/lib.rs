//! Vaultshift - copy, move and import hierarchical secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── copy          # Copy a subtree
//! │   ├── relocate      # Move a subtree (copy, confirm, delete)
//! │   ├── delete        # Delete a subtree after confirmation
//! │   ├── paths         # List nested sub-paths
//! │   ├── import        # Import YAML/JSON documents
//! │   ├── export        # Print a subtree as a document
//! │   ├── mount         # Register a mount
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── path          # Path normalization and joining
//!     ├── mount         # Mounts, engine types, path resolution
//!     ├── document/     # SecretDocument, extract, flatten, formats
//!     ├── store/        # Store trait
//!     │   ├── memory    # In-memory backend
//!     │   └── fs        # JSON file backend
//!     ├── export        # Subtree export
//!     ├── scratch       # Temporary serialized export
//!     ├── writer        # Leaf writes with a failure policy
//!     ├── plan          # Deletion planning
//!     ├── confirm       # Confirmation gate
//!     ├── delete        # Best-effort deletion
//!     ├── transfer      # Copy and move pipelines
//!     ├── import        # Import pipeline
//!     ├── cipher/       # Decryption of import sources (age)
//!     └── config        # Store address and namespace
//! ```
//!
//! # Example
//!
//! ```
//! use vaultshift::core::confirm::{ConfirmationGate, ScriptedPrompt};
//! use vaultshift::core::mount::EngineType;
//! use vaultshift::core::store::{MemoryStore, SecretStore};
//! use vaultshift::core::transfer::{self, MoveState, Transfer};
//!
//! # fn main() -> vaultshift::error::Result<()> {
//! let mut store = MemoryStore::new().with_mount("secret", EngineType::Kv2);
//! let (mount, rel) = store.resolve("secret/app/token")?;
//! let ctx = vaultshift::core::mount::EngineContext::new(mount.path, mount.engine);
//! store.write_leaf(&ctx, &rel, &serde_json::json!("t0ken"))?;
//!
//! let transfer = Transfer::resolve(&store, "secret/app", "secret/service", None)?;
//! let outcome = transfer::relocate(
//!     &mut store,
//!     transfer,
//!     ConfirmationGate::new(false),
//!     &ScriptedPrompt::new(["y"]),
//! )?;
//! assert_eq!(outcome.state, MoveState::Deleted);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
