//! Importing external documents into the store.
//!
//! Each source is read whole, optionally decrypted, parsed as YAML or JSON,
//! flattened and written under the import prefix. Sources are processed in
//! order, one at a time.
//!
//! A lone file or stdin source fails the import on its first error. With
//! several sources, or with files found by walking a directory, each file is
//! independent: a failing file is recorded in the [`ImportReport`] and the
//! run continues with the next one.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zeroize::Zeroizing;

use crate::core::cipher::Decryptor;
use crate::core::constants;
use crate::core::document::{self, format, Format};
use crate::core::mount::{EngineContext, EngineType};
use crate::core::store::SecretStore;
use crate::core::writer::{self, WritePolicy};
use crate::error::{ImportError, Result};

/// Where an import document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Stdin,
    File(PathBuf),
    Directory(PathBuf),
}

impl ImportSource {
    /// Classify a command-line argument. `-` is stdin; an existing
    /// directory is walked; anything else is read as a file.
    pub fn from_arg(arg: &str) -> Self {
        if arg == constants::STDIN_SOURCE {
            return Self::Stdin;
        }
        let path = PathBuf::from(arg);
        if path.is_dir() {
            Self::Directory(path)
        } else {
            Self::File(path)
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(p) | Self::Directory(p) => p.display().to_string(),
        }
    }
}

/// One successfully imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub source: String,
    /// Full paths written.
    pub written: Vec<String>,
}

/// Outcome of an import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: Vec<ImportedFile>,
    /// Sources that failed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl ImportReport {
    pub fn leaf_count(&self) -> usize {
        self.imported.iter().map(|f| f.written.len()).sum()
    }
}

/// Imports documents under one store prefix.
pub struct Importer<'a> {
    ctx: EngineContext,
    prefix: String,
    decryptor: Option<&'a dyn Decryptor>,
    stdin: Box<dyn Read + 'a>,
}

impl<'a> Importer<'a> {
    /// Resolve `vault_path` against the store mounts.
    ///
    /// `engine` overrides the mount's engine type.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownMount` if no mount matches.
    pub fn resolve<S: SecretStore + ?Sized>(
        store: &S,
        vault_path: &str,
        engine: Option<EngineType>,
    ) -> Result<Self> {
        let (mount, prefix) = store.resolve(vault_path)?;
        let ctx = EngineContext::new(mount.path, engine.unwrap_or(mount.engine));
        Ok(Self {
            ctx,
            prefix,
            decryptor: None,
            stdin: Box::new(std::io::stdin()),
        })
    }

    /// Decrypt every source before parsing.
    pub fn with_decryptor(mut self, decryptor: &'a dyn Decryptor) -> Self {
        self.decryptor = Some(decryptor);
        self
    }

    /// Read `-` from `reader` instead of the process stdin.
    pub fn with_stdin(mut self, reader: impl Read + 'a) -> Self {
        self.stdin = Box::new(reader);
        self
    }

    /// Full path of the import prefix.
    pub fn target_display(&self) -> String {
        self.ctx.display_path(&self.prefix)
    }

    /// Import every source in order.
    ///
    /// # Errors
    ///
    /// Returns the error of a lone stdin or file source. With several
    /// sources, and for directory entries, failures never stop the run; see
    /// [`ImportReport::failed`].
    pub fn import<S: SecretStore + ?Sized>(
        &mut self,
        store: &mut S,
        sources: &[ImportSource],
    ) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        let fail_fast = sources.len() == 1;

        for source in sources {
            let result = match source {
                ImportSource::Stdin => self
                    .read_stdin()
                    .and_then(|bytes| self.import_bytes(store, &bytes, Format::Yaml)),
                ImportSource::File(path) => self.import_file(store, path),
                ImportSource::Directory(dir) => {
                    self.import_directory(store, dir, &mut report);
                    continue;
                }
            };

            match result {
                Ok(written) => report.imported.push(ImportedFile {
                    source: source.name(),
                    written,
                }),
                Err(e) if fail_fast => return Err(e),
                Err(e) => {
                    warn!(source = %source.name(), error = %e, "import failed, continuing");
                    report.failed.push((source.name(), e.to_string()));
                }
            }
        }

        info!(
            target = %self.target_display(),
            files = report.imported.len(),
            leaves = report.leaf_count(),
            failed = report.failed.len(),
            "import finished"
        );
        Ok(report)
    }

    fn import_directory<S: SecretStore + ?Sized>(
        &self,
        store: &mut S,
        dir: &Path,
        report: &mut ImportReport,
    ) {
        debug!(dir = %dir.display(), "walking import directory");

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let name = e
                        .path()
                        .map_or_else(|| dir.display().to_string(), |p| p.display().to_string());
                    warn!(source = %name, error = %e, "skipping unreadable entry");
                    report.failed.push((name, e.to_string()));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.path().display().to_string();
            match self.import_file(store, entry.path()) {
                Ok(written) => report.imported.push(ImportedFile {
                    source: name,
                    written,
                }),
                Err(e) => {
                    warn!(source = %name, error = %e, "import failed, continuing");
                    report.failed.push((name, e.to_string()));
                }
            }
        }
    }

    fn import_file<S: SecretStore + ?Sized>(&self, store: &mut S, path: &Path) -> Result<Vec<String>> {
        let bytes = Zeroizing::new(fs::read(path).map_err(|e| ImportError::Source {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?);
        self.import_bytes(store, &bytes, Format::from_path(path))
    }

    fn read_stdin(&mut self) -> Result<Zeroizing<Vec<u8>>> {
        let mut bytes = Zeroizing::new(Vec::new());
        self.stdin
            .read_to_end(&mut bytes)
            .map_err(|e| ImportError::Source {
                source_name: "stdin".to_string(),
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }

    fn import_bytes<S: SecretStore + ?Sized>(
        &self,
        store: &mut S,
        bytes: &[u8],
        format: Format,
    ) -> Result<Vec<String>> {
        let document = match self.decryptor {
            Some(decryptor) => {
                let plaintext = decryptor.decrypt(bytes)?;
                debug!(backend = decryptor.name(), "decrypted import source");
                format::parse(&plaintext, format)?
            }
            None => format::parse(bytes, format)?,
        };

        let entries = document::flatten(&document);
        let report = writer::write(store, &self.ctx, &self.prefix, &entries, WritePolicy::FailFast)?;
        Ok(report
            .written
            .iter()
            .map(|p| self.ctx.display_path(p))
            .collect())
    }
}
