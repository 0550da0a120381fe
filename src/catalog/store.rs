use chrono::{DateTime, Utc};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::index::{CatalogState, IndexDocument, IndexStatus};
use crate::catalog::thumbnail::{ImageCodec, JpegCodec};
use crate::config::CatalogConfig;
use crate::core::sequence::{AssetEntry, SequenceRecord, SequenceSummary};
use crate::core::types::{AssetKind, SequenceName};
use crate::storage::fs::{StdStorage, Storage};
use crate::utils::validation::{ValidationError, INDEX_FILE_NAME};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Sequence not found: {0}")]
    NotFound(String),

    #[error("Sequence already exists: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    InvalidName(#[from] ValidationError),

    #[error("No active sequence")]
    NoActiveSequence,

    #[error("Source file does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Asset '{0}' is derived and cannot be attached directly")]
    UnsupportedAsset(AssetKind),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    #[error("Failed to encode index: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CatalogError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

/// The catalog of capture sequences.
///
/// Holds the ordered list of sequences plus the active/step cursor, and
/// rewrites `index.json` after every mutation. If that rewrite fails the
/// in-memory state has still changed; the error is returned so the caller
/// can decide whether it matters.
pub struct SequenceCatalog {
    pub(super) config: CatalogConfig,
    pub(super) storage: Box<dyn Storage>,
    pub(super) codec: Box<dyn ImageCodec>,
    pub(super) state: CatalogState,
    status: IndexStatus,
}

impl std::fmt::Debug for SequenceCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceCatalog")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl SequenceCatalog {
    /// Open the catalog at the configured root using the local filesystem
    ///
    /// # Errors
    ///
    /// Fails only if the root directory cannot be created. Index problems are
    /// repaired or reported through [`load_report`](Self::load_report).
    pub fn open(config: CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_collaborators(config, Box::new(StdStorage), Box::new(JpegCodec))
    }

    /// Open the catalog with caller-supplied storage and image codec
    ///
    /// # Errors
    ///
    /// Fails only if the root directory cannot be created.
    pub fn with_collaborators(
        config: CatalogConfig,
        storage: Box<dyn Storage>,
        codec: Box<dyn ImageCodec>,
    ) -> Result<Self, CatalogError> {
        storage
            .create_dir_all(&config.root)
            .map_err(|e| CatalogError::io(&config.root, e))?;

        let mut catalog = Self {
            config,
            storage,
            codec,
            state: CatalogState::default(),
            status: IndexStatus::Created,
        };
        catalog.status = catalog.load();
        Ok(catalog)
    }

    /// Re-read the index from disk, discarding in-memory state
    pub fn reload(&mut self) -> &IndexStatus {
        self.status = self.load();
        &self.status
    }

    fn load(&mut self) -> IndexStatus {
        let index_path = self.index_path();

        if !self.storage.exists(&index_path) {
            debug!("No index at {}, starting a new one", index_path.display());
            self.state = CatalogState::default();
            if let Err(e) = self.persist() {
                warn!("Failed to write new index: {e}");
            }
            return IndexStatus::Created;
        }

        let document = match self.read_index() {
            Ok(document) => document,
            Err(e) => {
                warn!("{e}; starting with an empty catalog");
                self.state = CatalogState::default();
                return IndexStatus::Corrupt {
                    reason: e.to_string(),
                };
            }
        };

        let root = self.config.root.clone();
        let storage = &self.storage;
        let resolved = document.resolve(|name| storage.is_dir(&root.join(name.as_str())));
        self.state = resolved.state;

        debug!(
            "Loaded {} sequences: {:?}",
            self.state.sequences.len(),
            self.names()
        );

        if !resolved.dirty {
            return IndexStatus::Loaded;
        }

        for name in &resolved.pruned {
            warn!("Dropping sequence '{name}': directory is missing or name is invalid");
        }
        if let Err(e) = self.persist() {
            warn!("Failed to rewrite repaired index: {e}");
        }
        IndexStatus::Repaired {
            pruned: resolved.pruned,
        }
    }

    /// Read and parse `index.json` without touching in-memory state
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `CorruptIndex` if it does
    /// not parse.
    pub fn read_index(&self) -> Result<IndexDocument, CatalogError> {
        let path = self.index_path();
        let bytes = self
            .storage
            .read(&path)
            .map_err(|e| CatalogError::io(&path, e))?;
        IndexDocument::from_json(&bytes).map_err(|e| CatalogError::CorruptIndex(e.to_string()))
    }

    /// Rewrite `index.json` from the in-memory state
    fn persist(&self) -> Result<(), CatalogError> {
        let path = self.index_path();
        let bytes = self.state.to_document().to_json()?;
        self.storage
            .write_atomic(&path, &bytes)
            .map_err(|e| CatalogError::io(&path, e))?;
        debug!("Wrote index: {:?}", self.names());
        Ok(())
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create a sequence and make it active at step 0.
    ///
    /// Returns the new sequence's position.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `AlreadyExists`, or `Io` if the directory cannot be
    /// created; the catalog is unchanged in those cases.
    pub fn create(&mut self, name: &str) -> Result<usize, CatalogError> {
        let index = self.insert(name)?;
        self.state.active = Some(index);
        self.state.current_step = 0;
        info!("Created sequence '{name}' and made it active");
        self.persist()?;
        Ok(index)
    }

    /// Add a sequence without changing the active sequence or step.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub fn add(&mut self, name: &str) -> Result<usize, CatalogError> {
        let index = self.insert(name)?;
        info!("Added sequence '{name}'");
        self.persist()?;
        Ok(index)
    }

    fn insert(&mut self, name: &str) -> Result<usize, CatalogError> {
        let name = SequenceName::new(name)?;
        if self.position(name.as_str()).is_some() {
            info!("Sequence with name '{name}' already exists");
            return Err(CatalogError::AlreadyExists(name.to_string()));
        }

        let dir = self.dir_for(&name);
        self.storage
            .create_dir_all(&dir)
            .map_err(|e| CatalogError::io(&dir, e))?;

        self.state.sequences.push(SequenceRecord::new(name));
        Ok(self.state.sequences.len() - 1)
    }

    /// Make the sequence at `index` active and reset the step to 0
    ///
    /// # Errors
    ///
    /// `NotFound` if `index` is out of range; nothing changes.
    pub fn set_active(&mut self, index: usize) -> Result<(), CatalogError> {
        if index >= self.count() {
            return Err(CatalogError::NotFound(format!("index {index}")));
        }
        self.state.active = Some(index);
        self.state.current_step = 0;
        info!("Active sequence is now '{}'", self.state.sequences[index].name);
        self.persist()
    }

    /// Step back one workflow step, stopping at 0. Returns the new step.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be rewritten.
    pub fn retreat_step(&mut self) -> Result<u32, CatalogError> {
        if self.state.current_step > 0 {
            self.state.current_step -= 1;
            self.persist()?;
        }
        Ok(self.state.current_step)
    }

    /// Step forward one workflow step. Returns the new step.
    ///
    /// The step advances even when no sequence is active, which keeps indexes
    /// written by earlier versions of the app readable the same way.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be rewritten.
    pub fn advance_step(&mut self) -> Result<u32, CatalogError> {
        if self.state.active.is_none() {
            debug!("Advancing step with no active sequence");
        }
        self.state.current_step = self.state.current_step.saturating_add(1);
        self.persist()?;
        Ok(self.state.current_step)
    }

    /// Delete a sequence by name, removing its directory.
    ///
    /// # Errors
    ///
    /// `NotFound` if no sequence has this name.
    pub fn delete_by_name(&mut self, name: &str) -> Result<SequenceRecord, CatalogError> {
        let index = self
            .position(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        self.delete_at(index)
    }

    /// Delete the sequence at `index`, removing its directory.
    ///
    /// A directory that cannot be removed is logged and the record is dropped
    /// anyway. Deleting the active sequence leaves no sequence active.
    ///
    /// # Errors
    ///
    /// `NotFound` if `index` is out of range.
    pub fn delete_at(&mut self, index: usize) -> Result<SequenceRecord, CatalogError> {
        let Some(record) = self.state.sequences.get(index) else {
            return Err(CatalogError::NotFound(format!("index {index}")));
        };

        let dir = self.dir_for(&record.name);
        if self.storage.exists(&dir) {
            match self.storage.remove_dir_all(&dir) {
                Ok(()) => debug!("Removed {}", dir.display()),
                Err(e) => warn!("Failed to remove {}: {e}", dir.display()),
            }
        }

        let record = self.state.sequences.remove(index);
        match self.state.active {
            Some(active) if active == index => {
                self.state.active = None;
                self.state.current_step = 0;
            }
            Some(active) if active > index => self.state.active = Some(active - 1),
            _ => {}
        }

        info!("Deleted sequence '{}'", record.name);
        self.persist()?;
        Ok(record)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Number of sequences
    #[must_use]
    pub fn count(&self) -> usize {
        self.state.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.sequences.is_empty()
    }

    /// The sequence at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= count()`; use [`get`](Self::get) when unsure.
    #[must_use]
    pub fn at(&self, index: usize) -> &SequenceRecord {
        &self.state.sequences[index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SequenceRecord> {
        self.state.sequences.get(index)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.state
            .sequences
            .iter()
            .position(|r| r.name.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.state.sequences.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.state
            .sequences
            .iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.state.active
    }

    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.state.current_step
    }

    #[must_use]
    pub fn active_name(&self) -> Option<&SequenceName> {
        self.active_record().map(|r| &r.name)
    }

    /// Directory of the active sequence
    #[must_use]
    pub fn active_directory(&self) -> Option<PathBuf> {
        self.active_record().map(|r| self.dir_for(&r.name))
    }

    pub(super) fn active_record(&self) -> Option<&SequenceRecord> {
        self.state.active.and_then(|i| self.state.sequences.get(i))
    }

    /// Directory of the sequence at `index`
    #[must_use]
    pub fn sequence_dir(&self, index: usize) -> Option<PathBuf> {
        self.get(index).map(|r| self.dir_for(&r.name))
    }

    pub(super) fn dir_for(&self, name: &SequenceName) -> PathBuf {
        self.config.root.join(name.as_str())
    }

    /// Decode the thumbnail of the sequence at `index`, if it has one
    #[must_use]
    pub fn thumbnail(&self, index: usize) -> Option<DynamicImage> {
        let path = self
            .sequence_dir(index)?
            .join(AssetKind::Thumbnail.file_name());
        let bytes = self.storage.read(&path).ok()?;
        match self.codec.decode(&bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Unreadable thumbnail {}: {e}", path.display());
                None
            }
        }
    }

    /// Asset kinds whose file exists in the sequence at `index`
    #[must_use]
    pub fn present_assets(&self, index: usize) -> Vec<AssetKind> {
        let Some(dir) = self.sequence_dir(index) else {
            return Vec::new();
        };
        AssetKind::ALL
            .into_iter()
            .filter(|kind| self.storage.exists(&dir.join(kind.file_name())))
            .collect()
    }

    /// The sequence at `index` with the assets currently on disk
    #[must_use]
    pub fn summary(&self, index: usize) -> Option<SequenceSummary> {
        let record = self.get(index)?;
        let directory = self.dir_for(&record.name);
        let assets = self
            .present_assets(index)
            .into_iter()
            .map(|kind| {
                let path = directory.join(kind.file_name());
                let modified = self.storage.modified(&path).map(DateTime::<Utc>::from);
                AssetEntry {
                    kind,
                    path,
                    modified,
                }
            })
            .collect();

        Some(SequenceSummary {
            index,
            name: record.name.clone(),
            directory,
            active: self.state.active == Some(index),
            assets,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.config.root.join(INDEX_FILE_NAME)
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// How the index was found at the last load
    #[must_use]
    pub fn load_report(&self) -> &IndexStatus {
        &self.status
    }
}
