//! Placing captured files into the active sequence.
//!
//! Videos, the IMU log and the QR image are moved in (the source is consumed
//! and any previous file is overwritten). The portrait is copied byte for byte
//! and drives a derived thumbnail.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::catalog::store::{CatalogError, SequenceCatalog};
use crate::catalog::thumbnail::derive_thumbnail;
use crate::core::types::AssetKind;

/// Where a portrait and its thumbnail ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitAttachment {
    pub portrait: PathBuf,
    /// `None` when the portrait could not be decoded or the thumbnail not written
    pub thumbnail: Option<PlacedThumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedThumbnail {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl SequenceCatalog {
    /// Path of an asset in the active sequence
    #[must_use]
    pub fn asset_path(&self, kind: AssetKind) -> Option<PathBuf> {
        self.active_directory().map(|dir| dir.join(kind.file_name()))
    }

    /// Move a captured file into the active sequence as `kind`.
    ///
    /// Returns the destination path. A portrait is routed through
    /// [`attach_portrait`](Self::attach_portrait).
    ///
    /// # Errors
    ///
    /// `NoActiveSequence`, `SourceMissing`, `UnsupportedAsset` for the
    /// thumbnail, or `Io` if the move fails.
    pub fn attach_asset(&self, source: &Path, kind: AssetKind) -> Result<PathBuf, CatalogError> {
        if kind == AssetKind::Portrait {
            return self.attach_portrait(source).map(|a| a.portrait);
        }
        if !kind.is_moved() {
            return Err(CatalogError::UnsupportedAsset(kind));
        }

        let destination = self
            .asset_path(kind)
            .ok_or(CatalogError::NoActiveSequence)?;

        if !self.storage.exists(source) {
            warn!("Source doesn't exist: {}", source.display());
            return Err(CatalogError::SourceMissing(source.to_path_buf()));
        }

        if self.storage.exists(&destination) {
            if let Err(e) = self.storage.remove_file(&destination) {
                warn!("Failed to remove previous {}: {e}", destination.display());
            }
        }

        self.storage.move_file(source, &destination).map_err(|e| {
            warn!(
                "Unable to move file {} to {}: {e}",
                source.display(),
                destination.display()
            );
            CatalogError::io(&destination, e)
        })?;

        info!(
            "Moved {} to {}",
            source.display(),
            destination.display()
        );
        Ok(destination)
    }

    /// Store a portrait in the active sequence and derive its thumbnail.
    ///
    /// The source is deleted once the portrait is written. If the image cannot
    /// be decoded the portrait is kept and no thumbnail is produced.
    ///
    /// # Errors
    ///
    /// `NoActiveSequence`, or `Io` if the source cannot be read or the
    /// portrait cannot be written.
    pub fn attach_portrait(&self, source: &Path) -> Result<PortraitAttachment, CatalogError> {
        let dir = self
            .active_directory()
            .ok_or(CatalogError::NoActiveSequence)?;
        let portrait = dir.join(AssetKind::Portrait.file_name());

        let bytes = self.storage.read(source).map_err(|e| {
            warn!("Cannot read image from {}: {e}", source.display());
            CatalogError::io(source, e)
        })?;

        self.storage
            .write(&portrait, &bytes)
            .map_err(|e| CatalogError::io(&portrait, e))?;
        info!("Saved portrait {} to {}", source.display(), portrait.display());

        if source != portrait {
            if let Err(e) = self.storage.remove_file(source) {
                warn!("Failed to remove {}: {e}", source.display());
            }
        }

        Ok(PortraitAttachment {
            portrait,
            thumbnail: self.write_thumbnail(&dir, &bytes),
        })
    }

    fn write_thumbnail(&self, dir: &Path, portrait: &[u8]) -> Option<PlacedThumbnail> {
        let thumbnail = match derive_thumbnail(
            self.codec.as_ref(),
            portrait,
            self.config.thumbnail_width,
            self.config.thumbnail_quality,
        ) {
            Ok(thumbnail) => thumbnail,
            Err(e) => {
                warn!("Unable to create thumbnail from portrait: {e}");
                return None;
            }
        };

        let path = dir.join(AssetKind::Thumbnail.file_name());
        if let Err(e) = self.storage.write_atomic(&path, &thumbnail.bytes) {
            warn!("Failed to write thumbnail {}: {e}", path.display());
            return None;
        }

        Some(PlacedThumbnail {
            path,
            width: thumbnail.width,
            height: thumbnail.height,
        })
    }
}
