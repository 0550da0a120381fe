//! Catalog configuration.

use std::path::{Path, PathBuf};

use crate::storage::paths::RootResolver;

/// Width of derived thumbnails in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 128;

/// JPEG quality of derived thumbnails (1-100)
pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 98;

/// Settings for opening a [`SequenceCatalog`](crate::SequenceCatalog)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding `index.json` and one directory per sequence
    pub root: PathBuf,
    pub thumbnail_width: u32,
    pub thumbnail_quality: u8,
}

impl CatalogConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            thumbnail_quality: DEFAULT_THUMBNAIL_QUALITY,
        }
    }

    /// Build a config whose root comes from a resolver.
    ///
    /// Returns `None` if the resolver knows no directory.
    pub fn from_resolver(resolver: &dyn RootResolver) -> Option<Self> {
        resolver.resolve().map(Self::new)
    }

    #[must_use]
    pub fn with_thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = width.max(1);
        self
    }

    #[must_use]
    pub fn with_thumbnail_quality(mut self, quality: u8) -> Self {
        self.thumbnail_quality = quality.clamp(1, 100);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::paths::FixedRoot;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::new("/data");
        assert_eq!(config.thumbnail_width, 128);
        assert_eq!(config.thumbnail_quality, 98);
    }

    #[test]
    fn test_quality_is_clamped() {
        let config = CatalogConfig::new("/data")
            .with_thumbnail_quality(0)
            .with_thumbnail_width(0);
        assert_eq!(config.thumbnail_quality, 1);
        assert_eq!(config.thumbnail_width, 1);
    }

    #[test]
    fn test_from_resolver() {
        let config = CatalogConfig::from_resolver(&FixedRoot(PathBuf::from("/data"))).unwrap();
        assert_eq!(config.root(), Path::new("/data"));
    }
}
