use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::types::{AssetKind, SequenceName};

/// A named recording session in the catalog.
///
/// The name is fixed at creation; everything else about a sequence lives in
/// its directory and is discovered from there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub name: SequenceName,
}

impl SequenceRecord {
    #[must_use]
    pub fn new(name: SequenceName) -> Self {
        Self { name }
    }
}

/// An asset file found in a sequence directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// A sequence together with what currently exists on disk for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub index: usize,
    pub name: SequenceName,
    pub directory: PathBuf,
    pub active: bool,
    pub assets: Vec<AssetEntry>,
}

impl SequenceSummary {
    /// Whether an asset of the given kind was found
    #[must_use]
    pub fn has(&self, kind: AssetKind) -> bool {
        self.assets.iter().any(|a| a.kind == kind)
    }

    /// Asset kinds that are still missing from the directory
    #[must_use]
    pub fn missing(&self) -> Vec<AssetKind> {
        AssetKind::ALL
            .into_iter()
            .filter(|kind| !self.has(*kind))
            .collect()
    }
}
