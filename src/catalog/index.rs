//! The on-disk index: `index.json` at the catalog root.
//!
//! ```json
//! {
//!   "sequences": ["trip1", "trip2"],
//!   "active": 1,
//!   "currentStep": 3
//! }
//! ```
//!
//! `active` is `-1` when no sequence is active. Both `active` and
//! `currentStep` may be absent in older indexes and default to "no active
//! sequence".

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::sequence::SequenceRecord;
use crate::core::types::SequenceName;

/// Value of `active` when no sequence is active
pub const NO_ACTIVE: i64 = -1;

/// Serialized form of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub sequences: Vec<String>,

    #[serde(default)]
    pub active: Option<i64>,

    #[serde(default)]
    pub current_step: Option<i64>,
}

impl IndexDocument {
    /// Parse an index from its JSON bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON of the expected shape.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encode the index as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Rebuild catalog state from this document, keeping only sequences for
    /// which `exists` holds.
    ///
    /// The active sequence is re-resolved by name, so pruning entries before
    /// it does not shift it onto a different sequence.
    pub fn resolve(self, exists: impl Fn(&SequenceName) -> bool) -> Resolved {
        let mut sequences = Vec::with_capacity(self.sequences.len());
        let mut seen = HashSet::new();
        let mut pruned = Vec::new();

        for raw in &self.sequences {
            match SequenceName::new(raw.as_str()) {
                Ok(name) if seen.contains(&name) => pruned.push(raw.clone()),
                Ok(name) if exists(&name) => {
                    seen.insert(name.clone());
                    sequences.push(SequenceRecord::new(name));
                }
                _ => pruned.push(raw.clone()),
            }
        }

        let mut dirty = !pruned.is_empty();

        let (active, current_step) = match self.active {
            None => (None, 0),
            Some(active) => {
                let step = self.current_step.unwrap_or(0);
                if step < 0 {
                    dirty = true;
                }
                let step = u32::try_from(step.max(0)).unwrap_or(u32::MAX);

                if active < 0 {
                    (None, step)
                } else {
                    let resolved = usize::try_from(active)
                        .ok()
                        .and_then(|i| self.sequences.get(i))
                        .and_then(|name| {
                            sequences
                                .iter()
                                .position(|r| r.name.as_str() == name.as_str())
                        });
                    match resolved {
                        Some(position) => {
                            if i64::try_from(position).ok() != Some(active) {
                                dirty = true;
                            }
                            (Some(position), step)
                        }
                        None => {
                            dirty = true;
                            (None, 0)
                        }
                    }
                }
            }
        };

        Resolved {
            state: CatalogState {
                sequences,
                active,
                current_step,
            },
            pruned,
            dirty,
        }
    }
}

/// In-memory catalog state, persisted as the index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Insertion order, which is also display order
    pub sequences: Vec<SequenceRecord>,
    /// Always `None` or a valid position in `sequences`
    pub active: Option<usize>,
    pub current_step: u32,
}

impl CatalogState {
    #[must_use]
    pub fn to_document(&self) -> IndexDocument {
        IndexDocument {
            sequences: self
                .sequences
                .iter()
                .map(|r| r.name.as_str().to_string())
                .collect(),
            active: Some(
                self.active
                    .and_then(|i| i64::try_from(i).ok())
                    .unwrap_or(NO_ACTIVE),
            ),
            current_step: Some(i64::from(self.current_step)),
        }
    }
}

/// Result of [`IndexDocument::resolve`]
#[derive(Debug)]
pub struct Resolved {
    pub state: CatalogState,
    /// Listed names that were dropped (missing directory, invalid or duplicate name)
    pub pruned: Vec<String>,
    /// Whether the index on disk no longer matches `state`
    pub dirty: bool,
}

/// How the index was found when the catalog was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// No index existed; an empty one was written
    Created,
    /// Index read and consistent with the filesystem
    Loaded,
    /// Index read, stale entries dropped and the index rewritten
    Repaired { pruned: Vec<String> },
    /// Index could not be parsed; the catalog starts empty and the file is
    /// replaced on the next mutation
    Corrupt { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> IndexDocument {
        IndexDocument::from_json(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_full_index() {
        let d = doc(r#"{"sequences": ["a", "b"], "active": 1, "currentStep": 4}"#);
        assert_eq!(d.sequences, vec!["a", "b"]);
        assert_eq!(d.active, Some(1));
        assert_eq!(d.current_step, Some(4));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(IndexDocument::from_json(b"{").is_err());
        assert!(IndexDocument::from_json(br#"{"sequences": "a"}"#).is_err());
        assert!(IndexDocument::from_json(br#"{"sequences": [1, 2]}"#).is_err());
        assert!(IndexDocument::from_json(br#"{"active": 0}"#).is_err());
        assert!(IndexDocument::from_json(br#"{"sequences": [], "active": "x"}"#).is_err());
    }

    #[test]
    fn test_missing_cursor_means_no_active() {
        let resolved = doc(r#"{"sequences": ["a"]}"#).resolve(|_| true);
        assert_eq!(resolved.state.active, None);
        assert_eq!(resolved.state.current_step, 0);
        assert!(!resolved.dirty);
    }

    #[test]
    fn test_missing_step_defaults_to_zero() {
        let resolved = doc(r#"{"sequences": ["a"], "active": 0}"#).resolve(|_| true);
        assert_eq!(resolved.state.active, Some(0));
        assert_eq!(resolved.state.current_step, 0);
    }

    #[test]
    fn test_prune_missing_directories() {
        let resolved = doc(r#"{"sequences": ["a", "b", "c"], "active": 2, "currentStep": 3}"#)
            .resolve(|name| name.as_str() != "b");

        let names: Vec<_> = resolved.state.sequences.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(resolved.pruned, vec!["b"]);
        // "c" moved from position 2 to 1
        assert_eq!(resolved.state.active, Some(1));
        assert_eq!(resolved.state.current_step, 3);
        assert!(resolved.dirty);
    }

    #[test]
    fn test_pruned_active_is_cleared() {
        let resolved = doc(r#"{"sequences": ["a", "b"], "active": 1, "currentStep": 3}"#)
            .resolve(|name| name.as_str() == "a");
        assert_eq!(resolved.state.active, None);
        assert_eq!(resolved.state.current_step, 0);
    }

    #[test]
    fn test_out_of_range_active_is_cleared() {
        let resolved = doc(r#"{"sequences": ["a"], "active": 5, "currentStep": 1}"#).resolve(|_| true);
        assert_eq!(resolved.state.active, None);
        assert!(resolved.dirty);
    }

    #[test]
    fn test_invalid_and_duplicate_names_pruned() {
        let resolved =
            doc(r#"{"sequences": ["a", "../x", "a", ""], "active": -1, "currentStep": 0}"#)
                .resolve(|_| true);
        assert_eq!(resolved.state.sequences.len(), 1);
        assert_eq!(resolved.pruned.len(), 3);
    }

    #[test]
    fn test_negative_step_normalized() {
        let resolved = doc(r#"{"sequences": [], "active": -1, "currentStep": -1}"#).resolve(|_| true);
        assert_eq!(resolved.state.active, None);
        assert_eq!(resolved.state.current_step, 0);
        assert!(resolved.dirty);
    }

    #[test]
    fn test_document_round_trip() {
        let state = CatalogState {
            sequences: vec![
                SequenceRecord::new(SequenceName::new("a").unwrap()),
                SequenceRecord::new(SequenceName::new("b").unwrap()),
            ],
            active: Some(1),
            current_step: 7,
        };
        let json = state.to_document().to_json().unwrap();
        let resolved = IndexDocument::from_json(&json).unwrap().resolve(|_| true);
        assert_eq!(resolved.state, state);
        assert!(!resolved.dirty);
    }

    #[test]
    fn test_no_active_serializes_sentinel() {
        let json = CatalogState::default().to_document().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["active"], -1);
        assert_eq!(value["currentStep"], 0);
        assert_eq!(value["sequences"], serde_json::json!([]));
    }
}
