//! # sequence-catalog
//!
//! A local catalog of named capture sequences (recording sessions).
//!
//! Each sequence owns a directory under a storage root holding a fixed set of
//! asset files: scan video, calibration video, IMU log, QR image, portrait
//! photo and its thumbnail. The catalog keeps the ordered list of sequences,
//! which one is active, and a step cursor that drives a multi-step capture
//! workflow, all persisted in `index.json` at the root.
//!
//! ## Features
//!
//! - **Self-repairing index**: sequences whose directory disappeared are
//!   dropped on load and the index is rewritten
//! - **Fail-soft loading**: a corrupt index yields an empty catalog instead of
//!   an error
//! - **Atomic index writes**: the index is replaced via temp file + rename
//! - **Move semantics for assets**: captured files are consumed, never copied
//! - **Thumbnails**: portraits are scaled to a fixed width keeping aspect ratio
//!
//! ## Example
//!
//! ```rust,no_run
//! use sequence_catalog::{CatalogConfig, SequenceCatalog};
//! use std::path::Path;
//!
//! let mut catalog = SequenceCatalog::open(CatalogConfig::new("/tmp/sequences")).unwrap();
//!
//! catalog.create("trip1").unwrap();
//! let attachment = catalog.attach_portrait(Path::new("/tmp/photo.jpg")).unwrap();
//! if let Some(thumb) = attachment.thumbnail {
//!     println!("thumbnail {}x{}", thumb.width, thumb.height);
//! }
//! catalog.advance_step().unwrap();
//!
//! for record in catalog.iter() {
//!     println!("{}", record.name);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: The catalog, its index file and asset placement
//! - [`core`]: Sequence names, records and asset kinds
//! - [`storage`]: Filesystem and root-directory collaborators
//! - [`config`]: Catalog settings
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::assets::{PlacedThumbnail, PortraitAttachment};
pub use catalog::index::IndexStatus;
pub use catalog::store::{CatalogError, SequenceCatalog};
pub use catalog::thumbnail::{ImageCodec, JpegCodec};
pub use config::CatalogConfig;
pub use crate::core::sequence::{SequenceRecord, SequenceSummary};
pub use crate::core::types::{AssetKind, SequenceName};
