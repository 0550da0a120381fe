//! Sequence catalog storage.
//!
//! The catalog lives in a single root directory:
//!
//! ```text
//! <root>/
//!   index.json          ordered sequence names + active sequence + step
//!   trip1/
//!     scan.mp4
//!     imu.mp4
//!     imu.txt
//!     qr.jpg
//!     portrait.jpg
//!     thumbnail.jpg
//!   trip2/
//! ```
//!
//! Any subset of the asset files may be missing. On load, entries whose
//! directory no longer exists are dropped and the index is rewritten; an index
//! that fails to parse is treated as empty so the catalog always opens.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sequence_catalog::{AssetKind, CatalogConfig, SequenceCatalog};
//! use std::path::Path;
//!
//! let mut catalog = SequenceCatalog::open(CatalogConfig::new("/tmp/sequences")).unwrap();
//! catalog.create("trip1").unwrap();
//! catalog
//!     .attach_asset(Path::new("/tmp/capture.mp4"), AssetKind::Scan)
//!     .unwrap();
//! catalog.advance_step().unwrap();
//! ```

pub mod assets;
pub mod index;
pub mod store;
pub mod thumbnail;
