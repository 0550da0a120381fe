//! Core data types for the sequence catalog.
//!
//! - [`SequenceName`]: validated name, doubling as the sequence's directory name
//! - [`SequenceRecord`]: one entry of the catalog
//! - [`AssetKind`]: the fixed file roles inside a sequence directory
//! - [`SequenceSummary`]: a record plus the assets found on disk
//!
//! ## Directory Layout
//!
//! | Asset      | File            |
//! |------------|-----------------|
//! | scan       | `scan.mp4`      |
//! | imu-video  | `imu.mp4`       |
//! | imu-log    | `imu.txt`       |
//! | qr         | `qr.jpg`        |
//! | portrait   | `portrait.jpg`  |
//! | thumbnail  | `thumbnail.jpg` |
//!
//! [`SequenceName`]: types::SequenceName
//! [`SequenceRecord`]: sequence::SequenceRecord
//! [`AssetKind`]: types::AssetKind
//! [`SequenceSummary`]: sequence::SequenceSummary

pub mod sequence;
pub mod types;
