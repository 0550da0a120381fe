//! Collaborators the catalog uses to reach persistent storage.
//!
//! - [`fs::Storage`]: filesystem operations, with [`fs::StdStorage`] as the default
//! - [`paths::RootResolver`]: where the catalog lives

pub mod fs;
pub mod paths;

pub use fs::{StdStorage, Storage};
pub use paths::{DataDirResolver, FixedRoot, RootResolver};
