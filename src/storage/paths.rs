use std::path::PathBuf;

/// Folder created under the platform data directory
pub const APP_DIR_NAME: &str = "sequence-catalog";

/// Resolves the directory that holds the index and all sequence directories
pub trait RootResolver {
    /// Returns `None` when no suitable directory is known
    fn resolve(&self) -> Option<PathBuf>;
}

/// Platform user-data directory (e.g. `~/.local/share/sequence-catalog`)
#[derive(Debug, Clone)]
pub struct DataDirResolver {
    pub app_dir: String,
}

impl Default for DataDirResolver {
    fn default() -> Self {
        Self {
            app_dir: APP_DIR_NAME.to_string(),
        }
    }
}

impl RootResolver for DataDirResolver {
    fn resolve(&self) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(&self.app_dir))
    }
}

/// A root chosen by the caller
#[derive(Debug, Clone)]
pub struct FixedRoot(pub PathBuf);

impl RootResolver for FixedRoot {
    fn resolve(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_root() {
        let root = FixedRoot(PathBuf::from("/tmp/catalog"));
        assert_eq!(root.resolve(), Some(PathBuf::from("/tmp/catalog")));
    }

    #[test]
    fn test_data_dir_uses_app_folder() {
        if let Some(path) = DataDirResolver::default().resolve() {
            assert!(path.ends_with(APP_DIR_NAME));
        }
    }
}
