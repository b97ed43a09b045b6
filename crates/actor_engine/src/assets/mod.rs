//! Asset path resolution
//!
//! The scene only stores texture identifiers as opaque strings. A world can be
//! given an [`AssetResolver`] that vets an identifier before a sprite accepts
//! it, so a typo surfaces as an error at the call site instead of as a missing
//! texture later in the renderer.

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Decides whether an asset identifier refers to something loadable
pub trait AssetResolver {
    /// Validate `path`
    fn resolve(&self, path: &str) -> Result<(), AssetError>;
}

/// Resolves identifiers against files under a root directory
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileSystemResolver {
    /// Resolve relative to `root`, accepting the common texture formats
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }

    /// Replace the accepted file extensions
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|ext| ext.to_ascii_lowercase()).collect();
        self
    }
}

impl AssetResolver for FileSystemResolver {
    fn resolve(&self, path: &str) -> Result<(), AssetError> {
        let full = self.root.join(path);
        let extension = full
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !self.extensions.contains(&extension) {
            return Err(AssetError::UnsupportedFormat(path.to_string()));
        }
        if full.is_file() {
            Ok(())
        } else {
            Err(AssetError::NotFound(full.display().to_string()))
        }
    }
}

/// Resolves identifiers against a fixed list, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    known: HashSet<String>,
}

impl AssetManifest {
    /// Create a manifest from known identifiers
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
        }
    }

    /// Add an identifier
    pub fn insert(&mut self, path: impl Into<String>) {
        self.known.insert(path.into());
    }
}

impl AssetResolver for AssetManifest {
    fn resolve(&self, path: &str) -> Result<(), AssetError> {
        if self.known.contains(path) {
            Ok(())
        } else {
            Err(AssetError::NotFound(path.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest() {
        let manifest = AssetManifest::new(["Assets/Ship.png"]);
        assert!(manifest.resolve("Assets/Ship.png").is_ok());
        assert!(matches!(manifest.resolve("Assets/Shp.png"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_file_system_rejects_unknown_extension() {
        let resolver = FileSystemResolver::new(".");
        assert!(matches!(resolver.resolve("Cargo.toml"), Err(AssetError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_file_system_reports_missing_file() {
        let resolver = FileSystemResolver::new("no/such/dir");
        assert!(matches!(resolver.resolve("Ship.png"), Err(AssetError::NotFound(_))));
    }
}
