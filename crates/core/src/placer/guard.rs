//! Output directory containment.

use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::error::PlacerError;

/// Confines output directories to an approved root.
///
/// Relative requests are resolved against the root. Containment is checked
/// component-wise on lexically normalized paths, so `root/../x` is rejected
/// even though it starts with the root's text. Symlinks are not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGuard {
    root: PathBuf,
}

impl OutputGuard {
    /// Creates a guard approving `root` and everything below it.
    ///
    /// A relative root is taken relative to the current directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, PlacerError> {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(PlacerError::CurrentDir)?
                .join(root)
        };

        Ok(Self {
            root: normalize_lexically(&absolute),
        })
    }

    /// Creates a guard rooted at the current working directory.
    pub fn current_dir() -> Result<Self, PlacerError> {
        let cwd = std::env::current_dir().map_err(PlacerError::CurrentDir)?;
        Self::new(cwd)
    }

    /// The approved root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Computes the absolute output directory without touching the filesystem.
    ///
    /// `None` means the root itself.
    pub fn check(&self, requested: Option<&Path>) -> Result<PathBuf, PlacerError> {
        let Some(requested) = requested else {
            return Ok(self.root.clone());
        };

        let resolved = normalize_lexically(&self.root.join(requested));
        if !resolved.starts_with(&self.root) {
            return Err(PlacerError::PathEscape {
                requested: requested.to_path_buf(),
                root: self.root.clone(),
            });
        }

        Ok(resolved)
    }

    /// Checks the requested directory and creates it, with missing ancestors.
    ///
    /// Nothing is created when the check fails. Without a request no
    /// filesystem call is made.
    pub async fn resolve(&self, requested: Option<&Path>) -> Result<PathBuf, PlacerError> {
        let resolved = self.check(requested)?;
        if requested.is_none() {
            return Ok(resolved);
        }

        tokio::fs::create_dir_all(&resolved).await.map_err(|source| {
            PlacerError::DirectoryCreationFailed {
                path: resolved.clone(),
                source,
            }
        })?;
        debug!("Output directory ready at {}", resolved.display());

        Ok(resolved)
    }
}

/// Resolves `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above the path's root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    normalized.pop();
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
