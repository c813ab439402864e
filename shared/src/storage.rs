//! Download directory access.
//!
//! Filenames handed in by clients name a single entry directly under the
//! storage root. Anything with separators or dot components is refused before
//! touching the filesystem.

use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::errors::{GateError, GateResult};

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the storage root, creating it if needed.
    pub fn open_root(root: impl Into<PathBuf>) -> GateResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!("Storage root: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a client-supplied filename to its path under the root.
    pub fn resolve(&self, filename: &str) -> GateResult<PathBuf> {
        if !is_plain_filename(filename) {
            return Err(GateError::BadRequest("Invalid filename".to_string()));
        }
        Ok(self.root.join(filename))
    }

    /// Resolve and require that the file exists. A name that cannot live
    /// under the root is reported as not found.
    pub fn locate(&self, filename: &str) -> GateResult<PathBuf> {
        match self.resolve(filename) {
            Ok(path) if path.is_file() => Ok(path),
            _ => Err(GateError::NotFound("File not found".to_string())),
        }
    }
}

fn is_plain_filename(filename: &str) -> bool {
    if filename.is_empty() || filename.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
