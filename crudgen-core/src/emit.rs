use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error raised when an artifact cannot be written.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact path '{path}' must be relative and stay inside the output directory")]
    InvalidPath { path: String },
}

/// Destination for rendered artifacts.
///
/// An existing artifact at the same path is fully replaced.
pub trait Emitter {
    /// Write one artifact at `relative_path`.
    fn write_artifact(&mut self, relative_path: &str, text: &str) -> Result<(), EmitError>;
}

/// Emitter writing artifacts below a root directory on disk.
#[derive(Debug, Clone)]
pub struct FsEmitter {
    root: PathBuf,
}

impl FsEmitter {
    /// Create an emitter rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the output root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Emitter for FsEmitter {
    fn write_artifact(&mut self, relative_path: &str, text: &str) -> Result<(), EmitError> {
        let relative = checked_relative(relative_path)?;
        let path = self.root.join(relative);

        write_file(&path, text).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "wrote artifact");
        Ok(())
    }
}

/// A generated file collected for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Emitter collecting artifacts in memory instead of writing them.
///
/// Writing the same path twice replaces the earlier content in place.
#[derive(Debug, Default)]
pub struct PreviewEmitter {
    files: Vec<PreviewFile>,
}

impl PreviewEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collected files in first-write order.
    pub fn files(&self) -> &[PreviewFile] {
        &self.files
    }

    /// Get the content collected for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    /// Consume the emitter and return the collected files.
    pub fn into_files(self) -> Vec<PreviewFile> {
        self.files
    }
}

impl Emitter for PreviewEmitter {
    fn write_artifact(&mut self, relative_path: &str, text: &str) -> Result<(), EmitError> {
        checked_relative(relative_path)?;

        match self.files.iter_mut().find(|f| f.path == relative_path) {
            Some(existing) => existing.content = text.to_string(),
            None => self.files.push(PreviewFile {
                path: relative_path.to_string(),
                content: text.to_string(),
            }),
        }
        Ok(())
    }
}

fn checked_relative(relative_path: &str) -> Result<&Path, EmitError> {
    let path = Path::new(relative_path);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if relative_path.is_empty() || escapes {
        return Err(EmitError::InvalidPath {
            path: relative_path.to_string(),
        });
    }
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
