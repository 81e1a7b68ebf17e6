//! The build-engine seam.
//!
//! The compilation engine is a collaborator: it accepts a fully resolved
//! request, performs the build (possibly against an object cache, possibly
//! in parallel), and hands back the artifact path with an exclusivity lock.
//! This module owns only the trait, the error type, and the artifact/lock
//! pair; `clang.rs` provides the stock implementation.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::request::SubBuildRequest;

/// Error reported by a sub-build. Never retried: a static library with
/// missing translation units is unusable, so any failure is final.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to compile `{source_file}`:\n{message}")]
    Compile { source_file: String, message: String },

    #[error("failed to archive `{output}`:\n{message}")]
    Archive { output: PathBuf, message: String },

    #[error("source file not found: {0}")]
    MissingSource(PathBuf),

    #[error("no clang toolchain available")]
    ToolchainMissing,

    #[error("artifact is locked by another build: {0}")]
    ArtifactBusy(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Exclusive lock over a built artifact, transferred from the sub-build to
/// the caller. Held until released or dropped.
#[derive(Debug)]
pub struct ArtifactLock {
    lock_path: PathBuf,
    _file: File,
}

impl ArtifactLock {
    /// Take the lock for an artifact path. Fails if another holder exists.
    pub fn acquire(artifact: &Path) -> Result<Self, EngineError> {
        let lock_path = artifact.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    EngineError::ArtifactBusy(artifact.to_path_buf())
                } else {
                    EngineError::Io(e)
                }
            })?;

        Ok(ArtifactLock {
            lock_path,
            _file: file,
        })
    }

    /// Release the lock explicitly.
    pub fn release(self) {
        // Drop does the work.
    }
}

impl Drop for ArtifactLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.lock_path);
    }
}

/// A built static library plus the lock transferred from the sub-build.
#[derive(Debug)]
pub struct BuiltArtifact {
    /// Path of the emitted static library
    pub path: PathBuf,

    /// Exclusivity lock; the caller is responsible for releasing it
    pub lock: ArtifactLock,
}

/// An independent compilation engine capable of turning a request into a
/// static-library artifact.
pub trait BuildEngine: Send + Sync {
    /// Whether a native code-generation backend is available. Checked by
    /// the dispatcher before any resolution work.
    fn supports_native_codegen(&self) -> bool;

    /// Engine name for diagnostics.
    fn name(&self) -> &str;

    /// Run the sub-build to completion. Blocks the caller; no partial
    /// results are observable.
    fn build(&self, request: &SubBuildRequest) -> Result<BuiltArtifact, EngineError>;
}
