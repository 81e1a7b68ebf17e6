//! Built-artifact registry.
//!
//! The caller keeps one slot per runtime library for the link stage to
//! pick up. A library may be registered at most once per build session;
//! a second registration is a caller bug and surfaces as a typed error
//! rather than silently replacing the artifact (and its lock).

use thiserror::Error;

use crate::builder::engine::BuiltArtifact;
use crate::core::library::LibraryKind;

/// Attempted second registration for a library.
#[derive(Debug, Error)]
#[error("a `{library}` artifact is already registered in this build session")]
pub struct AlreadyRegistered {
    pub library: &'static str,
}

/// Caller-owned slots holding the built runtime libraries.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    cxx: Option<BuiltArtifact>,
    cxxabi: Option<BuiltArtifact>,
}

impl ArtifactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        ArtifactStore::default()
    }

    fn slot_mut(&mut self, kind: LibraryKind) -> &mut Option<BuiltArtifact> {
        match kind {
            LibraryKind::Cxx => &mut self.cxx,
            LibraryKind::CxxAbi => &mut self.cxxabi,
        }
    }

    /// Record a built artifact. Fails if the slot is already taken.
    pub fn register(
        &mut self,
        kind: LibraryKind,
        artifact: BuiltArtifact,
    ) -> Result<(), AlreadyRegistered> {
        let slot = self.slot_mut(kind);
        if slot.is_some() {
            return Err(AlreadyRegistered {
                library: kind.root_name(),
            });
        }
        tracing::debug!("registered {} at {}", kind, artifact.path.display());
        *slot = Some(artifact);
        Ok(())
    }

    /// Look at a registered artifact.
    pub fn get(&self, kind: LibraryKind) -> Option<&BuiltArtifact> {
        match kind {
            LibraryKind::Cxx => self.cxx.as_ref(),
            LibraryKind::CxxAbi => self.cxxabi.as_ref(),
        }
    }

    /// Take a registered artifact out of the store, transferring its lock
    /// to the caller (typically the link stage).
    pub fn take(&mut self, kind: LibraryKind) -> Option<BuiltArtifact> {
        self.slot_mut(kind).take()
    }

    /// Whether a library has been registered.
    pub fn is_registered(&self, kind: LibraryKind) -> bool {
        self.get(kind).is_some()
    }
}
