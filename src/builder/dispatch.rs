//! Runtime library pipeline orchestration.
//!
//! One generic pipeline, parameterized by the library kind: catalog →
//! source-set resolution → flag synthesis → sub-build request → engine.
//! The backend capability is checked before any resolution work, and the
//! engine call blocks until the sub-build reports. Errors are propagated
//! verbatim; a failed library build is always fatal to the enclosing build.

use anyhow::{Context, Result};
use thiserror::Error;

use crate::builder::engine::{BuildEngine, BuiltArtifact, EngineError};
use crate::builder::flags::{self, FlagContext};
use crate::builder::request::{SessionOptions, SubBuildRequest};
use crate::core::library::LibraryKind;
use crate::core::target::TargetDescriptor;
use crate::registry::ArtifactStore;
use crate::resolver;

/// Error building one runtime library.
#[derive(Debug, Error)]
pub enum LibBuildError {
    /// The engine has no native code-generation backend. Reported before
    /// any file-set resolution happens.
    #[error(
        "building {library} is not supported by this configuration: \
         no native codegen backend available"
    )]
    BackendUnavailable { library: &'static str },

    /// The sub-build failed. Not retried.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Build one runtime library and hand back its artifact.
///
/// Blocks until the engine reports completion or failure. The compile-unit
/// list and its flag strings live in locals of this call and are released
/// once the request has been consumed.
pub fn build_runtime_library(
    engine: &dyn BuildEngine,
    target: &TargetDescriptor,
    session: &SessionOptions,
    kind: LibraryKind,
) -> Result<BuiltArtifact, LibBuildError> {
    if !engine.supports_native_codegen() {
        return Err(LibBuildError::BackendUnavailable {
            library: kind.root_name(),
        });
    }

    let resolved = resolver::resolve(kind, target);
    let units = flags::synthesize(
        FlagContext {
            kind,
            target,
            abi_version: session.abi_version,
            optimize: session.optimize,
            strip: session.strip,
        },
        &resolved,
        &session.install,
    );

    tracing::info!(
        "dispatching {} sub-build ({} units) to {}",
        kind,
        units.len(),
        engine.name()
    );

    let request = SubBuildRequest::new(kind, target, units, session);
    let artifact = engine.build(&request)?;

    Ok(artifact)
}

/// Build one runtime library and record it in the caller's artifact store.
///
/// A second registration for the same library is a caller bug surfaced as
/// a typed error, never a silent overwrite.
pub fn build_and_register(
    engine: &dyn BuildEngine,
    target: &TargetDescriptor,
    session: &SessionOptions,
    kind: LibraryKind,
    store: &mut ArtifactStore,
) -> Result<()> {
    let artifact = build_runtime_library(engine, target, session, kind)
        .with_context(|| format!("failed to build {}", kind))?;

    store.register(kind, artifact)?;
    Ok(())
}
