//! Runtime library build pipeline.
//!
//! This module implements flag synthesis, sub-build request construction,
//! the engine seam, and the dispatch pipeline tying them together.

pub mod clang;
pub mod dispatch;
pub mod engine;
pub mod flags;
pub mod request;

pub use clang::ClangEngine;
pub use dispatch::{build_and_register, build_runtime_library, LibBuildError};
pub use engine::{ArtifactLock, BuildEngine, BuiltArtifact, EngineError};
pub use flags::{CompileUnit, FlagContext, InstallPaths};
pub use request::{OutputKind, SessionOptions, SubBuildRequest};
