//! Ballast - builder for the C++ runtime support libraries
//!
//! This crate resolves which source files and compiler flags the c++ and
//! c++abi runtime libraries need for a given target, and delegates the
//! compilation to a build engine that produces cacheable static-library
//! artifacts for a later link step.

pub mod builder;
pub mod core;
pub mod registry;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for Ballast unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a mock build engine.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    abi::AbiVersion, catalog::Catalog, library::LibraryKind, target::Abi, target::OptMode,
    target::Os, target::TargetDescriptor,
};

pub use crate::builder::{
    build_and_register, build_runtime_library, BuildEngine, BuiltArtifact, ClangEngine,
    InstallPaths, SessionOptions,
};

pub use crate::registry::ArtifactStore;
pub use crate::resolver::{resolve, ResolvedSet};
