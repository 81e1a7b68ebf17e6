//! Sub-build request construction.
//!
//! A `SubBuildRequest` is the self-contained package handed to the build
//! engine: the resolved compile units, the target, and the options the
//! engine needs. Sanitizer instrumentation and stack protection are forced
//! off for runtime library sub-builds, whatever the enclosing session uses;
//! the produced archives must not depend on anything beyond libc.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::builder::flags::{CompileUnit, InstallPaths};
use crate::core::abi::AbiVersion;
use crate::core::library::LibraryKind;
use crate::core::target::{OptMode, Os, TargetDescriptor};

/// What the sub-build emits. Runtime libraries are always static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    StaticLib,
}

/// Build options shared by both pipelines of one session, borrowed from
/// the caller.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// ABI version both libraries must agree on
    pub abi_version: AbiVersion,

    /// Include roots for the cache-exempt flag group
    pub install: InstallPaths,

    /// Root of the runtime library source trees
    pub source_root: PathBuf,

    /// Object and artifact cache directory
    pub cache_dir: PathBuf,

    /// Parallel compile jobs (engine default when unset)
    pub jobs: Option<usize>,

    /// Optimization mode propagated to the sub-build
    pub optimize: OptMode,

    /// Omit debug info
    pub strip: bool,

    /// Link-time optimization in the enclosing session
    pub lto: bool,

    /// Position-independent executables in the enclosing session
    pub pie: bool,
}

impl SessionOptions {
    /// Session options rooted at an installation directory, with the
    /// source trees expected beside the installed headers.
    pub fn new(install_root: &std::path::Path, cache_dir: PathBuf) -> Self {
        SessionOptions {
            abi_version: AbiVersion::default(),
            install: InstallPaths::under(install_root),
            source_root: install_root.to_path_buf(),
            cache_dir,
            jobs: None,
            optimize: OptMode::default(),
            strip: false,
            lto: false,
            pie: false,
        }
    }
}

/// A self-contained build request for one library, consumed exactly once
/// by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct SubBuildRequest {
    /// Target the units are compiled for
    pub target: TargetDescriptor,

    /// Root name of the library ("c++" or "c++abi")
    pub root_name: &'static str,

    /// Output kind
    pub output: OutputKind,

    /// Resolved compile units, in catalog order
    pub units: Vec<CompileUnit>,

    /// Directory holding this library's translation units
    pub source_dir: PathBuf,

    /// Object and artifact cache directory
    pub cache_dir: PathBuf,

    /// Parallel compile jobs
    pub jobs: Option<usize>,

    /// Link-time optimization
    pub lto: bool,

    /// Position-independent executable support
    pub pie: bool,

    /// Always false for runtime library sub-builds
    pub sanitizers: bool,

    /// Always false for runtime library sub-builds
    pub stack_protector: bool,

    /// The archives depend on nothing beyond libc
    pub link_libc: bool,
}

impl SubBuildRequest {
    /// Construct the request for one library from the session options.
    pub fn new(
        kind: LibraryKind,
        target: &TargetDescriptor,
        units: Vec<CompileUnit>,
        session: &SessionOptions,
    ) -> Self {
        SubBuildRequest {
            target: *target,
            root_name: kind.root_name(),
            output: OutputKind::StaticLib,
            units,
            source_dir: session.source_root.join(kind.source_subdir()),
            cache_dir: session.cache_dir.clone(),
            jobs: session.jobs,
            lto: session.lto,
            pie: session.pie,
            sanitizers: false,
            stack_protector: false,
            link_libc: true,
        }
    }

    /// Static-library filename for this request's target.
    pub fn output_filename(&self) -> String {
        if self.target.os == Os::Windows {
            format!("{}.lib", self.root_name)
        } else {
            format!("lib{}.a", self.root_name)
        }
    }
}
