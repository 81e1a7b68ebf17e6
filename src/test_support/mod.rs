//! Test utilities and mocks for Ballast unit tests.
//!
//! Provides a mock build engine so the dispatch and registry layers can be
//! exercised without a real compiler.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::builder::engine::{ArtifactLock, BuildEngine, BuiltArtifact, EngineError};
use crate::builder::request::SubBuildRequest;

/// A build engine that records every request it receives and fabricates
/// artifacts instead of compiling.
pub struct MockEngine {
    dir: PathBuf,
    capable: bool,
    fail: bool,
    requests: Mutex<Vec<SubBuildRequest>>,
    counter: AtomicUsize,
}

impl MockEngine {
    /// An engine that succeeds, writing fake archives under `dir`.
    pub fn new(dir: &Path) -> Self {
        MockEngine {
            dir: dir.to_path_buf(),
            capable: true,
            fail: false,
            requests: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    /// An engine with no native codegen backend.
    pub fn without_backend() -> Self {
        MockEngine {
            dir: PathBuf::new(),
            capable: false,
            fail: false,
            requests: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    /// An engine whose sub-builds always fail.
    pub fn failing(dir: &Path) -> Self {
        MockEngine {
            fail: true,
            ..MockEngine::new(dir)
        }
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<SubBuildRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl BuildEngine for MockEngine {
    fn supports_native_codegen(&self) -> bool {
        self.capable
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn build(&self, request: &SubBuildRequest) -> Result<BuiltArtifact, EngineError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail {
            return Err(EngineError::Compile {
                source_file: request
                    .units
                    .first()
                    .map(|u| u.source.clone())
                    .unwrap_or_default(),
                message: "mock sub-build failure".to_string(),
            });
        }

        // Unique path per build so repeated builds never contend on the
        // same lock.
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let path = self
            .dir
            .join(format!("{}-{}", n, request.output_filename()));
        std::fs::write(&path, b"!<arch>\n")?;
        let lock = ArtifactLock::acquire(&path)?;

        Ok(BuiltArtifact { path, lock })
    }
}
