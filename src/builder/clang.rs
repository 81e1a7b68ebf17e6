//! Stock clang-based build engine.
//!
//! Compiles the resolved units with a clang-family compiler, caches objects
//! under a key built from the cache-relevant inputs only, and archives the
//! result with ar. Cache-exempt include paths are passed to the compiler
//! but never hashed, so a relocated installation reuses every cached
//! object.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::builder::engine::{ArtifactLock, BuildEngine, BuiltArtifact, EngineError};
use crate::builder::flags::CompileUnit;
use crate::builder::request::SubBuildRequest;
use crate::util::hash::{sha256_bytes, CacheKey};
use crate::util::process::{find_archiver, find_cxx_compiler, ProcessBuilder};

/// Build engine driving clang++ and ar.
#[derive(Debug, Clone)]
pub struct ClangEngine {
    cxx: Option<PathBuf>,
    ar: Option<PathBuf>,
}

impl ClangEngine {
    /// Detect the toolchain from `CXX`/`AR` and PATH.
    pub fn detect() -> Self {
        let cxx = find_cxx_compiler();
        let ar = find_archiver();

        match (&cxx, &ar) {
            (Some(cxx), Some(ar)) => {
                tracing::debug!("using {} and {}", cxx.display(), ar.display())
            }
            _ => tracing::debug!("no clang toolchain found"),
        }

        ClangEngine { cxx, ar }
    }

    /// Create an engine with explicit tool paths.
    pub fn new(cxx: PathBuf, ar: PathBuf) -> Self {
        ClangEngine {
            cxx: Some(cxx),
            ar: Some(ar),
        }
    }

    /// Object-cache key for one unit: target, library, source identity and
    /// content, and the cache-relevant flags. Exempt flags stay out.
    fn object_key(request: &SubBuildRequest, unit: &CompileUnit) -> Result<String, EngineError> {
        let src_path = request.source_dir.join(&unit.source);
        if !src_path.exists() {
            return Err(EngineError::MissingSource(src_path));
        }
        let content = std::fs::read(&src_path)?;

        let mut key = CacheKey::new();
        key.update_str(&request.target.to_string())
            .update_str(request.root_name)
            .update_str(&unit.source)
            .update_str(&sha256_bytes(&content))
            .update_strs(unit.cache_flags.iter().map(String::as_str))
            .update_bool(request.lto)
            .update_bool(request.pie);

        Ok(key.finish_short())
    }

    fn compile_unit(
        &self,
        cxx: &Path,
        request: &SubBuildRequest,
        unit: &CompileUnit,
        obj_dir: &Path,
    ) -> Result<PathBuf, EngineError> {
        let key = Self::object_key(request, unit)?;
        let object = obj_dir.join(format!("{}.o", key));

        if object.exists() {
            tracing::debug!("cache hit for {}", unit.source);
            return Ok(object);
        }

        let src_path = request.source_dir.join(&unit.source);
        let cmd = ProcessBuilder::new(cxx)
            .arg("-c")
            .args(unit.cache_flags.iter())
            .args(unit.exempt_flags.iter())
            .arg(&src_path)
            .arg("-o")
            .arg(&object);

        tracing::debug!("compiling {}", unit.source);

        let output = cmd.exec().map_err(|e| EngineError::Compile {
            source_file: unit.source.clone(),
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            // Leave no partial object behind for the cache to pick up.
            let _ = std::fs::remove_file(&object);
            return Err(EngineError::Compile {
                source_file: unit.source.clone(),
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(object)
    }
}

impl BuildEngine for ClangEngine {
    fn supports_native_codegen(&self) -> bool {
        self.cxx.is_some() && self.ar.is_some()
    }

    fn name(&self) -> &str {
        "clang"
    }

    fn build(&self, request: &SubBuildRequest) -> Result<BuiltArtifact, EngineError> {
        let (Some(cxx), Some(ar)) = (self.cxx.as_ref(), self.ar.as_ref()) else {
            return Err(EngineError::ToolchainMissing);
        };

        if let Some(jobs) = request.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
                .ok(); // Ignore if already set
        }

        let obj_dir = request.cache_dir.join("o");
        let out_dir = request.cache_dir.join(request.root_name);
        std::fs::create_dir_all(&obj_dir)?;
        std::fs::create_dir_all(&out_dir)?;

        tracing::info!(
            "building {} ({} units) for {}",
            request.root_name,
            request.units.len(),
            request.target
        );

        let pb = if request.units.len() > 1 {
            let pb = ProgressBar::new(request.units.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message(request.root_name);
            Some(pb)
        } else {
            None
        };

        let results: Vec<Result<PathBuf, EngineError>> = request
            .units
            .par_iter()
            .map(|unit| {
                let result = self.compile_unit(cxx, request, unit, &obj_dir);
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                result
            })
            .collect();

        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }

        let mut objects = Vec::with_capacity(results.len());
        for result in results {
            objects.push(result?);
        }

        let artifact_path = out_dir.join(request.output_filename());
        let lock = ArtifactLock::acquire(&artifact_path)?;

        // Rebuild the archive from scratch so stale members never linger.
        let _ = std::fs::remove_file(&artifact_path);

        let cmd = ProcessBuilder::new(ar)
            .arg("rcs")
            .arg(&artifact_path)
            .args(objects.iter());

        let output = cmd.exec().map_err(|e| EngineError::Archive {
            output: artifact_path.clone(),
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(EngineError::Archive {
                output: artifact_path,
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::info!("emitted {}", artifact_path.display());

        Ok(BuiltArtifact {
            path: artifact_path,
            lock,
        })
    }
}
