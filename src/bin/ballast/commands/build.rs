//! `ballast build` command

use anyhow::{anyhow, Result};
use directories::ProjectDirs;

use ballast::{
    build_and_register, ArtifactStore, ClangEngine, LibraryKind, OptMode, SessionOptions,
};

use crate::cli::BuildArgs;
use crate::commands::parse_target;

pub fn execute(args: BuildArgs) -> Result<()> {
    let target = parse_target(&args.target)?;

    let cache_dir = match args.cache_dir {
        Some(dir) => dir,
        None => ProjectDirs::from("", "", "ballast")
            .ok_or_else(|| anyhow!("could not determine a cache directory"))?
            .cache_dir()
            .to_path_buf(),
    };

    let mut session = SessionOptions::new(&args.install_root, cache_dir);
    session.abi_version = args.abi_version.parse()?;
    session.jobs = args.jobs;
    session.optimize = if args.release {
        OptMode::Release
    } else {
        OptMode::Debug
    };

    let engine = ClangEngine::detect();
    let mut store = ArtifactStore::new();

    for kind in LibraryKind::all() {
        build_and_register(&engine, &target, &session, kind, &mut store)?;
    }

    for kind in LibraryKind::all() {
        if let Some(artifact) = store.get(kind) {
            println!("{}: {}", kind, artifact.path.display());
        }
    }

    // Locks are released when the store goes out of scope; a real caller
    // would hand them to its link stage instead.
    Ok(())
}
