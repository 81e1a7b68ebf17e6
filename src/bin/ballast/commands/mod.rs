//! Command implementations

pub mod build;
pub mod completions;
pub mod flags;
pub mod sources;

use anyhow::Result;
use ballast::{LibraryKind, TargetDescriptor};

use crate::cli::TargetArgs;

/// Resolve the target selection shared by all commands.
pub fn parse_target(args: &TargetArgs) -> Result<TargetDescriptor> {
    let target = match &args.target {
        Some(s) => TargetDescriptor::parse(s)?,
        None => TargetDescriptor::host(),
    };
    Ok(target
        .with_single_threaded(args.single_threaded)
        .with_pic(!args.no_pic))
}

/// Resolve a `--library` selection; both libraries when omitted.
pub fn parse_libraries(library: &Option<String>) -> Result<Vec<LibraryKind>> {
    match library {
        Some(name) => Ok(vec![name.parse()?]),
        None => Ok(LibraryKind::all().to_vec()),
    }
}
