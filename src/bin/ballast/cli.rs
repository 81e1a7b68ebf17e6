//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Ballast - builder for the C++ runtime support libraries
#[derive(Parser)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved source set for a target
    Sources(SourcesArgs),

    /// Show the per-unit compiler flags for a target
    Flags(FlagsArgs),

    /// Build the runtime libraries with the clang engine
    Build(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target selection shared by all inspection commands.
#[derive(Args)]
pub struct TargetArgs {
    /// Target platform, `os` or `os-abi` (e.g. linux-musl, wasi)
    #[arg(long, short)]
    pub target: Option<String>,

    /// Resolve for a single-threaded build
    #[arg(long)]
    pub single_threaded: bool,

    /// Disable position-independent code
    #[arg(long)]
    pub no_pic: bool,
}

#[derive(Args)]
pub struct SourcesArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Library to resolve (c++ or c++abi, both when omitted)
    #[arg(long, short)]
    pub library: Option<String>,

    /// Emit as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Library to resolve (c++ or c++abi, both when omitted)
    #[arg(long, short)]
    pub library: Option<String>,

    /// ABI version for both libraries (1 or 2)
    #[arg(long, default_value = "1")]
    pub abi_version: String,

    /// Installation root the include paths are derived from
    #[arg(long, default_value = "/usr/local")]
    pub install_root: PathBuf,

    /// Emit as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// ABI version for both libraries (1 or 2)
    #[arg(long, default_value = "1")]
    pub abi_version: String,

    /// Installation root holding headers and the library source trees
    #[arg(long)]
    pub install_root: PathBuf,

    /// Object and artifact cache directory (defaults to the user cache dir)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Build in release mode
    #[arg(short, long)]
    pub release: bool,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
