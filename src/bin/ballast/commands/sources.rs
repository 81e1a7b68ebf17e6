//! `ballast sources` command

use anyhow::Result;
use ballast::resolve;

use crate::cli::SourcesArgs;
use crate::commands::{parse_libraries, parse_target};

pub fn execute(args: SourcesArgs) -> Result<()> {
    let target = parse_target(&args.target)?;
    let libraries = parse_libraries(&args.library)?;

    for kind in libraries {
        let set = resolve(kind, &target);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&SourcesOutput::from(&set))?);
        } else {
            println!("# {} sources for {} ({} files):", kind, target, set.len());
            for source in &set.sources {
                println!("  {}", source);
            }
            println!();
        }
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct SourcesOutput {
    library: String,
    sources: Vec<String>,
}

impl From<&ballast::ResolvedSet> for SourcesOutput {
    fn from(set: &ballast::ResolvedSet) -> Self {
        SourcesOutput {
            library: set.kind.to_string(),
            sources: set.sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}
