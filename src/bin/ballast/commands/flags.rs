//! `ballast flags` command

use anyhow::Result;
use ballast::builder::flags::{synthesize, FlagContext};
use ballast::{resolve, AbiVersion, InstallPaths, OptMode};

use crate::cli::FlagsArgs;
use crate::commands::{parse_libraries, parse_target};

pub fn execute(args: FlagsArgs) -> Result<()> {
    let target = parse_target(&args.target)?;
    let libraries = parse_libraries(&args.library)?;
    let abi_version: AbiVersion = args.abi_version.parse()?;
    let install = InstallPaths::under(&args.install_root);

    for kind in libraries {
        let set = resolve(kind, &target);
        let units = synthesize(
            FlagContext {
                kind,
                target: &target,
                abi_version,
                optimize: OptMode::Release,
                strip: false,
            },
            &set,
            &install,
        );

        if args.json {
            println!("{}", serde_json::to_string_pretty(&units)?);
            continue;
        }

        println!("# {} flags for {}:", kind, target);
        if let Some(unit) = units.first() {
            for flag in &unit.cache_flags {
                println!("  {}    # cache-relevant", flag);
            }
            for flag in &unit.exempt_flags {
                println!("  {}    # cache-exempt", flag);
            }
        }
        println!();
    }

    Ok(())
}
