//! Source-set resolution.
//!
//! Filters a library catalog against a target descriptor by walking the
//! library's rule table. Exclusion rules are evaluated per catalog entry in
//! priority order and short-circuit: the first rule that excludes an entry
//! wins and no further rules are consulted for that entry. Rules scoped to
//! all units contribute macros and flags to every entry that survives.

use crate::core::catalog::Catalog;
use crate::core::library::LibraryKind;
use crate::core::target::TargetDescriptor;

use super::rules::{rules_for, Action, Rule, Scope};

/// The outcome of resolving one library catalog for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSet {
    /// Which library this set belongs to
    pub kind: LibraryKind,

    /// Surviving sources, in catalog order
    pub sources: Vec<&'static str>,

    /// Macros every surviving unit gains (without `-D`)
    pub defines: Vec<&'static str>,

    /// Bare compiler flags every surviving unit gains
    pub flags: Vec<&'static str>,
}

impl ResolvedSet {
    /// Number of sources retained.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources survived (does not happen for real targets).
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Resolve the source set for one library and target.
pub fn resolve(kind: LibraryKind, target: &TargetDescriptor) -> ResolvedSet {
    let catalog = Catalog::for_kind(kind);
    let rules = rules_for(kind);

    let sources: Vec<&'static str> = catalog
        .sources
        .iter()
        .copied()
        .filter(
            |entry| match rules.iter().find(|r| r.excludes(entry, target)) {
                Some(rule) => {
                    tracing::debug!("{}: excluding {} ({:?})", kind, entry, rule.when);
                    false
                }
                None => true,
            },
        )
        .collect();

    let mut defines = Vec::new();
    let mut flags = Vec::new();
    for rule in unit_wide_rules(rules, target) {
        match rule.action {
            Action::Define(name) => defines.push(name),
            Action::Flag(flag) => flags.push(flag),
            Action::Exclude => {}
        }
    }

    tracing::debug!(
        "{}: resolved {}/{} sources for {}",
        kind,
        sources.len(),
        catalog.len(),
        target
    );

    ResolvedSet {
        kind,
        sources,
        defines,
        flags,
    }
}

fn unit_wide_rules<'a>(
    rules: &'a [Rule],
    target: &'a TargetDescriptor,
) -> impl Iterator<Item = &'a Rule> {
    rules
        .iter()
        .filter(|r| r.scope == Scope::AllUnits && r.when.holds(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{CXXABI_EXCEPTION_SOURCES, FILESYSTEM_SUBTREE};
    use crate::core::target::{Abi, Os};

    fn linux() -> TargetDescriptor {
        TargetDescriptor::new(Os::Linux, Abi::Gnu)
    }

    fn wasi() -> TargetDescriptor {
        TargetDescriptor::new(Os::Wasi, Abi::None)
    }

    #[test]
    fn test_filesystem_excluded_without_native_fs() {
        let set = resolve(LibraryKind::Cxx, &wasi());
        assert!(
            !set.sources
                .iter()
                .any(|s| s.starts_with(FILESYSTEM_SUBTREE)),
            "filesystem sources must be dropped on wasi"
        );

        let set = resolve(LibraryKind::Cxx, &linux());
        assert!(set
            .sources
            .iter()
            .any(|s| s.starts_with(FILESYSTEM_SUBTREE)));
    }

    #[test]
    fn test_platform_subtrees_follow_os() {
        let set = resolve(LibraryKind::Cxx, &linux());
        assert!(!set.sources.iter().any(|s| s.starts_with("support/")));

        let set = resolve(
            LibraryKind::Cxx,
            &TargetDescriptor::new(Os::Windows, Abi::Gnu),
        );
        assert!(set.sources.iter().any(|s| s.starts_with("support/win32/")));
        assert!(!set.sources.iter().any(|s| s.starts_with("support/ibm/")));

        let set = resolve(LibraryKind::Cxx, &TargetDescriptor::new(Os::Zos, Abi::None));
        assert!(set.sources.iter().any(|s| s.starts_with("support/ibm/")));
        assert!(!set.sources.iter().any(|s| s.starts_with("support/win32/")));

        let set = resolve(
            LibraryKind::Cxx,
            &TargetDescriptor::new(Os::Solaris, Abi::None),
        );
        assert!(set.sources.contains(&"support/solaris/xlocale.cpp"));
    }

    #[test]
    fn test_single_threaded_drops_thread_sources() {
        for kind in [LibraryKind::Cxx, LibraryKind::CxxAbi] {
            let threads_source = Catalog::for_kind(kind).threads_source;

            let set = resolve(kind, &linux().with_single_threaded(true));
            assert!(!set.sources.contains(&threads_source));
            assert!(set.defines.contains(&"_LIBCPP_HAS_NO_THREADS"));

            let set = resolve(kind, &linux());
            assert!(set.sources.contains(&threads_source));
            assert!(!set.defines.contains(&"_LIBCPP_HAS_NO_THREADS"));
        }
    }

    #[test]
    fn test_thread_atexit_capability_define() {
        let set = resolve(LibraryKind::CxxAbi, &linux());
        assert!(set.defines.contains(&"HAVE___CXA_THREAD_ATEXIT_IMPL"));

        // Not single-threaded, not GNU: no capability define
        let set = resolve(
            LibraryKind::CxxAbi,
            &TargetDescriptor::new(Os::Linux, Abi::Musl),
        );
        assert!(!set.defines.contains(&"HAVE___CXA_THREAD_ATEXIT_IMPL"));

        // Single-threaded GNU: the file is gone instead
        let set = resolve(LibraryKind::CxxAbi, &linux().with_single_threaded(true));
        assert!(!set.defines.contains(&"HAVE___CXA_THREAD_ATEXIT_IMPL"));
        assert!(!set.sources.contains(&"cxa_thread_atexit.cpp"));
    }

    #[test]
    fn test_no_exceptions_environment_abi_library() {
        let with = resolve(LibraryKind::CxxAbi, &linux());
        let without = resolve(LibraryKind::CxxAbi, &wasi());

        assert_eq!(with.len(), without.len() + CXXABI_EXCEPTION_SOURCES.len());
        for src in CXXABI_EXCEPTION_SOURCES {
            assert!(with.sources.contains(&src));
            assert!(!without.sources.contains(&src));
        }
        assert!(without.flags.contains(&"-fno-exceptions"));
        assert!(!with.flags.contains(&"-fno-exceptions"));
    }

    #[test]
    fn test_no_exceptions_environment_keeps_cxx_file_count() {
        // The standard library loses filesystem sources on wasi for lack of
        // a native filesystem, not for lack of exceptions; with filesystem
        // entries set aside, the counts match.
        let linux_set = resolve(LibraryKind::Cxx, &linux());
        let wasi_set = resolve(LibraryKind::Cxx, &wasi());

        let linux_non_fs = linux_set
            .sources
            .iter()
            .filter(|s| !s.starts_with(FILESYSTEM_SUBTREE))
            .count();
        assert_eq!(linux_non_fs, wasi_set.len());
        assert!(wasi_set.flags.contains(&"-fno-exceptions"));
    }

    #[test]
    fn test_resolution_preserves_catalog_order() {
        let catalog = Catalog::for_kind(LibraryKind::Cxx);
        let set = resolve(LibraryKind::Cxx, &linux());

        let positions: Vec<usize> = set
            .sources
            .iter()
            .map(|s| catalog.sources.iter().position(|c| c == s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = resolve(LibraryKind::Cxx, &wasi());
        let b = resolve(LibraryKind::Cxx, &wasi());
        assert_eq!(a, b);
    }
}
