//! Fixed source catalogs for the two runtime support libraries.
//!
//! Each catalog is an ordered list of source paths relative to the
//! library's source subtree. The order is what the resolver preserves when
//! it filters for a target; files are otherwise independent translation
//! units. The lists are compiled in and never mutated.

use crate::core::library::LibraryKind;

/// Subtree backing `<filesystem>`; dropped on targets without a native
/// filesystem.
pub const FILESYSTEM_SUBTREE: &str = "filesystem/";

/// Platform support subtrees, each tied to exactly one OS.
pub const WIN32_SUBTREE: &str = "support/win32/";
pub const SOLARIS_SUBTREE: &str = "support/solaris/";
pub const IBM_SUBTREE: &str = "support/ibm/";

/// Exception machinery of the ABI library; dropped on targets without
/// unwinding support.
pub const CXXABI_EXCEPTION_SOURCES: [&str; 2] = ["cxa_exception.cpp", "cxa_personality.cpp"];

static CXX_SOURCES: &[&str] = &[
    "algorithm.cpp",
    "any.cpp",
    "atomic.cpp",
    "barrier.cpp",
    "bind.cpp",
    "call_once.cpp",
    "charconv.cpp",
    "chrono.cpp",
    "condition_variable.cpp",
    "condition_variable_destructor.cpp",
    "error_category.cpp",
    "exception.cpp",
    "expected.cpp",
    "filesystem/directory_entry.cpp",
    "filesystem/directory_iterator.cpp",
    "filesystem/filesystem_clock.cpp",
    "filesystem/filesystem_error.cpp",
    "filesystem/operations.cpp",
    "filesystem/path.cpp",
    "fstream.cpp",
    "functional.cpp",
    "hash.cpp",
    "ios.cpp",
    "ios.instantiations.cpp",
    "iostream.cpp",
    "locale.cpp",
    "memory.cpp",
    "memory_resource.cpp",
    "mutex.cpp",
    "mutex_destructor.cpp",
    "new.cpp",
    "new_handler.cpp",
    "new_helpers.cpp",
    "optional.cpp",
    "ostream.cpp",
    "print.cpp",
    "random.cpp",
    "random_shuffle.cpp",
    "regex.cpp",
    "ryu/d2fixed.cpp",
    "ryu/d2s.cpp",
    "ryu/f2s.cpp",
    "shared_mutex.cpp",
    "stdexcept.cpp",
    "string.cpp",
    "strstream.cpp",
    "support/ibm/mbsnrtowcs.cpp",
    "support/ibm/wcsnrtombs.cpp",
    "support/ibm/xlocale_zos.cpp",
    "support/solaris/xlocale.cpp",
    "support/win32/locale_win32.cpp",
    "support/win32/support.cpp",
    "support/win32/thread_win32.cpp",
    "system_error.cpp",
    "thread.cpp",
    "typeinfo.cpp",
    "valarray.cpp",
    "variant.cpp",
    "vector.cpp",
    "verbose_abort.cpp",
];

static CXXABI_SOURCES: &[&str] = &[
    "abort_message.cpp",
    "cxa_aux_runtime.cpp",
    "cxa_default_handlers.cpp",
    "cxa_demangle.cpp",
    "cxa_exception.cpp",
    "cxa_exception_storage.cpp",
    "cxa_guard.cpp",
    "cxa_handlers.cpp",
    "cxa_personality.cpp",
    "cxa_thread_atexit.cpp",
    "cxa_vector.cpp",
    "cxa_virtual.cpp",
    "fallback_malloc.cpp",
    "private_typeinfo.cpp",
    "stdlib_exception.cpp",
    "stdlib_new_delete.cpp",
    "stdlib_stdexcept.cpp",
    "stdlib_typeinfo.cpp",
];

/// A library's fixed catalog plus the per-library facts the generic
/// resolver pipeline is parameterized by.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    /// Which library this catalog belongs to
    pub kind: LibraryKind,

    /// Ordered source list, relative to the library source subtree
    pub sources: &'static [&'static str],

    /// The thread-support translation unit dropped in single-threaded mode.
    /// For the ABI library this is the thread-local destructor registration
    /// unit.
    pub threads_source: &'static str,
}

impl Catalog {
    /// Get the catalog for a library.
    pub fn for_kind(kind: LibraryKind) -> Catalog {
        match kind {
            LibraryKind::Cxx => Catalog {
                kind,
                sources: CXX_SOURCES,
                threads_source: "thread.cpp",
            },
            LibraryKind::CxxAbi => Catalog {
                kind,
                sources: CXXABI_SOURCES,
                threads_source: "cxa_thread_atexit.cpp",
            },
        }
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the catalog is empty (never true for the built-in catalogs).
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_nonempty() {
        assert!(!Catalog::for_kind(LibraryKind::Cxx).is_empty());
        assert!(!Catalog::for_kind(LibraryKind::CxxAbi).is_empty());
    }

    #[test]
    fn test_threads_sources_exist_in_catalogs() {
        for kind in [LibraryKind::Cxx, LibraryKind::CxxAbi] {
            let catalog = Catalog::for_kind(kind);
            assert!(
                catalog.sources.contains(&catalog.threads_source),
                "threads source missing from {} catalog",
                kind
            );
        }
    }

    #[test]
    fn test_exception_sources_exist_in_abi_catalog() {
        let catalog = Catalog::for_kind(LibraryKind::CxxAbi);
        for src in CXXABI_EXCEPTION_SOURCES {
            assert!(catalog.sources.contains(&src));
        }
    }

    #[test]
    fn test_catalogs_have_no_duplicates() {
        for kind in [LibraryKind::Cxx, LibraryKind::CxxAbi] {
            let catalog = Catalog::for_kind(kind);
            let mut seen = std::collections::HashSet::new();
            for src in catalog.sources {
                assert!(seen.insert(src), "duplicate catalog entry: {}", src);
            }
        }
    }

    #[test]
    fn test_platform_subtrees_only_in_cxx_catalog() {
        let abi = Catalog::for_kind(LibraryKind::CxxAbi);
        for src in abi.sources {
            assert!(!src.contains('/'), "unexpected subtree entry: {}", src);
        }
    }
}
