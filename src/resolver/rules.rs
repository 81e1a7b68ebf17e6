//! Exclusion and flag rules, modeled as data.
//!
//! Each library carries a fixed, ordered rule table. A rule names the
//! catalog entries it applies to (`Scope`), the target condition under which
//! it fires (`Condition`), and what happens when it does (`Action`).
//! Keeping the table declarative lets the resolver be tested without ever
//! touching a sub-build.

use crate::core::catalog::{FILESYSTEM_SUBTREE, IBM_SUBTREE, SOLARIS_SUBTREE, WIN32_SUBTREE};
use crate::core::library::LibraryKind;
use crate::core::target::{Os, TargetDescriptor};

/// Which catalog entries a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every entry under a directory prefix.
    Subtree(&'static str),

    /// A single named entry.
    File(&'static str),

    /// Every entry that survives exclusion.
    AllUnits,
}

impl Scope {
    /// Whether a catalog entry falls under this scope.
    pub fn matches(&self, entry: &str) -> bool {
        match self {
            Scope::Subtree(prefix) => entry.starts_with(prefix),
            Scope::File(name) => entry == *name,
            Scope::AllUnits => true,
        }
    }
}

/// Target condition under which a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The target has no native filesystem to back `<filesystem>`.
    NoNativeFilesystem,

    /// The target OS is not the named one.
    NotOs(Os),

    /// The build is single-threaded.
    SingleThreaded,

    /// The build is multi-threaded on a GNU-compatible ABI.
    MultiThreadedGnuAbi,

    /// The target environment cannot unwind exceptions.
    NoExceptionSupport,
}

impl Condition {
    /// Evaluate the condition against a target.
    pub fn holds(&self, target: &TargetDescriptor) -> bool {
        match self {
            Condition::NoNativeFilesystem => !target.has_native_filesystem(),
            Condition::NotOs(os) => target.os != *os,
            Condition::SingleThreaded => target.single_threaded,
            Condition::MultiThreadedGnuAbi => !target.single_threaded && target.is_gnu(),
            Condition::NoExceptionSupport => !target.has_exception_support(),
        }
    }
}

/// Effect of a rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Drop the matching entries from the resolved set.
    Exclude,

    /// Add a macro to every unit that survives resolution.
    Define(&'static str),

    /// Add a bare compiler flag to every unit that survives resolution.
    Flag(&'static str),
}

/// One row of a library's rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub scope: Scope,
    pub when: Condition,
    pub action: Action,
}

impl Rule {
    /// Whether this rule excludes the given entry for the given target.
    pub fn excludes(&self, entry: &str, target: &TargetDescriptor) -> bool {
        self.action == Action::Exclude && self.scope.matches(entry) && self.when.holds(target)
    }
}

/// Rule table for the standard library, in priority order.
static CXX_RULES: &[Rule] = &[
    Rule {
        scope: Scope::Subtree(FILESYSTEM_SUBTREE),
        when: Condition::NoNativeFilesystem,
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::Subtree(WIN32_SUBTREE),
        when: Condition::NotOs(Os::Windows),
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::Subtree(SOLARIS_SUBTREE),
        when: Condition::NotOs(Os::Solaris),
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::Subtree(IBM_SUBTREE),
        when: Condition::NotOs(Os::Zos),
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::File("thread.cpp"),
        when: Condition::SingleThreaded,
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::AllUnits,
        when: Condition::SingleThreaded,
        action: Action::Define("_LIBCPP_HAS_NO_THREADS"),
    },
    Rule {
        scope: Scope::AllUnits,
        when: Condition::NoExceptionSupport,
        action: Action::Flag("-fno-exceptions"),
    },
];

/// Rule table for the ABI-support library, in priority order.
static CXXABI_RULES: &[Rule] = &[
    Rule {
        scope: Scope::File("cxa_thread_atexit.cpp"),
        when: Condition::SingleThreaded,
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::AllUnits,
        when: Condition::SingleThreaded,
        action: Action::Define("_LIBCPP_HAS_NO_THREADS"),
    },
    Rule {
        scope: Scope::AllUnits,
        when: Condition::MultiThreadedGnuAbi,
        action: Action::Define("HAVE___CXA_THREAD_ATEXIT_IMPL"),
    },
    Rule {
        scope: Scope::File("cxa_exception.cpp"),
        when: Condition::NoExceptionSupport,
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::File("cxa_personality.cpp"),
        when: Condition::NoExceptionSupport,
        action: Action::Exclude,
    },
    Rule {
        scope: Scope::AllUnits,
        when: Condition::NoExceptionSupport,
        action: Action::Flag("-fno-exceptions"),
    },
];

/// Get the rule table for a library.
pub fn rules_for(kind: LibraryKind) -> &'static [Rule] {
    match kind {
        LibraryKind::Cxx => CXX_RULES,
        LibraryKind::CxxAbi => CXXABI_RULES,
    }
}
