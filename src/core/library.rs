//! Library identities for the two runtime support libraries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::target::Os;

/// Which runtime support library a pipeline builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    /// The C++ standard library implementation.
    Cxx,

    /// The ABI-support library (exception machinery, RTTI, demangler).
    CxxAbi,
}

impl LibraryKind {
    /// Root name of the library, as used for the artifact slot and the
    /// output filename stem.
    pub fn root_name(&self) -> &'static str {
        match self {
            LibraryKind::Cxx => "c++",
            LibraryKind::CxxAbi => "c++abi",
        }
    }

    /// Subdirectory of the runtime source root holding this library's
    /// translation units.
    pub fn source_subdir(&self) -> &'static str {
        match self {
            LibraryKind::Cxx => "libcxx/src",
            LibraryKind::CxxAbi => "libcxxabi/src",
        }
    }

    /// The macro marking a translation unit as building this library.
    pub fn building_define(&self) -> &'static str {
        match self {
            LibraryKind::Cxx => "_LIBCPP_BUILDING_LIBRARY",
            LibraryKind::CxxAbi => "_LIBCXXABI_BUILDING_LIBRARY",
        }
    }

    /// Static-library filename for this library on the given OS.
    pub fn output_filename(&self, os: Os) -> String {
        if os == Os::Windows {
            format!("{}.lib", self.root_name())
        } else {
            format!("lib{}.a", self.root_name())
        }
    }

    /// Both libraries, in build order.
    pub fn all() -> [LibraryKind; 2] {
        [LibraryKind::CxxAbi, LibraryKind::Cxx]
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_name())
    }
}

/// Error parsing a library name.
#[derive(Debug, Error)]
#[error("unknown library `{0}` (expected c++ or c++abi)")]
pub struct LibraryParseError(String);

impl FromStr for LibraryKind {
    type Err = LibraryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c++" | "cxx" => Ok(LibraryKind::Cxx),
            "c++abi" | "cxxabi" => Ok(LibraryKind::CxxAbi),
            _ => Err(LibraryParseError(s.to_string())),
        }
    }
}
