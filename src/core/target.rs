//! Target description for runtime library builds.
//!
//! A `TargetDescriptor` captures the platform facts the source-set resolver
//! and flag synthesizer condition on: operating system, C library ABI,
//! threading mode, and position independence. It is supplied by the caller
//! once per invocation and never mutated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operating system of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
    Freebsd,
    Solaris,
    Zos,
    /// Minimal sandboxed target: no native filesystem, no exception
    /// unwinding support.
    Wasi,
}

impl Os {
    /// Get the OS name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Windows => "windows",
            Os::Freebsd => "freebsd",
            Os::Solaris => "solaris",
            Os::Zos => "zos",
            Os::Wasi => "wasi",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Os::Linux),
            "macos" | "darwin" => Ok(Os::Macos),
            "windows" => Ok(Os::Windows),
            "freebsd" => Ok(Os::Freebsd),
            "solaris" => Ok(Os::Solaris),
            "zos" => Ok(Os::Zos),
            "wasi" => Ok(Os::Wasi),
            _ => Err(TargetParseError::UnknownOs(s.to_string())),
        }
    }
}

/// C library ABI variant of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Abi {
    Gnu,
    Musl,
    Msvc,
    /// No distinguished C library ABI (macOS, the BSDs, WASI).
    None,
}

impl Abi {
    /// Get the ABI name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Abi::Gnu => "gnu",
            Abi::Musl => "musl",
            Abi::Msvc => "msvc",
            Abi::None => "none",
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Abi {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gnu" => Ok(Abi::Gnu),
            "musl" => Ok(Abi::Musl),
            "msvc" => Ok(Abi::Msvc),
            "none" => Ok(Abi::None),
            _ => Err(TargetParseError::UnknownAbi(s.to_string())),
        }
    }
}

/// Optimization mode for the sub-build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptMode {
    #[default]
    Debug,
    Release,
    /// Optimize for size.
    Small,
}

impl OptMode {
    /// The compiler flag selecting this optimization level.
    pub fn as_cflag(&self) -> &'static str {
        match self {
            OptMode::Debug => "-O0",
            OptMode::Release => "-O2",
            OptMode::Small => "-Oz",
        }
    }
}

/// Error parsing a target string.
#[derive(Debug, Error)]
pub enum TargetParseError {
    #[error("unknown operating system `{0}`")]
    UnknownOs(String),

    #[error("unknown ABI `{0}`")]
    UnknownAbi(String),

    #[error("empty target string")]
    Empty,
}

/// Immutable description of the platform a runtime library is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Operating system
    pub os: Os,

    /// C library ABI variant
    pub abi: Abi,

    /// Single-threaded build: thread support is compiled out entirely
    pub single_threaded: bool,

    /// Whether objects must be position-independent
    pub pic: bool,
}

impl TargetDescriptor {
    /// Create a descriptor for a multi-threaded, position-independent build.
    pub fn new(os: Os, abi: Abi) -> Self {
        TargetDescriptor {
            os,
            abi,
            single_threaded: false,
            pic: true,
        }
    }

    /// Detect the host target.
    pub fn host() -> Self {
        let (os, abi) = match std::env::consts::OS {
            "macos" => (Os::Macos, Abi::None),
            "windows" => (Os::Windows, Abi::Msvc),
            "freebsd" => (Os::Freebsd, Abi::None),
            "solaris" => (Os::Solaris, Abi::None),
            _ => (Os::Linux, Abi::Gnu),
        };
        TargetDescriptor::new(os, abi)
    }

    /// Parse a target string of the form `os` or `os-abi`
    /// (e.g. `linux-musl`, `wasi`).
    pub fn parse(s: &str) -> Result<Self, TargetParseError> {
        if s.is_empty() {
            return Err(TargetParseError::Empty);
        }

        match s.split_once('-') {
            Some((os, abi)) => Ok(TargetDescriptor::new(os.parse()?, abi.parse()?)),
            None => Ok(TargetDescriptor::new(s.parse()?, Abi::None)),
        }
    }

    /// Set single-threaded mode.
    pub fn with_single_threaded(mut self, single_threaded: bool) -> Self {
        self.single_threaded = single_threaded;
        self
    }

    /// Set position independence.
    pub fn with_pic(mut self, pic: bool) -> Self {
        self.pic = pic;
        self
    }

    /// Whether the target has a native filesystem the runtime library can
    /// back `<filesystem>` with. WASI has none, and neither does the
    /// Windows/MSVC combination.
    pub fn has_native_filesystem(&self) -> bool {
        !(self.os == Os::Wasi || (self.os == Os::Windows && self.abi == Abi::Msvc))
    }

    /// Whether the target environment supports exception unwinding.
    pub fn has_exception_support(&self) -> bool {
        self.os != Os::Wasi
    }

    /// Whether aligned operator new/delete are usable on this target.
    /// Solaris lacks the underlying allocator entry points.
    pub fn supports_aligned_allocation(&self) -> bool {
        self.os != Os::Solaris
    }

    /// Whether the target uses a GNU-compatible C library ABI.
    pub fn is_gnu(&self) -> bool {
        self.abi == Abi::Gnu
    }

    /// Whether the target uses a musl-based C library.
    pub fn is_musl(&self) -> bool {
        self.abi == Abi::Musl
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.abi == Abi::None {
            write!(f, "{}", self.os)
        } else {
            write!(f, "{}-{}", self.os, self.abi)
        }
    }
}
