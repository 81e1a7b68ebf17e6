//! ABI versioning for the runtime libraries.
//!
//! The c++ and c++abi libraries carry a shared ABI version that selects a
//! numeric macro and an inline-namespace macro. Both libraries built in one
//! session must agree on the version, or the resulting archives are not
//! link-compatible.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ABI version shared by both runtime libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AbiVersion {
    #[default]
    V1,
    V2,
}

impl AbiVersion {
    /// The numeric version.
    pub fn number(&self) -> u32 {
        match self {
            AbiVersion::V1 => 1,
            AbiVersion::V2 => 2,
        }
    }

    /// The versioned inline namespace all library symbols live in.
    pub fn namespace(&self) -> &'static str {
        match self {
            AbiVersion::V1 => "__1",
            AbiVersion::V2 => "__2",
        }
    }

    /// The macro pinning the numeric ABI version.
    pub fn version_define(&self) -> String {
        format!("-D_LIBCPP_ABI_VERSION={}", self.number())
    }

    /// The macro pinning the ABI namespace.
    pub fn namespace_define(&self) -> String {
        format!("-D_LIBCPP_ABI_NAMESPACE={}", self.namespace())
    }
}

impl fmt::Display for AbiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Error parsing an ABI version.
#[derive(Debug, Error)]
#[error("unknown ABI version `{0}` (expected 1 or 2)")]
pub struct AbiVersionParseError(String);

impl FromStr for AbiVersion {
    type Err = AbiVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(AbiVersion::V1),
            "2" => Ok(AbiVersion::V2),
            _ => Err(AbiVersionParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_v1() {
        assert_eq!(AbiVersion::default(), AbiVersion::V1);
    }

    #[test]
    fn test_defines() {
        assert_eq!(AbiVersion::V1.version_define(), "-D_LIBCPP_ABI_VERSION=1");
        assert_eq!(
            AbiVersion::V1.namespace_define(),
            "-D_LIBCPP_ABI_NAMESPACE=__1"
        );
        assert_eq!(AbiVersion::V2.version_define(), "-D_LIBCPP_ABI_VERSION=2");
        assert_eq!(
            AbiVersion::V2.namespace_define(),
            "-D_LIBCPP_ABI_NAMESPACE=__2"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("1".parse::<AbiVersion>().unwrap(), AbiVersion::V1);
        assert_eq!("2".parse::<AbiVersion>().unwrap(), AbiVersion::V2);
        assert!("3".parse::<AbiVersion>().is_err());
    }
}
