//! Core data structures for Ballast.
//!
//! This module contains the foundational types used throughout Ballast:
//! - Target descriptors and capability predicates
//! - ABI versioning shared by both runtime libraries
//! - Library identities and their fixed source catalogs

pub mod abi;
pub mod catalog;
pub mod library;
pub mod target;

pub use abi::AbiVersion;
pub use catalog::Catalog;
pub use library::LibraryKind;
pub use target::{Abi, OptMode, Os, TargetDescriptor};
