//! Target-conditional source-set resolution.
//!
//! This module decides which catalog entries are compiled for a given
//! target. The decision logic is a small declarative rule table per library
//! (see [`rules`]); resolution itself is pure and deterministic, so it can
//! be tested without invoking a sub-build.

pub mod resolve;
pub mod rules;

pub use resolve::{resolve, ResolvedSet};
pub use rules::{rules_for, Action, Condition, Rule, Scope};
