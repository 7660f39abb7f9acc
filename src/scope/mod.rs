//! Lexical scope resolution.
//!
//! - scope_table: the tree of scope frames and the symbols they hold
//! - analyzer: the two-pass scope analyzer producing scope errors

pub mod analyzer;
pub mod scope_table;
