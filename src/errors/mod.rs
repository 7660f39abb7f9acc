//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Fatal front-end errors with source position information
//! - Scope errors collected by the scope analyzer
//! - Type errors collected by the type checker
//! - Error formatting and display functionality

pub mod errors;

#[cfg(test)]
mod tests;
