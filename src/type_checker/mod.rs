//! Static type checking.
//!
//! Runs after scope analysis has succeeded, so every name is known to resolve.
//! The checker:
//!
//! - Infers a type for every expression, widening numeric operands
//! - Resolves calls against the overloads in scope
//! - Validates conditions, switch subjects, returns and `break` placement
//!
//! Errors are accumulated; an expression whose type is already unknown never
//! produces a second report.

pub mod type_checker;

#[cfg(test)]
mod tests;
