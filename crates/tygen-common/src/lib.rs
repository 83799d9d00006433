//! Common types and utilities for the tygen type-generation engine.
//!
//! This crate provides foundational types used across all tygen crates:
//! - String interning (`Atom`, `Interner`)
//! - The dynamic term vocabulary (`Term`, `Bits`) that generators produce
//!   and validators judge
//! - Typed error values (`Error`, `ErrorKind`)
//! - Centralized limits and thresholds
//! - Opaque generator/validator handles (`GeneratorHandle`, `ValidatorHandle`)

// String interning for atom deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Dynamic term values
pub mod term;
pub use term::{Bits, Term, TermMap};

// Typed errors
pub mod error;
pub use error::{Error, ErrorKind};

// Centralized limits and thresholds
pub mod limits;

// Opaque build products
pub mod handles;
pub use handles::{GeneratorHandle, ValidatorHandle};

#[cfg(test)]
mod tests;
