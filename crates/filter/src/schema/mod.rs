//! Filter document schema types with serde deserialization.
//!
//! Defines the in-memory shape of a parsed filter document:
//! - `Config`: root with the diagnostic threshold and ordered rules
//! - `FilterRule`: AND-combined field groups
//! - `Comparable` / `StringComparable`: individual constraints
//!
//! Field names are camelCase and enum variants SCREAMING_SNAKE_CASE; both are
//! part of the document compatibility surface.

mod comparable;
mod config;
mod level;

pub use comparable::*;
pub use config::*;
pub use level::*;

#[cfg(test)]
mod tests;
