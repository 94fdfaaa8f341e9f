//! Pattern matching for Ethereum addresses.
//!
//! Matching runs in two phases:
//! - Case-insensitive: the lowercase address must start with the lowercased
//!   prefix and end with the lowercased suffix
//! - Checksum: when the spec is checksum-sensitive, the EIP-55 form of the
//!   address must additionally carry the literal casing of the pattern

mod pattern;

pub use pattern::Matcher;
