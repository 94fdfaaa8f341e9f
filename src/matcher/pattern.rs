//! Compiled pattern matching.

use crate::crypto::Address;
use crate::spec::KeySpec;

/// A pattern compiled from a [`KeySpec`] for repeated matching.
///
/// The lowercased prefix/suffix are computed once at compile time rather
/// than per candidate; matching itself is a pure function of the address.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// Literal prefix as the caller typed it
    prefix: String,
    /// Literal suffix as the caller typed it
    suffix: String,
    /// Lowercased forms for the case-insensitive phase
    prefix_lower: String,
    suffix_lower: String,
    /// Whether the checksum phase applies at all. Patterns without letters
    /// have nothing to checksum, so the Keccak pass is skipped for them.
    check_casing: bool,
}

impl Matcher {
    /// Compiles a matcher from a validated spec.
    pub fn compile(spec: &KeySpec) -> Self {
        Self {
            prefix: spec.prefix().to_owned(),
            suffix: spec.suffix().to_owned(),
            prefix_lower: spec.prefix().to_lowercase(),
            suffix_lower: spec.suffix().to_lowercase(),
            check_casing: spec.checksum_sensitive() && spec.letter_count() > 0,
        }
    }

    /// Tests a candidate address against the pattern.
    #[inline]
    pub fn matches(&self, address: &Address) -> bool {
        // Phase 1: case-insensitive. Zero-length prefix/suffix trivially match.
        let addr_hex = address.to_hex();
        if !addr_hex.starts_with(&self.prefix_lower) || !addr_hex.ends_with(&self.suffix_lower) {
            return false;
        }

        if !self.check_casing {
            return true;
        }

        // Phase 2: the EIP-55 form must carry the literal casing, byte for byte.
        let checksummed = address.to_checksum();
        checksummed.starts_with(&self.prefix) && checksummed.ends_with(&self.suffix)
    }
}
