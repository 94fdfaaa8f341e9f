//! Target pattern specification.

use rand::Rng;
use thiserror::Error;

/// Maximum combined prefix + suffix length. Two characters of the 40-digit
/// address are always left free so every pattern remains satisfiable by more
/// than a handful of addresses.
pub const MAX_PATTERN_LEN: usize = 38;

/// Errors produced while validating a target pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("{part} contains non-hex character {found:?} (allowed: 0-9, a-f, A-F)")]
    InvalidHex { part: &'static str, found: char },

    #[error("combined prefix + suffix is {len} characters, maximum is {MAX_PATTERN_LEN}")]
    PatternTooLong { len: usize },
}

/// A validated vanity address target: a hex prefix and suffix, plus a flag
/// selecting EIP-55 checksum-sensitive matching.
///
/// Construction validates, so an in-hand `KeySpec` is always well-formed.
/// The literal casing of `prefix` and `suffix` is preserved; it decides the
/// required address casing when `checksum_sensitive` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    prefix: String,
    suffix: String,
    checksum_sensitive: bool,
}

impl KeySpec {
    /// Creates a validated spec from raw caller input.
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        checksum_sensitive: bool,
    ) -> Result<Self, SpecError> {
        let prefix = prefix.into();
        let suffix = suffix.into();

        Self::check_hex(&prefix, "prefix")?;
        Self::check_hex(&suffix, "suffix")?;

        let len = prefix.len() + suffix.len();
        if len > MAX_PATTERN_LEN {
            return Err(SpecError::PatternTooLong { len });
        }

        Ok(Self {
            prefix,
            suffix,
            checksum_sensitive,
        })
    }

    fn check_hex(s: &str, part: &'static str) -> Result<(), SpecError> {
        match s.chars().find(|c| !c.is_ascii_hexdigit()) {
            Some(found) => Err(SpecError::InvalidHex { part, found }),
            None => Ok(()),
        }
    }

    /// The target prefix, literal casing preserved.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The target suffix, literal casing preserved.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether matching must honor EIP-55 checksum casing.
    pub fn checksum_sensitive(&self) -> bool {
        self.checksum_sensitive
    }

    /// Combined pattern length in hex digits.
    pub fn pattern_len(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }

    /// Count of alphabetic hex digits (`a-f`/`A-F`) across prefix and suffix.
    /// Decimal digits carry no casing ambiguity and do not count.
    pub fn letter_count(&self) -> usize {
        self.prefix
            .chars()
            .chain(self.suffix.chars())
            .filter(|c| c.is_ascii_alphabetic())
            .count()
    }

    /// Renders a plausible sample address for this pattern, for display.
    ///
    /// The prefix/suffix appear literally when checksum-sensitive and with
    /// randomly mixed casing otherwise; the middle is random hex filler.
    pub fn example_address(&self) -> String {
        fn mix_case(s: &str, rng: &mut impl Rng) -> String {
            s.chars()
                .map(|c| {
                    if rng.gen_bool(0.5) {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect()
        }

        let mut rng = rand::thread_rng();

        let head = if self.checksum_sensitive {
            self.prefix.clone()
        } else {
            mix_case(&self.prefix, &mut rng)
        };
        let tail = if self.checksum_sensitive {
            self.suffix.clone()
        } else {
            mix_case(&self.suffix, &mut rng)
        };

        let filler: String = (0..40 - self.pattern_len())
            .map(|_| {
                let digit = char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0');
                if rng.gen_bool(0.5) {
                    digit.to_ascii_uppercase()
                } else {
                    digit
                }
            })
            .collect();

        format!("0x{head}{filler}{tail}")
    }
}
