//! Ethereum address representation and EIP-55 checksum encoding.

use std::fmt;

use tiny_keccak::{Hasher, Keccak};

/// An Ethereum address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the address as a lowercase 40-digit hex string (no 0x prefix).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the lowercase address with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Returns the EIP-55 mixed-case checksum form, without 0x prefix.
    ///
    /// The casing of each hex letter is decided by the corresponding nibble
    /// of the Keccak-256 hash of the lowercase hex address string: nibble
    /// value 8 or above means uppercase.
    pub fn to_checksum(&self) -> String {
        let hex_addr = self.to_hex();

        let mut hasher = Keccak::v256();
        hasher.update(hex_addr.as_bytes());
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        hex_addr
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let hash_byte = hash[i / 2];
                let nibble = if i % 2 == 0 {
                    hash_byte >> 4
                } else {
                    hash_byte & 0x0f
                };
                if c.is_ascii_alphabetic() && nibble >= 8 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }

    /// Returns the checksummed address with 0x prefix, the wallet-facing form.
    pub fn to_checksum_prefixed(&self) -> String {
        format!("0x{}", self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum_prefixed())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_prefixed())
    }
}
