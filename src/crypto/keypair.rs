//! Ethereum keypair generation.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use thiserror::Error;
use tiny_keccak::{Hasher, Keccak};

use super::Address;

/// Errors from keypair generation.
///
/// Random-source failure is fatal to a running search; there is nothing to
/// retry because every attempt needs fresh entropy.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("secure random source unavailable: {0}")]
    Rng(#[from] rand::Error),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(#[from] secp256k1::Error),
}

/// An Ethereum keypair: a 32-byte private key and its derived address.
#[derive(Debug, Clone)]
pub struct Keypair {
    secret_key: [u8; 32],
    address: Address,
}

impl Keypair {
    /// Generates a fresh random keypair.
    ///
    /// Draws 32 uniform bytes from the OS CSPRNG, rejection-sampling until
    /// they form a valid secp256k1 scalar (zero and above-order values are
    /// astronomically rare but rejected all the same).
    pub fn generate(secp: &Secp256k1<All>) -> Result<Self, KeyError> {
        let mut bytes = [0u8; 32];
        let secret_key = loop {
            OsRng.try_fill_bytes(&mut bytes)?;
            if let Ok(key) = SecretKey::from_slice(&bytes) {
                break key;
            }
        };

        let public_key = PublicKey::from_secret_key(secp, &secret_key);
        Ok(Self {
            secret_key: secret_key.secret_bytes(),
            address: Self::derive_address(&public_key),
        })
    }

    /// Builds a keypair from an existing secret key.
    pub fn from_secret_key(
        secp: &Secp256k1<All>,
        secret_bytes: [u8; 32],
    ) -> Result<Self, KeyError> {
        let secret_key = SecretKey::from_slice(&secret_bytes)?;
        let public_key = PublicKey::from_secret_key(secp, &secret_key);
        Ok(Self {
            secret_key: secret_bytes,
            address: Self::derive_address(&public_key),
        })
    }

    /// Assembles a keypair from pre-derived parts. Scripted key sources in
    /// engine tests need addresses that no real secret key maps to.
    #[cfg(test)]
    pub(crate) fn from_parts(secret_key: [u8; 32], address: Address) -> Self {
        Self {
            secret_key,
            address,
        }
    }

    /// Derives an Ethereum address from a secp256k1 public key.
    ///
    /// Standard derivation: uncompressed public key (65 bytes) minus the
    /// 0x04 tag, Keccak-256 over the remaining 64 bytes, last 20 bytes of
    /// the hash.
    #[inline]
    fn derive_address(public_key: &PublicKey) -> Address {
        let public_key_bytes = public_key.serialize_uncompressed();

        let mut hasher = Keccak::v256();
        hasher.update(&public_key_bytes[1..]);
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        let mut address_bytes = [0u8; 20];
        address_bytes.copy_from_slice(&hash[12..]);
        Address::from_bytes(address_bytes)
    }

    /// Returns the private key as a hex string (no 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; 32] {
        &self.secret_key
    }

    /// Returns the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}
