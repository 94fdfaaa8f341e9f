//! Cryptographic operations for Ethereum key and address generation.
//!
//! This module provides:
//! - Secure random key generation using secp256k1 and the OS CSPRNG
//! - Ethereum address derivation using Keccak-256
//! - EIP-55 checksum encoding

mod address;
mod keypair;

pub use address::Address;
pub use keypair::{KeyError, Keypair};
