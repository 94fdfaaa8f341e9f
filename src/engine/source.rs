//! Keypair sources feeding the search loop.

use secp256k1::{All, Secp256k1};

use crate::crypto::{KeyError, Keypair};

/// Supplies candidate keypairs to the search loop, one per attempt.
///
/// The production implementation is [`RandomKeySource`]; tests drive the
/// loop with scripted sources instead.
pub trait KeySource {
    fn next_keypair(&mut self) -> Result<Keypair, KeyError>;
}

/// Generates fresh random keypairs from the OS CSPRNG.
///
/// Holds a secp256k1 context so it is built once per search rather than per
/// attempt.
pub struct RandomKeySource {
    secp: Secp256k1<All>,
}

impl RandomKeySource {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for RandomKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for RandomKeySource {
    #[inline]
    fn next_keypair(&mut self) -> Result<Keypair, KeyError> {
        Keypair::generate(&self.secp)
    }
}
