//! # vanityseek
//!
//! Brute-force Ethereum vanity address search engine.
//!
//! Given a target pattern (hex prefix/suffix, optionally EIP-55
//! checksum-sensitive), the engine generates random keypairs on a dedicated
//! worker thread until one whose derived address matches the pattern is
//! found, streaming throttled progress statistics to the caller and honoring
//! cooperative cancellation.
//!
//! ## Architecture
//!
//! - `spec`: Target pattern specification and validation
//! - `crypto`: Key generation and address derivation
//! - `matcher`: Case-insensitive and checksum-aware pattern matching
//! - `engine`: Search loop, event channel, cancellation
//! - `stats`: Difficulty and expected-duration estimation
//! - `config`: Runtime configuration for the CLI

pub mod config;
pub mod crypto;
pub mod engine;
pub mod matcher;
pub mod spec;
pub mod stats;

pub use config::Config;
pub use crypto::{Address, KeyError, Keypair};
pub use engine::{KeySource, RandomKeySource, SearchEngine, SearchEvent, SearchState};
pub use matcher::Matcher;
pub use spec::{KeySpec, SpecError};
pub use stats::DifficultyEstimate;
