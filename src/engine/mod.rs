//! Search engine: the generate-and-match loop.
//!
//! This module provides:
//! - A dedicated worker thread driving keypair generation and matching
//! - Asynchronous progress/found/failed events over a channel
//! - Cooperative cancellation with bounded stop latency
//!
//! The engine owns its attempt counter and timer exclusively; the only data
//! crossing the thread boundary are events, the stop flag, and the state
//! cell.

mod search;
mod source;

pub use search::{SearchEngine, SearchEvent, SearchState, DEFAULT_REPORT_INTERVAL};
pub use source::{KeySource, RandomKeySource};
