//! The search loop and its caller-facing handle.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::crypto::{KeyError, Keypair};
use crate::matcher::Matcher;
use crate::spec::KeySpec;

use super::source::{KeySource, RandomKeySource};

/// Default wall-clock interval between progress events.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(100);

/// Events emitted by a running search, in order: zero or more `Progress`,
/// then exactly one terminal `Found` or `Failed` (a cancelled search emits
/// no terminal event; the channel simply closes).
#[derive(Debug)]
pub enum SearchEvent {
    /// Periodic statistics, throttled to the report interval.
    Progress {
        /// Cumulative attempts since start
        attempts: u64,
        /// Attempts per second over the whole run
        speed: f64,
    },
    /// A keypair whose address matches the target pattern.
    Found {
        keypair: Keypair,
        attempts: u64,
        speed: f64,
    },
    /// The random source failed; the search aborted. Distinct from
    /// cancellation, which emits nothing.
    Failed { error: KeyError },
}

/// Lifecycle of a search engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Created but not yet running (transient, before the worker starts)
    #[default]
    Idle,
    /// The worker loop is generating and testing keypairs
    Running,
    /// Terminal: a matching keypair was found
    Found,
    /// Terminal: cancelled, or aborted after a generation failure
    Stopped,
}

impl SearchState {
    fn from_u8(value: u8) -> Self {
        // Values come only from stores in this module
        match value {
            1 => SearchState::Running,
            2 => SearchState::Found,
            3 => SearchState::Stopped,
            _ => SearchState::Idle,
        }
    }
}

/// A single vanity address search running on its own worker thread.
///
/// Events arrive on [`events`](Self::events); [`stop`](Self::stop) cancels
/// cooperatively and is idempotent. Dropping the engine stops and joins the
/// worker.
pub struct SearchEngine {
    handle: Option<JoinHandle<()>>,
    event_rx: Receiver<SearchEvent>,
    stop_flag: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    started: Instant,
}

impl SearchEngine {
    /// Starts a search with the production random key source and the
    /// default report interval.
    pub fn start(spec: &KeySpec) -> Self {
        Self::start_with_source(spec, RandomKeySource::new(), DEFAULT_REPORT_INTERVAL)
    }

    /// Starts a search over an explicit key source and report interval.
    ///
    /// The attempt counter and timer reset to zero here; the loop begins on
    /// a dedicated worker thread so the caller is never blocked.
    pub fn start_with_source<S>(spec: &KeySpec, source: S, report_interval: Duration) -> Self
    where
        S: KeySource + Send + 'static,
    {
        let (event_tx, event_rx) = bounded(64);
        let stop_flag = Arc::new(AtomicBool::new(false));
        // Idle until the worker's first action flips it to Running
        let state = Arc::new(AtomicU8::new(SearchState::Idle as u8));
        let matcher = Matcher::compile(spec);

        let worker_stop = stop_flag.clone();
        let worker_state = state.clone();
        let handle = thread::Builder::new()
            .name("vanityseek-worker".into())
            .spawn(move || {
                run_search(
                    source,
                    matcher,
                    event_tx,
                    worker_stop,
                    worker_state,
                    report_interval,
                );
            })
            .expect("failed to spawn search worker thread");

        Self {
            handle: Some(handle),
            event_rx,
            stop_flag,
            state,
            started: Instant::now(),
        }
    }

    /// The event channel. Iterating it yields events until the worker
    /// terminates and drops its sender.
    pub fn events(&self) -> &Receiver<SearchEvent> {
        &self.event_rx
    }

    /// Waits up to `timeout` for the next event.
    pub fn next_event(&self, timeout: Duration) -> Option<SearchEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Receives an event without blocking.
    pub fn try_event(&self) -> Option<SearchEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Signals cancellation. The loop observes the flag within one
    /// generate-and-match cycle. Idempotent; a no-op once the search has
    /// found a match or already stopped.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SearchState {
        SearchState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Wall-clock time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns a clone of the stop flag for external use (e.g. signal
    /// handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Stops the search and waits for the worker to exit.
    pub fn join(mut self) {
        self.shutdown();
    }

    /// Stop, drain, join. Draining matters: the worker delivers terminal
    /// events with a blocking send, so a caller that stopped reading leaves
    /// it parked in `send` with a full buffer. Consuming the channel until
    /// the worker drops its sender lets that send complete and the join
    /// return.
    fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            while self.event_rx.recv().is_ok() {}
            let _ = handle.join();
        }
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// The worker loop: generate, count, match, report.
///
/// Terminal ordering invariant: the state cell is updated before the
/// terminal event is sent, and the sender is dropped on exit, so no event
/// can follow a terminal one.
fn run_search<S: KeySource>(
    mut source: S,
    matcher: Matcher,
    event_tx: Sender<SearchEvent>,
    stop_flag: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    report_interval: Duration,
) {
    state.store(SearchState::Running as u8, Ordering::Release);

    let started = Instant::now();
    let mut attempts: u64 = 0;
    let mut last_report = started;

    loop {
        // Cancellation is polled once per iteration, bounding stop latency
        // to a single generate-and-match cycle.
        if stop_flag.load(Ordering::Relaxed) {
            state.store(SearchState::Stopped as u8, Ordering::Release);
            return;
        }

        let keypair = match source.next_keypair() {
            Ok(keypair) => keypair,
            Err(error) => {
                state.store(SearchState::Stopped as u8, Ordering::Release);
                let _ = event_tx.send(SearchEvent::Failed { error });
                return;
            }
        };
        attempts += 1;

        if matcher.matches(keypair.address()) {
            let speed = speed_of(attempts, started.elapsed());
            state.store(SearchState::Found as u8, Ordering::Release);
            let _ = event_tx.send(SearchEvent::Found {
                keypair,
                attempts,
                speed,
            });
            return;
        }

        let now = Instant::now();
        if now.duration_since(last_report) >= report_interval {
            // Best-effort: a lagging caller loses a throttled tick rather
            // than stalling the loop.
            let _ = event_tx.try_send(SearchEvent::Progress {
                attempts,
                speed: speed_of(attempts, started.elapsed()),
            });
            last_report = now;
        }
    }
}

#[inline]
fn speed_of(attempts: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        attempts as f64 / secs
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::crypto::Address;

    fn addr(hex_str: &str) -> Address {
        let bytes = hex::decode(hex_str).unwrap().try_into().unwrap();
        Address::from_bytes(bytes)
    }

    fn keypair_with_address(hex_str: &str) -> Keypair {
        Keypair::from_parts([0x42; 32], addr(hex_str))
    }

    /// Yields a fixed sequence of keypairs, then errors out.
    struct Scripted {
        keys: VecDeque<Keypair>,
    }

    impl Scripted {
        fn new(addresses: &[&str]) -> Self {
            Self {
                keys: addresses.iter().map(|a| keypair_with_address(a)).collect(),
            }
        }
    }

    impl KeySource for Scripted {
        fn next_keypair(&mut self) -> Result<Keypair, KeyError> {
            self.keys
                .pop_front()
                .ok_or(KeyError::InvalidSecretKey(secp256k1::Error::InvalidSecretKey))
        }
    }

    /// Never matches anything; paces itself so cancellation tests get a
    /// chance to observe the Running state.
    struct Endless;

    impl KeySource for Endless {
        fn next_keypair(&mut self) -> Result<Keypair, KeyError> {
            thread::sleep(Duration::from_millis(1));
            Ok(keypair_with_address(
                "0000000000000000000000000000000000000000",
            ))
        }
    }

    fn spec(prefix: &str, suffix: &str, checksum: bool) -> KeySpec {
        KeySpec::new(prefix, suffix, checksum).unwrap()
    }

    #[test]
    fn emits_exactly_one_found_and_nothing_after() {
        let source = Scripted::new(&[
            "1111111111111111111111111111111111111111",
            "2222222222222222222222222222222222222222",
            "deadbeef00000000000000000000000000000000",
        ]);
        // Zero interval: every unmatched attempt reports progress
        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), source, Duration::ZERO);

        let events: Vec<SearchEvent> = engine.events().iter().collect();

        let found: Vec<&SearchEvent> = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Found { .. }))
            .collect();
        assert_eq!(found.len(), 1);

        // The found event is terminal: nothing follows it
        assert!(matches!(events.last(), Some(SearchEvent::Found { .. })));

        match events.last() {
            Some(SearchEvent::Found { keypair, attempts, .. }) => {
                assert!(keypair.address().to_hex().starts_with("dead"));
                assert_eq!(*attempts, 3);
            }
            other => panic!("expected Found, got {other:?}"),
        }

        assert_eq!(engine.state(), SearchState::Found);
    }

    #[test]
    fn progress_is_throttled_by_interval() {
        let source = Scripted::new(&[
            "1111111111111111111111111111111111111111",
            "2222222222222222222222222222222222222222",
            "3333333333333333333333333333333333333333",
            "4444444444444444444444444444444444444444",
            "deadbeef00000000000000000000000000000000",
        ]);
        // An unreachable interval suppresses every progress tick
        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), source, Duration::MAX);

        let events: Vec<SearchEvent> = engine.events().iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SearchEvent::Found { .. }));
    }

    #[test]
    fn stop_terminates_within_one_iteration() {
        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), Endless, Duration::MAX);
        engine.stop();

        // Drain: the channel must close without a Found event
        let events: Vec<SearchEvent> = engine.events().iter().collect();
        assert!(!events.iter().any(|e| matches!(e, SearchEvent::Found { .. })));
        assert_eq!(engine.state(), SearchState::Stopped);
    }

    #[test]
    fn stop_is_idempotent() {
        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), Endless, Duration::MAX);
        engine.stop();
        engine.stop();

        let events: Vec<SearchEvent> = engine.events().iter().collect();
        assert!(events.is_empty());
        assert_eq!(engine.state(), SearchState::Stopped);

        // Stopping a terminated engine stays a no-op
        engine.stop();
        assert_eq!(engine.state(), SearchState::Stopped);
    }

    #[test]
    fn stop_after_found_keeps_found_state() {
        let source = Scripted::new(&["deadbeef00000000000000000000000000000000"]);
        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), source, Duration::MAX);

        let events: Vec<SearchEvent> = engine.events().iter().collect();
        assert!(matches!(events.last(), Some(SearchEvent::Found { .. })));

        engine.stop();
        assert_eq!(engine.state(), SearchState::Found);
    }

    #[test]
    fn generator_failure_surfaces_as_failed_event() {
        // Script runs dry after two non-matching keys
        let source = Scripted::new(&[
            "1111111111111111111111111111111111111111",
            "2222222222222222222222222222222222222222",
        ]);
        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), source, Duration::MAX);

        let events: Vec<SearchEvent> = engine.events().iter().collect();
        assert!(matches!(events.last(), Some(SearchEvent::Failed { .. })));
        assert!(!events.iter().any(|e| matches!(e, SearchEvent::Found { .. })));
    }

    #[test]
    fn checksum_sensitive_search_skips_wrong_casing() {
        // EIP-55 form of the target is 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed;
        // a literal lowercase prefix must let it through only insensitively
        let hit = "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
        let engine = SearchEngine::start_with_source(
            &spec("5aAeb", "", true),
            Scripted::new(&[hit]),
            Duration::MAX,
        );
        let events: Vec<SearchEvent> = engine.events().iter().collect();
        assert!(matches!(events.last(), Some(SearchEvent::Found { .. })));

        let engine = SearchEngine::start_with_source(
            &spec("5AAEB", "", true),
            Scripted::new(&[hit]),
            Duration::MAX,
        );
        let events: Vec<SearchEvent> = engine.events().iter().collect();
        // Wrong casing: the only scripted key is rejected, script runs dry
        assert!(matches!(events.last(), Some(SearchEvent::Failed { .. })));
    }

    #[test]
    fn drop_completes_while_caller_never_reads_events() {
        // 200 unmatched attempts at zero interval overflow the 64-slot
        // event buffer before the hit, leaving the worker parked in the
        // blocking terminal send. Dropping the engine must still return.
        let mut addresses = vec!["1111111111111111111111111111111111111111"; 200];
        addresses.push("deadbeef00000000000000000000000000000000");
        let engine = SearchEngine::start_with_source(
            &spec("dead", "", false),
            Scripted::new(&addresses),
            Duration::ZERO,
        );

        // Let the worker fill the buffer and reach the terminal send
        thread::sleep(Duration::from_millis(50));

        let (done_tx, done_rx) = bounded(1);
        thread::spawn(move || {
            drop(engine);
            let _ = done_tx.send(());
        });
        assert!(
            done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
            "drop hung while the worker was blocked sending"
        );
    }

    #[test]
    fn state_starts_idle_and_reaches_running() {
        assert_eq!(SearchState::default(), SearchState::Idle);

        let engine =
            SearchEngine::start_with_source(&spec("dead", "", false), Endless, Duration::MAX);
        // The cell reads Idle until the worker thread is scheduled; its
        // first action flips it to Running
        while engine.state() == SearchState::Idle {
            thread::yield_now();
        }
        assert_eq!(engine.state(), SearchState::Running);
        engine.stop();
    }

    #[test]
    fn speed_guards_against_zero_elapsed() {
        assert_eq!(speed_of(100, Duration::ZERO), 0.0);
        assert!(speed_of(100, Duration::from_secs(2)) > 49.0);
    }

    #[test]
    fn random_source_reaches_found_on_empty_pattern() {
        // Difficulty 1: the very first random keypair matches
        let engine = SearchEngine::start(&spec("", "", false));
        let events: Vec<SearchEvent> = engine.events().iter().collect();
        match events.last() {
            Some(SearchEvent::Found { attempts, .. }) => assert_eq!(*attempts, 1),
            other => panic!("expected Found, got {other:?}"),
        }
    }
}
