//! Vanity address search CLI
//!
//! Usage:
//!   vanityseek -p dead            # Find an address starting with "dead"
//!   vanityseek -s beef            # Find an address ending with "beef"
//!   vanityseek -p DeaD -c         # Require exact EIP-55 casing

use std::process;

use clap::Parser;

use vanityseek::{stats, Config, RandomKeySource, SearchEngine, SearchEvent};

fn main() {
    let config = Config::parse();

    let spec = match config.to_spec() {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Invalid pattern: {e}");
            process::exit(1);
        }
    };

    let estimate = stats::estimate(&spec, config.assumed_speed);

    println!("Vanity Address Search");
    println!("=====================");
    println!("Pattern:     prefix {:?}, suffix {:?}", spec.prefix(), spec.suffix());
    println!("Checksum:    {}", if spec.checksum_sensitive() { "exact casing" } else { "any casing" });
    println!("Example:     {}", spec.example_address());
    println!("Difficulty:  {}", stats::format_count(estimate.difficulty));
    println!(
        "50% chance:  {} attempts, ~{} at {} addr/s",
        stats::format_count(estimate.attempts_for_p50 as f64),
        estimate.estimated_duration,
        stats::format_count(config.assumed_speed),
    );
    println!();

    let engine =
        SearchEngine::start_with_source(&spec, RandomKeySource::new(), config.report_interval());

    // Ctrl-C requests a cooperative stop; the worker observes it within one
    // generate-and-match cycle
    let stop_flag = engine.stop_flag_clone();
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, std::sync::atomic::Ordering::Relaxed);
    }) {
        eprintln!("Warning: could not install Ctrl-C handler: {e}");
    }

    println!("Searching... (Press Ctrl+C to stop)\n");

    let mut failed = false;
    let mut found = false;

    for event in engine.events() {
        match event {
            SearchEvent::Progress { attempts, speed } => {
                println!(
                    "[{:>5.1}s] {} attempts ({}/s), 50% in ~{}",
                    engine.elapsed().as_secs_f64(),
                    stats::format_count(attempts as f64),
                    stats::format_count(speed),
                    stats::estimate(&spec, speed).estimated_duration,
                );
            }
            SearchEvent::Found { keypair, attempts, speed } => {
                println!("\n=== Match found ===");
                println!("Address:     {}", keypair.address());
                println!("Private Key: {}", keypair.private_key_hex());
                println!(
                    "Attempts:    {} ({}/s)",
                    stats::format_count(attempts as f64),
                    stats::format_count(speed),
                );
                found = true;
            }
            SearchEvent::Failed { error } => {
                eprintln!("\nSearch aborted: {error}");
                failed = true;
            }
        }
    }

    if !found && !failed {
        println!("\nStopped by user.");
    }
    println!("Time elapsed: {:.2}s", engine.elapsed().as_secs_f64());

    engine.join();

    if failed {
        process::exit(1);
    }
}
