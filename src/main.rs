//! Traced Cache - demonstration binary
//!
//! Connects an instrumented cache to a fresh in-memory backend, walks through
//! the store/get operations, then replays the recorded call history.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use traced_cache::{Cache, Config, MethodId};

/// Entry point for the demonstration walkthrough.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache (flushes the backend)
/// 4. Store and retrieve one value of each supported type
/// 5. Replay the recorded calls for both methods
fn main() -> Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traced_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Traced Cache walkthrough");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_value_size={}, call_counts={}, call_history={}",
        config.max_value_size, config.enable_call_counts, config.enable_call_history
    );

    let cache = Cache::from_config(&config)?;
    info!("Cache connected");

    let text_key = cache.store("foo")?;
    let bytes_key = cache.store(b"raw bytes".as_slice())?;
    let int_key = cache.store(42i64)?;
    let float_key = cache.store(3.14f64)?;

    println!("get_str({}) = {:?}", text_key, cache.get_str(&text_key)?);
    println!("get({}) = {:?}", bytes_key, cache.get(&bytes_key)?);
    println!("get_int({}) = {:?}", int_key, cache.get_int(&int_key)?);
    println!("get_str({}) = {:?}", float_key, cache.get_str(&float_key)?);
    println!("get(unknown) = {:?}", cache.get("unknown")?);

    if config.enable_call_counts {
        for method in [MethodId::Store, MethodId::Get] {
            cache.replay(method)?;
        }

        // Same report, machine-readable
        let report = cache.replay_report(MethodId::Store)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!("Walkthrough complete");
    Ok(())
}
