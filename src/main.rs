//! Pokedex - an interactive PokeAPI client
//!
//! Browses location areas and pokemon from a REPL backed by a TTL response
//! cache.

use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{Cache, Config, PokeApiClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its sweeper
/// 4. Create the PokeAPI client around the cache
/// 5. Run the REPL on stdin/stdout until `exit`, EOF or Ctrl+C
/// 6. Log cache statistics and stop the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so log lines do not interleave with REPL output,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: ttl={}s, sweep_interval={:?}, api={}",
        config.cache_ttl_secs,
        config.sweep_interval(),
        config.api_base_url
    );

    let cache = Cache::from_config(&config);
    let client = PokeApiClient::from_config(&config, cache.clone())?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    let interrupted = tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => {
            result?;
            false
        }
        _ = shutdown_signal() => true,
    };

    let stats = cache.stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        expirations = stats.expirations,
        entries = stats.total_entries,
        hit_rate = stats.hit_rate(),
        "Cache statistics"
    );

    cache.shutdown().await;
    info!("Pokedex closed");

    if interrupted {
        // The blocking stdin reader would keep the runtime alive.
        std::process::exit(0);
    }
    Ok(())
}

/// Waits for Ctrl+C.
async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down...");
    } else {
        // No handler could be installed; rely on exit/EOF instead.
        std::future::pending::<()>().await;
    }
}
