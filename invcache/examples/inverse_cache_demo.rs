//! Inverse Cache Demo Application
//!
//! Walks a slot through miss, hit, invalidation and failure, then dumps the
//! slot statistics.
//!
//! Usage:
//!   RUST_LOG=invcache=debug cargo run --example inverse_cache_demo
//!
//! Environment variables (also read from `.env`):
//!   INVCACHE_PIVOT_TOLERANCE - singular pivot tolerance (default: 1e-12)
//!   INVCACHE_PIVOTING        - partial | diagonal (default: partial)
//!   INVCACHE_CHECK_FINITE    - reject NaN/inf input (default: true)

use invcache::{CacheSlot, CachedSolver, InvertOptions};
use ndarray::array;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("=== Inverse Cache Demo ===");

    let options = InvertOptions::from_env()?;
    info!("Inversion options: {:?}", options);

    let solver: CachedSolver = CachedSolver::default();
    let mut slot = CacheSlot::new(array![[2.0, 0.0], [0.0, 2.0]]);

    info!("\n--- First solve (miss) ---");
    let inverse = solver.solve(&mut slot, &options)?;
    info!("Inverse:\n{}", inverse);

    info!("\n--- Second solve (hit) ---");
    let inverse = solver.solve(&mut slot, &options)?;
    info!("Inverse:\n{}", inverse);
    info!("State: {}", slot.state());

    info!("\n--- Replace input ---");
    slot.set_input(array![[4.0, 7.0], [2.0, 6.0]]);
    info!("State after set_input: {}", slot.state());
    let inverse = solver.solve(&mut slot, &options)?;
    info!("Inverse:\n{}", inverse);

    info!("\n--- Singular input ---");
    slot.set_input(array![[1.0, 2.0], [2.0, 4.0]]);
    match solver.solve(&mut slot, &options) {
        Ok(_) => info!("✗ Unexpectedly inverted a singular matrix"),
        Err(e) => info!("✓ Failure propagated: {}", e),
    }
    info!("State after failure: {}", slot.state());

    info!("\n--- Statistics ---");
    info!("{}", slot.stats());
    let json = serde_json::to_string_pretty(slot.stats())?;
    info!("Stats as JSON:\n{}", json);

    Ok(())
}
