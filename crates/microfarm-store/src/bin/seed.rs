//! # Store Seeder
//!
//! Initializes a file-backed store directory with the bootstrap catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default directory (./data)
//! cargo run -p microfarm-store --bin seed
//!
//! # Seed a specific directory
//! cargo run -p microfarm-store --bin seed -- /tmp/microfarm
//! ```
//!
//! Seeding is just the first read: repositories persist their defaults
//! when they find nothing stored, so this binary only has to touch each
//! record family once and report what landed.

use std::env;
use std::process::ExitCode;

use tracing::info;

use microfarm_store::{
    EquipmentRepository, ProductRepository, ReviewRepository, Store, StoreResult,
};

fn run(dir: &str) -> StoreResult<()> {
    let store = Store::open(dir)?;

    let products = ProductRepository::new(store.clone()).all();
    let equipment = EquipmentRepository::new(store.clone()).all();
    let reviews = ReviewRepository::new(store.clone()).all();

    info!(dir, "store seeded");
    info!(
        products = products.len(),
        equipment = equipment.len(),
        reviews = reviews.len(),
        bytes = store.used_bytes(),
        "record counts"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let dir = env::args().nth(1).unwrap_or_else(|| "./data".to_string());
    match run(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("seed failed: {err}");
            ExitCode::FAILURE
        }
    }
}
