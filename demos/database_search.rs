// demos/database_search.rs
//! Repeated Grover search over a small classical table.
//!
//! Runs the search many times and compares the observed success rate with
//! `sin²((2k + 1)·θ)`.
//!
//! ```text
//! cargo run --example database_search -- --runs 500 --iterations 1
//! RUST_LOG=onq_grover=debug cargo run --example database_search -- --config search.toml
//! ```

use clap::Parser;
use onq_grover::{
    DatabaseTable, GroverError, GroverSearch, SearchConfig, optimal_iterations,
    theoretical_success_probability,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "database_search")]
#[command(about = "Grover search over a classical key/value table", long_about = None)]
struct Cli {
    /// TOML search configuration; flags below override its fields
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grover iterations per run (defaults to the optimal count)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Number of independent runs
    #[arg(short, long, default_value = "100")]
    runs: usize,

    /// Value to search for
    #[arg(short, long)]
    search_value: Option<u64>,

    /// Table values, comma separated, indexed by key
    #[arg(long, value_delimiter = ',')]
    table: Option<Vec<u64>>,

    /// Bits per value
    #[arg(long)]
    value_qubits: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Check normalization after every gate
    #[arg(long)]
    validate: bool,
}

fn build_config(cli: &Cli) -> Result<SearchConfig, GroverError> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_toml_file(path)?,
        None => SearchConfig::default(),
    };
    if let Some(values) = &cli.table {
        let table = DatabaseTable::new(values.clone());
        config.key_qubits = table.len().max(1).next_power_of_two().trailing_zeros() as usize;
        config.table = table;
    }
    if let Some(value_qubits) = cli.value_qubits {
        config.value_qubits = value_qubits;
    }
    if let Some(search_value) = cli.search_value {
        config.search_value = search_value;
    }
    config.iterations = cli
        .iterations
        .unwrap_or_else(|| optimal_iterations(config.key_qubits));
    config.validate_each_gate |= cli.validate;
    Ok(config)
}

fn main() -> Result<(), GroverError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "database_search=info,onq_grover=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let search = GroverSearch::new(config)?;
    let config = search.config();
    info!(
        table = %config.table,
        search_value = config.search_value,
        iterations = config.iterations,
        qubits = config.total_qubits(),
        "starting search"
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut successes = 0usize;
    let mut keys: BTreeMap<u64, usize> = BTreeMap::new();
    for run in 0..cli.runs {
        let outcome = search.run(&mut rng)?;
        if !outcome.matches_table(&config.table) {
            warn!(run, %outcome, "outcome disagrees with table");
        }
        if outcome.is_success() {
            successes += 1;
            *keys.entry(outcome.key()).or_default() += 1;
        }
    }

    let rate = successes as f64 / cli.runs.max(1) as f64;
    let expected = theoretical_success_probability(config.key_qubits, config.iterations);
    println!("--- Grover Search ---");
    println!("Table:        {}", config.table);
    println!("Search value: {}", config.search_value);
    println!(
        "Iterations:   {} (optimal {})",
        config.iterations,
        optimal_iterations(config.key_qubits)
    );
    println!("Runs:         {}", cli.runs);
    println!("Success rate: {:.4} (theory {:.4})", rate, expected);
    for (key, count) in &keys {
        println!("  key {} found {} times", key, count);
    }
    Ok(())
}
