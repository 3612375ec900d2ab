// tests/search_tests.rs

use onq_grover::{
    DatabaseTable, GroverError, GroverSearch, SearchConfig, run_search, theoretical_success_probability,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn success_rate(config: &SearchConfig, runs: usize, seed: u64) -> Result<f64, GroverError> {
    let search = GroverSearch::new(config.clone())?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut successes = 0usize;
    for _ in 0..runs {
        if search.run(&mut rng)?.is_success() {
            successes += 1;
        }
    }
    Ok(successes as f64 / runs as f64)
}

fn three_key_config(iterations: usize) -> SearchConfig {
    SearchConfig {
        iterations,
        key_qubits: 3,
        value_qubits: 3,
        search_value: 6,
        table: DatabaseTable::new(vec![4, 7, 0, 6, 1, 5, 3, 2]),
        ..SearchConfig::default()
    }
}

// Zero iterations behave like one classical random guess: 1/N
#[test]
fn test_zero_iterations_matches_classical_baseline() -> Result<(), GroverError> {
    let config = SearchConfig { iterations: 0, ..SearchConfig::default() };
    let rate = success_rate(&config, 4000, 11)?;
    assert!((rate - 0.25).abs() < 0.03, "rate {}", rate);

    let rate = success_rate(&three_key_config(0), 4000, 12)?;
    assert!((rate - 0.125).abs() < 0.025, "rate {}", rate);
    Ok(())
}

// sin²(3·arcsin(1/2)) = 1: every run succeeds
#[test]
fn test_one_iteration_on_sample_table_always_succeeds() -> Result<(), GroverError> {
    let config = SearchConfig { iterations: 1, search_value: 2, ..SearchConfig::default() };
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let outcome = run_search(&config, &mut rng)?;
        assert!(outcome.marked);
        assert_eq!(outcome.key(), 1);
        assert_eq!(outcome.value(), 2);
        assert_eq!(outcome.key_bits, vec![false, true]);
        assert_eq!(outcome.value_bits, vec![true, false]);
    }
    Ok(())
}

#[test]
fn test_every_search_value_is_found_with_one_iteration() -> Result<(), GroverError> {
    let table = DatabaseTable::sample();
    let mut rng = StdRng::seed_from_u64(8);
    for (key, value) in table.entries() {
        let config = SearchConfig { search_value: value, ..SearchConfig::default() };
        for _ in 0..20 {
            let outcome = run_search(&config, &mut rng)?;
            assert!(outcome.marked);
            assert_eq!(outcome.key(), key);
        }
    }
    Ok(())
}

// Sampled key and value always agree with the table
#[test]
fn test_outcomes_are_consistent_with_table() -> Result<(), GroverError> {
    let mut rng = StdRng::seed_from_u64(21);
    for iterations in 0..4 {
        for config in [SearchConfig { iterations, ..SearchConfig::default() }, three_key_config(iterations)] {
            for _ in 0..100 {
                let outcome = run_search(&config, &mut rng)?;
                assert!(outcome.matches_table(&config.table), "{} for table {}", outcome, config.table);
                if outcome.marked {
                    assert_eq!(outcome.value(), config.search_value);
                } else {
                    assert_ne!(outcome.value(), config.search_value);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_empirical_rate_tracks_theory() -> Result<(), GroverError> {
    for iterations in 0..4 {
        let expected = theoretical_success_probability(3, iterations);
        let rate = success_rate(&three_key_config(iterations), 2000, 100 + iterations as u64)?;
        assert!((rate - expected).abs() < 0.05, "iterations {}: rate {} expected {}", iterations, rate, expected);
    }
    Ok(())
}

#[test]
fn test_runs_are_reproducible_from_seed() -> Result<(), GroverError> {
    let config = three_key_config(1);
    let sample = |seed| -> Result<Vec<_>, GroverError> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50).map(|_| run_search(&config, &mut rng)).collect()
    };
    assert_eq!(sample(5)?, sample(5)?);
    Ok(())
}

// Out-of-range search values fail before anything is allocated
#[test]
fn test_search_value_out_of_range_fails_fast() {
    let mut rng = StdRng::seed_from_u64(0);
    let config = SearchConfig { search_value: 4, ..SearchConfig::default() };
    assert!(matches!(run_search(&config, &mut rng), Err(GroverError::Configuration { .. })));

    // even when the registers would be far too large to simulate
    let huge = SearchConfig { key_qubits: 40, value_qubits: 2, search_value: 9, ..SearchConfig::default() };
    assert!(matches!(run_search(&huge, &mut rng), Err(GroverError::Configuration { .. })));
}

#[test]
fn test_oversized_configuration_is_resource_exhaustion() {
    let mut rng = StdRng::seed_from_u64(0);
    let config = SearchConfig { key_qubits: 40, value_qubits: 40, search_value: 1, ..SearchConfig::default() };
    assert!(matches!(run_search(&config, &mut rng), Err(GroverError::ResourceExhaustion { .. })));
}

#[test]
fn test_invalid_tables_are_configuration_errors() {
    let mut rng = StdRng::seed_from_u64(0);
    for table in [vec![0, 1, 2], vec![0, 1, 1, 3], vec![0, 1, 2, 9]] {
        let config = SearchConfig { table: DatabaseTable::new(table), ..SearchConfig::default() };
        assert!(matches!(run_search(&config, &mut rng), Err(GroverError::Configuration { .. })));
    }
}

#[test]
fn test_per_gate_validation_run() -> Result<(), GroverError> {
    let config = SearchConfig { validate_each_gate: true, iterations: 3, ..three_key_config(0) };
    let mut rng = StdRng::seed_from_u64(44);
    let outcome = run_search(&config, &mut rng)?;
    assert!(outcome.matches_table(&config.table));
    Ok(())
}

#[test]
fn test_config_from_toml_drives_a_run() -> Result<(), GroverError> {
    let config = SearchConfig::from_toml_str(
        r#"
        iterations = 1
        key_qubits = 2
        value_qubits = 3
        search_value = 5
        table = [1, 5, 2, 7]
        "#,
    )?;
    let mut rng = StdRng::seed_from_u64(3);
    let outcome = run_search(&config, &mut rng)?;
    assert!(outcome.marked);
    assert_eq!(outcome.key(), 1);
    Ok(())
}
