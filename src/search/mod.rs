// src/search/mod.rs

//! Orchestrates one full Grover run over a database table: allocation,
//! state preparation, amplification, measurement and cleanup.

mod config;
mod outcome;

pub use config::SearchConfig;
pub use outcome::SearchOutcome;

use crate::circuits::Circuit;
use crate::core::GroverError;
use crate::database::DatabaseTable;
use crate::oracles::{OracleBuilder, SearchRegisters};
use crate::reflections::{reflect_marked, reflect_start};
use crate::simulation::{MeasurementResult, Sampler, SimulationEngine};
use rand::Rng;
use std::f64::consts::PI;
use tracing::debug;

/// `RunCircuit`: state preparation followed by `iterations` Grover iterates,
/// each `ReflectMarked` then `ReflectStart`.
///
/// `iterations = 0` leaves the plain prepared state, which samples like one
/// classical random guess. Iteration counts past [`optimal_iterations`] are
/// accepted and rotate the state away from the target again.
pub fn run_circuit(
    iterations: usize,
    registers: &SearchRegisters,
    table: &DatabaseTable,
    search_value: u64,
) -> Result<Circuit, GroverError> {
    let oracles = OracleBuilder::new(table, registers, search_value);
    let mut circuit = oracles.state_preparation()?;

    let mut iterate = reflect_marked(registers.marked);
    iterate.append(&reflect_start(&oracles)?);
    for _ in 0..iterations {
        circuit.append(&iterate);
    }
    Ok(circuit)
}

/// A validated search configuration ready to run.
#[derive(Debug, Clone)]
pub struct GroverSearch {
    config: SearchConfig,
}

impl GroverSearch {
    /// Validates `config`. Nothing is allocated yet.
    pub fn new(config: SearchConfig) -> Result<Self, GroverError> {
        config.validate()?;
        debug!(
            key_qubits = config.key_qubits,
            value_qubits = config.value_qubits,
            search_value = config.search_value,
            iterations = config.iterations,
            "search configuration accepted"
        );
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs once: allocate `[marked] + key + value`, apply the circuit,
    /// measure marked, key and value in that order, reset measured ones,
    /// release all qubits.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<SearchOutcome, GroverError> {
        let config = &self.config;
        let mut engine = SimulationEngine::init(config.total_qubits(), config.engine_options())?;

        let marked = engine.allocate(1)?;
        let registers = SearchRegisters {
            marked: marked.qubits()[0],
            key: engine.allocate(config.key_qubits)?,
            value: engine.allocate(config.value_qubits)?,
        };
        debug!(key = %registers.key, value = %registers.value, "registers allocated");

        let circuit = run_circuit(config.iterations, &registers, &config.table, config.search_value)?;
        engine.apply_circuit(&circuit)?;
        debug!(gates = engine.gates_applied(), "search circuit applied");

        let mut sampler = Sampler::new(rng);
        let mut result = MeasurementResult::new();
        let marked_bits = sampler.measure_register(&mut engine, &marked, &mut result)?;
        let key_bits = sampler.measure_register(&mut engine, &registers.key, &mut result)?;
        let value_bits = sampler.measure_register(&mut engine, &registers.value, &mut result)?;

        sampler.reset(&mut engine, &result)?;
        engine.release(&registers.all())?;

        let outcome = SearchOutcome {
            marked: marked_bits[0],
            key_bits,
            value_bits,
        };
        debug!(%outcome, "search run finished");
        Ok(outcome)
    }
}

/// `RunSearch`: validates `config`, then performs one run.
///
/// Either the whole outcome is returned or exactly one error; configuration
/// and resource errors surface before any amplitude is allocated.
pub fn run_search<R: Rng>(config: &SearchConfig, rng: &mut R) -> Result<SearchOutcome, GroverError> {
    GroverSearch::new(config.clone())?.run(rng)
}

/// `θ = arcsin(1/√N)` for `N = 2^n_key_qubits`.
///
/// Past 1023 key qubits `N` is no longer a finite `f64` and `θ` is 0.
pub fn rotation_angle(n_key_qubits: usize) -> f64 {
    let exponent = i32::try_from(n_key_qubits).unwrap_or(i32::MAX);
    let n = 2f64.powi(exponent);
    (1.0 / n.sqrt()).asin()
}

/// Probability of sampling the marked branch after `iterations` iterates:
/// `sin²((2k + 1)·θ)`.
pub fn theoretical_success_probability(n_key_qubits: usize, iterations: usize) -> f64 {
    let theta = rotation_angle(n_key_qubits);
    ((2.0 * iterations as f64 + 1.0) * theta).sin().powi(2)
}

/// Iteration count maximizing success: `round(π / (4θ) − 1/2)`.
///
/// Saturates at `usize::MAX` once `θ` underflows to 0.
pub fn optimal_iterations(n_key_qubits: usize) -> usize {
    let theta = rotation_angle(n_key_qubits);
    (PI / (4.0 * theta) - 0.5).round().max(0.0) as usize
}
