// src/lib.rs

//! `onq-grover` - Grover search over a classical key/value table
//!
//! The whole run is an exact state-vector simulation: one dense vector of
//! complex amplitudes per run, evolved by bit-flips, phase shifts and
//! Hadamards (optionally multi-controlled), then sampled.
//!
//! The circuit is fixed: prepare `|marked⟩|key⟩|value⟩` with a uniform
//! superposition over keys, load the table into the value register, flag
//! the searched value, then repeat `ReflectMarked` / `ReflectStart`.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod database;
pub mod oracles;
pub mod reflections;
pub mod simulation;
pub mod search;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{GroverError, QubitId, Register, StateVector, bits_to_int, int_to_bits};
pub use operations::{Control, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use database::DatabaseTable;
pub use oracles::{OracleBuilder, SearchRegisters};
pub use simulation::{EngineOptions, MeasurementResult, Sampler, SimulationEngine, Simulator};
pub use search::{
    GroverSearch, SearchConfig, SearchOutcome, optimal_iterations, run_circuit, run_search,
    theoretical_success_probability,
};
pub use validation::{check_normalization, validate_state};

// Example 1: One iteration on the sample table
// With 2 key qubits a single Grover iterate rotates all amplitude onto the
// marked branch, so every run finds key 1 (which stores value 2).
/// ```
/// use onq_grover::{run_search, SearchConfig, GroverError};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let config = SearchConfig::default(); // table {0→3, 1→2, 2→0, 3→1}, search value 2
/// let mut rng = StdRng::seed_from_u64(2024);
///
/// for _ in 0..10 {
///     let outcome = run_search(&config, &mut rng)?;
///     println!("{}", outcome);
///     assert!(outcome.marked);
///     assert_eq!(outcome.key(), 1);
///     assert_eq!(outcome.value(), 2);
/// }
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Building and inverting the state preparation oracle by hand
// Shows the register layout and that the adjoint undoes the oracle.
/// ```
/// use onq_grover::{DatabaseTable, EngineOptions, OracleBuilder, SearchRegisters, SimulationEngine};
///
/// let mut engine = SimulationEngine::init(5, EngineOptions::default()).unwrap();
/// let marked = engine.allocate(1).unwrap().qubits()[0];
/// let registers = SearchRegisters {
///     marked,
///     key: engine.allocate(2).unwrap(),
///     value: engine.allocate(2).unwrap(),
/// };
/// let table = DatabaseTable::sample();
/// let prep = OracleBuilder::new(&table, &registers, 2).state_preparation().unwrap();
/// println!("{}", prep);
///
/// engine.apply_circuit(&prep).unwrap();
/// // sin²θ = 1/4 of the weight sits on |1⟩|01⟩|10⟩ (basis index 0b10110)
/// assert!((engine.state().probability_of(0b10110) - 0.25).abs() < 1e-12);
///
/// engine.apply_circuit(&prep.adjoint()).unwrap();
/// assert!((engine.state().probability_of(0) - 1.0).abs() < 1e-12);
/// ```
#[doc(hidden)]
const _: () = ();
