// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod register;
pub mod state;
pub mod bits;

// Re-export public types for convenient access via `onq_grover::core::TypeName`
pub use error::{GroverError, QubitId};
pub use register::Register;
pub use state::{StateVector, fidelity};
pub use bits::{bits_to_int, int_to_bits};

pub mod constants;
pub use constants::grover_constants::{
    DEFAULT_MAX_QUBITS, HARD_MAX_QUBITS, MIN_REALIZED_PROBABILITY, NORM_TOLERANCE, PI,
}; // Re-export
