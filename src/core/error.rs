//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Positional index of a simulated qubit inside the shared amplitude vector.
/// A qubit has no storage of its own: index 0 carries the most significant
/// bit of every basis index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types raised by the search pipeline.
///
/// `Configuration` and `ResourceExhaustion` are detected before any amplitude
/// vector exists. `Allocation` and `NumericalConsistency` abort the run that
/// raised them; the amplitude vector is not trusted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroverError {
    /// Invalid caller input: qubit counts, search value or database table.
    #[error("Configuration Error: {message}")]
    Configuration {
        /// Configuration failure message
        message: String,
    },

    /// A qubit index was reused, aliased, or referenced while not live.
    #[error("Allocation Error ({qubit}): {message}")]
    Allocation {
        /// Offending qubit
        qubit: QubitId,
        /// Allocation failure message
        message: String,
    },

    /// Probabilities drifted away from 1 or a measurement realized a
    /// vanishing probability. Always an internal bug, never user error.
    #[error("Numerical Consistency Error: {message}")]
    NumericalConsistency {
        /// NumericalConsistency failure message
        message: String,
    },

    /// The requested register sizes cannot be backed by a dense amplitude vector.
    #[error("Resource Exhaustion: {requested_qubits} qubits requested (limit {max_qubits}): {message}")]
    ResourceExhaustion {
        /// Total qubits the run asked for
        requested_qubits: usize,
        /// Limit in force for this run
        max_qubits: usize,
        /// ResourceExhaustion failure message
        message: String,
    },
}

impl GroverError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        GroverError::Configuration { message: message.into() }
    }

    pub(crate) fn allocation(qubit: QubitId, message: impl Into<String>) -> Self {
        GroverError::Allocation { qubit, message: message.into() }
    }

    pub(crate) fn numerical(message: impl Into<String>) -> Self {
        GroverError::NumericalConsistency { message: message.into() }
    }
}
