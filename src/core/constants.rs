//! Numerical tolerances and resource limits shared by the simulator.

/// Constants used across state evolution, validation and sampling
pub mod grover_constants {
    /// Allowed deviation of the total probability from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Realized measurement probabilities below this are treated as zero.
    pub const MIN_REALIZED_PROBABILITY: f64 = 1e-12;
    /// Default qubit limit for a single run (2^24 amplitudes, 256 MiB).
    pub const DEFAULT_MAX_QUBITS: usize = 24;
    /// Ceiling no configuration may raise `max_qubits` above.
    pub const HARD_MAX_QUBITS: usize = 30;
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
}
