// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Dense amplitude vector over `2^n` basis states.
///
/// Basis index `i` encodes one classical assignment of all qubits, qubit 0
/// being the most significant bit. Between gate applications the squared
/// magnitudes sum to 1 (within tolerance); only the collapse step inside a
/// measurement briefly breaks that.
///
/// Analogy: this is the whole "quantum" state of a run. Nothing else holds
/// superposition or entanglement.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Wraps a vector of amplitudes. The length must be `2^num_qubits`;
    /// callers inside the crate guarantee this.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { amplitudes, num_qubits }
    }

    /// All-zero basis state `|0…0⟩` in a pre-reserved buffer.
    pub(crate) fn zero_state(mut buffer: Vec<Complex<f64>>, num_qubits: usize) -> Self {
        buffer.clear();
        buffer.resize(1usize << num_qubits, Complex::zero());
        buffer[0] = Complex::one();
        Self::new(buffer, num_qubits)
    }

    /// Provides read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Provides mutable access for the simulation engine to modify the state.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector spans.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Sum of squared amplitude magnitudes.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability of observing basis state `index`.
    pub fn probability_of(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |c| c.norm_sqr())
    }

    /// Mask selecting the bit of `qubit_index` inside a basis index.
    /// Callers pass an index below `num_qubits`.
    pub(crate) fn bit_mask(&self, qubit_index: usize) -> usize {
        1usize << (self.num_qubits - 1 - qubit_index)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Overlap magnitude `|⟨a|b⟩|`. Equal to 1 exactly when the states agree up
/// to a global phase.
pub fn fidelity(a: &StateVector, b: &StateVector) -> f64 {
    if a.dim() != b.dim() {
        return 0.0;
    }
    a.vector()
        .iter()
        .zip(b.vector())
        .map(|(x, y)| x.conj() * y)
        .sum::<Complex<f64>>()
        .norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state_layout() {
        let s = StateVector::zero_state(Vec::new(), 3);
        assert_eq!(s.dim(), 8);
        assert_eq!(s.vector()[0], Complex::one());
        assert!((s.total_probability() - 1.0).abs() < 1e-12);
        // qubit 0 is the most significant bit
        assert_eq!(s.bit_mask(0), 0b100);
        assert_eq!(s.bit_mask(2), 0b001);
    }

    #[test]
    fn test_fidelity_ignores_global_phase() {
        let a = StateVector::zero_state(Vec::new(), 1);
        let b = StateVector::new(vec![-Complex::<f64>::i(), Complex::zero()], 1);
        assert!((fidelity(&a, &b) - 1.0).abs() < 1e-12);
    }
}
