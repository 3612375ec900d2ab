// src/simulation/mod.rs

//! Exact state-vector simulation: the [`SimulationEngine`] owning the
//! amplitudes, the [`Sampler`] performing measurements, and a small
//! [`Simulator`] front end that runs a whole circuit.

mod results;
mod sampler;
pub mod engine;

// Re-export the main public interface types
pub use engine::{EngineOptions, SimulationEngine};
pub use results::MeasurementResult;
pub use sampler::Sampler;

use crate::circuits::Circuit;
use crate::core::{GroverError, QubitId};
use rand::Rng;
use tracing::debug;

/// Runs a circuit on a fresh engine and measures the requested qubits.
#[derive(Debug, Default, Clone)]
pub struct Simulator {
    options: EngineOptions,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Simulator with explicit engine options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// Qubits `0..=max` are allocated where `max` is the largest index in the
    /// circuit or in `measure`. After the circuit, `measure` is sampled in
    /// order, measured ones are flipped back to zero, and every qubit is
    /// released.
    ///
    /// # Returns
    /// * `Ok(MeasurementResult)` with the outcome of every measured qubit.
    /// * `Err(GroverError)` on resource, allocation or numerical failures,
    ///   including an unmeasured qubit left outside `|0⟩` at release.
    pub fn run<R: Rng>(
        &self,
        circuit: &Circuit,
        measure: &[QubitId],
        rng: &mut R,
    ) -> Result<MeasurementResult, GroverError> {
        let num_qubits = circuit
            .qubits()
            .iter()
            .chain(measure)
            .map(|q| q.0 + 1)
            .max()
            .unwrap_or(0);
        if num_qubits == 0 {
            return Ok(MeasurementResult::new());
        }

        let mut engine = SimulationEngine::init(num_qubits, self.options)?;
        let all = engine.allocate(num_qubits)?;
        engine.apply_circuit(circuit)?;
        debug!(gates = engine.gates_applied(), "circuit applied");

        let mut sampler = Sampler::new(rng);
        let mut result = MeasurementResult::new();
        for &qubit in measure {
            let outcome = sampler.measure(&mut engine, qubit)?;
            result.record(qubit, outcome);
        }
        sampler.reset(&mut engine, &result)?;
        engine.release(&all)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Register, PI};
    use crate::operations::Operation;
    use num_complex::Complex;
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn qid(id: usize) -> QubitId {
        QubitId(id)
    }

    fn engine(n: usize) -> (SimulationEngine, Register) {
        let mut engine = SimulationEngine::init(n, EngineOptions { validate_each_gate: true, ..Default::default() })
            .expect("engine");
        let reg = engine.allocate(n).expect("allocate");
        (engine, reg)
    }

    /// Asserts that two complex state vectors are approximately equal component-wise.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        tolerance: f64,
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < tolerance * tolerance,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, DistSq: {:.3e}, Context: {}",
                i, actual[i], expected[i], dist_sq, context
            );
        }
    }

    fn c(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    #[test]
    fn test_flip_sets_most_significant_bit_for_qubit_zero() -> Result<(), GroverError> {
        let (mut e, _) = engine(2);
        e.apply(&Operation::flip(qid(0)))?;
        assert_complex_vec_approx_equal(e.state().vector(), &[c(0.0), c(0.0), c(1.0), c(0.0)], TEST_TOLERANCE, "X on q0");
        Ok(())
    }

    #[test]
    fn test_hadamard_then_phase() -> Result<(), GroverError> {
        let (mut e, _) = engine(1);
        e.apply(&Operation::hadamard(qid(0)))?;
        e.apply(&Operation::phase(qid(0), PI / 2.0))?;
        let expected = [c(FRAC_1_SQRT_2), Complex::new(0.0, FRAC_1_SQRT_2)];
        assert_complex_vec_approx_equal(e.state().vector(), &expected, TEST_TOLERANCE, "H then S");
        Ok(())
    }

    #[test]
    fn test_anti_control_fires_on_zero() -> Result<(), GroverError> {
        let (mut e, reg) = engine(2);
        let control = Register::single(reg.qubits()[0]);
        e.apply(&Operation::flip(qid(1)).with_controls(&control, 0)?)?;
        // control q0 is |0>, so the anti-controlled flip fires: |01>
        assert_complex_vec_approx_equal(e.state().vector(), &[c(0.0), c(1.0), c(0.0), c(0.0)], TEST_TOLERANCE, "anti-control");
        e.apply(&Operation::flip(qid(1)).with_controls(&control, 1)?)?;
        // direct control does not fire
        assert_complex_vec_approx_equal(e.state().vector(), &[c(0.0), c(1.0), c(0.0), c(0.0)], TEST_TOLERANCE, "control");
        Ok(())
    }

    #[test]
    fn test_multi_controlled_phase_touches_one_amplitude() -> Result<(), GroverError> {
        let (mut e, _) = engine(3);
        for q in 0..3 {
            e.apply(&Operation::hadamard(qid(q)))?;
        }
        e.apply(&Operation::multi_controlled_phase(&[qid(0), qid(1)], qid(2), PI))?;
        let a = 1.0 / 8f64.sqrt();
        let mut expected = vec![c(a); 8];
        expected[7] = c(-a);
        assert_complex_vec_approx_equal(e.state().vector(), &expected, TEST_TOLERANCE, "CCZ on |+++>");
        Ok(())
    }

    #[test]
    fn test_aliasing_and_unallocated_qubits_fail() {
        let (mut e, _) = engine(2);
        let aliased = Operation::multi_controlled_flip(&[qid(1)], qid(1));
        assert!(matches!(e.apply(&aliased), Err(GroverError::Allocation { .. })));
        let twice = Operation::multi_controlled_flip(&[qid(0), qid(0)], qid(1));
        assert!(matches!(e.apply(&twice), Err(GroverError::Allocation { .. })));
        assert!(matches!(e.apply(&Operation::flip(qid(7))), Err(GroverError::Allocation { .. })));
    }

    #[test]
    fn test_release_lifecycle() -> Result<(), GroverError> {
        let mut e = SimulationEngine::init(3, EngineOptions::default())?;
        let a = e.allocate(1)?;
        let b = e.allocate(2)?;
        assert_eq!(b.qubits(), &[qid(1), qid(2)]);
        // capacity exhausted; released indices are never handed out again
        assert!(matches!(e.allocate(1), Err(GroverError::Allocation { .. })));

        e.apply(&Operation::flip(qid(0)))?;
        assert!(matches!(e.release(&a), Err(GroverError::Allocation { .. })));
        e.apply(&Operation::flip(qid(0)))?;
        e.release(&a)?;
        assert!(matches!(e.apply(&Operation::flip(qid(0))), Err(GroverError::Allocation { .. })));
        assert!(matches!(e.release(&a), Err(GroverError::Allocation { .. })));
        e.release(&b)?;
        Ok(())
    }

    #[test]
    fn test_failed_release_leaves_register_live() -> Result<(), GroverError> {
        let (mut e, reg) = engine(3);
        e.apply(&Operation::flip(qid(2)))?;
        // q0 and q1 pass their checks, q2 does not: nothing is released
        assert!(matches!(e.release(&reg), Err(GroverError::Allocation { qubit, .. }) if qubit == qid(2)));
        e.apply(&Operation::hadamard(qid(0)))?;
        e.apply(&Operation::hadamard(qid(0)))?;
        e.apply(&Operation::flip(qid(2)))?;

        let doubled = Register::new(vec![qid(1), qid(1)]);
        assert!(matches!(e.release(&doubled), Err(GroverError::Allocation { .. })));
        e.release(&reg)?;
        Ok(())
    }

    #[test]
    fn test_measure_basis_state_is_deterministic() -> Result<(), GroverError> {
        let (mut e, reg) = engine(2);
        e.set_state(vec![c(0.0), c(0.0), c(1.0), c(0.0)])?; // |10>
        let mut rng = StdRng::seed_from_u64(1);
        let mut sampler = Sampler::new(&mut rng);
        let mut result = MeasurementResult::new();
        let bits = sampler.measure_register(&mut e, &reg, &mut result)?;
        assert_eq!(bits, vec![true, false]);
        assert_eq!(result.get(&qid(0)), Some(true));
        sampler.reset(&mut e, &result)?;
        e.release(&reg)?;
        Ok(())
    }

    #[test]
    fn test_measurement_collapses_entangled_pair() -> Result<(), GroverError> {
        let (mut e, reg) = engine(2);
        e.set_state(vec![c(0.6), Complex::zero(), Complex::zero(), c(0.8)])?;
        let mut rng = StdRng::seed_from_u64(99);
        let mut sampler = Sampler::new(&mut rng);
        let first = sampler.measure(&mut e, reg.qubits()[0])?;
        let second = sampler.measure(&mut e, reg.qubits()[1])?;
        assert_eq!(first, second, "entangled qubits must agree");
        let index = if first { 3 } else { 0 };
        assert!((e.state().probability_of(index) - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_collapse_on_vanishing_probability_fails() -> Result<(), GroverError> {
        let (mut e, _) = engine(1);
        let err = e.collapse(qid(0), true, 0.0).unwrap_err();
        assert!(matches!(err, GroverError::NumericalConsistency { .. }));
        Ok(())
    }

    #[test]
    fn test_unnormalized_state_is_refused_by_sampler() -> Result<(), GroverError> {
        let (mut e, _) = engine(1);
        e.set_state(vec![c(0.5), c(0.5)])?;
        let mut rng = StdRng::seed_from_u64(3);
        let err = Sampler::new(&mut rng).measure(&mut e, qid(0)).unwrap_err();
        assert!(matches!(err, GroverError::NumericalConsistency { .. }));
        Ok(())
    }

    #[test]
    fn test_resource_limit_is_checked_before_allocation() {
        let options = EngineOptions { max_qubits: 4, validate_each_gate: false };
        assert!(matches!(
            SimulationEngine::init(5, options),
            Err(GroverError::ResourceExhaustion { requested_qubits: 5, max_qubits: 4, .. })
        ));
    }

    #[test]
    fn test_simulator_measures_and_cleans_up() -> Result<(), GroverError> {
        let circuit: Circuit = vec![
            Operation::flip(qid(0)),
            Operation::multi_controlled_flip(&[qid(0)], qid(2)),
        ]
        .into_iter()
        .collect();
        let mut rng = StdRng::seed_from_u64(5);
        let result = Simulator::new().run(&circuit, &[qid(0), qid(1), qid(2)], &mut rng)?;
        assert_eq!(result.bits_for(&Register::new(vec![qid(0), qid(1), qid(2)])), Some(vec![true, false, true]));
        Ok(())
    }
}
