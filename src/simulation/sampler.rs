// src/simulation/sampler.rs

//! Measurement: probabilistic collapse of the engine state and post-run reset.

use super::engine::SimulationEngine;
use super::results::MeasurementResult;
use crate::core::{GroverError, QubitId, Register, NORM_TOLERANCE};
use crate::operations::Operation;
use rand::Rng;
use tracing::trace;

/// Draws measurement outcomes from a caller-supplied random source.
///
/// The sampler owns no state of its own; seeding the `Rng` makes every
/// run reproducible.
pub struct Sampler<'r, R: Rng> {
    rng: &'r mut R,
}

impl<'r, R: Rng> Sampler<'r, R> {
    /// Wraps `rng` for the duration of a run.
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }

    /// Measures one qubit and collapses the state onto the observed outcome.
    ///
    /// The outcome is one with probability equal to the total weight of the
    /// basis states where the qubit is one.
    ///
    /// # Errors
    /// `GroverError::NumericalConsistency` if the state is not normalized or
    /// the realized outcome has vanishing probability.
    pub fn measure(&mut self, engine: &mut SimulationEngine, qubit: QubitId) -> Result<bool, GroverError> {
        let (p_zero, p_one) = engine.outcome_probabilities(qubit)?;
        if (p_zero + p_one - 1.0).abs() > NORM_TOLERANCE {
            return Err(GroverError::numerical(format!(
                "probabilities before measuring {} sum to {}",
                qubit,
                p_zero + p_one
            )));
        }
        let draw: f64 = self.rng.random();
        let outcome = draw < p_one;
        let realized = if outcome { p_one } else { p_zero };
        trace!(%qubit, p_one, draw, outcome, "measured qubit");
        engine.collapse(qubit, outcome, realized)?;
        Ok(outcome)
    }

    /// Measures `register` qubit by qubit. Each draw sees the state collapsed
    /// by the previous ones, so the joint distribution is sampled.
    pub fn measure_register(
        &mut self,
        engine: &mut SimulationEngine,
        register: &Register,
        result: &mut MeasurementResult,
    ) -> Result<Vec<bool>, GroverError> {
        let mut bits = Vec::with_capacity(register.len());
        for &qubit in register {
            let outcome = self.measure(engine, qubit)?;
            result.record(qubit, outcome);
            bits.push(outcome);
        }
        Ok(bits)
    }

    /// Flips every measured qubit observed as one back to zero so the
    /// register can be released.
    pub fn reset(&mut self, engine: &mut SimulationEngine, result: &MeasurementResult) -> Result<(), GroverError> {
        for (qubit, outcome) in result.iter() {
            if outcome {
                engine.apply(&Operation::flip(qubit))?;
            }
        }
        Ok(())
    }
}
