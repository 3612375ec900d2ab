// src/simulation/results.rs
use crate::core::{QubitId, Register};
use std::collections::HashMap;
use std::fmt;

/// Classical outcomes of the measurements made during one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementResult {
    /// Maps measured qubits to their observed bit.
    outcomes: HashMap<QubitId, bool>,
    /// Qubits in the order they were measured.
    order: Vec<QubitId>,
}

impl MeasurementResult {
    /// Creates a new, empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of measuring `qubit`. A later measurement of the
    /// same qubit overwrites the earlier one.
    pub(crate) fn record(&mut self, qubit: QubitId, outcome: bool) {
        if self.outcomes.insert(qubit, outcome).is_none() {
            self.order.push(qubit);
        }
    }

    /// Gets the outcome for a specific qubit, if it was measured.
    pub fn get(&self, qubit: &QubitId) -> Option<bool> {
        self.outcomes.get(qubit).copied()
    }

    /// Outcomes of every qubit of `register` in register order, or `None` if
    /// any of them was not measured.
    pub fn bits_for(&self, register: &Register) -> Option<Vec<bool>> {
        register.iter().map(|q| self.get(q)).collect()
    }

    /// `(qubit, outcome)` pairs in measurement order.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, bool)> + '_ {
        self.order.iter().map(|q| (*q, self.outcomes[q]))
    }

    /// Number of measured qubits.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing was measured.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Results:")?;
        if self.order.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            for (qubit, outcome) in self.iter() {
                writeln!(f, "    {}: {}", qubit, u8::from(outcome))?;
            }
        }
        Ok(())
    }
}
