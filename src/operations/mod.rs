// src/operations/mod.rs

//! Elementary gates and the two combinators every gate supports:
//! [`Operation::adjoint`] (`Invert`) and [`Operation::with_controls`]
//! (`WithControls`).
//!
//! Gates are plain data. The simulation engine interprets them against the
//! amplitude vector; nothing here touches amplitudes.

use crate::core::bits::fits_in;
use crate::core::{GroverError, QubitId, Register};
use std::f64::consts::PI;

/// Condition on one qubit of a controlled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Control {
    /// The qubit that gates the operation.
    pub qubit: QubitId,
    /// `true`: fire when the qubit is one. `false`: anti-control, fire when zero.
    pub on_one: bool,
}

impl Control {
    /// Direct control (fires on one).
    pub fn on(qubit: QubitId) -> Self {
        Self { qubit, on_one: true }
    }

    /// Anti-control (fires on zero).
    pub fn off(qubit: QubitId) -> Self {
        Self { qubit, on_one: false }
    }

    /// Decomposes `pattern` bit-by-bit over `register`: 1-bits become direct
    /// controls, 0-bits anti-controls. The register's first qubit takes the
    /// most significant bit.
    ///
    /// # Errors
    /// `GroverError::Configuration` if `pattern` needs more bits than the register has.
    pub fn from_pattern(register: &Register, pattern: u64) -> Result<Vec<Control>, GroverError> {
        let width = register.len();
        if !fits_in(pattern, width) {
            return Err(GroverError::configuration(format!(
                "control pattern {} does not fit in a {}-qubit register",
                pattern, width
            )));
        }
        Ok(register
            .iter()
            .enumerate()
            .map(|(i, &qubit)| {
                let shift = width - 1 - i;
                Control { qubit, on_one: (pattern >> shift) & 1 == 1 }
            })
            .collect())
    }
}

/// A unitary acting on the shared amplitude vector.
///
/// Analogy: `BitFlip` is X, `PhaseShift` is R1(θ), `Hadamard` is H, and
/// `Controlled` is the multi-controlled (optionally anti-controlled) version
/// of any of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Swaps the zero and one amplitudes of `target`.
    BitFlip {
        /// Qubit to flip.
        target: QubitId,
    },

    /// Multiplies the amplitude of `target == one` by `e^(iθ)`.
    PhaseShift {
        /// Qubit whose one-branch picks up the phase.
        target: QubitId,
        /// Phase angle in radians.
        theta: f64,
    },

    /// Maps `|0⟩ → (|0⟩+|1⟩)/√2` and `|1⟩ → (|0⟩−|1⟩)/√2` on `target`.
    Hadamard {
        /// Qubit to put into equal superposition.
        target: QubitId,
    },

    /// Applies `op` only on basis states whose control qubits match every
    /// [`Control`]; all other amplitudes pass through unchanged.
    Controlled {
        /// Conditions, in the order they were added.
        controls: Vec<Control>,
        /// The gated operation. Never itself `Controlled` when built through
        /// [`Operation::with_controls`].
        op: Box<Operation>,
    },
}

impl Operation {
    /// Bit-flip on `target`.
    pub fn flip(target: QubitId) -> Self {
        Operation::BitFlip { target }
    }

    /// Phase rotation by `theta` on the one-branch of `target`.
    pub fn phase(target: QubitId, theta: f64) -> Self {
        Operation::PhaseShift { target, theta }
    }

    /// Hadamard on `target`.
    pub fn hadamard(target: QubitId) -> Self {
        Operation::Hadamard { target }
    }

    /// Phase rotation on `target` that fires only when every qubit in
    /// `controls` is one.
    pub fn multi_controlled_phase(controls: &[QubitId], target: QubitId, theta: f64) -> Self {
        Self::phase(target, theta).controlled_by(controls.iter().copied().map(Control::on))
    }

    /// Bit-flip on `target` that fires only when every qubit in `controls` is one.
    pub fn multi_controlled_flip(controls: &[QubitId], target: QubitId) -> Self {
        Self::flip(target).controlled_by(controls.iter().copied().map(Control::on))
    }

    /// `Invert`: the exact adjoint.
    ///
    /// Bit-flip and Hadamard are self-inverse, a phase shift negates its
    /// angle, and a controlled operation inverts its body under the same
    /// controls. Applying this twice gives back an identical operation.
    pub fn adjoint(&self) -> Operation {
        match self {
            Operation::BitFlip { .. } | Operation::Hadamard { .. } => self.clone(),
            Operation::PhaseShift { target, theta } => Operation::PhaseShift { target: *target, theta: -*theta },
            Operation::Controlled { controls, op } => Operation::Controlled {
                controls: controls.clone(),
                op: Box::new(op.adjoint()),
            },
        }
    }

    /// `WithControls`: gates this operation on `register` holding `pattern`.
    ///
    /// # Errors
    /// `GroverError::Configuration` if `pattern` does not fit the register.
    pub fn with_controls(&self, register: &Register, pattern: u64) -> Result<Operation, GroverError> {
        let controls = Control::from_pattern(register, pattern)?;
        Ok(self.controlled_by(controls))
    }

    /// Adds controls, flattening into an existing `Controlled` wrapper.
    pub fn controlled_by<I>(&self, extra: I) -> Operation
    where
        I: IntoIterator<Item = Control>,
    {
        let extra: Vec<Control> = extra.into_iter().collect();
        if extra.is_empty() {
            return self.clone();
        }
        match self {
            Operation::Controlled { controls, op } => {
                let mut merged = extra;
                merged.extend_from_slice(controls);
                Operation::Controlled { controls: merged, op: op.clone() }
            }
            _ => Operation::Controlled { controls: extra, op: Box::new(self.clone()) },
        }
    }

    /// The qubit the underlying primitive acts on.
    pub fn target(&self) -> QubitId {
        match self {
            Operation::BitFlip { target }
            | Operation::PhaseShift { target, .. }
            | Operation::Hadamard { target } => *target,
            Operation::Controlled { op, .. } => op.target(),
        }
    }

    /// Controls on this operation (empty for uncontrolled primitives).
    pub fn controls(&self) -> &[Control] {
        match self {
            Operation::Controlled { controls, .. } => controls,
            _ => &[],
        }
    }

    /// Returns every qubit mentioned by the operation, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<QubitId> = self.controls().iter().map(|c| c.qubit).collect();
        qubits.push(self.target());
        qubits
    }

    /// Short gate symbol used in circuit diagrams.
    pub(crate) fn symbol(&self) -> String {
        match self {
            Operation::BitFlip { .. } => "X".to_string(),
            Operation::Hadamard { .. } => "H".to_string(),
            Operation::PhaseShift { theta, .. } => {
                if (theta.abs() - PI).abs() < 1e-12 {
                    "Z".to_string()
                } else {
                    "P".to_string()
                }
            }
            Operation::Controlled { op, .. } => op.symbol(),
        }
    }
}
