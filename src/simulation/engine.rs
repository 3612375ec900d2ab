// src/simulation/engine.rs
use crate::core::{
    GroverError, QubitId, Register, StateVector, DEFAULT_MAX_QUBITS, HARD_MAX_QUBITS,
    MIN_REALIZED_PROBABILITY, NORM_TOLERANCE,
};
use crate::circuits::Circuit;
use crate::operations::{Control, Operation};
use crate::validation;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::{debug, trace};

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Largest qubit count the engine will back with a dense vector.
    /// Values above `HARD_MAX_QUBITS` are clamped.
    pub max_qubits: usize,
    /// Re-check normalization after every primitive gate.
    pub validate_each_gate: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            validate_each_gate: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Free,
    Live,
    Released,
}

/// Owns the amplitude vector of one run and every qubit index into it.
///
/// Qubits are handed out in increasing index order and never handed out
/// twice, so live registers cannot alias. Gate application is in place and
/// touches only amplitude pairs that differ in the target bit.
#[derive(Debug)]
pub struct SimulationEngine {
    state: StateVector,
    slots: Vec<Slot>,
    next_free: usize,
    options: EngineOptions,
    gates_applied: usize,
}

impl SimulationEngine {
    /// Checks that `num_qubits` can be simulated under `max_qubits` without
    /// allocating anything.
    pub fn check_capacity(num_qubits: usize, max_qubits: usize) -> Result<(), GroverError> {
        let limit = max_qubits.min(HARD_MAX_QUBITS);
        if num_qubits > limit {
            return Err(GroverError::ResourceExhaustion {
                requested_qubits: num_qubits,
                max_qubits: limit,
                message: format!("a dense state needs 2^{} amplitudes", num_qubits),
            });
        }
        Ok(())
    }

    /// Creates an engine for `num_qubits` qubits in `|0…0⟩`. No qubit is live
    /// until [`SimulationEngine::allocate`] hands it out.
    pub fn init(num_qubits: usize, options: EngineOptions) -> Result<Self, GroverError> {
        if num_qubits == 0 {
            return Err(GroverError::configuration("cannot initialize a simulation with zero qubits"));
        }
        Self::check_capacity(num_qubits, options.max_qubits)?;

        let dim = 1usize << num_qubits;
        let mut buffer: Vec<Complex<f64>> = Vec::new();
        buffer.try_reserve_exact(dim).map_err(|e| GroverError::ResourceExhaustion {
            requested_qubits: num_qubits,
            max_qubits: options.max_qubits.min(HARD_MAX_QUBITS),
            message: format!("could not reserve {} amplitudes: {}", dim, e),
        })?;

        debug!(num_qubits, dim, "initialized state vector");
        Ok(Self {
            state: StateVector::zero_state(buffer, num_qubits),
            slots: vec![Slot::Free; num_qubits],
            next_free: 0,
            options,
            gates_applied: 0,
        })
    }

    /// Hands out the next `count` unused qubits as one register.
    pub fn allocate(&mut self, count: usize) -> Result<Register, GroverError> {
        let remaining = self.slots.len() - self.next_free;
        if count > remaining {
            return Err(GroverError::allocation(
                QubitId(self.slots.len()),
                format!("requested {} qubits but only {} were never allocated", count, remaining),
            ));
        }
        let qubits: Vec<QubitId> = (self.next_free..self.next_free + count).map(QubitId).collect();
        for q in &qubits {
            self.slots[q.0] = Slot::Live;
        }
        self.next_free += count;
        Ok(Register::new(qubits))
    }

    /// Releases every qubit of `register`. Each must be live and back in `|0⟩`.
    ///
    /// All-or-nothing: on error no slot of the register changes state.
    pub fn release(&mut self, register: &Register) -> Result<(), GroverError> {
        for (i, &qubit) in register.iter().enumerate() {
            self.check_live(qubit)?;
            if register.qubits()[..i].contains(&qubit) {
                return Err(GroverError::allocation(qubit, "qubit listed twice in one release"));
            }
            let (_, p_one) = self.outcome_probabilities(qubit)?;
            if p_one > NORM_TOLERANCE {
                return Err(GroverError::allocation(
                    qubit,
                    format!("released while not in the zero state (P(one) = {:.3e})", p_one),
                ));
            }
        }
        for &qubit in register {
            self.slots[qubit.0] = Slot::Released;
        }
        Ok(())
    }

    /// Read-only view of the amplitudes.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Number of primitive gates applied so far.
    pub fn gates_applied(&self) -> usize {
        self.gates_applied
    }

    /// Overwrites the amplitudes for unit tests.
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, amplitudes: Vec<Complex<f64>>) -> Result<(), GroverError> {
        if amplitudes.len() != self.state.dim() {
            return Err(GroverError::numerical(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                amplitudes.len(),
                self.state.dim()
            )));
        }
        self.state = StateVector::new(amplitudes, self.state.num_qubits());
        Ok(())
    }

    /// Applies every operation of `circuit` in order.
    pub fn apply_circuit(&mut self, circuit: &Circuit) -> Result<(), GroverError> {
        for op in circuit.operations() {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Applies a single operation to the amplitude vector.
    ///
    /// Nested `Controlled` wrappers are flattened; the primitive underneath
    /// runs as a 2×2 matrix on amplitude pairs whose control bits match.
    pub fn apply(&mut self, op: &Operation) -> Result<(), GroverError> {
        let mut controls: Vec<Control> = Vec::new();
        let mut primitive = op;
        while let Operation::Controlled { controls: c, op: inner } = primitive {
            controls.extend_from_slice(c);
            primitive = inner.as_ref();
        }

        let target = primitive.target();
        self.check_live(target)?;

        let mut control_mask = 0usize;
        let mut control_value = 0usize;
        for control in &controls {
            self.check_live(control.qubit)?;
            if control.qubit == target {
                return Err(GroverError::allocation(control.qubit, "control qubit aliases the target"));
            }
            let mask = self.state.bit_mask(control.qubit.0);
            if control_mask & mask != 0 {
                return Err(GroverError::allocation(control.qubit, "qubit used twice as a control"));
            }
            control_mask |= mask;
            if control.on_one {
                control_value |= mask;
            }
        }

        let matrix = gate_matrix(primitive);
        self.apply_controlled_single_qubit_gate(target.0, &matrix, control_mask, control_value);
        self.gates_applied += 1;

        if self.options.validate_each_gate {
            validation::validate_state(&self.state, None)?;
        }
        Ok(())
    }

    /// `(P(zero), P(one))` for `qubit` in the current state.
    pub fn outcome_probabilities(&self, qubit: QubitId) -> Result<(f64, f64), GroverError> {
        self.check_live(qubit)?;
        let mask = self.state.bit_mask(qubit.0);
        let (mut p_zero, mut p_one) = (0.0, 0.0);
        for (i, c) in self.state.vector().iter().enumerate() {
            if i & mask == 0 {
                p_zero += c.norm_sqr();
            } else {
                p_one += c.norm_sqr();
            }
        }
        Ok((p_zero, p_one))
    }

    /// Projects onto `qubit == outcome` and rescales by `1/√probability`.
    ///
    /// `probability` is the realized probability of `outcome` computed by the
    /// caller just before; a vanishing value means evolution went wrong.
    pub(crate) fn collapse(&mut self, qubit: QubitId, outcome: bool, probability: f64) -> Result<(), GroverError> {
        self.check_live(qubit)?;
        if !(probability >= MIN_REALIZED_PROBABILITY) {
            return Err(GroverError::numerical(format!(
                "measurement of {} realized outcome {} with probability {:.3e}",
                qubit,
                u8::from(outcome),
                probability
            )));
        }
        let mask = self.state.bit_mask(qubit.0);
        let scale = 1.0 / probability.sqrt();
        for (i, c) in self.state.vector_mut().iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *c *= scale;
            } else {
                *c = Complex::zero();
            }
        }
        trace!(%qubit, outcome, probability, "collapsed state");
        validation::validate_state(&self.state, None)
    }

    fn check_live(&self, qubit: QubitId) -> Result<(), GroverError> {
        match self.slots.get(qubit.0) {
            Some(Slot::Live) => Ok(()),
            Some(Slot::Released) => Err(GroverError::allocation(qubit, "qubit referenced after release")),
            Some(Slot::Free) => Err(GroverError::allocation(qubit, "qubit referenced before allocation")),
            None => Err(GroverError::allocation(
                qubit,
                format!("index out of range for a {}-qubit simulation", self.slots.len()),
            )),
        }
    }

    /// Applies `matrix` to every amplitude pair `(i0, i1)` that differs only
    /// at `target_idx` and whose control bits equal `control_value`.
    fn apply_controlled_single_qubit_gate(
        &mut self,
        target_idx: usize,
        matrix: &[[Complex<f64>; 2]; 2],
        control_mask: usize,
        control_value: usize,
    ) {
        let k_mask = self.state.bit_mask(target_idx);
        let lower_mask = k_mask - 1;
        let dim = self.state.dim();
        let amplitudes = self.state.vector_mut();

        // Each i enumerates the other n-1 bits; insert a 0 at the target position
        for i in 0..dim / 2 {
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            if i0 & control_mask != control_value {
                continue;
            }
            let i1 = i0 | k_mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}

/// 2×2 matrix of an uncontrolled primitive in the `{|0⟩, |1⟩}` basis.
fn gate_matrix(op: &Operation) -> [[Complex<f64>; 2]; 2] {
    match op {
        Operation::BitFlip { .. } => [
            [Complex::zero(), Complex::one()],
            [Complex::one(), Complex::zero()],
        ],
        Operation::PhaseShift { theta, .. } => phase_shift_matrix(*theta),
        Operation::Hadamard { .. } => [
            [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
            [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
        ],
        // flattened by `apply` before we get here
        Operation::Controlled { op, .. } => gate_matrix(op),
    }
}

/// `diag(1, e^(iθ))`.
fn phase_shift_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::from_polar(1.0, theta)],
    ]
}
