// src/reflections/mod.rs

//! Reflection operators for the Grover iterate.

use crate::circuits::Circuit;
use crate::core::{GroverError, QubitId, Register, PI};
use crate::oracles::OracleBuilder;
use crate::operations::Operation;

/// `ReflectMarked`: π phase on the subspace where `marked` is one.
pub fn reflect_marked(marked: QubitId) -> Circuit {
    let mut circuit = Circuit::new();
    circuit.add_operation(Operation::phase(marked, PI));
    circuit
}

/// `ReflectZero`: sign flip on the all-zero basis state of `register`,
/// identity elsewhere.
///
/// Flips every qubit, applies a π phase on the last qubit controlled on all
/// the others being one, then flips every qubit back.
///
/// # Errors
/// `GroverError::Configuration` for an empty register.
pub fn reflect_zero(register: &Register) -> Result<Circuit, GroverError> {
    let Some((&last, rest)) = register.qubits().split_last() else {
        return Err(GroverError::configuration("cannot reflect about zero on an empty register"));
    };
    let mut circuit: Circuit = register.iter().map(|&q| Operation::flip(q)).collect();
    circuit.add_operation(Operation::multi_controlled_phase(rest, last, PI));
    circuit.add_operations(register.iter().map(|&q| Operation::flip(q)));
    Ok(circuit)
}

/// `ReflectStart`: reflection about the prepared start state `U|0⟩`, built
/// as `U · ReflectZero([marked] + key) · U⁻¹` so the start state is never
/// written out.
pub fn reflect_start(oracles: &OracleBuilder<'_>) -> Result<Circuit, GroverError> {
    let prep = oracles.state_preparation()?;
    let mut circuit = prep.adjoint();
    circuit.append(&reflect_zero(&oracles.registers().flag_and_key())?);
    circuit.append(&prep);
    Ok(circuit)
}
