// src/oracles/mod.rs

//! Oracles that load the database into the key/value registers and flag the
//! searched value.
//!
//! Every oracle here is a product of (possibly controlled) bit-flips, so each
//! one is its own adjoint. The state preparation oracle still exposes a real
//! adjoint through [`Circuit::adjoint`]: the Hadamard layer comes first and
//! the order matters once it is reversed.

use crate::circuits::Circuit;
use crate::core::bits::fits_in;
use crate::core::{GroverError, QubitId, Register};
use crate::database::DatabaseTable;
use crate::operations::Operation;

/// The three registers a search run works on.
///
/// Basis ordering is `[marked] + key + value`, which is also the order the
/// engine allocates them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRegisters {
    /// Single flag qubit, one when the value register holds the search value.
    pub marked: QubitId,
    /// Key register, `n_key_qubits` wide.
    pub key: Register,
    /// Value register, `n_value_qubits` wide.
    pub value: Register,
}

impl SearchRegisters {
    /// `[marked] + key`, the register `ReflectZero` acts on inside `ReflectStart`.
    pub fn flag_and_key(&self) -> Register {
        Register::single(self.marked).concat(&self.key)
    }

    /// Every qubit of the run in basis order.
    pub fn all(&self) -> Register {
        self.flag_and_key().concat(&self.value)
    }
}

/// `SetRegisterToInt`: flips exactly the bits of `register` where `value`
/// has a one (big-endian). Applied to `|0…0⟩` it writes `value`.
///
/// # Errors
/// `GroverError::Configuration` if `value` does not fit the register.
pub fn set_register_to_int(value: u64, register: &Register) -> Result<Circuit, GroverError> {
    let width = register.len();
    if !fits_in(value, width) {
        return Err(GroverError::configuration(format!(
            "value {} does not fit in a {}-qubit register",
            value, width
        )));
    }
    Ok(register
        .iter()
        .enumerate()
        .filter(|(i, _)| (value >> (width - 1 - i)) & 1 == 1)
        .map(|(_, &q)| Operation::flip(q))
        .collect())
}

/// `EncodeDatabase`: for every key `k`, writes `table[k]` into
/// `value_register` controlled on `key_register == k`.
///
/// The per-key blocks have disjoint control patterns, so they commute and
/// the result is its own adjoint.
///
/// # Errors
/// `GroverError::Configuration` if the table does not fit the register widths.
pub fn encode_database(
    table: &DatabaseTable,
    key_register: &Register,
    value_register: &Register,
) -> Result<Circuit, GroverError> {
    table.validate(key_register.len(), value_register.len())?;
    let mut circuit = Circuit::new();
    for (key, value) in table.entries() {
        let write = set_register_to_int(value, value_register)?;
        circuit.append(&write.with_controls(key_register, key)?);
    }
    Ok(circuit)
}

/// `MarkValue`: flips `marked` controlled on `value_register == search_value`.
///
/// # Errors
/// `GroverError::Configuration` if `search_value` does not fit the register.
pub fn mark_value(
    marked: QubitId,
    value_register: &Register,
    search_value: u64,
) -> Result<Circuit, GroverError> {
    let mut circuit = Circuit::new();
    circuit.add_operation(Operation::flip(marked).with_controls(value_register, search_value)?);
    Ok(circuit)
}

/// Builds the oracles for one table, one register layout and one search value.
#[derive(Debug, Clone)]
pub struct OracleBuilder<'a> {
    table: &'a DatabaseTable,
    registers: &'a SearchRegisters,
    search_value: u64,
}

impl<'a> OracleBuilder<'a> {
    /// Creates a builder. Nothing is validated until a circuit is requested.
    pub fn new(table: &'a DatabaseTable, registers: &'a SearchRegisters, search_value: u64) -> Self {
        Self { table, registers, search_value }
    }

    /// The register layout the oracles act on.
    pub fn registers(&self) -> &SearchRegisters {
        self.registers
    }

    /// See [`encode_database`].
    pub fn encode_database(&self) -> Result<Circuit, GroverError> {
        encode_database(self.table, &self.registers.key, &self.registers.value)
    }

    /// See [`mark_value`].
    pub fn mark_value(&self) -> Result<Circuit, GroverError> {
        mark_value(self.registers.marked, &self.registers.value, self.search_value)
    }

    /// `StatePreparationOracle`: Hadamard on every key qubit, then
    /// `EncodeDatabase`, then `MarkValue`.
    ///
    /// From `|0⟩|0…0⟩|0…0⟩` this produces
    /// `sin θ |1⟩|k*⟩|s⟩ + cos θ · (normalized sum over k ≠ k* of |0⟩|k⟩|table[k]⟩)`
    /// with `θ = arcsin(1/√N)`. The superposition and encoding steps are one
    /// fixed sequence; the adjoint is obtained with [`Circuit::adjoint`].
    pub fn state_preparation(&self) -> Result<Circuit, GroverError> {
        let mut circuit: Circuit = self.registers.key.iter().map(|&q| Operation::hadamard(q)).collect();
        circuit.append(&self.encode_database()?);
        circuit.append(&self.mark_value()?);
        Ok(circuit)
    }
}
