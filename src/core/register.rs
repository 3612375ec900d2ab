// src/core/register.rs

use super::error::QubitId;
use std::fmt;

/// An ordered group of qubits read together as one classical value.
///
/// The first qubit holds the most significant bit. Registers handed out by
/// the simulation engine never share qubits; registers built by hand (for
/// example with [`Register::concat`]) are only checked for overlap once an
/// operation touches them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Register {
    qubits: Vec<QubitId>,
}

impl Register {
    /// Creates a register over the given qubits, in order.
    pub fn new(qubits: Vec<QubitId>) -> Self {
        Self { qubits }
    }

    /// Register of a single qubit.
    pub fn single(qubit: QubitId) -> Self {
        Self { qubits: vec![qubit] }
    }

    /// Qubits in big-endian order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Number of qubits (bit width).
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Returns `true` if the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Iterates qubits from most to least significant.
    pub fn iter(&self) -> impl Iterator<Item = &QubitId> {
        self.qubits.iter()
    }

    /// Concatenates `self` followed by `other`; `self` keeps the high bits.
    pub fn concat(&self, other: &Register) -> Register {
        let mut qubits = self.qubits.clone();
        qubits.extend_from_slice(&other.qubits);
        Register { qubits }
    }
}

impl<'a> IntoIterator for &'a Register {
    type Item = &'a QubitId;
    type IntoIter = std::slice::Iter<'a, QubitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.qubits.iter()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, q) in self.qubits.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, q)?;
        }
        write!(f, "]")
    }
}
