// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s, plus the circuit-level forms of the
//! `Invert` and `WithControls` combinators.
//!
//! Oracles and reflections are all built as `Circuit`s, so composing them is
//! just concatenation, and inverting a composite is reversing it.

use crate::core::{GroverError, QubitId, Register};
use crate::operations::Operation;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Represents an ordered sequence of operations applied to a set of qubits.
///
/// Analogy: Similar to `cirq.Circuit` or `qiskit.QuantumCircuit` restricted to
/// unitary gates; measurement is done by the sampler, not by the circuit.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// The unique set of qubits involved across all operations in this circuit.
    qubits: HashSet<QubitId>,

    /// The ordered sequence of operations. Order matters: gates generally do
    /// not commute.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Adds a single operation to the end of the circuit's sequence.
    ///
    /// The qubits involved in `op` are recorded in the circuit's qubit set.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the circuit's sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Appends every operation of `other`, in order.
    pub fn append(&mut self, other: &Circuit) {
        self.add_operations(other.operations.iter().cloned());
    }

    /// `Invert` for a whole circuit: reversed order, each operation inverted.
    pub fn adjoint(&self) -> Circuit {
        let mut inverse = Circuit::new();
        inverse.add_operations(self.operations.iter().rev().map(Operation::adjoint));
        inverse
    }

    /// `WithControls` for a whole circuit: every operation is gated on
    /// `register` holding `pattern`.
    ///
    /// # Errors
    /// `GroverError::Configuration` if `pattern` does not fit the register.
    pub fn with_controls(&self, register: &Register, pattern: u64) -> Result<Circuit, GroverError> {
        let mut controlled = Circuit::new();
        for op in &self.operations {
            controlled.add_operation(op.with_controls(register, pattern)?);
        }
        Ok(controlled)
    }

    /// Returns a reference to the set of unique qubits involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

// Implement Default for convenient creation of empty circuits.
impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Operation> for Circuit {
    fn extend<I: IntoIterator<Item = Operation>>(&mut self, iter: I) {
        self.add_operations(iter);
    }
}

impl FromIterator<Operation> for Circuit {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        let mut circuit = Circuit::new();
        circuit.add_operations(iter);
        circuit
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Appends a whole sub-circuit.
    pub fn add_circuit(mut self, other: &Circuit) -> Self {
        self.circuit.append(other);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

// Implement Default for convenient creation of builders.
impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        // Sorted qubits give a stable row order
        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted_qubits.sort();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|q| format!("{}", q).len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 5; // e.g., "──H──"
        const WIRE: &str = "─────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the gate/wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][time] holds the connector drawn below this row
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            let Some(&r_tgt) = qubit_to_row.get(&op.target()) else { continue };
            op_grid[r_tgt][t] = format_gate(&op.symbol());

            let mut r_min = r_tgt;
            let mut r_max = r_tgt;
            for control in op.controls() {
                if let Some(&r) = qubit_to_row.get(&control.qubit) {
                    op_grid[r][t] = format_gate(if control.on_one { "●" } else { "○" });
                    r_min = r_min.min(r);
                    r_max = r_max.max(r);
                }
            }
            for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                row_vec[t] = V_WIRE;
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
