// src/database/mod.rs

//! The classical key/value table the search runs over.

use crate::core::bits::fits_in;
use crate::core::GroverError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Key → value table over the key domain `[0, 2^n_key_qubits)`.
///
/// Stored as a dense list indexed by key. A table is only usable by the
/// oracles after [`DatabaseTable::validate`] accepted it for a concrete pair
/// of register widths: every key present, every value in range, no value
/// repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseTable {
    values: Vec<u64>,
}

impl DatabaseTable {
    /// Wraps `values`, where `values[k]` is the entry for key `k`.
    pub fn new(values: Vec<u64>) -> Self {
        Self { values }
    }

    /// The four-entry sample table `{0→3, 1→2, 2→0, 3→1}`.
    pub fn sample() -> Self {
        Self::new(vec![3, 2, 0, 1])
    }

    /// Value stored under `key`.
    pub fn get(&self, key: u64) -> Option<u64> {
        usize::try_from(key).ok().and_then(|k| self.values.get(k).copied())
    }

    /// The unique key whose value is `value`, if any.
    pub fn key_of(&self, value: u64) -> Option<u64> {
        self.values.iter().position(|&v| v == value).map(|k| k as u64)
    }

    /// `(key, value)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.values.iter().enumerate().map(|(k, &v)| (k as u64, v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks the table against register widths.
    ///
    /// # Errors
    /// `GroverError::Configuration` when the key domain is not exactly
    /// `2^n_key_qubits` entries, a value needs more than `n_value_qubits` bits,
    /// or two keys share a value.
    pub fn validate(&self, n_key_qubits: usize, n_value_qubits: usize) -> Result<(), GroverError> {
        let domain = 1u128 << n_key_qubits.min(127);
        if n_key_qubits >= 64 || self.values.len() as u128 != domain {
            return Err(GroverError::configuration(format!(
                "table has {} entries but a {}-qubit key register addresses 2^{} keys",
                self.values.len(),
                n_key_qubits,
                n_key_qubits
            )));
        }

        let mut seen: HashMap<u64, u64> = HashMap::with_capacity(self.values.len());
        for (key, value) in self.entries() {
            if !fits_in(value, n_value_qubits) {
                return Err(GroverError::configuration(format!(
                    "table[{}] = {} does not fit in {} value qubits",
                    key, value, n_value_qubits
                )));
            }
            if let Some(previous) = seen.insert(value, key) {
                return Err(GroverError::configuration(format!(
                    "table is not a bijection: keys {} and {} both map to {}",
                    previous, key, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for DatabaseTable {
    fn default() -> Self {
        Self::sample()
    }
}

impl fmt::Display for DatabaseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries().enumerate() {
            write!(f, "{}{}→{}", if i > 0 { ", " } else { "" }, k, v)?;
        }
        write!(f, "}}")
    }
}
