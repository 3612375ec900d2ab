// src/search/config.rs

use crate::core::bits::fits_in;
use crate::core::{GroverError, DEFAULT_MAX_QUBITS};
use crate::database::DatabaseTable;
use crate::simulation::{EngineOptions, SimulationEngine};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a single search run needs.
///
/// Loadable from TOML; missing keys fall back to the sample configuration:
///
/// ```toml
/// iterations = 1
/// key_qubits = 2
/// value_qubits = 2
/// search_value = 2
/// table = [3, 2, 0, 1]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Number of Grover iterates after state preparation.
    pub iterations: usize,
    /// Width of the key register.
    pub key_qubits: usize,
    /// Width of the value register.
    pub value_qubits: usize,
    /// Value to search for.
    pub search_value: u64,
    /// `table[k]` is the value stored under key `k`.
    pub table: DatabaseTable,
    /// Largest total qubit count a run may allocate.
    pub max_qubits: usize,
    /// Check normalization after every gate (slow; meant for testing).
    pub validate_each_gate: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 1,
            key_qubits: 2,
            value_qubits: 2,
            search_value: 2,
            table: DatabaseTable::sample(),
            max_qubits: DEFAULT_MAX_QUBITS,
            validate_each_gate: false,
        }
    }
}

impl SearchConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, GroverError> {
        toml::from_str(content)
            .map_err(|e| GroverError::configuration(format!("failed to parse search config: {}", e)))
    }

    /// Reads and parses a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GroverError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GroverError::configuration(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Flag qubit + key register + value register, saturating at `usize::MAX`
    /// so absurd widths still fail the capacity check.
    pub fn total_qubits(&self) -> usize {
        1usize.saturating_add(self.key_qubits).saturating_add(self.value_qubits)
    }

    /// Options for the engine backing a run of this configuration.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_qubits: self.max_qubits,
            validate_each_gate: self.validate_each_gate,
        }
    }

    /// Checks the configuration without allocating anything.
    ///
    /// # Errors
    /// * `GroverError::Configuration` for empty registers, a search value out
    ///   of range, an invalid table, or a search value no key maps to.
    /// * `GroverError::ResourceExhaustion` if the run would need more qubits
    ///   than `max_qubits`.
    pub fn validate(&self) -> Result<(), GroverError> {
        if self.key_qubits == 0 {
            return Err(GroverError::configuration("key register needs at least one qubit"));
        }
        if self.value_qubits == 0 {
            return Err(GroverError::configuration("value register needs at least one qubit"));
        }
        if !fits_in(self.search_value, self.value_qubits) {
            return Err(GroverError::configuration(format!(
                "search value {} is out of range for {} value qubits",
                self.search_value, self.value_qubits
            )));
        }
        SimulationEngine::check_capacity(self.total_qubits(), self.max_qubits)?;
        self.table.validate(self.key_qubits, self.value_qubits)?;
        if self.table.key_of(self.search_value).is_none() {
            return Err(GroverError::configuration(format!(
                "no key maps to search value {} in table {}",
                self.search_value, self.table
            )));
        }
        Ok(())
    }
}
