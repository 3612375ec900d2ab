// src/search/outcome.rs
use crate::core::bits_to_int;
use crate::database::DatabaseTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classical result of one search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Flag qubit: `true` when the sampled branch holds the search value.
    pub marked: bool,
    /// Key register, most significant bit first.
    pub key_bits: Vec<bool>,
    /// Value register, most significant bit first.
    pub value_bits: Vec<bool>,
}

impl SearchOutcome {
    /// Decoded key.
    pub fn key(&self) -> u64 {
        bits_to_int(&self.key_bits)
    }

    /// Decoded value.
    pub fn value(&self) -> u64 {
        bits_to_int(&self.value_bits)
    }

    /// The run found the search value.
    pub fn is_success(&self) -> bool {
        self.marked
    }

    /// Whether the sampled key and value agree with `table`. Every sampled
    /// branch is a `|k⟩|table[k]⟩` pair, so this holds for every run.
    pub fn matches_table(&self, table: &DatabaseTable) -> bool {
        table.get(self.key()) == Some(self.value())
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "marked={} key={} value={}",
            u8::from(self.marked),
            self.key(),
            self.value()
        )
    }
}
