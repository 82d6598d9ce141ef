//! Named classical registers.

use serde::{Deserialize, Serialize};

use crate::qubit::ClbitId;

/// A named group of classical bits receiving measurement outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    bits: Vec<ClbitId>,
}

impl ClassicalRegister {
    pub(crate) fn new(name: String, bits: Vec<ClbitId>) -> Self {
        Self { name, bits }
    }

    /// The register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bits in the register.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the register has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The circuit-wide classical bit ids, in register order.
    pub fn bits(&self) -> &[ClbitId] {
        &self.bits
    }
}
