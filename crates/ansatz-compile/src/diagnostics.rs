//! Non-fatal advisories raised while compiling.
//!
//! A diagnostic never aborts a compile call. Each one is logged at `warn`
//! level when recorded and returned to the caller with the compiled ansatz.

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// An advisory about something unusual in the structure or the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A non-barrier gate was given no qubits and was skipped.
    EmptyTargets {
        /// The gate as written.
        gate: String,
    },
    /// A tuple-form layer token carried a qubit list that was ignored.
    RedundantLayerQubits {
        /// The layer token.
        token: String,
        /// The ignored qubit list.
        qubits: Vec<i64>,
    },
    /// The structure contains an explicit measurement.
    MeasureInAnsatz {
        /// The measured qubits.
        qubits: Vec<i64>,
    },
    /// A classical register was created to hold measurement results.
    ClassicalRegisterAdded {
        /// Register name.
        name: String,
        /// Register size.
        size: u32,
    },
    /// Allocator bookkeeping and the circuit disagree on the parameter set.
    ParameterMismatch {
        /// Names allocated during traversal.
        allocated: Vec<String>,
        /// Names the circuit references.
        circuit: Vec<String>,
    },
    /// Some parameter names lack a numeric suffix; sorted lexicographically.
    UnsortableParameterNames {
        /// The names without a numeric suffix.
        names: Vec<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyTargets { gate } => {
                write!(f, "Gate '{gate}' specified with empty qubit list; skipping")
            }
            Diagnostic::RedundantLayerQubits { token, qubits } => write!(
                f,
                "Layer token '{token}' ignores its qubit list {qubits:?} and spans all qubits"
            ),
            Diagnostic::MeasureInAnsatz { qubits } => write!(
                f,
                "Explicit 'measure' on qubits {qubits:?} in ansatz structure; measurements \
                 are normally added from the Hamiltonian terms at evaluation time"
            ),
            Diagnostic::ClassicalRegisterAdded { name, size } => {
                write!(f, "Auto-added classical register '{name}' of size {size} for measure")
            }
            Diagnostic::ParameterMismatch { allocated, circuit } => write!(
                f,
                "Parameter mismatch: circuit references {} {circuit:?}, allocated {} {allocated:?}; \
                 using the circuit's parameters",
                circuit.len(),
                allocated.len()
            ),
            Diagnostic::UnsortableParameterNames { names } => write!(
                f,
                "Parameters {names:?} have no numeric suffix; using lexicographic order"
            ),
        }
    }
}

/// Diagnostics collected over one compile call, in the order raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// The recorded diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
