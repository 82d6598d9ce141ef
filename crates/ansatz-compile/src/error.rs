//! Error types for ansatz compilation.

use ansatz_ir::IrError;
use thiserror::Error;

use crate::config::ConfigError;

/// Broad classes of compile failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad top-level arguments or a gate the DSL refuses to build.
    Configuration,
    /// An element that is neither token, gate tuple, nor block.
    StructureFormat,
    /// A qubit index that is negative, out of range, or repeated.
    Bounds,
    /// A gate or token name that matches no known operation.
    UnsupportedGate,
    /// Operand count does not match the gate's native arity.
    Arity,
    /// Unexpected failure from the circuit model.
    Internal,
}

/// Errors that can occur while compiling an ansatz structure.
///
/// Every error aborts the compile call; no partial circuit is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The qubit count is not a positive integer.
    #[error("num_qubits must be a positive integer, got {0}")]
    InvalidQubitCount(i64),

    /// The structure is not a sequence.
    #[error("ansatz structure must be a list, got {0}")]
    InvalidStructure(String),

    /// The gate needs more than one continuous parameter.
    #[error(
        "Gate '{gate}' requires multiple parameters which are not auto-generated \
         by the ansatz structure format; construct this gate explicitly if needed"
    )]
    DisallowedGate {
        /// The gate as written in the structure.
        gate: String,
    },

    /// A layer token in tuple form carried qubits under the `reject` policy.
    #[error("Layer token '{token}' does not accept a qubit list (got {qubits:?})")]
    LayerQubitsRejected {
        /// The layer token.
        token: String,
        /// The qubits supplied.
        qubits: Vec<i64>,
    },

    /// Malformed structure element.
    #[error("Invalid structure element at {path}: {reason}. Found: {element}")]
    StructureFormat {
        /// Location of the element, e.g. `[2][0]`.
        path: String,
        /// What was wrong with it.
        reason: String,
        /// The offending element, rendered.
        element: String,
    },

    /// A bare token that is not a known shortcut.
    #[error("Unrecognized instruction '{token}'. Supported tokens: {supported}")]
    UnrecognizedInstruction {
        /// The token as written.
        token: String,
        /// Comma-separated list of accepted tokens.
        supported: String,
    },

    /// A qubit index outside `0..num_qubits`.
    #[error(
        "Qubit index {index} for gate '{gate}' is out of bounds; \
         circuit has {num_qubits} qubits (valid indices 0..={max})",
        max = max_index(.num_qubits)
    )]
    QubitOutOfBounds {
        /// The offending index.
        index: i64,
        /// The gate as written.
        gate: String,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// The same qubit appears twice in one instruction.
    #[error("Qubit index {index} appears more than once in the target list of gate '{gate}'")]
    DuplicateQubit {
        /// The repeated index.
        index: i64,
        /// The gate as written.
        gate: String,
    },

    /// Name not present in the gate taxonomy.
    #[error("Unrecognized gate '{name}'. Accepted aliases: {aliases}")]
    UnrecognizedGate {
        /// The name as written.
        name: String,
        /// Rendered alias table.
        aliases: String,
    },

    /// Name that resolves to no supported operation after alias resolution.
    #[error("Gate '{gate}' (canonical '{canonical}') is not a supported operation")]
    UnsupportedGate {
        /// The name as written.
        gate: String,
        /// The name after alias resolution.
        canonical: String,
    },

    /// Operand count mismatch.
    #[error("Gate '{gate}' expects {expected}, got {got} qubits")]
    Arity {
        /// The gate as written.
        gate: String,
        /// Description of the expected arity.
        expected: String,
        /// Number of qubits supplied.
        got: usize,
    },

    /// Unexpected failure from the circuit model.
    #[error("Unexpected error applying '{operation}' to qubits {qubits:?}: {source}")]
    Internal {
        /// The operation being applied.
        operation: String,
        /// The qubits it was applied to.
        qubits: Vec<i64>,
        /// The original failure.
        #[source]
        source: IrError,
    },

    /// Invalid compile options.
    #[error("Invalid compile options: {0}")]
    Config(#[from] ConfigError),
}

impl CompileError {
    /// The error class this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::InvalidQubitCount(_)
            | CompileError::InvalidStructure(_)
            | CompileError::DisallowedGate { .. }
            | CompileError::LayerQubitsRejected { .. }
            | CompileError::Config(_) => ErrorKind::Configuration,
            CompileError::StructureFormat { .. } => ErrorKind::StructureFormat,
            CompileError::QubitOutOfBounds { .. } | CompileError::DuplicateQubit { .. } => {
                ErrorKind::Bounds
            }
            CompileError::UnrecognizedInstruction { .. }
            | CompileError::UnrecognizedGate { .. }
            | CompileError::UnsupportedGate { .. } => ErrorKind::UnsupportedGate,
            CompileError::Arity { .. } => ErrorKind::Arity,
            CompileError::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Largest valid qubit index for a circuit of `num_qubits` qubits.
fn max_index(num_qubits: &u32) -> i64 {
    i64::from(*num_qubits) - 1
}

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;
