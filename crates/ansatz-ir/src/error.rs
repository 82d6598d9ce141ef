//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur when mutating or binding a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit with {num_qubits} qubits (gate: {gate_name})")]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
        /// Instruction being applied.
        gate_name: String,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit} not found in circuit (gate: {gate_name})")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Instruction being applied.
        gate_name: String,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Instruction being applied.
        gate_name: String,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement with unequal qubit and classical bit counts.
    #[error("measure: qubit count ({qubits}) does not match clbit count ({clbits})")]
    ClbitCountMismatch {
        /// Number of measured qubits.
        qubits: usize,
        /// Number of target classical bits.
        clbits: usize,
    },

    /// A classical register with this name already exists.
    #[error("Classical register '{0}' already exists")]
    DuplicateRegister(String),

    /// Positional binding received the wrong number of values.
    #[error("Expected {expected} parameter values, got {got}")]
    ParameterCountMismatch {
        /// Number of parameters to bind.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Binding named a parameter the circuit does not reference.
    #[error("Parameter '{0}' is not referenced by the circuit")]
    UnknownParameter(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
