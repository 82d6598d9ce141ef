//! Circuit model for parameterized ansatz circuits.
//!
//! This crate holds the data structures the ansatz compiler produces and
//! that downstream estimators consume: a fixed-width [`Circuit`] holding an
//! ordered list of [`Instruction`]s, named [`ClassicalRegister`]s, and the
//! symbolic [`Parameter`]s its rotation gates reference.
//!
//! # Example: Binding a Parameterized Circuit
//!
//! ```rust
//! use ansatz_ir::{Circuit, Parameter, QubitId};
//!
//! let theta = Parameter::new("p_0");
//!
//! let mut circuit = Circuit::new("variational", 2);
//! circuit.ry(theta.clone(), QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_parameters(), 1);
//!
//! // Estimators bind a flat numeric vector positionally.
//! let bound = circuit.assign_parameters(&[theta], &[0.25]).unwrap();
//! assert_eq!(bound.num_parameters(), 0);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{Parameter, ParameterExpression};
pub use qubit::{ClbitId, QubitId};
pub use register::ClassicalRegister;
