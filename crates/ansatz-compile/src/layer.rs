//! Layer shortcut expansion.
//!
//! `rx_layer`, `ry_layer` and `rz_layer` stand for the matching rotation
//! applied to every qubit of the circuit. The expansion is an ordinary
//! single-qubit-parametric gate call, so each qubit later receives its own
//! parameter.

use std::fmt;

use crate::config::LayerQubitPolicy;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{CompileError, CompileResult};
use crate::structure::GateCall;

/// Tokens accepted in bare form.
pub const SUPPORTED_TOKENS: &[&str] = &["rx_layer", "ry_layer", "rz_layer", "barrier"];

/// The rotation a layer token expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// `rx_layer`
    Rx,
    /// `ry_layer`
    Ry,
    /// `rz_layer`
    Rz,
}

impl LayerKind {
    /// Parse a layer token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "rx_layer" => Some(LayerKind::Rx),
            "ry_layer" => Some(LayerKind::Ry),
            "rz_layer" => Some(LayerKind::Rz),
            _ => None,
        }
    }

    /// The token spelling.
    pub fn token(self) -> &'static str {
        match self {
            LayerKind::Rx => "rx_layer",
            LayerKind::Ry => "ry_layer",
            LayerKind::Rz => "rz_layer",
        }
    }

    /// The rotation gate applied to each qubit.
    pub fn gate(self) -> &'static str {
        match self {
            LayerKind::Rx => "rx",
            LayerKind::Ry => "ry",
            LayerKind::Rz => "rz",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The rotation of `kind` across qubits `0..num_qubits`.
pub fn expand_layer(kind: LayerKind, num_qubits: u32) -> GateCall {
    GateCall {
        gate: kind.gate().to_string(),
        qubits: (0..i64::from(num_qubits)).collect(),
    }
}

/// Expand a bare string token.
///
/// Layer tokens span every qubit. `barrier` becomes a barrier with an empty
/// target list, which the applier widens to all qubits.
pub fn expand_token(token: &str, num_qubits: u32) -> CompileResult<GateCall> {
    if let Some(kind) = LayerKind::from_token(token) {
        return Ok(expand_layer(kind, num_qubits));
    }
    if token.eq_ignore_ascii_case("barrier") {
        return Ok(GateCall {
            gate: "barrier".to_string(),
            qubits: vec![],
        });
    }
    Err(CompileError::UnrecognizedInstruction {
        token: token.to_string(),
        supported: SUPPORTED_TOKENS.join(", "),
    })
}

/// Expand a layer token written in tuple form, e.g. `("ry_layer", [0, 2])`.
///
/// An empty list always spans every qubit. A non-empty list is handled per
/// `policy`.
pub fn expand_layer_call(
    kind: LayerKind,
    qubits: &[i64],
    num_qubits: u32,
    policy: LayerQubitPolicy,
    diagnostics: &mut Diagnostics,
) -> CompileResult<GateCall> {
    if qubits.is_empty() {
        return Ok(expand_layer(kind, num_qubits));
    }
    match policy {
        LayerQubitPolicy::Ignore => {
            diagnostics.push(Diagnostic::RedundantLayerQubits {
                token: kind.token().to_string(),
                qubits: qubits.to_vec(),
            });
            Ok(expand_layer(kind, num_qubits))
        }
        LayerQubitPolicy::Honor => Ok(GateCall {
            gate: kind.gate().to_string(),
            qubits: qubits.to_vec(),
        }),
        LayerQubitPolicy::Reject => Err(CompileError::LayerQubitsRejected {
            token: kind.token().to_string(),
            qubits: qubits.to_vec(),
        }),
    }
}
