//! Ansatz structure elements and their JSON/YAML representation.
//!
//! A structure is an ordered list of [`Element`]s. In serialized form:
//!
//! - a string is a bare token (`"ry_layer"`, `"barrier"`),
//! - `[name, [q, ...]]` or `{"gate": name, "qubits": [q, ...]}` is a gate
//!   tuple,
//! - any other array is a nested block.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CompileError, CompileResult};

/// A gate name applied to a list of qubit indices.
///
/// Indices are signed so that negative indices written by a caller survive
/// until validation and can be reported precisely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name as written (case-insensitive, aliases allowed).
    pub gate: String,
    /// Target qubit indices.
    pub qubits: Vec<i64>,
}

/// One entry of an ansatz structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Element {
    /// A bare shortcut token.
    Token(String),
    /// A `(gate, qubits)` tuple.
    Gate(GateCall),
    /// A nested block, spliced in place when flattened.
    Block(Vec<Element>),
}

impl Element {
    /// A bare shortcut token such as `"rz_layer"`.
    pub fn token(token: impl Into<String>) -> Self {
        Element::Token(token.into())
    }

    /// A gate tuple.
    pub fn gate(gate: impl Into<String>, qubits: impl IntoIterator<Item = i64>) -> Self {
        Element::Gate(GateCall {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
        })
    }

    /// A nested block.
    pub fn block(elements: impl IntoIterator<Item = Element>) -> Self {
        Element::Block(elements.into_iter().collect())
    }

    /// Parse one element from a JSON value; `path` locates it in error messages.
    fn from_value(value: &Value, path: &str) -> CompileResult<Self> {
        match value {
            Value::String(token) => Ok(Element::Token(token.clone())),
            Value::Array(items) => match items.as_slice() {
                [Value::String(gate), Value::Array(qubits)]
                    if qubits.iter().all(Value::is_number) =>
                {
                    Ok(Element::Gate(GateCall {
                        gate: gate.clone(),
                        qubits: parse_qubits(qubits, &format!("{path}[1]"))?,
                    }))
                }
                _ => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Element::from_value(item, &format!("{path}[{i}]")))
                    .collect::<CompileResult<Vec<_>>>()
                    .map(Element::Block),
            },
            Value::Object(map) => {
                let gate = map.get("gate").and_then(Value::as_str);
                let qubits = map.get("qubits").and_then(Value::as_array);
                match (gate, qubits, map.len()) {
                    (Some(gate), Some(qubits), 2) => Ok(Element::Gate(GateCall {
                        gate: gate.to_string(),
                        qubits: parse_qubits(qubits, &format!("{path}.qubits"))?,
                    })),
                    _ => Err(format_error(
                        path,
                        "objects must have exactly the keys 'gate' (string) and 'qubits' (list)",
                        value,
                    )),
                }
            }
            _ => Err(format_error(
                path,
                "elements must be a token string, a (gate, qubits) tuple, or a block list",
                value,
            )),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Element::Token(token) => Value::from(token.as_str()),
            Element::Gate(call) => Value::Array(vec![
                Value::from(call.gate.as_str()),
                Value::from(call.qubits.clone()),
            ]),
            Element::Block(elements) => Value::Array(elements.iter().map(Element::to_value).collect()),
        }
    }
}

fn parse_qubits(values: &[Value], path: &str) -> CompileResult<Vec<i64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_i64().ok_or_else(|| {
                format_error(&format!("{path}[{i}]"), "qubit indices must be integers", v)
            })
        })
        .collect()
}

fn format_error(path: &str, reason: &str, value: &Value) -> CompileError {
    CompileError::StructureFormat {
        path: if path.is_empty() { "<root>".into() } else { path.to_string() },
        reason: reason.to_string(),
        element: value.to_string(),
    }
}

impl TryFrom<Value> for Element {
    type Error = CompileError;

    fn try_from(value: Value) -> CompileResult<Self> {
        Element::from_value(&value, "")
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        element.to_value()
    }
}

impl From<&str> for Element {
    fn from(token: &str) -> Self {
        Element::token(token)
    }
}

impl<const N: usize> From<(&str, [i64; N])> for Element {
    fn from((gate, qubits): (&str, [i64; N])) -> Self {
        Element::gate(gate, qubits)
    }
}

impl From<Vec<Element>> for Element {
    fn from(elements: Vec<Element>) -> Self {
        Element::Block(elements)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Token(token) => write!(f, "'{token}'"),
            Element::Gate(call) => write!(f, "('{}', {:?})", call.gate, call.qubits),
            Element::Block(elements) => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A complete ansatz structure: the top-level element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AnsatzStructure(pub Vec<Element>);

impl AnsatzStructure {
    /// Build a structure from a list of elements.
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
        Self(elements.into_iter().collect())
    }

    /// The top-level elements.
    pub fn elements(&self) -> &[Element] {
        &self.0
    }

    /// Parse a structure from a JSON value.
    ///
    /// The value must be an array; anything else is a configuration error.
    pub fn from_json_value(value: &Value) -> CompileResult<Self> {
        let Value::Array(items) = value else {
            return Err(CompileError::InvalidStructure(value.to_string()));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Element::from_value(item, &format!("[{i}]")))
            .collect::<CompileResult<Vec<_>>>()
            .map(Self)
    }

    /// Parse a structure from JSON text.
    pub fn from_json_str(json: &str) -> CompileResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CompileError::InvalidStructure(format!("invalid JSON: {e}")))?;
        Self::from_json_value(&value)
    }

    /// Parse a structure from YAML text.
    pub fn from_yaml_str(yaml: &str) -> CompileResult<Self> {
        let value: Value = serde_yaml_ng::from_str(yaml)
            .map_err(|e| CompileError::InvalidStructure(format!("invalid YAML: {e}")))?;
        Self::from_json_value(&value)
    }
}

impl TryFrom<Value> for AnsatzStructure {
    type Error = CompileError;

    fn try_from(value: Value) -> CompileResult<Self> {
        Self::from_json_value(&value)
    }
}

impl From<AnsatzStructure> for Value {
    fn from(structure: AnsatzStructure) -> Self {
        Value::Array(structure.0.iter().map(Element::to_value).collect())
    }
}

impl AsRef<[Element]> for AnsatzStructure {
    fn as_ref(&self) -> &[Element] {
        &self.0
    }
}

impl From<Vec<Element>> for AnsatzStructure {
    fn from(elements: Vec<Element>) -> Self {
        Self(elements)
    }
}
