//! Symbolic parameters for variational circuits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named symbolic placeholder, bound to a number only at evaluation time.
///
/// Two parameters are the same parameter when their names match. Within a
/// single compiled ansatz every name is unique, so the name doubles as the
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
}

impl Parameter {
    /// Create a parameter with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The display name of this parameter (e.g. `p_3`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The first run of ASCII digits in the name, parsed as an integer.
    ///
    /// `p_12` yields `Some(12)`; `theta` yields `None`. Digit runs too large
    /// for a `u64` also yield `None`.
    pub fn numeric_suffix(&self) -> Option<u64> {
        let start = self.name.find(|c: char| c.is_ascii_digit())?;
        let digits: &str = &self.name[start..];
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end].parse().ok()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The angle argument of a rotation gate: either still symbolic or bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A concrete numeric value.
    Constant(f64),
    /// A symbolic parameter awaiting a value.
    Symbol(Parameter),
}

impl ParameterExpression {
    /// Check if this expression still refers to a symbol.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, ParameterExpression::Symbol(_))
    }

    /// The concrete value, if bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
        }
    }

    /// The symbol this expression refers to, if any.
    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            ParameterExpression::Symbol(p) => Some(p),
            ParameterExpression::Constant(_) => None,
        }
    }

    /// Bind `parameter` to `value`, returning a new expression.
    ///
    /// Expressions referring to other parameters are returned unchanged.
    pub fn bind(&self, parameter: &Parameter, value: f64) -> Self {
        match self {
            ParameterExpression::Symbol(p) if p == parameter => ParameterExpression::Constant(value),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(p) => write!(f, "{p}"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<Parameter> for ParameterExpression {
    fn from(parameter: Parameter) -> Self {
        ParameterExpression::Symbol(parameter)
    }
}
