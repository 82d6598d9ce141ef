//! Structure flattening.
//!
//! Nested blocks are spliced in place with an explicit work stack, so the
//! traversal is depth-first and left-to-right with no recursion. A block that
//! occurs twice is walked twice.

use std::fmt;

use crate::config::LayerQubitPolicy;
use crate::diagnostics::Diagnostics;
use crate::error::CompileResult;
use crate::layer::{self, LayerKind};
use crate::structure::{Element, GateCall};

/// Location of an element in the nested structure, outermost index first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Position(Vec<usize>);

impl Position {
    fn child(&self, index: usize) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        Self(path)
    }

    /// Indices from the outermost list inwards.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in &self.0 {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// A gate call ready for the applier, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstruction {
    /// Gate name and targets.
    pub call: GateCall,
    /// Position of the originating element.
    pub position: Position,
}

/// Pull-based walk over a structure.
///
/// Instructions are produced one at a time so that an error in a later
/// element surfaces only after every earlier element has been applied.
#[derive(Debug)]
pub struct Flattener<'a> {
    stack: Vec<(&'a Element, Position)>,
    num_qubits: u32,
    policy: LayerQubitPolicy,
}

impl<'a> Flattener<'a> {
    /// Start a walk over `elements`.
    pub fn new(elements: &'a [Element], num_qubits: u32, policy: LayerQubitPolicy) -> Self {
        let root = Position::default();
        let stack = elements
            .iter()
            .enumerate()
            .rev()
            .map(|(i, element)| (element, root.child(i)))
            .collect();
        Self {
            stack,
            num_qubits,
            policy,
        }
    }

    /// Produce the next instruction, or `None` when the structure is consumed.
    ///
    /// Layer tokens are expanded here; diagnostics they raise go to
    /// `diagnostics`.
    pub fn next_instruction(
        &mut self,
        diagnostics: &mut Diagnostics,
    ) -> Option<CompileResult<ResolvedInstruction>> {
        while let Some((element, position)) = self.stack.pop() {
            let call = match element {
                Element::Block(children) => {
                    self.stack.extend(
                        children
                            .iter()
                            .enumerate()
                            .rev()
                            .map(|(i, child)| (child, position.child(i))),
                    );
                    continue;
                }
                Element::Token(token) => layer::expand_token(token, self.num_qubits),
                Element::Gate(call) => match LayerKind::from_token(&call.gate) {
                    Some(kind) => layer::expand_layer_call(
                        kind,
                        &call.qubits,
                        self.num_qubits,
                        self.policy,
                        diagnostics,
                    ),
                    None => Ok(call.clone()),
                },
            };
            return Some(call.map(|call| ResolvedInstruction { call, position }));
        }
        None
    }
}

/// Flatten a whole structure eagerly.
pub fn flatten(
    elements: &[Element],
    num_qubits: u32,
    policy: LayerQubitPolicy,
) -> CompileResult<(Vec<ResolvedInstruction>, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();
    let mut flattener = Flattener::new(elements, num_qubits, policy);
    let mut instructions = Vec::new();
    while let Some(instruction) = flattener.next_instruction(&mut diagnostics) {
        instructions.push(instruction?);
    }
    Ok((instructions, diagnostics))
}
