//! Instruction validation and application.
//!
//! Each flattened [`GateCall`] is canonicalized, bounds-checked, classified,
//! and then applied to the circuit according to its [`GateCategory`].

use ansatz_ir::{Circuit, IrError, Parameter, QubitId, StandardGate};
use rustc_hash::FxHashSet;

use crate::allocator::ParameterAllocator;
use crate::config::DEFAULT_MEASURE_REGISTER_PREFIX;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{CompileError, CompileResult};
use crate::structure::GateCall;
use crate::taxonomy::{Arity, GateCategory, GateSpec, GateTaxonomy};

/// Applies gate calls to a circuit under construction.
#[derive(Debug, Clone, Copy)]
pub struct Applier<'a> {
    taxonomy: &'static GateTaxonomy,
    register_prefix: &'a str,
}

impl Default for Applier<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_MEASURE_REGISTER_PREFIX)
    }
}

impl<'a> Applier<'a> {
    /// Create an applier naming new measurement registers after `register_prefix`.
    pub fn new(register_prefix: &'a str) -> Self {
        Self {
            taxonomy: GateTaxonomy::global(),
            register_prefix,
        }
    }

    /// Validate `call` and apply it to `circuit`.
    ///
    /// Parameters are drawn from `allocator` in target order. On error the
    /// circuit may hold a partial application of this call; callers discard
    /// it.
    pub fn apply(
        &self,
        call: &GateCall,
        circuit: &mut Circuit,
        allocator: &mut ParameterAllocator,
        diagnostics: &mut Diagnostics,
    ) -> CompileResult<()> {
        let canonical = GateTaxonomy::canonicalize(&call.gate);

        let targets = if call.qubits.is_empty() {
            if canonical != "barrier" {
                diagnostics.push(Diagnostic::EmptyTargets {
                    gate: call.gate.clone(),
                });
                return Ok(());
            }
            (0..circuit.num_qubits()).map(QubitId).collect()
        } else {
            resolve_targets(&call.gate, &call.qubits, circuit.num_qubits())?
        };

        let spec = self.taxonomy.lookup(&call.gate)?;

        match spec.category {
            GateCategory::SingleQubitParametric => {
                for &qubit in &targets {
                    let gate = native(spec, call, Some(allocator.next()))?;
                    apply_gate(circuit, &call.gate, gate, &[qubit])?;
                }
            }
            GateCategory::NonParametricSingle => {
                let gate = native(spec, call, None)?;
                for &qubit in &targets {
                    apply_gate(circuit, &call.gate, gate.clone(), &[qubit])?;
                }
            }
            GateCategory::MultiQubitParametric => {
                let gate = native(spec, call, Some(allocator.next()))?;
                apply_gate(circuit, &call.gate, gate, &targets)?;
            }
            GateCategory::NonParametricMulti => {
                if let Arity::Fixed(expected) = spec.arity {
                    if targets.len() != expected as usize {
                        return Err(CompileError::Arity {
                            gate: call.gate.clone(),
                            expected: spec.arity.to_string(),
                            got: targets.len(),
                        });
                    }
                }
                let gate = native(spec, call, None)?;
                apply_gate(circuit, &call.gate, gate, &targets)?;
            }
            GateCategory::DisallowedMultiParameter => {
                return Err(CompileError::DisallowedGate {
                    gate: call.gate.clone(),
                });
            }
            GateCategory::Barrier => {
                circuit
                    .barrier(targets.iter().copied())
                    .map_err(|e| circuit_error(&call.gate, &targets, e))?;
            }
            GateCategory::Measure => {
                diagnostics.push(Diagnostic::MeasureInAnsatz {
                    qubits: call.qubits.clone(),
                });
                let register = self.measure_register(circuit, &targets, diagnostics)?;
                circuit
                    .measure_into(&targets, &register)
                    .map_err(|e| circuit_error(&call.gate, &targets, e))?;
            }
        }
        Ok(())
    }

    /// Find a classical register as wide as `targets`, or create one.
    ///
    /// The first register created is named after the prefix; later ones get
    /// the smallest free numeric suffix.
    fn measure_register(
        &self,
        circuit: &mut Circuit,
        targets: &[QubitId],
        diagnostics: &mut Diagnostics,
    ) -> CompileResult<String> {
        if let Some(existing) = circuit.cregs().iter().find(|r| r.len() == targets.len()) {
            return Ok(existing.name().to_string());
        }

        let name = if circuit.cregs().is_empty() {
            self.register_prefix.to_string()
        } else {
            (0u32..)
                .map(|n| format!("{}{n}", self.register_prefix))
                .find(|candidate| circuit.creg(candidate).is_none())
                .unwrap_or_else(|| self.register_prefix.to_string())
        };
        let size = targets.len() as u32;
        circuit
            .add_creg(name.clone(), size)
            .map_err(|e| circuit_error("measure", targets, e))?;
        diagnostics.push(Diagnostic::ClassicalRegisterAdded {
            name: name.clone(),
            size,
        });
        Ok(name)
    }
}

/// Check that every index is in `0..num_qubits` and appears once.
fn resolve_targets(gate: &str, qubits: &[i64], num_qubits: u32) -> CompileResult<Vec<QubitId>> {
    let mut seen = FxHashSet::default();
    qubits
        .iter()
        .map(|&index| {
            let qubit = u32::try_from(index)
                .ok()
                .filter(|&q| q < num_qubits)
                .ok_or_else(|| CompileError::QubitOutOfBounds {
                    index,
                    gate: gate.to_string(),
                    num_qubits,
                })?;
            if !seen.insert(qubit) {
                return Err(CompileError::DuplicateQubit {
                    index,
                    gate: gate.to_string(),
                });
            }
            Ok(QubitId(qubit))
        })
        .collect()
}

fn native(
    spec: &GateSpec,
    call: &GateCall,
    parameter: Option<Parameter>,
) -> CompileResult<StandardGate> {
    spec.build(parameter.map(Into::into))
        .ok_or_else(|| CompileError::UnsupportedGate {
            gate: call.gate.clone(),
            canonical: spec.name.to_string(),
        })
}

fn apply_gate(
    circuit: &mut Circuit,
    name: &str,
    gate: StandardGate,
    targets: &[QubitId],
) -> CompileResult<()> {
    circuit
        .gate(gate, targets.iter().copied())
        .map(|_| ())
        .map_err(|e| circuit_error(name, targets, e))
}

/// Wrap a circuit-model failure: operand count mismatches become arity
/// errors, anything else is internal.
fn circuit_error(gate: &str, targets: &[QubitId], err: IrError) -> CompileError {
    match err {
        IrError::QubitCountMismatch { expected, got, .. } => CompileError::Arity {
            gate: gate.to_string(),
            expected: Arity::Fixed(expected).to_string(),
            got: got as usize,
        },
        source => CompileError::Internal {
            operation: gate.to_string(),
            qubits: targets.iter().map(|q| i64::from(q.0)).collect(),
            source,
        },
    }
}
