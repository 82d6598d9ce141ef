//! Ansatz Structure Compiler
//!
//! This crate turns a compact, hand-written description of a variational
//! circuit into a validated [`Circuit`] whose rotation angles are symbolic
//! parameters named `p_0, p_1, ...` in the order they were created.
//!
//! # Overview
//!
//! A structure is a list of [`Element`]s:
//! - a layer token (`"rx_layer"`, `"ry_layer"`, `"rz_layer"`) applying that
//!   rotation to every qubit, or `"barrier"`,
//! - a gate tuple such as `("cx", [0, 1])`,
//! - a nested block of further elements, expanded wherever it appears.
//!
//! # Architecture
//!
//! ```text
//! Structure
//!       │
//!       ▼
//! ┌────────────┐
//! │ Flattener  │ ◄── layer expansion
//! └────────────┘
//!       │  GateCall, one at a time
//!       ▼
//! ┌────────────┐
//! │  Applier   │ ◄── GateTaxonomy, ParameterAllocator
//! └────────────┘
//!       │
//!       ▼
//! ┌────────────┐
//! │ Reconciler │
//! └────────────┘
//!       │
//!       ▼
//! (Circuit, ordered parameters, diagnostics)
//! ```
//!
//! # Example
//!
//! ```rust
//! use ansatz_compile::{Element, compile_ansatz};
//!
//! let entangler = Element::block([
//!     Element::gate("cx", [0, 1]),
//!     Element::gate("cx", [1, 2]),
//! ]);
//! let structure = vec![
//!     Element::token("ry_layer"),
//!     entangler.clone(),
//!     Element::token("rz_layer"),
//!     entangler,
//! ];
//!
//! let (circuit, parameters) = compile_ansatz(3, &structure).unwrap();
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(parameters.len(), 6);
//! assert_eq!(parameters[5].name(), "p_5");
//! ```
//!
//! # Gate Categories
//!
//! | Category | Gates | Parameters |
//! |----------|-------|------------|
//! | single-qubit rotation | `rx ry rz p` | one per target |
//! | shared rotation | `crx cry crz cp cu1 rxx ryy rzz rzx` | one per instruction |
//! | fixed single-qubit | `h s t x y z sdg tdg id sx sxdg` | none |
//! | fixed multi-qubit | `cx cy cz ch swap iswap ccx cswap` | none |
//! | refused | `u cu r u2 u3 cu3` | error |
//! | directives | `barrier measure` | none |

pub mod allocator;
pub mod apply;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod flatten;
pub mod layer;
pub mod logging;
pub mod reconcile;
pub mod structure;
pub mod taxonomy;

use ansatz_ir::{Circuit, Parameter};
use tracing::{debug, info, instrument};

pub use allocator::ParameterAllocator;
pub use apply::Applier;
pub use config::{CompileOptions, ConfigError, LayerQubitPolicy, LogFormat, LoggingConfig};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{CompileError, CompileResult, ErrorKind};
pub use flatten::{Flattener, ResolvedInstruction, flatten};
pub use layer::{LayerKind, expand_layer};
pub use reconcile::{reconcile, sort_parameters};
pub use structure::{AnsatzStructure, Element, GateCall};
pub use taxonomy::{GateCategory, GateTaxonomy};

/// The result of a successful compile call.
#[derive(Debug, Clone)]
pub struct CompiledAnsatz {
    /// The finished circuit.
    pub circuit: Circuit,
    /// Parameters in binding order.
    pub parameters: Vec<Parameter>,
    /// Advisories raised along the way.
    pub diagnostics: Diagnostics,
}

impl CompiledAnsatz {
    /// Split into the circuit and its ordered parameters.
    pub fn into_parts(self) -> (Circuit, Vec<Parameter>) {
        (self.circuit, self.parameters)
    }
}

/// Compiles ansatz structures under a fixed set of options.
///
/// The compiler holds no per-call state, so one instance can serve any
/// number of calls, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct AnsatzCompiler {
    options: CompileOptions,
}

impl AnsatzCompiler {
    /// Create a compiler, validating `options`.
    pub fn new(options: CompileOptions) -> CompileResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in effect.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `structure` onto a fresh circuit of `num_qubits` qubits.
    #[instrument(skip(self, structure), fields(circuit = %self.options.circuit_name))]
    pub fn compile(
        &self,
        num_qubits: i64,
        structure: impl AsRef<[Element]>,
    ) -> CompileResult<CompiledAnsatz> {
        let width = u32::try_from(num_qubits)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(CompileError::InvalidQubitCount(num_qubits))?;
        let elements = structure.as_ref();

        info!(
            "Compiling ansatz with {} top-level elements on {} qubits",
            elements.len(),
            width
        );

        let mut circuit = Circuit::new(self.options.circuit_name.clone(), width);
        let mut allocator = ParameterAllocator::new();
        let mut diagnostics = Diagnostics::new();
        let applier = Applier::new(&self.options.measure_register_prefix);
        let mut flattener = Flattener::new(elements, width, self.options.layer_qubits);

        while let Some(instruction) = flattener.next_instruction(&mut diagnostics) {
            let ResolvedInstruction { call, position } = instruction?;
            applier.apply(&call, &mut circuit, &mut allocator, &mut diagnostics)?;
            debug!(
                "Applied {} to {:?} from {}, parameters allocated: {}",
                call.gate,
                call.qubits,
                position,
                allocator.counter()
            );
        }

        let parameters = reconcile::reconcile(allocator.into_allocated(), &circuit, &mut diagnostics);

        info!(
            "Compiled ansatz: {} ops, {} parameters, {} diagnostics",
            circuit.num_ops(),
            parameters.len(),
            diagnostics.len()
        );

        Ok(CompiledAnsatz {
            circuit,
            parameters,
            diagnostics,
        })
    }

    /// Compile a structure given as JSON text.
    pub fn compile_json(&self, num_qubits: i64, json: &str) -> CompileResult<CompiledAnsatz> {
        self.compile(num_qubits, AnsatzStructure::from_json_str(json)?)
    }

    /// Compile a structure given as YAML text.
    pub fn compile_yaml(&self, num_qubits: i64, yaml: &str) -> CompileResult<CompiledAnsatz> {
        self.compile(num_qubits, AnsatzStructure::from_yaml_str(yaml)?)
    }
}

/// Compile `structure` with default options.
///
/// Returns the circuit and its parameters in binding order. Diagnostics are
/// logged; use [`AnsatzCompiler::compile`] to receive them.
pub fn compile_ansatz(
    num_qubits: i64,
    structure: impl AsRef<[Element]>,
) -> CompileResult<(Circuit, Vec<Parameter>)> {
    AnsatzCompiler::default()
        .compile(num_qubits, structure)
        .map(CompiledAnsatz::into_parts)
}
