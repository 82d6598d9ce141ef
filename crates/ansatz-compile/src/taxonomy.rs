//! Gate taxonomy: which gates the structure format can express, and how.
//!
//! Every canonical gate name belongs to exactly one [`GateCategory`]. The
//! category decides how targets are consumed and how many symbolic parameters
//! an instruction allocates. Names are matched case-insensitively after
//! resolving a small alias table (`cnot`, `toffoli`, `meas`, `u1`).

use std::fmt;
use std::sync::LazyLock;

use ansatz_ir::{ParameterExpression, StandardGate};
use rustc_hash::FxHashMap;

use crate::error::{CompileError, CompileResult};

/// How a gate consumes its target list and parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateCategory {
    /// One-qubit rotation; each target gets its own fresh parameter.
    SingleQubitParametric,
    /// Multi-qubit rotation; one parameter shared by all targets.
    MultiQubitParametric,
    /// Fixed one-qubit gate applied once per target.
    NonParametricSingle,
    /// Fixed multi-qubit gate applied once to all targets.
    NonParametricMulti,
    /// Needs more than one continuous parameter; refused by the compiler.
    DisallowedMultiParameter,
    /// Synchronization barrier.
    Barrier,
    /// Measurement into an auto-provisioned classical register.
    Measure,
}

/// Number of qubits an instruction of a given gate must target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many qubits, as positional operands.
    Fixed(u32),
    /// Any non-empty list; the gate is applied to each qubit on its own.
    PerQubit,
    /// Any non-empty list, applied as a whole.
    Variadic,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(1) => write!(f, "exactly 1 qubit"),
            Arity::Fixed(n) => write!(f, "exactly {n} qubits"),
            Arity::PerQubit => write!(f, "one or more qubits (applied per qubit)"),
            Arity::Variadic => write!(f, "one or more qubits"),
        }
    }
}

/// How a canonical name maps onto the circuit model.
#[derive(Debug, Clone)]
enum Native {
    Fixed(StandardGate),
    Rotation(fn(ParameterExpression) -> StandardGate),
    Directive,
}

/// Static description of one canonical gate.
#[derive(Debug, Clone)]
pub struct GateSpec {
    /// Canonical (alias-resolved, lowercase) name.
    pub name: &'static str,
    /// Category driving dispatch in the applier.
    pub category: GateCategory,
    /// Required number of targets.
    pub arity: Arity,
    /// Number of continuous parameters the native gate takes.
    pub num_params: u8,
    native: Native,
}

impl GateSpec {
    const fn rotation(name: &'static str, ctor: fn(ParameterExpression) -> StandardGate) -> Self {
        Self {
            name,
            category: GateCategory::SingleQubitParametric,
            arity: Arity::PerQubit,
            num_params: 1,
            native: Native::Rotation(ctor),
        }
    }

    const fn shared_rotation(
        name: &'static str,
        ctor: fn(ParameterExpression) -> StandardGate,
        qubits: u32,
    ) -> Self {
        Self {
            name,
            category: GateCategory::MultiQubitParametric,
            arity: Arity::Fixed(qubits),
            num_params: 1,
            native: Native::Rotation(ctor),
        }
    }

    const fn single(name: &'static str, gate: StandardGate) -> Self {
        Self {
            name,
            category: GateCategory::NonParametricSingle,
            arity: Arity::PerQubit,
            num_params: 0,
            native: Native::Fixed(gate),
        }
    }

    const fn multi(name: &'static str, gate: StandardGate, qubits: u32) -> Self {
        Self {
            name,
            category: GateCategory::NonParametricMulti,
            arity: Arity::Fixed(qubits),
            num_params: 0,
            native: Native::Fixed(gate),
        }
    }

    const fn disallowed(name: &'static str, qubits: u32, num_params: u8) -> Self {
        Self {
            name,
            category: GateCategory::DisallowedMultiParameter,
            arity: Arity::Fixed(qubits),
            num_params,
            native: Native::Directive,
        }
    }

    const fn directive(name: &'static str, category: GateCategory) -> Self {
        Self {
            name,
            category,
            arity: Arity::Variadic,
            num_params: 0,
            native: Native::Directive,
        }
    }

    /// Build the circuit-model gate for this spec.
    ///
    /// Returns `None` for barrier, measure, and disallowed gates, and when a
    /// rotation is built without its angle.
    pub fn build(&self, angle: Option<ParameterExpression>) -> Option<StandardGate> {
        match (&self.native, angle) {
            (Native::Fixed(gate), _) => Some(gate.clone()),
            (Native::Rotation(ctor), Some(angle)) => Some(ctor(angle)),
            (Native::Rotation(_), None) | (Native::Directive, _) => None,
        }
    }
}

/// Alias → canonical name.
pub const ALIASES: &[(&str, &str)] = &[
    ("cnot", "cx"),
    ("toffoli", "ccx"),
    ("meas", "measure"),
    ("u1", "p"),
];

static GATES: &[GateSpec] = &[
    // Single-qubit rotations
    GateSpec::rotation("rx", StandardGate::Rx),
    GateSpec::rotation("ry", StandardGate::Ry),
    GateSpec::rotation("rz", StandardGate::Rz),
    GateSpec::rotation("p", StandardGate::P),
    // Two-qubit rotations sharing one angle
    GateSpec::shared_rotation("crx", StandardGate::CRx, 2),
    GateSpec::shared_rotation("cry", StandardGate::CRy, 2),
    GateSpec::shared_rotation("crz", StandardGate::CRz, 2),
    GateSpec::shared_rotation("cp", StandardGate::CP, 2),
    GateSpec::shared_rotation("cu1", StandardGate::CP, 2),
    GateSpec::shared_rotation("rxx", StandardGate::RXX, 2),
    GateSpec::shared_rotation("ryy", StandardGate::RYY, 2),
    GateSpec::shared_rotation("rzz", StandardGate::RZZ, 2),
    GateSpec::shared_rotation("rzx", StandardGate::RZX, 2),
    // Fixed single-qubit gates
    GateSpec::single("h", StandardGate::H),
    GateSpec::single("s", StandardGate::S),
    GateSpec::single("t", StandardGate::T),
    GateSpec::single("x", StandardGate::X),
    GateSpec::single("y", StandardGate::Y),
    GateSpec::single("z", StandardGate::Z),
    GateSpec::single("sdg", StandardGate::Sdg),
    GateSpec::single("tdg", StandardGate::Tdg),
    GateSpec::single("id", StandardGate::I),
    GateSpec::single("sx", StandardGate::SX),
    GateSpec::single("sxdg", StandardGate::SXdg),
    // Fixed multi-qubit gates
    GateSpec::multi("cx", StandardGate::CX, 2),
    GateSpec::multi("cy", StandardGate::CY, 2),
    GateSpec::multi("cz", StandardGate::CZ, 2),
    GateSpec::multi("ch", StandardGate::CH, 2),
    GateSpec::multi("swap", StandardGate::Swap, 2),
    GateSpec::multi("iswap", StandardGate::ISwap, 2),
    GateSpec::multi("ccx", StandardGate::CCX, 3),
    GateSpec::multi("cswap", StandardGate::CSwap, 3),
    // Gates needing several angles
    GateSpec::disallowed("u", 1, 3),
    GateSpec::disallowed("cu", 2, 4),
    GateSpec::disallowed("r", 1, 2),
    GateSpec::disallowed("u2", 1, 2),
    GateSpec::disallowed("u3", 1, 3),
    GateSpec::disallowed("cu3", 2, 3),
    // Directives
    GateSpec::directive("barrier", GateCategory::Barrier),
    GateSpec::directive("measure", GateCategory::Measure),
];

static TAXONOMY: LazyLock<GateTaxonomy> = LazyLock::new(GateTaxonomy::build);

/// Lookup table from canonical name to [`GateSpec`], built once per process.
#[derive(Debug)]
pub struct GateTaxonomy {
    by_name: FxHashMap<&'static str, &'static GateSpec>,
}

impl GateTaxonomy {
    fn build() -> Self {
        let by_name = GATES.iter().map(|spec| (spec.name, spec)).collect();
        Self { by_name }
    }

    /// The process-wide taxonomy.
    pub fn global() -> &'static GateTaxonomy {
        &TAXONOMY
    }

    /// Lowercase `name` and resolve it through the alias table.
    pub fn canonicalize(name: &str) -> String {
        let lower = name.to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map_or(lower, |(_, canonical)| (*canonical).to_string())
    }

    /// Look up an already-canonical name.
    pub fn get(&self, canonical: &str) -> Option<&'static GateSpec> {
        self.by_name.get(canonical).copied()
    }

    /// Canonicalize `name` and look it up; `None` if unknown.
    pub fn classify(&self, name: &str) -> Option<&'static GateSpec> {
        self.get(&Self::canonicalize(name))
    }

    /// Like [`classify`](Self::classify), failing with an error that lists
    /// the accepted aliases.
    pub fn lookup(&self, name: &str) -> CompileResult<&'static GateSpec> {
        self.classify(name)
            .ok_or_else(|| CompileError::UnrecognizedGate {
                name: name.to_string(),
                aliases: render_aliases(),
            })
    }

    /// All gate specs in one category, in table order.
    pub fn in_category(&self, category: GateCategory) -> impl Iterator<Item = &'static GateSpec> {
        GATES.iter().filter(move |spec| spec.category == category)
    }
}

fn render_aliases() -> String {
    ALIASES
        .iter()
        .map(|(alias, canonical)| format!("{alias} -> {canonical}"))
        .collect::<Vec<_>>()
        .join(", ")
}
