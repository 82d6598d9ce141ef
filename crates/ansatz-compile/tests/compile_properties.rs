//! Integration tests for the ordering and naming contract of compiled ansatzes.
//!
//! Callers bind a flat numeric vector to the returned parameter list by
//! position, so these tests pin down parameter counts, names, and order for
//! realistic structures as well as the failure modes that must abort a call.

use ansatz_compile::{
    AnsatzCompiler, CompileError, CompileOptions, Diagnostic, Element, ErrorKind,
    LayerQubitPolicy, compile_ansatz,
};
use ansatz_ir::{Circuit, Parameter, QubitId};

/// Helper: parameter names in returned order.
fn names(parameters: &[Parameter]) -> Vec<String> {
    parameters.iter().map(|p| p.name().to_string()).collect()
}

/// Helper: `p_0 .. p_{k-1}`.
fn expected_names(k: usize) -> Vec<String> {
    (0..k).map(|i| format!("p_{i}")).collect()
}

/// Helper: parameter names referenced by each instruction, in circuit order.
fn parameter_trace(circuit: &Circuit) -> Vec<String> {
    circuit
        .instructions()
        .iter()
        .flat_map(|inst| inst.parameters().map(|p| p.name().to_string()))
        .collect()
}

/// Two-qubit block: ry on both, entangle, rz on both.
fn linear_block() -> Element {
    Element::block([
        Element::gate("ry", [0, 1]),
        Element::gate("cx", [0, 1]),
        Element::gate("rz", [0, 1]),
    ])
}

#[test]
fn test_two_qubit_block_reuse() {
    let block = linear_block();
    let structure = vec![block.clone(), Element::gate("barrier", []), block];

    let (circuit, parameters) = compile_ansatz(2, &structure).unwrap();

    assert_eq!(names(&parameters), expected_names(8));
    assert_eq!(circuit.num_parameters(), 8);
    assert_eq!(parameter_trace(&circuit), expected_names(8));

    let ops = circuit.count_ops();
    assert_eq!(ops.get("ry"), Some(&4));
    assert_eq!(ops.get("rz"), Some(&4));
    assert_eq!(ops.get("cx"), Some(&2));
    assert_eq!(ops.get("barrier"), Some(&1));
}

#[test]
fn test_reusing_a_block_doubles_parameters() {
    let block = Element::block([
        Element::gate("ry", [0, 1, 2]),
        Element::gate("cx", [0, 1]),
        Element::gate("cx", [1, 2]),
        Element::gate("rz", [0, 1, 2]),
    ]);

    let (_, once) = compile_ansatz(3, [block.clone()]).unwrap();
    let (_, twice) = compile_ansatz(3, [block.clone(), block]).unwrap();

    assert_eq!(once.len(), 6);
    assert_eq!(twice.len(), 12);
    assert_eq!(names(&twice), expected_names(12));
}

#[test]
fn test_three_qubit_structure() {
    let block = Element::block([
        Element::gate("ry", [0, 1, 2]),
        Element::gate("cx", [0, 1]),
        Element::gate("cx", [1, 2]),
        Element::gate("rz", [0, 1, 2]),
    ]);
    let structure = vec![
        Element::gate("h", [0, 1, 2]),
        block.clone(),
        Element::gate("cx", [0, 2]),
        Element::gate("barrier", []),
        block,
    ];

    let compiled = AnsatzCompiler::default().compile(3, &structure).unwrap();

    assert_eq!(compiled.parameters.len(), 12);
    assert!(compiled.diagnostics.is_empty());
    // 3 h + 2 * (3 ry + 2 cx + 3 rz) + 1 cx + 1 barrier
    assert_eq!(compiled.circuit.num_ops(), 21);
}

#[test]
fn test_bare_layer_is_per_qubit_rotation() {
    let (layer_circuit, layer_params) = compile_ansatz(4, [Element::token("ry_layer")]).unwrap();
    let (gate_circuit, gate_params) = compile_ansatz(4, [Element::gate("ry", [0, 1, 2, 3])]).unwrap();

    assert_eq!(layer_circuit, gate_circuit);
    assert_eq!(layer_params, gate_params);
    assert_eq!(names(&layer_params), expected_names(4));
}

#[test]
fn test_multi_qubit_rotation_shares_parameter() {
    let structure = vec![
        Element::gate("rx", [0]),
        Element::gate("rzz", [0, 1]),
        Element::gate("crx", [1, 2]),
        Element::gate("cu1", [2, 0]),
        Element::gate("ry", [1, 2]),
    ];

    let (circuit, parameters) = compile_ansatz(3, &structure).unwrap();

    assert_eq!(names(&parameters), expected_names(6));
    assert_eq!(circuit.num_ops(), 6);
    let cp = &circuit.instructions()[3];
    assert_eq!(cp.name(), "cp");
    assert_eq!(cp.qubits, vec![QubitId(2), QubitId(0)]);
}

#[test]
fn test_layer_tuple_ignored_by_default() {
    let structure = vec![
        Element::gate("h", [0, 1, 2]),
        Element::block([Element::token("ry_layer"), Element::token("barrier")]),
        Element::gate("ry_layer", [5]),
    ];

    let compiled = AnsatzCompiler::default().compile(3, &structure).unwrap();

    assert_eq!(names(&compiled.parameters), expected_names(6));
    assert_eq!(compiled.circuit.count_ops().get("ry"), Some(&6));
    assert_eq!(compiled.circuit.instructions()[6].qubits.len(), 3);
    let diagnostics: Vec<_> = compiled.diagnostics.iter().collect();
    assert_eq!(
        diagnostics,
        [&Diagnostic::RedundantLayerQubits {
            token: "ry_layer".into(),
            qubits: vec![5],
        }]
    );
}

#[test]
fn test_layer_tuple_honored() {
    let structure = vec![
        Element::gate("h", [0, 1, 2]),
        Element::block([Element::token("ry_layer"), Element::token("barrier")]),
        Element::gate("ry_layer", [5]),
    ];
    let compiler =
        AnsatzCompiler::new(CompileOptions::default().with_layer_qubits(LayerQubitPolicy::Honor))
            .unwrap();

    let err = compiler.compile(3, &structure).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bounds);
    assert!(matches!(err, CompileError::QubitOutOfBounds { index: 5, .. }));

    let ok = compiler
        .compile(3, [Element::gate("rz_layer", [0, 2])])
        .unwrap();
    assert_eq!(ok.parameters.len(), 2);
    assert_eq!(ok.circuit.instructions()[1].qubits, vec![QubitId(2)]);
}

#[test]
fn test_layer_tuple_rejected() {
    let compiler =
        AnsatzCompiler::new(CompileOptions::default().with_layer_qubits(LayerQubitPolicy::Reject))
            .unwrap();
    let err = compiler
        .compile(3, [Element::gate("rx_layer", [0])])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_disallowed_multi_parameter_gate() {
    let err = compile_ansatz(2, [Element::gate("cx", [0, 1]), Element::gate("u", [0])]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, CompileError::DisallowedGate { ref gate } if gate == "u"));
}

#[test]
fn test_independent_calls_restart_numbering() {
    let structure = [Element::gate("rz", [0, 1])];
    let (_, first) = compile_ansatz(2, structure.clone()).unwrap();
    let (_, second) = compile_ansatz(2, structure).unwrap();
    assert_eq!(names(&first), ["p_0", "p_1"]);
    assert_eq!(names(&second), ["p_0", "p_1"]);
}

#[test]
fn test_concurrent_calls_are_independent() {
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            std::thread::spawn(move || {
                compile_ansatz(n, [Element::token("rx_layer"), Element::token("rz_layer")]).unwrap()
            })
        })
        .collect();

    for (n, handle) in (1..=4).zip(handles) {
        let (_, parameters) = handle.join().unwrap();
        assert_eq!(names(&parameters), expected_names(2 * n));
    }
}

#[test]
fn test_out_of_bounds_qubit() {
    let err = compile_ansatz(1, [Element::gate("x", [5])]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Bounds);
    let msg = err.to_string();
    assert!(msg.contains("Qubit index 5"));
    assert!(msg.contains("'x'"));
}

#[test]
fn test_error_kinds() {
    let cases: Vec<(Vec<Element>, ErrorKind)> = vec![
        (vec![Element::gate("cx", [0])], ErrorKind::Arity),
        (vec![Element::gate("ccx", [0, 1])], ErrorKind::Arity),
        (vec![Element::gate("foo", [0])], ErrorKind::UnsupportedGate),
        (vec![Element::token("hadamard_layer")], ErrorKind::UnsupportedGate),
        (vec![Element::gate("h", [-2])], ErrorKind::Bounds),
        (vec![Element::gate("swap", [1, 1])], ErrorKind::Bounds),
        (vec![Element::gate("cu3", [0, 1])], ErrorKind::Configuration),
    ];
    for (structure, kind) in cases {
        let err = compile_ansatz(2, &structure).unwrap_err();
        assert_eq!(err.kind(), kind, "{err}");
    }
}

#[test]
fn test_empty_targets_skip_with_diagnostic() {
    let structure = vec![Element::gate("ry", []), Element::gate("rz", [0])];
    let compiled = AnsatzCompiler::default().compile(2, &structure).unwrap();
    assert_eq!(names(&compiled.parameters), ["p_0"]);
    assert_eq!(compiled.circuit.num_ops(), 1);
    assert!(matches!(
        compiled.diagnostics.iter().next(),
        Some(Diagnostic::EmptyTargets { gate }) if gate == "ry"
    ));
}

#[test]
fn test_measure_provisions_register() {
    let structure = vec![Element::token("ry_layer"), Element::gate("measure", [0, 1])];
    let compiled = AnsatzCompiler::default().compile(2, &structure).unwrap();

    let register = compiled.circuit.creg("meas_reg").unwrap();
    assert_eq!(register.len(), 2);
    assert_eq!(compiled.parameters.len(), 2);
    let kinds: Vec<_> = compiled
        .diagnostics
        .iter()
        .map(|d| match d {
            Diagnostic::MeasureInAnsatz { .. } => "measure",
            Diagnostic::ClassicalRegisterAdded { .. } => "register",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["measure", "register"]);
}

#[test]
fn test_parameters_bind_positionally() {
    let structure = vec![linear_block(), linear_block()];
    let (circuit, parameters) = compile_ansatz(2, &structure).unwrap();

    let values: Vec<f64> = (0..parameters.len()).map(|i| i as f64 * 0.1).collect();
    let bound = circuit.assign_parameters(&parameters, &values).unwrap();

    assert_eq!(bound.num_parameters(), 0);
    assert_eq!(bound.num_ops(), circuit.num_ops());
}

#[test]
fn test_no_partial_circuit_on_failure() {
    let structure = vec![linear_block(), Element::gate("x", [9])];
    let result = AnsatzCompiler::default().compile(2, &structure);
    assert!(result.is_err());
}
