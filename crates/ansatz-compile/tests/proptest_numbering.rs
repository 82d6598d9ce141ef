//! Property-based tests for parameter numbering.
//!
//! For any valid structure, the returned parameters are exactly
//! `p_0 .. p_{k-1}` in allocation order, where `k` counts one parameter per
//! target of a single-qubit rotation and one per shared-rotation instruction.

use ansatz_compile::{Element, compile_ansatz};
use proptest::prelude::*;

const SINGLE_ROTATIONS: &[&str] = &["rx", "ry", "rz", "p", "u1"];
const SHARED_ROTATIONS: &[&str] = &["crx", "cry", "crz", "cp", "rxx", "ryy", "rzz", "rzx"];
const FIXED_SINGLE: &[&str] = &["h", "x", "sdg", "t"];
const LAYERS: &[&str] = &["rx_layer", "ry_layer", "rz_layer"];

/// Generate `count` distinct qubit indices below `num_qubits`.
fn arb_targets(num_qubits: u32, count: usize) -> impl Strategy<Value = Vec<i64>> {
    Just((0..i64::from(num_qubits)).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(move |mut qubits| {
            qubits.truncate(count);
            qubits
        })
}

/// Generate a valid leaf element for a circuit of `num_qubits` qubits.
fn arb_leaf(num_qubits: u32) -> BoxedStrategy<Element> {
    let n = num_qubits as usize;
    let mut options = vec![
        (
            prop::sample::select(SINGLE_ROTATIONS),
            1..=n,
        )
            .prop_flat_map(move |(gate, count)| {
                arb_targets(num_qubits, count).prop_map(move |q| Element::gate(gate, q))
            })
            .boxed(),
        (prop::sample::select(FIXED_SINGLE), 1..=n)
            .prop_flat_map(move |(gate, count)| {
                arb_targets(num_qubits, count).prop_map(move |q| Element::gate(gate, q))
            })
            .boxed(),
        prop::sample::select(LAYERS).prop_map(Element::token).boxed(),
        Just(Element::token("barrier")).boxed(),
    ];
    if num_qubits >= 2 {
        options.push(
            prop::sample::select(SHARED_ROTATIONS)
                .prop_flat_map(move |gate| {
                    arb_targets(num_qubits, 2).prop_map(move |q| Element::gate(gate, q))
                })
                .boxed(),
        );
        options.push(
            arb_targets(num_qubits, 2)
                .prop_map(|q| Element::gate("cx", q))
                .boxed(),
        );
    }
    prop::strategy::Union::new(options).boxed()
}

/// Generate a nested structure of valid elements.
fn arb_structure(num_qubits: u32) -> impl Strategy<Value = Vec<Element>> {
    let element = arb_leaf(num_qubits).prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Element::Block)
    });
    prop::collection::vec(element, 0..8)
}

/// Number of parameters a structure should allocate, counted independently
/// of the compiler.
fn expected_count(element: &Element, num_qubits: usize) -> usize {
    match element {
        Element::Block(children) => children.iter().map(|c| expected_count(c, num_qubits)).sum(),
        Element::Token(token) if LAYERS.contains(&token.as_str()) => num_qubits,
        Element::Token(_) => 0,
        Element::Gate(call) if SINGLE_ROTATIONS.contains(&call.gate.as_str()) => call.qubits.len(),
        Element::Gate(call) if SHARED_ROTATIONS.contains(&call.gate.as_str()) => 1,
        Element::Gate(_) => 0,
    }
}

fn arb_case() -> impl Strategy<Value = (u32, Vec<Element>)> {
    (1_u32..=5).prop_flat_map(|n| (Just(n), arb_structure(n)))
}

proptest! {
    #[test]
    fn parameters_are_sequential((num_qubits, structure) in arb_case()) {
        let (circuit, parameters) = compile_ansatz(i64::from(num_qubits), &structure).unwrap();

        let expected: Vec<String> = (0..parameters.len()).map(|i| format!("p_{i}")).collect();
        let actual: Vec<String> = parameters.iter().map(|p| p.name().to_string()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(circuit.num_parameters(), parameters.len());
    }

    #[test]
    fn parameter_count_matches_categories((num_qubits, structure) in arb_case()) {
        let (_, parameters) = compile_ansatz(i64::from(num_qubits), &structure).unwrap();
        let expected: usize = structure
            .iter()
            .map(|e| expected_count(e, num_qubits as usize))
            .sum();
        prop_assert_eq!(parameters.len(), expected);
    }

    #[test]
    fn repeating_structure_doubles_parameters((num_qubits, structure) in arb_case()) {
        let block = Element::Block(structure);
        let (_, once) = compile_ansatz(i64::from(num_qubits), [block.clone()]).unwrap();
        let (_, twice) = compile_ansatz(i64::from(num_qubits), [block.clone(), block]).unwrap();
        prop_assert_eq!(twice.len(), 2 * once.len());
    }

    #[test]
    fn compilation_is_deterministic((num_qubits, structure) in arb_case()) {
        let first = compile_ansatz(i64::from(num_qubits), &structure).unwrap();
        let second = compile_ansatz(i64::from(num_qubits), &structure).unwrap();
        prop_assert_eq!(first, second);
    }
}
