//! Final parameter ordering.
//!
//! The returned order is the binding contract for callers: position `i` of
//! the list is position `i` of the numeric vector they bind. The circuit's
//! own parameter set wins over allocator bookkeeping when the two disagree.

use std::cmp::Ordering;

use ansatz_ir::{Circuit, Parameter};
use rustc_hash::FxHashSet;

use crate::diagnostics::{Diagnostic, Diagnostics};

/// Sort parameters by the number embedded in their names (`p_2` before `p_10`).
///
/// If any name has no digits, the whole list is sorted lexicographically
/// instead and a diagnostic is recorded.
pub fn sort_parameters(mut parameters: Vec<Parameter>, diagnostics: &mut Diagnostics) -> Vec<Parameter> {
    let unsortable: Vec<String> = parameters
        .iter()
        .filter(|p| p.numeric_suffix().is_none())
        .map(|p| p.name().to_string())
        .collect();

    if unsortable.is_empty() {
        parameters.sort_by(|a, b| by_suffix(a, b).then_with(|| a.name().cmp(b.name())));
    } else {
        diagnostics.push(Diagnostic::UnsortableParameterNames { names: unsortable });
        parameters.sort_by(|a, b| a.name().cmp(b.name()));
    }
    parameters
}

fn by_suffix(a: &Parameter, b: &Parameter) -> Ordering {
    a.numeric_suffix().cmp(&b.numeric_suffix())
}

/// Produce the ordered parameter list for `circuit`.
pub fn reconcile(
    allocated: Vec<Parameter>,
    circuit: &Circuit,
    diagnostics: &mut Diagnostics,
) -> Vec<Parameter> {
    let in_circuit = circuit.parameters();
    let collected: FxHashSet<Parameter> = allocated.iter().cloned().collect();

    if collected == in_circuit {
        return sort_parameters(allocated, diagnostics);
    }

    diagnostics.push(Diagnostic::ParameterMismatch {
        allocated: sorted_names(&collected),
        circuit: sorted_names(&in_circuit),
    });
    sort_parameters(in_circuit.into_iter().collect(), diagnostics)
}

fn sorted_names(set: &FxHashSet<Parameter>) -> Vec<String> {
    let mut names: Vec<String> = set.iter().map(|p| p.name().to_string()).collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansatz_ir::QubitId;

    fn params(names: &[&str]) -> Vec<Parameter> {
        names.iter().map(|n| Parameter::new(*n)).collect()
    }

    fn names(parameters: &[Parameter]) -> Vec<&str> {
        parameters.iter().map(Parameter::name).collect()
    }

    #[test]
    fn test_numeric_sort() {
        let mut diags = Diagnostics::new();
        let sorted = sort_parameters(params(&["p_10", "p_2", "p_0", "p_1"]), &mut diags);
        assert_eq!(names(&sorted), ["p_0", "p_1", "p_2", "p_10"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_lexicographic_fallback() {
        let mut diags = Diagnostics::new();
        let sorted = sort_parameters(params(&["p_10", "theta", "p_2"]), &mut diags);
        assert_eq!(names(&sorted), ["p_10", "p_2", "theta"]);
        assert!(matches!(
            diags.iter().next(),
            Some(Diagnostic::UnsortableParameterNames { names }) if names == &["theta"]
        ));
    }

    #[test]
    fn test_reconcile_matching_sets() {
        let mut circuit = Circuit::new("t", 2);
        circuit.ry(Parameter::new("p_1"), QubitId(1)).unwrap();
        circuit.ry(Parameter::new("p_0"), QubitId(0)).unwrap();

        let mut diags = Diagnostics::new();
        let ordered = reconcile(params(&["p_1", "p_0"]), &circuit, &mut diags);
        assert_eq!(names(&ordered), ["p_0", "p_1"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_reconcile_prefers_circuit() {
        let mut circuit = Circuit::new("t", 1);
        circuit.ry(Parameter::new("p_0"), QubitId(0)).unwrap();

        let mut diags = Diagnostics::new();
        let ordered = reconcile(params(&["p_0", "p_1"]), &circuit, &mut diags);
        assert_eq!(names(&ordered), ["p_0"]);
        match diags.iter().next() {
            Some(Diagnostic::ParameterMismatch { allocated, circuit }) => {
                assert_eq!(allocated, &["p_0", "p_1"]);
                assert_eq!(circuit, &["p_0"]);
            }
            other => panic!("unexpected diagnostic: {other:?}"),
        }
    }
}
