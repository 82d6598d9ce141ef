//! The circuit model produced by the ansatz compiler.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::{Parameter, ParameterExpression};
use crate::qubit::{ClbitId, QubitId};
use crate::register::ClassicalRegister;

/// A quantum circuit over a fixed number of qubits.
///
/// Operations are kept in application order. Classical bits exist only as
/// members of named registers; `add_creg` appends a register whose bits get
/// the next free circuit-wide ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits, fixed at construction.
    num_qubits: u32,
    /// Classical registers in creation order.
    cregs: Vec<ClassicalRegister>,
    /// Total number of classical bits across all registers.
    num_clbits: u32,
    /// Applied operations, in order.
    ops: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit with `num_qubits` qubits and no classical bits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            cregs: vec![],
            num_clbits: 0,
            ops: vec![],
        }
    }

    /// Add a named classical register of `size` bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<&ClassicalRegister> {
        let name = name.into();
        if self.cregs.iter().any(|r| r.name() == name) {
            return Err(IrError::DuplicateRegister(name));
        }
        let bits = (self.num_clbits..self.num_clbits + size).map(ClbitId).collect();
        self.num_clbits += size;
        self.cregs.push(ClassicalRegister::new(name, bits));
        Ok(&self.cregs[self.cregs.len() - 1])
    }

    /// Apply an instruction, validating its operands first.
    ///
    /// Every qubit must exist and appear once; gates must receive exactly
    /// their native number of qubits; measurements must pair each qubit with
    /// an existing classical bit.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.ops.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.name();
        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name.to_string(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.to_string(),
                });
            }
        }

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate_name.to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
            }
            InstructionKind::Measure => {
                if instruction.qubits.len() != instruction.clbits.len() {
                    return Err(IrError::ClbitCountMismatch {
                        qubits: instruction.qubits.len(),
                        clbits: instruction.clbits.len(),
                    });
                }
                if let Some(&clbit) = instruction.clbits.iter().find(|c| c.0 >= self.num_clbits) {
                    return Err(IrError::ClbitNotFound {
                        clbit,
                        gate_name: gate_name.to_string(),
                    });
                }
            }
            InstructionKind::Barrier => {}
        }
        Ok(())
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Apply a standard gate.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate(StandardGate::Ry(theta.into()), [qubit])
    }

    /// Apply a barrier to the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Measure `qubits` into the bits of the named register, position by position.
    pub fn measure_into(&mut self, qubits: &[QubitId], register: &str) -> IrResult<&mut Self> {
        let clbits = self
            .creg(register)
            .map(|r| r.bits().to_vec())
            .unwrap_or_default();
        self.apply(Instruction::measure(qubits.iter().copied(), clbits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// The classical registers, in creation order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name() == name)
    }

    /// The applied operations, in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.ops
    }

    /// Number of applied operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Operation counts keyed by instruction name.
    pub fn count_ops(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.ops {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// The set of symbolic parameters the circuit's operations reference.
    pub fn parameters(&self) -> FxHashSet<Parameter> {
        self.ops
            .iter()
            .flat_map(Instruction::parameters)
            .cloned()
            .collect()
    }

    /// Number of distinct symbolic parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Circuit depth: the longest chain of operations over shared wires.
    ///
    /// Barriers synchronize their qubits without adding a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.num_qubits as usize];
        let mut clbit_depth = vec![0usize; self.num_clbits as usize];
        for inst in &self.ops {
            let start = inst
                .qubits
                .iter()
                .map(|q| qubit_depth[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_depth[c.index()]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { start } else { start + 1 };
            for q in &inst.qubits {
                qubit_depth[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_depth[c.index()] = level;
            }
        }
        qubit_depth
            .into_iter()
            .chain(clbit_depth)
            .max()
            .unwrap_or(0)
    }

    /// Bind `values` to `parameters` position by position.
    ///
    /// Returns a new circuit; `self` is left symbolic. Every listed parameter
    /// must be referenced by the circuit.
    pub fn assign_parameters(&self, parameters: &[Parameter], values: &[f64]) -> IrResult<Self> {
        if parameters.len() != values.len() {
            return Err(IrError::ParameterCountMismatch {
                expected: parameters.len(),
                got: values.len(),
            });
        }
        let known = self.parameters();
        if let Some(missing) = parameters.iter().find(|p| !known.contains(*p)) {
            return Err(IrError::UnknownParameter(missing.name().to_string()));
        }

        let mut bound = self.clone();
        for inst in &mut bound.ops {
            if let InstructionKind::Gate(gate) = &mut inst.kind {
                for (parameter, &value) in parameters.iter().zip(values) {
                    *gate = gate.bind(parameter, value);
                }
            }
        }
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_apply_rejects_missing_qubit() {
        let mut circuit = Circuit::new("test", 1);
        let err = circuit.h(QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { num_qubits: 1, .. }));
    }

    #[test]
    fn test_apply_rejects_wrong_arity() {
        let mut circuit = Circuit::new("test", 3);
        let err = circuit
            .gate(StandardGate::CX, [QubitId(0), QubitId(1), QubitId(2)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 3,
                ..
            }
        ));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_apply_rejects_duplicate_qubit() {
        let mut circuit = Circuit::new("test", 2);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_registers() {
        let mut circuit = Circuit::new("test", 2);
        circuit.add_creg("a", 2).unwrap();
        let b = circuit.add_creg("b", 1).unwrap();
        assert_eq!(b.bits(), &[ClbitId(2)]);
        assert_eq!(circuit.num_clbits(), 3);
        assert!(matches!(
            circuit.add_creg("a", 4),
            Err(IrError::DuplicateRegister(_))
        ));

        circuit.measure_into(&[QubitId(0), QubitId(1)], "a").unwrap();
        assert_eq!(circuit.instructions()[0].clbits, vec![ClbitId(0), ClbitId(1)]);

        let err = circuit.measure_into(&[QubitId(0), QubitId(1)], "b").unwrap_err();
        assert!(matches!(err, IrError::ClbitCountMismatch { qubits: 2, clbits: 1 }));
    }

    #[test]
    fn test_depth_and_counts() {
        let mut circuit = Circuit::new("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .barrier([QubitId(0), QubitId(1)])
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.count_ops()["h"], 2);
        assert_eq!(circuit.count_ops()["barrier"], 1);
    }

    #[test]
    fn test_parameters_and_binding() {
        let p0 = Parameter::new("p_0");
        let p1 = Parameter::new("p_1");
        let mut circuit = Circuit::new("test", 2);
        circuit.ry(p0.clone(), QubitId(0)).unwrap();
        circuit
            .gate(StandardGate::CRz(p1.clone().into()), [QubitId(0), QubitId(1)])
            .unwrap();
        assert_eq!(circuit.num_parameters(), 2);

        let bound = circuit
            .assign_parameters(&[p0.clone(), p1.clone()], &[0.5, 1.5])
            .unwrap();
        assert_eq!(bound.num_parameters(), 0);
        assert_eq!(
            bound.instructions()[1].as_gate(),
            Some(&StandardGate::CRz(ParameterExpression::Constant(1.5)))
        );
        // The source circuit stays symbolic.
        assert_eq!(circuit.num_parameters(), 2);

        assert!(matches!(
            circuit.assign_parameters(&[p0.clone()], &[0.5, 1.5]),
            Err(IrError::ParameterCountMismatch { expected: 1, got: 2 })
        ));
        assert!(matches!(
            circuit.assign_parameters(&[Parameter::new("theta")], &[0.5]),
            Err(IrError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_hand_built_u_gate_binds() {
        let theta = Parameter::new("theta");
        let lambda = Parameter::new("lambda");
        let mut circuit = Circuit::new("test", 1);
        circuit
            .gate(
                StandardGate::U(theta.clone().into(), 0.25.into(), lambda.clone().into()),
                [QubitId(0)],
            )
            .unwrap();
        assert_eq!(circuit.instructions()[0].name(), "u");
        assert_eq!(circuit.num_parameters(), 2);

        let bound = circuit
            .assign_parameters(&[theta, lambda], &[1.0, -1.0])
            .unwrap();
        assert_eq!(bound.num_parameters(), 0);
        assert_eq!(
            bound.instructions()[0].as_gate(),
            Some(&StandardGate::U(
                ParameterExpression::Constant(1.0),
                ParameterExpression::Constant(0.25),
                ParameterExpression::Constant(-1.0),
            ))
        );
    }

    #[test]
    fn test_serialize_roundtrip() {
        let mut circuit = Circuit::new("test", 2);
        circuit.ry(Parameter::new("p_0"), QubitId(1)).unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
