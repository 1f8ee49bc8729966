//! Clifford circuit value type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::CliffordGate;
use crate::gate_spec;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A Clifford circuit: a fixed number of qubits and an ordered gate list.
///
/// Circuits are plain values. The builder methods append in place, while
/// [`compose`](Self::compose), [`prepend`](Self::prepend) and
/// [`inverse`](Self::inverse) return new circuits and leave their inputs untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in time order.
    instructions: Vec<Instruction>,
}

/// Two-qubit gate statistics of a circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitMetrics {
    /// Number of native two-qubit gates (SWAP counts as three).
    pub two_qubit_count: u32,
    /// Depth counting only native two-qubit gates.
    pub two_qubit_depth: u32,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            instructions: vec![],
        }
    }

    /// Create a circuit from a list of instructions, checking every operand.
    pub fn from_instructions(
        num_qubits: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(num_qubits);
        for inst in instructions {
            circuit.push(inst)?;
        }
        Ok(circuit)
    }

    /// Parse a gate specification such as `h0 s1 cz0,1 swap1,2`.
    pub fn parse(num_qubits: u32, spec: &str) -> IrResult<Self> {
        let instructions = gate_spec::parse(spec)?;
        Self::from_instructions(num_qubits, instructions)
    }

    /// Append an instruction.
    pub fn push(&mut self, inst: Instruction) -> IrResult<&mut Self> {
        inst.check_bounds(self.num_qubits)?;
        self.instructions.push(inst);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::H, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::Sdg, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::Z, qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::new(CliffordGate::CX, [control, target])?)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::new(CliffordGate::CZ, [q1, q2])?)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::new(CliffordGate::Swap, [q1, q2])?)
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Return `self` followed by `other`.
    pub fn compose(&self, other: &Circuit) -> IrResult<Circuit> {
        self.check_width(other)?;
        let mut instructions = Vec::with_capacity(self.len() + other.len());
        instructions.extend_from_slice(&self.instructions);
        instructions.extend_from_slice(&other.instructions);
        Ok(Circuit {
            num_qubits: self.num_qubits,
            instructions,
        })
    }

    /// Return `other` followed by `self`.
    pub fn prepend(&self, other: &Circuit) -> IrResult<Circuit> {
        other.compose(self)
    }

    /// Return the inverse circuit: reversed order, every gate inverted.
    pub fn inverse(&self) -> Circuit {
        Circuit {
            num_qubits: self.num_qubits,
            instructions: self.instructions.iter().rev().map(Instruction::inverse).collect(),
        }
    }

    fn check_width(&self, other: &Circuit) -> IrResult<()> {
        if self.num_qubits != other.num_qubits {
            return Err(IrError::WidthMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Accessors and metrics
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the instructions in time order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.instructions.iter()
    }

    /// Get the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of native two-qubit gates.
    pub fn two_qubit_count(&self) -> u32 {
        self.instructions.iter().map(|i| i.gate.two_qubit_cost()).sum()
    }

    /// Depth of the circuit counting only native two-qubit gates.
    ///
    /// Gates are scheduled as soon as possible; a SWAP occupies three
    /// consecutive layers on both of its qubits.
    pub fn two_qubit_depth(&self) -> u32 {
        self.metrics().two_qubit_depth
    }

    /// Two-qubit count and depth in one pass.
    pub fn metrics(&self) -> CircuitMetrics {
        let mut layer = vec![0u32; self.num_qubits()];
        let mut count = 0;
        for inst in self.instructions.iter().filter(|i| i.is_two_qubit()) {
            let (a, b) = (inst.qubits[0].index(), inst.qubits[1].index());
            for _ in 0..inst.gate.two_qubit_cost() {
                let next = layer[a].max(layer[b]) + 1;
                layer[a] = next;
                layer[b] = next;
                count += 1;
            }
        }
        CircuitMetrics {
            two_qubit_count: count,
            two_qubit_depth: layer.into_iter().max().unwrap_or(0),
        }
    }

    /// Render the circuit as a gate specification.
    pub fn to_gate_spec(&self) -> String {
        gate_spec::emit(&self.instructions)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gate_spec())
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new(3);
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.is_empty());
        assert_eq!(circuit.two_qubit_depth(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new(3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap()
            .sdg(QubitId(2))
            .unwrap();
        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.to_gate_spec(), "h0 cz0,1 sdg2");
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut circuit = Circuit::new(2);
        assert!(matches!(
            circuit.h(QubitId(2)),
            Err(IrError::QubitOutOfRange { num_qubits: 2, .. })
        ));
        assert!(matches!(
            circuit.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_compose_and_prepend() {
        let a = Circuit::parse(2, "h0 s1").unwrap();
        let b = Circuit::parse(2, "cz0,1").unwrap();
        assert_eq!(a.compose(&b).unwrap().to_gate_spec(), "h0 s1 cz0,1");
        assert_eq!(a.prepend(&b).unwrap().to_gate_spec(), "cz0,1 h0 s1");
        // inputs untouched
        assert_eq!(a.len(), 2);

        let wide = Circuit::new(3);
        assert!(matches!(
            a.compose(&wide),
            Err(IrError::WidthMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn test_inverse() {
        let circuit = Circuit::parse(3, "h0 s0 cx0,1 sdg2 swap1,2").unwrap();
        let inverse = circuit.inverse();
        assert_eq!(inverse.to_gate_spec(), "swap1,2 s2 cx0,1 sdg0 h0");
        assert_eq!(inverse.inverse(), circuit);
    }

    #[test]
    fn test_metrics() {
        let circuit = Circuit::parse(3, "h0 cz0,1 swap1,2 cz0,1").unwrap();
        let metrics = circuit.metrics();
        assert_eq!(metrics.two_qubit_count, 5);
        assert_eq!(metrics.two_qubit_depth, 5);

        let parallel = Circuit::parse(4, "cz0,1 cz2,3 cx1,2").unwrap();
        assert_eq!(parallel.two_qubit_count(), 3);
        assert_eq!(parallel.two_qubit_depth(), 2);
    }
}
