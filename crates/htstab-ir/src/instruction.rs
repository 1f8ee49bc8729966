//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::CliffordGate;
use crate::qubit::QubitId;

/// A gate together with the qubits it acts on.
///
/// For [`CliffordGate::CX`] the operands are `[control, target]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate applied.
    pub gate: CliffordGate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create an instruction, checking the operand count and that operands are distinct.
    pub fn new(gate: CliffordGate, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len() as u32,
            });
        }
        if qubits.len() == 2 && qubits[0] == qubits[1] {
            return Err(IrError::DuplicateQubit {
                qubit: qubits[0],
                gate_name: Some(gate.name().to_string()),
            });
        }
        Ok(Self { gate, qubits })
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: CliffordGate, qubit: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![qubit],
        }
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: CliffordGate, q1: QubitId, q2: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![q1, q2],
        }
    }

    /// Get the gate identifier.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// Check if this instruction acts on two qubits.
    pub fn is_two_qubit(&self) -> bool {
        self.qubits.len() == 2
    }

    /// The instruction undoing this one.
    pub fn inverse(&self) -> Self {
        Self {
            gate: self.gate.inverse(),
            qubits: self.qubits.clone(),
        }
    }

    /// Check the operand count, that operands are distinct, and that every
    /// operand lies inside a circuit of `num_qubits` qubits.
    pub fn check_bounds(&self, num_qubits: u32) -> IrResult<()> {
        let checked = Self::new(self.gate, self.qubits.iter().copied())?;
        for &qubit in &checked.qubits {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: Some(self.gate.name().to_string()),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction as a gate-spec token, e.g. `h0` or `cx1,2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gate.name())?;
        for (i, qubit) in self.qubits.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", qubit.0)?;
        }
        Ok(())
    }
}
