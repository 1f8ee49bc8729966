//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is outside the circuit.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Two circuits of different width were combined.
    #[error("Cannot combine a {left}-qubit circuit with a {right}-qubit circuit")]
    WidthMismatch {
        /// Width of the receiving circuit.
        left: u32,
        /// Width of the appended circuit.
        right: u32,
    },

    /// Unknown gate identifier in a gate specification.
    #[error("Unknown gate '{name}' at offset {offset}")]
    UnknownGate {
        /// The identifier as written.
        name: String,
        /// Byte offset into the gate specification.
        offset: usize,
    },

    /// Malformed gate specification.
    #[error("Malformed gate specification at offset {offset}: {reason}")]
    MalformedSpec {
        /// Byte offset into the gate specification.
        offset: usize,
        /// What was wrong.
        reason: String,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
