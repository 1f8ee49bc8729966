//! Clifford gate set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gates a stabilizer circuit is built from.
///
/// Every gate is a Clifford operation, so circuits over this set map
/// Pauli operators to Pauli operators and can be tracked symbolically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CliffordGate {
    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,

    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate, operands `(control, target)`.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl CliffordGate {
    /// All gates, in gate-spec lookup order.
    pub const ALL: [CliffordGate; 9] = [
        CliffordGate::H,
        CliffordGate::S,
        CliffordGate::Sdg,
        CliffordGate::X,
        CliffordGate::Y,
        CliffordGate::Z,
        CliffordGate::CX,
        CliffordGate::CZ,
        CliffordGate::Swap,
    ];

    /// Get the gate identifier used in gate specifications.
    pub fn name(&self) -> &'static str {
        match self {
            CliffordGate::H => "h",
            CliffordGate::S => "s",
            CliffordGate::Sdg => "sdg",
            CliffordGate::X => "x",
            CliffordGate::Y => "y",
            CliffordGate::Z => "z",
            CliffordGate::CX => "cx",
            CliffordGate::CZ => "cz",
            CliffordGate::Swap => "swap",
        }
    }

    /// Look up a gate by its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Get the number of qubits this gate acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            CliffordGate::H
            | CliffordGate::S
            | CliffordGate::Sdg
            | CliffordGate::X
            | CliffordGate::Y
            | CliffordGate::Z => 1,
            CliffordGate::CX | CliffordGate::CZ | CliffordGate::Swap => 2,
        }
    }

    /// Get the inverse gate.
    pub fn inverse(&self) -> Self {
        match self {
            CliffordGate::S => CliffordGate::Sdg,
            CliffordGate::Sdg => CliffordGate::S,
            other => *other,
        }
    }

    /// Number of native two-qubit gates (CX or CZ) this gate costs.
    ///
    /// A SWAP is counted as three consecutive CX gates.
    pub fn two_qubit_cost(&self) -> u32 {
        match self {
            CliffordGate::CX | CliffordGate::CZ => 1,
            CliffordGate::Swap => 3,
            _ => 0,
        }
    }

    /// Check if this is one of the Pauli gates.
    pub fn is_pauli(&self) -> bool {
        matches!(self, CliffordGate::X | CliffordGate::Y | CliffordGate::Z)
    }
}

impl fmt::Display for CliffordGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
