//! Sign correction of preparation circuits.
//!
//! Templates and local Clifford layers only fix the stabilizer group up to
//! signs. Generator `j` of the state a circuit prepares is the image of
//! `Z_j`, so prepending `X_j` flips its sign and nothing else.

use htstab_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::stabilizer::Stabilizer;

/// Prepend Pauli X gates to `circuit` so that it prepares exactly `target`.
///
/// Fails with [`SynthError::DifferentStabilizerGroup`] if the unsigned
/// groups differ.
pub fn rotate_into_state(circuit: &Circuit, target: &Stabilizer) -> SynthResult<Circuit> {
    let n = circuit.num_qubits();
    if target.num_qubits() != n {
        return Err(SynthError::DimensionMismatch {
            what: "target qubit count",
            expected: n,
            got: target.num_qubits(),
        });
    }
    let prepared = Stabilizer::from_circuit(circuit)?;

    let mut flips = Circuit::new(n as u32);
    for (j, generator) in prepared.generators().iter().enumerate() {
        let wanted = target
            .sign_of(generator)
            .ok_or(SynthError::DifferentStabilizerGroup { generator: j })?;
        if generator.sign() != Some(wanted) {
            flips.x(QubitId(j as u32))?;
        }
    }
    debug!(flips = flips.len(), "phase rotation");
    Ok(circuit.prepend(&flips)?)
}

/// Prepend Pauli X gates to `circuit` so that it prepares the same state
/// as `reference`.
pub fn rotate_into_circuit(circuit: &Circuit, reference: &Circuit) -> SynthResult<Circuit> {
    rotate_into_state(circuit, &Stabilizer::from_circuit(reference)?)
}
