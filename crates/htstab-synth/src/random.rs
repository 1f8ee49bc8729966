//! Random stabilizer states covering every class.

use htstab_ir::{Circuit, QubitId};
use ndarray::Array1;
use rand::Rng;

use crate::error::SynthResult;
use crate::lc_class::LcClass;
use crate::local_clifford::{LocalClifford, SingleQubitClifford};
use crate::stabilizer::Stabilizer;

/// Draw a random `n`-qubit stabilizer.
///
/// The class is uniform over class ids. Within the class the state is the
/// representative graph state under a random local Clifford, with random
/// signs and a random recombination of generators.
pub fn random_stabilizer<R: Rng + ?Sized>(n: usize, rng: &mut R) -> SynthResult<Stabilizer> {
    let id = rng.gen_range(0..LcClass::count(n)?);
    let graph = LcClass::from_id(n, id)?.representative_graph();

    let mut circuit = Circuit::new(n as u32);
    for q in 0..n {
        circuit.h(QubitId(q as u32))?;
    }
    for (a, b) in graph.edges() {
        circuit.cz(QubitId(a as u32), QubitId(b as u32))?;
    }
    let layer = LocalClifford::new(
        (0..n)
            .map(|_| SingleQubitClifford::ALL[rng.gen_range(0..SingleQubitClifford::ALL.len())])
            .collect(),
    );
    let dressed = Stabilizer::from_circuit(&circuit.compose(&layer.to_circuit()?)?)?;

    let phases = Array1::from_shape_fn(n, |_| u8::from(rng.gen_bool(0.5)));
    let mut stabilizer =
        Stabilizer::from_matrices(dressed.r().clone(), dressed.s().clone(), Some(phases))?;
    for _ in 0..n * n {
        let target = rng.gen_range(0..n);
        let source = rng.gen_range(0..n);
        if target != source {
            stabilizer.multiply_generator(target, source)?;
        }
    }
    Ok(stabilizer)
}
