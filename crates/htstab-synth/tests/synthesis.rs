//! End-to-end synthesis over every supported device.

use htstab_ir::QubitId;
use htstab_synth::{
    Circuit, Connectivity, LcClass, LocalClifford, SingleQubitClifford, Stabilizer, Synthesizer,
    available_connectivities, check_local_clifford, classify, find_local_clifford_layer,
    random_stabilizer,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES_PER_DEVICE: usize = 1000;

fn zero_state(n: usize) -> Stabilizer {
    let paulis: Vec<String> = (0..n)
        .map(|j| (0..n).map(|q| if q == j { 'Z' } else { 'I' }).collect())
        .collect();
    Stabilizer::from_paulis(&paulis).unwrap()
}

#[test]
fn test_random_states_are_prepared_exactly() {
    let synth = Synthesizer::bundled();
    let mut rng = StdRng::seed_from_u64(2024);
    for &(n, connectivity) in available_connectivities() {
        let coupling = connectivity.graph(n).unwrap();
        for _ in 0..SAMPLES_PER_DEVICE {
            let st = random_stabilizer(n, &mut rng).unwrap();
            let circuit = synth.preparation_circuit(&st, connectivity).unwrap();
            let prepared = Stabilizer::from_circuit(&circuit).unwrap();
            assert!(
                prepared.is_equivalent(&st) && st.is_equivalent(&prepared),
                "{n}-{connectivity}: {st} prepared as {prepared} by {circuit}"
            );
            assert!(
                circuit
                    .iter()
                    .filter(|inst| inst.is_two_qubit())
                    .all(|inst| coupling.has_edge(inst.qubits[0].index(), inst.qubits[1].index()))
            );
        }
    }
}

#[test]
fn test_every_class_on_every_device() {
    let synth = Synthesizer::bundled();
    let mut rng = StdRng::seed_from_u64(99);
    for &(n, connectivity) in available_connectivities() {
        let table = synth.store().stabilizer_table(n, connectivity).unwrap();
        for id in 0..LcClass::count(n).unwrap() {
            let graph = LcClass::from_id(n, id).unwrap().representative_graph();
            let layer = LocalClifford::new(
                (0..n)
                    .map(|_| SingleQubitClifford::ALL[rng.gen_range(0..6)])
                    .collect(),
            );
            let mut prep = Circuit::new(n as u32);
            for q in 0..n {
                prep.h(QubitId(q as u32)).unwrap();
            }
            for (a, b) in graph.edges() {
                prep.cz(QubitId(a as u32), QubitId(b as u32)).unwrap();
            }
            let st = Stabilizer::from_circuit(&prep.compose(&layer.to_circuit().unwrap()).unwrap())
                .unwrap();

            let result = synth.synthesize(&st, connectivity).unwrap();
            assert_eq!(result.class.id(), id);
            assert_eq!(result.circuit.two_qubit_count(), table.get(id).unwrap().cost);
            assert!(Stabilizer::from_circuit(&result.circuit).unwrap().is_equivalent(&st));
        }
    }
}

#[test]
fn test_readout_undoes_preparation() {
    let synth = Synthesizer::bundled();
    let mut rng = StdRng::seed_from_u64(5);
    for &(n, connectivity) in available_connectivities() {
        for _ in 0..20 {
            let st = random_stabilizer(n, &mut rng).unwrap();
            let prep = synth.preparation_circuit(&st, connectivity).unwrap();
            let readout = synth.readout_circuit(&st, connectivity).unwrap();
            assert_eq!(readout, prep.inverse());
            let both = prep.compose(&readout).unwrap();
            assert_eq!(Stabilizer::from_circuit(&both).unwrap(), zero_state(n));
        }
    }
}

#[test]
fn test_compression_preserves_state() {
    let synth = Synthesizer::bundled();
    let mut rng = StdRng::seed_from_u64(17);
    let gates = ["h", "s", "sdg", "x", "z"];
    for n in 2..=6usize {
        for _ in 0..20 {
            let mut spec = Vec::new();
            for _ in 0..4 * n {
                let a = rng.gen_range(0..n);
                let b = (a + rng.gen_range(1..n)) % n;
                spec.push(format!("{}{a}", gates[rng.gen_range(0..gates.len())]));
                spec.push(format!("cx{a},{b}"));
            }
            let circuit = Circuit::parse(n as u32, &spec.join(" ")).unwrap();
            let compressed = synth
                .compress_preparation_circuit(&circuit, Connectivity::All)
                .unwrap();
            let expected = Stabilizer::from_circuit(&circuit).unwrap();
            assert!(Stabilizer::from_circuit(&compressed).unwrap().is_equivalent(&expected));
        }
    }
}

#[test]
fn test_solver_on_random_states() {
    let mut rng = StdRng::seed_from_u64(31);
    for n in 2..=6usize {
        for _ in 0..200 {
            let st = random_stabilizer(n, &mut rng).unwrap();
            let graph = classify(&st).unwrap().representative_graph();
            let layer = find_local_clifford_layer(st.r(), st.s(), &graph)
                .unwrap_or_else(|| panic!("no layer for {st} onto {graph}"));
            assert!(check_local_clifford(st.r(), st.s(), &graph, &layer));
        }
    }
}

#[test]
fn test_line_example() {
    let synth = Synthesizer::bundled();
    let st = Stabilizer::from_paulis(&["XZZ", "ZXI", "ZIX"]).unwrap();
    assert_eq!(classify(&st).unwrap().structure().name(), "Triple");

    let prep = synth.preparation_circuit(&st, Connectivity::Linear).unwrap();
    let readout = synth.readout_circuit(&st, Connectivity::Linear).unwrap();
    assert_eq!(readout, prep.inverse());
    assert!(Stabilizer::from_circuit(&prep).unwrap().is_equivalent(&st));

    let identity = Stabilizer::from_circuit(&prep.compose(&readout).unwrap()).unwrap();
    assert!(identity.is_equivalent(&zero_state(3)));
}

#[test]
fn test_equivalence_vectors() {
    let st = Stabilizer::from_paulis(&["XYI", "ZXX", "YZI"]).unwrap();
    assert!(st.is_valid());
    for (paulis, expected) in [
        (["YZI", "ZXX", "XYI"], true),
        (["ZXX", "YZI", "XYI"], true),
        (["-XYX", "YZI", "XYI"], true),
        (["-XYX", "YZI", "-ZXI"], true),
        (["XYX", "YZI", "XYI"], false),
        (["YZI", "ZXX", "XXI"], false),
    ] {
        let other = Stabilizer::from_paulis(&paulis).unwrap();
        assert_eq!(st.is_equivalent(&other), expected, "{paulis:?}");
    }
}
