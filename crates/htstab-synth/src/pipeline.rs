//! The synthesis pipeline.
//!
//! ```text
//! Stabilizer ──► classify ──► template lookup ──► local Clifford solve
//!                                                        │
//!       Circuit ◄── phase rotation ◄── template + inverse(layer)
//! ```
//!
//! Every call is independent; the only shared state is the template cache
//! owned by the [`Synthesizer`].

use htstab_ir::Circuit;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::connectivity::Connectivity;
use crate::error::{SynthError, SynthResult};
use crate::lc_class::{self, LcClass};
use crate::local_clifford::{LocalClifford, find_local_clifford_layer};
use crate::mub::MubInfo;
use crate::phase::rotate_into_state;
use crate::stabilizer::Stabilizer;
use crate::templates::{CircuitTemplate, TemplateSource, TemplateStatistics, TemplateStore};

/// The intermediate results of one synthesis run.
#[derive(Debug, Clone, Serialize)]
pub struct Synthesis {
    /// The class of the input stabilizer.
    #[serde(skip)]
    pub class: LcClass,
    /// The template of that class.
    pub template: CircuitTemplate,
    /// The layer mapping the input onto the template's graph state.
    pub layer: LocalClifford,
    /// The preparation circuit.
    pub circuit: Circuit,
}

/// Synthesizes preparation and readout circuits over a template store.
#[derive(Debug, Default)]
pub struct Synthesizer {
    store: TemplateStore,
}

impl Synthesizer {
    /// Create a synthesizer over `store`.
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }

    /// A synthesizer over the bundled tables.
    pub fn bundled() -> Self {
        Self::new(TemplateStore::bundled())
    }

    /// A synthesizer reading tables from `source`.
    pub fn with_source(source: impl TemplateSource + 'static) -> Self {
        Self::new(TemplateStore::new(source))
    }

    /// The template cache.
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    // =========================================================================
    // Stabilizer states
    // =========================================================================

    /// Run the full pipeline and keep the intermediate results.
    #[instrument(skip(self, stabilizer), fields(n = stabilizer.num_qubits()))]
    pub fn synthesize(
        &self,
        stabilizer: &Stabilizer,
        connectivity: Connectivity,
    ) -> SynthResult<Synthesis> {
        synthesize_with(&self.store, stabilizer, connectivity)
    }

    /// A circuit preparing exactly `stabilizer` from `|0...0>`, using only
    /// two-qubit gates allowed by `connectivity`.
    pub fn preparation_circuit(
        &self,
        stabilizer: &Stabilizer,
        connectivity: Connectivity,
    ) -> SynthResult<Circuit> {
        Ok(self.synthesize(stabilizer, connectivity)?.circuit)
    }

    /// A circuit mapping the state of `stabilizer` onto `|0...0>`: the
    /// inverse of the preparation circuit.
    pub fn readout_circuit(
        &self,
        stabilizer: &Stabilizer,
        connectivity: Connectivity,
    ) -> SynthResult<Circuit> {
        Ok(self.preparation_circuit(stabilizer, connectivity)?.inverse())
    }

    /// Re-synthesize a Clifford preparation circuit: the result prepares
    /// the same state, signs included.
    #[instrument(skip(self, circuit), fields(n = circuit.num_qubits(), gates = circuit.len()))]
    pub fn compress_preparation_circuit(
        &self,
        circuit: &Circuit,
        connectivity: Connectivity,
    ) -> SynthResult<Circuit> {
        let stabilizer = Stabilizer::from_circuit(circuit)?;
        self.preparation_circuit(&stabilizer, connectivity)
    }

    /// Statistics of the template table for `n` qubits on `connectivity`.
    pub fn template_statistics(
        &self,
        n: usize,
        connectivity: Connectivity,
    ) -> SynthResult<TemplateStatistics> {
        Ok(self.store.stabilizer_table(n, connectivity)?.statistics())
    }

    // =========================================================================
    // Mutually unbiased bases
    // =========================================================================

    /// Readout circuits of a complete set of mutually unbiased bases.
    #[instrument(skip(self))]
    pub fn mub_circuits(&self, n: usize, connectivity: Connectivity) -> SynthResult<Vec<Circuit>> {
        Ok(self.store.mub_table(n, connectivity)?.circuits().to_vec())
    }

    /// The bases matching [`Synthesizer::mub_circuits`], as Pauli strings.
    pub fn mubs(&self, n: usize, connectivity: Connectivity) -> SynthResult<Vec<Vec<String>>> {
        Ok(self.store.mub_table(n, connectivity)?.basis_strings())
    }

    /// Summary of the MUB circuits.
    pub fn mub_info(&self, n: usize, connectivity: Connectivity) -> SynthResult<MubInfo> {
        Ok(self.store.mub_table(n, connectivity)?.info())
    }
}

/// The pipeline over an explicit store.
pub(crate) fn synthesize_with(
    store: &TemplateStore,
    stabilizer: &Stabilizer,
    connectivity: Connectivity,
) -> SynthResult<Synthesis> {
    let n = stabilizer.num_qubits();
    connectivity.ensure_supported(n)?;

    let class = lc_class::classify(stabilizer)?;
    debug!(id = class.id(), structure = %class.structure(), "classified");

    let template = store.lookup(n, connectivity, class.id())?;
    let graph = template.graph()?;
    let layer = find_local_clifford_layer(stabilizer.r(), stabilizer.s(), &graph).ok_or(
        SynthError::NoLocalClifford {
            graph_id: template.graph_id,
        },
    )?;
    debug!(%layer, "local Clifford layer");

    let unsigned = template.circuit.compose(&layer.to_circuit()?.inverse())?;
    let circuit = rotate_into_state(&unsigned, stabilizer)?;
    debug!(
        two_qubit_count = circuit.two_qubit_count(),
        two_qubit_depth = circuit.two_qubit_depth(),
        "synthesized"
    );
    Ok(Synthesis {
        class,
        template,
        layer,
        circuit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lc_class::EntanglementStructure;

    fn respects(circuit: &Circuit, connectivity: Connectivity) -> bool {
        let coupling = connectivity.graph(circuit.num_qubits()).unwrap();
        circuit
            .iter()
            .filter(|inst| inst.is_two_qubit())
            .all(|inst| coupling.has_edge(inst.qubits[0].index(), inst.qubits[1].index()))
    }

    #[test]
    fn test_triple_on_linear() {
        let synth = Synthesizer::bundled();
        let st = Stabilizer::from_paulis(&["XZZ", "ZXI", "ZIX"]).unwrap();
        let result = synth.synthesize(&st, Connectivity::Linear).unwrap();
        assert_eq!(result.class.structure().name(), "Triple");
        assert!(matches!(
            result.class.structure(),
            EntanglementStructure::Structure3(_)
        ));
        assert!(respects(&result.circuit, Connectivity::Linear));

        let prepared = Stabilizer::from_circuit(&result.circuit).unwrap();
        assert!(prepared.is_equivalent(&st));

        let readout = synth.readout_circuit(&st, Connectivity::Linear).unwrap();
        assert_eq!(readout, result.circuit.inverse());
        let roundtrip = result.circuit.compose(&readout).unwrap();
        let zero = Stabilizer::from_paulis(&["ZII", "IZI", "IIZ"]).unwrap();
        assert!(Stabilizer::from_circuit(&roundtrip).unwrap().is_equivalent(&zero));
    }

    #[test]
    fn test_signs_are_exact() {
        let synth = Synthesizer::bundled();
        let st = Stabilizer::from_paulis(&["-XX", "+ZZ"]).unwrap();
        let circuit = synth.preparation_circuit(&st, Connectivity::All).unwrap();
        let prepared = Stabilizer::from_circuit(&circuit).unwrap();
        assert!(prepared.is_equivalent(&st));
        let flipped = Stabilizer::from_paulis(&["XX", "ZZ"]).unwrap();
        assert!(!prepared.is_equivalent(&flipped));
    }

    #[test]
    fn test_compress() {
        let synth = Synthesizer::bundled();
        let long = Circuit::parse(4, "h0 cx0,1 cx1,2 cx2,3 cx0,1 cx0,1 s3 h2 cz0,3 x1").unwrap();
        let short = synth
            .compress_preparation_circuit(&long, Connectivity::Linear)
            .unwrap();
        assert!(respects(&short, Connectivity::Linear));
        let expected = Stabilizer::from_circuit(&long).unwrap();
        assert!(Stabilizer::from_circuit(&short).unwrap().is_equivalent(&expected));
    }

    #[test]
    fn test_rejects_bad_input() {
        let synth = Synthesizer::bundled();
        let st = Stabilizer::from_paulis(&["XX", "ZZ"]).unwrap();
        assert!(matches!(
            synth.preparation_circuit(&st, Connectivity::Linear),
            Err(SynthError::UnsupportedConnectivity { num_qubits: 2, .. })
        ));
        let single = Stabilizer::from_paulis(&["Z"]).unwrap();
        assert!(matches!(
            synth.preparation_circuit(&single, Connectivity::All),
            Err(SynthError::UnsupportedQubitCount(1))
        ));
        let dependent = Stabilizer::from_paulis(&["ZZ", "ZZ"]).unwrap();
        assert!(synth.preparation_circuit(&dependent, Connectivity::All).is_err());
    }

    #[test]
    fn test_mub_surface() {
        let synth = Synthesizer::bundled();
        assert_eq!(synth.mub_circuits(3, Connectivity::Linear).unwrap().len(), 9);
        assert_eq!(synth.mubs(2, Connectivity::All).unwrap().len(), 5);
        assert_eq!(synth.mub_info(4, Connectivity::Star).unwrap().num_circuits, 17);
        assert_eq!(synth.mubs(5, Connectivity::Cycle).unwrap()[0].len(), 5);
        assert!(matches!(
            synth.mub_info(6, Connectivity::Linear),
            Err(SynthError::MubUnavailable { num_qubits: 6, .. })
        ));
    }

    #[test]
    fn test_synthesis_serializes() {
        let synth = Synthesizer::bundled();
        let st = Stabilizer::from_paulis(&["XX", "ZZ"]).unwrap();
        let result = synth.synthesize(&st, Connectivity::All).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["template"]["graph_id"], 1);
        assert_eq!(json["template"]["cost"], 1);
        assert_eq!(json["circuit"]["num_qubits"], 2);
        assert!(json.get("class").is_none());
    }

    #[test]
    fn test_statistics() {
        let synth = Synthesizer::bundled();
        let stats = synth.template_statistics(4, Connectivity::Cycle).unwrap();
        assert_eq!(stats.num_classes, 18);
        assert!(stats.max_cost >= stats.max_depth);
    }
}
