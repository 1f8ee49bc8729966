//! Local Clifford layers that map a stabilizer onto a graph state.
//!
//! Up to Pauli factors there are six single-qubit Cliffords. On one qubit
//! a Clifford acts on the `(x, z)` bits of a Pauli by a 2x2 symplectic
//! matrix:
//!
//! ```text
//! x' = axx x + axz z
//! z' = azx x + azz z
//! ```
//!
//! A layer of such matrices maps a stabilizer `[R; S]` onto the graph state
//! of `Γ` iff every transformed generator satisfies `z' = Γ x'`. Writing the
//! layer as a combination of four candidate Cliffords per qubit turns this
//! condition into a homogeneous linear system over GF(2). Its null space is
//! enumerated until a combination selects exactly one valid Clifford on
//! every qubit.

use std::fmt;

use htstab_ir::{Circuit, CliffordGate, Instruction, QubitId};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SynthResult;
use crate::f2::{self, F2Matrix};
use crate::graph::Graph;

/// Largest null space dimension the solver enumerates.
pub const MAX_NULLITY: usize = 32;

/// A single-qubit Clifford up to Pauli factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SingleQubitClifford {
    /// Identity.
    I,
    /// Hadamard.
    H,
    /// Phase gate.
    S,
    /// `H S`: S first, then H.
    HS,
    /// `S H`: H first, then S.
    SH,
    /// `H S H`.
    HSH,
}

/// The candidates the solver combines on every qubit.
const CANDIDATES: [SingleQubitClifford; 4] = [
    SingleQubitClifford::I,
    SingleQubitClifford::HS,
    SingleQubitClifford::H,
    SingleQubitClifford::S,
];

impl SingleQubitClifford {
    /// All six, in declaration order.
    pub const ALL: [SingleQubitClifford; 6] = [
        SingleQubitClifford::I,
        SingleQubitClifford::H,
        SingleQubitClifford::S,
        SingleQubitClifford::HS,
        SingleQubitClifford::SH,
        SingleQubitClifford::HSH,
    ];

    /// The symplectic matrix as `[axx, axz, azx, azz]`.
    pub fn symplectic(self) -> [u8; 4] {
        match self {
            SingleQubitClifford::I => [1, 0, 0, 1],
            SingleQubitClifford::H => [0, 1, 1, 0],
            SingleQubitClifford::S => [1, 0, 1, 1],
            SingleQubitClifford::HS => [1, 1, 1, 0],
            SingleQubitClifford::SH => [0, 1, 1, 1],
            SingleQubitClifford::HSH => [1, 1, 0, 1],
        }
    }

    /// The Clifford with the given symplectic matrix, if it is invertible.
    pub fn from_symplectic(m: [u8; 4]) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symplectic() == m)
    }

    /// Gates in time order.
    pub fn gates(self) -> &'static [CliffordGate] {
        use CliffordGate::{H, S};
        match self {
            SingleQubitClifford::I => &[],
            SingleQubitClifford::H => &[H],
            SingleQubitClifford::S => &[S],
            SingleQubitClifford::HS => &[S, H],
            SingleQubitClifford::SH => &[H, S],
            SingleQubitClifford::HSH => &[H, S, H],
        }
    }

    /// Map the `(x, z)` bits of a single-qubit Pauli.
    pub fn apply(self, x: u8, z: u8) -> (u8, u8) {
        let [axx, axz, azx, azz] = self.symplectic();
        ((axx & x) ^ (axz & z), (azx & x) ^ (azz & z))
    }
}

impl fmt::Display for SingleQubitClifford {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One single-qubit Clifford per qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalClifford {
    cliffords: Vec<SingleQubitClifford>,
}

impl LocalClifford {
    /// Build from per-qubit choices.
    pub fn new(cliffords: Vec<SingleQubitClifford>) -> Self {
        Self { cliffords }
    }

    /// The identity layer.
    pub fn identity(n: usize) -> Self {
        Self::new(vec![SingleQubitClifford::I; n])
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.cliffords.len()
    }

    /// Per-qubit choices.
    pub fn cliffords(&self) -> &[SingleQubitClifford] {
        &self.cliffords
    }

    /// The diagonal blocks `[Axx, Axz, Azx, Azz]` of the `2n x 2n`
    /// symplectic transform.
    pub fn blocks(&self) -> [F2Matrix; 4] {
        let n = self.num_qubits();
        let mut blocks = [
            f2::zeros(n, n),
            f2::zeros(n, n),
            f2::zeros(n, n),
            f2::zeros(n, n),
        ];
        for (q, c) in self.cliffords.iter().enumerate() {
            for (block, bit) in blocks.iter_mut().zip(c.symplectic()) {
                block[[q, q]] = bit;
            }
        }
        blocks
    }

    /// Transform the columns of `[R; S]`.
    pub fn transform(&self, r: &F2Matrix, s: &F2Matrix) -> (F2Matrix, F2Matrix) {
        let [axx, axz, azx, azz] = self.blocks();
        (
            f2::add(&f2::mul(&axx, r), &f2::mul(&axz, s)),
            f2::add(&f2::mul(&azx, r), &f2::mul(&azz, s)),
        )
    }

    /// The layer as a circuit.
    pub fn to_circuit(&self) -> SynthResult<Circuit> {
        let instructions = self.cliffords.iter().enumerate().flat_map(|(q, c)| {
            c.gates()
                .iter()
                .map(move |&g| Instruction::single_qubit_gate(g, QubitId(q as u32)))
        });
        Ok(Circuit::from_instructions(self.num_qubits() as u32, instructions)?)
    }
}

impl fmt::Display for LocalClifford {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.cliffords.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", names.join(" "))
    }
}

/// Check that `layer` maps every column of `[R; S]` into the graph state
/// of `graph`: the transformed generators satisfy `z' = Γ x'`.
pub fn check_local_clifford(r: &F2Matrix, s: &F2Matrix, graph: &Graph, layer: &LocalClifford) -> bool {
    let n = r.nrows();
    if layer.num_qubits() != n || graph.num_vertices() != n || s.dim() != r.dim() {
        return false;
    }
    let (x, z) = layer.transform(r, s);
    f2::add(&f2::mul(graph.adjacency(), &x), &z)
        .iter()
        .all(|&b| b == 0)
}

/// Find a local Clifford layer mapping `[R; S]` onto the graph state of
/// `graph`, or `None` if there is none.
///
/// The search enumerates the null space in a fixed order and returns the
/// first valid layer. It gives up when the null space has more than
/// [`MAX_NULLITY`] dimensions.
pub fn find_local_clifford_layer(r: &F2Matrix, s: &F2Matrix, graph: &Graph) -> Option<LocalClifford> {
    let n = r.nrows();
    let m = r.ncols();
    if s.dim() != r.dim() || graph.num_vertices() != n {
        return None;
    }
    let gamma = graph.adjacency();

    // column (4i + k): effect of candidate k on qubit i, flattened row-major
    let mut system = f2::zeros(n * m, 4 * n);
    for i in 0..n {
        for (k, candidate) in CANDIDATES.iter().enumerate() {
            let [axx, axz, azx, azz] = candidate.symplectic();
            let col = 4 * i + k;
            for j in 0..m {
                let x = (axx & r[[i, j]]) ^ (axz & s[[i, j]]);
                let z = (azx & r[[i, j]]) ^ (azz & s[[i, j]]);
                for a in 0..n {
                    system[[a * m + j, col]] ^= gamma[[a, i]] & x;
                }
                system[[i * m + j, col]] ^= z;
            }
        }
    }

    let kernel = f2::null_space(&system);
    let nullity = kernel.len();
    debug!(n, nullity, "local Clifford null space");
    if nullity > MAX_NULLITY {
        warn!(nullity, max = MAX_NULLITY, "null space too large to enumerate");
        return None;
    }

    for combination in 0u64..(1u64 << nullity) {
        let mut v: Array1<u8> = Array1::zeros(4 * n);
        for (j, basis) in kernel.iter().enumerate() {
            if (combination >> (nullity - 1 - j)) & 1 == 1 {
                v ^= basis;
            }
        }
        if let Some(layer) = decode(&v, n) {
            return Some(layer);
        }
    }
    None
}

/// Decode a selection vector, or `None` unless every qubit resolves to a
/// single Clifford.
fn decode(v: &Array1<u8>, n: usize) -> Option<LocalClifford> {
    let mut cliffords = Vec::with_capacity(n);
    for i in 0..n {
        let bits = [v[4 * i], v[4 * i + 1], v[4 * i + 2], v[4 * i + 3]];
        if (bits[0] | bits[1]) ^ (bits[2] | bits[3]) != 1 {
            return None;
        }
        let mut u = [0u8; 4];
        for (k, candidate) in CANDIDATES.iter().enumerate() {
            if bits[k] == 1 {
                for (acc, b) in u.iter_mut().zip(candidate.symplectic()) {
                    *acc ^= b;
                }
            }
        }
        cliffords.push(SingleQubitClifford::from_symplectic(u)?);
    }
    Some(LocalClifford::new(cliffords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stabilizer::Stabilizer;

    /// Graph state preparation followed by per-qubit gates.
    fn dressed_graph_state(graph: &Graph, dressing: &[SingleQubitClifford]) -> Stabilizer {
        let n = graph.num_vertices();
        let mut circuit = Circuit::new(n as u32);
        for q in 0..n {
            circuit.h(QubitId(q as u32)).unwrap();
        }
        for (a, b) in graph.edges() {
            circuit.cz(QubitId(a as u32), QubitId(b as u32)).unwrap();
        }
        let layer = LocalClifford::new(dressing.to_vec()).to_circuit().unwrap();
        Stabilizer::from_circuit(&circuit.compose(&layer).unwrap()).unwrap()
    }

    #[test]
    fn test_symplectic_table() {
        for c in SingleQubitClifford::ALL {
            assert_eq!(SingleQubitClifford::from_symplectic(c.symplectic()), Some(c));
            let [a, b, cc, d] = c.symplectic();
            assert_eq!((a & d) ^ (b & cc), 1, "{c} is not invertible");
        }
        assert_eq!(SingleQubitClifford::from_symplectic([1, 1, 1, 1]), None);
        // H swaps X and Z
        assert_eq!(SingleQubitClifford::H.apply(1, 0), (0, 1));
        // S maps X to Y
        assert_eq!(SingleQubitClifford::S.apply(1, 0), (1, 1));
    }

    #[test]
    fn test_gates_match_symplectic() {
        // conjugating X and Z by the gate list must reproduce the matrix
        for c in SingleQubitClifford::ALL {
            let mut circuit = Circuit::new(1);
            circuit.h(QubitId(0)).unwrap();
            let from_plus = Stabilizer::from_circuit(
                &circuit
                    .compose(&LocalClifford::new(vec![c]).to_circuit().unwrap())
                    .unwrap(),
            )
            .unwrap();
            let from_zero =
                Stabilizer::from_circuit(&LocalClifford::new(vec![c]).to_circuit().unwrap()).unwrap();
            let [axx, axz, azx, azz] = c.symplectic();
            assert_eq!((from_plus.r()[[0, 0]], from_plus.s()[[0, 0]]), (axx, azx), "{c}");
            assert_eq!((from_zero.r()[[0, 0]], from_zero.s()[[0, 0]]), (axz, azz), "{c}");
        }
    }

    #[test]
    fn test_identity_on_graph_state() {
        let g = Graph::cycle(5);
        let st = Stabilizer::from_graph(&g);
        let layer = find_local_clifford_layer(st.r(), st.s(), &g).unwrap();
        assert!(check_local_clifford(st.r(), st.s(), &g, &layer));
        assert!(check_local_clifford(st.r(), st.s(), &g, &LocalClifford::identity(5)));
    }

    #[test]
    fn test_undo_dressing() {
        use SingleQubitClifford::*;
        let g = Graph::star(4, 1);
        let st = dressed_graph_state(&g, &[H, SH, I, HSH]);
        let layer = find_local_clifford_layer(st.r(), st.s(), &g).unwrap();
        assert!(check_local_clifford(st.r(), st.s(), &g, &layer));
        assert!(!check_local_clifford(st.r(), st.s(), &g, &LocalClifford::identity(4)));
    }

    #[test]
    fn test_no_layer_for_other_class() {
        let bell = Stabilizer::from_paulis(&["XX", "ZZ"]).unwrap();
        assert!(find_local_clifford_layer(bell.r(), bell.s(), &Graph::new(2)).is_none());
        let product = Stabilizer::from_paulis(&["ZI", "IX"]).unwrap();
        assert!(find_local_clifford_layer(product.r(), product.s(), &Graph::linear(2)).is_none());
    }

    #[test]
    fn test_to_circuit() {
        use SingleQubitClifford::*;
        let layer = LocalClifford::new(vec![HS, I, HSH]);
        assert_eq!(layer.to_circuit().unwrap().to_gate_spec(), "s0 h0 h2 s2 h2");
        assert_eq!(layer.to_string(), "[HS I HSH]");
    }
}
