//! The symplectic stabilizer model.
//!
//! A stabilizer on `n` qubits is a pair of `n x n` GF(2) matrices `R` (X part)
//! and `S` (Z part) plus a sign vector. Column `j` is generator `j`: entry
//! `(i, j)` of `R` is 1 iff generator `j` acts as `X` or `Y` on qubit `i`,
//! entry `(i, j)` of `S` is 1 iff it acts as `Z` or `Y`, and `phases[j]` is 1
//! iff its overall sign is `-1`.

use std::fmt;

use htstab_ir::Circuit;
use ndarray::Array1;

use crate::error::{SynthError, SynthResult};
use crate::f2::{self, F2Matrix, F2Vector};
use crate::graph::Graph;
use crate::pauli::{MAX_PAULI_QUBITS, PauliString};
use crate::tableau::Tableau;

/// A set of `n` Pauli generators on `n` qubits with signs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stabilizer {
    r: F2Matrix,
    s: F2Matrix,
    phases: F2Vector,
}

fn check_qubits(num_qubits: usize) -> SynthResult<()> {
    if num_qubits == 0 {
        return Err(SynthError::InvalidStabilizer(
            "at least one generator is required".into(),
        ));
    }
    if num_qubits > MAX_PAULI_QUBITS {
        return Err(SynthError::TooManyQubits {
            num_qubits,
            max: MAX_PAULI_QUBITS,
        });
    }
    Ok(())
}

impl Stabilizer {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Parse generators such as `["XZZ", "-ZXI", "+ZIX"]`.
    ///
    /// Every string carries an optional sign and one of `I X Y Z` per
    /// qubit. All strings must have the same length `n`, and there must be
    /// exactly `n` of them.
    pub fn from_paulis<S: AsRef<str>>(paulis: &[S]) -> SynthResult<Self> {
        let generators = paulis
            .iter()
            .map(|p| p.as_ref().parse::<PauliString>())
            .collect::<SynthResult<Vec<_>>>()?;
        Self::from_generators(&generators)
    }

    /// Build from Hermitian generators.
    pub fn from_generators(generators: &[PauliString]) -> SynthResult<Self> {
        let n = generators.len();
        check_qubits(n)?;
        let mut r = f2::zeros(n, n);
        let mut s = f2::zeros(n, n);
        let mut phases = Array1::zeros(n);
        for (j, g) in generators.iter().enumerate() {
            if g.num_qubits() != n {
                return Err(SynthError::DimensionMismatch {
                    what: "generator length",
                    expected: n,
                    got: g.num_qubits(),
                });
            }
            let negative = g.sign().ok_or_else(|| SynthError::InvalidPauli {
                pauli: g.to_string(),
                reason: "generator is not Hermitian".into(),
            })?;
            for i in 0..n {
                r[[i, j]] = ((g.x_mask() >> i) & 1) as u8;
                s[[i, j]] = ((g.z_mask() >> i) & 1) as u8;
            }
            phases[j] = u8::from(negative);
        }
        Ok(Self { r, s, phases })
    }

    /// The graph state of `graph`: `R = I`, `S = adjacency`, all signs `+`.
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.num_vertices();
        Self {
            r: f2::identity(n),
            s: graph.adjacency().clone(),
            phases: Array1::zeros(n),
        }
    }

    /// Build from raw matrices. Missing phases default to all `+`.
    pub fn from_matrices(r: F2Matrix, s: F2Matrix, phases: Option<F2Vector>) -> SynthResult<Self> {
        let n = r.nrows();
        check_qubits(n)?;
        for (what, got) in [
            ("R columns", r.ncols()),
            ("S rows", s.nrows()),
            ("S columns", s.ncols()),
        ] {
            if got != n {
                return Err(SynthError::DimensionMismatch {
                    what,
                    expected: n,
                    got,
                });
            }
        }
        let phases = phases.unwrap_or_else(|| Array1::zeros(n));
        if phases.len() != n {
            return Err(SynthError::DimensionMismatch {
                what: "phase vector",
                expected: n,
                got: phases.len(),
            });
        }
        if r.iter().chain(s.iter()).chain(phases.iter()).any(|&b| b > 1) {
            return Err(SynthError::InvalidStabilizer(
                "matrix entries must be 0 or 1".into(),
            ));
        }
        Ok(Self { r, s, phases })
    }

    /// The stabilizer of the state `circuit` prepares from `|0...0>`.
    pub fn from_circuit(circuit: &Circuit) -> SynthResult<Self> {
        check_qubits(circuit.num_qubits())?;
        let tableau = Tableau::from_circuit(circuit)?;
        Self::from_generators(&tableau.generators())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of qubits (and generators).
    pub fn num_qubits(&self) -> usize {
        self.r.nrows()
    }

    /// The X part.
    pub fn r(&self) -> &F2Matrix {
        &self.r
    }

    /// The Z part.
    pub fn s(&self) -> &F2Matrix {
        &self.s
    }

    /// Generator signs, 1 for `-1`.
    pub fn phases(&self) -> &F2Vector {
        &self.phases
    }

    /// Generator `j` as a signed Pauli.
    pub fn generator(&self, j: usize) -> PauliString {
        let n = self.num_qubits();
        let (x, z) = (0..n).fold((0u64, 0u64), |(x, z), i| {
            (
                x | (u64::from(self.r[[i, j]]) << i),
                z | (u64::from(self.s[[i, j]]) << i),
            )
        });
        PauliString::from_masks(n, x, z, self.phases[j] == 1)
    }

    /// All generators.
    pub fn generators(&self) -> Vec<PauliString> {
        (0..self.num_qubits()).map(|j| self.generator(j)).collect()
    }

    /// Generators as signed strings such as `+XZZ`.
    pub fn to_paulis(&self) -> Vec<String> {
        self.generators().iter().map(ToString::to_string).collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// `[R; S]`, the `2n x n` check matrix.
    fn check_matrix(&self) -> F2Matrix {
        f2::vstack(&self.r, &self.s)
    }

    /// `[R; S]^T Λ [R'; S']` with `Λ` the symplectic form.
    fn symplectic_product(&self, other: &Stabilizer) -> F2Matrix {
        f2::add(
            &f2::mul(&f2::transpose(&self.r), &other.s),
            &f2::mul(&f2::transpose(&self.s), &other.r),
        )
    }

    /// Check that the generators are independent and pairwise commute.
    pub fn validate(&self) -> SynthResult<()> {
        let n = self.num_qubits();
        let rank = f2::rank(&self.check_matrix());
        if rank != n {
            return Err(SynthError::InvalidStabilizer(format!(
                "generators are linearly dependent (rank {rank} of {n})"
            )));
        }
        if !f2::is_zero(&self.symplectic_product(self)) {
            return Err(SynthError::InvalidStabilizer(
                "generators do not commute".into(),
            ));
        }
        Ok(())
    }

    /// Whether [`validate`](Self::validate) succeeds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check whether `qubit` fails to factor out as a fixed single-qubit Pauli.
    ///
    /// The qubit is entangled iff the non-identity factors the generators
    /// place on it are not all the same.
    pub fn is_qubit_entangled(&self, qubit: usize) -> bool {
        let mut seen = 0u8;
        for j in 0..self.num_qubits() {
            let factor = (self.r[[qubit, j]] << 1) | self.s[[qubit, j]];
            if factor == 0 {
                continue;
            }
            if seen == 0 {
                seen = factor;
            } else if seen != factor {
                return true;
            }
        }
        false
    }

    /// Entangled qubits as a bit mask; bit `q` is qubit `q`.
    pub fn entangled_mask(&self) -> u64 {
        (0..self.num_qubits())
            .filter(|&q| self.is_qubit_entangled(q))
            .fold(0, |m, q| m | (1u64 << q))
    }

    /// All `2^n` group elements with exact signs. Element `k` is the product
    /// of the generators selected by the bits of `k`.
    pub fn expand(&self) -> Vec<PauliString> {
        let n = self.num_qubits();
        let generators = self.generators();
        let mut elements = Vec::with_capacity(1 << n);
        elements.push(PauliString::identity(n));
        for k in 1usize..(1 << n) {
            let low = k.trailing_zeros() as usize;
            elements.push(elements[k & (k - 1)] * generators[low]);
        }
        elements
    }

    /// The sign this group assigns to the unsigned Pauli with masks `x`, `z`:
    /// `Some(true)` for `-1`, `None` if the Pauli is not in the group.
    pub fn sign_in_group(&self, x: u64, z: u64) -> Option<bool> {
        let n = self.num_qubits();
        let target = Array1::from_shape_fn(2 * n, |k| {
            let mask = if k < n { x } else { z };
            ((mask >> (k % n)) & 1) as u8
        });
        let selection = f2::solve(&self.check_matrix(), &target)?;
        let product = selection
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit == 1)
            .fold(PauliString::identity(n), |acc, (j, _)| acc * self.generator(j));
        product.sign()
    }

    /// The sign this group assigns to the generator of `pauli`, ignoring
    /// the sign `pauli` carries.
    pub fn sign_of(&self, pauli: &PauliString) -> Option<bool> {
        self.sign_in_group(pauli.x_mask(), pauli.z_mask())
    }

    // =========================================================================
    // Equivalence
    // =========================================================================

    /// Same unsigned group: every generator of one commutes with every
    /// generator of the other.
    pub fn eq_mod_phase(&self, other: &Stabilizer) -> bool {
        self.num_qubits() == other.num_qubits()
            && f2::is_zero(&self.symplectic_product(other))
    }

    /// Same group including signs: the unsigned groups agree and every
    /// generator of `other` has the same sign in this group.
    pub fn is_equivalent(&self, other: &Stabilizer) -> bool {
        self.eq_mod_phase(other)
            && other
                .generators()
                .iter()
                .all(|g| self.sign_of(g) == g.sign())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace generator `target` by the product `target * source`.
    pub fn multiply_generator(&mut self, target: usize, source: usize) -> SynthResult<()> {
        let n = self.num_qubits();
        for index in [target, source] {
            if index >= n {
                return Err(SynthError::DimensionMismatch {
                    what: "generator index",
                    expected: n,
                    got: index,
                });
            }
        }
        if target == source {
            return Err(SynthError::InvalidStabilizer(
                "cannot multiply a generator by itself".into(),
            ));
        }
        let product = self.generator(target) * self.generator(source);
        let negative = product.sign().ok_or_else(|| {
            SynthError::InvalidStabilizer(format!(
                "generators {target} and {source} do not commute"
            ))
        })?;
        for i in 0..n {
            self.r[[i, target]] ^= self.r[[i, source]];
            self.s[[i, target]] ^= self.s[[i, source]];
        }
        self.phases[target] = u8::from(negative);
        Ok(())
    }
}

impl fmt::Display for Stabilizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_paulis().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stab(paulis: &[&str]) -> Stabilizer {
        Stabilizer::from_paulis(paulis).unwrap()
    }

    #[test]
    fn test_from_paulis_layout() {
        let st = stab(&["XZZ", "-ZXI", "+ZIX"]);
        assert_eq!(st.num_qubits(), 3);
        assert_eq!(st.r()[[0, 0]], 1);
        assert_eq!(st.s()[[1, 0]], 1);
        assert_eq!(st.s()[[0, 1]], 1);
        assert_eq!(st.phases().to_vec(), vec![0, 1, 0]);
        assert_eq!(st.to_paulis(), vec!["+XZZ", "-ZXI", "+ZIX"]);
    }

    #[test]
    fn test_from_paulis_errors() {
        assert!(Stabilizer::from_paulis(&["XZ", "ZXI"]).is_err());
        assert!(Stabilizer::from_paulis(&["XZ"]).is_err());
        assert!(Stabilizer::from_paulis::<&str>(&[]).is_err());
        assert!(Stabilizer::from_paulis(&["XA", "ZX"]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(stab(&["XZZ", "ZXI", "ZIX"]).is_valid());
        // dependent
        assert!(stab(&["XX", "XX"]).validate().is_err());
        // anticommuting
        assert!(stab(&["XI", "ZI"]).validate().is_err());
    }

    #[test]
    fn test_from_graph() {
        let st = Stabilizer::from_graph(&Graph::linear(3));
        assert_eq!(st.to_paulis(), vec!["+XZI", "+ZXZ", "+IZX"]);
        assert!(st.is_valid());
    }

    #[test]
    fn test_entanglement() {
        let st = stab(&["XXI", "ZZI", "IIZ"]);
        assert!(st.is_qubit_entangled(0));
        assert!(st.is_qubit_entangled(1));
        assert!(!st.is_qubit_entangled(2));
        assert_eq!(st.entangled_mask(), 0b011);

        let product = stab(&["YII", "IXI", "IIZ"]);
        assert_eq!(product.entangled_mask(), 0);
    }

    #[test]
    fn test_entangled_mask_on_wide_registers() {
        for n in [33, 40, MAX_PAULI_QUBITS] {
            let (a, b) = (n - 2, n - 1);
            let paulis: Vec<String> = (0..n)
                .map(|j| {
                    (0..n)
                        .map(|q| {
                            let pair = j >= a && q >= a;
                            match (pair, q == j) {
                                (true, _) if j == a => 'X',
                                (true, _) | (false, true) => 'Z',
                                (false, false) => 'I',
                            }
                        })
                        .collect()
                })
                .collect();
            let st = Stabilizer::from_paulis(&paulis).unwrap();
            assert!(st.is_valid());
            assert_eq!(st.entangled_mask(), (1u64 << a) | (1u64 << b), "n = {n}");
        }
    }

    #[test]
    fn test_expand() {
        let st = stab(&["XX", "ZZ"]);
        let elements: Vec<String> = st.expand().iter().map(ToString::to_string).collect();
        assert_eq!(elements, vec!["+II", "+XX", "+ZZ", "-YY"]);
    }

    #[test]
    fn test_sign_in_group() {
        let st = stab(&["XX", "-ZZ"]);
        assert_eq!(st.sign_in_group(0b11, 0b11), Some(false)); // (XX)(-ZZ) = +YY
        assert_eq!(st.sign_in_group(0b00, 0b11), Some(true));
        assert_eq!(st.sign_in_group(0b01, 0b00), None);
    }

    #[test]
    fn test_equivalence() {
        let a = stab(&["XX", "ZZ"]);
        let b = stab(&["-YY", "ZZ"]);
        let c = stab(&["YY", "ZZ"]);
        assert!(a.eq_mod_phase(&b));
        assert!(a.is_equivalent(&b));
        assert!(a.eq_mod_phase(&c));
        assert!(!a.is_equivalent(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_equivalence_checks_every_sign() {
        let st = stab(&["XYI", "ZXX", "YZI"]);
        assert!(st.is_valid());
        let flipped = stab(&["XYI", "-ZXX", "YZI"]);
        assert!(st.eq_mod_phase(&flipped));
        assert!(!st.is_equivalent(&flipped));
        assert!(!flipped.is_equivalent(&st));
    }

    #[test]
    fn test_from_circuit() {
        let circuit = Circuit::parse(3, "h0 h1 h2 cz0,1 cz1,2").unwrap();
        let st = Stabilizer::from_circuit(&circuit).unwrap();
        assert_eq!(st, Stabilizer::from_graph(&Graph::linear(3)));

        let flipped = Circuit::parse(2, "x0 h0 cx0,1").unwrap();
        let st = Stabilizer::from_circuit(&flipped).unwrap();
        assert_eq!(st.to_paulis(), vec!["-XX", "+ZZ"]);
    }

    #[test]
    fn test_multiply_generator() {
        let mut st = stab(&["XX", "ZZ"]);
        st.multiply_generator(0, 1).unwrap();
        assert_eq!(st.to_paulis(), vec!["-YY", "+ZZ"]);
        assert!(st.is_equivalent(&stab(&["XX", "ZZ"])));
        assert!(st.multiply_generator(0, 0).is_err());
        assert!(st.multiply_generator(0, 2).is_err());
    }
}
