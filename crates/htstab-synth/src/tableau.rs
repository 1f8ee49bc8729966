//! Stabilizer tableau simulation of Clifford circuits.
//!
//! Rows are generators, stored as bit masks over qubits. Simulation starts
//! from `|0...0>` (generator `j` is `+Z_j`) and conjugates every row by each
//! gate in turn, tracking signs exactly.

use htstab_ir::{Circuit, CliffordGate, Instruction};

use crate::error::{SynthError, SynthResult};
use crate::pauli::{MAX_PAULI_QUBITS, PauliString};

/// A signed stabilizer tableau.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tableau {
    num_qubits: usize,
    x: Vec<u64>,
    z: Vec<u64>,
    sign: Vec<bool>,
}

#[inline]
fn bit(mask: u64, q: usize) -> bool {
    (mask >> q) & 1 == 1
}

impl Tableau {
    /// The tableau of `|0...0>`.
    pub fn new(num_qubits: usize) -> SynthResult<Self> {
        if num_qubits > MAX_PAULI_QUBITS {
            return Err(SynthError::TooManyQubits {
                num_qubits,
                max: MAX_PAULI_QUBITS,
            });
        }
        Ok(Self {
            num_qubits,
            x: vec![0; num_qubits],
            z: (0..num_qubits).map(|q| 1u64 << q).collect(),
            sign: vec![false; num_qubits],
        })
    }

    /// Simulate `circuit` on `|0...0>`.
    pub fn from_circuit(circuit: &Circuit) -> SynthResult<Self> {
        let mut tableau = Self::new(circuit.num_qubits())?;
        for inst in circuit {
            tableau.apply(inst);
        }
        Ok(tableau)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Generator `j` as a signed Pauli.
    pub fn generator(&self, j: usize) -> PauliString {
        PauliString::from_masks(self.num_qubits, self.x[j], self.z[j], self.sign[j])
    }

    /// All generators.
    pub fn generators(&self) -> Vec<PauliString> {
        (0..self.num_qubits).map(|j| self.generator(j)).collect()
    }

    /// Conjugate every generator by one gate.
    pub fn apply(&mut self, inst: &Instruction) {
        let q = |k: usize| inst.qubits[k].index();
        match inst.gate {
            CliffordGate::H => self.h(q(0)),
            CliffordGate::S => self.s(q(0)),
            CliffordGate::Sdg => self.sdg(q(0)),
            CliffordGate::X => self.x(q(0)),
            CliffordGate::Y => self.y(q(0)),
            CliffordGate::Z => self.z(q(0)),
            CliffordGate::CX => self.cx(q(0), q(1)),
            CliffordGate::CZ => self.cz(q(0), q(1)),
            CliffordGate::Swap => self.swap(q(0), q(1)),
        }
    }

    fn update(&mut self, f: impl Fn(&mut u64, &mut u64, &mut bool)) {
        for row in 0..self.num_qubits {
            f(&mut self.x[row], &mut self.z[row], &mut self.sign[row]);
        }
    }

    /// Hadamard.
    pub fn h(&mut self, a: usize) {
        self.update(|x, z, r| {
            let (xa, za) = (bit(*x, a), bit(*z, a));
            *r ^= xa & za;
            if xa != za {
                *x ^= 1 << a;
                *z ^= 1 << a;
            }
        });
    }

    /// Phase gate.
    pub fn s(&mut self, a: usize) {
        self.update(|x, z, r| {
            let (xa, za) = (bit(*x, a), bit(*z, a));
            *r ^= xa & za;
            if xa {
                *z ^= 1 << a;
            }
        });
    }

    /// Inverse phase gate.
    pub fn sdg(&mut self, a: usize) {
        self.update(|x, z, r| {
            let (xa, za) = (bit(*x, a), bit(*z, a));
            *r ^= xa & !za;
            if xa {
                *z ^= 1 << a;
            }
        });
    }

    /// Pauli X.
    pub fn x(&mut self, a: usize) {
        self.update(|_, z, r| *r ^= bit(*z, a));
    }

    /// Pauli Y.
    pub fn y(&mut self, a: usize) {
        self.update(|x, z, r| *r ^= bit(*x, a) ^ bit(*z, a));
    }

    /// Pauli Z.
    pub fn z(&mut self, a: usize) {
        self.update(|x, _, r| *r ^= bit(*x, a));
    }

    /// Controlled-NOT with control `c` and target `t`.
    pub fn cx(&mut self, c: usize, t: usize) {
        self.update(|x, z, r| {
            let (xc, zc, xt, zt) = (bit(*x, c), bit(*z, c), bit(*x, t), bit(*z, t));
            *r ^= xc & zt & !(xt ^ zc);
            if xc {
                *x ^= 1 << t;
            }
            if zt {
                *z ^= 1 << c;
            }
        });
    }

    /// Controlled-Z.
    pub fn cz(&mut self, a: usize, b: usize) {
        self.h(b);
        self.cx(a, b);
        self.h(b);
    }

    /// Swap.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.update(|x, z, _| {
            for mask in [x, z] {
                if bit(*mask, a) != bit(*mask, b) {
                    *mask ^= (1 << a) | (1 << b);
                }
            }
        });
    }
}
