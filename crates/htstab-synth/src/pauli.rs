//! Pauli operators with exact phase.
//!
//! A [`PauliString`] is `i^k X^x Z^z` on bit masks `x` and `z`, with the
//! `X` factors to the left of the `Z` factors. Since `Y = i X Z`, a signed
//! Hermitian Pauli with `m` factors of `Y` has `k = m + 2 * sign`.

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Maximum number of qubits a bit-packed Pauli string holds.
pub const MAX_PAULI_QUBITS: usize = 64;

/// A tensor product of single-qubit Paulis with a phase in `{1, i, -1, -i}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    num_qubits: usize,
    x: u64,
    z: u64,
    phase: u8,
}

impl PauliString {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            x: 0,
            z: 0,
            phase: 0,
        }
    }

    /// The Hermitian Pauli with the given masks and sign.
    pub fn from_masks(num_qubits: usize, x: u64, z: u64, negative: bool) -> Self {
        let ys = (x & z).count_ones() as u8;
        Self {
            num_qubits,
            x,
            z,
            phase: (ys + 2 * u8::from(negative)) % 4,
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Qubits acted on by `X` or `Y`.
    pub fn x_mask(&self) -> u64 {
        self.x
    }

    /// Qubits acted on by `Z` or `Y`.
    pub fn z_mask(&self) -> u64 {
        self.z
    }

    /// The exponent `k` of the `i^k` prefactor.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Qubits acted on by the identity, as a mask.
    pub fn identity_mask(&self) -> u64 {
        let all = if self.num_qubits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.num_qubits) - 1
        };
        !(self.x | self.z) & all
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> u32 {
        (self.x | self.z).count_ones()
    }

    /// Single-qubit factor at `qubit` as one of `I X Y Z`.
    pub fn factor(&self, qubit: usize) -> char {
        match ((self.x >> qubit) & 1, (self.z >> qubit) & 1) {
            (0, 0) => 'I',
            (1, 0) => 'X',
            (0, 1) => 'Z',
            _ => 'Y',
        }
    }

    /// Sign of a Hermitian Pauli: `Some(true)` for `-1`, `Some(false)` for
    /// `+1`, `None` if the phase is imaginary.
    pub fn sign(&self) -> Option<bool> {
        let ys = ((self.x & self.z).count_ones() % 4) as u8;
        match (self.phase + 4 - ys) % 4 {
            0 => Some(false),
            2 => Some(true),
            _ => None,
        }
    }

    /// The same operator with every sign dropped.
    pub fn unsigned(&self) -> Self {
        Self::from_masks(self.num_qubits, self.x, self.z, false)
    }

    /// Negate the operator.
    pub fn negated(&self) -> Self {
        Self {
            phase: (self.phase + 2) % 4,
            ..*self
        }
    }

    /// Check whether two Paulis commute.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        ((self.x & other.z) ^ (self.z & other.x)).count_ones() % 2 == 0
    }
}

impl Mul for PauliString {
    type Output = PauliString;

    /// `X^x1 Z^z1 X^x2 Z^z2 = (-1)^{|z1 & x2|} X^(x1^x2) Z^(z1^z2)`
    fn mul(self, rhs: PauliString) -> PauliString {
        debug_assert_eq!(self.num_qubits, rhs.num_qubits);
        let swaps = ((self.z & rhs.x).count_ones() % 2) as u8;
        PauliString {
            num_qubits: self.num_qubits,
            x: self.x ^ rhs.x,
            z: self.z ^ rhs.z,
            phase: (self.phase + rhs.phase + 2 * swaps) % 4,
        }
    }
}

impl FromStr for PauliString {
    type Err = SynthError;

    /// Parse a signed Pauli string such as `-XIZY`; qubit 0 comes first.
    fn from_str(s: &str) -> SynthResult<Self> {
        let invalid = |reason: &str| SynthError::InvalidPauli {
            pauli: s.to_string(),
            reason: reason.to_string(),
        };

        let (negative, body) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => (false, s),
        };
        if body.is_empty() {
            return Err(invalid("empty operator"));
        }
        if body.len() > MAX_PAULI_QUBITS {
            return Err(invalid("too many qubits"));
        }

        let mut x = 0u64;
        let mut z = 0u64;
        for (q, c) in body.chars().enumerate() {
            match c {
                'I' => {}
                'X' => x |= 1 << q,
                'Z' => z |= 1 << q,
                'Y' => {
                    x |= 1 << q;
                    z |= 1 << q;
                }
                _ => return Err(invalid(&format!("unexpected character '{c}'"))),
            }
        }
        Ok(Self::from_masks(body.len(), x, z, negative))
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ys = ((self.x & self.z).count_ones() % 4) as u8;
        let prefix = match (self.phase + 4 - ys) % 4 {
            0 => "+",
            1 => "+i",
            2 => "-",
            _ => "-i",
        };
        write!(f, "{prefix}")?;
        for q in 0..self.num_qubits {
            write!(f, "{}", self.factor(q))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PauliString {
        s.parse().unwrap()
    }

    fn times_i(pauli: PauliString) -> PauliString {
        PauliString {
            phase: (pauli.phase + 1) % 4,
            ..pauli
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(p("XIZY").to_string(), "+XIZY");
        assert_eq!(p("-YY").to_string(), "-YY");
        assert_eq!(p("+Z").sign(), Some(false));
        assert_eq!(p("-Y").sign(), Some(true));
        assert_eq!(p("XIZY").x_mask(), 0b1001);
        assert_eq!(p("XIZY").z_mask(), 0b1100);
        assert_eq!(p("XIZY").identity_mask(), 0b0010);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<PauliString>().is_err());
        assert!("-".parse::<PauliString>().is_err());
        assert!("XQ".parse::<PauliString>().is_err());
        assert!("xz".parse::<PauliString>().is_err());
    }

    #[test]
    fn test_single_qubit_products() {
        // XZ = -iY, ZX = iY, XY = iZ
        assert_eq!(p("X") * p("Z"), times_i(p("-Y")));
        assert_eq!(p("Z") * p("X"), times_i(p("Y")));
        assert_eq!(p("X") * p("Y"), times_i(p("Z")));
        assert_eq!(p("Y") * p("Y"), PauliString::identity(1));
        assert_eq!((p("X") * p("Z")).sign(), None);
        assert_eq!((p("X") * p("Z")).to_string(), "-iY");
    }

    #[test]
    fn test_commuting_products_stay_hermitian() {
        let a = p("XXI");
        let b = p("ZZI");
        assert!(a.commutes_with(&b));
        assert_eq!(a * b, p("-YYI"));
        assert_eq!(b * a, p("-YYI"));
        assert_eq!((a * b).sign(), Some(true));

        let c = p("XI");
        let d = p("ZI");
        assert!(!c.commutes_with(&d));
        assert_eq!((c * d).sign(), None);
    }

    #[test]
    fn test_negated_and_unsigned() {
        let a = p("-XYZ");
        assert_eq!(a.negated(), p("XYZ"));
        assert_eq!(a.unsigned(), p("XYZ"));
        assert_eq!(a.weight(), 3);
    }
}

