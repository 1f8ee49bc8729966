//! Mutually unbiased bases.
//!
//! A complete set of mutually unbiased bases on `n` qubits consists of
//! `2^n + 1` stabilizer groups that together contain every non-identity
//! Pauli exactly once. The MUB tables list one set per connectivity with a
//! readout circuit for every basis: the circuit maps every generator of the
//! basis onto a product of `Z` operators with positive sign.
//!
//! ```text
//! totalCost:maxCost:maxDepth
//! XI,IX:gateSpec
//! ...
//! ```
//!
//! Sets without precomputed circuits are stored as bare basis lists, one
//! basis per line, and their readout circuits are synthesized when the
//! table is first loaded (see [`MubTable::from_bases`]).

use htstab_ir::Circuit;
use serde::{Deserialize, Serialize};

use crate::connectivity::Connectivity;
use crate::error::{SynthError, SynthResult};
use crate::pauli::PauliString;
use crate::stabilizer::Stabilizer;

/// Largest qubit count with MUB tables.
pub const MAX_MUB_QUBITS: usize = 6;

/// Whether a MUB set exists for `n` qubits on `connectivity`: every
/// supported device up to 5 qubits, and all-to-all on 6.
pub fn has_mubs(n: usize, connectivity: Connectivity) -> bool {
    connectivity.ensure_supported(n).is_ok()
        && (n < MAX_MUB_QUBITS || (n == MAX_MUB_QUBITS && connectivity == Connectivity::All))
}

/// A parsed MUB table.
#[derive(Debug, Clone)]
pub struct MubTable {
    num_qubits: usize,
    connectivity: Connectivity,
    total_cost: u32,
    max_cost: u32,
    max_depth: u32,
    bases: Vec<Vec<PauliString>>,
    circuits: Vec<Circuit>,
}

/// Summary of a MUB table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MubInfo {
    /// Number of bases, `2^n + 1`.
    pub num_circuits: usize,
    /// Largest two-qubit gate count of a readout circuit.
    pub max_two_qubit_count: u32,
    /// Largest two-qubit depth of a readout circuit.
    pub max_two_qubit_depth: u32,
    /// Mean two-qubit gate count per readout circuit.
    pub average_two_qubit_gates: f64,
}

/// Number of bases in a complete set on `n` qubits.
pub fn num_bases(n: usize) -> usize {
    (1 << n) + 1
}

fn parse_basis(n: usize, paulis: &str) -> Result<Vec<PauliString>, String> {
    let basis = paulis
        .split(',')
        .map(|p| p.trim().parse::<PauliString>())
        .collect::<SynthResult<Vec<_>>>()
        .map_err(|e| e.to_string())?;
    if basis.len() != n || basis.iter().any(|p| p.num_qubits() != n) {
        return Err(format!("expected {n} Paulis on {n} qubits"));
    }
    Ok(basis)
}

fn check_count(name: &str, n: usize, found: usize) -> SynthResult<()> {
    if found != num_bases(n) {
        return Err(SynthError::malformed_table(
            name,
            0,
            format!("expected {} bases, found {found}", num_bases(n)),
        ));
    }
    Ok(())
}

fn ensure_mub_size(n: usize, connectivity: Connectivity) -> SynthResult<()> {
    if n > MAX_MUB_QUBITS {
        return Err(SynthError::MubUnavailable {
            num_qubits: n,
            connectivity: connectivity.to_string(),
        });
    }
    Ok(())
}

/// Parse a bare basis list: `2^n + 1` lines of `n` comma-separated Paulis.
pub fn parse_bases(name: &str, n: usize, text: &str) -> SynthResult<Vec<Vec<PauliString>>> {
    let bases = text
        .lines()
        .enumerate()
        .map(|(k, line)| (k + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            parse_basis(n, line).map_err(|reason| SynthError::malformed_table(name, line_no, reason))
        })
        .collect::<SynthResult<Vec<_>>>()?;
    check_count(name, n, bases.len())?;
    Ok(bases)
}

impl MubTable {
    /// Parse a table; `name` is used in error messages.
    pub fn parse(
        name: &str,
        n: usize,
        connectivity: Connectivity,
        text: &str,
    ) -> SynthResult<Self> {
        ensure_mub_size(n, connectivity)?;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(k, line)| (k + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| SynthError::malformed_table(name, 1, "missing header"))?;
        let numbers = header
            .split(':')
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SynthError::malformed_table(name, header_line, format!("header: {e}")))?;
        let [total_cost, max_cost, max_depth] = numbers[..] else {
            return Err(SynthError::malformed_table(
                name,
                header_line,
                format!("header needs 3 fields, found {}", numbers.len()),
            ));
        };

        let mut bases = Vec::new();
        let mut circuits = Vec::new();
        for (line_no, line) in lines {
            let bad = |reason: String| SynthError::malformed_table(name, line_no, reason);
            let (paulis, spec) = line
                .split_once(':')
                .ok_or_else(|| bad("expected 'paulis:gates'".into()))?;
            let basis = parse_basis(n, paulis).map_err(bad)?;
            let circuit = Circuit::parse(n as u32, spec).map_err(|e| bad(e.to_string()))?;
            bases.push(basis);
            circuits.push(circuit);
        }

        check_count(name, n, bases.len())?;
        Ok(Self {
            num_qubits: n,
            connectivity,
            total_cost,
            max_cost,
            max_depth,
            bases,
            circuits,
        })
    }

    /// Build a table by computing the readout circuit of every basis.
    ///
    /// `readout` receives each basis as a stabilizer with positive signs.
    /// The header values are taken from the returned circuits.
    pub fn from_bases(
        n: usize,
        connectivity: Connectivity,
        bases: Vec<Vec<PauliString>>,
        mut readout: impl FnMut(&Stabilizer) -> SynthResult<Circuit>,
    ) -> SynthResult<Self> {
        ensure_mub_size(n, connectivity)?;
        check_count(&format!("mub{n}-{connectivity}"), n, bases.len())?;
        let circuits = bases
            .iter()
            .map(|basis| readout(&Stabilizer::from_generators(basis)?))
            .collect::<SynthResult<Vec<_>>>()?;
        Ok(Self {
            num_qubits: n,
            connectivity,
            total_cost: circuits.iter().map(Circuit::two_qubit_count).sum(),
            max_cost: circuits.iter().map(Circuit::two_qubit_count).max().unwrap_or(0),
            max_depth: circuits.iter().map(Circuit::two_qubit_depth).max().unwrap_or(0),
            bases,
            circuits,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The connectivity the circuits respect.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Declared total two-qubit gate count over all circuits.
    pub fn total_cost(&self) -> u32 {
        self.total_cost
    }

    /// Generators of every basis.
    pub fn bases(&self) -> &[Vec<PauliString>] {
        &self.bases
    }

    /// Generators of every basis as unsigned strings such as `XIZ`.
    pub fn basis_strings(&self) -> Vec<Vec<String>> {
        self.bases
            .iter()
            .map(|basis| {
                basis
                    .iter()
                    .map(|p| (0..p.num_qubits()).map(|q| p.factor(q)).collect())
                    .collect()
            })
            .collect()
    }

    /// Basis `k` as a stabilizer.
    pub fn stabilizer(&self, k: usize) -> SynthResult<Stabilizer> {
        let basis = self.bases.get(k).ok_or(SynthError::DimensionMismatch {
            what: "basis index",
            expected: self.bases.len(),
            got: k,
        })?;
        Stabilizer::from_generators(basis)
    }

    /// Readout circuit of every basis.
    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    /// Summary from the declared header.
    pub fn info(&self) -> MubInfo {
        let num_circuits = self.circuits.len();
        MubInfo {
            num_circuits,
            max_two_qubit_count: self.max_cost,
            max_two_qubit_depth: self.max_depth,
            average_two_qubit_gates: f64::from(self.total_cost) / num_circuits.max(1) as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUBITS: &str = "\
2:1:1
XI,IX:h0 h1
ZI,IZ:
YI,IY:sdg0 h0 sdg1 h1
XX,ZZ:cx0,1 h0
YZ,ZY:h0 h1
";

    #[test]
    fn test_parse() {
        let table = MubTable::parse("t", 2, Connectivity::All, TWO_QUBITS).unwrap();
        assert_eq!(table.bases().len(), 5);
        assert_eq!(table.circuits()[3].to_gate_spec(), "cx0,1 h0");
        assert_eq!(table.basis_strings()[4], vec!["YZ", "ZY"]);
        assert!(table.circuits()[1].is_empty());

        let info = table.info();
        assert_eq!(info.num_circuits, 5);
        assert_eq!(info.max_two_qubit_count, 1);
        assert!((info.average_two_qubit_gates - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_parse_errors() {
        let no_header = "XI,IX:h0 h1\n";
        assert!(MubTable::parse("t", 2, Connectivity::All, no_header).is_err());

        let short = "2:1:1\nXI,IX:h0 h1\n";
        assert!(matches!(
            MubTable::parse("t", 2, Connectivity::All, short),
            Err(SynthError::MalformedTable { line: 0, .. })
        ));

        let wrong_width = TWO_QUBITS.replace("XX,ZZ", "XXX,ZZZ");
        assert!(matches!(
            MubTable::parse("t", 2, Connectivity::All, &wrong_width),
            Err(SynthError::MalformedTable { line: 5, .. })
        ));

        assert!(matches!(
            MubTable::parse("t", 7, Connectivity::All, TWO_QUBITS),
            Err(SynthError::MubUnavailable { num_qubits: 7, .. })
        ));
    }

    #[test]
    fn test_parse_bases() {
        let list: String = TWO_QUBITS
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .map(|(paulis, _)| format!("{paulis}\n"))
            .collect();
        let bases = parse_bases("b", 2, &list).unwrap();
        assert_eq!(bases.len(), 5);
        assert_eq!(bases[3][1].to_string(), "+ZZ");

        assert!(matches!(
            parse_bases("b", 2, "XI,IX\nZI,IZ\n"),
            Err(SynthError::MalformedTable { line: 0, .. })
        ));
        assert!(matches!(
            parse_bases("b", 2, &list.replace("YZ,ZY", "YZ,ZQ")),
            Err(SynthError::MalformedTable { line: 5, .. })
        ));
    }

    #[test]
    fn test_from_bases_takes_header_from_circuits() {
        let bases = parse_bases("b", 2, "XI,IX\nZI,IZ\nYI,IY\nXX,ZZ\nYZ,ZY\n").unwrap();
        let table = MubTable::from_bases(2, Connectivity::All, bases, |st| {
            let spec = if st.is_qubit_entangled(0) { "cx0,1 h0" } else { "" };
            Ok(Circuit::parse(2, spec)?)
        })
        .unwrap();
        assert_eq!(table.circuits().len(), 5);
        assert_eq!(table.total_cost(), 2);
        let info = table.info();
        assert_eq!(info.max_two_qubit_count, 1);
        assert_eq!(info.max_two_qubit_depth, 1);

        let failing = MubTable::from_bases(2, Connectivity::All, table.bases().to_vec(), |_| {
            Err(SynthError::UnsupportedQubitCount(2))
        });
        assert!(failing.is_err());
    }

    #[test]
    fn test_availability() {
        assert!(has_mubs(2, Connectivity::All));
        assert!(has_mubs(5, Connectivity::T));
        assert!(has_mubs(5, Connectivity::Q));
        assert!(has_mubs(6, Connectivity::All));
        assert!(!has_mubs(6, Connectivity::Linear));
        assert!(!has_mubs(3, Connectivity::Star));
        assert!(!has_mubs(7, Connectivity::All));
    }

    #[test]
    fn test_basis_stabilizer() {
        let table = MubTable::parse("t", 2, Connectivity::All, TWO_QUBITS).unwrap();
        let bell = table.stabilizer(3).unwrap();
        assert!(bell.is_valid());
        assert!(table.stabilizer(9).is_err());
    }
}
