//! Hardware connectivities.
//!
//! A connectivity names the coupling graph of a device: two-qubit gates may
//! only act on qubit pairs joined by an edge. Template tables exist for a
//! fixed set of `(qubit count, connectivity)` pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;

/// A named coupling topology.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Connectivity {
    /// Every pair of qubits is coupled.
    #[default]
    All,
    /// A path `0 - 1 - ... - (n-1)`.
    Linear,
    /// Qubit 0 coupled to every other qubit.
    Star,
    /// A ring.
    Cycle,
    /// Star on `0..4` centered at 0 with qubit 3 fanning out to the rest.
    T,
    /// A path with the extra edge `(n-1, n-4)`.
    Q,
    /// Six-cycle with the rung `(1, 4)`.
    Ladder,
    /// The path `3 - 0 - 1 - 2 - 5` with the branch `(1, 4)`.
    E,
    /// Paths `0 - 1 - 2` and `3 - 4 - 5` joined by `(1, 4)`.
    H,
}

/// Every supported `(qubit count, connectivity)` pair.
const SUPPORTED: &[(usize, Connectivity)] = &[
    (2, Connectivity::All),
    (3, Connectivity::All),
    (3, Connectivity::Linear),
    (4, Connectivity::All),
    (4, Connectivity::Linear),
    (4, Connectivity::Star),
    (4, Connectivity::Cycle),
    (5, Connectivity::All),
    (5, Connectivity::Linear),
    (5, Connectivity::Star),
    (5, Connectivity::Cycle),
    (5, Connectivity::T),
    (5, Connectivity::Q),
    (6, Connectivity::All),
    (6, Connectivity::Linear),
    (6, Connectivity::Star),
    (6, Connectivity::Ladder),
    (6, Connectivity::E),
    (6, Connectivity::H),
    (6, Connectivity::Q),
];

/// Every supported `(qubit count, connectivity)` pair, by qubit count.
pub fn available_connectivities() -> &'static [(usize, Connectivity)] {
    SUPPORTED
}

impl Connectivity {
    /// Every connectivity, in declaration order.
    pub const ALL: &'static [Connectivity] = &[
        Connectivity::All,
        Connectivity::Linear,
        Connectivity::Star,
        Connectivity::Cycle,
        Connectivity::T,
        Connectivity::Q,
        Connectivity::Ladder,
        Connectivity::E,
        Connectivity::H,
    ];

    /// The name used in table file names and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Connectivity::All => "all",
            Connectivity::Linear => "linear",
            Connectivity::Star => "star",
            Connectivity::Cycle => "cycle",
            Connectivity::T => "T",
            Connectivity::Q => "Q",
            Connectivity::Ladder => "ladder",
            Connectivity::E => "E",
            Connectivity::H => "H",
        }
    }

    /// Check whether templates exist for `n` qubits.
    pub fn is_supported(self, n: usize) -> bool {
        SUPPORTED.contains(&(n, self))
    }

    /// Reject unsupported qubit counts.
    pub fn ensure_supported(self, n: usize) -> SynthResult<()> {
        if !(crate::lc_class::MIN_QUBITS..=crate::lc_class::MAX_QUBITS).contains(&n) {
            return Err(SynthError::UnsupportedQubitCount(n));
        }
        if !self.is_supported(n) {
            return Err(SynthError::UnsupportedConnectivity {
                num_qubits: n,
                connectivity: self.name().to_string(),
            });
        }
        Ok(())
    }

    /// Connectivities supported for `n` qubits.
    pub fn supported_for(n: usize) -> impl Iterator<Item = Connectivity> {
        SUPPORTED
            .iter()
            .filter(move |&&(m, _)| m == n)
            .map(|&(_, c)| c)
    }

    /// The coupling graph on `n` qubits.
    pub fn graph(self, n: usize) -> SynthResult<Graph> {
        self.ensure_supported(n)?;
        let g = match self {
            Connectivity::All => Graph::fully_connected(n),
            Connectivity::Linear => Graph::linear(n),
            Connectivity::Star => Graph::star(n, 0),
            Connectivity::Cycle => Graph::cycle(n),
            Connectivity::T => Graph::pusteblume(n)?,
            Connectivity::Q => {
                let mut g = Graph::linear(n);
                g.add_edge(n - 1, n - 4);
                g
            }
            Connectivity::Ladder => {
                let mut g = Graph::cycle(n);
                g.add_edge(1, 4);
                g
            }
            Connectivity::E => {
                let mut g = Graph::new(n);
                g.add_path(&[3, 0, 1, 2, 5]).add_edge(1, 4);
                g
            }
            Connectivity::H => {
                let mut g = Graph::new(n);
                g.add_path(&[0, 1, 2]).add_path(&[3, 4, 5]).add_edge(1, 4);
                g
            }
        };
        Ok(g)
    }
}

impl FromStr for Connectivity {
    type Err = SynthError;

    fn from_str(s: &str) -> SynthResult<Self> {
        Connectivity::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| SynthError::UnknownConnectivity(s.to_string()))
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for &c in Connectivity::ALL {
            assert_eq!(c.name().parse::<Connectivity>().unwrap(), c);
        }
        assert!(matches!(
            "ring".parse::<Connectivity>(),
            Err(SynthError::UnknownConnectivity(_))
        ));
        // names are case sensitive
        assert!("t".parse::<Connectivity>().is_err());
    }

    #[test]
    fn test_supported_pairs() {
        assert_eq!(available_connectivities().len(), 20);
        assert!(Connectivity::All.is_supported(2));
        assert!(!Connectivity::Linear.is_supported(2));
        assert!(Connectivity::T.is_supported(5));
        assert!(!Connectivity::Cycle.is_supported(6));
        assert_eq!(Connectivity::supported_for(4).count(), 4);
        assert_eq!(Connectivity::supported_for(6).count(), 7);
    }

    #[test]
    fn test_ensure_supported_errors() {
        assert!(matches!(
            Connectivity::Linear.ensure_supported(2),
            Err(SynthError::UnsupportedConnectivity { num_qubits: 2, .. })
        ));
        assert!(matches!(
            Connectivity::All.ensure_supported(7),
            Err(SynthError::UnsupportedQubitCount(7))
        ));
    }

    #[test]
    fn test_coupling_graphs() {
        let q = Connectivity::Q.graph(5).unwrap();
        assert_eq!(q.edges(), vec![(0, 1), (1, 2), (1, 4), (2, 3), (3, 4)]);

        let ladder = Connectivity::Ladder.graph(6).unwrap();
        assert_eq!(ladder.edge_count(), 7);
        assert!(ladder.has_edge(1, 4) && ladder.has_edge(5, 0));

        let e = Connectivity::E.graph(6).unwrap();
        assert_eq!(e.edges(), vec![(0, 1), (0, 3), (1, 2), (1, 4), (2, 5)]);

        let h = Connectivity::H.graph(6).unwrap();
        assert_eq!(h.degree(1), 3);
        assert_eq!(h.degree(4), 3);

        let t = Connectivity::T.graph(5).unwrap();
        assert_eq!(t.edges(), vec![(0, 1), (0, 2), (0, 3), (3, 4)]);
    }

    #[test]
    fn test_every_coupling_graph_is_connected() {
        for &(n, c) in available_connectivities() {
            let g = c.graph(n).unwrap();
            let mut seen = vec![false; n];
            let mut stack = vec![0];
            while let Some(v) = stack.pop() {
                if !std::mem::replace(&mut seen[v], true) {
                    stack.extend(g.neighbors(v));
                }
            }
            assert!(seen.iter().all(|&s| s), "{c} on {n} qubits is disconnected");
        }
    }
}
