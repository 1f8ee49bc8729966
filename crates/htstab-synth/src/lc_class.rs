//! Local-Clifford equivalence classes of stabilizer states on 2 to 6 qubits.
//!
//! Every stabilizer state is local-Clifford equivalent to a graph state, and
//! the graph can be chosen up to local complementation. Classes are grouped
//! by entanglement structure (the topology of the graph), and within a
//! structure by which vertices play which role. Each class has a dense id in
//! `[0, count(n))`: structures occupy contiguous id ranges in declaration
//! order, and the offset within a range is the [`Partition`] number of the
//! class's vertex roles.
//!
//! | Qubits | Structures | Classes |
//! |--------|------------|---------|
//! | 2 | 2 | 2 |
//! | 3 | 3 | 5 |
//! | 4 | 6 | 18 |
//! | 5 | 11 | 93 |
//! | 6 | 26 | 760 |
//!
//! Classification reads two local-Clifford invariants: which qubits are
//! entangled, and the identity distribution, i.e. for every set of qubits
//! how many of the `2^n` group elements act as the identity on exactly that
//! set.

use std::fmt;

use tracing::trace;

use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;
use crate::linear_index::{Group, Partition, Repr};
use crate::stabilizer::Stabilizer;

/// Smallest qubit count with a class table.
pub const MIN_QUBITS: usize = 2;

/// Largest qubit count with a class table.
pub const MAX_QUBITS: usize = 6;

macro_rules! entanglement_structures {
    (
        $(#[$meta:meta])*
        $name:ident, $n:literal {
            $($(#[$vmeta:meta])* $variant:ident => $partition:expr,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every structure, in class-id order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Number of qubits.
            pub const NUM_QUBITS: usize = $n;

            /// The partition shape numbering the vertex roles.
            pub fn partition(self) -> Partition {
                match self {
                    $($name::$variant => $partition,)+
                }
            }

            /// Structure name.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }

        impl From<$name> for EntanglementStructure {
            fn from(s: $name) -> Self {
                EntanglementStructure::$name(s)
            }
        }
    };
}

entanglement_structures! {
    /// Two-qubit structures.
    Structure2, 2 {
        /// Product state.
        Separable => Partition::Whole(2),
        /// Bell pair.
        Entangled => Partition::Whole(2),
    }
}

entanglement_structures! {
    /// Three-qubit structures.
    Structure3, 3 {
        /// Product state.
        Separable => Partition::Whole(3),
        /// One entangled pair; the group of size one is the free qubit.
        Pair => Partition::SingleRest(3),
        /// GHZ-type path on all three qubits.
        Triple => Partition::Whole(3),
    }
}

entanglement_structures! {
    /// Four-qubit structures.
    Structure4, 4 {
        /// Product state.
        Separable => Partition::Whole(4),
        /// One entangled pair.
        Pair => Partition::PairSingles,
        /// Three entangled qubits; the singleton is the free qubit.
        Triple => Partition::SingleRest(4),
        /// Two disjoint pairs.
        TwoPairs => Partition::TwoPairs,
        /// Star on all four qubits.
        Star => Partition::Whole(4),
        /// Path on four qubits; the pairs are its two end edges.
        Line => Partition::TwoPairs,
    }
}

entanglement_structures! {
    /// Five-qubit structures.
    Structure5, 5 {
        /// Product state.
        Separable => Partition::Whole(5),
        /// One entangled pair.
        Pair => Partition::PairRest(5),
        /// Three entangled qubits; the pair holds the free qubits.
        Triple => Partition::PairRest(5),
        /// Two disjoint pairs and a free qubit.
        TwoPairs => Partition::SinglePairPair,
        /// Star on four qubits and a free qubit.
        Star4 => Partition::SingleRest(5),
        /// Path on four qubits and a free qubit.
        Line4 => Partition::SinglePairPair,
        /// Star on all five qubits.
        Star => Partition::Whole(5),
        /// A pair and a disjoint triple.
        PairAndTriple => Partition::PairRest(5),
        /// Star with one extended arm; the pair is the arm.
        T => Partition::PairRest(5),
        /// Path on five qubits; the singleton is its middle vertex.
        Line => Partition::SinglePairPair,
        /// Five-cycle.
        Cycle => Partition::Whole(5),
    }
}

entanglement_structures! {
    /// Six-qubit structures.
    Structure6, 6 {
        /// Product state.
        Separable => Partition::Whole(6),
        /// One entangled pair.
        Pair => Partition::PairRest(6),
        /// Two disjoint pairs and two free qubits.
        TwoPairs => Partition::SinglesPairs,
        /// Three disjoint pairs.
        ThreePairs => Partition::ThreePairs,
        /// One entangled triple and three free qubits.
        Triple => Partition::TripleSingles,
        /// A pair and a triple with one free qubit.
        PairAndTriple => Partition::SinglePairTriple,
        /// Two disjoint triples.
        TwoTriples => Partition::TripleTriple,
        /// Path on four qubits and two free qubits.
        Line4 => Partition::SinglesPairs,
        /// Path on four qubits and a disjoint pair.
        Line4AndPair => Partition::SinglesPairs,
        /// Star on four qubits and two free qubits.
        Star4 => Partition::PairRest(6),
        /// Star on four qubits and a disjoint pair.
        Star4AndPair => Partition::PairRest(6),
        /// Path on five qubits and a free qubit.
        Line5 => Partition::OrderedSinglesPairs,
        /// Five-cycle and a free qubit.
        Cycle5 => Partition::SingleRest(6),
        /// Five-qubit T shape and a free qubit.
        T => Partition::SinglePairTriple,
        /// Star on five qubits and a free qubit.
        Star5 => Partition::SingleRest(6),
        /// Six-cycle.
        Cycle6 => Partition::ThreePairs,
        /// Path on six qubits.
        Line6 => Partition::OrderedSinglesPairs,
        /// Star with one arm of length three.
        T6 => Partition::SinglePairTriple,
        /// Star on four qubits with one arm extended by an edge.
        Cross => Partition::PairRest(6),
        /// Star on all six qubits.
        Star6 => Partition::Whole(6),
        /// Two paths of three joined at their middles.
        H => Partition::TripleTriple,
        /// A vertex with two pendant edges and two extended arms.
        E => Partition::SinglesPairs,
        /// Triangle with a pendant edge at every corner.
        EBar => Partition::ThreePairs,
        /// Four-cycle with two pendant edges on neighboring vertices.
        Box5 => Partition::SinglesPairs,
        /// Four-cycle with two pendant edges on opposite vertices.
        Box4 => Partition::ThreePairs,
        /// The absolutely maximally entangled six-qubit state.
        #[allow(clippy::upper_case_acronyms)]
        AME => Partition::Whole(6),
    }
}

// =============================================================================
// EntanglementStructure
// =============================================================================

/// An entanglement structure for a specific qubit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntanglementStructure {
    /// Two qubits.
    Structure2(Structure2),
    /// Three qubits.
    Structure3(Structure3),
    /// Four qubits.
    Structure4(Structure4),
    /// Five qubits.
    Structure5(Structure5),
    /// Six qubits.
    Structure6(Structure6),
}

impl EntanglementStructure {
    /// Every structure for `n` qubits, in class-id order.
    pub fn all(n: usize) -> SynthResult<Vec<Self>> {
        fn collect<T: Copy + Into<EntanglementStructure>>(all: &[T]) -> Vec<EntanglementStructure> {
            all.iter().map(|&s| s.into()).collect()
        }
        match n {
            2 => Ok(collect(Structure2::ALL)),
            3 => Ok(collect(Structure3::ALL)),
            4 => Ok(collect(Structure4::ALL)),
            5 => Ok(collect(Structure5::ALL)),
            6 => Ok(collect(Structure6::ALL)),
            _ => Err(SynthError::UnsupportedQubitCount(n)),
        }
    }

    /// Number of qubits.
    pub fn num_qubits(self) -> usize {
        match self {
            Self::Structure2(_) => Structure2::NUM_QUBITS,
            Self::Structure3(_) => Structure3::NUM_QUBITS,
            Self::Structure4(_) => Structure4::NUM_QUBITS,
            Self::Structure5(_) => Structure5::NUM_QUBITS,
            Self::Structure6(_) => Structure6::NUM_QUBITS,
        }
    }

    /// Structure name, e.g. `Line4AndPair`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Structure2(s) => s.name(),
            Self::Structure3(s) => s.name(),
            Self::Structure4(s) => s.name(),
            Self::Structure5(s) => s.name(),
            Self::Structure6(s) => s.name(),
        }
    }

    /// The partition shape numbering the vertex roles.
    pub fn partition(self) -> Partition {
        match self {
            Self::Structure2(s) => s.partition(),
            Self::Structure3(s) => s.partition(),
            Self::Structure4(s) => s.partition(),
            Self::Structure5(s) => s.partition(),
            Self::Structure6(s) => s.partition(),
        }
    }

    /// Number of classes with this structure.
    pub fn class_count(self) -> usize {
        self.partition().count()
    }

    /// First class id of this structure.
    pub fn first_id(self) -> usize {
        Self::all(self.num_qubits())
            .unwrap_or_default()
            .into_iter()
            .take_while(|&s| s != self)
            .map(Self::class_count)
            .sum()
    }
}

impl fmt::Display for EntanglementStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// LcClass
// =============================================================================

/// A local-Clifford equivalence class: a structure plus the vertex roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LcClass {
    structure: EntanglementStructure,
    repr: Repr,
    id: usize,
}

impl LcClass {
    /// Create a class, checking that `repr` fits the structure.
    pub fn new(structure: impl Into<EntanglementStructure>, repr: Repr) -> SynthResult<Self> {
        let structure = structure.into();
        let local = structure
            .partition()
            .from_repr(&repr)
            .ok_or_else(|| SynthError::InvalidRepr {
                structure: structure.name().to_string(),
                repr: repr.to_string(),
            })?;
        Ok(Self {
            structure,
            repr,
            id: structure.first_id() + local,
        })
    }

    /// Number of classes on `n` qubits.
    pub fn count(n: usize) -> SynthResult<usize> {
        Ok(EntanglementStructure::all(n)?
            .into_iter()
            .map(EntanglementStructure::class_count)
            .sum())
    }

    /// The class with the given id.
    pub fn from_id(n: usize, id: usize) -> SynthResult<Self> {
        let invalid = |count| SynthError::InvalidClassId {
            num_qubits: n,
            id,
            count,
        };
        let mut offset = 0;
        for structure in EntanglementStructure::all(n)? {
            let width = structure.class_count();
            if id < offset + width {
                let repr = structure
                    .partition()
                    .to_repr(id - offset)
                    .ok_or_else(|| invalid(Self::count(n).unwrap_or(0)))?;
                return Self::new(structure, repr);
            }
            offset += width;
        }
        Err(invalid(offset))
    }

    /// Classify a stabilizer state.
    pub fn classify(stabilizer: &Stabilizer) -> SynthResult<Self> {
        classify(stabilizer)
    }

    /// The class id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.structure.num_qubits()
    }

    /// The entanglement structure.
    pub fn structure(&self) -> EntanglementStructure {
        self.structure
    }

    /// The vertex roles.
    pub fn repr(&self) -> &Repr {
        &self.repr
    }

    /// The canonical graph of this class.
    pub fn representative_graph(&self) -> Graph {
        let n = self.num_qubits();
        let d = |size, ordinal| self.repr.group(size, ordinal);
        let mut g = Graph::new(n);
        let edge = |g: &mut Graph, p: Group| {
            g.add_edge(p[0], p[1]);
        };

        match self.structure {
            EntanglementStructure::Structure2(s) => match s {
                Structure2::Separable => {}
                Structure2::Entangled => {
                    g.add_edge(0, 1);
                }
            },
            EntanglementStructure::Structure3(s) => match s {
                Structure3::Separable => {}
                Structure3::Pair => edge(&mut g, d(2, 0)),
                Structure3::Triple => {
                    g.add_path(&[0, 1, 2]);
                }
            },
            EntanglementStructure::Structure4(s) => match s {
                Structure4::Separable => {}
                Structure4::Pair => edge(&mut g, d(2, 0)),
                Structure4::Triple => {
                    g.add_path(d(3, 0).as_slice());
                }
                Structure4::TwoPairs => {
                    edge(&mut g, d(2, 0));
                    edge(&mut g, d(2, 1));
                }
                Structure4::Star => g = Graph::star(4, 0),
                Structure4::Line => {
                    edge(&mut g, d(2, 0));
                    edge(&mut g, d(2, 1));
                    g.add_edge(d(2, 0)[0], d(2, 1)[1]);
                }
            },
            EntanglementStructure::Structure5(s) => match s {
                Structure5::Separable => {}
                Structure5::Pair => edge(&mut g, d(2, 0)),
                Structure5::Triple => {
                    g.add_path(d(3, 0).as_slice());
                }
                Structure5::TwoPairs => {
                    edge(&mut g, d(2, 0));
                    edge(&mut g, d(2, 1));
                }
                Structure5::Star4 => {
                    g = Graph::star(5, d(4, 0)[0]);
                    g.remove_all_edges_to(d(1, 0)[0]);
                }
                Structure5::Line4 => {
                    edge(&mut g, d(2, 0));
                    edge(&mut g, d(2, 1));
                    g.add_edge(d(2, 0)[0], d(2, 1)[0]);
                }
                Structure5::Star => g = Graph::star(5, 0),
                Structure5::PairAndTriple => {
                    g.add_path(d(2, 0).as_slice());
                    g.add_path(d(3, 0).as_slice());
                }
                Structure5::T => {
                    let center = d(3, 0)[0];
                    let stem = d(2, 0);
                    g = Graph::star(5, center);
                    g.remove_edge(stem[0], center);
                    edge(&mut g, stem);
                }
                Structure5::Line => {
                    let (p, q) = (d(2, 0), d(2, 1));
                    g.add_path(&[p[0], p[1], d(1, 0)[0], q[0], q[1]]);
                }
                Structure5::Cycle => {
                    g = Graph::cycle(5);
                }
            },
            EntanglementStructure::Structure6(s) => {
                representative_graph6(&mut g, s, &self.repr);
            }
        }
        g
    }
}

fn representative_graph6(g: &mut Graph, s: Structure6, repr: &Repr) {
    let d = |size, ordinal| repr.group(size, ordinal);
    let edge = |g: &mut Graph, p: Group| {
        g.add_edge(p[0], p[1]);
    };
    // the path of four through two pairs joined at their first vertices
    let line4 = |g: &mut Graph| {
        edge(g, d(2, 0));
        edge(g, d(2, 1));
        g.add_edge(d(2, 0)[0], d(2, 1)[0]);
    };

    match s {
        Structure6::Separable => {}
        Structure6::Pair => edge(g, d(2, 0)),
        Structure6::Triple => {
            g.add_path(d(3, 0).as_slice());
        }
        Structure6::TwoTriples => {
            g.add_path(d(3, 0).as_slice());
            g.add_path(d(3, 1).as_slice());
        }
        Structure6::TwoPairs => {
            edge(g, d(2, 0));
            edge(g, d(2, 1));
        }
        Structure6::ThreePairs => {
            edge(g, d(2, 0));
            edge(g, d(2, 1));
            edge(g, d(2, 2));
        }
        Structure6::Star4 => {
            g.add_star(d(4, 0).as_slice());
        }
        Structure6::Star4AndPair => {
            g.add_star(d(4, 0).as_slice());
            edge(g, d(2, 0));
        }
        Structure6::Line4 => line4(g),
        Structure6::Line4AndPair => {
            line4(g);
            g.add_edge(d(1, 0)[0], d(1, 1)[0]);
        }
        Structure6::Star5 => {
            g.add_star(d(5, 0).as_slice());
        }
        Structure6::PairAndTriple => {
            g.add_path(d(2, 0).as_slice());
            g.add_path(d(3, 0).as_slice());
        }
        Structure6::T => {
            g.add_path(d(2, 0).as_slice());
            g.add_star(d(3, 0).as_slice());
            g.add_edge(d(3, 0)[0], d(2, 0)[1]);
        }
        Structure6::Line5 => {
            edge(g, d(2, 0));
            edge(g, d(2, 1));
            g.add_path(&[d(2, 0)[1], d(1, 1)[0], d(2, 1)[0]]);
        }
        Structure6::Cycle5 => {
            let c = d(5, 0);
            g.add_path(c.as_slice());
            g.add_edge(c[0], c[4]);
        }
        Structure6::Cycle6 => {
            let (a, b, c) = (d(2, 0), d(2, 1), d(2, 2));
            g.add_path(&[a[0], b[0], c[0], a[1], b[1], c[1], a[0]]);
        }
        Structure6::Line6 => {
            edge(g, d(2, 0));
            edge(g, d(2, 1));
            g.add_path(&[d(2, 0)[0], d(1, 0)[0], d(1, 1)[0], d(2, 1)[1]]);
        }
        Structure6::T6 => {
            g.add_path(d(2, 0).as_slice());
            g.add_star(d(3, 0).as_slice());
            g.add_path(&[d(3, 0)[0], d(1, 0)[0], d(2, 0)[1]]);
        }
        Structure6::Cross => {
            g.add_star(d(4, 0).as_slice());
            g.add_path(&[d(2, 0)[0], d(2, 0)[1], d(4, 0)[0]]);
        }
        Structure6::Star6 => *g = Graph::star(6, 0),
        Structure6::H => {
            g.add_path(d(3, 0).as_slice());
            g.add_path(d(3, 1).as_slice());
            g.add_edge(d(3, 0)[1], d(3, 1)[1]);
        }
        Structure6::E => {
            g.add_path(d(2, 0).as_slice());
            g.add_path(d(2, 1).as_slice());
            g.add_star(&[d(1, 0)[0], d(1, 1)[0], d(2, 0)[0], d(2, 1)[0]]);
        }
        Structure6::EBar => {
            let (a, b, c) = (d(2, 0), d(2, 1), d(2, 2));
            edge(g, a);
            edge(g, b);
            edge(g, c);
            g.add_path(&[a[0], b[0], c[0], a[0]]);
        }
        Structure6::Box5 => {
            g.add_path(d(2, 0).as_slice());
            g.add_path(d(2, 1).as_slice());
            g.add_star(&[d(1, 0)[0], d(1, 1)[0], d(2, 0)[0], d(2, 1)[0]]);
            g.add_edge(d(2, 0)[1], d(2, 1)[1]);
        }
        Structure6::Box4 => {
            let (a, b, c) = (d(2, 0), d(2, 1), d(2, 2));
            edge(g, a);
            edge(g, b);
            g.add_path(&[a[0], c[0], b[0], c[1], a[0]]);
        }
        Structure6::AME => {
            g.add_path(&[0, 1, 2, 3, 4, 5, 0, 4, 5, 2, 1, 3]);
        }
    }
}

impl fmt::Display for LcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (id {})", self.structure, self.repr, self.id)
    }
}

// =============================================================================
// Classification
// =============================================================================

/// For every set of qubits (as a mask), how many group elements act as the
/// identity on exactly that set.
struct IdentityDistribution {
    counts: [u32; 64],
    num_qubits: usize,
}

impl IdentityDistribution {
    fn of(stabilizer: &Stabilizer) -> Self {
        let mut counts = [0; 64];
        for element in stabilizer.expand() {
            counts[element.identity_mask() as usize] += 1;
        }
        Self {
            counts,
            num_qubits: stabilizer.num_qubits(),
        }
    }

    fn count(&self, mask: u32) -> u32 {
        self.counts[mask as usize]
    }

    /// Non-zero entries `(mask, count)` by ascending mask.
    fn entries(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..1u32 << self.num_qubits)
            .map(|mask| (mask, self.counts[mask as usize]))
            .filter(|&(_, count)| count > 0)
    }

    /// The first `max` masks of non-zero entries matching `pred`.
    fn select(&self, max: usize, pred: impl Fn(u32, u32) -> bool) -> Vec<u32> {
        self.entries()
            .filter(|&(mask, count)| pred(mask, count))
            .map(|(mask, _)| mask)
            .take(max)
            .collect()
    }

    fn with_weight(&self, weight: u32, max: usize) -> Vec<u32> {
        self.select(max, |mask, _| mask.count_ones() == weight)
    }

    fn with_count(&self, count: u32, max: usize) -> Vec<u32> {
        self.select(max, |_, c| c == count)
    }

    fn with_weight_and_count(&self, weight: u32, count: u32, max: usize) -> Vec<u32> {
        self.select(max, |mask, c| mask.count_ones() == weight && c == count)
    }
}

fn single(v: usize) -> Group {
    Group::from_slice(&[v])
}

fn repr(groups: &[Group]) -> Repr {
    let mut repr = Repr::new();
    for &g in groups {
        repr.push(g);
    }
    repr
}

/// Classification inputs shared by the per-size procedures.
struct Invariants {
    n: usize,
    entangled: Group,
    free: Group,
}

impl Invariants {
    fn full(&self) -> u32 {
        (1 << self.n) - 1
    }

    fn rest(&self, used: u32) -> Group {
        Group::from_mask(self.full() & !used)
    }

    fn whole(&self) -> Group {
        Group::from_mask(self.full())
    }

    /// Lowest vertex of a non-empty mask.
    fn first_bit(&self, mask: u32) -> SynthResult<usize> {
        if mask == 0 {
            return Err(self.unrecognized("empty identity set"));
        }
        Ok(mask.trailing_zeros() as usize)
    }

    fn unrecognized(&self, detail: impl fmt::Display) -> SynthError {
        SynthError::InvalidStabilizer(format!(
            "unrecognized {}-qubit entanglement structure ({detail})",
            self.n
        ))
    }

    fn build(&self, structure: impl Into<EntanglementStructure>, groups: &[Group]) -> SynthResult<LcClass> {
        let structure = structure.into();
        LcClass::new(structure, repr(groups))
            .map_err(|_| self.unrecognized(format_args!("roles do not fit {structure}")))
    }

    fn require(&self, masks: &[u32], len: usize, what: &str) -> SynthResult<()> {
        if masks.len() == len {
            Ok(())
        } else {
            Err(self.unrecognized(format_args!("expected {len} {what}, found {}", masks.len())))
        }
    }
}

/// Classify a stabilizer state on 2 to 6 qubits.
pub fn classify(stabilizer: &Stabilizer) -> SynthResult<LcClass> {
    let n = stabilizer.num_qubits();
    if !(MIN_QUBITS..=MAX_QUBITS).contains(&n) {
        return Err(SynthError::UnsupportedQubitCount(n));
    }
    stabilizer.validate()?;

    // n <= 6 here, so the mask fits in 32 bits.
    let entangled = stabilizer.entangled_mask() as u32;
    let inv = Invariants {
        n,
        entangled: Group::from_mask(entangled),
        free: Group::from_mask(((1 << n) - 1) & !entangled),
    };
    trace!(entangled = %inv.entangled, "classifying {n}-qubit stabilizer");

    match n {
        2 => classify2(&inv),
        3 => classify3(&inv),
        4 => classify4(&inv, &IdentityDistribution::of(stabilizer)),
        5 => classify5(&inv, &IdentityDistribution::of(stabilizer)),
        _ => classify6(&inv, &IdentityDistribution::of(stabilizer)),
    }
}

fn classify2(inv: &Invariants) -> SynthResult<LcClass> {
    match inv.entangled.len() {
        0 => inv.build(Structure2::Separable, &[inv.whole()]),
        2 => inv.build(Structure2::Entangled, &[inv.whole()]),
        ne => Err(inv.unrecognized(format_args!("{ne} entangled qubits"))),
    }
}

fn classify3(inv: &Invariants) -> SynthResult<LcClass> {
    match inv.entangled.len() {
        0 => inv.build(Structure3::Separable, &[inv.whole()]),
        2 => inv.build(Structure3::Pair, &[inv.free, inv.entangled]),
        3 => inv.build(Structure3::Triple, &[inv.whole()]),
        ne => Err(inv.unrecognized(format_args!("{ne} entangled qubits"))),
    }
}

fn classify4(inv: &Invariants, dist: &IdentityDistribution) -> SynthResult<LcClass> {
    let free = inv.free.as_slice();
    match inv.entangled.len() {
        0 => return inv.build(Structure4::Separable, &[inv.whole()]),
        2 => {
            return inv.build(
                Structure4::Pair,
                &[inv.entangled, single(free[0]), single(free[1])],
            );
        }
        3 => return inv.build(Structure4::Triple, &[inv.free, inv.entangled]),
        4 => {}
        ne => return Err(inv.unrecognized(format_args!("{ne} entangled qubits"))),
    }

    // an element acting only on {2,3}, {1,3} or {1,2}
    let pair_23 = dist.count(0b0011) != 0;
    let pair_13 = dist.count(0b0101) != 0;
    let pair_12 = dist.count(0b0110) != 0;
    if pair_23 && pair_12 {
        return inv.build(Structure4::Star, &[inv.whole()]);
    }

    let partner_of_0 = if pair_23 {
        1
    } else if pair_13 {
        2
    } else if pair_12 {
        3
    } else {
        return Err(inv.unrecognized("no weight-two element"));
    };
    let pairs = [
        Group::from_slice(&[0, partner_of_0]),
        inv.rest((1 << partner_of_0) | 1),
    ];
    match dist.count(0) {
        9 => inv.build(Structure4::TwoPairs, &pairs),
        5 => inv.build(Structure4::Line, &pairs),
        full => Err(inv.unrecognized(format_args!("{full} full-weight elements"))),
    }
}

fn classify5(inv: &Invariants, dist: &IdentityDistribution) -> SynthResult<LcClass> {
    match inv.entangled.len() {
        0 => return inv.build(Structure5::Separable, &[inv.whole()]),
        2 => return inv.build(Structure5::Pair, &[inv.entangled, inv.free]),
        3 => return inv.build(Structure5::Triple, &[inv.entangled, inv.free]),
        _ => {}
    }

    // pairs {i, j} such that `want` elements act as identity exactly there
    let pairs_with = |want: u32| -> Vec<u32> {
        (0..5)
            .flat_map(|i| (i + 1..5).map(move |j| (1u32 << i) | (1u32 << j)))
            .filter(|&mask| dist.count(mask) == want)
            .collect()
    };
    // the two identity pairs with `want` elements, plus the remaining vertex
    let two_pairs = |want: u32| -> SynthResult<[Group; 3]> {
        let pairs = pairs_with(want);
        inv.require(&pairs, 2, "identity pairs")?;
        Ok([
            inv.rest(pairs[0] | pairs[1]),
            Group::from_mask(pairs[0]),
            Group::from_mask(pairs[1]),
        ])
    };

    let ne = inv.entangled.len();
    match (dist.count(0), ne) {
        (9, 4) => {
            let u = inv.free[0];
            let trial = (1 << u) | (1 << ((u + 1) % 5)) | (1 << ((u + 2) % 5));
            match dist.count(trial) {
                1 => inv.build(Structure5::Star4, &[inv.free, inv.entangled]),
                0 | 3 => inv.build(Structure5::TwoPairs, &two_pairs(3)?),
                c => Err(inv.unrecognized(format_args!("{c} elements on trial set"))),
            }
        }
        (5, 4) => inv.build(Structure5::Line4, &two_pairs(1)?),
        (16, 5) => inv.build(Structure5::Star, &[inv.whole()]),
        (12, 5) => {
            let pair = pairs_with(4);
            inv.require(&pair, 1, "identity pairs")?;
            inv.build(
                Structure5::PairAndTriple,
                &[Group::from_mask(pair[0]), inv.rest(pair[0])],
            )
        }
        (10, 5) => {
            let stem = (0..5)
                .filter(|&i| dist.count(1 << i) == 4)
                .fold(0u32, |m, i| m | (1 << i));
            inv.build(Structure5::T, &[Group::from_mask(stem), inv.rest(stem)])
        }
        (8, 5) => inv.build(Structure5::Line, &two_pairs(2)?),
        (6, 5) => inv.build(Structure5::Cycle, &[inv.whole()]),
        (full, ne) => Err(inv.unrecognized(format_args!(
            "{full} full-weight elements with {ne} entangled qubits"
        ))),
    }
}

fn classify6(inv: &Invariants, dist: &IdentityDistribution) -> SynthResult<LcClass> {
    let free = inv.free.as_slice();
    let ne = inv.entangled.len();
    match ne {
        0 => return inv.build(Structure6::Separable, &[inv.whole()]),
        2 => return inv.build(Structure6::Pair, &[inv.entangled, inv.free]),
        3 => {
            return inv.build(
                Structure6::Triple,
                &[inv.entangled, single(free[0]), single(free[1]), single(free[2])],
            );
        }
        _ => {}
    }

    let all = usize::MAX;
    let g = Group::from_mask;

    match (dist.count(0), ne) {
        (5, 4) => {
            let x = dist.with_weight_and_count(2, 1, all);
            inv.require(&x, 2, "weight-two singletons")?;
            inv.build(
                Structure6::Line4,
                &[single(free[0]), single(free[1]), g(x[0]), g(x[1])],
            )
        }
        (6, 5) => inv.build(Structure6::Cycle5, &[inv.free, inv.entangled]),
        (8, 5) => {
            let mut pairs = Vec::new();
            let mut middle = 0;
            for (mask, count) in dist.entries() {
                if mask & inv.free.mask() != 0 {
                    continue;
                }
                if count == 2 && mask.count_ones() == 2 {
                    pairs.push(mask);
                }
                if count == 5 {
                    middle = mask;
                }
            }
            inv.require(&pairs, 2, "end pairs")?;
            inv.build(
                Structure6::Line5,
                &[inv.free, single(inv.first_bit(middle)?), g(pairs[0]), g(pairs[1])],
            )
        }
        (9, 4) => {
            let x = dist.with_weight_and_count(2, 3, all);
            match x.len() {
                0 => inv.build(Structure6::Star4, &[inv.entangled, inv.free]),
                2 => inv.build(
                    Structure6::TwoPairs,
                    &[single(free[0]), single(free[1]), g(x[0]), g(x[1])],
                ),
                k => Err(inv.unrecognized(format_args!("{k} weight-two triples"))),
            }
        }
        (27, 6) => {
            let x = dist.with_count(9, all);
            match x.len() {
                3 => inv.build(Structure6::ThreePairs, &[g(x[0]), g(x[1]), g(x[2])]),
                1 => inv.build(Structure6::Star4AndPair, &[g(x[0]), inv.rest(x[0])]),
                k => Err(inv.unrecognized(format_args!("{k} nine-element sets"))),
            }
        }
        (16, 6) => {
            let t = dist.with_weight_and_count(3, 4, 2);
            inv.require(&t, 2, "triples")?;
            inv.build(Structure6::TwoTriples, &[g(t[0]), g(t[1])])
        }
        (16, 5) => inv.build(Structure6::Star5, &[inv.free, inv.entangled]),
        (15, 6) => {
            let mut single_pair = 0;
            let mut arms = Vec::new();
            for (mask, count) in dist.entries() {
                if count == 5 {
                    single_pair = mask;
                }
                if count == 3 && mask.count_ones() == 2 {
                    arms.push(mask);
                }
            }
            inv.require(&arms, 2, "arms")?;
            let pair = g(single_pair);
            if pair.len() != 2 {
                return Err(inv.unrecognized("isolated pair not found"));
            }
            inv.build(
                Structure6::Line4AndPair,
                &[single(pair[0]), single(pair[1]), g(arms[0]), g(arms[1])],
            )
        }
        (10, 6) => {
            let x = dist.with_count(3, all);
            inv.require(&x, 3, "three-element sets")?;
            inv.build(Structure6::Cycle6, &[g(x[0]), g(x[1]), g(x[2])])
        }
        (10, 5) => {
            let x = dist.with_weight_and_count(1, 4, all);
            inv.require(&x, 2, "arm vertices")?;
            let arm = x[0] | x[1];
            inv.build(
                Structure6::T,
                &[inv.free, g(arm), inv.rest(arm | inv.free.mask())],
            )
        }
        (12, 6) => classify_line6(inv, dist),
        (12, 5) => {
            let pair = dist
                .entries()
                .find(|&(mask, count)| count == 4 && mask.count_ones() == 2)
                .map(|(mask, _)| mask)
                .ok_or_else(|| inv.unrecognized("pair not found"))?;
            inv.build(
                Structure6::PairAndTriple,
                &[inv.free, g(pair), inv.rest(pair | inv.free.mask())],
            )
        }
        (14, 6) => {
            let mut arm = 0;
            let mut joint = 0;
            for (mask, count) in dist.entries() {
                if count == 4 {
                    arm = mask;
                }
                if count == 8 {
                    joint = mask;
                }
            }
            let joint = 1 << inv.first_bit(joint)?;
            inv.build(
                Structure6::T6,
                &[g(arm), g(joint), inv.rest(arm | joint)],
            )
        }
        (17, 6) => {
            let x = dist.with_count(8, 2);
            inv.require(&x, 2, "eight-element sets")?;
            let star = x[0] | x[1];
            inv.build(Structure6::Cross, &[g(star), inv.rest(star)])
        }
        (33, 6) => inv.build(Structure6::Star6, &[inv.whole()]),
        (24, 6) => {
            let x = dist.with_count(4, 6);
            inv.require(&x, 6, "four-element sets")?;
            let mut first = x[0];
            let mut second = 0;
            for &mask in &x {
                if mask & first != 0 {
                    first |= mask;
                } else {
                    second |= mask;
                }
            }
            inv.build(Structure6::H, &[g(first), g(second)])
        }
        (13, 6) => {
            let x = dist.with_count(5, all);
            match x.len() {
                1 => {
                    let hub = inv.first_bit(x[0])?;
                    let hub_bit = 1 << hub;
                    let w3 = dist.with_weight(3, 4);
                    inv.require(&w3, 4, "weight-three sets")?;
                    let wings: Vec<u32> = w3
                        .iter()
                        .filter(|&&mask| mask & hub_bit != 0)
                        .map(|&mask| mask ^ hub_bit)
                        .collect();
                    inv.require(&wings, 2, "wings")?;
                    inv.build(
                        Structure6::E,
                        &[
                            single(hub),
                            single(inv.first_bit(x[0] ^ hub_bit)?),
                            g(wings[0]),
                            g(wings[1]),
                        ],
                    )
                }
                3 => inv.build(Structure6::Box4, &[g(x[0]), g(x[1]), g(x[2])]),
                k => Err(inv.unrecognized(format_args!("{k} five-element sets"))),
            }
        }
        (21, 6) => {
            let x = dist.with_count(5, 3);
            inv.require(&x, 3, "five-element sets")?;
            inv.build(Structure6::EBar, &[g(x[0]), g(x[1]), g(x[2])])
        }
        (11, 6) => {
            let x = dist.with_weight_and_count(1, 2, 2);
            inv.require(&x, 2, "pendant vertices")?;
            let pendant: Vec<u32> = dist
                .entries()
                .filter(|&(mask, _)| {
                    mask.count_ones() == 3 && mask & x[0] != 0 && mask & x[1] == 0
                })
                .map(|(mask, _)| mask ^ x[0])
                .take(2)
                .collect();
            inv.require(&pendant, 2, "pendant pairs")?;
            inv.build(
                Structure6::Box5,
                &[
                    g(pendant[0]),
                    g(pendant[1]),
                    single(inv.first_bit(x[0])?),
                    single(inv.first_bit(x[1])?),
                ],
            )
        }
        (18, 6) => inv.build(Structure6::AME, &[inv.whole()]),
        (full, ne) => Err(inv.unrecognized(format_args!(
            "{full} full-weight elements with {ne} entangled qubits"
        ))),
    }
}

/// The six-qubit path: its two middle vertices are the only weight-one
/// identity sets with six elements.
fn classify_line6(inv: &Invariants, dist: &IdentityDistribution) -> SynthResult<LcClass> {
    let mut middles = Vec::new();
    let mut halves = Vec::new();
    for (mask, count) in dist.entries() {
        if mask.count_ones() == 4 {
            halves.push(mask);
        }
        if count == 6 && mask.count_ones() == 1 {
            middles.push(inv.first_bit(mask)?);
        }
    }
    if middles.len() != 2 || halves.len() != 2 {
        return Err(inv.unrecognized("path middle not found"));
    }

    let middle_mask = (1 << middles[0]) | (1 << middles[1]);
    halves[0] ^= middle_mask;
    halves[1] ^= middle_mask;
    for (mask, count) in dist.entries() {
        if count == 2
            && mask.count_ones() == 3
            && mask & halves[0] == halves[0]
            && mask & (1 << middles[1]) != 0
        {
            middles.reverse();
        }
    }

    let (mut p, mut q) = (Group::from_mask(halves[0]), Group::from_mask(halves[1]));
    if p.is_empty() || q.is_empty() {
        return Err(inv.unrecognized("path ends not found"));
    }
    if p[0] > q[0] {
        std::mem::swap(&mut p, &mut q);
        middles.reverse();
    }
    inv.build(
        Structure6::Line6,
        &[single(middles[0]), single(middles[1]), p, q],
    )
}
