//! Numbering of vertex partitions.
//!
//! Each [`Partition`] shape describes how `{0, ..., n-1}` splits into
//! labelled groups of fixed sizes, for example "one vertex, an unordered
//! pair, and the remaining triple". `to_repr` and `from_repr` are mutually
//! inverse bijections between `[0, count)` and the partitions of that shape.
//!
//! A [`Repr`] stores its groups in insertion order, each group sorted
//! ascending, in fixed-capacity arrays. Groups are addressed by
//! `(size, ordinal)`: the `ordinal`-th inserted group of that size.

use std::fmt;

/// Largest supported vertex count.
pub const MAX_VERTICES: usize = 6;

// =============================================================================
// Group
// =============================================================================

/// A sorted set of at most [`MAX_VERTICES`] vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Group {
    vertices: [usize; MAX_VERTICES],
    len: u8,
}

impl Group {
    /// The empty group.
    pub const EMPTY: Group = Group {
        vertices: [0; MAX_VERTICES],
        len: 0,
    };

    /// Build a group from vertices in any order.
    pub fn from_slice(vertices: &[usize]) -> Self {
        debug_assert!(vertices.len() <= MAX_VERTICES);
        let mut group = Self::EMPTY;
        group.vertices[..vertices.len()].copy_from_slice(vertices);
        group.len = vertices.len() as u8;
        group.vertices[..vertices.len()].sort_unstable();
        group
    }

    /// Build a group from the set bits of `mask`.
    pub fn from_mask(mask: u32) -> Self {
        let mut group = Self::EMPTY;
        for v in 0..MAX_VERTICES {
            if (mask >> v) & 1 == 1 {
                group.vertices[group.len as usize] = v;
                group.len += 1;
            }
        }
        group
    }

    /// The vertices, ascending.
    pub fn as_slice(&self) -> &[usize] {
        &self.vertices[..self.len as usize]
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether `v` is in the group.
    pub fn contains(&self, v: usize) -> bool {
        self.as_slice().contains(&v)
    }

    /// Bit mask of the vertices.
    pub fn mask(&self) -> u32 {
        self.as_slice().iter().fold(0, |m, &v| m | (1 << v))
    }
}

impl std::ops::Index<usize> for Group {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.as_slice()[k]
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, v) in self.as_slice().iter().enumerate() {
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// Repr
// =============================================================================

/// Disjoint vertex groups that pin down the role of every vertex in an
/// entanglement structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Repr {
    groups: [Group; MAX_VERTICES],
    len: u8,
}

impl Repr {
    /// An empty representation.
    pub const fn new() -> Self {
        Self {
            groups: [Group::EMPTY; MAX_VERTICES],
            len: 0,
        }
    }

    /// Build from groups given as vertex slices.
    pub fn from_groups(groups: &[&[usize]]) -> Self {
        let mut repr = Self::new();
        for g in groups {
            repr.push(Group::from_slice(g));
        }
        repr
    }

    /// Append a group.
    pub fn push(&mut self, group: Group) -> &mut Self {
        debug_assert!((self.len as usize) < MAX_VERTICES);
        self.groups[self.len as usize] = group;
        self.len += 1;
        self
    }

    /// All groups in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups[..self.len as usize]
    }

    /// The `ordinal`-th group of `size` vertices, or the empty group.
    pub fn group(&self, size: usize, ordinal: usize) -> Group {
        self.groups()
            .iter()
            .filter(|g| g.len() == size)
            .nth(ordinal)
            .copied()
            .unwrap_or(Group::EMPTY)
    }

    /// Check whether the groups partition `{0, ..., n-1}` exactly.
    pub fn is_partition_of(&self, n: usize) -> bool {
        let mut seen = 0u32;
        for g in self.groups() {
            let m = g.mask();
            if seen & m != 0 {
                return false;
            }
            seen |= m;
        }
        seen == (1u32 << n) - 1 && self.groups().iter().map(Group::len).sum::<usize>() == n
    }

    /// Group sizes, ascending.
    fn sorted_sizes(&self) -> ([usize; MAX_VERTICES], usize) {
        let mut sizes = [0; MAX_VERTICES];
        for (k, g) in self.groups().iter().enumerate() {
            sizes[k] = g.len();
        }
        let len = self.len as usize;
        sizes[..len].sort_unstable();
        (sizes, len)
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, g) in self.groups().iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Combinatorial helpers
// =============================================================================

/// Lexicographic rank of the pair `i < j` among pairs of `{0, ..., n-1}`.
pub fn pair_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    n * (n - 1) / 2 - (n - i) * (n - i - 1) / 2 + j - i - 1
}

/// Inverse of [`pair_index`].
pub fn pair_from_index(n: usize, index: usize) -> Option<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .nth(index)
}

/// Lexicographic rank of the triple `i < j < k` among triples of `{0, ..., n-1}`.
fn triple_index(n: usize, t: &[usize]) -> Option<usize> {
    triples(n).position(|(i, j, k)| [i, j, k] == t[..3])
}

fn triples(n: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..n).flat_map(move |i| {
        (i + 1..n).flat_map(move |j| (j + 1..n).map(move |k| (i, j, k)))
    })
}

/// Vertices of `{0, ..., n-1}` not in `used`, ascending.
fn rest(n: usize, used: &[usize]) -> Group {
    let mut out = Group::EMPTY;
    for v in (0..n).filter(|v| !used.contains(v)) {
        out.vertices[out.len as usize] = v;
        out.len += 1;
    }
    out
}

/// Split four sorted vertices into two pairs; the first pair joins
/// `elems[0]` with `elems[1 + k]`.
fn split_pairs(elems: &Group, k: usize) -> (Group, Group) {
    let partner = elems[1 + k];
    let first = Group::from_slice(&[elems[0], partner]);
    let mut second = Group::EMPTY;
    for &v in elems.as_slice()[1..].iter().filter(|&&v| v != partner) {
        second.vertices[second.len as usize] = v;
        second.len += 1;
    }
    (first, second)
}

/// Inverse of [`split_pairs`]: the offset of `elems[0]`'s partner.
fn pairs_key(elems: &Group, a: &Group, b: &Group) -> Option<usize> {
    let pair = if a.contains(elems[0]) { a } else { b };
    let partner = if pair[0] == elems[0] { pair[1] } else { pair[0] };
    elems.as_slice()[1..].iter().position(|&v| v == partner)
}

// =============================================================================
// Partition shapes
// =============================================================================

/// A partition shape with a bijective numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// A single group holding all `n` vertices.
    Whole(usize),
    /// One distinguished vertex and the other `n - 1`.
    SingleRest(usize),
    /// One pair and the other `n - 2` vertices.
    PairRest(usize),
    /// One pair and two singletons, `n = 4`.
    PairSingles,
    /// Two pairs, `n = 4`.
    TwoPairs,
    /// One vertex and two pairs, `n = 5`. The pairs are oriented around the
    /// five-cycle starting at the vertex.
    SinglePairPair,
    /// One vertex, one pair, and a triple, `n = 6`.
    SinglePairTriple,
    /// Two triples, `n = 6`.
    TripleTriple,
    /// Three pairs, `n = 6`.
    ThreePairs,
    /// One triple and three singletons, `n = 6`.
    TripleSingles,
    /// Two interchangeable singletons and two pairs, `n = 6`.
    SinglesPairs,
    /// Two ordered singletons and two pairs, `n = 6`.
    OrderedSinglesPairs,
}

impl Partition {
    /// Number of vertices partitioned.
    pub fn num_vertices(&self) -> usize {
        match self {
            Partition::Whole(n) | Partition::SingleRest(n) | Partition::PairRest(n) => *n,
            Partition::PairSingles | Partition::TwoPairs => 4,
            Partition::SinglePairPair => 5,
            Partition::SinglePairTriple
            | Partition::TripleTriple
            | Partition::ThreePairs
            | Partition::TripleSingles
            | Partition::SinglesPairs
            | Partition::OrderedSinglesPairs => 6,
        }
    }

    /// Number of distinct partitions of this shape.
    pub fn count(&self) -> usize {
        match self {
            Partition::Whole(_) => 1,
            Partition::SingleRest(n) => *n,
            Partition::PairRest(n) => n * (n - 1) / 2,
            Partition::PairSingles => 6,
            Partition::TwoPairs => 3,
            Partition::SinglePairPair => 15,
            Partition::SinglePairTriple => 60,
            Partition::TripleTriple => 10,
            Partition::ThreePairs => 15,
            Partition::TripleSingles => 20,
            Partition::SinglesPairs => 45,
            Partition::OrderedSinglesPairs => 90,
        }
    }

    /// Group sizes, ascending.
    fn sizes(&self) -> ([usize; MAX_VERTICES], usize) {
        let (raw, len): ([usize; 4], usize) = match *self {
            Partition::Whole(n) => ([n, 0, 0, 0], 1),
            Partition::SingleRest(n) => ([1, n.saturating_sub(1), 0, 0], 2),
            Partition::PairRest(n) => ([2, n.saturating_sub(2), 0, 0], 2),
            Partition::PairSingles => ([1, 1, 2, 0], 3),
            Partition::TwoPairs => ([2, 2, 0, 0], 2),
            Partition::SinglePairPair => ([1, 2, 2, 0], 3),
            Partition::SinglePairTriple => ([1, 2, 3, 0], 3),
            Partition::TripleTriple => ([3, 3, 0, 0], 2),
            Partition::ThreePairs => ([2, 2, 2, 0], 3),
            Partition::TripleSingles => ([1, 1, 1, 3], 4),
            Partition::SinglesPairs | Partition::OrderedSinglesPairs => ([1, 1, 2, 2], 4),
        };
        let mut sizes = [0; MAX_VERTICES];
        sizes[..len].copy_from_slice(&raw[..len]);
        sizes[..len].sort_unstable();
        (sizes, len)
    }

    /// Check whether `repr` is a partition of this shape.
    pub fn accepts(&self, repr: &Repr) -> bool {
        repr.sorted_sizes() == self.sizes() && repr.is_partition_of(self.num_vertices())
    }

    /// The partition numbered `index`, or `None` if out of range.
    pub fn to_repr(&self, index: usize) -> Option<Repr> {
        if index >= self.count() {
            return None;
        }
        let mut repr = Repr::new();
        match *self {
            Partition::Whole(n) => {
                repr.push(rest(n, &[]));
            }
            Partition::SingleRest(n) => {
                repr.push(Group::from_slice(&[index]));
                repr.push(rest(n, &[index]));
            }
            Partition::PairRest(n) => {
                let (a, b) = pair_from_index(n, index)?;
                repr.push(Group::from_slice(&[a, b]));
                repr.push(rest(n, &[a, b]));
            }
            Partition::PairSingles => {
                let (a, b) = pair_from_index(4, index)?;
                let singles = rest(4, &[a, b]);
                repr.push(Group::from_slice(&[a, b]));
                repr.push(Group::from_slice(&[singles[0]]));
                repr.push(Group::from_slice(&[singles[1]]));
            }
            Partition::TwoPairs => {
                repr.push(Group::from_slice(&[0, index + 1]));
                repr.push(rest(4, &[0, index + 1]));
            }
            Partition::SinglePairPair => {
                let a = index / 3;
                let b = (a + 1) % 5;
                let c = (a + 2 + index % 3) % 5;
                repr.push(Group::from_slice(&[a]));
                repr.push(Group::from_slice(&[b, c]));
                repr.push(rest(5, &[a, b, c]));
            }
            Partition::SinglePairTriple => {
                let a = index / 10;
                let (b, c) = pair_from_index(5, index % 10)?;
                let (b, c) = ((b + a + 1) % 6, (c + a + 1) % 6);
                repr.push(Group::from_slice(&[a]));
                repr.push(Group::from_slice(&[b, c]));
                repr.push(rest(6, &[a, b, c]));
            }
            Partition::TripleTriple => {
                let (b, c) = pair_from_index(5, index)?;
                repr.push(Group::from_slice(&[0, b + 1, c + 1]));
                repr.push(rest(6, &[0, b + 1, c + 1]));
            }
            Partition::ThreePairs => {
                let partner = index / 3 + 1;
                let (p, q) = split_pairs(&rest(6, &[0, partner]), index % 3);
                repr.push(Group::from_slice(&[0, partner]));
                repr.push(p);
                repr.push(q);
            }
            Partition::TripleSingles => {
                let (i, j, k) = triples(6).nth(index)?;
                let singles = rest(6, &[i, j, k]);
                repr.push(Group::from_slice(&[i, j, k]));
                for &s in singles.as_slice() {
                    repr.push(Group::from_slice(&[s]));
                }
            }
            Partition::SinglesPairs => {
                let (s0, s1) = pair_from_index(6, index / 3)?;
                let (p, q) = split_pairs(&rest(6, &[s0, s1]), index % 3);
                repr.push(Group::from_slice(&[s0]));
                repr.push(Group::from_slice(&[s1]));
                repr.push(p);
                repr.push(q);
            }
            Partition::OrderedSinglesPairs => {
                let ordered = index / 3;
                let s0 = ordered / 5;
                let mut s1 = ordered % 5;
                if s1 >= s0 {
                    s1 += 1;
                }
                let (p, q) = split_pairs(&rest(6, &[s0, s1]), index % 3);
                repr.push(Group::from_slice(&[s0]));
                repr.push(Group::from_slice(&[s1]));
                repr.push(p);
                repr.push(q);
            }
        }
        Some(repr)
    }

    /// The number of `repr`, or `None` if it is not a partition of this shape.
    pub fn from_repr(&self, repr: &Repr) -> Option<usize> {
        if !self.accepts(repr) {
            return None;
        }
        let get = |size, ordinal| repr.group(size, ordinal);
        let index = match *self {
            Partition::Whole(_) => 0,
            Partition::SingleRest(_) => get(1, 0)[0],
            Partition::PairRest(n) => {
                let p = get(2, 0);
                pair_index(n, p[0], p[1])
            }
            Partition::PairSingles => {
                let p = get(2, 0);
                pair_index(4, p[0], p[1])
            }
            Partition::TwoPairs => {
                let (p1, p2) = (get(2, 0), get(2, 1));
                if p1[0] == 0 { p1[1] - 1 } else { p2[1] - 1 }
            }
            Partition::SinglePairPair => {
                let single = get(1, 0)[0];
                let next = (single + 1) % 5;
                let pair = [get(2, 0), get(2, 1)]
                    .into_iter()
                    .find(|p| p.contains(next))?;
                let far = if pair[0] == next { pair[1] } else { pair[0] };
                3 * single + (5 + far - next) % 5 - 1
            }
            Partition::SinglePairTriple => {
                let a = get(1, 0)[0];
                let p = get(2, 0);
                let b = (p[0] + 5 - a) % 6;
                let c = (p[1] + 5 - a) % 6;
                10 * a + pair_index(5, b.min(c), b.max(c))
            }
            Partition::TripleTriple => {
                let (t1, t2) = (get(3, 0), get(3, 1));
                let t = if t1.contains(0) { t1 } else { t2 };
                pair_index(5, t[1] - 1, t[2] - 1)
            }
            Partition::ThreePairs => {
                let mut pairs = [get(2, 0), get(2, 1), get(2, 2)];
                pairs.sort_unstable_by_key(|p| p[0]);
                let partner = pairs[0][1];
                let key = pairs_key(&rest(6, &[0, partner]), &pairs[1], &pairs[2])?;
                3 * (partner - 1) + key
            }
            Partition::TripleSingles => triple_index(6, get(3, 0).as_slice())?,
            Partition::SinglesPairs => {
                let (a, b) = (get(1, 0)[0], get(1, 1)[0]);
                let (s0, s1) = (a.min(b), a.max(b));
                let key = pairs_key(&rest(6, &[s0, s1]), &get(2, 0), &get(2, 1))?;
                3 * pair_index(6, s0, s1) + key
            }
            Partition::OrderedSinglesPairs => {
                let (s0, s1) = (get(1, 0)[0], get(1, 1)[0]);
                let ordered = 5 * s0 + if s1 < s0 { s1 } else { s1 - 1 };
                let key = pairs_key(&rest(6, &[s0, s1]), &get(2, 0), &get(2, 1))?;
                3 * ordered + key
            }
        };
        Some(index)
    }
}
