//! Undirected simple graphs and graph states.
//!
//! A [`Graph`] is a symmetric 0/1 adjacency matrix with zero diagonal. The
//! graph state it induces has the stabilizer `R = I`, `S = adjacency`. The
//! compressed form of a graph (its upper triangle packed into a `u64`) is
//! the graph id used as the key in the template tables.

use std::fmt;

use crate::error::{SynthError, SynthResult};
use crate::f2::{self, F2Matrix};

/// Maximum vertex count whose upper triangle fits in a `u64` graph id.
pub const MAX_COMPRESSED_VERTICES: usize = 11;

/// An undirected simple graph over a fixed number of vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Graph {
    adjacency: F2Matrix,
}

impl Graph {
    /// Create an edgeless graph.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adjacency: f2::zeros(num_vertices, num_vertices),
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.nrows()
    }

    /// The adjacency matrix.
    pub fn adjacency(&self) -> &F2Matrix {
        &self.adjacency
    }

    /// Add the edge `(i, j)`. Self-loops are ignored.
    pub fn add_edge(&mut self, i: usize, j: usize) -> &mut Self {
        if i != j {
            self.adjacency[[i, j]] = 1;
            self.adjacency[[j, i]] = 1;
        }
        self
    }

    /// Remove the edge `(i, j)` if present.
    pub fn remove_edge(&mut self, i: usize, j: usize) -> &mut Self {
        self.adjacency[[i, j]] = 0;
        self.adjacency[[j, i]] = 0;
        self
    }

    /// Remove every edge incident to `v`.
    pub fn remove_all_edges_to(&mut self, v: usize) -> &mut Self {
        for u in 0..self.num_vertices() {
            self.adjacency[[u, v]] = 0;
            self.adjacency[[v, u]] = 0;
        }
        self
    }

    /// Remove every edge.
    pub fn clear(&mut self) -> &mut Self {
        self.adjacency.fill(0);
        self
    }

    /// Connect consecutive vertices of `path`.
    pub fn add_path(&mut self, path: &[usize]) -> &mut Self {
        for pair in path.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
        self
    }

    /// Connect `vertices[0]` to every other vertex in `vertices`.
    pub fn add_star(&mut self, vertices: &[usize]) -> &mut Self {
        if let Some((&center, leaves)) = vertices.split_first() {
            for &leaf in leaves {
                self.add_edge(center, leaf);
            }
        }
        self
    }

    /// Check whether `(i, j)` is an edge.
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency[[i, j]] == 1
    }

    /// Neighbors of `v` in ascending order.
    pub fn neighbors(&self, v: usize) -> Vec<usize> {
        (0..self.num_vertices())
            .filter(|&u| self.has_edge(v, u))
            .collect()
    }

    /// Degree of `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency.row(v).iter().filter(|&&b| b == 1).count()
    }

    /// All edges `(i, j)` with `i < j`, in row-major order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.num_vertices();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.has_edge(i, j))
            .collect()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Toggle every edge between two distinct neighbors of `v`.
    pub fn local_complementation(&mut self, v: usize) -> &mut Self {
        let neighbors = self.neighbors(v);
        for (k, &a) in neighbors.iter().enumerate() {
            for &b in &neighbors[k + 1..] {
                self.adjacency[[a, b]] ^= 1;
                self.adjacency[[b, a]] ^= 1;
            }
        }
        self
    }

    /// A copy with local complementation applied at `v`.
    pub fn local_complemented(&self, v: usize) -> Self {
        let mut g = self.clone();
        g.local_complementation(v);
        g
    }

    /// Exchange the labels of vertices `a` and `b`.
    pub fn swap_vertices(&mut self, a: usize, b: usize) -> &mut Self {
        if a == b {
            return self;
        }
        let n = self.num_vertices();
        for c in 0..n {
            self.adjacency.swap((a, c), (b, c));
        }
        for r in 0..n {
            self.adjacency.swap((r, a), (r, b));
        }
        self
    }

    /// Pack the upper triangle into an integer.
    ///
    /// Bit `k` is the `k`-th pair `(i, j)`, `i < j`, in row-major order.
    /// Graphs with more than [`MAX_COMPRESSED_VERTICES`] vertices do not fit.
    pub fn compress(&self) -> SynthResult<u64> {
        let n = self.num_vertices();
        ensure_compressible(n)?;
        let mut id = 0u64;
        let mut bit = 0;
        for i in 0..n {
            for j in i + 1..n {
                if self.has_edge(i, j) {
                    id |= 1 << bit;
                }
                bit += 1;
            }
        }
        Ok(id)
    }

    /// Inverse of [`compress`](Self::compress). Bits beyond the upper
    /// triangle are ignored.
    pub fn decompress(num_vertices: usize, id: u64) -> SynthResult<Self> {
        ensure_compressible(num_vertices)?;
        let mut g = Self::new(num_vertices);
        let mut bit = 0;
        for i in 0..num_vertices {
            for j in i + 1..num_vertices {
                if (id >> bit) & 1 == 1 {
                    g.add_edge(i, j);
                }
                bit += 1;
            }
        }
        Ok(g)
    }

    // =========================================================================
    // Named families
    // =========================================================================

    /// The complete graph.
    pub fn fully_connected(n: usize) -> Self {
        let mut g = Self::new(n);
        for i in 0..n {
            for j in i + 1..n {
                g.add_edge(i, j);
            }
        }
        g
    }

    /// The path `0 - 1 - ... - (n-1)`.
    pub fn linear(n: usize) -> Self {
        let mut g = Self::new(n);
        g.add_path(&(0..n).collect::<Vec<_>>());
        g
    }

    /// The path closed into a cycle.
    pub fn cycle(n: usize) -> Self {
        let mut g = Self::linear(n);
        if n > 2 {
            g.add_edge(n - 1, 0);
        }
        g
    }

    /// Every vertex connected to `center`.
    pub fn star(n: usize, center: usize) -> Self {
        let mut g = Self::new(n);
        for v in 0..n {
            g.add_edge(center, v);
        }
        g
    }

    /// A three-leaf star on `0..4` centered at 0 whose leaf 3 fans out to
    /// every remaining vertex. Needs at least 5 vertices.
    pub fn pusteblume(n: usize) -> SynthResult<Self> {
        if n < 5 {
            return Err(SynthError::TooFewVertices {
                family: "pusteblume",
                num_vertices: n,
                min: 5,
            });
        }
        let mut g = Self::new(n);
        g.add_star(&[0, 1, 2, 3]);
        let fan: Vec<usize> = std::iter::once(3).chain(4..n).collect();
        g.add_star(&fan);
        Ok(g)
    }
}

fn ensure_compressible(num_vertices: usize) -> SynthResult<()> {
    if num_vertices > MAX_COMPRESSED_VERTICES {
        return Err(SynthError::GraphTooLarge {
            num_vertices,
            max: MAX_COMPRESSED_VERTICES,
        });
    }
    Ok(())
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges = self.edges();
        write!(f, "[")?;
        for (k, (i, j)) in edges.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{i}-{j}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_symmetric() {
        let mut g = Graph::new(4);
        g.add_edge(0, 2).add_edge(3, 1).add_edge(2, 2);
        assert!(g.has_edge(2, 0));
        assert!(g.has_edge(1, 3));
        assert!(!g.has_edge(2, 2));
        assert_eq!(g.edges(), vec![(0, 2), (1, 3)]);

        g.remove_edge(2, 0);
        assert_eq!(g.edge_count(), 1);
        g.clear();
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_compress_bit_order() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1);
        assert_eq!(g.compress().unwrap(), 1);
        g.clear().add_edge(2, 3);
        assert_eq!(g.compress().unwrap(), 1 << 5);
        g.clear().add_edge(1, 2);
        assert_eq!(g.compress().unwrap(), 1 << 3);

        let full = Graph::fully_connected(6);
        assert_eq!(full.compress().unwrap(), (1 << 15) - 1);
        assert_eq!(Graph::decompress(6, full.compress().unwrap()).unwrap(), full);
    }

    #[test]
    fn test_compression_size_limit() {
        let largest = Graph::fully_connected(MAX_COMPRESSED_VERTICES);
        let id = largest.compress().unwrap();
        assert_eq!(id, (1 << 55) - 1);
        assert_eq!(Graph::decompress(MAX_COMPRESSED_VERTICES, id).unwrap(), largest);

        for n in [12, 16, 64] {
            assert!(matches!(
                Graph::linear(n).compress(),
                Err(SynthError::GraphTooLarge { num_vertices, max: 11 }) if num_vertices == n
            ));
            assert!(matches!(
                Graph::decompress(n, u64::MAX),
                Err(SynthError::GraphTooLarge { .. })
            ));
        }
    }

    #[test]
    fn test_local_complementation() {
        let mut g = Graph::star(4, 0);
        g.local_complementation(0);
        assert_eq!(g, Graph::fully_connected(4));
        g.local_complementation(0);
        assert_eq!(g, Graph::star(4, 0));

        let path = Graph::linear(3);
        let lc = path.local_complemented(1);
        assert!(lc.has_edge(0, 2));
        assert_eq!(lc.edge_count(), 3);
    }

    #[test]
    fn test_families() {
        assert_eq!(Graph::linear(5).edge_count(), 4);
        assert_eq!(Graph::cycle(5).edge_count(), 5);
        assert_eq!(Graph::star(5, 2).degree(2), 4);
        let t = Graph::pusteblume(6).unwrap();
        assert_eq!(t.edges(), vec![(0, 1), (0, 2), (0, 3), (3, 4), (3, 5)]);
        for n in 0..5 {
            assert!(matches!(
                Graph::pusteblume(n),
                Err(SynthError::TooFewVertices { min: 5, .. })
            ));
        }
    }

    #[test]
    fn test_remove_all_edges_to() {
        let mut g = Graph::fully_connected(4);
        g.remove_all_edges_to(2);
        assert_eq!(g.degree(2), 0);
        assert_eq!(g.edges(), vec![(0, 1), (0, 3), (1, 3)]);
    }

    #[test]
    fn test_swap_vertices() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        g.swap_vertices(1, 2);
        assert_eq!(g.edges(), vec![(0, 2)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Graph::linear(3).to_string(), "[0-1, 1-2]");
        assert_eq!(Graph::new(2).to_string(), "[]");
    }
}
