//! Linear algebra over GF(2).
//!
//! Matrices are `ndarray` arrays of `u8` holding only 0 and 1. Addition is
//! XOR and multiplication accumulates AND with XOR. Shape mismatches are a
//! caller error and are only checked in debug builds.

use ndarray::{Array1, Array2};

/// A matrix over GF(2).
pub type F2Matrix = Array2<u8>;

/// A column vector over GF(2).
pub type F2Vector = Array1<u8>;

/// Result of Gaussian elimination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rref {
    /// The reduced row-echelon form.
    pub matrix: F2Matrix,
    /// Column index of the pivot in each non-zero row, ascending.
    pub pivots: Vec<usize>,
}

/// Result of [`rref_and_basis_change`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisChange {
    /// The reduced row-echelon form `R = M A`.
    pub rref: Rref,
    /// The invertible row transform `M`.
    pub transform: F2Matrix,
    /// The inverse of `transform`.
    pub inverse: F2Matrix,
}

/// Create a zero matrix.
pub fn zeros(rows: usize, cols: usize) -> F2Matrix {
    Array2::zeros((rows, cols))
}

/// Create an identity matrix.
pub fn identity(n: usize) -> F2Matrix {
    Array2::eye(n)
}

/// Matrix product `A B`.
pub fn mul(a: &F2Matrix, b: &F2Matrix) -> F2Matrix {
    debug_assert_eq!(a.ncols(), b.nrows(), "inner dimensions must agree");
    let mut out = zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for k in 0..a.ncols() {
            if a[[i, k]] == 0 {
                continue;
            }
            for j in 0..b.ncols() {
                out[[i, j]] ^= b[[k, j]];
            }
        }
    }
    out
}

/// Matrix-vector product `A v`.
pub fn mul_vec(a: &F2Matrix, v: &F2Vector) -> F2Vector {
    debug_assert_eq!(a.ncols(), v.len(), "dimensions must agree");
    Array1::from_shape_fn(a.nrows(), |i| {
        a.row(i)
            .iter()
            .zip(v.iter())
            .fold(0, |acc, (&x, &y)| acc ^ (x & y))
    })
}

/// Matrix sum `A + B` (element-wise XOR).
pub fn add(a: &F2Matrix, b: &F2Matrix) -> F2Matrix {
    debug_assert_eq!(a.dim(), b.dim(), "shapes must agree");
    let mut out = a.clone();
    out.zip_mut_with(b, |x, &y| *x ^= y);
    out
}

/// Transpose as an owned matrix.
pub fn transpose(a: &F2Matrix) -> F2Matrix {
    a.t().to_owned()
}

/// Stack `top` above `bottom`.
pub fn vstack(top: &F2Matrix, bottom: &F2Matrix) -> F2Matrix {
    debug_assert_eq!(top.ncols(), bottom.ncols(), "column counts must agree");
    let rows = top.nrows();
    Array2::from_shape_fn((rows + bottom.nrows(), top.ncols()), |(i, j)| {
        if i < rows { top[[i, j]] } else { bottom[[i - rows, j]] }
    })
}

/// Check whether every entry is zero.
pub fn is_zero(a: &F2Matrix) -> bool {
    a.iter().all(|&x| x == 0)
}

fn swap_rows(m: &mut F2Matrix, a: usize, b: usize) {
    if a == b {
        return;
    }
    for c in 0..m.ncols() {
        m.swap((a, c), (b, c));
    }
}

fn swap_cols(m: &mut F2Matrix, a: usize, b: usize) {
    if a == b {
        return;
    }
    for r in 0..m.nrows() {
        m.swap((r, a), (r, b));
    }
}

/// `row[dst] ^= row[src]`
fn xor_row_into(m: &mut F2Matrix, src: usize, dst: usize) {
    for c in 0..m.ncols() {
        let v = m[[src, c]];
        m[[dst, c]] ^= v;
    }
}

/// `col[dst] ^= col[src]`
fn xor_col_into(m: &mut F2Matrix, src: usize, dst: usize) {
    for r in 0..m.nrows() {
        let v = m[[r, src]];
        m[[r, dst]] ^= v;
    }
}

/// Gauss-Jordan elimination, optionally tracking `M` and `M^-1` alongside.
fn eliminate(a: &F2Matrix, mut track: Option<(&mut F2Matrix, &mut F2Matrix)>) -> Rref {
    let mut m = a.clone();
    let (rows, cols) = m.dim();
    let mut pivots = Vec::with_capacity(rows.min(cols));
    let mut r = 0;

    for c in 0..cols {
        if r >= rows {
            break;
        }
        let Some(p) = (r..rows).find(|&i| m[[i, c]] == 1) else {
            continue;
        };
        swap_rows(&mut m, r, p);
        if let Some((t, inv)) = track.as_mut() {
            swap_rows(t, r, p);
            swap_cols(inv, r, p);
        }
        for i in 0..rows {
            if i != r && m[[i, c]] == 1 {
                xor_row_into(&mut m, r, i);
                if let Some((t, inv)) = track.as_mut() {
                    xor_row_into(t, r, i);
                    xor_col_into(inv, i, r);
                }
            }
        }
        pivots.push(c);
        r += 1;
    }

    Rref { matrix: m, pivots }
}

/// Reduced row-echelon form and pivot columns.
pub fn rref(a: &F2Matrix) -> Rref {
    eliminate(a, None)
}

/// Rank of a matrix.
pub fn rank(a: &F2Matrix) -> usize {
    rref(a).pivots.len()
}

/// Reduced row-echelon form together with the row transform that produces it.
///
/// Returns `R`, `M` and `M^-1` with `M A = R`. The same row operations are
/// applied to an identity matrix in parallel, and their inverses are
/// accumulated on the right of a second identity matrix.
pub fn rref_and_basis_change(a: &F2Matrix) -> BasisChange {
    let mut transform = identity(a.nrows());
    let mut inverse = identity(a.nrows());
    let rref = eliminate(a, Some((&mut transform, &mut inverse)));
    BasisChange {
        rref,
        transform,
        inverse,
    }
}

/// Basis of the null space `{ v : A v = 0 }`, one vector per non-pivot column.
pub fn null_space(a: &F2Matrix) -> Vec<F2Vector> {
    let Rref { matrix, pivots } = rref(a);
    let cols = a.ncols();
    let mut is_pivot = vec![false; cols];
    for &p in &pivots {
        is_pivot[p] = true;
    }

    (0..cols)
        .filter(|&f| !is_pivot[f])
        .map(|f| {
            let mut v = Array1::zeros(cols);
            v[f] = 1;
            for (row, &pc) in pivots.iter().enumerate() {
                v[pc] = matrix[[row, f]];
            }
            v
        })
        .collect()
}

/// A particular solution of `A x = b`, or `None` if the system is inconsistent.
pub fn solve(a: &F2Matrix, b: &F2Vector) -> Option<F2Vector> {
    debug_assert_eq!(a.nrows(), b.len(), "dimensions must agree");
    let cols = a.ncols();
    let augmented = Array2::from_shape_fn((a.nrows(), cols + 1), |(i, j)| {
        if j < cols { a[[i, j]] } else { b[i] }
    });
    let Rref { matrix, pivots } = rref(&augmented);
    if pivots.last() == Some(&cols) {
        return None;
    }
    let mut x = Array1::zeros(cols);
    for (row, &pc) in pivots.iter().enumerate() {
        x[pc] = matrix[[row, cols]];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mul_and_add() {
        let a: F2Matrix = array![[1, 1], [0, 1]];
        let b: F2Matrix = array![[1, 0], [1, 1]];
        assert_eq!(mul(&a, &b), array![[0, 1], [1, 1]]);
        assert_eq!(add(&a, &b), array![[0, 1], [1, 0]]);
        assert_eq!(mul(&a, &identity(2)), a);
    }

    #[test]
    fn test_rref_and_rank() {
        let a: F2Matrix = array![[0, 1, 1], [1, 1, 0], [1, 0, 1]];
        let r = rref(&a);
        assert_eq!(r.pivots, vec![0, 1]);
        assert_eq!(r.matrix, array![[1, 0, 1], [0, 1, 1], [0, 0, 0]]);
        assert_eq!(rank(&a), 2);
        assert_eq!(rank(&identity(4)), 4);
        assert_eq!(rank(&zeros(3, 3)), 0);
    }

    #[test]
    fn test_null_space() {
        let a: F2Matrix = array![[0, 1, 1], [1, 1, 0], [1, 0, 1]];
        let kernel = null_space(&a);
        assert_eq!(kernel.len(), 1);
        assert_eq!(kernel[0], array![1, 1, 1]);
        for v in &kernel {
            assert!(mul_vec(&a, v).iter().all(|&x| x == 0));
        }
        assert!(null_space(&identity(3)).is_empty());
    }

    #[test]
    fn test_rref_and_basis_change() {
        let a: F2Matrix = array![
            [0, 1, 1, 0],
            [1, 1, 0, 1],
            [1, 0, 1, 1],
            [0, 0, 1, 1],
        ];
        let change = rref_and_basis_change(&a);
        assert_eq!(mul(&change.transform, &a), change.rref.matrix);
        assert_eq!(mul(&change.transform, &change.inverse), identity(4));
        assert_eq!(mul(&change.inverse, &change.transform), identity(4));
    }

    #[test]
    fn test_solve() {
        let a: F2Matrix = array![[1, 1, 0], [0, 1, 1]];
        let b: F2Vector = array![1, 0];
        let x = solve(&a, &b).unwrap();
        assert_eq!(mul_vec(&a, &x), b);

        let singular: F2Matrix = array![[1, 1], [1, 1]];
        assert!(solve(&singular, &array![1, 0]).is_none());
    }

    #[test]
    fn test_vstack() {
        let top: F2Matrix = array![[1, 0]];
        let bottom: F2Matrix = array![[0, 1], [1, 1]];
        assert_eq!(vstack(&top, &bottom), array![[1, 0], [0, 1], [1, 1]]);
    }
}
