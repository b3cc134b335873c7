//! Dense linear algebra helpers.
//!
//! ## Purpose
//!
//! Small, allocation-light routines used by the convex hull: the determinant
//! of a square matrix and the generalized cross product of `d - 1` vectors
//! in `d` dimensions.
//!
//! ## Design notes
//!
//! * **Storage**: Matrices are flat row-major `Vec<T>` buffers.
//! * **Pivoting**: Gaussian elimination with partial pivoting.

// External dependencies
use num_traits::Float;

/// Determinant of a `d × d` row-major matrix. Consumes the buffer as scratch.
pub fn determinant<T: Float>(mut m: Vec<T>, d: usize) -> T {
    debug_assert_eq!(m.len(), d * d);
    let mut det = T::one();

    for col in 0..d {
        // Partial pivot
        let mut pivot = col;
        let mut best = m[col * d + col].abs();
        for row in (col + 1)..d {
            let v = m[row * d + col].abs();
            if v > best {
                best = v;
                pivot = row;
            }
        }
        if best == T::zero() {
            return T::zero();
        }
        if pivot != col {
            for k in 0..d {
                m.swap(col * d + k, pivot * d + k);
            }
            det = -det;
        }

        let p = m[col * d + col];
        det = det * p;
        for row in (col + 1)..d {
            let factor = m[row * d + col] / p;
            if factor == T::zero() {
                continue;
            }
            for k in col..d {
                m[row * d + k] = m[row * d + k] - factor * m[col * d + k];
            }
        }
    }

    det
}

/// Vector orthogonal to the `d - 1` rows of `vectors` (each of length `d`).
///
/// Component `k` is the signed minor obtained by deleting column `k`.
pub fn generalized_cross<T: Float>(vectors: &[Vec<T>], d: usize) -> Vec<T> {
    debug_assert_eq!(vectors.len() + 1, d);
    let m = d - 1;
    let mut normal = Vec::with_capacity(d);
    let mut minor = Vec::with_capacity(m * m);

    for k in 0..d {
        minor.clear();
        for v in vectors {
            minor.extend(v.iter().enumerate().filter(|&(c, _)| c != k).map(|(_, &x)| x));
        }
        let det = if m == 0 {
            T::one()
        } else {
            determinant(minor.clone(), m)
        };
        normal.push(if k % 2 == 0 { det } else { -det });
    }

    normal
}

/// Dot product of two equal-length slices.
#[inline]
pub fn dot<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}
