//! Dense LU decomposition (Doolittle, partial pivoting) and linear system solving.

use crate::errors::SpatialError;

/// Pivot/singularity tolerance: a pivot at or below this magnitude is treated as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solves `A·x = b` for a dense square system using Doolittle LU decomposition with partial
/// pivoting (largest absolute value in the working column).
///
/// # Errors
/// Returns [`SpatialError::DimensionMismatch`] if `a` is not square or does not match `b`'s
/// length, and [`SpatialError::SingularMatrix`] if a pivot's magnitude falls at or below
/// [`PIVOT_TOLERANCE`].
///
/// # Returns
/// The solution `x`, together with the maximum infinity-norm residual `max |A·x − b|`,
/// computed against the original (undecomposed) matrix.
pub fn system_solve(a: &[Vec<f64>], b: &[f64]) -> Result<(Vec<f64>, f64), SpatialError> {
    let n = b.len();
    if a.len() != n {
        return Err(SpatialError::DimensionMismatch {
            name: "system_solve: rows(A)",
            expected: n,
            got: a.len(),
        });
    }
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(SpatialError::DimensionMismatch {
                name: "system_solve: cols(A)",
                expected: n,
                got: row.len(),
            });
        }
        let _ = i;
    }

    let mut lu: Vec<Vec<f64>> = a.to_vec();
    let mut perm: Vec<usize> = (0..n).collect();

    for j in 0..n {
        let (pivot_row, pivot_mag) = (j..n)
            .map(|i| (i, lu[i][j].abs()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .expect("non-empty column range");

        if pivot_mag <= PIVOT_TOLERANCE {
            return Err(SpatialError::SingularMatrix);
        }
        if pivot_row != j {
            lu.swap(j, pivot_row);
            perm.swap(j, pivot_row);
        }

        for i in (j + 1)..n {
            let factor = lu[i][j] / lu[j][j];
            lu[i][j] = factor;
            for k in (j + 1)..n {
                let upper = lu[j][k];
                lu[i][k] -= factor * upper;
            }
        }
    }

    // Forward substitution: L·y = P·b.
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[perm[i]];
        for k in 0..i {
            sum -= lu[i][k] * y[k];
        }
        y[i] = sum;
    }

    // Back substitution: U·x = y.
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for k in (i + 1)..n {
            sum -= lu[i][k] * x[k];
        }
        x[i] = sum / lu[i][i];
    }

    let mut max_residual: f64 = 0.0;
    for (i, row) in a.iter().enumerate() {
        let ax: f64 = row.iter().zip(x.iter()).map(|(aij, xj)| aij * xj).sum();
        max_residual = max_residual.max((ax - b[i]).abs());
    }

    Ok((x, max_residual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_system() {
        let a = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let b = vec![1.0, 2.0, 3.0];
        let (x, residual) = system_solve(&a, &b).unwrap();
        assert_relative_eq!(x.as_slice(), b.as_slice(), epsilon = 1e-12);
        assert!(residual < 1e-12);
    }

    #[test]
    fn test_requires_pivoting() {
        // zero on the diagonal forces a row swap
        let a = vec![vec![0.0, 1.0], vec![1.0, 1.0]];
        let b = vec![2.0, 3.0];
        let (x, residual) = system_solve(&a, &b).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-10);
        assert!(residual < 1e-10);
    }

    #[test]
    fn test_singular_system_fails() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let b = vec![1.0, 2.0];
        assert_eq!(system_solve(&a, &b), Err(SpatialError::SingularMatrix));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let b = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            system_solve(&a, &b),
            Err(SpatialError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_round_trip_holds_for_random_diagonally_dominant_systems() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..100 {
            let n = 4;
            let mut a = vec![vec![0.0; n]; n];
            for (i, row) in a.iter_mut().enumerate() {
                for (j, entry) in row.iter_mut().enumerate() {
                    *entry = rng.random_range(-1.0..1.0);
                    if i == j {
                        *entry += 10.0;
                    }
                }
            }
            let x: Vec<f64> = (0..n).map(|_| rng.random_range(-5.0..5.0)).collect();
            let b: Vec<f64> = a
                .iter()
                .map(|row| row.iter().zip(&x).map(|(aij, xj)| aij * xj).sum())
                .collect();
            let (solved, residual) = system_solve(&a, &b).unwrap();
            for (got, want) in solved.iter().zip(&x) {
                assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
            }
            assert!(residual < 1e-9);
        }
    }
}
