//! Partition-indexed block algebra over a flat backing array.
//!
//! A [`StackedVector`] groups several named chunks (partitions) of a flat `f64` array so that
//! a single vector can be addressed either as a whole (for element-wise algebra) or per
//! partition (for block algebra). The integrator (`dynamics-model`) uses a 2-partition stacked
//! vector `[q | q̇]` to express the joint-space state `Y` and its derivative `Y′`.

use crate::errors::SpatialError;
use crate::lu::system_solve;

/// A vector partitioned into contiguous, independently addressable chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedVector {
    parts: Vec<usize>,
    data: Vec<f64>,
}

impl StackedVector {
    /// Builds a zero-initialized stacked vector with the given partition sizes.
    #[must_use]
    pub fn zeros(parts: &[usize]) -> Self {
        let total = parts.iter().sum();
        Self {
            parts: parts.to_vec(),
            data: vec![0.0; total],
        }
    }

    /// Builds a stacked vector from partition contents. Each slice becomes one partition.
    #[must_use]
    pub fn from_parts(chunks: &[&[f64]]) -> Self {
        let parts = chunks.iter().map(|c| c.len()).collect();
        let data = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        Self { parts, data }
    }

    /// The partition-size list.
    #[must_use]
    pub fn parts(&self) -> &[usize] {
        &self.parts
    }

    /// The full flat backing array.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn offset(&self, k: usize) -> usize {
        self.parts[..k].iter().sum()
    }

    /// Returns a copy of partition `k`.
    ///
    /// # Panics
    /// Panics if `k` is out of range.
    #[must_use]
    pub fn part(&self, k: usize) -> &[f64] {
        let start = self.offset(k);
        &self.data[start..start + self.parts[k]]
    }

    /// Overwrites partition `k` with `values`.
    ///
    /// # Errors
    /// Returns [`SpatialError::DimensionMismatch`] if `values.len()` does not match the
    /// partition's declared size.
    pub fn set_part(&mut self, k: usize, values: &[f64]) -> Result<(), SpatialError> {
        if values.len() != self.parts[k] {
            return Err(SpatialError::DimensionMismatch {
                name: "StackedVector::set_part",
                expected: self.parts[k],
                got: values.len(),
            });
        }
        let start = self.offset(k);
        self.data[start..start + self.parts[k]].copy_from_slice(values);
        Ok(())
    }

    fn check_compatible(&self, other: &Self, op: &'static str) -> Result<(), SpatialError> {
        if self.parts != other.parts {
            return Err(SpatialError::DimensionMismatch {
                name: op,
                expected: self.data.len(),
                got: other.data.len(),
            });
        }
        Ok(())
    }

    /// Element-wise sum. Requires identical partition lists.
    pub fn add(&self, other: &Self) -> Result<Self, SpatialError> {
        self.check_compatible(other, "StackedVector::add")?;
        Ok(Self {
            parts: self.parts.clone(),
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Element-wise difference. Requires identical partition lists.
    pub fn sub(&self, other: &Self) -> Result<Self, SpatialError> {
        self.check_compatible(other, "StackedVector::sub")?;
        Ok(Self {
            parts: self.parts.clone(),
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    /// Element-wise scale by a scalar.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            parts: self.parts.clone(),
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    /// The largest-magnitude component.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// A dense matrix partitioned independently by row- and column-blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedMatrix {
    row_parts: Vec<usize>,
    col_parts: Vec<usize>,
    rows: Vec<Vec<f64>>,
}

impl StackedMatrix {
    /// Builds a zero-initialized stacked matrix with the given row/column partition sizes.
    #[must_use]
    pub fn zeros(row_parts: &[usize], col_parts: &[usize]) -> Self {
        let nrows: usize = row_parts.iter().sum();
        let ncols: usize = col_parts.iter().sum();
        Self {
            row_parts: row_parts.to_vec(),
            col_parts: col_parts.to_vec(),
            rows: vec![vec![0.0; ncols]; nrows],
        }
    }

    fn row_offset(&self, i: usize) -> usize {
        self.row_parts[..i].iter().sum()
    }

    fn col_offset(&self, j: usize) -> usize {
        self.col_parts[..j].iter().sum()
    }

    /// Overwrites the `(i, j)` block with `block`, a row-major slice of
    /// `row_parts[i] * col_parts[j]` entries.
    ///
    /// # Errors
    /// Returns [`SpatialError::DimensionMismatch`] if `block`'s length doesn't match the
    /// declared block size.
    pub fn set_block(&mut self, i: usize, j: usize, block: &[f64]) -> Result<(), SpatialError> {
        let (rows, cols) = (self.row_parts[i], self.col_parts[j]);
        if block.len() != rows * cols {
            return Err(SpatialError::DimensionMismatch {
                name: "StackedMatrix::set_block",
                expected: rows * cols,
                got: block.len(),
            });
        }
        let (r0, c0) = (self.row_offset(i), self.col_offset(j));
        for r in 0..rows {
            self.rows[r0 + r][c0..c0 + cols].copy_from_slice(&block[r * cols..(r + 1) * cols]);
        }
        Ok(())
    }

    /// Matrix-vector product `A·x`.
    ///
    /// # Errors
    /// Returns [`SpatialError::DimensionMismatch`] if `x`'s partitions don't match this
    /// matrix's column partitions.
    pub fn matvec(&self, x: &StackedVector) -> Result<StackedVector, SpatialError> {
        if x.parts() != self.col_parts.as_slice() {
            return Err(SpatialError::DimensionMismatch {
                name: "StackedMatrix::matvec",
                expected: self.col_parts.iter().sum(),
                got: x.as_slice().len(),
            });
        }
        let flat = x.as_slice();
        let data: Vec<f64> = self
            .rows
            .iter()
            .map(|row| row.iter().zip(flat).map(|(a, b)| a * b).sum())
            .collect();
        Ok(StackedVector {
            parts: self.row_parts.clone(),
            data,
        })
    }

    /// Solves `A·x = b` by dense LU (delegating to [`crate::lu::system_solve`]), returning the
    /// solution partitioned as `col_parts` together with the maximum infinity-norm residual.
    ///
    /// # Errors
    /// Returns [`SpatialError::DimensionMismatch`] if `b`'s partitions don't match this
    /// matrix's row partitions, or [`SpatialError::SingularMatrix`] if the system is singular.
    pub fn solve(&self, b: &StackedVector) -> Result<(StackedVector, f64), SpatialError> {
        if b.parts() != self.row_parts.as_slice() {
            return Err(SpatialError::DimensionMismatch {
                name: "StackedMatrix::solve",
                expected: self.row_parts.iter().sum(),
                got: b.as_slice().len(),
            });
        }
        let (x, residual) = system_solve(&self.rows, b.as_slice())?;
        Ok((
            StackedVector {
                parts: self.col_parts.clone(),
                data: x,
            },
            residual,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partition_write_read_law() {
        let mut sv = StackedVector::zeros(&[2, 3]);
        sv.set_part(0, &[1.0, 2.0]).unwrap();
        let prev = sv.part(1).to_vec();
        sv.set_part(1, &[9.0, 9.0, 9.0]).unwrap();
        sv.set_part(1, &prev).unwrap();
        assert_relative_eq!(sv.as_slice(), [1.0, 2.0, 0.0, 0.0, 0.0].as_slice());
    }

    #[test]
    fn test_add_requires_equal_partitions() {
        let a = StackedVector::zeros(&[2, 2]);
        let b = StackedVector::zeros(&[1, 3]);
        assert!(matches!(
            a.add(&b),
            Err(SpatialError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_block_matvec() {
        let mut m = StackedMatrix::zeros(&[2, 2], &[2, 2]);
        m.set_block(0, 0, &[1.0, 0.0, 0.0, 1.0]).unwrap();
        m.set_block(1, 1, &[2.0, 0.0, 0.0, 2.0]).unwrap();
        let x = StackedVector::from_parts(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let y = m.matvec(&x).unwrap();
        assert_relative_eq!(y.as_slice(), [1.0, 2.0, 6.0, 8.0].as_slice());
    }

    #[test]
    fn test_block_solve_recovers_x() {
        let a1 = crate::vector3::Vec3::new(0.3, -0.1, 0.2);
        let b1 = crate::vector3::Vec3::new(0.1, 0.4, -0.2);
        let a2 = crate::vector3::Vec3::new(-0.2, 0.2, 0.1);
        let b2 = crate::vector3::Vec3::new(0.3, 0.1, 0.2);
        let outer = |u: &crate::vector3::Vec3, v: &crate::vector3::Vec3| -> [f64; 9] {
            let uu = *u.as_slice();
            let vv = *v.as_slice();
            let mut out = [0.0; 9];
            for i in 0..3 {
                for j in 0..3 {
                    out[i * 3 + j] = uu[i] * vv[j];
                }
            }
            out
        };
        let id3 = |s: f64| -> [f64; 9] {
            let mut m = [0.0; 9];
            m[0] = s;
            m[4] = s;
            m[8] = s;
            m
        };
        let add9 = |a: [f64; 9], b: [f64; 9]| -> [f64; 9] {
            let mut out = [0.0; 9];
            for i in 0..9 {
                out[i] = a[i] + b[i];
            }
            out
        };
        let mut a = StackedMatrix::zeros(&[3, 3], &[3, 3]);
        a.set_block(0, 0, &add9(id3(1.0), outer(&a1, &b1))).unwrap();
        a.set_block(1, 1, &add9(id3(1.0), outer(&a2, &b2))).unwrap();
        let neg = |m: [f64; 9]| -> [f64; 9] {
            let mut out = [0.0; 9];
            for i in 0..9 {
                out[i] = -m[i];
            }
            out
        };
        a.set_block(0, 1, &neg(outer(&a1, &b1))).unwrap();
        a.set_block(1, 0, &neg(outer(&a2, &b2))).unwrap();

        let x = StackedVector::from_parts(&[&[1.0, -2.0, 0.5], &[0.3, 0.3, -0.7]]);
        let y = a.matvec(&x).unwrap();
        let (solved, residual) = a.solve(&y).unwrap();
        assert_relative_eq!(solved.as_slice(), x.as_slice(), epsilon = 1e-8);
        assert!(residual < 1e-9);
    }
}
