//! QBFPT problem instances: dimension plus upper-triangular coefficients.

use anyhow::{anyhow, bail, Result};
use std::path::Path;

/// An immutable QBFPT instance.
///
/// Holds the dimension `n` and the dense `n x n` coefficient matrix of
/// the quadratic form `f(x) = x' A x`. The instance format stores only
/// the upper triangle (diagonal = linear terms, above-diagonal = pairwise
/// terms); entries below the diagonal are zero, and the evaluator folds
/// `a[i][j] + a[j][i]` wherever a symmetric contribution is needed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    n: usize,
    a: Vec<Vec<f64>>,
}

impl Instance {
    /// Parses an instance from its text form.
    ///
    /// The format is a whitespace-separated token stream: the dimension
    /// `n` (a positive integer) followed by exactly `n * (n + 1) / 2`
    /// numeric coefficients in row-major upper-triangular order.
    ///
    /// Parsing is all-or-nothing: any missing or unparsable token fails
    /// the load and no instance is produced.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();

        let n: usize = tokens
            .next()
            .ok_or_else(|| anyhow!("empty instance: missing dimension"))?
            .parse()
            .map_err(|e| anyhow!("invalid dimension: {e}"))?;
        if n == 0 {
            bail!("instance dimension must be positive");
        }

        let mut a = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let token = tokens.next().ok_or_else(|| {
                    anyhow!("truncated instance: missing coefficient a[{i}][{j}]")
                })?;
                a[i][j] = token
                    .parse()
                    .map_err(|e| anyhow!("invalid coefficient a[{i}][{j}] ({token:?}): {e}"))?;
            }
        }

        Ok(Self { n, a })
    }

    /// Reads and parses an instance file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("cannot read instance file {}: {e}", path.display()))?;
        Self::parse(&contents)
    }

    /// Builds an instance from upper-triangular rows.
    ///
    /// Row `i` must contain the `n - i` coefficients `a[i][i..n]`.
    /// Intended for tests and benchmarks; file input goes through
    /// [`Instance::parse`].
    ///
    /// # Panics
    /// Panics when the row shapes do not describe an upper triangle.
    pub fn from_upper_triangular(n: usize, rows: &[Vec<f64>]) -> Self {
        assert_eq!(rows.len(), n, "expected {n} upper-triangular rows");
        let mut a = vec![vec![0.0; n]; n];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), n - i, "row {i} must have {} coefficients", n - i);
            a[i][i..n].copy_from_slice(row);
        }
        Self { n, a }
    }

    /// Dimension of the instance (number of binary variables).
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for the degenerate zero-dimension case (never produced by
    /// [`Instance::parse`], which rejects `n == 0`).
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The full coefficient matrix.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.a
    }

    /// Single coefficient access.
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.a[i][j]
    }
}
