//! Least-squares polynomial regression.
//!
//! Solves `min ||A c - y||` where `A` is the Vandermonde matrix of the sample
//! x-coordinates, using Householder QR on a column-equilibrated copy of `A`.
//! Columns are scaled to unit norm before factorisation (powers of x span
//! many orders of magnitude) and the solution is unscaled afterwards.

use thiserror::Error;

use super::round_to_unit;

/// Diagonal entries of R below this fraction of the largest one are treated as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Regression failure: the matched points do not determine the polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("Too few points: {points} points for {unknowns} coefficients")]
    Underdetermined { points: usize, unknowns: usize },

    #[error("Design matrix is rank deficient at column {column}")]
    RankDeficient { column: usize },

    #[error("Regression produced non-finite values")]
    NonFinite,
}

/// Dense row-major matrix, just enough for the factorisation below.
struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    fn vandermonde(xs: impl Iterator<Item = f64>, degree: usize) -> Self {
        let cols = degree + 1;
        let mut data = Vec::new();
        for x in xs {
            let mut power = 1.0;
            for _ in 0..cols {
                data.push(power);
                power *= x;
            }
        }
        Self {
            rows: data.len() / cols,
            cols,
            data,
        }
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    fn get_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }

    fn column_norm(&self, col: usize, from_row: usize) -> f64 {
        (from_row..self.rows)
            .map(|r| self.get(r, col).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/// Fit a polynomial of `degree` through `points` and round each coefficient
/// to a multiple of `rounding_unit`.
///
/// Returns `degree + 1` coefficients, lowest degree first.
///
/// # Errors
///
/// - `Underdetermined`: fewer than `degree + 1` points
/// - `RankDeficient`: too few distinct x-coordinates, or numerically singular
/// - `NonFinite`: an input or the solution is NaN or infinite
pub fn fit(points: &[(f64, f64)], degree: usize, rounding_unit: f64) -> Result<Vec<f64>, FitError> {
    let unknowns = degree + 1;
    if points.len() < unknowns {
        return Err(FitError::Underdetermined {
            points: points.len(),
            unknowns,
        });
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(FitError::NonFinite);
    }

    let mut a = Matrix::vandermonde(points.iter().map(|&(x, _)| x), degree);
    let mut b: Vec<f64> = points.iter().map(|&(_, y)| y).collect();

    // Equilibrate columns
    let mut scales = Vec::with_capacity(unknowns);
    for col in 0..unknowns {
        let norm = a.column_norm(col, 0);
        if norm == 0.0 || !norm.is_finite() {
            return Err(FitError::RankDeficient { column: col });
        }
        for row in 0..a.rows {
            *a.get_mut(row, col) /= norm;
        }
        scales.push(norm);
    }

    householder_qr(&mut a, &mut b);

    let max_diag = (0..unknowns)
        .map(|k| a.get(k, k).abs())
        .fold(0.0, f64::max);
    for k in 0..unknowns {
        if a.get(k, k).abs() <= RANK_TOLERANCE * max_diag {
            return Err(FitError::RankDeficient { column: k });
        }
    }

    // Back substitution on R c = Q^T b
    let mut coeffs = vec![0.0; unknowns];
    for k in (0..unknowns).rev() {
        let tail: f64 = ((k + 1)..unknowns).map(|j| a.get(k, j) * coeffs[j]).sum();
        coeffs[k] = (b[k] - tail) / a.get(k, k);
    }

    coeffs
        .iter()
        .zip(&scales)
        .map(|(&c, &scale)| {
            let value = c / scale;
            if value.is_finite() {
                Ok(round_to_unit(value, rounding_unit))
            } else {
                Err(FitError::NonFinite)
            }
        })
        .collect()
}

/// Reduce `a` to upper-triangular R in place, applying the same reflections to `b`.
fn householder_qr(a: &mut Matrix, b: &mut [f64]) {
    let (rows, cols) = (a.rows, a.cols);

    for k in 0..cols {
        let norm = a.column_norm(k, k);
        if norm == 0.0 {
            continue;
        }

        let alpha = if a.get(k, k) > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (k..rows).map(|r| a.get(r, k)).collect();
        v[0] -= alpha;
        let v_norm2: f64 = v.iter().map(|e| e * e).sum();
        if v_norm2 == 0.0 {
            continue;
        }

        for col in k..cols {
            let dot: f64 = v.iter().enumerate().map(|(i, vi)| vi * a.get(k + i, col)).sum();
            let factor = 2.0 * dot / v_norm2;
            for (i, vi) in v.iter().enumerate() {
                *a.get_mut(k + i, col) -= factor * vi;
            }
        }

        let dot: f64 = v.iter().enumerate().map(|(i, vi)| vi * b[k + i]).sum();
        let factor = 2.0 * dot / v_norm2;
        for (i, vi) in v.iter().enumerate() {
            b[k + i] -= factor * vi;
        }
    }
}
