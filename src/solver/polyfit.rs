//! Least-squares polynomial approximation.
//!
//! The fit works in a scaled variable `x = offset + scale·t` that maps the
//! sampled time span onto `[-1, 1]`. Raw times in the millisecond range would
//! make the Vandermonde columns differ by many orders of magnitude; in the
//! scaled variable the columns stay comparable and the QR factorization stays
//! well conditioned.

use std::fmt;

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{Result, TransientError};

/// Relative threshold on the diagonal of R below which the design matrix is
/// treated as rank deficient.
const RANK_TOLERANCE: f64 = 1e-12;

/// A polynomial in a scaled variable `x = offset + scale·t`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Coefficients in `x`, lowest power first
    coefficients: Vec<f64>,
    /// Time span mapped onto `[-1, 1]`
    domain: (f64, f64),
    offset: f64,
    scale: f64,
}

impl Polynomial {
    /// Create a polynomial in `t` from monomial coefficients, lowest power first.
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self {
            coefficients,
            domain: (-1.0, 1.0),
            offset: 0.0,
            scale: 1.0,
        }
    }

    /// Create a polynomial in the variable that maps `domain` onto `[-1, 1]`.
    pub fn with_domain(coefficients: Vec<f64>, domain: (f64, f64)) -> Self {
        let (a, b) = domain;
        let width = b - a;
        let (offset, scale) = if width > 0.0 {
            (-(a + b) / width, 2.0 / width)
        } else {
            (-a, 1.0)
        };

        Self {
            coefficients,
            domain,
            offset,
            scale,
        }
    }

    /// Degree of the polynomial (number of coefficients minus one).
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Coefficients in the scaled variable, lowest power first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Time span mapped onto `[-1, 1]`.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a time onto the scaled variable.
    pub fn map_time(&self, t: f64) -> f64 {
        self.offset + self.scale * t
    }

    /// Evaluate at time `t`. Times outside the domain extrapolate.
    pub fn eval(&self, t: f64) -> f64 {
        let x = self.map_time(t);
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// The derivative with respect to `t`, on the same domain.
    pub fn derivative(&self) -> Polynomial {
        let coefficients = if self.coefficients.len() <= 1 {
            vec![0.0]
        } else {
            self.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, &c)| k as f64 * c * self.scale)
                .collect()
        };

        Polynomial {
            coefficients,
            ..self.clone()
        }
    }

    /// Coefficients in the unscaled time variable `t`, lowest power first.
    ///
    /// Expands `Σ c_k (offset + scale·t)^k` with Horner's scheme. Useful for
    /// display; evaluation through [`eval`](Self::eval) is better conditioned.
    pub fn to_monomial(&self) -> Vec<f64> {
        let mut result: Vec<f64> = Vec::with_capacity(self.coefficients.len());
        for &c in self.coefficients.iter().rev() {
            // result = result · (offset + scale·t) + c
            let mut next = vec![0.0; result.len() + 1];
            for (i, &r) in result.iter().enumerate() {
                next[i] += self.offset * r;
                next[i + 1] += self.scale * r;
            }
            next[0] += c;
            result = next;
        }
        if result.is_empty() {
            result.push(0.0);
        }
        result
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, c) in self.coefficients.iter().enumerate() {
            match k {
                0 => write!(f, "{:e}", c)?,
                1 => write!(f, " {} {:e}·x", sign(*c), c.abs())?,
                _ => write!(f, " {} {:e}·x^{}", sign(*c), c.abs(), k)?,
            }
        }
        write!(
            f,
            ", x = {:e} + {:e}·t on [{:e}, {:e}]",
            self.offset, self.scale, self.domain.0, self.domain.1
        )
    }
}

fn sign(c: f64) -> char {
    if c.is_sign_negative() {
        '-'
    } else {
        '+'
    }
}

/// Residuals of a fit against the samples it was fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitQuality {
    /// Root mean square residual
    pub rms: f64,
    /// Largest absolute residual
    pub max_abs: f64,
}

impl FitQuality {
    /// Compare `poly` against the samples `(times[i], values[i])`.
    ///
    /// Residuals are scaled by the largest one before squaring, so the RMS
    /// stays finite for any finite residuals.
    pub fn measure(poly: &Polynomial, times: &[f64], values: &[f64]) -> Self {
        let residuals: Vec<f64> = times
            .iter()
            .zip(values)
            .map(|(&t, &v)| poly.eval(t) - v)
            .collect();
        let max_abs = residuals.iter().fold(0.0f64, |m, r| m.max(r.abs()));

        let rms = if max_abs == 0.0 || !max_abs.is_finite() {
            max_abs
        } else {
            let sum_sq: f64 = residuals.iter().map(|r| (r / max_abs).powi(2)).sum();
            max_abs * (sum_sq / residuals.len() as f64).sqrt()
        };

        Self { rms, max_abs }
    }
}

/// Fit a polynomial of the given degree to `(times[i], values[i])` by least squares.
///
/// The design matrix is built in the scaled variable and solved through a
/// Householder QR factorization followed by back substitution.
///
/// # Errors
/// Returns [`InvalidFitConfiguration`](TransientError::InvalidFitConfiguration)
/// when the inputs differ in length, contain non-finite values, when
/// `degree >= samples`, or when the design matrix is rank deficient.
pub fn fit_polynomial(times: &[f64], values: &[f64], degree: usize) -> Result<Polynomial> {
    let samples = times.len();
    if values.len() != samples {
        return Err(TransientError::invalid_fit(
            degree,
            samples,
            format!("{} times but {} values", samples, values.len()),
        ));
    }
    if degree >= samples {
        return Err(TransientError::invalid_fit(
            degree,
            samples,
            "degree must be below the sample count",
        ));
    }
    if times.iter().chain(values).any(|v| !v.is_finite()) {
        return Err(TransientError::invalid_fit(
            degree,
            samples,
            "samples must be finite",
        ));
    }

    let t_min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let t_max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut poly = Polynomial::with_domain(Vec::new(), (t_min, t_max));

    let cols = degree + 1;
    let design = DMatrix::from_fn(samples, cols, |i, j| poly.map_time(times[i]).powi(j as i32));
    let rhs = DVector::from_column_slice(values);

    let qr = design.qr();
    let r = qr.r();
    let qt_b = qr.q().transpose() * rhs;

    let max_diag = r.diagonal().iter().fold(0.0f64, |m, d| m.max(d.abs()));
    if r.diagonal().iter().any(|d| d.abs() <= RANK_TOLERANCE * max_diag) || max_diag == 0.0 {
        return Err(TransientError::invalid_fit(
            degree,
            samples,
            "design matrix is rank deficient (too few distinct sample times)",
        ));
    }

    let coefficients = r.solve_upper_triangular(&qt_b).ok_or_else(|| {
        TransientError::invalid_fit(degree, samples, "triangular solve failed")
    })?;

    poly.coefficients = coefficients.iter().copied().collect();

    debug!(degree, samples, "polynomial fit finished");

    Ok(poly)
}
