//! Golden-section search for the maximum of the fitted polynomial.

use tracing::{debug, warn};

use super::polyfit::Polynomial;
use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, PEAK_SCAN_POINTS};
use crate::error::{Result, TransientError};

/// 1/φ, the fraction of the bracket kept at every step.
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Where the reported maximum lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximumLocation {
    /// Strictly inside the search interval
    Interior,
    /// At one of the interval bounds (no interior maximum was bracketed)
    Boundary,
}

/// Location and value of the maximum of a polynomial on a closed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaximumResult {
    /// Time of the maximum (s)
    pub t_max: f64,
    /// Polynomial value at `t_max` (V)
    pub u_max: f64,
    pub location: MaximumLocation,
    /// The polynomial has at most one local maximum on the interval
    pub single_peak: bool,
    /// Golden-section iterations performed
    pub iterations: usize,
}

impl MaximumResult {
    /// Return the result if the maximum is interior.
    ///
    /// # Errors
    /// [`NoInteriorMaximum`](TransientError::NoInteriorMaximum) when the search
    /// fell back to a boundary value.
    pub fn require_interior(&self, t0: f64, t1: f64) -> Result<&Self> {
        match self.location {
            MaximumLocation::Interior => Ok(self),
            MaximumLocation::Boundary => Err(TransientError::NoInteriorMaximum { t0, t1 }),
        }
    }
}

/// Derivative-free maximizer over a closed interval.
#[derive(Debug, Clone, Copy)]
pub struct GoldenSection {
    /// Final bracket width
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
}

impl Default for GoldenSection {
    fn default() -> Self {
        Self::new()
    }
}

impl GoldenSection {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_config(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Maximize `f` on `[a, b]`, assuming it is unimodal there.
    ///
    /// Returns `(t, f(t), iterations)` where `t` is the midpoint of the final
    /// bracket, so `t` is within `tolerance / 2` of the bracketed maximum.
    pub fn maximize<F>(&self, f: F, a: f64, b: f64) -> Result<(f64, f64, usize)>
    where
        F: Fn(f64) -> f64,
    {
        if !a.is_finite() || !b.is_finite() || b <= a {
            return Err(TransientError::invalid_config(format!(
                "search interval [{}, {}] is empty or not finite",
                a, b
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TransientError::invalid_config(format!(
                "search tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        let (mut lo, mut hi) = (a, b);
        let mut x1 = hi - INV_PHI * (hi - lo);
        let mut x2 = lo + INV_PHI * (hi - lo);
        let mut f1 = f(x1);
        let mut f2 = f(x2);
        let mut iterations = 0;

        while hi - lo > self.tolerance {
            if iterations == self.max_iterations {
                warn!(
                    iterations,
                    width = hi - lo,
                    tolerance = self.tolerance,
                    "golden-section search hit the iteration cap"
                );
                break;
            }
            iterations += 1;

            if f1 > f2 {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = hi - INV_PHI * (hi - lo);
                f1 = f(x1);
            } else {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = lo + INV_PHI * (hi - lo);
                f2 = f(x2);
            }
        }

        let t = 0.5 * (lo + hi);
        Ok((t, f(t), iterations))
    }
}

/// Find the maximum of `poly` on `[t0, t1]`.
///
/// The golden-section candidate is compared against both bounds. When the
/// candidate sits within `tolerance` of a bound, or a bound is at least as
/// high, the larger bound value is reported with
/// [`MaximumLocation::Boundary`]. Callers that need an interior peak use
/// [`MaximumResult::require_interior`].
pub fn find_maximum(
    poly: &Polynomial,
    t0: f64,
    t1: f64,
    search: &GoldenSection,
) -> Result<MaximumResult> {
    let (t_c, u_c, iterations) = search.maximize(|t| poly.eval(t), t0, t1)?;
    let single_peak = count_peaks(poly, t0, t1, PEAK_SCAN_POINTS) <= 1;
    if !single_peak {
        warn!(t0, t1, "fitted polynomial has several peaks, search assumes one");
    }

    let (u0, u1) = (poly.eval(t0), poly.eval(t1));
    let (t_b, u_b) = if u0 >= u1 { (t0, u0) } else { (t1, u1) };
    let near_bound = t_c - t0 <= search.tolerance || t1 - t_c <= search.tolerance;

    let result = if near_bound || u_b >= u_c {
        warn!(t = t_b, u = u_b, "no interior maximum, using boundary value");
        MaximumResult {
            t_max: t_b,
            u_max: u_b,
            location: MaximumLocation::Boundary,
            single_peak,
            iterations,
        }
    } else {
        MaximumResult {
            t_max: t_c,
            u_max: u_c,
            location: MaximumLocation::Interior,
            single_peak,
            iterations,
        }
    };

    debug!(
        t_max = result.t_max,
        u_max = result.u_max,
        iterations,
        "maximum search finished"
    );

    Ok(result)
}

/// Count local maxima of `poly` on `[t0, t1]` from sign changes of its
/// derivative on a uniform grid of `points` sub-intervals.
pub fn count_peaks(poly: &Polynomial, t0: f64, t1: f64, points: usize) -> usize {
    let slope = poly.derivative();
    let points = points.max(1);
    let mut peaks = 0;
    let mut rising: Option<bool> = None;

    for i in 0..=points {
        let t = t0 + (t1 - t0) * i as f64 / points as f64;
        let d = slope.eval(t);
        if d == 0.0 {
            continue;
        }
        let now_rising = d > 0.0;
        if rising == Some(true) && !now_rising {
            peaks += 1;
        }
        rising = Some(now_rising);
    }

    peaks
}
