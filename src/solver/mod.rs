//! Numerical pipeline for the RLC transient.
//!
//! The solver runs three stages in sequence:
//!
//! 1. [`EulerIntegrator`] integrates the circuit model with fixed forward Euler steps
//!    over the half-open window `[t0, t1)`
//! 2. [`fit_polynomial`] fits a least-squares polynomial to the sampled voltage
//! 3. [`GoldenSection`] searches the fitted polynomial for its maximum on `[t0, t1]`
//!
//! [`Solver`] wires the stages together and returns a [`Solution`].

mod euler;
mod golden;
mod pipeline;
mod polyfit;

pub use euler::{EulerIntegrator, Trajectory};
pub use golden::{count_peaks, find_maximum, GoldenSection, MaximumLocation, MaximumResult};
pub use pipeline::{solve, solve_circuit, Solution, SolveConfig, Solver};
pub use polyfit::{fit_polynomial, FitQuality, Polynomial};

/// Start of the integration window (s).
pub const DEFAULT_T_START: f64 = 0.0;

/// End of the integration window (s), exclusive for sampling.
pub const DEFAULT_T_END: f64 = 4e-3;

/// Fixed Euler step and table spacing (s).
pub const DEFAULT_STEP: f64 = 2e-4;

/// Largest number of samples one integration may produce.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Degree of the approximating polynomial.
pub const DEFAULT_DEGREE: usize = 5;

/// Final bracket width of the maximum search (s).
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Iteration cap for the golden-section search.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Number of sub-intervals used when counting peaks of the fitted polynomial.
pub const PEAK_SCAN_POINTS: usize = 512;
