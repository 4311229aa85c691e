//! Solve orchestrator: integrate, fit, maximize.

use tracing::{debug, info};

use crate::circuit::{CircuitParameters, RlcModel, StateVector};
use crate::error::{Result, TransientError};

use super::euler::{EulerIntegrator, Trajectory};
use super::golden::{find_maximum, GoldenSection, MaximumResult};
use super::polyfit::{fit_polynomial, FitQuality, Polynomial};
use super::{
    DEFAULT_DEGREE, DEFAULT_MAX_ITERATIONS, DEFAULT_STEP, DEFAULT_TOLERANCE, DEFAULT_T_END,
    DEFAULT_T_START,
};

/// Configuration for a solve.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Start of the time window (s).
    pub t_start: f64,
    /// End of the time window (s). Sampling excludes it, the search includes it.
    pub t_end: f64,
    /// Fixed Euler step and sample spacing (s).
    pub step: f64,
    /// Degree of the approximating polynomial.
    pub degree: usize,
    /// Final bracket width of the maximum search (s).
    pub tolerance: f64,
    /// Iteration cap of the maximum search.
    pub max_iterations: usize,
    /// State at `t_start`.
    pub initial_state: StateVector,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            t_start: DEFAULT_T_START,
            t_end: DEFAULT_T_END,
            step: DEFAULT_STEP,
            degree: DEFAULT_DEGREE,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_state: StateVector::REST,
        }
    }
}

impl SolveConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time window `[t_start, t_end]` (seconds).
    pub fn with_window(mut self, t_start: f64, t_end: f64) -> Self {
        self.t_start = t_start;
        self.t_end = t_end;
        self
    }

    /// Set the fixed integration step (seconds).
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the degree of the approximating polynomial.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set the search tolerance (seconds).
    ///
    /// The reported time of the maximum is within half of this value of the
    /// peak of the fitted polynomial.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap of the maximum search.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the state at the start of the window.
    pub fn with_initial_state(mut self, state: StateVector) -> Self {
        self.initial_state = state;
        self
    }

    /// Check the configuration without running anything.
    pub fn validate(&self) -> Result<()> {
        let integrator = self.integrator()?;
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TransientError::invalid_config(format!(
                "search tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !self.initial_state.is_finite() {
            return Err(TransientError::invalid_config("initial state must be finite"));
        }
        let samples = integrator.sample_count();
        if self.degree >= samples {
            return Err(TransientError::invalid_fit(
                self.degree,
                samples,
                "degree must be below the sample count",
            ));
        }
        Ok(())
    }

    fn integrator(&self) -> Result<EulerIntegrator> {
        EulerIntegrator::new(self.t_start, self.t_end, self.step)
    }

    fn search(&self) -> GoldenSection {
        GoldenSection::with_config(self.tolerance, self.max_iterations)
    }
}

/// Everything a solve produces.
#[derive(Debug, Clone)]
pub struct Solution {
    pub trajectory: Trajectory,
    pub polynomial: Polynomial,
    pub fit: FitQuality,
    pub maximum: MaximumResult,
}

impl Solution {
    /// Sample times (s).
    pub fn times(&self) -> &[f64] {
        self.trajectory.times()
    }

    /// Sampled capacitor voltages (V), same length as [`times`](Self::times).
    pub fn voltages(&self) -> Vec<f64> {
        self.trajectory.voltages()
    }

    /// The fitted polynomial.
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Time of the first maximum (s).
    pub fn t_max(&self) -> f64 {
        self.maximum.t_max
    }

    /// Value of the first maximum (V).
    pub fn u_max(&self) -> f64 {
        self.maximum.u_max
    }
}

/// Stateless solver holding a configuration.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolveConfig,
}

impl Solver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Run the pipeline for one set of circuit parameters.
    pub fn solve(&self, params: &CircuitParameters) -> Result<Solution> {
        solve(params, &self.config)
    }
}

/// Integrate the circuit, fit the voltage, and locate its first maximum.
///
/// # Errors
/// Any error from the configuration check, the integration, the fit or the
/// search, unchanged.
pub fn solve(params: &CircuitParameters, config: &SolveConfig) -> Result<Solution> {
    config.validate()?;

    debug!(%params, "solving RLC transient");

    let model = RlcModel::new(*params);
    let trajectory = config.integrator()?.integrate(&model, config.initial_state)?;

    let voltages = trajectory.voltages();
    let polynomial = fit_polynomial(trajectory.times(), &voltages, config.degree)?;
    let fit = FitQuality::measure(&polynomial, trajectory.times(), &voltages);
    debug!(rms = fit.rms, max_abs = fit.max_abs, "fit residuals");

    let maximum = find_maximum(&polynomial, config.t_start, config.t_end, &config.search())?;

    info!(
        samples = trajectory.len(),
        t_max = maximum.t_max,
        u_max = maximum.u_max,
        "solve finished"
    );

    Ok(Solution {
        trajectory,
        polynomial,
        fit,
        maximum,
    })
}

/// Solve with the default window, step and degree.
///
/// Arguments follow the order E, R, C, L in SI units (capacitance in farads).
pub fn solve_circuit(emf: f64, resistance: f64, capacitance: f64, inductance: f64) -> Result<Solution> {
    let params = CircuitParameters::new(emf, resistance, inductance, capacitance)?;
    solve(&params, &SolveConfig::default())
}
