//! Fixed-step forward Euler integration.

use tracing::debug;

use crate::circuit::{StateVector, VectorField};
use crate::error::{Result, TransientError};

use super::MAX_SAMPLES;

/// A sampled solution `(t_i, y_i)` with constant spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<StateVector>,
    step: f64,
}

impl Trajectory {
    /// Sample times, strictly increasing.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// States at each sample time.
    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    /// Capacitor voltage at each sample time.
    pub fn voltages(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.voltage).collect()
    }

    /// Spacing between consecutive samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterate over `(t, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, StateVector)> + '_ {
        self.times.iter().copied().zip(self.states.iter().copied())
    }
}

/// Forward Euler integrator over the half-open window `[t0, t1)`.
///
/// Sample times are `t_i = t0 + i·h` for every `i` with `t_i < t1`, and
///
/// ```text
/// y_i = y_{i-1} + h · f(t_{i-1}, y_{i-1})
/// ```
///
/// There is no error estimation: the step is the accuracy knob.
#[derive(Debug, Clone, Copy)]
pub struct EulerIntegrator {
    t_start: f64,
    t_end: f64,
    step: f64,
    samples: usize,
}

impl EulerIntegrator {
    /// Create an integrator for `[t_start, t_end)` with fixed step `step`.
    ///
    /// # Errors
    /// [`InvalidConfig`](TransientError::InvalidConfig) for a non-finite or
    /// empty window, a step that is not positive, a step too small to advance
    /// `t_start`, or a window holding more than [`MAX_SAMPLES`] samples.
    pub fn new(t_start: f64, t_end: f64, step: f64) -> Result<Self> {
        if !t_start.is_finite() || !t_end.is_finite() {
            return Err(TransientError::invalid_config(format!(
                "time window [{}, {}) must be finite",
                t_start, t_end
            )));
        }
        if t_end <= t_start {
            return Err(TransientError::invalid_config(format!(
                "window end {} must be after start {}",
                t_end, t_start
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(TransientError::invalid_config(format!(
                "step must be positive and finite, got {}",
                step
            )));
        }

        if t_start + step <= t_start {
            return Err(TransientError::invalid_config(format!(
                "step {} is below the time resolution at {}",
                step, t_start
            )));
        }

        let estimate = ((t_end - t_start) / step).ceil();
        if !(estimate <= MAX_SAMPLES as f64) {
            return Err(TransientError::invalid_config(format!(
                "window [{}, {}) with step {} needs about {:e} samples, limit is {}",
                t_start, t_end, step, estimate, MAX_SAMPLES
            )));
        }

        let mut integrator = Self {
            t_start,
            t_end,
            step,
            samples: 0,
        };

        // The quotient can round either way; settle on the last index with t_i < t_end
        let mut n = (estimate as usize).max(1);
        if n > 1 && integrator.time_at(n - 1) >= t_end {
            n -= 1;
        } else if integrator.time_at(n) < t_end {
            n += 1;
        }
        if n > MAX_SAMPLES {
            return Err(TransientError::invalid_config(format!(
                "window needs {} samples, limit is {}",
                n, MAX_SAMPLES
            )));
        }
        integrator.samples = n;

        Ok(integrator)
    }

    /// Number of samples produced by [`integrate`](Self::integrate).
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    fn time_at(&self, i: usize) -> f64 {
        self.t_start + i as f64 * self.step
    }

    /// Integrate `field` from the initial state `y0`.
    ///
    /// # Errors
    /// Propagates errors from the vector field and reports
    /// [`NumericalOverflow`](TransientError::NumericalOverflow) as soon as a
    /// state component stops being finite.
    pub fn integrate<F: VectorField>(&self, field: &F, y0: StateVector) -> Result<Trajectory> {
        let n = self.sample_count();
        let h = self.step;

        let mut times = Vec::with_capacity(n);
        let mut states = Vec::with_capacity(n);
        times.push(self.t_start);
        states.push(y0);

        for i in 1..n {
            let t_prev = times[i - 1];
            let y_prev = states[i - 1];
            let y = y_prev + h * field.derivative(t_prev, &y_prev)?;

            let t = self.time_at(i);
            if !y.is_finite() {
                let value = if y.voltage.is_finite() { y.slope } else { y.voltage };
                return Err(TransientError::NumericalOverflow { time: t, value });
            }

            times.push(t);
            states.push(y);
        }

        debug!(samples = n, step = h, "euler integration finished");

        Ok(Trajectory {
            times,
            states,
            step: h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitParameters, RlcModel};
    use approx::assert_relative_eq;

    fn scenario_model() -> RlcModel {
        RlcModel::new(CircuitParameters::new(10.0, 10.0, 1.0, 1e-6).unwrap())
    }

    /// y' = k·y, used to check the update rule in isolation.
    struct Exponential(f64);

    impl VectorField for Exponential {
        fn derivative(&self, _t: f64, state: &StateVector) -> Result<StateVector> {
            Ok(StateVector::new(self.0 * state.voltage, 0.0))
        }
    }

    #[test]
    fn test_sample_count_and_spacing() {
        let integrator = EulerIntegrator::new(0.0, 4e-3, 2e-4).unwrap();
        let traj = integrator
            .integrate(&scenario_model(), StateVector::REST)
            .unwrap();

        assert_eq!(traj.len(), 20);
        for w in traj.times().windows(2) {
            assert!(w[1] > w[0]);
            assert_relative_eq!(w[1] - w[0], 2e-4, max_relative = 1e-9);
        }
        assert!(*traj.times().last().unwrap() < 4e-3);
    }

    #[test]
    fn test_half_open_window() {
        // 1.0 / 0.3 is not integral: 0, 0.3, 0.6, 0.9
        let integrator = EulerIntegrator::new(0.0, 1.0, 0.3).unwrap();
        assert_eq!(integrator.sample_count(), 4);

        // Window shorter than one step still yields the initial sample
        let integrator = EulerIntegrator::new(0.0, 0.1, 0.3).unwrap();
        assert_eq!(integrator.sample_count(), 1);
    }

    #[test]
    fn test_scenario_first_samples() {
        let integrator = EulerIntegrator::new(0.0, 4e-3, 2e-4).unwrap();
        let traj = integrator
            .integrate(&scenario_model(), StateVector::REST)
            .unwrap();
        let u = traj.voltages();

        assert_eq!(traj.times()[0], 0.0);
        assert_eq!(u[0], 0.0);
        // dU starts at zero, so the voltage only moves from the second step on
        assert_eq!(u[1], 0.0);
        assert_relative_eq!(u[2], 4e-7, max_relative = 1e-12);

        for value in &u {
            assert!(value.is_finite());
            assert!(*value >= 0.0 && *value < 2.0 * 10.0);
        }
    }

    #[test]
    fn test_update_rule() {
        let integrator = EulerIntegrator::new(0.0, 0.35, 0.1).unwrap();
        let traj = integrator
            .integrate(&Exponential(-2.0), StateVector::new(1.0, 0.0))
            .unwrap();
        let u = traj.voltages();
        assert_eq!(u.len(), 4);
        for (i, value) in u.iter().enumerate() {
            assert_relative_eq!(*value, 0.8f64.powi(i as i32), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_deterministic() {
        let integrator = EulerIntegrator::new(0.0, 4e-3, 2e-4).unwrap();
        let a = integrator.integrate(&scenario_model(), StateVector::REST).unwrap();
        let b = integrator.integrate(&scenario_model(), StateVector::REST).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_overflow_detected() {
        let integrator = EulerIntegrator::new(0.0, 1.0, 0.1).unwrap();
        let result = integrator.integrate(&Exponential(1e300), StateVector::new(1e300, 0.0));
        assert!(matches!(result, Err(TransientError::NumericalOverflow { .. })));
    }

    #[test]
    fn test_model_error_propagates() {
        let model = RlcModel::new(CircuitParameters::new_unchecked(10.0, 10.0, 0.0, 1e-6));
        let integrator = EulerIntegrator::new(0.0, 4e-3, 2e-4).unwrap();
        assert!(matches!(
            integrator.integrate(&model, StateVector::REST),
            Err(TransientError::DivisionByZero { param: "L" })
        ));
    }

    #[test]
    fn test_sample_count_matches_half_open_rule() {
        for &(t0, t1, h) in &[
            (0.0, 4e-3, 2e-4),
            (0.0, 1.0, 0.1),
            (0.0, 1.0, 0.3),
            (1.0, 2.0, 1.0 / 3.0),
            (-2e-3, 2e-3, 1e-4),
            (0.0, 0.35, 0.1),
        ] {
            let integrator = EulerIntegrator::new(t0, t1, h).unwrap();
            let n = integrator.sample_count();
            assert!(t0 + (n - 1) as f64 * h < t1);
            assert!(t0 + n as f64 * h >= t1);
        }
    }

    #[test]
    fn test_too_many_samples_rejected() {
        assert!(matches!(
            EulerIntegrator::new(0.0, 1.0, 1e-9),
            Err(TransientError::InvalidConfig { .. })
        ));
        // A step below the resolution of t_start never advances time
        assert!(matches!(
            EulerIntegrator::new(1.0, 1.0 + 1e-9, 1e-25),
            Err(TransientError::InvalidConfig { .. })
        ));
        let dense = EulerIntegrator::new(0.0, 1.0, 1e-6).unwrap();
        assert!((1_000_000..=1_000_001).contains(&dense.sample_count()));
        assert!(dense.sample_count() <= MAX_SAMPLES);
    }

    #[test]
    fn test_invalid_window() {
        assert!(EulerIntegrator::new(1.0, 0.0, 0.1).is_err());
        assert!(EulerIntegrator::new(0.0, 1.0, 0.0).is_err());
        assert!(EulerIntegrator::new(0.0, 1.0, -0.1).is_err());
        assert!(EulerIntegrator::new(0.0, f64::NAN, 0.1).is_err());
    }
}
