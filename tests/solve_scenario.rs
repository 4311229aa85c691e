//! End-to-end solves of the reference circuit E = 10 V, R = 10 Ω, C = 1 µF, L = 1 H.

use approx::assert_relative_eq;
use rlc_transient::solver::{count_peaks, MaximumLocation, DEFAULT_TOLERANCE, PEAK_SCAN_POINTS};
use rlc_transient::{solve, solve_circuit, CircuitParameters, SolveConfig, TransientError};

const E: f64 = 10.0;
const R: f64 = 10.0;
const C: f64 = 1e-6;
const L: f64 = 1.0;

#[test]
fn reference_circuit_regression() {
    let solution = solve_circuit(E, R, C, L).unwrap();

    assert_eq!(solution.times().len(), 20);
    assert_eq!(solution.times()[0], 0.0);
    assert_eq!(solution.voltages()[0], 0.0);

    assert_eq!(solution.maximum.location, MaximumLocation::Interior);
    assert!(solution.maximum.require_interior(0.0, 4e-3).is_ok());

    // Peak of the fitted quintic, pinned from a dense scan of the same fit
    assert!((solution.t_max() - 3.28096e-3).abs() < 10e-6);
    assert_relative_eq!(solution.u_max(), 2.35209e-5, max_relative = 1e-4);

    // Overshoot above the steady state E·C, far below 2E
    assert!(solution.u_max() > E * C);
    assert!(solution.u_max() < 2.0 * E);
}

#[test]
fn maximum_beats_every_sample_of_the_fit() {
    let solution = solve_circuit(E, R, C, L).unwrap();
    let poly = solution.polynomial();
    let steps = 4000;
    for i in 0..=steps {
        let t = 4e-3 * i as f64 / steps as f64;
        assert!(poly.eval(t) <= solution.u_max() + 1e-10);
    }
}

#[test]
fn fit_tracks_euler_samples() {
    let solution = solve_circuit(E, R, C, L).unwrap();
    // Samples span about 2.3e-5 V; the quintic stays within a few tenths of a percent
    assert!(solution.fit.max_abs < 1e-7);
    assert!(solution.fit.rms <= solution.fit.max_abs);
}

#[test]
fn reference_fit_has_a_single_peak() {
    let solution = solve_circuit(E, R, C, L).unwrap();
    assert!(solution.maximum.single_peak);
    assert_eq!(
        count_peaks(solution.polynomial(), 0.0, 4e-3, PEAK_SCAN_POINTS),
        1
    );
}

#[test]
fn repeated_solves_are_identical() {
    let a = solve_circuit(E, R, C, L).unwrap();
    let b = solve_circuit(E, R, C, L).unwrap();
    assert_eq!(a.times(), b.times());
    assert_eq!(a.voltages(), b.voltages());
    assert_eq!(a.polynomial(), b.polynomial());
    assert_eq!(a.maximum, b.maximum);
}

#[test]
fn independent_solves_in_parallel() {
    let handles: Vec<_> = (1..=4)
        .map(|k| std::thread::spawn(move || solve_circuit(E * k as f64, R, C, L)))
        .collect();
    let base = solve_circuit(E, R, C, L).unwrap();

    for (k, handle) in (1..=4).zip(handles) {
        let solution = handle.join().unwrap().unwrap();
        // The response is linear in E
        assert_relative_eq!(solution.u_max(), base.u_max() * k as f64, max_relative = 1e-9);
    }
}

#[test]
fn finer_tolerance_moves_peak_little() {
    let params = CircuitParameters::new(E, R, L, C).unwrap();
    let coarse = solve(&params, &SolveConfig::default()).unwrap();
    let fine = solve(&params, &SolveConfig::new().with_tolerance(1e-9)).unwrap();
    assert!((coarse.t_max() - fine.t_max()).abs() <= DEFAULT_TOLERANCE);
}

#[test]
fn zero_inductance_is_division_by_zero() {
    let err = solve_circuit(E, R, C, 0.0).unwrap_err();
    assert!(matches!(err, TransientError::DivisionByZero { param: "L" }));
    assert!(err.is_parameter_error());
}

#[test]
fn invalid_parameters_rejected_before_integration() {
    assert!(matches!(
        solve_circuit(E, -1.0, C, L),
        Err(TransientError::InvalidParameter { param: "R", .. })
    ));
    assert!(matches!(
        solve_circuit(E, R, -C, L),
        Err(TransientError::InvalidParameter { param: "C", .. })
    ));
    assert!(matches!(
        solve_circuit(f64::NAN, R, C, L),
        Err(TransientError::InvalidParameter { param: "E", .. })
    ));
}

#[test]
fn degree_above_sample_count_is_rejected() {
    let params = CircuitParameters::new(E, R, L, C).unwrap();
    let config = SolveConfig::new().with_window(0.0, 1e-3);
    // Five samples cannot carry a quintic
    assert!(matches!(
        solve(&params, &config),
        Err(TransientError::InvalidFitConfiguration {
            degree: 5,
            samples: 5,
            ..
        })
    ));
    assert!(solve(&params, &config.with_degree(3)).is_ok());
}
