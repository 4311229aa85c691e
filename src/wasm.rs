//! WASM bindings for the RLC transient solver.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSolution } from 'rlc_transient';
//!
//! await init();
//!
//! // E = 10 V, R = 10 Ω, C = 1 µF, L = 1 H
//! const solution = WasmSolution.solve(10, 10, 1e-6, 1);
//! console.log(solution.u_max, solution.t_max);
//!
//! // Chart the samples against the fitted polynomial
//! const t = solution.times();
//! const fitted = t.map((x) => solution.evaluate(x));
//! ```

use wasm_bindgen::prelude::*;

use crate::solver::{
    solve, MaximumLocation, Solution, SolveConfig, DEFAULT_DEGREE, DEFAULT_STEP, DEFAULT_TOLERANCE,
    DEFAULT_T_END, DEFAULT_T_START,
};
use crate::CircuitParameters;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of one solve, exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmSolution {
    solution: Solution,
}

#[wasm_bindgen]
impl WasmSolution {
    /// Solve with the default window, step, degree and search tolerance.
    ///
    /// # Arguments
    /// * `emf` - Source voltage in volts
    /// * `resistance` - Resistance in ohms
    /// * `capacitance` - Capacitance in farads
    /// * `inductance` - Inductance in henries
    #[wasm_bindgen]
    pub fn solve(
        emf: f64,
        resistance: f64,
        capacitance: f64,
        inductance: f64,
    ) -> Result<WasmSolution, JsValue> {
        Self::solve_with_config(
            emf,
            resistance,
            capacitance,
            inductance,
            DEFAULT_T_START,
            DEFAULT_T_END,
            DEFAULT_STEP,
            DEFAULT_DEGREE,
            DEFAULT_TOLERANCE,
        )
    }

    /// Solve with a custom window, step, polynomial degree and search tolerance.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn solve_with_config(
        emf: f64,
        resistance: f64,
        capacitance: f64,
        inductance: f64,
        t_start: f64,
        t_end: f64,
        step: f64,
        degree: usize,
        tolerance: f64,
    ) -> Result<WasmSolution, JsValue> {
        let params = CircuitParameters::new(emf, resistance, inductance, capacitance)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let config = SolveConfig::new()
            .with_window(t_start, t_end)
            .with_step(step)
            .with_degree(degree)
            .with_tolerance(tolerance);

        let solution = solve(&params, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmSolution { solution })
    }

    /// Time of the first maximum in seconds.
    #[wasm_bindgen(getter)]
    pub fn t_max(&self) -> f64 {
        self.solution.t_max()
    }

    /// Value of the first maximum in volts.
    #[wasm_bindgen(getter)]
    pub fn u_max(&self) -> f64 {
        self.solution.u_max()
    }

    /// Whether the maximum lies strictly inside the window.
    #[wasm_bindgen(getter)]
    pub fn interior(&self) -> bool {
        self.solution.maximum.location == MaximumLocation::Interior
    }

    /// Sample times as a Float64Array.
    #[wasm_bindgen]
    pub fn times(&self) -> Vec<f64> {
        self.solution.times().to_vec()
    }

    /// Sampled voltages as a Float64Array.
    #[wasm_bindgen]
    pub fn voltages(&self) -> Vec<f64> {
        self.solution.voltages()
    }

    /// Polynomial coefficients in unscaled time, lowest power first.
    #[wasm_bindgen]
    pub fn coefficients(&self) -> Vec<f64> {
        self.solution.polynomial().to_monomial()
    }

    /// Evaluate the fitted polynomial at `t` seconds.
    #[wasm_bindgen]
    pub fn evaluate(&self, t: f64) -> f64 {
        self.solution.polynomial().eval(t)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_reference_circuit() {
        let solution = WasmSolution::solve(10.0, 10.0, 1e-6, 1.0).unwrap();
        assert!(solution.interior());
        assert_eq!(solution.times().len(), 20);
        assert_eq!(solution.coefficients().len(), 6);
        assert!((solution.evaluate(solution.t_max()) - solution.u_max()).abs() < 1e-15);
    }

    #[test]
    fn test_tolerance_reaches_search() {
        let coarse = WasmSolution::solve(10.0, 10.0, 1e-6, 1.0).unwrap();
        let fine = WasmSolution::solve_with_config(
            10.0, 10.0, 1e-6, 1.0, 0.0, 4e-3, 2e-4, 5, 1e-8,
        )
        .unwrap();
        assert!(fine.interior());
        assert!((coarse.t_max() - fine.t_max()).abs() <= DEFAULT_TOLERANCE);
        assert_ne!(coarse.t_max(), fine.t_max());
    }
}
