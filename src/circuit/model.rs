//! State-space form of the series RLC equation.

use crate::error::{Result, TransientError};

use super::{CircuitParameters, StateVector};

/// A first-order system `y' = f(t, y)` over [`StateVector`] states.
pub trait VectorField {
    /// Evaluate the derivative of `state` at time `t`.
    fn derivative(&self, t: f64, state: &StateVector) -> Result<StateVector>;
}

/// The series RLC circuit after switch closure.
///
/// ```text
/// dU/dt    = dU
/// d(dU)/dt = (E − R·dU − U/C) / L
/// ```
///
/// The field does not depend on time.
#[derive(Debug, Clone, Copy)]
pub struct RlcModel {
    params: CircuitParameters,
}

impl RlcModel {
    pub fn new(params: CircuitParameters) -> Self {
        Self { params }
    }
}

impl VectorField for RlcModel {
    fn derivative(&self, _t: f64, state: &StateVector) -> Result<StateVector> {
        let p = &self.params;
        if p.inductance() == 0.0 {
            return Err(TransientError::DivisionByZero { param: "L" });
        }
        if p.capacitance() == 0.0 {
            return Err(TransientError::DivisionByZero { param: "C" });
        }

        let d2u = (p.emf() - p.resistance() * state.slope - state.voltage / p.capacitance())
            / p.inductance();

        Ok(StateVector::new(state.slope, d2u))
    }
}
