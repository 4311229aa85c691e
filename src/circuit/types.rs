//! Core types for circuit representation.

use std::fmt;
use std::ops::{Add, Mul};

use crate::error::Result;

use super::validate::validate_parameters;

/// Physical parameters of a series RLC circuit driven by a DC source.
///
/// Values are in SI units: volts, ohms, henries, farads. The fields are
/// private so a constructed value cannot be altered afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParameters {
    emf: f64,
    resistance: f64,
    inductance: f64,
    capacitance: f64,
}

impl CircuitParameters {
    /// Create validated circuit parameters.
    ///
    /// # Errors
    /// Returns [`InvalidParameter`](crate::TransientError::InvalidParameter) for
    /// non-finite values or negative R, L, C, and
    /// [`DivisionByZero`](crate::TransientError::DivisionByZero) for zero L or C.
    pub fn new(emf: f64, resistance: f64, inductance: f64, capacitance: f64) -> Result<Self> {
        let params = Self::new_unchecked(emf, resistance, inductance, capacitance);
        validate_parameters(&params)?;
        Ok(params)
    }

    /// Create circuit parameters without validation.
    ///
    /// The vector field still refuses to divide by a zero L or C, but other
    /// ill-posed values (negative resistance, NaN) flow into the integration.
    pub fn new_unchecked(emf: f64, resistance: f64, inductance: f64, capacitance: f64) -> Self {
        Self {
            emf,
            resistance,
            inductance,
            capacitance,
        }
    }

    /// Source voltage E (V).
    pub fn emf(&self) -> f64 {
        self.emf
    }

    /// Resistance R (Ω).
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Inductance L (H).
    pub fn inductance(&self) -> f64 {
        self.inductance
    }

    /// Capacitance C (F).
    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }
}

impl fmt::Display for CircuitParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E = {} V, R = {} Ω, L = {} H, C = {:e} F",
            self.emf, self.resistance, self.inductance, self.capacitance
        )
    }
}

/// Instantaneous state of the circuit: capacitor voltage and its rate of change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateVector {
    /// Capacitor voltage U (V)
    pub voltage: f64,
    /// dU/dt (V/s)
    pub slope: f64,
}

impl StateVector {
    /// The rest state `(0, 0)` right before the switch closes.
    pub const REST: StateVector = StateVector {
        voltage: 0.0,
        slope: 0.0,
    };

    pub fn new(voltage: f64, slope: f64) -> Self {
        Self { voltage, slope }
    }

    /// Both components are finite.
    pub fn is_finite(&self) -> bool {
        self.voltage.is_finite() && self.slope.is_finite()
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, rhs: StateVector) -> StateVector {
        StateVector {
            voltage: self.voltage + rhs.voltage,
            slope: self.slope + rhs.slope,
        }
    }
}

impl Mul<StateVector> for f64 {
    type Output = StateVector;

    fn mul(self, rhs: StateVector) -> StateVector {
        StateVector {
            voltage: self * rhs.voltage,
            slope: self * rhs.slope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_accessors() {
        let p = CircuitParameters::new(10.0, 10.0, 1.0, 1e-6).unwrap();
        assert_eq!(p.emf(), 10.0);
        assert_eq!(p.resistance(), 10.0);
        assert_eq!(p.inductance(), 1.0);
        assert_eq!(p.capacitance(), 1e-6);
    }

    #[test]
    fn test_state_arithmetic() {
        let y = StateVector::new(1.0, 2.0);
        let dy = StateVector::new(0.5, -4.0);
        let next = y + 0.5 * dy;
        assert_eq!(next, StateVector::new(1.25, 0.0));
        assert!(next.is_finite());
        assert!(!StateVector::new(f64::NAN, 0.0).is_finite());
    }
}
