//! Circuit parameter validation.

use crate::error::{Result, TransientError};

use super::CircuitParameters;

/// Validate circuit parameters before integration.
///
/// Checks:
/// - E, R, L, C are finite
/// - R, L, C are not negative
/// - L and C are not zero (both appear as divisors in the model)
pub fn validate_parameters(params: &CircuitParameters) -> Result<()> {
    let checks = [
        ("E", params.emf()),
        ("R", params.resistance()),
        ("L", params.inductance()),
        ("C", params.capacitance()),
    ];

    for (name, value) in checks {
        if !value.is_finite() {
            return Err(TransientError::invalid_parameter(
                name,
                value,
                "must be a finite number",
            ));
        }
    }

    for &(name, value) in &checks[1..] {
        if value < 0.0 {
            return Err(TransientError::invalid_parameter(
                name,
                value,
                "must not be negative",
            ));
        }
    }

    if params.inductance() == 0.0 {
        return Err(TransientError::DivisionByZero { param: "L" });
    }
    if params.capacitance() == 0.0 {
        return Err(TransientError::DivisionByZero { param: "C" });
    }

    Ok(())
}
