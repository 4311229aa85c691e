//! Series RLC circuit description and its state-space model.
//!
//! This module holds the physical parameters of the circuit, their
//! validation, and the first-order vector field that the integrator
//! advances. The governing equation
//!
//! ```text
//! L·U'' + R·U' + U/C = E
//! ```
//!
//! is reduced to the state `(U, dU/dt)`.

mod model;
mod types;
mod validate;

pub use model::{RlcModel, VectorField};
pub use types::{CircuitParameters, StateVector};
pub use validate::validate_parameters;
