//! # RLC Transient
//!
//! Transient response of a series RLC circuit after switch closure.
//!
//! This library provides:
//! - The state-space model of the circuit and validation of its parameters
//! - Fixed-step forward Euler integration of the capacitor voltage
//! - Least-squares polynomial approximation of the sampled voltage
//! - Golden-section search for the first maximum of the approximation
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit parameters, state vector and vector field
//! - [`solver`] - Integrator, polynomial fit, maximizer and the orchestrator
//! - [`report`] - Results summary and CSV sample table
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rlc --emf 10 --resistance 10 --capacitance-uf 1 --inductance 1 --save RLC_Results.txt
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use rlc_transient::solve_circuit;
//!
//! let solution = solve_circuit(10.0, 10.0, 1e-6, 1.0)?;
//! println!("Umax = {} V at Tmax = {} s", solution.u_max(), solution.t_max());
//! # Ok::<(), rlc_transient::TransientError>(())
//! ```
//!
//! ## Method
//!
//! The circuit obeys `L·U'' + R·U' + U/C = E` with `U(0) = U'(0) = 0`.
//!
//! 1. Reduce to the first-order system in `(U, U')` and step it with forward
//!    Euler over `[t0, t1)` at a fixed step `h`
//! 2. Fit a degree-5 polynomial to the samples by least squares (QR)
//! 3. Search the polynomial on `[t0, t1]` with the golden-section method
//!
//! Default window, step and degree are `[0, 4 ms]`, `0.2 ms` and `5`.

pub mod circuit;
pub mod error;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{CircuitParameters, StateVector};
pub use error::{Result, TransientError};
pub use solver::{solve, solve_circuit, Solution, SolveConfig, Solver};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSolution;

/// Farads per microfarad, for callers that take capacitance in µF.
pub const MICROFARAD: f64 = 1e-6;
