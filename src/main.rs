//! rlc - RLC circuit transient solver
//!
//! Integrates the capacitor voltage of a series RLC circuit, approximates it
//! with a polynomial and reports the first maximum.
//!
//! # Usage
//!
//! ```bash
//! rlc --emf 10 --resistance 10 --capacitance-uf 1 --inductance 1 --csv - > samples.csv
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use rlc_transient::{
    error::Result,
    report,
    solver::{
        MaximumLocation, DEFAULT_DEGREE, DEFAULT_STEP, DEFAULT_TOLERANCE, DEFAULT_T_END,
        DEFAULT_T_START,
    },
    CircuitParameters, Solution, SolveConfig, Solver, TransientError, MICROFARAD,
};
use tracing_subscriber::EnvFilter;

/// Series RLC circuit transient solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source voltage E in volts
    #[arg(short = 'E', long, default_value_t = 10.0)]
    emf: f64,

    /// Resistance R in ohms
    #[arg(short = 'R', long, default_value_t = 10.0)]
    resistance: f64,

    /// Capacitance C in microfarads
    #[arg(short = 'C', long = "capacitance-uf", default_value_t = 1.0)]
    capacitance_uf: f64,

    /// Inductance L in henries
    #[arg(short = 'L', long, default_value_t = 1.0)]
    inductance: f64,

    /// Start of the time window in seconds
    #[arg(long, default_value_t = DEFAULT_T_START, allow_negative_numbers = true)]
    t_start: f64,

    /// End of the time window in seconds
    #[arg(long, default_value_t = DEFAULT_T_END)]
    t_end: f64,

    /// Fixed integration step in seconds
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: f64,

    /// Degree of the approximating polynomial
    #[arg(short, long, default_value_t = DEFAULT_DEGREE)]
    degree: usize,

    /// Tolerance of the maximum search in seconds
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Write the results summary to this file
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Write the t,U,p sample table to this file ('-' for stdout)
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Log every pipeline stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Capacitance comes in µF
    let params = CircuitParameters::new(
        args.emf,
        args.resistance,
        args.inductance,
        args.capacitance_uf * MICROFARAD,
    )?;

    let config = SolveConfig::new()
        .with_window(args.t_start, args.t_end)
        .with_step(args.step)
        .with_degree(args.degree)
        .with_tolerance(args.tolerance);

    let solution = Solver::with_config(config).solve(&params)?;

    let to_stdout = args.csv.as_deref().is_some_and(|p| p.as_os_str() == "-");
    if to_stdout {
        report::write_csv(&mut io::stdout().lock(), &solution).map_err(|source| {
            TransientError::Io {
                path: "<stdout>".to_string(),
                source,
            }
        })?;
    } else {
        print_solution(&params, &solution);
        if let Some(path) = &args.csv {
            report::save_csv(path, &solution)?;
        }
    }

    if let Some(path) = &args.save {
        report::save_results(path, &solution)?;
    }

    Ok(())
}

fn print_solution(params: &CircuitParameters, solution: &Solution) {
    println!("Circuit: {}", params);
    println!();
    println!("1. Euler solution U(t):");
    for (t, u) in solution.times().iter().zip(solution.voltages()) {
        println!("   t = {:.6e} s   U = {:.10e} V", t, u);
    }
    println!();
    println!(
        "2. Polynomial approximation (degree {}):",
        solution.polynomial().degree()
    );
    println!("   p(x) = {}", solution.polynomial());
    println!(
        "   residuals: rms = {:.3e} V, max = {:.3e} V",
        solution.fit.rms, solution.fit.max_abs
    );
    println!();
    println!("3. First maximum (golden-section search):");
    for line in report::results_text(solution).lines().skip(1) {
        println!("   {}", line);
    }
    if solution.maximum.location == MaximumLocation::Boundary {
        println!("   note: no interior maximum, the larger boundary value is shown");
    }
    if !solution.maximum.single_peak {
        println!("   note: the polynomial has several peaks in the window");
    }
}
