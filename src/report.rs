//! Plain-text and CSV output of a [`Solution`].
//!
//! The results file holds the first maximum; the CSV table holds the sampled
//! voltage next to the fitted polynomial, which is what a chart of the
//! transient is drawn from.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Result, TransientError};
use crate::solver::Solution;

/// Default file name for [`save_results`].
pub const RESULTS_FILE: &str = "RLC_Results.txt";

/// The results summary, one fact per line.
pub fn results_text(solution: &Solution) -> String {
    format!(
        "RLC circuit transient results\n\
         First maximum voltage (Umax): {:.10} V\n\
         Time of first maximum (Tmax): {:.10} s\n",
        solution.u_max(),
        solution.t_max()
    )
}

/// Write the `t,U,p` table for every sample.
pub fn write_csv<W: Write>(writer: &mut W, solution: &Solution) -> io::Result<()> {
    writeln!(writer, "t,U,p")?;
    let poly = solution.polynomial();
    for (t, state) in solution.trajectory.iter() {
        writeln!(writer, "{:e},{:e},{:e}", t, state.voltage, poly.eval(t))?;
    }
    Ok(())
}

/// Write [`results_text`] to `path`, replacing any existing file.
pub fn save_results(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, results_text(solution)).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), "results saved");
    Ok(())
}

/// Write the CSV table to `path`, replacing any existing file.
pub fn save_csv(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, solution).map_err(|e| io_error(path, e))?;
    writer.flush().map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), "samples saved");
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> TransientError {
    TransientError::Io {
        path: path.display().to_string(),
        source,
    }
}
