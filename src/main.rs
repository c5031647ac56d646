//! Zspec - EIS equivalent-circuit simulator
//!
//! Sweeps the complex impedance of an equivalent circuit over a
//! logarithmic frequency range and writes the spectrum as a text table.
//!
//! # Usage
//!
//! ```bash
//! zspec "R(10) + para(R(100) + Zw(50), C(1))" --start 0.1 --stop 100000 -o spectrum.dat
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use zspec::{
    dsl,
    error::{Result, ZspecError},
    CircuitNode, FrequencySweep, SweepPoint, DEFAULT_SWEEP_POINTS,
};

/// Equivalent-circuit impedance simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit description, e.g. "R(10) + para(R(100) + Zw(50), C(1))"
    #[arg(value_name = "CIRCUIT", required_unless_present = "file", conflicts_with = "file")]
    circuit: Option<String>,

    /// Read the circuit description from a file instead
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Starting frequency in Hz
    #[arg(short, long, default_value_t = 0.1)]
    start: f64,

    /// Ending frequency in Hz
    #[arg(short = 'e', long, default_value_t = 1e5)]
    stop: f64,

    /// Number of frequency samples
    #[arg(short, long, default_value_t = DEFAULT_SWEEP_POINTS)]
    points: usize,

    /// Write the spectrum to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Skip unknown elements with a warning instead of failing
    #[arg(long)]
    tolerant: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let circuit = load_circuit(&args)?;
    log::debug!("parsed circuit: {}", circuit);

    let sweep = FrequencySweep::with_points(args.start, args.stop, args.points);
    let points = sweep.run(&circuit)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| ZspecError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            let mut writer = BufWriter::new(file);
            write_spectrum(&mut writer, &points).map_err(|e| ZspecError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        None => {
            let stdout = io::stdout();
            write_spectrum(&mut stdout.lock(), &points).map_err(|e| ZspecError::FileWriteError {
                path: "<stdout>".to_string(),
                source: e,
            })?;
        }
    }

    Ok(())
}

fn load_circuit(args: &Args) -> Result<CircuitNode> {
    if let Some(path) = &args.file {
        return dsl::parse_file(path);
    }

    // clap guarantees the description is present when --file is absent
    let description = args.circuit.as_deref().unwrap_or_default();
    if args.tolerant {
        let (circuit, diagnostics) = dsl::parse_tolerant(description)?;
        for diagnostic in &diagnostics {
            eprintln!("warning: {}", diagnostic);
        }
        Ok(circuit)
    } else {
        dsl::parse(description)
    }
}

/// Write one line per sample: angular frequency, Z', Z".
fn write_spectrum(writer: &mut impl Write, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(writer, "# omega_rad_s\tZ_re_ohm\tZ_im_ohm")?;
    for point in points {
        writeln!(
            writer,
            "{:e}\t{:e}\t{:e}",
            point.omega, point.impedance.re, point.impedance.im
        )?;
    }
    Ok(())
}
