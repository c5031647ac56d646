//! # Zspec
//!
//! An equivalent-circuit impedance simulator for electrochemical
//! impedance spectroscopy (EIS).
//!
//! This library provides:
//! - A small DSL for describing equivalent circuits built from
//!   resistors, capacitors, constant phase elements, and Warburg
//!   elements, combined in series and parallel
//! - Complex impedance evaluation of a parsed circuit at any angular
//!   frequency
//! - Logarithmic frequency sweeps producing a full impedance spectrum
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Lexer, parser, and tree types for the circuit language
//! - [`impedance`] - Per-element formulas and tree evaluation
//! - [`sweep`] - Frequency sweeps over a circuit tree
//!
//! ## Usage
//!
//! ```
//! use zspec::{dsl, impedance};
//!
//! let circuit = dsl::parse("R(10) + para(R(100) + Zw(50), C(1))")?;
//! let z = impedance::evaluate(&circuit, 100.0)?;
//! println!("Z' = {} Ω, Z\" = {} Ω", z.re, z.im);
//! # Ok::<(), zspec::ZspecError>(())
//! ```
//!
//! A parsed circuit is an immutable tree. Evaluation borrows it, so one
//! tree serves an entire sweep and may be shared across threads.
//!
//! ## Circuit language
//!
//! Elements take their parameters in parentheses, `+` combines in
//! series, and `para(a, b)` combines two branches in parallel:
//!
//! ```text
//! R(10) + para(R(100) + Zw(50), C(1))
//! ```
//!
//! is a Randles cell with a 10 Ω electrolyte resistance, a 100 Ω
//! charge-transfer resistance with a Warburg coefficient of 50 Ω·s^(-1/2),
//! and a 1 µF double-layer capacitance. Capacitance is written in
//! microfarads; all other parameters are in base SI units.

pub mod dsl;
pub mod error;
pub mod impedance;
pub mod sweep;

// Re-export main types for convenience
pub use dsl::{CircuitNode, ElementKind};
pub use error::{Result, ZspecError};
pub use impedance::evaluate;
pub use sweep::{FrequencySweep, SweepPoint};

/// Default number of samples in a frequency sweep
pub const DEFAULT_SWEEP_POINTS: usize = 100;
