//! Logarithmic frequency sweeps over a circuit tree.
//!
//! A sweep samples the impedance spectrum between two frequencies given
//! in Hz, spacing the samples logarithmically and converting each to an
//! angular frequency before evaluation. The per-sample evaluations are
//! independent, so callers may parallelize them if they wish; this
//! module runs them in order.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::dsl::CircuitNode;
use crate::error::{Result, ZspecError};
use crate::impedance::evaluate;
use crate::DEFAULT_SWEEP_POINTS;

/// One sampled point of an impedance spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Angular frequency in rad/s
    pub omega: f64,
    /// Complex impedance at `omega`
    pub impedance: Complex64,
}

/// A logarithmically spaced frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    /// Starting frequency in Hz
    pub start_hz: f64,
    /// Ending frequency in Hz
    pub stop_hz: f64,
    /// Number of samples
    pub points: usize,
}

impl FrequencySweep {
    /// Create a sweep with the default number of points.
    pub fn new(start_hz: f64, stop_hz: f64) -> Self {
        Self {
            start_hz,
            stop_hz,
            points: DEFAULT_SWEEP_POINTS,
        }
    }

    /// Create a sweep with an explicit number of points.
    pub fn with_points(start_hz: f64, stop_hz: f64, points: usize) -> Self {
        Self {
            start_hz,
            stop_hz,
            points,
        }
    }

    /// The angular frequencies sampled by this sweep, in order.
    ///
    /// Samples are spaced logarithmically between the two endpoint
    /// frequencies; both endpoints must be finite and positive.
    pub fn frequencies(&self) -> Result<Vec<f64>> {
        for hz in [self.start_hz, self.stop_hz] {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(ZspecError::NonPositiveFrequency { omega: hz });
            }
        }

        let log_start = self.start_hz.log10();
        let log_stop = self.stop_hz.log10();

        let omegas = match self.points {
            0 => Vec::new(),
            1 => vec![2.0 * PI * self.start_hz],
            n => (0..n)
                .map(|i| {
                    let t = i as f64 / (n - 1) as f64;
                    let exponent = log_start + (log_stop - log_start) * t;
                    2.0 * PI * 10f64.powf(exponent)
                })
                .collect(),
        };

        Ok(omegas)
    }

    /// Evaluate the circuit at every sampled frequency.
    pub fn run(&self, node: &CircuitNode) -> Result<Vec<SweepPoint>> {
        self.frequencies()?
            .into_iter()
            .map(|omega| {
                evaluate(node, omega).map(|impedance| SweepPoint { omega, impedance })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_frequencies_span_endpoints() {
        let sweep = FrequencySweep::with_points(1.0, 1000.0, 4);
        let omegas = sweep.frequencies().unwrap();
        assert_eq!(omegas.len(), 4);
        assert_relative_eq!(omegas[0], 2.0 * PI, max_relative = 1e-12);
        assert_relative_eq!(omegas[3], 2000.0 * PI, max_relative = 1e-12);
        // Logarithmic spacing: constant ratio between neighbors
        assert_relative_eq!(omegas[1] / omegas[0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(omegas[2] / omegas[1], 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_default_point_count() {
        let sweep = FrequencySweep::new(0.1, 1e5);
        assert_eq!(sweep.frequencies().unwrap().len(), DEFAULT_SWEEP_POINTS);
    }

    #[test]
    fn test_sweep_evaluates_in_order() {
        let node = parse("R(10) + C(1)").unwrap();
        let sweep = FrequencySweep::with_points(1.0, 100.0, 10);
        let points = sweep.run(&node).unwrap();
        assert_eq!(points.len(), 10);
        for pair in points.windows(2) {
            assert!(pair[0].omega < pair[1].omega);
        }
        // Capacitive reactance shrinks with frequency
        assert!(points[0].impedance.im < points[9].impedance.im);
        for point in &points {
            assert_relative_eq!(point.impedance.re, 10.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_sweep_rejects_non_positive_endpoint() {
        let sweep = FrequencySweep::new(0.0, 100.0);
        assert!(matches!(
            sweep.frequencies(),
            Err(ZspecError::NonPositiveFrequency { .. })
        ));
    }

    #[test]
    fn test_single_point_sweep() {
        let node = parse("R(7)").unwrap();
        let points = FrequencySweep::with_points(50.0, 1000.0, 1).run(&node).unwrap();
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].omega, 100.0 * PI, max_relative = 1e-12);
    }
}
