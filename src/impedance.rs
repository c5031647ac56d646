//! Complex impedance evaluation of a circuit tree.
//!
//! Each element kind has a closed-form impedance at a given angular
//! frequency; series sections add, parallel sections combine through
//! the reciprocal sum of reciprocals. Evaluation walks the tree once
//! per frequency sample, so cost is linear in the number of elements.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::dsl::{CircuitNode, ElementKind};
use crate::error::{Result, ZspecError};

impl ElementKind {
    /// Impedance of this element at angular frequency `omega` (rad/s).
    ///
    /// The caller guarantees `omega > 0`; the capacitor, CPE, and
    /// Warburg formulas are undefined at zero or negative frequency.
    pub fn impedance(&self, omega: f64) -> Complex64 {
        match *self {
            Self::Resistor { resistance } => Complex64::new(resistance, 0.0),
            // Z = -i / (ω·C)
            Self::Capacitor { capacitance } => {
                Complex64::new(0.0, -1.0 / (capacitance * omega))
            }
            // Z = (Q·(iω)^n)^(-1), expanded trigonometrically so no
            // complex-power primitive is needed
            Self::Cpe { q, n } => {
                let magnitude = 1.0 / (q * omega.powf(n));
                let phase = -PI * n / 2.0;
                Complex64::new(magnitude * phase.cos(), magnitude * phase.sin())
            }
            // Z = (A/√ω)·(1 - i)
            Self::Warburg { coefficient } => {
                let magnitude = coefficient / omega.sqrt();
                Complex64::new(magnitude, -magnitude)
            }
        }
    }
}

/// Evaluate the impedance of a circuit tree at angular frequency
/// `omega` (rad/s).
///
/// The tree is only borrowed, so the same tree may be evaluated for
/// many frequencies, including concurrently from multiple threads.
/// A failed evaluation leaves the tree untouched; a later call with a
/// valid frequency succeeds.
pub fn evaluate(node: &CircuitNode, omega: f64) -> Result<Complex64> {
    if !omega.is_finite() || omega <= 0.0 {
        return Err(ZspecError::NonPositiveFrequency { omega });
    }
    combine(node, omega)
}

fn combine(node: &CircuitNode, omega: f64) -> Result<Complex64> {
    match node {
        CircuitNode::Element(kind) => Ok(kind.impedance(omega)),
        CircuitNode::Series(children) => {
            let mut total = Complex64::new(0.0, 0.0);
            for child in children {
                total += combine(child, omega)?;
            }
            Ok(total)
        }
        CircuitNode::Parallel(a, b) => {
            let za = combine(a, omega)?;
            let zb = combine(b, omega)?;
            parallel(za, zb)
        }
    }
}

/// Combine two branch impedances in parallel: `1 / (1/Za + 1/Zb)`.
///
/// A zero-impedance branch short-circuits the combination. Branch
/// admittances that cancel exactly leave no finite impedance and are
/// reported rather than returned as NaN or infinity.
fn parallel(za: Complex64, zb: Complex64) -> Result<Complex64> {
    if za.norm_sqr() == 0.0 || zb.norm_sqr() == 0.0 {
        return Ok(Complex64::new(0.0, 0.0));
    }

    let admittance = za.inv() + zb.inv();
    if admittance.norm_sqr() == 0.0 {
        return Err(ZspecError::SingularParallelCombination);
    }

    Ok(admittance.inv())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::dsl::parse;

    fn assert_complex_eq(actual: Complex64, expected: Complex64) {
        assert_relative_eq!(actual.re, expected.re, epsilon = 1e-9, max_relative = 1e-9);
        assert_relative_eq!(actual.im, expected.im, epsilon = 1e-9, max_relative = 1e-9);
    }

    #[test]
    fn test_resistor_is_purely_real() {
        let node = CircuitNode::Series(vec![CircuitNode::Element(ElementKind::Resistor {
            resistance: 10.0,
        })]);
        for omega in [0.01, 1.0, 1e6] {
            assert_eq!(evaluate(&node, omega).unwrap(), Complex64::new(10.0, 0.0));
        }
    }

    #[test]
    fn test_capacitor_formula() {
        let cap = ElementKind::Capacitor { capacitance: 1e-6 };
        let z = cap.impedance(1000.0);
        assert_complex_eq(z, Complex64::new(0.0, -1.0 / (1e-6 * 1000.0)));
    }

    #[test]
    fn test_warburg_formula() {
        let warburg = ElementKind::Warburg { coefficient: 50.0 };
        let z = warburg.impedance(4.0);
        // A/√ω = 25 at ω = 4
        assert_complex_eq(z, Complex64::new(25.0, -25.0));
    }

    #[test]
    fn test_cpe_with_unit_exponent_matches_capacitor() {
        let q = 2.5e-6;
        let cpe = ElementKind::Cpe { q, n: 1.0 };
        let cap = ElementKind::Capacitor { capacitance: q };
        for omega in [0.1, 10.0, 1e4] {
            assert_complex_eq(cpe.impedance(omega), cap.impedance(omega));
        }
    }

    #[test]
    fn test_cpe_with_zero_exponent_is_resistive() {
        let cpe = ElementKind::Cpe { q: 0.04, n: 0.0 };
        let z = cpe.impedance(123.0);
        assert_complex_eq(z, Complex64::new(25.0, 0.0));
    }

    #[test]
    fn test_parallel_of_identical_branches_halves_impedance() {
        let leaves = [
            ElementKind::Resistor { resistance: 42.0 },
            ElementKind::Capacitor { capacitance: 3.3e-6 },
            ElementKind::Cpe { q: 1e-5, n: 0.7 },
            ElementKind::Warburg { coefficient: 50.0 },
        ];
        for leaf in leaves {
            let branch = CircuitNode::Element(leaf);
            let pair = CircuitNode::Parallel(Box::new(branch.clone()), Box::new(branch.clone()));
            let omega = 250.0;
            let single = evaluate(&branch, omega).unwrap();
            let combined = evaluate(&pair, omega).unwrap();
            assert_complex_eq(combined, single / 2.0);
        }
    }

    #[test]
    fn test_randles_example_at_unit_frequency() {
        let node = parse("R(10) + para(R(100) + Zw(50), C(1))").unwrap();
        let z = evaluate(&node, 1.0).unwrap();

        let branch_a = Complex64::new(100.0 + 50.0, -50.0);
        let branch_b = Complex64::new(0.0, -1.0 / 1e-6);
        let expected = Complex64::new(10.0, 0.0) + (branch_a.inv() + branch_b.inv()).inv();
        assert_complex_eq(z, expected);
    }

    #[test]
    fn test_zero_frequency_is_rejected() {
        let node = parse("R(10)").unwrap();
        for omega in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                evaluate(&node, omega),
                Err(ZspecError::NonPositiveFrequency { .. })
            ));
        }
    }

    #[test]
    fn test_evaluation_recovers_after_failure() {
        let node = parse("R(10) + C(1)").unwrap();
        assert!(evaluate(&node, 0.0).is_err());
        assert!(evaluate(&node, 100.0).is_ok());
    }

    #[test]
    fn test_singular_parallel_combination() {
        // Admittances 1/10 and -1/10 cancel exactly
        let node = parse("para(R(10), R(-10))").unwrap();
        assert!(matches!(
            evaluate(&node, 1.0),
            Err(ZspecError::SingularParallelCombination)
        ));
    }

    #[test]
    fn test_zero_impedance_branch_short_circuits() {
        let node = parse("para(R(0), R(5))").unwrap();
        assert_eq!(evaluate(&node, 1.0).unwrap(), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_deeply_nested_parallel() {
        let node = parse("para(para(R(8), R(8)), para(R(8), R(8)))").unwrap();
        assert_complex_eq(evaluate(&node, 1.0).unwrap(), Complex64::new(2.0, 0.0));
    }
}
