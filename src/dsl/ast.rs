//! Tree types for parsed equivalent circuits.

use std::fmt;

/// A single circuit element with its parameters.
///
/// Parameters are stored in base SI units. Note that the DSL takes
/// capacitance in microfarads, so [`ElementKind::capacitor_from_microfarads`]
/// applies the 1e-6 scaling at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Resistor with resistance in ohms
    Resistor { resistance: f64 },
    /// Capacitor with capacitance in farads
    Capacitor { capacitance: f64 },
    /// Constant phase element with magnitude Q and phase exponent n
    Cpe { q: f64, n: f64 },
    /// Warburg element with Warburg coefficient in ohm·s^(-1/2)
    Warburg { coefficient: f64 },
}

impl ElementKind {
    /// Create a capacitor from a capacitance given in microfarads,
    /// as it appears in the DSL.
    pub fn capacitor_from_microfarads(microfarads: f64) -> Self {
        Self::Capacitor {
            capacitance: microfarads * 1e-6,
        }
    }

}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resistor { resistance } => write!(f, "R({})", resistance),
            // Printed back in microfarads, matching the DSL input unit
            Self::Capacitor { capacitance } => write!(f, "C({})", capacitance * 1e6),
            Self::Cpe { q, n } => write!(f, "CPE({}, {})", q, n),
            Self::Warburg { coefficient } => write!(f, "Zw({})", coefficient),
        }
    }
}

/// A node in the parsed circuit tree.
///
/// The tree is immutable once built by the parser; evaluation only
/// borrows it, so a tree can be shared across threads and reused for
/// any number of frequency samples.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitNode {
    /// A single element
    Element(ElementKind),
    /// One or more sub-circuits in series. Order is preserved for
    /// round-trip fidelity even though series addition commutes.
    Series(Vec<CircuitNode>),
    /// Exactly two branches in parallel. Each branch is an arbitrary
    /// sub-tree, so parallel sections nest freely.
    Parallel(Box<CircuitNode>, Box<CircuitNode>),
}

impl CircuitNode {
    /// Combine a sequence of terms into a node: a single term stays
    /// itself, two or more become a [`CircuitNode::Series`].
    pub fn from_terms(mut terms: Vec<CircuitNode>) -> Option<Self> {
        match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => Some(Self::Series(terms)),
        }
    }

    /// Number of elements in the tree.
    pub fn element_count(&self) -> usize {
        match self {
            Self::Element(_) => 1,
            Self::Series(children) => children.iter().map(Self::element_count).sum(),
            Self::Parallel(a, b) => a.element_count() + b.element_count(),
        }
    }
}

impl fmt::Display for CircuitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(kind) => write!(f, "{}", kind),
            Self::Series(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Self::Parallel(a, b) => write!(f, "para({}, {})", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microfarad_scaling() {
        let cap = ElementKind::capacitor_from_microfarads(1.0);
        assert_eq!(cap, ElementKind::Capacitor { capacitance: 1e-6 });
    }

    #[test]
    fn test_from_terms_degenerates_single() {
        let term = CircuitNode::Element(ElementKind::Resistor { resistance: 10.0 });
        let node = CircuitNode::from_terms(vec![term.clone()]).unwrap();
        assert_eq!(node, term);
        assert!(CircuitNode::from_terms(vec![]).is_none());
    }

    #[test]
    fn test_display_round_trip_syntax() {
        let node = CircuitNode::Series(vec![
            CircuitNode::Element(ElementKind::Resistor { resistance: 10.0 }),
            CircuitNode::Parallel(
                Box::new(CircuitNode::Element(ElementKind::Warburg { coefficient: 50.0 })),
                Box::new(CircuitNode::Element(ElementKind::capacitor_from_microfarads(1.0))),
            ),
        ]);
        assert_eq!(node.to_string(), "R(10) + para(Zw(50), C(1))");
        assert_eq!(node.element_count(), 3);
    }
}
