//! Typed outcome of an equivalence check.

use std::fmt;

use indexmap::IndexMap;

/// One-to-one node correspondence from the first circuit onto the second,
/// in first-circuit node order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Correspondence {
    pairs: IndexMap<String, String>,
}

impl Correspondence {
    /// The right-hand node mapped from `left`, if present.
    pub fn get(&self, left: &str) -> Option<&str> {
        self.pairs.get(left).map(String::as_str)
    }

    /// Iterate `(left, right)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, r)| (l.as_str(), r.as_str()))
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the correspondence is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for Correspondence {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Correspondence {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (left, right)) in self.pairs.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{left} -> {right}")?;
        }
        Ok(())
    }
}

/// Why two circuits were found not equivalent. These are verdicts, not
/// errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inequivalence {
    /// The component graphs differ in node count; no bijection exists.
    NodeCountMismatch {
        /// Node count of the first circuit.
        left: usize,
        /// Node count of the second circuit.
        right: usize,
    },
    /// No sampled assignment reached the ground energy.
    NoIsomorphism,
    /// Ground-energy assignments exist, but each maps at least one pair of
    /// components with incompatible kinds.
    IncompatibleComponents,
}

impl fmt::Display for Inequivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inequivalence::NodeCountMismatch { left, right } => {
                write!(f, "graphs have different node counts ({left} vs {right})")
            }
            Inequivalence::NoIsomorphism => f.write_str("no isomorphism"),
            Inequivalence::IncompatibleComponents => {
                f.write_str("isomorphism exists but components incompatible")
            }
        }
    }
}

/// Result of an equivalence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Equivalent, carrying an accepted kind-preserving correspondence.
    Equivalent(Correspondence),
    /// Not equivalent, carrying the reason.
    NotEquivalent(Inequivalence),
}

impl Verdict {
    /// Whether the circuits were found equivalent.
    pub const fn is_equivalent(&self) -> bool {
        matches!(self, Verdict::Equivalent(_))
    }

    /// The accepted correspondence, when equivalent.
    pub const fn correspondence(&self) -> Option<&Correspondence> {
        match self {
            Verdict::Equivalent(mapping) => Some(mapping),
            Verdict::NotEquivalent(_) => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Equivalent(mapping) => {
                write!(f, "circuits are equivalent: {mapping}")
            }
            Verdict::NotEquivalent(reason) => {
                write!(f, "circuits are not equivalent: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> Correspondence {
        [("P1", "MP1"), ("N1", "MN1")]
            .into_iter()
            .map(|(l, r)| (l.to_owned(), r.to_owned()))
            .collect()
    }

    #[test]
    fn correspondence_keeps_insertion_order() {
        let mapping = mapping();
        assert_eq!(mapping.get("P1"), Some("MP1"));
        assert_eq!(mapping.get("X"), None);
        assert_eq!(
            mapping.iter().collect::<Vec<_>>(),
            [("P1", "MP1"), ("N1", "MN1")]
        );
        assert_eq!(mapping.to_string(), "P1 -> MP1, N1 -> MN1");
    }

    #[test]
    fn verdict_accessors_and_reasons() {
        let equivalent = Verdict::Equivalent(mapping());
        assert!(equivalent.is_equivalent());
        assert_eq!(equivalent.correspondence().unwrap().len(), 2);
        assert!(equivalent.to_string().starts_with("circuits are equivalent"));

        let mismatch = Verdict::NotEquivalent(Inequivalence::NodeCountMismatch {
            left: 9,
            right: 8,
        });
        assert!(!mismatch.is_equivalent());
        assert!(mismatch.correspondence().is_none());
        assert_eq!(
            mismatch.to_string(),
            "circuits are not equivalent: graphs have different node counts (9 vs 8)"
        );

        let incompatible = Verdict::NotEquivalent(Inequivalence::IncompatibleComponents);
        assert!(
            incompatible
                .to_string()
                .contains("components incompatible")
        );
    }
}
