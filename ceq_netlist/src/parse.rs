//! Line-oriented netlist parsing.
//!
//! Grammar, one component per line:
//!
//! ```text
//! <kind> <identifier> <net> [<net> ...]
//! ```
//!
//! Tokens are whitespace-delimited. Blank lines are skipped and `#` starts a
//! comment, either on its own line or trailing a declaration.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::component::{Component, ComponentKind, TerminalArity};

/// Ordered, name-indexed list of parsed components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Netlist {
    components: Vec<Component>,
    by_name: HashMap<String, usize>,
}

impl Netlist {
    /// Parse netlist text. Pure and idempotent: the same text always yields
    /// the same component list, in declaration order.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut components: Vec<Component> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(kind_token) = tokens.next() else {
                continue;
            };
            let kind = ComponentKind::from_token(kind_token)
                .ok_or_else(|| ParseError::unknown_kind(line_no, kind_token, raw))?;
            let name = tokens
                .next()
                .ok_or_else(|| ParseError::missing_identifier(line_no, raw))?;
            let nets: Vec<String> = tokens.map(str::to_owned).collect();
            if nets.is_empty() {
                return Err(ParseError::missing_terminals(line_no, raw));
            }
            if !kind.arity().admits(nets.len()) {
                return Err(ParseError::TerminalArity {
                    line_no,
                    kind,
                    expected: kind.arity(),
                    found: nets.len(),
                    line: raw.to_owned(),
                });
            }
            if by_name.contains_key(name) {
                return Err(ParseError::DuplicateComponent {
                    line_no,
                    name: name.to_owned(),
                });
            }

            by_name.insert(name.to_owned(), components.len());
            components.push(Component::new(kind, name, nets));
        }

        debug!(components = components.len(), "parsed netlist");
        Ok(Netlist {
            components,
            by_name,
        })
    }

    /// Read and parse a netlist file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetlistError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| NetlistError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&text)?)
    }

    /// Components in declaration order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Look a component up by identifier.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.by_name.get(name).map(|&idx| &self.components[idx])
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the netlist has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate components in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }
}

impl<'a> IntoIterator for &'a Netlist {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// Fatal netlist syntax errors. Every arm names the offending line so the
/// failure can be reported without re-reading the input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The kind token is not in the recognized set.
    #[error("line {line_no}: unrecognized component kind `{token}` in `{line}`")]
    UnknownComponentKind {
        /// 1-based line number.
        line_no: usize,
        /// The unrecognized kind token.
        token: String,
        /// The offending line, verbatim.
        line: String,
    },
    /// A kind token with nothing after it.
    #[error("line {line_no}: component declaration is missing an identifier in `{line}`")]
    MissingIdentifier {
        /// 1-based line number.
        line_no: usize,
        /// The offending line, verbatim.
        line: String,
    },
    /// A declaration with no terminal nets at all.
    #[error("line {line_no}: component declaration has no terminal nets in `{line}`")]
    MissingTerminals {
        /// 1-based line number.
        line_no: usize,
        /// The offending line, verbatim.
        line: String,
    },
    /// The terminal count does not match what the kind requires.
    #[error(
        "line {line_no}: `{kind}` takes {expected} terminal net(s), found {found} in `{line}`"
    )]
    TerminalArity {
        /// 1-based line number.
        line_no: usize,
        /// The declared component kind.
        kind: ComponentKind,
        /// The arity the kind requires.
        expected: TerminalArity,
        /// The number of terminal nets found.
        found: usize,
        /// The offending line, verbatim.
        line: String,
    },
    /// The same identifier declared twice.
    #[error("line {line_no}: duplicate component identifier `{name}`")]
    DuplicateComponent {
        /// 1-based line number.
        line_no: usize,
        /// The repeated identifier.
        name: String,
    },
}

impl ParseError {
    /// Build an [`ParseError::UnknownComponentKind`].
    pub fn unknown_kind(line_no: usize, token: impl Into<String>, line: impl Into<String>) -> Self {
        ParseError::UnknownComponentKind {
            line_no,
            token: token.into(),
            line: line.into(),
        }
    }

    /// Build a [`ParseError::MissingIdentifier`].
    pub fn missing_identifier(line_no: usize, line: impl Into<String>) -> Self {
        ParseError::MissingIdentifier {
            line_no,
            line: line.into(),
        }
    }

    /// Build a [`ParseError::MissingTerminals`].
    pub fn missing_terminals(line_no: usize, line: impl Into<String>) -> Self {
        ParseError::MissingTerminals {
            line_no,
            line: line.into(),
        }
    }
}

/// Errors from loading a netlist file.
#[derive(Debug, Error)]
pub enum NetlistError {
    /// The file could not be read.
    #[error("failed to read netlist `{path}`: {source}")]
    Io {
        /// Path as given by the caller.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file content failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::component::PinRole;

    const NAND: &str = "\
# CMOS NAND gate
pmos P1 out a vdd
pmos P2 out b vdd
nmos N1 out a mid
nmos N2 mid b gnd

vsource V1 vdd
ground G1 gnd
wire INA a   # input tie
wire INB b
wire OUT out
";

    #[test]
    fn parses_components_in_order() {
        let netlist = Netlist::parse(NAND).unwrap();
        assert_eq!(netlist.len(), 9);
        let names: Vec<&str> = netlist.iter().map(Component::name).collect();
        assert_eq!(
            names,
            ["P1", "P2", "N1", "N2", "V1", "G1", "INA", "INB", "OUT"]
        );
        assert_eq!(netlist.get("N2").unwrap().kind(), ComponentKind::NMos);
        assert_eq!(netlist.get("V1").unwrap().kind(), ComponentKind::VSource);
        assert!(netlist.get("missing").is_none());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let netlist = Netlist::parse(NAND).unwrap();
        let ina = netlist.get("INA").unwrap();
        assert_eq!(ina.kind(), ComponentKind::Wire);
        assert_eq!(ina.nets().collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn transistor_terminals_keep_their_roles() {
        let netlist = Netlist::parse(NAND).unwrap();
        let n2 = netlist.get("N2").unwrap();
        let bound: Vec<(PinRole, &str)> = n2
            .terminals()
            .iter()
            .map(|t| (t.role, t.net.as_str()))
            .collect();
        assert_eq!(
            bound,
            [
                (PinRole::Drain, "mid"),
                (PinRole::Gate, "b"),
                (PinRole::Source, "gnd"),
            ]
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = Netlist::parse(NAND).unwrap();
        let second = Netlist::parse(NAND).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case::unknown_kind("resistor R1 a b", "unrecognized component kind `resistor`")]
    #[case::missing_identifier("pmos", "missing an identifier")]
    #[case::missing_terminals("wire W1", "no terminal nets")]
    #[case::mos_arity("nmos N1 out a", "takes exactly 3 terminal net(s), found 2")]
    #[case::ground_arity("ground G1 gnd gnd2", "takes exactly 1 terminal net(s), found 2")]
    fn rejects_malformed_lines(#[case] line: &str, #[case] expected: &str) {
        let err = Netlist::parse(line).unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains(expected),
            "unexpected message: {message}"
        );
        assert!(message.starts_with("line 1:"), "no line number: {message}");
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let text = "wire W1 a\nwire W1 b\n";
        let err = Netlist::parse(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateComponent {
                line_no: 2,
                name: "W1".into(),
            }
        );
    }

    #[test]
    fn error_reports_offending_line_number() {
        let text = "wire W1 a\n\n# comment\nnmos N1 out\n";
        let err = Netlist::parse(text).unwrap_err();
        assert!(matches!(err, ParseError::TerminalArity { line_no: 4, .. }));
    }

    #[test]
    fn from_path_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nand.txt");
        std::fs::write(&path, NAND).unwrap();

        let netlist = Netlist::from_path(&path).unwrap();
        assert_eq!(netlist.len(), 9);

        let missing = Netlist::from_path(dir.path().join("nope.txt"));
        assert!(matches!(missing, Err(NetlistError::Io { .. })));
    }
}
