//! Circuit components and their terminal bindings.

use std::fmt;

/// Electrical role of a parsed circuit element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// p-channel MOSFET.
    PMos,
    /// n-channel MOSFET.
    NMos,
    /// Supply voltage source.
    VSource,
    /// Ground reference.
    Ground,
    /// Net tie: names one or more nets as an external connection point.
    Wire,
}

/// Kind tokens as they appear in netlist files.
const KIND_TOKENS: [(&str, ComponentKind); 5] = [
    ("pmos", ComponentKind::PMos),
    ("nmos", ComponentKind::NMos),
    ("vsource", ComponentKind::VSource),
    ("ground", ComponentKind::Ground),
    ("wire", ComponentKind::Wire),
];

impl ComponentKind {
    /// Parse a netlist kind token. Tokens are ASCII case-insensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        KIND_TOKENS
            .iter()
            .find(|(t, _)| token.eq_ignore_ascii_case(t))
            .map(|&(_, kind)| kind)
    }

    /// Canonical lower-case token for this kind.
    pub const fn token(self) -> &'static str {
        match self {
            ComponentKind::PMos => "pmos",
            ComponentKind::NMos => "nmos",
            ComponentKind::VSource => "vsource",
            ComponentKind::Ground => "ground",
            ComponentKind::Wire => "wire",
        }
    }

    /// Whether this kind is a transistor.
    pub const fn is_transistor(self) -> bool {
        matches!(self, ComponentKind::PMos | ComponentKind::NMos)
    }

    /// Number of terminal nets the netlist grammar admits for this kind.
    pub const fn arity(self) -> TerminalArity {
        match self {
            // drain, gate, source
            ComponentKind::PMos | ComponentKind::NMos => TerminalArity::Exactly(3),
            ComponentKind::VSource | ComponentKind::Ground => TerminalArity::Exactly(1),
            ComponentKind::Wire => TerminalArity::AtLeast(1),
        }
    }

    /// Pin role of the terminal at `position` for this kind.
    pub const fn role_at(self, position: usize) -> PinRole {
        if self.is_transistor() {
            match position {
                0 => PinRole::Drain,
                1 => PinRole::Gate,
                _ => PinRole::Source,
            }
        } else {
            PinRole::Tie
        }
    }

    /// Whether components of these two kinds may correspond in an
    /// equivalence. Currently plain kind equality; richer compatibility
    /// attributes would hang off this seam.
    pub fn compatible_with(self, other: Self) -> bool {
        self == other
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Terminal-count constraint a [`ComponentKind`] places on its declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalArity {
    /// Exactly this many terminal nets.
    Exactly(usize),
    /// This many terminal nets or more.
    AtLeast(usize),
}

impl TerminalArity {
    /// Whether a declaration with `count` terminal nets satisfies this arity.
    pub const fn admits(self, count: usize) -> bool {
        match self {
            TerminalArity::Exactly(n) => count == n,
            TerminalArity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for TerminalArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalArity::Exactly(n) => write!(f, "exactly {n}"),
            TerminalArity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Role a terminal plays on its component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinRole {
    /// Transistor drain.
    Drain,
    /// Transistor gate.
    Gate,
    /// Transistor source.
    Source,
    /// Undifferentiated connection (supplies, grounds, wires).
    Tie,
}

/// One terminal-to-net binding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Terminal {
    /// Role of the terminal on its component.
    pub role: PinRole,
    /// Name of the electrical net the terminal is bound to.
    pub net: String,
}

/// A single circuit element: identifier, kind, and its ordered terminal
/// bindings. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    terminals: Vec<Terminal>,
}

impl Component {
    /// Build a component, assigning pin roles positionally per `kind`.
    #[contracts::debug_requires(kind.arity().admits(nets.len()))]
    pub fn new(kind: ComponentKind, name: impl Into<String>, nets: Vec<String>) -> Self {
        let terminals = nets
            .into_iter()
            .enumerate()
            .map(|(position, net)| Terminal {
                role: kind.role_at(position),
                net,
            })
            .collect();
        Component {
            name: name.into(),
            kind,
            terminals,
        }
    }

    /// Component identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Component kind.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Ordered terminal bindings.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Net names bound by this component, in terminal order.
    pub fn nets(&self) -> impl Iterator<Item = &str> {
        self.terminals.iter().map(|t| t.net.as_str())
    }

    /// Whether the two components share at least one net.
    pub fn shares_net(&self, other: &Component) -> bool {
        self.nets().any(|net| other.nets().any(|o| o == net))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        for terminal in &self.terminals {
            write!(f, " {}", terminal.net)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tokens_round_trip() {
        for (token, kind) in KIND_TOKENS {
            assert_eq!(ComponentKind::from_token(token), Some(kind));
            assert_eq!(kind.token(), token);
        }
        assert_eq!(ComponentKind::from_token("PMOS"), Some(ComponentKind::PMos));
        assert_eq!(ComponentKind::from_token("resistor"), None);
    }

    #[test]
    fn transistor_roles_are_positional() {
        let t = Component::new(
            ComponentKind::NMos,
            "N1",
            vec!["out".into(), "a".into(), "gnd".into()],
        );
        let roles: Vec<PinRole> = t.terminals().iter().map(|t| t.role).collect();
        assert_eq!(roles, [PinRole::Drain, PinRole::Gate, PinRole::Source]);
    }

    #[test]
    fn shared_net_detection() {
        let p = Component::new(
            ComponentKind::PMos,
            "P1",
            vec!["out".into(), "a".into(), "vdd".into()],
        );
        let v = Component::new(ComponentKind::VSource, "V1", vec!["vdd".into()]);
        let g = Component::new(ComponentKind::Ground, "G1", vec!["gnd".into()]);
        assert!(p.shares_net(&v));
        assert!(!p.shares_net(&g));
    }

    #[test]
    fn compatibility_is_kind_equality() {
        assert!(ComponentKind::PMos.compatible_with(ComponentKind::PMos));
        assert!(!ComponentKind::PMos.compatible_with(ComponentKind::NMos));
        assert!(!ComponentKind::VSource.compatible_with(ComponentKind::Ground));
    }
}
