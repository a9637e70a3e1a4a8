//! Connection validation.
//!
//! Each hole names, through its declarations, which counterpart identities
//! it accepts. A wire is valid if any of the four declaration pairs between
//! its two holes matches in either direction. No other wire and no netlist
//! is consulted.

use super::{Connector, Declaration};

/// How empty ids are treated when matching declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// A pair matches only when a non-empty target names the other side's
    /// own id.
    #[default]
    Strict,
    /// Like `Strict`, and a declaration with an own id but no target also
    /// accepts any counterpart that declares an own id.
    Permissive,
}

impl MatchPolicy {
    /// Parse a policy name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "permissive" | "loose" => Some(Self::Permissive),
            _ => None,
        }
    }
}

/// Decide whether a wire between `a` and `b` is electrically valid.
///
/// Symmetric: `is_valid_connection(a, b, p) == is_valid_connection(b, a, p)`.
pub fn is_valid_connection(a: &Connector, b: &Connector, policy: MatchPolicy) -> bool {
    a.active_declarations().any(|dx| {
        b.active_declarations()
            .any(|dy| declarations_match(dx, dy, policy))
    })
}

fn declarations_match(dx: &Declaration, dy: &Declaration, policy: MatchPolicy) -> bool {
    if dx.own_id.is_empty() && dy.own_id.is_empty() {
        return false;
    }

    let forward = !dx.target_id.is_empty() && dx.target_id == dy.own_id;
    let reverse = !dy.target_id.is_empty() && dy.target_id == dx.own_id;
    if forward || reverse {
        return true;
    }

    match policy {
        MatchPolicy::Strict => false,
        MatchPolicy::Permissive => {
            let both_named = !dx.own_id.is_empty() && !dy.own_id.is_empty();
            both_named && (dx.target_id.is_empty() || dy.target_id.is_empty())
        }
    }
}
