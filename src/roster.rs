// src/roster.rs
//! Characters available for placement as tokens.
//!
//! Character and NPC records live outside the map core; a [`RosterProvider`]
//! hands over their names, and [`collect_roster`] turns them into the labelled
//! entries a token placer shows, e.g. `"PC: Aria"`.

use std::fmt;
use std::str::FromStr;

use crate::error::MapError;
use crate::map::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub kind: TokenKind,
    pub name: String,
}

impl RosterEntry {
    pub fn new(kind: TokenKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.name)
    }
}

impl FromStr for RosterEntry {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = s
            .split_once(": ")
            .ok_or_else(|| MapError::InvalidSettings(format!("malformed roster label '{}'", s)))?;
        if name.is_empty() {
            return Err(MapError::InvalidSettings(format!("roster label '{}' has no name", s)));
        }
        Ok(Self::new(kind.parse()?, name))
    }
}

/// A source of placeable names of one kind.
pub trait RosterProvider {
    fn kind(&self) -> TokenKind;
    fn names(&self) -> Vec<String>;
}

/// A fixed list of names.
#[derive(Debug, Clone)]
pub struct StaticRoster {
    kind: TokenKind,
    names: Vec<String>,
}

impl StaticRoster {
    pub fn new<I, S>(kind: TokenKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl RosterProvider for StaticRoster {
    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}

/// Entries from every provider, in provider order.
pub fn collect_roster(providers: &[&dyn RosterProvider]) -> Vec<RosterEntry> {
    providers
        .iter()
        .flat_map(|provider| {
            let kind = provider.kind();
            provider
                .names()
                .into_iter()
                .map(move |name| RosterEntry::new(kind, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let entry = RosterEntry::new(TokenKind::Npc, "Old Tom");
        assert_eq!(entry.to_string(), "NPC: Old Tom");
        assert_eq!("NPC: Old Tom".parse::<RosterEntry>().unwrap(), entry);
        // Only the first separator splits.
        let odd: RosterEntry = "PC: Sir: the Bold".parse().unwrap();
        assert_eq!(odd.name, "Sir: the Bold");
        assert!("Wizard".parse::<RosterEntry>().is_err());
        assert!("Dragon: Smaug".parse::<RosterEntry>().is_err());
    }

    #[test]
    fn test_collect_keeps_pcs_before_npcs() {
        let pcs = StaticRoster::new(TokenKind::Pc, ["Aria", "Bram"]);
        let npcs = StaticRoster::new(TokenKind::Npc, ["Innkeeper"]);
        let labels: Vec<String> = collect_roster(&[&pcs, &npcs])
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["PC: Aria", "PC: Bram", "NPC: Innkeeper"]);
    }
}
