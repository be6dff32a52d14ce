//! Member role catalog
//!
//! Roles are identified on the wire by stable ids, never by their
//! position in the enum. Adding a role means assigning it a fresh id and
//! bumping [`ROLE_CATALOG_VERSION`]; existing ids must not change.

use crate::error::CodecError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Version of the id table below
pub const ROLE_CATALOG_VERSION: u32 = 1;

/// A capability a cluster member performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberRole {
    /// Owns data partitions
    Storage,
    /// Runs actors and tasks
    Compute,
    /// Accepts external client connections
    Gateway,
    /// Takes part in cluster coordination
    Coordinator,
}

impl MemberRole {
    /// Every known role, in declaration order
    pub const ALL: [MemberRole; 4] = [
        MemberRole::Storage,
        MemberRole::Compute,
        MemberRole::Gateway,
        MemberRole::Coordinator,
    ];

    /// Stable wire id
    pub fn id(self) -> i32 {
        match self {
            MemberRole::Storage => 1,
            MemberRole::Compute => 2,
            MemberRole::Gateway => 4,
            MemberRole::Coordinator => 8,
        }
    }

    /// Look up a role by wire id
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(MemberRole::Storage),
            2 => Some(MemberRole::Compute),
            4 => Some(MemberRole::Gateway),
            8 => Some(MemberRole::Coordinator),
            _ => None,
        }
    }

    /// The full role set
    pub fn all() -> BTreeSet<MemberRole> {
        Self::ALL.iter().copied().collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            MemberRole::Storage => "storage",
            MemberRole::Compute => "compute",
            MemberRole::Gateway => "gateway",
            MemberRole::Coordinator => "coordinator",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MemberRole {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::Config(format!("unknown member role '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_lookup_roundtrip() {
        for role in MemberRole::ALL {
            assert_eq!(MemberRole::from_id(role.id()), Some(role));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: BTreeSet<i32> = MemberRole::ALL.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), MemberRole::ALL.len());
    }

    #[test]
    fn test_unknown_ids() {
        assert_eq!(MemberRole::from_id(0), None);
        assert_eq!(MemberRole::from_id(3), None);
        assert_eq!(MemberRole::from_id(-1), None);
    }

    #[test]
    fn test_all_roles() {
        let all = MemberRole::all();
        assert_eq!(all.len(), 4);
        assert!(all.contains(&MemberRole::Gateway));
    }

    #[test]
    fn test_names() {
        assert_eq!(MemberRole::Coordinator.to_string(), "coordinator");
        assert_eq!("STORAGE".parse::<MemberRole>().unwrap(), MemberRole::Storage);
        assert!("janitor".parse::<MemberRole>().is_err());
    }
}
