//! Live cluster members
//!
//! A live member's attributes may change while the node runs.
//! Descriptors built from it copy what is there at the time of the call.

use super::address::Address;
use super::role::MemberRole;
use crate::serialization::AttributeValue;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Read access to a running member's identity
pub trait LiveMember {
    fn address(&self) -> &Address;
    fn uuid(&self) -> Option<String>;
    fn roles(&self) -> BTreeSet<MemberRole>;
    /// Copy of the member's attributes at call time
    fn attributes_snapshot(&self) -> BTreeMap<String, AttributeValue>;
}

/// The member running in this process
#[derive(Debug)]
pub struct LocalMember {
    address: Address,
    uuid: String,
    roles: BTreeSet<MemberRole>,
    attributes: RwLock<BTreeMap<String, AttributeValue>>,
}

impl LocalMember {
    /// Create a local member with a fresh random uuid and all roles
    pub fn new(address: Address) -> Self {
        Self::with_roles(address, MemberRole::all())
    }

    pub fn with_roles(address: Address, roles: BTreeSet<MemberRole>) -> Self {
        Self {
            address,
            uuid: Uuid::new_v4().to_string(),
            roles,
            attributes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Set an attribute, returning the previous value
    pub fn set_attribute(
        &self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.attributes.write().insert(key.into(), value.into())
    }

    pub fn remove_attribute(&self, key: &str) -> Option<AttributeValue> {
        self.attributes.write().remove(key)
    }

    pub fn attribute(&self, key: &str) -> Option<AttributeValue> {
        self.attributes.read().get(key).cloned()
    }
}

impl LiveMember for LocalMember {
    fn address(&self) -> &Address {
        &self.address
    }

    fn uuid(&self) -> Option<String> {
        Some(self.uuid.clone())
    }

    fn roles(&self) -> BTreeSet<MemberRole> {
        self.roles.clone()
    }

    fn attributes_snapshot(&self) -> BTreeMap<String, AttributeValue> {
        self.attributes.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_member_uuid_is_unique() {
        let a = LocalMember::new(Address::new("127.0.0.1", 5701));
        let b = LocalMember::new(Address::new("127.0.0.1", 5702));
        assert_ne!(a.uuid(), b.uuid());
        assert!(Uuid::parse_str(&a.uuid().unwrap()).is_ok());
    }

    #[test]
    fn test_attribute_updates() {
        let member = LocalMember::new(Address::new("127.0.0.1", 5701));
        assert_eq!(member.set_attribute("zone", "eu-1"), None);
        assert_eq!(
            member.set_attribute("zone", "eu-2"),
            Some(AttributeValue::from("eu-1"))
        );
        assert_eq!(member.attribute("zone"), Some(AttributeValue::from("eu-2")));
        assert!(member.remove_attribute("zone").is_some());
        assert!(member.attributes_snapshot().is_empty());
    }

    #[test]
    fn test_default_roles() {
        let member = LocalMember::new(Address::new("127.0.0.1", 5701));
        assert_eq!(member.roles(), MemberRole::all());
    }
}
