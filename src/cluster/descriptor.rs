//! Member descriptor
//!
//! The record a node advertises about itself during membership
//! exchange. Identity is the address alone: two descriptors for the same
//! address are the same member whatever their uuid, roles or attributes.
//!
//! Attributes distinguish "absent" from "present but empty". A
//! descriptor built from explicit details always carries a map, while
//! an address-only descriptor, or one decoded with no attributes on the
//! wire, carries none.

use super::address::Address;
use super::codec::DescriptorCodec;
use super::member::LiveMember;
use super::role::MemberRole;
use crate::error::CodecResult;
use crate::serialization::{AttributeValue, DataSerializable, ObjectDataInput, ObjectDataOutput};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Serializable description of one cluster member
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    address: Address,
    uuid: Option<String>,
    roles: BTreeSet<MemberRole>,
    attributes: Option<BTreeMap<String, AttributeValue>>,
}

impl MemberDescriptor {
    /// Placeholder descriptor carrying every known role and no attributes
    pub fn new(address: Address) -> Self {
        Self {
            address,
            uuid: None,
            roles: MemberRole::all(),
            attributes: None,
        }
    }

    /// Descriptor with explicit details. `attributes` is copied.
    pub fn with_details(
        address: Address,
        uuid: Option<String>,
        roles: BTreeSet<MemberRole>,
        attributes: &BTreeMap<String, AttributeValue>,
    ) -> Self {
        Self {
            address,
            uuid,
            roles,
            attributes: Some(attributes.clone()),
        }
    }

    /// Snapshot of a live member
    pub fn from_member<M: LiveMember + ?Sized>(member: &M) -> Self {
        Self::with_details(
            member.address().clone(),
            member.uuid(),
            member.roles(),
            &member.attributes_snapshot(),
        )
    }

    pub(crate) fn from_parts(
        address: Address,
        uuid: Option<String>,
        roles: BTreeSet<MemberRole>,
        attributes: Option<BTreeMap<String, AttributeValue>>,
    ) -> Self {
        Self {
            address,
            uuid,
            roles,
            attributes,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    pub fn roles(&self) -> &BTreeSet<MemberRole> {
        &self.roles
    }

    /// `None` when the descriptor carries no attribute map at all
    pub fn attributes(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        self.attributes.as_ref()
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(key))
    }

    pub fn has_role(&self, role: MemberRole) -> bool {
        self.roles.contains(&role)
    }
}

impl<M: LiveMember> From<&M> for MemberDescriptor {
    fn from(member: &M) -> Self {
        Self::from_member(member)
    }
}

impl PartialEq for MemberDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for MemberDescriptor {}

impl Hash for MemberDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberDescriptor{{address={}}}", self.address)
    }
}

impl DataSerializable for MemberDescriptor {
    fn write_data(&self, out: &mut dyn ObjectDataOutput) -> CodecResult<()> {
        DescriptorCodec::encode(self, out)
    }

    fn read_data(input: &mut dyn ObjectDataInput) -> CodecResult<Self> {
        DescriptorCodec::decode(input)
    }
}
