//! Member descriptor wire codec
//!
//! Layout, in order:
//!
//! ```text
//! address          embedded Address encoding
//! has_uuid         bool
//! uuid             utf            (only when has_uuid)
//! role_count       i32
//! role_id * n      i32
//! attribute_count  i32            (0 when the map is absent)
//! (key utf, value object) * n
//! ```
//!
//! A zero or negative attribute count decodes to an absent map, so an
//! explicitly empty map does not survive a round trip as "present".

use super::address::Address;
use super::descriptor::MemberDescriptor;
use super::role::MemberRole;
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::serialization::{
    BufferObjectDataInput, BufferObjectDataOutput, DataSerializable, ObjectDataInput,
    ObjectDataOutput,
};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Upper bound on list capacity reserved from a wire count
const PREALLOCATE_MEMBERS: usize = 64;

/// Encodes and decodes [`MemberDescriptor`]s
pub struct DescriptorCodec;

impl DescriptorCodec {
    /// Write a descriptor onto the sink
    pub fn encode(descriptor: &MemberDescriptor, out: &mut dyn ObjectDataOutput) -> CodecResult<()> {
        descriptor.address().write_data(out)?;

        match descriptor.uuid() {
            Some(uuid) => {
                out.write_bool(true)?;
                out.write_utf(uuid)?;
            }
            None => out.write_bool(false)?,
        }

        let roles = descriptor.roles();
        out.write_len(roles.len())?;
        for role in roles {
            out.write_int(role.id())?;
        }

        match descriptor.attributes() {
            Some(attributes) => {
                out.write_len(attributes.len())?;
                for (key, value) in attributes {
                    out.write_utf(key)?;
                    out.write_object(value)?;
                }
            }
            None => out.write_int(0)?,
        }

        trace!(
            address = %descriptor.address(),
            roles = roles.len(),
            attributes = descriptor.attributes().map_or(0, |a| a.len()),
            "encoded member descriptor"
        );
        Ok(())
    }

    /// Read a descriptor from the source
    pub fn decode(input: &mut dyn ObjectDataInput) -> CodecResult<MemberDescriptor> {
        let address = Address::read_data(input)?;

        let uuid = if input.read_bool()? {
            Some(input.read_utf()?)
        } else {
            None
        };

        let max_roles = input.config().max_roles;
        let role_count = Self::read_count(input, "role set", max_roles)?;
        let mut roles = BTreeSet::new();
        for _ in 0..role_count {
            let id = input.read_int()?;
            let role = MemberRole::from_id(id).ok_or_else(|| {
                debug!(address = %address, role_id = id, "unknown role id in member descriptor");
                CodecError::UnknownRole(id)
            })?;
            roles.insert(role);
        }

        let max_attributes = input.config().max_attributes;
        let attribute_count = Self::read_count(input, "attribute map", max_attributes)?;
        let attributes = if attribute_count > 0 {
            let mut attributes = BTreeMap::new();
            for _ in 0..attribute_count {
                let key = input.read_utf()?;
                let value = input.read_object()?;
                trace!(key = %key, kind = value.type_name(), "decoded attribute");
                attributes.insert(key, value);
            }
            Some(attributes)
        } else {
            None
        };

        trace!(
            address = %address,
            roles = roles.len(),
            attributes = attribute_count,
            "decoded member descriptor"
        );
        Ok(MemberDescriptor::from_parts(address, uuid, roles, attributes))
    }

    /// Encode a single descriptor into a fresh buffer
    pub fn to_bytes(descriptor: &MemberDescriptor) -> CodecResult<Bytes> {
        let mut out = BufferObjectDataOutput::with_capacity(64);
        Self::encode(descriptor, &mut out)?;
        Ok(out.into_bytes())
    }

    /// Decode a buffer holding exactly one descriptor, with default limits
    pub fn from_bytes(bytes: impl Into<Bytes>) -> CodecResult<MemberDescriptor> {
        Self::from_bytes_with_config(bytes, CodecConfig::default())
    }

    /// Decode a buffer holding exactly one descriptor
    pub fn from_bytes_with_config(
        bytes: impl Into<Bytes>,
        config: CodecConfig,
    ) -> CodecResult<MemberDescriptor> {
        let mut input = BufferObjectDataInput::with_config(bytes, config);
        let descriptor = Self::decode(&mut input)?;
        match input.remaining() {
            0 => Ok(descriptor),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }

    /// Write a member list: count, then each descriptor
    pub fn encode_all(
        descriptors: &[MemberDescriptor],
        out: &mut dyn ObjectDataOutput,
    ) -> CodecResult<()> {
        out.write_len(descriptors.len())?;
        for descriptor in descriptors {
            Self::encode(descriptor, out)?;
        }
        Ok(())
    }

    /// Read a member list written by [`DescriptorCodec::encode_all`]
    pub fn decode_all(input: &mut dyn ObjectDataInput) -> CodecResult<Vec<MemberDescriptor>> {
        let max_members = input.config().max_members;
        let count = Self::read_count(input, "member list", max_members)?;
        let mut descriptors = Vec::with_capacity(count.min(PREALLOCATE_MEMBERS));
        for _ in 0..count {
            descriptors.push(Self::decode(input)?);
        }
        Ok(descriptors)
    }

    /// Collection counts below zero read as empty
    fn read_count(
        input: &mut dyn ObjectDataInput,
        what: &'static str,
        limit: usize,
    ) -> CodecResult<usize> {
        let count = input.read_int()?;
        if count <= 0 {
            return Ok(0);
        }
        let count = count as usize;
        if count > limit {
            debug!(what, count, limit, "member descriptor count over limit");
            return Err(CodecError::LimitExceeded { what, len: count, limit });
        }
        Ok(count)
    }
}
