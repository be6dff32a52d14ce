//! # ream-member: cluster member descriptors
//!
//! The record a REAM node advertises to its peers during membership
//! exchange, and the binary wire format it travels in.
//!
//! ```
//! use ream_member::{Address, DescriptorCodec, MemberDescriptor, MemberRole};
//!
//! let descriptor = MemberDescriptor::new(Address::new("127.0.0.1", 5701));
//! let bytes = DescriptorCodec::to_bytes(&descriptor).unwrap();
//! let decoded = DescriptorCodec::from_bytes(bytes).unwrap();
//!
//! assert_eq!(decoded, descriptor);
//! assert_eq!(decoded.roles(), &MemberRole::all());
//! assert!(decoded.attributes().is_none());
//! ```

#![warn(clippy::all)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod serialization;

// Re-export main types
pub use cluster::{
    Address, AddressKind, DescriptorCodec, LiveMember, LocalMember, MemberDescriptor, MemberRole,
    ROLE_CATALOG_VERSION,
};
pub use config::CodecConfig;
pub use error::{CodecError, CodecResult};
pub use serialization::{
    AttributeValue, BufferObjectDataInput, BufferObjectDataOutput, DataSerializable,
    ObjectDataInput, ObjectDataOutput, StreamObjectDataInput, StreamObjectDataOutput,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
