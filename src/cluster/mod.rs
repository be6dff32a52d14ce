//! Cluster membership descriptors
//!
//! What a node tells its peers about itself when joining or gossiping:
//! where it listens, which process instance it is, which roles it
//! performs and any attributes it chooses to publish.

pub mod address;
pub mod codec;
pub mod descriptor;
pub mod member;
pub mod role;

pub use address::{Address, AddressKind};
pub use codec::DescriptorCodec;
pub use descriptor::MemberDescriptor;
pub use member::{LiveMember, LocalMember};
pub use role::{MemberRole, ROLE_CATALOG_VERSION};
