//! Binary serialization primitives
//!
//! Types that travel between cluster members implement
//! [`DataSerializable`] and write themselves field by field onto an
//! [`ObjectDataOutput`].

pub mod data_io;
pub mod value;

pub use data_io::{
    BufferObjectDataInput, BufferObjectDataOutput, ObjectDataInput, ObjectDataOutput,
    StreamObjectDataInput, StreamObjectDataOutput,
};
pub use value::AttributeValue;

use crate::error::CodecResult;

/// A type with its own embedded wire encoding
pub trait DataSerializable: Sized {
    /// Write this value onto the sink
    fn write_data(&self, out: &mut dyn ObjectDataOutput) -> CodecResult<()>;

    /// Read a value from the source
    fn read_data(input: &mut dyn ObjectDataInput) -> CodecResult<Self>;
}
