//! Sequential byte sinks and sources
//!
//! `ObjectDataOutput` and `ObjectDataInput` are the primitives every
//! wire type is written with. Integers are big-endian, strings and
//! objects carry an `i32` byte-length prefix, booleans take one byte.
//!
//! Two families of implementations are provided: buffer-backed ones on
//! top of the `bytes` crate, and stream-backed ones over `std::io`
//! readers and writers. A stream that ends mid-value is reported as
//! `Truncated`, like a short buffer; other I/O errors are propagated
//! unchanged.

use super::value::{self, AttributeValue};
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{ErrorKind, Read, Write};

/// Byte sink used by encoders
pub trait ObjectDataOutput {
    /// Write a big-endian 32-bit signed integer
    fn write_int(&mut self, value: i32) -> CodecResult<()>;

    /// Write a single byte
    fn write_byte(&mut self, value: u8) -> CodecResult<()>;

    /// Write raw bytes with no prefix
    fn write_raw(&mut self, bytes: &[u8]) -> CodecResult<()>;

    /// Write a boolean as one byte
    fn write_bool(&mut self, value: bool) -> CodecResult<()> {
        self.write_byte(u8::from(value))
    }

    /// Write a collection or payload length as an `i32`
    fn write_len(&mut self, len: usize) -> CodecResult<()> {
        let len = i32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
        self.write_int(len)
    }

    /// Write a length-prefixed UTF-8 string
    fn write_utf(&mut self, value: &str) -> CodecResult<()> {
        self.write_len(value.len())?;
        self.write_raw(value.as_bytes())
    }

    /// Write an attribute value through the object codec
    fn write_object(&mut self, value: &AttributeValue) -> CodecResult<()> {
        let encoded = value::encode_value(value)?;
        self.write_len(encoded.len())?;
        self.write_raw(&encoded)
    }
}

/// Byte source used by decoders
pub trait ObjectDataInput {
    /// Read a big-endian 32-bit signed integer
    fn read_int(&mut self) -> CodecResult<i32>;

    /// Read a single byte
    fn read_byte(&mut self) -> CodecResult<u8>;

    /// Read exactly `len` raw bytes
    fn read_raw(&mut self, len: usize) -> CodecResult<Vec<u8>>;

    /// Limits applied to lengths read from this source
    fn config(&self) -> &CodecConfig;

    /// Read a boolean, rejecting bytes other than 0 and 1
    fn read_bool(&mut self) -> CodecResult<bool> {
        match self.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    /// Read a length prefix and check it against `limit`
    fn read_len(&mut self, what: &'static str, limit: usize) -> CodecResult<usize> {
        let len = self.read_int()?;
        if len < 0 {
            return Err(CodecError::NegativeLength(len));
        }
        let len = len as usize;
        if len > limit {
            return Err(CodecError::LimitExceeded { what, len, limit });
        }
        Ok(len)
    }

    /// Read a length-prefixed UTF-8 string
    fn read_utf(&mut self) -> CodecResult<String> {
        let limit = self.config().max_string_len;
        let len = self.read_len("string", limit)?;
        let raw = self.read_raw(len)?;
        Ok(String::from_utf8(raw)?)
    }

    /// Read an attribute value through the object codec
    fn read_object(&mut self) -> CodecResult<AttributeValue> {
        let limit = self.config().max_object_len;
        let len = self.read_len("object", limit)?;
        let raw = self.read_raw(len)?;
        value::decode_value(&raw, self.config().max_value_depth)
    }
}

/// In-memory sink backed by a growable `BytesMut`
#[derive(Debug, Default)]
pub struct BufferObjectDataOutput {
    buffer: BytesMut,
}

impl BufferObjectDataOutput {
    /// Create an empty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an output with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Freeze the written bytes
    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }
}

impl ObjectDataOutput for BufferObjectDataOutput {
    fn write_int(&mut self, value: i32) -> CodecResult<()> {
        self.buffer.put_i32(value);
        Ok(())
    }

    fn write_byte(&mut self, value: u8) -> CodecResult<()> {
        self.buffer.put_u8(value);
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.buffer.put_slice(bytes);
        Ok(())
    }
}

/// In-memory source over a `Bytes` buffer
#[derive(Debug, Clone)]
pub struct BufferObjectDataInput {
    buffer: Bytes,
    config: CodecConfig,
}

impl BufferObjectDataInput {
    /// Create an input with default limits
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self::with_config(buffer, CodecConfig::default())
    }

    /// Create an input with explicit limits
    pub fn with_config(buffer: impl Into<Bytes>, config: CodecConfig) -> Self {
        Self {
            buffer: buffer.into(),
            config,
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    fn ensure(&self, needed: usize) -> CodecResult<()> {
        let remaining = self.buffer.remaining();
        if remaining < needed {
            return Err(CodecError::Truncated { needed, remaining });
        }
        Ok(())
    }
}

impl ObjectDataInput for BufferObjectDataInput {
    fn read_int(&mut self) -> CodecResult<i32> {
        self.ensure(4)?;
        Ok(self.buffer.get_i32())
    }

    fn read_byte(&mut self) -> CodecResult<u8> {
        self.ensure(1)?;
        Ok(self.buffer.get_u8())
    }

    fn read_raw(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        self.ensure(len)?;
        Ok(self.buffer.split_to(len).to_vec())
    }

    fn config(&self) -> &CodecConfig {
        &self.config
    }
}

/// Sink over any `std::io::Write`
#[derive(Debug)]
pub struct StreamObjectDataOutput<W: Write> {
    writer: W,
}

impl<W: Write> StreamObjectDataOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> CodecResult<()> {
        Ok(self.writer.flush()?)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ObjectDataOutput for StreamObjectDataOutput<W> {
    fn write_int(&mut self, value: i32) -> CodecResult<()> {
        Ok(self.writer.write_all(&value.to_be_bytes())?)
    }

    fn write_byte(&mut self, value: u8) -> CodecResult<()> {
        Ok(self.writer.write_all(&[value])?)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> CodecResult<()> {
        Ok(self.writer.write_all(bytes)?)
    }
}

/// Source over any `std::io::Read`
#[derive(Debug)]
pub struct StreamObjectDataInput<R: Read> {
    reader: R,
    config: CodecConfig,
}

impl<R: Read> StreamObjectDataInput<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, CodecConfig::default())
    }

    pub fn with_config(reader: R, config: CodecConfig) -> Self {
        Self { reader, config }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Fill `buf` completely; end of stream before that is a truncation
    fn fill(&mut self, buf: &mut [u8]) -> CodecResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(CodecError::Truncated {
                        needed: buf.len(),
                        remaining: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl<R: Read> ObjectDataInput for StreamObjectDataInput<R> {
    fn read_int(&mut self) -> CodecResult<i32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    fn read_byte(&mut self) -> CodecResult<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    fn read_raw(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    fn config(&self) -> &CodecConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    #[test]
    fn test_primitive_layout() {
        let mut out = BufferObjectDataOutput::new();
        out.write_int(0x0102_0304).unwrap();
        out.write_bool(true).unwrap();
        out.write_utf("ab").unwrap();

        assert_eq!(
            out.as_bytes(),
            &[1, 2, 3, 4, 1, 0, 0, 0, 2, b'a', b'b']
        );
    }

    #[test]
    fn test_buffer_primitives() {
        let mut out = BufferObjectDataOutput::new();
        out.write_int(-7).unwrap();
        out.write_bool(false).unwrap();
        out.write_utf("héllo").unwrap();
        out.write_object(&AttributeValue::Int(42)).unwrap();

        let mut input = BufferObjectDataInput::new(out.into_bytes());
        assert_eq!(input.read_int().unwrap(), -7);
        assert!(!input.read_bool().unwrap());
        assert_eq!(input.read_utf().unwrap(), "héllo");
        assert_eq!(input.read_object().unwrap(), AttributeValue::Int(42));
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_buffer_truncated() {
        let mut input = BufferObjectDataInput::new(vec![0u8, 1]);
        match input.read_int() {
            Err(CodecError::Truncated { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_bool() {
        let mut input = BufferObjectDataInput::new(vec![2u8]);
        assert!(matches!(input.read_bool(), Err(CodecError::InvalidBool(2))));
    }

    #[test]
    fn test_negative_string_length() {
        let mut input = BufferObjectDataInput::new((-1i32).to_be_bytes().to_vec());
        assert!(matches!(input.read_utf(), Err(CodecError::NegativeLength(-1))));
    }

    #[test]
    fn test_string_limit() {
        let config = CodecConfig {
            max_string_len: 3,
            ..CodecConfig::default()
        };
        let mut out = BufferObjectDataOutput::new();
        out.write_utf("toolong").unwrap();

        let mut input = BufferObjectDataInput::with_config(out.into_bytes(), config);
        assert!(matches!(
            input.read_utf(),
            Err(CodecError::LimitExceeded { what: "string", len: 7, limit: 3 })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut out = BufferObjectDataOutput::new();
        out.write_int(2).unwrap();
        out.write_raw(&[0xff, 0xfe]).unwrap();

        let mut input = BufferObjectDataInput::new(out.into_bytes());
        assert!(matches!(input.read_utf(), Err(CodecError::InvalidUtf8)));
    }

    #[test]
    fn test_stream_roundtrip() {
        let mut out = StreamObjectDataOutput::new(Vec::new());
        out.write_int(12).unwrap();
        out.write_utf("stream").unwrap();
        out.flush().unwrap();

        let mut input = StreamObjectDataInput::new(Cursor::new(out.into_inner()));
        assert_eq!(input.read_int().unwrap(), 12);
        assert_eq!(input.read_utf().unwrap(), "stream");
    }

    #[test]
    fn test_stream_eof_is_truncation() {
        let mut input = StreamObjectDataInput::new(Cursor::new(vec![0u8]));
        let err = input.read_int().unwrap_err();
        assert!(matches!(err, CodecError::Truncated { needed: 4, remaining: 1 }));
        assert!(err.is_corrupt());
        assert!(!err.is_io());
    }

    #[test]
    fn test_stream_short_raw_read() {
        let mut input = StreamObjectDataInput::new(Cursor::new(vec![0u8, 0, 0, 5, b'a', b'b']));
        assert!(matches!(
            input.read_utf(),
            Err(CodecError::Truncated { needed: 5, remaining: 2 })
        ));
    }

    /// Hands out one byte per call and is interrupted in between
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        interrupt: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            if self.pos == self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_stream_partial_reads_are_completed() {
        let reader = Trickle {
            data: 0x0a0b_0c0di32.to_be_bytes().to_vec(),
            pos: 0,
            interrupt: false,
        };
        let mut input = StreamObjectDataInput::new(reader);
        assert_eq!(input.read_int().unwrap(), 0x0a0b_0c0d);
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer gone"))
        }
    }

    #[test]
    fn test_stream_read_failure_propagates() {
        let mut input = StreamObjectDataInput::new(BrokenReader);
        match input.read_byte() {
            Err(CodecError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_write_failure_propagates() {
        let mut out = StreamObjectDataOutput::new(BrokenWriter);
        let err = out.write_int(1).unwrap_err();
        assert!(err.is_io());
    }
}
