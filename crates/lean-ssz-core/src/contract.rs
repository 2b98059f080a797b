//! The type contract every encodable value implements.
//!
//! [`SszType`] splits encoding into two layers:
//!
//! - `serialize` / `deserialize` work against a caller-supplied stream and a
//!   scope, so aggregates can encode nested values back-to-back on one
//!   stream without intermediate buffers.
//! - `encode_bytes` / `decode_bytes` are whole-buffer conveniences built on
//!   top of them.

use std::io::{self, Cursor, Read, Write};

use crate::config::DecodeConfig;
use crate::error::{short_type_name, MalformedEncoding, SszResult};

/// A type with a canonical SSZ encoding.
///
/// ## Size classification
///
/// A fixed-size type encodes every instance to exactly
/// [`get_byte_length`](SszType::get_byte_length) bytes. A variable-size type
/// has no static length: its encoded length is carried externally as the
/// deserialization scope, and `get_byte_length` fails with
/// [`SszError::InvalidOperation`](crate::SszError::InvalidOperation).
///
/// ## Scope
///
/// `deserialize` never reads more than `scope` bytes. Fixed-size types read
/// exactly their byte length; variable-size types read exactly `scope`.
pub trait SszType: Sized {
    /// Whether every instance encodes to the same number of bytes.
    fn is_fixed_size() -> bool;

    /// The encoded length shared by every instance of a fixed-size type.
    fn get_byte_length() -> SszResult<usize>;

    /// Write the canonical encoding of `self`, returning the bytes written.
    fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize>;

    /// Read a value from `stream`, consuming at most `scope` bytes.
    fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self>;

    /// The number of bytes `serialize` writes for this value.
    fn encoded_len(&self) -> SszResult<usize> {
        if Self::is_fixed_size() {
            Self::get_byte_length()
        } else {
            self.serialize(&mut io::sink())
        }
    }

    /// Encode into a fresh buffer.
    fn encode_bytes(&self) -> SszResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.serialize(&mut buf)?;
        Ok(buf)
    }

    /// Decode a value that occupies the whole of `data`.
    fn decode_bytes(data: &[u8]) -> SszResult<Self> {
        Self::decode_bytes_with(data, &DecodeConfig::default())
    }

    /// Decode a value from `data` under an explicit configuration.
    fn decode_bytes_with(data: &[u8], config: &DecodeConfig) -> SszResult<Self> {
        config.check_input_len(data.len())?;

        let mut cursor = Cursor::new(data);
        let value = Self::deserialize(&mut cursor, data.len())?;

        let consumed = cursor.position() as usize;
        if consumed != data.len() && !config.allow_trailing_bytes {
            tracing::debug!(
                ty = short_type_name::<Self>(),
                consumed,
                scope = data.len(),
                "rejecting trailing bytes"
            );
            return Err(MalformedEncoding::TrailingBytes {
                consumed,
                scope: data.len(),
            }
            .into());
        }
        Ok(value)
    }
}

/// The space a value of type `T` takes in the fixed portion of an aggregate:
/// its byte length if fixed-size, otherwise one offset.
pub fn fixed_portion_len<T: SszType>() -> SszResult<usize> {
    if T::is_fixed_size() {
        T::get_byte_length()
    } else {
        Ok(crate::composite::BYTES_PER_LENGTH_OFFSET)
    }
}


#[cfg(test)]
mod tests {
    use super::test_types::{Blob, U16};
    use super::*;

    #[test]
    fn test_fixed_encode_decode() {
        let bytes = U16(0x0102).encode_bytes().unwrap();
        assert_eq!(bytes, vec![0x02, 0x01]);
        assert_eq!(bytes.len(), U16::get_byte_length().unwrap());
        assert_eq!(U16::decode_bytes(&bytes).unwrap(), U16(0x0102));
    }

    #[test]
    fn test_fixed_decode_wrong_length() {
        let short = U16::decode_bytes(&[0x01]).unwrap_err();
        assert!(short.is_malformed());

        let long = U16::decode_bytes(&[0x01, 0x02, 0x03]).unwrap_err();
        assert_eq!(
            long.as_malformed(),
            Some(&MalformedEncoding::TrailingBytes {
                consumed: 2,
                scope: 3
            })
        );
    }

    #[test]
    fn test_fixed_deserialize_ignores_larger_scope() {
        let data = [0x05, 0x00, 0xff, 0xff];
        let mut stream = &data[..];
        let value = U16::deserialize(&mut stream, data.len()).unwrap();
        assert_eq!(value, U16(5));
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_variable_consumes_scope() {
        let data = [1u8, 2, 3, 9, 9];
        let mut stream = &data[..];
        let value = Blob::deserialize(&mut stream, 3).unwrap();
        assert_eq!(value, Blob(vec![1, 2, 3]));
        assert_eq!(stream, &[9, 9]);
    }

    #[test]
    fn test_variable_byte_length_is_invalid() {
        let err = Blob::get_byte_length().unwrap_err();
        assert!(err.is_invalid_operation());
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(U16(1).encoded_len().unwrap(), 2);
        assert_eq!(Blob(vec![0; 7]).encoded_len().unwrap(), 7);
        assert_eq!(Blob(vec![]).encoded_len().unwrap(), 0);
    }

    #[test]
    fn test_lenient_decoding_allows_trailing_bytes() {
        let config = DecodeConfig::lenient();
        let value = U16::decode_bytes_with(&[0x07, 0x00, 0xee], &config).unwrap();
        assert_eq!(value, U16(7));
    }

    #[test]
    fn test_input_cap() {
        let config = DecodeConfig::strict().with_max_input_len(2);
        let err = Blob::decode_bytes_with(&[0; 3], &config).unwrap_err();
        assert_eq!(
            err.as_malformed(),
            Some(&MalformedEncoding::InputTooLarge { len: 3, max: 2 })
        );
    }

    #[test]
    fn test_fixed_portion_len() {
        assert_eq!(fixed_portion_len::<U16>().unwrap(), 2);
        assert_eq!(fixed_portion_len::<Blob>().unwrap(), 4);
    }
}
