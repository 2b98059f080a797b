//! Fixture leaf and collection types.
//!
//! Minimal concrete implementations of the SSZ contract: little-endian
//! unsigned integers, a boolean, fixed byte vectors, a bounded byte list,
//! and the vector and list collections.

use std::fmt;
use std::io::{Read, Write};

use bytes::Bytes;
use lean_ssz_core::composite::{deserialize_sequence, sequence_encoded_len, serialize_sequence};
use lean_ssz_core::root::fmt_root;
use lean_ssz_core::stream::{read_array, read_bytes, read_scope, write_bytes};
use lean_ssz_core::{
    MalformedEncoding, Root, RootCollection, SszError, SszResult, SszType, ValidationError,
};

macro_rules! impl_uint {
    ($name:ident, $inner:ty, $byte_len:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub $inner);

        impl SszType for $name {
            fn is_fixed_size() -> bool {
                true
            }

            fn get_byte_length() -> SszResult<usize> {
                Ok($byte_len)
            }

            fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize> {
                write_bytes(stream, &self.0.to_le_bytes())
            }

            fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self> {
                Ok(Self(<$inner>::from_le_bytes(read_array(stream, scope)?)))
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

impl_uint!(Uint8, u8, 1);
impl_uint!(Uint16, u16, 2);
impl_uint!(Uint32, u32, 4);
impl_uint!(Uint64, u64, 8);

/// A single byte, `0x00` or `0x01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Boolean(pub bool);

impl SszType for Boolean {
    fn is_fixed_size() -> bool {
        true
    }

    fn get_byte_length() -> SszResult<usize> {
        Ok(1)
    }

    fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize> {
        write_bytes(stream, &[self.0 as u8])
    }

    fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self> {
        match read_array::<R, 1>(stream, scope)? {
            [0x00] => Ok(Self(false)),
            [0x01] => Ok(Self(true)),
            [b] => Err(MalformedEncoding::InvalidValue(format!("boolean byte {:#04x}", b)).into()),
        }
    }
}

macro_rules! impl_fixed_bytes {
    ($name:ident, $len:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const ZERO: Self = Self([0u8; $len]);

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl SszType for $name {
            fn is_fixed_size() -> bool {
                true
            }

            fn get_byte_length() -> SszResult<usize> {
                Ok($len)
            }

            fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize> {
                write_bytes(stream, &self.0)
            }

            fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self> {
                Ok(Self(read_array(stream, scope)?))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), self.to_hex())
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }
    };
}

impl_fixed_bytes!(Bytes4, 4);
impl_fixed_bytes!(Bytes32, 32);

/// A variable-length byte string holding at most `LIMIT` bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteList<const LIMIT: usize>(Bytes);

impl<const LIMIT: usize> ByteList<LIMIT> {
    pub fn new(data: impl Into<Bytes>) -> Result<Self, ValidationError> {
        let data = data.into();
        if data.len() > LIMIT {
            return Err(ValidationError::LengthExceedsLimit {
                collection: "ByteList",
                limit: LIMIT,
                actual: data.len(),
            });
        }
        Ok(Self(data))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl<const LIMIT: usize> SszType for ByteList<LIMIT> {
    fn is_fixed_size() -> bool {
        false
    }

    fn get_byte_length() -> SszResult<usize> {
        Err(SszError::variable_size::<Self>())
    }

    fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize> {
        write_bytes(stream, &self.0)
    }

    fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self> {
        if scope > LIMIT {
            return Err(MalformedEncoding::LengthExceedsLimit {
                len: scope,
                limit: LIMIT,
            }
            .into());
        }
        Ok(Self(read_bytes(stream, scope, scope)?.into()))
    }

    fn encoded_len(&self) -> SszResult<usize> {
        Ok(self.0.len())
    }
}

impl<const LIMIT: usize> fmt::Debug for ByteList<LIMIT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteList(0x{})", hex::encode(&self.0))
    }
}

/// Exactly `N` elements of `T`. Fixed-size when `T` is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SszVector<T, const N: usize> {
    root: Root<T>,
}

impl<T, const N: usize> SszVector<T, N> {
    pub fn new(items: Vec<T>) -> Result<Self, ValidationError> {
        if N == 0 {
            return Err(ValidationError::ZeroLength {
                collection: "SszVector",
            });
        }
        if items.len() != N {
            return Err(ValidationError::LengthMismatch {
                collection: "SszVector",
                expected: N,
                actual: items.len(),
            });
        }
        Ok(Self { root: items.into() })
    }
}

impl<T, const N: usize> RootCollection for SszVector<T, N> {
    type Item = T;

    fn root(&self) -> &[T] {
        self.root.as_slice()
    }
}

impl<T: SszType, const N: usize> SszType for SszVector<T, N> {
    fn is_fixed_size() -> bool {
        T::is_fixed_size()
    }

    fn get_byte_length() -> SszResult<usize> {
        if !T::is_fixed_size() {
            return Err(SszError::variable_size::<Self>());
        }
        if N == 0 {
            return Err(SszError::InvalidOperation(
                "a zero-length vector has no encoding".to_string(),
            ));
        }
        Ok(T::get_byte_length()? * N)
    }

    fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize> {
        serialize_sequence(self.root(), stream)
    }

    fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self> {
        if N == 0 {
            return Err(MalformedEncoding::ZeroLengthItem.into());
        }
        let bytes = read_scope::<Self, R>(stream, scope)?;
        let items = deserialize_sequence::<T>(&bytes, Some(N))?;
        if items.len() != N {
            return Err(MalformedEncoding::LengthMismatch {
                expected: N,
                actual: items.len(),
            }
            .into());
        }
        Ok(Self { root: items.into() })
    }

    fn encoded_len(&self) -> SszResult<usize> {
        sequence_encoded_len(self.root())
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for SszVector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_root(f, "SszVector", self.root())
    }
}

/// Up to `LIMIT` elements of `T`. Always variable-size.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SszList<T, const LIMIT: usize> {
    root: Root<T>,
}

impl<T, const LIMIT: usize> SszList<T, LIMIT> {
    pub fn new(items: Vec<T>) -> Result<Self, ValidationError> {
        if items.len() > LIMIT {
            return Err(ValidationError::LengthExceedsLimit {
                collection: "SszList",
                limit: LIMIT,
                actual: items.len(),
            });
        }
        Ok(Self { root: items.into() })
    }

    pub fn empty() -> Self {
        Self {
            root: Root::default(),
        }
    }
}

impl<T, const LIMIT: usize> RootCollection for SszList<T, LIMIT> {
    type Item = T;

    fn root(&self) -> &[T] {
        self.root.as_slice()
    }
}

impl<T: SszType, const LIMIT: usize> SszType for SszList<T, LIMIT> {
    fn is_fixed_size() -> bool {
        false
    }

    fn get_byte_length() -> SszResult<usize> {
        Err(SszError::variable_size::<Self>())
    }

    fn serialize<W: Write>(&self, stream: &mut W) -> SszResult<usize> {
        serialize_sequence(self.root(), stream)
    }

    fn deserialize<R: Read>(stream: &mut R, scope: usize) -> SszResult<Self> {
        let bytes = read_bytes(stream, scope, scope)?;
        let items = deserialize_sequence::<T>(&bytes, Some(LIMIT))?;
        Ok(Self { root: items.into() })
    }

    fn encoded_len(&self) -> SszResult<usize> {
        sequence_encoded_len(self.root())
    }
}

impl<T: fmt::Debug, const LIMIT: usize> fmt::Debug for SszList<T, LIMIT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_root(f, "SszList", self.root())
    }
}

impl<'a, T, const LIMIT: usize> IntoIterator for &'a SszList<T, LIMIT> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.root().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_encoding() {
        assert_eq!(Uint8(0xab).encode_bytes().unwrap(), vec![0xab]);
        assert_eq!(Uint16(0x0102).encode_bytes().unwrap(), vec![0x02, 0x01]);
        assert_eq!(Uint32(1).encode_bytes().unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(
            Uint64(u64::MAX).encode_bytes().unwrap(),
            vec![0xff; 8]
        );
        assert_eq!(Uint64::decode_bytes(&[7, 0, 0, 0, 0, 0, 0, 0]).unwrap(), Uint64(7));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(Boolean(true).encode_bytes().unwrap(), vec![1]);
        assert_eq!(Boolean::decode_bytes(&[0]).unwrap(), Boolean(false));

        let err = Boolean::decode_bytes(&[2]).unwrap_err();
        assert!(matches!(
            err.as_malformed(),
            Some(MalformedEncoding::InvalidValue(_))
        ));
    }

    #[test]
    fn test_fixed_bytes_debug() {
        let b = Bytes4([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(format!("{:?}", b), "Bytes4(0xdeadbeef)");
    }

    #[test]
    fn test_byte_list_limit() {
        assert!(ByteList::<2>::new(vec![1, 2]).is_ok());
        assert_eq!(
            ByteList::<2>::new(vec![1, 2, 3]).unwrap_err(),
            ValidationError::LengthExceedsLimit {
                collection: "ByteList",
                limit: 2,
                actual: 3
            }
        );

        let err = ByteList::<2>::decode_bytes(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err.as_malformed(),
            Some(&MalformedEncoding::LengthExceedsLimit { len: 3, limit: 2 })
        );
    }

    #[test]
    fn test_vector_classification() {
        assert!(SszVector::<Uint16, 3>::is_fixed_size());
        assert_eq!(SszVector::<Uint16, 3>::get_byte_length().unwrap(), 6);

        assert!(!SszVector::<ByteList<4>, 2>::is_fixed_size());
        assert!(SszVector::<ByteList<4>, 2>::get_byte_length()
            .unwrap_err()
            .is_invalid_operation());
    }

    #[test]
    fn test_vector_length_checked() {
        let err = SszVector::<Uint16, 3>::new(vec![Uint16(1)]).unwrap_err();
        assert!(matches!(err, ValidationError::LengthMismatch { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn test_variable_vector_count_checked() {
        // Two offsets, but the vector needs three elements.
        let bytes = [8, 0, 0, 0, 9, 0, 0, 0, 0xaa];
        let err = SszVector::<ByteList<4>, 3>::decode_bytes(&bytes).unwrap_err();
        assert_eq!(
            err.as_malformed(),
            Some(&MalformedEncoding::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_zero_length_vector_rejected() {
        assert_eq!(
            SszVector::<Uint16, 0>::new(Vec::new()).unwrap_err(),
            ValidationError::ZeroLength {
                collection: "SszVector"
            }
        );
        assert!(SszVector::<Uint16, 0>::get_byte_length()
            .unwrap_err()
            .is_invalid_operation());

        let err = SszVector::<Uint16, 0>::decode_bytes(&[]).unwrap_err();
        assert_eq!(err.as_malformed(), Some(&MalformedEncoding::ZeroLengthItem));

        // A list of them cannot decode either, so nothing encodes to an
        // empty byte string that claims to hold elements.
        let err = SszList::<SszVector<Uint16, 0>, 4>::decode_bytes(&[0, 0]).unwrap_err();
        assert!(err.is_malformed() || err.is_invalid_operation());
    }

    #[test]
    fn test_empty_list_of_non_default_items() {
        let list = SszList::<crate::fixtures::Vote, 2>::empty();
        assert!(list.is_empty());
        assert!(list.encode_bytes().unwrap().is_empty());
        assert_eq!(
            SszList::<crate::fixtures::Vote, 2>::decode_bytes(&[]).unwrap(),
            list
        );
    }

    #[test]
    fn test_list_roundtrip() {
        let list = SszList::<Uint16, 4>::new(vec![Uint16(1), Uint16(2)]).unwrap();
        let bytes = list.encode_bytes().unwrap();
        assert_eq!(bytes, vec![1, 0, 2, 0]);
        assert_eq!(SszList::<Uint16, 4>::decode_bytes(&bytes).unwrap(), list);
    }

    #[test]
    fn test_list_limit_on_decode() {
        let bytes = [1, 0, 2, 0, 3, 0];
        let err = SszList::<Uint16, 2>::decode_bytes(&bytes).unwrap_err();
        assert_eq!(
            err.as_malformed(),
            Some(&MalformedEncoding::LengthExceedsLimit { len: 3, limit: 2 })
        );
    }

    #[test]
    fn test_list_debug() {
        let list = SszList::<Uint8, 4>::new(vec![Uint8(1), Uint8(2)]).unwrap();
        assert_eq!(format!("{:?}", list), "SszList(data=[Uint8(1), Uint8(2)])");
    }
}
