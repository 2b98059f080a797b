//! Golden test vectors for byte-exact verification.
//!
//! Each vector pins the canonical encoding of one value. Any implementation
//! of the contract must produce exactly these bytes, and must decode them
//! back to a value that re-encodes identically.

use lean_ssz_core::{SszResult, SszType};
use serde::{Deserialize, Serialize};

use crate::fixtures::{block, checkpoint, note};
use crate::types::{Boolean, ByteList, SszList, SszVector, Uint16, Uint64};

/// A golden test vector.
#[derive(Debug, Clone, Copy)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Expected canonical encoding (hex).
    pub expected_hex: &'static str,
    /// Encode the vector's value.
    pub encode: fn() -> SszResult<Vec<u8>>,
    /// Decode bytes as the vector's type and encode the result again.
    pub reencode: fn(&[u8]) -> SszResult<Vec<u8>>,
}

/// Outcome of checking one vector, in a form suitable for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorReport {
    pub name: String,
    pub expected_hex: String,
    pub actual_hex: String,
    pub roundtrips: bool,
}

impl VectorReport {
    pub fn passed(&self) -> bool {
        self.roundtrips && self.expected_hex == self.actual_hex
    }
}

/// Decode `bytes` as a `T` and encode it again.
pub fn reencode<T: SszType>(bytes: &[u8]) -> SszResult<Vec<u8>> {
    T::decode_bytes(bytes)?.encode_bytes()
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "uint64 one",
            expected_hex: "0100000000000000",
            encode: || Uint64(1).encode_bytes(),
            reencode: reencode::<Uint64>,
        },
        GoldenVector {
            name: "uint16 max",
            expected_hex: "ffff",
            encode: || Uint16(u16::MAX).encode_bytes(),
            reencode: reencode::<Uint16>,
        },
        GoldenVector {
            name: "boolean true",
            expected_hex: "01",
            encode: || Boolean(true).encode_bytes(),
            reencode: reencode::<Boolean>,
        },
        GoldenVector {
            name: "fixed container",
            expected_hex: concat!(
                "1111111111111111111111111111111111111111111111111111111111111111",
                "0700000000000000",
            ),
            encode: || checkpoint(0x11, 7).encode_bytes(),
            reencode: reencode::<crate::fixtures::Checkpoint>,
        },
        GoldenVector {
            name: "variable field between fixed fields",
            // id | offset 7 | flag | data
            expected_hex: "05000700000001616263",
            encode: || note(5, b"abc", true).encode_bytes(),
            reencode: reencode::<crate::fixtures::Note>,
        },
        GoldenVector {
            name: "empty variable field",
            expected_hex: "02010700000000",
            encode: || note(0x0102, b"", false).encode_bytes(),
            reencode: reencode::<crate::fixtures::Note>,
        },
        GoldenVector {
            name: "list of fixed elements",
            expected_hex: "01000200",
            encode: || SszList::<Uint16, 8>::new(vec![Uint16(1), Uint16(2)])?.encode_bytes(),
            reencode: reencode::<SszList<Uint16, 8>>,
        },
        GoldenVector {
            name: "empty list",
            expected_hex: "",
            encode: || SszList::<Uint16, 8>::empty().encode_bytes(),
            reencode: reencode::<SszList<Uint16, 8>>,
        },
        GoldenVector {
            name: "list of variable elements",
            // offset 8 | offset 9 | aa
            expected_hex: "0800000009000000aa",
            encode: || {
                let items = vec![ByteList::new(vec![0xaa])?, ByteList::default()];
                SszList::<ByteList<4>, 4>::new(items)?.encode_bytes()
            },
            reencode: reencode::<SszList<ByteList<4>, 4>>,
        },
        GoldenVector {
            name: "vector of fixed elements",
            expected_hex: "010002000300",
            encode: || {
                SszVector::<Uint16, 3>::new(vec![Uint16(1), Uint16(2), Uint16(3)])?.encode_bytes()
            },
            reencode: reencode::<SszVector<Uint16, 3>>,
        },
        GoldenVector {
            name: "block with empty body",
            expected_hex: concat!(
                "0100000000000000",
                "0100000000000000",
                "0101010101010101010101010101010101010101010101010101010101010101",
                "0202020202020202020202020202020202020202020202020202020202020202",
                "54000000",
                "04000000",
            ),
            encode: || block(1, Vec::new()).encode_bytes(),
            reencode: reencode::<crate::fixtures::Block>,
        },
    ]
}

/// Check one vector: encode it, compare against the expected bytes, and
/// confirm the expected bytes decode and re-encode unchanged.
pub fn check_vector(vector: &GoldenVector) -> SszResult<VectorReport> {
    let actual = (vector.encode)()?;
    let expected = hex::decode(vector.expected_hex).map_err(|e| {
        lean_ssz_core::SszError::InvalidOperation(format!("bad hex in '{}': {}", vector.name, e))
    })?;

    let roundtrips = (vector.reencode)(&expected).map_or(false, |bytes| bytes == expected);

    Ok(VectorReport {
        name: vector.name.to_string(),
        expected_hex: vector.expected_hex.to_string(),
        actual_hex: hex::encode(actual),
        roundtrips,
    })
}

/// Check every golden vector.
pub fn verify_all_vectors() -> SszResult<Vec<VectorReport>> {
    all_vectors().iter().map(check_vector).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for report in verify_all_vectors().unwrap() {
            assert!(
                report.passed(),
                "Vector '{}': expected {}, got {} (roundtrips: {})",
                report.name,
                report.expected_hex,
                report.actual_hex,
                report.roundtrips
            );
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        for vector in all_vectors() {
            assert_eq!((vector.encode)().unwrap(), (vector.encode)().unwrap());
        }
    }
}
