//! Golden test vectors for byte-exact verification.
//!
//! Every implementation of the contract must produce identical encodings for
//! these values. The vectors can be exported as JSON for other
//! implementations to check against.

use anyhow::Result;
use lean_ssz_core::SszType;
use lean_ssz_testkit::fixtures::{note, vote};
use lean_ssz_testkit::vectors::{all_vectors, check_vector, verify_all_vectors, VectorReport};
use lean_ssz_testkit::Vote;

#[test]
fn test_golden_vectors() -> Result<()> {
    let reports = verify_all_vectors()?;
    assert_eq!(reports.len(), all_vectors().len());

    for report in &reports {
        assert!(
            report.passed(),
            "Vector '{}' failed:\n  expected {}\n  actual   {}\n  roundtrips {}",
            report.name,
            report.expected_hex,
            report.actual_hex,
            report.roundtrips
        );
    }
    Ok(())
}

#[test]
fn test_export_json_roundtrip() -> Result<()> {
    let reports = verify_all_vectors()?;
    let json = serde_json::to_string_pretty(&reports)?;
    let recovered: Vec<VectorReport> = serde_json::from_str(&json)?;
    assert_eq!(recovered, reports);
    Ok(())
}

#[test]
fn test_mismatch_is_reported() -> Result<()> {
    let mut vector = all_vectors()
        .into_iter()
        .find(|v| v.name == "uint16 max")
        .ok_or_else(|| anyhow::anyhow!("vector missing"))?;
    vector.expected_hex = "fffe";

    let report = check_vector(&vector)?;
    assert!(!report.passed());
    assert_eq!(report.actual_hex, "ffff");
    Ok(())
}

#[test]
fn test_vote_layout() -> Result<()> {
    let bytes = vote(2, 10).encode_bytes()?;
    assert_eq!(bytes.len(), Vote::get_byte_length()?);

    // validator_id | slot | head.root
    assert_eq!(hex::encode(&bytes[..8]), "0200000000000000");
    assert_eq!(hex::encode(&bytes[8..16]), "0a00000000000000");
    assert!(bytes[16..48].iter().all(|b| *b == 0xaa));
    // head.slot, then target.root starts
    assert_eq!(hex::encode(&bytes[48..56]), "0a00000000000000");
    assert_eq!(bytes[56], 0xbb);
    Ok(())
}

#[test]
fn test_note_layout() -> Result<()> {
    let bytes = note(5, b"abc", true).encode_bytes()?;
    assert_eq!(hex::encode(bytes), "05000700000001616263");
    Ok(())
}
