//! # Lean SSZ Testkit
//!
//! Testing utilities for the lean SSZ type contract.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Types**: Minimal concrete leaf types and collections implementing [`SszType`](lean_ssz_core::SszType)
//! - **Fixtures**: Sample containers built with [`ssz_container!`](lean_ssz_core::ssz_container)
//! - **Golden vectors**: Known values with their exact expected encodings
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Golden Vectors
//!
//! ```rust
//! use lean_ssz_testkit::vectors::verify_all_vectors;
//!
//! for report in verify_all_vectors().unwrap() {
//!     assert!(report.passed(), "{}", report.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lean_ssz_core::SszType;
//! use lean_ssz_testkit::fixtures::Block;
//!
//! proptest! {
//!     #[test]
//!     fn block_roundtrips(block: Block) {
//!         let bytes = block.encode_bytes().unwrap();
//!         prop_assert_eq!(Block::decode_bytes(&bytes).unwrap(), block);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod types;
pub mod vectors;

pub use fixtures::{Block, BlockBody, Checkpoint, Note, Vote, MAX_VOTES_PER_BLOCK};
pub use types::{
    Boolean, ByteList, Bytes32, Bytes4, SszList, SszVector, Uint16, Uint32, Uint64, Uint8,
};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector, VectorReport};
