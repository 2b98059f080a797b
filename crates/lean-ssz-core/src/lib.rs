//! # Lean SSZ Core
//!
//! The type contract for Simple Serialize (SSZ): the deterministic, byte-exact
//! encoding used for consensus data.
//!
//! This crate holds no concrete leaf types (integers, booleans, byte vectors).
//! It defines what every encodable type must provide and the two shapes that
//! aggregates take.
//!
//! ## Key Types
//!
//! - [`SszType`] - Size classification, stream (de)serialization with a scope,
//!   and whole-buffer `encode_bytes` / `decode_bytes`
//! - [`RootCollection`] / [`Root`] - Homogeneous collections wrapping one
//!   root sequence, with index-keyed access
//! - [`SszContainer`] / [`ssz_container!`] - Heterogeneous containers with
//!   name-keyed access in declaration order
//! - [`ContainerBuilder`] - Eager validation of container construction
//!
//! ## Aggregates
//!
//! Containers and sequences share one layout: fixed-size parts in place,
//! 4-byte offsets standing in for variable-size parts, then the variable
//! bytes. See [`composite`].

pub mod composite;
pub mod config;
pub mod container;
pub mod contract;
pub mod error;
pub mod root;
pub mod stream;
pub mod validation;

pub use composite::{SszDecoder, SszDecoderBuilder, BYTES_PER_LENGTH_OFFSET};
pub use config::{DecodeConfig, MAX_ENCODED_LEN};
pub use container::{Fields, SszContainer, SszValue};
pub use contract::SszType;
pub use error::{MalformedEncoding, SszError, SszResult, ValidationError};
pub use root::{Root, RootCollection};
pub use validation::{ContainerBuilder, FieldValues};
