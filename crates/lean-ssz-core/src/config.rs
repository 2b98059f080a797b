//! Decoding configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MalformedEncoding, SszResult};

/// The largest encoding addressable by a 4-byte offset.
pub const MAX_ENCODED_LEN: usize = u32::MAX as usize;

/// Configuration for whole-buffer decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Inputs longer than this are rejected before any byte is read.
    pub max_input_len: usize,
    /// Whether bytes left over after decoding are accepted.
    ///
    /// Off by default: a canonical encoding is consumed exactly.
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl DecodeConfig {
    /// Exact consumption, offset-addressable size cap.
    pub fn strict() -> Self {
        Self {
            max_input_len: MAX_ENCODED_LEN,
            allow_trailing_bytes: false,
        }
    }

    /// Like [`DecodeConfig::strict`] but tolerates trailing bytes.
    pub fn lenient() -> Self {
        Self {
            allow_trailing_bytes: true,
            ..Self::strict()
        }
    }

    /// Set the input size cap.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Reject inputs over the size cap.
    pub fn check_input_len(&self, len: usize) -> SszResult<()> {
        if len > self.max_input_len {
            tracing::debug!(len, max = self.max_input_len, "rejecting oversized input");
            return Err(MalformedEncoding::InputTooLarge {
                len,
                max: self.max_input_len,
            }
            .into());
        }
        Ok(())
    }
}
