//! Sample containers and helpers for setting up test scenarios.

use lean_ssz_core::ssz_container;

use crate::types::{Boolean, ByteList, Bytes32, SszList, Uint16, Uint64};

/// Maximum votes carried by a block body.
pub const MAX_VOTES_PER_BLOCK: usize = 16;

ssz_container! {
    /// A (root, slot) pair pinning a block in the chain.
    #[derive(Clone, PartialEq, Eq, Hash)]
    pub struct Checkpoint {
        root: Bytes32,
        slot: Uint64,
    }
}

ssz_container! {
    /// A validator's vote for head, target and source.
    #[derive(Clone, PartialEq, Eq)]
    pub struct Vote {
        validator_id: Uint64,
        slot: Uint64,
        head: Checkpoint,
        target: Checkpoint,
        source: Checkpoint,
    }
}

ssz_container! {
    #[derive(Clone, PartialEq, Eq)]
    pub struct BlockBody {
        votes: SszList<Vote, MAX_VOTES_PER_BLOCK>,
    }
}

ssz_container! {
    #[derive(Clone, PartialEq, Eq)]
    pub struct Block {
        slot: Uint64,
        proposer_index: Uint64,
        parent_root: Bytes32,
        state_root: Bytes32,
        body: BlockBody,
    }
}

ssz_container! {
    /// Small mixed container with one variable-size field in the middle.
    #[derive(Clone, PartialEq, Eq)]
    pub struct Note {
        id: Uint16,
        data: ByteList<8>,
        flag: Boolean,
    }
}

/// A checkpoint whose root is `seed` repeated.
pub fn checkpoint(seed: u8, slot: u64) -> Checkpoint {
    Checkpoint::new(Bytes32([seed; 32]), Uint64(slot))
}

/// A vote with head, target and source derived from `slot`.
pub fn vote(validator_id: u64, slot: u64) -> Vote {
    Vote::new(
        Uint64(validator_id),
        Uint64(slot),
        checkpoint(0xaa, slot),
        checkpoint(0xbb, slot.saturating_sub(1)),
        checkpoint(0xcc, slot.saturating_sub(2)),
    )
}

/// A block at `slot` carrying `votes`.
///
/// Votes beyond [`MAX_VOTES_PER_BLOCK`] are dropped.
pub fn block(slot: u64, votes: Vec<Vote>) -> Block {
    let votes: Vec<Vote> = votes.into_iter().take(MAX_VOTES_PER_BLOCK).collect();
    let votes = SszList::new(votes).unwrap_or_else(|_| SszList::empty());
    Block::new(
        Uint64(slot),
        Uint64(slot % 4),
        Bytes32([0x01; 32]),
        Bytes32([0x02; 32]),
        BlockBody::new(votes),
    )
}

/// A note over `data`, truncated to the list limit.
pub fn note(id: u16, data: &[u8], flag: bool) -> Note {
    let data = &data[..data.len().min(8)];
    let data = ByteList::new(data.to_vec()).unwrap_or_default();
    Note::new(Uint16(id), data, Boolean(flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lean_ssz_core::{SszContainer, SszType};

    #[test]
    fn test_checkpoint_is_fixed() {
        assert!(Checkpoint::is_fixed_size());
        assert_eq!(Checkpoint::get_byte_length().unwrap(), 40);
        assert!(Vote::is_fixed_size());
        assert_eq!(Vote::get_byte_length().unwrap(), 8 + 8 + 3 * 40);
    }

    #[test]
    fn test_block_is_variable() {
        assert!(!BlockBody::is_fixed_size());
        assert!(!Block::is_fixed_size());
        assert!(Block::get_byte_length().unwrap_err().is_invalid_operation());
    }

    #[test]
    fn test_block_truncates_votes() {
        let votes = (0..20).map(|i| vote(i, 10)).collect();
        let b = block(10, votes);
        assert_eq!(
            lean_ssz_core::RootCollection::len(b.body().votes()),
            MAX_VOTES_PER_BLOCK
        );
    }

    #[test]
    fn test_note_truncates_data() {
        let n = note(1, b"0123456789", false);
        assert_eq!(n.data().as_bytes(), b"01234567");
    }

    #[test]
    fn test_container_names() {
        assert_eq!(Checkpoint::NAME, "Checkpoint");
        assert_eq!(Block::FIELD_NAMES, &["slot", "proposer_index", "parent_root", "state_root", "body"]);
    }
}
