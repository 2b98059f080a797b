//! Proptest generators for property-based testing.

use proptest::prelude::*;

use crate::fixtures::{Block, BlockBody, Checkpoint, Note, Vote, MAX_VOTES_PER_BLOCK};
use crate::types::{Boolean, ByteList, Bytes32, SszList, SszVector, Uint16, Uint64};

/// Generate a random Uint16.
pub fn uint16() -> impl Strategy<Value = Uint16> {
    any::<u16>().prop_map(Uint16)
}

/// Generate a random Uint64.
pub fn uint64() -> impl Strategy<Value = Uint64> {
    any::<u64>().prop_map(Uint64)
}

/// Generate a random Bytes32.
pub fn bytes32() -> impl Strategy<Value = Bytes32> {
    any::<[u8; 32]>().prop_map(Bytes32)
}

/// Generate a byte list of up to `LIMIT` bytes.
pub fn byte_list<const LIMIT: usize>() -> impl Strategy<Value = ByteList<LIMIT>> {
    prop::collection::vec(any::<u8>(), 0..=LIMIT)
        .prop_map(|data| ByteList::new(data).unwrap_or_default())
}

/// Generate a list of up to `LIMIT` elements.
pub fn list<S, const LIMIT: usize>(element: S) -> impl Strategy<Value = SszList<S::Value, LIMIT>>
where
    S: Strategy,
{
    prop::collection::vec(element, 0..=LIMIT)
        .prop_map(|items| SszList::new(items).unwrap_or_else(|_| SszList::empty()))
}

/// Generate a vector of exactly `N` elements.
pub fn vector<S, const N: usize>(element: S) -> impl Strategy<Value = SszVector<S::Value, N>>
where
    S: Strategy,
{
    prop::collection::vec(element, N).prop_filter_map("vector length", |items| {
        SszVector::new(items).ok()
    })
}

pub fn checkpoint() -> impl Strategy<Value = Checkpoint> {
    (bytes32(), uint64()).prop_map(|(root, slot)| Checkpoint::new(root, slot))
}

pub fn vote() -> impl Strategy<Value = Vote> {
    (uint64(), uint64(), checkpoint(), checkpoint(), checkpoint()).prop_map(
        |(validator_id, slot, head, target, source)| {
            Vote::new(validator_id, slot, head, target, source)
        },
    )
}

pub fn block() -> impl Strategy<Value = Block> {
    (
        uint64(),
        uint64(),
        bytes32(),
        bytes32(),
        list::<_, MAX_VOTES_PER_BLOCK>(vote()),
    )
        .prop_map(|(slot, proposer_index, parent_root, state_root, votes)| {
            Block::new(slot, proposer_index, parent_root, state_root, BlockBody::new(votes))
        })
}

pub fn note() -> impl Strategy<Value = Note> {
    (uint16(), byte_list::<8>(), any::<bool>())
        .prop_map(|(id, data, flag)| Note::new(id, data, Boolean(flag)))
}

impl Arbitrary for Checkpoint {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        checkpoint().boxed()
    }
}

impl Arbitrary for Block {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        block().boxed()
    }
}

impl Arbitrary for Note {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        note().boxed()
    }
}
