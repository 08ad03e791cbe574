//! Property-based test generators using proptest.

use crate::model::Op;
use proptest::prelude::*;

/// Strategy for a single appended chunk of arbitrary bytes.
///
/// Lengths straddle the 16-byte first-write threshold.
pub fn byte_chunk_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Strategy for a sequence of appended chunks.
pub fn chunks_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(byte_chunk_strategy(), 0..32)
}

/// Strategy for a single builder operation.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u8>().prop_map(Op::Char),
        4 => byte_chunk_strategy().prop_map(Op::Bytes),
        2 => (any::<i32>(), any::<i32>()).prop_map(|(a, b)| Op::Sum(a, b)),
        1 => Just(Op::Reset),
        1 => Just(Op::Release),
    ]
}

/// Strategy for a sequence of builder operations.
pub fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..64)
}
