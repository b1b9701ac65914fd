//! The block model: the atomic comparison unit of clone detection.

use std::fmt;
use std::sync::Arc;

/// Content hash of one block: a 64-bit FNV-1a fold over the statement
/// hashes in the block's window. Opaque to everything but the chunker.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockHash(pub u64);

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({:016x})", self.0)
    }
}

/// One fixed-size window of statements from one resource. Identity is
/// `(resource_id, index_in_file)`; immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub resource_id: Arc<str>,
    pub block_hash: BlockHash,
    /// Statement index where this block's window starts.
    pub index_in_file: usize,
    pub start_line: usize, // 1-based
    pub end_line: usize,   // 1-based, inclusive
}

impl Block {
    /// Construct a block, failing fast on malformed input: an empty
    /// resource id or a regressed line range never reaches the detector.
    pub fn new(
        resource_id: Arc<str>,
        block_hash: BlockHash,
        index_in_file: usize,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        assert!(!resource_id.is_empty(), "block resource id must not be empty");
        assert!(start_line >= 1, "block lines are 1-based");
        assert!(
            end_line >= start_line,
            "block line range regresses: {start_line}..{end_line}"
        );
        Block {
            resource_id,
            block_hash,
            index_in_file,
            start_line,
            end_line,
        }
    }
}
