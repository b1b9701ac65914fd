//! The clone index: a mapping from block hash to every indexed block
//! sharing that hash, across all resources of the run.

use std::collections::HashMap;

use super::block::{Block, BlockHash};

/// Read/write surface of a block index. Detection only reads; all inserts
/// for a resource happen before that resource's detection is issued.
pub trait CloneIndex {
    /// Add a block. Idempotent by block identity: re-inserting a block with
    /// the same `(resource_id, index_in_file)` for the same hash is a no-op.
    fn insert(&mut self, block: Block);

    /// All blocks previously inserted with this hash, in insertion order.
    /// Empty when the hash was never seen; a pure read either way.
    fn blocks_by_hash(&self, hash: BlockHash) -> &[Block];
}

/// In-memory index for a single analysis run.
#[derive(Default)]
pub struct MemoryCloneIndex {
    by_hash: HashMap<BlockHash, Vec<Block>>,
}

impl MemoryCloneIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

impl CloneIndex for MemoryCloneIndex {
    fn insert(&mut self, block: Block) {
        let entries = self.by_hash.entry(block.block_hash).or_default();
        let duplicate = entries
            .iter()
            .any(|b| b.resource_id == block.resource_id && b.index_in_file == block.index_in_file);
        if !duplicate {
            entries.push(block);
        }
    }

    fn blocks_by_hash(&self, hash: BlockHash) -> &[Block] {
        self.by_hash.get(&hash).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
