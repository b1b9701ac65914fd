//! Sliding-window block chunker.
//!
//! Groups a file's ordered statement list into overlapping windows of
//! `block_size` statements, one block per window, sliding by one statement.
//! The block hash is an FNV-1a fold over the statement hashes in the window,
//! with a separator step between statements so that shifted windows over
//! repeating statements cannot collide trivially.

use std::sync::Arc;

use crate::statements::Statement;

use super::block::{Block, BlockHash};

pub struct Chunker {
    block_size: usize,
}

impl Chunker {
    /// `block_size` is the number of statements per block; zero is a
    /// configuration error and fails fast.
    pub fn new(block_size: usize) -> Self {
        assert!(block_size >= 1, "block size must be at least 1");
        Chunker { block_size }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Emit one block per window. A file with fewer statements than
    /// `block_size` produces no blocks. Pure over its input.
    pub fn chunk(&self, resource_id: &Arc<str>, statements: &[Statement]) -> Vec<Block> {
        assert!(!resource_id.is_empty(), "resource id must not be empty");
        if statements.len() < self.block_size {
            return Vec::new();
        }

        let mut blocks = Vec::with_capacity(statements.len() - self.block_size + 1);
        for (index, window) in statements.windows(self.block_size).enumerate() {
            blocks.push(Block::new(
                Arc::clone(resource_id),
                window_hash(window),
                index,
                window[0].start_line,
                window[window.len() - 1].end_line,
            ));
        }
        blocks
    }
}

/// FNV-1a fold over the statement hashes of one window.
fn window_hash(window: &[Statement]) -> BlockHash {
    let mut hash: u64 = 0xcbf29ce484222325; // offset basis
    for statement in window {
        for byte in statement.hash.to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x100000001b3); // prime
        }
        // Separator so that window boundaries stay significant.
        hash ^= 0xff;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    BlockHash(hash)
}

#[cfg(test)]
#[path = "chunker_test.rs"]
mod tests;
