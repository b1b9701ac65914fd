//! Clone detection over block hashes.
//!
//! A file's statements are chunked into overlapping fixed-size blocks
//! ([`Chunker`]), blocks from every analyzed file are stored in a
//! [`CloneIndex`], and [`detect`] finds the clone groups of one file
//! against that index in three phases:
//!
//! 1. build the generalized text set: the file's own block-hash sequence
//!    plus every matching run retrieved from the index,
//! 2. build a suffix tree over the text set and collect every repeated
//!    hash sequence that occurs in the file under analysis,
//! 3. drop candidates fully contained in a longer group, then order the
//!    survivors by position in the file.

pub mod block;
pub mod chunker;
pub mod groups;
pub mod index;

mod filter;
mod search;
mod suffix_tree;

use std::sync::atomic::AtomicBool;

pub use block::{Block, BlockHash};
pub use chunker::Chunker;
pub use groups::{CloneGroup, ClonePart};
pub use index::{CloneIndex, MemoryCloneIndex};

use filter::remove_contained;
use search::{build_text_set, collect_repeats};
use suffix_tree::SuffixTree;

/// Detect the clone groups of one file against the index. `file_blocks`
/// must all belong to one resource, ordered by `index_in_file`. Results are
/// ordered by position in the file, longest group first on ties.
pub fn detect<I: CloneIndex + ?Sized>(index: &I, file_blocks: &[Block]) -> Vec<CloneGroup> {
    let cancel = AtomicBool::new(false);
    detect_interruptible(index, file_blocks, &cancel)
        .expect("detection without cancellation always completes")
}

/// [`detect`], polling `cancel` between units of work. Returns `None` as
/// soon as the flag is observed raised; the index is left untouched either
/// way.
pub fn detect_interruptible<I: CloneIndex + ?Sized>(
    index: &I,
    file_blocks: &[Block],
    cancel: &AtomicBool,
) -> Option<Vec<CloneGroup>> {
    if file_blocks.is_empty() {
        return Some(Vec::new());
    }

    let Some(text_set) = build_text_set(index, file_blocks) else {
        return Some(Vec::new()); // no match anywhere, skip tree construction
    };

    let tree = SuffixTree::build(&text_set.symbols, cancel)?;
    let candidates = collect_repeats(&tree, &text_set, cancel)?;
    let mut groups = remove_contained(candidates, cancel)?;

    groups.sort_by(|a, b| {
        a.origin_part
            .unit_start
            .cmp(&b.origin_part.unit_start)
            .then(b.clone_unit_length.cmp(&a.clone_unit_length))
    });
    Some(groups)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
