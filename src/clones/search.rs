//! Text-set construction and repeat collection.
//!
//! Phase 1 builds the generalized text: the origin file's block-hash
//! sequence first, then, for every unique hash in the origin file, the
//! block runs of every other resource that also contains that hash. Each
//! unique hash is fetched from the index exactly once; the origin resource
//! is never retrieved from the index. Retrieved blocks are grouped per
//! resource in lexicographic id order and split into maximal runs of
//! consecutive `index_in_file` values, so adjacency in a text always means
//! adjacency in the file.
//!
//! Phase 2 walks the finished suffix tree. Every internal node is a
//! right-maximal repeat; its leaf positions are the occurrences. Nodes
//! whose occurrence set includes the origin text become candidate clone
//! groups (left-redundant candidates are removed later by the containment
//! filter).

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::block::Block;
use super::groups::{CloneGroup, ClonePart};
use super::index::CloneIndex;
use super::suffix_tree::{ROOT, SuffixTree, Symbol};

/// How many tree nodes are processed between cancellation polls.
const CANCEL_POLL_MASK: usize = 0xfff;

/// One contiguous run of blocks from a single resource.
pub(super) struct Text {
    pub blocks: Vec<Block>,
}

/// The generalized text: `texts[0]` is the origin file's full sequence.
pub(super) struct TextSet {
    pub texts: Vec<Text>,
    pub symbols: Vec<Symbol>,
    /// Global symbol offset where each text starts.
    starts: Vec<usize>,
}

impl TextSet {
    /// Map a global symbol position to `(text index, block offset)`.
    fn locate(&self, pos: usize) -> (usize, usize) {
        let text = self.starts.partition_point(|&s| s <= pos) - 1;
        (text, pos - self.starts[text])
    }
}

/// Build the text set, or `None` when the origin file provably has no
/// clones: nothing retrieved from the index and no hash repeated in the
/// file itself.
pub(super) fn build_text_set<I: CloneIndex + ?Sized>(
    index: &I,
    file_blocks: &[Block],
) -> Option<TextSet> {
    let origin_id = &file_blocks[0].resource_id;
    let mut seen: HashSet<_> = HashSet::new();
    let mut by_resource: BTreeMap<Arc<str>, Vec<Block>> = BTreeMap::new();

    for block in file_blocks {
        if !seen.insert(block.block_hash) {
            continue; // each unique hash hits the index once
        }
        for found in index.blocks_by_hash(block.block_hash) {
            if found.resource_id != *origin_id {
                by_resource
                    .entry(Arc::clone(&found.resource_id))
                    .or_default()
                    .push(found.clone());
            }
        }
    }

    if by_resource.is_empty() && seen.len() == file_blocks.len() {
        return None; // no external match, no internal repetition
    }

    let mut texts = vec![Text {
        blocks: file_blocks.to_vec(),
    }];
    for (_, mut blocks) in by_resource {
        blocks.sort_by_key(|b| b.index_in_file);
        blocks.dedup_by_key(|b| b.index_in_file);
        let mut run: Vec<Block> = Vec::new();
        for block in blocks {
            if let Some(last) = run.last()
                && block.index_in_file != last.index_in_file + 1
            {
                texts.push(Text {
                    blocks: std::mem::take(&mut run),
                });
            }
            run.push(block);
        }
        if !run.is_empty() {
            texts.push(Text { blocks: run });
        }
    }

    let mut symbols = Vec::new();
    let mut starts = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        starts.push(symbols.len());
        symbols.extend(text.blocks.iter().map(|b| Symbol::Block(b.block_hash)));
        symbols.push(Symbol::Terminator(u32::try_from(i).unwrap_or(u32::MAX)));
    }

    Some(TextSet {
        texts,
        symbols,
        starts,
    })
}

/// Collect one candidate group per internal tree node whose occurrences
/// include the origin text. Returns `None` if cancelled.
pub(super) fn collect_repeats(
    tree: &SuffixTree<'_>,
    text_set: &TextSet,
    cancel: &AtomicBool,
) -> Option<Vec<CloneGroup>> {
    // Breadth-first order with string depth per node; children always come
    // after their parent, so a reverse sweep aggregates leaves bottom-up.
    let mut order = Vec::with_capacity(tree.node_count());
    let mut depth = vec![0usize; tree.node_count()];
    order.push(ROOT);
    let mut i = 0;
    while i < order.len() {
        let node = order[i];
        for child in tree.children(node) {
            depth[child] = depth[node] + tree.edge_len(child);
            order.push(child);
        }
        i += 1;
    }

    let origin_id = text_set.texts[0].blocks[0].resource_id.clone();
    let total = tree.total_len();
    let mut positions: Vec<Vec<usize>> = vec![Vec::new(); tree.node_count()];
    let mut groups = Vec::new();

    for (step, &node) in order.iter().rev().enumerate() {
        if step & CANCEL_POLL_MASK == 0 && cancel.load(Ordering::Relaxed) {
            return None;
        }

        if tree.is_leaf(node) {
            // The leaf's path spells symbols[suffix_start..total].
            positions[node] = vec![total - depth[node]];
            continue;
        }

        let mut merged = Vec::new();
        for child in tree.children(node) {
            merged.append(&mut positions[child]);
        }

        if node != ROOT && depth[node] >= 1 {
            if let Some(group) = group_from(&merged, depth[node], &origin_id, text_set) {
                groups.push(group);
            }
        }
        positions[node] = merged;
    }

    Some(groups)
}

/// Turn one repeat (length + occurrence positions) into a clone group, or
/// `None` when no occurrence lies in the origin text.
fn group_from(
    occurrences: &[usize],
    length: usize,
    origin_id: &Arc<str>,
    text_set: &TextSet,
) -> Option<CloneGroup> {
    let mut parts = Vec::with_capacity(occurrences.len());
    let mut has_origin = false;

    for &pos in occurrences {
        let (text, offset) = text_set.locate(pos);
        let blocks = &text_set.texts[text].blocks;
        debug_assert!(offset + length <= blocks.len());
        let first = &blocks[offset];
        let last = &blocks[offset + length - 1];
        if text == 0 {
            has_origin = true;
        }
        parts.push(ClonePart {
            resource_id: Arc::clone(&first.resource_id),
            unit_start: first.index_in_file,
            start_line: first.start_line,
            end_line: last.end_line,
        });
    }

    has_origin.then(|| CloneGroup::new(length, origin_id, parts))
}
