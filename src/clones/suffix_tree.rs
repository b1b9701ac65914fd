//! Generalized suffix tree over block-hash symbols.
//!
//! Ukkonen's online construction, O(total length), over the concatenation
//! of all text sequences with a unique terminator symbol after each text.
//! Terminators occur exactly once, so no repeated substring spans a text
//! boundary and every internal node's path label is terminator-free.
//!
//! The tree is an arena: nodes are addressed by index into `nodes`, child
//! edges store `(start, end)` index pairs into the shared symbol array, and
//! suffix links are arena indices with a sentinel for "none". Leaf edges use
//! an open-end sentinel resolved against the symbol count when read.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::block::BlockHash;

/// One symbol of the generalized text: a block hash, or the unique
/// terminator closing text number `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Symbol {
    Block(BlockHash),
    Terminator(u32),
}

pub(super) const ROOT: usize = 0;
const NO_LINK: usize = usize::MAX;
const OPEN_END: usize = usize::MAX;

/// How many construction steps run between cancellation polls.
const CANCEL_POLL_MASK: usize = 0x3ff;

struct Node {
    /// Label of the edge entering this node: `symbols[start..end]`.
    start: usize,
    end: usize,
    link: usize,
    children: HashMap<Symbol, usize>,
}

pub(super) struct SuffixTree<'a> {
    symbols: &'a [Symbol],
    nodes: Vec<Node>,
}

impl<'a> SuffixTree<'a> {
    /// Build the tree. Returns `None` if `cancel` was raised mid-build.
    pub(super) fn build(symbols: &'a [Symbol], cancel: &AtomicBool) -> Option<SuffixTree<'a>> {
        let mut builder = Builder {
            symbols,
            nodes: vec![Node {
                start: 0,
                end: 0,
                link: NO_LINK,
                children: HashMap::new(),
            }],
            active_node: ROOT,
            active_edge: 0,
            active_length: 0,
            remainder: 0,
        };
        for pos in 0..symbols.len() {
            if pos & CANCEL_POLL_MASK == 0 && cancel.load(Ordering::Relaxed) {
                return None;
            }
            builder.extend(pos);
        }
        Some(SuffixTree {
            symbols,
            nodes: builder.nodes,
        })
    }

    pub(super) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn total_len(&self) -> usize {
        self.symbols.len()
    }

    pub(super) fn is_leaf(&self, node: usize) -> bool {
        self.nodes[node].children.is_empty()
    }

    /// Length of the edge entering `node`, with leaf open-ends resolved.
    pub(super) fn edge_len(&self, node: usize) -> usize {
        let n = &self.nodes[node];
        n.end.min(self.symbols.len()) - n.start
    }

    pub(super) fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[node].children.values().copied()
    }
}

struct Builder<'a> {
    symbols: &'a [Symbol],
    nodes: Vec<Node>,
    active_node: usize,
    active_edge: usize,
    active_length: usize,
    remainder: usize,
}

impl Builder<'_> {
    fn new_node(&mut self, start: usize, end: usize) -> usize {
        self.nodes.push(Node {
            start,
            end,
            link: NO_LINK,
            children: HashMap::new(),
        });
        self.nodes.len() - 1
    }

    /// Edge length as seen while symbol `pos` is being inserted.
    fn edge_length(&self, node: usize, pos: usize) -> usize {
        let n = &self.nodes[node];
        n.end.min(pos + 1) - n.start
    }

    /// Record `node` as the target of the suffix link waiting from the
    /// previous step of this phase, then make it the one waiting.
    fn chain_link(&mut self, pending: &mut usize, node: usize) {
        if *pending != NO_LINK {
            self.nodes[*pending].link = node;
        }
        *pending = node;
    }

    /// One phase of Ukkonen's construction: insert the symbol at `pos`.
    fn extend(&mut self, pos: usize) {
        self.remainder += 1;
        let mut pending = NO_LINK;

        while self.remainder > 0 {
            if self.active_length == 0 {
                self.active_edge = pos;
            }
            let edge_symbol = self.symbols[self.active_edge];

            match self.nodes[self.active_node].children.get(&edge_symbol).copied() {
                None => {
                    let leaf = self.new_node(pos, OPEN_END);
                    let active = self.active_node;
                    self.nodes[active].children.insert(edge_symbol, leaf);
                    self.chain_link(&mut pending, active);
                }
                Some(next) => {
                    // Walk down when the active point sits past this edge.
                    let edge_len = self.edge_length(next, pos);
                    if self.active_length >= edge_len {
                        self.active_node = next;
                        self.active_edge += edge_len;
                        self.active_length -= edge_len;
                        continue;
                    }
                    // Rule 3: the symbol is already on the edge.
                    if self.symbols[self.nodes[next].start + self.active_length]
                        == self.symbols[pos]
                    {
                        self.active_length += 1;
                        let active = self.active_node;
                        self.chain_link(&mut pending, active);
                        break;
                    }
                    // Rule 2: split the edge and branch.
                    let split_start = self.nodes[next].start;
                    let split = self.new_node(split_start, split_start + self.active_length);
                    let active = self.active_node;
                    self.nodes[active].children.insert(edge_symbol, split);

                    let leaf = self.new_node(pos, OPEN_END);
                    self.nodes[split].children.insert(self.symbols[pos], leaf);

                    self.nodes[next].start += self.active_length;
                    let next_symbol = self.symbols[self.nodes[next].start];
                    self.nodes[split].children.insert(next_symbol, next);

                    self.chain_link(&mut pending, split);
                }
            }

            self.remainder -= 1;
            if self.active_node == ROOT && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = pos - self.remainder + 1;
            } else if self.active_node != ROOT {
                let link = self.nodes[self.active_node].link;
                self.active_node = if link == NO_LINK { ROOT } else { link };
            }
        }
    }
}

#[cfg(test)]
#[path = "suffix_tree_test.rs"]
mod tests;
