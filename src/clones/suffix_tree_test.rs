use std::sync::atomic::AtomicBool;

use super::*;

fn symbols_of(hashes: &[u64]) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = hashes.iter().map(|h| Symbol::Block(BlockHash(*h))).collect();
    symbols.push(Symbol::Terminator(0));
    symbols
}

fn build(symbols: &[Symbol]) -> SuffixTree<'_> {
    SuffixTree::build(symbols, &AtomicBool::new(false)).unwrap()
}

/// Walk from the root matching `target`; true when the whole sequence is
/// spelled by a root path.
fn spells(tree: &SuffixTree<'_>, target: &[Symbol]) -> bool {
    let mut node = ROOT;
    let mut matched = 0;
    while matched < target.len() {
        let Some(child) = tree
            .children(node)
            .find(|&c| tree.symbols[tree.nodes[c].start] == target[matched])
        else {
            return false;
        };
        let start = tree.nodes[child].start;
        let len = tree.edge_len(child);
        for k in 0..len {
            if matched == target.len() {
                return true;
            }
            if tree.symbols[start + k] != target[matched] {
                return false;
            }
            matched += 1;
        }
        node = child;
    }
    true
}

fn leaf_count(tree: &SuffixTree<'_>) -> usize {
    (0..tree.node_count()).filter(|&n| tree.is_leaf(n)).count()
}

#[test]
fn every_suffix_is_spelled() {
    let symbols = symbols_of(&[1, 2, 3, 1, 2, 4]);
    let tree = build(&symbols);
    for i in 0..symbols.len() {
        assert!(spells(&tree, &symbols[i..]), "suffix {i} missing");
    }
}

#[test]
fn absent_sequences_are_not_spelled() {
    let symbols = symbols_of(&[1, 2, 3, 1, 2, 4]);
    let tree = build(&symbols);
    assert!(!spells(&tree, &symbols_of(&[2, 1])[..2]));
    assert!(!spells(&tree, &[Symbol::Block(BlockHash(9))]));
    assert!(!spells(&tree, &symbols_of(&[3, 2])[..2]));
    assert!(!spells(&tree, &symbols_of(&[1, 2, 3, 4])[..4]));
    // "1 2 4" closes the text, "1 2" repeats: both must be spelled.
    assert!(spells(&tree, &symbols_of(&[1, 2, 4])[..3]));
    assert!(spells(&tree, &symbols_of(&[1, 2, 4])[..2]));
}

#[test]
fn one_leaf_per_suffix() {
    // The final terminator is globally unique, so every suffix ends at
    // its own leaf.
    let symbols = symbols_of(&[5, 5, 5, 5]);
    let tree = build(&symbols);
    assert_eq!(leaf_count(&tree), symbols.len());
}

#[test]
fn repeated_symbol_runs() {
    let symbols = symbols_of(&[7, 7, 7]);
    let tree = build(&symbols);
    for i in 0..symbols.len() {
        assert!(spells(&tree, &symbols[i..]), "suffix {i} missing");
    }
    assert_eq!(leaf_count(&tree), 4);
}

#[test]
fn generalized_text_keeps_texts_apart() {
    // Two texts "1 2" and "1 2" with distinct terminators: the shared run
    // is spelled once, both terminator branches exist.
    let symbols = vec![
        Symbol::Block(BlockHash(1)),
        Symbol::Block(BlockHash(2)),
        Symbol::Terminator(0),
        Symbol::Block(BlockHash(1)),
        Symbol::Block(BlockHash(2)),
        Symbol::Terminator(1),
    ];
    let tree = build(&symbols);
    for i in 0..symbols.len() {
        assert!(spells(&tree, &symbols[i..]), "suffix {i} missing");
    }
    // "1 2" followed by either terminator: both present.
    assert!(spells(
        &tree,
        &[
            Symbol::Block(BlockHash(1)),
            Symbol::Block(BlockHash(2)),
            Symbol::Terminator(0),
        ]
    ));
    assert!(spells(
        &tree,
        &[
            Symbol::Block(BlockHash(1)),
            Symbol::Block(BlockHash(2)),
            Symbol::Terminator(1),
        ]
    ));
}

#[test]
fn cancellation_aborts_build() {
    let symbols = symbols_of(&(0..4096).collect::<Vec<u64>>());
    let cancel = AtomicBool::new(true);
    assert!(SuffixTree::build(&symbols, &cancel).is_none());
}

#[test]
fn single_symbol_text() {
    let symbols = symbols_of(&[42]);
    let tree = build(&symbols);
    assert!(spells(&tree, &symbols));
    assert_eq!(leaf_count(&tree), 2);
}
