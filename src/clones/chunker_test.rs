use std::sync::Arc;

use super::*;

fn statements(hashes: &[u64]) -> Vec<Statement> {
    hashes
        .iter()
        .enumerate()
        .map(|(i, h)| Statement {
            hash: *h,
            start_line: i + 1,
            end_line: i + 1,
        })
        .collect()
}

fn resource(name: &str) -> Arc<str> {
    Arc::from(name)
}

#[test]
fn emits_one_block_per_window() {
    // N statements, block size B: exactly N - B + 1 blocks.
    let chunker = Chunker::new(3);
    let blocks = chunker.chunk(&resource("a.rs"), &statements(&[1, 2, 3, 4, 5]));
    assert_eq!(blocks.len(), 3);
    for (i, block) in blocks.iter().enumerate() {
        assert_eq!(block.index_in_file, i);
    }
}

#[test]
fn short_file_produces_no_blocks() {
    let chunker = Chunker::new(5);
    assert!(chunker.chunk(&resource("a.rs"), &statements(&[1, 2, 3, 4])).is_empty());
    assert!(chunker.chunk(&resource("a.rs"), &[]).is_empty());
}

#[test]
fn exact_size_file_produces_single_block() {
    let chunker = Chunker::new(4);
    let blocks = chunker.chunk(&resource("a.rs"), &statements(&[1, 2, 3, 4]));
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].index_in_file, 0);
}

#[test]
fn line_ranges_span_the_window() {
    let chunker = Chunker::new(2);
    let blocks = chunker.chunk(&resource("a.rs"), &statements(&[7, 8, 9]));
    assert_eq!((blocks[0].start_line, blocks[0].end_line), (1, 2));
    assert_eq!((blocks[1].start_line, blocks[1].end_line), (2, 3));
}

#[test]
fn identical_statements_identical_hash_sequences() {
    let chunker = Chunker::new(3);
    let a = chunker.chunk(&resource("a.rs"), &statements(&[1, 2, 3, 4, 5, 6]));
    let b = chunker.chunk(&resource("b.rs"), &statements(&[1, 2, 3, 4, 5, 6]));
    let hashes_a: Vec<_> = a.iter().map(|blk| blk.block_hash).collect();
    let hashes_b: Vec<_> = b.iter().map(|blk| blk.block_hash).collect();
    assert_eq!(hashes_a, hashes_b);
}

#[test]
fn different_content_different_hashes() {
    let chunker = Chunker::new(2);
    let a = chunker.chunk(&resource("a.rs"), &statements(&[1, 2]));
    let b = chunker.chunk(&resource("a.rs"), &statements(&[1, 3]));
    assert_ne!(a[0].block_hash, b[0].block_hash);
}

#[test]
fn window_order_matters() {
    let chunker = Chunker::new(2);
    let a = chunker.chunk(&resource("a.rs"), &statements(&[1, 2]));
    let b = chunker.chunk(&resource("a.rs"), &statements(&[2, 1]));
    assert_ne!(a[0].block_hash, b[0].block_hash);
}

#[test]
fn block_size_one_hashes_each_statement() {
    let chunker = Chunker::new(1);
    let blocks = chunker.chunk(&resource("a.rs"), &statements(&[5, 5, 6]));
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].block_hash, blocks[1].block_hash);
    assert_ne!(blocks[0].block_hash, blocks[2].block_hash);
}

#[test]
fn blocks_carry_the_resource_id() {
    let chunker = Chunker::new(1);
    let id = resource("src/lib.rs");
    let blocks = chunker.chunk(&id, &statements(&[1]));
    assert_eq!(blocks[0].resource_id, id);
}

#[test]
#[should_panic(expected = "block size")]
fn zero_block_size_fails_fast() {
    Chunker::new(0);
}

#[test]
#[should_panic(expected = "resource id")]
fn empty_resource_id_fails_fast() {
    Chunker::new(1).chunk(&resource(""), &statements(&[1]));
}
