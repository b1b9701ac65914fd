//! Clone groups and their parts.

use std::cmp::Ordering;
use std::sync::Arc;

/// One occurrence of a clone: a contiguous run of blocks in one resource.
/// Equality is by all four fields; two parts are the same occurrence only
/// when every field matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonePart {
    pub resource_id: Arc<str>,
    /// Block index where the shared run begins in this resource.
    pub unit_start: usize,
    pub start_line: usize,
    pub end_line: usize,
}

impl ClonePart {
    /// Block interval covered by this part for a run of `len` blocks.
    pub fn interval(&self, len: usize) -> (usize, usize) {
        (self.unit_start, self.unit_start + len)
    }
}

/// Canonical part order: lexicographic resource id, then unit start.
pub fn cmp_parts(a: &ClonePart, b: &ClonePart) -> Ordering {
    a.resource_id
        .cmp(&b.resource_id)
        .then(a.unit_start.cmp(&b.unit_start))
}

/// One detected clone: `clone_unit_length` contiguous blocks shared by every
/// part. Finalized by the detector and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneGroup {
    /// Number of contiguous blocks shared by all parts.
    pub clone_unit_length: usize,
    /// The part belonging to the resource under analysis. Always one of
    /// `parts`; when the clone occurs several times in that resource, the
    /// occurrence with the smallest `unit_start`.
    pub origin_part: ClonePart,
    /// The full occurrence set, origin included, sorted by `cmp_parts`.
    pub parts: Vec<ClonePart>,
}

impl CloneGroup {
    /// Build a finalized group: sorts parts canonically and designates the
    /// origin occurrence for `origin_resource`.
    pub fn new(clone_unit_length: usize, origin_resource: &str, mut parts: Vec<ClonePart>) -> Self {
        assert!(clone_unit_length >= 1, "clone length must be at least 1");
        parts.sort_by(cmp_parts);
        parts.dedup();
        let origin_part = parts
            .iter()
            .find(|p| p.resource_id.as_ref() == origin_resource)
            .expect("clone group must contain the origin resource")
            .clone();
        CloneGroup {
            clone_unit_length,
            origin_part,
            parts,
        }
    }

    /// Parts other than the origin occurrence.
    pub fn duplicates(&self) -> impl Iterator<Item = &ClonePart> {
        self.parts.iter().filter(|p| **p != self.origin_part)
    }
}

#[cfg(test)]
#[path = "groups_test.rs"]
mod tests;
