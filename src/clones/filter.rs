//! Containment suppression.
//!
//! A candidate group is redundant when a longer group covers every one of
//! its occurrences: same resource, and the shorter run's block interval
//! nested inside the longer run's interval. Such candidates restate a
//! sub-range of an already-reported clone at the same relative alignment.
//! Partially-overlapping, non-nested groups are all kept.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};

use super::groups::{CloneGroup, ClonePart, cmp_parts};

/// How many candidate pairs are checked between cancellation polls.
const CANCEL_POLL_MASK: usize = 0xfff;

/// Drop every group fully covered by another group. Returns `None` if
/// cancelled. Surviving groups keep their input order.
pub(super) fn remove_contained(
    groups: Vec<CloneGroup>,
    cancel: &AtomicBool,
) -> Option<Vec<CloneGroup>> {
    let mut keep = vec![true; groups.len()];
    let mut step = 0usize;

    for (i, group) in groups.iter().enumerate() {
        for (j, other) in groups.iter().enumerate() {
            step += 1;
            if step & CANCEL_POLL_MASK == 0 && cancel.load(Ordering::Relaxed) {
                return None;
            }
            if i == j || group == other {
                continue;
            }
            if contains_in(group, other) {
                keep[i] = false;
                break;
            }
        }
    }

    Some(
        groups
            .into_iter()
            .zip(keep)
            .filter_map(|(g, k)| k.then_some(g))
            .collect(),
    )
}

/// Whether every part of `inner` is covered by a part of `outer` on the
/// same resource with a nested block interval.
pub(super) fn contains_in(inner: &CloneGroup, outer: &CloneGroup) -> bool {
    if inner.clone_unit_length > outer.clone_unit_length {
        return false;
    }
    inner
        .parts
        .iter()
        .all(|part| covered_by(part, inner.clone_unit_length, outer))
}

/// Containment comparator: find the covering part of `outer` for one
/// occurrence, if any. Parts are sorted by `cmp_parts`, and all of
/// `outer`'s parts share one length, so only the closest part at or before
/// `part` on the same resource can cover it.
fn covered_by(part: &ClonePart, len: usize, outer: &CloneGroup) -> bool {
    let at_or_before = outer
        .parts
        .partition_point(|q| cmp_parts(q, part) != CmpOrdering::Greater);
    if at_or_before == 0 {
        return false;
    }
    let candidate = &outer.parts[at_or_before - 1];
    if candidate.resource_id != part.resource_id {
        return false;
    }
    let (inner_start, inner_end) = part.interval(len);
    let (outer_start, outer_end) = candidate.interval(outer.clone_unit_length);
    outer_start <= inner_start && inner_end <= outer_end
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
