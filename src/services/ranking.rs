use std::collections::HashMap;

use crate::domain::{DisplayItem, ItemId, RankedItem};

/// Map each identifier to its position in `ids`. A repeated identifier
/// keeps the position of its last occurrence.
pub fn capture_order(ids: &[ItemId]) -> HashMap<ItemId, usize> {
    ids.iter()
        .enumerate()
        .map(|(rank, &id)| (id, rank))
        .collect()
}

/// Restore candidate order and keep at most `count` items.
pub fn assemble(mut ranked: Vec<RankedItem>, count: usize) -> Vec<DisplayItem> {
    ranked.sort_by_key(|r| r.rank);
    ranked.truncate(count);
    ranked.into_iter().map(|r| r.item).collect()
}
