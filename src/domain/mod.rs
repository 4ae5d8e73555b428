pub mod entry;
pub mod item;

pub use entry::CacheEntry;
pub use item::{host_of, DisplayItem, ItemId, ItemKind, RankedItem, RawItem};
