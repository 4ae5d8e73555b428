use crate::domain::{ItemId, RawItem};
use crate::errors::HnResult;

/// Supplies the ordered candidate identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait ListingSource: Send + Sync {
    fn top_items(&self) -> HnResult<Vec<ItemId>>;
}

/// Resolves one identifier to its item. Called from many threads at once.
#[cfg_attr(test, mockall::automock)]
pub trait ItemSource: Send + Sync {
    fn get_item(&self, id: ItemId) -> HnResult<RawItem>;
}
