use tracing::{info, warn};

use crate::domain::DisplayItem;
use crate::errors::HnResult;
use crate::services::ranking::{assemble, capture_order};
use crate::services::resolver::Resolver;
use crate::sources::{ItemSource, ListingSource};

/// One uncached aggregation run: list, resolve, filter, order, truncate.
pub struct TopStoriesService<L: ListingSource, I: ItemSource> {
    listing: L,
    items: I,
    resolver: Resolver,
    count: usize,
}

impl<L: ListingSource, I: ItemSource> TopStoriesService<L, I> {
    pub fn new(listing: L, items: I, resolver: Resolver, count: usize) -> Self {
        Self {
            listing,
            items,
            resolver,
            count,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Fetch the current top stories. Only a listing failure is an error;
    /// items that fail to resolve are left out.
    pub fn fetch(&self) -> HnResult<Vec<DisplayItem>> {
        let ids = self.listing.top_items().inspect_err(|e| {
            warn!(error = %e, "listing request failed");
        })?;

        let order = capture_order(&ids);
        let ranked = self.resolver.resolve(&self.items, &ids, &order);
        let qualifying = ranked.len();
        let stories = assemble(ranked, self.count);

        info!(
            candidates = ids.len(),
            qualifying,
            returned = stories.len(),
            "aggregated top stories"
        );

        Ok(stories)
    }
}
