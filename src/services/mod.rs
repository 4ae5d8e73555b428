pub mod cache_gate;
pub mod ranking;
pub mod resolver;
pub mod top_stories;

pub use cache_gate::{CacheGate, CacheLookup, CacheStatus};
pub use ranking::{assemble, capture_order};
pub use resolver::Resolver;
pub use top_stories::TopStoriesService;
