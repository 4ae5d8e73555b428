use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::{CacheEntry, DisplayItem};
use crate::errors::HnResult;
use crate::services::{CacheLookup, CacheStatus};

#[derive(Serialize)]
struct JsonPage<'a> {
    status: CacheStatus,
    elapsed_ms: u64,
    #[serde(flatten)]
    entry: &'a CacheEntry,
}

/// Format: " 1. {title} ({host})" followed by a details line.
pub fn format_story(position: usize, story: &DisplayItem) -> String {
    let title = if story.item.title.is_empty() {
        story.item.url.as_str()
    } else {
        story.item.title.as_str()
    };

    let mut line = format!("{:>2}. {}", position, title);
    if !story.host.is_empty() {
        line.push_str(&format!(" ({})", story.host));
    }

    line.push_str(&format!(
        "\n    {} points by {} | {} comments",
        story.item.score, story.item.by, story.item.descendants
    ));

    line
}

/// Render a lookup the way the page footer did: the stories, then how
/// long the request took and where the stories came from.
pub fn format_text(lookup: &CacheLookup, elapsed: Duration, now: Instant) -> String {
    let entry = &lookup.entry;
    let mut out = String::new();

    if entry.is_empty() {
        out.push_str("No stories found.\n");
    }

    for (i, story) in entry.stories.iter().enumerate() {
        out.push_str(&format_story(i + 1, story));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nRendered in {:.2?} (cache {}, {} of {} stories, fetched {}s ago)",
        elapsed,
        lookup.status,
        entry.len(),
        entry.count,
        entry.age_at(now).as_secs()
    ));

    out
}

pub fn format_json(lookup: &CacheLookup, elapsed: Duration) -> HnResult<String> {
    let page = JsonPage {
        status: lookup.status,
        elapsed_ms: elapsed.as_millis() as u64,
        entry: &lookup.entry,
    };
    Ok(serde_json::to_string_pretty(&page)?)
}
