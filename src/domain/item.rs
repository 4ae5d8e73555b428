use serde::{Deserialize, Serialize};
use url::Url;

/// Opaque handle into the Hacker News item namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Story,
    Comment,
    Job,
    Poll,
    PollOpt,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Story => "story",
            ItemKind::Comment => "comment",
            ItemKind::Job => "job",
            ItemKind::Poll => "poll",
            ItemKind::PollOpt => "pollopt",
            ItemKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An item as the item endpoint returns it. Fields the endpoint omits
/// fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub id: ItemId,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub descendants: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RawItem {
    pub fn new(id: u64, kind: ItemKind) -> Self {
        Self {
            id: ItemId(id),
            kind,
            url: String::new(),
            title: String::new(),
            by: String::new(),
            score: 0,
            time: 0,
            descendants: 0,
            text: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_by(mut self, by: impl Into<String>) -> Self {
        self.by = by.into();
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

/// A resolved item ready for rendering, with the link's host derived once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    #[serde(flatten)]
    pub item: RawItem,
    pub host: String,
}

impl DisplayItem {
    /// Stories with a link are the only items shown.
    pub fn is_story_link(&self) -> bool {
        self.item.kind == ItemKind::Story && !self.item.url.is_empty()
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }
}

impl From<RawItem> for DisplayItem {
    fn from(item: RawItem) -> Self {
        let host = host_of(&item.url);
        Self { item, host }
    }
}

/// Hostname of `url` without a leading "www.", or empty if there is none.
pub fn host_of(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .unwrap_or_default()
}

/// A display item tagged with its position in the candidate sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    pub item: DisplayItem,
    pub rank: usize,
}

impl RankedItem {
    pub fn new(item: DisplayItem, rank: usize) -> Self {
        Self { item, rank }
    }
}
