use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::domain::{ItemId, RawItem};
use crate::errors::{HnError, HnResult};
use crate::sources::traits::{ItemSource, ListingSource};

const USER_AGENT: &str = concat!("quiet-hn/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the Hacker News Firebase API. Clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct HackerNewsClient {
    client: Client,
    base_url: Url,
}

impl HackerNewsClient {
    pub fn new(config: &Config) -> HnResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: Self::parse_base_url(&config.api_url)?,
        })
    }

    /// A trailing slash keeps `Url::join` from dropping the last segment.
    fn parse_base_url(api_url: &str) -> HnResult<Url> {
        let normalized = format!("{}/", api_url.trim_end_matches('/'));
        Url::parse(&normalized).map_err(|e| HnError::InvalidUrl(e.to_string()))
    }

    fn endpoint(&self, path: &str) -> HnResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| HnError::InvalidUrl(e.to_string()))
    }

    fn top_stories_url(&self) -> HnResult<Url> {
        self.endpoint("topstories.json")
    }

    fn item_url(&self, id: ItemId) -> HnResult<Url> {
        self.endpoint(&format!("item/{}.json", id))
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> HnResult<T> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.json()?)
    }
}

impl ListingSource for HackerNewsClient {
    fn top_items(&self) -> HnResult<Vec<ItemId>> {
        let url = self.top_stories_url()?;
        self.get_json(url)
            .map_err(|e| HnError::Listing(e.to_string()))
    }
}

impl ItemSource for HackerNewsClient {
    fn get_item(&self, id: ItemId) -> HnResult<RawItem> {
        let url = self.item_url(id)?;

        // Unknown and deleted ids come back as a `null` body
        let item: Option<RawItem> = self
            .get_json(url)
            .map_err(|e| HnError::ItemResolution {
                id,
                reason: e.to_string(),
            })?;

        item.ok_or_else(|| HnError::ItemResolution {
            id,
            reason: "item does not exist".to_string(),
        })
    }
}
