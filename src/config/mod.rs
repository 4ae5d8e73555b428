use std::num::NonZeroUsize;
use std::time::Duration;

use crate::cli::FetchArgs;
use crate::errors::{HnError, HnResult};

pub const DEFAULT_API_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const DEFAULT_NUM_STORIES: usize = 30;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub num_stories: usize,
    pub cache_ttl: Duration,
    /// Maximum in-flight item lookups; `None` runs one per candidate.
    pub concurrency: Option<NonZeroUsize>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            num_stories: DEFAULT_NUM_STORIES,
            cache_ttl: DEFAULT_CACHE_TTL,
            concurrency: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> HnResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Values are parsed
    /// but not validated; `with_args` validates once overrides are applied.
    pub fn from_lookup<F>(lookup: F) -> HnResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("QUIET_HN_API_URL").unwrap_or(defaults.api_url);

        let num_stories = match lookup("QUIET_HN_NUM_STORIES") {
            Some(v) => parse_number("QUIET_HN_NUM_STORIES", &v)?,
            None => defaults.num_stories,
        };

        let cache_ttl = match lookup("QUIET_HN_CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(parse_number("QUIET_HN_CACHE_TTL_SECS", &v)?),
            None => defaults.cache_ttl,
        };

        let concurrency = match lookup("QUIET_HN_CONCURRENCY") {
            Some(v) => concurrency_limit(parse_number("QUIET_HN_CONCURRENCY", &v)?)?,
            None => defaults.concurrency,
        };

        let timeout = match lookup("QUIET_HN_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("QUIET_HN_TIMEOUT_SECS", &v)?),
            None => defaults.timeout,
        };

        Ok(Self {
            api_url,
            num_stories,
            cache_ttl,
            concurrency,
            timeout,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_args(mut self, args: &FetchArgs) -> HnResult<Self> {
        if let Some(num_stories) = args.num_stories {
            self.num_stories = num_stories;
        }
        if let Some(ttl) = args.ttl {
            self.cache_ttl = Duration::from_secs(ttl);
        }
        if let Some(concurrency) = args.concurrency {
            self.concurrency = concurrency_limit(concurrency)?;
        }
        if let Some(api_url) = &args.api_url {
            self.api_url = api_url.clone();
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> HnResult<()> {
        if self.num_stories == 0 {
            return Err(HnError::Config(
                "number of stories must be positive".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(HnError::Config("timeout must be positive".to_string()));
        }

        url::Url::parse(&self.api_url).map_err(|e| HnError::InvalidUrl(e.to_string()))?;

        Ok(())
    }
}

/// Turn a raw concurrency setting into a limit; zero is rejected.
pub fn concurrency_limit(value: usize) -> HnResult<Option<NonZeroUsize>> {
    NonZeroUsize::new(value)
        .map(Some)
        .ok_or_else(|| HnError::Config("concurrency must be positive".to_string()))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> HnResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| HnError::Config(format!("{} is not a valid number: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.num_stories, 30);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.concurrency, None);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("QUIET_HN_API_URL", "http://localhost:8080/v0"),
            ("QUIET_HN_NUM_STORIES", "10"),
            ("QUIET_HN_CACHE_TTL_SECS", "0"),
            ("QUIET_HN_CONCURRENCY", "8"),
            ("QUIET_HN_TIMEOUT_SECS", " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/v0");
        assert_eq!(config.num_stories, 10);
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.concurrency, NonZeroUsize::new(8));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_stories_rejected() {
        let err = Config::from_lookup(lookup(&[("QUIET_HN_NUM_STORIES", "0")]))
            .unwrap()
            .with_args(&FetchArgs::default())
            .unwrap_err();
        assert!(matches!(err, HnError::Config(_)));
    }

    #[test]
    fn test_args_fix_invalid_env_value() {
        let config = Config::from_lookup(lookup(&[
            ("QUIET_HN_NUM_STORIES", "0"),
            ("QUIET_HN_API_URL", "not a url"),
        ]))
        .unwrap()
        .with_args(&FetchArgs {
            num_stories: Some(5),
            api_url: Some("http://localhost:8080/v0".to_string()),
            ..FetchArgs::default()
        })
        .unwrap();

        assert_eq!(config.num_stories, 5);
        assert_eq!(config.api_url, "http://localhost:8080/v0");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = Config::from_lookup(lookup(&[("QUIET_HN_CONCURRENCY", "0")])).unwrap_err();
        assert!(matches!(err, HnError::Config(_)));
    }

    #[test]
    fn test_garbage_number_rejected() {
        let err = Config::from_lookup(lookup(&[("QUIET_HN_CACHE_TTL_SECS", "five")])).unwrap_err();
        assert!(err.to_string().contains("QUIET_HN_CACHE_TTL_SECS"));
    }

    #[test]
    fn test_args_override_env() {
        let config = Config::from_lookup(lookup(&[("QUIET_HN_NUM_STORIES", "10")]))
            .unwrap()
            .with_args(&FetchArgs {
                num_stories: Some(5),
                ttl: Some(60),
                concurrency: Some(4),
                api_url: None,
            })
            .unwrap();

        assert_eq!(config.num_stories, 5);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.concurrency, NonZeroUsize::new(4));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_args_zero_stories_rejected() {
        let args = FetchArgs {
            num_stories: Some(0),
            ..FetchArgs::default()
        };
        assert!(Config::default().with_args(&args).is_err());
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let err = Config::from_lookup(lookup(&[("QUIET_HN_API_URL", "not a url")]))
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, HnError::InvalidUrl(_)));
    }
}
