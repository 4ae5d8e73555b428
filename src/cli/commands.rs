use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quiet-hn")]
#[command(about = "Hacker News top stories, without the noise")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print the current top stories
    Top {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Print the stories as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve repeated requests through one cache and print each result
    Watch {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Seconds between requests
        #[arg(short, long, default_value_t = 30)]
        interval: u64,

        /// Stop after this many requests (runs until interrupted if omitted)
        #[arg(short, long)]
        rounds: Option<u64>,
    },
}

/// Overrides for values otherwise taken from the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Number of top stories to display
    #[arg(short = 'n', long)]
    pub num_stories: Option<usize>,

    /// Cache lifetime in seconds (0 disables caching)
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Maximum concurrent item lookups (one per candidate if omitted)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Hacker News API base URL
    #[arg(long)]
    pub api_url: Option<String>,
}
