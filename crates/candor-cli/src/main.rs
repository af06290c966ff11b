mod discovery;
mod input;
mod posts;

use std::path::PathBuf;

use candor_ranking::{CompanyFilter, FeedOrder, TrendingPeriod};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "candor-cli")]
#[command(about = "Candor command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify review text as positive, negative or neutral
    Classify {
        /// Text to classify; read from stdin when omitted
        #[arg(long)]
        text: Option<String>,

        /// Print keyword counts alongside the label
        #[arg(long)]
        verbose: bool,
    },
    /// Rank posts related to a reference post
    Related {
        /// JSON array of posts (`-` for stdin)
        #[arg(long)]
        input: PathBuf,

        /// Id of the post the panel is shown for
        #[arg(long)]
        exclude: Uuid,

        /// Tag of the reference post (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Company of the reference post
        #[arg(long)]
        company: Option<Uuid>,

        /// Maximum number of related posts
        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
    },
    /// Order posts for a home-feed tab
    Feed {
        /// JSON array of posts (`-` for stdin)
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value = "trending")]
        order: FeedOrder,

        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
    },
    /// Show the most used tags
    Tags {
        /// JSON array of posts with `tags` (`-` for stdin)
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
    },
    /// Show companies with the most recent posts
    Trending {
        /// JSON array of `{company_id, company_name, industry, created_at}` rows
        #[arg(long)]
        input: PathBuf,

        /// JSON array of `{company_id, post_count}` rows
        #[arg(long)]
        totals: Option<PathBuf>,

        #[arg(long, default_value = "week")]
        period: TrendingPeriod,

        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
    },
    /// Search the company directory
    Companies {
        /// JSON array of `{id, name, industry, location, tier, post_count}` rows
        #[arg(long)]
        input: PathBuf,

        /// Case-insensitive name or location fragment
        #[arg(long, default_value = "")]
        search: String,

        /// Exact industry; `All` matches any
        #[arg(long)]
        industry: Option<String>,

        /// Exact tier; `All` matches any
        #[arg(long)]
        tier: Option<String>,
    },
    /// Validate a post draft and print the record that would be stored
    Draft {
        /// JSON post draft (`-` for stdin)
        #[arg(long)]
        input: PathBuf,

        /// Author id; dropped for anonymous drafts
        #[arg(long)]
        author: Option<Uuid>,
    },
}

/// Accept limits in `1..=50`.
fn parse_limit(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|e| format!("invalid limit '{raw}': {e}"))?;
    if (1..=50).contains(&value) {
        Ok(value)
    } else {
        Err(format!("limit must be between 1 and 50, got {value}"))
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = candor_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Classify { text, verbose }) => posts::run_classify(text, verbose)?,
        Some(Commands::Related {
            input,
            exclude,
            tags,
            company,
            limit,
        }) => {
            let reference = candor_core::RelatedReference {
                exclude_id: exclude,
                tags,
                company_id: company,
            };
            discovery::run_related(
                &config,
                &input,
                &reference,
                limit.unwrap_or(config.related_limit),
            )?;
        }
        Some(Commands::Feed {
            input,
            order,
            limit,
        }) => discovery::run_feed(
            &input,
            order,
            limit.unwrap_or(candor_ranking::DEFAULT_FEED_LIMIT),
        )?,
        Some(Commands::Tags { input, limit }) => {
            discovery::run_tags(&input, limit.unwrap_or(config.tag_cloud_limit))?;
        }
        Some(Commands::Trending {
            input,
            totals,
            period,
            limit,
        }) => discovery::run_trending(
            &input,
            totals.as_deref(),
            period,
            limit.unwrap_or(config.trending_limit),
        )?,
        Some(Commands::Companies {
            input,
            search,
            industry,
            tier,
        }) => discovery::run_companies(
            &input,
            &CompanyFilter {
                search,
                industry,
                tier,
            },
        )?,
        Some(Commands::Draft { input, author }) => posts::run_draft(&input, author)?,
        None => println!("candor-cli: run with --help to list commands"),
    }

    Ok(())
}
