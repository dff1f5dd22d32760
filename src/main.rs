use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use listing_scout::config::AppConfig;
use listing_scout::ebay::{BrowseClient, FixtureSource, ListingSource};
use listing_scout::models::{Category, ListingType, SearchParameters, SellerTier, SellerType};
use listing_scout::report::export::{default_file_name, export_to_path};
use listing_scout::report::render::render_report;
use listing_scout::search::SearchService;
use listing_scout::shell::Shell;
use listing_scout::SearchError;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "listing-scout")]
#[command(about = "Search eBay listings filtered by seller reputation and total price")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search(SearchArgs),
    /// Interactive session with saved searches
    Shell {
        /// Answer searches from a saved Browse API response instead of the live API
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// List the category names accepted by --category
    Categories,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search term
    #[arg(required = true, num_args = 1..)]
    term: Vec<String>,
    #[arg(long, default_value_t = Category::AllCategories)]
    category: Category,
    /// All, Auction, Fixed Price or Best Offer
    #[arg(long = "listing-type", default_value_t = ListingType::All)]
    listing_type: ListingType,
    /// All or Charity
    #[arg(long = "seller-type", default_value_t = SellerType::All)]
    seller_type: SellerType,
    /// Accepted seller ratings, comma separated (Elite, Excellent, Very Good, Good)
    #[arg(long = "rating", value_delimiter = ',', value_parser = SellerTier::parse_selectable)]
    ratings: Vec<SellerTier>,
    /// Maximum price including shipping
    #[arg(
        long = "max-price",
        default_value_t = 150,
        value_parser = clap::value_parser!(u32).range(1..=10_000)
    )]
    max_price: u32,
    /// Number of listings to fetch
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..=100))]
    limit: u32,
    /// Write results as CSV; without a path a timestamped file name is used
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    export: Option<String>,
    /// Answer the search from a saved Browse API response instead of the live API
    #[arg(long)]
    fixture: Option<PathBuf>,
}

impl SearchArgs {
    fn to_params(&self) -> SearchParameters {
        SearchParameters {
            search_term: self.term.join(" "),
            category: self.category,
            listing_type: self.listing_type,
            seller_type: self.seller_type,
            seller_ratings: self.ratings.iter().copied().collect(),
            max_price: self.max_price,
            limit: self.limit,
        }
    }
}

fn build_service(config: &AppConfig, fixture: Option<PathBuf>) -> Result<SearchService> {
    let source: Box<dyn ListingSource> = match fixture {
        Some(path) => Box::new(FixtureSource::new(path)),
        None => Box::new(BrowseClient::new(config)?),
    };
    Ok(SearchService::new(source, config))
}

async fn run_search(config: &AppConfig, args: SearchArgs) -> Result<()> {
    let params = args.to_params();
    let service = build_service(config, args.fixture.clone())?;

    let report = match service.run(&params).await {
        Ok(report) => report,
        Err(SearchError::AuthFailure(message)) => {
            anyhow::bail!("Unable to search - {message}")
        }
        Err(err) => return Err(err.into()),
    };

    render_report(&report, &mut std::io::stdout())?;

    if let Some(export) = args.export {
        let path = if export.is_empty() {
            PathBuf::from(default_file_name(Local::now()))
        } else {
            PathBuf::from(export)
        };
        let written = export_to_path(&report.records, &path)?;
        info!("💾 Saved {} listing(s) to {}", report.records.len(), written.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Search(args) => run_search(&config, args).await?,
        Commands::Shell { fixture } => {
            let service = build_service(&config, fixture)?;
            Shell::new(&service).run().await?;
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!("{category}");
            }
        }
    }

    Ok(())
}
