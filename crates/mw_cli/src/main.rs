use async_trait::async_trait;
use clap::Parser;
use mw_collector::{CollectorConfig, NewsApiClient};
use mw_core::{Article, NewsStore, Result};
use mw_dashboard::{AppState, ArticleSource, Filters, Report};
use mw_sentiment::create_model;
use mw_storage::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Media reputation monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch recent news for a query, label sentiment, replace the database
    Collect {
        /// Topic or brand to search for
        #[arg(long, default_value = "FC Barcelona")]
        query: String,
        /// Path to the SQLite database
        #[arg(long, default_value = "reputation.db")]
        db: PathBuf,
        /// Sentiment model to use. Available models: lexicon (default), neutral
        #[arg(long, default_value = "lexicon")]
        model: String,
    },
    /// Serve the dashboard API over the collected database
    Serve {
        #[arg(long, default_value = "reputation.db")]
        db: PathBuf,
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Print a filtered reputation report to stdout
    Report {
        #[arg(long, default_value = "reputation.db")]
        db: PathBuf,
        /// Comma-separated sentiment labels to include (default: all)
        #[arg(long)]
        sentiments: Option<String>,
        /// Restrict to one source name, or "all"
        #[arg(long, default_value = "all")]
        source: String,
    },
}

/// Opens the database per read, so the dashboard keeps working across
/// collector runs and reports "no database" until the first run happens.
struct DbSource {
    db_path: PathBuf,
}

#[async_trait]
impl ArticleSource for DbSource {
    async fn load_articles(&self) -> Result<Vec<Article>> {
        let store = SqliteStore::open_existing(&self.db_path).await?;
        store.load_all().await
    }
}

async fn collect(query: String, db: PathBuf, model_name: String) -> anyhow::Result<()> {
    let config = CollectorConfig::from_env(query)?;
    let client = NewsApiClient::new(config);
    let model = create_model(&model_name)?;
    let store = SqliteStore::open(&db).await?;

    let count = mw_collector::run(&client, model.as_ref(), &store).await?;
    if count == 0 {
        println!("No news found");
    } else {
        println!("{} articles saved to {}", count, db.display());
    }
    Ok(())
}

async fn serve(db: PathBuf, addr: String) -> anyhow::Result<()> {
    info!(db = %db.display(), "serving dashboard over collected database");
    let state = AppState {
        source: Arc::new(DbSource { db_path: db }),
    };
    mw_dashboard::serve(state, &addr).await?;
    Ok(())
}

async fn report(db: PathBuf, sentiments: Option<String>, source: String) -> anyhow::Result<()> {
    let filters = Filters::parse(sentiments.as_deref(), Some(&source))
        .map_err(|e| anyhow::anyhow!(e))?;

    let loaded = match SqliteStore::open_existing(&db).await {
        Ok(store) => store.load_all().await,
        Err(mw_core::Error::DatabaseMissing(path)) => {
            println!("No database found at {} (run `mediawatch collect` first)", path);
            return Ok(());
        }
        Err(e) => Err(e),
    };
    let articles = match loaded {
        Ok(articles) => articles,
        Err(e) => {
            println!("⚠️  Database at {} could not be read: {}", db.display(), e);
            return Ok(());
        }
    };

    if articles.is_empty() {
        println!("No database found (the news table is empty)");
        return Ok(());
    }

    match mw_dashboard::report::build(&articles, &filters) {
        Report::NoDatabase | Report::StoreUnreadable { .. } => {
            unreachable!("load failures handled above")
        }
        Report::NoMatches => println!("No news for the selected filters"),
        Report::Data {
            summary,
            alert,
            sentiment_chart,
            source_chart,
            articles,
        } => {
            println!("📰 Articles: {}", summary.count);
            println!("🌡️  Overall climate: {}", summary.dominant.as_str().to_uppercase());
            println!("🗞️  Sources: {}", summary.distinct_sources);
            println!();

            match alert {
                mw_dashboard::AlertLevel::Critical => println!(
                    "⚠️  Reputation alert: critical volume of negative coverage ({:.1}%)",
                    summary.negative_ratio
                ),
                mw_dashboard::AlertLevel::Healthy => {
                    println!("✅ Brand health looks good: dominant sentiment is positive")
                }
                mw_dashboard::AlertLevel::Balanced => {
                    println!("⚖️  Balanced outlook: coverage is informative and even")
                }
            }
            println!();

            println!("Sentiment share:");
            for (sentiment, count) in sentiment_chart {
                println!("  {:<9} {}", sentiment.as_str(), count);
            }
            println!("News by source:");
            for (name, count) in source_chart {
                println!("  {:<24} {}", name, count);
            }
            println!();

            for row in articles {
                println!(
                    "{}  [{:<8}] {}: {}",
                    row.published_at.format("%Y-%m-%d %H:%M"),
                    row.sentiment.as_str(),
                    row.source,
                    row.title,
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect { query, db, model } => collect(query, db, model).await,
        Commands::Serve { db, addr } => serve(db, addr).await,
        Commands::Report {
            db,
            sentiments,
            source,
        } => report(db, sentiments, source).await,
    }
}
