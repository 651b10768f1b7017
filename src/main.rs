//! book-recommender CLI: content-based book recommendations from a CSV corpus.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use book_recommender::{item::loader::load_csv, logging::init_logging, Config, Error, Snapshot};
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "book-recommender")]
#[command(about = "Recommend books similar to one you like")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Corpus CSV with title, authors, categories and description columns
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Snapshot written by `build`
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend books similar to a title
    Recommend {
        #[command(flatten)]
        source: Source,

        /// Exact title of a book you like
        #[arg(short, long)]
        title: String,

        /// Number of recommendations (defaults to recommender.top_k)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// List every title in alphabetical order
    Titles {
        #[command(flatten)]
        source: Source,
    },

    /// Show corpus statistics
    Stats {
        #[command(flatten)]
        source: Source,
    },

    /// Build a snapshot and save it for later queries
    Build {
        /// Corpus CSV
        #[arg(long)]
        corpus: PathBuf,

        /// Output snapshot file
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Recommend { source, title, k } => {
            let snapshot = open(&source, &config)?;
            cmd_recommend(&snapshot, &title, k.unwrap_or(config.recommender.top_k))
        }
        Commands::Titles { source } => {
            let snapshot = open(&source, &config)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for title in snapshot.sorted_titles() {
                writeln!(out, "{title}")?;
            }
            Ok(())
        }
        Commands::Stats { source } => {
            let snapshot = open(&source, &config)?;
            println!("{}", snapshot.stats());
            Ok(())
        }
        Commands::Build { corpus, out } => cmd_build(&corpus, &out, &config),
    }
}

fn build_from_csv(path: &Path, config: &Config) -> Result<Snapshot> {
    let items = load_csv(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Snapshot::build(items, &config.vectorizer)?)
}

fn open(source: &Source, config: &Config) -> Result<Snapshot> {
    match (&source.corpus, &source.snapshot) {
        (Some(corpus), _) => build_from_csv(corpus, config),
        (None, Some(path)) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Snapshot::load(BufReader::new(file))?)
        }
        (None, None) => anyhow::bail!("either --corpus or --snapshot is required"),
    }
}

fn cmd_recommend(snapshot: &Snapshot, title: &str, k: usize) -> Result<()> {
    match snapshot.recommend(title, k) {
        Ok(recs) => {
            println!("Here are your recommended books:");
            for rec in recs {
                let rating = rec
                    .item
                    .average_rating
                    .map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
                println!();
                println!("{}", rec.item.title);
                println!("  by {}  Rating: {rating}", rec.item.authors);
                println!("  Categories: {}", rec.item.categories);
                println!("  Similarity: {:.4}", rec.score);
            }
            Ok(())
        }
        Err(Error::ItemNotFound { .. }) => {
            println!("Book not found in the dataset.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_build(corpus: &Path, out: &Path, config: &Config) -> Result<()> {
    let snapshot = build_from_csv(corpus, config)?;
    let file = File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    snapshot.save(&mut writer)?;
    writer.flush()?;
    info!(path = %out.display(), items = snapshot.len(), "snapshot saved");
    Ok(())
}
