//! Scholar Citations - Entry Point
//!
//! Prints total, average and organic citation counts for one title or a
//! list of titles, optionally exporting them as CSV.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_citations::config::api;
use scholar_citations::formatters::{self, CsvReport};
use scholar_citations::{
    AuthorMatch, CitationAggregator, Config, ScholarClient, ScholarLookup, YearBaseline, loader,
    pipeline,
};

#[derive(Parser, Debug)]
#[command(name = "scholar-citations")]
#[command(about = "Citation counts for paper titles via SerpAPI Google Scholar")]
#[command(version)]
#[command(group = clap::ArgGroup::new("input").required(true).multiple(true))]
struct Cli {
    /// Paper title for obtaining citation counts
    #[arg(short = 'p', long = "paper", group = "input")]
    paper: Option<String>,

    /// Text file with a list of paper titles for obtaining citation counts
    #[arg(short = 'f', long = "file", group = "input")]
    file: Option<PathBuf>,

    /// CSV file to output citation counts
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// SerpAPI key (takes precedence over the key file)
    #[arg(long, env = api::KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// File whose first line is the SerpAPI key
    #[arg(long, default_value = api::KEY_FILE)]
    key_file: PathBuf,

    /// Count the average from this year instead of the publication year
    #[arg(long)]
    baseline_year: Option<i32>,

    /// How author names are compared when detecting self-citations
    #[arg(long, value_enum, default_value_t = MatchMode::Exact)]
    author_match: MatchMode,

    /// Citing-work lookups in flight per paper (1 = sequential)
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Retries for transient upstream failures
    #[arg(long, default_value = "0")]
    retries: u32,

    /// Query upstream for every lookup, even repeated titles
    #[arg(long)]
    no_cache: bool,

    /// Print one JSON object per paper instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum MatchMode {
    /// Names must be identical
    #[default]
    Exact,
    /// Ignore case and repeated whitespace
    Normalized,
}

impl From<MatchMode> for AuthorMatch {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => Self::Exact,
            MatchMode::Normalized => Self::Normalized,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting scholar-citations");

    let api_key = Config::load_api_key(cli.api_key, &cli.key_file)?;
    let config = Config::new(api_key).with_retries(cli.retries).with_cache(!cli.no_cache);

    let client = ScholarClient::new(&config)?;
    let aggregator = CitationAggregator::new(ScholarLookup::new(client, &config))
        .with_stage(pipeline::stage_for(cli.concurrency))
        .with_author_match(cli.author_match.into());

    let baseline = cli.baseline_year.map_or(YearBaseline::Published, YearBaseline::Fixed);

    let mut titles = Vec::new();
    if let Some(paper) = cli.paper {
        titles.push(paper);
    }
    if let Some(file) = &cli.file {
        titles.extend(loader::read_titles(file)?);
    }

    let mut report = CsvReport::new();
    for title in &titles {
        if !cli.json {
            println!("{}", formatters::format_progress(title));
        }

        let summary = aggregator.summarize(title, baseline).await?;

        if cli.json {
            println!("{}", formatters::summary_json(&summary));
        } else {
            println!("{}", formatters::format_summary_line(&summary));
        }
        report.push(&summary);
    }

    if let Some(output) = &cli.output {
        report.write_to(output)?;
        tracing::info!(path = %output.display(), papers = titles.len(), "wrote CSV");
    }

    Ok(())
}
