use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use paper_ranker::config;
use paper_ranker::mcp::McpServer;
use paper_ranker::models::{DownloadResult, HealthStatus, PaperDetail, ScoredPaper};
use paper_ranker::ranking::truncate;
use paper_ranker::utils::HttpClient;
use paper_ranker::{ArxivSource, PaperService};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// paper-ranker - Search arXiv by keyword, rank papers by relevance and summarize abstracts
#[derive(Parser, Debug)]
#[command(name = "paper-ranker")]
#[command(version = paper_ranker::VERSION)]
#[command(about = "Search arXiv by keyword, rank papers by relevance and summarize abstracts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search arXiv and rank the results
    #[command(alias = "s")]
    Search {
        /// Comma-separated keywords
        keywords: String,

        /// Number of top papers to show
        #[arg(long, short = 'k')]
        top_k: Option<usize>,

        /// Papers to fetch from arXiv
        #[arg(long, short = 'm')]
        max_results: Option<usize>,

        /// Show every ranked paper instead of the top ones
        #[arg(long)]
        all: bool,
    },

    /// Show a paper with a summary of its abstract
    Show {
        /// 1-based position of the paper in arXiv's result order
        id: usize,

        /// Comma-separated keywords (defaults to the configured query)
        #[arg(long, short = 'k')]
        keywords: Option<String>,

        /// Sentences to keep in the summary
        #[arg(long, short = 's')]
        sentences: Option<usize>,
    },

    /// Download a paper's PDF
    #[command(alias = "d")]
    Download {
        /// 1-based position of the paper in arXiv's result order
        id: usize,

        /// Comma-separated keywords used for the search
        #[arg(long, short = 'k')]
        keywords: String,

        /// Directory to save into (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Report service health
    Health,

    /// Run the MCP server
    Serve {
        /// Serve over streamable HTTP instead of stdio
        #[arg(long)]
        http: bool,

        /// Host to bind in HTTP mode
        #[arg(long)]
        host: Option<String>,

        /// Port to bind in HTTP mode
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet, cli.log_json);

    let config = config::load(cli.config.as_deref())?;

    let client = HttpClient::with_timeout(Duration::from_secs(cli.timeout))?;
    let source = ArxivSource::with_client(Arc::new(client)).with_api_url(&config.search.api_url);
    let service = PaperService::new(Arc::new(source), config);
    let format = resolve_format(cli.output);

    match cli.command {
        Commands::Search {
            keywords,
            top_k,
            max_results,
            all,
        } => {
            let max_results = max_results.unwrap_or(service.config().search.max_results);
            let top_k = top_k.unwrap_or(service.config().ranking.top_k);
            let response = service.search_with(&keywords, max_results, top_k).await?;

            tracing::info!(
                "Showing {} of {} papers",
                if all { response.papers.all.len() } else { response.papers.top.len() },
                response.total
            );

            let papers = if all {
                &response.papers.all
            } else {
                &response.papers.top
            };
            output_ranked(papers, format)?;
        }

        Commands::Show {
            id,
            keywords,
            sentences,
        } => {
            let sentences = sentences.unwrap_or(service.config().ranking.summary_sentences);
            let detail = service
                .paper_detail_with(id, keywords.as_deref(), sentences)
                .await?;
            output_detail(&detail, format)?;
        }

        Commands::Download { id, keywords, dir } => {
            let result = match dir {
                Some(dir) => service.download_to(id, &keywords, dir).await?,
                None => service.download(id, &keywords).await?,
            };
            output_download(&result, format)?;
        }

        Commands::Health => {
            output_health(&service.health(), format)?;
        }

        Commands::Serve { http, host, port } => {
            let host = host.unwrap_or_else(|| service.config().server.host.clone());
            let port = port.unwrap_or(service.config().server.port);
            let server = McpServer::new(Arc::new(service))?;

            if http {
                let addr = format!("{}:{}", host, port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        Commands::Config => {
            print!("{}", service.config().to_toml()?);
        }
    }

    Ok(())
}

/// Install the tracing subscriber; logs go to stderr so stdout carries results
fn init_tracing(verbose: u8, quiet: bool, json: bool) {
    let log_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if quiet { "error" } else { log_level };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_ranker={}", env_filter)),
    );

    let (plain, json) = if json {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn output_ranked(papers: &[ScoredPaper], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(papers)?);
        }
        OutputFormat::Plain => {
            for entry in papers {
                println!(
                    "{}. [{}] {} (score {:.4})",
                    entry.rank, entry.id, entry.paper.title, entry.score
                );
                println!("  Authors: {}", entry.paper.authors_display());
                println!("  Published: {}", entry.paper.published_display());
                if !entry.preview.is_empty() {
                    println!("  {}", entry.preview);
                }
                println!();
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Rank", "ID", "Score", "Title", "Authors", "Published"]);

            for entry in papers {
                table.add_row(vec![
                    Cell::new(entry.rank),
                    Cell::new(entry.id),
                    Cell::new(format!("{:.4}", entry.score)),
                    Cell::new(truncate(&entry.paper.title, 60)).add_attribute(Attribute::Bold),
                    Cell::new(truncate(&entry.paper.authors_display(), 30)),
                    Cell::new(entry.paper.published_display()),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

fn output_detail(detail: &PaperDetail, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(detail)?);
        }
        OutputFormat::Plain | OutputFormat::Table => {
            let paper = &detail.paper;
            println!("[{}] {}", detail.id, paper.title);
            println!("Authors: {}", paper.authors_display());
            println!("Published: {}", paper.published_display());
            println!("Score: {:.4}", detail.score);
            println!("Entry: {}", paper.entry_id);
            println!("PDF: {}", paper.pdf_url);
            println!();
            println!("{}", detail.summary);
        }
    }
    Ok(())
}

fn output_download(result: &DownloadResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Plain | OutputFormat::Table => {
            println!("Saved {} ({} bytes)", result.path, result.bytes);
        }
    }
    Ok(())
}

fn output_health(status: &HealthStatus, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(status)?);
        }
        OutputFormat::Plain | OutputFormat::Table => {
            println!("Status: {}", status.status);
            println!("Papers directory present: {}", status.papers_dir);
        }
    }
    Ok(())
}
