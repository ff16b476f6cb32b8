use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use psearch::client::{fetch_health, fetch_search};
use psearch::formatters::format_chunk;
use psearch::interactive::InteractiveApp;
use psearch::interactive::ui::app_state::Mode;
use psearch::logging;
use reqwest::Url;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "psearch",
    version,
    about = "Terminal client for the Personal Search demo backend",
    long_about = None
)]
struct Cli {
    /// Search query (one-shot HTTP search unless an interactive mode is set)
    #[arg(required_unless_present_any = ["interactive", "grid", "ping"])]
    query: Option<String>,

    /// Backend base URL
    #[arg(
        short,
        long,
        env = "PSEARCH_SERVER",
        default_value = "http://127.0.0.1:8000"
    )]
    server: String,

    /// Interactive list view (streams results over the websocket)
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Interactive 5x5 query grid
    #[arg(long)]
    grid: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Check backend health and exit
    #[arg(long)]
    ping: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    logging::init_tracing();

    let server = Url::parse(&cli.server)
        .with_context(|| format!("invalid server URL: {}", cli.server))?;

    if cli.ping {
        return ping(&server);
    }

    // Interactive modes
    if cli.interactive || cli.grid {
        let mode = if cli.grid { Mode::Grid } else { Mode::List };
        let mut app = InteractiveApp::new(server, mode);
        return app.run();
    }

    // One-shot search mode - query is required
    let query = cli.query.ok_or_else(|| {
        anyhow::anyhow!("Query argument is required (use --interactive for interactive mode)")
    })?;

    if cli.verbose {
        eprintln!("Searching {server} for: {query}");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let client = reqwest::Client::new();

    let spinner = matches!(cli.format, OutputFormat::Text).then(|| {
        let spinner = indicatif::ProgressBar::new_spinner().with_message("Searching...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    });
    let response = runtime.block_on(fetch_search(&client, &server, &query));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let response = response?;

    // Output results
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.format {
        OutputFormat::Text => {
            use colored::Colorize;

            let use_color = !cli.no_color;
            let summary = if response.llm_summary.is_empty() {
                "No LLM summary available."
            } else {
                &response.llm_summary
            };
            if use_color {
                println!("{} {summary}\n", "Summary:".cyan().bold());
            } else {
                println!("Summary: {summary}\n");
            }

            if response.reranked_chunks.is_empty() {
                println!("No results found.");
            } else {
                println!("Found {} results:\n", response.reranked_chunks.len());
                for (index, chunk) in response.reranked_chunks.iter().enumerate() {
                    println!("{}\n", format_chunk(chunk, index + 1, use_color));
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &response)?;
            writeln!(&mut handle)?;
        }
    }

    Ok(())
}

fn ping(server: &Url) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let client = reqwest::Client::new();
    let health = runtime.block_on(fetch_health(&client, server))?;
    println!("Backend at {server} reports status: {}", health.status);
    Ok(())
}
