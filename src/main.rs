mod aggregate;
mod config;
mod error;
mod feed;
mod http;
mod parser;
mod pipeline;
mod publish;
mod records;
mod submissions;

use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::http::EdgarClient;

#[derive(Parser)]
#[command(
    name = "spac_scanner",
    about = "Find newly registered SPACs in the EDGAR S-1 feed"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Max filers to process (default: every filer in the feed)
    #[arg(short = 'n', long, global = true)]
    limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the feed and submit the records to the sink (default)
    Run,
    /// Scan the feed and print the payload instead of submitting it
    Scan,
    /// List the filer ids found in the feed
    Filers,
    /// Classify and extract a single filing document
    Inspect {
        /// Document URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let client = EdgarClient::new(&settings.user_agent, settings.timeout())?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let report = pipeline::run(&client, &settings, cli.limit).await?;
            report.log_summary();
            publish::submit(
                &client,
                &settings.sink_url,
                &report.records,
                settings.link_content,
            )
            .await?;
            println!(
                "Submitted {} SPAC record(s) ({} filer(s) skipped).",
                report.records.len(),
                report.skipped.len()
            );
        }
        Commands::Scan => {
            let report = pipeline::run(&client, &settings, cli.limit).await?;
            report.log_summary();
            let payload = publish::build_payload(&report.records, settings.link_content);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::Filers => {
            let filers = pipeline::discover(&client, &settings, cli.limit).await?;
            for filer in &filers {
                println!("{}", filer);
            }
            println!("\n{} filer(s)", filers.len());
        }
        Commands::Inspect { url } => {
            let i = pipeline::inspect(&client, &url, &settings).await?;
            println!("URL:         {}", i.url);
            println!("Size:        {} bytes, {} paragraphs", i.bytes, i.paragraphs);
            println!("Blank check: {}", if i.blank_check { "yes" } else { "no" });
            println!("Name:        {}", or_dash(&i.name));
            println!("Ticker:      {}", or_dash(&i.ticker));
            if !i.ticker_candidates.is_empty() {
                println!("Candidates:  {}", i.ticker_candidates.join(", "));
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
