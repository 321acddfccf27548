//! Presslift CLI
//!
//! Fetch articles from the command line, encode/decode transfer payloads,
//! and run the acquisition HTTP service.

use anyhow::Context;
use clap::{Parser, Subcommand};
use presslift::acquire::Acquirer;
use presslift::fetch::FetcherConfig;
use presslift::handlers;
use presslift::transfer::{TransferCodec, TransferPayload};
use std::sync::Arc;
use tracing::info;

/// Article content acquisition pipeline
#[derive(Parser, Debug)]
#[command(name = "presslift")]
#[command(version)]
#[command(about = "Fetch, extract, and transfer news article content")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch an article URL through the strategy cascade
    Fetch {
        /// Article URL
        url: String,

        /// Enable the headless-browser rendering rung
        #[arg(long)]
        browser: bool,

        /// Path to a Chrome/Chromium executable
        #[arg(long)]
        chrome_path: Option<String>,
    },

    /// Decode a transfer payload and print the article
    Decode {
        /// Encoded transport string
        transport: String,
    },

    /// Encode an article into a transfer payload
    Encode {
        /// Source URL
        #[arg(long)]
        url: String,

        /// Article title
        #[arg(long, default_value = "")]
        title: String,

        /// Article body text
        #[arg(long)]
        content: String,
    },

    /// Run the acquisition HTTP service
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Enable the headless-browser rendering rung
        #[arg(long)]
        browser: bool,

        /// Path to a Chrome/Chromium executable
        #[arg(long)]
        chrome_path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .init();

    match args.command {
        Command::Fetch {
            url,
            browser,
            chrome_path,
        } => {
            let mut builder = FetcherConfig::builder().browser(browser);
            if let Some(path) = chrome_path {
                builder = builder.chrome_path(path);
            }
            let acquirer = Acquirer::with_config(builder.build());

            let (article, attempts) = acquirer
                .acquire_by_url(&url)
                .await
                .with_context(|| format!("failed to acquire {url}"))?;
            info!(
                strategy = ?article.method,
                attempts = attempts.len(),
                chars = article.body_chars(),
                "article acquired"
            );
            println!("{}", serde_json::to_string_pretty(&article)?);
        }

        Command::Decode { transport } => {
            let acquirer = Acquirer::new();
            let article = acquirer
                .acquire_from_transfer(&transport)
                .context("failed to decode transfer payload")?;
            println!("{}", serde_json::to_string_pretty(&article)?);
        }

        Command::Encode {
            url,
            title,
            content,
        } => {
            let codec = TransferCodec::new();
            let transport = codec.encode(&TransferPayload {
                url,
                title,
                content,
            });
            println!("{transport}");
        }

        Command::Serve {
            host,
            port,
            browser,
            chrome_path,
        } => {
            let mut builder = FetcherConfig::builder().browser(browser);
            if let Some(path) = chrome_path {
                builder = builder.chrome_path(path);
            }
            let acquirer = Arc::new(Acquirer::with_config(builder.build()));

            let app = handlers::router(acquirer);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!(%addr, "presslift service listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
