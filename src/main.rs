use clap::{Parser, Subcommand};
use localize_client::{HttpTransport, TranslationLoader};
use localize_core::config;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "localize",
    version,
    about = "Download translations and resolve keys with language fallback"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "localize.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Download languages and print the loaded tables as JSON.
    Languages {
        /// Language codes. Defaults to the configured list; empty = all.
        codes: Vec<String>,
    },
    /// Download a versioned snapshot and print the loaded tables as JSON.
    Snapshot {
        /// Snapshot version.
        version: String,
        /// Language codes to apply from the snapshot; empty = all.
        codes: Vec<String>,
    },
    /// Download the configured languages and resolve a key.
    Resolve {
        /// Translation key.
        key: String,
        /// Look up in exactly this language, without fallback.
        #[arg(short, long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.localize.log_level)),
        )
        .init();

    let loader = build_loader(&cfg)?;

    match cli.command {
        Commands::Languages { codes } => {
            let codes = if codes.is_empty() {
                cfg.translations.languages.clone()
            } else {
                codes
            };
            loader.fetch_languages(&codes).await?;
            print_translations(&loader)?;
        }
        Commands::Snapshot { version, codes } => {
            loader.fetch_snapshot(&version, &codes).await?;
            print_translations(&loader)?;
        }
        Commands::Resolve { key, language } => {
            let codes = &cfg.translations.languages;
            match cfg.translations.snapshot {
                Some(ref version) => loader.fetch_snapshot(version, codes).await?,
                None => loader.fetch_languages(codes).await?,
            }
            let value = match language {
                Some(ref code) => loader.resolve_for(&key, code),
                None => loader.resolve(&key),
            };
            println!("{value}");
        }
    }

    Ok(())
}

/// Build the loader with an HTTP transport from config.
fn build_loader(cfg: &config::Config) -> anyhow::Result<TranslationLoader> {
    let transport = HttpTransport::from_config(&cfg.api)?;
    let loader = TranslationLoader::from_config(cfg, Arc::new(transport));
    info!(
        "localize: {} | language: {} | fallback: {}",
        cfg.api.base_url,
        loader.language(),
        loader.fallback_language().as_deref().unwrap_or("none"),
    );
    Ok(loader)
}

fn print_translations(loader: &TranslationLoader) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(loader.read().translations())?;
    println!("{json}");
    Ok(())
}
