use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::Result;
use perevod_cli::app::App;
use perevod_cli::config::{self, PerevodConfig};
use perevod_cli::render;
use perevod_core::languages::{self, LanguageCode};

#[derive(Debug, Parser)]
#[command(name = "perevod", version, about = "Translate text and keep a history of results")]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true, env = "PEREVOD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate text and record the result.
    Translate {
        /// Text to translate; multiple words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long, short)]
        from: Option<String>,
        #[arg(long, short)]
        to: Option<String>,
    },
    /// List past translations, most recent first.
    History {
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// List favorite translations, most recent first.
    Favorites,
    /// Mark or unmark a translation as favorite.
    Favorite { id: String },
    /// Delete a translation from the history.
    Delete { id: String },
    /// Delete the whole history.
    Clear,
    /// List supported languages, optionally filtered.
    Languages { query: Option<String> },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    SetKey { key: String },
    SetLanguages { from: String, to: String },
    SetEndpoint { url: String, host: Option<String> },
    SetDataDir { dir: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = config::load_config(&config_path)?;

    match cli.command {
        Command::Translate { text, from, to } => {
            let app = open_app(config).await?;
            let pair = app.pair(from.as_deref(), to.as_deref())?;
            let record = app.translator()?.translate(&text.join(" "), pair).await?;
            println!("{}", record.translated_text());
            tracing::debug!(id = %record.id(), "saved to history");
        }
        Command::History { limit } => {
            let app = open_app(config).await?;
            let mut records = app.history.list_all();
            if let Some(limit) = limit {
                records.truncate(limit);
            }
            println!("{}", render::records(&records, "history is empty"));
        }
        Command::Favorites => {
            let app = open_app(config).await?;
            let records = app.history.list_favorites();
            println!("{}", render::records(&records, "no favorites yet"));
        }
        Command::Favorite { id } => {
            let app = open_app(config).await?;
            let id = app.resolve_id(&id)?;
            let record = app.history.toggle_favorite(id).await?;
            println!("{}", render::record_line(&record));
        }
        Command::Delete { id } => {
            let app = open_app(config).await?;
            let id = app.resolve_id(&id)?;
            app.history.delete_record(id).await?;
            println!("deleted {id}");
        }
        Command::Clear => {
            let app = open_app(config).await?;
            let count = app.history.len();
            app.history.clear().await?;
            println!("cleared {count} records");
        }
        Command::Languages { query } => {
            let found = languages::search(query.as_deref().unwrap_or_default());
            if found.is_empty() {
                println!("no matching languages");
            }
            for lang in found {
                println!("{}", render::language_line(lang));
            }
        }
        Command::Config { action } => run_config(action, config, &config_path)?,
    }

    Ok(())
}

async fn open_app(config: PerevodConfig) -> Result<App> {
    let app = App::open(config).await?;
    if let Some(problem) = &app.load_problem {
        eprintln!("warning: {problem}");
    }
    Ok(app)
}

fn run_config(action: ConfigAction, mut config: PerevodConfig, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let info = config::config_info(&config);
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }
        ConfigAction::SetKey { key } => {
            if key.trim().is_empty() {
                return Err(eyre::eyre!("API key must not be empty"));
            }
            config.api_key = Some(key.trim().to_string());
        }
        ConfigAction::SetLanguages { from, to } => {
            config.default_from = LanguageCode::parse(&from)?;
            config.default_to = LanguageCode::parse(&to)?;
        }
        ConfigAction::SetEndpoint { url, host } => {
            config.endpoint = url;
            if let Some(host) = host {
                config.api_host = host;
            }
        }
        ConfigAction::SetDataDir { dir } => {
            config.data_dir = Some(dir);
        }
    }

    config::save_config(path, &config)?;
    println!("saved {}", path.display());
    Ok(())
}
