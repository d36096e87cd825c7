//! Composition root: wires the config, the file-backed store and the HTTP
//! translation client together for one CLI invocation.

use std::sync::Arc;

use perevod_core::languages::{LanguageCode, LanguagePair};
use perevod_core::models::record::TranslationRecord;
use perevod_history::{HistoryError, HistoryStore, Translator};
use perevod_storage::{FileAdapter, PersistenceAdapter};
use perevod_translate::{TranslationClient, TransloClient};
use uuid::Uuid;

use crate::config::PerevodConfig;

/// Shortest id prefix accepted in place of a full UUID.
pub const MIN_ID_PREFIX: usize = 4;

pub struct App {
    pub config: PerevodConfig,
    pub history: Arc<HistoryStore>,
    /// Set when stored history could not be parsed and was reset.
    pub load_problem: Option<HistoryError>,
}

impl App {
    /// Open the history stored under the configured data directory.
    pub async fn open(config: PerevodConfig) -> eyre::Result<Self> {
        let dir = config.history_dir()?;
        tracing::debug!(dir = %dir.display(), "opening history");
        Self::with_adapter(config, Arc::new(FileAdapter::new(dir))).await
    }

    pub async fn with_adapter(
        config: PerevodConfig,
        adapter: Arc<dyn PersistenceAdapter>,
    ) -> eyre::Result<Self> {
        let (history, load_problem) = HistoryStore::open(adapter).await?;
        if let Some(problem) = &load_problem {
            tracing::warn!(error = %problem, "continuing with empty history");
        }

        Ok(Self {
            config,
            history: Arc::new(history),
            load_problem,
        })
    }

    /// Translator backed by the configured HTTP service.
    pub fn translator(&self) -> eyre::Result<Translator> {
        let client = TransloClient::new(self.config.translo_config()?)?;
        Ok(self.translator_with(Arc::new(client)))
    }

    pub fn translator_with(&self, client: Arc<dyn TranslationClient>) -> Translator {
        Translator::new(client, Arc::clone(&self.history))
    }

    /// The configured default pair with optional per-call overrides.
    pub fn pair(&self, from: Option<&str>, to: Option<&str>) -> eyre::Result<LanguagePair> {
        let mut pair = self.config.default_pair();
        if let Some(code) = from {
            pair.from = LanguageCode::parse(code)?;
        }
        if let Some(code) = to {
            pair.to = LanguageCode::parse(code)?;
        }
        Ok(pair)
    }

    /// Accept a full UUID or a unique prefix of one.
    pub fn resolve_id(&self, input: &str) -> eyre::Result<Uuid> {
        let input = input.trim();
        if let Ok(id) = Uuid::parse_str(input) {
            return Ok(id);
        }
        if input.len() < MIN_ID_PREFIX {
            return Err(eyre::eyre!(
                "id prefix {input:?} is too short (need at least {MIN_ID_PREFIX} characters)"
            ));
        }

        let needle = input.to_ascii_lowercase();
        let matches: Vec<TranslationRecord> = self
            .history
            .list_all()
            .into_iter()
            .filter(|r| r.id().to_string().starts_with(&needle))
            .collect();

        match matches.as_slice() {
            [] => Err(eyre::eyre!("no record matches id {input:?}")),
            [only] => Ok(only.id()),
            many => Err(eyre::eyre!(
                "id prefix {input:?} is ambiguous ({} records match)",
                many.len()
            )),
        }
    }
}
