use std::path::{Path, PathBuf};
use std::time::Duration;

use perevod_core::languages::{LanguageCode, LanguagePair};
use perevod_translate::translo::{DEFAULT_ENDPOINT, DEFAULT_HOST, DEFAULT_TIMEOUT};
use perevod_translate::TransloConfig;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides the stored API key when set.
pub const API_KEY_ENV: &str = "PEREVOD_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerevodConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_host")]
    pub api_host: String,
    #[serde(default = "default_from")]
    pub default_from: LanguageCode,
    #[serde(default = "default_to")]
    pub default_to: LanguageCode,
    /// Where history is stored. `None` = the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub created_at: jiff::Timestamp,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_from() -> LanguageCode {
    LanguagePair::default().from
}

fn default_to() -> LanguageCode {
    LanguagePair::default().to
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for PerevodConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_key: None,
            endpoint: default_endpoint(),
            api_host: default_host(),
            default_from: default_from(),
            default_to: default_to(),
            data_dir: None,
            timeout_secs: default_timeout_secs(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl PerevodConfig {
    pub fn default_pair(&self) -> LanguagePair {
        LanguagePair::new(self.default_from, self.default_to)
    }

    /// The API key from the environment, falling back to the stored one.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn history_dir(&self) -> eyre::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(base.join("perevod"))
    }

    pub fn translo_config(&self) -> eyre::Result<TransloConfig> {
        let api_key = self.effective_api_key().ok_or_else(|| {
            eyre::eyre!(
                "no API key configured. Run `perevod config set-key <KEY>` or set {API_KEY_ENV}"
            )
        })?;

        Ok(TransloConfig {
            endpoint: self.endpoint.clone(),
            api_key,
            api_host: self.api_host.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub endpoint: String,
    pub api_host: String,
    pub api_key_hint: Option<String>,
    pub api_key_from_env: bool,
    pub default_from: String,
    pub default_to: String,
    pub data_dir: Option<String>,
    pub timeout_secs: u64,
    pub created_at: String,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("perevod"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, or defaults if the file does not exist.
pub fn load_config(path: &Path) -> eyre::Result<PerevodConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PerevodConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0);

    let migrated = migrate(json, on_disk_version)?;
    let config: PerevodConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update perevod."
        ));
    }

    // v0 → v1: language_from/language_to renamed to default_from/default_to,
    // created_at added
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(from) = obj.remove("language_from") {
            obj.entry("default_from").or_insert(from);
        }
        if let Some(to) = obj.remove("language_to") {
            obj.entry("default_to").or_insert(to);
        }
        obj.entry("created_at")
            .or_insert_with(|| serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed language fields)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &PerevodConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file may hold an API key
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(config: &PerevodConfig) -> ConfigInfo {
    let from_env = std::env::var(API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty());

    ConfigInfo {
        endpoint: config.endpoint.clone(),
        api_host: config.api_host.clone(),
        api_key_hint: config.effective_api_key().as_deref().map(redact_key),
        api_key_from_env: from_env,
        default_from: config.default_from.code().to_string(),
        default_to: config.default_to.code().to_string(),
        data_dir: config.data_dir.as_ref().map(|d| d.display().to_string()),
        timeout_secs: config.timeout_secs,
        created_at: config.created_at.to_string(),
    }
}

pub fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
