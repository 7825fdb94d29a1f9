use crate::errors::AppError;
use crate::settings::Settings;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

pub const CHECKED_KEY: &str = "savings-tracker-checked-v1";
pub const SETTINGS_KEY: &str = "savings-tracker-settings-v1";

/// Local key-value store: one JSON file per key inside `dir`.
///
/// Reads never fail and writes are best-effort; problems are only logged.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Checked amounts from the last session. Anything that is not a JSON
    /// array yields an empty list; entries that are not whole non-negative
    /// numbers are skipped.
    pub async fn load_checked(&self) -> Vec<u64> {
        match self.read_record(CHECKED_KEY).await {
            Some(Value::Array(items)) => items.iter().filter_map(whole_amount).collect(),
            Some(_) => {
                warn!("checked record is not an array, ignoring it");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    pub async fn save_checked(&self, values: &[u64]) {
        if let Err(err) = self.write_record(CHECKED_KEY, values).await {
            warn!("failed to save checked values: {}", err.message);
        }
    }

    pub async fn load_settings(&self) -> Option<Settings> {
        let record = self.read_record(SETTINGS_KEY).await?;
        let settings = Settings::from_record(&record);
        if settings.is_none() {
            warn!("settings record is not an object, using defaults");
        }
        settings
    }

    pub async fn save_settings(&self, settings: &Settings) {
        if let Err(err) = self.write_record(SETTINGS_KEY, settings).await {
            warn!("failed to save settings: {}", err.message);
        }
    }

    async fn read_record(&self, key: &str) -> Option<Value> {
        let path = self.record_path(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    error!("failed to parse {}: {err}", path.display());
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no record at {}", path.display());
                None
            }
            Err(err) => {
                error!("failed to read {}: {err}", path.display());
                None
            }
        }
    }

    async fn write_record<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let payload = serde_json::to_vec(value)?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.record_path(key), payload).await?;
        Ok(())
    }
}

fn whole_amount(value: &Value) -> Option<u64> {
    if let Some(amount) = value.as_u64() {
        return Some(amount);
    }
    let amount = value.as_f64()?;
    (amount.is_finite() && amount >= 0.0 && amount.fract() == 0.0).then(|| amount as u64)
}
