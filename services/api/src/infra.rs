use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tenderboard::config::AppConfig;
use tenderboard::ingest::{self, DatasetError, Table};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) config: Arc<AppConfig>,
    pub(crate) datasets: DatasetStore,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    modified: Option<SystemTime>,
    table: Arc<Table>,
}

/// Dataset snapshots keyed by file identity. A snapshot is reused until
/// the file's modification time changes, so repeated filter interactions
/// do not re-read the spreadsheet.
#[derive(Default, Clone)]
pub(crate) struct DatasetStore {
    entries: Arc<Mutex<HashMap<PathBuf, CacheEntry>>>,
}

impl DatasetStore {
    pub(crate) fn load(&self, path: &Path) -> Result<Arc<Table>, DatasetError> {
        let modified = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok();

        {
            let guard = self.entries.lock().expect("dataset cache mutex poisoned");
            if let Some(entry) = guard.get(path) {
                if entry.modified == modified && entry.modified.is_some() {
                    return Ok(entry.table.clone());
                }
            }
        }

        let table = Arc::new(ingest::load_table(path)?);
        let mut guard = self.entries.lock().expect("dataset cache mutex poisoned");
        guard.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                table: table.clone(),
            },
        );

        Ok(table)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
