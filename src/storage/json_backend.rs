use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::errors::{BudgetError, Result};
use crate::utils::files::replace_file;

use super::KeyValueStorage;

const VALUE_EXTENSION: &str = "json";

/// File-backed key-value storage: each key lives in `<root>/<key>.json`.
///
/// Writes are staged to a sibling `.json.tmp` file and renamed into place, so a failed write
/// leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
    quota: Option<usize>,
}

impl JsonFileStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root, quota: None })
    }

    /// Rejects any single value longer than `bytes`; `None` lifts the limit.
    pub fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota = bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(BudgetError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                    attempted: value.len(),
                });
            }
        }
        let path = self.value_path(key);
        replace_file(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}
