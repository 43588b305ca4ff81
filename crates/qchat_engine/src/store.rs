use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use qchat_core::Request;
use serde_json::Value;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("store file is not a valid request list: {0}")]
    Corrupt(String),
    #[error("no request with id {0}")]
    NotFound(String),
}

/// Read/update façade over the request records. The store owns the records;
/// callers only ever hold snapshots.
#[async_trait::async_trait]
pub trait RequestStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Request>, StoreError>;

    async fn update_indexed_pages(
        &self,
        request_id: &str,
        indexed_pages: i64,
    ) -> Result<Request, StoreError>;
}

/// Request records kept as a JSON array in a single file. Fields the `Request`
/// model does not name are preserved on update.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_raw(&self) -> Result<Vec<Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    fn write_raw(&self, records: &[Value]) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::Corrupt(format!("bad store path {:?}", self.path)))?;
        let content = serde_json::to_string_pretty(records)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        AtomicFileWriter::new(dir).write(filename, content.as_bytes())?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RequestStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Request>, StoreError> {
        self.read_raw()?
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|err| StoreError::Corrupt(err.to_string()))
            })
            .collect()
    }

    async fn update_indexed_pages(
        &self,
        request_id: &str,
        indexed_pages: i64,
    ) -> Result<Request, StoreError> {
        let mut records = self.read_raw()?;
        let record = records
            .iter_mut()
            .find(|record| record.get("id").and_then(Value::as_str) == Some(request_id))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::NotFound(request_id.to_string()))?;
        // Partial update: every other field is written back as it was read.
        record.insert(
            "indexedPages".to_string(),
            Value::String(indexed_pages.to_string()),
        );
        record.insert(
            "updatedAt".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        let updated: Request = serde_json::from_value(Value::Object(record.clone()))
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        self.write_raw(&records)?;
        Ok(updated)
    }
}
