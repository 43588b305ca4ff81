use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use qchat_core::UserContext;
use qchat_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Contents of `qchat.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Prefix of the command endpoint, usually ending in `/`.
    pub endpoint_base: String,
    pub store_path: PathBuf,
    pub download_dir: PathBuf,
    pub user_email: String,
    pub is_admin: bool,
    pub id_token: Option<String>,
    /// Unset means the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            endpoint_base: String::new(),
            store_path: PathBuf::from("requests.json"),
            download_dir: PathBuf::from("downloads"),
            user_email: String::new(),
            is_admin: false,
            id_token: None,
            request_timeout_secs: None,
            log_file: None,
        }
    }
}

impl AdminConfig {
    pub fn user(&self) -> UserContext {
        UserContext {
            email: self.user_email.clone(),
            is_admin: self.is_admin,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            endpoint_base: self.endpoint_base.clone(),
            store_path: self.store_path.clone(),
            download_dir: self.download_dir.clone(),
            id_token: self.id_token.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// `Ok(None)` when the file does not exist.
pub fn load(path: &Path) -> anyhow::Result<Option<AdminConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };
    let config = ron::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("qchat.ron");
        fs::write(
            &path,
            r#"(endpoint_base: "https://api.test/prod/", user_email: "ana@example.com", is_admin: true, request_timeout_secs: Some(20))"#,
        )
        .unwrap();

        let config = load(&path).unwrap().unwrap();
        assert_eq!(config.endpoint_base, "https://api.test/prod/");
        assert!(config.is_admin);
        assert_eq!(config.store_path, PathBuf::from("requests.json"));
        assert_eq!(
            config.engine_config().request_timeout,
            Some(Duration::from_secs(20))
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(load(&temp.path().join("absent.ron")).unwrap(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("qchat.ron");
        fs::write(&path, "(endpoint_base: 42").unwrap();
        assert!(load(&path).is_err());
    }
}
