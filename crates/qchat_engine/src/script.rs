use std::path::PathBuf;
use std::sync::Arc;

use qchat_core::{render_userscript, script_filename, ScriptOutcome, SCRIPT_MIME_TYPE};
use qchat_logging::{qchat_info, qchat_warn};

use crate::filename::download_filename;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::RedirectResolver;

/// A generated file offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDownload {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Where finished downloads go.
pub trait ScriptSink: Send + Sync {
    fn deliver(&self, download: &ScriptDownload) -> Result<PathBuf, PersistError>;
}

/// Saves downloads into a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    writer: AtomicFileWriter,
}

impl DirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }
}

impl ScriptSink for DirectorySink {
    fn deliver(&self, download: &ScriptDownload) -> Result<PathBuf, PersistError> {
        self.writer
            .write(&download_filename(&download.filename), download.content.as_bytes())
    }
}

pub struct ScriptGenerator {
    resolver: Arc<dyn RedirectResolver>,
    sink: Arc<dyn ScriptSink>,
}

impl ScriptGenerator {
    pub fn new(resolver: Arc<dyn RedirectResolver>, sink: Arc<dyn ScriptSink>) -> Self {
        Self { resolver, sink }
    }

    /// Resolves the canonical chatbot URL, renders the userscript and delivers it.
    /// Any failure aborts with nothing written.
    pub async fn generate(&self, hostname: &str, chatbot_url: &str, customer: &str) -> ScriptOutcome {
        let resolved = match self.resolver.resolve(chatbot_url).await {
            Ok(resolved) => resolved,
            Err(err) => {
                qchat_warn!("Redirect lookup for {} failed: {}", customer, err);
                return ScriptOutcome::Aborted {
                    reason: err.to_string(),
                };
            }
        };

        let download = ScriptDownload {
            filename: script_filename(customer),
            mime_type: SCRIPT_MIME_TYPE,
            content: render_userscript(customer, hostname, &resolved),
        };

        match self.sink.deliver(&download) {
            Ok(path) => {
                qchat_info!("Userscript for {} written to {:?}", customer, path);
                ScriptOutcome::Produced {
                    filename: download.filename,
                    path,
                }
            }
            Err(err) => {
                qchat_warn!("Delivering userscript for {} failed: {}", customer, err);
                ScriptOutcome::Aborted {
                    reason: err.to_string(),
                }
            }
        }
    }
}
