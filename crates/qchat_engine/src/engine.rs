use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use qchat_core::{RefreshReport, Request, ScriptOutcome};
use qchat_logging::qchat_warn;

use crate::{
    ClientSettings, CommandClient, DirectorySink, JsonFileStore, RedirectResolver,
    RefreshCoordinator, ReqwestCommandClient, ReqwestRedirectResolver, RequestStore,
    ScriptGenerator, ScriptSink, SessionProvider, StaticSession, StoreError,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub endpoint_base: String,
    pub store_path: PathBuf,
    pub download_dir: PathBuf,
    pub id_token: Option<String>,
    pub request_timeout: Option<Duration>,
}

/// Bundles the collaborators the dashboard drives.
pub struct Engine {
    client: Arc<dyn CommandClient>,
    store: Arc<dyn RequestStore>,
    refresh: RefreshCoordinator,
    scripts: ScriptGenerator,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let session: Arc<dyn SessionProvider> = Arc::new(StaticSession::new(config.id_token));
        let client = Arc::new(ReqwestCommandClient::new(
            ClientSettings {
                endpoint_base: config.endpoint_base,
                request_timeout: config.request_timeout,
            },
            session,
        ));
        let store = Arc::new(JsonFileStore::new(config.store_path));
        let resolver = Arc::new(ReqwestRedirectResolver::new(config.request_timeout));
        let sink = Arc::new(DirectorySink::new(config.download_dir));
        Self::with_parts(client, store, resolver, sink)
    }

    pub fn with_parts(
        client: Arc<dyn CommandClient>,
        store: Arc<dyn RequestStore>,
        resolver: Arc<dyn RedirectResolver>,
        sink: Arc<dyn ScriptSink>,
    ) -> Self {
        Self {
            refresh: RefreshCoordinator::new(client.clone(), store.clone()),
            scripts: ScriptGenerator::new(resolver, sink),
            client,
            store,
        }
    }

    pub async fn load_requests(&self) -> Result<Vec<Request>, StoreError> {
        self.store.list().await
    }

    /// `None` when the endpoint could not be reached or answered without a total.
    pub async fn total_indexed_docs(&self) -> Option<f64> {
        match self.client.total_indexed_docs().await {
            Ok(total) => Some(total),
            Err(err) => {
                qchat_warn!("Aggregate indexed-document fetch failed: {}", err);
                None
            }
        }
    }

    pub async fn refresh_rows(&self, rows: &[Request]) -> Vec<RefreshReport> {
        self.refresh.refresh_all(rows).await
    }

    pub async fn generate_script(
        &self,
        hostname: &str,
        chatbot_url: &str,
        customer: &str,
    ) -> ScriptOutcome {
        self.scripts.generate(hostname, chatbot_url, customer).await
    }
}
