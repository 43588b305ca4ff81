use qchat_core::{Effect, Msg};
use qchat_engine::Engine;
use qchat_logging::{qchat_info, qchat_warn};

/// Executes core effects against the engine and turns results back into messages.
pub struct EffectRunner {
    engine: Engine,
}

impl EffectRunner {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub async fn run(&self, effect: Effect) -> Vec<Msg> {
        match effect {
            Effect::LoadRequests => match self.engine.load_requests().await {
                Ok(records) => {
                    qchat_info!("Loaded {} request records", records.len());
                    vec![Msg::RequestsLoaded(records)]
                }
                Err(err) => {
                    qchat_warn!("Loading requests failed: {}", err);
                    vec![Msg::RequestsLoadFailed(err.to_string())]
                }
            },
            Effect::FetchAggregate => {
                vec![Msg::AggregateLoaded(self.engine.total_indexed_docs().await)]
            }
            Effect::RefreshRows { rows } => {
                qchat_info!("Refreshing indexing status for {} rows", rows.len());
                vec![Msg::RefreshFinished(self.engine.refresh_rows(&rows).await)]
            }
            Effect::GenerateScript {
                request_id,
                hostname,
                chatbot_url,
                customer,
            } => {
                qchat_info!("Generating userscript for request {}", request_id);
                let outcome = self
                    .engine
                    .generate_script(&hostname, &chatbot_url, &customer)
                    .await;
                vec![Msg::ScriptFinished(outcome)]
            }
        }
    }
}
