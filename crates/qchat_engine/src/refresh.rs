use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use qchat_core::{
    refresh_decision, should_commit, RefreshDecision, RefreshOutcome, RefreshReport, Request,
};
use qchat_logging::{qchat_debug, qchat_info, qchat_warn};

use crate::{CommandClient, RequestStore};

/// Per-row indexing refresh: skip, query, commit.
pub struct RefreshCoordinator {
    client: Arc<dyn CommandClient>,
    store: Arc<dyn RequestStore>,
}

impl RefreshCoordinator {
    pub fn new(client: Arc<dyn CommandClient>, store: Arc<dyn RequestStore>) -> Self {
        Self { client, store }
    }

    /// Never fails: every error ends the row as an unchanged outcome.
    pub async fn refresh_one(&self, request: &Request) -> RefreshOutcome {
        let (region_q, application_id_q) = match refresh_decision(request) {
            RefreshDecision::Skip => {
                qchat_debug!("Request {} already indexed; skipping", request.id);
                return RefreshOutcome::Skipped;
            }
            RefreshDecision::Query {
                region_q,
                application_id_q,
            } => (region_q, application_id_q),
        };

        let reported = match self
            .client
            .indexing_status(&region_q, &application_id_q)
            .await
        {
            Ok(reported) => reported,
            Err(err) => {
                qchat_warn!("Indexing status for request {} failed: {}", request.id, err);
                return RefreshOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        let indexed_pages = match reported {
            Some(pages) if should_commit(reported) => pages,
            _ => return RefreshOutcome::NoProgress { reported },
        };

        match self
            .store
            .update_indexed_pages(&request.id, indexed_pages)
            .await
        {
            Ok(_) => {
                qchat_info!("Request {} now has {} indexed pages", request.id, indexed_pages);
                RefreshOutcome::Updated { indexed_pages }
            }
            Err(err) => {
                qchat_warn!("Storing indexed pages for request {} failed: {}", request.id, err);
                RefreshOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Refreshes rows strictly one at a time, in the given order: a row's remote
    /// call starts only after the previous row has fully settled. Disabled rows
    /// are left out of the batch entirely.
    pub async fn refresh_all(&self, rows: &[Request]) -> Vec<RefreshReport> {
        stream::iter(rows.iter().filter(|row| !row.is_disabled()))
            .then(|row| async move {
                RefreshReport {
                    request_id: row.id.clone(),
                    outcome: self.refresh_one(row).await,
                }
            })
            .collect()
            .await
    }
}
