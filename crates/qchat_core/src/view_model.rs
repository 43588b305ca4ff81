use chrono::{DateTime, Utc};

use crate::{RefreshReport, RequestId, ScriptOutcome, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub view_mode: ViewMode,
    /// Only administrators get a toggle.
    pub toggle_label: Option<&'static str>,
    pub loaded: bool,
    pub ongoing_pocs: usize,
    pub consumption_k: u64,
    pub budget_k: u64,
    pub consumption_warning: bool,
    pub is_processing: bool,
    pub rows: Vec<RequestRowView>,
    pub last_refresh: Vec<RefreshReport>,
    pub last_script: Option<ScriptOutcome>,
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRowView {
    pub id: RequestId,
    pub customer: String,
    pub website: String,
    pub requester_email: String,
    /// Last update time of the record.
    pub date: DateTime<Utc>,
    pub indexed_pages: Option<String>,
    pub chatbot: ChatbotCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatbotCell {
    /// Not provisioned yet.
    Name(String),
    Link {
        name: String,
        /// Empty when the token carries no `?id=` parameter.
        href: String,
        can_download_script: bool,
    },
}
