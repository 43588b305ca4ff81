use crate::view_model::{AppViewModel, ChatbotCell, RequestRowView};
use crate::{
    chatbot_link, website_hostname, IndexConsumption, RefreshReport, Request, ScriptOutcome,
    ViewMode, INDEXING_BUDGET_K,
};

/// Signed-in user, as reported by the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserContext {
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    user: UserContext,
    view_mode: ViewMode,
    requests: Option<Vec<Request>>,
    consumption: Option<IndexConsumption>,
    is_processing: bool,
    last_refresh: Vec<RefreshReport>,
    last_script: Option<ScriptOutcome>,
    load_error: Option<String>,
}

impl AppState {
    /// Administrators start on the full list; everyone else is locked to their own rows.
    pub fn new(user: UserContext) -> Self {
        let view_mode = if user.is_admin {
            ViewMode::AllRequests
        } else {
            ViewMode::MyRequests
        };
        Self {
            user,
            view_mode,
            ..Self::default()
        }
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn requests(&self) -> Option<&[Request]> {
        self.requests.as_deref()
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn find_request(&self, request_id: &str) -> Option<&Request> {
        self.requests
            .as_deref()
            .and_then(|rows| rows.iter().find(|row| row.id == request_id))
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .requests
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(row_view)
            .collect::<Vec<_>>();
        let consumption = self.consumption.unwrap_or_default();
        let toggle_label = self.user.is_admin.then(|| match self.view_mode {
            ViewMode::MyRequests => "Show All Requests",
            ViewMode::AllRequests => "Show My Requests",
        });

        AppViewModel {
            view_mode: self.view_mode,
            toggle_label,
            loaded: self.requests.is_some(),
            ongoing_pocs: rows.len(),
            consumption_k: consumption.display_k(),
            budget_k: INDEXING_BUDGET_K,
            consumption_warning: consumption.is_over_warning(),
            is_processing: self.is_processing,
            rows,
            last_refresh: self.last_refresh.clone(),
            last_script: self.last_script.clone(),
            load_error: self.load_error.clone(),
        }
    }

    pub(crate) fn set_requests(&mut self, requests: Vec<Request>) {
        self.requests = Some(requests);
        self.load_error = None;
    }

    pub(crate) fn set_load_error(&mut self, reason: String) {
        self.load_error = Some(reason);
    }

    pub(crate) fn set_consumption(&mut self, consumption: IndexConsumption) {
        self.consumption = Some(consumption);
    }

    pub(crate) fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }

    pub(crate) fn begin_processing(&mut self) {
        self.is_processing = true;
    }

    pub(crate) fn finish_processing(&mut self, reports: Vec<RefreshReport>) {
        self.is_processing = false;
        self.last_refresh = reports;
    }

    pub(crate) fn set_last_script(&mut self, outcome: ScriptOutcome) {
        self.last_script = Some(outcome);
    }
}

fn row_view(request: &Request) -> RequestRowView {
    let chatbot = match request.token.as_deref() {
        Some(token) => ChatbotCell::Link {
            name: request.chatbot_name.clone(),
            href: chatbot_link(token).to_string(),
            can_download_script: website_hostname(&request.website).is_some(),
        },
        None => ChatbotCell::Name(request.chatbot_name.clone()),
    };

    RequestRowView {
        id: request.id.clone(),
        customer: request.customer.clone(),
        website: request.website.clone(),
        requester_email: request.requester_email.clone(),
        date: request.updated_at,
        indexed_pages: request.indexed_pages.clone(),
        chatbot,
    }
}
