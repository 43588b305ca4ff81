//! QChat core: request model, pure state machine and view-model helpers.
mod effect;
mod msg;
mod outcome;
mod request;
mod stat;
mod state;
mod update;
mod userscript;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{RefreshOutcome, RefreshReport, ScriptOutcome};
pub use request::{
    parse_indexed_pages, refresh_decision, should_commit, sort_by_creation_date,
    visible_requests, BotStatus, RefreshDecision, Request, RequestId, ViewMode,
};
pub use stat::{IndexConsumption, INDEXING_BUDGET_K, INDEXING_WARNING_K};
pub use state::{AppState, UserContext};
pub use update::update;
pub use userscript::{
    chatbot_link, normalize_redirect_url, redirect_lookup_url, render_userscript,
    script_filename, userscript_template, website_hostname, SCRIPT_MIME_TYPE, URL_PLACEHOLDER,
};
pub use view_model::{AppViewModel, ChatbotCell, RequestRowView};
