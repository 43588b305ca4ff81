use crate::{RefreshReport, Request, RequestId, ScriptOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Initial load, or an explicit reload of the list.
    LoadRequested,
    /// Raw records from the store, before filtering.
    RequestsLoaded(Vec<Request>),
    RequestsLoadFailed(String),
    /// Aggregate indexed-document total; `None` when the fetch failed.
    AggregateLoaded(Option<f64>),
    /// Admin switched between "all requests" and "my requests".
    ViewToggled,
    /// User clicked the refresh icon on the status column.
    RefreshAllClicked,
    RefreshFinished(Vec<RefreshReport>),
    DownloadScriptClicked { request_id: RequestId },
    ScriptFinished(ScriptOutcome),
}
