use crate::{Request, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadRequests,
    FetchAggregate,
    /// Refresh the given rows one after another, in order.
    RefreshRows { rows: Vec<Request> },
    GenerateScript {
        request_id: RequestId,
        hostname: String,
        chatbot_url: String,
        customer: String,
    },
}
