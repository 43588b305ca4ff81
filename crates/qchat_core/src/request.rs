use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RequestId = String;

/// Lifecycle status of a provisioned chatbot. Only `Disabled` changes behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BotStatus {
    #[default]
    Active,
    Disabled,
    Other(String),
}

impl From<String> for BotStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => BotStatus::Active,
            "Disabled" => BotStatus::Disabled,
            _ => BotStatus::Other(value),
        }
    }
}

impl From<BotStatus> for String {
    fn from(value: BotStatus) -> Self {
        match value {
            BotStatus::Active => "Active".to_string(),
            BotStatus::Disabled => "Disabled".to_string(),
            BotStatus::Other(raw) => raw,
        }
    }
}

/// One chatbot-provisioning submission, as held by the external record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub website: String,
    #[serde(default, alias = "requester_email")]
    pub requester_email: String,
    #[serde(default, alias = "chatbotname")]
    pub chatbot_name: String,
    /// Chatbot endpoint URL; present once the bot is provisioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Numeric string. Once positive it is never queried again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_pages: Option<String>,
    #[serde(default, alias = "bot_status")]
    pub bot_status: BotStatus,
    #[serde(default)]
    pub region_q: String,
    #[serde(default)]
    pub application_id_q: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    pub fn is_disabled(&self) -> bool {
        self.bot_status == BotStatus::Disabled
    }

    pub fn indexed_pages_count(&self) -> Option<i64> {
        self.indexed_pages.as_deref().and_then(parse_indexed_pages)
    }
}

/// Which rows the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    AllRequests,
    #[default]
    MyRequests,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::AllRequests => ViewMode::MyRequests,
            ViewMode::MyRequests => ViewMode::AllRequests,
        }
    }
}

/// Parses a page count the lenient way: leading whitespace, an optional sign,
/// then as many decimal digits as are present. No digits means no value.
pub fn parse_indexed_pages(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Drops disabled records, applies the ownership filter, and sorts newest first.
pub fn visible_requests(records: Vec<Request>, mode: ViewMode, user_email: &str) -> Vec<Request> {
    let mut visible: Vec<Request> = records
        .into_iter()
        .filter(|request| !request.is_disabled())
        .filter(|request| match mode {
            ViewMode::AllRequests => true,
            ViewMode::MyRequests => request.requester_email == user_email,
        })
        .collect();
    sort_by_creation_date(&mut visible);
    visible
}

/// Sorts by `created_at`, newest first.
pub fn sort_by_creation_date(requests: &mut [Request]) {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshDecision {
    /// A positive page count is already recorded.
    Skip,
    Query {
        region_q: String,
        application_id_q: String,
    },
}

pub fn refresh_decision(request: &Request) -> RefreshDecision {
    match request.indexed_pages_count() {
        Some(pages) if pages > 0 => RefreshDecision::Skip,
        _ => RefreshDecision::Query {
            region_q: request.region_q.clone(),
            application_id_q: request.application_id_q.clone(),
        },
    }
}

/// Only a positive reported count is written back.
pub fn should_commit(reported: Option<i64>) -> bool {
    matches!(reported, Some(pages) if pages > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_indexed_pages("42"), Some(42));
        assert_eq!(parse_indexed_pages("  17 pages"), Some(17));
        assert_eq!(parse_indexed_pages("-3"), Some(-3));
        assert_eq!(parse_indexed_pages("+8"), Some(8));
        assert_eq!(parse_indexed_pages("0"), Some(0));
        assert_eq!(parse_indexed_pages(""), None);
        assert_eq!(parse_indexed_pages("n/a"), None);
        assert_eq!(parse_indexed_pages("-"), None);
    }

    #[test]
    fn bot_status_round_trips_unknown_values() {
        assert_eq!(BotStatus::from("Disabled".to_string()), BotStatus::Disabled);
        assert_eq!(
            String::from(BotStatus::from("Pending".to_string())),
            "Pending"
        );
    }
}
