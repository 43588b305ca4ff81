use chrono::Utc;
use qchat_core::{refresh_decision, should_commit, BotStatus, RefreshDecision, Request};

fn with_pages(indexed_pages: Option<&str>) -> Request {
    Request {
        id: "r-1".to_string(),
        customer: "Acme".to_string(),
        website: "https://acme.test".to_string(),
        requester_email: "ana@example.com".to_string(),
        chatbot_name: "acme-bot".to_string(),
        token: None,
        indexed_pages: indexed_pages.map(ToOwned::to_owned),
        bot_status: BotStatus::Active,
        region_q: "us-west-2".to_string(),
        application_id_q: "app-42".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn positive_count_is_a_ratchet() {
    assert_eq!(refresh_decision(&with_pages(Some("1"))), RefreshDecision::Skip);
    assert_eq!(refresh_decision(&with_pages(Some("250"))), RefreshDecision::Skip);
}

#[test]
fn absent_zero_negative_or_garbage_counts_are_queried() {
    for pages in [None, Some("0"), Some("-4"), Some(""), Some("pending")] {
        assert_eq!(
            refresh_decision(&with_pages(pages)),
            RefreshDecision::Query {
                region_q: "us-west-2".to_string(),
                application_id_q: "app-42".to_string(),
            },
            "pages = {pages:?}"
        );
    }
}

#[test]
fn only_positive_reports_are_committed() {
    assert!(should_commit(Some(3)));
    assert!(!should_commit(Some(0)));
    assert!(!should_commit(Some(-1)));
    assert!(!should_commit(None));
}
