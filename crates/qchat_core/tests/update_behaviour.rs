use std::path::PathBuf;
use std::sync::Once;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use qchat_core::{
    update, AppState, BotStatus, ChatbotCell, Effect, Msg, RefreshOutcome, RefreshReport,
    Request, ScriptOutcome, UserContext, ViewMode, INDEXING_BUDGET_K,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(qchat_logging::initialize_for_tests);
}

fn admin() -> UserContext {
    UserContext {
        email: "admin@example.com".to_string(),
        is_admin: true,
    }
}

fn member() -> UserContext {
    UserContext {
        email: "ana@example.com".to_string(),
        is_admin: false,
    }
}

fn request(id: &str, owner: &str, day: u32) -> Request {
    Request {
        id: id.to_string(),
        customer: format!("Customer {id}"),
        website: format!("https://{id}.acme.test/home"),
        requester_email: owner.to_string(),
        chatbot_name: format!("bot-{id}"),
        token: Some(format!("https://bot.test/chat?id={id}")),
        indexed_pages: None,
        bot_status: BotStatus::Active,
        region_q: "us-east-1".to_string(),
        application_id_q: format!("app-{id}"),
        created_at: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
    }
}

fn records() -> Vec<Request> {
    let mut disabled = request("x", "ana@example.com", 4);
    disabled.bot_status = BotStatus::Disabled;
    vec![
        request("a", "ana@example.com", 1),
        request("b", "bo@example.com", 3),
        request("c", "ana@example.com", 2),
        disabled,
    ]
}

fn loaded(user: UserContext) -> AppState {
    let (state, _) = update(AppState::new(user), Msg::RequestsLoaded(records()));
    state
}

#[test]
fn initial_view_mode_depends_on_role() {
    init_logging();
    assert_eq!(AppState::new(admin()).view_mode(), ViewMode::AllRequests);
    assert_eq!(AppState::new(member()).view_mode(), ViewMode::MyRequests);
}

#[test]
fn load_requested_emits_load_effect() {
    init_logging();
    let (_state, effects) = update(AppState::new(member()), Msg::LoadRequested);
    assert_eq!(effects, vec![Effect::LoadRequests]);
}

#[test]
fn loaded_list_is_filtered_sorted_and_fetches_aggregate() {
    init_logging();
    let (state, effects) = update(AppState::new(member()), Msg::RequestsLoaded(records()));

    assert_eq!(effects, vec![Effect::FetchAggregate]);
    let view = state.view();
    assert!(view.loaded);
    assert_eq!(view.ongoing_pocs, 2);
    let ids: Vec<_> = view.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a"]);
    assert_eq!(view.toggle_label, None);
}

#[test]
fn row_view_shows_update_date_and_chatbot_link() {
    init_logging();
    let mut records = records();
    records[0].token = Some("https://bot.test/chat".to_string());
    records[1].token = None;
    let (state, _) = update(AppState::new(admin()), Msg::RequestsLoaded(records));
    let view = state.view();

    let row_a = view.rows.iter().find(|row| row.id == "a").unwrap();
    assert_eq!(row_a.date, Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
    assert_eq!(
        row_a.chatbot,
        ChatbotCell::Link {
            name: "bot-a".to_string(),
            href: String::new(),
            can_download_script: true,
        }
    );
    let row_b = view.rows.iter().find(|row| row.id == "b").unwrap();
    assert_eq!(row_b.chatbot, ChatbotCell::Name("bot-b".to_string()));
}

#[test]
fn aggregate_scales_rounds_and_warns() {
    init_logging();
    let (state, effects) = update(loaded(admin()), Msg::AggregateLoaded(Some(12_000.0)));
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.consumption_k, 12);
    assert!(view.consumption_warning);
    assert_eq!(view.budget_k, INDEXING_BUDGET_K);

    let (state, _) = update(state, Msg::AggregateLoaded(Some(9_400.0)));
    let view = state.view();
    assert_eq!(view.consumption_k, 9);
    assert!(!view.consumption_warning);
}

#[test]
fn fractional_aggregate_just_over_threshold_warns() {
    init_logging();
    let (state, _) = update(loaded(admin()), Msg::AggregateLoaded(Some(10_000.5)));
    let view = state.view();
    assert_eq!(view.consumption_k, 10);
    assert!(view.consumption_warning);
}

#[test]
fn failed_aggregate_keeps_previous_value() {
    init_logging();
    let (state, _) = update(loaded(admin()), Msg::AggregateLoaded(Some(12_000.0)));
    let before = state.clone();
    let (state, effects) = update(state, Msg::AggregateLoaded(None));
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, _) = update(state, Msg::AggregateLoaded(None));
    let view = state.view();
    assert_eq!(view.consumption_k, 12);
    assert!(view.consumption_warning);
}

#[test]
fn admin_toggle_switches_view_and_reloads() {
    init_logging();
    let state = loaded(admin());
    assert_eq!(state.view().toggle_label, Some("Show My Requests"));

    let (state, effects) = update(state, Msg::ViewToggled);
    assert_eq!(state.view_mode(), ViewMode::MyRequests);
    assert_eq!(effects, vec![Effect::LoadRequests]);
    assert_eq!(state.view().toggle_label, Some("Show All Requests"));

    let (state, _) = update(state, Msg::RequestsLoaded(records()));
    assert_eq!(state.view().ongoing_pocs, 0);
}

#[test]
fn member_cannot_toggle_view() {
    init_logging();
    let before = loaded(member());
    let (state, effects) = update(before.clone(), Msg::ViewToggled);
    assert_eq!(state.view_mode(), ViewMode::MyRequests);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn refresh_all_snapshots_rows_and_sets_busy_flag() {
    init_logging();
    let state = loaded(member());
    let expected_rows = state.requests().unwrap().to_vec();

    let (state, effects) = update(state, Msg::RefreshAllClicked);
    assert!(state.view().is_processing);
    assert_eq!(effects, vec![Effect::RefreshRows { rows: expected_rows }]);

    // A second click while busy is ignored.
    let (state, effects) = update(state, Msg::RefreshAllClicked);
    assert!(effects.is_empty());
    assert!(state.is_processing());
}

#[test]
fn refresh_before_first_load_does_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(member()), Msg::RefreshAllClicked);
    assert!(!state.is_processing());
    assert!(effects.is_empty());
}

#[test]
fn refresh_finished_clears_busy_flag_and_reloads() {
    init_logging();
    let (state, _) = update(loaded(member()), Msg::RefreshAllClicked);
    let reports = vec![
        RefreshReport {
            request_id: "c".to_string(),
            outcome: RefreshOutcome::Updated { indexed_pages: 31 },
        },
        RefreshReport {
            request_id: "a".to_string(),
            outcome: RefreshOutcome::Failed {
                reason: "network error".to_string(),
            },
        },
    ];

    let (state, effects) = update(state, Msg::RefreshFinished(reports.clone()));
    assert!(!state.is_processing());
    assert_eq!(effects, vec![Effect::LoadRequests]);
    assert_eq!(state.view().last_refresh, reports);
}

#[test]
fn download_click_emits_generate_script() {
    init_logging();
    let (_state, effects) = update(
        loaded(member()),
        Msg::DownloadScriptClicked {
            request_id: "a".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::GenerateScript {
            request_id: "a".to_string(),
            hostname: "a.acme.test".to_string(),
            chatbot_url: "https://bot.test/chat?id=a".to_string(),
            customer: "Customer a".to_string(),
        }]
    );
}

#[test]
fn download_without_token_aborts_without_effect() {
    init_logging();
    let mut records = records();
    records[0].token = None;
    let (state, _) = update(AppState::new(member()), Msg::RequestsLoaded(records));

    let (state, effects) = update(
        state,
        Msg::DownloadScriptClicked {
            request_id: "a".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(matches!(
        state.view().last_script,
        Some(ScriptOutcome::Aborted { .. })
    ));
}

#[test]
fn script_finished_is_recorded() {
    init_logging();
    let outcome = ScriptOutcome::Produced {
        filename: "qchat-script-Customer a.user.js".to_string(),
        path: PathBuf::from("/tmp/qchat-script-Customer a.user.js"),
    };
    let (state, effects) = update(loaded(member()), Msg::ScriptFinished(outcome.clone()));
    assert!(effects.is_empty());
    assert_eq!(state.view().last_script, Some(outcome));
}

#[test]
fn load_failure_is_visible_and_cleared_by_next_load() {
    init_logging();
    let (state, effects) = update(
        AppState::new(member()),
        Msg::RequestsLoadFailed("store unreachable".to_string()),
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().load_error.as_deref(), Some("store unreachable"));
    assert!(!state.view().loaded);

    let (state, _) = update(state, Msg::RequestsLoaded(records()));
    assert_eq!(state.view().load_error, None);
}
