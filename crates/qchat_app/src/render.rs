use std::fmt::Write;

use chrono::Local;
use qchat_core::{AppViewModel, ChatbotCell, RefreshOutcome, ScriptOutcome};

const WEBSITE_WIDTH: usize = 32;

/// Plain-text rendering of the request list, header and last action results.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Ongoing PoCs: {}, Indexing Consumption: {}k / {}K",
        view.ongoing_pocs, view.consumption_k, view.budget_k
    );
    if view.consumption_warning {
        out.push_str("Warning: Indexing limit has been increased!\n");
    }
    if let Some(label) = view.toggle_label {
        let _ = writeln!(out, "[{label}]");
    }
    if let Some(error) = &view.load_error {
        let _ = writeln!(out, "Could not load requests: {error}");
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<20} {:<width$} {:<28} {:<17} {:>13}  {}",
        "Customer Name",
        "Website URL",
        "Requested By",
        "Creation Date",
        "Indexed Pages",
        "ChatBot",
        width = WEBSITE_WIDTH
    );
    for row in &view.rows {
        let chatbot = match &row.chatbot {
            ChatbotCell::Name(name) => name.clone(),
            ChatbotCell::Link { name, href, .. } if href.is_empty() => name.clone(),
            ChatbotCell::Link { name, href, .. } => format!("{name} <{href}>"),
        };
        let _ = writeln!(
            out,
            "{:<20} {:<width$} {:<28} {:<17} {:>13}  {}",
            row.customer,
            truncate(&row.website, WEBSITE_WIDTH),
            row.requester_email,
            row.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            row.indexed_pages.as_deref().unwrap_or("-"),
            chatbot,
            width = WEBSITE_WIDTH
        );
    }

    if !view.last_refresh.is_empty() {
        out.push_str("\nRefresh results:\n");
        for report in &view.last_refresh {
            let _ = writeln!(out, "  {:<24} {}", report.request_id, describe(&report.outcome));
        }
    }

    match &view.last_script {
        Some(ScriptOutcome::Produced { path, .. }) => {
            let _ = writeln!(out, "\nUserscript written to {}", path.display());
        }
        Some(ScriptOutcome::Aborted { reason }) => {
            let _ = writeln!(out, "\nNo userscript produced: {reason}");
        }
        None => {}
    }
    out
}

fn describe(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Skipped => "already indexed".to_string(),
        RefreshOutcome::Updated { indexed_pages } => format!("updated to {indexed_pages} pages"),
        RefreshOutcome::NoProgress { reported: Some(pages) } => {
            format!("unchanged (reported {pages})")
        }
        RefreshOutcome::NoProgress { reported: None } => "unchanged (no count reported)".to_string(),
        RefreshOutcome::Failed { reason } => format!("unchanged ({reason})"),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
