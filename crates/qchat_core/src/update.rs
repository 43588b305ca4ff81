use crate::{
    visible_requests, website_hostname, AppState, Effect, IndexConsumption, Msg, ScriptOutcome,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => vec![Effect::LoadRequests],
        Msg::RequestsLoaded(records) => {
            let user = state.user();
            let visible = visible_requests(records, state.view_mode(), &user.email);
            state.set_requests(visible);
            // Every successful load also refreshes the consumption figure.
            vec![Effect::FetchAggregate]
        }
        Msg::RequestsLoadFailed(reason) => {
            state.set_load_error(reason);
            Vec::new()
        }
        Msg::AggregateLoaded(total) => {
            // A failed fetch keeps whatever was shown before.
            if let Some(total_docs) = total {
                state.set_consumption(IndexConsumption::from_total_docs(total_docs));
            }
            Vec::new()
        }
        Msg::ViewToggled => {
            if state.user().is_admin {
                state.toggle_view();
                vec![Effect::LoadRequests]
            } else {
                Vec::new()
            }
        }
        Msg::RefreshAllClicked => {
            if state.is_processing() {
                return (state, Vec::new());
            }
            match state.requests() {
                Some(rows) => {
                    let rows = rows.to_vec();
                    state.begin_processing();
                    vec![Effect::RefreshRows { rows }]
                }
                None => Vec::new(),
            }
        }
        Msg::RefreshFinished(reports) => {
            state.finish_processing(reports);
            vec![Effect::LoadRequests]
        }
        Msg::DownloadScriptClicked { request_id } => match script_effect(&state, &request_id) {
            Ok(effect) => vec![effect],
            Err(reason) => {
                state.set_last_script(ScriptOutcome::Aborted { reason });
                Vec::new()
            }
        },
        Msg::ScriptFinished(outcome) => {
            state.set_last_script(outcome);
            Vec::new()
        }
    };

    (state, effects)
}

fn script_effect(state: &AppState, request_id: &str) -> Result<Effect, String> {
    let request = state
        .find_request(request_id)
        .ok_or_else(|| format!("request {request_id} is not in the current list"))?;
    let chatbot_url = request
        .token
        .clone()
        .ok_or_else(|| format!("request {request_id} has no chatbot endpoint yet"))?;
    let hostname = website_hostname(&request.website)
        .ok_or_else(|| format!("website {:?} has no hostname", request.website))?;

    Ok(Effect::GenerateScript {
        request_id: request.id.clone(),
        hostname,
        chatbot_url,
        customer: request.customer.clone(),
    })
}
