use std::collections::VecDeque;

use qchat_core::{update, AppState, AppViewModel, Msg, UserContext};
use qchat_engine::Engine;
use qchat_logging::{qchat_debug, qchat_warn};

use crate::cli::Command;
use crate::effects::EffectRunner;

/// Owns the dashboard state and drives it one message at a time. Effects run
/// to completion before the next message is handled.
pub struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    pub fn new(user: UserContext, engine: Engine) -> Self {
        Self {
            state: AppState::new(user),
            runner: EffectRunner::new(engine),
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            qchat_debug!("dispatch {}", msg_name(&msg));
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                inbox.extend(self.runner.run(effect).await);
            }
        }
    }

    /// Runs one CLI command through the message loop and returns the final view.
    pub async fn run(&mut self, command: Command) -> AppViewModel {
        let wants_mine = matches!(
            command,
            Command::List { mine: true } | Command::Refresh { mine: true }
        );
        if wants_mine {
            if self.state.user().is_admin {
                self.dispatch(Msg::ViewToggled).await;
            } else {
                qchat_warn!("--mine only applies to administrators; already showing your requests");
            }
        }

        if !self.state.view().loaded {
            self.dispatch(Msg::LoadRequested).await;
        }

        match command {
            Command::List { .. } => {}
            Command::Refresh { .. } => self.dispatch(Msg::RefreshAllClicked).await,
            Command::Script { request_id } => {
                self.dispatch(Msg::DownloadScriptClicked { request_id })
                    .await
            }
        }
        self.view()
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::LoadRequested => "LoadRequested",
        Msg::RequestsLoaded(_) => "RequestsLoaded",
        Msg::RequestsLoadFailed(_) => "RequestsLoadFailed",
        Msg::AggregateLoaded(_) => "AggregateLoaded",
        Msg::ViewToggled => "ViewToggled",
        Msg::RefreshAllClicked => "RefreshAllClicked",
        Msg::RefreshFinished(_) => "RefreshFinished",
        Msg::DownloadScriptClicked { .. } => "DownloadScriptClicked",
        Msg::ScriptFinished(_) => "ScriptFinished",
    }
}
