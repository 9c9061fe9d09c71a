use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use tourney_api::{OverviewKind, OverviewPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkRequest {
    LoadOverview { kind: OverviewKind, identifier: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Settled read for `identifier`; the error is already rendered to text.
    OverviewLoaded {
        kind: OverviewKind,
        identifier: String,
        result: Result<OverviewPayload, String>,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    TournamentChanged { tournament_id: String },
    TeamChanged { team_id: String },
}
