use crate::state::messages::UiEvent;
use log::error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentOption {
    pub id: String,
    pub name: String,
}

/// Leaf state for picking a tournament. It never loads anything itself; a
/// confirmed choice is handed to the [`SelectionRelay`].
#[derive(Debug, Default)]
pub struct TournamentSelector {
    pub options: Vec<TournamentOption>,
    pub cursor: usize,
    /// Tournament currently shown by the overview tabs.
    pub selected: Option<String>,
}

impl TournamentSelector {
    pub fn new(options: Vec<TournamentOption>) -> Self {
        Self { options, cursor: 0, selected: None }
    }

    pub fn move_next(&mut self) {
        let max = self.options.len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    pub fn move_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn highlighted_id(&self) -> Option<String> {
        self.options.get(self.cursor).map(|o| o.id.clone())
    }

    pub fn selected_name(&self) -> Option<&str> {
        let selected = self.selected.as_deref()?;
        self.options
            .iter()
            .find(|o| o.id == selected)
            .map(|o| o.name.as_str())
            .or(Some(selected))
    }

    /// Record the tournament the container switched to, moving the cursor
    /// onto it when it is one of the options.
    pub fn mark_selected(&mut self, tournament_id: &str) {
        if let Some(idx) = self.options.iter().position(|o| o.id == tournament_id) {
            self.cursor = idx;
        }
        self.selected = Some(tournament_id.to_owned());
    }
}

/// Sends selection changes from leaf components up to the UI loop.
///
/// The relay is called from inside the loop that drains its channel, so it
/// never waits for room: a full queue drops the selection and logs it.
#[derive(Debug, Clone)]
pub struct SelectionRelay {
    events: mpsc::Sender<UiEvent>,
}

impl SelectionRelay {
    pub fn new(events: mpsc::Sender<UiEvent>) -> Self {
        Self { events }
    }

    /// Returns false when there was nothing to relay or the event was not queued.
    pub fn tournament_changed(&self, record_id: Option<String>) -> bool {
        let Some(tournament_id) = record_id else {
            return false;
        };
        self.relay(UiEvent::TournamentChanged { tournament_id })
    }

    pub fn team_changed(&self, record_id: Option<String>) -> bool {
        let Some(team_id) = record_id else {
            return false;
        };
        self.relay(UiEvent::TeamChanged { team_id })
    }

    fn relay(&self, event: UiEvent) -> bool {
        match self.events.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                error!("UI event queue full, dropping {event:?}");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}
