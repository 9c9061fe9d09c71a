use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use tourney_api::flags::FlagAssets;
use tourney_api::{OverviewKind, OverviewPayload};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    GroupStage,
    KnockoutStage,
    Team,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub flags: FlagAssets,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(settings.tournaments.clone()),
            flags: FlagAssets::new(settings.flags_url.clone()),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    /// Requests for whatever identifiers were configured up front.
    pub fn startup_requests(&mut self) -> Vec<NetworkRequest> {
        let mut requests = Vec::new();
        if let Some(tournament_id) = self.settings.initial_tournament.clone() {
            requests.extend(self.on_tournament_change(tournament_id));
        }
        if let Some(team_id) = self.settings.initial_team.clone() {
            requests.extend(self.state.team.set_identifier(Some(team_id)));
            if self.settings.initial_tournament.is_none() {
                self.update_tab(MenuItem::Team);
            }
        }
        requests
    }

    // -----------------------------------------------------------------------
    // Selection handlers: a child picked something, the container refetches
    // -----------------------------------------------------------------------

    pub fn on_tournament_change(&mut self, tournament_id: String) -> Vec<NetworkRequest> {
        self.state.selector.mark_selected(&tournament_id);
        self.state.group_view = Default::default();
        self.state.knockout_view = Default::default();

        let group = self.state.group_stage.set_identifier(Some(tournament_id.clone()));
        let knockout = self.state.knockout.set_identifier(Some(tournament_id));
        group.into_iter().chain(knockout).collect()
    }

    pub fn on_team_change(&mut self, team_id: String) -> Option<NetworkRequest> {
        let request = self.state.team.set_identifier(Some(team_id));
        self.update_tab(MenuItem::Team);
        request
    }

    // -----------------------------------------------------------------------
    // Network response handler, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_overview_loaded(
        &mut self,
        kind: OverviewKind,
        identifier: &str,
        result: Result<OverviewPayload, String>,
    ) {
        self.state.apply_response(kind, identifier, result);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn selector_next(&mut self) {
        self.state.selector.move_next();
    }

    pub fn selector_prev(&mut self) {
        self.state.selector.move_prev();
    }

    pub fn highlighted_tournament(&self) -> Option<String> {
        self.state.selector.highlighted_id()
    }

    pub fn highlighted_team(&self) -> Option<String> {
        self.state.highlighted_team_id()
    }

    pub fn scroll_down(&mut self) {
        match self.state.active_tab {
            MenuItem::GroupStage => self.state.group_row_down(),
            MenuItem::Team => {
                self.state.team_view.scroll_offset = self.state.team_view.scroll_offset.saturating_add(1)
            }
            _ => {}
        }
    }

    pub fn scroll_up(&mut self) {
        match self.state.active_tab {
            MenuItem::GroupStage => self.state.group_row_up(),
            MenuItem::Team => {
                self.state.team_view.scroll_offset = self.state.team_view.scroll_offset.saturating_sub(1)
            }
            _ => {}
        }
    }
}
