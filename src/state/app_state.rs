use crate::app::MenuItem;
use crate::state::fetch::FetchComponent;
use crate::state::reshape::{self, GroupStageView, KnockoutStageView, TeamMatchesView};
use crate::state::selector::{TournamentOption, TournamentSelector};
use tourney_api::{
    GroupStageOverview, KnockoutStageOverview, OverviewKind, OverviewPayload, TeamMatchesOverview,
    TeamStats,
};

pub type GroupStageComponent = FetchComponent<GroupStageOverview, GroupStageView>;
pub type KnockoutStageComponent = FetchComponent<KnockoutStageOverview, KnockoutStageView>;
pub type TeamMatchesComponent = FetchComponent<TeamMatchesOverview, TeamMatchesView>;

pub fn group_stage_component() -> GroupStageComponent {
    FetchComponent::new(OverviewKind::GroupStage, reshape::group_stage)
}

pub fn knockout_stage_component() -> KnockoutStageComponent {
    FetchComponent::new(OverviewKind::KnockoutStage, reshape::knockout_stage)
}

pub fn team_matches_component() -> TeamMatchesComponent {
    FetchComponent::new(OverviewKind::TeamMatches, reshape::team_matches)
}

// ---------------------------------------------------------------------------
// Group stage tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GroupStageState {
    /// Highlighted standings row, counted across all groups in display order.
    pub selected_row: usize,
}

// ---------------------------------------------------------------------------
// Knockout stage tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct KnockoutState {
    /// Index of the leftmost visible stage column.
    pub first_stage: usize,
}

// ---------------------------------------------------------------------------
// Team tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamState {
    pub scroll_offset: u16,
}

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub selector: TournamentSelector,
    pub group_stage: GroupStageComponent,
    pub knockout: KnockoutStageComponent,
    pub team: TeamMatchesComponent,
    pub group_view: GroupStageState,
    pub knockout_view: KnockoutState,
    pub team_view: TeamState,
}

impl AppState {
    pub fn new(tournaments: Vec<TournamentOption>) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            selector: TournamentSelector::new(tournaments),
            group_stage: group_stage_component(),
            knockout: knockout_stage_component(),
            team: team_matches_component(),
            group_view: GroupStageState::default(),
            knockout_view: KnockoutState::default(),
            team_view: TeamState::default(),
        }
    }

    /// Route a settled read to the component that asked for it.
    pub fn apply_response(
        &mut self,
        kind: OverviewKind,
        identifier: &str,
        result: Result<OverviewPayload, String>,
    ) {
        match result {
            Ok(OverviewPayload::GroupStage(raw)) => {
                self.group_stage.on_response(identifier, Ok(raw));
                self.clamp_group_row();
            }
            Ok(OverviewPayload::KnockoutStage(raw)) => {
                self.knockout.on_response(identifier, Ok(raw));
                self.clamp_first_stage();
            }
            Ok(OverviewPayload::TeamMatches(raw)) => {
                self.team.on_response(identifier, Ok(raw));
                self.team_view.scroll_offset = 0;
            }
            Err(message) => match kind {
                OverviewKind::GroupStage => self.group_stage.on_response(identifier, Err(message)),
                OverviewKind::KnockoutStage => self.knockout.on_response(identifier, Err(message)),
                OverviewKind::TeamMatches => self.team.on_response(identifier, Err(message)),
            },
        }
    }

    /// All standings rows in display order.
    pub fn standings_rows(&self) -> Vec<&TeamStats> {
        self.group_stage
            .view()
            .map(|groups| groups.iter().flat_map(|g| g.items.teams_stats.iter()).collect())
            .unwrap_or_default()
    }

    pub fn highlighted_team_id(&self) -> Option<String> {
        self.standings_rows()
            .get(self.group_view.selected_row)
            .and_then(|row| row.team_id.clone())
    }

    pub fn group_row_down(&mut self) {
        let max = self.standings_rows().len().saturating_sub(1);
        if self.group_view.selected_row < max {
            self.group_view.selected_row += 1;
        }
    }

    pub fn group_row_up(&mut self) {
        self.group_view.selected_row = self.group_view.selected_row.saturating_sub(1);
    }

    pub fn knockout_scroll_right(&mut self) {
        let stages = self.knockout.view().map(Vec::len).unwrap_or(0);
        if self.knockout_view.first_stage + 1 < stages {
            self.knockout_view.first_stage += 1;
        }
    }

    pub fn knockout_scroll_left(&mut self) {
        self.knockout_view.first_stage = self.knockout_view.first_stage.saturating_sub(1);
    }

    fn clamp_group_row(&mut self) {
        let max = self.standings_rows().len().saturating_sub(1);
        self.group_view.selected_row = self.group_view.selected_row.min(max);
    }

    fn clamp_first_stage(&mut self) {
        let stages = self.knockout.view().map(Vec::len).unwrap_or(0);
        self.knockout_view.first_stage =
            self.knockout_view.first_stage.min(stages.saturating_sub(1));
    }
}
