pub mod client;
pub mod flags;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::client::ApiResult;

// ---------------------------------------------------------------------------
// Domain types, grouped the way the overview service returns them
// ---------------------------------------------------------------------------

/// Group name → standings and matches of that group, in service order.
pub type GroupStageOverview = IndexMap<String, GroupOverview>;

/// Stage name ("Round of 16", "Final", ...) → matches of that stage.
pub type KnockoutStageOverview = IndexMap<String, Vec<MatchRecord>>;

/// Tournament name → stage name → matches the team played.
pub type TeamMatchesOverview = IndexMap<String, IndexMap<String, Vec<MatchRecord>>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupOverview {
    pub teams_stats: Vec<TeamStats>,
    pub matches: Vec<MatchRecord>,
}

/// One row of a group standings table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamStats {
    pub team_id: Option<String>,
    pub team_name: String,
    pub team_code: String,
    pub team_flag_code: String,
    pub matches_played: u16,
    pub wins: u16,
    pub losses: u16,
    pub draws: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goals_difference: i32,
    pub points: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    /// Stage label within a group or knockout phase ("Matchday 1", "Final").
    pub stage: Option<String>,
    /// ISO 8601 date or date-time.
    pub match_date: Option<String>,
    pub home_team_id: Option<String>,
    pub home_team_name: String,
    pub home_team_code: String,
    pub home_team_flag_code: String,
    pub home_team_score: Option<u16>,
    pub away_team_id: Option<String>,
    pub away_team_name: String,
    pub away_team_code: String,
    pub away_team_flag_code: String,
    pub away_team_score: Option<u16>,
    pub winner_team_id: Option<String>,
}

/// How a team line is emphasised when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWeight {
    Bold,
    Regular,
}

impl TextWeight {
    pub fn for_winner(is_winner: bool) -> Self {
        if is_winner { TextWeight::Bold } else { TextWeight::Regular }
    }
}

impl MatchRecord {
    /// A side only wins when a winner is recorded and its id matches.
    pub fn is_home_winner(&self) -> bool {
        self.winner_team_id.is_some() && self.home_team_id == self.winner_team_id
    }

    pub fn is_away_winner(&self) -> bool {
        self.winner_team_id.is_some() && self.away_team_id == self.winner_team_id
    }

    pub fn match_day(&self) -> Option<NaiveDate> {
        let raw = self.match_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
    }

    /// "Dec 18, 2022", or an empty string when the date is missing or unreadable.
    pub fn formatted_date(&self) -> String {
        self.match_day()
            .map(|day| day.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Overview kinds: one configuration record per remote read
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverviewKind {
    GroupStage,
    KnockoutStage,
    TeamMatches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewConfig {
    pub kind: OverviewKind,
    pub title: &'static str,
    /// Path segment appended to the service base URL.
    pub endpoint: &'static str,
    /// Name of the single query parameter carrying the identifier.
    pub param: &'static str,
    /// Number of grouping levels in the response (stage, or tournament → stage).
    pub depth: u8,
}

const GROUP_STAGE: OverviewConfig = OverviewConfig {
    kind: OverviewKind::GroupStage,
    title: "Group Stage",
    endpoint: "group-stage-overview",
    param: "tournamentId",
    depth: 1,
};

const KNOCKOUT_STAGE: OverviewConfig = OverviewConfig {
    kind: OverviewKind::KnockoutStage,
    title: "Knockout Stage",
    endpoint: "knockout-stage-overview",
    param: "tournamentId",
    depth: 1,
};

const TEAM_MATCHES: OverviewConfig = OverviewConfig {
    kind: OverviewKind::TeamMatches,
    title: "Team",
    endpoint: "team-matches-overview",
    param: "teamId",
    depth: 2,
};

impl OverviewKind {
    pub fn config(self) -> &'static OverviewConfig {
        match self {
            OverviewKind::GroupStage => &GROUP_STAGE,
            OverviewKind::KnockoutStage => &KNOCKOUT_STAGE,
            OverviewKind::TeamMatches => &TEAM_MATCHES,
        }
    }

    pub fn title(self) -> &'static str {
        self.config().title
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "group" | "group-stage" => Some(OverviewKind::GroupStage),
            "knockout" | "ko" | "knockout-stage" => Some(OverviewKind::KnockoutStage),
            "team" | "team-matches" => Some(OverviewKind::TeamMatches),
            _ => None,
        }
    }
}

/// Result of any of the three read operations.
#[derive(Debug, Clone, PartialEq)]
pub enum OverviewPayload {
    GroupStage(GroupStageOverview),
    KnockoutStage(KnockoutStageOverview),
    TeamMatches(TeamMatchesOverview),
}

impl OverviewPayload {
    pub fn kind(&self) -> OverviewKind {
        match self {
            OverviewPayload::GroupStage(_) => OverviewKind::GroupStage,
            OverviewPayload::KnockoutStage(_) => OverviewKind::KnockoutStage,
            OverviewPayload::TeamMatches(_) => OverviewKind::TeamMatches,
        }
    }
}

/// The remote aggregation service. Each call takes one identifier and either
/// returns the whole aggregate or fails.
#[async_trait]
pub trait OverviewService: Send + Sync {
    async fn group_stage_overview(&self, tournament_id: &str) -> ApiResult<GroupStageOverview>;

    async fn knockout_stage_overview(&self, tournament_id: &str)
    -> ApiResult<KnockoutStageOverview>;

    async fn team_matches_overview(&self, team_id: &str) -> ApiResult<TeamMatchesOverview>;

    async fn fetch_overview(&self, kind: OverviewKind, identifier: &str) -> ApiResult<OverviewPayload> {
        let payload = match kind {
            OverviewKind::GroupStage => {
                OverviewPayload::GroupStage(self.group_stage_overview(identifier).await?)
            }
            OverviewKind::KnockoutStage => {
                OverviewPayload::KnockoutStage(self.knockout_stage_overview(identifier).await?)
            }
            OverviewKind::TeamMatches => {
                OverviewPayload::TeamMatches(self.team_matches_overview(identifier).await?)
            }
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(home: Option<&str>, away: Option<&str>, winner: Option<&str>) -> MatchRecord {
        MatchRecord {
            home_team_id: home.map(String::from),
            away_team_id: away.map(String::from),
            winner_team_id: winner.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn winner_flags_follow_winner_id() {
        let m = record(Some("ARG"), Some("FRA"), Some("ARG"));
        assert!(m.is_home_winner());
        assert!(!m.is_away_winner());

        let m = record(Some("ARG"), Some("FRA"), Some("FRA"));
        assert!(!m.is_home_winner());
        assert!(m.is_away_winner());
    }

    #[test]
    fn no_winner_means_neither_side_wins() {
        let m = record(None, None, None);
        assert!(!m.is_home_winner());
        assert!(!m.is_away_winner());

        let m = record(Some("ARG"), Some("FRA"), None);
        assert!(!m.is_home_winner());
        assert!(!m.is_away_winner());
    }

    #[test]
    fn formatted_date_accepts_date_and_datetime() {
        let mut m = MatchRecord { match_date: Some("2022-12-18".into()), ..Default::default() };
        assert_eq!(m.formatted_date(), "Dec 18, 2022");

        m.match_date = Some("2022-12-18T15:00:00Z".into());
        assert_eq!(m.formatted_date(), "Dec 18, 2022");

        m.match_date = Some("2022-06-05".into());
        assert_eq!(m.formatted_date(), "Jun 5, 2022");
    }

    #[test]
    fn formatted_date_is_empty_when_missing_or_garbage() {
        let mut m = MatchRecord::default();
        assert_eq!(m.formatted_date(), "");
        m.match_date = Some("next tuesday".into());
        assert_eq!(m.formatted_date(), "");
    }

    #[test]
    fn text_weight_is_bold_only_for_winner() {
        assert_eq!(TextWeight::for_winner(true), TextWeight::Bold);
        assert_eq!(TextWeight::for_winner(false), TextWeight::Regular);
    }

    #[test]
    fn match_record_reads_camel_case_and_tolerates_missing_fields() {
        let m: MatchRecord = serde_json::from_str(
            r#"{"homeTeamId":"a1","homeTeamName":"Argentina","homeTeamScore":3,"winnerTeamId":"a1"}"#,
        )
        .unwrap();
        assert_eq!(m.home_team_name, "Argentina");
        assert_eq!(m.home_team_score, Some(3));
        assert_eq!(m.away_team_score, None);
        assert!(m.is_home_winner());
    }

    #[test]
    fn overview_maps_keep_service_key_order() {
        let raw = r#"{"Round of 16":[],"Quarter-finals":[],"Final":[],"Semi-finals":[]}"#;
        let overview: KnockoutStageOverview = serde_json::from_str(raw).unwrap();
        let keys: Vec<&str> = overview.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Round of 16", "Quarter-finals", "Final", "Semi-finals"]);
    }

    #[test]
    fn kind_config_table() {
        assert_eq!(OverviewKind::TeamMatches.config().param, "teamId");
        assert_eq!(OverviewKind::TeamMatches.config().depth, 2);
        assert_eq!(OverviewKind::GroupStage.config().endpoint, "group-stage-overview");
        assert_eq!(OverviewKind::parse("ko"), Some(OverviewKind::KnockoutStage));
        assert_eq!(OverviewKind::parse("bracket"), None);
    }
}
