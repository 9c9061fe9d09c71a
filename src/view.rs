//! Render-time bindings: derived display fields computed from the stored view
//! models right before drawing or printing. Nothing here is kept in state.

use crate::state::reshape::{GroupStageView, Keyed, KnockoutStageView, StageMatches, TeamMatchesView, group_by_stage};
use serde::Serialize;
use tourney_api::flags::FlagAssets;
use tourney_api::{MatchRecord, TeamStats, TextWeight};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLine {
    pub team_id: Option<String>,
    pub name: String,
    pub code: String,
    pub flag_code: String,
    pub flag_url: String,
    pub score: Option<u16>,
    pub is_winner: bool,
    pub weight: TextWeight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: String,
    pub date: String,
    pub home: TeamLine,
    pub away: TeamLine,
}

impl MatchView {
    pub fn bind(record: &MatchRecord, flags: &FlagAssets) -> Self {
        let home_wins = record.is_home_winner();
        let away_wins = record.is_away_winner();
        Self {
            id: record.id.clone(),
            date: record.formatted_date(),
            home: TeamLine {
                team_id: record.home_team_id.clone(),
                name: record.home_team_name.clone(),
                code: record.home_team_code.clone(),
                flag_code: record.home_team_flag_code.clone(),
                flag_url: flags.url(&record.home_team_flag_code),
                score: record.home_team_score,
                is_winner: home_wins,
                weight: TextWeight::for_winner(home_wins),
            },
            away: TeamLine {
                team_id: record.away_team_id.clone(),
                name: record.away_team_name.clone(),
                code: record.away_team_code.clone(),
                flag_code: record.away_team_flag_code.clone(),
                flag_url: flags.url(&record.away_team_flag_code),
                score: record.away_team_score,
                is_winner: away_wins,
                weight: TextWeight::for_winner(away_wins),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    #[serde(flatten)]
    pub stats: TeamStats,
    pub flag_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub standings: Vec<StandingRow>,
    pub matches_by_stage: Vec<Keyed<Vec<MatchView>>>,
}

pub fn bind_standings(stats: &[TeamStats], flags: &FlagAssets) -> Vec<StandingRow> {
    stats
        .iter()
        .map(|s| StandingRow { stats: s.clone(), flag_url: flags.url(&s.team_flag_code) })
        .collect()
}

pub fn bind_stages(stages: &StageMatches, flags: &FlagAssets) -> Vec<Keyed<Vec<MatchView>>> {
    stages
        .iter()
        .map(|stage| Keyed {
            key: stage.key.clone(),
            items: stage.items.iter().map(|m| MatchView::bind(m, flags)).collect(),
        })
        .collect()
}

pub fn bind_group_stage(view: &GroupStageView, flags: &FlagAssets) -> Vec<Keyed<GroupView>> {
    view.iter()
        .map(|group| Keyed {
            key: group.key.clone(),
            items: GroupView {
                standings: bind_standings(&group.items.teams_stats, flags),
                matches_by_stage: bind_stages(&group_by_stage(&group.items.matches), flags),
            },
        })
        .collect()
}

pub fn bind_knockout_stage(view: &KnockoutStageView, flags: &FlagAssets) -> Vec<Keyed<Vec<MatchView>>> {
    bind_stages(view, flags)
}

pub fn bind_team_matches(
    view: &TeamMatchesView,
    flags: &FlagAssets,
) -> Vec<Keyed<Vec<Keyed<Vec<MatchView>>>>> {
    view.iter()
        .map(|tournament| Keyed {
            key: tournament.key.clone(),
            items: bind_stages(&tournament.items, flags),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::reshape;
    use indexmap::IndexMap;
    use tourney_api::GroupOverview;

    fn flags() -> FlagAssets {
        FlagAssets::new("https://cdn.example.org/TeamFlags")
    }

    fn final_match() -> MatchRecord {
        MatchRecord {
            id: "m64".into(),
            stage: Some("Final".into()),
            match_date: Some("2022-12-18T15:00:00Z".into()),
            home_team_id: Some("a1".into()),
            home_team_name: "Argentina".into(),
            home_team_flag_code: "ARG".into(),
            home_team_score: Some(3),
            away_team_id: Some("a2".into()),
            away_team_name: "France".into(),
            away_team_flag_code: "FRA".into(),
            away_team_score: Some(3),
            winner_team_id: Some("a1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn match_view_derives_winner_weight_date_and_flags() {
        let view = MatchView::bind(&final_match(), &flags());
        assert_eq!(view.date, "Dec 18, 2022");
        assert!(view.home.is_winner);
        assert_eq!(view.home.weight, TextWeight::Bold);
        assert!(!view.away.is_winner);
        assert_eq!(view.away.weight, TextWeight::Regular);
        assert_eq!(view.away.flag_url, "https://cdn.example.org/TeamFlags/flags/FRA.png");
    }

    #[test]
    fn group_view_buckets_matches_and_attaches_flag_urls() {
        let mut raw = IndexMap::new();
        raw.insert(
            "Group C".to_string(),
            GroupOverview {
                teams_stats: vec![TeamStats { team_flag_code: "ARG".into(), ..Default::default() }],
                matches: vec![
                    MatchRecord { id: "1".into(), stage: Some("Matchday 1".into()), ..Default::default() },
                    MatchRecord { id: "2".into(), stage: Some("Matchday 2".into()), ..Default::default() },
                    MatchRecord { id: "3".into(), stage: Some("Matchday 1".into()), ..Default::default() },
                ],
            },
        );
        let bound = bind_group_stage(&reshape::group_stage(raw), &flags());

        assert_eq!(bound.len(), 1);
        let group = &bound[0].items;
        assert_eq!(group.standings[0].flag_url, "https://cdn.example.org/TeamFlags/flags/ARG.png");
        let stages: Vec<(&str, usize)> =
            group.matches_by_stage.iter().map(|s| (s.key.as_str(), s.items.len())).collect();
        assert_eq!(stages, vec![("Matchday 1", 2), ("Matchday 2", 1)]);
    }

    #[test]
    fn standing_row_serializes_flat() {
        let row = StandingRow {
            stats: TeamStats { team_name: "Morocco".into(), points: 7, ..Default::default() },
            flag_url: "x/flags/MAR.png".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["teamName"], "Morocco");
        assert_eq!(json["points"], 7);
        assert_eq!(json["flagUrl"], "x/flags/MAR.png");
    }
}
