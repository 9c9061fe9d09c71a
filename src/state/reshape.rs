use indexmap::IndexMap;
use serde::Serialize;
use tourney_api::{
    GroupOverview, GroupStageOverview, KnockoutStageOverview, MatchRecord, TeamMatchesOverview,
};

/// One bucket of a grouped view: a group, stage or tournament name and what
/// belongs under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyed<T> {
    pub key: String,
    pub items: T,
}

pub type StageMatches = Vec<Keyed<Vec<MatchRecord>>>;
pub type GroupStageView = Vec<Keyed<GroupOverview>>;
pub type KnockoutStageView = StageMatches;
pub type TeamMatchesView = Vec<Keyed<StageMatches>>;

/// Turn a keyed mapping into an ordered list, keeping the mapping's own order.
pub fn keyed<T>(map: IndexMap<String, T>) -> Vec<Keyed<T>> {
    map.into_iter().map(|(key, items)| Keyed { key, items }).collect()
}

pub fn group_stage(raw: GroupStageOverview) -> GroupStageView {
    keyed(raw)
}

pub fn knockout_stage(raw: KnockoutStageOverview) -> KnockoutStageView {
    keyed(raw)
}

pub fn team_matches(raw: TeamMatchesOverview) -> TeamMatchesView {
    keyed(raw)
        .into_iter()
        .map(|tournament| Keyed { key: tournament.key, items: keyed(tournament.items) })
        .collect()
}

/// Bucket a flat match list by stage. Buckets come in order of first
/// appearance; a match without a stage lands in the "" bucket.
pub fn group_by_stage(matches: &[MatchRecord]) -> StageMatches {
    let mut buckets: Vec<Keyed<Vec<MatchRecord>>> = Vec::new();
    for m in matches {
        let stage = m.stage.as_deref().unwrap_or_default();
        match buckets.iter_mut().find(|b| b.key == stage) {
            Some(bucket) => bucket.items.push(m.clone()),
            None => buckets.push(Keyed { key: stage.to_owned(), items: vec![m.clone()] }),
        }
    }
    buckets
}
