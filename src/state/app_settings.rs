use crate::state::selector::TournamentOption;
use log::LevelFilter;
use tourney_api::client::DEFAULT_BASE_URL;

pub const DEFAULT_FLAGS_URL: &str = "http://127.0.0.1:8080/resource/TeamFlags";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub api_token: Option<String>,
    pub flags_url: String,
    pub tournaments: Vec<TournamentOption>,
    /// Loaded as soon as the app starts.
    pub initial_tournament: Option<String>,
    pub initial_team: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            flags_url: DEFAULT_FLAGS_URL.to_string(),
            tournaments: Vec::new(),
            initial_tournament: None,
            initial_team: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            full_screen: false,
            log_level: get("TOURNEY_LOG").and_then(|v| v.parse::<LevelFilter>().ok()),
            api_url: get("TOURNEY_API_URL").unwrap_or(defaults.api_url),
            api_token: get("TOURNEY_API_TOKEN"),
            flags_url: get("TOURNEY_FLAGS_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.flags_url),
            tournaments: get("TOURNEY_TOURNAMENTS")
                .map(|v| parse_tournament_list(&v))
                .unwrap_or_default(),
            initial_tournament: get("TOURNEY_TOURNAMENT"),
            initial_team: get("TOURNEY_TEAM"),
        }
    }
}

/// Parse `id=Name,id2=Name2`. An entry without `=` uses its id as the name.
pub fn parse_tournament_list(raw: &str) -> Vec<TournamentOption> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let (id, name) = match entry.split_once('=') {
                Some((id, name)) => (id.trim(), name.trim()),
                None => (entry, entry),
            };
            if id.is_empty() {
                return None;
            }
            let name = if name.is_empty() { id } else { name };
            Some(TournamentOption { id: id.to_string(), name: name.to_string() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> AppSettings {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings_from(&[]);
        assert_eq!(s.api_url, DEFAULT_BASE_URL);
        assert_eq!(s.flags_url, DEFAULT_FLAGS_URL);
        assert!(s.tournaments.is_empty());
        assert!(s.initial_tournament.is_none());
        assert!(s.log_level.is_none());
    }

    #[test]
    fn reads_environment() {
        let s = settings_from(&[
            ("TOURNEY_API_URL", "https://svc.example.org/api"),
            ("TOURNEY_API_TOKEN", "abc"),
            ("TOURNEY_FLAGS_URL", "https://cdn.example.org/TeamFlags/"),
            ("TOURNEY_TOURNAMENT", "a01"),
            ("TOURNEY_TEAM", "  "),
            ("TOURNEY_LOG", "debug"),
        ]);
        assert_eq!(s.api_url, "https://svc.example.org/api");
        assert_eq!(s.api_token.as_deref(), Some("abc"));
        assert_eq!(s.flags_url, "https://cdn.example.org/TeamFlags");
        assert_eq!(s.initial_tournament.as_deref(), Some("a01"));
        assert!(s.initial_team.is_none());
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn tournament_list_parsing() {
        let list = parse_tournament_list("a01=World Cup 2022, a02 = Euro 2024 ,,a03,=nameless,a04=");
        let pairs: Vec<(&str, &str)> =
            list.iter().map(|o| (o.id.as_str(), o.name.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("a01", "World Cup 2022"),
                ("a02", "Euro 2024"),
                ("a03", "a03"),
                ("a04", "a04"),
            ]
        );
    }
}
