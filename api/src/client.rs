use crate::{
    GroupStageOverview, KnockoutStageOverview, OverviewConfig, OverviewKind, OverviewService,
    TeamMatchesOverview,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Overview service client over plain HTTP + JSON.
#[derive(Debug, Clone)]
pub struct TournamentApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl Default for TournamentApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl TournamentApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("tourney-tui/0.1 (terminal results viewer)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{endpoint}?{param}={identifier}` for one of the overview kinds.
    pub fn overview_url(&self, config: &OverviewConfig, identifier: &str) -> ApiResult<Url> {
        let raw = format!("{}/{}", self.base_url, config.endpoint);
        Url::parse_with_params(&raw, &[(config.param, identifier)])
            .map_err(|e| ApiError::Other(format!("invalid service url {raw}: {e}")))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        kind: OverviewKind,
        identifier: &str,
    ) -> ApiResult<T> {
        let url = self.overview_url(kind.config(), identifier)?;
        let url_text = url.to_string();
        debug!("GET {url_text}");

        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url_text.clone()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("{} for {identifier}", kind.title())));
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url_text)),
            Err(e) => Err(ApiError::Api(e, url_text)),
        }
    }
}

#[async_trait]
impl OverviewService for TournamentApi {
    async fn group_stage_overview(&self, tournament_id: &str) -> ApiResult<GroupStageOverview> {
        self.get(OverviewKind::GroupStage, tournament_id).await
    }

    async fn knockout_stage_overview(
        &self,
        tournament_id: &str,
    ) -> ApiResult<KnockoutStageOverview> {
        self.get(OverviewKind::KnockoutStage, tournament_id).await
    }

    async fn team_matches_overview(&self, team_id: &str) -> ApiResult<TeamMatchesOverview> {
        self.get(OverviewKind::TeamMatches, team_id).await
    }
}
