use crate::state::messages::NetworkRequest;
use log::debug;
use tourney_api::OverviewKind;

/// Lifecycle of one remote read. Exactly one of data or error is held once a
/// fetch settles.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    /// No identifier yet, nothing requested.
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn has_error(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Fetch-bind-render component: holds an identifier, asks for one remote read
/// whenever the identifier is set, and keeps the reshaped result or the error.
///
/// `R` is the aggregate the service returns, `V` the view model built from it.
/// Responses are applied in the order they arrive, so a slow response for an
/// older identifier overwrites a newer one (last write wins).
#[derive(Debug)]
pub struct FetchComponent<R, V> {
    kind: OverviewKind,
    identifier: Option<String>,
    state: FetchState<V>,
    reshape: fn(R) -> V,
}

impl<R, V> FetchComponent<R, V> {
    pub fn new(kind: OverviewKind, reshape: fn(R) -> V) -> Self {
        Self { kind, identifier: None, state: FetchState::Idle, reshape }
    }

    pub fn kind(&self) -> OverviewKind {
        self.kind
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn state(&self) -> &FetchState<V> {
        &self.state
    }

    pub fn ready(&self) -> bool {
        self.state.ready()
    }

    pub fn has_error(&self) -> bool {
        self.state.has_error()
    }

    pub fn view(&self) -> Option<&V> {
        self.state.data()
    }

    /// Store a new identifier. Returns the single request to issue for it, or
    /// nothing when no identifier was supplied.
    pub fn set_identifier(&mut self, identifier: Option<String>) -> Option<NetworkRequest> {
        let identifier = identifier?;
        self.identifier = Some(identifier.clone());
        self.state = FetchState::Loading;
        Some(NetworkRequest::LoadOverview { kind: self.kind, identifier })
    }

    pub fn on_settled(&mut self, result: Result<R, String>) {
        self.state = match result {
            Ok(raw) => FetchState::Ready((self.reshape)(raw)),
            Err(message) => FetchState::Failed(message),
        };
    }

    /// Apply a response that was requested for `identifier`.
    pub fn on_response(&mut self, identifier: &str, result: Result<R, String>) {
        if self.identifier.as_deref() != Some(identifier) {
            debug!(
                "{}: applying response for {identifier} while showing {:?}",
                self.kind.title(),
                self.identifier
            );
        }
        self.on_settled(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_component() -> FetchComponent<Vec<u32>, usize> {
        FetchComponent::new(OverviewKind::KnockoutStage, |raw: Vec<u32>| raw.len())
    }

    #[test]
    fn starts_idle_without_flags() {
        let c = counting_component();
        assert_eq!(c.state(), &FetchState::Idle);
        assert!(!c.ready());
        assert!(!c.has_error());
        assert!(c.identifier().is_none());
    }

    #[test]
    fn missing_identifier_issues_no_request() {
        let mut c = counting_component();
        assert!(c.set_identifier(None).is_none());
        assert_eq!(c.state(), &FetchState::Idle);
    }

    #[test]
    fn setting_identifier_once_issues_one_request_for_it() {
        let mut c = counting_component();
        let request = c.set_identifier(Some("T1".into()));
        assert!(matches!(
            request,
            Some(NetworkRequest::LoadOverview { kind: OverviewKind::KnockoutStage, ref identifier })
                if identifier == "T1"
        ));
        assert_eq!(c.identifier(), Some("T1"));
        assert!(c.state().is_loading());
    }

    #[test]
    fn success_sets_ready_and_reshapes() {
        let mut c = counting_component();
        c.set_identifier(Some("T1".into()));
        c.on_settled(Ok(vec![4, 5, 6]));
        assert!(c.ready());
        assert!(!c.has_error());
        assert_eq!(c.view(), Some(&3));
    }

    #[test]
    fn failure_sets_error_and_clears_previous_result() {
        let mut c = counting_component();
        c.set_identifier(Some("T1".into()));
        c.on_settled(Ok(vec![1]));
        assert!(c.ready());

        c.set_identifier(Some("T1".into()));
        c.on_settled(Err("service unavailable".into()));
        assert!(!c.ready());
        assert!(c.has_error());
        assert!(c.view().is_none());
        assert_eq!(c.state().error(), Some("service unavailable"));
    }

    #[test]
    fn success_after_failure_clears_error() {
        let mut c = counting_component();
        c.on_settled(Err("boom".into()));
        c.on_settled(Ok(vec![]));
        assert!(c.ready());
        assert!(!c.has_error());
    }

    #[test]
    fn slower_older_response_wins() {
        let mut c = counting_component();
        c.set_identifier(Some("T1".into()));
        c.set_identifier(Some("T2".into()));

        c.on_response("T2", Ok(vec![1, 2]));
        c.on_response("T1", Ok(vec![1, 2, 3, 4, 5]));

        assert_eq!(c.identifier(), Some("T2"));
        assert_eq!(c.view(), Some(&5));
    }
}
