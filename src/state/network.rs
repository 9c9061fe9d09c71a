use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tourney_api::OverviewService;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Performs remote reads. Every request runs on its own task, so reads
/// settle in completion order rather than request order.
pub struct NetworkWorker<S> {
    service: Arc<S>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
    /// Set while a spinner ticker task is alive.
    spinning: Arc<AtomicBool>,
}

impl<S: OverviewService + 'static> NetworkWorker<S> {
    pub fn new(
        service: S,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
            spinning: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            match request {
                NetworkRequest::LoadOverview { kind, identifier } => {
                    start_loading_animation(&self.in_flight, &self.spinning, &self.responses).await;

                    let service = self.service.clone();
                    let responses = self.responses.clone();
                    let in_flight = self.in_flight.clone();
                    tokio::spawn(async move {
                        debug!("loading {} for {identifier}", kind.title());
                        let result = service
                            .fetch_overview(kind, &identifier)
                            .await
                            .map_err(|err| err.to_string());
                        match &result {
                            Ok(_) => debug!("{} for {identifier} loaded", kind.title()),
                            Err(message) => {
                                error!("{} for {identifier} failed: {message}", kind.title())
                            }
                        }

                        stop_loading_animation(&in_flight, &responses, result.is_ok()).await;

                        let response = NetworkResponse::OverviewLoaded { kind, identifier, result };
                        if let Err(e) = responses.send(response).await {
                            error!("Failed to send network response: {e}");
                        }
                    });
                }
            }
        }
    }
}

/// Returns true when a new ticker task was spawned.
async fn start_loading_animation(
    in_flight: &Arc<AtomicUsize>,
    spinning: &Arc<AtomicBool>,
    responses: &mpsc::Sender<NetworkResponse>,
) -> bool {
    // Only the first concurrent request starts a spinner.
    if in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
        return false;
    }

    let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state })
        .await;

    // A ticker from the previous burst that has not noticed the idle gap yet
    // keeps running for this one.
    if spinning.swap(true, Ordering::SeqCst) {
        return false;
    }

    let responses = responses.clone();
    let in_flight = in_flight.clone();
    let spinning = spinning.clone();

    tokio::spawn(async move {
        let mut spinner_index = 1;
        let mut interval = tokio::time::interval(Duration::from_millis(33));
        loop {
            interval.tick().await;
            if in_flight.load(Ordering::SeqCst) == 0 {
                spinning.store(false, Ordering::SeqCst);
                // A request may have started between the load and the store.
                if in_flight.load(Ordering::SeqCst) == 0 || spinning.swap(true, Ordering::SeqCst) {
                    break;
                }
                continue;
            }
            loading_state.spinner_char = SPINNER_CHARS[spinner_index];
            spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
            let _ = responses
                .send(NetworkResponse::LoadingStateChanged { loading_state })
                .await;
        }
    });
    true
}

async fn stop_loading_animation(
    in_flight: &Arc<AtomicUsize>,
    responses: &mpsc::Sender<NetworkResponse>,
    is_ok: bool,
) {
    if in_flight.fetch_sub(1, Ordering::SeqCst) > 1 {
        return;
    }
    tokio::time::sleep(Duration::from_millis(15)).await;

    let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged {
            loading_state: LoadingState { is_loading: false, spinner_char },
        })
        .await;
}
