mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;
mod view;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::selector::SelectionRelay;
use anyhow::{Context, bail};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, error};
use serde_json::json;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tourney_api::client::TournamentApi;
use tourney_api::{OverviewKind, OverviewService};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Dump { kind: OverviewKind, identifier: String },
    Run { tournament: Option<String>, team: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    let mut settings = AppSettings::load();
    match command {
        Command::Help => {
            println!("{}", usage_text());
            return Ok(());
        }
        Command::Version => {
            println!("tourney {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Dump { kind, identifier } => {
            tui_logger::init_logger(log::LevelFilter::Error)?;
            if let Err(e) = dump(settings, kind, identifier).await {
                eprintln!("{e:#}");
                std::process::exit(1);
            }
            return Ok(());
        }
        Command::Run { tournament, team } => {
            if tournament.is_some() {
                settings.initial_tournament = tournament;
            }
            if team.is_some() {
                settings.initial_team = team;
            }
        }
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Debug)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let api = TournamentApi::new(settings.api_url.clone()).with_token(settings.api_token.clone());
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(api, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    let relay = SelectionRelay::new(ui_event_tx.clone());

    // Load whatever was configured up front
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, relay, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Command> {
    let mut args = args.into_iter();
    let mut tournament = None;
    let mut team = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--tournament" => {
                tournament = Some(args.next().context("--tournament needs an id")?);
            }
            "--team" => {
                team = Some(args.next().context("--team needs an id")?);
            }
            "--dump" => {
                let name = args.next().context("--dump needs a kind")?;
                let kind = OverviewKind::parse(&name)
                    .with_context(|| format!("unknown overview kind: {name}"))?;
                let identifier = args.next().context("--dump needs an id")?;
                return Ok(Command::Dump { kind, identifier });
            }
            _ => bail!("Unknown argument: {arg}"),
        }
    }

    Ok(Command::Run { tournament, team })
}

fn usage_text() -> &'static str {
    "tourney - tournament results in the terminal

Usage:
  tourney [--tournament <id>] [--team <id>]
  tourney --dump <group|knockout|team> <id>
  tourney --help
  tourney --version

Environment:
  TOURNEY_API_URL       Base URL of the results API (default http://127.0.0.1:8080/api)
  TOURNEY_API_TOKEN     Bearer token sent with every request
  TOURNEY_FLAGS_URL     Base URL for team flag images
  TOURNEY_TOURNAMENTS   Selectable tournaments, e.g. a01=World Cup 2022,a02=Euro 2024
  TOURNEY_TOURNAMENT    Tournament loaded on startup
  TOURNEY_TEAM          Team loaded on startup
  TOURNEY_LOG           Log level (error, warn, info, debug, trace)"
}

/// Fetch one overview and print its bound view as JSON.
async fn dump(settings: AppSettings, kind: OverviewKind, identifier: String) -> anyhow::Result<()> {
    let api = TournamentApi::new(settings.api_url.clone()).with_token(settings.api_token.clone());
    let mut app = App::new(settings);
    let json = dump_json(&api, &mut app, kind, &identifier).await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Run one overview through the same component the TUI uses and bind it.
///
/// The result is `{ overview, identifier, groupingDepth, data }` where `data`
/// nests `groupingDepth` levels of `{ key, items }` buckets.
async fn dump_json<S: OverviewService>(
    service: &S,
    app: &mut App,
    kind: OverviewKind,
    identifier: &str,
) -> anyhow::Result<serde_json::Value> {
    let request = match kind {
        OverviewKind::GroupStage => app.state.group_stage.set_identifier(Some(identifier.to_owned())),
        OverviewKind::KnockoutStage => app.state.knockout.set_identifier(Some(identifier.to_owned())),
        OverviewKind::TeamMatches => app.state.team.set_identifier(Some(identifier.to_owned())),
    };
    debug!("dump request: {request:?}");

    let result = service.fetch_overview(kind, identifier).await.map_err(|e| e.to_string());
    app.on_overview_loaded(kind, identifier, result);

    let data = match kind {
        OverviewKind::GroupStage => {
            let component = &app.state.group_stage;
            match component.view() {
                Some(v) => serde_json::to_value(view::bind_group_stage(v, &app.flags))?,
                None => bail!("{}", component.state().error().unwrap_or("no data")),
            }
        }
        OverviewKind::KnockoutStage => {
            let component = &app.state.knockout;
            match component.view() {
                Some(v) => serde_json::to_value(view::bind_knockout_stage(v, &app.flags))?,
                None => bail!("{}", component.state().error().unwrap_or("no data")),
            }
        }
        OverviewKind::TeamMatches => {
            let component = &app.state.team;
            match component.view() {
                Some(v) => serde_json::to_value(view::bind_team_matches(v, &app.flags))?,
                None => bail!("{}", component.state().error().unwrap_or("no data")),
            }
        }
    };

    let config = kind.config();
    Ok(json!({
        "overview": config.title,
        "identifier": identifier,
        "groupingDepth": config.depth,
        "data": data,
    }))
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    relay: SelectionRelay,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &relay, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn send_all(network_requests: &mpsc::Sender<NetworkRequest>, requests: Vec<NetworkRequest>) {
    for request in requests {
        if let Err(e) = network_requests.send(request).await {
            error!("Failed to queue network request: {e}");
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    relay: &SelectionRelay,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let requests = app.lock().await.startup_requests();
            send_all(network_requests, requests).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, relay).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::TournamentChanged { tournament_id } => {
            let requests = app.lock().await.on_tournament_change(tournament_id);
            send_all(network_requests, requests).await;
            true
        }
        UiEvent::TeamChanged { team_id } => {
            let request = app.lock().await.on_team_change(team_id);
            send_all(network_requests, request.into_iter().collect()).await;
            true
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::OverviewLoaded { kind, identifier, result } => {
            let mut guard = app.lock().await;
            guard.on_overview_loaded(kind, &identifier, result);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Hide);
    let _ = execute!(stdout, terminal::EnterAlternateScreen);
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    if let Err(e) = terminal::enable_raw_mode() {
        error!("Failed to enable raw mode: {e}");
    }
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
