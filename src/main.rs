mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use chrono::Utc;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use nfl_api::backend::Session;
use nfl_api::client::{current_season, current_week};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let now = Utc::now();
    let season = std::env::var("GRIDTUI_SEASON")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or_else(|| current_season(now));
    let week = current_week(now);
    let session = session_from_env();
    let signed_in = session.as_ref().map(|s| s.display_name.clone());
    let backend_url = std::env::var("GRIDTUI_BACKEND_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());

    let app = Arc::new(Mutex::new(App::new(season, week, signed_in)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread — owns both API clients and the signed-in session
    let network_worker = NetworkWorker::new(
        network_req_rx,
        network_resp_tx,
        session,
        backend_url,
        season,
        week,
    );
    let network_task = tokio::spawn(network_worker.run());

    // Periodic score refresh thread (every 30s)
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Animation tick thread — 80ms ≈ 12.5 FPS
    let anim_tx = ui_event_tx.clone();
    let animation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(80));
        loop {
            interval.tick().await;
            if anim_tx.send(UiEvent::AnimationTick).await.is_err() {
                break;
            }
        }
    });

    // Trigger the initial loads on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();
    animation_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("gridtui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "gridtui - NFL standings, live scores, and playoff bracket terminal UI

Usage:
  gridtui
  gridtui --help
  gridtui --version

Environment:
  GRIDTUI_SEASON        Season year the bracket and leaderboard are pinned to
  GRIDTUI_BACKEND_URL   Bracket backend base URL (defaults to the hosted one)
  GRIDTUI_API_TOKEN     Bearer token from the identity provider; enables
                        bracket submission and the My Brackets tab
  GRIDTUI_USER          Display name shown on submissions
  GRIDTUI_LOG           In-app log pane level (error, warn, info, debug)"
}

fn session_from_env() -> Option<Session> {
    let token = std::env::var("GRIDTUI_API_TOKEN")
        .ok()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())?;
    let display_name = std::env::var("GRIDTUI_USER")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .or_else(|| std::env::var("USER").ok().filter(|u| !u.trim().is_empty()))
        .unwrap_or_else(|| "fan".to_owned());
    Some(Session { display_name, token })
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
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

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let (standings_season, season, week) = {
                let guard = app.lock().await;
                (
                    guard.state.standings.season,
                    guard.state.season,
                    guard.state.scoreboard.week,
                )
            };
            let _ = network_requests
                .send(NetworkRequest::LoadStandings { season: standings_season })
                .await;
            let _ = network_requests
                .send(NetworkRequest::LoadScoreboard { season, week })
                .await;
            let _ = network_requests
                .send(NetworkRequest::LoadPlayoffField { season })
                .await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::AnimationTick => {
            let mut guard = app.lock().await;
            guard.advance_animation(crate::components::banner::FRAME_COUNT);
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
        NetworkResponse::StandingsLoaded { season, teams } => {
            app.lock().await.on_standings_loaded(season, teams);
        }
        NetworkResponse::ScoreboardLoaded { week, games } => {
            app.lock().await.on_scoreboard_loaded(week, games);
        }
        NetworkResponse::GameDetailLoaded { detail } => {
            app.lock().await.on_game_detail_loaded(detail);
        }
        NetworkResponse::PlayoffFieldLoaded { field } => {
            app.lock().await.on_playoff_field_loaded(field);
        }
        NetworkResponse::BracketSubmitted { name, outcome } => {
            app.lock().await.on_bracket_submitted(name, outcome);
        }
        NetworkResponse::LeaderboardLoaded { entries } => {
            app.lock().await.on_leaderboard_loaded(entries);
        }
        NetworkResponse::UserBracketsLoaded { brackets } => {
            app.lock().await.on_user_brackets_loaded(brackets);
        }
        NetworkResponse::BracketDeleted { bracket_id } => {
            app.lock().await.on_bracket_deleted(bracket_id);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            app.lock().await.on_error(message);
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
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
