use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, warn};
use nfl_api::backend::{BracketBackend, Session};
use nfl_api::client::{ApiError, NflApi};
use nfl_api::PlayoffField;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

const SIGN_IN_HINT: &str =
    "Sign in required: set GRIDTUI_API_TOKEN (and GRIDTUI_USER) and restart.";

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns both API clients and the optional signed-in session. All network I/O
/// happens here; the UI loop only ever exchanges plain request/response
/// messages with this task.
pub struct NetworkWorker {
    stats: NflApi,
    backend: BracketBackend,
    session: Option<Session>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    /// Last requested (season, week), re-used by the periodic refresh.
    scoreboard_target: (u16, u8),
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
        session: Option<Session>,
        backend_url: Option<String>,
        season: u16,
        week: u8,
    ) -> Self {
        Self {
            stats: NflApi::new(),
            backend: BracketBackend::new(backend_url),
            session,
            requests,
            responses,
            scoreboard_target: (season, week),
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadStandings { season } => self.handle_load_standings(season).await,
                NetworkRequest::LoadScoreboard { season, week } => {
                    self.scoreboard_target = (season, week);
                    self.handle_load_scoreboard(season, week).await
                }
                NetworkRequest::RefreshScoreboard => {
                    let (season, week) = self.scoreboard_target;
                    self.handle_load_scoreboard(season, week).await
                }
                NetworkRequest::LoadGameDetail { event_id } => {
                    self.handle_load_game_detail(&event_id).await
                }
                NetworkRequest::LoadPlayoffField { season } => {
                    self.handle_load_playoff_field(season).await
                }
                NetworkRequest::SubmitBracket { name, season, bracket } => {
                    self.handle_submit_bracket(name, season, *bracket).await
                }
                NetworkRequest::LoadLeaderboard { season } => {
                    self.handle_load_leaderboard(season).await
                }
                NetworkRequest::LoadUserBrackets => self.handle_load_user_brackets().await,
                NetworkRequest::DeleteBracket { bracket_id } => {
                    self.handle_delete_bracket(bracket_id).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_standings(&self, season: u16) -> Result<NetworkResponse, ApiError> {
        debug!("loading standings for {season}");
        let teams = self.stats.fetch_standings(season).await?;
        Ok(NetworkResponse::StandingsLoaded { season, teams })
    }

    async fn handle_load_scoreboard(
        &self,
        season: u16,
        week: u8,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("loading scoreboard for {season} week {week}");
        let games = self.stats.fetch_scoreboard(season, week).await?;
        Ok(NetworkResponse::ScoreboardLoaded { week, games })
    }

    async fn handle_load_game_detail(&self, event_id: &str) -> Result<NetworkResponse, ApiError> {
        debug!("loading game detail for event {event_id}");
        let detail = self.stats.fetch_game_detail(event_id).await?;
        Ok(NetworkResponse::GameDetailLoaded { detail })
    }

    /// The backend is the source of truth for the playoff field; when it is
    /// unreachable the field is derived from ESPN standings instead.
    async fn handle_load_playoff_field(&self, season: u16) -> Result<NetworkResponse, ApiError> {
        debug!("loading playoff field for {season}");
        match self.backend.playoff_teams(season).await {
            Ok(field) => Ok(NetworkResponse::PlayoffFieldLoaded { field }),
            Err(backend_err) => {
                warn!("backend playoff field unavailable, falling back to standings: {backend_err}");
                let teams = self.stats.fetch_standings(season).await?;
                Ok(NetworkResponse::PlayoffFieldLoaded {
                    field: PlayoffField::from_standings(&teams),
                })
            }
        }
    }

    async fn handle_submit_bracket(
        &self,
        name: String,
        season: u16,
        bracket: nfl_api::bracket::Bracket,
    ) -> Result<NetworkResponse, ApiError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(NetworkResponse::Error { message: SIGN_IN_HINT.into() });
        };
        debug!("submitting bracket {name:?} for {season}");
        let outcome = self
            .backend
            .submit_bracket(session, &name, season, &bracket)
            .await?;
        Ok(NetworkResponse::BracketSubmitted { name, outcome })
    }

    async fn handle_load_leaderboard(&self, season: u16) -> Result<NetworkResponse, ApiError> {
        debug!("loading leaderboard for {season}");
        let entries = self.backend.leaderboard(season).await?;
        Ok(NetworkResponse::LeaderboardLoaded { entries })
    }

    async fn handle_load_user_brackets(&self) -> Result<NetworkResponse, ApiError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(NetworkResponse::Error { message: SIGN_IN_HINT.into() });
        };
        debug!("loading user brackets");
        let brackets = self.backend.user_brackets(session).await?;
        Ok(NetworkResponse::UserBracketsLoaded { brackets })
    }

    async fn handle_delete_bracket(&self, bracket_id: i64) -> Result<NetworkResponse, ApiError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(NetworkResponse::Error { message: SIGN_IN_HINT.into() });
        };
        debug!("deleting bracket {bracket_id}");
        self.backend.delete_bracket(session, bracket_id).await?;
        Ok(NetworkResponse::BracketDeleted { bracket_id })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
