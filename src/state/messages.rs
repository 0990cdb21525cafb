use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nfl_api::backend::SubmitOutcome;
use nfl_api::bracket::Bracket;
use nfl_api::{GameDetail, LeaderboardEntry, PlayoffField, SavedBracket, ScoreGame, Team};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadStandings { season: u16 },
    LoadScoreboard { season: u16, week: u8 },
    /// Periodic refresh; re-uses the last requested season/week.
    RefreshScoreboard,
    LoadGameDetail { event_id: String },
    LoadPlayoffField { season: u16 },
    SubmitBracket { name: String, season: u16, bracket: Box<Bracket> },
    LoadLeaderboard { season: u16 },
    LoadUserBrackets,
    DeleteBracket { bracket_id: i64 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    StandingsLoaded { season: u16, teams: Vec<Team> },
    ScoreboardLoaded { week: u8, games: Vec<ScoreGame> },
    GameDetailLoaded { detail: GameDetail },
    PlayoffFieldLoaded { field: PlayoffField },
    BracketSubmitted { name: String, outcome: SubmitOutcome },
    LeaderboardLoaded { entries: Vec<LeaderboardEntry> },
    UserBracketsLoaded { brackets: Vec<SavedBracket> },
    BracketDeleted { bracket_id: i64 },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
}
