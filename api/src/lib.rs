pub mod backend;
pub mod bracket;
pub mod client;
pub mod espn;
pub mod sportsync;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the ESPN / backend wire formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    #[default]
    #[serde(rename = "AFC")]
    Afc,
    #[serde(rename = "NFC")]
    Nfc,
}

impl Conference {
    pub const BOTH: [Conference; 2] = [Conference::Afc, Conference::Nfc];

    pub fn abbrev(&self) -> &'static str {
        match self {
            Conference::Afc => "AFC",
            Conference::Nfc => "NFC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Conference::Afc => "American Football Conference",
            Conference::Nfc => "National Football Conference",
        }
    }

    pub fn other(&self) -> Conference {
        match self {
            Conference::Afc => Conference::Nfc,
            Conference::Nfc => Conference::Afc,
        }
    }
}

/// One franchise's standings snapshot for a season. Fetched once per session;
/// the bracket engine only ever clones these, never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,     // "Kansas City Chiefs"
    pub location: String, // "Kansas City"
    #[serde(rename = "abbreviation")]
    pub abbrev: String, // "KC"
    pub logo: Option<String>,
    pub conference: Conference,
    pub division: Option<String>, // "AFC West"
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub win_percent: f64,
    /// Rank within the conference, 1 = best.
    pub playoff_seed: u8,
    pub point_differential: i32,
}

impl Team {
    pub fn record(&self) -> String {
        if self.ties > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }

    pub fn differential_label(&self) -> String {
        if self.point_differential > 0 {
            format!("+{}", self.point_differential)
        } else {
            self.point_differential.to_string()
        }
    }
}

/// The playoff-qualified field: top 7 per conference, sorted by seed.
#[derive(Debug, Clone, Default)]
pub struct PlayoffField {
    pub afc: Vec<Team>,
    pub nfc: Vec<Team>,
}

impl PlayoffField {
    pub fn teams(&self, conference: Conference) -> &[Team] {
        match conference {
            Conference::Afc => &self.afc,
            Conference::Nfc => &self.nfc,
        }
    }

    /// Derive the field from a full standings list (top 7 per conference by
    /// playoff seed) — the fallback path when the backend is unreachable.
    pub fn from_standings(teams: &[Team]) -> Self {
        let mut field = PlayoffField::default();
        for conference in Conference::BOTH {
            let mut qualified: Vec<Team> = teams
                .iter()
                .filter(|t| t.conference == conference)
                .cloned()
                .collect();
            qualified.sort_by_key(|t| t.playoff_seed);
            qualified.truncate(bracket::FIELD_SIZE);
            match conference {
                Conference::Afc => field.afc = qualified,
                Conference::Nfc => field.nfc = qualified,
            }
        }
        field
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
    Postponed,
}

/// One scoreboard game for a regular-season week.
#[derive(Debug, Clone, Default)]
pub struct ScoreGame {
    pub id: String,
    pub status: GameStatus,
    /// ESPN's short status text, e.g. "Sun 1:00 PM" or "Final/OT".
    pub status_text: String,
    pub period: Option<u8>,
    pub clock: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub home: ScoreSide,
    pub away: ScoreSide,
}

impl ScoreGame {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::InProgress
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSide {
    pub name: String,
    pub abbrev: String,
    pub logo: Option<String>,
    pub score: Option<u16>,
    pub winner: Option<bool>,
}

/// Detailed game data (scoring plays, team stat lines) fetched on demand.
#[derive(Debug, Clone, Default)]
pub struct GameDetail {
    pub event_id: String,
    pub scoring_plays: Vec<ScoringPlay>,
    pub home: TeamStats,
    pub away: TeamStats,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringPlay {
    pub period: u8,
    pub clock: String,
    pub description: String,
    pub team_abbrev: Option<String>,
    pub away_score: u16,
    pub home_score: u16,
}

#[derive(Debug, Clone, Default)]
pub struct TeamStats {
    pub name: String,
    pub abbrev: String,
    pub lines: Vec<StatLine>,
}

#[derive(Debug, Clone, Default)]
pub struct StatLine {
    pub label: String, // "Total Yards"
    pub value: String, // "389"
}

/// One leaderboard row, display-only.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardEntry {
    pub display_name: String,
    pub bracket_name: String,
    pub total_score: i64,
    pub correct_picks: u32,
    pub total_picks: u32,
    pub created_at: Option<String>,
}

/// A bracket previously submitted by the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct SavedBracket {
    pub id: i64,
    pub bracket_name: String,
    pub season_year: Option<u16>,
    pub created_at: Option<String>,
    pub total_score: Option<i64>,
    pub predictions: Option<bracket::Bracket>,
}

impl SavedBracket {
    pub fn champion(&self) -> Option<&Team> {
        self.predictions.as_ref().and_then(|b| b.champion())
    }
}
