/// Wire types for the SportSync bracket backend.
/// Endpoints: /api/teams/playoffs/{year}, /api/brackets, /api/user/brackets,
/// /api/my-brackets/{id}, /api/leaderboard/{year}, /api/user/display-name.
use crate::bracket::{Bracket, ConferenceBracket, GameSlot};
use crate::Team;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct PlayoffTeamsResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub afc_teams: Vec<BackendTeam>,
    #[serde(default)]
    pub nfc_teams: Vec<BackendTeam>,
}

/// Backend team rows: ids arrive as numbers, the point differential as a
/// signed display string ("+42"). Converted strictly in backend.rs.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BackendTeam {
    pub id: Option<Value>, // number or string depending on the route
    pub name: Option<String>,
    pub location: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub wins: Option<u16>,
    pub losses: Option<u16>,
    pub ties: Option<u16>,
    pub win_percent: Option<f64>,
    pub playoff_seed: Option<u8>,
    pub differential: Option<Value>, // "+42", "-3", or a bare number
}

#[derive(Debug, Serialize)]
pub struct SubmitBracketRequest {
    pub bracket_name: String,
    pub predictions: PredictionsWire,
    pub season_year: u16,
}

#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UserBracketsResponse {
    #[serde(default)]
    pub brackets: Vec<SavedBracketWire>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SavedBracketWire {
    pub id: i64,
    pub bracket_name: String,
    pub season_year: Option<u16>,
    pub created_at: Option<String>,
    pub total_score: Option<i64>,
    /// Arrives either as a JSON object or as a string-encoded JSON document.
    pub predictions: Option<Value>,
}

impl SavedBracketWire {
    pub fn parse_predictions(&self) -> Option<PredictionsWire> {
        match self.predictions.as_ref()? {
            Value::String(encoded) => serde_json::from_str(encoded).ok(),
            object => serde_json::from_value(object.clone()).ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardRowWire>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeaderboardRowWire {
    pub display_name: Option<String>,
    pub bracket_name: Option<String>,
    pub total_score: Option<i64>,
    pub correct_picks: Option<u32>,
    pub total_picks: Option<u32>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateDisplayNameRequest {
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Bracket predictions mirror
// ---------------------------------------------------------------------------

/// The nested JSON document the backend stores: per-conference rounds as-is,
/// but the title game keyed by conference ("superBowl": {afc, nfc, winner}).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictionsWire {
    pub afc: ConferenceBracket,
    pub nfc: ConferenceBracket,
    #[serde(rename = "superBowl")]
    pub super_bowl: TitleGameWire,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TitleGameWire {
    pub afc: Option<Team>,
    pub nfc: Option<Team>,
    pub winner: Option<Team>,
}

impl From<&Bracket> for PredictionsWire {
    fn from(bracket: &Bracket) -> Self {
        Self {
            afc: bracket.afc.clone(),
            nfc: bracket.nfc.clone(),
            super_bowl: TitleGameWire {
                afc: bracket.title_game.home.clone(),
                nfc: bracket.title_game.away.clone(),
                winner: bracket.title_game.winner.clone(),
            },
        }
    }
}

impl PredictionsWire {
    pub fn into_bracket(self) -> Bracket {
        Bracket {
            afc: self.afc,
            nfc: self.nfc,
            title_game: GameSlot {
                home: self.super_bowl.afc,
                away: self.super_bowl.nfc,
                winner: self.super_bowl.winner,
            },
        }
    }
}
