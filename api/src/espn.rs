/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These are converted into the clean domain types by the strict mapping
/// functions in client.rs; nothing outside the api crate sees them.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Standings  (web v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    /// Conference groups; each may nest division groups in its own `children`.
    pub children: Option<Vec<StandingsGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>, // "AFC" | "NFC", or a division code
    pub standings: Option<StandingsBlock>,
    pub children: Option<Vec<StandingsGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsBlock {
    pub entries: Option<Vec<StandingsEntry>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsEntry {
    pub team: Option<EspnTeam>,
    pub stats: Option<Vec<EspnStat>>,
    /// Carries the division on some responses, e.g. "Clinched NFC West".
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStat {
    pub name: Option<String>, // "wins", "playoffSeed", "pointDifferential", ...
    pub value: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub abbreviation: Option<String>,
    /// Scoreboard competitors carry a flat `logo`; standings carry `logos[]`.
    pub logo: Option<String>,
    pub logos: Option<Vec<EspnLogo>>,
}

impl EspnTeam {
    pub fn logo_href(&self) -> Option<String> {
        self.logo.clone().or_else(|| {
            self.logos
                .as_deref()
                .unwrap_or_default()
                .first()
                .and_then(|l| l.href.clone())
        })
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLogo {
    pub href: Option<String>,
}

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", ...
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>, // "Sun 1:00 PM", "Final/OT"
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub winner: Option<bool>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    #[serde(rename = "scoringPlays")]
    pub scoring_plays: Option<Vec<EspnScoringPlay>>,
    pub boxscore: Option<EspnBoxscore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnScoringPlay {
    pub period: Option<EspnPeriod>,
    pub clock: Option<EspnClock>,
    pub text: Option<String>,
    pub team: Option<EspnTeam>,
    #[serde(rename = "homeScore")]
    pub home_score: Option<u16>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPeriod {
    pub number: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnClock {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    /// Index 0 is the away team, index 1 the home team.
    pub teams: Option<Vec<EspnTeamStatistics>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamStatistics {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStatisticLine>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatisticLine {
    pub name: Option<String>,
    pub label: Option<String>, // "Total Yards"
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}
