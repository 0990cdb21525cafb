use crate::app::MenuItem;
use nfl_api::backend::MAX_BRACKET_NAME_LEN;
use nfl_api::bracket::{Bracket, PlayoffRound, SeedOutcome, SlotId};
use nfl_api::client::REGULAR_SEASON_WEEKS;
use nfl_api::{
    Conference, GameDetail, LeaderboardEntry, PlayoffField, SavedBracket, ScoreGame, Team,
};
use rand::Rng;

pub const MIN_SEASON: u16 = 2020;
pub const MAX_SEASON: u16 = 2025;

// ---------------------------------------------------------------------------
// Banner animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index into the banner frames array, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter — drives the bouncing-football offset.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count;
    }
}

// ---------------------------------------------------------------------------
// Standings state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StandingsSort {
    #[default]
    Conference,
    PowerRankings,
    PlayoffSeeding,
}

impl StandingsSort {
    pub fn cycle(self) -> Self {
        match self {
            StandingsSort::Conference => StandingsSort::PowerRankings,
            StandingsSort::PowerRankings => StandingsSort::PlayoffSeeding,
            StandingsSort::PlayoffSeeding => StandingsSort::Conference,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StandingsSort::Conference => "Conference Standings",
            StandingsSort::PowerRankings => "Power Rankings",
            StandingsSort::PlayoffSeeding => "Playoff Seeds",
        }
    }
}

#[derive(Debug, Default)]
pub struct StandingsState {
    pub teams: Vec<Team>,
    pub sort_by: StandingsSort,
    pub season: u16,
    pub scroll_offset: u16,
}

impl StandingsState {
    pub fn sorted_teams(&self) -> Vec<&Team> {
        let mut sorted: Vec<&Team> = self.teams.iter().collect();
        match self.sort_by {
            StandingsSort::PowerRankings => sorted.sort_by(|a, b| {
                b.wins
                    .cmp(&a.wins)
                    .then_with(|| b.win_percent.total_cmp(&a.win_percent))
                    .then_with(|| b.point_differential.cmp(&a.point_differential))
            }),
            StandingsSort::Conference => sorted.sort_by(|a, b| {
                a.conference
                    .label()
                    .cmp(b.conference.label())
                    .then_with(|| a.playoff_seed.cmp(&b.playoff_seed))
            }),
            StandingsSort::PlayoffSeeding => sorted.sort_by_key(|t| t.playoff_seed),
        }
        sorted
    }

    pub fn conference_table(&self, conference: Conference) -> Vec<&Team> {
        let mut table: Vec<&Team> = self
            .teams
            .iter()
            .filter(|t| t.conference == conference)
            .collect();
        table.sort_by_key(|t| t.playoff_seed);
        table
    }

    pub fn cycle_sort(&mut self) {
        self.sort_by = self.sort_by.cycle();
        self.scroll_offset = 0;
    }

    /// Changing the year empties the list until the new standings arrive.
    pub fn season_prev(&mut self) -> bool {
        if self.season > MIN_SEASON {
            self.season -= 1;
            self.teams.clear();
            self.scroll_offset = 0;
            return true;
        }
        false
    }

    pub fn season_next(&mut self) -> bool {
        if self.season < MAX_SEASON {
            self.season += 1;
            self.teams.clear();
            self.scroll_offset = 0;
            return true;
        }
        false
    }

    pub fn scroll_down(&mut self) {
        let max = self.teams.len().saturating_sub(1) as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Scoreboard state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScoreboardState {
    pub week: u8,
    pub games: Vec<ScoreGame>,
    pub selected: usize,
}

impl ScoreboardState {
    pub fn week_prev(&mut self) -> bool {
        if self.week > 1 {
            self.week -= 1;
            self.games.clear();
            self.selected = 0;
            return true;
        }
        false
    }

    pub fn week_next(&mut self) -> bool {
        if self.week < REGULAR_SEASON_WEEKS {
            self.week += 1;
            self.games.clear();
            self.selected = 0;
            return true;
        }
        false
    }

    pub fn select_down(&mut self) {
        let max = self.games.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_event_id(&self) -> Option<String> {
        self.games.get(self.selected).map(|g| g.id.clone())
    }
}

// ---------------------------------------------------------------------------
// Game detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GameDetailState {
    pub detail: Option<GameDetail>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Bracket builder state
// ---------------------------------------------------------------------------

/// Where the user's selection sits within the bracket view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketCursor {
    pub round: PlayoffRound,
    pub conference: Conference,
    pub slot: usize,
}

impl Default for BracketCursor {
    fn default() -> Self {
        Self { round: PlayoffRound::WildCard, conference: Conference::Afc, slot: 0 }
    }
}

impl BracketCursor {
    pub fn slot_id(&self) -> SlotId {
        match self.round {
            PlayoffRound::WildCard => SlotId::WildCard(self.conference, self.slot),
            PlayoffRound::Divisional => SlotId::Divisional(self.conference, self.slot),
            PlayoffRound::Championship => SlotId::Championship(self.conference),
            PlayoffRound::TitleGame => SlotId::TitleGame,
        }
    }

    pub fn round_next(&mut self) {
        if let Some(next) = self.round.next() {
            self.round = next;
            self.clamp_slot();
        }
    }

    pub fn round_prev(&mut self) {
        if let Some(prev) = self.round.prev() {
            self.round = prev;
            self.clamp_slot();
        }
    }

    pub fn slot_down(&mut self) {
        if self.slot + 1 < self.round.games() {
            self.slot += 1;
        }
    }

    pub fn slot_up(&mut self) {
        self.slot = self.slot.saturating_sub(1);
    }

    pub fn toggle_conference(&mut self) {
        self.conference = self.conference.other();
    }

    fn clamp_slot(&mut self) {
        self.slot = self.slot.min(self.round.games().saturating_sub(1));
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    InFlight,
    Accepted,
    Conflict(String),
}

/// The bracket-name dialog. Name rules come from the backend schema: at most
/// 20 characters.
#[derive(Debug, Default)]
pub struct SubmissionState {
    pub active: bool,
    pub name: String,
    pub phase: SubmissionPhase,
}

impl SubmissionState {
    pub fn open(&mut self) {
        self.active = true;
        self.phase = SubmissionPhase::Editing;
    }

    pub fn close(&mut self) {
        self.active = false;
        self.phase = SubmissionPhase::Editing;
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if self.name.chars().count() < MAX_BRACKET_NAME_LEN {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    /// Can't think of a name? Same generator the submit form always had.
    pub fn randomize(&mut self) {
        const CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
        let mut rng = rand::thread_rng();
        self.name = (0..10)
            .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
            .collect();
    }
}

#[derive(Debug, Default)]
pub struct BracketUiState {
    pub bracket: Bracket,
    /// The qualified field, kept for the playoff-picture side pane.
    pub field: Option<PlayoffField>,
    pub cursor: BracketCursor,
    pub submission: SubmissionState,
    pub show_celebration: bool,
    /// Champion id the celebration already fired for.
    celebrated: Option<String>,
}

impl BracketUiState {
    /// Seed both conferences once the field arrives. The engine guard makes a
    /// re-delivery (re-render, reconnect) harmless.
    pub fn seed_from_field(&mut self, field: PlayoffField) -> [(Conference, SeedOutcome); 2] {
        let outcomes = [
            (Conference::Afc, self.bracket.seed(Conference::Afc, &field.afc)),
            (Conference::Nfc, self.bracket.seed(Conference::Nfc, &field.nfc)),
        ];
        self.field = Some(field);
        outcomes
    }

    /// Detect the champion-just-decided transition. Fires exactly once per
    /// distinct champion assignment; changing picks upstream clears the
    /// champion and re-arms the celebration.
    pub fn note_champion(&mut self) -> bool {
        match self.bracket.champion() {
            Some(champion) => {
                if self.celebrated.as_deref() == Some(champion.id.as_str()) {
                    false
                } else {
                    self.celebrated = Some(champion.id.clone());
                    self.show_celebration = true;
                    true
                }
            }
            None => {
                self.celebrated = None;
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.bracket.reset();
        self.celebrated = None;
        self.show_celebration = false;
        self.submission.close();
        self.cursor = BracketCursor::default();
    }
}

// ---------------------------------------------------------------------------
// Leaderboard state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LeaderboardState {
    pub entries: Vec<LeaderboardEntry>,
    pub scroll_offset: u16,
    pub loaded: bool,
}

impl LeaderboardState {
    pub fn scroll_down(&mut self) {
        let max = self.entries.len().saturating_sub(1) as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// My-brackets state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MyBracketsState {
    pub brackets: Vec<SavedBracket>,
    pub selected: usize,
    /// Two-step delete: first press arms, second press confirms.
    pub pending_delete: Option<i64>,
    pub loaded: bool,
}

impl MyBracketsState {
    pub fn select_down(&mut self) {
        let max = self.brackets.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
        self.pending_delete = None;
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.pending_delete = None;
    }

    pub fn selected_bracket(&self) -> Option<&SavedBracket> {
        self.brackets.get(self.selected)
    }

    /// Returns the id to delete once the request is confirmed.
    pub fn request_delete(&mut self) -> Option<i64> {
        let id = self.selected_bracket()?.id;
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
            Some(id)
        } else {
            self.pending_delete = Some(id);
            None
        }
    }

    pub fn remove(&mut self, bracket_id: i64) {
        self.brackets.retain(|b| b.id != bracket_id);
        self.selected = self.selected.min(self.brackets.len().saturating_sub(1));
        self.pending_delete = None;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// One-line status strip: "Bracket submitted", selection rejections, ...
    pub status_line: Option<String>,
    /// The season the bracket, leaderboard and scoreboard are pinned to.
    pub season: u16,
    /// Display name when a session token is configured; None = signed out.
    pub signed_in: Option<String>,
    pub standings: StandingsState,
    pub scoreboard: ScoreboardState,
    pub game_detail: GameDetailState,
    pub bracket: BracketUiState,
    pub leaderboard: LeaderboardState,
    pub my_brackets: MyBracketsState,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new(season: u16, week: u8, signed_in: Option<String>) -> Self {
        let mut state = Self { show_intro: true, season, signed_in, ..Self::default() };
        state.standings.season = season.clamp(MIN_SEASON, MAX_SEASON);
        state.scoreboard.week = week.clamp(1, REGULAR_SEASON_WEEKS);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfl_api::bracket::GameSlot;

    fn team(abbrev: &str, seed: u8, conference: Conference, wins: u16) -> Team {
        Team {
            id: abbrev.to_ascii_lowercase(),
            abbrev: abbrev.into(),
            name: abbrev.into(),
            location: abbrev.into(),
            conference,
            playoff_seed: seed,
            wins,
            losses: 17 - wins,
            ..Team::default()
        }
    }

    #[test]
    fn power_rankings_sort_by_wins_then_differential() {
        let mut standings = StandingsState::default();
        let mut second = team("SF", 1, Conference::Nfc, 14);
        second.point_differential = 80;
        let mut first = team("KC", 1, Conference::Afc, 14);
        first.point_differential = 120;
        standings.teams = vec![team("DEN", 5, Conference::Afc, 9), second, first];
        standings.sort_by = StandingsSort::PowerRankings;

        let sorted = standings.sorted_teams();
        assert_eq!(sorted[0].abbrev, "KC");
        assert_eq!(sorted[1].abbrev, "SF");
        assert_eq!(sorted[2].abbrev, "DEN");
    }

    #[test]
    fn conference_sort_groups_afc_before_nfc_by_seed() {
        let mut standings = StandingsState::default();
        standings.teams = vec![
            team("SF", 1, Conference::Nfc, 13),
            team("BUF", 2, Conference::Afc, 12),
            team("KC", 1, Conference::Afc, 14),
        ];
        let sorted = standings.sorted_teams();
        assert_eq!(sorted[0].abbrev, "KC");
        assert_eq!(sorted[1].abbrev, "BUF");
        assert_eq!(sorted[2].abbrev, "SF");
    }

    #[test]
    fn standings_season_stays_within_supported_years() {
        let mut standings = StandingsState { season: MIN_SEASON, ..Default::default() };
        assert!(!standings.season_prev());
        assert_eq!(standings.season, MIN_SEASON);
        standings.season = MAX_SEASON;
        assert!(!standings.season_next());
        assert_eq!(standings.season, MAX_SEASON);
        standings.season = 2023;
        assert!(standings.season_next());
        assert_eq!(standings.season, 2024);
    }

    #[test]
    fn scoreboard_week_clamps_to_regular_season() {
        let mut scoreboard = ScoreboardState { week: 1, ..Default::default() };
        assert!(!scoreboard.week_prev());
        scoreboard.week = REGULAR_SEASON_WEEKS;
        assert!(!scoreboard.week_next());
        assert!(scoreboard.week_prev());
        assert_eq!(scoreboard.week, REGULAR_SEASON_WEEKS - 1);
    }

    #[test]
    fn cursor_clamps_slot_when_changing_rounds() {
        let mut cursor = BracketCursor::default();
        cursor.slot_down();
        cursor.slot_down();
        assert_eq!(cursor.slot, 2);
        cursor.slot_down();
        assert_eq!(cursor.slot, 2, "wild card has three games");

        cursor.round_next();
        assert_eq!(cursor.round, PlayoffRound::Divisional);
        assert_eq!(cursor.slot, 1, "slot clamps into the smaller round");

        cursor.round_next();
        cursor.round_next();
        assert_eq!(cursor.round, PlayoffRound::TitleGame);
        assert_eq!(cursor.slot, 0);
        cursor.round_next();
        assert_eq!(cursor.round, PlayoffRound::TitleGame, "no round past the title game");
    }

    #[test]
    fn submission_name_is_capped_at_twenty_characters() {
        let mut submission = SubmissionState::default();
        for c in "a very long bracket name indeed".chars() {
            submission.push_char(c);
        }
        assert_eq!(submission.name.chars().count(), MAX_BRACKET_NAME_LEN);
        submission.backspace();
        assert_eq!(submission.name.chars().count(), MAX_BRACKET_NAME_LEN - 1);
    }

    #[test]
    fn randomized_names_use_the_unambiguous_charset() {
        let mut submission = SubmissionState::default();
        submission.randomize();
        assert_eq!(submission.name.len(), 10);
        assert!(submission.name.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!submission.name.contains(['0', '1', 'O', 'I', 'l']));
    }

    #[test]
    fn celebration_fires_once_per_distinct_champion() {
        let kc = team("KC", 1, Conference::Afc, 14);
        let sf = team("SF", 1, Conference::Nfc, 13);
        let mut ui = BracketUiState::default();
        ui.bracket.title_game = GameSlot {
            home: Some(kc.clone()),
            away: Some(sf.clone()),
            winner: Some(kc.clone()),
        };

        assert!(ui.note_champion(), "first assignment fires");
        assert!(!ui.note_champion(), "same champion does not re-fire");

        // Upstream change clears the champion, re-arming the edge detector.
        ui.bracket.title_game.winner = None;
        assert!(!ui.note_champion());
        ui.bracket.title_game.winner = Some(sf);
        assert!(ui.note_champion(), "a different champion fires again");
    }

    #[test]
    fn two_step_delete_requires_confirmation() {
        let mut mine = MyBracketsState::default();
        mine.brackets = vec![SavedBracket { id: 7, bracket_name: "one".into(), ..Default::default() }];
        assert_eq!(mine.request_delete(), None, "first press only arms");
        assert_eq!(mine.pending_delete, Some(7));
        assert_eq!(mine.request_delete(), Some(7), "second press confirms");
        mine.remove(7);
        assert!(mine.brackets.is_empty());
    }
}
