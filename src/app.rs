use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, SubmissionPhase};
use crate::state::messages::NetworkRequest;
use log::{debug, info, warn};
use nfl_api::backend::SubmitOutcome;
use nfl_api::bracket::SeedOutcome;
use nfl_api::{
    GameDetail, LeaderboardEntry, PlayoffField, SavedBracket, ScoreGame, Team,
};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Scoreboard,
    Bracket,
    Leaderboard,
    MyBrackets,
    GameDetail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(season: u16, week: u8, signed_in: Option<String>) -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(season, week, signed_in),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_standings_loaded(&mut self, season: u16, teams: Vec<Team>) {
        // The user may have flipped the year while the fetch was in flight.
        if season != self.state.standings.season {
            debug!("discarding stale standings for {season}");
            return;
        }
        self.state.last_error = None;
        self.state.standings.teams = teams;
        self.state.standings.scroll_offset = 0;
    }

    pub fn on_scoreboard_loaded(&mut self, week: u8, games: Vec<ScoreGame>) {
        if week != self.state.scoreboard.week {
            debug!("discarding stale scoreboard for week {week}");
            return;
        }
        self.state.last_error = None;
        let max = games.len().saturating_sub(1);
        self.state.scoreboard.games = games;
        self.state.scoreboard.selected = self.state.scoreboard.selected.min(max);
    }

    pub fn on_game_detail_loaded(&mut self, detail: GameDetail) {
        self.state.last_error = None;
        let previous_event = self
            .state
            .game_detail
            .detail
            .as_ref()
            .map(|d| d.event_id.clone());
        let game_changed = previous_event.as_deref() != Some(detail.event_id.as_str());

        self.state.game_detail.detail = Some(detail);
        if game_changed {
            self.state.game_detail.scroll_offset = 0;
        }
    }

    pub fn on_playoff_field_loaded(&mut self, field: PlayoffField) {
        self.state.last_error = None;
        for (conference, outcome) in self.state.bracket.seed_from_field(field) {
            match outcome {
                SeedOutcome::Seeded => info!("{} bracket seeded", conference.abbrev()),
                SeedOutcome::AlreadySeeded => {
                    debug!("{} bracket already seeded, picks preserved", conference.abbrev())
                }
                SeedOutcome::InsufficientTeams { available } => {
                    warn!(
                        "{} field has only {available} teams, bracket left empty",
                        conference.abbrev()
                    );
                    self.state.status_line = Some(format!(
                        "{} playoff picture incomplete ({available} of 7 teams)",
                        conference.abbrev()
                    ));
                }
            }
        }
    }

    pub fn on_bracket_submitted(&mut self, name: String, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted => {
                self.state.bracket.submission.phase = SubmissionPhase::Accepted;
                self.state.status_line = Some(format!("Bracket \"{name}\" submitted"));
                self.state.my_brackets.loaded = false;
            }
            SubmitOutcome::Conflict { message } => {
                self.state.bracket.submission.phase = SubmissionPhase::Conflict(message);
            }
        }
    }

    pub fn on_leaderboard_loaded(&mut self, entries: Vec<LeaderboardEntry>) {
        self.state.last_error = None;
        self.state.leaderboard.entries = entries;
        self.state.leaderboard.scroll_offset = 0;
        self.state.leaderboard.loaded = true;
    }

    pub fn on_user_brackets_loaded(&mut self, brackets: Vec<SavedBracket>) {
        self.state.last_error = None;
        let max = brackets.len().saturating_sub(1);
        self.state.my_brackets.brackets = brackets;
        self.state.my_brackets.selected = self.state.my_brackets.selected.min(max);
        self.state.my_brackets.loaded = true;
    }

    pub fn on_bracket_deleted(&mut self, bracket_id: i64) {
        self.state.my_brackets.remove(bracket_id);
        self.state.status_line = Some("Bracket deleted".into());
    }

    pub fn on_error(&mut self, message: String) {
        // A failed submit goes back to editing so the user can retry manually.
        if self.state.bracket.submission.phase == SubmissionPhase::InFlight {
            self.state.bracket.submission.phase = SubmissionPhase::Editing;
        }
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.status_line = None;
    }

    /// A request the newly opened tab needs fired, if any.
    pub fn tab_load_request(&self) -> Option<NetworkRequest> {
        match self.state.active_tab {
            MenuItem::Leaderboard if !self.state.leaderboard.loaded => {
                Some(NetworkRequest::LoadLeaderboard { season: self.state.season })
            }
            MenuItem::MyBrackets
                if self.state.signed_in.is_some() && !self.state.my_brackets.loaded =>
            {
                Some(NetworkRequest::LoadUserBrackets)
            }
            _ => None,
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    // -----------------------------------------------------------------------
    // Scoreboard → game detail
    // -----------------------------------------------------------------------

    /// Returns the event id if the user pressed Enter on a game.
    /// Switches to the GameDetail tab as a side-effect.
    pub fn scoreboard_open_detail(&mut self) -> Option<String> {
        let event_id = self.state.scoreboard.selected_event_id()?;
        self.update_tab(MenuItem::GameDetail);
        Some(event_id)
    }

    // -----------------------------------------------------------------------
    // Bracket builder — navigation delegates to the cursor, picks to the engine
    // -----------------------------------------------------------------------

    pub fn bracket_round_next(&mut self) {
        self.state.bracket.cursor.round_next();
    }

    pub fn bracket_round_prev(&mut self) {
        self.state.bracket.cursor.round_prev();
    }

    pub fn bracket_slot_down(&mut self) {
        self.state.bracket.cursor.slot_down();
    }

    pub fn bracket_slot_up(&mut self) {
        self.state.bracket.cursor.slot_up();
    }

    pub fn bracket_toggle_conference(&mut self) {
        self.state.bracket.cursor.toggle_conference();
    }

    pub fn bracket_pick_home(&mut self) {
        self.bracket_pick(true);
    }

    pub fn bracket_pick_away(&mut self) {
        self.bracket_pick(false);
    }

    /// Record the selected slot's home or away team as its winner. The UI
    /// gates on populated slots, but the engine has the final say and its
    /// rejections surface on the status line.
    fn bracket_pick(&mut self, home: bool) {
        let id = self.state.bracket.cursor.slot_id();
        let Some(slot) = self.state.bracket.bracket.slot(id) else {
            return;
        };
        let side = if home { slot.home.clone() } else { slot.away.clone() };
        let Some(team) = side else {
            self.state.status_line = Some("That side is still waiting for a team".into());
            return;
        };

        match self.state.bracket.bracket.select_winner(id, &team) {
            Ok(()) => {
                self.state.status_line = Some(format!("{} advance", team.abbrev));
                if self.state.bracket.note_champion() {
                    info!("champion picked: {}", team.name);
                }
            }
            Err(e) => self.state.status_line = Some(e.to_string()),
        }
    }

    pub fn clear_bracket(&mut self) {
        self.state.bracket.clear();
        self.state.status_line = Some("Bracket cleared — seeding kept".into());
    }

    pub fn close_celebration(&mut self) {
        self.state.bracket.show_celebration = false;
    }

    // -----------------------------------------------------------------------
    // Submission dialog
    // -----------------------------------------------------------------------

    pub fn open_submission(&mut self) {
        if self.state.bracket.bracket.champion().is_none() {
            self.state.status_line = Some("Pick a Super Bowl champion first".into());
            return;
        }
        self.state.bracket.show_celebration = false;
        self.state.bracket.submission.open();
    }

    pub fn cancel_submission(&mut self) {
        self.state.bracket.submission.close();
    }

    /// Validate the dialog and build the submit request, or explain why not.
    pub fn submission_request(&mut self) -> Option<NetworkRequest> {
        let name = self.state.bracket.submission.name.trim().to_owned();
        if name.is_empty() {
            self.state.status_line = Some("Enter a bracket name first".into());
            return None;
        }
        if self.state.signed_in.is_none() {
            self.state.status_line =
                Some("Sign in required: set GRIDTUI_API_TOKEN and restart".into());
            return None;
        }
        self.state.bracket.submission.phase = SubmissionPhase::InFlight;
        Some(NetworkRequest::SubmitBracket {
            name,
            season: self.state.season,
            bracket: Box::new(self.state.bracket.bracket.clone()),
        })
    }

    // -----------------------------------------------------------------------
    // Animation tick — called every 80ms from AnimationTick event
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
    }
}
