//! Playoff bracket engine.
//!
//! Owns the structural state of a single-elimination playoff prediction:
//! which teams occupy which slot, which games have a recorded winner, and how
//! a winner propagates round to round (wild card → divisional → conference
//! championship → title game). Everything here is synchronous and pure state;
//! fetching teams and persisting a finished bracket live in `client` and
//! `backend`.

use crate::{Conference, Team};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Teams that qualify per conference. Seed 1 receives a first-round bye.
pub const FIELD_SIZE: usize = 7;
pub const WILD_CARD_GAMES: usize = 3;
pub const DIVISIONAL_GAMES: usize = 2;

// ---------------------------------------------------------------------------
// Rounds and slot addressing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlayoffRound {
    #[default]
    WildCard,
    Divisional,
    Championship,
    TitleGame,
}

impl PlayoffRound {
    pub fn label(&self) -> &'static str {
        match self {
            PlayoffRound::WildCard => "Wild Card",
            PlayoffRound::Divisional => "Divisional",
            PlayoffRound::Championship => "Championship",
            PlayoffRound::TitleGame => "Super Bowl",
        }
    }

    pub fn games(&self) -> usize {
        match self {
            PlayoffRound::WildCard => WILD_CARD_GAMES,
            PlayoffRound::Divisional => DIVISIONAL_GAMES,
            PlayoffRound::Championship | PlayoffRound::TitleGame => 1,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            PlayoffRound::WildCard => None,
            PlayoffRound::Divisional => Some(PlayoffRound::WildCard),
            PlayoffRound::Championship => Some(PlayoffRound::Divisional),
            PlayoffRound::TitleGame => Some(PlayoffRound::Championship),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            PlayoffRound::WildCard => Some(PlayoffRound::Divisional),
            PlayoffRound::Divisional => Some(PlayoffRound::Championship),
            PlayoffRound::Championship => Some(PlayoffRound::TitleGame),
            PlayoffRound::TitleGame => None,
        }
    }
}

/// Typed address of one game slot within the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    WildCard(Conference, usize),
    Divisional(Conference, usize),
    Championship(Conference),
    TitleGame,
}

impl SlotId {
    pub fn round(&self) -> PlayoffRound {
        match self {
            SlotId::WildCard(..) => PlayoffRound::WildCard,
            SlotId::Divisional(..) => PlayoffRound::Divisional,
            SlotId::Championship(_) => PlayoffRound::Championship,
            SlotId::TitleGame => PlayoffRound::TitleGame,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::WildCard(c, i) => write!(f, "{} wild card game {}", c.abbrev(), i + 1),
            SlotId::Divisional(c, i) => write!(f, "{} divisional game {}", c.abbrev(), i + 1),
            SlotId::Championship(c) => write!(f, "{} championship", c.abbrev()),
            SlotId::TitleGame => write!(f, "Super Bowl"),
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Home,
    Away,
}

// ---------------------------------------------------------------------------
// Slots and aggregates
// ---------------------------------------------------------------------------

/// The atomic unit of bracket state. A winner may only be recorded once both
/// sides are populated, and must be one of the two occupants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSlot {
    pub home: Option<Team>,
    pub away: Option<Team>,
    pub winner: Option<Team>,
}

impl GameSlot {
    fn matchup(home: Team, away: Team) -> Self {
        Self { home: Some(home), away: Some(away), winner: None }
    }

    pub fn is_resolvable(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }

    pub fn contains(&self, team_id: &str) -> bool {
        self.home.as_ref().is_some_and(|t| t.id == team_id)
            || self.away.as_ref().is_some_and(|t| t.id == team_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceBracket {
    /// Fixed pairings once seeded: 2v7, 3v6, 4v5. Better seed hosts.
    pub wild_card: [GameSlot; WILD_CARD_GAMES],
    /// Slot 0 holds the bye team at home, awaiting the worst surviving seed.
    pub divisional: [GameSlot; DIVISIONAL_GAMES],
    pub championship: GameSlot,
}

/// Derived per-conference progress, for display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConferenceStage {
    Empty,
    Seeded,
    WildCardInProgress,
    WildCardComplete,
    DivisionalInProgress,
    DivisionalComplete,
    ChampionshipDecided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketPhase {
    Undecided,
    Decided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded,
    /// Slots were already populated; existing picks are left untouched.
    AlreadySeeded,
    /// Fewer than [`FIELD_SIZE`] teams supplied; seeding skipped entirely.
    InsufficientTeams { available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnknownSlot(SlotId),
    /// Both sides of the slot must be populated before a winner can be set.
    NotResolvable(SlotId),
    NotAParticipant { slot: SlotId, team: String },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::UnknownSlot(slot) => write!(f, "no such slot: {slot}"),
            SelectionError::NotResolvable(slot) => {
                write!(f, "{slot} is still waiting for teams")
            }
            SelectionError::NotAParticipant { slot, team } => {
                write!(f, "{team} is not playing in the {slot}")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

impl ConferenceBracket {
    fn seed(&mut self, ranked: &[Team]) -> SeedOutcome {
        if self.is_seeded() {
            return SeedOutcome::AlreadySeeded;
        }
        if ranked.len() < FIELD_SIZE {
            return SeedOutcome::InsufficientTeams { available: ranked.len() };
        }

        let mut teams = ranked.to_vec();
        teams.sort_by_key(|t| t.playoff_seed);
        teams.truncate(FIELD_SIZE);

        self.wild_card[0] = GameSlot::matchup(teams[1].clone(), teams[6].clone());
        self.wild_card[1] = GameSlot::matchup(teams[2].clone(), teams[5].clone());
        self.wild_card[2] = GameSlot::matchup(teams[3].clone(), teams[4].clone());

        // The top seed rests until the worst surviving seed is known.
        self.divisional[0] =
            GameSlot { home: Some(teams[0].clone()), away: None, winner: None };
        self.divisional[1] = GameSlot::default();
        self.championship = GameSlot::default();
        SeedOutcome::Seeded
    }

    pub fn is_seeded(&self) -> bool {
        self.wild_card[0].home.is_some()
    }

    pub fn stage(&self) -> ConferenceStage {
        if !self.is_seeded() {
            return ConferenceStage::Empty;
        }
        if self.championship.winner.is_some() {
            return ConferenceStage::ChampionshipDecided;
        }
        let wild_card_done =
            self.wild_card.iter().filter(|g| g.winner.is_some()).count();
        let divisional_done =
            self.divisional.iter().filter(|g| g.winner.is_some()).count();
        if divisional_done == DIVISIONAL_GAMES {
            ConferenceStage::DivisionalComplete
        } else if divisional_done > 0 {
            ConferenceStage::DivisionalInProgress
        } else if wild_card_done == WILD_CARD_GAMES {
            ConferenceStage::WildCardComplete
        } else if wild_card_done > 0 {
            ConferenceStage::WildCardInProgress
        } else {
            ConferenceStage::Seeded
        }
    }

    /// Back to the exact post-seed shape: wild card pairings and the bye home
    /// survive, everything derived from user picks does not.
    fn reset(&mut self) {
        for game in &mut self.wild_card {
            game.winner = None;
        }
        self.divisional[0].away = None;
        self.divisional[0].winner = None;
        self.divisional[1] = GameSlot::default();
        self.championship = GameSlot::default();
    }
}

/// The aggregate root: both conference brackets plus the title game.
/// Title-game sides are fixed: AFC champion home, NFC champion away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bracket {
    pub afc: ConferenceBracket,
    pub nfc: ConferenceBracket,
    pub title_game: GameSlot,
}

impl Bracket {
    pub fn conference(&self, conference: Conference) -> &ConferenceBracket {
        match conference {
            Conference::Afc => &self.afc,
            Conference::Nfc => &self.nfc,
        }
    }

    fn conference_mut(&mut self, conference: Conference) -> &mut ConferenceBracket {
        match conference {
            Conference::Afc => &mut self.afc,
            Conference::Nfc => &mut self.nfc,
        }
    }

    /// Seed one conference from a ranked team list. Sorts by playoff seed
    /// itself, ignores entries beyond the seventh, and refuses to overwrite
    /// slots that are already populated (re-fetching team data must not wipe
    /// in-progress predictions).
    pub fn seed(&mut self, conference: Conference, ranked: &[Team]) -> SeedOutcome {
        self.conference_mut(conference).seed(ranked)
    }

    pub fn is_seeded(&self) -> bool {
        self.afc.is_seeded() && self.nfc.is_seeded()
    }

    pub fn slot(&self, id: SlotId) -> Option<&GameSlot> {
        match id {
            SlotId::WildCard(c, i) => self.conference(c).wild_card.get(i),
            SlotId::Divisional(c, i) => self.conference(c).divisional.get(i),
            SlotId::Championship(c) => Some(&self.conference(c).championship),
            SlotId::TitleGame => Some(&self.title_game),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut GameSlot> {
        match id {
            SlotId::WildCard(c, i) => self.conference_mut(c).wild_card.get_mut(i),
            SlotId::Divisional(c, i) => self.conference_mut(c).divisional.get_mut(i),
            SlotId::Championship(c) => Some(&mut self.conference_mut(c).championship),
            SlotId::TitleGame => Some(&mut self.title_game),
        }
    }

    /// All slots in bracket order, for rendering and invariant walks.
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &GameSlot)> {
        let mut out = Vec::with_capacity(2 * (WILD_CARD_GAMES + DIVISIONAL_GAMES + 1) + 1);
        for conference in Conference::BOTH {
            let bracket = self.conference(conference);
            for (i, game) in bracket.wild_card.iter().enumerate() {
                out.push((SlotId::WildCard(conference, i), game));
            }
            for (i, game) in bracket.divisional.iter().enumerate() {
                out.push((SlotId::Divisional(conference, i), game));
            }
            out.push((SlotId::Championship(conference), &bracket.championship));
        }
        out.push((SlotId::TitleGame, &self.title_game));
        out.into_iter()
    }

    /// Record a winner for a slot and propagate it into the next round.
    ///
    /// Overwriting an earlier pick is allowed; any downstream slot whose
    /// occupants change as a consequence loses its own winner, recursively,
    /// so the bracket never carries picks for matchups that no longer exist.
    pub fn select_winner(&mut self, id: SlotId, team: &Team) -> Result<(), SelectionError> {
        let slot = self.slot_mut(id).ok_or(SelectionError::UnknownSlot(id))?;
        if !slot.is_resolvable() {
            return Err(SelectionError::NotResolvable(id));
        }
        if !slot.contains(&team.id) {
            return Err(SelectionError::NotAParticipant {
                slot: id,
                team: team.abbrev.clone(),
            });
        }

        let previous = slot.winner.replace(team.clone());
        if previous.as_ref().is_some_and(|p| p.id == team.id) {
            // Re-picking the same team changes nothing downstream.
            return Ok(());
        }

        match id {
            SlotId::WildCard(conference, _) => self.reseat_divisional(conference),
            SlotId::Divisional(conference, _) => {
                self.advance_to_championship(conference, previous, team.clone())
            }
            SlotId::Championship(conference) => {
                self.advance_to_title(conference, team.clone())
            }
            SlotId::TitleGame => {} // tournament champion; nothing further
        }
        Ok(())
    }

    /// Clears every winner and every propagated occupant in both conferences
    /// and the title game, preserving the seeding produced by [`Bracket::seed`].
    pub fn reset(&mut self) {
        self.afc.reset();
        self.nfc.reset();
        self.title_game = GameSlot::default();
    }

    pub fn champion(&self) -> Option<&Team> {
        self.title_game.winner.as_ref()
    }

    pub fn phase(&self) -> BracketPhase {
        if self.champion().is_some() {
            BracketPhase::Decided
        } else {
            BracketPhase::Undecided
        }
    }

    // -----------------------------------------------------------------------
    // Propagation
    // -----------------------------------------------------------------------

    /// Recompute the divisional occupants from the current wild card winners.
    /// Once all three are known: the worst surviving seed visits the bye team,
    /// the other two pair off with the better seed hosting.
    fn reseat_divisional(&mut self, conference: Conference) {
        let [bye_visitor, second_home, second_away] = {
            let bracket = self.conference(conference);
            let mut winners: Vec<Team> = bracket
                .wild_card
                .iter()
                .filter_map(|g| g.winner.clone())
                .collect();
            if winners.len() == WILD_CARD_GAMES {
                winners.sort_by_key(|t| t.playoff_seed);
                [
                    Some(winners[2].clone()),
                    Some(winners[0].clone()),
                    Some(winners[1].clone()),
                ]
            } else {
                [None, None, None]
            }
        };

        let mut changed = [false; DIVISIONAL_GAMES];
        {
            let bracket = self.conference_mut(conference);
            changed[0] |= set_occupant(&mut bracket.divisional[0].away, bye_visitor);
            changed[1] |= set_occupant(&mut bracket.divisional[1].home, second_home);
            changed[1] |= set_occupant(&mut bracket.divisional[1].away, second_away);
        }
        for index in 0..DIVISIONAL_GAMES {
            if changed[index] {
                self.clear_divisional_winner(conference, index);
            }
        }
    }

    /// A divisional winner takes the next open side of the conference
    /// championship; the first one recorded becomes home. On an overwrite the
    /// old winner is replaced in place so the side assignment stays stable.
    fn advance_to_championship(
        &mut self,
        conference: Conference,
        previous: Option<Team>,
        winner: Team,
    ) {
        let replaced = {
            let championship = &mut self.conference_mut(conference).championship;
            let prior_side = previous.as_ref().and_then(|old| {
                if championship.home.as_ref().is_some_and(|t| t.id == old.id) {
                    Some(Side::Home)
                } else if championship.away.as_ref().is_some_and(|t| t.id == old.id) {
                    Some(Side::Away)
                } else {
                    None
                }
            });
            match prior_side {
                Some(Side::Home) => {
                    championship.home = Some(winner);
                    true
                }
                Some(Side::Away) => {
                    championship.away = Some(winner);
                    true
                }
                None => {
                    if championship.home.is_none() {
                        championship.home = Some(winner);
                    } else if championship.away.is_none() {
                        championship.away = Some(winner);
                    }
                    false
                }
            }
        };
        if replaced {
            // The matchup changed, so any championship pick must be re-made.
            self.clear_championship_winner(conference);
        }
    }

    /// A conference champion takes that conference's fixed side of the title
    /// game: AFC home, NFC away.
    fn advance_to_title(&mut self, conference: Conference, winner: Team) {
        let side = match conference {
            Conference::Afc => &mut self.title_game.home,
            Conference::Nfc => &mut self.title_game.away,
        };
        let changed = !side.as_ref().is_some_and(|t| t.id == winner.id);
        *side = Some(winner);
        if changed {
            self.title_game.winner = None;
        }
    }

    // -----------------------------------------------------------------------
    // Cascade clears — a slot whose occupants change loses its winner
    // -----------------------------------------------------------------------

    fn clear_divisional_winner(&mut self, conference: Conference, index: usize) {
        let Some(gone) = self.conference_mut(conference).divisional[index].winner.take()
        else {
            return;
        };
        let removed = {
            let championship = &mut self.conference_mut(conference).championship;
            if championship.home.as_ref().is_some_and(|t| t.id == gone.id) {
                championship.home = None;
                true
            } else if championship.away.as_ref().is_some_and(|t| t.id == gone.id) {
                championship.away = None;
                true
            } else {
                false
            }
        };
        if removed {
            self.clear_championship_winner(conference);
        }
    }

    fn clear_championship_winner(&mut self, conference: Conference) {
        if self.conference_mut(conference).championship.winner.take().is_some() {
            self.retract_title_side(conference);
        }
    }

    fn retract_title_side(&mut self, conference: Conference) {
        let side = match conference {
            Conference::Afc => &mut self.title_game.home,
            Conference::Nfc => &mut self.title_game.away,
        };
        if side.take().is_some() {
            self.title_game.winner = None;
        }
    }
}

/// Replace one side of a slot, reporting whether the occupant actually
/// changed (compared by team id).
fn set_occupant(side: &mut Option<Team>, target: Option<Team>) -> bool {
    let unchanged = match (side.as_ref(), target.as_ref()) {
        (Some(current), Some(next)) => current.id == next.id,
        (None, None) => true,
        _ => false,
    };
    *side = target;
    !unchanged
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn team(abbrev: &str, seed: u8, conference: Conference) -> Team {
        Team {
            id: abbrev.to_ascii_lowercase(),
            name: format!("{abbrev} Football Team"),
            location: abbrev.to_string(),
            abbrev: abbrev.to_string(),
            logo: None,
            conference,
            division: None,
            wins: 17 - u16::from(seed),
            losses: u16::from(seed),
            ties: 0,
            win_percent: 0.0,
            playoff_seed: seed,
            point_differential: 0,
        }
    }

    fn afc_field() -> Vec<Team> {
        [("KC", 1), ("BUF", 2), ("BAL", 3), ("HOU", 4), ("CLE", 5), ("PIT", 6), ("MIA", 7)]
            .into_iter()
            .map(|(a, s)| team(a, s, Conference::Afc))
            .collect()
    }

    fn nfc_field() -> Vec<Team> {
        [("SF", 1), ("DAL", 2), ("DET", 3), ("PHI", 4), ("TB", 5), ("LAR", 6), ("GB", 7)]
            .into_iter()
            .map(|(a, s)| team(a, s, Conference::Nfc))
            .collect()
    }

    fn seeded() -> Bracket {
        let mut bracket = Bracket::default();
        assert_eq!(bracket.seed(Conference::Afc, &afc_field()), SeedOutcome::Seeded);
        assert_eq!(bracket.seed(Conference::Nfc, &nfc_field()), SeedOutcome::Seeded);
        bracket
    }

    /// Every recorded winner must be one of its slot's occupants, after every
    /// mutation and every propagation step.
    fn assert_winners_are_occupants(bracket: &Bracket) {
        for (id, slot) in bracket.slots() {
            if let Some(winner) = &slot.winner {
                assert!(
                    slot.contains(&winner.id),
                    "winner {} is not an occupant of {id}",
                    winner.abbrev
                );
            }
        }
    }

    /// Select the occupant with the given abbreviation as the slot's winner.
    fn pick(bracket: &mut Bracket, id: SlotId, abbrev: &str) {
        let chosen = {
            let slot = bracket.slot(id).expect("slot exists");
            [slot.home.as_ref(), slot.away.as_ref()]
                .into_iter()
                .flatten()
                .find(|t| t.abbrev == abbrev)
                .unwrap_or_else(|| panic!("{abbrev} not found in {id}"))
                .clone()
        };
        bracket.select_winner(id, &chosen).expect("selection is legal");
        assert_winners_are_occupants(bracket);
    }

    fn abbrev(side: &Option<Team>) -> Option<&str> {
        side.as_ref().map(|t| t.abbrev.as_str())
    }

    #[test]
    fn seed_follows_fixed_wild_card_pairings() {
        let bracket = seeded();
        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.wild_card[0].home), Some("BUF")); // 2v7
        assert_eq!(abbrev(&afc.wild_card[0].away), Some("MIA"));
        assert_eq!(abbrev(&afc.wild_card[1].home), Some("BAL")); // 3v6
        assert_eq!(abbrev(&afc.wild_card[1].away), Some("PIT"));
        assert_eq!(abbrev(&afc.wild_card[2].home), Some("HOU")); // 4v5
        assert_eq!(abbrev(&afc.wild_card[2].away), Some("CLE"));
        assert_eq!(abbrev(&afc.divisional[0].home), Some("KC")); // bye
        assert!(afc.divisional[0].away.is_none());
        assert!(!afc.divisional[1].is_resolvable());
        assert_eq!(afc.stage(), ConferenceStage::Seeded);
    }

    #[test]
    fn seed_sorts_unranked_input() {
        let mut shuffled = afc_field();
        shuffled.reverse();
        let mut bracket = Bracket::default();
        bracket.seed(Conference::Afc, &shuffled);
        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.divisional[0].home), Some("KC"));
        assert_eq!(abbrev(&afc.wild_card[0].home), Some("BUF"));
    }

    #[test]
    fn seed_skips_conference_with_fewer_than_seven_teams() {
        let mut bracket = Bracket::default();
        let short = &afc_field()[..5];
        assert_eq!(
            bracket.seed(Conference::Afc, short),
            SeedOutcome::InsufficientTeams { available: 5 }
        );
        assert!(!bracket.conference(Conference::Afc).is_seeded());
        assert_eq!(bracket.conference(Conference::Afc).stage(), ConferenceStage::Empty);
    }

    #[test]
    fn seed_ignores_teams_beyond_the_seventh() {
        let mut field = afc_field();
        field.push(team("DEN", 8, Conference::Afc));
        field.push(team("LAC", 9, Conference::Afc));
        let mut bracket = Bracket::default();
        bracket.seed(Conference::Afc, &field);
        for (_, slot) in bracket.slots() {
            assert!(!slot.contains("den"));
            assert!(!slot.contains("lac"));
        }
    }

    #[test]
    fn seed_is_guarded_against_reseeding() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");

        // A re-fetch delivering different data must not wipe the pick.
        let mut reshuffled = afc_field();
        reshuffled.swap(1, 6);
        assert_eq!(
            bracket.seed(Conference::Afc, &reshuffled),
            SeedOutcome::AlreadySeeded
        );
        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.wild_card[0].winner), Some("BUF"));
        assert_eq!(abbrev(&afc.wild_card[0].home), Some("BUF"));
    }

    #[test]
    fn wild_card_sweep_populates_both_divisional_slots() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF"); // 2
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL"); // 3

        // Two of three winners known: nothing propagates yet.
        assert!(bracket.conference(Conference::Afc).divisional[0].away.is_none());

        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU"); // 4
        let afc = bracket.conference(Conference::Afc);
        // Worst surviving seed (HOU, 4) visits the bye team.
        assert_eq!(abbrev(&afc.divisional[0].home), Some("KC"));
        assert_eq!(abbrev(&afc.divisional[0].away), Some("HOU"));
        // The other two pair off, better seed hosting.
        assert_eq!(abbrev(&afc.divisional[1].home), Some("BUF"));
        assert_eq!(abbrev(&afc.divisional[1].away), Some("BAL"));
        assert!(afc.divisional.iter().all(|g| g.is_resolvable()));
        assert_eq!(afc.stage(), ConferenceStage::WildCardComplete);
    }

    #[test]
    fn upset_sweep_sends_best_surviving_seed_to_the_bye_team() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "MIA"); // 7
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "PIT"); // 6
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "CLE"); // 5
        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.divisional[0].away), Some("MIA")); // worst = 7
        assert_eq!(abbrev(&afc.divisional[1].home), Some("CLE")); // 5 hosts 6
        assert_eq!(abbrev(&afc.divisional[1].away), Some("PIT"));
    }

    #[test]
    fn divisional_winners_fill_championship_in_resolution_order() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");

        // Resolve the second divisional game first: its winner takes home.
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");
        let championship = &bracket.conference(Conference::Afc).championship;
        assert_eq!(abbrev(&championship.home), Some("BAL"));
        assert_eq!(abbrev(&championship.away), Some("KC"));
    }

    #[test]
    fn championship_winner_takes_fixed_title_side() {
        let mut bracket = seeded();
        // NFC resolves first, but still lands on the away side of the title game.
        pick(&mut bracket, SlotId::WildCard(Conference::Nfc, 0), "DAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Nfc, 1), "DET");
        pick(&mut bracket, SlotId::WildCard(Conference::Nfc, 2), "PHI");
        pick(&mut bracket, SlotId::Divisional(Conference::Nfc, 0), "SF");
        pick(&mut bracket, SlotId::Divisional(Conference::Nfc, 1), "DAL");
        pick(&mut bracket, SlotId::Championship(Conference::Nfc), "SF");

        assert!(bracket.title_game.home.is_none());
        assert_eq!(abbrev(&bracket.title_game.away), Some("SF"));
        assert!(!bracket.title_game.is_resolvable());
        assert_eq!(
            bracket.conference(Conference::Nfc).stage(),
            ConferenceStage::ChampionshipDecided
        );
    }

    #[test]
    fn select_rejects_unresolvable_slot() {
        let mut bracket = seeded();
        let kc = afc_field()[0].clone();
        let err = bracket
            .select_winner(SlotId::Divisional(Conference::Afc, 0), &kc)
            .unwrap_err();
        assert_eq!(err, SelectionError::NotResolvable(SlotId::Divisional(Conference::Afc, 0)));
        assert!(bracket.conference(Conference::Afc).divisional[0].winner.is_none());
    }

    #[test]
    fn select_rejects_team_not_in_slot() {
        let mut bracket = seeded();
        let kc = afc_field()[0].clone();
        let err = bracket
            .select_winner(SlotId::WildCard(Conference::Afc, 0), &kc)
            .unwrap_err();
        assert!(matches!(err, SelectionError::NotAParticipant { .. }));
    }

    #[test]
    fn select_rejects_unknown_slot_index() {
        let mut bracket = seeded();
        let buf = afc_field()[1].clone();
        let err = bracket
            .select_winner(SlotId::WildCard(Conference::Afc, 9), &buf)
            .unwrap_err();
        assert_eq!(err, SelectionError::UnknownSlot(SlotId::WildCard(Conference::Afc, 9)));
    }

    #[test]
    fn repicking_the_same_winner_keeps_downstream_picks() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");

        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.divisional[0].winner), Some("KC"));
        assert_eq!(abbrev(&afc.championship.home), Some("KC"));
    }

    #[test]
    fn changing_a_wild_card_pick_reseats_the_divisional_round() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BUF");
        pick(&mut bracket, SlotId::Championship(Conference::Afc), "KC");

        // Flip the 3v6 game to PIT: survivors are now {BUF 2, HOU 4, PIT 6}.
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "PIT");

        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.divisional[0].away), Some("PIT"));
        assert_eq!(abbrev(&afc.divisional[1].home), Some("BUF"));
        assert_eq!(abbrev(&afc.divisional[1].away), Some("HOU"));
        // Both divisional matchups changed, so both picks are gone...
        assert!(afc.divisional.iter().all(|g| g.winner.is_none()));
        // ...and everything they fed is cleared too.
        assert!(afc.championship.home.is_none());
        assert!(afc.championship.away.is_none());
        assert!(afc.championship.winner.is_none());
        assert!(bracket.title_game.home.is_none());
    }

    #[test]
    fn changing_a_wild_card_pick_preserves_unaffected_matchups() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BUF");

        // Flip the 4v5 game to CLE: only the bye matchup changes —
        // BUF/BAL still pair off in the second divisional slot.
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "CLE");

        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.divisional[0].away), Some("CLE"));
        assert!(afc.divisional[0].winner.is_none(), "stale KC pick must clear");
        assert_eq!(abbrev(&afc.divisional[1].winner), Some("BUF"), "untouched pick survives");
        // BUF keeps its championship berth; KC's side is vacated.
        assert_eq!(abbrev(&afc.championship.away), Some("BUF"));
        assert!(afc.championship.home.is_none());
    }

    #[test]
    fn changing_a_divisional_pick_replaces_the_championship_side_in_place() {
        let mut bracket = seeded();
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BUF");
        pick(&mut bracket, SlotId::Championship(Conference::Afc), "KC");

        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BAL");

        let afc = bracket.conference(Conference::Afc);
        assert_eq!(abbrev(&afc.championship.home), Some("KC"), "side order is stable");
        assert_eq!(abbrev(&afc.championship.away), Some("BAL"));
        assert!(afc.championship.winner.is_none(), "matchup changed, pick re-made");
        assert!(bracket.title_game.home.is_none());
    }

    #[test]
    fn changing_a_conference_champion_clears_only_the_title_pick() {
        let mut bracket = decided();
        assert_eq!(abbrev(&bracket.title_game.winner), Some("KC"));

        pick(&mut bracket, SlotId::Championship(Conference::Afc), "BUF");

        assert_eq!(abbrev(&bracket.title_game.home), Some("BUF"));
        assert_eq!(abbrev(&bracket.title_game.away), Some("SF"), "NFC side untouched");
        assert!(bracket.title_game.winner.is_none());
        assert_eq!(bracket.phase(), BracketPhase::Undecided);
    }

    #[test]
    fn reset_restores_the_post_seed_shape() {
        let mut bracket = decided();
        let before = bracket.conference(Conference::Afc).wild_card.clone();

        bracket.reset();

        for (_, slot) in bracket.slots() {
            assert!(slot.winner.is_none());
        }
        let afc = bracket.conference(Conference::Afc);
        for (original, now) in before.iter().zip(afc.wild_card.iter()) {
            assert_eq!(abbrev(&original.home), abbrev(&now.home));
            assert_eq!(abbrev(&original.away), abbrev(&now.away));
        }
        assert_eq!(abbrev(&afc.divisional[0].home), Some("KC"));
        assert!(afc.divisional[0].away.is_none());
        assert!(!afc.divisional[1].is_resolvable());
        assert!(!afc.championship.is_resolvable());
        assert!(!bracket.title_game.is_resolvable());
        assert_eq!(afc.stage(), ConferenceStage::Seeded);
        assert_eq!(bracket.phase(), BracketPhase::Undecided);
    }

    #[test]
    fn stage_walks_the_full_progression() {
        let mut bracket = Bracket::default();
        assert_eq!(bracket.conference(Conference::Afc).stage(), ConferenceStage::Empty);

        bracket.seed(Conference::Afc, &afc_field());
        assert_eq!(bracket.conference(Conference::Afc).stage(), ConferenceStage::Seeded);

        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        assert_eq!(
            bracket.conference(Conference::Afc).stage(),
            ConferenceStage::WildCardInProgress
        );

        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");
        assert_eq!(
            bracket.conference(Conference::Afc).stage(),
            ConferenceStage::WildCardComplete
        );

        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");
        assert_eq!(
            bracket.conference(Conference::Afc).stage(),
            ConferenceStage::DivisionalInProgress
        );

        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BUF");
        assert_eq!(
            bracket.conference(Conference::Afc).stage(),
            ConferenceStage::DivisionalComplete
        );

        pick(&mut bracket, SlotId::Championship(Conference::Afc), "KC");
        assert_eq!(
            bracket.conference(Conference::Afc).stage(),
            ConferenceStage::ChampionshipDecided
        );
    }

    #[test]
    fn champion_resolves_only_when_the_title_game_is_decided() {
        let bracket = seeded();
        assert!(bracket.champion().is_none());

        let bracket = decided();
        let champion = bracket.champion().expect("title game decided");
        assert_eq!(champion.abbrev, "KC");
        // The champion is one of the two conference champions.
        assert!(bracket.title_game.contains(&champion.id));
    }

    /// Full playoff run: seeds both conferences, picks every game, and checks
    /// each propagation along the way.
    fn decided() -> Bracket {
        let mut bracket = seeded();

        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 0), "BUF");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 1), "BAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Afc, 2), "HOU");
        {
            let afc = bracket.conference(Conference::Afc);
            assert_eq!(abbrev(&afc.divisional[0].away), Some("HOU"));
            assert_eq!(abbrev(&afc.divisional[1].home), Some("BUF"));
            assert_eq!(abbrev(&afc.divisional[1].away), Some("BAL"));
        }
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 0), "KC");
        pick(&mut bracket, SlotId::Divisional(Conference::Afc, 1), "BUF");
        {
            let championship = &bracket.conference(Conference::Afc).championship;
            assert_eq!(abbrev(&championship.home), Some("KC"));
            assert_eq!(abbrev(&championship.away), Some("BUF"));
        }
        pick(&mut bracket, SlotId::Championship(Conference::Afc), "KC");

        pick(&mut bracket, SlotId::WildCard(Conference::Nfc, 0), "DAL");
        pick(&mut bracket, SlotId::WildCard(Conference::Nfc, 1), "DET");
        pick(&mut bracket, SlotId::WildCard(Conference::Nfc, 2), "PHI");
        pick(&mut bracket, SlotId::Divisional(Conference::Nfc, 0), "SF");
        pick(&mut bracket, SlotId::Divisional(Conference::Nfc, 1), "DAL");
        pick(&mut bracket, SlotId::Championship(Conference::Nfc), "SF");

        assert_eq!(abbrev(&bracket.title_game.home), Some("KC"));
        assert_eq!(abbrev(&bracket.title_game.away), Some("SF"));
        pick(&mut bracket, SlotId::TitleGame, "KC");
        bracket
    }
}
