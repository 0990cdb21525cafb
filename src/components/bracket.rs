use nfl_api::bracket::{ConferenceBracket, GameSlot, PlayoffRound};
use nfl_api::Team;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::components::banner_frames::{BannerColor, BannerTheme, resolve};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per game cell: home-team line, status line, away-team line.
pub const GAME_HEIGHT: u16 = 3;

/// Total rows for one conference pane: three wild card cells with a blank
/// row between each (centers 1, 5, 9 → rows 0..=10).
pub const PANE_HEIGHT: u16 = 11;

/// Blank columns between adjacent round columns.
const COLUMN_GAP: u16 = 3;

/// Maximum game cell width in wider terminals.
const CELL_W_FULL: u16 = 24;

/// Cell center rows per round column. The divisional and championship cells
/// sit between their feeder rows; no connector lines are drawn because the
/// divisional round is re-seeded, not a fixed binary tree.
const WILD_CARD_CENTERS: [u16; 3] = [1, 5, 9];
const DIVISIONAL_CENTERS: [u16; 2] = [3, 7];
const CHAMPIONSHIP_CENTERS: [u16; 1] = [5];

// ---------------------------------------------------------------------------
// ConferenceGrid — layout for one conference pane
// ---------------------------------------------------------------------------

/// Pre-computed column layout for one conference pane:
/// Wild Card | Divisional | Championship (mirrored for the right-hand pane,
/// so both conferences read inward toward the centered title game).
#[derive(Debug, Clone)]
pub struct ConferenceGrid {
    /// Starting x-column (pane-relative) for each round column.
    /// Index: [0=WildCard, 1=Divisional, 2=Championship].
    pub round_cols: [u16; 3],
    pub cell_width: u16,
    pub mirrored: bool,
}

impl ConferenceGrid {
    pub fn compute(pane_width: u16) -> Self {
        Self::compute_inner(pane_width, false)
    }

    /// Championship on the left, wild card on the right.
    pub fn compute_mirrored(pane_width: u16) -> Self {
        Self::compute_inner(pane_width, true)
    }

    fn compute_inner(pane_width: u16, mirrored: bool) -> Self {
        let per_col = pane_width.saturating_sub(COLUMN_GAP * 2) / 3;
        let cell_width = per_col.max(1).min(CELL_W_FULL);
        let stride = cell_width + COLUMN_GAP;
        let round_cols = if mirrored {
            [stride * 2, stride, 0u16]
        } else {
            [0u16, stride, stride * 2]
        };
        Self { round_cols, cell_width, mirrored }
    }

    pub fn centers(depth: usize) -> &'static [u16] {
        match depth {
            0 => &WILD_CARD_CENTERS,
            1 => &DIVISIONAL_CENTERS,
            _ => &CHAMPIONSHIP_CENTERS,
        }
    }
}

// ---------------------------------------------------------------------------
// ConferenceBracketView widget
// ---------------------------------------------------------------------------

/// Renders one conference's three playoff rounds as a column grid.
pub struct ConferenceBracketView<'a> {
    pub bracket: &'a ConferenceBracket,
    pub grid: &'a ConferenceGrid,
    /// Highlighted (round, slot) when the cursor is inside this conference.
    pub cursor: Option<(PlayoffRound, usize)>,
    pub theme: BannerTheme,
}

impl<'a> Widget for ConferenceBracketView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 12 || area.height < GAME_HEIGHT {
            return;
        }

        let rounds: [(&[GameSlot], PlayoffRound); 3] = [
            (&self.bracket.wild_card, PlayoffRound::WildCard),
            (&self.bracket.divisional, PlayoffRound::Divisional),
            (std::slice::from_ref(&self.bracket.championship), PlayoffRound::Championship),
        ];

        for (depth, (slots, round)) in rounds.into_iter().enumerate() {
            let centers = ConferenceGrid::centers(depth);
            for (idx, slot) in slots.iter().enumerate() {
                let selected = self.cursor == Some((round, idx));
                draw_slot_cell(
                    slot,
                    area.x + self.grid.round_cols[depth],
                    area.y,
                    centers[idx],
                    self.grid.cell_width,
                    selected,
                    self.theme,
                    area,
                    buf,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TitleGameView widget
// ---------------------------------------------------------------------------

/// The centered title-game panel: AFC champion over NFC champion, with the
/// predicted champion called out underneath once the slot is decided.
pub struct TitleGameView<'a> {
    pub slot: &'a GameSlot,
    pub selected: bool,
    pub theme: BannerTheme,
}

impl<'a> Widget for TitleGameView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 14 || area.height < GAME_HEIGHT + 1 {
            return;
        }

        let accent = resolve(BannerColor::Accent, self.theme);
        let title = "── SUPER BOWL ──";
        let tx = area.x + area.width.saturating_sub(title.chars().count() as u16) / 2;
        buf.set_string(tx, area.y, title, accent);

        let cell_width = area.width.saturating_sub(2).min(CELL_W_FULL);
        let cx = area.x + area.width.saturating_sub(cell_width) / 2;
        draw_slot_cell(
            self.slot,
            cx,
            area.y + 1,
            1,
            cell_width,
            self.selected,
            self.theme,
            area,
            buf,
        );

        if let Some(champion) = &self.slot.winner {
            let line = format!("★ {} ★", champion.name);
            let lx = area.x + area.width.saturating_sub(line.chars().count() as u16) / 2;
            if area.height > GAME_HEIGHT + 2 {
                buf.set_string(
                    lx,
                    area.y + GAME_HEIGHT + 2,
                    line,
                    resolve(BannerColor::Winner, self.theme),
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

/// Draw one 3-row slot cell with clipping against the pane area.
#[allow(clippy::too_many_arguments)]
fn draw_slot_cell(
    slot: &GameSlot,
    x: u16,
    origin_y: u16,
    center_row: u16,
    cell_width: u16,
    selected: bool,
    theme: BannerTheme,
    area: Rect,
    buf: &mut Buffer,
) {
    if x >= area.x + area.width {
        return;
    }
    let avail_w = (area.x + area.width).saturating_sub(x) as usize;
    let width = (cell_width as usize).min(avail_w);

    let base_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let dim = resolve(BannerColor::Dim, theme);
    let winner_style = resolve(BannerColor::Winner, theme);

    let rows = [
        (center_row.saturating_sub(1), RowKind::Home),
        (center_row, RowKind::Status),
        (center_row.saturating_add(1), RowKind::Away),
    ];
    for (row, kind) in rows {
        let y = origin_y + row;
        if y >= area.y + area.height {
            continue;
        }
        let (text, is_winner) = match kind {
            RowKind::Home => {
                let won = side_won(slot.home.as_ref(), slot.winner.as_ref());
                (format_team_row(slot.home.as_ref(), won, width), won)
            }
            RowKind::Away => {
                let won = side_won(slot.away.as_ref(), slot.winner.as_ref());
                (format_team_row(slot.away.as_ref(), won, width), won)
            }
            RowKind::Status => (format_status_row(slot, width), false),
        };
        let style = match kind {
            RowKind::Status => dim,
            _ if is_winner => winner_style.add_modifier(Modifier::BOLD),
            _ => base_style,
        };
        buf.set_string(x, y, &text, style);
    }
}

enum RowKind {
    Home,
    Status,
    Away,
}

fn side_won(side: Option<&Team>, winner: Option<&Team>) -> bool {
    match (side, winner) {
        (Some(team), Some(winner)) => team.id == winner.id,
        _ => false,
    }
}

/// Format a team line: `"{seed} {abbrev} {location}  ✓"`, exactly `width` wide.
fn format_team_row(team: Option<&Team>, is_winner: bool, width: usize) -> String {
    let Some(team) = team else {
        let placeholder = " --  TBD";
        let clipped: String = placeholder.chars().take(width).collect();
        return format!("{clipped:<width$}");
    };
    let seed = format!("{:>2}", team.playoff_seed);
    let marker = if is_winner { '✓' } else { ' ' };
    // seed(2) + sp + name + sp + marker + sp = width
    let name_w = width.saturating_sub(6);
    let full = format!("{} {}", team.abbrev, team.location);
    let name: String = full.chars().take(name_w).collect();
    format!("{seed} {name:<name_w$} {marker} ")
}

fn format_status_row(slot: &GameSlot, width: usize) -> String {
    let raw = if let Some(winner) = &slot.winner {
        format!("   -> {}", winner.abbrev)
    } else if slot.is_resolvable() {
        "   vs".to_string()
    } else {
        "   awaiting".to_string()
    };
    let clipped: String = raw.chars().take(width).collect();
    format!("{clipped:<width$}")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nfl_api::Conference;

    fn team(abbrev: &str, seed: u8) -> Team {
        Team {
            id: abbrev.to_ascii_lowercase(),
            abbrev: abbrev.into(),
            name: abbrev.into(),
            location: "Kansas City".into(),
            conference: Conference::Afc,
            playoff_seed: seed,
            ..Team::default()
        }
    }

    #[test]
    fn pane_height_covers_the_wild_card_column() {
        let last_center = *WILD_CARD_CENTERS.last().unwrap();
        assert_eq!(PANE_HEIGHT, last_center + 2);
    }

    #[test]
    fn centers_sit_between_their_feeder_rows() {
        assert_eq!(ConferenceGrid::centers(0), &[1, 5, 9]);
        assert_eq!(ConferenceGrid::centers(1), &[3, 7]);
        assert_eq!(ConferenceGrid::centers(2), &[5]);
    }

    #[test]
    fn grid_columns_read_left_to_right() {
        let grid = ConferenceGrid::compute(80);
        let stride = grid.cell_width + 3;
        assert_eq!(grid.round_cols, [0, stride, stride * 2]);
        assert!(!grid.mirrored);
    }

    #[test]
    fn mirrored_grid_reads_inward_from_the_right() {
        let grid = ConferenceGrid::compute_mirrored(80);
        let stride = grid.cell_width + 3;
        assert_eq!(grid.round_cols, [stride * 2, stride, 0]);
        assert!(grid.mirrored);
    }

    #[test]
    fn cell_width_caps_at_full_width_limit() {
        let grid = ConferenceGrid::compute(200);
        assert_eq!(grid.cell_width, CELL_W_FULL);
        let narrow = ConferenceGrid::compute(36);
        assert_eq!(narrow.cell_width, 10);
    }

    #[test]
    fn team_row_is_exactly_cell_width() {
        let kc = team("KC", 1);
        let line = format_team_row(Some(&kc), true, 20);
        assert_eq!(line.chars().count(), 20, "line: {line:?}");
        assert!(line.contains('✓'));
        let tbd = format_team_row(None, false, 20);
        assert_eq!(tbd.chars().count(), 20);
        assert!(tbd.contains("TBD"));
    }

    #[test]
    fn status_row_reflects_slot_state() {
        let kc = team("KC", 1);
        let mia = team("MIA", 7);
        let mut slot = GameSlot::default();
        assert!(format_status_row(&slot, 16).contains("awaiting"));
        slot.home = Some(kc.clone());
        slot.away = Some(mia);
        assert!(format_status_row(&slot, 16).contains("vs"));
        slot.winner = Some(kc);
        assert!(format_status_row(&slot, 16).contains("-> KC"));
    }
}
