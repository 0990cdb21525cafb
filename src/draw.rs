use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::components::banner::AnimatedBanner;
use crate::components::banner_frames::{BannerTheme, round_label};
use crate::components::bracket::{
    ConferenceBracketView, ConferenceGrid, PANE_HEIGHT, TitleGameView,
};
use crate::state::app_state::SubmissionPhase;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nfl_api::bracket::PlayoffRound;
use nfl_api::{Conference, GameStatus, PlayoffField, ScoreGame, Team};

static TABS: &[&str; 6] = &[
    "Standings",
    "Scoreboard",
    "Bracket",
    "Leaderboard",
    "My Brackets",
    "Game Detail",
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            if app.state.show_intro {
                draw_intro(f, f.area(), app);
                return;
            }

            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Standings => draw_standings(f, layout.main, app),
                MenuItem::Scoreboard => draw_scoreboard(f, layout.main, app),
                MenuItem::Bracket => draw_bracket(f, layout.main, app),
                MenuItem::Leaderboard => draw_leaderboard(f, layout.main, app),
                MenuItem::MyBrackets => draw_my_brackets(f, layout.main, app),
                MenuItem::GameDetail => draw_game_detail(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }

            draw_status_strip(f, layout.status, app);

            if app.state.active_tab == MenuItem::Bracket {
                if app.state.bracket.show_celebration {
                    draw_celebration(f, f.area(), app);
                }
                if app.state.bracket.submission.active {
                    draw_submission(f, f.area(), app);
                }
            }

            if app.state.show_logs {
                draw_logs(f, layout.main);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" gridtui ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, banner_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            theme: BannerTheme::Dark,
            headline: format!("NFL PLAYOFFS {}", app.state.season),
            subtitle: "STANDINGS · SCORES · BRACKET".into(),
        },
        banner_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to get started")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Standings => 0,
        MenuItem::Scoreboard => 1,
        MenuItem::Bracket => 2,
        MenuItem::Leaderboard => 3,
        MenuItem::MyBrackets => 4,
        MenuItem::GameDetail => 5,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let standings = &app.state.standings;
    let block = default_border(Color::White)
        .title(format!(" Standings — {} Season ", standings.season));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if standings.teams.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Standings load failed:\n{err}")
        } else {
            "Loading standings...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [header, key_legend, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(Paragraph::new(standings.sort_by.label()), header);
    f.render_widget(
        Paragraph::new("Keys: j/k=scroll  o=sort  [ ]=season  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let mut list_area = content;
    let mut side_area: Option<Rect> = None;
    if content.width >= 96 {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .areas(content);
        list_area = left;
        side_area = Some(right);
    }

    draw_standings_list(f, list_area, app);
    if let Some(side) = side_area {
        draw_conference_tables(f, side, app);
    }
}

fn draw_standings_list(f: &mut Frame, area: Rect, app: &App) {
    let standings = &app.state.standings;
    let sorted = standings.sorted_teams();
    let visible = area.height as usize;
    let offset = (standings.scroll_offset as usize).min(sorted.len().saturating_sub(1));

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    for (idx, team) in sorted.iter().enumerate().skip(offset).take(visible) {
        let rank = idx + 1;
        // Top 7 of a conference are in; the rest of the league is chasing.
        let rank_style = if team.playoff_seed > 0 && team.playoff_seed <= 7 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        let diff_style = if team.point_differential >= 0 {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        let division = team.division.as_deref().unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled(format!("{rank:>2} "), rank_style),
            Span::styled(
                format!("{:<4}", team.abbrev),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:<26}", clip(&team.name, 25))),
            Span::styled(
                format!("{:<4}", team.conference.abbrev()),
                if team.conference == Conference::Afc {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Blue)
                },
            ),
            Span::raw(format!("{:<10}", clip(division, 9))),
            Span::raw(format!("{:>7}", team.record())),
            Span::raw(format!("{:>7.1}%", team.win_percent * 100.0)),
            Span::styled(format!("{:>6}", team.differential_label()), diff_style),
            Span::styled(format!("  seed {}", team.playoff_seed), Style::default().fg(Color::DarkGray)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_conference_tables(f: &mut Frame, area: Rect, app: &App) {
    let [afc_area, nfc_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    for (conference, pane) in [(Conference::Afc, afc_area), (Conference::Nfc, nfc_area)] {
        let color = if conference == Conference::Afc { Color::Red } else { Color::Blue };
        let block = default_border(color).title(format!(" {} ", conference.label()));
        let inner = block.inner(pane);
        f.render_widget(block, pane);

        let table = app.state.standings.conference_table(conference);
        let mut lines: Vec<Line> = Vec::new();
        for team in table.iter().take(inner.height as usize) {
            let marker_style = if team.playoff_seed <= 7 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:>2} ", team.playoff_seed), marker_style),
                Span::raw(format!("{:<22}", clip(&team.name, 21))),
                Span::raw(format!("{:>6}", team.record())),
            ]));
        }
        f.render_widget(Paragraph::new(lines), inner);
    }
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App) {
    let scoreboard = &app.state.scoreboard;
    let block = default_border(Color::White)
        .title(format!(" Week {} Games ", scoreboard.week));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: h/l=week  j/k=move  Enter=details  r=refresh")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if scoreboard.games.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Scoreboard load failed:\n{err}")
        } else {
            "No games loaded for this week yet".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (idx, game) in scoreboard.games.iter().enumerate() {
        let marker = if idx == scoreboard.selected { ">" } else { " " };
        let row_style = if idx == scoreboard.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let status_style = match game.status {
            GameStatus::InProgress => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            GameStatus::Final => Style::default().fg(Color::Green),
            _ => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} "), row_style),
            Span::styled(format_matchup(game), row_style),
            Span::styled(format!("  [{}]", format_game_status(game)), status_style),
        ]));
    }

    let visible = content.height as usize;
    let offset = scoreboard.selected.saturating_sub(visible.saturating_sub(1));
    let window: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
    f.render_widget(Paragraph::new(window), content);
}

fn format_matchup(game: &ScoreGame) -> String {
    let away_score = game.away.score.map_or("--".into(), |s| s.to_string());
    let home_score = game.home.score.map_or("--".into(), |s| s.to_string());
    format!(
        "{:>4} {:>2} @ {:<4}{:>2}",
        game.away.abbrev, away_score, game.home.abbrev, home_score
    )
}

fn format_game_status(game: &ScoreGame) -> String {
    match game.status {
        GameStatus::InProgress => {
            let quarter = game.period.map(|p| format!("Q{p}")).unwrap_or_default();
            let clock = game.clock.as_deref().unwrap_or("");
            format!("{quarter} {clock}").trim().to_string()
        }
        GameStatus::Final => {
            if game.status_text.is_empty() {
                "FINAL".to_string()
            } else {
                game.status_text.clone()
            }
        }
        GameStatus::Postponed => "PPD".to_string(),
        GameStatus::Scheduled => {
            if game.status_text.is_empty() {
                game.start_time
                    .map(|t| t.format("%a %I:%M %p").to_string())
                    .unwrap_or_else(|| "Scheduled".to_string())
            } else {
                game.status_text.clone()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Game detail
// ---------------------------------------------------------------------------

fn draw_game_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(detail) = app.state.game_detail.detail.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Load failed:\n{err}")
        } else {
            "Select a game on the Scoreboard and press Enter".to_string()
        };
        f.render_widget(Paragraph::new(msg), inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} at {}", detail.away.name, detail.home.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   (Esc back, j/k scroll)", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    // Side-by-side team stat lines: label | away | home.
    let pairs = detail.away.lines.iter().zip(detail.home.lines.iter());
    for (away_line, home_line) in pairs {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", clip(&away_line.label, 23)), Style::default().fg(Color::Gray)),
            Span::raw(format!("{:>10}", away_line.value)),
            Span::raw(format!("{:>10}", home_line.value)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Scoring Plays",
        Style::default().fg(Color::Yellow),
    )));
    for play in &detail.scoring_plays {
        let team = play.team_abbrev.as_deref().unwrap_or("---");
        lines.push(Line::from(format!(
            "Q{} {:>5}  {:>3}  {:>2}-{:<2}  {}",
            play.period, play.clock, team, play.away_score, play.home_score, play.description
        )));
    }

    let visible = inner.height as usize;
    let offset = (app.state.game_detail.scroll_offset as usize)
        .min(lines.len().saturating_sub(1));
    let window: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
    f.render_widget(Paragraph::new(window), inner);
}

// ---------------------------------------------------------------------------
// Bracket builder
// ---------------------------------------------------------------------------

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Bracket Builder ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let ui = &app.state.bracket;
    if !ui.bracket.is_seeded() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Playoff field unavailable:\n{err}")
        } else {
            "Waiting for the playoff field...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [header, key_legend, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let cursor = ui.cursor;
    let focus = if cursor.round == PlayoffRound::TitleGame {
        "SUPER BOWL".to_string()
    } else {
        format!("{} {}", cursor.conference.abbrev(), round_label(cursor.round))
    };
    f.render_widget(
        Paragraph::new(format!("{} Season  |  {}", app.state.season, focus)),
        header,
    );
    f.render_widget(
        Paragraph::new("Keys: h/l=round  j/k=game  c=conference  t/b=pick home/away  x=clear  s=submit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if content.width >= 100 {
        let [afc_pane, title_pane, nfc_pane] = Layout::horizontal([
            Constraint::Fill(2),
            Constraint::Length(30),
            Constraint::Fill(2),
        ])
        .areas(content);
        draw_conference_pane(f, afc_pane, app, Conference::Afc, false);
        draw_title_pane(f, title_pane, app);
        draw_conference_pane(f, nfc_pane, app, Conference::Nfc, true);

        // Room to spare: show the qualified field under the title column.
        if let Some(field) = ui.field.as_ref() {
            let used = PANE_HEIGHT + 3;
            if title_pane.height > used + 4 {
                let picture = Rect::new(
                    title_pane.x,
                    title_pane.y + used,
                    title_pane.width,
                    title_pane.height - used,
                );
                draw_playoff_picture(f, picture, field);
            }
        }
    } else {
        let pane_height = PANE_HEIGHT + 3;
        let [afc_pane, title_pane, nfc_pane] = Layout::vertical([
            Constraint::Length(pane_height),
            Constraint::Length(6),
            Constraint::Length(pane_height),
        ])
        .areas(content);
        draw_conference_pane(f, afc_pane, app, Conference::Afc, false);
        draw_title_pane(f, title_pane, app);
        draw_conference_pane(f, nfc_pane, app, Conference::Nfc, false);
    }
}

fn draw_conference_pane(
    f: &mut Frame,
    pane: Rect,
    app: &App,
    conference: Conference,
    mirrored: bool,
) {
    let ui = &app.state.bracket;
    let cursor = ui.cursor;
    let focused = cursor.conference == conference && cursor.round != PlayoffRound::TitleGame;

    let color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = default_border(color).title(format!(" {} ", conference.abbrev()));
    let inner = block.inner(pane);
    f.render_widget(block, pane);
    if inner.height < 2 {
        return;
    }

    let grid = if mirrored {
        ConferenceGrid::compute_mirrored(inner.width)
    } else {
        ConferenceGrid::compute(inner.width)
    };

    // Round labels over each column.
    let labels = ["WILD CARD", "DIVISIONAL", "CHAMPIONSHIP"];
    for (depth, label) in labels.iter().enumerate() {
        let clipped = clip(label, grid.cell_width as usize);
        let x = inner.x + grid.round_cols[depth];
        if x < inner.x + inner.width {
            f.render_widget(
                Paragraph::new(clipped).style(Style::default().fg(Color::DarkGray)),
                Rect::new(x, inner.y, grid.cell_width.min(inner.width), 1),
            );
        }
    }

    let grid_area = Rect::new(
        inner.x,
        inner.y + 1,
        inner.width,
        inner.height.saturating_sub(1),
    );
    f.render_widget(
        ConferenceBracketView {
            bracket: ui.bracket.conference(conference),
            grid: &grid,
            cursor: focused.then_some((cursor.round, cursor.slot)),
            theme: BannerTheme::Dark,
        },
        grid_area,
    );
}

fn draw_title_pane(f: &mut Frame, pane: Rect, app: &App) {
    let ui = &app.state.bracket;
    let selected = ui.cursor.round == PlayoffRound::TitleGame;
    let color = if selected { Color::Yellow } else { Color::DarkGray };
    let block = default_border(color);
    let inner = block.inner(pane);
    f.render_widget(block, pane);

    f.render_widget(
        TitleGameView { slot: &ui.bracket.title_game, selected, theme: BannerTheme::Dark },
        inner,
    );
}

fn draw_playoff_picture(f: &mut Frame, area: Rect, field: &PlayoffField) {
    let block = default_border(Color::DarkGray).title(" Playoff Picture ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for conference in Conference::BOTH {
        lines.push(Line::from(Span::styled(
            conference.abbrev(),
            Style::default().fg(Color::Yellow),
        )));
        for team in field.teams(conference) {
            let tag = match team.playoff_seed {
                1 => "bye",
                7 => "wild card",
                _ => "",
            };
            lines.push(Line::from(format!(
                " {} {:<14}{:>6}  {}",
                team.playoff_seed,
                clip(&team.location, 13),
                team.record(),
                tag
            )));
        }
    }
    let visible = inner.height as usize;
    f.render_widget(
        Paragraph::new(lines.into_iter().take(visible).collect::<Vec<_>>()),
        inner,
    );
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

fn draw_leaderboard(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White)
        .title(format!(" Leaderboard — {} ", app.state.season));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let leaderboard = &app.state.leaderboard;
    if leaderboard.entries.is_empty() {
        let msg = if !leaderboard.loaded {
            "Loading leaderboard...".to_string()
        } else {
            "No brackets submitted yet. Be the first!".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "{:>4}  {:<20}{:<22}{:>6}  {:>7}",
            "Rank", "Player", "Bracket", "Score", "Picks"
        ),
        Style::default().fg(Color::DarkGray),
    )));
    for (idx, entry) in leaderboard.entries.iter().enumerate() {
        let position = idx + 1;
        let rank_style = match position {
            1 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            2 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            3 => Style::default().fg(Color::Rgb(205, 127, 50)),
            _ => Style::default().fg(Color::Gray),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>4}  ", format!("#{position}")), rank_style),
            Span::raw(format!("{:<20}", clip(&entry.display_name, 19))),
            Span::raw(format!("{:<22}", clip(&entry.bracket_name, 21))),
            Span::styled(
                format!("{:>6}", entry.total_score),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("  {:>3}/{:<3}", entry.correct_picks, entry.total_picks),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let visible = inner.height as usize;
    let offset = leaderboard.scroll_offset as usize;
    let window: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
    f.render_widget(Paragraph::new(window), inner);
}

// ---------------------------------------------------------------------------
// My brackets
// ---------------------------------------------------------------------------

fn draw_my_brackets(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" My Brackets ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.signed_in.is_none() {
        f.render_widget(
            Paragraph::new("Sign in to see your brackets:\nset GRIDTUI_API_TOKEN and GRIDTUI_USER, then restart.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mine = &app.state.my_brackets;
    if mine.brackets.is_empty() {
        let msg = if !mine.loaded {
            "Loading your brackets...".to_string()
        } else {
            "No brackets yet — build one on the Bracket tab.".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Keys: j/k=move  d=delete (press twice)  r=refresh",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    for (idx, bracket) in mine.brackets.iter().enumerate() {
        let marker = if idx == mine.selected { ">" } else { " " };
        let style = if idx == mine.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let champion = bracket
            .champion()
            .map(|t| t.abbrev.clone())
            .unwrap_or_else(|| "---".into());
        let score = bracket
            .total_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "--".into());
        let created = bracket.created_at.as_deref().unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {:<22}", clip(&bracket.bracket_name, 20)), style),
            Span::raw(format!("champ {:<5}", champion)),
            Span::raw(format!("score {:<6}", score)),
            Span::styled(clip(created, 20), Style::default().fg(Color::DarkGray)),
        ]));
        if mine.pending_delete == Some(bracket.id) && idx == mine.selected {
            lines.push(Line::from(Span::styled(
                "    press d again to delete — this cannot be undone",
                Style::default().fg(Color::Red),
            )));
        }
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_celebration(f: &mut Frame, area: Rect, app: &App) {
    let Some(champion) = app.state.bracket.bracket.champion() else {
        return;
    };
    let popup = centered_rect(area, 72, 16);
    f.render_widget(Clear, popup);

    let block = default_border(Color::Yellow).title(" Congratulations! ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let [banner_area, summary_area, hint_area] = Layout::vertical([
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            theme: BannerTheme::Dark,
            headline: "CHAMPIONS".into(),
            subtitle: format!("{} WIN IT ALL", champion.name.to_uppercase()),
        },
        banner_area,
    );

    let bracket = &app.state.bracket.bracket;
    let afc = slot_winner_label(bracket.conference(Conference::Afc).championship.winner.as_ref());
    let nfc = slot_winner_label(bracket.conference(Conference::Nfc).championship.winner.as_ref());
    f.render_widget(
        Paragraph::new(format!(
            "You have the {} going all the way!\nAFC champion: {afc}    NFC champion: {nfc}",
            champion.name
        ))
        .alignment(Alignment::Center),
        summary_area,
    );
    f.render_widget(
        Paragraph::new("s = submit bracket    Esc = view full bracket")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        hint_area,
    );
}

fn slot_winner_label(winner: Option<&Team>) -> String {
    winner.map(|t| t.abbrev.clone()).unwrap_or_else(|| "TBD".into())
}

fn draw_submission(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered_rect(area, 56, 14);
    f.render_widget(Clear, popup);

    let block = default_border(Color::White).title(" Submit Your Bracket ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let submission = &app.state.bracket.submission;
    let bracket = &app.state.bracket.bracket;

    let mut lines: Vec<Line> = Vec::new();
    match app.state.signed_in.as_deref() {
        Some(name) => lines.push(Line::from(vec![
            Span::styled("Submitting as: ", Style::default().fg(Color::DarkGray)),
            Span::styled(name.to_owned(), Style::default().fg(Color::Green)),
        ])),
        None => lines.push(Line::from(Span::styled(
            "Not signed in — set GRIDTUI_API_TOKEN first",
            Style::default().fg(Color::Red),
        ))),
    }
    lines.push(Line::from(""));

    let count = submission.name.chars().count();
    let counter_style = if count >= 20 {
        Style::default().fg(Color::Red)
    } else if count > 15 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::raw("Name: "),
        Span::styled(
            format!("{}_", submission.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({count}/20)"), counter_style),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(format!(
        "Super Bowl winner: {}",
        slot_winner_label(bracket.champion())
    )));
    lines.push(Line::from(format!(
        "AFC champion: {}    NFC champion: {}",
        slot_winner_label(bracket.conference(Conference::Afc).championship.winner.as_ref()),
        slot_winner_label(bracket.conference(Conference::Nfc).championship.winner.as_ref()),
    )));
    lines.push(Line::from(""));

    match &submission.phase {
        SubmissionPhase::Editing => lines.push(Line::from(Span::styled(
            "Enter=submit   Tab=random name   Esc=cancel",
            Style::default().fg(Color::DarkGray),
        ))),
        SubmissionPhase::InFlight => lines.push(Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow),
        ))),
        SubmissionPhase::Accepted => {
            lines.push(Line::from(Span::styled(
                format!("Bracket \"{}\" saved. Check the leaderboard!", submission.name),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "Press any key to close",
                Style::default().fg(Color::DarkGray),
            )));
        }
        SubmissionPhase::Conflict(message) => {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(Span::styled(
                "Delete your existing bracket under My Brackets first.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Shared chrome
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    draw_placeholder(
        f,
        area,
        "Help: q=quit  1-5=tabs  ?=help  f=fullscreen  \"=logs\n\
         Standings: j/k scroll, o sort, [ ] season\n\
         Scoreboard: h/l week, j/k move, Enter details\n\
         Bracket: h/l round, j/k game, c conference, t/b pick, x clear, s submit\n\
         My Brackets: d delete (twice)",
    );
}

fn draw_status_strip(f: &mut Frame, area: Rect, app: &App) {
    if let Some(err) = app.state.last_error.as_deref() {
        f.render_widget(
            Paragraph::new(clip(err, area.width as usize)).style(Style::default().fg(Color::Red)),
            area,
        );
    } else if let Some(status) = app.state.status_line.as_deref() {
        f.render_widget(
            Paragraph::new(clip(status, area.width as usize))
                .style(Style::default().fg(Color::Gray)),
            area,
        );
    }
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let height = area.height.min(12);
    let strip = Rect::new(area.x, area.y + area.height - height, area.width, height);
    f.render_widget(Clear, strip);
    f.render_widget(
        tui_logger::TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs ")),
        strip,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(w)) / 2,
        area.y + (area.height.saturating_sub(h)) / 2,
        w,
        h,
    )
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
