use crate::app::{App, MenuItem};
use crate::state::app_state::SubmissionPhase;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut pending: Vec<NetworkRequest> = Vec::new();

    if guard.state.show_intro {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) => guard.dismiss_intro(),
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            _ => {}
        }
        return;
    }

    // The submission dialog captures all typing before any global binding.
    if guard.state.active_tab == MenuItem::Bracket && guard.state.bracket.submission.active {
        if guard.state.bracket.submission.phase == SubmissionPhase::Accepted {
            guard.cancel_submission();
            return;
        }
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Esc, _) => guard.cancel_submission(),
            (KeyCode::Enter, _) => {
                if let Some(request) = guard.submission_request() {
                    pending.push(request);
                }
            }
            (KeyCode::Tab, _) => guard.state.bracket.submission.randomize(),
            (KeyCode::Backspace, _) => guard.state.bracket.submission.backspace(),
            (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                guard.state.bracket.submission.push_char(c)
            }
            _ => {}
        }
        drop(guard);
        send_all(pending, network_requests).await;
        return;
    }

    // Champion celebration overlay.
    if guard.state.active_tab == MenuItem::Bracket && guard.state.bracket.show_celebration {
        match (key_event.code, key_event.modifiers) {
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (Char('s'), _) => guard.open_submission(),
            (KeyCode::Enter | KeyCode::Esc, _) => guard.close_celebration(),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => switch_tab(&mut guard, MenuItem::Standings, &mut pending),
        (_, Char('2'), _) => switch_tab(&mut guard, MenuItem::Scoreboard, &mut pending),
        (_, Char('3'), _) => switch_tab(&mut guard, MenuItem::Bracket, &mut pending),
        (_, Char('4'), _) => switch_tab(&mut guard, MenuItem::Leaderboard, &mut pending),
        (_, Char('5'), _) => switch_tab(&mut guard, MenuItem::MyBrackets, &mut pending),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Standings: scroll, sort mode, season year
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => guard.state.standings.scroll_down(),
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => guard.state.standings.scroll_up(),
        (MenuItem::Standings, Char('o'), _) => guard.state.standings.cycle_sort(),
        (MenuItem::Standings, Char('['), _) => {
            if guard.state.standings.season_prev() {
                pending.push(NetworkRequest::LoadStandings {
                    season: guard.state.standings.season,
                });
            }
        }
        (MenuItem::Standings, Char(']'), _) => {
            if guard.state.standings.season_next() {
                pending.push(NetworkRequest::LoadStandings {
                    season: guard.state.standings.season,
                });
            }
        }

        // Scoreboard: week navigation and game detail
        (MenuItem::Scoreboard, Char('h') | KeyCode::Left, _) => {
            if guard.state.scoreboard.week_prev() {
                pending.push(NetworkRequest::LoadScoreboard {
                    season: guard.state.season,
                    week: guard.state.scoreboard.week,
                });
            }
        }
        (MenuItem::Scoreboard, Char('l') | KeyCode::Right, _) => {
            if guard.state.scoreboard.week_next() {
                pending.push(NetworkRequest::LoadScoreboard {
                    season: guard.state.season,
                    week: guard.state.scoreboard.week,
                });
            }
        }
        (MenuItem::Scoreboard, Char('j') | KeyCode::Down, _) => guard.state.scoreboard.select_down(),
        (MenuItem::Scoreboard, Char('k') | KeyCode::Up, _) => guard.state.scoreboard.select_up(),
        (MenuItem::Scoreboard, Char('r'), _) => {
            pending.push(NetworkRequest::LoadScoreboard {
                season: guard.state.season,
                week: guard.state.scoreboard.week,
            });
        }
        (MenuItem::Scoreboard, KeyCode::Enter, _) => {
            if let Some(event_id) = guard.scoreboard_open_detail() {
                pending.push(NetworkRequest::LoadGameDetail { event_id });
            }
        }

        // Game detail navigation
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => {
            guard.state.game_detail.scroll_offset =
                guard.state.game_detail.scroll_offset.saturating_add(1);
        }
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => {
            guard.state.game_detail.scroll_offset =
                guard.state.game_detail.scroll_offset.saturating_sub(1);
        }
        (MenuItem::GameDetail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Scoreboard),

        // Bracket builder
        (MenuItem::Bracket, Char('h') | KeyCode::Left, _) => guard.bracket_round_prev(),
        (MenuItem::Bracket, Char('l') | KeyCode::Right, _) => guard.bracket_round_next(),
        (MenuItem::Bracket, Char('j') | KeyCode::Down, _) => guard.bracket_slot_down(),
        (MenuItem::Bracket, Char('k') | KeyCode::Up, _) => guard.bracket_slot_up(),
        (MenuItem::Bracket, Char('c'), KeyModifiers::NONE) => guard.bracket_toggle_conference(),
        (MenuItem::Bracket, Char('t'), _) => guard.bracket_pick_home(),
        (MenuItem::Bracket, Char('b'), _) => guard.bracket_pick_away(),
        (MenuItem::Bracket, Char('x'), _) => guard.clear_bracket(),
        (MenuItem::Bracket, Char('s'), _) => guard.open_submission(),

        // Leaderboard
        (MenuItem::Leaderboard, Char('j') | KeyCode::Down, _) => {
            guard.state.leaderboard.scroll_down()
        }
        (MenuItem::Leaderboard, Char('k') | KeyCode::Up, _) => guard.state.leaderboard.scroll_up(),
        (MenuItem::Leaderboard, Char('r'), _) => {
            pending.push(NetworkRequest::LoadLeaderboard { season: guard.state.season });
        }

        // My brackets
        (MenuItem::MyBrackets, Char('j') | KeyCode::Down, _) => {
            guard.state.my_brackets.select_down()
        }
        (MenuItem::MyBrackets, Char('k') | KeyCode::Up, _) => guard.state.my_brackets.select_up(),
        (MenuItem::MyBrackets, Char('d'), _) => {
            if let Some(bracket_id) = guard.state.my_brackets.request_delete() {
                pending.push(NetworkRequest::DeleteBracket { bracket_id });
            }
        }
        (MenuItem::MyBrackets, Char('r'), _) => {
            if guard.state.signed_in.is_some() {
                pending.push(NetworkRequest::LoadUserBrackets);
            }
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    send_all(pending, network_requests).await;
}

fn switch_tab(app: &mut App, tab: MenuItem, pending: &mut Vec<NetworkRequest>) {
    app.update_tab(tab);
    if let Some(request) = app.tab_load_request() {
        pending.push(request);
    }
}

async fn send_all(
    pending: Vec<NetworkRequest>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    for request in pending {
        let _ = network_requests.send(request).await;
    }
}
