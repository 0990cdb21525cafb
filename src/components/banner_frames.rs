use nfl_api::bracket::PlayoffRound;
use tui::style::{Color, Modifier, Style};

pub const FRAME_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    Primary,
    Secondary,
    Accent,
    Shadow,
    Dim,
    Winner,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BannerTheme {
    #[default]
    Dark,
}

pub fn resolve(color: BannerColor, _theme: BannerTheme) -> Style {
    match color {
        BannerColor::Primary => Style::default().fg(Color::Rgb(0, 53, 148)),
        BannerColor::Secondary => Style::default().fg(Color::Rgb(213, 10, 10)),
        BannerColor::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        BannerColor::Shadow | BannerColor::Dim => Style::default().fg(Color::Indexed(240)),
        BannerColor::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

pub fn ball_row(tick: u64, height: u16) -> u16 {
    if height == 0 {
        return 0;
    }
    let h = u64::from(height.saturating_sub(1));
    if h == 0 {
        return 0;
    }
    let period = 2 * h;
    let t = tick % period;
    (h.abs_diff(t)) as u16
}

/// A spinning football; the laces rotate frame to frame.
pub fn football_frame(frame: usize) -> [&'static str; 5] {
    const FRAMES: [[&str; 5]; FRAME_COUNT] = [
        ["  ,-===-.  ", " /       \\ ", "( >==|==< )", " \\       / ", "  `-===-'  "],
        ["  ,-===-.  ", " /       \\ ", "( >==/==< )", " \\       / ", "  `-===-'  "],
        ["  ,-===-.  ", " /       \\ ", "( >=====< )", " \\       / ", "  `-===-'  "],
        ["  ,-===-.  ", " /       \\ ", "( >==\\==< )", " \\       / ", "  `-===-'  "],
    ];
    FRAMES[frame % FRAME_COUNT]
}

pub fn title_rows() -> [&'static str; 4] {
    [
        "  ___ ___ ___ ___  _____ _   _ ___ ",
        " / __| _ \\_ _|   \\|_   _| | | |_ _|",
        "| (_ |   /| || |) | | | | |_| || | ",
        " \\___|_|_\\___|___/  |_|  \\___/|___|",
    ]
}

pub fn round_label(round: PlayoffRound) -> &'static str {
    match round {
        PlayoffRound::WildCard => "WILD CARD",
        PlayoffRound::Divisional => "DIVISIONAL",
        PlayoffRound::Championship => "CHAMPIONSHIP",
        PlayoffRound::TitleGame => "SUPER BOWL",
    }
}
