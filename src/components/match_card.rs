use tourney_api::TextWeight;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::view::{MatchView, TeamLine};

/// Rows per card: date line, home line, away line.
pub const CARD_HEIGHT: u16 = 3;

/// Narrowest card that still fits a flag code, a short name and a score.
pub const CARD_MIN_WIDTH: u16 = 16;

/// One match: date on top, then home and away lines. The winner's line is bold.
pub struct MatchCard<'a> {
    pub view: &'a MatchView,
}

impl<'a> Widget for MatchCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CARD_MIN_WIDTH || area.height < CARD_HEIGHT {
            return;
        }

        let width = area.width as usize;
        let date = if self.view.date.is_empty() { "date tbd" } else { self.view.date.as_str() };
        buf.set_string(area.x, area.y, clip(date, width), Style::default().fg(Color::DarkGray));

        buf.set_string(area.x, area.y + 1, team_text(&self.view.home, width), team_style(&self.view.home));
        buf.set_string(area.x, area.y + 2, team_text(&self.view.away, width), team_style(&self.view.away));
    }
}

fn team_style(line: &TeamLine) -> Style {
    match line.weight {
        TextWeight::Bold => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        TextWeight::Regular => Style::default().fg(Color::Gray),
    }
}

/// `[ARG] Argentina      3`, name truncated so the score stays right-aligned.
pub fn team_text(line: &TeamLine, width: usize) -> String {
    let flag = if line.flag_code.is_empty() { "---" } else { line.flag_code.as_str() };
    let prefix = format!("[{flag}] ");
    let score = line.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
    let name = if line.name.is_empty() { "TBD" } else { line.name.as_str() };

    let room = width.saturating_sub(prefix.chars().count() + score.chars().count() + 1);
    let name = clip(name, room);
    let pad = room.saturating_sub(name.chars().count());
    clip(&format!("{prefix}{name}{} {score}", " ".repeat(pad)), width)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, flag: &str, score: Option<u16>, winner: bool) -> TeamLine {
        TeamLine {
            team_id: None,
            name: name.into(),
            code: String::new(),
            flag_code: flag.into(),
            flag_url: String::new(),
            score,
            is_winner: winner,
            weight: TextWeight::for_winner(winner),
        }
    }

    #[test]
    fn team_text_right_aligns_score() {
        let text = team_text(&line("Argentina", "ARG", Some(3), true), 20);
        assert_eq!(text, "[ARG] Argentina    3");
        assert_eq!(text.chars().count(), 20);
    }

    #[test]
    fn team_text_truncates_long_names() {
        let text = team_text(&line("Bosnia and Herzegovina", "BIH", Some(10), false), 18);
        assert_eq!(text, "[BIH] Bosnia an 10");
    }

    #[test]
    fn team_text_placeholders() {
        assert_eq!(team_text(&line("", "", None, false), 16), "[---] TBD      -");
    }

    #[test]
    fn winner_line_is_bold() {
        assert!(team_style(&line("A", "A", None, true)).add_modifier.contains(Modifier::BOLD));
        assert!(!team_style(&line("B", "B", None, false)).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn card_renders_three_lines() {
        let view = MatchView {
            id: "m1".into(),
            date: "Dec 18, 2022".into(),
            home: line("Argentina", "ARG", Some(3), true),
            away: line("France", "FRA", Some(3), false),
        };
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        MatchCard { view: &view }.render(area, &mut buf);

        let row = |y: u16| -> String { (0..20).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert_eq!(row(0).trim_end(), "Dec 18, 2022");
        assert_eq!(row(1), "[ARG] Argentina    3");
        assert_eq!(row(2), "[FRA] France       3");
    }
}
