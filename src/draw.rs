use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_card::{CARD_HEIGHT, CARD_MIN_WIDTH, MatchCard};
use crate::state::fetch::FetchComponent;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::reshape::Keyed;
use crate::ui::layout::LayoutAreas;
use crate::view::{self, GroupView, MatchView, StandingRow, TeamLine};
use tourney_api::TextWeight;

static TABS: &[&str; 3] = &["Group Stage", "Knockout Stage", "Team"];

const HELP_TEXT: &str = "q=quit  1=Group Stage  2=Knockout Stage  3=Team  ?=help  Esc=back
[ / ]=choose tournament  space=load tournament
Group Stage: j/k=select team  Enter=open team
Knockout Stage: h/l=scroll stages
Team: j/k=scroll
f=full screen  \"=logs";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_selector(f, layout.selector, app);
        }

        match app.state.active_tab {
            MenuItem::GroupStage => draw_group_stage(f, layout.main, app),
            MenuItem::KnockoutStage => draw_knockout_stage(f, layout.main, app),
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::GroupStage => 0,
        MenuItem::KnockoutStage => 1,
        MenuItem::Team => 2,
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

fn draw_selector(f: &mut Frame, area: Rect, app: &App) {
    let selector = &app.state.selector;
    let mut spans = vec![Span::styled(" Tournament: ", Style::default().fg(Color::Gray))];

    if selector.options.is_empty() {
        let text = selector
            .selected_name()
            .map(str::to_string)
            .unwrap_or_else(|| "none configured (set TOURNEY_TOURNAMENTS)".to_string());
        spans.push(Span::raw(text));
    }

    for (idx, option) in selector.options.iter().enumerate() {
        let mut style = Style::default().fg(Color::DarkGray);
        if selector.selected.as_deref() == Some(option.id.as_str()) {
            style = style.fg(Color::Green);
        }
        if idx == selector.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", option.name), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Message shown instead of the view while a component is not ready.
fn status_message<R, V>(component: &FetchComponent<R, V>, idle_hint: &str) -> Option<(String, Color)> {
    if component.ready() {
        return None;
    }
    let title = component.kind().title();
    if component.has_error() {
        let err = component.state().error().unwrap_or_default();
        return Some((format!("Failed to load {title}:\n{err}"), Color::Red));
    }
    if component.state().is_loading() {
        return Some((format!("Loading {}...", title.to_lowercase()), Color::DarkGray));
    }
    Some((idle_hint.to_string(), Color::DarkGray))
}

fn draw_status(f: &mut Frame, area: Rect, message: String, color: Color) {
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

// ---------------------------------------------------------------------------
// Group stage
// ---------------------------------------------------------------------------

fn draw_group_stage(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Group Stage ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let component = &app.state.group_stage;
    if let Some((message, color)) =
        status_message(component, "Choose a tournament with [ / ] and press space")
    {
        draw_status(f, inner, message, color);
        return;
    }
    let Some(groups) = component.view() else {
        return;
    };
    if groups.is_empty() {
        draw_status(f, inner, "No groups in this tournament".to_string(), Color::DarkGray);
        return;
    }

    let bound = view::bind_group_stage(groups, &app.flags);
    let columns = if inner.width >= 120 { 2 } else { 1 };
    let col_width = inner.width / columns as u16;

    // Which group holds the highlighted row, so that group is kept on screen.
    let mut remaining = app.state.group_view.selected_row;
    let mut selected_group = 0;
    for (idx, group) in bound.iter().enumerate() {
        if remaining < group.items.standings.len() {
            selected_group = idx;
            break;
        }
        remaining = remaining.saturating_sub(group.items.standings.len());
    }

    let grid_rows: Vec<&[Keyed<GroupView>]> = bound.chunks(columns).collect();
    let heights: Vec<u16> = grid_rows
        .iter()
        .map(|row| row.iter().map(group_pane_height).max().unwrap_or(0))
        .collect();

    let selected_grid_row = selected_group / columns;
    let mut first_row = selected_grid_row;
    let mut used = heights.get(selected_grid_row).copied().unwrap_or(0);
    while first_row > 0 && used + heights[first_row - 1] <= inner.height {
        first_row -= 1;
        used += heights[first_row];
    }

    let mut first_standing = bound[..first_row * columns]
        .iter()
        .map(|g| g.items.standings.len())
        .sum::<usize>();
    let mut y = inner.y;
    for (row_idx, row) in grid_rows.iter().enumerate().skip(first_row) {
        let height = heights[row_idx];
        if y >= inner.y + inner.height {
            break;
        }
        let height = height.min(inner.y + inner.height - y);
        for (col_idx, group) in row.iter().enumerate() {
            let pane = Rect::new(inner.x + col_idx as u16 * col_width, y, col_width, height);
            let highlight = app
                .state
                .group_view
                .selected_row
                .checked_sub(first_standing)
                .filter(|r| *r < group.items.standings.len());
            draw_group_pane(f, pane, group, highlight);
            first_standing += group.items.standings.len();
        }
        y += height;
    }
}

fn group_pane_height(group: &Keyed<GroupView>) -> u16 {
    let standings = group.items.standings.len() as u16 + 1;
    let matches: u16 = group
        .items
        .matches_by_stage
        .iter()
        .map(|stage| stage.items.len() as u16 + 1)
        .sum();
    standings + matches + 2
}

fn draw_group_pane(f: &mut Frame, area: Rect, group: &Keyed<GroupView>, highlight: Option<usize>) {
    let color = if highlight.is_some() { Color::Yellow } else { Color::DarkGray };
    let block = default_border(color).title(format!(" {} ", group.key));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let table_height = (group.items.standings.len() as u16 + 1).min(inner.height);
    let [table_area, matches_area] =
        Layout::vertical([Constraint::Length(table_height), Constraint::Fill(1)]).areas(inner);

    f.render_widget(standings_table(&group.items.standings, highlight), table_area);

    let mut lines = Vec::new();
    for stage in &group.items.matches_by_stage {
        if !stage.key.is_empty() {
            lines.push(Line::from(Span::styled(
                stage.key.clone(),
                Style::default().fg(Color::Cyan),
            )));
        }
        lines.extend(stage.items.iter().map(match_line));
    }
    f.render_widget(Paragraph::new(lines), matches_area);
}

fn standings_table<'a>(rows: &'a [StandingRow], highlight: Option<usize>) -> Table<'a> {
    let header = Row::new(["#", "Team", "MP", "W", "L", "D", "GF", "GA", "GD", "Pts"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let body = rows.iter().enumerate().map(|(idx, row)| {
        let s = &row.stats;
        let style = if highlight == Some(idx) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(s.team_flag_code.clone()),
            Cell::from(s.team_name.clone()),
            Cell::from(s.matches_played.to_string()),
            Cell::from(s.wins.to_string()),
            Cell::from(s.losses.to_string()),
            Cell::from(s.draws.to_string()),
            Cell::from(s.goals_for.to_string()),
            Cell::from(s.goals_against.to_string()),
            Cell::from(s.goals_difference.to_string()),
            Cell::from(s.points.to_string()),
        ])
        .style(style)
    });

    Table::new(
        body,
        [
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(4),
        ],
    )
    .header(header)
}

fn team_span(line: &TeamLine) -> Span<'static> {
    let name = if line.name.is_empty() { "TBD".to_string() } else { line.name.clone() };
    let style = match line.weight {
        TextWeight::Bold => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        TextWeight::Regular => Style::default().fg(Color::Gray),
    };
    Span::styled(name, style)
}

/// `Dec 18, 2022  Argentina 3-3 France` on a single line.
fn match_line(view: &MatchView) -> Line<'static> {
    let score = match (view.home.score, view.away.score) {
        (Some(h), Some(a)) => format!(" {h}-{a} "),
        _ => " vs ".to_string(),
    };
    let date = if view.date.is_empty() { String::new() } else { format!("{}  ", view.date) };
    Line::from(vec![
        Span::styled(date, Style::default().fg(Color::DarkGray)),
        team_span(&view.home),
        Span::raw(score),
        team_span(&view.away),
    ])
}

// ---------------------------------------------------------------------------
// Knockout stage
// ---------------------------------------------------------------------------

const STAGE_COLUMN_WIDTH: u16 = 28;

fn draw_knockout_stage(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Knockout Stage ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let component = &app.state.knockout;
    if let Some((message, color)) =
        status_message(component, "Choose a tournament with [ / ] and press space")
    {
        draw_status(f, inner, message, color);
        return;
    }
    let Some(stages) = component.view() else {
        return;
    };
    if stages.is_empty() {
        draw_status(f, inner, "No knockout matches yet".to_string(), Color::DarkGray);
        return;
    }

    let bound = view::bind_knockout_stage(stages, &app.flags);
    let first = app.state.knockout_view.first_stage.min(bound.len() - 1);
    let visible = (inner.width / STAGE_COLUMN_WIDTH).max(1) as usize;

    for (slot, stage) in bound.iter().skip(first).take(visible).enumerate() {
        let x = inner.x + slot as u16 * STAGE_COLUMN_WIDTH;
        let width = STAGE_COLUMN_WIDTH.min(inner.x + inner.width - x);
        let column = Rect::new(x, inner.y, width, inner.height);

        let more_left = slot == 0 && first > 0;
        let more_right = slot + 1 == visible && first + visible < bound.len();
        let title = format!(
            "{}{} {}",
            if more_left { "◀ " } else { " " },
            stage.key,
            if more_right { "▶ " } else { "" }
        );
        let stage_block = default_border(Color::DarkGray).title(title);
        let stage_inner = stage_block.inner(column);
        f.render_widget(stage_block, column);
        draw_stage_cards(f, stage_inner, &stage.items);
    }
}

fn draw_stage_cards(f: &mut Frame, area: Rect, matches: &[MatchView]) {
    if area.width < CARD_MIN_WIDTH {
        return;
    }
    let mut y = area.y;
    for m in matches {
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        f.render_widget(MatchCard { view: m }, Rect::new(area.x, y, area.width, CARD_HEIGHT));
        y += CARD_HEIGHT + 1;
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.team.identifier() {
        Some(id) => format!(" Team {id} "),
        None => " Team ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let component = &app.state.team;
    if let Some((message, color)) =
        status_message(component, "Pick a team in the group stage standings and press Enter")
    {
        draw_status(f, inner, message, color);
        return;
    }
    let Some(tournaments) = component.view() else {
        return;
    };
    if tournaments.is_empty() {
        draw_status(f, inner, "No matches for this team".to_string(), Color::DarkGray);
        return;
    }

    let mut lines = Vec::new();
    for tournament in view::bind_team_matches(tournaments, &app.flags) {
        lines.push(Line::from(Span::styled(
            tournament.key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for stage in tournament.items {
            lines.push(Line::from(Span::styled(
                format!("  {}", stage.key),
                Style::default().fg(Color::Cyan),
            )));
            for m in &stage.items {
                let mut line = match_line(m);
                line.spans.insert(0, Span::raw("    "));
                lines.push(line);
            }
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).scroll((app.state.team_view.scroll_offset, 0)),
        inner,
    );
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Left),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red));
    f.render_widget(widget, area);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use indexmap::IndexMap;
    use tourney_api::{MatchRecord, OverviewKind, OverviewPayload};
    use tui::backend::TestBackend;

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn failed_fetch_shows_error_affordance() {
        let mut app = App::new(AppSettings::default());
        app.on_tournament_change("T1".into());
        app.on_overview_loaded(OverviewKind::GroupStage, "T1", Err("API error".into()));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let screen = rendered(&terminal);
        assert!(screen.contains("Failed to load Group Stage:"), "{screen}");
        assert!(screen.contains("API error"));
    }

    #[test]
    fn knockout_stages_render_as_columns() {
        let mut app = App::new(AppSettings::default());
        app.on_tournament_change("T1".into());
        let mut raw = IndexMap::new();
        raw.insert(
            "Semi-finals".to_string(),
            vec![MatchRecord {
                home_team_name: "Argentina".into(),
                home_team_flag_code: "ARG".into(),
                away_team_name: "Croatia".into(),
                away_team_flag_code: "CRO".into(),
                ..Default::default()
            }],
        );
        raw.insert("Final".to_string(), vec![]);
        app.on_overview_loaded(OverviewKind::KnockoutStage, "T1", Ok(OverviewPayload::KnockoutStage(raw)));
        app.update_tab(MenuItem::KnockoutStage);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let screen = rendered(&terminal);
        assert!(screen.contains("Semi-finals"));
        assert!(screen.contains("Final"));
        assert!(screen.contains("[ARG] Argentina"));
        assert!(screen.contains("date tbd"));
    }

    #[test]
    fn idle_tabs_prompt_for_a_selection() {
        let mut app = App::new(AppSettings::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(rendered(&terminal).contains("Choose a tournament"));
    }

    #[test]
    fn status_follows_component_flags() {
        let mut component = FetchComponent::new(OverviewKind::KnockoutStage, |raw: Vec<u8>| raw.len());
        assert_eq!(status_message(&component, "pick one"), Some(("pick one".to_string(), Color::DarkGray)));

        component.set_identifier(Some("T1".into()));
        assert_eq!(
            status_message(&component, "pick one"),
            Some(("Loading knockout stage...".to_string(), Color::DarkGray))
        );

        component.on_settled(Err("timed out".into()));
        assert_eq!(
            status_message(&component, "pick one"),
            Some(("Failed to load Knockout Stage:\ntimed out".to_string(), Color::Red))
        );

        component.on_settled(Ok(vec![1, 2]));
        assert_eq!(status_message(&component, "pick one"), None);
    }
}
