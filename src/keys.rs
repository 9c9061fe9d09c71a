use crate::app::{App, MenuItem};
use crate::state::selector::SelectionRelay;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>, relay: &SelectionRelay) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::GroupStage),
        (_, Char('2'), _) => guard.update_tab(MenuItem::KnockoutStage),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Team),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Tournament selector
        (_, Char('['), _) => guard.selector_prev(),
        (_, Char(']'), _) => guard.selector_next(),
        (_, Char(' '), _) => {
            let choice = guard.highlighted_tournament();
            drop(guard);
            relay.tournament_changed(choice);
        }

        // Group stage: pick a team from the standings
        (MenuItem::GroupStage, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (MenuItem::GroupStage, Char('k') | KeyCode::Up, _) => guard.scroll_up(),
        (MenuItem::GroupStage, KeyCode::Enter, _) => {
            let choice = guard.highlighted_team();
            drop(guard);
            relay.team_changed(choice);
        }

        // Knockout stage: one stage column per step
        (MenuItem::KnockoutStage, Char('l') | KeyCode::Right, _) => guard.state.knockout_scroll_right(),
        (MenuItem::KnockoutStage, Char('h') | KeyCode::Left, _) => guard.state.knockout_scroll_left(),

        // Team
        (MenuItem::Team, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (MenuItem::Team, Char('k') | KeyCode::Up, _) => guard.scroll_up(),
        (MenuItem::Team, KeyCode::Esc, _) => guard.update_tab(MenuItem::GroupStage),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
