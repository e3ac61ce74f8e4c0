//! teamdeck demo binary: a sample multi-team workspace rail driven by real
//! key events, wiring the controller, preference store, and widget together.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use teamdeck::controller::{DropResult, SidebarHost, TeamListController};
use teamdeck::keyboard::handle_key_event;
use teamdeck::prefs::{FileKvStore, KvStore, PreferenceStore, SidebarButton};
use teamdeck::team::Team;
use teamdeck::ui::TeamRail;

/// The demo runs as a single fixed user.
const USER_ID: &str = "local";

/// Key the persisted team ordering lives under in the flat store.
const ORDER_KEY: &str = "team_order:local";

/// Records the controller's outbound intents; the event loop applies them
/// once the controller call returns.
#[derive(Default)]
struct DemoHost {
    pending_order: Option<Vec<String>>,
    pending_switch: Option<String>,
}

impl SidebarHost for DemoHost {
    fn order_changed(&mut self, team_ids: &[String]) {
        self.pending_order = Some(team_ids.to_vec());
    }

    fn switch_team(&mut self, path: &str) {
        self.pending_switch = Some(path.to_string());
    }
}

fn sample_teams() -> Vec<Team> {
    vec![
        Team::new("t-core", "core", "Core"),
        Team::new("t-design", "design", "Design"),
        Team::new("t-infra", "infra", "Infrastructure"),
        Team::new("t-sales", "sales", "Sales"),
        Team::new("t-support", "support", "Support"),
    ]
}

fn stored_order(prefs: &PreferenceStore<FileKvStore>) -> Vec<String> {
    prefs
        .store()
        .get(ORDER_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let mut prefs = PreferenceStore::new(FileKvStore::load());
    if prefs.last_button(USER_ID).is_none() {
        prefs.set_last_button(USER_ID, SidebarButton::Chat);
    }

    let mut controller = TeamListController::new("", "en");
    controller.set_teams(&sample_teams(), &stored_order(&prefs));

    // Resume where the user left off, or land on the first team in order.
    let start_team = prefs
        .last_team(USER_ID)
        .filter(|id| controller.teams().iter().any(|team| team.id == *id))
        .or_else(|| controller.teams().first().map(|team| team.id.clone()));
    if let Some(id) = start_team {
        controller.set_current_team(id);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        // Release events drive the overlay hide transition.
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    controller.start();
    let result = run(&mut terminal, &mut controller, &mut prefs);
    controller.stop();

    if enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut TeamListController,
    prefs: &mut PreferenceStore<FileKvStore>,
) -> Result<()> {
    let mut host = DemoHost::default();

    loop {
        terminal.draw(|frame| {
            let [rail_area, body_area] =
                Layout::horizontal([Constraint::Length(26), Constraint::Min(0)])
                    .areas(frame.area());

            let rail = TeamRail::new(controller.teams(), controller.current_team_id())
                .show_order(controller.show_order())
                .last_button(prefs.last_button(USER_ID))
                .focused(true);
            frame.render_widget(rail, rail_area);

            let current_name = controller
                .teams()
                .iter()
                .find(|team| team.id == controller.current_team_id())
                .map_or("-", |team| team.display_name.as_str());
            let body = Paragraph::new(vec![
                Line::from(format!("Active team: {current_name}")),
                Line::from(""),
                Line::from("ctrl+alt+up/down   switch to previous/next team"),
                Line::from("ctrl+alt+1..9,0    jump to team by position"),
                Line::from("hold ctrl+alt      peek at the shortcut order"),
                Line::from("[ / ]              move the active team up/down"),
                Line::from("c / t              pick the chat / join button"),
                Line::from("q                  quit"),
            ])
            .block(Block::default().title(" teamdeck ").borders(Borders::ALL));
            frame.render_widget(body, body_area);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        if key.kind != KeyEventKind::Release && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('[') => move_current_team(controller, &mut host, -1),
                KeyCode::Char(']') => move_current_team(controller, &mut host, 1),
                KeyCode::Char('c') => prefs.set_last_button(USER_ID, SidebarButton::Chat),
                KeyCode::Char('t') => prefs.set_last_button(USER_ID, SidebarButton::Team),
                _ => {
                    handle_key_event(controller, &mut host, key);
                }
            }
        } else {
            handle_key_event(controller, &mut host, key);
        }

        if let Some(order) = host.pending_order.take() {
            if let Ok(raw) = serde_json::to_string(&order) {
                prefs.store_mut().set(ORDER_KEY, &raw);
            }
        }
        if let Some(path) = host.pending_switch.take() {
            let name = path.trim_start_matches('/');
            let target = controller
                .teams()
                .iter()
                .find(|team| team.name == name)
                .map(|team| team.id.clone());
            if let Some(id) = target {
                prefs.set_last_team(USER_ID, &id);
                controller.set_current_team(id);
            }
        }
    }
    Ok(())
}

/// Nudge the active team one slot up or down, standing in for a pointer drag
/// in a terminal.
fn move_current_team(controller: &mut TeamListController, host: &mut DemoHost, delta: i64) {
    let Some(source) = controller
        .teams()
        .iter()
        .position(|team| team.id == controller.current_team_id())
    else {
        return;
    };
    let destination = source as i64 + delta;
    if destination < 0 || destination as usize >= controller.teams().len() {
        return;
    }
    let result = DropResult {
        source_index: source,
        destination_index: Some(destination as usize),
        dragged_team_id: controller.current_team_id().to_string(),
    };
    controller.reorder_on_drop(&result, host);
}
