//! Team rail widget: one button per team plus the chat / join-teams pair.
//!
//! Renders purely from values handed in by the host; the controller never
//! holds a reference to anything in here.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

use crate::prefs::SidebarButton;
use crate::team::Team;

/// The shortcut digit a list position answers to, if any: positions 1-9 map
/// to digits 1-9 and position 10 to digit 0. Teams past the tenth have no
/// shortcut.
pub fn ordinal_label(index: usize) -> Option<char> {
    match index {
        0..=8 => char::from_digit(index as u32 + 1, 10),
        9 => Some('0'),
        _ => None,
    }
}

/// Vertical rail of team buttons.
pub struct TeamRail<'a> {
    /// Display-ordered teams
    teams: &'a [Team],
    /// Id of the active team (highlighted)
    current_team_id: &'a str,
    /// Whether the shortcut-order overlay is showing (ordinal badges)
    show_order: bool,
    /// Which bottom button was last active
    last_button: Option<SidebarButton>,
    /// Whether the rail has keyboard focus
    focused: bool,
}

impl<'a> TeamRail<'a> {
    /// Create a new team rail widget.
    pub fn new(teams: &'a [Team], current_team_id: &'a str) -> Self {
        Self {
            teams,
            current_team_id,
            show_order: false,
            last_button: None,
            focused: false,
        }
    }

    /// Show ordinal badges next to each team.
    pub fn show_order(mut self, show: bool) -> Self {
        self.show_order = show;
        self
    }

    /// Highlight the last active bottom button.
    pub fn last_button(mut self, button: Option<SidebarButton>) -> Self {
        self.last_button = button;
        self
    }

    /// Mark the rail as focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn team_item(&self, index: usize, team: &Team) -> ListItem<'a> {
        let is_current = team.id == self.current_team_id;
        let mut spans = Vec::new();

        if self.show_order {
            let badge = match ordinal_label(index) {
                Some(digit) => format!("[{digit}] "),
                None => "    ".to_string(),
            };
            spans.push(Span::styled(badge, Style::default().fg(Color::Yellow)));
        }

        let marker = if is_current { "● " } else { "○ " };
        let name_style = if is_current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(
            format!("{marker}{}", team.display_name),
            name_style,
        ));

        ListItem::new(Line::from(spans))
    }

    fn button_item(&self, button: SidebarButton, label: &str) -> ListItem<'a> {
        let style = if self.last_button == Some(button) {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        ListItem::new(Line::from(Span::styled(format!("+ {label}"), style)))
    }
}

impl Widget for TeamRail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if self.show_order {
            " Teams (order) "
        } else {
            " Teams "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut items: Vec<ListItem> = self
            .teams
            .iter()
            .enumerate()
            .map(|(index, team)| self.team_item(index, team))
            .collect();

        items.push(ListItem::new(Line::from("")));
        items.push(self.button_item(SidebarButton::Chat, "Chat"));
        items.push(self.button_item(SidebarButton::Team, "Join teams"));

        Widget::render(List::new(items), inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell(Position::new(x, y)).unwrap().symbol())
            .collect()
    }

    fn teams(ids: &[&str]) -> Vec<Team> {
        ids.iter()
            .map(|id| Team::new(*id, *id, id.to_uppercase()))
            .collect()
    }

    #[test]
    fn ordinal_labels_follow_the_alt_number_convention() {
        assert_eq!(ordinal_label(0), Some('1'));
        assert_eq!(ordinal_label(8), Some('9'));
        assert_eq!(ordinal_label(9), Some('0'));
        assert_eq!(ordinal_label(10), None);
    }

    #[test]
    fn renders_one_row_per_team_with_current_marker() {
        let teams = teams(&["alpha", "beta"]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 8));

        TeamRail::new(&teams, "beta").render(buf.area, &mut buf);

        assert!(row(&buf, 1).contains("○ ALPHA"));
        assert!(row(&buf, 2).contains("● BETA"));
    }

    #[test]
    fn ordinal_badges_only_show_with_the_overlay() {
        let teams = teams(&["alpha", "beta"]);

        let mut plain = Buffer::empty(Rect::new(0, 0, 24, 8));
        TeamRail::new(&teams, "alpha").render(plain.area, &mut plain);
        assert!(!row(&plain, 1).contains("[1]"));

        let mut overlay = Buffer::empty(Rect::new(0, 0, 24, 8));
        TeamRail::new(&teams, "alpha")
            .show_order(true)
            .render(overlay.area, &mut overlay);
        assert!(row(&overlay, 1).contains("[1] ● ALPHA"));
        assert!(row(&overlay, 2).contains("[2] ○ BETA"));
    }

    #[test]
    fn bottom_buttons_always_render() {
        let teams = teams(&["alpha"]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 8));

        TeamRail::new(&teams, "alpha")
            .last_button(Some(SidebarButton::Chat))
            .render(buf.area, &mut buf);

        assert!(row(&buf, 3).contains("+ Chat"));
        assert!(row(&buf, 4).contains("+ Join teams"));
    }
}
