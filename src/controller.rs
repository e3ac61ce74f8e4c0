//! Ordered team list controller.
//!
//! Owns the materialized display order of the current user's teams and the
//! mutations the sidebar supports: drag-reorder, previous/next switching, and
//! ordinal (alt+number style) switching. The controller holds no presentation
//! objects; rendering reads its state by value and side effects flow out
//! through the [`SidebarHost`] seam.

use crate::team::{compute_display_order, Team};

/// Host seam for side effects the controller itself does not perform.
///
/// Both callbacks are fire-and-forget from the controller's point of view:
/// it never waits on persistence or navigation.
pub trait SidebarHost {
    /// Invoked with the full id sequence after every completed reorder.
    fn order_changed(&mut self, team_ids: &[String]);

    /// Invoked with a route-like path (`/{team.name}`) when a keyboard
    /// shortcut resolves to a concrete team.
    fn switch_team(&mut self, path: &str);
}

/// Completed drag gesture, as reported by the drag layer.
///
/// `destination_index` is `None` when the drag was cancelled (dropped outside
/// any droppable target); the controller treats that as a no-op.
#[derive(Debug, Clone)]
pub struct DropResult {
    /// Index the dragged button started at
    pub source_index: usize,
    /// Index the button was dropped at, in the post-removal sequence
    pub destination_index: Option<usize>,
    /// Id of the dragged team, looked up by identity on drop
    pub dragged_team_id: String,
}

/// Direction for previous/next team switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Outcome of an ordinal (digit) shortcut.
///
/// "Already active" is distinct from "switched" so the key event can still be
/// consumed without triggering a redundant switch.
#[derive(Debug, PartialEq, Eq)]
pub enum OrdinalSwitch<'a> {
    /// The shortcut resolved to a different team
    Switched(&'a Team),
    /// The shortcut resolved to the team that is already active
    AlreadyActive,
    /// The digit maps past the end of the list
    NoTarget,
}

/// Keyboard combo state: idle, or the switch combo is held and the order
/// overlay is showing. Purely a UI affordance; switch and reorder operations
/// never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComboState {
    #[default]
    Idle,
    Held,
}

/// Controller for the team-switching sidebar.
pub struct TeamListController {
    /// Id of the team the user is currently in
    current_team_id: String,
    /// Live display order (always exactly the visible team set)
    teams: Vec<Team>,
    /// The user's last manual arrangement, as a sequence of team ids
    ordering_preference: Vec<String>,
    /// Locale tag threaded into display-name comparison
    locale: String,
    /// Keyboard combo / overlay state
    combo_state: ComboState,
    /// Whether key events are currently being accepted (start/stop lifetime)
    active: bool,
}

impl TeamListController {
    /// Create a controller with an empty team list.
    ///
    /// Call [`set_teams`](Self::set_teams) once the team set source delivers.
    pub fn new(current_team_id: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            current_team_id: current_team_id.into(),
            teams: Vec::new(),
            ordering_preference: Vec::new(),
            locale: locale.into(),
            combo_state: ComboState::Idle,
            active: false,
        }
    }

    /// Replace the team set and ordering preference, recomputing the display
    /// order. Called on mount and on every external update notification.
    pub fn set_teams(&mut self, all_teams: &[Team], preference: &[String]) {
        self.ordering_preference = preference.to_vec();
        self.teams = compute_display_order(all_teams, preference, &self.locale);
    }

    /// The live display order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Id of the currently active team.
    pub fn current_team_id(&self) -> &str {
        &self.current_team_id
    }

    /// Record that the host navigated to a different team.
    pub fn set_current_team(&mut self, team_id: impl Into<String>) {
        self.current_team_id = team_id.into();
    }

    /// The sidebar only shows when the user belongs to more than one team.
    pub fn sidebar_visible(&self) -> bool {
        self.teams.len() > 1
    }

    /// Begin accepting key events. The host calls this when the sidebar
    /// enters its active lifetime (the listener-registration point).
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop accepting key events and hide the overlay. Idempotent; the host
    /// must call this when the sidebar leaves its active lifetime so handlers
    /// never leak across lifetimes.
    pub fn stop(&mut self) {
        self.active = false;
        self.combo_state = ComboState::Idle;
    }

    /// Whether key events are currently accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the ephemeral "show order" overlay is visible.
    pub fn show_order(&self) -> bool {
        self.combo_state == ComboState::Held
    }

    pub(crate) fn set_combo_state(&mut self, state: ComboState) {
        self.combo_state = state;
    }

    /// Apply a completed drag gesture: pop the element at `source_index`,
    /// then re-insert the dragged team (looked up by id, guarding against the
    /// team set having changed between drag-start and drop) at
    /// `destination_index` in the post-removal sequence.
    ///
    /// A cancelled drag (`destination_index == None`) leaves the order
    /// untouched and does not notify the host. A dragged team that vanished
    /// mid-drag is not re-inserted; the post-removal sequence stands. Every
    /// completed reorder emits the new id sequence through
    /// [`SidebarHost::order_changed`] and becomes the new ordering preference.
    pub fn reorder_on_drop(&mut self, result: &DropResult, host: &mut dyn SidebarHost) -> &[Team] {
        let Some(destination_index) = result.destination_index else {
            return &self.teams;
        };
        if result.source_index >= self.teams.len() || destination_index >= self.teams.len() {
            return &self.teams;
        }

        let dragged = self
            .teams
            .iter()
            .find(|team| team.id == result.dragged_team_id)
            .cloned();

        let mut order = self.teams.clone();
        order.remove(result.source_index);
        if let Some(team) = dragged {
            let at = destination_index.min(order.len());
            order.insert(at, team);
        }

        self.ordering_preference = order.iter().map(|team| team.id.clone()).collect();
        self.teams = order;
        host.order_changed(&self.ordering_preference);
        &self.teams
    }

    /// Resolve the team before/after the current one, wrapping circularly:
    /// stepping back from index 0 lands on the last team, stepping forward
    /// from the last lands on index 0. A single-team list wraps to itself.
    ///
    /// Returns `None` when the current team is not in the display order; the
    /// caller must not guess a position.
    pub fn switch_to_adjacent(&self, direction: Direction) -> Option<&Team> {
        let pos = self
            .teams
            .iter()
            .position(|team| team.id == self.current_team_id)?;
        let last = self.teams.len() - 1;

        let target = match direction {
            Direction::Next => {
                if pos == last {
                    0
                } else {
                    pos + 1
                }
            }
            Direction::Previous => {
                if pos == 0 {
                    last
                } else {
                    pos - 1
                }
            }
        };
        self.teams.get(target)
    }

    /// Resolve a digit shortcut to a team: digits 1-9 address positions 1-9
    /// (indexes 0-8) and digit 0 addresses position 10 (index 9), the usual
    /// alt+number convention.
    pub fn switch_by_ordinal(&self, digit: u8) -> OrdinalSwitch<'_> {
        let index = match digit {
            0 => 9,
            1..=9 => usize::from(digit) - 1,
            _ => return OrdinalSwitch::NoTarget,
        };
        match self.teams.get(index) {
            None => OrdinalSwitch::NoTarget,
            Some(team) if team.id == self.current_team_id => OrdinalSwitch::AlreadyActive,
            Some(team) => OrdinalSwitch::Switched(team),
        }
    }
}
