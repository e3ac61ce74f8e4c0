//! Keyboard dispatch for team-switching shortcuts.
//!
//! While the switch combo (ctrl or meta/super, plus alt) is held, arrow keys
//! step to the previous/next team, digits jump by ordinal, and any press that
//! does not resolve to a switch reveals the "show order" overlay. Releasing
//! either modifier hides the overlay again. The overlay is purely an
//! affordance: switching never depends on it.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::{ComboState, Direction, OrdinalSwitch, SidebarHost, TeamListController};

/// How a key event was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The event was consumed; the host should suppress its default action
    Handled,
    /// Not ours; the host processes the event as usual
    PassThrough,
}

/// True when the switch combo is held: alt together with ctrl or super.
pub fn combo_held(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::ALT)
        && (modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(KeyModifiers::SUPER))
}

/// Route one key event through the shortcut state machine.
///
/// Events are ignored outside the controller's [`start`]/[`stop`] lifetime.
/// Shortcuts that cannot resolve (ordinal past the end of the list, current
/// team missing from the order) pass through unhandled so the host keeps its
/// default behavior.
///
/// [`start`]: TeamListController::start
/// [`stop`]: TeamListController::stop
pub fn handle_key_event(
    controller: &mut TeamListController,
    host: &mut dyn SidebarHost,
    key: KeyEvent,
) -> KeyOutcome {
    if !controller.is_active() {
        return KeyOutcome::PassThrough;
    }

    if key.kind == KeyEventKind::Release {
        if !combo_held(key.modifiers) {
            controller.set_combo_state(ComboState::Idle);
        }
        return KeyOutcome::PassThrough;
    }

    if !combo_held(key.modifiers) {
        controller.set_combo_state(ComboState::Idle);
        return KeyOutcome::PassThrough;
    }

    let outcome = match key.code {
        KeyCode::Up | KeyCode::Down => {
            let direction = if key.code == KeyCode::Down {
                Direction::Next
            } else {
                Direction::Previous
            };
            match controller.switch_to_adjacent(direction) {
                Some(team) => {
                    host.switch_team(&format!("/{}", team.name));
                    KeyOutcome::Handled
                }
                // Current team missing from the display order: do not guess.
                None => KeyOutcome::PassThrough,
            }
        }
        KeyCode::Char(c @ '0'..='9') => match controller.switch_by_ordinal(c as u8 - b'0') {
            OrdinalSwitch::Switched(team) => {
                host.switch_team(&format!("/{}", team.name));
                KeyOutcome::Handled
            }
            OrdinalSwitch::AlreadyActive => KeyOutcome::Handled,
            OrdinalSwitch::NoTarget => KeyOutcome::PassThrough,
        },
        _ => KeyOutcome::PassThrough,
    };

    if outcome == KeyOutcome::PassThrough {
        // Combo held but nothing switched: reveal the order overlay.
        controller.set_combo_state(ComboState::Held);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;

    #[derive(Default)]
    struct RecordingHost {
        switches: Vec<String>,
    }

    impl SidebarHost for RecordingHost {
        fn order_changed(&mut self, _team_ids: &[String]) {}

        fn switch_team(&mut self, path: &str) {
            self.switches.push(path.to_string());
        }
    }

    fn started_controller(ids: &[&str], current: &str) -> TeamListController {
        let teams: Vec<Team> = ids
            .iter()
            .map(|id| Team::new(*id, *id, id.to_uppercase()))
            .collect();
        let preference: Vec<String> = ids.iter().map(|id| (*id).to_string()).collect();
        let mut controller = TeamListController::new(current, "en");
        controller.set_teams(&teams, &preference);
        controller.start();
        controller
    }

    fn combo(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    #[test]
    fn combo_down_switches_to_the_next_team() {
        let mut controller = started_controller(&["alpha", "beta", "chi"], "alpha");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Down));

        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(host.switches, vec!["/beta"]);
    }

    #[test]
    fn combo_up_wraps_from_the_first_team_to_the_last() {
        let mut controller = started_controller(&["alpha", "beta", "chi"], "alpha");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Up));

        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(host.switches, vec!["/chi"]);
    }

    #[test]
    fn meta_counts_as_the_combo_modifier() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::SUPER | KeyModifiers::ALT);
        let outcome = handle_key_event(&mut controller, &mut host, key);

        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(host.switches, vec!["/beta"]);
    }

    #[test]
    fn digit_jumps_to_the_addressed_team() {
        let mut controller = started_controller(&["alpha", "beta", "chi"], "alpha");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('3')));

        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(host.switches, vec!["/chi"]);
    }

    #[test]
    fn digit_for_the_active_team_is_consumed_without_switching() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('1')));

        assert_eq!(outcome, KeyOutcome::Handled);
        assert!(host.switches.is_empty());
    }

    #[test]
    fn out_of_range_digit_passes_through() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('7')));

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert!(host.switches.is_empty());
    }

    #[test]
    fn arrows_pass_through_when_the_current_team_is_absent() {
        let mut controller = started_controller(&["alpha", "beta"], "elsewhere");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Down));

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert!(host.switches.is_empty());
    }

    #[test]
    fn non_shortcut_key_with_combo_reveals_the_overlay() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('x')));

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert!(controller.show_order());
    }

    #[test]
    fn releasing_a_modifier_hides_the_overlay() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('x')));
        assert!(controller.show_order());

        let release = KeyEvent::new_with_kind(
            KeyCode::Char('x'),
            KeyModifiers::ALT,
            KeyEventKind::Release,
        );
        let outcome = handle_key_event(&mut controller, &mut host, release);

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert!(!controller.show_order());
    }

    #[test]
    fn pressing_without_the_combo_hides_the_overlay() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('x')));
        assert!(controller.show_order());

        let plain = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        handle_key_event(&mut controller, &mut host, plain);
        assert!(!controller.show_order());
    }

    #[test]
    fn shortcuts_work_regardless_of_overlay_state() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        // Overlay hidden: switch works.
        handle_key_event(&mut controller, &mut host, combo(KeyCode::Down));
        // Overlay shown: switch still works.
        controller.set_current_team("alpha");
        handle_key_event(&mut controller, &mut host, combo(KeyCode::Char('x')));
        handle_key_event(&mut controller, &mut host, combo(KeyCode::Down));

        assert_eq!(host.switches, vec!["/beta", "/beta"]);
    }

    #[test]
    fn events_are_ignored_while_stopped() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        controller.stop();
        let mut host = RecordingHost::default();

        let outcome = handle_key_event(&mut controller, &mut host, combo(KeyCode::Down));

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert!(host.switches.is_empty());
        assert!(!controller.show_order());
    }

    #[test]
    fn plain_keys_pass_through_untouched() {
        let mut controller = started_controller(&["alpha", "beta"], "alpha");
        let mut host = RecordingHost::default();

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let outcome = handle_key_event(&mut controller, &mut host, key);

        assert_eq!(outcome, KeyOutcome::PassThrough);
        assert!(host.switches.is_empty());
        assert!(!controller.show_order());
    }
}
