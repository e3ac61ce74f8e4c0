//! Terminal UI components: the team rail widget.

mod sidebar;

pub use sidebar::{ordinal_label, TeamRail};
