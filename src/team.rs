//! Team entity and display-order computation.
//!
//! The sidebar never shows the raw team set: it shows a materialized
//! `DisplayOrder` where teams the user has manually arranged come first (in
//! their arranged positions) and the rest follow in display-name order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A workspace the user can be a member of.
///
/// Read-only to this crate; the host application owns the team set and
/// supplies it on mount and on every external update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique id within the set supplied for one user
    pub id: String,
    /// URL-safe handle, used to build switch-intent paths (`/{name}`)
    pub name: String,
    /// Human-readable name shown in the sidebar
    pub display_name: String,
    /// Deletion timestamp; nonzero means the team is no longer visible
    #[serde(default)]
    pub delete_at: i64,
}

impl Team {
    /// Convenience constructor for a live (non-deleted) team.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            delete_at: 0,
        }
    }
}

/// Compute the user-facing ordering of `all_teams`.
///
/// Deleted teams are filtered out. Teams whose id appears in `preference`
/// sort by their position in it and come before the rest; teams missing from
/// the preference (newly joined, or the preference is stale) are appended in
/// display-name order. The result always contains exactly the visible team
/// set: stale preference entries are ignored, omissions appended.
///
/// The comparator is total and the sort stable, so repeated calls with the
/// same inputs yield the same sequence.
pub fn compute_display_order(all_teams: &[Team], preference: &[String], locale: &str) -> Vec<Team> {
    let mut teams: Vec<Team> = all_teams
        .iter()
        .filter(|team| team.delete_at == 0)
        .cloned()
        .collect();
    teams.sort_by(|a, b| compare_teams(a, b, preference, locale));
    teams
}

/// Total order over teams under an explicit ordering preference.
fn compare_teams(a: &Team, b: &Team, preference: &[String], locale: &str) -> Ordering {
    let pos_a = preference.iter().position(|id| *id == a.id);
    let pos_b = preference.iter().position(|id| *id == b.id);

    match (pos_a, pos_b) {
        (Some(i), Some(j)) => i.cmp(&j),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_display_names(a, b, locale),
    }
}

/// Case-insensitive display-name comparison, tie-broken by team id so teams
/// sharing a display name still compare consistently.
///
/// The locale tag is accepted for API parity with the team set source but the
/// comparison itself is plain Unicode lowercasing; full collation tables are
/// out of scope.
fn compare_display_names(a: &Team, b: &Team, _locale: &str) -> Ordering {
    a.display_name
        .to_lowercase()
        .cmp(&b.display_name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}
