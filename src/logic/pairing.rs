//! Round-robin pairing: every unique unordered pair of a group's members.

use crate::models::{Group, Match};

/// Generate one scheduled match per unordered pair of distinct group members.
///
/// A group of `m` members yields exactly `m * (m - 1) / 2` matches, each with
/// unset scores and an empty history. Fewer than 2 members yields none (the
/// grouping engine never produces such a group, but uploads might).
pub fn round_robin_matches(
    group: &Group,
    category: &str,
    tournament_type: &str,
) -> Vec<Match> {
    let ids = &group.player_ids;
    if ids.len() < 2 {
        return Vec::new();
    }
    let mut matches = Vec::with_capacity(ids.len() * (ids.len() - 1) / 2);
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            matches.push(Match::new(
                category,
                tournament_type,
                &group.name,
                ids[i],
                ids[j],
            ));
        }
    }
    matches
}
