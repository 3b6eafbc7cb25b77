//! Grouping engine: partition eligible players into balanced round-robin groups.

use crate::models::{Group, PlayerId};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Errors from the grouping engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GroupingError {
    /// Fewer players than the minimum group size.
    NotEnoughPlayers { found: usize, needed: usize },
    /// No integer group count keeps every group within [min, max].
    InfeasibleConstraints {
        players: usize,
        min: usize,
        max: usize,
    },
    /// Defensive check failed: a produced group fell outside the bounds.
    /// Indicates a bug in the group-count calculation, not bad input.
    SizeInvariantViolation {
        sizes: Vec<usize>,
        min: usize,
        max: usize,
    },
}

impl std::fmt::Display for GroupingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupingError::NotEnoughPlayers { found, needed } => {
                write!(f, "Not enough players: need at least {}, found {}", needed, found)
            }
            GroupingError::InfeasibleConstraints { players, min, max } => write!(
                f,
                "Cannot form valid groups from {} players (min: {}, max: {})",
                players, min, max
            ),
            GroupingError::SizeInvariantViolation { sizes, min, max } => write!(
                f,
                "Internal grouping error: produced group sizes {:?} outside [{}, {}]",
                sizes, min, max
            ),
        }
    }
}

/// Spreadsheet-style group labels: A..Z, then AA, AB, ...
fn group_label(index: usize) -> String {
    let mut n = index;
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("Group {}", letters)
}

/// Partition `player_ids` into balanced groups obeying `min_group_size ..= max_group_size`.
///
/// 1. Fail early when there are not enough players for even one group.
/// 2. Feasible group counts: `k_min = ceil(n/max)`, `k_max = floor(n/min)`;
///    an empty range means no valid grouping exists.
/// 3. Use `k = k_min` - the fewest groups, so groups are as large as allowed,
///    which minimizes the total match count (round robin grows quadratically).
/// 4. Shuffle with the caller's RNG (seeded in tests, thread_rng in production).
/// 5. Deal players round-robin: player `i` goes to group `i % k`, so sizes
///    differ by at most 1.
///
/// The final size check should be unreachable; if it trips, the caller gets a
/// hard internal error instead of invalid groups.
pub fn group_players<R: Rng + ?Sized>(
    player_ids: &[PlayerId],
    min_group_size: usize,
    max_group_size: usize,
    rng: &mut R,
) -> Result<Vec<Group>, GroupingError> {
    let n = player_ids.len();
    if min_group_size == 0 || min_group_size > max_group_size {
        return Err(GroupingError::InfeasibleConstraints {
            players: n,
            min: min_group_size,
            max: max_group_size,
        });
    }
    if n < min_group_size {
        return Err(GroupingError::NotEnoughPlayers {
            found: n,
            needed: min_group_size,
        });
    }

    let k_min = n.div_ceil(max_group_size);
    let k_max = n / min_group_size;
    if k_min > k_max {
        return Err(GroupingError::InfeasibleConstraints {
            players: n,
            min: min_group_size,
            max: max_group_size,
        });
    }
    let k = k_min;

    let mut shuffled: Vec<PlayerId> = player_ids.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Vec<Group> = (0..k)
        .map(|i| Group {
            id: Uuid::new_v4(),
            name: group_label(i),
            player_ids: Vec::new(),
        })
        .collect();
    for (i, id) in shuffled.into_iter().enumerate() {
        groups[i % k].player_ids.push(id);
    }

    let out_of_bounds = groups.iter().any(|g| {
        g.player_ids.len() < min_group_size || g.player_ids.len() > max_group_size
    });
    if out_of_bounds {
        return Err(GroupingError::SizeInvariantViolation {
            sizes: groups.iter().map(|g| g.player_ids.len()).collect(),
            min: min_group_size,
            max: max_group_size,
        });
    }

    Ok(groups)
}
