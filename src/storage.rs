//! Wholesale JSON snapshot of the tournament aggregate.
//!
//! The aggregate is small and mutated by a single admin, so every change
//! rewrites the whole file. Writes go through a temp file + rename so a crash
//! never leaves a torn snapshot.

use crate::models::TournamentData;
use std::io;
use std::path::Path;

/// Load the aggregate from `path`. A missing file yields the default empty
/// tournament; a corrupt one is logged and ignored rather than taking the
/// server down.
pub fn load(path: &Path) -> TournamentData {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return TournamentData::default(),
        Err(e) => {
            log::warn!("Could not read snapshot {}: {}", path.display(), e);
            return TournamentData::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(e) => {
            log::warn!(
                "Ignoring corrupt snapshot {}: {} (starting with an empty tournament)",
                path.display(),
                e
            );
            TournamentData::default()
        }
    }
}

/// Write the aggregate to `path` atomically.
pub fn save(path: &Path, data: &TournamentData) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data).map_err(io::Error::from)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)
}
