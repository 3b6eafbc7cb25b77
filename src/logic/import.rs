//! Bulk player import from CSV (Name, MobileNumber, Categories, Paid(Y/N)).

use crate::models::{Player, TournamentData};
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of a bulk import: how many players were added, and one diagnostic
/// line per skipped row.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: Vec<String>,
}

/// Errors that reject the whole import (individual bad rows are only skipped).
#[derive(Debug)]
pub enum ImportError {
    /// A required header column is absent.
    MissingColumn(&'static str),
    /// The CSV header itself could not be read.
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::MissingColumn(name) => {
                write!(f, "CSV is missing required column \"{}\"", name)
            }
            ImportError::Csv(e) => write!(f, "Could not read CSV: {}", e),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(e: csv::Error) -> Self {
        ImportError::Csv(e)
    }
}

/// Match a raw CSV category against the configured ones. Accepts the exact
/// name, or a bare numeric shorthand for a "+" bracket ("40" for "40+").
fn resolve_category(configured: &[String], raw: &str) -> Option<String> {
    if let Some(c) = configured.iter().find(|c| c.as_str() == raw) {
        return Some(c.clone());
    }
    let with_plus = format!("{}+", raw);
    configured.iter().find(|c| **c == with_plus).cloned()
}

/// Import players from CSV text into the aggregate.
///
/// Rows missing a name, mobile number or recognizable category are skipped
/// with a diagnostic, as are rows whose mobile number duplicates an existing
/// player or an earlier row in the same batch. Accepted rows are appended.
pub fn import_players_csv(
    data: &mut TournamentData,
    csv_text: &str,
) -> Result<ImportReport, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(ImportError::MissingColumn(name))
    };
    let name_col = column("Name")?;
    let mobile_col = column("MobileNumber")?;
    let category_col = column("Categories")?;
    let paid_col = headers.iter().position(|h| h == "Paid(Y/N)");

    let mut report = ImportReport::default();
    let mut seen_mobiles: HashSet<String> =
        data.players.iter().map(|p| p.mobile.clone()).collect();

    for (i, record) in reader.records().enumerate() {
        let line = i + 2; // header is line 1
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                report.skipped.push(format!("line {}: {}", line, e));
                continue;
            }
        };
        let name = record.get(name_col).unwrap_or("").trim();
        let mobile = record.get(mobile_col).unwrap_or("").trim();
        let raw_category = record.get(category_col).unwrap_or("").trim();
        if name.is_empty() || mobile.is_empty() || raw_category.is_empty() {
            report
                .skipped
                .push(format!("line {}: missing name, mobile number or category", line));
            continue;
        }
        let category = match resolve_category(&data.settings.categories, raw_category) {
            Some(c) => c,
            None => {
                report.skipped.push(format!(
                    "line {}: category \"{}\" is not defined in tournament settings",
                    line, raw_category
                ));
                continue;
            }
        };
        if seen_mobiles.contains(mobile) {
            report.skipped.push(format!(
                "line {}: mobile number {} already registered",
                line, mobile
            ));
            continue;
        }
        let fee_paid = paid_col
            .and_then(|c| record.get(c))
            .map(|v| v.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false);

        seen_mobiles.insert(mobile.to_string());
        data.players
            .push(Player::new(name, mobile, vec![category], fee_paid));
        report.added += 1;
    }

    Ok(report)
}
