//! Tabular exports: players, fixture groups, and match results as CSV text.

use crate::models::TournamentData;

/// Render the player list as CSV.
pub fn players_csv(data: &TournamentData) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            "Player ID",
            "Name",
            "Mobile Number",
            "Category 1",
            "Category 2",
            "Fee Paid",
        ])?;
        for player in &data.players {
            writer.write_record([
                player.id.to_string(),
                player.name.clone(),
                player.mobile.clone(),
                player.categories.first().cloned().unwrap_or_default(),
                player.categories.get(1).cloned().unwrap_or_default(),
                String::from(if player.fee_paid { "Yes" } else { "No" }),
            ])?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render all fixture groups as CSV, one row per group.
pub fn groups_csv(data: &TournamentData) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            "Category",
            "Tournament Type",
            "Group ID",
            "Group Name",
            "Players in Group (Names)",
            "Players in Group (IDs)",
        ])?;
        for fixture in &data.fixtures {
            for group in &fixture.groups {
                let names: Vec<String> = group
                    .player_ids
                    .iter()
                    .map(|id| data.player_name(*id))
                    .collect();
                let ids: Vec<String> =
                    group.player_ids.iter().map(|id| id.to_string()).collect();
                writer.write_record([
                    fixture.category.clone(),
                    fixture.tournament_type.clone(),
                    group.id.to_string(),
                    group.name.clone(),
                    names.join("; "),
                    ids.join("; "),
                ])?;
            }
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render every match across all fixtures as CSV. Unset scores render blank;
/// the status uses spaces instead of underscores for readability.
pub fn match_results_csv(data: &TournamentData) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            "Match ID",
            "Category",
            "Tournament Type",
            "Group Name",
            "Player 1 Name",
            "Player 2 Name",
            "Score Player 1",
            "Score Player 2",
            "Status",
        ])?;
        for fixture in &data.fixtures {
            for m in &fixture.matches {
                writer.write_record([
                    m.id.to_string(),
                    m.category.clone(),
                    m.tournament_type.clone(),
                    m.group_name.clone(),
                    data.player_name(m.player1_id),
                    data.player_name(m.player2_id),
                    m.score1.map(|s| s.to_string()).unwrap_or_default(),
                    m.score2.map(|s| s.to_string()).unwrap_or_default(),
                    m.status.as_str().replace('_', " "),
                ])?;
            }
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
