//! Integration tests for CSV bulk import, CSV exports, and snapshot persistence.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_fixture_web::{
    generate_fixtures, groups_csv, import_players_csv, match_results_csv, players_csv, storage,
    CategoryFixture, Group, ImportError, Match, TournamentData, TournamentSettings,
};
use uuid::Uuid;

fn empty_tournament() -> TournamentData {
    let mut data = TournamentData::default();
    data.update_settings(TournamentSettings {
        name: "Spring Open".to_string(),
        types: vec!["Singles".to_string()],
        categories: vec!["Open".to_string(), "40+".to_string()],
        min_group_size: 4,
        max_group_size: 6,
    })
    .unwrap();
    data
}

#[test]
fn import_adds_valid_rows_and_skips_bad_ones() {
    let mut data = empty_tournament();
    let csv = "\
Name,MobileNumber,Categories,Paid(Y/N)
Asha,9000000001,Open,Y
Ravi,9000000002,40,N
,9000000003,Open,Y
Kiran,9000000001,Open,Y
Mira,9000000004,Juniors,Y
";
    let report = import_players_csv(&mut data, csv).unwrap();
    assert_eq!(report.added, 2);
    assert_eq!(report.skipped.len(), 3);
    assert_eq!(data.players.len(), 2);

    let asha = &data.players[0];
    assert_eq!(asha.name, "Asha");
    assert!(asha.fee_paid);

    // Bare "40" maps onto the configured "40+" bracket.
    let ravi = &data.players[1];
    assert_eq!(ravi.categories, vec!["40+".to_string()]);
    assert!(!ravi.fee_paid);

    // Diagnostics name the offending line.
    assert!(report.skipped.iter().any(|s| s.contains("line 4")));
    assert!(report.skipped.iter().any(|s| s.contains("already registered")));
    assert!(report.skipped.iter().any(|s| s.contains("Juniors")));
}

#[test]
fn import_skips_mobiles_that_already_exist() {
    let mut data = empty_tournament();
    data.add_player("Asha", "9000000001", vec!["Open".to_string()], true)
        .unwrap();
    let csv = "Name,MobileNumber,Categories,Paid(Y/N)\nSomeone,9000000001,Open,Y\n";
    let report = import_players_csv(&mut data, csv).unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(data.players.len(), 1);
}

#[test]
fn import_without_required_column_is_rejected() {
    let mut data = empty_tournament();
    let csv = "Name,Categories,Paid(Y/N)\nAsha,Open,Y\n";
    assert!(matches!(
        import_players_csv(&mut data, csv),
        Err(ImportError::MissingColumn("MobileNumber"))
    ));
    assert!(data.players.is_empty());
}

#[test]
fn players_export_has_header_and_one_row_per_player() {
    let mut data = empty_tournament();
    data.add_player("Asha", "9000000001", vec!["Open".to_string()], true)
        .unwrap();
    data.add_player(
        "Ravi",
        "9000000002",
        vec!["Open".to_string(), "40+".to_string()],
        false,
    )
    .unwrap();

    let csv = players_csv(&data).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Player ID,Name,Mobile Number,Category 1,Category 2,Fee Paid"
    );
    assert!(lines[1].contains("Asha") && lines[1].ends_with("Yes"));
    assert!(lines[2].contains("40+") && lines[2].ends_with("No"));
}

#[test]
fn groups_export_lists_one_row_per_group() {
    let mut data = empty_tournament();
    for i in 0..10 {
        data.add_player(
            format!("P{i}"),
            format!("90000000{i:02}"),
            vec!["Open".to_string()],
            true,
        )
        .unwrap();
    }
    generate_fixtures(&mut data, "Open", "Singles", &mut StdRng::seed_from_u64(3)).unwrap();

    let csv = groups_csv(&data).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 groups
    assert!(lines[1].starts_with("Open,Singles,"));
    assert!(lines[1].contains("Group A"));
}

#[test]
fn match_export_renders_unset_scores_blank_and_unknown_players_by_id() {
    let mut data = empty_tournament();
    let ghost = Uuid::new_v4();
    let mut m = Match::new("Open", "Singles", "Group A", ghost, Uuid::new_v4());
    m.score1 = Some(11);
    data.fixtures.push(CategoryFixture {
        category: "Open".to_string(),
        tournament_type: "Singles".to_string(),
        groups: vec![Group {
            id: Uuid::new_v4(),
            name: "Group A".to_string(),
            player_ids: vec![m.player1_id, m.player2_id],
        }],
        matches: vec![m],
    });

    let csv = match_results_csv(&data).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Match ID,Category,Tournament Type,Group Name,Player 1 Name,Player 2 Name,Score Player 1,Score Player 2,Status"
    );
    let ghost_prefix = &ghost.to_string()[..4];
    assert!(lines[1].contains(&format!("Unknown Player ({})", ghost_prefix)));
    assert!(lines[1].contains(",11,,scheduled"));
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut data = empty_tournament();
    for i in 0..10 {
        data.add_player(
            format!("P{i}"),
            format!("90000000{i:02}"),
            vec!["Open".to_string()],
            i % 2 == 0,
        )
        .unwrap();
    }
    generate_fixtures(&mut data, "Open", "Singles", &mut StdRng::seed_from_u64(9)).unwrap();
    data.publish().unwrap();

    let path = std::env::temp_dir().join(format!("fixture-snapshot-{}.json", Uuid::new_v4()));
    storage::save(&path, &data).unwrap();
    let loaded = storage::load(&path);
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, data);
}

#[test]
fn missing_snapshot_loads_the_default_tournament() {
    let path = std::env::temp_dir().join(format!("no-such-snapshot-{}.json", Uuid::new_v4()));
    let loaded = storage::load(&path);
    assert_eq!(loaded, TournamentData::default());
}
