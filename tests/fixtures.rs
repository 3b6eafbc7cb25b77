//! Integration tests for fixture generation, upload, deletion cascade, publish.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_fixture_web::{
    generate_fixtures, upload_custom_fixtures, CategoryFixture, FixtureError, GroupingError,
    MatchStatus, TournamentData, TournamentError, TournamentSettings,
};

fn settings() -> TournamentSettings {
    TournamentSettings {
        name: "Spring Open".to_string(),
        types: vec!["Singles".to_string()],
        categories: vec!["Open".to_string(), "40+".to_string()],
        min_group_size: 4,
        max_group_size: 6,
    }
}

fn data_with_players(counts: &[(&str, usize)]) -> TournamentData {
    let mut data = TournamentData::default();
    data.update_settings(settings()).unwrap();
    let mut mobile = 9_000_000_000u64;
    for (category, n) in counts {
        for i in 0..*n {
            mobile += 1;
            data.add_player(
                format!("{category} P{i}"),
                mobile.to_string(),
                vec![category.to_string()],
                true,
            )
            .unwrap();
        }
    }
    data
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(1)
}

#[test]
fn generate_creates_groups_and_scheduled_matches() {
    let mut data = data_with_players(&[("Open", 10)]);
    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();

    assert_eq!(data.fixtures.len(), 1);
    let fixture = &data.fixtures[0];
    assert_eq!(fixture.category, "Open");
    assert_eq!(fixture.tournament_type, "Singles");
    assert_eq!(fixture.groups.len(), 2);
    assert_eq!(fixture.matches.len(), 20); // 2 groups of 5, C(5,2) each
    for m in &fixture.matches {
        assert_eq!(m.status, MatchStatus::Scheduled);
        let group = fixture
            .groups
            .iter()
            .find(|g| g.name == m.group_name)
            .unwrap();
        assert!(group.player_ids.contains(&m.player1_id));
        assert!(group.player_ids.contains(&m.player2_id));
    }
}

#[test]
fn generate_only_considers_players_in_the_category() {
    let mut data = data_with_players(&[("Open", 10), ("40+", 3)]);
    // Only 3 players in 40+: grouping must fail even though 13 are registered.
    let err = generate_fixtures(&mut data, "40+", "Singles", &mut rng()).unwrap_err();
    assert_eq!(
        err,
        FixtureError::Grouping(GroupingError::NotEnoughPlayers { found: 3, needed: 4 })
    );
    assert!(data.fixtures.is_empty());
}

#[test]
fn generate_replaces_only_the_same_key() {
    let mut data = data_with_players(&[("Open", 10), ("40+", 5)]);
    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();
    generate_fixtures(&mut data, "40+", "Singles", &mut rng()).unwrap();
    assert_eq!(data.fixtures.len(), 2);

    let veterans_before = data
        .fixtures
        .iter()
        .find(|f| f.category == "40+")
        .cloned()
        .unwrap();
    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();
    assert_eq!(data.fixtures.len(), 2);
    let veterans_after = data
        .fixtures
        .iter()
        .find(|f| f.category == "40+")
        .unwrap();
    assert_eq!(*veterans_after, veterans_before);
}

#[test]
fn generate_rejects_undefined_category_or_type() {
    let mut data = data_with_players(&[("Open", 10)]);
    assert!(matches!(
        generate_fixtures(&mut data, "Juniors", "Singles", &mut rng()),
        Err(FixtureError::Tournament(TournamentError::UnknownCategory(_)))
    ));
    assert!(matches!(
        generate_fixtures(&mut data, "Open", "Doubles", &mut rng()),
        Err(FixtureError::Tournament(TournamentError::UnknownType(_)))
    ));
    assert!(data.fixtures.is_empty());
}

#[test]
fn deleting_a_player_cascades_into_groups_and_matches() {
    let mut data = data_with_players(&[("Open", 10)]);
    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();

    let victim = data.fixtures[0].groups[0].player_ids[0];
    data.delete_player(victim).unwrap();

    assert!(data.get_player(victim).is_none());
    let fixture = &data.fixtures[0];
    // The victim's group shrank to 4 (still >= min), the other kept 5.
    let mut sizes: Vec<usize> = fixture.groups.iter().map(|g| g.player_ids.len()).collect();
    sizes.sort();
    assert_eq!(sizes, vec![4, 5]);
    // Their 4 matches are gone; no remaining match references them.
    assert_eq!(fixture.matches.len(), 16);
    assert!(fixture.matches.iter().all(|m| !m.involves(victim)));
}

#[test]
fn deletion_drops_undersized_groups_and_empty_fixtures() {
    let mut data = data_with_players(&[("Open", 4)]);
    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();
    assert_eq!(data.fixtures.len(), 1);

    // One group of exactly min size: deleting anyone invalidates it,
    // which leaves the fixture with zero groups, which removes the fixture.
    let victim = data.fixtures[0].groups[0].player_ids[0];
    data.delete_player(victim).unwrap();
    assert!(data.fixtures.is_empty());
}

#[test]
fn upload_rejects_fixture_without_category_or_type() {
    let mut data = data_with_players(&[("Open", 4)]);
    let bad = CategoryFixture {
        category: "".to_string(),
        tournament_type: "Singles".to_string(),
        groups: Vec::new(),
        matches: Vec::new(),
    };
    assert_eq!(
        upload_custom_fixtures(&mut data, vec![bad]),
        Err(FixtureError::InvalidCustomFixture { index: 0 })
    );
    assert!(data.fixtures.is_empty());
}

#[test]
fn upload_replaces_existing_fixture_for_the_same_key() {
    let mut data = data_with_players(&[("Open", 10)]);
    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();

    let custom = CategoryFixture {
        category: "Open".to_string(),
        tournament_type: "Singles".to_string(),
        groups: Vec::new(),
        matches: Vec::new(),
    };
    upload_custom_fixtures(&mut data, vec![custom]).unwrap();
    assert_eq!(data.fixtures.len(), 1);
    assert!(data.fixtures[0].groups.is_empty());
}

#[test]
fn uploaded_matches_without_history_get_an_empty_one() {
    // Externally produced JSON may omit history and outcome entirely.
    let json = r#"{
        "category": "Open",
        "tournament_type": "Singles",
        "groups": [],
        "matches": [{
            "id": "9e107d9d-3721-4e0b-9d9e-000000000001",
            "category": "Open",
            "tournament_type": "Singles",
            "group_name": "Group A",
            "player1_id": "9e107d9d-3721-4e0b-9d9e-000000000002",
            "player2_id": "9e107d9d-3721-4e0b-9d9e-000000000003",
            "score1": null,
            "score2": null,
            "status": "scheduled"
        }]
    }"#;
    let fixture: CategoryFixture = serde_json::from_str(json).unwrap();
    assert!(fixture.matches[0].history.is_empty());
    assert_eq!(fixture.matches[0].outcome, None);
}

#[test]
fn upload_rejects_non_array_groups() {
    let json = r#"{"category": "Open", "tournament_type": "Singles", "groups": 3, "matches": []}"#;
    assert!(serde_json::from_str::<CategoryFixture>(json).is_err());
}

#[test]
fn publish_requires_players_and_fixtures() {
    let mut data = TournamentData::default();
    assert!(matches!(
        data.publish(),
        Err(TournamentError::NotReadyToPublish { .. })
    ));

    let mut data = data_with_players(&[("Open", 10)]);
    assert!(matches!(
        data.publish(),
        Err(TournamentError::NotReadyToPublish { .. })
    ));

    generate_fixtures(&mut data, "Open", "Singles", &mut rng()).unwrap();
    data.publish().unwrap();
    assert!(data.is_published);
}

#[test]
fn duplicate_mobile_is_rejected_on_add_but_not_on_self_update() {
    let mut data = data_with_players(&[("Open", 2)]);
    let existing = data.players[0].clone();
    assert_eq!(
        data.add_player("Copy", existing.mobile.clone(), vec!["Open".to_string()], false),
        Err(TournamentError::DuplicateMobile(existing.mobile.clone()))
    );
    // Re-saving a player with their own mobile is fine.
    data.update_player(
        existing.id,
        "Renamed",
        existing.mobile.clone(),
        vec!["Open".to_string()],
        true,
    )
    .unwrap();
    assert_eq!(data.get_player(existing.id).unwrap().name, "Renamed");
}

#[test]
fn players_are_limited_to_two_categories() {
    let mut data = data_with_players(&[]);
    let too_many = vec!["Open".to_string(), "40+".to_string(), "Open".to_string()];
    assert_eq!(
        data.add_player("Greedy", "9111111111", too_many, false),
        Err(TournamentError::TooManyCategories)
    );
}
