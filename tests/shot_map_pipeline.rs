use std::fs;
use std::path::PathBuf;

use understat_shotmap::match_fetch::parse_match_page;
use understat_shotmap::reshape::group_shots_by_player;
use understat_shotmap::shot_map::{flatten_shots, in_attacking_half, outcome_color, scale_coords};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn flattens_the_persisted_mapping_in_stored_order() {
    let page = read_fixture("match_page.html");
    let shots = parse_match_page(&page).expect("fixture should parse");
    let by_player = group_shots_by_player(shots).expect("fixture shots are well-formed");

    let flat = flatten_shots(&by_player).expect("all required fields present");
    assert_eq!(flat.len(), 4);

    // Per-player order first, then encounter order inside each player.
    let players: Vec<&str> = flat.iter().map(|s| s.player.as_str()).collect();
    assert_eq!(players, ["Bruno Nine", "Bruno Nine", "René Ten", "Omar Winger"]);

    assert_eq!(flat[0].xg, 0.7606);
    assert_eq!(flat[0].team, "Alpha");
    assert_eq!(flat[3].team, "Omega");
}

#[test]
fn attacking_half_filter_drops_own_half_shots() {
    let page = read_fixture("match_page.html");
    let shots = parse_match_page(&page).expect("fixture should parse");
    let by_player = group_shots_by_player(shots).expect("fixture shots are well-formed");
    let flat = flatten_shots(&by_player).expect("all required fields present");

    let drawn: Vec<_> = flat
        .iter()
        .filter(|shot| in_attacking_half(scale_coords(shot.x, shot.y).0))
        .collect();

    // The 0.4 corner shot scales to x = 48 and stays off the map.
    assert_eq!(drawn.len(), 3);
    assert!(drawn.iter().all(|shot| scale_coords(shot.x, shot.y).0 >= 60.0));
}

#[test]
fn every_fixture_outcome_has_a_color() {
    let page = read_fixture("match_page.html");
    let shots = parse_match_page(&page).expect("fixture should parse");
    let by_player = group_shots_by_player(shots).expect("fixture shots are well-formed");
    let flat = flatten_shots(&by_player).expect("all required fields present");

    // Every fixture outcome is a known category, so none fall back to gray.
    for shot in &flat {
        assert_ne!(
            outcome_color(&shot.result),
            understat_shotmap::shot_map::NEUTRAL_COLOR,
            "unexpected fallback for {}",
            shot.result
        );
    }
}
