use serde_json::{Map, Value};

use crate::error::ShotMapError;
use crate::match_fetch::ShotsData;

/// Player name -> ordered shot list, in the order players were first seen
/// scanning home shots then away shots. The map serializes in insertion
/// order, so the persisted file keeps it too.
pub type PlayerShotMap = Map<String, Value>;

/// Regroups raw side-keyed shots per player, tagging each shot with the
/// team it belongs to. Shots keep every source field verbatim.
pub fn group_shots_by_player(data: ShotsData) -> Result<PlayerShotMap, ShotMapError> {
    let mut by_player = PlayerShotMap::new();

    for (side_shots, team_field) in [(data.h, "h_team"), (data.a, "a_team")] {
        for mut shot in side_shots {
            let player = required_str(&shot, "player")?;
            let team = required_str(&shot, team_field)?;
            if let Some(obj) = shot.as_object_mut() {
                obj.insert("team".to_string(), Value::String(team));
            }
            let entry = by_player
                .entry(player)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = entry {
                list.push(shot);
            }
        }
    }

    Ok(by_player)
}

pub fn total_shots(by_player: &PlayerShotMap) -> usize {
    by_player
        .values()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .sum()
}

fn required_str(shot: &Value, field: &'static str) -> Result<String, ShotMapError> {
    match shot.get(field).and_then(Value::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ShotMapError::MissingField {
            player: shot
                .get("player")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string(),
            field,
        }),
    }
}
