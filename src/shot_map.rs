use plotters::style::RGBColor;
use serde_json::Value;

use crate::error::ShotMapError;
use crate::reshape::PlayerShotMap;

pub const PITCH_LENGTH: f64 = 120.0;
pub const PITCH_WIDTH: f64 = 80.0;
pub const ATTACKING_HALF_X: f64 = 60.0;

pub const NEUTRAL_COLOR: RGBColor = RGBColor(128, 128, 128);

/// The known outcome categories. The legend always shows exactly these,
/// whether or not they occur in the data; anything else renders gray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    SavedShot,
    BlockedShot,
    MissedShots,
    Goal,
}

impl ShotOutcome {
    pub const ALL: [ShotOutcome; 4] = [
        ShotOutcome::SavedShot,
        ShotOutcome::BlockedShot,
        ShotOutcome::MissedShots,
        ShotOutcome::Goal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShotOutcome::SavedShot => "SavedShot",
            ShotOutcome::BlockedShot => "BlockedShot",
            ShotOutcome::MissedShots => "MissedShots",
            ShotOutcome::Goal => "Goal",
        }
    }

    pub fn color(self) -> RGBColor {
        match self {
            ShotOutcome::SavedShot => RGBColor(0, 0, 255),
            ShotOutcome::BlockedShot => RGBColor(255, 165, 0),
            ShotOutcome::MissedShots => RGBColor(255, 0, 0),
            ShotOutcome::Goal => RGBColor(0, 128, 0),
        }
    }

    pub fn from_result(result: &str) -> Option<ShotOutcome> {
        ShotOutcome::ALL
            .into_iter()
            .find(|outcome| outcome.label() == result)
    }
}

pub fn outcome_color(result: &str) -> RGBColor {
    ShotOutcome::from_result(result)
        .map(ShotOutcome::color)
        .unwrap_or(NEUTRAL_COLOR)
}

/// One renderable shot, pulled out of the persisted per-player mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatShot {
    pub player: String,
    pub x: f64,
    pub y: f64,
    pub xg: f64,
    pub result: String,
    pub team: String,
}

/// Flattens the mapping into one record per shot, in stored order. Any
/// absent or unparsable required field aborts the run.
pub fn flatten_shots(by_player: &PlayerShotMap) -> Result<Vec<FlatShot>, ShotMapError> {
    let mut flat = Vec::new();
    for (player, shots) in by_player {
        let Some(shots) = shots.as_array() else {
            return Err(ShotMapError::MissingField {
                player: player.clone(),
                field: "shots",
            });
        };
        for shot in shots {
            flat.push(FlatShot {
                player: player.clone(),
                x: required_f64(shot, player, "X")?,
                y: required_f64(shot, player, "Y")?,
                xg: required_f64(shot, player, "xG")?,
                result: required_str(shot, player, "result")?,
                team: required_str(shot, player, "team")?,
            });
        }
    }
    Ok(flat)
}

/// Maps normalized pitch coordinates onto the 120x80 canvas.
pub fn scale_coords(x: f64, y: f64) -> (f64, f64) {
    (x * PITCH_LENGTH, y * PITCH_WIDTH)
}

pub fn in_attacking_half(scaled_x: f64) -> bool {
    scaled_x >= ATTACKING_HALF_X
}

/// Marker radius in pixels, chosen so marker area tracks xG. The floor
/// keeps near-zero chances visible.
pub fn marker_radius(xg: f64) -> i32 {
    let area = xg.max(0.0) * 1000.0;
    ((area / std::f64::consts::PI).sqrt().round() as i32).max(2)
}

fn required_f64(shot: &Value, player: &str, field: &'static str) -> Result<f64, ShotMapError> {
    let value = shot.get(field);
    if let Some(num) = value.and_then(Value::as_f64) {
        return Ok(num);
    }
    // Understat encodes coordinates and xG as numeric strings.
    if let Some(num) = value
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse::<f64>().ok())
    {
        return Ok(num);
    }
    Err(ShotMapError::MissingField {
        player: player.to_string(),
        field,
    })
}

fn required_str(shot: &Value, player: &str, field: &'static str) -> Result<String, ShotMapError> {
    match shot.get(field).and_then(Value::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ShotMapError::MissingField {
            player: player.to_string(),
            field,
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scales_normalized_coordinates_onto_canvas() {
        assert_eq!(scale_coords(0.9, 0.5), (108.0, 40.0));
        assert_eq!(scale_coords(0.0, 0.0), (0.0, 0.0));
        assert_eq!(scale_coords(1.0, 1.0), (PITCH_LENGTH, PITCH_WIDTH));
    }

    #[test]
    fn attacking_half_threshold_is_inclusive() {
        assert!(!in_attacking_half(50.0));
        assert!(!in_attacking_half(59.9));
        assert!(in_attacking_half(60.0));
        assert!(in_attacking_half(108.0));
    }

    #[test]
    fn unknown_outcomes_fall_back_to_neutral() {
        assert_eq!(outcome_color("OwnGoal"), NEUTRAL_COLOR);
        assert_eq!(outcome_color(""), NEUTRAL_COLOR);
        assert_eq!(outcome_color("Goal"), ShotOutcome::Goal.color());
    }

    #[test]
    fn known_outcomes_have_distinct_colors() {
        for outcome in ShotOutcome::ALL {
            assert_eq!(ShotOutcome::from_result(outcome.label()), Some(outcome));
            assert_ne!(outcome.color(), NEUTRAL_COLOR);
        }
    }

    #[test]
    fn marker_radius_grows_with_xg() {
        assert!(marker_radius(0.05) < marker_radius(0.4));
        assert!(marker_radius(0.0) >= 2);
    }

    #[test]
    fn flattens_numeric_strings_and_numbers() {
        let mut by_player = PlayerShotMap::new();
        by_player.insert(
            "Alice".to_string(),
            json!([{
                "X": "0.9",
                "Y": 0.5,
                "xG": "0.3",
                "result": "Goal",
                "team": "Alpha",
            }]),
        );
        let flat = flatten_shots(&by_player).expect("well-formed shot");
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].x, 0.9);
        assert_eq!(flat[0].y, 0.5);
        assert_eq!(flat[0].xg, 0.3);
        assert_eq!(flat[0].team, "Alpha");
    }

    #[test]
    fn missing_required_field_aborts_flatten() {
        let mut by_player = PlayerShotMap::new();
        by_player.insert(
            "Alice".to_string(),
            json!([{"X": "0.9", "Y": "0.5", "result": "Goal", "team": "Alpha"}]),
        );
        let err = flatten_shots(&by_player).expect_err("xG is required");
        assert!(matches!(err, ShotMapError::MissingField { field: "xG", .. }));
    }
}
