use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::reshape::PlayerShotMap;

pub fn player_shots_path(data_dir: &Path, match_id: u32) -> PathBuf {
    data_dir.join(format!("{match_id}_by_player.json"))
}

/// Writes the mapping as indented JSON. The swap through a temp file means
/// a failed run leaves either no file or the previous one, never a torn
/// write.
pub fn save_player_shots(path: &Path, by_player: &PlayerShotMap) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(by_player).context("serialize player shots")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write player shots")?;
    fs::rename(&tmp, path).context("swap player shots")?;
    Ok(())
}

pub fn load_player_shots(path: &Path) -> Result<PlayerShotMap> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("invalid player shots json")
}
