use std::env;
use std::path::PathBuf;

use crate::persist::player_shots_path;

const DEFAULT_MATCH_ID: u32 = 26727;
const DEFAULT_DATA_DIR: &str = "data/understat";
const DEFAULT_PLOT_DIR: &str = "plots";
const DEFAULT_PLOT_WIDTH: u32 = 900;
const DEFAULT_PLOT_HEIGHT: u32 = 1200;

/// Loads .env.local then .env, same as the terminal tooling this grew out
/// of. Missing files are fine.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub match_id: u32,
    pub data_dir: PathBuf,
}

impl FetchConfig {
    pub fn from_env() -> Self {
        Self {
            match_id: env_u32("SHOTMAP_MATCH_ID", DEFAULT_MATCH_ID),
            data_dir: env_path("SHOTMAP_DATA_DIR")
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        player_shots_path(&self.data_dir, self.match_id)
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl PlotConfig {
    pub fn from_env() -> Self {
        let fetch = FetchConfig::from_env();
        let input = env_path("SHOTMAP_INPUT").unwrap_or_else(|| fetch.output_path());
        let output = env_path("SHOTMAP_PLOT_PATH").unwrap_or_else(|| {
            PathBuf::from(DEFAULT_PLOT_DIR)
                .join(format!("shot_map_{}_half_pitch.png", fetch.match_id))
        });
        let title = env_string("SHOTMAP_TITLE")
            .unwrap_or_else(|| format!("Shot Map: match {}", fetch.match_id));
        Self {
            input,
            output,
            title,
            width: env_u32("SHOTMAP_PLOT_WIDTH", DEFAULT_PLOT_WIDTH),
            height: env_u32("SHOTMAP_PLOT_HEIGHT", DEFAULT_PLOT_HEIGHT),
        }
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key).map(PathBuf::from)
}
