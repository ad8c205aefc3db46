use std::path::PathBuf;

use anyhow::Result;

use understat_shotmap::config::{PlotConfig, load_env_files};
use understat_shotmap::persist::load_player_shots;
use understat_shotmap::render::save_shot_map;
use understat_shotmap::shot_map::flatten_shots;

fn main() -> Result<()> {
    load_env_files();

    let mut cfg = PlotConfig::from_env();
    if let Some(input) = flag_path("--input") {
        cfg.input = input;
    }
    if let Some(output) = flag_path("--output") {
        cfg.output = output;
    }
    if let Some(title) = flag_value("--title") {
        cfg.title = title;
    }

    println!("Loading shot data from {}...", cfg.input.display());
    let by_player = load_player_shots(&cfg.input)?;

    let shots = flatten_shots(&by_player)?;
    println!(
        "Rendering {} shots from {} players...",
        shots.len(),
        by_player.len()
    );

    let drawn = save_shot_map(&cfg, &shots)?;
    let skipped = shots.len() - drawn;
    println!("Saved shot map to {}", cfg.output.display());
    println!("Markers drawn: {drawn} (skipped {skipped} outside the attacking half)");
    Ok(())
}

fn flag_path(flag: &str) -> Option<PathBuf> {
    flag_value(flag).map(PathBuf::from)
}

fn flag_value(flag: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(flag)
            && let Some(value) = value.strip_prefix('=')
        {
            if !value.trim().is_empty() {
                return Some(value.to_string());
            }
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
        {
            if !next.trim().is_empty() {
                return Some(next.to_string());
            }
        }
    }
    None
}
