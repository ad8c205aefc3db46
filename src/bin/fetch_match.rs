use std::path::PathBuf;

use anyhow::Result;

use understat_shotmap::config::{FetchConfig, load_env_files};
use understat_shotmap::match_fetch::{fetch_match_page, match_url, parse_match_page};
use understat_shotmap::persist::save_player_shots;
use understat_shotmap::reshape::{group_shots_by_player, total_shots};

fn main() -> Result<()> {
    load_env_files();

    let mut cfg = FetchConfig::from_env();
    if let Some(match_id) = parse_match_id_arg() {
        cfg.match_id = match_id;
    }
    if let Some(data_dir) = parse_data_dir_arg() {
        cfg.data_dir = data_dir;
    }

    let url = match_url(cfg.match_id);
    println!("Fetching match data from {url}...");
    let page = fetch_match_page(&url)?;

    println!("Parsing shots data...");
    let shots = parse_match_page(&page)?;
    let (home_shots, away_shots) = (shots.h.len(), shots.a.len());

    println!("Organizing by player with team info...");
    let by_player = group_shots_by_player(shots)?;

    let output = cfg.output_path();
    println!("Saving structured shot data to {}...", output.display());
    save_player_shots(&output, &by_player)?;

    println!(
        "Done: {} shots ({home_shots} home, {away_shots} away) across {} players",
        total_shots(&by_player),
        by_player.len()
    );
    Ok(())
}

fn parse_match_id_arg() -> Option<u32> {
    flag_value("--match-id").and_then(|raw| raw.trim().parse::<u32>().ok())
}

fn parse_data_dir_arg() -> Option<PathBuf> {
    flag_value("--data-dir").map(PathBuf::from)
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
