use std::fs;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::config::PlotConfig;
use crate::shot_map::{
    ATTACKING_HALF_X, FlatShot, NEUTRAL_COLOR, PITCH_LENGTH, PITCH_WIDTH, ShotOutcome,
    in_attacking_half, marker_radius, outcome_color, scale_coords,
};

const PITCH_BACKGROUND: RGBColor = RGBColor(244, 244, 244);

// Attacking-half markings, in canvas units.
const PENALTY_BOX: [(f64, f64); 2] = [(100.2, 21.1), (120.0, 58.9)];
const SIX_YARD_BOX: [(f64, f64); 2] = [(113.4, 30.2), (120.0, 49.8)];
const GOAL_MOUTH: [(f64, f64); 2] = [(119.5, 36.0), (120.0, 44.0)];
const CENTER_ARC_RADIUS: f64 = 10.0;
const PENALTY_SPOT: (f64, f64) = (106.1, 40.0);
const PENALTY_ARC_RADIUS: f64 = 9.15;

const XG_KEY_SIZES: [f64; 5] = [0.05, 0.1, 0.2, 0.3, 0.4];

type PitchArea<DB> = DrawingArea<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders the attacking-half shot map to the configured PNG path and
/// returns how many markers were drawn.
pub fn save_shot_map(cfg: &PlotConfig, shots: &[FlatShot]) -> Result<usize> {
    if let Some(dir) = cfg.output.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let root = BitMapBackend::new(&cfg.output, (cfg.width, cfg.height)).into_drawing_area();
    let drawn = draw_shot_map(&root, shots, &cfg.title)?;
    root.present().context("write shot map image")?;
    Ok(drawn)
}

pub fn draw_shot_map<DB>(
    root: &DrawingArea<DB, Shift>,
    shots: &[FlatShot],
    title: &str,
) -> Result<usize>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&PITCH_BACKGROUND)?;
    let titled = root.titled(
        title,
        FontDesc::new(FontFamily::SansSerif, 28.0, FontStyle::Bold),
    )?;

    let chart = ChartBuilder::on(&titled)
        .margin(20)
        .build_cartesian_2d(ATTACKING_HALF_X..PITCH_LENGTH, 0.0..PITCH_WIDTH)?;
    let area = chart.plotting_area();

    draw_pitch(area)?;

    let mut drawn = 0;
    for shot in shots {
        let (x, y) = scale_coords(shot.x, shot.y);
        if !in_attacking_half(x) {
            continue;
        }
        let radius = marker_radius(shot.xg);
        let color = outcome_color(&shot.result);
        area.draw(&Circle::new((x, y), radius, color.mix(0.7).filled()))?;
        area.draw(&Circle::new((x, y), radius, BLACK.stroke_width(1)))?;
        drawn += 1;
    }

    draw_legend(area)?;
    draw_size_key(area)?;

    Ok(drawn)
}

fn draw_pitch<DB>(area: &PitchArea<DB>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    area.draw(&PathElement::new(
        vec![
            (ATTACKING_HALF_X, 0.0),
            (ATTACKING_HALF_X, PITCH_WIDTH),
            (PITCH_LENGTH, PITCH_WIDTH),
            (PITCH_LENGTH, 0.0),
            (ATTACKING_HALF_X, 0.0),
        ],
        BLACK.stroke_width(2),
    ))?;

    // Halfway line, dashed.
    let mut y = 0.0;
    while y < PITCH_WIDTH {
        let end = (y + 2.0).min(PITCH_WIDTH);
        area.draw(&PathElement::new(
            vec![(ATTACKING_HALF_X, y), (ATTACKING_HALF_X, end)],
            BLACK.stroke_width(1),
        ))?;
        y += 4.0;
    }

    // Visible half of the center circle.
    area.draw(&PathElement::new(
        arc_points(
            (ATTACKING_HALF_X, PITCH_WIDTH / 2.0),
            CENTER_ARC_RADIUS,
            -90.0,
            90.0,
        ),
        &BLACK,
    ))?;

    area.draw(&Rectangle::new(PENALTY_BOX, &BLACK))?;
    area.draw(&Rectangle::new(SIX_YARD_BOX, &BLACK))?;
    area.draw(&Rectangle::new(GOAL_MOUTH, BLACK.filled()))?;

    // Penalty arc bulging away from the goal.
    area.draw(&PathElement::new(
        arc_points(PENALTY_SPOT, PENALTY_ARC_RADIUS, 130.0, 230.0),
        &BLACK,
    ))?;

    Ok(())
}

fn draw_legend<DB>(area: &PitchArea<DB>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let title_font = FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Bold);
    let label_font = FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal);

    area.draw(&Text::new("Shot Result", (62.0, 17.5), title_font))?;
    for (idx, outcome) in ShotOutcome::ALL.into_iter().enumerate() {
        let y = 14.0 - idx as f64 * 3.0;
        area.draw(&Circle::new((63.0, y), 6, outcome.color().filled()))?;
        area.draw(&Circle::new((63.0, y), 6, BLACK.stroke_width(1)))?;
        area.draw(&Text::new(outcome.label(), (65.0, y + 0.7), label_font.clone()))?;
    }
    Ok(())
}

fn draw_size_key<DB>(area: &PitchArea<DB>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let title_font = FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Bold);
    let caption_font = FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal);

    for (idx, xg) in XG_KEY_SIZES.into_iter().enumerate() {
        let x = 63.0 + idx as f64 * 4.0;
        area.draw(&Circle::new(
            (x, 74.0),
            marker_radius(xg),
            NEUTRAL_COLOR.mix(0.4).filled(),
        ))?;
        area.draw(&Circle::new((x, 74.0), marker_radius(xg), BLACK.stroke_width(1)))?;
    }
    area.draw(&Text::new("Low xG", (61.5, 77.5), caption_font.clone()))?;
    area.draw(&Text::new("High xG", (77.5, 77.5), caption_font))?;
    area.draw(&Text::new("xG Marker Size", (67.0, 79.8), title_font))?;
    Ok(())
}

fn arc_points(center: (f64, f64), radius: f64, theta1: f64, theta2: f64) -> Vec<(f64, f64)> {
    let steps = 64;
    (0..=steps)
        .map(|i| {
            let t = (theta1 + (theta2 - theta1) * i as f64 / steps as f64).to_radians();
            (center.0 + radius * t.cos(), center.1 + radius * t.sin())
        })
        .collect()
}
