use anyhow::{Context, Result, anyhow};
use glam::Vec3;
use std::env;

use crate::input::InputScheme;

/// Bewegungs- und Regelwerte des Spielers.
#[derive(Clone, Copy, Debug)]
pub struct PlayerTuning {
    pub walk_speed: f32,
    pub run_multiplier: f32,
    /// negativ = nach unten
    pub gravity: f32,
    pub jump_impulse: f32,
    pub max_dt: f32,
    pub look_sensitivity: f32,
    pub fall_threshold: f32,
    pub win_radius: f32,
    pub height: f32,
    pub radius: f32,
    /// Augenhöhe als Anteil der Körperhöhe über der Mitte
    pub eye_factor: f32,
    pub spawn: Vec3,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 5.5,
            run_multiplier: 1.9,
            gravity: -30.0,
            jump_impulse: 10.0,
            max_dt: 0.05,
            look_sensitivity: 0.0028,
            fall_threshold: -20.0,
            win_radius: 1.6,
            height: 1.8,
            radius: 0.35,
            eye_factor: 0.45,
            spawn: Vec3::new(0.0, 2.0, 0.0),
        }
    }
}

/// Parameter für die Level-Generierung. Das Level läuft entlang -Z.
#[derive(Clone, Copy, Debug)]
pub struct LevelConfig {
    pub platform_count: usize,
    pub start_size: f32,
    /// Abstand vom Start bis zum Cursor vor der ersten Lücke
    pub lead_in: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub lateral_spread: f32,
    pub bonus_height: f32,
    pub bonus_every: usize,
    pub base_width: f32,
    pub width_step: f32,
    pub width_cycle: usize,
    pub depth: f32,
    pub thickness: f32,
    pub obstacle_chance: f64,
    pub obstacle_size: f32,
    pub obstacle_lift: f32,
    pub goal_offset: f32,
    pub goal_size: f32,
    pub marker_height: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            platform_count: 10,
            start_size: 8.0,
            lead_in: 8.0,
            gap_min: 4.0,
            gap_max: 7.0,
            lateral_spread: 1.5,
            bonus_height: 0.8,
            bonus_every: 4,
            base_width: 6.0,
            width_step: 1.2,
            width_cycle: 3,
            depth: 6.0,
            thickness: 0.5,
            obstacle_chance: 0.4,
            obstacle_size: 1.4,
            obstacle_lift: 1.0,
            goal_offset: 6.0,
            goal_size: 10.0,
            marker_height: 1.0,
        }
    }
}

/// Kommandozeilen-Optionen des Hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    pub seed: Option<u64>,
    pub platforms: Option<usize>,
    /// None = Umgebung entscheidet
    pub scheme: Option<InputScheme>,
}

const USAGE: &str = "Usage: parkour_run [--seed <u64>] [--platforms <n>] [--touch | --desktop]";

impl Options {
    pub fn parse() -> Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Options::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let v = args.next().ok_or_else(|| anyhow!("--seed needs a value. {USAGE}"))?;
                    out.seed = Some(v.parse().with_context(|| format!("invalid seed {v}"))?);
                }
                "--platforms" => {
                    let v = args
                        .next()
                        .ok_or_else(|| anyhow!("--platforms needs a value. {USAGE}"))?;
                    out.platforms =
                        Some(v.parse().with_context(|| format!("invalid platform count {v}"))?);
                }
                "--touch" => out.scheme = Some(InputScheme::Touch),
                "--desktop" => out.scheme = Some(InputScheme::Desktop),
                other => return Err(anyhow!("Unknown argument: {other}. {USAGE}")),
            }
        }

        Ok(out)
    }

    /// Einmalige Entscheidung beim Start, wird danach nicht mehr geprüft.
    pub fn input_scheme(&self) -> InputScheme {
        if let Some(s) = self.scheme {
            return s;
        }
        match env::var("PARKOUR_TOUCH") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => InputScheme::Touch,
            _ => InputScheme::Desktop,
        }
    }

    pub fn level_config(&self) -> LevelConfig {
        let mut cfg = LevelConfig::default();
        if let Some(n) = self.platforms {
            cfg.platform_count = n;
        }
        cfg
    }
}
