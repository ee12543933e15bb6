use glam::Vec3;
use log::{debug, info};

use crate::camera::CameraPose;
use crate::config::PlayerTuning;
use crate::ground::{GroundProbe, resolve_ground_contact};
use crate::input::InputState;
use crate::level::Level;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Playing,
    /// Sitzungszeit in Sekunden beim Erreichen des Ziels
    Won { time: f64 },
}

/// Was in einem Frame passiert ist.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub dt: f32,
    pub respawned: bool,
    pub won: bool,
}

/// Frame-Zeit begrenzen, damit Hänger keine Riesensprünge erzeugen.
pub fn clamp_dt(raw: f32, max_dt: f32) -> f32 {
    if raw.is_finite() { raw.clamp(0.0, max_dt) } else { 0.0 }
}

pub struct Game {
    frame: u64,
    level: Level,
    player: Player,
    tuning: PlayerTuning,
    phase: Phase,
    session_time: f64,
}

impl Game {
    pub fn new(level: Level, tuning: PlayerTuning) -> Self {
        Self {
            frame: 0,
            level,
            player: Player::new(tuning.spawn, tuning.height, tuning.radius),
            tuning,
            phase: Phase::Playing,
            session_time: 0.0,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session_time(&self) -> f64 {
        self.session_time
    }

    /// Blickbewegung in Pixeln (Maus oder Touch), gleiche Empfindlichkeit.
    pub fn look_delta(&mut self, dx: f32, dy: f32) {
        let s = self.tuning.look_sensitivity;
        self.player.add_look(-dx * s, -dy * s);
    }

    /// Blick und Neustart übernehmen; Bewegung liest `step` selbst.
    pub fn apply_input(&mut self, input: &mut InputState) {
        let d = input.take_look_delta();
        if d != glam::Vec2::ZERO {
            self.look_delta(d.x, d.y);
        }

        if input.restart && matches!(self.phase, Phase::Won { .. }) {
            self.restart();
            input.jump = false;
        }
    }

    /// Ein kompletter Frame: Eingabe, dann Simulation.
    pub fn frame(&mut self, raw_dt: f32, input: &mut InputState) -> FrameReport {
        self.apply_input(input);
        self.step(raw_dt, input)
    }

    pub fn step(&mut self, raw_dt: f32, input: &mut InputState) -> FrameReport {
        let dt = clamp_dt(raw_dt, self.tuning.max_dt);
        let mut report = FrameReport {
            dt,
            ..Default::default()
        };

        // Siegesdialog offen: alles steht
        if let Phase::Won { .. } = self.phase {
            return report;
        }

        self.frame += 1;
        if raw_dt.is_finite() && raw_dt > 0.0 {
            self.session_time += raw_dt as f64;
        }

        if self.player.position.y < self.tuning.fall_threshold {
            self.respawn(input);
            report.respawned = true;
            return report;
        }

        self.apply_movement(input);
        self.apply_vertical_physics(dt, input);

        self.player.position += self.player.velocity * dt;

        // eingesunken? hochschieben
        let fix = resolve_ground_contact(
            &self.level,
            self.player.position,
            self.player.velocity,
            GroundProbe::penetration(),
        );
        if fix.grounded {
            self.player.position = fix.position;
            self.player.velocity = fix.velocity;
            self.player.on_ground = true;
        }

        if self.player.position.y < self.tuning.fall_threshold {
            self.respawn(input);
            report.respawned = true;
            return report;
        }

        if self.player.position.distance(self.level.goal_marker()) < self.tuning.win_radius {
            self.phase = Phase::Won {
                time: self.session_time,
            };
            report.won = true;
            info!("goal reached after {:.2}s", self.session_time);
        }

        if self.frame % 120 == 0 {
            let p = self.player.position;
            debug!(
                "POS x={:.2} y={:.2} z={:.2} vy={:.2} ground={}",
                p.x, p.y, p.z, self.player.velocity.y, self.player.on_ground
            );
        }

        report
    }

    fn apply_movement(&mut self, input: &InputState) {
        let intent = input.intent();

        let mut speed = self.tuning.walk_speed;
        if input.run {
            speed *= self.tuning.run_multiplier;
        }

        let dir = self.player.forward_xz() * intent.y + self.player.right_xz() * intent.x;
        self.player.velocity.x = dir.x * speed;
        self.player.velocity.z = dir.z * speed;
    }

    fn apply_vertical_physics(&mut self, dt: f32, input: &mut InputState) {
        let contact = resolve_ground_contact(
            &self.level,
            self.player.position,
            self.player.velocity,
            GroundProbe::support(self.player.height),
        );
        self.player.position = contact.position;
        self.player.velocity = contact.velocity;
        self.player.on_ground = contact.grounded;

        // Kontakt hat vy schon auf null gesetzt, Ruhelage braucht nichts weiter
        if self.player.on_ground && input.jump {
            self.player.velocity.y = self.tuning.jump_impulse;
            self.player.on_ground = false;
            input.jump = false;
        }

        self.player.velocity.y += self.tuning.gravity * dt;
    }

    fn respawn(&mut self, input: &mut InputState) {
        debug!(
            "fell to y={:.2}, back to spawn",
            self.player.position.y
        );
        self.player.reset(self.tuning.spawn);
        input.jump = false;
    }

    /// Neustart nach Sieg: Spawn, Uhr auf null, wieder spielen.
    pub fn restart(&mut self) {
        self.player.reset(self.tuning.spawn);
        self.session_time = 0.0;
        self.phase = Phase::Playing;
        info!("restart");
    }

    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::first_person(&self.player, self.tuning.eye_factor)
    }

    pub fn spawn(&self) -> Vec3 {
        self.tuning.spawn
    }
}
