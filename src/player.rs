use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Pitch-Grenze (knapp unter 90°), damit die Kamera nicht überkippt.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Mitte des Körpers
    pub position: Vec3,
    pub velocity: Vec3,

    // Blickwinkel in Radiant
    pub yaw: f32,
    pub pitch: f32,

    pub height: f32,
    pub radius: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new(spawn: Vec3, height: f32, radius: f32) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            height,
            radius,
            on_ground: false,
        }
    }

    /// Zurück auf den Spawn: Position, Geschwindigkeit und Blick.
    pub fn reset(&mut self, spawn: Vec3) {
        self.position = spawn;
        self.velocity = Vec3::ZERO;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.on_ground = false;
    }

    pub fn eye_pos(&self, eye_factor: f32) -> Vec3 {
        self.position + Vec3::new(0.0, self.height * eye_factor, 0.0)
    }

    /// Blickrichtung auf XZ projiziert (Kamera schaut bei yaw 0 nach -Z).
    pub fn forward_xz(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right_xz(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn add_look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped_yaw_is_not() {
        let mut p = Player::new(Vec3::ZERO, 1.8, 0.35);
        p.add_look(10.0, 5.0);
        assert_eq!(p.pitch, PITCH_LIMIT);
        assert_eq!(p.yaw, 10.0);
        p.add_look(0.0, -50.0);
        assert_eq!(p.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut p = Player::new(Vec3::ZERO, 1.8, 0.35);
        p.add_look(0.7, 0.0);
        let f = p.forward_xz();
        let r = p.right_xz();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
        // rechts = vorne × oben
        assert!((f.cross(Vec3::Y) - r).length() < 1e-5);
    }

    #[test]
    fn reset_restores_spawn_pose() {
        let spawn = Vec3::new(0.0, 2.0, 0.0);
        let mut p = Player::new(spawn, 1.8, 0.35);
        p.position = Vec3::new(4.0, -30.0, 9.0);
        p.velocity = Vec3::splat(3.0);
        p.add_look(1.0, 0.5);
        p.on_ground = true;
        p.reset(spawn);
        assert_eq!(p, Player::new(spawn, 1.8, 0.35));
    }
}
