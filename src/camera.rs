// src/camera.rs
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::player::Player;

/// Kamera-Pose in Weltkoordinaten.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    /// Ego-Perspektive: fest am Kopf, erst yaw, dann pitch, kein roll.
    pub fn first_person(player: &Player, eye_factor: f32) -> Self {
        Self {
            position: player.eye_pos(eye_factor),
            rotation: Quat::from_euler(EulerRot::YXZ, player.yaw, player.pitch, 0.0),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }
}

pub struct Camera {
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut cam = Self {
            fov_y: 75.0_f32.to_radians(),
            z_near: 0.1,
            z_far: 1000.0,
            aspect: 1.0,
        };
        cam.resize(width, height);
        cam
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = (width.max(1) as f32) / (height.max(1) as f32);
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self, pose: &CameraPose) -> Mat4 {
        self.projection() * pose.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(yaw: f32, pitch: f32) -> Player {
        let mut p = Player::new(Vec3::new(0.0, 2.0, 0.0), 1.8, 0.35);
        p.add_look(yaw, pitch);
        p
    }

    #[test]
    fn eye_sits_above_body_center() {
        let pose = CameraPose::first_person(&player(0.0, 0.0), 0.45);
        assert!((pose.position - Vec3::new(0.0, 2.0 + 0.81, 0.0)).length() < 1e-5);
    }

    #[test]
    fn forward_follows_yaw_and_pitch() {
        let p = player(0.8, 0.3);
        let pose = CameraPose::first_person(&p, 0.45);
        let f = pose.forward();
        // horizontale Komponente zeigt wie die Laufrichtung
        let flat = Vec3::new(f.x, 0.0, f.z).normalize();
        assert!((flat - p.forward_xz()).length() < 1e-4);
        assert!((f.y - 0.3_f32.sin()).abs() < 1e-4);
    }

    #[test]
    fn no_roll_from_yaw_pitch() {
        let pose = CameraPose::first_person(&player(2.1, -0.9), 0.45);
        let right = pose.rotation * Vec3::X;
        assert!(right.y.abs() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = Camera::new(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
        cam.resize(1920, 0);
        assert_eq!(cam.aspect, 1920.0);
    }
}
