use glam::Vec3;

use crate::level::Level;

/// Parameter für einen Boden-Test nach unten.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundProbe {
    /// Reichweite des Strahls
    pub reach: f32,
    /// Treffer nur bis zu dieser Distanz
    pub contact_distance: f32,
    /// normal.y muss darüber liegen
    pub min_normal_y: f32,
    /// Mitte liegt mindestens so hoch über der Fläche
    pub rest_offset: f32,
}

impl GroundProbe {
    /// Test vor der Integration: nur halbwegs flache Flächen, Mitte auf halbe Körperhöhe.
    pub fn support(player_height: f32) -> Self {
        Self {
            reach: 1.2,
            contact_distance: 1.05,
            min_normal_y: 0.45,
            rest_offset: player_height * 0.5,
        }
    }

    /// Korrektur nach der Integration: wer eingesunken ist, wird hochgeschoben.
    pub fn penetration() -> Self {
        Self {
            reach: 1.4,
            contact_distance: 1.05,
            min_normal_y: f32::NEG_INFINITY,
            rest_offset: 1.05,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundContact {
    pub grounded: bool,
    pub position: Vec3,
    pub velocity: Vec3,
}

pub fn resolve_ground_contact(level: &Level, position: Vec3, velocity: Vec3, probe: GroundProbe) -> GroundContact {
    let miss = GroundContact {
        grounded: false,
        position,
        velocity,
    };

    let Some(hit) = level.cast_ray(position, Vec3::NEG_Y, probe.reach) else {
        return miss;
    };

    if hit.distance > probe.contact_distance || hit.normal.y <= probe.min_normal_y {
        return miss;
    }

    let mut position = position;
    let mut velocity = velocity;
    position.y = position.y.max(hit.point.y + probe.rest_offset);
    // Restgeschwindigkeit nach unten (und nach oben) weg
    velocity.y = 0.0;

    GroundContact {
        grounded: true,
        position,
        velocity,
    }
}
