use glam::Vec3;
use log::info;
use rand::Rng;

use crate::block::Block;
use crate::config::LevelConfig;

/// Achsenparalleler Quader im Level (Plattform oder Hindernis).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slab {
    pub min: Vec3,
    pub max: Vec3,
    pub block: Block,
}

impl Slab {
    /// Plattform mit Oberkante bei `top`, zentriert auf (x, z).
    pub fn platform(x: f32, top: f32, z: f32, width: f32, depth: f32, thickness: f32, block: Block) -> Self {
        Self {
            min: Vec3::new(x - width * 0.5, top - thickness, z - depth * 0.5),
            max: Vec3::new(x + width * 0.5, top, z + depth * 0.5),
            block,
        }
    }

    pub fn cube(center: Vec3, size: f32, block: Block) -> Self {
        let h = Vec3::splat(size * 0.5);
        Self {
            min: center - h,
            max: center + h,
            block,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Slab-Test. Strahlen, die im Quader starten, treffen ihn nicht
    /// (nur Außenflächen zählen).
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };

            if t0 > t_enter {
                t_enter = t0;
                normal = Vec3::ZERO;
                normal[axis] = -d.signum();
            }
            t_exit = t_exit.min(t1);
        }

        if t_enter < 0.0 || t_enter > t_exit || t_enter > max_distance {
            return None;
        }

        Some(RayHit {
            distance: t_enter,
            point: origin + dir * t_enter,
            normal,
            block: self.block,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    /// zeigt von der getroffenen Fläche weg
    pub normal: Vec3,
    pub block: Block,
}

/// Generierte Strecke. Nach dem Erzeugen unveränderlich.
#[derive(Clone, Debug)]
pub struct Level {
    slabs: Vec<Slab>,
    goal_marker: Vec3,
}

impl Level {
    pub fn generate(cfg: &LevelConfig, rng: &mut impl Rng) -> Self {
        let mut slabs = Vec::with_capacity(cfg.platform_count * 2 + 2);

        slabs.push(Slab::platform(
            0.0,
            0.0,
            0.0,
            cfg.start_size,
            cfg.start_size,
            cfg.thickness,
            Block::Start,
        ));

        let mut z = -cfg.lead_in;
        for i in 0..cfg.platform_count {
            let gap = if cfg.gap_max > cfg.gap_min {
                rng.random_range(cfg.gap_min..=cfg.gap_max)
            } else {
                cfg.gap_min
            };
            z -= gap;

            let x = if cfg.lateral_spread > 0.0 {
                rng.random_range(-cfg.lateral_spread..=cfg.lateral_spread)
            } else {
                0.0
            };

            // jede n-te Plattform etwas höher
            let y = if cfg.bonus_every > 0 && i % cfg.bonus_every == 0 {
                cfg.bonus_height
            } else {
                0.0
            };

            let shrink = if cfg.width_cycle > 0 { (i % cfg.width_cycle) as f32 } else { 0.0 };
            let width = cfg.base_width - shrink * cfg.width_step;

            slabs.push(Slab::platform(x, y, z, width, cfg.depth, cfg.thickness, Block::Step));

            if rng.random_bool(cfg.obstacle_chance.clamp(0.0, 1.0)) {
                slabs.push(Slab::cube(
                    Vec3::new(x, y + cfg.obstacle_lift, z),
                    cfg.obstacle_size,
                    Block::Obstacle,
                ));
            }
        }

        let goal_z = z - cfg.goal_offset;
        slabs.push(Slab::platform(
            0.0,
            0.0,
            goal_z,
            cfg.goal_size,
            cfg.goal_size,
            cfg.thickness,
            Block::Goal,
        ));

        let level = Self {
            slabs,
            goal_marker: Vec3::new(0.0, cfg.marker_height, goal_z),
        };

        info!(
            "level generated: {} platforms, {} obstacles, goal at z={:.2}",
            level.platforms().count(),
            level.obstacles().count(),
            goal_z
        );

        level
    }

    /// Level aus fertigen Teilen, z.B. für handgebaute Strecken.
    pub fn from_parts(slabs: Vec<Slab>, goal_marker: Vec3) -> Self {
        Self { slabs, goal_marker }
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Start, Zwischenplattformen und Ziel in Generierungsreihenfolge.
    pub fn platforms(&self) -> impl Iterator<Item = &Slab> {
        self.slabs.iter().filter(|s| s.block != Block::Obstacle)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Slab> {
        self.slabs.iter().filter(|s| s.block == Block::Obstacle)
    }

    pub fn goal_marker(&self) -> Vec3 {
        self.goal_marker
    }

    /// Nächster Treffer über alle Quader.
    pub fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        if dir.length_squared() == 0.0 {
            return None;
        }
        let dir = dir.normalize();

        self.slabs
            .iter()
            .filter_map(|s| s.ray_hit(origin, dir, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn level(seed: u64) -> Level {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Level::generate(&LevelConfig::default(), &mut rng)
    }

    #[test]
    fn platform_count_includes_start_and_goal() {
        for seed in 0..20 {
            let lvl = level(seed);
            assert_eq!(lvl.platforms().count(), LevelConfig::default().platform_count + 2);
        }
    }

    #[test]
    fn platforms_strictly_recede_along_z() {
        for seed in 0..20 {
            let lvl = level(seed);
            let zs: Vec<f32> = lvl.platforms().map(|p| p.center().z).collect();
            for w in zs.windows(2) {
                assert!(w[1] < w[0], "seed {seed}: {} !< {}", w[1], w[0]);
            }
        }
    }

    #[test]
    fn generated_values_stay_in_range() {
        let cfg = LevelConfig::default();
        for seed in 0..20 {
            let lvl = level(seed);
            let steps: Vec<&Slab> = lvl.platforms().filter(|p| p.block == Block::Step).collect();

            let mut prev_z = -cfg.lead_in;
            for (i, p) in steps.iter().enumerate() {
                let c = p.center();
                let gap = prev_z - c.z;
                assert!(gap >= cfg.gap_min - 1e-4 && gap <= cfg.gap_max + 1e-4);
                assert!(c.x.abs() <= cfg.lateral_spread + 1e-4);
                let want_top = if i % 4 == 0 { 0.8 } else { 0.0 };
                assert_eq!(p.top(), want_top);
                let want_w = 6.0 - (i % 3) as f32 * 1.2;
                assert!((p.size().x - want_w).abs() < 1e-4);
                prev_z = c.z;
            }
        }
    }

    #[test]
    fn goal_marker_sits_above_goal_platform() {
        let lvl = level(7);
        let goal = lvl.platforms().last().copied().unwrap();
        assert_eq!(goal.block, Block::Goal);
        assert!((goal.size().x - 10.0).abs() < 1e-4);
        let m = lvl.goal_marker();
        assert_eq!(m.x, 0.0);
        assert_eq!(m.y, 1.0);
        assert!((m.z - goal.center().z).abs() < 1e-4);
    }

    #[test]
    fn obstacles_sit_on_their_platform() {
        for seed in 0..20 {
            let lvl = level(seed);
            for o in lvl.obstacles() {
                let c = o.center();
                let host = lvl
                    .platforms()
                    .find(|p| (p.center().z - c.z).abs() < 1e-4)
                    .expect("obstacle without platform");
                assert!((c.y - (host.top() + 1.0)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn downward_ray_hits_top_face() {
        let lvl = level(1);
        let hit = lvl
            .cast_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 5.0)
            .expect("start platform below");
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert_eq!(hit.block, Block::Start);
    }

    #[test]
    fn ray_respects_reach_and_inside_start() {
        let s = Slab::platform(0.0, 0.0, 0.0, 4.0, 4.0, 0.5, Block::Step);
        assert!(s.ray_hit(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 2.0).is_none());
        // Start im Quader: kein Treffer
        assert!(s.ray_hit(Vec3::new(0.0, -0.2, 0.0), Vec3::NEG_Y, 2.0).is_none());
        // daneben
        assert!(s.ray_hit(Vec3::new(5.0, 1.0, 0.0), Vec3::NEG_Y, 2.0).is_none());
    }

    #[test]
    fn side_hit_reports_side_normal() {
        let s = Slab::cube(Vec3::ZERO, 2.0, Block::Obstacle);
        let hit = s.ray_hit(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, 10.0).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }
}
