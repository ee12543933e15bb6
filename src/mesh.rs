use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::block::Block;
use crate::input::TouchLayout;
use crate::level::{Level, Slab};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const GOAL_MARKER_COLOR: [f32; 3] = [0.67, 1.0, 0.6];
const GOAL_MARKER_SIZE: f32 = 1.1;
const BACKDROP_COLOR: [f32; 3] = [0.13, 0.2, 0.27];
const BACKDROP_Y: f32 = -80.0;
const BACKDROP_HALF: f32 = 200.0;

/// Gesamtmesh für das Level: Quader, Zielmarke und der Boden weit unten.
pub fn mesh_level(level: &Level) -> (Vec<Vertex>, Vec<u32>) {
    let mut verts: Vec<Vertex> = Vec::new();
    let mut inds: Vec<u32> = Vec::new();

    for slab in level.slabs() {
        push_box(&mut verts, &mut inds, slab.min, slab.max, shade(slab));
    }

    let m = level.goal_marker();
    let h = Vec3::splat(GOAL_MARKER_SIZE * 0.5);
    push_box(&mut verts, &mut inds, m - h, m + h, GOAL_MARKER_COLOR);

    let y = BACKDROP_Y;
    let r = BACKDROP_HALF;
    push_face(
        &mut verts,
        &mut inds,
        BACKDROP_COLOR,
        [-r, y, -r],
        [-r, y, r],
        [r, y, r],
        [r, y, -r],
    );

    (verts, inds)
}

const HUD_BASE_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
const HUD_KNOB_COLOR: [f32; 3] = [0.9, 0.9, 0.9];
const HUD_JUMP_COLOR: [f32; 3] = [0.25, 0.25, 0.25];
const HUD_SEGMENTS: u32 = 32;
/// Knopf im Verhältnis zum Widget
const KNOB_RATIO: f32 = 0.4;

/// Touch-Bedienelemente in Bildschirmpixeln (z = 0): Stick-Basis, Knopf, JUMP-Feld.
pub fn mesh_touch_controls(layout: &TouchLayout, joystick: Vec2) -> (Vec<Vertex>, Vec<u32>) {
    let mut verts: Vec<Vertex> = Vec::new();
    let mut inds: Vec<u32> = Vec::new();

    push_disc(&mut verts, &mut inds, layout.joy_center, layout.joy_radius, HUD_BASE_COLOR);

    // Stick-y zeigt nach vorne, Bildschirm-y nach unten
    let knob = layout.joy_center + Vec2::new(joystick.x, -joystick.y) * layout.joy_travel;
    push_disc(&mut verts, &mut inds, knob, layout.joy_radius * KNOB_RATIO, HUD_KNOB_COLOR);

    let (a, b) = (layout.jump_min, layout.jump_max);
    push_face(
        &mut verts,
        &mut inds,
        HUD_JUMP_COLOR,
        [a.x, a.y, 0.0],
        [a.x, b.y, 0.0],
        [b.x, b.y, 0.0],
        [b.x, a.y, 0.0],
    );

    (verts, inds)
}

fn push_disc(verts: &mut Vec<Vertex>, inds: &mut Vec<u32>, center: Vec2, radius: f32, color: [f32; 3]) {
    let base = verts.len() as u32;
    verts.push(Vertex {
        pos: [center.x, center.y, 0.0],
        color,
    });
    for k in 0..HUD_SEGMENTS {
        let a = k as f32 / HUD_SEGMENTS as f32 * std::f32::consts::TAU;
        let p = center + Vec2::new(a.cos(), a.sin()) * radius;
        verts.push(Vertex {
            pos: [p.x, p.y, 0.0],
            color,
        });
    }
    for k in 0..HUD_SEGMENTS {
        let next = (k + 1) % HUD_SEGMENTS;
        inds.extend_from_slice(&[base, base + 1 + k, base + 1 + next]);
    }
}

fn shade(slab: &Slab) -> [f32; 3] {
    slab.block.color()
}

/// Alle sechs Seiten eines achsenparallelen Quaders, gegen den Uhrzeigersinn von aussen.
pub fn push_box(verts: &mut Vec<Vertex>, inds: &mut Vec<u32>, min: Vec3, max: Vec3, color: [f32; 3]) {
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);

    // +X
    push_face(verts, inds, darken(color, 0.8), [x1, y0, z1], [x1, y0, z0], [x1, y1, z0], [x1, y1, z1]);
    // -X
    push_face(verts, inds, darken(color, 0.8), [x0, y0, z0], [x0, y0, z1], [x0, y1, z1], [x0, y1, z0]);
    // +Y (oben)
    push_face(verts, inds, color, [x0, y1, z0], [x0, y1, z1], [x1, y1, z1], [x1, y1, z0]);
    // -Y (unten)
    push_face(verts, inds, darken(color, 0.5), [x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]);
    // +Z
    push_face(verts, inds, darken(color, 0.9), [x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]);
    // -Z
    push_face(verts, inds, darken(color, 0.9), [x1, y0, z0], [x0, y0, z0], [x0, y1, z0], [x1, y1, z0]);
}

fn darken(c: [f32; 3], f: f32) -> [f32; 3] {
    [c[0] * f, c[1] * f, c[2] * f]
}

#[inline]
fn push_face(
    verts: &mut Vec<Vertex>,
    inds: &mut Vec<u32>,
    color: [f32; 3],
    p0: [f32; 3],
    p1: [f32; 3],
    p2: [f32; 3],
    p3: [f32; 3],
) {
    let base = verts.len() as u32;

    verts.push(Vertex { pos: p0, color });
    verts.push(Vertex { pos: p1, color });
    verts.push(Vertex { pos: p2, color });
    verts.push(Vertex { pos: p3, color });

    // zwei Dreiecke (0,1,2) und (0,2,3)
    inds.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}
