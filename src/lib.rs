//! First-person parkour run: level generation, movement physics, ray-cast
//! ground contact and a first-person camera. The simulation does not need a
//! window; `gfx` and the binary wire it to winit and wgpu.

pub mod block;
pub mod camera;
pub mod config;
pub mod game;
pub mod gfx;
pub mod ground;
pub mod input;
pub mod level;
pub mod mesh;
pub mod overlay;
pub mod player;

pub use camera::{Camera, CameraPose};
pub use config::{LevelConfig, Options, PlayerTuning};
pub use game::{FrameReport, Game, Phase};
pub use input::{Controls, InputScheme, InputState, TouchLayout};
pub use level::{Level, RayHit, Slab};
