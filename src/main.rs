use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use log::{error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use parkour_run::gfx::{FrameStatus, Gfx};
use parkour_run::mesh::{mesh_level, mesh_touch_controls};
use parkour_run::overlay;
use parkour_run::{Camera, Controls, Game, InputScheme, Level, Options, Phase, PlayerTuning, TouchLayout};

use winit::event::{DeviceEvent, MouseButton};
use winit::window::{CursorGrabMode, Window};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = Options::parse()?;
    let scheme = options.input_scheme();
    let level_cfg = options.level_config();

    let level = match options.seed {
        Some(seed) => Level::generate(&level_cfg, &mut ChaCha8Rng::seed_from_u64(seed)),
        None => Level::generate(&level_cfg, &mut rand::rng()),
    };
    let mut game = Game::new(level, PlayerTuning::default());
    info!("input scheme: {scheme:?}");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Parkour")
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let mut gfx = pollster::block_on(Gfx::new(window.clone()))?;
    let (verts, inds) = mesh_level(game.level());
    gfx.set_mesh(&verts, &inds);

    let size = window.inner_size();
    let mut camera = Camera::new(size.width, size.height);
    let mut controls = Controls::new(
        scheme,
        TouchLayout::new(size.width, size.height, window.scale_factor()),
    );

    let mut title = String::new();
    // zuletzt hochgeladene Touch-Elemente
    let mut hud_key: Option<(TouchLayout, Vec2)> = None;
    let mut ever_locked = false;
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| {
            // ein Simulationsschritt pro Bild
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    WindowEvent::Resized(size) => {
                        gfx.resize(size);
                        camera.resize(size.width, size.height);
                        controls.set_layout(TouchLayout::new(size.width, size.height, window.scale_factor()));
                    }

                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        let size = window.inner_size();
                        gfx.resize(size);
                        camera.resize(size.width, size.height);
                        controls.set_layout(TouchLayout::new(size.width, size.height, scale_factor));
                    }

                    WindowEvent::RedrawRequested => {
                        if gfx.render() == FrameStatus::Fatal {
                            error!("GPU out of memory");
                            elwt.exit();
                        }
                    }

                    WindowEvent::KeyboardInput { event, .. } => {
                        if let PhysicalKey::Code(code) = event.physical_key {
                            controls.on_key(code, event.state == ElementState::Pressed, event.repeat);
                        }
                    }

                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => controls.on_click(),

                    WindowEvent::Touch(touch) => {
                        let pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                        controls.on_touch(touch.id, touch.phase, pos);
                    }

                    WindowEvent::Focused(false) => controls.state_mut().release_pointer_lock = true,

                    _ => {}
                },

                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => controls.on_mouse_motion(delta.0, delta.1),

                Event::AboutToWait => {
                    // Pointer-Lock vor dem Frame anwenden
                    let st = *controls.state();
                    if st.request_pointer_lock {
                        let locked = grab_pointer(&window);
                        ever_locked |= locked;
                        controls.set_pointer_locked(locked);
                    }
                    if st.release_pointer_lock && st.pointer_locked {
                        release_pointer(&window);
                        controls.set_pointer_locked(false);
                    }

                    let now = Instant::now();
                    let raw_dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    game.frame(raw_dt, controls.state_mut());
                    controls.state_mut().clear_one_shots();

                    gfx.set_camera(camera.view_proj(&game.camera_pose()));

                    if controls.scheme() == InputScheme::Touch {
                        let key = (controls.layout(), controls.state().joystick);
                        if hud_key != Some(key) {
                            let (verts, inds) = mesh_touch_controls(&key.0, key.1);
                            gfx.set_hud(&verts, &inds);
                            hud_key = Some(key);
                        }
                    }

                    let text = overlay_text(&game, controls.scheme(), controls.state().pointer_locked, ever_locked);
                    if text != title {
                        window.set_title(&text);
                        title = text;
                    }

                    window.request_redraw();
                }

                _ => {}
            }
        })
        .context("event loop failed")?;

    Ok(())
}

fn overlay_text(game: &Game, scheme: InputScheme, locked: bool, ever_locked: bool) -> String {
    match game.phase() {
        Phase::Won { time } => overlay::win_message(scheme, time),
        Phase::Playing => format!("Parkour - {}", overlay::instructions(scheme, locked, ever_locked)),
    }
}

/// Abgelehnter Grab ist kein Fehler, nur der Hinweistext bleibt.
fn grab_pointer(window: &Window) -> bool {
    let res = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match res {
        Ok(()) => {
            window.set_cursor_visible(false);
            true
        }
        Err(e) => {
            warn!("pointer lock refused: {e}");
            false
        }
    }
}

fn release_pointer(window: &Window) {
    let _ = window.set_cursor_grab(CursorGrabMode::None);
    window.set_cursor_visible(true);
}
