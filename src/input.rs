use glam::Vec2;
use winit::event::TouchPhase;
use winit::keyboard::KeyCode;

/// Steuerungsart, wird einmal beim Start festgelegt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputScheme {
    Desktop,
    Touch,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    // --- One-shot Aktionen ---
    /// Sprungwunsch solange gedrückt, wird erst von der Physik verbraucht
    pub jump: bool,
    pub restart: bool,
    pub request_pointer_lock: bool,
    pub release_pointer_lock: bool,

    // --- Gehaltene Tasten ---
    pub move_fwd: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub run: bool,

    // --- Analog ---
    /// x = rechts, y = vorwärts, im Einheitskreis
    pub joystick: Vec2,
    /// aufsummierte Blick-Bewegung in Pixeln seit dem letzten Frame
    pub look_delta: Vec2,
    pub pointer_locked: bool,
}

impl InputState {
    /// Nach jedem Frame aufrufen: setzt One-shots zurück, ausser dem Sprung.
    pub fn clear_one_shots(&mut self) {
        self.restart = false;
        self.request_pointer_lock = false;
        self.release_pointer_lock = false;
    }

    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Vorwärts/rechts-Wunsch aus Tasten und Joystick, Länge höchstens 1.
    pub fn intent(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;

        let raw = Vec2::new(
            axis(self.move_right, self.move_left) + self.joystick.x,
            axis(self.move_fwd, self.move_back) + self.joystick.y,
        );
        raw / raw.length().max(1.0)
    }
}

/// Bildschirmbereiche der Touch-Bedienelemente in physischen Pixeln.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchLayout {
    pub joy_center: Vec2,
    pub joy_radius: f32,
    /// maximaler Weg des Sticks
    pub joy_travel: f32,
    pub jump_min: Vec2,
    pub jump_max: Vec2,
}

impl TouchLayout {
    const JOY_SIZE: f32 = 140.0;
    const JOY_MARGIN: f32 = 12.0;
    const JOY_TRAVEL: f32 = 46.0;
    const JUMP_SIZE: f32 = 80.0;
    const JUMP_RIGHT: f32 = 12.0;
    const JUMP_BOTTOM: f32 = 28.0;

    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        let s = scale.max(0.1) as f32;
        let w = width as f32;
        let h = height as f32;

        let half = Self::JOY_SIZE * 0.5 * s;
        let joy_center = Vec2::new(Self::JOY_MARGIN * s + half, h - Self::JOY_MARGIN * s - half);

        let jump_max = Vec2::new(w - Self::JUMP_RIGHT * s, h - Self::JUMP_BOTTOM * s);
        let jump_min = jump_max - Vec2::splat(Self::JUMP_SIZE * s);

        Self {
            joy_center,
            joy_radius: half,
            joy_travel: Self::JOY_TRAVEL * s,
            jump_min,
            jump_max,
        }
    }

    pub fn in_joystick(&self, p: Vec2) -> bool {
        p.distance(self.joy_center) <= self.joy_radius
    }

    pub fn in_jump_button(&self, p: Vec2) -> bool {
        p.cmpge(self.jump_min).all() && p.cmple(self.jump_max).all()
    }
}

/// Stick-Auslenkung aus dem Abstand zum Widget-Zentrum (Bildschirm-y zeigt nach unten).
pub fn joystick_vector(offset: Vec2, travel: f32) -> Vec2 {
    let d = offset.length();
    if d <= f32::EPSILON || travel <= 0.0 {
        return Vec2::ZERO;
    }
    let n = offset / d;
    let r = d.min(travel);
    Vec2::new(n.x * r / travel, -n.y * r / travel)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Finger {
    Joystick,
    Jump,
    Look { last: Vec2 },
}

/// Sammelt Tastatur-, Maus- und Touch-Ereignisse in einem `InputState`.
#[derive(Debug, Clone)]
pub struct Controls {
    scheme: InputScheme,
    layout: TouchLayout,
    state: InputState,
    fingers: Vec<(u64, Finger)>,
}

impl Controls {
    pub fn new(scheme: InputScheme, layout: TouchLayout) -> Self {
        Self {
            scheme,
            layout,
            state: InputState::default(),
            fingers: Vec::new(),
        }
    }

    pub fn scheme(&self) -> InputScheme {
        self.scheme
    }

    pub fn layout(&self) -> TouchLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: TouchLayout) {
        self.layout = layout;
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    pub fn on_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        let st = &mut self.state;
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => st.move_fwd = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => st.move_back = pressed,
            KeyCode::KeyA | KeyCode::ArrowLeft => st.move_left = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => st.move_right = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight if self.scheme == InputScheme::Desktop => {
                st.run = pressed
            }
            KeyCode::Space if pressed && !repeat => st.jump = true,
            // losgelassen = kein Sprung mehr beim Landen
            KeyCode::Space if !pressed => st.jump = false,
            KeyCode::KeyR | KeyCode::Enter if pressed => st.restart = true,
            KeyCode::Escape if pressed => st.release_pointer_lock = true,
            _ => {}
        }
    }

    /// Linksklick ins Fenster: Pointer-Lock anfragen.
    pub fn on_click(&mut self) {
        if self.scheme == InputScheme::Desktop && !self.state.pointer_locked {
            self.state.request_pointer_lock = true;
        }
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.state.pointer_locked = locked;
    }

    /// Rohe Mausbewegung, zählt nur mit Pointer-Lock.
    pub fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.scheme != InputScheme::Desktop || !self.state.pointer_locked {
            return;
        }
        self.state.look_delta += Vec2::new(dx as f32, dy as f32);
    }

    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, pos: Vec2) {
        if self.scheme != InputScheme::Touch {
            return;
        }

        match phase {
            TouchPhase::Started => {
                let finger = if self.layout.in_joystick(pos) {
                    Finger::Joystick
                } else if self.layout.in_jump_button(pos) {
                    self.state.jump = true;
                    Finger::Jump
                } else {
                    // Tippen ausserhalb: im Siegesdialog = Neustart
                    self.state.restart = true;
                    Finger::Look { last: pos }
                };
                self.fingers.retain(|(f, _)| *f != id);
                self.fingers.push((id, finger));
            }
            TouchPhase::Moved => {
                let layout = self.layout;
                let Some((_, finger)) = self.fingers.iter_mut().find(|(f, _)| *f == id) else {
                    return;
                };
                match finger {
                    Finger::Joystick => {
                        self.state.joystick = joystick_vector(pos - layout.joy_center, layout.joy_travel);
                    }
                    Finger::Look { last } => {
                        self.state.look_delta += pos - *last;
                        *last = pos;
                    }
                    Finger::Jump => {}
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(i) = self.fingers.iter().position(|(f, _)| *f == id) {
                    match self.fingers.remove(i).1 {
                        Finger::Joystick => self.state.joystick = Vec2::ZERO,
                        Finger::Jump => self.state.jump = false,
                        Finger::Look { .. } => {}
                    }
                }
            }
        }
    }
}
