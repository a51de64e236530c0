//! Input handling: turns keyboard, mouse and stick events into per-tick controller input.

use glam::Vec2;
use std::collections::HashSet;

/// Which device produced the look input this frame.
///
/// Pointer deltas are already per-event distances, stick deflection is a rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookDevice {
    #[default]
    Pointer,
    Gamepad,
}

/// Per-tick input snapshot consumed by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    /// Move axes: x strafes right, y moves forward. Each component in [-1, 1].
    pub move_axis: Vec2,
    /// Look axes: x turns right, y looks up.
    pub look_axis: Vec2,
    pub look_device: LookDevice,
    /// Scale speed by stick deflection instead of always requesting full speed.
    pub analog_movement: bool,
    /// Jump request (edge-triggered; the controller buffers it until consumed).
    pub jump: bool,
    /// Dash held.
    pub dash: bool,
    /// Fire held.
    pub fire: bool,
}

impl ControllerInput {
    pub fn with_move(mut self, move_axis: Vec2) -> Self {
        self.move_axis = move_axis;
        self
    }

    pub fn with_look(mut self, look_axis: Vec2, device: LookDevice) -> Self {
        self.look_axis = look_axis;
        self.look_device = device;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_dash(mut self) -> Self {
        self.dash = true;
        self
    }

    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }
}

/// Manages raw input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,

    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    /// Left stick deflection, if a gamepad is driving movement.
    stick_move: Option<Vec2>,
    /// Right stick deflection, if a gamepad is driving look.
    stick_look: Option<Vec2>,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
    /// Pointer motion drives look only while this is set.
    cursor_input_for_look: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            cursor_locked: true,
            cursor_input_for_look: true,
            ..Default::default()
        }
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process raw mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_input_for_look {
            return;
        }
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Set left stick deflection (`None` when the stick is released or disconnected).
    pub fn set_stick_move(&mut self, axis: Option<Vec2>) {
        self.stick_move = axis.map(|a| a.clamp(Vec2::NEG_ONE, Vec2::ONE));
    }

    /// Set right stick deflection.
    pub fn set_stick_look(&mut self, axis: Option<Vec2>) {
        self.stick_look = axis.map(|a| a.clamp(Vec2::NEG_ONE, Vec2::ONE));
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Set cursor lock state. Pointer look is ignored while unlocked.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
        log::debug!("Cursor locked: {}", locked);
    }

    /// Enable or disable pointer-driven look.
    pub fn set_cursor_input_for_look(&mut self, enabled: bool) {
        self.cursor_input_for_look = enabled;
    }

    /// Get movement input from WASD (unit length or zero).
    pub fn get_movement_input(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;

        if self.is_key_held(KeyCode::KeyW) {
            movement.y += 1.0;
        }
        if self.is_key_held(KeyCode::KeyS) {
            movement.y -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyA) {
            movement.x -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyD) {
            movement.x += 1.0;
        }

        movement.normalize_or_zero()
    }

    /// Check if jump was pressed (Space).
    pub fn is_jump_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Space)
    }

    /// Check if dash is held (Shift).
    pub fn is_dash_held(&self) -> bool {
        self.is_key_held(KeyCode::ShiftLeft) || self.is_key_held(KeyCode::ShiftRight)
    }

    /// Check if fire is held (Left mouse button).
    pub fn is_fire_held(&self) -> bool {
        self.is_mouse_held(MouseButton::Left)
    }

    /// Build the controller snapshot for this frame. Stick input wins over keys/pointer.
    pub fn snapshot(&self) -> ControllerInput {
        let (move_axis, analog_movement) = match self.stick_move {
            Some(axis) if axis != Vec2::ZERO => (axis, true),
            _ => (self.get_movement_input(), false),
        };

        let (look_axis, look_device) = match self.stick_look {
            Some(axis) if axis != Vec2::ZERO => (axis, LookDevice::Gamepad),
            _ if self.cursor_locked => {
                // Screen Y grows downward; look Y is up.
                (Vec2::new(self.mouse_delta.x, -self.mouse_delta.y), LookDevice::Pointer)
            }
            _ => (Vec2::ZERO, LookDevice::Pointer),
        };

        ControllerInput {
            move_axis,
            look_axis,
            look_device,
            analog_movement,
            jump: self.is_jump_pressed(),
            dash: self.is_dash_held(),
            fire: self.is_fire_held(),
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
