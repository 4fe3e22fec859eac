use crate::render_client::camera::Camera;
use std::{cell::RefCell, rc::Rc};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::Key,
};

/// Directional flags for one frame, polled fresh from live key state.
#[derive(Clone, Copy, Default)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Raw pointer and key signals, decoupled from frame timing. Pointer moves
/// arriving between frames overwrite the pending delta (latest sample wins);
/// the delta is consumed once per frame and reset.
#[derive(Default)]
pub struct InputState {
    last_cursor_pos: Option<PhysicalPosition<f64>>,
    pointer_delta: glam::Vec2,
    intent: MovementIntent,
}

impl InputState {
    /// Absolute cursor position in window pixels, delivered whenever the
    /// pointer moves. The first sample only establishes the reference, so the
    /// initial cursor position cannot register as a look jump.
    pub fn on_pointer_move(&mut self, position: PhysicalPosition<f64>) {
        if let Some(last) = self.last_cursor_pos {
            // Vertical axis inverted: moving the pointer up raises pitch.
            self.pointer_delta = glam::Vec2::new(
                (position.x - last.x) as f32,
                (last.y - position.y) as f32,
            );
        }
        self.last_cursor_pos = Some(position);
    }

    /// Hands out the most recent pointer sample scaled by `sensitivity` and
    /// resets it, so one sample never drives more than one frame.
    pub fn consume_yaw_pitch_delta(&mut self, sensitivity: f32) -> glam::Vec2 {
        let delta = self.pointer_delta * sensitivity;
        self.pointer_delta = glam::Vec2::ZERO;
        delta
    }

    /// Tracks a movement key transition. Returns false for keys this state
    /// does not care about.
    pub fn set_movement_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "w" => self.intent.forward = pressed,
            "s" => self.intent.backward = pressed,
            "a" => self.intent.left = pressed,
            "d" => self.intent.right = pressed,
            _ => return false,
        }
        true
    }

    /// Snapshot of the currently pressed movement keys.
    pub fn movement_intent(&self) -> MovementIntent {
        self.intent
    }
}

pub struct CameraController {
    speed: f32,
    sensitivity: f32,
    time_scale: bool,
    input: InputState,
    camera: Rc<RefCell<Camera>>,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32, time_scale: bool, camera: Rc<RefCell<Camera>>) -> Self {
        Self {
            speed,
            sensitivity,
            time_scale,
            input: InputState::default(),
            camera,
        }
    }

    pub fn process_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(s),
                        state,
                        ..
                    },
                ..
            } => self
                .input
                .set_movement_key(s.as_str(), *state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                self.input.on_pointer_move(*position);
                true
            }
            _ => false,
        }
    }

    /// Per-frame camera step: orientation first, then movement along the
    /// refreshed basis. `delta_time` only matters when time scaling is
    /// enabled; the default is one fixed step per frame.
    pub fn update_camera(&mut self, delta_time: f32) {
        let mut camera = self.camera.borrow_mut();

        let look = self.input.consume_yaw_pitch_delta(self.sensitivity);
        camera.apply_look(look.x, look.y);

        let step = if self.time_scale {
            self.speed * delta_time
        } else {
            self.speed
        };
        camera.advance(self.input.movement_intent(), step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn cursor(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    #[test]
    fn first_pointer_sample_produces_no_delta() {
        let mut input = InputState::default();
        input.on_pointer_move(cursor(400.0, 300.0));
        assert_eq!(input.consume_yaw_pitch_delta(0.1), glam::Vec2::ZERO);
    }

    #[test]
    fn pointer_samples_overwrite_between_frames() {
        let mut input = InputState::default();
        input.on_pointer_move(cursor(100.0, 100.0));
        input.on_pointer_move(cursor(110.0, 100.0));
        input.on_pointer_move(cursor(130.0, 100.0));

        // Only the last move's delta survives; the 10-pixel one is dropped.
        let delta = input.consume_yaw_pitch_delta(1.0);
        assert!((delta.x - 20.0).abs() < EPSILON);
        assert!(delta.y.abs() < EPSILON);
    }

    #[test]
    fn consume_resets_pending_delta() {
        let mut input = InputState::default();
        input.on_pointer_move(cursor(0.0, 0.0));
        input.on_pointer_move(cursor(8.0, -4.0));

        assert!(input.consume_yaw_pitch_delta(1.0).length() > 0.0);
        assert_eq!(input.consume_yaw_pitch_delta(1.0), glam::Vec2::ZERO);
    }

    #[test]
    fn vertical_axis_is_inverted() {
        let mut input = InputState::default();
        input.on_pointer_move(cursor(200.0, 100.0));
        input.on_pointer_move(cursor(200.0, 90.0));

        let delta = input.consume_yaw_pitch_delta(1.0);
        assert!((delta.y - 10.0).abs() < EPSILON);
    }

    #[test]
    fn movement_intent_tracks_press_and_release() {
        let mut input = InputState::default();
        assert!(input.set_movement_key("w", true));
        assert!(input.set_movement_key("d", true));
        assert!(!input.set_movement_key("q", true));

        let intent = input.movement_intent();
        assert!(intent.forward && intent.right);
        assert!(!intent.backward && !intent.left);

        assert!(input.set_movement_key("w", false));
        assert!(!input.movement_intent().forward);
    }

    #[test]
    fn update_scales_pointer_delta_by_sensitivity() {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let mut controller = CameraController::new(0.1, 0.1, false, camera.clone());

        controller.input.on_pointer_move(cursor(400.0, 300.0));
        controller.input.on_pointer_move(cursor(450.0, 300.0));
        controller.update_camera(0.0);

        assert!((camera.borrow().yaw + 85.0).abs() < EPSILON);
    }

    #[test]
    fn update_with_no_input_is_idempotent() {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let mut controller = CameraController::new(0.1, 0.1, false, camera.clone());

        let position = camera.borrow().position;
        let yaw = camera.borrow().yaw;
        controller.update_camera(0.016);

        assert_eq!(camera.borrow().position, position);
        assert_eq!(camera.borrow().yaw, yaw);
    }

    #[test]
    fn fixed_step_ignores_delta_time() {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let mut controller = CameraController::new(0.1, 0.1, false, camera.clone());

        controller.input.set_movement_key("w", true);
        controller.update_camera(2.0);

        // One step of 0.1 toward -z regardless of the frame delta.
        assert!((camera.borrow().position.z - 4.9).abs() < EPSILON);
    }

    #[test]
    fn time_scaled_step_uses_delta_time() {
        let camera = Rc::new(RefCell::new(Camera::default()));
        let mut controller = CameraController::new(1.0, 0.1, true, camera.clone());

        controller.input.set_movement_key("w", true);
        controller.update_camera(0.5);

        assert!((camera.borrow().position.z - 4.5).abs() < EPSILON);
    }
}
