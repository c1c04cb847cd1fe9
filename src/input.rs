//! Keyboard and mouse state gathered between two frames.
//!
//! The window translates SDL events into [`Key`]s and mouse deltas; the scene
//! reads the result. Held keys persist across frames, everything else is
//! cleared by [`InputState::end_frame`].

use std::collections::HashSet;

use crate::camera::CameraMovement;
use crate::car::DriveInput;

/// Keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    C,
    F,
    L,
    B,
    M,
    Escape,
}

/// A one-shot command, fired once per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CycleCamera,
    ToggleFog,
    ToggleSpotLight,
    ToggleBackfaceCulling,
    CycleRenderMode,
}

impl Key {
    fn action(self) -> Option<Action> {
        match self {
            Key::C => Some(Action::CycleCamera),
            Key::F => Some(Action::ToggleFog),
            Key::L => Some(Action::ToggleSpotLight),
            Key::B => Some(Action::ToggleBackfaceCulling),
            Key::M => Some(Action::CycleRenderMode),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<Key>,
    actions: Vec<Action>,
    mouse_delta: (f32, f32),
    scroll: f32,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press. Auto-repeat while the key is held is ignored.
    pub fn key_down(&mut self, key: Key) {
        if !self.held.insert(key) {
            return;
        }
        if key == Key::Escape {
            self.quit = true;
        }
        if let Some(action) = key.action() {
            self.actions.push(action);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forgets all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Accumulates mouse motion; `dy` grows upward.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Accumulates wheel motion; positive is away from the user.
    pub fn scroll(&mut self, dy: f32) {
        self.scroll += dy;
    }

    pub fn scroll_delta(&self) -> f32 {
        self.scroll
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// One-shot actions triggered since the last frame, in press order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Arrow keys steer the car.
    pub fn drive(&self) -> DriveInput {
        DriveInput {
            forward: self.is_held(Key::Up),
            backward: self.is_held(Key::Down),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
        }
    }

    /// WASD moves the free camera.
    pub fn camera_movements(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        [
            (Key::W, CameraMovement::Forward),
            (Key::S, CameraMovement::Backward),
            (Key::A, CameraMovement::Left),
            (Key::D, CameraMovement::Right),
        ]
        .into_iter()
        .filter(|(key, _)| self.is_held(*key))
        .map(|(_, movement)| movement)
    }

    /// Clears per-frame deltas and actions; held keys stay held.
    pub fn end_frame(&mut self) {
        self.actions.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_fires_once_per_press() {
        let mut input = InputState::new();
        input.key_down(Key::C);
        input.key_down(Key::C); // auto-repeat
        assert_eq!(input.actions(), &[Action::CycleCamera]);

        input.end_frame();
        assert!(input.actions().is_empty());
        assert!(input.is_held(Key::C));

        input.key_up(Key::C);
        input.key_down(Key::C);
        assert_eq!(input.actions(), &[Action::CycleCamera]);
    }

    #[test]
    fn arrows_map_to_drive_input() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        input.key_down(Key::Left);
        assert_eq!(
            input.drive(),
            DriveInput {
                forward: true,
                left: true,
                ..Default::default()
            }
        );
        input.key_up(Key::Up);
        assert!(!input.drive().forward);
    }

    #[test]
    fn wasd_maps_to_camera_movement() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_down(Key::D);
        let moves: Vec<_> = input.camera_movements().collect();
        assert_eq!(moves, [CameraMovement::Forward, CameraMovement::Right]);
    }

    #[test]
    fn mouse_and_scroll_accumulate_until_end_of_frame() {
        let mut input = InputState::new();
        input.mouse_motion(2.0, -1.0);
        input.mouse_motion(3.0, 4.0);
        input.scroll(1.0);
        input.scroll(1.0);
        assert_eq!(input.mouse_delta(), (5.0, 3.0));
        assert_eq!(input.scroll_delta(), 2.0);

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.scroll_delta(), 0.0);
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputState::new();
        assert!(!input.quit_requested());
        input.key_down(Key::Escape);
        assert!(input.quit_requested());
    }
}
