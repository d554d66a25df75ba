use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Scancode};
use sdl2::mouse::MouseButton;

/// Actions produced by discrete SDL events
///
/// Held keys (thrust, rotation, fire) are read from the keyboard state each
/// frame instead, see [`ShipControls`].
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Window close requested
    Quit,
    /// Mouse button pressed at screen position
    Click(i32, i32),
}

/// Which screen is receiving input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    MainMenu,
    Playing,
}

/// InputSystem translates SDL2 events into GameActions
pub struct InputSystem {
    pub context: InputContext,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::MainMenu,
        }
    }

    /// Drain pending SDL2 events
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<GameAction> {
        event_pump
            .poll_iter()
            .filter_map(|event| self.translate(&event))
            .collect()
    }

    /// Map one event to an action for the current context
    pub fn translate(&self, event: &Event) -> Option<GameAction> {
        match event {
            Event::Quit { .. } => Some(GameAction::Quit),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } if self.context == InputContext::MainMenu => match mouse_btn {
                MouseButton::Left | MouseButton::Right | MouseButton::Middle => {
                    Some(GameAction::Click(*x, *y))
                }
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Previous/current frame state of one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    previous: bool,
    current: bool,
}

impl EdgeTrigger {
    /// Record this frame's key state
    pub fn update(&mut self, pressed: bool) {
        self.previous = self.current;
        self.current = pressed;
    }

    pub fn is_held(&self) -> bool {
        self.current
    }

    pub fn just_pressed(&self) -> bool {
        self.current && !self.previous
    }

    pub fn just_released(&self) -> bool {
        !self.current && self.previous
    }
}

/// Snapshot of the ship keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipControls {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
}

impl ShipControls {
    pub fn from_keyboard(keyboard_state: &KeyboardState) -> Self {
        ShipControls {
            thrust: keyboard_state.is_scancode_pressed(Scancode::Up),
            rotate_left: keyboard_state.is_scancode_pressed(Scancode::Left),
            rotate_right: keyboard_state.is_scancode_pressed(Scancode::Right),
            fire: keyboard_state.is_scancode_pressed(Scancode::Space),
        }
    }

    #[cfg(test)]
    pub fn idle() -> Self {
        Self::default()
    }
}
