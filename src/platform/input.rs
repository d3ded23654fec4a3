//! Raw input to per-tick commands
//!
//! Held keys and a held pointer produce the movement intent; presses produce
//! one-shot actions that stay latched until the next tick consumes them.

use crate::sim::{MenuAction, TickInput};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Fire,
    CycleWeapon,
    CycleCharacter,
    /// Enter
    Confirm,
    /// M
    Missions,
    /// E
    Endless,
    Escape,
    Digit(u8),
}

/// Host events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer or touch pressed at screen x
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    PointerUp,
    Quit,
}

/// Accumulates host events between ticks
#[derive(Debug, Clone)]
pub struct InputAdapter {
    screen_width: f32,
    held_left: bool,
    held_right: bool,
    held_fire: bool,
    /// Screen x of a held pointer
    pointer: Option<f32>,
    /// One-shot actions waiting for the next tick
    pending: TickInput,
    quit_requested: bool,
}

impl InputAdapter {
    pub fn new(screen_width: f32) -> Self {
        Self {
            screen_width,
            held_left: false,
            held_right: false,
            held_fire: false,
            pointer: None,
            pending: TickInput::default(),
            quit_requested: false,
        }
    }

    pub fn handle(&mut self, event: RawEvent) {
        match event {
            RawEvent::KeyDown(key) => self.key_down(key),
            RawEvent::KeyUp(key) => match key {
                Key::Left => self.held_left = false,
                Key::Right => self.held_right = false,
                Key::Fire => self.held_fire = false,
                _ => {}
            },
            RawEvent::PointerDown { x } => {
                self.pointer = Some(x);
                self.pending.jump = true;
            }
            RawEvent::PointerMove { x } => {
                if self.pointer.is_some() {
                    self.pointer = Some(x);
                }
            }
            RawEvent::PointerUp => self.pointer = None,
            RawEvent::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }
        }
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.held_left = true,
            Key::Right => self.held_right = true,
            Key::Fire => self.held_fire = true,
            Key::Jump => self.pending.jump = true,
            Key::CycleWeapon => self.pending.cycle_weapon = true,
            Key::CycleCharacter => self.pending.cycle_character = true,
            Key::Confirm => self.pending.menu = Some(MenuAction::StartCampaign),
            Key::Missions => self.pending.menu = Some(MenuAction::OpenMissionSelect),
            Key::Endless => self.pending.menu = Some(MenuAction::StartEndless),
            Key::Escape => self.pending.menu = Some(MenuAction::Back),
            Key::Digit(n) => self.pending.menu = Some(MenuAction::SelectLevel(n as u32)),
        }
    }

    /// Input for the next tick
    pub fn sample(&self) -> TickInput {
        let half = self.screen_width / 2.0;
        let pointer_left = self.pointer.is_some_and(|x| x < half);
        let pointer_right = self.pointer.is_some_and(|x| x >= half);
        TickInput {
            left: self.held_left || pointer_left,
            right: self.held_right || pointer_right,
            fire: self.held_fire,
            ..self.pending.clone()
        }
    }

    /// Clear one-shot inputs after a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.pending = TickInput::default();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_give_intent() {
        let mut input = InputAdapter::new(800.0);
        input.handle(RawEvent::KeyDown(Key::Right));
        assert!(input.sample().right);
        input.clear_one_shots();
        assert!(input.sample().right);
        input.handle(RawEvent::KeyUp(Key::Right));
        assert!(!input.sample().right);
    }

    #[test]
    fn test_one_shots_clear_after_tick() {
        let mut input = InputAdapter::new(800.0);
        input.handle(RawEvent::KeyDown(Key::Jump));
        input.handle(RawEvent::KeyDown(Key::CycleWeapon));
        let first = input.sample();
        assert!(first.jump && first.cycle_weapon);
        input.clear_one_shots();
        let second = input.sample();
        assert!(!second.jump && !second.cycle_weapon);
    }

    #[test]
    fn test_pointer_halves() {
        let mut input = InputAdapter::new(800.0);
        input.handle(RawEvent::PointerDown { x: 100.0 });
        let tick = input.sample();
        assert!(tick.left && !tick.right && tick.jump);
        input.clear_one_shots();

        input.handle(RawEvent::PointerMove { x: 700.0 });
        let tick = input.sample();
        assert!(tick.right && !tick.left && !tick.jump);

        input.handle(RawEvent::PointerUp);
        input.handle(RawEvent::PointerMove { x: 100.0 });
        assert!(!input.sample().left);
    }

    #[test]
    fn test_menu_keys() {
        let mut input = InputAdapter::new(800.0);
        input.handle(RawEvent::KeyDown(Key::Digit(4)));
        assert_eq!(input.sample().menu, Some(MenuAction::SelectLevel(4)));
        input.handle(RawEvent::KeyDown(Key::Escape));
        assert_eq!(input.sample().menu, Some(MenuAction::Back));
    }

    #[test]
    fn test_quit() {
        let mut input = InputAdapter::new(800.0);
        assert!(!input.quit_requested());
        input.handle(RawEvent::Quit);
        assert!(input.quit_requested());
    }
}
