//! Backend-agnostic input state for the simulation.
//!
//! The host (browser, window, test harness) maps its own keys onto [`Action`]s
//! and feeds them in between ticks. The simulation reads discrete presses once
//! per tick and queries held controls continuously.

use std::collections::HashSet;

/// Logical actions the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    Shoot,
    Boost,
    Flee,
    Restart,
}

/// Manages input state for the current tick.
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions currently held down.
    held: HashSet<Action>,
    /// Actions pressed since the last tick. A set, so repeats collapse to one press.
    pressed: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-tick state. Call after the simulation has consumed a tick.
    pub fn end_tick(&mut self) {
        self.pressed.clear();
    }

    /// Record an action going down.
    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.pressed.insert(action);
        }
    }

    /// Record an action going up.
    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Queue a one-shot action without changing held state (menu clicks, scripted input).
    pub fn tap(&mut self, action: Action) {
        log::trace!("tap {:?}", action);
        self.pressed.insert(action);
    }

    // Query methods

    /// Check if an action is currently held.
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was pressed this tick.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Forward thrust (W / Up).
    pub fn is_thrust_held(&self) -> bool {
        self.is_held(Action::Up)
    }

    /// Reverse thrust (S / Down).
    pub fn is_brake_held(&self) -> bool {
        self.is_held(Action::Down)
    }

    /// Turn input: −1 left, +1 right, 0 none or both.
    pub fn turn_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.is_held(Action::Left) {
            axis -= 1.0;
        }
        if self.is_held(Action::Right) {
            axis += 1.0;
        }
        axis
    }

    /// Check if fire is held (Space).
    pub fn is_fire_held(&self) -> bool {
        self.is_held(Action::Shoot)
    }

    /// Check if boost is held (Shift).
    pub fn is_boost_held(&self) -> bool {
        self.is_held(Action::Boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_one_shot_but_held_persists() {
        let mut input = InputState::new();
        input.press(Action::Shoot);
        assert!(input.is_pressed(Action::Shoot));
        assert!(input.is_fire_held());
        input.end_tick();
        assert!(!input.is_pressed(Action::Shoot));
        assert!(input.is_fire_held());
    }

    #[test]
    fn repeated_press_counts_once() {
        let mut input = InputState::new();
        input.press(Action::Confirm);
        input.press(Action::Confirm);
        input.release(Action::Confirm);
        input.end_tick();
        input.press(Action::Confirm);
        assert!(input.is_pressed(Action::Confirm));
    }

    #[test]
    fn turn_axis_cancels_out() {
        let mut input = InputState::new();
        input.press(Action::Left);
        assert_eq!(input.turn_axis(), -1.0);
        input.press(Action::Right);
        assert_eq!(input.turn_axis(), 0.0);
    }

    #[test]
    fn tap_does_not_hold() {
        let mut input = InputState::new();
        input.tap(Action::Confirm);
        assert!(input.is_pressed(Action::Confirm));
        assert!(!input.is_held(Action::Confirm));
        input.end_tick();
        assert!(!input.is_pressed(Action::Confirm));
    }
}
