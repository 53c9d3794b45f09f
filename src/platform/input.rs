//! Edge-triggered input capture
//!
//! Browser listeners fire between frames; the simulation consumes input at
//! the start of a tick. The queue holds at most one pending press: presses
//! that arrive before the next tick collapse into one, and a press is never
//! lost, only deferred.

/// Single-slot press buffer shared between event listeners and the game loop
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or pointer click.
    ///
    /// `is_repeat` is the OS auto-repeat flag of a held key; those events
    /// do not count as new presses.
    pub fn press(&mut self, is_repeat: bool) {
        if !is_repeat {
            self.pending = true;
        }
    }

    /// Take the pending press, clearing the slot
    pub fn poll_flip_requested(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Press for the coming tick.
    ///
    /// The slot is always drained; when `autopilot` holds a decision it
    /// replaces whatever the player pressed.
    pub fn next_press(&mut self, autopilot: Option<bool>) -> bool {
        let pressed = self.poll_flip_requested();
        autopilot.unwrap_or(pressed)
    }
}
