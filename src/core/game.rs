/// Core game interface driven by the terminal engine loop
use std::time::Duration;

use crossterm::event::KeyEvent;

/// A game the engine loop can run: it reacts to key presses and draws itself.
///
/// The loop owns the terminal and handles `Esc`; everything else is forwarded.
pub trait Game {
    /// React to one key press.
    fn handle_input(&mut self, event: KeyEvent);

    /// Draw the current state into the frame.
    fn render(&self, frame: &mut ratatui::Frame);

    /// How long the loop waits for input before redrawing. Turn-based games
    /// keep the default.
    fn tick_rate(&self) -> Duration {
        Duration::from_millis(250)
    }
}
