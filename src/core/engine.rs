use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::info;

use crate::core::game::Game;

/// Runs a [`Game`] against a terminal until the player presses `Esc`.
pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Draw, wait for a key, dispatch it, repeat. Returns the game so the
    /// caller can inspect its final state.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> Result<G> {
        loop {
            terminal.draw(|f| self.game.render(f))?;

            if !event::poll(self.game.tick_rate())? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Esc {
                    info!("quit requested");
                    break;
                }
                self.game.handle_input(key);
            }
        }

        Ok(self.game)
    }
}
