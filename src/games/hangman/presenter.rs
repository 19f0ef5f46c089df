use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::core::game::Game;
use crate::core::renderer::GameRenderer;
use super::game::{GameEngine, GuessOutcome, IgnoreReason, RoundSummary, MAX_ATTEMPTS};
use super::renderer::HangmanRenderer;

/// Letters on the on-screen keyboard, in display order.
pub const KEYBOARD: &str = "abcdefghijklmnñopqrstuvwxyz";
pub const KEYS_PER_ROW: usize = 9;

/// Terminal front end for a [`GameEngine`]: turns key presses into engine
/// calls and keeps the UI-only state (keyboard cursor, summary dialog, status
/// line). The engine is injected, never created here.
pub struct HangmanPresenter<R = ChaCha8Rng> {
    engine: GameEngine<R>,
    keys: Vec<char>,
    selected: usize,
    summary: Option<RoundSummary>,
    message: String,
}

impl<R: Rng> HangmanPresenter<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        let message = format!("Adivina la palabra. Categoría: {}", engine.category());
        Self {
            engine,
            keys: KEYBOARD.chars().collect(),
            selected: 0,
            summary: None,
            message,
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Present while the round-over dialog is showing.
    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn new_game(&mut self) {
        self.engine.start_new_game();
        self.summary = None;
        self.message = format!("Nueva palabra. Categoría: {}", self.engine.category());
    }

    pub fn change_category(&mut self) {
        self.engine.change_category();
        self.summary = None;
        info!(category = self.engine.category(), "category changed");
        self.message = format!("Categoría: {}", self.engine.category());
    }

    pub fn guess(&mut self, letter: char) {
        let report = self.engine.handle_guess(letter);

        self.message = match report.outcome {
            GuessOutcome::Correct { letter } => format!("¡Bien! La '{}' está en la palabra.", letter),
            GuessOutcome::Wrong { letter, part } => {
                format!(
                    "La '{}' no está. Fallo {} de {}: {}.",
                    letter,
                    part.wrong_index(),
                    MAX_ATTEMPTS,
                    part.label()
                )
            }
            GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed) => format!("Ya probaste la '{}'.", letter),
            GuessOutcome::Ignored(IgnoreReason::NotALetter) => "Solo se admiten letras.".to_string(),
            GuessOutcome::Ignored(IgnoreReason::RoundOver) => {
                "La ronda terminó. Pulsa Enter para jugar de nuevo.".to_string()
            }
        };

        if let Some(summary) = report.finished {
            self.summary = Some(summary);
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let len = self.keys.len();
        self.selected = match code {
            KeyCode::Left => (self.selected + len - 1) % len,
            KeyCode::Right => (self.selected + 1) % len,
            KeyCode::Up => self.selected.checked_sub(KEYS_PER_ROW).unwrap_or(self.selected),
            KeyCode::Down if self.selected + KEYS_PER_ROW < len => self.selected + KEYS_PER_ROW,
            _ => self.selected,
        };
    }
}

impl<R: Rng> Game for HangmanPresenter<R> {
    fn handle_input(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Tab => self.change_category(),
            KeyCode::F(2) => self.new_game(),
            KeyCode::Enter if self.summary.is_some() => self.new_game(),
            KeyCode::Enter => self.guess(self.keys[self.selected]),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => self.move_cursor(event.code),
            KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => self.guess(c),
            _ => {}
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        HangmanRenderer::render(frame, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{RoundStatus, WordBank};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn presenter() -> HangmanPresenter {
        let bank = WordBank::from_pairs([("animales", &["gato"][..]), ("frutas", &["pera"][..])]).unwrap();
        HangmanPresenter::new(GameEngine::with_seed(bank, 1))
    }

    #[test]
    fn letter_keys_guess() {
        let mut p = presenter();
        p.handle_input(press(KeyCode::Char('g')));
        p.handle_input(press(KeyCode::Char('x')));
        assert_eq!(p.engine().masked_word('_'), "g___");
        assert_eq!(p.engine().remaining_attempts(), 5);
        assert!(p.message().contains("cabeza"));
        assert!(p.message().contains(&format!("Fallo 1 de {}", MAX_ATTEMPTS)));
    }

    #[test]
    fn control_chords_are_not_guesses() {
        let mut p = presenter();
        p.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(p.engine().guessed_letters().is_empty());
    }

    #[test]
    fn tab_cycles_categories() {
        let mut p = presenter();
        assert_eq!(p.engine().category(), "animales");
        p.handle_input(press(KeyCode::Tab));
        assert_eq!(p.engine().category(), "frutas");
        p.handle_input(press(KeyCode::Tab));
        assert_eq!(p.engine().category(), "animales");
    }

    #[test]
    fn summary_shows_on_win_and_enter_replays() {
        let mut p = presenter();
        for c in "gato".chars() {
            p.handle_input(press(KeyCode::Char(c)));
        }
        let summary = p.summary().expect("dialog should be open");
        assert_eq!(summary.outcome, RoundStatus::Won);
        assert_eq!(summary.secret_word, "gato");
        assert_eq!(summary.score, 100);

        p.handle_input(press(KeyCode::Enter));
        assert!(p.summary().is_none());
        assert!(p.engine().guessed_letters().is_empty());
        assert_eq!(p.engine().score(), 100);
    }

    #[test]
    fn summary_shows_on_loss() {
        let mut p = presenter();
        for c in "bcdefh".chars() {
            p.handle_input(press(KeyCode::Char(c)));
        }
        assert_eq!(p.summary().map(|s| s.outcome), Some(RoundStatus::Lost));
        p.handle_input(press(KeyCode::Char('g')));
        assert!(p.message().contains("terminó"));
        p.handle_input(press(KeyCode::F(2)));
        assert!(p.summary().is_none());
        assert_eq!(p.engine().remaining_attempts(), 6);
    }

    #[test]
    fn arrows_and_enter_press_keyboard_keys() {
        let mut p = presenter();
        assert_eq!(p.keys().len(), 27);
        p.handle_input(press(KeyCode::Left));
        assert_eq!(p.keys()[p.selected()], 'z');
        p.handle_input(press(KeyCode::Right));
        p.handle_input(press(KeyCode::Down));
        assert_eq!(p.keys()[p.selected()], 'j');
        p.handle_input(press(KeyCode::Up));
        p.handle_input(press(KeyCode::Up));
        assert_eq!(p.keys()[p.selected()], 'a');

        p.handle_input(press(KeyCode::Enter));
        assert!(p.engine().guessed_letters().contains(&'a'));
    }
}
