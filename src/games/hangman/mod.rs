/// Hangman: rules engine, word lists and the terminal front end
pub mod game;
pub mod normalize;
pub mod presenter;
pub mod renderer;
pub mod word_bank;

pub use game::{
    BodyPart, GameEngine, GuessOutcome, GuessReport, IgnoreReason, KeyState, LetterReveal, RoundStatus,
    RoundSummary, MAX_ATTEMPTS, WIN_BONUS,
};
pub use presenter::HangmanPresenter;
pub use renderer::HangmanRenderer;
pub use word_bank::{Category, WordBank, WordBankError};
