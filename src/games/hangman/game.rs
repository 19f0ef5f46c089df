use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::normalize::{normalize_char, normalize_text};
use super::word_bank::{WordBank, WordBankError};

/// Wrong guesses allowed per round; one per body part.
pub const MAX_ATTEMPTS: u8 = 6;

/// Points added to the score for every round won.
pub const WIN_BONUS: u32 = 100;

/// Stick figure stages, in the order wrong guesses reveal them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; MAX_ATTEMPTS as usize] = [
        BodyPart::Head,
        BodyPart::Body,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];

    /// Part drawn for the `index`-th wrong guess of a round (1-based).
    pub fn from_wrong_index(index: u8) -> Option<Self> {
        let slot = usize::from(index).checked_sub(1)?;
        Self::ALL.get(slot).copied()
    }

    /// 1-based ordinal of the wrong guess that reveals this part.
    pub fn wrong_index(self) -> u8 {
        self as u8 + 1
    }

    /// Every part visible after `wrong_guesses` misses.
    pub fn revealed(wrong_guesses: u8) -> impl Iterator<Item = BodyPart> {
        Self::ALL.into_iter().take(usize::from(wrong_guesses))
    }

    /// Name shown in the status line.
    pub fn label(self) -> &'static str {
        match self {
            BodyPart::Head => "cabeza",
            BodyPart::Body => "cuerpo",
            BodyPart::LeftArm => "brazo izquierdo",
            BodyPart::RightArm => "brazo derecho",
            BodyPart::LeftLeg => "pierna izquierda",
            BodyPart::RightLeg => "pierna derecha",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

/// Why a guess left the round untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    RoundOver,
    AlreadyGuessed,
    NotALetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Ignored(IgnoreReason),
    Correct { letter: char },
    /// `part` is the stage for wrong guess number `6 - remaining_attempts`.
    Wrong { letter: char, part: BodyPart },
}

/// What the presenter shows when a round ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub outcome: RoundStatus,
    pub secret_word: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    /// Set only by the guess that ended the round.
    pub finished: Option<RoundSummary>,
}

impl GuessReport {
    fn ignored(reason: IgnoreReason) -> Self {
        Self { outcome: GuessOutcome::Ignored(reason), finished: None }
    }
}

/// Per-position view of the secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterReveal {
    Shown(char),
    Hidden,
}

/// Colouring of an on-screen key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Unused,
    Correct,
    Wrong,
}

#[derive(Debug, Clone)]
struct Round {
    category: usize,
    secret_word: String,
    normalized_secret: String,
    guessed_letters: BTreeSet<char>,
    remaining_attempts: u8,
}

impl Round {
    fn new(category: usize, secret_word: String) -> Self {
        let normalized_secret = normalize_text(&secret_word);
        Self {
            category,
            secret_word,
            normalized_secret,
            guessed_letters: BTreeSet::new(),
            remaining_attempts: MAX_ATTEMPTS,
        }
    }

    fn is_won(&self) -> bool {
        self.normalized_secret.chars().all(|c| self.guessed_letters.contains(&c))
    }

    fn status(&self) -> RoundStatus {
        // A win outranks running out of attempts.
        if self.is_won() {
            RoundStatus::Won
        } else if self.remaining_attempts == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    fn is_revealed(&self, c: char) -> bool {
        normalize_char(c).is_some_and(|n| self.guessed_letters.contains(&n))
    }
}

/// Hangman rules engine: word bank, current round and running score.
///
/// Pure state; all drawing and input handling belongs to the presenter.
#[derive(Debug, Clone)]
pub struct GameEngine<R = ChaCha8Rng> {
    bank: WordBank,
    rng: R,
    round: Round,
    score: u32,
}

impl GameEngine<ChaCha8Rng> {
    /// Engine with a reproducible word sequence.
    pub fn with_seed(bank: WordBank, seed: u64) -> Self {
        Self::new(bank, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(bank: WordBank) -> Self {
        Self::new(bank, ChaCha8Rng::from_os_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Takes ownership of the bank and RNG and starts the first round in the
    /// first category.
    pub fn new(bank: WordBank, mut rng: R) -> Self {
        let round = Self::draw_round(&bank, &mut rng, 0);
        Self { bank, rng, round, score: 0 }
    }

    /// Begin a fresh round in the current category. The score is kept.
    pub fn start_new_game(&mut self) {
        self.round = Self::draw_round(&self.bank, &mut self.rng, self.round.category);
    }

    /// Move to the next category (wrapping) and start a round there.
    pub fn change_category(&mut self) {
        let next = self.bank.next_index(self.round.category);
        self.round = Self::draw_round(&self.bank, &mut self.rng, next);
    }

    /// Jump to a category by name and start a round there.
    pub fn select_category(&mut self, name: &str) -> Result<(), WordBankError> {
        let index = self.bank.position(name)?;
        self.round = Self::draw_round(&self.bank, &mut self.rng, index);
        Ok(())
    }

    fn draw_round(bank: &WordBank, rng: &mut R, category: usize) -> Round {
        let entry = &bank.categories()[category];
        let secret_word = entry.words[rng.random_range(0..entry.words.len())].clone();
        let round = Round::new(category, secret_word);

        info!(category = %entry.name, "new round");
        debug!(word = %round.secret_word, normalized = %round.normalized_secret, "secret word chosen");
        round
    }

    /// Submit one letter. Accents and case are folded before matching, so
    /// `'ñ'` and `'n'` are the same guess.
    pub fn handle_guess(&mut self, letter: char) -> GuessReport {
        if self.status().is_over() {
            return GuessReport::ignored(IgnoreReason::RoundOver);
        }

        let letter = match normalize_char(letter) {
            Some(c) if c.is_alphabetic() => c,
            _ => return GuessReport::ignored(IgnoreReason::NotALetter),
        };

        if !self.round.guessed_letters.insert(letter) {
            return GuessReport::ignored(IgnoreReason::AlreadyGuessed);
        }

        let outcome = if self.round.normalized_secret.contains(letter) {
            debug!(%letter, "correct guess");
            GuessOutcome::Correct { letter }
        } else {
            self.round.remaining_attempts = self.round.remaining_attempts.saturating_sub(1);
            let wrong_index = MAX_ATTEMPTS - self.round.remaining_attempts;
            // 1..=6 while the round is still in progress
            let part = BodyPart::from_wrong_index(wrong_index).unwrap_or(BodyPart::RightLeg);
            debug!(%letter, wrong_index, remaining = self.round.remaining_attempts, "wrong guess");
            GuessOutcome::Wrong { letter, part }
        };

        let finished = match self.status() {
            RoundStatus::InProgress => None,
            status => {
                if status == RoundStatus::Won {
                    self.score += WIN_BONUS;
                }
                info!(?status, word = %self.round.secret_word, score = self.score, "round over");
                self.summary()
            }
        };

        GuessReport { outcome, finished }
    }

    pub fn is_won(&self) -> bool {
        self.round.is_won()
    }

    pub fn is_lost(&self) -> bool {
        self.round.remaining_attempts == 0 && !self.is_won()
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status()
    }

    /// Outcome and secret word, once the round is over.
    pub fn summary(&self) -> Option<RoundSummary> {
        let outcome = self.status();
        outcome.is_over().then(|| RoundSummary {
            outcome,
            secret_word: self.round.secret_word.clone(),
            score: self.score,
        })
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn category(&self) -> &str {
        &self.bank.categories()[self.round.category].name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_attempts(&self) -> u8 {
        self.round.remaining_attempts
    }

    pub fn wrong_guesses(&self) -> u8 {
        MAX_ATTEMPTS - self.round.remaining_attempts
    }

    /// Normalized letters tried this round, sorted.
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.round.guessed_letters
    }

    /// Guessed letters as shown in the stats line: `"a, e, x"`.
    pub fn used_letters_label(&self) -> String {
        self.round
            .guessed_letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The literal secret word. Meant for logging and tests; the presenter
    /// reads it from [`RoundSummary`].
    pub fn secret_word(&self) -> &str {
        &self.round.secret_word
    }

    /// Each character of the secret word, shown with its original accent once
    /// its unaccented form has been guessed.
    pub fn reveal(&self) -> Vec<LetterReveal> {
        self.round
            .secret_word
            .chars()
            .map(|c| if self.round.is_revealed(c) { LetterReveal::Shown(c) } else { LetterReveal::Hidden })
            .collect()
    }

    pub fn masked_word(&self, placeholder: char) -> String {
        self.reveal()
            .into_iter()
            .map(|r| match r {
                LetterReveal::Shown(c) => c,
                LetterReveal::Hidden => placeholder,
            })
            .collect()
    }

    pub fn letter_state(&self, key: char) -> KeyState {
        match normalize_char(key) {
            Some(c) if self.round.guessed_letters.contains(&c) => {
                if self.round.normalized_secret.contains(c) {
                    KeyState::Correct
                } else {
                    KeyState::Wrong
                }
            }
            _ => KeyState::Unused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_for(word: &str) -> GameEngine {
        let bank = WordBank::from_pairs([("test", &[word][..])]).unwrap();
        GameEngine::with_seed(bank, 7)
    }

    #[test]
    fn body_parts_follow_wrong_guess_order() {
        assert_eq!(BodyPart::from_wrong_index(0), None);
        assert_eq!(BodyPart::from_wrong_index(1), Some(BodyPart::Head));
        assert_eq!(BodyPart::from_wrong_index(6), Some(BodyPart::RightLeg));
        assert_eq!(BodyPart::from_wrong_index(7), None);
        for part in BodyPart::ALL {
            assert_eq!(BodyPart::from_wrong_index(part.wrong_index()), Some(part));
        }
        let shown: Vec<_> = BodyPart::revealed(2).collect();
        assert_eq!(shown, [BodyPart::Head, BodyPart::Body]);
    }

    #[test]
    fn wrong_guess_reports_next_part() {
        let mut engine = engine_for("sol");
        let report = engine.handle_guess('x');
        assert_eq!(report.outcome, GuessOutcome::Wrong { letter: 'x', part: BodyPart::Head });
        let report = engine.handle_guess('y');
        assert_eq!(report.outcome, GuessOutcome::Wrong { letter: 'y', part: BodyPart::Body });
        assert_eq!(engine.wrong_guesses(), 2);
    }

    #[test]
    fn six_misses_walk_every_part_in_order() {
        let mut engine = engine_for("sol");
        let parts: Vec<_> = "abcdef"
            .chars()
            .filter_map(|c| match engine.handle_guess(c).outcome {
                GuessOutcome::Wrong { part, .. } => Some(part),
                _ => None,
            })
            .collect();
        assert_eq!(parts, BodyPart::ALL);
        assert_eq!(engine.status(), RoundStatus::Lost);
    }

    #[test]
    fn reveal_keeps_accents() {
        let mut engine = engine_for("león");
        engine.handle_guess('o');
        assert_eq!(engine.masked_word('_'), "__ó_");
        assert_eq!(
            engine.reveal(),
            [LetterReveal::Hidden, LetterReveal::Hidden, LetterReveal::Shown('ó'), LetterReveal::Hidden]
        );
    }

    #[test]
    fn accented_and_uppercase_guesses_fold() {
        let mut engine = engine_for("españa");
        assert_eq!(engine.handle_guess('ñ').outcome, GuessOutcome::Correct { letter: 'n' });
        assert_eq!(engine.handle_guess('N').outcome, GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed));
        assert_eq!(engine.handle_guess('É').outcome, GuessOutcome::Correct { letter: 'e' });
        assert_eq!(engine.masked_word('_'), "e___ñ_");
    }

    #[test]
    fn non_letters_are_ignored() {
        let mut engine = engine_for("gato");
        assert_eq!(engine.handle_guess('3').outcome, GuessOutcome::Ignored(IgnoreReason::NotALetter));
        assert_eq!(engine.handle_guess(' ').outcome, GuessOutcome::Ignored(IgnoreReason::NotALetter));
        assert!(engine.guessed_letters().is_empty());
        assert_eq!(engine.remaining_attempts(), MAX_ATTEMPTS);
    }

    #[test]
    fn key_states_track_guesses() {
        let mut engine = engine_for("pera");
        engine.handle_guess('p');
        engine.handle_guess('z');
        assert_eq!(engine.letter_state('p'), KeyState::Correct);
        assert_eq!(engine.letter_state('z'), KeyState::Wrong);
        assert_eq!(engine.letter_state('a'), KeyState::Unused);
        assert_eq!(engine.used_letters_label(), "p, z");
    }

    #[test]
    fn summary_only_after_round_ends() {
        let mut engine = engine_for("oso");
        assert_eq!(engine.summary(), None);
        engine.handle_guess('o');
        let report = engine.handle_guess('s');
        let summary = report.finished.expect("round should be over");
        assert_eq!(summary.outcome, RoundStatus::Won);
        assert_eq!(summary.secret_word, "oso");
        assert_eq!(summary.score, WIN_BONUS);
        assert_eq!(engine.summary(), Some(summary));
    }
}
