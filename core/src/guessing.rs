use alloc::string::String;
use core::fmt;
use core::num::IntErrorKind;
use core::ops::RangeInclusive;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Range the hidden number is drawn from, inclusive on both ends.
pub const GUESS_RANGE: RangeInclusive<i32> = 1..=100;

pub const GUESS_MAX_POINTS: u32 = 100;
pub const GUESS_MIN_POINTS: u32 = 10;
pub const GUESS_ATTEMPT_PENALTY: u32 = 10;

/// Points for finding the number on attempt `attempts` (1-based).
pub const fn guess_points(attempts: u32) -> u32 {
    let penalty = attempts
        .saturating_sub(1)
        .saturating_mul(GUESS_ATTEMPT_PENALTY);
    let points = GUESS_MAX_POINTS.saturating_sub(penalty);
    if points < GUESS_MIN_POINTS {
        GUESS_MIN_POINTS
    } else {
        points
    }
}

/// Latest message shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Feedback {
    Prompt,
    TooLow { attempt: u32 },
    TooHigh { attempt: u32 },
    Correct { attempts: u32, points: u32 },
}

impl Feedback {
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct { .. })
    }
}

impl HasUpdate for Feedback {
    fn has_update(&self) -> bool {
        !matches!(self, Self::Prompt)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Feedback::*;
        match *self {
            Prompt => write!(
                f,
                "I'm thinking of a number between {} and {}. Can you guess it?",
                GUESS_RANGE.start(),
                GUESS_RANGE.end()
            ),
            TooLow { attempt } => {
                write!(f, "Too low! Try a higher number. (Attempt {attempt})")
            }
            TooHigh { attempt } => {
                write!(f, "Too high! Try a lower number. (Attempt {attempt})")
            }
            Correct { attempts, points } => write!(
                f,
                "Congratulations! You guessed it in {attempts} attempts! (+{points} points)"
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuessInput {
    /// Raw text typed by the player.
    Submit(String),
}

#[derive(Clone, Debug)]
pub struct GuessingGame {
    rng: SmallRng,
    target: i32,
    attempts: u32,
    score: u32,
    state: EngineState,
    feedback: Feedback,
}

impl GuessingGame {
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let target = rng.random_range(GUESS_RANGE);
        Self {
            rng,
            target,
            attempts: 0,
            score: 0,
            state: EngineState::Ready,
            feedback: Feedback::Prompt,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Draws a new number and clears attempts; the score carries over.
    pub fn reset(&mut self) {
        self.target = self.rng.random_range(GUESS_RANGE);
        self.attempts = 0;
        self.state = EngineState::Ready;
        self.feedback = Feedback::Prompt;
        log::debug!("guessing game reset");
    }

    pub fn submit_guess(&mut self, input: &str) -> Result<Feedback> {
        self.check_not_finished()?;
        let value = match input.trim().parse::<i32>() {
            Ok(value) => value,
            // Well-formed integers beyond `i32` still compare as too high or too low.
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => i32::MAX,
                IntErrorKind::NegOverflow => i32::MIN,
                _ => return Err(GameError::InvalidGuess),
            },
        };
        self.guess(value)
    }

    pub fn guess(&mut self, value: i32) -> Result<Feedback> {
        use core::cmp::Ordering::*;

        self.check_not_finished()?;
        self.attempts = self.attempts.saturating_add(1);
        let attempt = self.attempts;

        self.feedback = match value.cmp(&self.target) {
            Equal => {
                let points = guess_points(attempt);
                self.score = self.score.saturating_add(points);
                self.state = EngineState::Won;
                log::debug!("number found in {} attempts, +{} points", attempt, points);
                Feedback::Correct {
                    attempts: attempt,
                    points,
                }
            }
            Less => {
                self.state = EngineState::Active;
                Feedback::TooLow { attempt }
            }
            Greater => {
                self.state = EngineState::Active;
                Feedback::TooHigh { attempt }
            }
        };
        Ok(self.feedback)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl MiniGame for GuessingGame {
    const KIND: GameKind = GameKind::NumberGuess;

    type Input = GuessInput;
    type Outcome = Feedback;

    fn mount(seed: u64) -> Self {
        Self::new(seed)
    }

    fn reset(&mut self) {
        GuessingGame::reset(self)
    }

    fn handle(&mut self, input: GuessInput) -> Result<Feedback> {
        match input {
            GuessInput::Submit(text) => self.submit_guess(&text),
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with_target(target: i32) -> GuessingGame {
        let mut game = GuessingGame::new(7);
        game.target = target;
        game
    }

    #[test]
    fn target_stays_in_range_across_resets() {
        let mut game = GuessingGame::new(0xdead_beef);
        for _ in 0..500 {
            assert!(GUESS_RANGE.contains(&game.target));
            game.reset();
        }
    }

    #[test]
    fn three_guesses_score_eighty() {
        let mut game = game_with_target(50);

        assert_eq!(game.guess(25), Ok(Feedback::TooLow { attempt: 1 }));
        assert_eq!(game.guess(75), Ok(Feedback::TooHigh { attempt: 2 }));
        assert_eq!(
            game.guess(50),
            Ok(Feedback::Correct {
                attempts: 3,
                points: 80
            })
        );
        assert_eq!(game.attempts(), 3);
        assert_eq!(game.score(), 80);
        assert_eq!(game.state(), EngineState::Won);
    }

    #[test]
    fn points_follow_formula_and_floor_at_ten() {
        assert_eq!(guess_points(1), 100);
        assert_eq!(guess_points(2), 90);
        assert_eq!(guess_points(10), 10);
        assert_eq!(guess_points(11), 10);
        assert_eq!(guess_points(u32::MAX), 10);
        for attempts in 1..200 {
            let points = guess_points(attempts);
            assert!((GUESS_MIN_POINTS..=GUESS_MAX_POINTS).contains(&points));
        }
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let mut game = game_with_target(42);

        for input in ["", "   ", "abc", "4.5", "NaN", "12abc"] {
            assert_eq!(game.submit_guess(input), Err(GameError::InvalidGuess));
        }
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.state(), EngineState::Ready);
        assert_eq!(game.feedback(), Feedback::Prompt);
        assert_eq!(game.target, 42);
    }

    #[test]
    fn oversized_integers_are_still_guesses() {
        let mut game = game_with_target(50);
        assert_eq!(
            game.submit_guess("3000000000"),
            Ok(Feedback::TooHigh { attempt: 1 })
        );
        assert_eq!(
            game.submit_guess("-3000000000"),
            Ok(Feedback::TooLow { attempt: 2 })
        );
        assert_eq!(
            game.submit_guess("99999999999999999999999"),
            Ok(Feedback::TooHigh { attempt: 3 })
        );
        assert_eq!(game.attempts(), 3);
        assert_eq!(game.state(), EngineState::Active);
    }

    #[test]
    fn binary_search_finds_every_target() {
        for target in GUESS_RANGE {
            let mut game = game_with_target(target);
            let (mut low, mut high) = (*GUESS_RANGE.start(), *GUESS_RANGE.end());
            let mut calls = 0;

            let feedback = loop {
                let mid = low + (high - low) / 2;
                calls += 1;
                match game.guess(mid).unwrap() {
                    Feedback::TooLow { attempt } => {
                        assert_eq!(attempt, calls);
                        low = mid + 1;
                    }
                    Feedback::TooHigh { attempt } => {
                        assert_eq!(attempt, calls);
                        high = mid - 1;
                    }
                    feedback => break feedback,
                }
            };

            assert_eq!(
                feedback,
                Feedback::Correct {
                    attempts: calls,
                    points: guess_points(calls)
                }
            );
            assert_eq!(game.attempts(), calls);
            assert_eq!(game.score(), guess_points(calls));
            assert!(calls <= 7);
        }
    }

    #[test]
    fn text_input_is_trimmed() {
        let mut game = game_with_target(42);
        assert_eq!(game.submit_guess(" 10 "), Ok(Feedback::TooLow { attempt: 1 }));
        assert_eq!(game.state(), EngineState::Active);
    }

    #[test]
    fn guesses_after_win_are_refused() {
        let mut game = game_with_target(9);
        game.guess(9).unwrap();

        for _ in 0..3 {
            assert_eq!(game.guess(9), Err(GameError::AlreadyEnded));
            assert_eq!(game.submit_guess("x"), Err(GameError::AlreadyEnded));
        }
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn reset_keeps_score_and_clears_attempts() {
        let mut game = game_with_target(3);
        game.guess(1).unwrap();
        game.guess(3).unwrap();
        assert_eq!(game.score(), 90);

        game.reset();
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.score(), 90);
        assert_eq!(game.state(), EngineState::Ready);

        game.target = 60;
        game.guess(60).unwrap();
        assert_eq!(game.score(), 190);
    }

    #[test]
    fn handle_routes_text_submissions() {
        let mut game = game_with_target(5);
        let outcome = game.handle(GuessInput::Submit("5".into()));
        assert!(outcome.has_update());
        assert!(game.is_finished());
    }
}
