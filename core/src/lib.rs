#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use guessing::*;
pub use memory::*;
pub use snake::*;
pub use timing::*;
pub use types::*;

mod error;
mod guessing;
mod memory;
mod snake;
mod timing;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Tells the host whether applying an event changed anything worth re-rendering.
pub trait HasUpdate {
    fn has_update(&self) -> bool;
}

impl<T: HasUpdate, E> HasUpdate for core::result::Result<T, E> {
    fn has_update(&self) -> bool {
        self.as_ref().is_ok_and(|outcome| outcome.has_update())
    }
}

/// Uniform contract every mini-game exposes to whatever shell mounts it.
pub trait MiniGame {
    const KIND: GameKind;

    type Input;
    type Outcome: HasUpdate;

    /// Builds a fresh game, equivalent to constructing it and calling [`MiniGame::reset`].
    fn mount(seed: u64) -> Self
    where
        Self: Sized;

    fn reset(&mut self);

    fn handle(&mut self, input: Self::Input) -> Result<Self::Outcome>;

    /// Lets time pass for games with timed transitions, returning whether state changed.
    fn advance(&mut self, _elapsed: Duration) -> bool {
        false
    }

    fn state(&self) -> EngineState;

    /// Session-cumulative score shown next to the game.
    fn score(&self) -> u32;

    fn is_finished(&self) -> bool {
        self.state().is_finished()
    }
}

/// Catalog of the games the arcade can mount.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    NumberGuess,
    MemoryCards,
    Snake,
}

impl GameKind {
    pub const ALL: [Self; 3] = [Self::NumberGuess, Self::MemoryCards, Self::Snake];

    pub const fn id(self) -> &'static str {
        use GameKind::*;
        match self {
            NumberGuess => "number-guess",
            MemoryCards => "memory-cards",
            Snake => "snake",
        }
    }

    pub const fn title(self) -> &'static str {
        use GameKind::*;
        match self {
            NumberGuess => "Quantum Number Matrix",
            MemoryCards => "Neural Memory Protocol",
            Snake => "Digital Serpent Evolution",
        }
    }

    pub const fn description(self) -> &'static str {
        use GameKind::*;
        match self {
            NumberGuess => {
                "Navigate through dimensional probability fields to discover the hidden numerical sequence!"
            }
            MemoryCards => {
                "Synchronize your cognitive patterns with the holographic memory matrix interface!"
            }
            Snake => {
                "Guide the bio-digital entity through the neon-lit data streams of cyberspace!"
            }
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GameKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or(GameError::UnknownGame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_kind_parses_from_its_id() {
        for kind in GameKind::ALL {
            assert_eq!(kind.id().parse::<GameKind>(), Ok(kind));
        }
        assert_eq!("tetris".parse::<GameKind>(), Err(GameError::UnknownGame));
    }

    #[test]
    fn error_results_never_report_updates() {
        let failed: Result<SnakeOutcome> = Err(GameError::AlreadyEnded);
        assert!(!failed.has_update());
        let moved: Result<SnakeOutcome> = Ok(SnakeOutcome::Moved);
        assert!(moved.has_update());
    }

    #[test]
    fn engine_state_finished_flags() {
        assert!(!EngineState::Ready.is_finished());
        assert!(!EngineState::Active.is_finished());
        assert!(EngineState::Won.is_finished());
        assert!(EngineState::Lost.is_finished());
    }
}
