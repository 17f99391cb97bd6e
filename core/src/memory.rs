use alloc::vec::Vec;
use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// How long both faces of a candidate pair stay visible before the pair resolves.
pub const PAIR_RESOLUTION_DELAY: Duration = Duration::from_millis(1000);

pub const MEMORY_MAX_POINTS: u32 = 200;
pub const MEMORY_MIN_POINTS: u32 = 50;
pub const MEMORY_MOVE_PENALTY: u32 = 5;

/// Points for clearing the deck in `moves` pair comparisons.
pub const fn memory_points(moves: u32) -> u32 {
    let points = MEMORY_MAX_POINTS.saturating_sub(moves.saturating_mul(MEMORY_MOVE_PENALTY));
    if points < MEMORY_MIN_POINTS {
        MEMORY_MIN_POINTS
    } else {
        points
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Gamepad,
    Joystick,
    Target,
    Die,
    Joker,
    Circus,
    Palette,
    Masks,
}

impl Symbol {
    pub const ALL: [Self; 8] = [
        Self::Gamepad,
        Self::Joystick,
        Self::Target,
        Self::Die,
        Self::Joker,
        Self::Circus,
        Self::Palette,
        Self::Masks,
    ];

    pub const fn glyph(self) -> &'static str {
        use Symbol::*;
        match self {
            Gamepad => "🎮",
            Joystick => "🕹️",
            Target => "🎯",
            Die => "🎲",
            Joker => "🃏",
            Circus => "🎪",
            Palette => "🎨",
            Masks => "🎭",
        }
    }
}

/// Number of pairs in a deck.
pub const PAIR_COUNT: u32 = Symbol::ALL.len() as u32;

/// Position of a card in the deck.
pub type CardId = usize;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub revealed: bool,
    pub matched: bool,
}

impl Card {
    pub const fn is_face_up(&self) -> bool {
        self.revealed || self.matched
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MemoryOutcome {
    NoChange,
    Flipped,
    /// Second card of a pair is up; the pair resolves after [`PAIR_RESOLUTION_DELAY`].
    PairPending { is_match: bool },
    Matched,
    Mismatched,
    Won { moves: u32, points: u32 },
}

impl HasUpdate for MemoryOutcome {
    fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemoryInput {
    Reveal(CardId),
}

#[derive(Clone, Debug)]
pub struct MemoryMatchGame {
    rng: SmallRng,
    deck: Vec<Card>,
    pending: SmallVec<[CardId; 2]>,
    resolution: Delay,
    moves: u32,
    matched_pairs: u32,
    score: u32,
    state: EngineState,
}

impl MemoryMatchGame {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            rng: SmallRng::seed_from_u64(seed),
            deck: Vec::new(),
            pending: SmallVec::new(),
            resolution: Delay::idle(),
            moves: 0,
            matched_pairs: 0,
            score: 0,
            state: EngineState::Ready,
        };
        game.reset();
        game
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    /// Face-up cards waiting for their pair to resolve.
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Whether input is paused while a revealed pair waits to resolve.
    pub fn is_resolving(&self) -> bool {
        self.resolution.is_armed()
    }

    /// Deals a freshly shuffled deck; the score carries over.
    pub fn reset(&mut self) {
        let mut symbols: Vec<Symbol> = Symbol::ALL
            .iter()
            .chain(Symbol::ALL.iter())
            .copied()
            .collect();
        symbols.shuffle(&mut self.rng);

        self.deck = symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card {
                id,
                symbol,
                revealed: false,
                matched: false,
            })
            .collect();
        self.pending.clear();
        self.resolution.cancel();
        self.moves = 0;
        self.matched_pairs = 0;
        self.state = EngineState::Ready;
        log::debug!("memory deck dealt");
    }

    pub fn reveal(&mut self, id: CardId) -> Result<MemoryOutcome> {
        let card = self.deck.get(id).ok_or(GameError::InvalidCard)?;
        if self.state.is_finished() || self.pending.len() >= 2 || card.is_face_up() {
            return Ok(MemoryOutcome::NoChange);
        }

        self.deck[id].revealed = true;
        self.pending.push(id);
        self.mark_started();

        let &[first, second] = self.pending.as_slice() else {
            return Ok(MemoryOutcome::Flipped);
        };

        self.moves = self.moves.saturating_add(1);
        self.resolution.arm(PAIR_RESOLUTION_DELAY);
        let is_match = self.deck[first].symbol == self.deck[second].symbol;
        log::trace!("pair {:?} pending, match: {}", (first, second), is_match);
        Ok(MemoryOutcome::PairPending { is_match })
    }

    /// Commits the pending pair right away instead of waiting for the delay.
    pub fn resolve_pending(&mut self) -> MemoryOutcome {
        let &[first, second] = self.pending.as_slice() else {
            return MemoryOutcome::NoChange;
        };
        self.resolution.cancel();
        self.pending.clear();

        if self.deck[first].symbol != self.deck[second].symbol {
            self.deck[first].revealed = false;
            self.deck[second].revealed = false;
            return MemoryOutcome::Mismatched;
        }

        self.deck[first].matched = true;
        self.deck[second].matched = true;
        self.matched_pairs += 1;

        if self.matched_pairs < PAIR_COUNT {
            return MemoryOutcome::Matched;
        }

        let points = memory_points(self.moves);
        self.score = self.score.saturating_add(points);
        self.state = EngineState::Won;
        log::debug!("memory cleared in {} moves, +{} points", self.moves, points);
        MemoryOutcome::Won {
            moves: self.moves,
            points,
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = EngineState::Active;
        }
    }
}

impl MiniGame for MemoryMatchGame {
    const KIND: GameKind = GameKind::MemoryCards;

    type Input = MemoryInput;
    type Outcome = MemoryOutcome;

    fn mount(seed: u64) -> Self {
        Self::new(seed)
    }

    fn reset(&mut self) {
        MemoryMatchGame::reset(self)
    }

    fn handle(&mut self, input: MemoryInput) -> Result<MemoryOutcome> {
        match input {
            MemoryInput::Reveal(id) => self.reveal(id),
        }
    }

    fn advance(&mut self, elapsed: Duration) -> bool {
        if self.resolution.advance(elapsed) {
            self.resolve_pending().has_update()
        } else {
            false
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn score(&self) -> u32 {
        self.score
    }
}
