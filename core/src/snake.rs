use alloc::collections::VecDeque;
use core::time::Duration;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

pub const BOARD_SIZE: Coord = 15;
pub const INITIAL_HEAD: Coord2 = (7, 7);
pub const INITIAL_FOOD: Coord2 = (10, 10);
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Simulation period while the snake is running.
pub const TICK_PERIOD: Duration = Duration::from_millis(200);

/// Score awarded per food eaten.
pub const FOOD_SCORE: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub size: Coord2,
    pub start: Coord2,
    pub food: Coord2,
}

impl SnakeConfig {
    pub const fn new_unchecked(size: Coord2, start: Coord2, food: Coord2) -> Self {
        Self { size, start, food }
    }

    /// Clamps the layout onto the board. Food placed on the start cell is moved to a random
    /// free cell when the game resets.
    pub fn new((size_x, size_y): Coord2, start: Coord2, food: Coord2) -> Self {
        let size_x = size_x.max(1);
        let size_y = size_y.max(1);
        let clamp = |(x, y): Coord2| (x.min(size_x - 1), y.min(size_y - 1));
        Self::new_unchecked((size_x, size_y), clamp(start), clamp(food))
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self::new_unchecked((BOARD_SIZE, BOARD_SIZE), INITIAL_HEAD, INITIAL_FOOD)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SnakeOutcome {
    NoChange,
    Started,
    Turned,
    Moved,
    Ate,
    Crashed(Collision),
    /// The snake covers every cell, nothing is left to eat.
    Filled,
}

impl SnakeOutcome {
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Crashed(_) | Self::Filled)
    }
}

impl HasUpdate for SnakeOutcome {
    fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SnakeInput {
    Start,
    Turn(Direction),
}

/// Render projection of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeCell {
    #[default]
    Empty,
    Head,
    Body,
    Food,
}

/// Picks a uniformly random unoccupied cell, or `None` when the board is full.
///
/// Draws an index into the free cells only, so the cost does not depend on how
/// crowded the board is and the call always terminates.
pub fn random_free_cell<R: Rng + ?Sized>(occupied: &Array2<bool>, rng: &mut R) -> Option<Coord2> {
    let free_cells = occupied.iter().filter(|&&taken| !taken).count();
    if free_cells == 0 {
        return None;
    }

    let place = rng.random_range(0..free_cells);
    let ((x, y), _) = occupied
        .indexed_iter()
        .filter(|&(_, &taken)| !taken)
        .nth(place)?;
    Some((x.try_into().ok()?, y.try_into().ok()?))
}

#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: SnakeConfig,
    rng: SmallRng,
    body: VecDeque<Coord2>,
    occupied: Array2<bool>,
    food: Option<Coord2>,
    heading: Direction,
    queued: Direction,
    state: EngineState,
    score: u32,
    high_score: u32,
    ticker: Ticker,
}

impl SnakeGame {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SnakeConfig::default())
    }

    pub fn with_config(seed: u64, config: SnakeConfig) -> Self {
        let mut game = Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            body: VecDeque::new(),
            occupied: Array2::default(config.size.to_nd_index()),
            food: None,
            heading: INITIAL_DIRECTION,
            queued: INITIAL_DIRECTION,
            state: EngineState::Ready,
            score: 0,
            high_score: 0,
            ticker: Ticker::new(TICK_PERIOD),
        };
        game.reset();
        game
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    /// Segments from head to tail.
    pub fn snake(&self) -> impl ExactSizeIterator<Item = Coord2> + '_ {
        self.body.iter().copied()
    }

    pub fn head(&self) -> Coord2 {
        self.body.front().copied().unwrap_or(self.config.start)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Option<Coord2> {
        self.food
    }

    /// Direction the snake moved on its last tick.
    pub fn direction(&self) -> Direction {
        self.heading
    }

    /// Direction the next tick will move in.
    pub fn queued_direction(&self) -> Direction {
        self.queued
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn is_occupied(&self, coords: Coord2) -> bool {
        self.occupied
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn board(&self) -> Array2<SnakeCell> {
        let mut board = Array2::default(self.config.size.to_nd_index());
        if let Some(food) = self.food {
            board[food.to_nd_index()] = SnakeCell::Food;
        }
        for (index, segment) in self.body.iter().enumerate() {
            board[segment.to_nd_index()] = if index == 0 {
                SnakeCell::Head
            } else {
                SnakeCell::Body
            };
        }
        board
    }

    /// Back to the starting layout; the high score survives.
    pub fn reset(&mut self) {
        let SnakeConfig { start, food, .. } = self.config;

        self.body.clear();
        self.body.push_back(start);
        self.occupied.fill(false);
        self.occupied[start.to_nd_index()] = true;
        self.food = if food == start {
            random_free_cell(&self.occupied, &mut self.rng)
        } else {
            Some(food)
        };
        self.heading = INITIAL_DIRECTION;
        self.queued = INITIAL_DIRECTION;
        self.state = EngineState::Ready;
        self.score = 0;
        self.ticker.stop();
        log::debug!("snake reset");
    }

    pub fn start(&mut self) -> SnakeOutcome {
        if !self.state.is_ready() {
            return SnakeOutcome::NoChange;
        }
        self.state = EngineState::Active;
        self.ticker.start();
        SnakeOutcome::Started
    }

    pub fn set_direction(&mut self, direction: Direction) -> SnakeOutcome {
        if !self.state.is_active()
            || direction.is_opposite(self.heading)
            || direction == self.queued
        {
            return SnakeOutcome::NoChange;
        }
        self.queued = direction;
        SnakeOutcome::Turned
    }

    /// Runs one simulation step.
    pub fn tick(&mut self) -> SnakeOutcome {
        if !self.state.is_active() {
            return SnakeOutcome::NoChange;
        }

        self.heading = self.queued;
        let Some(next) = apply_delta(self.head(), self.heading.delta(), self.config.size) else {
            return self.crash(Collision::Wall);
        };
        if self.occupied[next.to_nd_index()] {
            return self.crash(Collision::Body);
        }

        self.body.push_front(next);
        self.occupied[next.to_nd_index()] = true;

        if self.food != Some(next) {
            if let Some(tail) = self.body.pop_back() {
                self.occupied[tail.to_nd_index()] = false;
            }
            return SnakeOutcome::Moved;
        }

        self.score = self.score.saturating_add(FOOD_SCORE);
        self.food = random_free_cell(&self.occupied, &mut self.rng);
        log::trace!("food eaten at {:?}, next at {:?}", next, self.food);

        if self.food.is_none() {
            self.end_game(EngineState::Won);
            return SnakeOutcome::Filled;
        }
        SnakeOutcome::Ate
    }

    fn crash(&mut self, collision: Collision) -> SnakeOutcome {
        log::debug!("snake crashed: {:?} with score {}", collision, self.score);
        self.end_game(EngineState::Lost);
        SnakeOutcome::Crashed(collision)
    }

    fn end_game(&mut self, state: EngineState) {
        self.state = state;
        self.high_score = self.high_score.max(self.score);
        self.ticker.stop();
    }
}

impl MiniGame for SnakeGame {
    const KIND: GameKind = GameKind::Snake;

    type Input = SnakeInput;
    type Outcome = SnakeOutcome;

    fn mount(seed: u64) -> Self {
        Self::new(seed)
    }

    fn reset(&mut self) {
        SnakeGame::reset(self)
    }

    fn handle(&mut self, input: SnakeInput) -> Result<SnakeOutcome> {
        Ok(match input {
            SnakeInput::Start => self.start(),
            SnakeInput::Turn(direction) => self.set_direction(direction),
        })
    }

    fn advance(&mut self, elapsed: Duration) -> bool {
        self.ticker.feed(elapsed);
        let mut updated = false;
        while self.ticker.take_due() {
            let outcome = self.tick();
            updated |= outcome.has_update();
            if outcome.is_game_over() {
                break;
            }
        }
        updated
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn score(&self) -> u32 {
        self.score
    }
}
