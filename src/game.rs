use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::cell::Cell;
use crate::config::{
    GridSize, SimConfig, GROWTH_SPEED_FACTOR, INITIAL_FRUIT_WEIGHT, INITIAL_LENGTH,
};
use crate::direction::Direction;
use crate::error::{ConfigError, SimError};
use crate::grid::{Grid, Position};
use crate::snapshot::Snapshot;

/// Current high-level simulation state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Terminated,
}

/// Which branch of the move policy picked a heading.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MovePolicy {
    /// Uniformly random among the safe headings.
    Explore,
    /// Kept the current heading.
    Inertia,
    /// Closest safe heading to the fruit.
    Greedy,
}

/// A move applied by [`Game::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Move {
    pub direction: Direction,
    pub policy: MovePolicy,
    pub ate_fruit: bool,
}

/// Result of one step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    Moved(Move),
    /// No safe heading was left; nothing was changed.
    Terminated,
}

impl StepOutcome {
    #[must_use]
    pub fn continues(self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Complete mutable state for one simulation.
///
/// The snake body has no explicit segment list: every body cell stores how
/// many more ticks it survives, the head is stamped with the current length,
/// and [`Grid::decrement_all`] ages the trail each tick.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    config: SimConfig,
    grid: Grid,
    length: i32,
    head: Position,
    direction: Direction,
    fruit_coords: Position,
    fruit: bool,
    speed: f64,
    tick_count: u64,
    status: GameStatus,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a game seeded from system entropy.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Creates a game drawing every random decision from `rng`.
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let size = config.grid_size();
        let mut game = Self {
            grid: Grid::new(size),
            length: INITIAL_LENGTH,
            head: Position::new(0, 0),
            direction: config.direction,
            fruit_coords: Position::new(0, 0),
            fruit: false,
            speed: config.speed,
            tick_count: 0,
            status: GameStatus::Running,
            config,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Rebuilds the board and state from the construction-time configuration.
    pub fn reset(&mut self) {
        let size = self.config.grid_size();
        self.grid = Grid::new(size);
        self.length = INITIAL_LENGTH;
        self.head = Position::new(i32::from(size.width / 2), i32::from(size.height / 2));
        self.grid[self.head] = Cell::body(self.length);
        self.direction = self.config.direction;
        self.fruit = false;
        self.speed = self.config.speed;
        self.tick_count = 0;
        self.status = GameStatus::Running;

        // Validated grids always have free cells next to a fresh snake.
        if let Err(error) = self.spawn_fruit(INITIAL_FRUIT_WEIGHT) {
            warn!(%error, "could not place the opening fruit");
        }
    }

    /// Shifts `position` by `delta` on the torus.
    #[must_use]
    pub fn wrap_offset(&self, position: Position, delta: (i32, i32)) -> Position {
        position.wrapped_offset(delta, self.grid.size())
    }

    /// Where the head would land after moving in `direction`.
    #[must_use]
    pub fn candidate_head(&self, direction: Direction) -> Position {
        self.wrap_offset(self.head, direction.delta())
    }

    /// True when `direction` leads onto an empty or fruit cell.
    #[must_use]
    pub fn is_valid(&self, direction: Direction) -> bool {
        self.grid[self.candidate_head(direction)].value <= 0
    }

    /// Wrapped L1 distance used by the greedy policy.
    #[must_use]
    pub fn toroidal_distance(&self, p: Position, q: Position) -> i32 {
        toroidal_distance(p, q, self.grid.size())
    }

    /// Advances the snake by one cell.
    ///
    /// With probability `exploration_rate / 4` the heading is random, with
    /// probability up to `exploration_rate` the current heading is kept when
    /// it is safe, and otherwise the safe heading closest to the fruit wins.
    pub fn step(&mut self, exploration_rate: f64) -> StepOutcome {
        if self.status == GameStatus::Terminated {
            return StepOutcome::Terminated;
        }

        let valid: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| self.is_valid(*direction))
            .collect();
        if valid.is_empty() {
            self.status = GameStatus::Terminated;
            debug!(
                length = self.length,
                tick = self.tick_count,
                "no safe move left, game over"
            );
            return StepOutcome::Terminated;
        }

        let (direction, policy) = self.choose_direction(&valid, exploration_rate);
        trace!(?direction, ?policy, "move chosen");

        let new_head = self.candidate_head(direction);
        let ate_fruit = self.grid[new_head].is_fruit();
        if ate_fruit {
            self.grow();
            self.fruit = false;
            debug!(length = self.length, x = new_head.x, y = new_head.y, "fruit eaten");
        }

        self.head = new_head;
        self.direction = direction;
        self.grid.decrement_all();
        self.grid[self.head] = Cell::body(self.length);

        StepOutcome::Moved(Move {
            direction,
            policy,
            ate_fruit,
        })
    }

    /// Places a fruit of `weight` on a uniformly random empty cell.
    pub fn spawn_fruit(&mut self, weight: i32) -> Result<Position, SimError> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return Err(SimError::NoEmptyCell);
        }

        let position = empty[self.rng.gen_range(0..empty.len())];
        self.place_fruit(position, weight);
        debug!(x = position.x, y = position.y, weight, "fruit spawned");
        Ok(position)
    }

    /// Moves the live fruit to `position`, replacing whatever was there.
    pub fn place_fruit(&mut self, position: Position, weight: i32) {
        if self.fruit && self.fruit_coords != position && self.grid[self.fruit_coords].is_fruit()
        {
            self.grid[self.fruit_coords] = Cell::EMPTY;
        }

        self.grid[position] = Cell::fruit(weight);
        self.fruit_coords = position;
        self.fruit = true;
    }

    /// Lengthens the snake by one and speeds up pacing.
    pub fn grow(&mut self) {
        self.length += 1;
        self.speed *= GROWTH_SPEED_FACTOR;
    }

    /// Pre-step half of a driver tick: restocks the fruit (weighted by the
    /// current length) and applies auto-grow.
    pub fn prepare_tick(&mut self) {
        if self.status == GameStatus::Terminated {
            return;
        }

        if !self.fruit {
            if let Err(error) = self.spawn_fruit(self.length) {
                warn!(%error, length = self.length, "skipping fruit spawn");
            }
        }

        if let Some(every) = self.config.auto_grow_every {
            if (self.tick_count + 1) % u64::from(every) == 0 {
                self.grow();
                debug!(length = self.length, tick = self.tick_count, "auto-grow");
            }
        }

        self.tick_count += 1;
    }

    /// One full tick using the configured exploration rate.
    pub fn tick(&mut self) -> StepOutcome {
        self.prepare_tick();
        self.step(self.config.exploration_rate)
    }

    fn choose_direction(
        &mut self,
        valid: &[Direction],
        exploration_rate: f64,
    ) -> (Direction, MovePolicy) {
        let r: f64 = self.rng.gen_range(0.0..1.0);

        if r < exploration_rate / 4.0 {
            let index = self.rng.gen_range(0..valid.len());
            (valid[index], MovePolicy::Explore)
        } else if r < exploration_rate && valid.contains(&self.direction) {
            (self.direction, MovePolicy::Inertia)
        } else {
            (self.closest_to_fruit(valid), MovePolicy::Greedy)
        }
    }

    /// First heading in enumeration order with the smallest distance to the
    /// fruit. `valid` is non-empty.
    fn closest_to_fruit(&self, valid: &[Direction]) -> Direction {
        let distance = |direction: Direction| {
            self.toroidal_distance(self.candidate_head(direction), self.fruit_coords)
        };

        let mut best = valid[0];
        let mut best_distance = distance(best);
        for &direction in &valid[1..] {
            let candidate = distance(direction);
            if candidate < best_distance {
                best = direction;
                best_distance = candidate;
            }
        }
        best
    }
}

impl<R> Game<R> {
    /// Read-only view for frontends.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.grid.size(),
            self.grid
                .cells()
                .map(|(_, cell)| cell.render_class(self.length))
                .collect(),
            self.length,
            self.grid.count_where(Cell::is_body),
            self.speed,
            self.tick_count,
            self.status,
        )
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct board access for scenario setup.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current snake length, which doubles as the score.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Pacing hint in seconds.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Location of the live fruit, if any.
    #[must_use]
    pub fn fruit(&self) -> Option<Position> {
        self.fruit.then_some(self.fruit_coords)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }
}

/// Minimum L1 distance from `q` to `p` and to `p` shifted forward by one
/// board width, one board height, or both.
#[must_use]
pub fn toroidal_distance(p: Position, q: Position, bounds: GridSize) -> i32 {
    let w = i32::from(bounds.width);
    let h = i32::from(bounds.height);

    [(w, 0), (0, h), (w, h)]
        .into_iter()
        .map(|(dx, dy)| Position::new(p.x + dx, p.y + dy).manhattan(q))
        .fold(p.manhattan(q), i32::min)
}
