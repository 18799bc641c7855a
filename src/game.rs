//! The game-state engine: snake, apple, heading and status in one aggregate.

use crate::grid::{Cell, Direction};
use crate::input::Buttons;
use crate::random::{CounterSource, place_apple};
use crate::shared_constants::INITIAL_DIRECTION;
use crate::snake::Snake;

/// Where the game is in its lifecycle. `Over` is terminal.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Over,
}

/// Everything the scheduler mutates once per step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    snake: Snake,
    apple: Cell,
    direction: Direction,
    status: GameStatus,
}

impl GameState {
    /// The power-on state: two-cell snake heading right and a freshly placed apple.
    pub fn new<S: CounterSource + ?Sized>(source: &S) -> Self {
        let snake = Snake::default();
        let apple = place_apple(&snake, source);
        Self::from_parts(snake, apple, INITIAL_DIRECTION, GameStatus::NotStarted)
    }

    #[must_use]
    pub const fn from_parts(
        snake: Snake,
        apple: Cell,
        direction: Direction,
        status: GameStatus,
    ) -> Self {
        Self {
            snake,
            apple,
            direction,
            status,
        }
    }

    #[must_use]
    pub const fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub const fn apple(&self) -> Cell {
        self.apple
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// NotStarted → Running. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        if self.status == GameStatus::NotStarted {
            self.status = GameStatus::Running;
            true
        } else {
            false
        }
    }

    /// Moves the snake one cell in an already-validated `direction`.
    pub fn advance(&mut self, direction: Direction) {
        self.direction = direction;
        self.snake.advance(direction);
    }

    /// If the head is on the apple, appends a segment at the apple and places a new one.
    ///
    /// At capacity nothing happens and the apple stays put. Returns whether the snake grew.
    ///
    /// The new segment repeats the head, so even a 64-entry body leaves one cell free.
    pub fn check_growth<S: CounterSource + ?Sized>(&mut self, source: &S) -> bool {
        if self.snake.head() != self.apple || !self.snake.grow_at(self.apple) {
            return false;
        }
        self.apple = place_apple(&self.snake, source);
        true
    }

    /// Sets the status to `Over` when the head has run into the body.
    pub fn check_collision(&mut self) -> bool {
        let collided = self.snake.collides_with_self();
        if collided {
            self.status = GameStatus::Over;
        }
        collided
    }

    /// One game step: resolve input, advance, then check growth and collision.
    ///
    /// Does nothing unless the game is running.
    pub fn step<S: CounterSource + ?Sized>(&mut self, buttons: Buttons, source: &S) {
        if self.status != GameStatus::Running {
            return;
        }
        let direction = buttons.resolve(self.direction);
        self.advance(direction);
        if self.check_growth(source) {
            #[cfg(feature = "defmt")]
            defmt::info!("ate apple, length {}, next apple {}", self.snake.len(), self.apple);
        }
        if self.check_collision() {
            #[cfg(feature = "defmt")]
            defmt::info!("game over at length {}", self.snake.len());
        }
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use heapless::Vec;

    use super::*;
    use crate::random::FreeRunningCounter;
    use crate::shared_constants::SNAKE_CAPACITY;

    fn running(pairs: &[(u8, u8)], apple: Cell, direction: Direction) -> GameState {
        let body: Vec<Cell, SNAKE_CAPACITY> =
            pairs.iter().map(|&(row, col)| Cell::new(row, col)).collect();
        GameState::from_parts(
            Snake::from_cells(&body).unwrap(),
            apple,
            direction,
            GameStatus::Running,
        )
    }

    #[test]
    fn new_game_waits_for_start() {
        let counter = FreeRunningCounter::new();
        let game = GameState::new(&counter);
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.snake().cells(), &[Cell::new(0, 0), Cell::new(0, 1)]);
        assert!(!game.snake().contains(game.apple()));
    }

    #[test]
    fn start_happens_once() {
        let counter = FreeRunningCounter::new();
        let mut game = GameState::new(&counter);
        assert!(game.start());
        assert!(!game.start());
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn step_is_ignored_before_start() {
        let counter = FreeRunningCounter::new();
        let mut game = GameState::new(&counter);
        let before = game.clone();
        game.step(Buttons::RELEASED, &counter);
        assert_eq!(game, before);
    }

    #[test]
    fn eating_appends_the_apple_coordinate_behind_the_head() {
        let counter = FreeRunningCounter::new();
        let mut game = running(&[(0, 0), (0, 1)], Cell::new(0, 2), Direction::Right);
        game.advance(Direction::Right);
        assert_eq!(game.snake().cells(), &[Cell::new(0, 1), Cell::new(0, 2)]);

        assert!(game.check_growth(&counter));
        assert_eq!(
            game.snake().cells(),
            &[Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 2)]
        );
        assert_ne!(game.apple(), Cell::new(0, 2));
        assert!(!game.snake().contains(game.apple()));
    }

    #[test]
    fn growth_without_apple_is_a_no_op() {
        let counter = FreeRunningCounter::new();
        let mut game = running(&[(0, 0), (0, 1)], Cell::new(5, 5), Direction::Right);
        assert!(!game.check_growth(&counter));
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.apple(), Cell::new(5, 5));
    }

    #[test]
    fn growth_at_capacity_is_skipped_and_apple_kept() {
        let counter = FreeRunningCounter::new();
        let all: Vec<Cell, SNAKE_CAPACITY> = Cell::all().collect();
        let head = *all.last().unwrap();
        let mut game = GameState::from_parts(
            Snake::from_cells(&all).unwrap(),
            head,
            Direction::Right,
            GameStatus::Running,
        );
        assert!(!game.check_growth(&counter));
        assert_eq!(game.snake().len(), SNAKE_CAPACITY);
        assert_eq!(game.apple(), head);
    }

    #[test]
    fn growth_to_capacity_moves_the_apple_to_the_last_free_cell() {
        let counter = FreeRunningCounter::new();
        let body: Vec<Cell, SNAKE_CAPACITY> = Cell::all().take(63).collect();
        let head = *body.last().unwrap();
        let mut game =
            GameState::from_parts(Snake::from_cells(&body).unwrap(), head, Direction::Right, GameStatus::Running);
        assert!(game.check_growth(&counter));
        assert_eq!(game.snake().len(), SNAKE_CAPACITY);
        assert_eq!(game.apple(), Cell::all().nth(63).unwrap());
        assert!(!game.snake().contains(game.apple()));
    }

    #[test]
    fn chasing_the_tail_is_not_a_collision() {
        // The tail moves out of the way in the same step the head arrives.
        let counter = FreeRunningCounter::new();
        let mut game = running(
            &[(1, 0), (1, 1), (1, 2), (2, 2), (2, 1), (2, 0)],
            Cell::new(6, 6),
            Direction::Left,
        );
        game.step(Buttons { up: true, ..Buttons::RELEASED }, &counter);
        assert_eq!(game.snake().head(), Cell::new(1, 0));
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn self_collision_ends_the_game() {
        let counter = FreeRunningCounter::new();
        let mut game = running(
            &[(2, 0), (1, 0), (1, 1), (1, 2), (2, 2), (2, 1)],
            Cell::new(6, 6),
            Direction::Left,
        );
        game.step(Buttons { up: true, ..Buttons::RELEASED }, &counter);
        assert_eq!(game.snake().head(), Cell::new(1, 1));
        assert_eq!(game.status(), GameStatus::Over);

        let frozen = game.clone();
        game.step(Buttons { down: true, ..Buttons::RELEASED }, &counter);
        assert_eq!(game, frozen);
    }

    #[test]
    fn short_snakes_never_collide() {
        let counter = FreeRunningCounter::new();
        let mut game = running(&[(3, 3), (3, 4), (4, 4), (4, 3)], Cell::new(7, 7), Direction::Left);
        let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
        for round in 0..32 {
            for &direction in &turns {
                let pressed = Buttons {
                    up: direction == Direction::Up,
                    right: direction == Direction::Right,
                    left: direction == Direction::Left,
                    down: direction == Direction::Down,
                };
                game.step(pressed, &counter);
                assert_eq!(game.status(), GameStatus::Running, "round {round}");
            }
        }
    }

    #[test]
    fn no_collision_below_length_five_for_any_five_presses() {
        let counter = FreeRunningCounter::new();
        let bodies: [&[(u8, u8)]; 3] = [
            &[(3, 3), (3, 4)],
            &[(3, 2), (3, 3), (3, 4)],
            &[(3, 1), (3, 2), (3, 3), (3, 4)],
        ];
        // (7,7) is seven moves from (3,4), so nothing grows within five steps.
        for body in bodies {
            for script in 0..4_u32.pow(5) {
                let mut game = running(body, Cell::new(7, 7), Direction::Right);
                for step in 0..5 {
                    let pick = (script >> (2 * step)) & 0b11;
                    let pressed = Buttons {
                        up: pick == 0,
                        right: pick == 1,
                        left: pick == 2,
                        down: pick == 3,
                    };
                    game.step(pressed, &counter);
                    assert_eq!(
                        game.status(),
                        GameStatus::Running,
                        "len {} script {script:010b}",
                        body.len()
                    );
                }
                assert_eq!(game.snake().len(), body.len());
            }
        }
    }

    #[test]
    fn step_rejects_reversal_and_keeps_heading() {
        let counter = FreeRunningCounter::new();
        let mut game = running(&[(4, 4), (4, 5)], Cell::new(0, 0), Direction::Right);
        game.step(Buttons { left: true, ..Buttons::RELEASED }, &counter);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.snake().head(), Cell::new(4, 6));
    }
}
