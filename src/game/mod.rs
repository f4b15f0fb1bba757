mod board;
mod direction;
mod random;
mod snake;
pub(crate) use self::board::{Board, Cell};
pub(crate) use self::direction::Direction;
pub(crate) use self::random::RandomSource;
pub(crate) use self::snake::SnakeState;
use crate::consts;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt;
use std::io::{self, Write};

/// Number of cells inside the border ring
const INTERIOR_CELLS: usize = consts::WIDTH as usize * consts::HEIGHT as usize;

/// A cell position in interior coordinates
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Point {
    pub(crate) const fn new(x: i16, y: i16) -> Point {
        Point { x, y }
    }
}

/// Result of a single [`GameLoop::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The snake moved and is now `length` cells long
    Moved { length: usize },

    /// The snake ran into the border or into itself.  Nothing was changed.
    Died { score: usize },

    /// The snake covers every cell, so there is nowhere left to put a fruit
    BoardFull { score: usize },
}

/// The simulation: snake, board, and fruit, plus the sink that each frame is
/// written to
#[derive(Clone, Debug)]
pub(crate) struct GameLoop<W, R = StdRng> {
    rng: R,
    snake: SnakeState,
    board: Board,
    fruit: Option<Point>,
    display: W,
    debug: bool,
}

impl<W: Write> GameLoop<W, StdRng> {
    /// Create a game whose generator is seeded from the operating system
    pub(crate) fn new(display: W) -> Self {
        GameLoop::new_with_rng(display, StdRng::from_os_rng())
    }
}

impl<W: Write, R: RandomSource> GameLoop<W, R> {
    pub(crate) fn new_with_rng(display: W, rng: R) -> GameLoop<W, R> {
        let mut game = GameLoop {
            rng,
            snake: SnakeState::new(Board::center()),
            board: Board::new(),
            fruit: None,
            display,
            debug: false,
        };
        game.place_fruit();
        game
    }

    /// Also report the head & tail coordinates below each frame
    pub(crate) fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Advance the simulation by one step with the snake heading in
    /// `direction`, then draw the new frame.
    ///
    /// A collision is reported before anything is modified or drawn.
    pub(crate) fn tick(&mut self, direction: Direction) -> io::Result<TickOutcome> {
        let head = self.snake.next_head(direction);
        if matches!(self.board.get(head), Cell::Border | Cell::Snake(_)) {
            return Ok(TickOutcome::Died {
                score: self.snake.length(),
            });
        }
        let ate = self.fruit == Some(head);
        if let Some(vacated) = self.snake.advance(direction, ate) {
            self.board.set(vacated, Cell::Empty);
        }
        self.board.paint_snake(&self.snake);
        if ate {
            self.fruit = None;
            self.place_fruit();
        }
        self.draw()?;
        let length = self.snake.length();
        Ok(if self.fruit.is_some() {
            TickOutcome::Moved { length }
        } else {
            TickOutcome::BoardFull { score: length }
        })
    }

    /// Place a fruit on a random cell not occupied by the snake, re-rolling
    /// until one is found.  If the snake fills the board, no fruit is placed.
    fn place_fruit(&mut self) {
        if self.snake.length() >= INTERIOR_CELLS {
            return;
        }
        let pos = loop {
            let pos = Point::new(
                self.rng.between(0, consts::WIDTH - 1),
                self.rng.between(0, consts::HEIGHT - 1),
            );
            if !matches!(self.board.get(pos), Cell::Snake(_)) {
                break pos;
            }
        };
        self.board.set(pos, Cell::Fruit);
        self.fruit = Some(pos);
    }
}

impl<W: Write, R> GameLoop<W, R> {
    /// Write the current frame to the display in a single write
    pub(crate) fn draw(&mut self) -> io::Result<()> {
        let frame = Frame {
            board: &self.board,
            snake: &self.snake,
            debug: self.debug,
        }
        .to_string();
        self.display.write_all(frame.as_bytes())?;
        self.display.flush()
    }
}

#[cfg(test)]
impl<W, R> GameLoop<W, R> {
    pub(crate) fn snake(&self) -> &SnakeState {
        &self.snake
    }

    pub(crate) fn fruit(&self) -> Option<Point> {
        self.fruit
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    /// Move the fruit to `pos`
    pub(crate) fn set_fruit(&mut self, pos: Point) {
        if let Some(old) = self.fruit.replace(pos) {
            self.board.set(old, Cell::Empty);
        }
        self.board.set(pos, Cell::Fruit);
    }
}

/// Everything shown on screen for one tick: clear, board, status lines
#[derive(Clone, Copy, Debug)]
struct Frame<'a> {
    board: &'a Board,
    snake: &'a SnakeState,
    debug: bool,
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Clear(ClearType::All).write_ansi(f)?;
        MoveTo(0, 0).write_ansi(f)?;
        f.write_str(&self.board.render())?;
        if self.debug {
            let Point { x: hx, y: hy } = self.snake.head();
            let Point { x: tx, y: ty } = self.snake.tail();
            let heading = self.snake.direction().map_or("none", Direction::as_str);
            write!(
                f,
                "[DEBUG] HEAD: {hx}, {hy}; TAIL: {tx}, {ty}; HEADING: {heading}\r\n"
            )?;
        }
        write!(f, "[SCORE]: {}\r\n", self.snake.length())
    }
}
