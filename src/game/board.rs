use super::snake::SnakeState;
use super::Point;
use crate::consts;
use crossterm::style::{Color, ResetColor, SetBackgroundColor};
use crossterm::Command;
use std::fmt;

/// Number of columns in the grid, border ring included
const COLS: usize = consts::WIDTH as usize + 2;

/// Number of rows in the grid, border ring included
const ROWS: usize = consts::HEIGHT as usize + 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Cell {
    #[default]
    Empty,
    Border,
    Snake(Shade),
    Fruit,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => ResetColor.write_ansi(f)?,
            Cell::Border => SetBackgroundColor(consts::BORDER_COLOR).write_ansi(f)?,
            Cell::Snake(shade) => SetBackgroundColor(shade.color()).write_ansi(f)?,
            Cell::Fruit => SetBackgroundColor(consts::FRUIT_COLOR).write_ansi(f)?,
        }
        f.write_str(consts::CELL_GLYPH)
    }
}

/// Color token for one snake segment: the head's baseline color darkened by
/// `offset` in the green & blue channels
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Shade {
    offset: u8,
}

impl Shade {
    /// The undarkened baseline shade used for the head
    pub(crate) const HEAD: Shade = Shade { offset: 0 };

    /// Return the shade of the `index`-th segment (counting from 0 at the
    /// head) of a snake that is `length` cells long.
    ///
    /// Each step toward the tail darkens by `GRADIENT_RANGE / length`,
    /// accumulated and rounded to the nearest integer.  Since `index <
    /// length`, the offset never exceeds `GRADIENT_RANGE`.
    pub(crate) fn for_segment(index: usize, length: usize) -> Shade {
        let length = length.max(1);
        let offset = (2 * index * consts::GRADIENT_RANGE + length) / (2 * length);
        Shade {
            offset: u8::try_from(offset).unwrap_or(u8::MAX),
        }
    }

    #[cfg(test)]
    pub(crate) fn offset(self) -> u8 {
        self.offset
    }

    pub(crate) fn color(self) -> Color {
        // Saturate rather than wrap in case the baselines are ever lowered
        // below GRADIENT_RANGE.
        Color::Rgb {
            r: consts::SNAKE_RED,
            g: consts::GREEN_BASELINE.saturating_sub(self.offset),
            b: consts::BLUE_BASELINE.saturating_sub(self.offset),
        }
    }
}

/// The playing field plus its border ring.
///
/// Points are in interior coordinates, so the ring sits at `x == -1`,
/// `x == WIDTH`, `y == -1` and `y == HEIGHT`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board surrounded by border cells, with a single snake
    /// cell in the center
    pub(crate) fn new() -> Board {
        let mut cells = vec![Cell::Empty; COLS * ROWS];
        for (i, cell) in cells.iter_mut().enumerate() {
            let (row, col) = (i / COLS, i % COLS);
            if row == 0 || row == ROWS - 1 || col == 0 || col == COLS - 1 {
                *cell = Cell::Border;
            }
        }
        let mut board = Board { cells };
        board.set(Board::center(), Cell::Snake(Shade::HEAD));
        board
    }

    /// The cell where a new snake starts
    pub(crate) fn center() -> Point {
        Point::new(consts::WIDTH / 2, consts::HEIGHT / 2)
    }

    /// # Panics
    ///
    /// Panics if `pos` lies outside the border ring.
    pub(crate) fn get(&self, pos: Point) -> Cell {
        self.cells[Board::index(pos)]
    }

    /// # Panics
    ///
    /// Panics if `pos` lies outside the border ring.
    pub(crate) fn set(&mut self, pos: Point, cell: Cell) {
        self.cells[Board::index(pos)] = cell;
    }

    /// Recolor every cell occupied by `snake` according to its position along
    /// the body
    pub(crate) fn paint_snake(&mut self, snake: &SnakeState) {
        let length = snake.length();
        for (i, pos) in snake.segments().enumerate() {
            self.set(pos, Cell::Snake(Shade::for_segment(i, length)));
        }
    }

    /// Produce the full-frame text for the board
    pub(crate) fn render(&self) -> String {
        self.to_string()
    }

    #[cfg(test)]
    pub(crate) fn count<F: Fn(Cell) -> bool>(&self, pred: F) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    fn index(pos: Point) -> usize {
        let col = usize::try_from(pos.x + 1).ok().filter(|&c| c < COLS);
        let row = usize::try_from(pos.y + 1).ok().filter(|&r| r < ROWS);
        let (Some(col), Some(row)) = (col, row) else {
            panic!("{pos:?} lies outside the board");
        };
        row * COLS + col
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(COLS) {
            for cell in row {
                write!(f, "{cell}")?;
            }
            // Raw mode turns off output post-processing, so a bare LF would
            // not return the cursor to the first column.
            ResetColor.write_ansi(f)?;
            f.write_str("\r\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use rstest::rstest;

    fn ansi(cmd: impl Command) -> String {
        let mut s = String::new();
        cmd.write_ansi(&mut s).unwrap();
        s
    }

    #[test]
    fn new_board() {
        let board = Board::new();
        assert_eq!(board.count(|c| c == Cell::Border), 2 * COLS + 2 * (ROWS - 2));
        assert_eq!(board.count(|c| matches!(c, Cell::Snake(_))), 1);
        assert_eq!(board.count(|c| c == Cell::Fruit), 0);
        assert_eq!(board.get(Point::new(7, 7)), Cell::Snake(Shade::HEAD));
        assert_eq!(board.get(Point::new(-1, -1)), Cell::Border);
        assert_eq!(board.get(Point::new(15, 15)), Cell::Border);
        assert_eq!(board.get(Point::new(-1, 4)), Cell::Border);
        assert_eq!(board.get(Point::new(4, 15)), Cell::Border);
        assert_eq!(board.get(Point::new(0, 0)), Cell::Empty);
        assert_eq!(board.get(Point::new(14, 14)), Cell::Empty);
    }

    #[test]
    fn set_then_get() {
        let mut board = Board::new();
        board.set(Point::new(3, 12), Cell::Fruit);
        assert_eq!(board.get(Point::new(3, 12)), Cell::Fruit);
        assert_eq!(board.get(Point::new(12, 3)), Cell::Empty);
    }

    #[rstest]
    #[case(Point::new(-2, 0))]
    #[case(Point::new(0, -2))]
    #[case(Point::new(16, 0))]
    #[case(Point::new(0, 16))]
    #[should_panic(expected = "lies outside the board")]
    fn out_of_range(#[case] pos: Point) {
        let _ = Board::new().get(pos);
    }

    #[rstest]
    #[case(1, &[0])]
    #[case(2, &[0, 44])]
    #[case(3, &[0, 29, 59])]
    #[case(4, &[0, 22, 44, 66])]
    #[case(16, &[0, 6, 11, 17, 22, 28, 33, 39, 44, 50, 55, 61, 66, 72, 77, 83])]
    fn gradient(#[case] length: usize, #[case] offsets: &[u8]) {
        let got = (0..length)
            .map(|i| Shade::for_segment(i, length).offset())
            .collect::<Vec<_>>();
        assert_eq!(got, offsets);
    }

    #[test]
    fn gradient_stays_in_range_for_full_board() {
        let length = 225;
        let tail = Shade::for_segment(length - 1, length);
        assert_eq!(tail.offset(), 88);
        assert_eq!(
            tail.color(),
            Color::Rgb {
                r: 13,
                g: 188 - tail.offset(),
                b: 121 - tail.offset(),
            }
        );
    }

    #[test]
    fn paint_snake_shades_head_to_tail() {
        let mut board = Board::new();
        let mut snake = SnakeState::new(Board::center());
        let _ = snake.advance(Direction::Right, true);
        let _ = snake.advance(Direction::Right, true);
        board.paint_snake(&snake);
        assert_eq!(board.get(Point::new(9, 7)), Cell::Snake(Shade::for_segment(0, 3)));
        assert_eq!(board.get(Point::new(8, 7)), Cell::Snake(Shade::for_segment(1, 3)));
        assert_eq!(board.get(Point::new(7, 7)), Cell::Snake(Shade::for_segment(2, 3)));
    }

    #[test]
    fn render_new_board() {
        let mut board = Board::new();
        board.set(Point::new(0, 0), Cell::Fruit);
        let text = board.render();
        let rows = text.split_terminator("\r\n").collect::<Vec<_>>();
        assert_eq!(rows.len(), ROWS);
        let reset = ansi(ResetColor);
        let border = Cell::Border.to_string();
        let empty = Cell::Empty.to_string();
        pretty_assertions::assert_eq!(rows[0], format!("{}{reset}", border.repeat(COLS)));
        pretty_assertions::assert_eq!(
            rows[1],
            format!(
                "{border}{}{}{border}{reset}",
                Cell::Fruit,
                empty.repeat(COLS - 3)
            )
        );
        pretty_assertions::assert_eq!(
            rows[8],
            format!(
                "{border}{}{}{}{border}{reset}",
                empty.repeat(7),
                Cell::Snake(Shade::HEAD),
                empty.repeat(7)
            )
        );
        assert_eq!(
            Cell::Snake(Shade::HEAD).to_string(),
            format!(
                "{}  ",
                ansi(SetBackgroundColor(Color::Rgb {
                    r: 13,
                    g: 188,
                    b: 121
                }))
            )
        );
    }
}
