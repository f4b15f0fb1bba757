use super::Point;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction.  No bounds are
    /// enforced; stepping off the interior lands on the border ring.
    pub(crate) fn advance(self, pos: Point) -> Point {
        let Point { x, y } = pos;
        match self {
            Direction::Up => Point::new(x, y - 1),
            Direction::Down => Point::new(x, y + 1),
            Direction::Left => Point::new(x - 1, y),
            Direction::Right => Point::new(x + 1, y),
        }
    }

    /// Return the cell one step from `pos` against this direction
    pub(crate) fn retreat(self, pos: Point) -> Point {
        self.reverse().advance(pos)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
