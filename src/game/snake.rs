use super::direction::Direction;
use super::Point;
use std::collections::{vec_deque, VecDeque};
use std::iter::Rev;

/// Snake state.  Snate.
///
/// Only the head and tail are stored as positions; the cells in between are
/// recovered by walking backwards from the head through `moves`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SnakeState {
    /// The position of the snake's head
    pub(super) head: Point,

    /// The position of the last cell of the snake's body
    pub(super) tail: Point,

    /// Number of cells occupied by the snake; always `moves.len() + 1`
    pub(super) length: usize,

    /// The direction of the most recent move, or `None` before the first one
    pub(super) direction: Option<Direction>,

    /// The directions of the moves that produced the current body, oldest
    /// first
    pub(super) moves: VecDeque<Direction>,
}

impl SnakeState {
    /// Create a snake of length 1 at `start` that is not facing anywhere yet
    pub(crate) fn new(start: Point) -> SnakeState {
        SnakeState {
            head: start,
            tail: start,
            length: 1,
            direction: None,
            moves: VecDeque::new(),
        }
    }

    pub(crate) fn head(&self) -> Point {
        self.head
    }

    pub(crate) fn tail(&self) -> Point {
        self.tail
    }

    pub(crate) fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn moves(&self) -> &VecDeque<Direction> {
        &self.moves
    }

    /// Return the cell the head would occupy after moving in `direction`
    pub(crate) fn next_head(&self, direction: Direction) -> Point {
        direction.advance(self.head)
    }

    /// Move the head one cell in `direction`.
    ///
    /// If `grow` is true, the tail stays put and the snake becomes one cell
    /// longer.  Otherwise the tail follows the oldest recorded move and the
    /// cell it vacated is returned.
    pub(crate) fn advance(&mut self, direction: Direction, grow: bool) -> Option<Point> {
        self.direction = Some(direction);
        self.moves.push_back(direction);
        self.head = direction.advance(self.head);
        if grow {
            self.length += 1;
            None
        } else {
            let vacated = self.tail;
            if let Some(oldest) = self.moves.pop_front() {
                self.tail = oldest.advance(self.tail);
            }
            Some(vacated)
        }
    }

    /// Iterate over the cells occupied by the snake, from head to tail
    pub(crate) fn segments(&self) -> Segments<'_> {
        Segments {
            next: Some(self.head),
            moves: self.moves.iter().rev(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Segments<'a> {
    next: Option<Point>,
    moves: Rev<vec_deque::Iter<'a, Direction>>,
}

impl Iterator for Segments<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let current = self.next?;
        self.next = self.moves.next().map(|d| d.retreat(current));
        Some(current)
    }
}
