use std::collections::{HashSet, VecDeque};

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies on a `grid_size`×`grid_size` board.
    #[must_use]
    pub fn is_within_bounds(self, grid_size: u16) -> bool {
        let size = i32::from(grid_size);
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// Returns the neighbouring cell in `direction`, wrapped onto the torus.
    #[must_use]
    pub fn stepped(self, direction: Direction, grid_size: u16) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(grid_size)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, grid_size: u16) -> Self {
        let size = i32::from(grid_size);
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// Snake body plus its direction buffer.
///
/// The body is kept twice: as an ordered deque (front is the head) and as an
/// occupancy set for constant-time membership checks. Both are updated
/// together on every move so they never disagree.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    occupied: HashSet<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty or contains a repeated cell.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        let occupied: HashSet<Position> = segments.iter().copied().collect();
        assert_eq!(
            occupied.len(),
            segments.len(),
            "snake segments must not overlap"
        );

        Self {
            body: VecDeque::from(segments),
            occupied,
            direction,
            pending_direction: direction,
        }
    }

    /// Buffers a requested direction for the next tick.
    ///
    /// A request opposite to the committed direction is dropped while the
    /// snake is longer than one cell. Accepted requests overwrite any earlier
    /// pending one. Returns whether the request was accepted.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        if self.body.len() > 1 && requested.is_opposite(self.direction) {
            return false;
        }

        self.pending_direction = requested;
        true
    }

    /// Applies the pending direction; called once at the start of a tick.
    pub fn commit_direction(&mut self) {
        self.direction = self.pending_direction;
    }

    /// Returns the cell the head would enter moving in the committed direction.
    #[must_use]
    pub fn next_head_position(&self, grid_size: u16) -> Position {
        self.head().stepped(self.direction, grid_size)
    }

    /// Pushes `new_head` and drops the tail unless `grow` is set.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        if !grow {
            if let Some(tail) = self.body.pop_back() {
                self.occupied.remove(&tail);
            }
        }

        self.body.push_front(new_head);
        self.occupied.insert(new_head);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.occupied.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction that the next tick will commit.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
