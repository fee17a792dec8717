use rand::Rng;

use crate::snake::{Position, Snake};

/// The single food cell currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a cell the snake does not occupy.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid_size: u16, snake: &Snake) -> Self {
        Self::new(place_food(rng, grid_size, snake))
    }
}

/// Draws cells uniformly until one is free of the snake.
///
/// This is rejection sampling: the expected number of draws is
/// `cells / free_cells`, so it slows down as the board fills and never
/// returns once the snake covers every cell. A full board has no win state;
/// debug builds assert on it instead of spinning.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid_size: u16, snake: &Snake) -> Position {
    debug_assert!(grid_size > 0);
    debug_assert!(
        snake.len() < usize::from(grid_size) * usize::from(grid_size),
        "place_food: no free cells on the board ({grid_size}×{grid_size})",
    );

    let size = i32::from(grid_size);
    loop {
        let candidate = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::input::Direction;

    use super::place_food;
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
            ],
            Direction::Right,
        );

        for _ in 0..100 {
            let food_position = place_food(&mut rng, 6, &snake);
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(6));
        }
    }

    #[test]
    fn single_free_cell_is_always_found() {
        let mut rng = StdRng::seed_from_u64(11);
        // 2x2 board with three cells taken leaves only (0, 1).
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
            ],
            Direction::Down,
        );

        for _ in 0..20 {
            assert_eq!(place_food(&mut rng, 2, &snake), Position::new(0, 1));
        }
    }

    #[test]
    fn placement_reaches_every_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            seen.insert(place_food(&mut rng, 3, &snake));
        }

        assert_eq!(seen.len(), 8);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no free cells")]
    fn full_board_is_flagged_in_debug_builds() {
        let mut rng = StdRng::seed_from_u64(5);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
            ],
            Direction::Up,
        );

        let _ = place_food(&mut rng, 2, &snake);
    }
}
