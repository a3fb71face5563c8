use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::grid::Grid;
use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no empty cell left for food")]
    BoardFull,
}

/// Picks a uniformly random empty cell for the next food item
#[derive(Debug, Clone)]
pub struct FoodPlacer<R: Rng = StdRng> {
    rng: R,
}

impl FoodPlacer<StdRng> {
    /// Reproducible placement from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose one of the grid's empty cells
    pub fn place(&mut self, grid: &Grid) -> Result<Position, PlacementError> {
        let empties: Vec<Position> = grid.empty_cells().collect();
        if empties.is_empty() {
            return Err(PlacementError::BoardFull);
        }
        let idx = self.rng.gen_range(0..empties.len());
        Ok(empties[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Cell;
    use std::collections::HashMap;

    #[test]
    fn test_never_places_on_occupied_cell() {
        let body = [
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(2, 2),
            Position::new(3, 2),
        ];
        let grid = Grid::project(4, 4, &body, None);
        let mut placer = FoodPlacer::seeded(7);

        for _ in 0..500 {
            let pos = placer.place(&grid).unwrap();
            assert_eq!(grid.get(pos), Some(Cell::Empty));
        }
    }

    #[test]
    fn test_board_full() {
        let body = [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ];
        let grid = Grid::project(2, 2, &body, None);
        let mut placer = FoodPlacer::seeded(1);

        assert_eq!(placer.place(&grid), Err(PlacementError::BoardFull));
    }

    #[test]
    fn test_single_empty_cell_is_always_chosen() {
        let body = [Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];
        let grid = Grid::project(2, 2, &body, None);
        let mut placer = FoodPlacer::seeded(99);

        for _ in 0..20 {
            assert_eq!(placer.place(&grid), Ok(Position::new(0, 1)));
        }
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        // 3x3 board with the snake on the middle row: 6 empty cells
        let body = [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)];
        let grid = Grid::project(3, 3, &body, None);
        let mut placer = FoodPlacer::seeded(42);

        let trials = 12_000;
        let mut hits: HashMap<Position, usize> = HashMap::new();
        for _ in 0..trials {
            *hits.entry(placer.place(&grid).unwrap()).or_default() += 1;
        }

        assert_eq!(hits.len(), 6);
        let expected = trials / 6;
        for (pos, count) in hits {
            assert_ne!(pos.y, 1);
            let deviation = (count as i64 - expected as i64).abs();
            assert!(
                deviation < (expected as i64) / 10,
                "cell {pos:?} hit {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let grid = Grid::empty(10, 10);
        let mut a = FoodPlacer::seeded(5);
        let mut b = FoodPlacer::seeded(5);

        for _ in 0..10 {
            assert_eq!(a.place(&grid), b.place(&grid));
        }
    }
}
