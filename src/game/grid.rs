//! Cell matrix derived from the snake and the food.
//!
//! A [`Grid`] is never edited in place by the engine. Every tick it is
//! projected again from the authoritative state, so it can always be handed
//! to a view layer as a consistent picture.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::Position;

/// What occupies a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Body,
    Head,
    Food,
}

impl Cell {
    fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Body => 'o',
            Cell::Head => '@',
            Cell::Food => '*',
        }
    }
}

/// Row-major `width` x `height` matrix of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty grid
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Project a snake body (head first) and optional food onto a fresh grid
    pub fn project(width: usize, height: usize, body: &[Position], food: Option<Position>) -> Self {
        let mut grid = Self::empty(width, height);

        if let Some(food) = food {
            grid.set(food, Cell::Food);
        }

        if let Some((head, rest)) = body.split_first() {
            for &segment in rest {
                grid.set(segment, Cell::Body);
            }
            // Head wins when a terminal frame overlaps it with another segment
            grid.set(*head, Cell::Head);
        }

        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let in_bounds = pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height;
        in_bounds.then(|| pos.y as usize * self.width + pos.x as usize)
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
        }
    }

    /// Cell at `pos`, or `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Positions of all empty cells, row by row
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(idx, _)| Position::new((idx % self.width) as i32, (idx / self.width) as i32))
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_counts() {
        let body = [Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)];
        let grid = Grid::project(5, 5, &body, Some(Position::new(0, 0)));

        assert_eq!(grid.count(Cell::Head), 1);
        assert_eq!(grid.count(Cell::Body), 2);
        assert_eq!(grid.count(Cell::Food), 1);
        assert_eq!(grid.count(Cell::Empty), 25 - 4);
        assert_eq!(grid.get(Position::new(2, 2)), Some(Cell::Head));
        assert_eq!(grid.get(Position::new(2, 4)), Some(Cell::Body));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::empty(3, 3);
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert_eq!(grid.get(Position::new(3, 0)), None);
        assert_eq!(grid.get(Position::new(0, 3)), None);
        assert_eq!(grid.get(Position::new(2, 2)), Some(Cell::Empty));
    }

    #[test]
    fn test_empty_cells_row_major() {
        let body = [Position::new(0, 0), Position::new(1, 0)];
        let grid = Grid::project(2, 2, &body, None);

        let empties: Vec<_> = grid.empty_cells().collect();
        assert_eq!(empties, vec![Position::new(0, 1), Position::new(1, 1)]);
    }

    #[test]
    fn test_display() {
        let body = [Position::new(1, 0), Position::new(0, 0)];
        let grid = Grid::project(3, 2, &body, Some(Position::new(2, 1)));
        assert_eq!(grid.to_string(), "o@.\n..*\n");
    }
}
