// Occupancy grid rebuilt from the board snapshot on every turn
//
// Cells are stored row-major in a flat Vec. Lookups outside the board never
// index the Vec; they resolve to `Cell::OutOfBounds` instead.

use log::warn;

use crate::types::{Battlesnake, Board, Coord, Direction};

/// State of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
    /// Returned for lookups that fall off the board
    OutOfBounds,
}

/// Transient width x height occupancy array for a single decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    /// Creates an empty grid with the given dimensions
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        OccupancyGrid {
            width,
            height,
            cells: vec![Cell::Empty; (width as usize) * (height as usize)],
        }
    }

    /// Rasterizes every snake and food item on the board
    ///
    /// Snakes are written in board order, so a later snake overwrites an
    /// earlier one on a shared cell. Food is written last.
    pub fn from_board(board: &Board) -> Self {
        let mut grid = OccupancyGrid::new(board.width, board.height);

        for snake in &board.snakes {
            grid.mark_snake(snake);
        }

        for food in &board.food {
            grid.mark(food, Cell::Food);
        }

        grid
    }

    /// Like `from_board`, but also rasterizes `you` when the board's snake
    /// list does not already contain it
    pub fn for_snake(board: &Board, you: &Battlesnake) -> Self {
        let mut grid = OccupancyGrid::from_board(board);
        if !board.snakes.iter().any(|s| s.id == you.id) {
            grid.mark_snake(you);
        }
        grid
    }

    fn mark_snake(&mut self, snake: &Battlesnake) {
        let mut segments = snake.body.iter();
        if let Some(head) = segments.next() {
            self.mark(head, Cell::Head);
        }
        for segment in segments {
            self.mark(segment, Cell::Body);
        }
    }

    fn mark(&mut self, coord: &Coord, cell: Cell) {
        match self.index_of(coord) {
            Some(idx) => self.cells[idx] = cell,
            None => warn!(
                "Skipping {:?} at ({}, {}): outside {}x{} board",
                cell, coord.x, coord.y, self.width, self.height
            ),
        }
    }

    fn index_of(&self, coord: &Coord) -> Option<usize> {
        if coord.x < 0 || coord.x >= self.width || coord.y < 0 || coord.y >= self.height {
            return None;
        }
        Some((coord.y as usize) * (self.width as usize) + coord.x as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        self.index_of(coord).is_some()
    }

    /// Cell at `coord`, or `Cell::OutOfBounds` when it is off the board
    pub fn cell(&self, coord: &Coord) -> Cell {
        self.index_of(coord)
            .map_or(Cell::OutOfBounds, |idx| self.cells[idx])
    }

    /// Cell one step from `coord` in `direction`
    pub fn neighbor(&self, coord: &Coord, direction: Direction) -> Cell {
        self.cell(&direction.apply(coord))
    }

    pub fn left_of(&self, coord: &Coord) -> Cell {
        self.neighbor(coord, Direction::Left)
    }

    pub fn right_of(&self, coord: &Coord) -> Cell {
        self.neighbor(coord, Direction::Right)
    }

    pub fn above(&self, coord: &Coord) -> Cell {
        self.neighbor(coord, Direction::Up)
    }

    pub fn below(&self, coord: &Coord) -> Cell {
        self.neighbor(coord, Direction::Down)
    }
}
