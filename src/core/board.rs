//! Board module - manages the minefield grid
//!
//! The board is a width x height grid stored as a flat array for better cache
//! locality, with a parallel array of precomputed adjacent-bomb counts.
//! Coordinates: (x, y) where x ranges 0..width (left to right) and y ranges
//! 0..height (top to bottom), flat index = x + y * width (row-major).

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::Tile;

/// The minefield - tiles plus the parallel adjacency-count array
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of tiles, row-major order (y * width + x)
    tiles: Vec<Tile>,
    /// Adjacent-bomb count per cell (0-8), same indexing as `tiles`
    numbers: Vec<u8>,
}

impl Board {
    /// Create a new board with every tile covered, unflagged and bomb-free
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            tiles: vec![Tile::default(); len],
            numbers: vec![0; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Calculate flat index from (x, y) coordinates
    /// Returns None if out of bounds
    #[inline(always)]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Recover (x, y) coordinates from a flat index
    #[inline(always)]
    pub fn coord_of(&self, index: usize) -> (u16, u16) {
        let w = self.width as usize;
        ((index % w) as u16, (index / w) as u16)
    }

    /// Get the tile at a flat index
    pub fn tile(&self, index: usize) -> Tile {
        self.tiles[index]
    }

    /// Get the tile at (x, y), or None if out of bounds
    pub fn tile_at(&self, x: u16, y: u16) -> Option<Tile> {
        self.index_of(x, y).map(|i| self.tiles[i])
    }

    /// Get the adjacent-bomb count at a flat index
    pub fn number(&self, index: usize) -> u8 {
        self.numbers[index]
    }

    /// Get the adjacent-bomb count at (x, y), or None if out of bounds
    pub fn number_at(&self, x: u16, y: u16) -> Option<u8> {
        self.index_of(x, y).map(|i| self.numbers[i])
    }

    /// Enumerate the flat indices of the up-to-8 neighbors of a cell.
    ///
    /// Neighbors are computed in coordinate space and bounds-checked per axis,
    /// so the first and last columns never pick up cells from adjacent rows.
    pub fn neighbors(&self, index: usize) -> ArrayVec<usize, 8> {
        let (x, y) = self.coord_of(index);
        let mut out = ArrayVec::new();
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx >= 0 && nx < self.width as i32 && ny >= 0 && ny < self.height as i32 {
                    out.push((ny as usize) * (self.width as usize) + (nx as usize));
                }
            }
        }
        out
    }

    /// Place exactly `count` bombs in a single left-to-right pass.
    ///
    /// With `r` cells remaining (including the current one) and `b` bombs left
    /// to place, the current cell becomes a bomb with probability `b/r`. Every
    /// cell is equally likely to be chosen and the pass always places the exact
    /// count: once `b == r` the ratio reaches 1 and the remaining cells are
    /// forced. `count` must not exceed the cell count.
    pub fn scatter_bombs(&mut self, count: usize, rng: &mut impl Rng) {
        debug_assert!(count <= self.tiles.len());
        let len = self.tiles.len();
        let mut bombs_left = count as u32;
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            let cells_left = (len - i) as u32;
            if rng.random_ratio(bombs_left, cells_left) {
                tile.bomb = true;
                bombs_left -= 1;
            }
        }
    }

    /// 1 if the cell at (x, y) holds a bomb, 0 if it is clear or out of bounds
    #[inline(always)]
    fn bomb_weight(&self, x: i32, y: i32) -> u8 {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return 0;
        }
        self.tiles[(y as usize) * (self.width as usize) + (x as usize)].bomb as u8
    }

    /// Recompute the adjacent-bomb count for every cell.
    ///
    /// Walks each row once with running sums for the row above, the same row
    /// and the row below across a 3-wide column window: the entering column is
    /// added before a cell is emitted and the leaving column subtracted after,
    /// so the whole pass is O(width * height) rather than 9 probes per cell.
    /// The window spans the cell itself, whose own weight is subtracted from
    /// the stored count.
    pub fn compute_numbers(&mut self) {
        let w = self.width as i32;
        let h = self.height as i32;
        for y in 0..h {
            let mut above = self.bomb_weight(0, y - 1);
            let mut level = self.bomb_weight(0, y);
            let mut below = self.bomb_weight(0, y + 1);
            for x in 0..w {
                if x + 1 < w {
                    above += self.bomb_weight(x + 1, y - 1);
                    level += self.bomb_weight(x + 1, y);
                    below += self.bomb_weight(x + 1, y + 1);
                }
                let index = (y as usize) * (w as usize) + (x as usize);
                self.numbers[index] = above + level + below - self.bomb_weight(x, y);
                if x > 0 {
                    above -= self.bomb_weight(x - 1, y - 1);
                    level -= self.bomb_weight(x - 1, y);
                    below -= self.bomb_weight(x - 1, y + 1);
                }
            }
        }
    }

    /// Collect the indices a reveal starting at `start` should uncover.
    ///
    /// Depth-first search over the connected region of zero-count cells: every
    /// visited cell joins the result, but only zero cells are expanded, so the
    /// numbered ring bordering the region is included as terminal leaves. A
    /// cell with a non-zero count at `start` yields just that cell. The search
    /// is read-only; callers apply the uncovering.
    pub fn flood_reveal(&self, start: usize) -> Vec<usize> {
        debug_assert!(start < self.tiles.len());
        let mut revealed = Vec::new();
        let mut visited = vec![false; self.tiles.len()];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(index) = stack.pop() {
            revealed.push(index);
            if self.numbers[index] != 0 {
                continue;
            }
            for neighbor in self.neighbors(index) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }

        revealed
    }

    /// Clear the covered flag on a single cell
    pub fn uncover(&mut self, index: usize) {
        self.tiles[index].covered = false;
    }

    /// Clear the covered flag on every cell (end-of-game board reveal)
    pub fn uncover_all(&mut self) {
        for tile in &mut self.tiles {
            tile.covered = false;
        }
    }

    /// Flip the flag on a single cell
    pub fn toggle_flag(&mut self, index: usize) {
        self.tiles[index].flagged = !self.tiles[index].flagged;
    }

    /// Number of cells whose covered flag has been cleared
    pub fn uncovered_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.covered).count()
    }

    /// Number of flagged cells
    pub fn flag_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.flagged).count()
    }

    /// Number of bomb cells
    pub fn bomb_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.bomb).count()
    }

    /// Place a bomb at (x, y) directly, bypassing the sampler.
    /// Returns false if out of bounds. Callers must recompute numbers.
    pub fn set_bomb(&mut self, x: u16, y: u16) -> bool {
        match self.index_of(x, y) {
            Some(index) => {
                self.tiles[index].bomb = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_index_calculation() {
        let board = Board::new(4, 3);
        assert_eq!(board.index_of(0, 0), Some(0));
        assert_eq!(board.index_of(3, 0), Some(3));
        assert_eq!(board.index_of(0, 1), Some(4));
        assert_eq!(board.index_of(3, 2), Some(11));
        assert_eq!(board.index_of(4, 0), None);
        assert_eq!(board.index_of(0, 3), None);
    }

    #[test]
    fn test_coord_roundtrip() {
        let board = Board::new(7, 5);
        for index in 0..board.len() {
            let (x, y) = board.coord_of(index);
            assert_eq!(board.index_of(x, y), Some(index));
        }
    }

    #[test]
    fn test_neighbors_do_not_wrap_rows() {
        let board = Board::new(4, 2);
        // Last column of row 0: flat index 3 is adjacent to 4 = (0, 1) in
        // index arithmetic, but not on the board.
        let last = board.index_of(3, 0).unwrap();
        let wrap = board.index_of(0, 1).unwrap();
        let neighbors = board.neighbors(last);
        assert!(!neighbors.contains(&wrap));
        assert_eq!(neighbors.len(), 3);
    }

    #[test]
    fn test_neighbor_counts_by_position() {
        let board = Board::new(3, 3);
        assert_eq!(board.neighbors(board.index_of(0, 0).unwrap()).len(), 3);
        assert_eq!(board.neighbors(board.index_of(1, 0).unwrap()).len(), 5);
        assert_eq!(board.neighbors(board.index_of(1, 1).unwrap()).len(), 8);
    }

    #[test]
    fn test_scatter_places_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [0, 1, 12, 35] {
            let mut board = Board::new(7, 5);
            board.scatter_bombs(count, &mut rng);
            assert_eq!(board.bomb_count(), count);
        }
    }

    #[test]
    fn test_compute_numbers_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut board = Board::new(13, 9);
        board.scatter_bombs(30, &mut rng);
        board.compute_numbers();

        for index in 0..board.len() {
            let expected = board
                .neighbors(index)
                .iter()
                .filter(|&&n| board.tile(n).bomb)
                .count() as u8;
            assert_eq!(board.number(index), expected, "cell {}", index);
        }
    }
}
