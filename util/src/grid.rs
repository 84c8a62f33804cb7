use bitflags::bitflags;
use glam::{ivec2, IVec2};

bitflags! {
    /// State of a single map cell.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Cell: u8 {
        /// Light can't pass through the cell.
        const BLOCKING = 1 << 0;
        /// Visible in the current query.
        const SEEN = 1 << 1;
        /// Has been visible at some point.
        const REMEMBERED = 1 << 2;
    }
}

/// Number of cells in a map of the given size.
pub fn area(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

/// Offset of in-bounds cell `(x, y)` in the row-major storage of a map
/// `width` cells wide.
pub fn row_major(width: i32, x: i32, y: i32) -> usize {
    x as usize + y as usize * width as usize
}

/// Fixed-size rectangular map of visibility cells.
///
/// Every accessor is safe to call with coordinates outside the map. Reads
/// return a default, blocking for [`is_blocking`](Grid::is_blocking) and
/// false otherwise, and writes do nothing.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major cell data.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an open map where nothing has been seen yet.
    ///
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "Grid: bad dimensions");
        Grid {
            width,
            height,
            cells: vec![Cell::empty(); area(width, height)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn dim(&self) -> IVec2 {
        ivec2(self.width, self.height)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| row_major(self.width, x, y))
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.idx(x, y).map(|i| &mut self.cells[i])
    }

    pub fn set_blocking(&mut self, x: i32, y: i32, is_blocking: bool) {
        if let Some(c) = self.cell_mut(x, y) {
            c.set(Cell::BLOCKING, is_blocking);
        }
    }

    /// Mark cell as seen this query, also makes it remembered.
    pub fn mark_seen(&mut self, x: i32, y: i32) {
        if let Some(c) = self.cell_mut(x, y) {
            c.insert(Cell::SEEN | Cell::REMEMBERED);
        }
    }

    /// Clear the seen flag, the cell stays remembered.
    pub fn clear_seen(&mut self, x: i32, y: i32) {
        if let Some(c) = self.cell_mut(x, y) {
            c.remove(Cell::SEEN);
        }
    }

    pub fn clear_all_seen(&mut self) {
        for c in self.cells.iter_mut() {
            c.remove(Cell::SEEN);
        }
    }

    /// Forget everything that has been seen. Blocking cells are kept.
    pub fn reset(&mut self) {
        for c in self.cells.iter_mut() {
            *c &= Cell::BLOCKING;
        }
    }

    pub fn is_seen(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| c.contains(Cell::SEEN))
    }

    pub fn is_remembered(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|c| c.contains(Cell::REMEMBERED))
    }

    /// Cells outside the map always block.
    pub fn is_blocking(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(true, |c| c.contains(Cell::BLOCKING))
    }

    /// Iterate all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Cell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (ivec2(i as i32 % w, i as i32 / w), c))
    }

    /// Positions of the cells seen in the current query.
    pub fn seen(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.iter()
            .filter_map(|(p, c)| c.contains(Cell::SEEN).then_some(p))
    }
}
