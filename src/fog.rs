use glam::IVec2;
use util::{area, row_major, Grid};

/// Brightness of cells in view.
pub const LIT: u8 = 255;

/// Default brightness of cells that have been seen before but aren't in
/// view.
pub const DARK_FOG_GRAY: u8 = 32;

/// Per-cell fog of war brightness.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FogMask {
    width: i32,
    height: i32,
    dark_fog_gray: u8,
    values: Vec<u8>,
}

impl FogMask {
    /// Create a mask that is completely dark.
    pub fn new(width: i32, height: i32) -> Self {
        FogMask {
            width,
            height,
            dark_fog_gray: DARK_FOG_GRAY,
            values: vec![0; area(width, height)],
        }
    }

    pub fn with_dark_fog_gray(self, dark_fog_gray: u8) -> Self {
        FogMask {
            dark_fog_gray,
            ..self
        }
    }

    pub fn get(&self, x: i32, y: i32) -> u8 {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            self.values[row_major(self.width, x, y)]
        } else {
            0
        }
    }

    /// Read the latest view from the grid into the mask.
    ///
    /// Clears the seen flags on the grid, so the grid is ready for the next
    /// query afterwards. The viewer's own cell is always lit.
    pub fn update(&mut self, grid: &mut Grid, viewer: IVec2) {
        for y in 0..self.height {
            for x in 0..self.width {
                let value = if grid.is_seen(x, y) {
                    LIT
                } else if grid.is_remembered(x, y) {
                    self.dark_fog_gray
                } else {
                    0
                };
                self.values[row_major(self.width, x, y)] = value;
                grid.clear_seen(x, y);
            }
        }

        if let Some(v) = self.value_mut(viewer) {
            *v = LIT;
        }
    }

    fn value_mut(&mut self, p: IVec2) -> Option<&mut u8> {
        if (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y) {
            Some(&mut self.values[row_major(self.width, p.x, p.y)])
        } else {
            None
        }
    }

    /// Draw the mask as text.
    ///
    /// Lit cells show the map, `#` for walls and `.` for floor, remembered
    /// cells show `+` for walls and `,` for floor and unknown cells are
    /// blank. The viewer is `@`.
    pub fn to_ascii(&self, grid: &Grid, viewer: IVec2) -> String {
        let mut ret = String::new();
        for y in 0..self.height {
            let mut line = String::new();
            for x in 0..self.width {
                let wall = grid.is_blocking(x, y);
                let c = match self.get(x, y) {
                    _ if viewer == IVec2::new(x, y) => '@',
                    0 => ' ',
                    LIT if wall => '#',
                    LIT => '.',
                    _ if wall => '+',
                    _ => ',',
                };
                line.push(c);
            }
            ret.push_str(line.trim_end());
            ret.push('\n');
        }
        ret
    }
}

#[cfg(test)]
mod test {
    use glam::ivec2;

    use super::*;

    #[test]
    fn sweep_clears_seen() {
        let mut grid = Grid::new(3, 1);
        grid.mark_seen(0, 0);
        grid.mark_seen(1, 0);
        let mut fog = FogMask::new(3, 1);

        fog.update(&mut grid, ivec2(0, 0));
        assert_eq!(fog.get(0, 0), LIT);
        assert_eq!(fog.get(1, 0), LIT);
        assert_eq!(fog.get(2, 0), 0);
        assert_eq!(grid.seen().count(), 0);

        // Nothing new seen, old cells are remembered.
        fog.update(&mut grid, ivec2(0, 0));
        assert_eq!(fog.get(0, 0), LIT);
        assert_eq!(fog.get(1, 0), DARK_FOG_GRAY);
        assert_eq!(fog.get(2, 0), 0);
        assert_eq!(fog.get(5, 0), 0);
    }

    #[test]
    fn custom_gray() {
        let mut grid = Grid::new(2, 1);
        grid.mark_seen(1, 0);
        grid.clear_seen(1, 0);
        let mut fog = FogMask::new(2, 1).with_dark_fog_gray(90);
        fog.update(&mut grid, ivec2(-1, -1));
        assert_eq!(fog.get(1, 0), 90);
        assert_eq!(fog.get(0, 0), 0);
    }

    #[test]
    fn ascii() {
        let mut grid = Grid::new(4, 2);
        grid.set_blocking(3, 0, true);
        grid.set_blocking(3, 1, true);
        grid.mark_seen(3, 1);
        grid.mark_seen(2, 1);
        grid.clear_all_seen();
        grid.mark_seen(1, 0);
        grid.mark_seen(2, 0);
        grid.mark_seen(3, 0);

        let mut fog = FogMask::new(4, 2);
        fog.update(&mut grid, ivec2(1, 0));
        assert_eq!(fog.to_ascii(&grid, ivec2(1, 0)), " @.#\n  ,+\n");
    }
}
