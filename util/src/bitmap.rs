//! Packed one-bit-per-cell blocking maps.
//!
//! Cell `(x, y)` is bit `n % 8` of byte `n / 8` where `n = x + width * y`,
//! least significant bit first. A set bit means the cell blocks light.

use crate::{area, row_major, Grid};

/// Number of bytes needed to store a map of the given size.
pub fn bitmap_len(width: i32, height: i32) -> usize {
    area(width, height).div_ceil(8)
}

impl Grid {
    /// Build a map from packed blocking bits.
    ///
    /// If `bits` is too short, the cells past its end are left open.
    pub fn from_bitmap(width: i32, height: i32, bits: &[u8]) -> Self {
        let mut ret = Grid::new(width, height);

        if bits.len() < bitmap_len(width, height) {
            log::warn!(
                "Grid::from_bitmap: {}x{} map from {} bytes, expected {}",
                width,
                height,
                bits.len(),
                bitmap_len(width, height)
            );
        }

        for y in 0..height {
            for x in 0..width {
                let n = row_major(width, x, y);
                if let Some(byte) = bits.get(n / 8) {
                    ret.set_blocking(x, y, byte & (1 << (n % 8)) != 0);
                }
            }
        }
        ret
    }

    /// Pack the blocking cells of the map into bits.
    pub fn to_bitmap(&self) -> Vec<u8> {
        let mut ret = vec![0u8; bitmap_len(self.width(), self.height())];
        for (p, _) in self.iter() {
            if self.is_blocking(p.x, p.y) {
                let n = row_major(self.width(), p.x, p.y);
                ret[n / 8] |= 1 << (n % 8);
            }
        }
        ret
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(bitmap_len(1, 1), 1);
        assert_eq!(bitmap_len(8, 1), 1);
        assert_eq!(bitmap_len(3, 3), 2);
        assert_eq!(bitmap_len(4, 4), 2);
        assert_eq!(bitmap_len(5, 5), 4);
    }

    #[test]
    fn decode() {
        // 3x3 map, bits:
        //   #..
        //   .#.
        //   ..#
        let grid = Grid::from_bitmap(3, 3, &[0b0001_0001, 0b0000_0001]);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(grid.is_blocking(x, y), x == y, "{x}, {y}");
            }
        }
        assert_eq!(grid.to_bitmap(), vec![0b0001_0001, 0b0000_0001]);
    }

    #[test]
    fn short_buffer() {
        let grid = Grid::from_bitmap(4, 4, &[0xff]);
        assert!(grid.is_blocking(3, 1));
        assert!(!grid.is_blocking(0, 2));
        assert!(!grid.is_blocking(3, 3));

        let grid = Grid::from_bitmap(4, 4, &[]);
        assert!(grid.iter().all(|(p, _)| !grid.is_blocking(p.x, p.y)));
    }

    #[test]
    fn excess_bits_ignored() {
        let grid = Grid::from_bitmap(3, 1, &[0xff, 0xff]);
        assert_eq!(grid.to_bitmap(), vec![0b0000_0111]);
    }

    #[quickcheck]
    fn reencoding_preserves_walls(w: u8, h: u8, bits: Vec<u8>) -> bool {
        let (w, h) = (w as i32 % 20 + 1, h as i32 % 20 + 1);
        let grid = Grid::from_bitmap(w, h, &bits);
        Grid::from_bitmap(w, h, &grid.to_bitmap()) == grid
    }
}
