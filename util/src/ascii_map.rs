use std::str::FromStr;

use anyhow::bail;
use glam::{ivec2, IVec2};

use crate::Grid;

/// Character for blocking cells in text maps.
pub const WALL: char = '#';

/// Text drawing of a map, one character per cell.
///
/// Whitespace cells are left out of iteration but still take up room, so
/// the map can be drawn with ragged line ends.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct AsciiMap {
    map: String,
}

impl AsciiMap {
    pub fn new(map: &str) -> Self {
        // There might be white space messing with where the content starts,
        // snap the map to the first nonempty line and the leftmost column
        // with content.
        let map = map.trim_end();

        let y_skip = map.lines().take_while(|l| l.trim().is_empty()).count();
        let x_skip = map
            .lines()
            .skip(y_skip)
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);

        let mut trimmed = String::new();
        for line in map.lines().skip(y_skip) {
            trimmed.extend(line.chars().skip(x_skip));
            trimmed.push('\n');
        }

        AsciiMap { map: trimmed }
    }

    /// Iterate the positions and characters of the map's non-whitespace
    /// cells.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        self.map.lines().enumerate().flat_map(|(y, line)| {
            line.chars()
                .enumerate()
                .filter(|(_, c)| !c.is_whitespace())
                .map(move |(x, c)| (ivec2(x as i32, y as i32), c))
        })
    }

    /// Size of the bounding rectangle of the map.
    pub fn dim(&self) -> IVec2 {
        self.iter()
            .fold(IVec2::ZERO, |acc, (p, _)| acc.max(p + IVec2::ONE))
    }

    /// Position of the first occurrence of `c`.
    pub fn find(&self, c: char) -> Option<IVec2> {
        self.iter().find_map(|(p, a)| (a == c).then_some(p))
    }

    /// Build a visibility map with wall characters as blocking cells.
    pub fn to_grid(&self) -> Grid {
        let dim = self.dim().max(IVec2::ONE);
        let mut ret = Grid::new(dim.x, dim.y);
        for (p, c) in self.iter() {
            ret.set_blocking(p.x, p.y, c == WALL);
        }
        ret
    }
}

impl FromStr for AsciiMap {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ret = AsciiMap::new(s);
        if ret.iter().next().is_none() {
            bail!("AsciiMap: empty map");
        }
        Ok(ret)
    }
}
