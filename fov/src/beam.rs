use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::octant::{
    clamp, Octant, MMN, MMY, MPN, MPY, PMN, PMY, PPN, PPY,
};

/// Eight-way direction a beam can point to.
///
/// Uses grid coordinates where y grows downwards, so north is towards
/// negative y.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

use Direction::*;

impl Direction {
    /// Counterclockwise order starting from east.
    pub const ALL: [Direction; 8] = [
        East, NorthEast, North, NorthWest, West, SouthWest, South, SouthEast,
    ];

    /// Unit grid step towards the direction.
    pub fn offset(self) -> [i32; 2] {
        match self {
            East => [1, 0],
            NorthEast => [1, -1],
            North => [0, -1],
            NorthWest => [-1, -1],
            West => [-1, 0],
            SouthWest => [-1, 1],
            South => [0, 1],
            SouthEast => [1, 1],
        }
    }

    pub fn is_diagonal(self) -> bool {
        let [x, y] = self.offset();
        x != 0 && y != 0
    }

    /// Octant pairs that make up a beam in this direction.
    ///
    /// The first pair straddles the beam's center line, each following
    /// pair extends the beam by another 45° on both sides.
    fn stages(self) -> [[Octant; 2]; 4] {
        match self {
            East => [[PPN, PMN], [PPY, MPY], [PMY, MMY], [MPN, MMN]],
            West => [[MPN, MMN], [PMY, MMY], [PPY, MPY], [PPN, PMN]],
            North => [[MPY, MMY], [MMN, PMN], [MPN, PPN], [PMY, PPY]],
            South => [[PMY, PPY], [MPN, PPN], [MMN, PMN], [MMY, MPY]],
            NorthEast => [[PMN, MPY], [MMY, PPN], [MMN, PPY], [MPN, PMY]],
            NorthWest => [[MMN, MMY], [MPN, MPY], [PMY, PMN], [PPY, PPN]],
            SouthEast => [[PPN, PPY], [PMY, PMN], [MPN, MPY], [MMN, MMY]],
            SouthWest => [[PMY, MPN], [PPY, MMN], [PPN, MMY], [PMN, MPY]],
        }
    }
}

/// A partial octant sweep that is part of a beam.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Wedge {
    pub octant: Octant,
    pub start_slope: f32,
    pub end_slope: f32,
}

/// Decompose a beam into partial octant sweeps.
///
/// `angle` is the full width of the beam in degrees and must be within
/// `(0, 360)`, the caller handles the degenerate widths.
pub(crate) fn wedges(direction: Direction, angle: f32) -> Vec<Wedge> {
    // Half of the beam as multiples of 45°, e.g. 180° is 2.0.
    let a = angle / 90.0;

    let mut ret = Vec::new();
    for (i, pair) in direction.stages().into_iter().enumerate() {
        let k = i as f32;
        if i > 0 && a - k <= f32::EPSILON {
            break;
        }

        // Stages alternate between growing out from an octant's axis line
        // and from its diagonal line. Cardinal beams start from the axis,
        // diagonal beams from the diagonal.
        let from_axis = (i % 2 == 0) != direction.is_diagonal();
        let (start_slope, end_slope) = if from_axis {
            (0.0, clamp(a - k, 0.0, 1.0))
        } else {
            (clamp(k + 1.0 - a, 0.0, 1.0), 1.0)
        };

        for octant in pair {
            ret.push(Wedge {
                octant,
                start_slope,
                end_slope,
            });
        }
    }

    // A line shared with an octant outside the beam is lit from inside
    // the beam, whichever octant owns it in a full circle.
    let included: Vec<Octant> = ret.iter().map(|w| w.octant).collect();
    for w in &mut ret {
        let o = w.octant;
        w.octant.edge |= !included.iter().any(|n| o.shares_axis(n));
        w.octant.diagonal |= !included.iter().any(|n| o.shares_diagonal(n));
    }
    ret
}
