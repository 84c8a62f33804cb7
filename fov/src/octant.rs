//! Recursive shadowcasting over one octant at a time.
//!
//! ```notrust
//!  \mmy|mpy/       Octants around the source at @, y grows downwards.
//!   \  |  /        Letter triplets are the sign of the major step, the
//!    \ | /         sign of the minor step and whether the octant is
//!  mmn\|/pmn       reflected on the x = y diagonal (major axis is y).
//!  ----@----
//!  mpn/|\ppn
//!    / | \
//!   /  |  \
//!  /pmy|ppy\
//! ```
//!
//! Slopes are measured from the major axis of the octant towards its
//! diagonal, `0.0` is the axis and `1.0` is the 45° diagonal.

use crate::{HeightCache, Settings};

/// Tolerance for slope arithmetic.
const EPSILON: f32 = f32::EPSILON;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Axis {
    X,
    Y,
}

/// Transform from octant-local `(dx, dy)` offsets to map coordinates.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Octant {
    /// Sign of the step along the major axis.
    pub sign_x: i32,
    /// Sign of the step along the minor axis.
    pub sign_y: i32,
    /// Axis `dx` runs along.
    pub major: Axis,
    /// Whether this octant lights the `dy = 0` axis line.
    pub edge: bool,
    /// Whether this octant lights the diagonal `dy = dx` line.
    pub diagonal: bool,
}

impl Octant {
    const fn new(
        sign_x: i32,
        sign_y: i32,
        major: Axis,
        edge: bool,
        diagonal: bool,
    ) -> Self {
        Octant {
            sign_x,
            sign_y,
            major,
            edge,
            diagonal,
        }
    }

    /// Map coordinates of the cell at octant-local offset `(dx, dy)` from
    /// `origin`.
    pub fn transform(&self, origin: [i32; 2], dx: i32, dy: i32) -> [i32; 2] {
        let [x, y] = origin;
        match self.major {
            Axis::X => [x + self.sign_x * dx, y + self.sign_y * dy],
            Axis::Y => [x + self.sign_y * dy, y + self.sign_x * dx],
        }
    }

    /// Whether `other` is the octant on the other side of this one's
    /// `dy = 0` axis line.
    pub fn shares_axis(&self, other: &Octant) -> bool {
        self.major == other.major
            && self.sign_x == other.sign_x
            && self.sign_y == -other.sign_y
    }

    /// Whether `other` is the octant on the other side of this one's
    /// diagonal line.
    pub fn shares_diagonal(&self, other: &Octant) -> bool {
        self.major != other.major
            && self.sign_x == other.sign_y
            && self.sign_y == other.sign_x
    }
}

pub(crate) const PPN: Octant = Octant::new(1, 1, Axis::X, true, true);
pub(crate) const PPY: Octant = Octant::new(1, 1, Axis::Y, true, false);
pub(crate) const PMN: Octant = Octant::new(1, -1, Axis::X, false, true);
pub(crate) const PMY: Octant = Octant::new(1, -1, Axis::Y, false, false);
pub(crate) const MPN: Octant = Octant::new(-1, 1, Axis::X, true, true);
pub(crate) const MPY: Octant = Octant::new(-1, 1, Axis::Y, true, false);
pub(crate) const MMN: Octant = Octant::new(-1, -1, Axis::X, false, true);
pub(crate) const MMY: Octant = Octant::new(-1, -1, Axis::Y, false, false);

/// All eight octants. Every axis line and diagonal line is lit by exactly
/// one of them.
pub(crate) const OCTANTS: [Octant; 8] = [PPN, PPY, PMN, PMY, MPN, MPY, MMN, MMY];

/// Slope of the line from the source to `(dx, dy)`.
pub fn slope(dx: f32, dy: f32) -> f32 {
    if dx.abs() >= EPSILON {
        dy / dx
    } else {
        0.0
    }
}

/// Limit `x` to `[a, b]`, snapping values within epsilon of a bound to the
/// bound.
pub fn clamp(x: f32, a: f32, b: f32) -> f32 {
    if x - a < EPSILON {
        a
    } else if x - b > EPSILON {
        b
    } else {
        x
    }
}

/// State of a single field-of-view query.
pub(crate) struct Caster<'a, M, S, O, A> {
    pub settings: Settings,
    pub heights: &'a mut HeightCache,
    pub opaque: &'a O,
    pub apply: &'a mut A,
    pub map: &'a mut M,
    pub source: &'a S,
    pub origin: [i32; 2],
    pub radius: u32,
}

impl<M, S, O, A> Caster<'_, M, S, O, A>
where
    O: Fn(&M, i32, i32) -> bool,
    A: FnMut(&mut M, i32, i32, i32, i32, &S),
{
    fn is_opaque(&self, x: i32, y: i32) -> bool {
        (self.opaque)(&*self.map, x, y)
    }

    fn is_opaque_at(&self, octant: &Octant, dx: i32, dy: i32) -> bool {
        let [x, y] = octant.transform(self.origin, dx, dy);
        self.is_opaque(x, y)
    }

    fn light(&mut self, x: i32, y: i32, dx: i32, dy: i32) {
        (self.apply)(&mut *self.map, x, y, dx, dy, self.source)
    }

    /// Light the source cell itself.
    pub fn light_origin(&mut self) {
        let [x, y] = self.origin;
        if !self.is_opaque(x, y) || self.settings.applies_opaque() {
            self.light(x, y, 0, 0);
        }
    }

    /// Walk column `dx` of `octant` within the slope interval
    /// `[start_slope, end_slope]` and recurse outwards through the parts
    /// of it that aren't shadowed.
    pub fn octant(
        &mut self,
        octant: &Octant,
        dx: i32,
        mut start_slope: f32,
        end_slope: f32,
    ) {
        if dx == 0 {
            self.octant(octant, 1, start_slope, end_slope);
            return;
        } else if dx as u32 > self.radius {
            return;
        }

        let dy0 = (0.5 + dx as f32 * start_slope) as i32;
        let mut dy1 = (0.5 + dx as f32 * end_slope) as i32;

        if !octant.diagonal && dy1 == dx {
            // Diagonals are done by every second octant, so they don't get
            // done twice.
            dy1 -= 1;
        }

        let h = self.settings.shape.height(self.heights, self.radius, dx as u32);
        let h = i32::try_from(h).unwrap_or(i32::MAX);
        dy1 = dy1.min(h);

        if dy0 > dy1 {
            // Only the diagonal cell is left and the neighbor octant lights
            // it. Keep walking past it while it's open.
            if dy0 == dx && dx <= h && !self.is_opaque_at(octant, dx, dy0) {
                self.octant(octant, dx + 1, start_slope, end_slope);
            }
            return;
        }

        // None until the first cell of the column is visited.
        let mut prev_blocked = None;

        for dy in dy0..=dy1 {
            let [x, y] = octant.transform(self.origin, dx, dy);
            let lit_here = octant.edge || dy > 0;

            if self.is_opaque(x, y) {
                if lit_here && self.settings.applies_opaque() {
                    self.light(x, y, dx, dy);
                }
                if prev_blocked == Some(false) {
                    // Light got cut, finish the open wedge before this cell.
                    let end_slope_next =
                        slope(dx as f32 + 0.5, dy as f32 - 0.5);
                    self.octant(octant, dx + 1, start_slope, end_slope_next);
                }
                prev_blocked = Some(true);
            } else {
                if lit_here {
                    self.light(x, y, dx, dy);
                }
                if prev_blocked == Some(true) {
                    start_slope = slope(dx as f32 - 0.5, dy as f32 - 0.5);
                }
                prev_blocked = Some(false);
            }
        }

        if prev_blocked == Some(false) {
            self.octant(octant, dx + 1, start_slope, end_slope);
        }
    }
}
