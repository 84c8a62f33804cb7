//! Recursive shadowcasting field of view for tile grids.
//!
//! The engine never looks at the map directly. It asks an opacity test
//! closure whether light passes a cell and calls an apply closure for every
//! cell it finds lit, so it works with any map type.
//!
//! ```
//! use std::collections::HashSet;
//! use fov::{Fov, Settings};
//!
//! let walls: HashSet<[i32; 2]> = [[3, 2]].into_iter().collect();
//! let mut lit: HashSet<[i32; 2]> = HashSet::new();
//!
//! let mut fov = Fov::new(
//!     Settings::default(),
//!     |walls: &HashSet<[i32; 2]>, x: i32, y: i32| walls.contains(&[x, y]),
//!     |_: &mut HashSet<[i32; 2]>, x: i32, y: i32, _dx: i32, _dy: i32, _: &()| {
//!         lit.insert([x, y]);
//!     },
//! );
//!
//! let mut map = walls.clone();
//! fov.circle(&mut map, &(), 2, 2, 2);
//! drop(fov);
//!
//! assert!(lit.contains(&[3, 2]));
//! assert!(!lit.contains(&[4, 2]));
//! ```

mod beam;
pub use beam::Direction;

mod octant;
pub use octant::{clamp, slope};

mod settings;
pub use settings::{CornerPeek, OpaqueApply, Settings, Shape};

mod shape;
pub use shape::HeightCache;

use octant::{Caster, OCTANTS};

/// Field-of-view calculator.
///
/// Holds the settings, the two callbacks and the height cache that is
/// reused between queries. The opacity test `O` is called as
/// `opaque(map, x, y)` and returns whether the cell stops light. The apply
/// callback `A` is called as `apply(map, x, y, dx, dy, source)` for every
/// lit cell, `(dx, dy)` being the cell's offset from the source.
///
/// Queries run synchronously to completion and are not meant to be shared
/// between threads.
pub struct Fov<O, A> {
    settings: Settings,
    heights: HeightCache,
    opaque: O,
    apply: A,
}

impl<O, A> Fov<O, A> {
    pub fn new(settings: Settings, opaque: O, apply: A) -> Self {
        Fov {
            settings,
            heights: Default::default(),
            opaque,
            apply,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change settings, cached heights stay valid.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn heights(&self) -> &HeightCache {
        &self.heights
    }

    pub fn heights_mut(&mut self) -> &mut HeightCache {
        &mut self.heights
    }

    /// Free the precalculated data.
    pub fn reset(&mut self) {
        self.heights.clear();
    }

    /// Compute a full circle field of view around `(x, y)`.
    ///
    /// Nothing past `radius` from the source, as measured by the settings'
    /// shape, is lit.
    pub fn circle<M, S>(
        &mut self,
        map: &mut M,
        source: &S,
        x: i32,
        y: i32,
        radius: u32,
    ) where
        O: Fn(&M, i32, i32) -> bool,
        A: FnMut(&mut M, i32, i32, i32, i32, &S),
    {
        let mut caster = self.caster(map, source, x, y, radius);
        caster.light_origin();
        for octant in &OCTANTS {
            caster.octant(octant, 1, 0.0, 1.0);
        }
    }

    /// Compute a field of view from `(x, y)` limited to a beam pointing
    /// towards `direction`.
    ///
    /// `angle` is the full width of the beam in degrees, with half of it on
    /// each side of the center line. A beam of zero or negative width lights
    /// nothing, a beam of 360° or more is a full circle.
    #[allow(clippy::too_many_arguments)]
    pub fn beam<M, S>(
        &mut self,
        map: &mut M,
        source: &S,
        x: i32,
        y: i32,
        radius: u32,
        direction: Direction,
        angle: f32,
    ) where
        O: Fn(&M, i32, i32) -> bool,
        A: FnMut(&mut M, i32, i32, i32, i32, &S),
    {
        if angle <= 0.0 {
            return;
        } else if angle >= 360.0 {
            self.circle(map, source, x, y, radius);
            return;
        }

        let mut caster = self.caster(map, source, x, y, radius);
        caster.light_origin();
        for w in beam::wedges(direction, angle) {
            caster.octant(&w.octant, 1, w.start_slope, w.end_slope);
        }
    }

    fn caster<'a, M, S>(
        &'a mut self,
        map: &'a mut M,
        source: &'a S,
        x: i32,
        y: i32,
        radius: u32,
    ) -> Caster<'a, M, S, O, A> {
        Caster {
            settings: self.settings,
            heights: &mut self.heights,
            opaque: &self.opaque,
            apply: &mut self.apply,
            map,
            source,
            origin: [x, y],
            radius,
        }
    }
}
