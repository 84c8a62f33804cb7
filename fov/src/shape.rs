use rustc_hash::FxHashMap;

use crate::Shape;

/// Memoized circle column heights for the precalculating circle shape.
///
/// Entry for radius `r` is stored under key `r - 1` and holds
/// `floor(sqrt(r² - i²))` for every `i` in `0..=r`, followed by a
/// terminating zero. The cache only grows during queries, use
/// [`clear`](HeightCache::clear) to drop the data.
#[derive(Clone, Default, Debug)]
pub struct HeightCache {
    heights: FxHashMap<u32, Vec<u32>>,
    max_radius: u32,
}

impl HeightCache {
    pub fn new() -> Self {
        Default::default()
    }

    /// Column heights for `radius`, computing and storing them if this
    /// radius hasn't been seen before.
    pub fn heights(&mut self, radius: u32) -> &[u32] {
        if radius == 0 {
            return &[0, 0];
        }

        self.max_radius = self.max_radius.max(radius);
        self.heights.entry(radius - 1).or_insert_with(|| {
            log::trace!("HeightCache: precalculating radius {radius}");
            circle_heights(radius)
        })
    }

    /// Height of column `dx` for `radius`.
    ///
    /// Offsets past the radius have height zero.
    pub fn height(&mut self, radius: u32, dx: u32) -> u32 {
        self.heights(radius).get(dx as usize).copied().unwrap_or(0)
    }

    /// Look up heights without growing the cache.
    pub fn get(&self, radius: u32) -> Option<&[u32]> {
        if radius == 0 {
            return None;
        }
        self.heights.get(&(radius - 1)).map(|v| v.as_slice())
    }

    /// Largest radius the cache has ever been asked for.
    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    /// Number of distinct radii stored.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn clear(&mut self) {
        self.heights.clear();
        self.max_radius = 0;
    }
}

fn circle_height(radius: u32, dx: u32) -> u32 {
    let (r, dx) = (radius as u64, dx as u64);
    ((r * r - dx * dx) as f64).sqrt() as u32
}

fn circle_heights(radius: u32) -> Vec<u32> {
    let mut ret: Vec<u32> =
        (0..=radius).map(|i| circle_height(radius, i)).collect();
    ret.push(0);
    ret
}

impl Shape {
    /// Maximum lateral offset `h` so that cells at `|dy| <= h` on column
    /// `dx` are inside the shape.
    ///
    /// `dx` must not exceed `radius`.
    pub fn height(self, cache: &mut HeightCache, radius: u32, dx: u32) -> u32 {
        debug_assert!(dx <= radius);
        match self {
            Shape::CirclePrecalculate => cache.height(radius, dx),
            Shape::Circle => circle_height(radius, dx),
            Shape::Octagon => (radius - dx) << 1,
            Shape::Square => radius,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cache_growth() {
        let mut cache = HeightCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(3), None);

        assert_eq!(cache.heights(3), &[3, 2, 2, 0, 0]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.max_radius(), 3);

        // Repeat queries don't grow.
        cache.heights(3);
        assert_eq!(cache.len(), 1);

        cache.heights(1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.max_radius(), 3);
        assert_eq!(cache.get(1), Some(&[1, 0, 0][..]));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.max_radius(), 0);
    }

    #[test]
    fn precalculated_matches_on_the_fly() {
        let mut cache = HeightCache::new();
        for r in 0..40 {
            for dx in 0..=r {
                assert_eq!(
                    Shape::Circle.height(&mut cache, r, dx),
                    Shape::CirclePrecalculate.height(&mut cache, r, dx),
                    "radius {r} column {dx}"
                );
            }
        }
    }

    #[test]
    fn huge_radius() {
        let r = 70_000;
        let mut cache = HeightCache::new();
        assert_eq!(Shape::Circle.height(&mut cache, r, 0), r);
        // sqrt(70000² - 69999²) = sqrt(139999)
        assert_eq!(Shape::Circle.height(&mut cache, r, r - 1), 374);
        assert_eq!(Shape::CirclePrecalculate.height(&mut cache, r, r - 1), 374);
        assert_eq!(cache.heights(r).len(), r as usize + 2);
    }

    #[test]
    fn only_precalculate_uses_cache() {
        let mut cache = HeightCache::new();
        Shape::Circle.height(&mut cache, 5, 2);
        Shape::Octagon.height(&mut cache, 5, 2);
        Shape::Square.height(&mut cache, 5, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn polygon_shapes() {
        let mut cache = HeightCache::new();
        assert_eq!(Shape::Octagon.height(&mut cache, 5, 0), 10);
        assert_eq!(Shape::Octagon.height(&mut cache, 5, 4), 2);
        assert_eq!(Shape::Octagon.height(&mut cache, 5, 5), 0);
        for dx in 0..=5 {
            assert_eq!(Shape::Square.height(&mut cache, 5, dx), 5);
        }
    }
}
