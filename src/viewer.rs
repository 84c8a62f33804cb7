use fov::{Direction, Fov};
use glam::{IVec2, Vec2};
use util::{Angle, Grid};

/// Largest angle in degrees between a facing vector and a compass heading
/// that still snaps to that heading.
const HEADING_TOLERANCE: f32 = 22.5;

/// Seconds after which the view is recomputed even if the viewer hasn't
/// moved.
pub const REFRESH_INTERVAL: f32 = 0.5;

/// Order in which headings are tried, the first match wins on the
/// boundaries between headings.
const HEADING_ORDER: [Direction; 8] = [
    Direction::North,
    Direction::East,
    Direction::West,
    Direction::South,
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::NorthWest,
    Direction::SouthWest,
];

/// Snap a facing vector in grid coordinates to a compass direction.
///
/// Returns `None` for a zero vector.
pub fn heading_direction(forward: Vec2) -> Option<Direction> {
    if forward == Vec2::ZERO {
        return None;
    }

    let facing = Angle::from(forward);
    HEADING_ORDER.into_iter().find(|dir| {
        let [x, y] = dir.offset();
        let heading = Angle::from(Vec2::new(x as f32, y as f32));
        facing.deg_to(heading) <= HEADING_TOLERANCE
    })
}

/// Someone looking at the map.
#[derive(Clone, Debug)]
pub struct Viewer {
    pub radius: u32,
    /// Beam width in degrees, `None` for seeing all around.
    pub beam: Option<f32>,
    direction: Direction,
    cell: Option<IVec2>,
    last_query: f32,
}

impl Viewer {
    pub fn new(radius: u32) -> Self {
        Viewer {
            radius,
            beam: None,
            direction: Direction::East,
            cell: None,
            last_query: 0.0,
        }
    }

    pub fn with_beam(self, direction: Direction, angle: f32) -> Self {
        Viewer {
            beam: Some(angle),
            direction,
            ..self
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turn the beam towards the compass heading closest to `forward`.
    ///
    /// A zero vector leaves the heading unchanged.
    pub fn face(&mut self, forward: Vec2) {
        if let Some(dir) = heading_direction(forward) {
            self.direction = dir;
        }
    }

    /// Record the viewer being at `cell` at time `now` in seconds.
    ///
    /// Returns true if the view should be recomputed, which happens when
    /// the viewer enters a new cell or the last view has gone stale.
    pub fn update(&mut self, cell: IVec2, now: f32) -> bool {
        if self.cell != Some(cell) || now - self.last_query > REFRESH_INTERVAL
        {
            self.cell = Some(cell);
            self.last_query = now;
            true
        } else {
            false
        }
    }

    /// Mark what the viewer sees from `cell` on the grid.
    pub fn look<O, A>(&self, fov: &mut Fov<O, A>, grid: &mut Grid, cell: IVec2)
    where
        O: Fn(&Grid, i32, i32) -> bool,
        A: FnMut(&mut Grid, i32, i32, i32, i32, &Viewer),
    {
        log::debug!("Viewer::look: from {cell} radius {}", self.radius);
        match self.beam {
            Some(angle) => fov.beam(
                grid,
                self,
                cell.x,
                cell.y,
                self.radius,
                self.direction,
                angle,
            ),
            None => fov.circle(grid, self, cell.x, cell.y, self.radius),
        }
    }
}

#[cfg(test)]
mod test {
    use fov::Settings;
    use glam::{ivec2, vec2};

    use super::*;

    fn calculator() -> Fov<
        impl Fn(&Grid, i32, i32) -> bool,
        impl FnMut(&mut Grid, i32, i32, i32, i32, &Viewer),
    > {
        Fov::new(
            Settings::default(),
            |g: &Grid, x: i32, y: i32| g.is_blocking(x, y),
            |g: &mut Grid, x: i32, y: i32, _: i32, _: i32, _: &Viewer| {
                g.mark_seen(x, y)
            },
        )
    }

    #[test]
    fn headings() {
        use Direction::*;

        assert_eq!(heading_direction(vec2(0.0, 0.0)), None);
        assert_eq!(heading_direction(vec2(1.0, 0.0)), Some(East));
        assert_eq!(heading_direction(vec2(0.0, -3.0)), Some(North));
        assert_eq!(heading_direction(vec2(0.0, 1.0)), Some(South));
        assert_eq!(heading_direction(vec2(-1.0, 0.1)), Some(West));
        assert_eq!(heading_direction(vec2(2.0, -2.0)), Some(NorthEast));
        assert_eq!(heading_direction(vec2(-1.0, 1.0)), Some(SouthWest));
        assert_eq!(heading_direction(vec2(-1.0, -1.1)), Some(NorthWest));
        assert_eq!(heading_direction(vec2(1.0, 0.9)), Some(SouthEast));
    }

    #[test]
    fn every_facing_has_a_heading() {
        for deg in 0..360 {
            let v = Vec2::from(Angle::new(deg as f32));
            assert!(heading_direction(v).is_some(), "{deg}");
        }
    }

    #[test]
    fn facing_keeps_heading_on_zero() {
        let mut viewer = Viewer::new(3);
        viewer.face(vec2(0.0, 1.0));
        assert_eq!(viewer.direction(), Direction::South);
        viewer.face(Vec2::ZERO);
        assert_eq!(viewer.direction(), Direction::South);
    }

    #[test]
    fn refresh_cadence() {
        let mut viewer = Viewer::new(3);
        assert!(viewer.update(ivec2(1, 1), 0.0));
        assert!(!viewer.update(ivec2(1, 1), 0.25));
        assert!(!viewer.update(ivec2(1, 1), 0.5));
        assert!(viewer.update(ivec2(1, 1), 0.75));
        assert!(viewer.update(ivec2(2, 1), 0.8));
        assert!(!viewer.update(ivec2(2, 1), 0.9));
    }

    #[test]
    fn look_around() {
        let mut grid = Grid::new(9, 9);
        let mut fov = calculator();
        Viewer::new(2).look(&mut fov, &mut grid, ivec2(4, 4));
        assert!(grid.is_seen(4, 4));
        assert!(grid.is_seen(2, 4));
        assert!(grid.is_seen(4, 6));
        assert!(!grid.is_seen(6, 6));
        assert_eq!(grid.seen().count(), 13);
    }

    #[test]
    fn look_with_beam() {
        let mut grid = Grid::new(9, 9);
        let mut fov = calculator();
        Viewer::new(4)
            .with_beam(Direction::West, 90.0)
            .look(&mut fov, &mut grid, ivec2(4, 4));
        assert!(grid.is_seen(4, 4));
        assert!(grid.is_seen(0, 4));
        assert!(grid.is_seen(2, 2));
        assert!(!grid.is_seen(5, 4));
        assert!(!grid.is_seen(4, 2));
        assert!(grid.seen().all(|p| p.x <= 4));
    }
}
