use std::{
    f32::consts::{PI, TAU},
    fmt, ops,
    str::FromStr,
};

use glam::Vec2;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Compass heading on a y-down grid, stored in radians.
///
/// Zero points up the screen towards negative y and the value grows
/// clockwise, so east is 90° and south is 180°.
#[derive(
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Default,
    Debug,
    DeserializeFromStr,
    SerializeDisplay,
)]
pub struct Angle(f32);

impl Angle {
    pub fn new(deg: f32) -> Self {
        Angle(deg.to_radians())
    }

    pub fn deg(self) -> f32 {
        self.0.to_degrees()
    }

    /// Same heading wrapped into `[-180°, 180°)`.
    pub fn normalize(self) -> Self {
        Angle((self.0 + PI).rem_euclid(TAU) - PI)
    }

    /// Size of the angle in degrees after normalization.
    pub fn abs(self) -> f32 {
        self.normalize().deg().abs()
    }

    /// Degrees to turn from this heading to `other` the short way round.
    pub fn deg_to(self, other: Angle) -> f32 {
        (other - self).abs()
    }
}

impl From<Vec2> for Angle {
    fn from(v: Vec2) -> Self {
        Angle(v.x.atan2(-v.y))
    }
}

impl From<Angle> for Vec2 {
    fn from(a: Angle) -> Self {
        let (sin, cos) = a.0.sin_cos();
        Vec2::new(sin, -cos)
    }
}

impl ops::Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.deg())
    }
}

impl FromStr for Angle {
    type Err = std::num::ParseFloatError;

    /// Parse degrees, with or without a trailing degree sign.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Angle::new(s.strip_suffix('°').unwrap_or(s).parse()?))
    }
}
