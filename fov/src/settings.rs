use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Boundary that limits how far light spreads from the source.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Default,
    Debug,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Euclidean circle with the column heights memoized per radius in a
    /// `HeightCache`.
    ///
    /// Costs `4 * (r + 2)` bytes for every distinct radius `r` queried, and
    /// the memory stays around until the cache is cleared.
    #[default]
    CirclePrecalculate,
    /// Euclidean circle computed on the fly.
    Circle,
    /// Eight-sided silhouette with maximum radius `r`.
    Octagon,
    /// The bounding square of radius `r`.
    Square,
}

/// Whether sources see around corners they are standing next to.
///
/// Not implemented, both values produce the same result.
///
/// ```notrust
///   Peek:       NoPeek:
///   ........    ......
///   ........    .....
///   ........    ....
///   ..@#        ..@#
///   ...#        ...#
/// ```
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Default,
    Debug,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CornerPeek {
    #[default]
    NoPeek,
    Peek,
}

/// Whether the apply callback also fires for opaque cells.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Default,
    Debug,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OpaqueApply {
    /// Walls that stop the light are lit themselves.
    #[default]
    Apply,
    /// Only cells light passes through are lit.
    Skip,
}

/// Static configuration for field-of-view queries.
///
/// Settings are a plain value, the mutable memoization state lives in
/// [`HeightCache`](crate::HeightCache).
#[derive(
    Copy, Clone, Eq, PartialEq, Default, Debug, Serialize, Deserialize,
)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub shape: Shape,
    pub corner_peek: CornerPeek,
    pub opaque_apply: OpaqueApply,
}

impl Settings {
    pub fn with_shape(self, shape: Shape) -> Self {
        Settings { shape, ..self }
    }

    pub fn with_corner_peek(self, corner_peek: CornerPeek) -> Self {
        Settings {
            corner_peek,
            ..self
        }
    }

    pub fn with_opaque_apply(self, opaque_apply: OpaqueApply) -> Self {
        Settings {
            opaque_apply,
            ..self
        }
    }

    /// Whether an opaque cell that was reached should get the apply
    /// callback.
    pub(crate) fn applies_opaque(&self) -> bool {
        self.opaque_apply == OpaqueApply::Apply
    }
}
