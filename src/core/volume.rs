//! Volume - axis-aligned cube over the index's coordinate space
//!
//! A Volume serves two roles: the spatial domain of an octree node, and
//! the query window handed to a range query. The three axes are treated
//! uniformly even though the z axis carries a normalized orientation
//! angle rather than a literal spatial coordinate.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned cube described by a center point and a half-extent.
///
/// Bounds on each axis are `center ± half_dim`. Immutable after
/// construction.
///
/// # Boundary semantics
/// `contains` is CLOSED (boundary points belong to both adjacent
/// volumes) while `intersects` is strictly OPEN (volumes that merely
/// touch at a shared face do not intersect). This asymmetry is part of
/// the index's contract; see [`crate::Node::query`] for its consequence
/// at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub center: IVec3,
    pub half_dim: i32,
}

impl Volume {
    /// Create a volume centered at `center` with half-extent `half_dim`.
    ///
    /// # Panics
    /// Panics if `half_dim` is negative.
    pub fn new(center: IVec3, half_dim: i32) -> Self {
        assert!(
            half_dim >= 0,
            "Volume half_dim must be non-negative, got {}",
            half_dim
        );
        Self { center, half_dim }
    }

    /// Minimum corner (`center - half_dim` on every axis).
    #[inline]
    pub fn min(&self) -> IVec3 {
        self.center - IVec3::splat(self.half_dim)
    }

    /// Maximum corner (`center + half_dim` on every axis).
    #[inline]
    pub fn max(&self) -> IVec3 {
        self.center + IVec3::splat(self.half_dim)
    }

    /// True iff `point` lies within the closed interval [min, max] on
    /// every axis. Boundary-inclusive on both ends.
    #[inline]
    pub fn contains(&self, point: IVec3) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }

    /// True iff the volumes strictly overlap on every axis
    /// (`self.max > other.min && self.min < other.max`).
    ///
    /// Two volumes that touch at a shared face, edge or corner are NOT
    /// reported as intersecting, even though a point on that shared
    /// boundary is `contains`-ed by both.
    #[inline]
    pub fn intersects(&self, other: &Volume) -> bool {
        self.max().cmpgt(other.min()).all() && self.min().cmplt(other.max()).all()
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{} ({})",
            self.center.x, self.center.y, self.center.z, self.half_dim
        )
    }
}
