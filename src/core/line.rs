//! Line - the record type stored by the index

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// An immutable line descriptor: a point plus payload.
///
/// `pos.x` / `pos.y` are raster coordinates of the segment midpoint and
/// `pos.z` is its normalized orientation angle, mapped onto the same
/// numeric range as the spatial axes. `length` is the segment length and
/// `label` the character the segment was extracted from. The index never
/// mutates a stored line, only relocates it between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub pos: IVec3,
    pub length: i32,
    pub label: char,
}

impl Line {
    pub fn new(x: i32, y: i32, z: i32, length: i32, label: char) -> Self {
        Self {
            pos: IVec3::new(x, y, z),
            length,
            label,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}:{} ({})",
            self.pos.x, self.pos.y, self.pos.z, self.length, self.label
        )
    }
}
