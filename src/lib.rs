//! linedb - a capacity-bounded octree index for line descriptors
//!
//! Stores immutable line records keyed by position and orientation
//! (x, y, theta) and answers axis-aligned box queries against them.
//! Producers (glyph rasterization, line detection) and consumers
//! (SVG emission, plotting) live outside this crate; it only sees
//! records in and query results or a serialized dump out.

pub mod core;
pub mod io;

pub use crate::core::{Line, Node, Octree, Volume, DEFAULT_NODE_CAPACITY, OCTANT_SIGNS};
pub use crate::io::{parse_xml, serialize_xml, write_xml, XmlError};

// Re-export glam for convenience
pub use glam;
