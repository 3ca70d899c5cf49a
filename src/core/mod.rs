// Core octree data structures

pub mod line;
pub mod node;
pub mod octree;
pub mod volume;

// Re-export main types
pub use line::Line;
pub use node::{Node, OCTANT_SIGNS};
pub use octree::{Octree, DEFAULT_NODE_CAPACITY};
pub use volume::Volume;
