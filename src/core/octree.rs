//! Octree - root wrapper carrying the capacity configuration

use crate::core::{Line, Node, Volume};

/// Default number of records a leaf holds before it subdivides.
pub const DEFAULT_NODE_CAPACITY: usize = 1;

/// The spatial index: a root node covering the full coordinate domain
/// plus the leaf capacity threaded through every subdivision.
///
/// Build one over the domain, insert records (leaves subdivide silently
/// once they exceed capacity), then issue range queries or serialize
/// the whole tree. Insert-and-query only; there is no remove.
///
/// Single-threaded by design: subdivision swaps a node's state
/// non-atomically with respect to a concurrent reader, so any shared
/// use needs external synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Octree {
    root: Node,
    capacity: usize,
}

impl Octree {
    /// Create an index over `domain` with the given leaf capacity.
    ///
    /// # Panics
    /// Panics if `capacity` is zero or `domain.half_dim` is not
    /// positive.
    pub fn new(domain: Volume, capacity: usize) -> Self {
        assert!(capacity >= 1, "node capacity must be at least 1");
        assert!(
            domain.half_dim >= 1,
            "domain half_dim must be positive, got {}",
            domain.half_dim
        );
        Self {
            root: Node::new(domain),
            capacity,
        }
    }

    /// Create an index over `domain` with [`DEFAULT_NODE_CAPACITY`].
    pub fn with_default_capacity(domain: Volume) -> Self {
        Self::new(domain, DEFAULT_NODE_CAPACITY)
    }

    /// Rebuild an index from an already-shaped root, used when reading
    /// a dump back.
    pub(crate) fn from_parts(root: Node, capacity: usize) -> Self {
        Self { root, capacity }
    }

    #[inline]
    pub fn domain(&self) -> Volume {
        self.root.volume()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Insert a line. Returns false iff the line's point lies outside
    /// the domain; the tree is left unchanged in that case.
    pub fn insert(&mut self, line: Line) -> bool {
        self.root.insert(line, self.capacity)
    }

    /// All stored records whose point lies within the closed `window`,
    /// restricted to subtrees passing the open intersection test.
    /// Result order is unspecified.
    pub fn query(&self, window: &Volume) -> Vec<Line> {
        let mut out = Vec::new();
        self.root.query(window, &mut out);
        out
    }

    /// Preorder walk over every node's record slice.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&[Line]),
    {
        self.root.traverse(&mut visitor);
    }

    /// Total number of stored records.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.traverse(|records| count += records.len());
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
