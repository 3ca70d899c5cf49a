//! Node - octree node with insert/subdivide, range query and traversal

use crate::core::{Line, Volume};
use glam::IVec3;
use tracing::{debug, trace};

/// Octant sign combinations in fixed child order:
/// +++, -++, +-+, --+, ++-, -+-, +--, ---
///
/// A child's center is `parent.center + sign * half` where
/// `half = parent.half_dim / 2`.
pub const OCTANT_SIGNS: [IVec3; 8] = [
    IVec3::new(1, 1, 1),
    IVec3::new(-1, 1, 1),
    IVec3::new(1, -1, 1),
    IVec3::new(-1, -1, 1),
    IVec3::new(1, 1, -1),
    IVec3::new(-1, 1, -1),
    IVec3::new(1, -1, -1),
    IVec3::new(-1, -1, -1),
];

/// Smallest half-extent at which a leaf may still subdivide. Below this,
/// integer halving would produce zero-extent children, so the leaf grows
/// past its capacity instead (see [`Node::insert`]).
const MIN_SUBDIVIDE_EXTENT: i32 = 2;

/// Node state - either an undivided leaf holding records, or a branch
/// subdivided into exactly eight children. Partial subdivision is
/// unrepresentable: the eight children exist as a set or not at all.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Leaf(Vec<Line>),
    Branch(Box<[Node; 8]>),
}

/// A node of the octree: one volume plus its leaf/branch state.
///
/// Nodes are created by [`Node::new`] (the root) or as a side effect of
/// subdivision, and are never destroyed or rebalanced. Each node
/// exclusively owns its children and records; there is no parent
/// back-reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    volume: Volume,
    state: State,
}

impl Node {
    /// Create an empty leaf covering `volume`.
    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            state: State::Leaf(Vec::new()),
        }
    }

    /// Rebuild a leaf with its records, used when reading a dump back.
    pub(crate) fn leaf_with(volume: Volume, records: Vec<Line>) -> Self {
        Self {
            volume,
            state: State::Leaf(records),
        }
    }

    /// Rebuild a branch from its eight children, used when reading a
    /// dump back.
    pub(crate) fn branch(volume: Volume, children: Box<[Node; 8]>) -> Self {
        Self {
            volume,
            state: State::Branch(children),
        }
    }

    #[inline]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.state, State::Leaf(_))
    }

    /// Records held locally by this node. Empty for branch nodes.
    #[inline]
    pub fn records(&self) -> &[Line] {
        match &self.state {
            State::Leaf(records) => records,
            State::Branch(_) => &[],
        }
    }

    /// The eight children, if this node has subdivided.
    #[inline]
    pub fn children(&self) -> Option<&[Node; 8]> {
        match &self.state {
            State::Leaf(_) => None,
            State::Branch(children) => Some(children),
        }
    }

    /// Insert a line into this subtree. Returns false iff the line's
    /// point lies outside this node's volume; this is how the root
    /// rejects out-of-domain records, not a fault.
    ///
    /// A leaf at capacity subdivides before delegating, except at
    /// minimum extent (`half_dim < 2`), where halving would create
    /// zero-extent children: such a leaf keeps accepting records past
    /// capacity instead.
    pub fn insert(&mut self, line: Line, capacity: usize) -> bool {
        if !self.volume.contains(line.pos) {
            trace!(line = %line, node = %self.volume, "line outside node volume");
            return false;
        }

        if let State::Leaf(records) = &mut self.state {
            if records.len() < capacity {
                records.push(line);
                return true;
            }
            if self.volume.half_dim < MIN_SUBDIVIDE_EXTENT {
                debug!(node = %self.volume, "minimum extent reached, leaf grows past capacity");
                records.push(line);
                return true;
            }
            self.subdivide(capacity);
        }

        self.insert_into_children(line, capacity)
    }

    /// Split this leaf into eight children and redistribute its staged
    /// records through the normal insert path. The leaf-to-branch
    /// transition is a single state swap: no partially subdivided node
    /// is ever observable.
    fn subdivide(&mut self, capacity: usize) {
        let half = self.volume.half_dim / 2;
        debug!(node = %self.volume, half, "subdividing");

        let children: [Node; 8] = std::array::from_fn(|i| {
            Node::new(Volume::new(self.volume.center + OCTANT_SIGNS[i] * half, half))
        });

        let staged = std::mem::replace(&mut self.state, State::Branch(Box::new(children)));
        if let State::Leaf(records) = staged {
            for line in records {
                if !self.insert_into_children(line, capacity) {
                    // Odd half-extents leave a one-unit rind the children
                    // do not cover; a staged record there is rejected by
                    // every child, same as an out-of-domain insert.
                    debug!(line = %line, node = %self.volume, "no child accepted staged line");
                }
            }
        }
    }

    /// Delegate to the eight children in fixed octant order, accepting
    /// the first success.
    fn insert_into_children(&mut self, line: Line, capacity: usize) -> bool {
        if let State::Branch(children) = &mut self.state {
            for child in children.iter_mut() {
                if child.insert(line, capacity) {
                    return true;
                }
            }
        }
        false
    }

    /// Collect into `out` every record in this subtree whose point lies
    /// within the closed `window`, pruning subtrees whose volume fails
    /// the open intersection test.
    ///
    /// Known boundary limitation: a window that only touches this
    /// node's face, edge or corner prunes the whole subtree, even if a
    /// stored point sits exactly on the shared boundary.
    pub fn query(&self, window: &Volume, out: &mut Vec<Line>) {
        if !window.intersects(&self.volume) {
            return;
        }
        match &self.state {
            State::Leaf(records) => {
                out.extend(records.iter().filter(|line| window.contains(line.pos)));
            }
            State::Branch(children) => {
                for child in children.iter() {
                    child.query(window, out);
                }
            }
        }
    }

    /// Preorder walk: visit this node's record slice (empty for branch
    /// nodes), then the children in fixed octant order.
    pub fn traverse<F>(&self, visitor: &mut F)
    where
        F: FnMut(&[Line]),
    {
        match &self.state {
            State::Leaf(records) => visitor(records),
            State::Branch(children) => {
                visitor(&[]);
                for child in children.iter() {
                    child.traverse(visitor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Volume {
        Volume::new(IVec3::splat(128), 128)
    }

    #[test]
    fn test_octant_sign_order() {
        // Fixed order: +++, -++, +-+, --+, ++-, -+-, +--, ---
        assert_eq!(OCTANT_SIGNS[0], IVec3::new(1, 1, 1));
        assert_eq!(OCTANT_SIGNS[3], IVec3::new(-1, -1, 1));
        assert_eq!(OCTANT_SIGNS[7], IVec3::new(-1, -1, -1));
        // Each sign combination appears exactly once
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(OCTANT_SIGNS[i], OCTANT_SIGNS[j]);
            }
        }
    }

    #[test]
    fn test_leaf_under_capacity() {
        let mut node = Node::new(domain());
        assert!(node.insert(Line::new(10, 10, 10, 5, 'a'), 4));
        assert!(node.insert(Line::new(20, 20, 20, 5, 'b'), 4));
        assert!(node.is_leaf());
        assert_eq!(node.records().len(), 2);
    }

    #[test]
    fn test_out_of_domain_rejected() {
        let mut node = Node::new(domain());
        assert!(!node.insert(Line::new(300, 0, 0, 1, 'a'), 1));
        assert!(!node.insert(Line::new(0, -1, 0, 1, 'a'), 1));
        assert!(node.is_leaf());
        assert!(node.records().is_empty());
    }

    #[test]
    fn test_subdivision_on_overflow() {
        let mut node = Node::new(domain());
        assert!(node.insert(Line::new(0, 51, 1, 1, 'a'), 1));
        assert!(node.is_leaf());

        // Second insert exceeds capacity 1 and forces the split
        assert!(node.insert(Line::new(2, 4, 15, 2, 'b'), 1));
        assert!(!node.is_leaf());
        assert!(node.records().is_empty());

        let children = node.children().expect("branch must expose children");
        // Child volumes follow the octant ordering
        assert_eq!(children[0].volume(), Volume::new(IVec3::splat(192), 64));
        assert_eq!(children[7].volume(), Volume::new(IVec3::splat(64), 64));
    }

    #[test]
    fn test_subdivision_conserves_records() {
        let mut node = Node::new(domain());
        let lines = [
            Line::new(0, 51, 1, 1, 'a'),
            Line::new(2, 4, 15, 2, 'b'),
            Line::new(0, 0, 15, 2, 'c'),
            Line::new(200, 200, 200, 3, 'd'),
        ];
        for line in lines {
            assert!(node.insert(line, 1));
        }

        let mut seen = Vec::new();
        node.traverse(&mut |records| seen.extend_from_slice(records));
        seen.sort_by_key(|l| (l.pos.x, l.pos.y, l.pos.z));

        let mut expected = lines.to_vec();
        expected.sort_by_key(|l| (l.pos.x, l.pos.y, l.pos.z));
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_leaf_capacity_invariant() {
        let mut node = Node::new(domain());
        for i in 0..32 {
            assert!(node.insert(Line::new(i * 7 % 256, i * 13 % 256, i * 29 % 256, i, 'x'), 2));
        }
        node.traverse(&mut |records| assert!(records.len() <= 2));
    }

    #[test]
    fn test_minimum_extent_grows_leaf() {
        // Tiny domain: half_dim 1 cannot subdivide, so the leaf must
        // keep accepting records past capacity instead of splitting
        // into zero-extent children.
        let mut node = Node::new(Volume::new(IVec3::splat(1), 1));
        for _ in 0..10 {
            assert!(node.insert(Line::new(1, 1, 1, 1, 'a'), 1));
        }
        assert!(node.is_leaf());
        assert_eq!(node.records().len(), 10);
    }

    #[test]
    fn test_query_prunes_touching_window() {
        let mut node = Node::new(Volume::new(IVec3::splat(8), 8));
        assert!(node.insert(Line::new(0, 0, 0, 1, 'a'), 1));

        // Window touching the node's min corner only: open intersection
        // fails, so the point on the shared boundary is not returned.
        let touching = Volume::new(IVec3::splat(-8), 8);
        assert!(touching.contains(IVec3::ZERO));
        let mut out = Vec::new();
        node.query(&touching, &mut out);
        assert!(out.is_empty());
    }
}
