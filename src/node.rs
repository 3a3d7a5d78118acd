use std::ops::Bound;

use crate::interval::Interval;

/// Index of a node slot within the tree's backing arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A pair of neighbour pointers in the canonical-order thread.
///
/// `None` denotes the thread header, the sentinel owned by the tree value
/// itself, which closes the circular list on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Link {
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<C> {
    /// Child node pointers into the arena.
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// This node's neighbours in the canonical-order thread.
    ///
    /// Maintained only when a node is created or destroyed; rotations
    /// preserve in-order positions and never touch the thread.
    pub(crate) link: Link,

    /// Min-heap key drawn from the tree's priority source at creation.
    ///
    /// Immutable for the node's lifetime. Rotating the smaller priority
    /// above the larger keeps the tree depth logarithmic in expectation.
    pub(crate) priority: u32,

    /// The maximum upper bound of all intervals in the subtree rooted at
    /// this node, under the upper-bound ordering.
    ///
    /// Recomputed on every structural change to the subtree; lookups use
    /// it to prune subtrees that cannot hold a match.
    pub(crate) max_upper: Bound<C>,

    interval: Interval<C>,
}

impl<C> Node<C> {
    pub(crate) fn new(interval: Interval<C>, priority: u32) -> Self
    where
        C: Clone,
    {
        Self {
            max_upper: interval.upper().cloned(),
            interval,
            priority,
            left: None,
            right: None,
            link: Link::default(),
        }
    }

    pub(crate) fn interval(&self) -> &Interval<C> {
        &self.interval
    }

    /// Explode this [`Node`] into the [`Interval`] it stores.
    pub(crate) fn into_interval(self) -> Interval<C> {
        self.interval
    }
}
