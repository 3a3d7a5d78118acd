use crate::{
    interval::Interval,
    node::{Node, NodeId},
};

/// The pruning decisions taken at each node of a lookup walk.
///
/// Implementations encode, per query kind, which subtrees can still hold a
/// match and which visited nodes satisfy the query.
pub(crate) trait PruningOracle<C> {
    /// Returns true when the subtree rooted at `n` may hold a match and
    /// should be explored at all.
    fn visit(&self, n: &Node<C>, query: &Interval<C>) -> bool;

    /// Returns true when the left subtree of a visited `n` should be
    /// descended into.
    fn descend_left(&self, n: &Node<C>, query: &Interval<C>) -> bool;

    /// Returns true when the right subtree of a visited `n` should be
    /// descended into.
    fn descend_right(&self, n: &Node<C>, query: &Interval<C>) -> bool;

    /// Returns true if `n` matches the query and should be yielded to the
    /// caller.
    fn filter_yield(&self, n: &Node<C>, query: &Interval<C>) -> bool;
}

/// An [`Iterator`] that performs a depth-first walk of the tree, keeping a
/// stack of pending subtree roots and yielding the intervals that match a
/// pruning predicate.
///
/// Yield order follows the walk and is unspecified to callers.
#[derive(Debug)]
pub(crate) struct PruningIter<'a, C, T> {
    slots: &'a [Option<Node<C>>],
    stack: Vec<NodeId>,
    query: Interval<C>,
    pruner: T,
}

impl<'a, C, T> PruningIter<'a, C, T>
where
    C: Ord,
    T: PruningOracle<C>,
{
    pub(crate) fn new(
        slots: &'a [Option<Node<C>>],
        root: Option<NodeId>,
        query: Interval<C>,
        pruner: T,
    ) -> Self {
        Self {
            slots,
            stack: root.into_iter().collect(),
            query,
            pruner,
        }
    }
}

impl<'a, C, T> Iterator for PruningIter<'a, C, T>
where
    C: Ord,
    T: PruningOracle<C>,
{
    type Item = &'a Interval<C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let n: &'a Node<C> = self.slots[id.index()].as_ref().unwrap();

            if !self.pruner.visit(n, &self.query) {
                // Prune this node and both subtrees from the search.
                continue;
            }

            // Queue the children that may still hold matches.
            if let Some(left) = n.left {
                if self.pruner.descend_left(n, &self.query) {
                    self.stack.push(left);
                }
            }
            if let Some(right) = n.right {
                if self.pruner.descend_right(n, &self.query) {
                    self.stack.push(right);
                }
            }

            // Yield this node if it satisfies the pruning predicate.
            if self.pruner.filter_yield(n, &self.query) {
                return Some(n.interval());
            }
        }

        None
    }
}
