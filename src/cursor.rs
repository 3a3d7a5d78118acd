use crate::{interval::Interval, node::NodeId, tree::IntervalTreeSet};

/// A cursor over the intervals of an [`IntervalTreeSet`] in canonical
/// order, supporting removal of the most recently yielded interval.
///
/// A [`CursorMut`] borrows its set exclusively, so the set cannot change
/// underneath it: removal through the cursor is the only mutation possible
/// while it exists, and traversal always resumes at the successor of the
/// removed interval.
///
/// Constructed by [`IntervalTreeSet::cursor_mut`].
///
/// ```
/// use intreap::{Interval, IntervalTreeSet};
///
/// let mut set: IntervalTreeSet<_> =
///     [Interval::closed(0, 1), Interval::closed(2, 3)].into_iter().collect();
///
/// let mut cursor = set.cursor_mut();
/// while let Some(interval) = cursor.next() {
///     if interval.contains(&2) {
///         cursor.remove_current();
///     }
/// }
///
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug)]
pub struct CursorMut<'a, C> {
    tree: &'a mut IntervalTreeSet<C>,

    /// The next thread position to yield, `None` once back at the header.
    next: Option<NodeId>,

    /// The most recently yielded node, cleared by removal.
    current: Option<NodeId>,
}

impl<'a, C> CursorMut<'a, C>
where
    C: Ord + Clone,
{
    pub(crate) fn new(tree: &'a mut IntervalTreeSet<C>) -> Self {
        let next = tree.thread_front();
        Self {
            tree,
            next,
            current: None,
        }
    }

    /// Advance the cursor, returning a reference to the next interval in
    /// canonical order, or [`None`] once the set is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Interval<C>> {
        let id = self.next?;
        self.next = self.tree.node(id).link.next;
        self.current = Some(id);
        Some(self.tree.node(id).interval())
    }

    /// Remove the interval most recently yielded by [`next`](Self::next)
    /// from the set, returning it.
    ///
    /// Returns [`None`] if `next` has not been called yet, or if the
    /// current interval was already removed.
    pub fn remove_current(&mut self) -> Option<Interval<C>> {
        let id = self.current.take()?;
        let interval = self.tree.node(id).interval().clone();
        self.tree.take(&interval)
    }
}
