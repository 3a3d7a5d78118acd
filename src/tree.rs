use std::{cmp::Ordering, fmt};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    cursor::CursorMut,
    interval::{cmp_upper, Interval},
    iter::{ConnectedPruner, EnclosedByPruner, EnclosingPruner, IntoIter, Iter, PruningIter},
    node::{Link, Node, NodeId},
};

/// Seed for the priority source.
///
/// Fixed so that tree shapes, and therefore lookup costs, are reproducible
/// from run to run.
const PRIORITY_SEED: u64 = 31_459_265_358;

/// An [`IntervalTreeSet`] stores a set of [`Interval`]s, enabling efficient
/// lookup of the stored intervals that are connected to, enclosed by, or
/// enclosing a query interval, or that contain a query point.
///
/// Intervals are held at most once each: inserting an interval that is
/// already present reports "not modified", as does removing an absent one.
/// Iteration yields intervals in their canonical order (by lower bound,
/// tie-braked with the upper bound) while lookups yield matches in an
/// unspecified order.
///
/// # Randomized Balance
///
/// The set is backed by a treap. Each node carries a pseudorandom priority
/// drawn at insertion from a fixed-seed generator, and rotations keep
/// parent priorities no larger than child priorities. This holds the
/// expected tree depth logarithmic in the number of stored intervals
/// without any per-node balance bookkeeping, making inserts, removals and
/// membership tests `O(log n)` expected, and interval lookups
/// `O(log n + k)` expected for `k` matches.
///
/// # Node Metadata & `C: Clone`
///
/// Tree nodes maintain the maximum upper bound of their subtree to enable
/// pruning of entire subtrees during lookups. This metadata requires the
/// endpoint type `C` to implement [`Clone`], which may be invoked during
/// mutation. If cloning `C` is prohibitively expensive consider a
/// reference-counted endpoint type (such as [`Arc`] or [`Rc`]).
///
/// # Iteration & Mutation
///
/// [`iter`](Self::iter) borrows the set shared, so the compiler rejects
/// any mutation while an iterator is live. To remove intervals during an
/// ordered traversal, use [`cursor_mut`](Self::cursor_mut).
///
/// [`Arc`]: std::sync::Arc
/// [`Rc`]: std::rc::Rc
#[derive(Clone)]
pub struct IntervalTreeSet<C> {
    /// Node storage.
    ///
    /// All tree and thread links are indices into this arena; a removed
    /// node empties its slot, which is reused by later insertions.
    slots: Vec<Option<Node<C>>>,
    free: Vec<NodeId>,

    root: Option<NodeId>,

    /// Sentinel of the circular canonical-order thread: `next` is the
    /// minimum stored interval, `prev` the maximum.
    header: Link,

    len: usize,

    /// Priority source for newly created nodes.
    rng: SmallRng,
}

impl<C> Default for IntervalTreeSet<C> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            header: Link::default(),
            len: 0,
            rng: SmallRng::seed_from_u64(PRIORITY_SEED),
        }
    }
}

impl<C> IntervalTreeSet<C> {
    /// Construct an empty [`IntervalTreeSet`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of intervals stored in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set stores no intervals.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop all intervals from the set.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.header = Link::default();
        self.len = 0;
    }

    /// Iterate over references of all intervals in the set, in canonical
    /// order.
    ///
    /// The returned [`Iterator`] is double-ended and exact-size.
    pub fn iter(&self) -> Iter<'_, C> {
        Iter::new(&self.slots, self.header, self.len)
    }

    /// The smallest stored interval in canonical order, if any.
    pub fn first(&self) -> Option<&Interval<C>> {
        self.header.next.map(|id| self.node(id).interval())
    }

    /// The largest stored interval in canonical order, if any.
    pub fn last(&self) -> Option<&Interval<C>> {
        self.header.prev.map(|id| self.node(id).interval())
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<C> {
        self.slots[id.index()].as_ref().unwrap()
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        self.slots[id.index()].as_mut().unwrap()
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[Option<Node<C>>] {
        &self.slots
    }

    pub(crate) fn thread_front(&self) -> Option<NodeId> {
        self.header.next
    }

    /// Point `pred`'s thread successor at `succ` and vice versa, with
    /// `None` standing for the header.
    fn link(&mut self, pred: Option<NodeId>, succ: Option<NodeId>) {
        match pred {
            Some(id) => self.node_mut(id).link.next = succ,
            None => self.header.next = succ,
        }
        match succ {
            Some(id) => self.node_mut(id).link.prev = pred,
            None => self.header.prev = pred,
        }
    }

    /// Splice `new` into the thread immediately before `pivot`.
    fn splice_before(&mut self, pivot: NodeId, new: NodeId) {
        let prev = self.node(pivot).link.prev;
        self.link(prev, Some(new));
        self.link(Some(new), Some(pivot));
    }

    /// Splice `new` into the thread immediately after `pivot`.
    fn splice_after(&mut self, pivot: NodeId, new: NodeId) {
        let next = self.node(pivot).link.next;
        self.link(Some(new), next);
        self.link(Some(pivot), Some(new));
    }

    /// Remove `id` from the thread by connecting its two neighbours.
    fn unlink(&mut self, id: NodeId) {
        let Link { prev, next } = self.node(id).link;
        self.link(prev, next);
    }
}

impl<C> IntervalTreeSet<C>
where
    C: Ord,
{
    /// Returns true if the set holds an interval equal to `interval`.
    pub fn contains(&self, interval: &Interval<C>) -> bool {
        self.get(interval).is_some()
    }

    /// Return a reference to the stored interval equal to `interval`, if
    /// any.
    pub fn get(&self, interval: &Interval<C>) -> Option<&Interval<C>> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = match interval.cmp(node.interval()) {
                Ordering::Equal => return Some(node.interval()),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Return all stored intervals that share at least one point with
    /// `query`.
    ///
    /// The diagram below shows a stored interval `X` connected to the
    /// query range `Y`:
    ///
    /// ```text
    ///                           X
    ///                   ■■■■■■■■■■■■■■■■■
    ///
    ///                               ■■■■■■■■■■■■■■■■■
    ///                                       Y
    /// ```
    ///
    /// An interval touching the query at a single endpoint matches only
    /// when both sides include that endpoint (see
    /// [`Interval::is_connected`]).
    ///
    /// Matches are yielded in an unspecified order.
    pub fn connected(&self, query: Interval<C>) -> impl Iterator<Item = &Interval<C>> + '_ {
        PruningIter::new(&self.slots, self.root, query, ConnectedPruner)
    }

    /// Return all stored intervals lying entirely within `query`.
    ///
    /// The diagram below shows a stored interval `X` enclosed by the query
    /// range `Y`:
    ///
    /// ```text
    ///                                X
    ///                           ■■■■■■■■■■■
    ///
    ///                        ■■■■■■■■■■■■■■■■■
    ///                                Y
    /// ```
    ///
    /// Matches are yielded in an unspecified order.
    pub fn enclosed_by(&self, query: Interval<C>) -> impl Iterator<Item = &Interval<C>> + '_ {
        PruningIter::new(&self.slots, self.root, query, EnclosedByPruner)
    }

    /// Return all stored intervals that contain the whole of `query`.
    ///
    /// The diagram below shows a stored interval `X` enclosing the query
    /// range `Y`:
    ///
    /// ```text
    ///                                X
    ///                        ■■■■■■■■■■■■■■■■■
    ///
    ///                           ■■■■■■■■■■■
    ///                                Y
    /// ```
    ///
    /// Matches are yielded in an unspecified order.
    pub fn enclosing(&self, query: Interval<C>) -> impl Iterator<Item = &Interval<C>> + '_ {
        PruningIter::new(&self.slots, self.root, query, EnclosingPruner)
    }
}

impl<C> IntervalTreeSet<C>
where
    C: Ord + Clone,
{
    /// Insert an interval into the set.
    ///
    /// Returns true if the interval was newly inserted, or false if an
    /// equal interval was already present (the set is unchanged).
    pub fn insert(&mut self, interval: Interval<C>) -> bool {
        let inserted = match self.root {
            None => {
                let id = self.alloc(interval);
                self.link(None, Some(id));
                self.link(Some(id), None);
                self.root = Some(id);
                true
            }
            Some(root) => {
                let mut inserted = false;
                let new_root = self.insert_at(root, interval, &mut inserted);
                self.root = Some(new_root);
                inserted
            }
        };

        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove the interval equal to `interval` from the set.
    ///
    /// Returns false if no such interval was present.
    pub fn remove(&mut self, interval: &Interval<C>) -> bool {
        self.take(interval).is_some()
    }

    /// Remove and return the stored interval equal to `interval`, if any.
    pub fn take(&mut self, interval: &Interval<C>) -> Option<Interval<C>> {
        let root = self.root?;
        let (new_root, removed) = self.remove_at(root, interval);
        self.root = new_root;

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Return all stored intervals that contain the point `value`.
    ///
    /// Equivalent to [`enclosing`](Self::enclosing) the singleton interval
    /// `[value, value]`.
    ///
    /// Matches are yielded in an unspecified order.
    pub fn containing(&self, value: C) -> impl Iterator<Item = &Interval<C>> + '_ {
        self.enclosing(Interval::singleton(value))
    }

    /// Return a cursor over the intervals in canonical order, supporting
    /// removal of the most recently yielded interval.
    ///
    /// The cursor borrows the set exclusively, so it is the only way to
    /// remove intervals mid-traversal.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, C> {
        CursorMut::new(self)
    }

    /// Retain only the intervals for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Interval<C>) -> bool,
    {
        let mut cursor = self.cursor_mut();
        while let Some(interval) = cursor.next() {
            if !keep(interval) {
                cursor.remove_current();
            }
        }
    }

    /// Allocate a node for `interval` with a fresh priority, reusing a
    /// free slot when one exists.
    fn alloc(&mut self, interval: Interval<C>) -> NodeId {
        let node = Node::new(interval, self.rng.gen());
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.index()].is_none());
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Empty the slot of `id`, returning the node it held.
    fn release(&mut self, id: NodeId) -> Node<C> {
        let node = self.slots[id.index()].take().unwrap();
        self.free.push(id);
        node
    }

    /// Insert `interval` into the subtree rooted at `id`, returning the
    /// new root of that subtree.
    ///
    /// A new node is spliced into the order thread next to the node that
    /// becomes its parent: a fresh left child is the parent's in-order
    /// predecessor, a fresh right child its in-order successor. On the way
    /// back up each touched node refreshes its subtree maximum and rotates
    /// the modified child above itself when the child drew a smaller
    /// priority.
    fn insert_at(&mut self, id: NodeId, interval: Interval<C>, inserted: &mut bool) -> NodeId {
        match interval.cmp(self.node(id).interval()) {
            Ordering::Equal => {
                *inserted = false;
                id
            }
            Ordering::Less => {
                match self.node(id).left {
                    Some(left) => {
                        let new_left = self.insert_at(left, interval, inserted);
                        self.node_mut(id).left = Some(new_left);
                    }
                    None => {
                        let left = self.alloc(interval);
                        self.splice_before(id, left);
                        self.node_mut(id).left = Some(left);
                        *inserted = true;
                    }
                }
                self.update_max_upper(id);

                let left = self.node(id).left.unwrap();
                if self.node(left).priority < self.node(id).priority {
                    self.rotate_right(id)
                } else {
                    id
                }
            }
            Ordering::Greater => {
                match self.node(id).right {
                    Some(right) => {
                        let new_right = self.insert_at(right, interval, inserted);
                        self.node_mut(id).right = Some(new_right);
                    }
                    None => {
                        let right = self.alloc(interval);
                        self.splice_after(id, right);
                        self.node_mut(id).right = Some(right);
                        *inserted = true;
                    }
                }
                self.update_max_upper(id);

                let right = self.node(id).right.unwrap();
                if self.node(right).priority < self.node(id).priority {
                    self.rotate_left(id)
                } else {
                    id
                }
            }
        }
    }

    /// Remove `interval` from the subtree rooted at `id`, returning the
    /// new root of that subtree and the extracted interval, if found.
    ///
    /// The hit node is unlinked from the order thread and replaced by the
    /// merge of its children; every node whose child slot is re-pointed on
    /// the way back up refreshes its subtree maximum.
    fn remove_at(&mut self, id: NodeId, interval: &Interval<C>) -> (Option<NodeId>, Option<Interval<C>>) {
        match interval.cmp(self.node(id).interval()) {
            Ordering::Equal => {
                self.unlink(id);
                let (left, right) = {
                    let n = self.node(id);
                    (n.left, n.right)
                };
                let merged = self.merge(left, right);
                (merged, Some(self.release(id).into_interval()))
            }
            Ordering::Less => {
                let Some(left) = self.node(id).left else {
                    return (Some(id), None);
                };
                let (new_left, removed) = self.remove_at(left, interval);
                self.node_mut(id).left = new_left;
                if removed.is_some() {
                    self.update_max_upper(id);
                }
                (Some(id), removed)
            }
            Ordering::Greater => {
                let Some(right) = self.node(id).right else {
                    return (Some(id), None);
                };
                let (new_right, removed) = self.remove_at(right, interval);
                self.node_mut(id).right = new_right;
                if removed.is_some() {
                    self.update_max_upper(id);
                }
                (Some(id), removed)
            }
        }
    }

    /// Merge two subtrees, every interval of `left` preceding every
    /// interval of `right`, into one subtree rooted at whichever root has
    /// the smaller priority.
    fn merge(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> Option<NodeId> {
        let (left, right) = match (left, right) {
            (None, v) | (v, None) => return v,
            (Some(left), Some(right)) => (left, right),
        };

        if self.node(left).priority <= self.node(right).priority {
            let merged = self.merge(self.node(left).right, Some(right));
            self.node_mut(left).right = merged;
            self.update_max_upper(left);
            Some(left)
        } else {
            let merged = self.merge(Some(left), self.node(right).left);
            self.node_mut(right).left = merged;
            self.update_max_upper(right);
            Some(right)
        }
    }

    /// Left rotate the subtree rooted at `x` around its right child `P`,
    /// returning the new subtree root.
    ///
    /// ```text
    ///      x
    ///     / \                               P
    ///    1   P         Rotate Left        /   \
    ///       / \      --------------->    x     y
    ///      2   y                        / \   / \
    ///         / \                      1   2 3   4
    ///        3   4
    /// ```
    ///
    /// The subtree maximum is refreshed on the demoted `x` first, then on
    /// the promoted `P`.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child (cannot be rotated).
    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let p = self.node_mut(x).right.take().unwrap();
        let mid = self.node_mut(p).left.take();

        self.node_mut(x).right = mid;
        self.update_max_upper(x);

        self.node_mut(p).left = Some(x);
        self.update_max_upper(p);

        debug_assert!(self.node(p).priority <= self.node(x).priority);
        p
    }

    /// Right rotate the subtree rooted at `y` around its left child `P`,
    /// returning the new subtree root.
    ///
    /// ```text
    ///          y
    ///         / \                           P
    ///        P   4     Rotate Right       /   \
    ///       / \      --------------->    x     y
    ///      x   3                        / \   / \
    ///     / \                          1   2 3   4
    ///    1   2
    /// ```
    ///
    /// The subtree maximum is refreshed on the demoted `y` first, then on
    /// the promoted `P`.
    ///
    /// # Panics
    ///
    /// Panics if `y` has no left child (cannot be rotated).
    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let p = self.node_mut(y).left.take().unwrap();
        let mid = self.node_mut(p).right.take();

        self.node_mut(y).left = mid;
        self.update_max_upper(y);

        self.node_mut(p).right = Some(y);
        self.update_max_upper(p);

        debug_assert!(self.node(p).priority <= self.node(y).priority);
        p
    }

    /// Recompute the subtree maximum of `id` from its own interval and the
    /// maxima of its children.
    fn update_max_upper(&mut self, id: NodeId) {
        let (left, right) = {
            let n = self.node(id);
            (n.left, n.right)
        };

        let mut max = self.node(id).interval().upper().cloned();
        for child in [left, right].into_iter().flatten() {
            let child_max = &self.node(child).max_upper;
            if cmp_upper(child_max.as_ref(), max.as_ref()).is_gt() {
                max = child_max.clone();
            }
        }

        self.node_mut(id).max_upper = max;
    }
}

/// Take ownership of this [`IntervalTreeSet`] instance and iterate over
/// all intervals stored in it, in canonical order.
impl<C> IntoIterator for IntervalTreeSet<C> {
    type Item = Interval<C>;
    type IntoIter = IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.header.next, self.len)
    }
}

impl<'a, C> IntoIterator for &'a IntervalTreeSet<C> {
    type Item = &'a Interval<C>;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C> Extend<Interval<C>> for IntervalTreeSet<C>
where
    C: Ord + Clone,
{
    fn extend<I: IntoIterator<Item = Interval<C>>>(&mut self, iter: I) {
        for interval in iter {
            self.insert(interval);
        }
    }
}

impl<C> FromIterator<Interval<C>> for IntervalTreeSet<C>
where
    C: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = Interval<C>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Set equality: same intervals, regardless of tree shape or insertion
/// order.
impl<C> PartialEq for IntervalTreeSet<C>
where
    C: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<C> Eq for IntervalTreeSet<C> where C: Ord {}

impl<C> fmt::Debug for IntervalTreeSet<C>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
