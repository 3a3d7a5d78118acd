use crate::{
    interval::{cmp_lower, cmp_lower_to_upper, cmp_upper, Interval},
    node::Node,
};

use super::pruning_iter::PruningOracle;

/// Selects stored intervals that share at least one point with the query.
#[derive(Debug)]
pub(crate) struct ConnectedPruner;

impl<C> PruningOracle<C> for ConnectedPruner
where
    C: Ord,
{
    fn visit(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        // The subtree can only hold a match while the query starts at or
        // before the largest upper bound stored beneath `n`.
        cmp_lower_to_upper(query.lower(), n.max_upper.as_ref()).is_le()
    }

    fn descend_left(&self, _n: &Node<C>, _query: &Interval<C>) -> bool {
        true
    }

    fn descend_right(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        // Everything to the right starts at or after `n` does; once `n`
        // itself starts past the end of the query, nothing there can touch
        // the query.
        cmp_lower_to_upper(n.interval().lower(), query.upper()).is_le()
    }

    fn filter_yield(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        n.interval().is_connected(query)
    }
}

/// Selects stored intervals lying entirely within the query.
#[derive(Debug)]
pub(crate) struct EnclosedByPruner;

impl<C> PruningOracle<C> for EnclosedByPruner
where
    C: Ord,
{
    fn visit(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        cmp_lower_to_upper(query.lower(), n.max_upper.as_ref()).is_le()
    }

    fn descend_left(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        // Intervals to the left start before `n` does; once `n` starts
        // before the query, so does everything on the left, and none of it
        // can lie within the query.
        cmp_lower(query.lower(), n.interval().lower()).is_le()
    }

    fn descend_right(&self, _n: &Node<C>, _query: &Interval<C>) -> bool {
        true
    }

    fn filter_yield(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        query.encloses(n.interval())
    }
}

/// Selects stored intervals that contain the whole query.
#[derive(Debug)]
pub(crate) struct EnclosingPruner;

impl<C> PruningOracle<C> for EnclosingPruner
where
    C: Ord,
{
    fn visit(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        // An enclosing interval must end at or after the query ends.
        cmp_upper(query.upper(), n.max_upper.as_ref()).is_le()
    }

    fn descend_left(&self, _n: &Node<C>, _query: &Interval<C>) -> bool {
        true
    }

    fn descend_right(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        // Intervals to the right start after `n` does; once `n` starts
        // after the query, nothing on the right can start early enough to
        // enclose it.
        cmp_lower(n.interval().lower(), query.lower()).is_le()
    }

    fn filter_yield(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        n.interval().encloses(query)
    }
}
