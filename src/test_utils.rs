use std::{
    fmt::{Display, Write},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use proptest::prelude::*;

use crate::{
    interval::Interval,
    iter::PruningOracle,
    node::{Node, NodeId},
    tree::IntervalTreeSet,
};

/// Largest endpoint of the small test domain `0..=ENDPOINT_MAX`.
pub(crate) const ENDPOINT_MAX: i32 = 5;

/// Every well-formed interval with endpoints drawn from `0..=max`: the
/// unbounded interval, the four half-bounded kinds per endpoint, and the
/// four bounded kinds per endpoint pair (empty combinations excluded).
pub(crate) fn all_intervals(max: i32) -> Vec<Interval<i32>> {
    let mut intervals = vec![Interval::all()];

    for i in 0..=max {
        intervals.push(Interval::less_than(i));
        intervals.push(Interval::at_most(i));
        intervals.push(Interval::at_least(i));
        intervals.push(Interval::greater_than(i));
    }

    for i in 0..=max {
        for j in i..=max {
            intervals.push(Interval::closed(i, j));
        }
        for j in (i + 1)..=max {
            intervals.push(Interval::open(i, j));
            intervals.push(Interval::closed_open(i, j));
            intervals.push(Interval::open_closed(i, j));
        }
    }

    intervals
}

/// Generate intervals drawn from the exhaustive bound-kind × endpoint
/// family over the small test domain.
///
/// The small domain encourages collisions, touches and enclosures between
/// generated intervals.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<i32>> {
    prop::sample::select(all_intervals(ENDPOINT_MAX))
}

/// Linear-feedback shift register based PRNG.
///
/// Generates 65,535 unique values before cycling.
#[derive(Debug, Clone)]
pub(crate) struct Lfsr(u16);

impl Default for Lfsr {
    fn default() -> Self {
        Self(42)
    }
}

impl Lfsr {
    #[allow(clippy::should_implement_trait)]
    pub(crate) fn next(&mut self) -> u16 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb == 1 {
            self.0 ^= 0xD008;
        }
        assert_ne!(self.0, 42, "LFSR rollover");
        self.0
    }
}

/// A [`PruningOracle`] decorator counting the nodes whose subtree gate was
/// evaluated, quantifying how much of the tree a lookup walked.
#[derive(Debug)]
pub(crate) struct NodeFilterCount<T> {
    inner: T,
    visits: Arc<AtomicUsize>,
}

impl<T> NodeFilterCount<T> {
    pub(crate) fn new(inner: T, visits: Arc<AtomicUsize>) -> Self {
        Self { inner, visits }
    }
}

impl<C, T> PruningOracle<C> for NodeFilterCount<T>
where
    C: Ord,
    T: PruningOracle<C>,
{
    fn visit(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        self.visits.fetch_add(1, Ordering::Relaxed);
        self.inner.visit(n, query)
    }

    fn descend_left(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        self.inner.descend_left(n, query)
    }

    fn descend_right(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        self.inner.descend_right(n, query)
    }

    fn filter_yield(&self, n: &Node<C>, query: &Interval<C>) -> bool {
        self.inner.filter_yield(n, query)
    }
}

/// Render the tree shape as graphviz dot, labelling each node with its
/// interval and priority.
#[allow(unused)]
pub(crate) fn print_dot<C>(t: &IntervalTreeSet<C>) -> String
where
    C: Display + Ord,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, "node [shape=record];").unwrap();
    if let Some(root) = t.root() {
        recurse(t, root, &mut buf);
    }
    writeln!(buf, "}}").unwrap();

    buf
}

#[allow(unused)]
fn recurse<C, W>(t: &IntervalTreeSet<C>, id: NodeId, buf: &mut W)
where
    C: Display + Ord,
    W: Write,
{
    let n = t.node(id);
    writeln!(
        buf,
        r#"n{} [label="{} | {}"];"#,
        id.index(),
        n.interval(),
        n.priority
    )
    .unwrap();

    for child in [n.left, n.right] {
        match child {
            Some(child) => {
                writeln!(buf, "n{} -> n{};", id.index(), child.index()).unwrap();
                recurse(t, child, buf);
            }
            None => {
                writeln!(buf, "null_n{} [shape=point,style=invis];", id.index()).unwrap();
                writeln!(buf, "n{} -> null_n{} [style=invis];", id.index(), id.index()).unwrap();
            }
        };
    }
}
