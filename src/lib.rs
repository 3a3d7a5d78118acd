//! A mutable, ordered set of intervals ([`IntervalTreeSet`]) over any
//! totally-ordered type, answering connection and enclosure queries in
//! `O(log n + k)` expected time for `k` matches.
//!
//! Intervals ([`Interval`]) may be closed, open, half-open or unbounded on
//! either side, so point sets such as `[0, 5]`, `(1, 2]` and `(-∞, 10)` can
//! all be stored side by side and queried against each other.
//!
//! ```
//! use intreap::{Interval, IntervalTreeSet};
//!
//! let mut set = IntervalTreeSet::default();
//! set.insert(Interval::closed(5, 10));
//! set.insert(Interval::open(10, 20));
//! set.insert(Interval::at_least(15));
//!
//! // Intervals sharing at least one point with [0, 10].
//! //
//! // The open lower bound of (10, 20) excludes the touching point 10, so
//! // only [5, 10] is connected to the query.
//! let touching: Vec<_> = set.connected(Interval::closed(0, 10)).collect();
//! assert_eq!(touching, [&Interval::closed(5, 10)]);
//!
//! // Intervals containing the point 12.
//! let holding: Vec<_> = set.containing(12).collect();
//! assert_eq!(holding, [&Interval::open(10, 20)]);
//!
//! // Iteration yields intervals ordered by lower bound, then upper bound.
//! let all: Vec<_> = set.iter().collect();
//! assert_eq!(
//!     all,
//!     [
//!         &Interval::closed(5, 10),
//!         &Interval::open(10, 20),
//!         &Interval::at_least(15),
//!     ]
//! );
//! ```
//!
//! # Randomized Balance
//!
//! The set is backed by a treap: a binary search tree keyed by the interval
//! ordering, kept balanced in expectation by rotating nodes according to
//! pseudorandom priorities drawn from a fixed-seed generator. Each node
//! additionally tracks the maximum upper bound within its subtree, letting
//! the query iterators prune entire subtrees that cannot contain a match.

#![warn(missing_docs, rust_2018_idioms)]

mod cursor;
mod interval;
mod iter;
mod node;
#[cfg(test)]
mod test_utils;
mod tree;

pub use cursor::CursorMut;
pub use interval::Interval;
pub use iter::{IntoIter, Iter};
pub use tree::IntervalTreeSet;
