use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::{Bound, RangeBounds},
};

/// A totally-ordered, non-empty interval over `C`, bounded on each side by a
/// closed endpoint, an open endpoint, or nothing at all.
///
/// An [`Interval`] is ordered by its lower bound and tie-braked with the
/// upper bound. Among lower bounds an absent bound sorts before any present
/// one and a closed endpoint before an open one; among upper bounds a
/// present bound sorts before an absent one and an open endpoint before a
/// closed one. Two intervals are equal exactly when both bounds match in
/// endpoint and kind.
///
/// # Well-formed Intervals
///
/// Every constructor rejects intervals that would contain no points: the
/// lower endpoint must not exceed the upper endpoint, and the endpoints may
/// only coincide when both bounds are closed (the singleton `[v, v]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval<C> {
    lower: Bound<C>,
    upper: Bound<C>,
}

impl<C> Interval<C> {
    /// Construct an interval from explicit [`Bound`]s.
    ///
    /// # Panics
    ///
    /// Panics if the bounds describe an empty interval (see
    /// [well-formed intervals](Interval#well-formed-intervals)).
    pub fn new(lower: Bound<C>, upper: Bound<C>) -> Self
    where
        C: Ord,
    {
        match (&lower, &upper) {
            (Bound::Included(lo), Bound::Included(up)) => {
                assert!(lo <= up, "interval lower endpoint exceeds upper endpoint");
            }
            (
                Bound::Included(lo) | Bound::Excluded(lo),
                Bound::Included(up) | Bound::Excluded(up),
            ) => {
                assert!(lo < up, "interval with an open bound contains no points");
            }
            _ => {}
        }

        Self { lower, upper }
    }

    /// The interval `[lower, upper]`, including both endpoints.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    pub fn closed(lower: C, upper: C) -> Self
    where
        C: Ord,
    {
        Self::new(Bound::Included(lower), Bound::Included(upper))
    }

    /// The interval `(lower, upper)`, excluding both endpoints.
    ///
    /// # Panics
    ///
    /// Panics unless `lower < upper`.
    pub fn open(lower: C, upper: C) -> Self
    where
        C: Ord,
    {
        Self::new(Bound::Excluded(lower), Bound::Excluded(upper))
    }

    /// The interval `[lower, upper)`.
    ///
    /// # Panics
    ///
    /// Panics unless `lower < upper`.
    pub fn closed_open(lower: C, upper: C) -> Self
    where
        C: Ord,
    {
        Self::new(Bound::Included(lower), Bound::Excluded(upper))
    }

    /// The interval `(lower, upper]`.
    ///
    /// # Panics
    ///
    /// Panics unless `lower < upper`.
    pub fn open_closed(lower: C, upper: C) -> Self
    where
        C: Ord,
    {
        Self::new(Bound::Excluded(lower), Bound::Included(upper))
    }

    /// The interval `[lower, +∞)`.
    pub fn at_least(lower: C) -> Self {
        Self {
            lower: Bound::Included(lower),
            upper: Bound::Unbounded,
        }
    }

    /// The interval `(lower, +∞)`.
    pub fn greater_than(lower: C) -> Self {
        Self {
            lower: Bound::Excluded(lower),
            upper: Bound::Unbounded,
        }
    }

    /// The interval `(-∞, upper]`.
    pub fn at_most(upper: C) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Included(upper),
        }
    }

    /// The interval `(-∞, upper)`.
    pub fn less_than(upper: C) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(upper),
        }
    }

    /// The interval `(-∞, +∞)` containing every point.
    pub fn all() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    /// The interval `[value, value]` containing exactly one point.
    pub fn singleton(value: C) -> Self
    where
        C: Clone,
    {
        Self {
            lower: Bound::Included(value.clone()),
            upper: Bound::Included(value),
        }
    }

    /// The lower bound.
    pub fn lower(&self) -> Bound<&C> {
        self.lower.as_ref()
    }

    /// The upper bound.
    pub fn upper(&self) -> Bound<&C> {
        self.upper.as_ref()
    }

    /// Returns true unless the interval extends to -∞.
    pub fn has_lower_bound(&self) -> bool {
        !matches!(self.lower, Bound::Unbounded)
    }

    /// Returns true unless the interval extends to +∞.
    pub fn has_upper_bound(&self) -> bool {
        !matches!(self.upper, Bound::Unbounded)
    }

    /// The lower endpoint, if the interval has one.
    pub fn lower_endpoint(&self) -> Option<&C> {
        match &self.lower {
            Bound::Included(v) | Bound::Excluded(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// The upper endpoint, if the interval has one.
    pub fn upper_endpoint(&self) -> Option<&C> {
        match &self.upper {
            Bound::Included(v) | Bound::Excluded(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// Returns true if `value` lies within this interval.
    pub fn contains(&self, value: &C) -> bool
    where
        C: Ord,
    {
        let above_lower = match &self.lower {
            Bound::Included(lo) => lo <= value,
            Bound::Excluded(lo) => lo < value,
            Bound::Unbounded => true,
        };
        let below_upper = match &self.upper {
            Bound::Included(up) => value <= up,
            Bound::Excluded(up) => value < up,
            Bound::Unbounded => true,
        };

        above_lower && below_upper
    }

    /// Returns true if every point of `other` also lies within `self`.
    ///
    /// ```text
    ///                        self
    ///                ■■■■■■■■■■■■■■■■■
    ///
    ///                   ■■■■■■■■■■■
    ///                      other
    /// ```
    ///
    /// Enclosure is reflexive, and bound kinds matter at shared endpoints:
    /// `[0, 5]` encloses `(0, 5)` but not the other way around.
    pub fn encloses(&self, other: &Self) -> bool
    where
        C: Ord,
    {
        cmp_lower(self.lower(), other.lower()).is_le()
            && cmp_upper(other.upper(), self.upper()).is_le()
    }

    /// Returns true if `self` and `other` share at least one point.
    ///
    /// ```text
    ///                     self
    ///             ■■■■■■■■■■■■■■■■■
    ///
    ///                         ■■■■■■■■■■■■■■■■■
    ///                               other
    /// ```
    ///
    /// Two intervals touching at a single endpoint are connected only when
    /// both of them include it:
    ///
    /// | touch at `v`        | connected |
    /// |---------------------|-----------|
    /// | `[0, v]` / `[v, 9]` | yes       |
    /// | `[0, v]` / `(v, 9]` | no        |
    /// | `[0, v)` / `[v, 9]` | no        |
    /// | `[0, v)` / `(v, 9]` | no        |
    pub fn is_connected(&self, other: &Self) -> bool
    where
        C: Ord,
    {
        cmp_lower_to_upper(self.lower(), other.upper()).is_lt()
            && cmp_lower_to_upper(other.lower(), self.upper()).is_lt()
    }
}

impl<C> PartialOrd for Interval<C>
where
    C: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Interval<C>
where
    C: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_lower(self.lower(), other.lower()).then_with(|| cmp_upper(self.upper(), other.upper()))
    }
}

impl<C> RangeBounds<C> for Interval<C> {
    fn start_bound(&self) -> Bound<&C> {
        self.lower.as_ref()
    }

    fn end_bound(&self) -> Bound<&C> {
        self.upper.as_ref()
    }
}

impl<C> From<std::ops::Range<C>> for Interval<C>
where
    C: Ord,
{
    /// Converts `start..end` into `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    fn from(value: std::ops::Range<C>) -> Self {
        Self::closed_open(value.start, value.end)
    }
}

impl<C> From<std::ops::RangeInclusive<C>> for Interval<C>
where
    C: Ord,
{
    /// Converts `start..=end` into `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    fn from(value: std::ops::RangeInclusive<C>) -> Self {
        let (start, end) = value.into_inner();
        Self::closed(start, end)
    }
}

impl<C> From<std::ops::RangeFrom<C>> for Interval<C> {
    fn from(value: std::ops::RangeFrom<C>) -> Self {
        Self::at_least(value.start)
    }
}

impl<C> From<std::ops::RangeTo<C>> for Interval<C> {
    fn from(value: std::ops::RangeTo<C>) -> Self {
        Self::less_than(value.end)
    }
}

impl<C> From<std::ops::RangeToInclusive<C>> for Interval<C> {
    fn from(value: std::ops::RangeToInclusive<C>) -> Self {
        Self::at_most(value.end)
    }
}

impl<C> From<std::ops::RangeFull> for Interval<C> {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::all()
    }
}

impl<C> Display for Interval<C>
where
    C: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Bound::Included(v) => write!(f, "[{v}")?,
            Bound::Excluded(v) => write!(f, "({v}")?,
            Bound::Unbounded => f.write_str("(-∞")?,
        }
        f.write_str(", ")?;
        match &self.upper {
            Bound::Included(v) => write!(f, "{v}]"),
            Bound::Excluded(v) => write!(f, "{v})"),
            Bound::Unbounded => f.write_str("+∞)"),
        }
    }
}

/// Compare two lower bounds.
///
/// An absent bound reaches -∞ and sorts before any present bound. At equal
/// endpoints a closed bound starts earlier than an open one.
pub(crate) fn cmp_lower<C>(left: Bound<&C>, right: Bound<&C>) -> Ordering
where
    C: Ord,
{
    match (left, right) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(l), Bound::Included(r)) | (Bound::Excluded(l), Bound::Excluded(r)) => {
            l.cmp(r)
        }
        (Bound::Included(l), Bound::Excluded(r)) => l.cmp(r).then(Ordering::Less),
        (Bound::Excluded(l), Bound::Included(r)) => l.cmp(r).then(Ordering::Greater),
    }
}

/// Compare two upper bounds.
///
/// An absent bound reaches +∞ and sorts after any present bound. At equal
/// endpoints an open bound ends earlier than a closed one.
pub(crate) fn cmp_upper<C>(left: Bound<&C>, right: Bound<&C>) -> Ordering
where
    C: Ord,
{
    match (left, right) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Greater,
        (_, Bound::Unbounded) => Ordering::Less,
        (Bound::Included(l), Bound::Included(r)) | (Bound::Excluded(l), Bound::Excluded(r)) => {
            l.cmp(r)
        }
        (Bound::Excluded(l), Bound::Included(r)) => l.cmp(r).then(Ordering::Less),
        (Bound::Included(l), Bound::Excluded(r)) => l.cmp(r).then(Ordering::Greater),
    }
}

/// Compare a lower bound against an upper bound in their shared positional
/// order along the number line.
///
/// Either bound being absent places the lower bound first. At equal
/// endpoints the two bounds coincide when exactly one of them is closed; a
/// closed/closed pair leaves the shared point between them ([`Less`]),
/// while an open/open pair leaves a gap ([`Greater`]).
///
/// [`Less`] therefore means at least one point lies past the lower bound
/// and before the upper bound (the building block of
/// [`Interval::is_connected`]), while [`Less`] or [`Equal`] means the
/// lower bound does not lie strictly past the upper bound.
///
/// [`Less`]: Ordering::Less
/// [`Equal`]: Ordering::Equal
/// [`Greater`]: Ordering::Greater
pub(crate) fn cmp_lower_to_upper<C>(lower: Bound<&C>, upper: Bound<&C>) -> Ordering
where
    C: Ord,
{
    match (lower, upper) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => Ordering::Less,
        (Bound::Included(l), Bound::Excluded(u)) | (Bound::Excluded(l), Bound::Included(u)) => {
            l.cmp(u)
        }
        (Bound::Included(l), Bound::Included(u)) => l.cmp(u).then(Ordering::Less),
        (Bound::Excluded(l), Bound::Excluded(u)) => l.cmp(u).then(Ordering::Greater),
    }
}
