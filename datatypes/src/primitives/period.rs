use super::TimeInstance;
use super::bound::{Bound, compare_bounds};
use crate::error::{self, Error};
use crate::util::{Result, hash_i64};
use snafu::ensure;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A time interval whose bounds are independently inclusive or exclusive.
///
/// A period is never empty: a single instant is the closed period `[t, t]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    lower: TimeInstance,
    upper: TimeInstance,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

impl Period {
    /// Creates a new period from inputs implementing `TryInto<TimeInstance>`
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::Period;
    ///
    /// Period::new(0, 1, true, false).unwrap();
    /// Period::new(1, 1, true, true).unwrap();
    ///
    /// Period::new(1, 0, true, true).unwrap_err();
    /// Period::new(1, 1, true, false).unwrap_err();
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if `upper` is before `lower` or if the bounds
    /// are equal and not both inclusive.
    ///
    pub fn new<A, B>(lower: A, upper: B, lower_inclusive: bool, upper_inclusive: bool) -> Result<Self>
    where
        A: TryInto<TimeInstance>,
        B: TryInto<TimeInstance>,
        Error: From<A::Error> + From<B::Error>,
    {
        let lower = lower.try_into()?;
        let upper = upper.try_into()?;

        ensure!(
            lower <= upper,
            error::InvalidArgument {
                details: format!(
                    "the lower bound {} must be less than or equal to the upper bound {}",
                    lower.inner(),
                    upper.inner()
                )
            }
        );
        ensure!(
            lower != upper || (lower_inclusive && upper_inclusive),
            error::EmptyInterval { lower, upper }
        );

        Ok(Self {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        })
    }

    /// The closed period `[t, t]`.
    pub fn instant(t: TimeInstance) -> Self {
        Self {
            lower: t,
            upper: t,
            lower_inclusive: true,
            upper_inclusive: true,
        }
    }

    /// Only for bounds already known to form a non-empty period.
    fn from_bounds(lower: Bound, upper: Bound) -> Self {
        debug_assert!(lower.is_lower && !upper.is_lower);
        Self {
            lower: lower.value,
            upper: upper.value,
            lower_inclusive: lower.inclusive,
            upper_inclusive: upper.inclusive,
        }
    }

    /// Builds a period from two bounds, returning `None` if they enclose nothing.
    fn try_from_bounds(lower: Bound, upper: Bound) -> Option<Self> {
        match lower.value.cmp(&upper.value) {
            Ordering::Less => Some(Self::from_bounds(lower, upper)),
            Ordering::Equal if lower.inclusive && upper.inclusive => {
                Some(Self::from_bounds(lower, upper))
            }
            _ => None,
        }
    }

    pub fn lower(&self) -> TimeInstance {
        self.lower
    }

    pub fn upper(&self) -> TimeInstance {
        self.upper
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    pub fn lower_bound(&self) -> Bound {
        Bound::lower(self.lower, self.lower_inclusive)
    }

    pub fn upper_bound(&self) -> Bound {
        Bound::upper(self.upper, self.upper_inclusive)
    }

    pub fn is_instant(&self) -> bool {
        self.lower == self.upper
    }

    pub fn duration(&self) -> chrono::Duration {
        self.upper - self.lower
    }

    pub fn contains_timestamp(&self, t: TimeInstance) -> bool {
        let point_as_lower = Bound::lower(t, true);
        let point_as_upper = Bound::upper(t, true);
        compare_bounds(&self.lower_bound(), &point_as_lower) != Ordering::Greater
            && compare_bounds(&self.upper_bound(), &point_as_upper) != Ordering::Less
    }

    /// Returns whether `other` lies completely within this period.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::Period;
    ///
    /// let outer = Period::new(0, 10, true, true).unwrap();
    ///
    /// assert!(outer.contains(&Period::new(0, 10, false, false).unwrap()));
    /// assert!(!Period::new(0, 10, false, true).unwrap().contains(&outer));
    /// ```
    pub fn contains(&self, other: &Self) -> bool {
        compare_bounds(&self.lower_bound(), &other.lower_bound()) != Ordering::Greater
            && compare_bounds(&self.upper_bound(), &other.upper_bound()) != Ordering::Less
    }

    pub fn contained(&self, other: &Self) -> bool {
        other.contains(self)
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        compare_bounds(&self.lower_bound(), &other.upper_bound()) != Ordering::Greater
            && compare_bounds(&other.lower_bound(), &self.upper_bound()) != Ordering::Greater
    }

    /// Periods are adjacent if they touch without sharing an instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::Period;
    ///
    /// let a = Period::new(0, 5, true, false).unwrap();
    /// let b = Period::new(5, 10, true, true).unwrap();
    /// let c = Period::new(5, 10, false, true).unwrap();
    ///
    /// assert!(a.adjacent(&b));
    /// assert!(!a.adjacent(&c));
    /// ```
    pub fn adjacent(&self, other: &Self) -> bool {
        (self.upper == other.lower && self.upper_inclusive != other.lower_inclusive)
            || (other.upper == self.lower && other.upper_inclusive != self.lower_inclusive)
    }

    /// Strictly before `other`.
    pub fn before(&self, other: &Self) -> bool {
        compare_bounds(&self.upper_bound(), &other.lower_bound()) == Ordering::Less
    }

    /// Does not extend after `other`.
    pub fn overbefore(&self, other: &Self) -> bool {
        compare_bounds(&self.upper_bound(), &other.upper_bound()) != Ordering::Greater
    }

    /// Strictly after `other`.
    pub fn after(&self, other: &Self) -> bool {
        compare_bounds(&self.lower_bound(), &other.upper_bound()) == Ordering::Greater
    }

    /// Does not extend before `other`.
    pub fn overafter(&self, other: &Self) -> bool {
        compare_bounds(&self.lower_bound(), &other.lower_bound()) != Ordering::Less
    }

    /// Return the intersection with `other`, or `None` if the periods are disjoint
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }

        let lower = max_bound(self.lower_bound(), other.lower_bound());
        let upper = min_bound(self.upper_bound(), other.upper_bound());
        Some(Self::from_bounds(lower, upper))
    }

    /// Unites this period with another one.
    ///
    /// # Errors
    /// This method fails if the other period neither overlaps nor touches this period.
    ///
    pub fn union(&self, other: &Self) -> Result<Self> {
        if self.overlaps(other) || self.adjacent(other) {
            Ok(self.super_union(other))
        } else {
            Err(Error::non_contiguous_periods(self, other))
        }
    }

    /// The smallest period containing both periods, bridging any gap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::Period;
    ///
    /// let a = Period::new(0, 1, true, false).unwrap();
    /// let b = Period::new(5, 6, false, true).unwrap();
    ///
    /// assert_eq!(a.super_union(&b), Period::new(0, 6, true, true).unwrap());
    /// ```
    #[must_use]
    pub fn super_union(&self, other: &Self) -> Self {
        Self::from_bounds(
            min_bound(self.lower_bound(), other.lower_bound()),
            max_bound(self.upper_bound(), other.upper_bound()),
        )
    }

    /// The parts of this period not covered by `other`, in ascending order.
    pub fn minus(&self, other: &Self) -> Vec<Self> {
        let (lower1, upper1) = (self.lower_bound(), self.upper_bound());
        let (lower2, upper2) = (other.lower_bound(), other.upper_bound());

        if compare_bounds(&lower1, &upper2) == Ordering::Greater
            || compare_bounds(&upper1, &lower2) == Ordering::Less
        {
            return vec![*self];
        }

        // the bounds of `other` flipped into the role they play in the remainder
        let left_upper = Bound::upper(lower2.value, !lower2.inclusive);
        let right_lower = Bound::lower(upper2.value, !upper2.inclusive);

        let mut pieces = Vec::with_capacity(2);
        if compare_bounds(&lower1, &lower2) == Ordering::Less {
            pieces.extend(Self::try_from_bounds(lower1, left_upper));
        }
        if compare_bounds(&upper1, &upper2) == Ordering::Greater {
            pieces.extend(Self::try_from_bounds(right_lower, upper1));
        }
        pieces
    }

    /// Translates both bounds by `delta`, keeping the inclusivity flags.
    pub fn shift(&self, delta: chrono::Duration) -> Result<Self> {
        Ok(Self {
            lower: self.lower.checked_shift(delta)?,
            upper: self.upper.checked_shift(delta)?,
            lower_inclusive: self.lower_inclusive,
            upper_inclusive: self.upper_inclusive,
        })
    }

    /// Hash combining the inclusivity flags with both endpoints.
    ///
    /// Periods that only differ in their inclusivity hash differently.
    pub fn hash_value(&self) -> u32 {
        let flags = u32::from(self.lower_inclusive) | (u32::from(self.upper_inclusive) << 1);

        let mut result = hash_i64(i64::from(flags));
        result ^= hash_i64(self.lower.inner());
        result = result.rotate_left(1);
        result ^= hash_i64(self.upper.inner());
        result
    }
}

fn min_bound(b1: Bound, b2: Bound) -> Bound {
    if compare_bounds(&b1, &b2) == Ordering::Greater {
        b2
    } else {
        b1
    }
}

fn max_bound(b1: Bound, b2: Bound) -> Bound {
    if compare_bounds(&b1, &b2) == Ordering::Less {
        b2
    } else {
        b1
    }
}

impl Ord for Period {
    /// Orders by lower bound, then by upper bound
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::Period;
    ///
    /// // `[a` sorts before `(a`
    /// assert!(Period::new(0, 5, true, true).unwrap() < Period::new(0, 5, false, true).unwrap());
    /// // `a)` sorts before `a]`
    /// assert!(Period::new(0, 5, true, false).unwrap() < Period::new(0, 5, true, true).unwrap());
    /// ```
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bounds(&self.lower_bound(), &other.lower_bound())
            .then_with(|| compare_bounds(&self.upper_bound(), &other.upper_bound()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_value());
    }
}

impl From<TimeInstance> for Period {
    fn from(time_instance: TimeInstance) -> Self {
        Self::instant(time_instance)
    }
}

/// Accumulates periods into their super-union.
///
/// The accumulator is owned by a single caller and frozen with [`PeriodBuilder::finish`].
#[derive(Debug)]
pub(crate) struct PeriodBuilder {
    lower: Bound,
    upper: Bound,
}

impl PeriodBuilder {
    pub fn new(start: &Period) -> Self {
        Self {
            lower: start.lower_bound(),
            upper: start.upper_bound(),
        }
    }

    /// Widens the accumulator to also cover `other`.
    pub fn expand(&mut self, other: &Period) {
        self.lower = min_bound(self.lower, other.lower_bound());
        self.upper = max_bound(self.upper, other.upper_bound());
    }

    /// Whether `other` overlaps or touches the accumulated period.
    pub fn connects(&self, other: &Period) -> bool {
        let current = self.peek();
        current.overlaps(other) || current.adjacent(other)
    }

    fn peek(&self) -> Period {
        Period::from_bounds(self.lower, self.upper)
    }

    pub fn finish(self) -> Period {
        self.peek()
    }
}
