use crate::error;
use crate::util::Result;
use crate::util::ranges::value_in_range_inclusive;
use snafu::ensure;

/// A closed range `[min, max]` along a single box dimension.
///
/// The bounds are ordered on construction, so `min <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent<T> {
    min: T,
    max: T,
}

impl<T> Extent<T>
where
    T: PartialOrd + Copy,
{
    /// Creates a new extent, swapping the bounds if they are given in reverse.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::Extent;
    ///
    /// let extent = Extent::new(5.0, 1.0);
    ///
    /// assert_eq!(extent.min(), 1.0);
    /// assert_eq!(extent.max(), 5.0);
    /// ```
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// An extent from bounds that must already be in order.
    pub(crate) fn ordered(min: T, max: T) -> Result<Self> {
        ensure!(
            min <= max,
            error::InvalidArgument {
                details: "a negative expansion must not exceed half the extent"
            }
        );
        Ok(Self { min, max })
    }

    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains_value(&self, value: T) -> bool {
        value_in_range_inclusive(value, self.min, self.max)
    }

    pub fn contains(&self, other: &Self) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Whether the extents share at least one value.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.max < other.min || other.max < self.min)
    }

    /// The common part, or `None` if the result would be inverted.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = if other.min > self.min { other.min } else { self.min };
        let max = if other.max < self.max { other.max } else { self.max };

        if max < min {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// The smallest extent covering both.
    #[must_use]
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            min: if other.min < self.min { other.min } else { self.min },
            max: if other.max > self.max { other.max } else { self.max },
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Strictly below `other`.
    pub fn strictly_below(&self, other: &Self) -> bool {
        self.max < other.min
    }

    /// Does not extend above `other`.
    pub fn not_above(&self, other: &Self) -> bool {
        self.max <= other.max
    }

    /// Strictly above `other`.
    pub fn strictly_above(&self, other: &Self) -> bool {
        self.min > other.max
    }

    /// Does not extend below `other`.
    pub fn not_below(&self, other: &Self) -> bool {
        self.min >= other.min
    }
}

impl Extent<f64> {
    /// Widens the extent by `delta` on both sides, a negative `delta` shrinks it.
    ///
    /// # Errors
    ///
    /// Fails if shrinking would invert the extent.
    ///
    pub fn expand(&self, delta: f64) -> Result<Self> {
        Self::ordered(self.min - delta, self.max + delta)
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_bounds() {
        assert_eq!(Extent::new(3, 1), Extent::new(1, 3));
        assert_eq!(Extent::point(2).min(), 2);
    }

    #[test]
    fn intersection() {
        assert_eq!(
            Extent::new(1.0, 5.0).intersection(&Extent::new(3.0, 8.0)),
            Some(Extent::new(3.0, 5.0))
        );
        assert_eq!(
            Extent::new(0.0, 5.0).intersection(&Extent::new(5.0, 10.0)),
            Some(Extent::point(5.0))
        );
        assert_eq!(Extent::new(0, 1).intersection(&Extent::new(2, 3)), None);
    }

    #[test]
    fn hull() {
        assert_eq!(Extent::new(0, 1).hull(&Extent::new(5, 6)), Extent::new(0, 6));
    }

    #[test]
    fn containment_and_overlap() {
        let outer = Extent::new(0, 10);

        assert!(outer.contains(&Extent::new(0, 10)));
        assert!(outer.contains(&Extent::new(2, 3)));
        assert!(!outer.contains(&Extent::new(2, 11)));
        assert!(outer.overlaps(&Extent::new(10, 11)));
        assert!(!outer.overlaps(&Extent::new(11, 12)));
        assert!(outer.contains_value(10));
    }

    #[test]
    fn positions() {
        let a = Extent::new(0, 2);
        let b = Extent::new(3, 5);

        assert!(a.strictly_below(&b));
        assert!(a.not_above(&b));
        assert!(b.strictly_above(&a));
        assert!(b.not_below(&a));
        assert!(!a.strictly_below(&Extent::new(2, 5)));
    }

    #[test]
    fn expand() {
        assert_eq!(
            Extent::new(1.0, 2.0).expand(0.5).unwrap(),
            Extent::new(0.5, 2.5)
        );
        assert_eq!(
            Extent::new(1.0, 3.0).expand(-1.0).unwrap(),
            Extent::point(2.0)
        );
        assert!(Extent::new(0.0, 1.0).expand(-2.0).is_err());
    }
}
