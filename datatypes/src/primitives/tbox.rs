use super::dimensions::ensure_same_dimensionality;
use super::{Dimension, DimensionFlags, Extent, Period, TimeInstance};
use crate::error;
use crate::util::{Result, hash_f64};
use ordered_float::OrderedFloat;
use snafu::ensure;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

/// A box over a numeric value dimension and a time dimension, each optional.
///
/// At least one of the dimensions is present. Both ranges are closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TBox {
    value: Option<Extent<f64>>,
    time: Option<Extent<TimeInstance>>,
}

impl TBox {
    /// Creates a new box from its value and time extents
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::{Extent, TBox, TimeInstance};
    ///
    /// let t0 = TimeInstance::from_micros(0).unwrap();
    /// let t1 = TimeInstance::from_micros(10).unwrap();
    ///
    /// let tbox = TBox::new(Some(Extent::new(5.0, 1.0)), Some(Extent::new(t0, t1))).unwrap();
    /// assert_eq!(tbox.xmin(), Some(1.0));
    ///
    /// TBox::new(None, None).unwrap_err();
    /// TBox::new(Some(Extent::new(f64::NAN, 1.0)), None).unwrap_err();
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if neither dimension is given or if a value bound is not finite.
    ///
    pub fn new(value: Option<Extent<f64>>, time: Option<Extent<TimeInstance>>) -> Result<Self> {
        ensure!(
            value.is_some() || time.is_some(),
            error::InvalidArgument {
                details: "a TBOX must have a value or a time dimension"
            }
        );
        if let Some(value) = value {
            ensure!(
                value.is_finite(),
                error::InvalidArgument {
                    details: "the value bounds of a TBOX must be finite"
                }
            );
        }
        Ok(Self { value, time })
    }

    pub fn from_value(value: f64) -> Result<Self> {
        Self::new(Some(Extent::point(value)), None)
    }

    pub fn from_value_range(min: f64, max: f64) -> Result<Self> {
        Self::new(Some(Extent::new(min, max)), None)
    }

    pub fn from_timestamp(t: TimeInstance) -> Self {
        Self {
            value: None,
            time: Some(Extent::point(t)),
        }
    }

    /// The time extent of a period; inclusivity is dropped since box ranges are closed.
    pub fn from_period(period: &Period) -> Self {
        Self {
            value: None,
            time: Some(Extent::new(period.lower(), period.upper())),
        }
    }

    pub fn from_value_timestamp(value: f64, t: TimeInstance) -> Result<Self> {
        Self::new(Some(Extent::point(value)), Some(Extent::point(t)))
    }

    pub fn from_value_period(value: f64, period: &Period) -> Result<Self> {
        Self::new(
            Some(Extent::point(value)),
            Some(Extent::new(period.lower(), period.upper())),
        )
    }

    pub fn value(&self) -> Option<Extent<f64>> {
        self.value
    }

    pub fn time(&self) -> Option<Extent<TimeInstance>> {
        self.time
    }

    pub fn has_x(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_t(&self) -> bool {
        self.time.is_some()
    }

    pub fn xmin(&self) -> Option<f64> {
        self.value.map(|v| v.min())
    }

    pub fn xmax(&self) -> Option<f64> {
        self.value.map(|v| v.max())
    }

    pub fn tmin(&self) -> Option<TimeInstance> {
        self.time.map(|t| t.min())
    }

    pub fn tmax(&self) -> Option<TimeInstance> {
        self.time.map(|t| t.max())
    }

    pub fn flags(&self) -> DimensionFlags {
        DimensionFlags {
            has_x: self.has_x(),
            has_z: false,
            has_t: self.has_t(),
            geodetic: false,
        }
    }

    /// The time dimension as a closed period.
    pub fn to_period(&self) -> Option<Period> {
        self.time.map(closed_period)
    }

    /// The value dimension as a closed numeric range.
    pub fn value_range(&self) -> Option<RangeInclusive<f64>> {
        self.value.map(|v| v.min()..=v.max())
    }

    /// Widens the value dimension by `delta` on both sides.
    pub fn expand_value(&self, delta: f64) -> Result<Self> {
        let value = self.value.ok_or(error::Error::MissingDimension {
            dimension: Dimension::X,
            operand: error::Operand::Left,
        })?;
        ensure!(
            delta.is_finite(),
            error::InvalidArgument {
                details: "the expansion must be finite"
            }
        );
        Self::new(Some(value.expand(delta)?), self.time)
    }

    /// Widens the time dimension by `delta` on both sides.
    pub fn expand_temporal(&self, delta: chrono::Duration) -> Result<Self> {
        let time = self.require_time()?;
        Ok(Self {
            value: self.value,
            time: Some(Extent::ordered(
                time.min().checked_shift(-delta)?,
                time.max().checked_shift(delta)?,
            )?),
        })
    }

    /// Translates the time dimension by `delta`.
    pub fn shift(&self, delta: chrono::Duration) -> Result<Self> {
        let time = self.require_time()?;
        Ok(Self {
            value: self.value,
            time: Some(Extent::new(
                time.min().checked_shift(delta)?,
                time.max().checked_shift(delta)?,
            )),
        })
    }

    fn require_time(&self) -> Result<Extent<TimeInstance>> {
        self.time.ok_or(error::Error::MissingDimension {
            dimension: Dimension::T,
            operand: error::Operand::Left,
        })
    }

    /// The smallest box covering both boxes, which must have identical dimensions.
    pub fn extend(&self, other: &Self) -> Result<Self> {
        ensure_same_dimensionality(self.flags(), other.flags())?;
        Ok(Self {
            value: hull(self.value, other.value),
            time: hull(self.time, other.time),
        })
    }
}

pub(crate) fn hull<T: PartialOrd + Copy>(a: Option<Extent<T>>, b: Option<Extent<T>>) -> Option<Extent<T>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.hull(&b)),
        _ => None,
    }
}

pub(crate) fn closed_period(time: Extent<TimeInstance>) -> Period {
    Period::instant(time.min()).super_union(&Period::instant(time.max()))
}

/// Compute the extent of all input boxes, `None` for an empty input
pub fn tbox_extent<'b, I: IntoIterator<Item = &'b TBox>>(boxes: I) -> Result<Option<TBox>> {
    let mut boxes = boxes.into_iter();
    let Some(first) = boxes.next() else {
        return Ok(None);
    };

    let mut extent = *first;
    for tbox in boxes {
        extent = extent.extend(tbox)?;
    }
    Ok(Some(extent))
}

pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    OrderedFloat(a).cmp(&OrderedFloat(b))
}

impl Ord for TBox {
    /// Compares time minima, value minima, time maxima and value maxima in turn.
    ///
    /// Boxes with different dimensions are ordered by their flag word.
    fn cmp(&self, other: &Self) -> Ordering {
        let (flags, other_flags) = (self.flags(), other.flags());
        if flags != other_flags {
            return flags.bits().cmp(&other_flags.bits());
        }

        let time = self.time.zip(other.time);
        let value = self.value.zip(other.value);

        let mut ordering = Ordering::Equal;
        if let Some((t1, t2)) = time {
            ordering = ordering.then_with(|| t1.min().cmp(&t2.min()));
        }
        if let Some((v1, v2)) = value {
            ordering = ordering.then_with(|| cmp_f64(v1.min(), v2.min()));
        }
        if let Some((t1, t2)) = time {
            ordering = ordering.then_with(|| t1.max().cmp(&t2.max()));
        }
        if let Some((v1, v2)) = value {
            ordering = ordering.then_with(|| cmp_f64(v1.max(), v2.max()));
        }
        ordering
    }
}

impl PartialOrd for TBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// value bounds are always finite
impl Eq for TBox {}

impl Hash for TBox {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.flags().bits());
        if let Some(value) = self.value {
            state.write_u32(hash_f64(value.min()));
            state.write_u32(hash_f64(value.max()));
        }
        if let Some(time) = self.time {
            time.min().hash(state);
            time.max().hash(state);
        }
    }
}
