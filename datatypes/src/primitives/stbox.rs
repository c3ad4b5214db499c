use super::dimensions::ensure_same_dimensionality;
use super::tbox::{closed_period, cmp_f64, hull};
use super::{Dimension, DimensionFlags, Extent, Period, TimeInstance};
use crate::error::{self, Operand};
use crate::util::{Result, hash_f64};
use geo::BoundingRect;
use snafu::ensure;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// The spatial part of an [`STBox`]: planar `x`/`y` ranges and an optional `z` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialExtent {
    x: Extent<f64>,
    y: Extent<f64>,
    z: Option<Extent<f64>>,
}

impl SpatialExtent {
    pub fn new_2d(x: Extent<f64>, y: Extent<f64>) -> Self {
        Self { x, y, z: None }
    }

    pub fn new_3d(x: Extent<f64>, y: Extent<f64>, z: Extent<f64>) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn x(&self) -> Extent<f64> {
        self.x
    }

    pub fn y(&self) -> Extent<f64> {
        self.y
    }

    pub fn z(&self) -> Option<Extent<f64>> {
        self.z
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_none_or(|z| z.is_finite())
    }

    /// Per-axis intersection over the axes both extents carry.
    pub(crate) fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.intersection(&other.x)?;
        let y = self.y.intersection(&other.y)?;
        let z = match (self.z, other.z) {
            (Some(z1), Some(z2)) => Some(z1.intersection(&z2)?),
            _ => None,
        };
        Some(Self { x, y, z })
    }

    /// Per-axis hull, both extents must carry the same axes.
    pub(crate) fn hull(&self, other: &Self) -> Self {
        Self {
            x: self.x.hull(&other.x),
            y: self.y.hull(&other.y),
            z: hull(self.z, other.z),
        }
    }

    fn expand(&self, delta: f64) -> Result<Self> {
        Ok(Self {
            x: self.x.expand(delta)?,
            y: self.y.expand(delta)?,
            z: self.z.map(|z| z.expand(delta)).transpose()?,
        })
    }
}

/// A spatiotemporal box over `x`, `y`, optionally `z`, and time.
///
/// Either the spatial or the temporal part (or both) is present. The box
/// carries a spatial reference id and may be interpreted geodetically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct STBox {
    space: Option<SpatialExtent>,
    time: Option<Extent<TimeInstance>>,
    srid: i32,
    geodetic: bool,
}

impl STBox {
    /// Creates a new spatiotemporal box
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::{Extent, STBox, SpatialExtent};
    ///
    /// let space = SpatialExtent::new_2d(Extent::new(1.0, 0.0), Extent::new(0.0, 1.0));
    /// let stbox = STBox::new(Some(space), None, 4326, false).unwrap();
    ///
    /// assert_eq!(stbox.xmin(), Some(0.0));
    /// assert_eq!(stbox.zmin(), None);
    ///
    /// STBox::new(None, None, 0, false).unwrap_err();
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if neither a spatial nor a temporal part is given
    /// or if a coordinate is not finite.
    ///
    pub fn new(
        space: Option<SpatialExtent>,
        time: Option<Extent<TimeInstance>>,
        srid: i32,
        geodetic: bool,
    ) -> Result<Self> {
        ensure!(
            space.is_some() || time.is_some(),
            error::InvalidArgument {
                details: "an STBOX must have a spatial or a time dimension"
            }
        );
        if let Some(space) = space {
            ensure!(
                space.is_finite(),
                error::InvalidArgument {
                    details: "the coordinates of an STBOX must be finite"
                }
            );
        }
        Ok(Self {
            space,
            time,
            srid,
            geodetic,
        })
    }

    pub fn from_timestamp(t: TimeInstance) -> Self {
        Self {
            space: None,
            time: Some(Extent::point(t)),
            srid: 0,
            geodetic: false,
        }
    }

    pub fn from_period(period: &Period) -> Self {
        Self {
            space: None,
            time: Some(Extent::new(period.lower(), period.upper())),
            srid: 0,
            geodetic: false,
        }
    }

    /// The planar bounding box of a geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::STBox;
    /// use geo::line_string;
    ///
    /// let line = line_string![(x: 0.0, y: 2.0), (x: 3.0, y: -1.0)];
    /// let stbox = STBox::from_geometry(&line, 4326, false).unwrap();
    ///
    /// assert_eq!(stbox.xmax(), Some(3.0));
    /// assert_eq!(stbox.ymin(), Some(-1.0));
    /// ```
    ///
    /// # Errors
    ///
    /// This method fails for empty geometries.
    ///
    pub fn from_geometry<G>(geometry: &G, srid: i32, geodetic: bool) -> Result<Self>
    where
        G: BoundingRect<f64>,
    {
        let rect: Option<geo::Rect<f64>> = geometry.bounding_rect().into();
        let rect = rect.ok_or(error::Error::InvalidArgument {
            details: "cannot compute the bounding box of an empty geometry".to_string(),
        })?;

        let space = SpatialExtent::new_2d(
            Extent::new(rect.min().x, rect.max().x),
            Extent::new(rect.min().y, rect.max().y),
        );
        Self::new(Some(space), None, srid, geodetic)
    }

    pub fn space(&self) -> Option<SpatialExtent> {
        self.space
    }

    pub fn time(&self) -> Option<Extent<TimeInstance>> {
        self.time
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn is_geodetic(&self) -> bool {
        self.geodetic
    }

    pub fn has_x(&self) -> bool {
        self.space.is_some()
    }

    pub fn has_z(&self) -> bool {
        self.space.is_some_and(|s| s.has_z())
    }

    pub fn has_t(&self) -> bool {
        self.time.is_some()
    }

    pub fn xmin(&self) -> Option<f64> {
        self.space.map(|s| s.x.min())
    }

    pub fn xmax(&self) -> Option<f64> {
        self.space.map(|s| s.x.max())
    }

    pub fn ymin(&self) -> Option<f64> {
        self.space.map(|s| s.y.min())
    }

    pub fn ymax(&self) -> Option<f64> {
        self.space.map(|s| s.y.max())
    }

    pub fn zmin(&self) -> Option<f64> {
        self.space.and_then(|s| s.z).map(|z| z.min())
    }

    pub fn zmax(&self) -> Option<f64> {
        self.space.and_then(|s| s.z).map(|z| z.max())
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
            has_z: self.has_z(),
            has_t: self.has_t(),
            geodetic: self.geodetic,
        }
    }

    pub fn to_period(&self) -> Option<Period> {
        self.time.map(closed_period)
    }

    #[must_use]
    pub fn with_srid(&self, srid: i32) -> Self {
        Self { srid, ..*self }
    }

    /// Widens every spatial axis by `delta` on both sides.
    pub fn expand_spatial(&self, delta: f64) -> Result<Self> {
        let space = self.space.ok_or(error::Error::MissingDimension {
            dimension: Dimension::X,
            operand: Operand::Left,
        })?;
        ensure!(
            delta.is_finite(),
            error::InvalidArgument {
                details: "the expansion must be finite"
            }
        );
        Self::new(Some(space.expand(delta)?), self.time, self.srid, self.geodetic)
    }

    /// Widens the time dimension by `delta` on both sides.
    pub fn expand_temporal(&self, delta: chrono::Duration) -> Result<Self> {
        let time = self.require_time()?;
        Ok(Self {
            time: Some(Extent::ordered(
                time.min().checked_shift(-delta)?,
                time.max().checked_shift(delta)?,
            )?),
            ..*self
        })
    }

    /// Translates the time dimension by `delta`.
    pub fn shift(&self, delta: chrono::Duration) -> Result<Self> {
        let time = self.require_time()?;
        Ok(Self {
            time: Some(Extent::new(
                time.min().checked_shift(delta)?,
                time.max().checked_shift(delta)?,
            )),
            ..*self
        })
    }

    fn require_time(&self) -> Result<Extent<TimeInstance>> {
        self.time.ok_or(error::Error::MissingDimension {
            dimension: Dimension::T,
            operand: Operand::Left,
        })
    }

    /// The smallest box covering both boxes, which must have identical dimensions.
    pub fn extend(&self, other: &Self) -> Result<Self> {
        ensure_same_dimensionality(self.flags(), other.flags())?;
        self.ensure_compatible(other)?;

        let space = match (self.space, other.space) {
            (Some(s1), Some(s2)) => Some(s1.hull(&s2)),
            _ => None,
        };
        Ok(Self {
            space,
            time: hull(self.time, other.time),
            ..*self
        })
    }

    /// Boxes sharing the spatial dimension must agree on SRID and geodetic interpretation.
    pub(crate) fn ensure_compatible(&self, other: &Self) -> Result<()> {
        if self.has_x() && other.has_x() {
            ensure!(self.geodetic == other.geodetic, error::GeodeticMismatch);
            ensure!(
                self.srid == other.srid,
                error::SridMismatch {
                    left: self.srid,
                    right: other.srid
                }
            );
        }
        Ok(())
    }
}

/// Compute the extent of all input boxes, `None` for an empty input
pub fn stbox_extent<'b, I: IntoIterator<Item = &'b STBox>>(boxes: I) -> Result<Option<STBox>> {
    let mut boxes = boxes.into_iter();
    let Some(first) = boxes.next() else {
        return Ok(None);
    };

    let mut extent = *first;
    for stbox in boxes {
        extent = extent.extend(stbox)?;
    }
    Ok(Some(extent))
}

impl Ord for STBox {
    /// Compares the minima (time, then x, y, z), then the maxima in the same
    /// order, then the SRID.
    ///
    /// Boxes with different dimensions are ordered by their flag word.
    fn cmp(&self, other: &Self) -> Ordering {
        let (flags, other_flags) = (self.flags(), other.flags());
        if flags != other_flags {
            return flags.bits().cmp(&other_flags.bits());
        }

        let time = self.time.zip(other.time);
        let space = self.space.zip(other.space);

        let mut ordering = Ordering::Equal;
        if let Some((t1, t2)) = time {
            ordering = ordering.then_with(|| t1.min().cmp(&t2.min()));
        }
        if let Some((s1, s2)) = space {
            ordering = ordering.then_with(|| cmp_spatial(&s1, &s2, Extent::min));
        }
        if let Some((t1, t2)) = time {
            ordering = ordering.then_with(|| t1.max().cmp(&t2.max()));
        }
        if let Some((s1, s2)) = space {
            ordering = ordering.then_with(|| cmp_spatial(&s1, &s2, Extent::max));
        }
        ordering.then_with(|| self.srid.cmp(&other.srid))
    }
}

fn cmp_spatial(s1: &SpatialExtent, s2: &SpatialExtent, bound: fn(&Extent<f64>) -> f64) -> Ordering {
    let mut ordering = cmp_f64(bound(&s1.x), bound(&s2.x))
        .then_with(|| cmp_f64(bound(&s1.y), bound(&s2.y)));
    if let (Some(z1), Some(z2)) = (s1.z, s2.z) {
        ordering = ordering.then_with(|| cmp_f64(bound(&z1), bound(&z2)));
    }
    ordering
}

impl PartialOrd for STBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// coordinates are always finite
impl Eq for STBox {}

impl Hash for STBox {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.flags().bits());
        state.write_i32(self.srid);
        if let Some(space) = self.space {
            let z = space.z.map(|z| [z.min(), z.max()]);
            for value in [space.x.min(), space.x.max(), space.y.min(), space.y.max()]
                .into_iter()
                .chain(z.into_iter().flatten())
            {
                state.write_u32(hash_f64(value));
            }
        }
        if let Some(time) = self.time {
            time.min().hash(state);
            time.max().hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use geo::{MultiPoint, Point, polygon};

    fn t(micros: i64) -> TimeInstance {
        TimeInstance::from_micros(micros).unwrap()
    }

    fn xy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> SpatialExtent {
        SpatialExtent::new_2d(Extent::new(xmin, xmax), Extent::new(ymin, ymax))
    }

    fn xyt(xmin: f64, xmax: f64, tmin: i64, tmax: i64) -> STBox {
        STBox::new(
            Some(xy(xmin, xmin, xmax, xmax)),
            Some(Extent::new(t(tmin), t(tmax))),
            0,
            false,
        )
        .unwrap()
    }

    #[test]
    fn accessors() {
        let space = SpatialExtent::new_3d(
            Extent::new(3.0, 1.0),
            Extent::new(2.0, 4.0),
            Extent::new(6.0, 5.0),
        );
        let stbox = STBox::new(Some(space), Some(Extent::new(t(5), t(1))), 3857, false).unwrap();

        assert_eq!(stbox.xmin(), Some(1.0));
        assert_eq!(stbox.xmax(), Some(3.0));
        assert_eq!(stbox.ymin(), Some(2.0));
        assert_eq!(stbox.ymax(), Some(4.0));
        assert_eq!(stbox.zmin(), Some(5.0));
        assert_eq!(stbox.zmax(), Some(6.0));
        assert_eq!(stbox.tmin(), Some(t(1)));
        assert_eq!(stbox.tmax(), Some(t(5)));
        assert_eq!(stbox.srid(), 3857);
        assert_eq!(
            stbox.flags().bits(),
            DimensionFlags::X | DimensionFlags::Z | DimensionFlags::T
        );
    }

    #[test]
    fn time_only() {
        let stbox = STBox::from_period(&Period::new(0, 10, true, false).unwrap());

        assert!(!stbox.has_x());
        assert!(!stbox.has_z());
        assert_eq!(stbox.xmin(), None);
        assert_eq!(stbox.to_period(), Some(Period::new(0, 10, true, true).unwrap()));
    }

    #[test]
    fn rejects_nan() {
        assert!(STBox::new(Some(xy(0.0, f64::NAN, 1.0, 1.0)), None, 0, false).is_err());
    }

    #[test]
    fn from_geometry() {
        let polygon = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 1.0), (x: 2.0, y: 5.0)];
        let stbox = STBox::from_geometry(&polygon, 4326, true).unwrap();

        assert_eq!(stbox.space(), Some(xy(0.0, 0.0, 4.0, 5.0)));
        assert!(stbox.is_geodetic());
        assert_eq!(
            STBox::from_geometry(&Point::new(1.0, 2.0), 0, false)
                .unwrap()
                .space(),
            Some(xy(1.0, 2.0, 1.0, 2.0))
        );
        assert!(STBox::from_geometry(&MultiPoint::<f64>::new(vec![]), 0, false).is_err());
    }

    #[test]
    fn expand_spatial() {
        let stbox = STBox::new(Some(xy(0.0, 0.0, 1.0, 1.0)), None, 0, false).unwrap();

        assert_eq!(
            stbox.expand_spatial(1.0).unwrap().space(),
            Some(xy(-1.0, -1.0, 2.0, 2.0))
        );
        assert!(matches!(
            STBox::from_timestamp(t(0)).expand_spatial(1.0),
            Err(Error::MissingDimension {
                dimension: Dimension::X,
                ..
            })
        ));
        assert_eq!(
            STBox::from_timestamp(t(0))
                .expand_temporal(chrono::Duration::microseconds(2))
                .unwrap()
                .to_period(),
            Some(Period::new(-2, 2, true, true).unwrap())
        );
    }

    #[test]
    fn extend_requires_matching_srid() {
        let a = xyt(0.0, 1.0, 0, 1);
        let b = xyt(5.0, 6.0, 3, 4);

        assert_eq!(a.extend(&b).unwrap(), xyt(0.0, 6.0, 0, 4));
        assert!(matches!(
            a.extend(&b.with_srid(4326)),
            Err(Error::SridMismatch {
                left: 0,
                right: 4326
            })
        ));
        assert_eq!(stbox_extent(&[a, b]).unwrap(), Some(xyt(0.0, 6.0, 0, 4)));
    }

    #[test]
    fn ordering() {
        let mut boxes = vec![
            xyt(1.0, 2.0, 0, 5),
            xyt(0.0, 2.0, 0, 5),
            xyt(0.0, 2.0, 0, 5).with_srid(4326),
            STBox::from_timestamp(t(100)),
            xyt(5.0, 6.0, -1, 0),
        ];
        boxes.sort();

        assert_eq!(
            boxes,
            vec![
                STBox::from_timestamp(t(100)),
                xyt(5.0, 6.0, -1, 0),
                xyt(0.0, 2.0, 0, 5),
                xyt(0.0, 2.0, 0, 5).with_srid(4326),
                xyt(1.0, 2.0, 0, 5),
            ]
        );
    }

    #[test]
    fn shrinking_must_not_invert() {
        let stbox = STBox::new(
            Some(SpatialExtent::new_3d(
                Extent::new(0.0, 4.0),
                Extent::new(0.0, 4.0),
                Extent::new(0.0, 1.0),
            )),
            Some(Extent::new(t(0), t(10))),
            0,
            false,
        )
        .unwrap();

        assert!(matches!(
            stbox.expand_spatial(-1.0),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            stbox.expand_spatial(-0.5).unwrap().space(),
            Some(SpatialExtent::new_3d(
                Extent::new(0.5, 3.5),
                Extent::new(0.5, 3.5),
                Extent::point(0.5),
            ))
        );

        let planar = STBox::new(Some(xy(0.0, 0.0, 1.0, 1.0)), None, 0, false).unwrap();
        assert!(matches!(
            planar.expand_spatial(-2.0),
            Err(Error::InvalidArgument { .. })
        ));

        assert!(matches!(
            stbox.expand_temporal(chrono::Duration::microseconds(-6)),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            stbox
                .expand_temporal(chrono::Duration::microseconds(-5))
                .unwrap()
                .to_period(),
            Some(Period::instant(t(5)))
        );
    }

    fn hash_of(stbox: &STBox) -> u64 {
        let mut hasher = rustc_hash::FxHasher::default();
        stbox.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_boxes_hash_equal() {
        let a: STBox = "SRID=4326;STBOX T((1,2,2020-01-01),(3,4,2020-01-02))"
            .parse()
            .unwrap();
        let b: STBox = "srid=4326; stbox t(( 1.0, 2 , 2020-01-01T00:00:00Z),(3,4.00,2020-01-02))"
            .parse()
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let zero = STBox::new(Some(xy(0.0, 0.0, 1.0, 1.0)), None, 0, false).unwrap();
        let negative_zero = STBox::new(Some(xy(-0.0, -0.0, 1.0, 1.0)), None, 0, false).unwrap();
        assert_eq!(zero, negative_zero);
        assert_eq!(hash_of(&zero), hash_of(&negative_zero));
    }

    #[test]
    fn srid_and_flags_take_part_in_the_hash() {
        let time_only = STBox::from_timestamp(t(0));
        let with_srid = time_only.with_srid(4326);
        assert_ne!(time_only, with_srid);
        assert_ne!(hash_of(&time_only), hash_of(&with_srid));

        let planar = STBox::new(Some(xy(0.0, 0.0, 1.0, 1.0)), None, 0, false).unwrap();
        let geodetic = STBox::new(Some(xy(0.0, 0.0, 1.0, 1.0)), None, 0, true).unwrap();
        let with_time = STBox::new(
            Some(xy(0.0, 0.0, 1.0, 1.0)),
            Some(Extent::point(t(0))),
            0,
            false,
        )
        .unwrap();
        assert_ne!(hash_of(&planar), hash_of(&geodetic));
        assert_ne!(hash_of(&planar), hash_of(&with_time));
    }
}
