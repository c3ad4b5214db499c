use crate::error;
use crate::primitives::{Extent, STBox, SpatialExtent, TBox, ensure_common_dimension};
use crate::util::Result;
use snafu::ensure;

/// Topological relations and set operations between boxes of the same type.
///
/// Predicates only look at the dimensions both operands carry and fail if
/// there is no such dimension.
pub trait BoxTopology: Sized {
    /// `other` lies within `self` on every shared dimension, touching the borders is allowed.
    fn contains(&self, other: &Self) -> Result<bool>;

    fn contained(&self, other: &Self) -> Result<bool> {
        other.contains(self)
    }

    /// The boxes are not strictly separated on any shared dimension.
    fn overlaps(&self, other: &Self) -> Result<bool>;

    /// Equality restricted to the shared dimensions.
    fn same(&self, other: &Self) -> Result<bool>;

    /// The boxes intersect and the intersection has zero width on at least one shared dimension.
    fn adjacent(&self, other: &Self) -> Result<bool>;

    /// The common part over the shared dimensions.
    ///
    /// Returns `None` if the boxes share no dimension or are separated on one of them.
    fn intersection(&self, other: &Self) -> Result<Option<Self>>;

    /// The smallest box covering two overlapping boxes of identical dimensionality.
    fn union(&self, other: &Self) -> Result<Self>;
}

/// `true` if `f` holds for the extents or if either one is absent.
fn on_shared<T, F>(a: Option<Extent<T>>, b: Option<Extent<T>>, f: F) -> bool
where
    F: FnOnce(&Extent<T>, &Extent<T>) -> bool,
{
    match (a, b) {
        (Some(a), Some(b)) => f(&a, &b),
        _ => true,
    }
}

type AxisPair = (Option<Extent<f64>>, Option<Extent<f64>>);

/// The spatial axes of both operands, `z` is only paired up if both carry it.
fn shared_axes(a: Option<SpatialExtent>, b: Option<SpatialExtent>) -> [AxisPair; 3] {
    let Some((a, b)) = a.zip(b) else {
        return [(None, None); 3];
    };
    [
        (Some(a.x()), Some(b.x())),
        (Some(a.y()), Some(b.y())),
        (a.z(), b.z()),
    ]
}

fn on_shared_space<F>(a: Option<SpatialExtent>, b: Option<SpatialExtent>, f: F) -> bool
where
    F: Fn(&Extent<f64>, &Extent<f64>) -> bool,
{
    shared_axes(a, b)
        .into_iter()
        .all(|(a, b)| on_shared(a, b, &f))
}

fn is_degenerate<T: PartialOrd + Copy>(extent: Option<Extent<T>>) -> bool {
    extent.is_some_and(|e| e.is_degenerate())
}

impl BoxTopology for TBox {
    fn contains(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        Ok(on_shared(self.value(), other.value(), Extent::contains)
            && on_shared(self.time(), other.time(), Extent::contains))
    }

    fn overlaps(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        Ok(on_shared(self.value(), other.value(), Extent::overlaps)
            && on_shared(self.time(), other.time(), Extent::overlaps))
    }

    fn same(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        Ok(on_shared(self.value(), other.value(), |a, b| a == b)
            && on_shared(self.time(), other.time(), |a, b| a == b))
    }

    fn adjacent(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        let Some(inter) = self.intersection(other)? else {
            return Ok(false);
        };
        Ok(is_degenerate(inter.value()) || is_degenerate(inter.time()))
    }

    fn intersection(&self, other: &Self) -> Result<Option<Self>> {
        let value = match (self.value(), other.value()) {
            (Some(a), Some(b)) => match a.intersection(&b) {
                Some(value) => Some(value),
                None => return Ok(None),
            },
            _ => None,
        };
        let time = match (self.time(), other.time()) {
            (Some(a), Some(b)) => match a.intersection(&b) {
                Some(time) => Some(time),
                None => return Ok(None),
            },
            _ => None,
        };

        if value.is_none() && time.is_none() {
            return Ok(None);
        }
        TBox::new(value, time).map(Some)
    }

    fn union(&self, other: &Self) -> Result<Self> {
        let extent = self.extend(other)?;
        ensure!(
            self.overlaps(other)?,
            error::NonContiguousUnion {
                left: self.to_string(),
                right: other.to_string(),
            }
        );
        Ok(extent)
    }
}

impl BoxTopology for STBox {
    fn contains(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        self.ensure_compatible(other)?;
        Ok(on_shared_space(self.space(), other.space(), Extent::contains)
            && on_shared(self.time(), other.time(), Extent::contains))
    }

    fn overlaps(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        self.ensure_compatible(other)?;
        Ok(on_shared_space(self.space(), other.space(), Extent::overlaps)
            && on_shared(self.time(), other.time(), Extent::overlaps))
    }

    fn same(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        self.ensure_compatible(other)?;
        Ok(on_shared_space(self.space(), other.space(), |a, b| a == b)
            && on_shared(self.time(), other.time(), |a, b| a == b))
    }

    fn adjacent(&self, other: &Self) -> Result<bool> {
        ensure_common_dimension(self.flags(), other.flags())?;
        let Some(inter) = self.intersection(other)? else {
            return Ok(false);
        };
        let space_degenerate = inter.space().is_some_and(|s| {
            s.x().is_degenerate() || s.y().is_degenerate() || is_degenerate(s.z())
        });
        Ok(space_degenerate || is_degenerate(inter.time()))
    }

    fn intersection(&self, other: &Self) -> Result<Option<Self>> {
        self.ensure_compatible(other)?;

        let space = match (self.space(), other.space()) {
            (Some(a), Some(b)) => match a.intersection(&b) {
                Some(space) => Some(space),
                None => return Ok(None),
            },
            _ => None,
        };
        let time = match (self.time(), other.time()) {
            (Some(a), Some(b)) => match a.intersection(&b) {
                Some(time) => Some(time),
                None => return Ok(None),
            },
            _ => None,
        };

        if space.is_none() && time.is_none() {
            return Ok(None);
        }
        STBox::new(space, time, self.srid(), self.is_geodetic()).map(Some)
    }

    fn union(&self, other: &Self) -> Result<Self> {
        let extent = self.extend(other)?;
        ensure!(
            self.overlaps(other)?,
            error::NonContiguousUnion {
                left: self.to_string(),
                right: other.to_string(),
            }
        );
        Ok(extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::primitives::TimeInstance;
    use pretty_assertions::assert_eq;

    fn tbox(text: &str) -> TBox {
        text.parse().unwrap()
    }

    fn stbox(text: &str) -> STBox {
        text.parse().unwrap()
    }

    #[test]
    fn tbox_intersection() {
        let a = tbox("TBOX((1,2020-01-01),(5,2020-01-10))");
        let b = tbox("TBOX((3,2020-01-05),(8,2020-01-20))");

        assert_eq!(
            a.intersection(&b).unwrap(),
            Some(tbox("TBOX((3,2020-01-05),(5,2020-01-10))"))
        );
        assert_eq!(a.intersection(&b).unwrap(), b.intersection(&a).unwrap());
    }

    #[test]
    fn intersection_none_iff_not_overlapping() {
        let boxes = [
            tbox("TBOX((0,2020-01-01),(5,2020-01-10))"),
            tbox("TBOX((5,2020-01-10),(6,2020-01-11))"),
            tbox("TBOX((6,2020-01-01),(9,2020-01-02))"),
            tbox("TBOX((-3,2020-01-02),(1,2020-01-03))"),
            tbox("TBOX((2,),(3,))"),
            tbox("TBOX((,2020-01-20),(,2020-01-21))"),
        ];

        for a in &boxes {
            for b in &boxes {
                let Ok(overlaps) = a.overlaps(b) else {
                    assert_eq!(a.intersection(b).unwrap(), None);
                    continue;
                };
                let intersection = a.intersection(b).unwrap();

                assert_eq!(intersection.is_some(), overlaps, "{a} / {b}");
                assert_eq!(intersection, b.intersection(a).unwrap());
                if a.contains(b).unwrap() {
                    assert!(overlaps);
                    assert!(b.contained(a).unwrap());
                }
            }
        }
    }

    #[test]
    fn intersection_is_associative() {
        let a = tbox("TBOX((0,2020-01-01),(10,2020-01-10))");
        let b = tbox("TBOX((2,2020-01-03),(12,2020-01-12))");
        let c = tbox("TBOX((4,2020-01-02),(8,2020-01-05))");

        let left = a.intersection(&b).unwrap().unwrap().intersection(&c).unwrap();
        let right = a.intersection(&b.intersection(&c).unwrap().unwrap()).unwrap();

        assert_eq!(left, right);
    }

    #[test]
    fn no_shared_dimension() {
        let value = tbox("TBOX((1,),(2,))");
        let time = tbox("TBOX((,2020-01-01),(,2020-01-02))");

        assert_eq!(value.intersection(&time).unwrap(), None);
        assert!(matches!(
            value.overlaps(&time),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn adjacent_boxes() {
        let a = tbox("TBOX((0,),(5,))");
        let b = tbox("TBOX((5,),(10,))");

        assert!(a.adjacent(&b).unwrap());
        assert!(b.adjacent(&a).unwrap());
        assert!(!a.adjacent(&tbox("TBOX((4,),(10,))")).unwrap());
        assert!(!a.adjacent(&tbox("TBOX((6,),(10,))")).unwrap());

        // touching in time suffices even if the values properly overlap
        let c = tbox("TBOX((0,2020-01-01),(5,2020-01-02))");
        let d = tbox("TBOX((1,2020-01-02),(6,2020-01-03))");
        assert!(c.adjacent(&d).unwrap());
    }

    #[test]
    fn same_ignores_unshared_dimensions() {
        let a = tbox("TBOX((1,2020-01-01),(2,2020-01-02))");

        assert!(a.same(&tbox("TBOX((1,),(2,))")).unwrap());
        assert!(!a.same(&tbox("TBOX((1,),(3,))")).unwrap());
        assert_ne!(a, tbox("TBOX((1,),(2,))"));
    }

    #[test]
    fn union() {
        let a = tbox("TBOX((0,2020-01-01),(5,2020-01-10))");
        let b = tbox("TBOX((3,2020-01-05),(8,2020-01-20))");

        assert_eq!(
            a.union(&b).unwrap(),
            tbox("TBOX((0,2020-01-01),(8,2020-01-20))")
        );
        assert!(matches!(
            a.union(&tbox("TBOX((6,2020-01-01),(9,2020-01-10))")),
            Err(Error::NonContiguousUnion { .. })
        ));
        assert!(matches!(
            a.union(&tbox("TBOX((0,),(1,))")),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn stbox_topology() {
        let a = stbox("STBOX ZT((0,0,0,2020-01-01),(10,10,10,2020-01-10))");
        let b = stbox("STBOX ZT((2,2,2,2020-01-02),(3,3,3,2020-01-03))");
        let c = stbox("STBOX ZT((2,2,11,2020-01-02),(3,3,12,2020-01-03))");

        assert!(a.contains(&b).unwrap());
        assert!(b.contained(&a).unwrap());
        assert!(a.overlaps(&b).unwrap());
        assert!(!a.overlaps(&c).unwrap());
        assert_eq!(a.intersection(&c).unwrap(), None);
        assert_eq!(a.intersection(&b).unwrap(), Some(b));

        // without z the boxes only compare on x, y and t
        let flat = stbox("STBOX T((2,2,2020-01-02),(3,3,2020-01-03))");
        assert!(a.contains(&flat).unwrap());
        assert!(flat.overlaps(&c).unwrap());
        assert_eq!(a.intersection(&flat).unwrap(), Some(flat));
    }

    #[test]
    fn stbox_adjacent_and_union() {
        let a = stbox("STBOX((0,0),(5,5))");
        let b = stbox("STBOX((5,1),(8,2))");

        assert!(a.adjacent(&b).unwrap());
        assert_eq!(a.union(&b).unwrap(), stbox("STBOX((0,0),(8,5))"));
        assert!(matches!(
            a.union(&stbox("STBOX((6,6),(7,7))")),
            Err(Error::NonContiguousUnion { .. })
        ));
    }

    #[test]
    fn stbox_compatibility() {
        let a = stbox("SRID=4326;STBOX((0,0),(5,5))");
        let b = stbox("SRID=3857;STBOX((1,1),(2,2))");
        let geodetic = stbox("SRID=4326;GEODSTBOX((1,1),(2,2))");

        assert!(matches!(
            a.overlaps(&b),
            Err(Error::SridMismatch {
                left: 4326,
                right: 3857
            })
        ));
        assert!(matches!(a.contains(&geodetic), Err(Error::GeodeticMismatch)));

        // time-only boxes carry no spatial reference
        let t1 = STBox::from_timestamp(TimeInstance::from_micros(0).unwrap());
        let t2 = t1.with_srid(4326);
        assert!(t1.overlaps(&t2).unwrap());
    }

    #[test]
    fn stbox_without_shared_dimension() {
        let space = stbox("STBOX((0,0),(5,5))");
        let time = STBox::from_timestamp(TimeInstance::from_micros(0).unwrap());

        assert_eq!(space.intersection(&time).unwrap(), None);
        assert!(space.contains(&time).is_err());
        assert!(matches!(
            space.union(&time),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
