use crate::primitives::{
    Dimension, Extent, STBox, SpatialExtent, TBox, TimeInstance, require_dimension,
};
use crate::util::Result;

/// Directional relations between boxes on a single dimension.
///
/// The `left`/`right` family compares the X dimension (the value of a [`TBox`],
/// the x axis of an [`STBox`]), the `before`/`after` family compares time.
/// Each predicate fails with `MissingDimension` if an operand lacks the dimension.
pub trait BoxPosition {
    /// Strictly left of `other`.
    fn left(&self, other: &Self) -> Result<bool>;

    /// Does not extend to the right of `other`.
    fn overleft(&self, other: &Self) -> Result<bool>;

    /// Strictly right of `other`.
    fn right(&self, other: &Self) -> Result<bool>;

    /// Does not extend to the left of `other`.
    fn overright(&self, other: &Self) -> Result<bool>;

    /// Strictly before `other`.
    fn before(&self, other: &Self) -> Result<bool>;

    /// Does not extend after `other`.
    fn overbefore(&self, other: &Self) -> Result<bool>;

    /// Strictly after `other`.
    fn after(&self, other: &Self) -> Result<bool>;

    /// Does not extend before `other`.
    fn overafter(&self, other: &Self) -> Result<bool>;
}

macro_rules! impl_box_position {
    ($box:ty) => {
        impl BoxPosition for $box {
            fn left(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.x_pair(other)?;
                Ok(a.strictly_below(&b))
            }

            fn overleft(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.x_pair(other)?;
                Ok(a.not_above(&b))
            }

            fn right(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.x_pair(other)?;
                Ok(a.strictly_above(&b))
            }

            fn overright(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.x_pair(other)?;
                Ok(a.not_below(&b))
            }

            fn before(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.t_pair(other)?;
                Ok(a.strictly_below(&b))
            }

            fn overbefore(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.t_pair(other)?;
                Ok(a.not_above(&b))
            }

            fn after(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.t_pair(other)?;
                Ok(a.strictly_above(&b))
            }

            fn overafter(&self, other: &Self) -> Result<bool> {
                let (a, b) = self.t_pair(other)?;
                Ok(a.not_below(&b))
            }
        }
    };
}

impl_box_position!(TBox);
impl_box_position!(STBox);

type Pair<T> = (Extent<T>, Extent<T>);

impl TBox {
    fn x_pair(&self, other: &Self) -> Result<Pair<f64>> {
        require_dimension(self.value(), other.value(), Dimension::X)
    }

    fn t_pair(&self, other: &Self) -> Result<Pair<TimeInstance>> {
        require_dimension(self.time(), other.time(), Dimension::T)
    }
}

/// The y (below/above) and z (front/back) relations of spatial boxes.
impl STBox {
    fn spatial_pair(&self, other: &Self) -> Result<(SpatialExtent, SpatialExtent)> {
        self.ensure_compatible(other)?;
        require_dimension(self.space(), other.space(), Dimension::X)
    }

    fn x_pair(&self, other: &Self) -> Result<Pair<f64>> {
        let (a, b) = self.spatial_pair(other)?;
        Ok((a.x(), b.x()))
    }

    fn y_pair(&self, other: &Self) -> Result<Pair<f64>> {
        let (a, b) = self.spatial_pair(other)?;
        Ok((a.y(), b.y()))
    }

    fn z_pair(&self, other: &Self) -> Result<Pair<f64>> {
        self.ensure_compatible(other)?;
        require_dimension(
            self.space().and_then(|s| s.z()),
            other.space().and_then(|s| s.z()),
            Dimension::Z,
        )
    }

    fn t_pair(&self, other: &Self) -> Result<Pair<TimeInstance>> {
        require_dimension(self.time(), other.time(), Dimension::T)
    }

    /// Strictly below `other` on the y axis.
    pub fn below(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.y_pair(other)?;
        Ok(a.strictly_below(&b))
    }

    pub fn overbelow(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.y_pair(other)?;
        Ok(a.not_above(&b))
    }

    /// Strictly above `other` on the y axis.
    pub fn above(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.y_pair(other)?;
        Ok(a.strictly_above(&b))
    }

    pub fn overabove(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.y_pair(other)?;
        Ok(a.not_below(&b))
    }

    /// Strictly in front of `other` on the z axis.
    pub fn front(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.z_pair(other)?;
        Ok(a.strictly_below(&b))
    }

    pub fn overfront(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.z_pair(other)?;
        Ok(a.not_above(&b))
    }

    /// Strictly behind `other` on the z axis.
    pub fn back(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.z_pair(other)?;
        Ok(a.strictly_above(&b))
    }

    pub fn overback(&self, other: &Self) -> Result<bool> {
        let (a, b) = self.z_pair(other)?;
        Ok(a.not_below(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Operand};

    fn tbox(text: &str) -> TBox {
        text.parse().unwrap()
    }

    fn stbox(text: &str) -> STBox {
        text.parse().unwrap()
    }

    #[test]
    fn value_directions() {
        let a = tbox("TBOX((0,),(2,))");
        let b = tbox("TBOX((3,),(5,))");
        let c = tbox("TBOX((2,),(5,))");

        assert!(a.left(&b).unwrap());
        assert!(!a.left(&c).unwrap());
        assert!(a.overleft(&c).unwrap());
        assert!(b.right(&a).unwrap());
        assert!(!c.right(&a).unwrap());
        assert!(c.overright(&a).unwrap());
        assert!(!a.overright(&c).unwrap());
    }

    #[test]
    fn time_directions() {
        let a = tbox("TBOX((,2020-01-01),(,2020-01-02))");
        let b = tbox("TBOX((1,2020-01-03),(2,2020-01-04))");

        assert!(a.before(&b).unwrap());
        assert!(a.overbefore(&b).unwrap());
        assert!(b.after(&a).unwrap());
        assert!(b.overafter(&a).unwrap());
        assert!(!b.before(&a).unwrap());
    }

    #[test]
    fn missing_dimension_is_an_error() {
        let value = tbox("TBOX((0,),(2,))");
        let time = tbox("TBOX((,2020-01-01),(,2020-01-02))");

        assert!(matches!(
            value.before(&time),
            Err(Error::MissingDimension {
                dimension: Dimension::T,
                operand: Operand::Left
            })
        ));
        assert!(matches!(
            value.left(&time),
            Err(Error::MissingDimension {
                dimension: Dimension::X,
                operand: Operand::Right
            })
        ));
    }

    #[test]
    fn spatial_directions() {
        let a = stbox("STBOX Z((0,0,0),(1,1,1))");
        let b = stbox("STBOX Z((2,2,2),(3,3,3))");

        assert!(a.left(&b).unwrap());
        assert!(a.below(&b).unwrap());
        assert!(a.overbelow(&b).unwrap());
        assert!(b.above(&a).unwrap());
        assert!(b.overabove(&a).unwrap());
        assert!(a.front(&b).unwrap());
        assert!(a.overfront(&b).unwrap());
        assert!(b.back(&a).unwrap());
        assert!(b.overback(&a).unwrap());
        assert!(!a.back(&b).unwrap());
    }

    #[test]
    fn spatial_missing_dimension() {
        let flat = stbox("STBOX((0,0),(1,1))");
        let cube = stbox("STBOX Z((2,2,2),(3,3,3))");

        assert!(matches!(
            flat.front(&cube),
            Err(Error::MissingDimension {
                dimension: Dimension::Z,
                operand: Operand::Left
            })
        ));
        assert!(flat.below(&cube).unwrap());
        assert!(matches!(
            flat.before(&cube),
            Err(Error::MissingDimension {
                dimension: Dimension::T,
                ..
            })
        ));
        assert!(matches!(
            flat.left(&flat.with_srid(4326)),
            Err(Error::SridMismatch { .. })
        ));
    }
}
