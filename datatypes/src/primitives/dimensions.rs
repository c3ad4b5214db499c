use crate::error::{self, Operand};
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ensure};

/// A single box axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Dimension {
    /// The value axis of a `TBox` or the planar axes of an `STBox`
    #[strum(serialize = "X")]
    X,
    #[strum(serialize = "Z")]
    Z,
    #[strum(serialize = "T")]
    T,
}

/// The set of dimensions a box carries, plus its geodetic interpretation.
///
/// The shape of a box (value only, time only, 2D, 3D, spatiotemporal,
/// geodetic) is fully determined by its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimensionFlags {
    pub has_x: bool,
    pub has_z: bool,
    pub has_t: bool,
    pub geodetic: bool,
}

impl DimensionFlags {
    pub const X: u8 = 0x01;
    pub const Z: u8 = 0x02;
    pub const T: u8 = 0x04;
    pub const GEODETIC: u8 = 0x08;

    const ALL: u8 = Self::X | Self::Z | Self::T | Self::GEODETIC;

    /// The packed flag word.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronobox_datatypes::primitives::DimensionFlags;
    ///
    /// let flags = DimensionFlags { has_x: true, has_z: false, has_t: true, geodetic: false };
    ///
    /// assert_eq!(flags.bits(), DimensionFlags::X | DimensionFlags::T);
    /// assert_eq!(DimensionFlags::from_bits(flags.bits()).unwrap(), flags);
    /// ```
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.has_x {
            bits |= Self::X;
        }
        if self.has_z {
            bits |= Self::Z;
        }
        if self.has_t {
            bits |= Self::T;
        }
        if self.geodetic {
            bits |= Self::GEODETIC;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Result<Self> {
        ensure!(
            bits & !Self::ALL == 0,
            error::InvalidArgument {
                details: format!("unknown dimension flags {bits:#04x}")
            }
        );
        Ok(Self {
            has_x: bits & Self::X != 0,
            has_z: bits & Self::Z != 0,
            has_t: bits & Self::T != 0,
            geodetic: bits & Self::GEODETIC != 0,
        })
    }

    /// The dimensions active on both operands.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self {
            has_x: self.has_x && other.has_x,
            has_z: self.has_z && other.has_z,
            has_t: self.has_t && other.has_t,
            geodetic: self.geodetic && other.geodetic,
        }
    }

    pub fn has(self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::X => self.has_x,
            Dimension::Z => self.has_z,
            Dimension::T => self.has_t,
        }
    }
}

/// Pairs up the extents of `dimension` on both operands, failing with
/// `MissingDimension` if either operand lacks it.
pub(crate) fn require_dimension<T>(
    left: Option<T>,
    right: Option<T>,
    dimension: Dimension,
) -> Result<(T, T)> {
    let left = left.context(error::MissingDimension {
        dimension,
        operand: Operand::Left,
    })?;
    let right = right.context(error::MissingDimension {
        dimension,
        operand: Operand::Right,
    })?;
    Ok((left, right))
}

pub(crate) fn ensure_same_dimensionality(left: DimensionFlags, right: DimensionFlags) -> Result<()> {
    ensure!(
        left.has_x == right.has_x && left.has_z == right.has_z && left.has_t == right.has_t,
        error::DimensionMismatch {
            details: "both boxes must have identical dimensions"
        }
    );
    Ok(())
}

pub(crate) fn ensure_common_dimension(left: DimensionFlags, right: DimensionFlags) -> Result<()> {
    let common = left.intersection(right);
    ensure!(
        common.has_x || common.has_t,
        error::DimensionMismatch {
            details: "the boxes must share at least one dimension"
        }
    );
    Ok(())
}
