use crate::primitives::{Dimension, Period, TimeInstance};
use snafu::Snafu;
use std::convert::Infallible;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("Invalid argument: {}", details))]
    InvalidArgument { details: String },

    #[snafu(display(
        "The period from {} to {} is empty: equal bounds require both bounds to be inclusive",
        lower.inner(),
        upper.inner()
    ))]
    EmptyInterval {
        lower: TimeInstance,
        upper: TimeInstance,
    },

    #[snafu(display("The {} operand must have the {} dimension", operand, dimension))]
    MissingDimension {
        dimension: Dimension,
        operand: Operand,
    },

    #[snafu(display("The boxes must be of the same dimensionality: {}", details))]
    DimensionMismatch { details: &'static str },

    #[snafu(display("Operation on mixed SRID: {} and {}", left, right))]
    SridMismatch { left: i32, right: i32 },

    #[snafu(display("Operation on mixed planar and geodetic coordinates"))]
    GeodeticMismatch,

    #[snafu(display(
        "{} cannot be unioned with {} since they are neither intersecting nor contiguous",
        left,
        right
    ))]
    NonContiguousUnion { left: String, right: String },

    #[snafu(display(
        "Could not parse \"{}\" at position {}: {}",
        input,
        position,
        reason
    ))]
    ParseError {
        input: String,
        position: usize,
        reason: String,
    },

    #[snafu(display(
        "Invalid binary layout for {}: expected {} bytes, found {}",
        type_name,
        expected,
        found
    ))]
    InvalidBinaryLayout {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    #[snafu(display("Time instance must be between {} and {}, but is {}", min.inner(), max.inner(), is))]
    TimeInstanceOutOfBounds {
        min: TimeInstance,
        max: TimeInstance,
        is: i64,
    },
}

/// The side of a binary operator an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operand {
    Left,
    Right,
}

impl Error {
    pub(crate) fn non_contiguous_periods(left: &Period, right: &Period) -> Self {
        Self::NonContiguousUnion {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        unreachable!("This function cannot be called on a non-failing type")
    }
}
