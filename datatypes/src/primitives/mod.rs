mod bound;
mod dimensions;
mod extent;
mod period;
mod period_set;
mod stbox;
mod tbox;
mod time_instance;

pub use bound::{Bound, compare_bounds};
pub use dimensions::{Dimension, DimensionFlags};
pub use extent::Extent;
pub use period::Period;
pub use period_set::{normalize_periods, period_extent};
pub use stbox::{STBox, SpatialExtent, stbox_extent};
pub use tbox::{TBox, tbox_extent};
pub use time_instance::{TimeInstance, time_diff_seconds};

pub(crate) use dimensions::{ensure_common_dimension, require_dimension};
