use super::TimeInstance;
use std::cmp::Ordering;

/// A period endpoint together with its inclusivity and its role.
///
/// Bounds are only used to compare endpoints that may stem from different
/// periods and play different roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bound {
    pub value: TimeInstance,
    pub inclusive: bool,
    pub is_lower: bool,
}

impl Bound {
    pub fn lower(value: TimeInstance, inclusive: bool) -> Self {
        Self {
            value,
            inclusive,
            is_lower: true,
        }
    }

    pub fn upper(value: TimeInstance, inclusive: bool) -> Self {
        Self {
            value,
            inclusive,
            is_lower: false,
        }
    }
}

/// Total order over bounds.
///
/// Values are compared first. At equal values an exclusive lower bound sorts
/// just after the point and an exclusive upper bound just before it, while
/// two inclusive bounds are equal regardless of their roles (`a]` touches `[a`).
///
/// # Examples
///
/// ```
/// use chronobox_datatypes::primitives::{Bound, TimeInstance, compare_bounds};
/// use std::cmp::Ordering;
///
/// let t = TimeInstance::from_micros(0).unwrap();
///
/// assert_eq!(compare_bounds(&Bound::lower(t, true), &Bound::lower(t, false)), Ordering::Less);
/// assert_eq!(compare_bounds(&Bound::upper(t, true), &Bound::upper(t, false)), Ordering::Greater);
/// assert_eq!(compare_bounds(&Bound::upper(t, true), &Bound::lower(t, true)), Ordering::Equal);
/// ```
pub fn compare_bounds(b1: &Bound, b2: &Bound) -> Ordering {
    let ordering = b1.value.cmp(&b2.value);
    if ordering != Ordering::Equal {
        return ordering;
    }

    match (b1.inclusive, b2.inclusive) {
        (true, true) => Ordering::Equal,
        (false, false) if b1.is_lower == b2.is_lower => Ordering::Equal,
        (false, _) => exclusive_position(b1),
        (true, false) => exclusive_position(b2).reverse(),
    }
}

/// Where an exclusive bound sits relative to its own value.
fn exclusive_position(bound: &Bound) -> Ordering {
    if bound.is_lower {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}
