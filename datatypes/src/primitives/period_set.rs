use super::period::{Period, PeriodBuilder};

/// Reduces a collection of periods to its canonical form: sorted, pairwise
/// disjoint and pairwise non-adjacent.
///
/// Periods that overlap or touch are merged, periods separated by a gap (even
/// a single missing instant) are kept apart. The input is left untouched.
///
/// # Examples
///
/// ```
/// use chronobox_datatypes::primitives::{Period, normalize_periods};
///
/// let periods = [
///     Period::new(5, 6, true, true).unwrap(),
///     Period::new(0, 2, true, false).unwrap(),
///     Period::new(2, 3, true, true).unwrap(),
/// ];
///
/// assert_eq!(
///     normalize_periods(&periods),
///     vec![
///         Period::new(0, 3, true, true).unwrap(),
///         Period::new(5, 6, true, true).unwrap(),
///     ]
/// );
/// ```
pub fn normalize_periods(periods: &[Period]) -> Vec<Period> {
    let mut sorted = periods.to_vec();
    sorted.sort_unstable();

    let mut sorted = sorted.into_iter();
    let Some(first) = sorted.next() else {
        return Vec::new();
    };

    let mut normalized = Vec::new();
    let mut current = PeriodBuilder::new(&first);

    for next in sorted {
        if current.connects(&next) {
            current.expand(&next);
        } else {
            normalized.push(current.finish());
            current = PeriodBuilder::new(&next);
        }
    }
    normalized.push(current.finish());

    tracing::trace!(
        input = periods.len(),
        output = normalized.len(),
        "normalized periods"
    );

    normalized
}

/// Compute the super-union of all input periods, `None` for an empty input
pub fn period_extent<'p, I: IntoIterator<Item = &'p Period>>(periods: I) -> Option<Period> {
    let mut periods = periods.into_iter();
    let mut extent = PeriodBuilder::new(periods.next()?);

    for period in periods {
        extent.expand(period);
    }

    Some(extent.finish())
}
