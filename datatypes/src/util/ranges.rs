/// `value` lies within the closed range `[min, max]`.
pub fn value_in_range_inclusive<T>(value: T, min: T, max: T) -> bool
where
    T: PartialOrd,
{
    (value >= min) && (value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed() {
        assert!(value_in_range_inclusive(1.0, 1.0, 2.0));
        assert!(value_in_range_inclusive(2.0, 1.0, 2.0));
        assert!(!value_in_range_inclusive(2.5, 1.0, 2.0));
        assert!(!value_in_range_inclusive(f64::NAN, 1.0, 2.0));
    }
}
