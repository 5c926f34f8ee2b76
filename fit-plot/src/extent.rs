/// Range spanned by the finite `values`, widened when degenerate so that
/// it can serve as a chart axis. `None` if no value is finite.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.05 };
        return Some((min - pad, max + pad));
    }
    Some((min, max))
}
