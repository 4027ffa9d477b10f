// Percentile standing of one value within a reference column.

/// Share of `population` the value beats, times 100, truncated.
///
/// For an inverted (lower-is-better) metric, a reference value beats the
/// player when it is strictly greater; otherwise when strictly less. Ties
/// count on neither side. An empty population yields 0.
pub fn percentile<I>(value: f64, population: I, inverted: bool) -> u32
where
    I: IntoIterator<Item = f64>,
{
    let mut n = 0usize;
    let mut beaten = 0usize;
    for reference in population {
        n += 1;
        let below = if inverted {
            reference > value
        } else {
            reference < value
        };
        if below {
            beaten += 1;
        }
    }
    if n == 0 {
        return 0;
    }
    ((beaten as f64 / n as f64) * 100.0) as u32
}
