//! "Nice number" tick math: where to place major and minor tick marks
//! on an axis so the labels land on values humans find easy to read.

/// A zero, negative or non-finite tick step.
///
/// Passing such a step is a programming error; it is reported instead of
/// being silently "fixed" so it gets caught during development.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("invalid tick step {step} (must be positive and finite)")]
pub struct InvalidTickStep {
    pub step: f64,
}

/// Default cap on the number of ticks produced by [`create_tick_values`].
///
/// Guards against degenerate (near-zero) steps over huge ranges.
pub const DEFAULT_MAX_TICKS: usize = 1000;

/// Create an ordered sequence of tick values covering `from..=to` with the given step.
///
/// The first value is the largest multiple of `step` at or before `from`;
/// subsequent values step by `step`. `to` is included when it lands within
/// a tolerance of `step * 1e-3`. If `to < from` the direction is negated
/// automatically. At most `max_ticks` values are produced.
pub fn create_tick_values(
    from: f64,
    to: f64,
    step: f64,
    max_ticks: usize,
) -> Result<Vec<f64>, InvalidTickStep> {
    if !(step.is_finite() && step > 0.0) {
        return Err(InvalidTickStep { step });
    }

    let step = if to < from { -step } else { step };
    let epsilon = step.abs() * 1e-3;

    // Largest multiple of `step` at or before `from` (in the step direction).
    let start = (from / step).floor() * step;

    let mut values = Vec::new();
    for i in 0..max_ticks {
        let value = start + step * i as f64;
        // Keep exact multiples exact where possible:
        let value = if value.abs() < f64::EPSILON { 0.0 } else { value };

        let past_end = if step > 0.0 {
            value > to + epsilon
        } else {
            value < to - epsilon
        };
        if past_end {
            break;
        }
        values.push(value);
    }

    Ok(values)
}

/// [`create_tick_values`] with the [`DEFAULT_MAX_TICKS`] cap.
#[inline]
pub fn create_default_tick_values(
    from: f64,
    to: f64,
    step: f64,
) -> Result<Vec<f64>, InvalidTickStep> {
    create_tick_values(from, to, step, DEFAULT_MAX_TICKS)
}

/// Round `span / target_count` up to a "nice" 1-2-5 step size.
///
/// E.g. a span of 40 with a target of 8 intervals yields a step of 5.
/// A zero or non-finite span yields a step of 1 so callers always get a
/// usable step back.
pub fn nice_interval(span: f64, target_count: usize) -> f64 {
    let target_count = target_count.max(1);
    let raw = span.abs() / target_count as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }

    let magnitude = 10.0_f64.powi(raw.log10().floor() as i32);
    let residual = raw / magnitude;
    let nice = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

/// Infer the minor tick interval from a major interval.
///
/// Major intervals of the form `2 * 10^k` divide into quarters, everything
/// else into fifths. Together with 1-2-5 major steps this reproduces the
/// conventional minor spacing of most charting systems.
pub fn calculate_minor_interval(major_interval: f64) -> f64 {
    debug_assert!(major_interval > 0.0);
    let exponent = (major_interval / 2.0).log10();
    if crate::almost_equal(exponent, exponent.round(), 1e-9) {
        major_interval / 4.0
    } else {
        major_interval / 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_values_are_deterministic_multiples() {
        let ticks = create_default_tick_values(0.0, 40.0, 10.0).unwrap();
        assert_eq!(ticks, vec![0.0, 10.0, 20.0, 30.0, 40.0]);

        // First value is the largest multiple of `step` at or before `from`:
        let ticks = create_default_tick_values(0.4, 2.0, 0.5).unwrap();
        assert_eq!(ticks.len(), 5);
        assert!((ticks[0] - 0.0).abs() < 1e-12);
        for pair in ticks.windows(2) {
            assert!((pair[1] - pair[0] - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn tick_values_include_end_within_tolerance() {
        // 0.1 steps accumulate floating error; 1.0 must still be included.
        let ticks = create_default_tick_values(0.0, 1.0, 0.1).unwrap();
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn tick_values_reverse_direction() {
        let ticks = create_default_tick_values(10.0, -10.0, 5.0).unwrap();
        assert_eq!(ticks, vec![10.0, 5.0, 0.0, -5.0, -10.0]);
    }

    #[test]
    fn tick_values_cap_degenerate_steps() {
        let ticks = create_tick_values(0.0, 1.0, 1e-9, 100).unwrap();
        assert_eq!(ticks.len(), 100);
    }

    #[test]
    fn non_positive_step_is_an_error() {
        assert_eq!(
            create_default_tick_values(0.0, 1.0, 0.0),
            Err(InvalidTickStep { step: 0.0 })
        );
        assert!(create_default_tick_values(0.0, 1.0, -1.0).is_err());
        assert!(create_default_tick_values(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn nice_intervals_follow_1_2_5() {
        assert_eq!(nice_interval(10.0, 10), 1.0);
        assert_eq!(nice_interval(40.0, 8), 5.0);
        assert_eq!(nice_interval(100.0, 8), 20.0);
        assert_eq!(nice_interval(0.7, 10), 0.1);
    }

    #[test]
    fn nice_interval_survives_bad_spans() {
        assert_eq!(nice_interval(0.0, 10), 1.0);
        assert_eq!(nice_interval(f64::INFINITY, 10), 1.0);
        assert_eq!(nice_interval(f64::NAN, 10), 1.0);
    }

    #[test]
    fn minor_interval_rule() {
        assert_eq!(calculate_minor_interval(2.0), 0.5);
        assert_eq!(calculate_minor_interval(20.0), 5.0);
        assert_eq!(calculate_minor_interval(5.0), 1.0);
        assert_eq!(calculate_minor_interval(50.0), 10.0);
        assert_eq!(calculate_minor_interval(0.2), 0.05);
        assert_eq!(calculate_minor_interval(1.0), 0.2);
    }
}
