use crate::{error::ValidationError, workout::WorkoutKind};

/// Coerces a form field into a number. Blank text counts as zero and
/// anything unparsable becomes NaN, so both end up rejected or defaulted
/// by [`validate`] rather than by the parser.
pub fn parse_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.;
    }
    raw.parse().unwrap_or(f64::NAN)
}

/// Checks the numbers for a new workout.
///
/// All values must be finite. Distance, duration and cadence are magnitudes
/// and must be strictly positive. Elevation gain is a signed delta (a ride
/// can end lower than it started), so it only has to be finite.
pub fn validate(kind: WorkoutKind, distance: f64, duration: f64, metric: f64) -> Result<(), ValidationError> {
    let metric_field = match kind {
        WorkoutKind::Running => "Cadence",
        WorkoutKind::Cycling => "Elevation gain",
    };

    require_finite("Distance", distance)?;
    require_finite("Duration", duration)?;
    require_finite(metric_field, metric)?;

    require_positive("Distance", distance)?;
    require_positive("Duration", duration)?;
    if kind == WorkoutKind::Running {
        require_positive(metric_field, metric)?;
    }

    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0. {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_cadence_fails() {
        assert_eq!(
            validate(WorkoutKind::Running, 5., 30., -1.),
            Err(ValidationError::NotPositive { field: "Cadence" })
        );
    }

    #[test]
    fn cycling_with_elevation_passes() {
        assert_eq!(validate(WorkoutKind::Cycling, 10., 40., 5.), Ok(()));
    }

    #[test]
    fn elevation_may_be_negative_or_zero() {
        assert_eq!(validate(WorkoutKind::Cycling, 10., 40., -80.), Ok(()));
        assert_eq!(validate(WorkoutKind::Cycling, 10., 40., 0.), Ok(()));
    }

    #[test]
    fn distance_and_duration_must_be_positive_for_both_kinds() {
        for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
            assert_eq!(
                validate(kind, 0., 30., 10.),
                Err(ValidationError::NotPositive { field: "Distance" })
            );
            assert_eq!(
                validate(kind, 5., -30., 10.),
                Err(ValidationError::NotPositive { field: "Duration" })
            );
        }
    }

    #[test]
    fn non_finite_values_fail_first() {
        assert_eq!(
            validate(WorkoutKind::Cycling, 10., 40., f64::NAN),
            Err(ValidationError::NotFinite { field: "Elevation gain" })
        );
        assert_eq!(
            validate(WorkoutKind::Running, f64::INFINITY, 30., -1.),
            Err(ValidationError::NotFinite { field: "Distance" })
        );
    }

    #[test]
    fn parsing_form_text() {
        assert_eq!(parse_number(" 5.5 "), 5.5);
        assert_eq!(parse_number(""), 0.);
        assert_eq!(parse_number("-3"), -3.);
        assert!(parse_number("five").is_nan());
    }
}
