use chrono::{DateTime, FixedOffset};

use crate::{
    error::ValidationError,
    validation::{parse_number, validate},
    workout::{Coordinates, Workout, WorkoutKind},
};

/// The kind-specific input currently shown in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Cadence,
    Elevation,
}

impl MetricField {
    pub fn for_kind(kind: WorkoutKind) -> Self {
        match kind {
            WorkoutKind::Running => MetricField::Cadence,
            WorkoutKind::Cycling => MetricField::Elevation,
        }
    }
}

/// Raw text of the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }
}

impl FormInput {
    pub fn visible_metric(&self) -> MetricField {
        MetricField::for_kind(self.kind)
    }

    /// Switches between the cadence and elevation rows. Typed values are kept.
    pub fn set_kind(&mut self, kind: WorkoutKind) {
        self.kind = kind;
    }

    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }

    pub fn to_draft(&self) -> Result<WorkoutDraft, ValidationError> {
        let distance = parse_number(&self.distance);
        let duration = parse_number(&self.duration);
        let metric = match self.visible_metric() {
            MetricField::Cadence => parse_number(&self.cadence),
            MetricField::Elevation => parse_number(&self.elevation),
        };

        validate(self.kind, distance, duration, metric)?;

        Ok(WorkoutDraft {
            kind: self.kind,
            distance,
            duration,
            metric,
        })
    }
}

/// Validated numbers waiting for a location and timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    /// Cadence for running, elevation gain for cycling.
    pub metric: f64,
}

impl WorkoutDraft {
    pub fn into_workout(self, at: Coordinates, created_at: DateTime<FixedOffset>) -> Workout {
        match self.kind {
            WorkoutKind::Running => Workout::running(at, self.distance, self.duration, self.metric, created_at),
            WorkoutKind::Cycling => Workout::cycling(at, self.distance, self.duration, self.metric, created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// The map was clicked and the form is open for a workout at `at`.
    AwaitingInput { at: Coordinates },
}

impl FormState {
    pub fn show(&mut self, at: Coordinates) {
        *self = FormState::AwaitingInput { at };
    }

    pub fn hide(&mut self) {
        *self = FormState::Idle;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormState::AwaitingInput { .. })
    }

    pub fn pending_location(&self) -> Option<Coordinates> {
        match self {
            FormState::Idle => None,
            FormState::AwaitingInput { at } => Some(*at),
        }
    }
}
