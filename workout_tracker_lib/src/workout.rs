use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lat, coords.lng]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    /// CSS class of the marker popup, colouring its border by kind.
    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(format!("unknown workout kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-specific measurements together with the metric derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    /// `pace` in min/km.
    Running { cadence: f64, pace: f64 },
    /// `speed` in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

impl Activity {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

pub fn compute_pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

pub fn compute_speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.)
}

/// "Running on April 14"
pub fn build_description(kind: WorkoutKind, created_at: &DateTime<FixedOffset>) -> String {
    format!("{} on {}", kind.label(), created_at.format("%B %-d"))
}

/// One row of a list entry, e.g. ("⚡️", "6.0", "min/km").
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// A logged workout.
///
/// Everything except the interaction count is fixed at construction, including
/// the derived metric and the description.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<FixedOffset>,
    coords: Coordinates,
    /// km
    distance: f64,
    /// min
    duration: f64,
    clicks: u32,
    description: String,
    activity: Activity,
}

impl Workout {
    pub fn running(coords: Coordinates, distance: f64, duration: f64, cadence: f64, created_at: DateTime<FixedOffset>) -> Self {
        let activity = Activity::Running {
            cadence,
            pace: compute_pace(distance, duration),
        };
        Self::assemble(WorkoutId::generate(), created_at, coords, distance, duration, 0, None, activity)
    }

    pub fn cycling(coords: Coordinates, distance: f64, duration: f64, elevation_gain: f64, created_at: DateTime<FixedOffset>) -> Self {
        let activity = Activity::Cycling {
            elevation_gain,
            speed: compute_speed(distance, duration),
        };
        Self::assemble(WorkoutId::generate(), created_at, coords, distance, duration, 0, None, activity)
    }

    /// Builds a record from already known parts. A missing description is rebuilt
    /// from the kind and creation date.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        id: WorkoutId,
        created_at: DateTime<FixedOffset>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        clicks: u32,
        description: Option<String>,
        activity: Activity,
    ) -> Self {
        let description = description.unwrap_or_else(|| build_description(activity.kind(), &created_at));
        Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            clicks,
            description,
            activity,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn created_at(&self) -> &DateTime<FixedOffset> {
        &self.created_at
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn record_interaction(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }

    pub fn popup_content(&self) -> String {
        format!("{} {}", self.kind().icon(), self.description)
    }

    pub fn details(&self) -> Vec<Detail> {
        let mut details = vec![Detail::new(self.kind().icon(), self.distance.to_string(), "km")];

        match self.activity {
            Activity::Running { cadence, pace } => {
                details.push(Detail::new("⚡️", format!("{pace:.1}"), "min/km"));
                details.push(Detail::new("🦶🏼", cadence.to_string(), "spm"));
            }
            Activity::Cycling { elevation_gain, speed } => {
                details.push(Detail::new("⚡️", format!("{speed:.1}"), "km/h"));
                details.push(Detail::new("⛰", elevation_gain.to_string(), "m"));
            }
        }

        details
    }
}

#[cfg(test)]
pub(crate) fn test_date(month: u32, day: u32) -> DateTime<FixedOffset> {
    use chrono::TimeZone;

    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2025, month, day, 9, 30, 0)
        .unwrap()
}
