use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    error::StorageError,
    workout::{compute_pace, compute_speed, Activity, Coordinates, Workout, WorkoutId, WorkoutKind},
};

/// String key-value storage, e.g. `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// On-disk shape of one workout. Field names match what earlier versions of
/// the app wrote, so their data still loads.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkout {
    #[serde(rename = "type")]
    kind: WorkoutKind,
    id: WorkoutId,
    date: DateTime<FixedOffset>,
    coords: Coordinates,
    distance: f64,
    duration: f64,
    #[serde(default)]
    clicks: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
}

impl From<&Workout> for StoredWorkout {
    fn from(workout: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match *workout.activity() {
            Activity::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            Activity::Cycling { elevation_gain, speed } => (None, None, Some(elevation_gain), Some(speed)),
        };

        Self {
            kind: workout.kind(),
            id: workout.id().clone(),
            date: *workout.created_at(),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            clicks: workout.clicks(),
            description: Some(workout.description().to_owned()),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = StorageError;

    fn try_from(stored: StoredWorkout) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| StorageError::InvalidRecord {
            id: stored.id.to_string(),
            reason: reason.to_owned(),
        };

        if !stored.coords.is_finite() {
            return Err(invalid("coordinates are not finite"));
        }
        if !(stored.distance.is_finite() && stored.distance > 0.) {
            return Err(invalid("distance must be a positive number"));
        }
        if !(stored.duration.is_finite() && stored.duration > 0.) {
            return Err(invalid("duration must be a positive number"));
        }

        // Derived metrics are recomputed rather than trusted.
        let activity = match stored.kind {
            WorkoutKind::Running => {
                let cadence = stored.cadence.filter(|c| c.is_finite()).ok_or_else(|| invalid("missing cadence"))?;
                Activity::Running {
                    cadence,
                    pace: compute_pace(stored.distance, stored.duration),
                }
            }
            WorkoutKind::Cycling => {
                let elevation_gain = stored
                    .elevation_gain
                    .filter(|e| e.is_finite())
                    .ok_or_else(|| invalid("missing elevation gain"))?;
                Activity::Cycling {
                    elevation_gain,
                    speed: compute_speed(stored.distance, stored.duration),
                }
            }
        };

        Ok(Workout::assemble(
            stored.id,
            stored.date,
            stored.coords,
            stored.distance,
            stored.duration,
            stored.clicks,
            stored.description,
            activity,
        ))
    }
}

/// Saves and restores the whole workout list under a single key.
pub struct WorkoutRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrites the stored list with `workouts`.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), StorageError> {
        let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
        let json = serde_json::to_string(&stored)?;
        self.store.set(&self.key, &json)
    }

    /// Reads the stored list back into typed workouts. Nothing stored yet is an
    /// empty list, not an error.
    ///
    /// Records that fail the schema check are skipped so the valid ones survive
    /// the next save. Only an entry that isn't a JSON list at all is an error.
    /// Ids already taken by an earlier record (millisecond ids from old builds
    /// can collide) are replaced with fresh ones.
    pub fn load(&self) -> Result<Vec<Workout>, StorageError> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        // `JSON.stringify(null)` from old builds
        let records: Option<Vec<serde_json::Value>> = serde_json::from_str(&json)?;

        let mut seen = HashSet::new();
        let mut workouts = Vec::new();
        for record in records.unwrap_or_default() {
            let mut stored = match serde_json::from_value::<StoredWorkout>(record) {
                Ok(stored) => stored,
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable stored workout");
                    continue;
                }
            };

            if !seen.insert(stored.id.clone()) {
                let fresh = WorkoutId::generate();
                tracing::warn!(old = %stored.id, new = %fresh, "duplicate stored workout id replaced");
                seen.insert(fresh.clone());
                stored.id = fresh;
            }

            match Workout::try_from(stored) {
                Ok(workout) => workouts.push(workout),
                Err(err) => tracing::warn!(%err, "skipping invalid stored workout"),
            }
        }

        Ok(workouts)
    }

    /// Drops all persisted workouts. In-memory copies are stale afterwards.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}
