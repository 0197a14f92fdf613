use std::collections::HashSet;

use crate::workout::{Coordinates, Workout, WorkoutId};

/// The interactive map widget, as far as the tracker needs it.
pub trait MapAdapter {
    /// Adds a marker with an open popup for `workout`. Markers are never removed.
    fn place_marker(&mut self, workout: &Workout);

    fn center_on(&mut self, at: Coordinates, zoom: f64, animate: bool);
}

/// Keeps the map's markers in step with the workout list.
///
/// Until [`MarkerLayer::attach`] is called the map is not ready and every
/// operation is a no-op, so callers never have to check readiness themselves.
pub struct MarkerLayer<M: MapAdapter> {
    adapter: Option<M>,
    placed: HashSet<WorkoutId>,
    zoom: f64,
}

impl<M: MapAdapter> MarkerLayer<M> {
    pub fn new(zoom: f64) -> Self {
        Self {
            adapter: None,
            placed: HashSet::new(),
            zoom,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn adapter(&self) -> Option<&M> {
        self.adapter.as_ref()
    }

    /// Takes over a freshly initialized map and draws every workout loaded so far.
    pub fn attach(&mut self, adapter: M, workouts: &[Workout]) -> usize {
        self.adapter = Some(adapter);
        self.placed.clear();
        self.sync(workouts)
    }

    /// Places markers for workouts that don't have one yet. Returns how many were added.
    pub fn sync(&mut self, workouts: &[Workout]) -> usize {
        let Some(adapter) = self.adapter.as_mut() else {
            return 0;
        };

        let mut added = 0;
        for workout in workouts {
            if self.placed.insert(workout.id().clone()) {
                adapter.place_marker(workout);
                added += 1;
            }
        }
        added
    }

    pub fn center_on(&mut self, at: Coordinates, animate: bool) {
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.center_on(at, self.zoom, animate);
        }
    }
}
