use chrono::{DateTime, FixedOffset, Local};

use crate::{
    config::TrackerConfig,
    error::TrackerError,
    form::{FormInput, FormState},
    storage::{KeyValueStore, WorkoutRepository},
    workout::{Coordinates, Workout, WorkoutId},
};

/// Application state: the logged workouts, the entry form and where they are saved.
pub struct Tracker<S: KeyValueStore> {
    config: TrackerConfig,
    repository: WorkoutRepository<S>,
    workouts: Vec<Workout>,
    form: FormState,
    /// Set when the stored entry could not be read at all. Saving would
    /// overwrite it, so it is refused until the user clears storage.
    save_blocked: bool,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(store: S, config: TrackerConfig) -> Self {
        let repository = WorkoutRepository::new(store, config.storage_key.clone());
        Self {
            config,
            repository,
            workouts: Vec::new(),
            form: FormState::Idle,
            save_blocked: false,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn repository(&self) -> &WorkoutRepository<S> {
        &self.repository
    }

    /// Workouts in the order they were logged.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Replaces the in-memory list with what was persisted. On error the
    /// current list is left as it was and saving is blocked until [`Tracker::clear`].
    pub fn restore(&mut self) -> Result<usize, TrackerError> {
        match self.repository.load() {
            Ok(workouts) => {
                self.workouts = workouts;
                self.save_blocked = false;
            }
            Err(err) => {
                tracing::warn!(%err, "stored workouts rejected");
                self.save_blocked = true;
                return Err(err.into());
            }
        }
        tracing::debug!(count = self.workouts.len(), "restored workouts");
        Ok(self.workouts.len())
    }

    /// Opens the form for a workout at the clicked location.
    pub fn map_clicked(&mut self, at: Coordinates) {
        self.form.show(at);
    }

    pub fn submit(&mut self, input: &FormInput) -> Result<&Workout, TrackerError> {
        self.submit_at(input, Local::now().fixed_offset())
    }

    /// Validates the form and logs a workout at the pending location.
    ///
    /// On failure nothing changes and the form stays open. Saving is left to
    /// [`Tracker::persist`], which the caller runs once the new workout is drawn.
    pub fn submit_at(&mut self, input: &FormInput, created_at: DateTime<FixedOffset>) -> Result<&Workout, TrackerError> {
        let at = self.form.pending_location().ok_or(TrackerError::NoPendingLocation)?;
        let draft = input.to_draft()?;

        let workout = draft.into_workout(at, created_at);
        tracing::debug!(id = %workout.id(), kind = workout.kind().as_str(), "workout added");

        self.workouts.push(workout);
        self.form.hide();

        Ok(&self.workouts[self.workouts.len() - 1])
    }

    /// Writes the full list to storage.
    pub fn persist(&mut self) -> Result<(), TrackerError> {
        if self.save_blocked {
            return Err(TrackerError::SaveBlocked);
        }
        self.repository.save(&self.workouts)?;
        Ok(())
    }

    /// Looks up a list entry, counts the interaction and returns where to move the map.
    pub fn select(&mut self, id: &WorkoutId) -> Option<Coordinates> {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id() == id) else {
            tracing::debug!(%id, "selected workout not found");
            return None;
        };
        workout.record_interaction();
        Some(workout.coords())
    }

    /// Deletes every workout. The application should be restarted afterwards.
    pub fn clear(&mut self) -> Result<(), TrackerError> {
        self.repository.clear()?;
        self.workouts.clear();
        self.form.hide();
        self.save_blocked = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        init_test_tracing,
        map::{tests::RecordingMap, MarkerLayer},
        storage::MemoryStore,
        workout::{test_date, Activity, WorkoutKind},
    };

    fn tracker() -> Tracker<MemoryStore> {
        init_test_tracing();
        Tracker::new(MemoryStore::new(), TrackerConfig::default())
    }

    fn input(kind: WorkoutKind, distance: &str, duration: &str, metric: &str) -> FormInput {
        FormInput {
            kind,
            distance: distance.into(),
            duration: duration.into(),
            cadence: metric.into(),
            elevation: metric.into(),
        }
    }

    #[test]
    fn running_submission_end_to_end() {
        let mut tracker = tracker();
        let mut layer = MarkerLayer::new(tracker.config().zoom_level);
        layer.attach(RecordingMap::default(), tracker.workouts());

        tracker.map_clicked(Coordinates::new(51.5, -0.1));
        assert!(tracker.form().is_open());

        let workout = tracker
            .submit_at(&input(WorkoutKind::Running, "5", "30", "178"), test_date(6, 12))
            .unwrap()
            .clone();
        assert_eq!(*workout.activity(), Activity::Running { cadence: 178., pace: 6.0 });

        assert_eq!(layer.sync(tracker.workouts()), 1);
        tracker.persist().unwrap();

        assert_eq!(tracker.workouts(), &[workout.clone()]);
        assert_eq!(layer.adapter().unwrap().markers.len(), 1);
        assert_eq!(*tracker.form(), FormState::Idle);

        let stored = tracker.repository().load().unwrap();
        assert_eq!(stored, vec![workout]);
        assert_eq!(tracker.repository().store().len(), 1);
    }

    #[test]
    fn invalid_input_keeps_form_open() {
        let mut tracker = tracker();
        tracker.map_clicked(Coordinates::new(1., 2.));

        let err = tracker
            .submit_at(&input(WorkoutKind::Running, "5", "30", "-1"), test_date(1, 1))
            .unwrap_err();

        assert_eq!(err.to_string(), "Cadence must be a positive number");
        assert!(tracker.workouts().is_empty());
        assert_eq!(tracker.form().pending_location(), Some(Coordinates::new(1., 2.)));
        assert!(tracker.repository().store().is_empty());
    }

    #[test]
    fn submit_without_map_click_is_rejected() {
        let mut tracker = tracker();
        let result = tracker.submit_at(&input(WorkoutKind::Cycling, "10", "40", "5"), test_date(1, 1));
        assert!(matches!(result, Err(TrackerError::NoPendingLocation)));
    }

    #[test]
    fn same_instant_submissions_get_distinct_ids() {
        let mut tracker = tracker();
        let now = test_date(8, 8);

        tracker.map_clicked(Coordinates::new(1., 1.));
        let first = tracker.submit_at(&input(WorkoutKind::Running, "5", "30", "170"), now).unwrap().id().clone();
        tracker.map_clicked(Coordinates::new(1., 1.));
        let second = tracker.submit_at(&input(WorkoutKind::Running, "5", "30", "170"), now).unwrap().id().clone();

        assert_ne!(first, second);
    }

    #[test]
    fn restore_keeps_order_and_behaviour() {
        let mut tracker = tracker();
        for (lat, kind) in [(1., WorkoutKind::Running), (2., WorkoutKind::Cycling), (3., WorkoutKind::Running)] {
            tracker.map_clicked(Coordinates::new(lat, 0.));
            tracker.submit_at(&input(kind, "10", "50", "90"), test_date(2, 2)).unwrap();
        }
        tracker.persist().unwrap();

        let store = tracker.repository().store().clone();
        let mut reloaded = Tracker::new(store, TrackerConfig::default());

        assert_eq!(reloaded.restore().unwrap(), 3);
        let lats: Vec<f64> = reloaded.workouts().iter().map(|w| w.coords().lat).collect();
        assert_eq!(lats, vec![1., 2., 3.]);

        let id = reloaded.workouts()[1].id().clone();
        assert_eq!(reloaded.select(&id), Some(Coordinates::new(2., 0.)));
        assert_eq!(reloaded.workouts()[1].clicks(), 1);
    }

    #[test]
    fn markers_for_restored_workouts_wait_for_the_map() {
        let mut tracker = tracker();
        tracker.map_clicked(Coordinates::new(5., 5.));
        tracker.submit_at(&input(WorkoutKind::Cycling, "10", "40", "5"), test_date(3, 3)).unwrap();
        tracker.persist().unwrap();

        let mut reloaded = Tracker::new(tracker.repository().store().clone(), TrackerConfig::default());
        reloaded.restore().unwrap();

        let mut layer = MarkerLayer::new(13.);
        assert_eq!(layer.sync(reloaded.workouts()), 0);
        assert_eq!(layer.attach(RecordingMap::default(), reloaded.workouts()), 1);
    }

    #[test]
    fn selecting_unknown_id_does_nothing() {
        let mut tracker = tracker();
        assert_eq!(tracker.select(&WorkoutId::from("missing")), None);
    }

    #[test]
    fn corrupt_storage_leaves_list_untouched() {
        init_test_tracing();
        let mut tracker = Tracker::new(MemoryStore::with_entry("workouts", "{not json"), TrackerConfig::default());

        assert!(matches!(tracker.restore(), Err(TrackerError::Storage(_))));
        assert!(tracker.workouts().is_empty());
    }

    #[test]
    fn unreadable_storage_is_not_overwritten() {
        init_test_tracing();
        let mut tracker = Tracker::new(MemoryStore::with_entry("workouts", "{not json"), TrackerConfig::default());
        assert!(tracker.restore().is_err());

        tracker.map_clicked(Coordinates::new(1., 1.));
        tracker.submit_at(&input(WorkoutKind::Running, "5", "30", "178"), test_date(1, 1)).unwrap();

        assert!(matches!(tracker.persist(), Err(TrackerError::SaveBlocked)));
        assert_eq!(tracker.repository().store().get("workouts").unwrap().as_deref(), Some("{not json"));

        tracker.clear().unwrap();
        tracker.persist().unwrap();
        assert!(tracker.repository().load().unwrap().is_empty());
    }

    #[test]
    fn valid_stored_workouts_survive_a_bad_neighbour() {
        init_test_tracing();
        let json = r#"[
            {"date":"2024-02-03T10:00:00Z","id":"good","coords":[1,2],"distance":5,"duration":30,
             "type":"running","cadence":170},
            {"date":"2024-02-04T10:00:00Z","id":"bad","coords":[1,2],"distance":10,"duration":40,
             "type":"cycling"}
        ]"#;
        let mut tracker = Tracker::new(MemoryStore::with_entry("workouts", json), TrackerConfig::default());

        assert_eq!(tracker.restore().unwrap(), 1);

        tracker.map_clicked(Coordinates::new(3., 3.));
        tracker.submit_at(&input(WorkoutKind::Cycling, "10", "40", "5"), test_date(2, 5)).unwrap();
        tracker.persist().unwrap();

        let ids: Vec<String> = tracker.repository().load().unwrap().iter().map(|w| w.id().to_string()).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], "good");
    }

    #[test]
    fn clear_then_restore_is_empty() {
        let mut tracker = tracker();
        tracker.map_clicked(Coordinates::new(1., 1.));
        tracker.submit_at(&input(WorkoutKind::Running, "5", "30", "178"), test_date(1, 1)).unwrap();
        tracker.persist().unwrap();

        tracker.clear().unwrap();

        assert!(tracker.workouts().is_empty());
        assert_eq!(tracker.restore().unwrap(), 0);
    }
}
