use mapfit_domain::{
    Cadence, Distance, Duration, Elevation, Kind, Position, Store, Workout, WorkoutError,
    WorkoutID, WorkoutRepository,
};

use crate::{Map, Settings};

/// Wires the workout store to the map widget.
///
/// The DOM shell forwards user events to these methods and renders the
/// workout list from `workouts`/`find_workout`; everything the map
/// widget shows goes through here.
pub struct App<R, M> {
    store: Store<R>,
    map: M,
    settings: Settings,
}

impl<R: WorkoutRepository, M: Map> App<R, M> {
    pub fn new(repository: R, map: M, settings: Settings) -> Self {
        Self {
            store: Store::new(repository),
            map,
            settings,
        }
    }

    /// Restores the persisted workouts and places a marker for each.
    pub fn start(&mut self) {
        self.store.load();
        for workout in self.store.workouts() {
            self.render_marker(workout);
        }
    }

    pub fn add_running(
        &mut self,
        position: Position,
        distance: &str,
        duration: &str,
        cadence: &str,
    ) -> Result<WorkoutID, WorkoutError> {
        let workout = Workout::running(
            position,
            Distance::try_from(distance)?,
            Duration::try_from(duration)?,
            Cadence::try_from(cadence)?,
        );
        Ok(self.add_workout(workout))
    }

    pub fn add_cycling(
        &mut self,
        position: Position,
        distance: &str,
        duration: &str,
        elevation_gain: &str,
    ) -> Result<WorkoutID, WorkoutError> {
        let workout = Workout::cycling(
            position,
            Distance::try_from(distance)?,
            Duration::try_from(duration)?,
            Elevation::try_from(elevation_gain)?,
        );
        Ok(self.add_workout(workout))
    }

    /// Removes the workout and redraws the remaining markers, as the
    /// widget's markers carry no workout ids.
    pub fn remove_workout(&mut self, id: WorkoutID) -> bool {
        if !self.store.remove(id) {
            return false;
        }
        self.map.remove_all_markers();
        for workout in self.store.workouts() {
            self.render_marker(workout);
        }
        true
    }

    pub fn remove_all_workouts(&mut self) {
        self.store.clear();
        self.map.remove_all_markers();
    }

    /// Centers the map on the workout's position.
    pub fn focus_workout(&self, id: WorkoutID) -> bool {
        let Some(workout) = self.store.find(id) else {
            return false;
        };
        self.map.focus_on(workout.position, self.settings.map_zoom);
        true
    }

    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        self.store.workouts()
    }

    #[must_use]
    pub fn find_workout(&self, id: WorkoutID) -> Option<&Workout> {
        self.store.find(id)
    }

    fn add_workout(&mut self, workout: Workout) -> WorkoutID {
        self.render_marker(&workout);
        self.store.append(workout)
    }

    fn render_marker(&self, workout: &Workout) {
        self.map
            .add_marker(workout.position, &marker_label(workout), workout.kind().into());
    }
}

#[must_use]
pub fn marker_label(workout: &Workout) -> String {
    let icon = match workout.kind() {
        Kind::Running => "🏃‍♂️",
        Kind::Cycling => "🚴",
    };
    format!("{icon} {workout}")
}
