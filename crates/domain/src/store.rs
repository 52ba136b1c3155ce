use log::warn;

use crate::{ReadError, Workout, WorkoutID, WriteError};

/// Durable slot holding the serialized workout sequence.
///
/// An absent slot reads as an empty sequence; `write_workouts` replaces
/// the whole slot in one step and `delete_workouts` erases it entirely.
pub trait WorkoutRepository {
    fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    fn write_workouts(&self, workouts: &[Workout]) -> Result<(), WriteError>;
    fn delete_workouts(&self) -> Result<(), WriteError>;
}

/// The canonical ordered collection of workouts for the current session.
///
/// Every mutation is mirrored into the durable slot right away. When the
/// mirror cannot be written, the in-memory sequence stays authoritative
/// for the rest of the session and the failure is logged as a warning.
pub struct Store<R> {
    repository: R,
    workouts: Vec<Workout>,
}

impl<R: WorkoutRepository> Store<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            workouts: Vec::new(),
        }
    }

    /// Replaces the in-memory sequence with the persisted one.
    ///
    /// An unreadable slot leaves the sequence empty, equivalent to a
    /// first run.
    pub fn load(&mut self) {
        match self.repository.read_workouts() {
            Ok(workouts) => self.workouts = workouts,
            Err(err) => {
                warn!("failed to read workouts: {err}");
                self.workouts.clear();
            }
        }
    }

    pub fn append(&mut self, workout: Workout) -> WorkoutID {
        let id = workout.id;
        self.workouts.push(workout);
        self.store_workouts();
        id
    }

    /// Removes the workout with the given id, if present.
    pub fn remove(&mut self, id: WorkoutID) -> bool {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            return false;
        };
        self.workouts.remove(index);
        self.store_workouts();
        true
    }

    /// Empties the sequence and erases the durable slot.
    pub fn clear(&mut self) {
        self.workouts.clear();
        if let Err(err) = self.repository.delete_workouts() {
            warn!("failed to delete workouts: {err}");
        }
    }

    pub fn persist(&self) -> Result<(), WriteError> {
        self.repository.write_workouts(&self.workouts)
    }

    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    #[must_use]
    pub fn find(&self, id: WorkoutID) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    fn store_workouts(&self) {
        if let Err(err) = self.persist() {
            warn!("failed to write workouts: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Cadence, Distance, Duration, Elevation, Kind, Position, StorageError};

    #[derive(Default)]
    struct FakeRepository {
        slot: RefCell<Option<Vec<Workout>>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl WorkoutRepository for Rc<FakeRepository> {
        fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            if self.fail_reads {
                return Err(StorageError::Corrupt.into());
            }
            Ok(self.slot.borrow().clone().unwrap_or_default())
        }

        fn write_workouts(&self, workouts: &[Workout]) -> Result<(), WriteError> {
            if self.fail_writes {
                return Err(StorageError::Unavailable.into());
            }
            *self.slot.borrow_mut() = Some(workouts.to_vec());
            Ok(())
        }

        fn delete_workouts(&self) -> Result<(), WriteError> {
            *self.slot.borrow_mut() = None;
            Ok(())
        }
    }

    fn store(repository: &Rc<FakeRepository>) -> Store<Rc<FakeRepository>> {
        Store::new(Rc::clone(repository))
    }

    fn running() -> Workout {
        Workout::running(
            POSITION,
            Distance::new(5.0).unwrap(),
            Duration::new(30.0).unwrap(),
            Cadence::new(150.0).unwrap(),
        )
    }

    fn cycling() -> Workout {
        Workout::cycling(
            POSITION,
            Distance::new(20.0).unwrap(),
            Duration::new(60.0).unwrap(),
            Elevation::new(100.0).unwrap(),
        )
    }

    const POSITION: Position = Position {
        latitude: 10.0,
        longitude: 20.0,
    };

    #[test]
    fn test_append_and_find() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);

        let id = store.append(running());

        assert_eq!(store.find(id).map(|w| w.id), Some(id));
        assert_eq!(
            repository.slot.borrow().as_deref(),
            Some(store.workouts()),
            "append must write through to the slot"
        );
    }

    #[test]
    fn test_find_absent() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);
        store.append(running());

        assert!(store.find(WorkoutID::random()).is_none());
    }

    #[test]
    fn test_remove() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);
        let id = store.append(running());
        let other = store.append(cycling());

        assert!(store.remove(id));
        assert!(store.find(id).is_none());
        assert_eq!(
            store.workouts().iter().map(|w| w.id).collect::<Vec<_>>(),
            vec![other]
        );
        assert_eq!(repository.slot.borrow().as_deref(), Some(store.workouts()));
    }

    #[test]
    fn test_remove_absent() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);
        store.append(running());

        assert!(!store.remove(WorkoutID::random()));
        assert_eq!(store.workouts().len(), 1);
    }

    #[test]
    fn test_clear_erases_slot() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);
        store.append(running());
        store.append(cycling());

        store.clear();

        assert!(store.workouts().is_empty());
        assert_eq!(*repository.slot.borrow(), None);

        store.load();
        assert!(store.workouts().is_empty());
    }

    #[test]
    fn test_load_preserves_order() {
        let repository = Rc::new(FakeRepository::default());
        let first = running();
        let second = cycling();
        *repository.slot.borrow_mut() = Some(vec![first.clone(), second.clone()]);
        let mut store = store(&repository);

        store.load();

        assert_eq!(store.workouts(), &[first, second]);
    }

    #[test]
    fn test_load_unreadable_slot() {
        let repository = Rc::new(FakeRepository {
            fail_reads: true,
            ..FakeRepository::default()
        });
        let mut store = store(&repository);
        store.workouts = vec![running()];

        store.load();

        assert!(store.workouts().is_empty());
    }

    #[test]
    fn test_persist_idempotent() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);
        store.append(running());

        store.persist().unwrap();
        let first = repository.slot.borrow().clone();
        store.persist().unwrap();

        assert_eq!(*repository.slot.borrow(), first);
    }

    #[test]
    fn test_write_failure_keeps_memory() {
        let repository = Rc::new(FakeRepository {
            fail_writes: true,
            ..FakeRepository::default()
        });
        let mut store = store(&repository);

        let id = store.append(running());

        assert_eq!(store.find(id).map(|w| w.id), Some(id));
        assert_eq!(*repository.slot.borrow(), None);
        assert!(store.persist().is_err());
    }

    #[test]
    fn test_insertion_scenario() {
        let repository = Rc::new(FakeRepository::default());
        let mut store = store(&repository);

        let first = store.append(running());
        store.append(cycling());

        assert_eq!(
            store
                .workouts()
                .iter()
                .map(Workout::kind)
                .collect::<Vec<_>>(),
            vec![Kind::Running, Kind::Cycling]
        );

        assert!(store.remove(first));
        assert_eq!(
            store
                .workouts()
                .iter()
                .map(Workout::kind)
                .collect::<Vec<_>>(),
            vec![Kind::Cycling]
        );
    }
}
