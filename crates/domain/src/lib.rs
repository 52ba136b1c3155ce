#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod store;
pub mod workout;

pub use error::{ReadError, StorageError, WriteError};
pub use store::{Store, WorkoutRepository};
pub use workout::{
    Cadence, CadenceError, Distance, DistanceError, Duration, DurationError, Elevation,
    ElevationError, Kind, Pace, Position, Speed, Workout, WorkoutDetails, WorkoutError, WorkoutID,
};
