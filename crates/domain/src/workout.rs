use std::fmt::{self, Display};

use chrono::{Local, NaiveDateTime};
use derive_more::{Deref, Display, Into};
use thiserror::Error;
use uuid::Uuid;

/// One recorded exercise session, created by the user on the map.
///
/// A workout is assembled from validated value types and never mutated
/// afterwards. The type-specific derived metric (pace or speed) is
/// computed once, at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date_time: NaiveDateTime,
    pub position: Position,
    pub distance: Distance,
    pub duration: Duration,
    pub details: WorkoutDetails,
}

impl Workout {
    #[must_use]
    pub fn running(
        position: Position,
        distance: Distance,
        duration: Duration,
        cadence: Cadence,
    ) -> Self {
        Self {
            id: WorkoutID::random(),
            date_time: Local::now().naive_local(),
            position,
            distance,
            duration,
            details: WorkoutDetails::Running {
                cadence,
                pace: Pace(f32::from(duration) / f32::from(distance)),
            },
        }
    }

    #[must_use]
    pub fn cycling(
        position: Position,
        distance: Distance,
        duration: Duration,
        elevation_gain: Elevation,
    ) -> Self {
        Self {
            id: WorkoutID::random(),
            date_time: Local::now().naive_local(),
            position,
            distance,
            duration,
            details: WorkoutDetails::Cycling {
                elevation_gain,
                speed: Speed(f32::from(distance) / (f32::from(duration) / 60.0)),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.details {
            WorkoutDetails::Running { .. } => Kind::Running,
            WorkoutDetails::Cycling { .. } => Kind::Cycling,
        }
    }
}

impl Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind(), self.date_time.format("%B %-d"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutDetails {
    Running { cadence: Cadence, pace: Pace },
    Cycling { elevation_gain: Elevation, speed: Speed },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Running,
    Cycling,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Kind::Running => "Running",
                Kind::Cycling => "Cycling",
            }
        )
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Geographic point the workout was recorded at, immutable once set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Distance(f32);

impl Distance {
    pub fn new(value: f32) -> Result<Self, DistanceError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DistanceError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Distance {
    type Error = DistanceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Distance::new(parsed_value),
            Err(_) => Err(DistanceError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DistanceError {
    #[error("Distance must be a positive number of kilometres")]
    OutOfRange,
    #[error("Distance must be a number")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Duration(f32);

impl Duration {
    pub fn new(value: f32) -> Result<Self, DurationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DurationError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Duration {
    type Error = DurationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Duration::new(parsed_value),
            Err(_) => Err(DurationError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DurationError {
    #[error("Duration must be a positive number of minutes")]
    OutOfRange,
    #[error("Duration must be a number")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Cadence(f32);

impl Cadence {
    pub fn new(value: f32) -> Result<Self, CadenceError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CadenceError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Cadence {
    type Error = CadenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Cadence::new(parsed_value),
            Err(_) => Err(CadenceError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CadenceError {
    #[error("Cadence must be a positive number of steps per minute")]
    OutOfRange,
    #[error("Cadence must be a number")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Elevation(f32);

impl Elevation {
    pub fn new(value: f32) -> Result<Self, ElevationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ElevationError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Elevation {
    type Error = ElevationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Elevation::new(parsed_value),
            Err(_) => Err(ElevationError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ElevationError {
    #[error("Elevation gain must not be negative")]
    OutOfRange,
    #[error("Elevation gain must be a number")]
    ParseError,
}

/// Derived running metric in minutes per kilometre.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Pace(f32);

impl From<f32> for Pace {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

/// Derived cycling metric in kilometres per hour.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Speed(f32);

impl From<f32> for Speed {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error(transparent)]
    Distance(#[from] DistanceError),
    #[error(transparent)]
    Duration(#[from] DurationError),
    #[error(transparent)]
    Cadence(#[from] CadenceError),
    #[error(transparent)]
    Elevation(#[from] ElevationError),
}
