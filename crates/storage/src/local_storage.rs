//! Local storage
//!
//! The workout sequence lives in a single browser local storage slot as
//! a JSON array of flat records. Each record carries an explicit `kind`
//! tag, as the flat form loses the variant a workout was created with;
//! rehydration matches on the tag and rebuilds the concrete variant.

use chrono::NaiveDateTime;
use gloo_storage::Storage as GlooStorage;
use mapfit_domain as domain;
use mapfit_web_app as web_app;
use uuid::Uuid;

const KEY_WORKOUTS: &str = "workouts";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

const MAX_LOG_ENTRIES: usize = 100;

pub struct Workouts;

impl domain::WorkoutRepository for Workouts {
    fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let records: Vec<Workout> = match gloo_storage::LocalStorage::get(KEY_WORKOUTS) {
            Ok(records) => records,
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Vec::new(),
            Err(err) => return Err(domain::ReadError::Storage(storage_error(err))),
        };
        records
            .into_iter()
            .map(domain::Workout::try_from)
            .collect::<Result<_, _>>()
            .map_err(|err| domain::ReadError::Other(Box::new(err)))
    }

    fn write_workouts(&self, workouts: &[domain::Workout]) -> Result<(), domain::WriteError> {
        let records = workouts.iter().map(Workout::from).collect::<Vec<_>>();
        gloo_storage::LocalStorage::set(KEY_WORKOUTS, records)
            .map_err(|err| domain::WriteError::Storage(storage_error(err)))
    }

    fn delete_workouts(&self) -> Result<(), domain::WriteError> {
        gloo_storage::LocalStorage::delete(KEY_WORKOUTS);
        Ok(())
    }
}

fn storage_error(err: gloo_storage::errors::StorageError) -> domain::StorageError {
    match err {
        gloo_storage::errors::StorageError::SerdeError(_) => domain::StorageError::Corrupt,
        _ => domain::StorageError::Unavailable,
    }
}

pub struct UI;

impl web_app::Repository for UI {
    fn read_settings(&self) -> Result<web_app::Settings, String> {
        match gloo_storage::LocalStorage::get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => {
                Ok(web_app::Settings::default())
            }
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_settings(&self, settings: web_app::Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl web_app::log::Repository for Log {
    fn read_entries(&self) -> Result<Vec<web_app::log::Entry>, web_app::log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(web_app::log::Error::Unknown(err.to_string())),
        }
    }

    fn append_entry(&self, entry: web_app::log::Entry) -> Result<(), web_app::log::Error> {
        let mut entries = self.read_entries()?;
        entries.push(entry);
        if entries.len() > MAX_LOG_ENTRIES {
            let excess = entries.len() - MAX_LOG_ENTRIES;
            entries.drain(..excess);
        }
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| web_app::log::Error::Unknown(err.to_string()))
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub date_time: NaiveDateTime,
    pub position: (f64, f64),
    pub distance: f32,
    pub duration: f32,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running { cadence: f32, pace: f32 },
    Cycling { elevation_gain: f32, speed: f32 },
}

impl From<domain::Workout> for Workout {
    fn from(value: domain::Workout) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            date_time: value.date_time,
            position: (value.position.latitude, value.position.longitude),
            distance: value.distance.into(),
            duration: value.duration.into(),
            details: (&value.details).into(),
        }
    }
}

impl From<&domain::WorkoutDetails> for WorkoutDetails {
    fn from(value: &domain::WorkoutDetails) -> Self {
        match value {
            domain::WorkoutDetails::Running { cadence, pace } => WorkoutDetails::Running {
                cadence: f32::from(*cadence),
                pace: f32::from(*pace),
            },
            domain::WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            } => WorkoutDetails::Cycling {
                elevation_gain: f32::from(*elevation_gain),
                speed: f32::from(*speed),
            },
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = domain::WorkoutError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        let (latitude, longitude) = value.position;
        Ok(Self {
            id: value.id.into(),
            date_time: value.date_time,
            position: domain::Position {
                latitude,
                longitude,
            },
            distance: domain::Distance::new(value.distance)?,
            duration: domain::Duration::new(value.duration)?,
            details: value.details.try_into()?,
        })
    }
}

impl TryFrom<WorkoutDetails> for domain::WorkoutDetails {
    type Error = domain::WorkoutError;

    fn try_from(value: WorkoutDetails) -> Result<Self, Self::Error> {
        Ok(match value {
            // pace and speed are taken as persisted, not recomputed
            WorkoutDetails::Running { cadence, pace } => domain::WorkoutDetails::Running {
                cadence: domain::Cadence::new(cadence)?,
                pace: pace.into(),
            },
            WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            } => domain::WorkoutDetails::Cycling {
                elevation_gain: domain::Elevation::new(elevation_gain)?,
                speed: speed.into(),
            },
        })
    }
}
