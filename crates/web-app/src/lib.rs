#![warn(clippy::pedantic)]

pub mod app;
pub mod log;
pub mod map;

pub use app::App;
pub use map::{Map, MarkerStyle};

/// Persistence seam for UI state, implemented by the storage crate.
pub trait Repository {
    fn read_settings(&self) -> Result<Settings, String>;
    fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub map_zoom: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self { map_zoom: 13 }
    }
}
