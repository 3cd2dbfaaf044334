//! Configuration: file schema and multi-source loader

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, GeoDbConfig, HttpConfig, TimeConfig, WeatherConfig};
pub use loader::ConfigLoader;
