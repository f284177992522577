//! Loads campus datasets (CSV tables, GeoJSON geometry) and builds the
//! routing model.

mod builder;
mod config;
mod features;
mod naismith;
mod tables;

pub use builder::create_campus_model;
pub use config::CampusModelConfig;
pub use features::{load_geometry_features, polylines_from_geojson};
pub use naismith::naismith_seconds;
