//! EcoGrid core: the live-metrics simulator, the zone view-models and the
//! identity-provider seam behind the CityShield smart-city dashboard.

pub mod auth;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod event;
pub mod fixtures;
pub mod forms;
pub mod landing;
pub mod metrics;
pub mod report;
pub mod rng;
pub mod routes;
pub mod sensors;
pub mod ticker;
pub mod types;
pub mod zones;
