//! Sensor reading analysis and report engine for the FarmConnect app.
//!
//! A reading is classified against the normal range of its sensor type,
//! explained in agronomic terms, and stored together with its analysis as a
//! report. Module layout, leaves first:
//!
//! - `catalog`: closed set of sensor types and their reference ranges
//! - `classifier`: status tier and deviation from range
//! - `interpreter`: interpretation, causes and recommendations
//! - `store`: tree store port, adapters and report layout
//! - `service`: the operations exposed to the app
//! - `routes`: HTTP surface over the service

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod models;
pub mod routes;
pub mod schema;
pub mod service;
pub mod store;

pub use catalog::{NormalRange, SensorType, SensorTypeInfo};
pub use classifier::{Classification, Status};
pub use config::Config;
pub use error::{AnalysisError, CatalogError, StoreError};
pub use models::{Analysis, Location, NewReading, Reading, Report};
pub use service::AnalysisService;
pub use store::{MemoryTree, PgTree, ReportStore, TreeStore};
