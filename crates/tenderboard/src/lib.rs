pub mod config;
pub mod dashboard;
pub mod error;
pub mod ingest;
pub mod telemetry;
pub mod workflows;
