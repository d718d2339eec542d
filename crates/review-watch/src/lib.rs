pub mod clients;
pub mod config;
pub mod error;
pub mod review;
pub mod service;
pub mod telemetry;
