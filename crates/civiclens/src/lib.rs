//! Core library for civiclens: ingestion, normalization, windowing, and
//! rollup of regulatory-violation records across city agency feeds.
//!
//! The interesting logic lives in [`compliance`]; the remaining modules
//! carry service plumbing (configuration, telemetry, error aggregation).

pub mod compliance;
pub mod config;
pub mod error;
pub mod telemetry;
