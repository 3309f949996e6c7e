//! Birth statistics by first name, sex and department.
//!
//! The [`dataset`] store loads the source table once; the [`query`] engine
//! filters and aggregates it for the two dashboard charts; [`dashboard`]
//! exposes both over HTTP together with the [`geography`] reference used by
//! the map.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod geography;
pub mod query;
pub mod telemetry;
