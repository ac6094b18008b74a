//! Session Auth Backend Library
//!
//! Registration, login and logout over a pluggable credential store, issuing
//! signed session tokens. Exposed as a library for tests and embedding.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
