//! Moim - study group matching service
//!
//! This crate provides the group record, its validation schema, and the
//! storage and HTTP operations built on top of them.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
