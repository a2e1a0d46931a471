//! Shared library surface for the commute server and its tests.

pub mod api;
pub mod config;
pub mod state;
pub mod trip;
