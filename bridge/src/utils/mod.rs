//! Utility functions for the application

pub mod otlp;
pub mod time;
