//! Utility modules: file persistence and logging.

pub mod logger;
pub mod persistence;
