//! Common utilities module
//!
//! This module contains shared utilities used across the bead pipeline.

pub mod error;

pub use error::{PatternError, Result};
