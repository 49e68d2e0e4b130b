//! Consolidate two lead exports into one deduplicated record set and split
//! it into column-filtered, batch-stamped chunks for distribution.

pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
