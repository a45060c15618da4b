//! IO utilities for loading length-of-stay tables.

pub mod stay_csv;

pub use stay_csv::{read_stay_csv, read_stay_csv_with_config, StayCsvConfig};
