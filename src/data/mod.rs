//! Dataset loading, filtering, statistics, and export.

pub mod export;
pub mod filter;
pub mod load;
pub mod model;
pub mod stats;
