pub mod cache;
pub mod error;
pub mod geo_set;
pub mod station;
