pub mod envcan;
pub mod feed;
pub mod fetch;
pub mod noaa;
