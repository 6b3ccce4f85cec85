pub mod report;
pub mod weather_condition;
