use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid day name '{0}'")]
    InvalidDate(String),

    #[error("Date {days} days after the anchor is out of range")]
    OutOfRange { days: u64 },
}
