use chrono::{DateTime, Utc};
use thiserror::Error;

pub type UsageResult<T> = Result<T, UsageException>;

#[derive(Error, Debug)]
pub enum UsageException {
    #[error("Timestamp: {value} matches none of the accepted formats.")]
    MalformedTimestamp { value: String },

    #[error("There is no resource shape with reference: {shape_ref}.")]
    UnknownResourceShape { shape_ref: String },

    #[error("Reporting window stop: {stop} must be later than start: {start}.")]
    InvalidWindow {
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    },

    #[error("Usage internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for UsageException {
    fn from(e: anyhow::Error) -> Self {
        UsageException::InternalError { source: e }
    }
}
