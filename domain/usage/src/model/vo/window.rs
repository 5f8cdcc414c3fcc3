use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::parse_timestamp;
use crate::exception::{UsageException, UsageResult};

/// The `[start, stop)` range usage is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWindow")]
pub struct ReportingWindow {
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
}

/// Unchecked wire form, validated through [`ReportingWindow::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWindow {
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
}

impl TryFrom<RawWindow> for ReportingWindow {
    type Error = UsageException;

    fn try_from(raw: RawWindow) -> UsageResult<Self> {
        Self::new(raw.start, raw.stop)
    }
}

impl ReportingWindow {
    pub fn new(start: DateTime<Utc>, stop: DateTime<Utc>) -> UsageResult<Self> {
        if stop <= start {
            return Err(UsageException::InvalidWindow { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Builds a window from textual bounds, as passed by the read endpoints.
    pub fn parse(start: &str, stop: &str) -> UsageResult<Self> {
        Self::new(parse_timestamp(start)?, parse_timestamp(stop)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn stop(&self) -> DateTime<Utc> {
        self.stop
    }

    pub fn duration(&self) -> Duration {
        self.stop - self.start
    }
}
