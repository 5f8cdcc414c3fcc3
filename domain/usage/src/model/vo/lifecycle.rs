use chrono::{DateTime, Duration, Utc};

use super::{timestamp::parse_optional_timestamp, window::ReportingWindow};
use crate::{exception::UsageResult, model::entity::InstanceRecord};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Parsed launch/termination pair of an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    pub launched_at: Option<DateTime<Utc>>,
    pub terminated_at: Option<DateTime<Utc>>,
}

impl Lifecycle {
    pub fn new(launched_at: Option<DateTime<Utc>>, terminated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            launched_at,
            terminated_at,
        }
    }

    /// Parses the stored lifecycle timestamps of a record.
    pub fn from_record(record: &InstanceRecord) -> UsageResult<Self> {
        Ok(Self {
            launched_at: parse_optional_timestamp(record.launched_at.as_deref())?,
            terminated_at: parse_optional_timestamp(record.terminated_at.as_deref())?,
        })
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated_at.is_some()
    }

    /// Hours of this lifecycle that overlap `window`.
    ///
    /// Running instances are billed through the end of the window. The result
    /// is fractional and never negative.
    pub fn billable_hours(&self, window: &ReportingWindow) -> f64 {
        let Some(launched_at) = self.launched_at else {
            return 0.0;
        };
        if matches!(self.terminated_at, Some(t) if t < window.start()) {
            return 0.0;
        }
        if launched_at > window.stop() {
            return 0.0;
        }
        let effective_start = launched_at.max(window.start());
        let effective_stop = match self.terminated_at {
            Some(terminated_at) => window.stop().min(terminated_at),
            None => window.stop(),
        };
        to_hours(effective_stop - effective_start)
    }

    /// Wall-clock time since launch, up to termination or `now`.
    pub fn uptime(&self, now: DateTime<Utc>) -> Duration {
        let Some(launched_at) = self.launched_at else {
            return Duration::zero();
        };
        let end = self.terminated_at.unwrap_or(now);
        (end - launched_at).max(Duration::zero())
    }
}

fn to_hours(duration: Duration) -> f64 {
    (duration.num_milliseconds() as f64 / MILLIS_PER_HOUR).max(0.0)
}
