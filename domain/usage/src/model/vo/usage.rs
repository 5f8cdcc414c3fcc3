use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::window::ReportingWindow;

/// Derived state of every instance with a termination timestamp.
pub const TERMINATED_STATE: &str = "terminated";

/// Which lines count towards a summary's active-resource snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveAccounting {
    /// Only lines whose state is not `terminated`.
    #[default]
    ExcludeTerminated,
    /// Every line, terminated or not. Reproduces reports of the legacy
    /// metering service for regression comparison.
    Legacy,
}

impl ActiveAccounting {
    pub fn counts_as_active(&self, line: &UsageLine) -> bool {
        match self {
            ActiveAccounting::ExcludeTerminated => line.state != TERMINATED_STATE,
            ActiveAccounting::Legacy => true,
        }
    }
}

/// Usage of one instance inside a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLine {
    pub instance_id: Uuid,
    pub tenant_id: String,
    pub user_id: String,
    pub name: String,
    pub hostname: String,
    pub host: Option<String>,
    /// Name of the resource shape.
    pub flavor: String,
    /// Quantities below come from the resource shape.
    pub vcpus: u32,
    pub memory_mb: u64,
    pub local_gb: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Seconds since launch, up to termination or report time.
    pub uptime: i64,
    /// Billable hours inside the window.
    pub hours: f64,
    pub state: String,
}

/// Usage of one tenant inside a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUsageSummary {
    pub tenant_id: String,
    pub window_start: DateTime<Utc>,
    pub window_stop: DateTime<Utc>,
    pub total_vcpu_hours: f64,
    pub total_ram_mb_hours: f64,
    pub total_disk_gb_hours: f64,
    pub total_hours: f64,
    pub active_vcpus: u64,
    pub active_ram_mb: u64,
    pub active_disk_gb: u64,
    pub active_instance_count: u64,
    pub lines: Vec<UsageLine>,
}

impl TenantUsageSummary {
    /// All-zero summary of a tenant without usage in `window`.
    pub fn empty(tenant_id: impl Into<String>, window: &ReportingWindow) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            window_start: window.start(),
            window_stop: window.stop(),
            total_vcpu_hours: 0.0,
            total_ram_mb_hours: 0.0,
            total_disk_gb_hours: 0.0,
            total_hours: 0.0,
            active_vcpus: 0,
            active_ram_mb: 0,
            active_disk_gb: 0,
            active_instance_count: 0,
            lines: Vec::new(),
        }
    }

    /// Folds one line into the totals and, when `accounting` says so, into
    /// the active snapshot.
    pub fn add_line(&mut self, line: UsageLine, accounting: ActiveAccounting) {
        self.total_vcpu_hours += f64::from(line.vcpus) * line.hours;
        self.total_ram_mb_hours += line.memory_mb as f64 * line.hours;
        self.total_disk_gb_hours += line.local_gb as f64 * line.hours;
        self.total_hours += line.hours;
        if accounting.counts_as_active(&line) {
            self.active_vcpus += u64::from(line.vcpus);
            self.active_ram_mb += line.memory_mb;
            self.active_disk_gb += line.local_gb;
            self.active_instance_count += 1;
        }
        self.lines.push(line);
    }
}
