// Dashboard snapshot domain model
use super::bulb::BulbMode;
use super::device::DeviceSummary;
use super::fleet::FleetStats;
use super::time_range::TimeRange;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Synthetic,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Synthetic => "synthetic",
        }
    }
}

/// Chart-ready view of one bulb: status, its class per point, and current draw.
#[derive(Debug, Clone, PartialEq)]
pub struct BulbChart {
    pub title: String,
    pub role: BulbMode,
    pub labels: Vec<String>,
    pub status: Vec<f64>,
    pub classes: Vec<&'static str>,
    pub current_milliamps: Vec<f64>,
}

/// Result of one fetch cycle. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub request_id: u64,
    pub generated_at: DateTime<Utc>,
    pub range: TimeRange,
    pub source: DataSource,
    pub notice: Option<String>,
    pub devices: Vec<DeviceSummary>,
    pub stats: FleetStats,
    pub charts: Vec<BulbChart>,
}

impl DashboardSnapshot {
    pub fn point_count(&self) -> usize {
        self.charts.first().map_or(0, |c| c.status.len())
    }
}
