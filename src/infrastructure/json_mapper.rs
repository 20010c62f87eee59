// Mapper to convert domain models to JSON wire types
use crate::application::mock_api_service::ActivityReport;
use crate::domain::bulb::BulbMode;
use crate::domain::dashboard::{BulbChart, DashboardSnapshot};
use crate::domain::device::DeviceSummary;
use crate::domain::feed::ChannelSeries;
use crate::domain::fleet::FleetStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotJson {
    pub request_id: u64,
    pub generated_at: String,
    pub range: &'static str,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub devices: Vec<DeviceJson>,
    pub stats: FleetStatsJson,
    pub charts: Vec<ChartJson>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceJson {
    pub id: String,
    pub location: String,
    pub status: &'static str,
    pub primary_bulb1: bool,
    pub secondary_bulb1: bool,
    pub primary_bulb2: bool,
    pub secondary_bulb2: bool,
    pub current_bulb_label: String,
    pub last_switched: String,
    pub current_milliamps: f64,
    pub health: u8,
    pub total_switches: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatsJson {
    pub active_count: usize,
    pub primary_active_count: usize,
    pub secondary_active_count: usize,
    pub failure_count: usize,
    pub fleet_size: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartJson {
    pub title: String,
    pub role: &'static str,
    pub labels: Vec<String>,
    pub status: Vec<f64>,
    pub classes: Vec<&'static str>,
    pub current_milliamps: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct PointJson {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct ActivityJson {
    pub switches: Vec<PointJson>,
    pub dimmed: Vec<PointJson>,
    pub failures: Vec<PointJson>,
}

pub fn snapshot_to_json(snapshot: &DashboardSnapshot) -> SnapshotJson {
    SnapshotJson {
        request_id: snapshot.request_id,
        generated_at: snapshot.generated_at.to_rfc3339(),
        range: snapshot.range.as_str(),
        source: snapshot.source.as_str(),
        notice: snapshot.notice.clone(),
        devices: snapshot.devices.iter().map(device_to_json).collect(),
        stats: stats_to_json(&snapshot.stats, snapshot.devices.len()),
        charts: snapshot.charts.iter().map(chart_to_json).collect(),
    }
}

pub fn device_to_json(device: &DeviceSummary) -> DeviceJson {
    DeviceJson {
        id: device.id.clone(),
        location: device.location.clone(),
        status: device.status.as_str(),
        primary_bulb1: device.bulbs.primary_bulb_1,
        secondary_bulb1: device.bulbs.secondary_bulb_1,
        primary_bulb2: device.bulbs.primary_bulb_2,
        secondary_bulb2: device.bulbs.secondary_bulb_2,
        current_bulb_label: device.current_bulb_label.clone(),
        last_switched: device.last_switched.display(),
        current_milliamps: device.current_milliamps,
        health: device.health,
        total_switches: device.total_switches,
    }
}

fn stats_to_json(stats: &FleetStats, fleet_size: usize) -> FleetStatsJson {
    FleetStatsJson {
        active_count: stats.active_count,
        primary_active_count: stats.primary_active_count,
        secondary_active_count: stats.secondary_active_count,
        failure_count: stats.failure_count,
        fleet_size,
    }
}

pub fn chart_to_json(chart: &BulbChart) -> ChartJson {
    let role = match chart.role {
        BulbMode::Primary => "primary",
        BulbMode::Backup => "backup",
    };

    ChartJson {
        title: chart.title.clone(),
        role,
        labels: chart.labels.clone(),
        status: chart.status.clone(),
        classes: chart.classes.clone(),
        current_milliamps: chart.current_milliamps.clone(),
    }
}

fn series_to_json(series: &ChannelSeries) -> Vec<PointJson> {
    series
        .points
        .iter()
        .map(|p| PointJson {
            timestamp: p.time.to_rfc3339(),
            value: p.value,
        })
        .collect()
}

pub fn activity_to_json(report: &ActivityReport) -> ActivityJson {
    ActivityJson {
        switches: series_to_json(&report.switches),
        dimmed: series_to_json(&report.dimmed),
        failures: series_to_json(&report.failures),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::{BulbFlags, DeviceStatus, LastSwitched};
    use crate::domain::feed::BulbPair;

    #[test]
    fn test_device_wire_shape() {
        let device = DeviceSummary {
            id: "SL-1000".to_string(),
            location: "Main St & 5th Ave".to_string(),
            status: DeviceStatus::Active,
            bulbs: BulbFlags::for_pair(BulbPair::One, true, false),
            current_bulb_label: "Primary 1".to_string(),
            last_switched: LastSwitched::Never,
            current_milliamps: 300.0,
            health: 88,
            total_switches: 4,
        };

        let json = serde_json::to_value(device_to_json(&device)).unwrap();

        assert_eq!(json["id"], "SL-1000");
        assert_eq!(json["status"], "active");
        assert_eq!(json["primaryBulb1"], true);
        assert_eq!(json["secondaryBulb2"], false);
        assert_eq!(json["currentBulbLabel"], "Primary 1");
        assert_eq!(json["lastSwitched"], "Never");
        assert_eq!(json["currentMilliamps"], 300.0);
        assert_eq!(json["totalSwitches"], 4);
    }
}
