// Mock API service - Simulated device, sensor and activity payloads
use crate::application::dashboard_service::build_charts;
use crate::application::device_aggregator::summarize_device;
use crate::application::series_windower::synthetic_window;
use crate::domain::bulb::{is_active, is_failed, BulbStatus};
use crate::domain::dashboard::BulbChart;
use crate::domain::device::{DeviceSummary, Fleet};
use crate::domain::feed::{BulbPairSeries, ChannelPoint, ChannelSeries};
use crate::domain::time_range::TimeRange;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Per-point fleet activity: lit backups, dimmed primaries and dark pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityReport {
    pub switches: ChannelSeries,
    pub dimmed: ChannelSeries,
    pub failures: ChannelSeries,
}

#[derive(Debug, Clone)]
pub struct MockApiService {
    fleet: Fleet,
}

impl MockApiService {
    pub fn new(fleet: Fleet) -> Self {
        Self { fleet }
    }

    pub fn devices<R: Rng>(&self, now: DateTime<Utc>, rng: &mut R) -> Vec<DeviceSummary> {
        let window = synthetic_window(self.fleet.pairs(), TimeRange::Day, now, rng);
        self.fleet
            .devices
            .iter()
            .zip(&window)
            .map(|(identity, history)| summarize_device(identity, history, now, rng))
            .collect()
    }

    pub fn sensor_data<R: Rng>(&self, range: TimeRange, now: DateTime<Utc>, rng: &mut R) -> Vec<BulbChart> {
        let window = synthetic_window(self.fleet.pairs(), range, now, rng);
        build_charts(&window, range)
    }

    pub fn activity<R: Rng>(&self, range: TimeRange, now: DateTime<Utc>, rng: &mut R) -> ActivityReport {
        let window = synthetic_window(self.fleet.pairs(), range, now, rng);
        activity_report(&window, range, now)
    }
}

fn activity_report(window: &[BulbPairSeries], range: TimeRange, now: DateTime<Utc>) -> ActivityReport {
    let timestamps: Vec<DateTime<Utc>> = window
        .first()
        .map(|pair| pair.primary_status.timestamps().collect())
        .unwrap_or_else(|| range.timestamps(now));

    let count_per_point = |predicate: fn(f64, f64) -> bool| {
        let points = timestamps
            .iter()
            .enumerate()
            .map(|(idx, time)| {
                let hits = window
                    .iter()
                    .filter_map(|pair| pair.sample(idx))
                    .filter(|s| predicate(s.primary, s.backup))
                    .count();
                ChannelPoint::new(*time, hits as f64)
            })
            .collect();
        ChannelSeries::new(points)
    };

    ActivityReport {
        switches: count_per_point(|_, backup| is_active(backup)),
        dimmed: count_per_point(|primary, _| BulbStatus::from_value(primary) == BulbStatus::Partial),
        failures: count_per_point(|primary, backup| is_failed(primary) && is_failed(backup)),
    }
}
