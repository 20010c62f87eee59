// Dashboard service - One fetch cycle: feed in, immutable snapshot out
use crate::application::device_aggregator::summarize_device;
use crate::application::fleet_reducer::reduce_fleet;
use crate::application::series_windower::synthetic_window;
use crate::application::telemetry_repository::{FeedError, FeedRepository};
use crate::domain::bulb::{classify, BulbMode};
use crate::domain::dashboard::{BulbChart, DashboardSnapshot, DataSource};
use crate::domain::device::{DeviceSummary, Fleet};
use crate::domain::feed::{parse_feed, BulbPair, BulbPairSeries, ChannelSeries, RawSample};
use crate::domain::time_range::TimeRange;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn FeedRepository>,
    fleet: Fleet,
    feed_results: usize,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn FeedRepository>, fleet: Fleet, feed_results: usize) -> Self {
        Self {
            repository,
            fleet,
            feed_results,
        }
    }

    pub async fn refresh(&self, request_id: u64, range: TimeRange) -> DashboardSnapshot {
        let outcome = self.repository.fetch_feed(self.feed_results).await;
        let mut rng = StdRng::from_os_rng();
        self.assemble(request_id, range, outcome, Utc::now(), &mut rng)
    }

    /// Turn a fetch outcome into a snapshot. Any feed error swaps the whole
    /// window for synthetic data; nothing from a failed fetch is kept.
    ///
    /// A live feed contributes every bulb pair it carries to the failure
    /// count, even pairs with no device configured for them.
    pub fn assemble<R: Rng>(
        &self,
        request_id: u64,
        range: TimeRange,
        outcome: Result<Vec<RawSample>, FeedError>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> DashboardSnapshot {
        let parsed = outcome.and_then(|raw| parse_feed(&raw, now).map_err(FeedError::from));

        let (pairs, source, notice): (Vec<BulbPairSeries>, _, _) = match parsed {
            Ok(channels) => {
                tracing::debug!(
                    "Request {} parsed {} feed samples",
                    request_id,
                    channels.sample_count()
                );
                let pairs = BulbPair::ALL
                    .iter()
                    .map(|pair| BulbPairSeries::from_channels(&channels, *pair))
                    .collect();
                (pairs, DataSource::Live, None)
            }
            Err(e) => {
                tracing::warn!("Request {}: {}, using simulated {} window", request_id, e, range);
                let pairs = synthetic_window(self.fleet.pairs(), range, now, rng);
                let notice = format!("Live telemetry unavailable ({}). Showing simulated data.", e);
                (pairs, DataSource::Synthetic, Some(notice))
            }
        };

        let monitored: Vec<&BulbPairSeries> = self
            .fleet
            .pairs()
            .filter_map(|pair| pairs.iter().find(|series| series.pair == pair))
            .collect();

        let devices: Vec<DeviceSummary> = self
            .fleet
            .devices
            .iter()
            .zip(monitored.iter().copied())
            .map(|(identity, history)| summarize_device(identity, history, now, rng))
            .collect();
        let stats = reduce_fleet(&devices, &pairs);

        DashboardSnapshot {
            request_id,
            generated_at: now,
            range,
            source,
            notice,
            devices,
            stats,
            charts: build_charts(monitored, range),
        }
    }
}

/// Primary then backup chart for every pair, labelled for `range`.
pub fn build_charts<'a>(
    pairs: impl IntoIterator<Item = &'a BulbPairSeries>,
    range: TimeRange,
) -> Vec<BulbChart> {
    pairs
        .into_iter()
        .flat_map(|pair| {
            let n = pair.pair.number();
            [
                bulb_chart(
                    format!("Primary Bulb {} Status", n),
                    BulbMode::Primary,
                    &pair.primary_status,
                    &pair.primary_current,
                    range,
                ),
                bulb_chart(
                    format!("Secondary Bulb {} Status", n),
                    BulbMode::Backup,
                    &pair.backup_status,
                    &pair.backup_current,
                    range,
                ),
            ]
        })
        .collect()
}

fn bulb_chart(
    title: String,
    role: BulbMode,
    status: &ChannelSeries,
    current: &ChannelSeries,
    range: TimeRange,
) -> BulbChart {
    BulbChart {
        title,
        role,
        labels: status.timestamps().map(|t| range.label(t)).collect(),
        status: status.values().collect(),
        classes: status.values().map(|v| classify(v, role).as_str()).collect(),
        current_milliamps: current.values().collect(),
    }
}
