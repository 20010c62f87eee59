// Fleet stats reducer - Fleet-wide counters, rebuilt from scratch each cycle
use crate::domain::bulb::is_failed;
use crate::domain::device::DeviceSummary;
use crate::domain::feed::BulbPairSeries;
use crate::domain::fleet::FleetStats;

pub fn reduce_fleet(devices: &[DeviceSummary], history: &[BulbPairSeries]) -> FleetStats {
    FleetStats {
        active_count: devices.iter().filter(|d| d.status.is_active()).count(),
        primary_active_count: devices.iter().filter(|d| d.bulbs.any_primary()).count(),
        secondary_active_count: devices.iter().filter(|d| d.bulbs.any_secondary()).count(),
        failure_count: history.iter().map(count_failures).sum(),
    }
}

/// Samples where primary and backup were both dark at the same time.
pub fn count_failures(pair: &BulbPairSeries) -> usize {
    pair.samples()
        .filter(|s| is_failed(s.primary) && is_failed(s.backup))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::device_aggregator::summarize_device;
    use crate::domain::device::{DeviceIdentity, Fleet};
    use crate::domain::feed::{parse_feed, BulbPair, RawSample};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn history(rows: &[[&str; 6]]) -> Vec<BulbPairSeries> {
        let raw: Vec<RawSample> = rows
            .iter()
            .map(|row| RawSample {
                created_at: "2025-03-01T00:00:00Z".to_string(),
                fields: row.map(|f| Some(f.to_string())),
            })
            .collect();
        let channels = parse_feed(&raw, Utc::now()).unwrap();
        BulbPair::ALL
            .iter()
            .map(|pair| BulbPairSeries::from_channels(&channels, *pair))
            .collect()
    }

    fn summaries(fleet: &Fleet, pairs: &[BulbPairSeries]) -> Vec<DeviceSummary> {
        let mut rng = StdRng::seed_from_u64(5);
        fleet
            .devices
            .iter()
            .zip(pairs)
            .map(|(identity, pair)| summarize_device(identity, pair, Utc::now(), &mut rng))
            .collect()
    }

    #[test]
    fn test_every_dark_sample_is_a_failure() {
        let pairs = history(&[
            ["0.05", "0.02", "1", "0", "0", "300"],
            ["0.05", "0.02", "1", "0", "0", "300"],
            ["0.05", "0.02", "1", "0", "0", "300"],
            ["0.05", "0.02", "1", "0", "0", "300"],
        ]);

        assert_eq!(count_failures(&pairs[0]), 4);
        assert_eq!(count_failures(&pairs[1]), 0);
    }

    #[test]
    fn test_partial_primary_is_not_a_failure() {
        let pairs = history(&[["0.5", "0", "0", "0.05", "150", "0"]]);

        assert_eq!(count_failures(&pairs[0]), 0);
        assert_eq!(count_failures(&pairs[1]), 1);
    }

    #[test]
    fn test_fleet_counts() {
        let fleet = Fleet::default();
        let pairs = history(&[
            ["0", "0", "0", "0", "0", "0"],
            ["1", "0", "0", "1", "300", "290"],
        ]);
        let devices = summaries(&fleet, &pairs);

        let stats = reduce_fleet(&devices, &pairs);

        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.primary_active_count, 1);
        assert_eq!(stats.secondary_active_count, 1);
        // First sample: both pairs dark.
        assert_eq!(stats.failure_count, 2);
    }

    #[test]
    fn test_out_of_service_device_not_counted_active() {
        let fleet = Fleet::new(2, &["SL-1000".to_string()]);
        let pairs = history(&[["1", "0", "1", "0", "300", "300"]]);
        let devices = summaries(&fleet, &pairs);

        let stats = reduce_fleet(&devices, &pairs);

        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.primary_active_count, 1);
    }

    #[test]
    fn test_reduce_is_repeatable() {
        let fleet = Fleet::default();
        let pairs = history(&[["0", "1", "0.5", "0", "300", "160"], ["0", "0", "0", "0", "0", "0"]]);
        let devices = summaries(&fleet, &pairs);

        assert_eq!(reduce_fleet(&devices, &pairs), reduce_fleet(&devices, &pairs));
    }
}
