//! Fleet-wide statistics derived from a snapshot

use serde::Serialize;

use crate::sim::channel::Channel;
use crate::sim::fleet::{AssetStatus, MonitoredEntity};

/// Counts and means over one fleet snapshot.
///
/// Means cover every asset regardless of status. An empty fleet yields the
/// all-zero value rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateSnapshot {
    pub total: usize,
    pub online_count: usize,
    pub offline_count: usize,
    pub maintenance_count: usize,
    pub avg_cpu: f64,
    pub avg_memory: f64,
    pub avg_temperature: f64,
    pub avg_network: f64,
    pub total_power: f64,
}

pub fn aggregate(entities: &[MonitoredEntity]) -> AggregateSnapshot {
    if entities.is_empty() {
        return AggregateSnapshot::default();
    }

    let count = |status: AssetStatus| entities.iter().filter(|e| e.status == status).count();
    let sum = |channel: Channel| -> f64 { entities.iter().map(|e| e.metrics.get(channel)).sum() };
    let n = entities.len() as f64;

    AggregateSnapshot {
        total: entities.len(),
        online_count: count(AssetStatus::Online),
        offline_count: count(AssetStatus::Offline),
        maintenance_count: count(AssetStatus::Maintenance),
        avg_cpu: sum(Channel::Cpu) / n,
        avg_memory: sum(Channel::Memory) / n,
        avg_temperature: sum(Channel::Temperature) / n,
        avg_network: sum(Channel::Network) / n,
        total_power: sum(Channel::Power),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fleet::default_fleet;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_fleet_is_all_zero() {
        let agg = aggregate(&[]);
        assert_eq!(agg, AggregateSnapshot::default());
        assert!(agg.avg_cpu.is_finite());
        assert!(agg.avg_temperature.is_finite());
    }

    #[test]
    fn default_fleet_statistics() {
        let fleet = default_fleet(Utc::now());
        let agg = aggregate(&fleet);

        assert_eq!(agg.total, 4);
        assert_eq!(agg.online_count, 3);
        assert_eq!(agg.maintenance_count, 1);
        assert_eq!(agg.offline_count, 0);
        // cpu [78, 92, 23, 56]
        assert_eq!(agg.avg_cpu, 62.25);
        // temperature [72, 68, 65, 74]
        assert_eq!(agg.avg_temperature, 69.75);
        assert_eq!(agg.total_power, 1345.0);
    }

    #[test]
    fn recomputing_is_idempotent() {
        let fleet = default_fleet(Utc::now());
        assert_eq!(aggregate(&fleet), aggregate(&fleet));
    }

    #[test]
    fn means_include_non_online_assets() {
        let mut fleet = default_fleet(Utc::now());
        for asset in &mut fleet {
            asset.status = AssetStatus::Offline;
        }
        let agg = aggregate(&fleet);
        assert_eq!(agg.online_count, 0);
        assert_eq!(agg.offline_count, 4);
        assert_eq!(agg.avg_cpu, 62.25);
    }
}
