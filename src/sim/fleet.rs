//! Monitored assets and the store that owns the authoritative fleet snapshot

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::sim::aggregate::{aggregate, AggregateSnapshot};
use crate::sim::channel::{Channel, ChannelTable, MetricSet};
use crate::sim::sampler::{sample, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Online,
    Offline,
    Maintenance,
}

impl AssetStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
            Self::Maintenance => "MAINTENANCE",
        }
    }

    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}

/// One simulated device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoredEntity {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub location: String,
    pub status: AssetStatus,
    pub metrics: MetricSet,
    pub last_update: DateTime<Utc>,
}

impl MonitoredEntity {
    /// Relative age of the last update, e.g. `12s ago`, `5m ago`, `2h ago`.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let secs = now
            .signed_duration_since(self.last_update)
            .num_seconds()
            .max(0);
        if secs < 60 {
            format!("{}s ago", secs)
        } else if secs < 3600 {
            format!("{}m ago", secs / 60)
        } else {
            format!("{}h ago", secs / 3600)
        }
    }
}

/// Advance every online asset by one step of the random walk.
///
/// Non-online assets are returned untouched, including their stale
/// `last_update`. The result is a fresh snapshot; the input is never
/// modified.
pub fn tick(
    entities: &[MonitoredEntity],
    table: &ChannelTable,
    rng: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> Vec<MonitoredEntity> {
    entities
        .iter()
        .map(|entity| {
            if !entity.status.is_online() {
                return entity.clone();
            }
            let mut next = entity.clone();
            for channel in Channel::ALL {
                let spec = table.get(channel);
                let value = sample(entity.metrics.get(channel), spec, rng);
                next.metrics.set(channel, value);
            }
            next.last_update = now.max(entity.last_update);
            next
        })
        .collect()
}

/// Built-in fleet shown on startup and after a system reset
pub fn default_fleet(now: DateTime<Utc>) -> Vec<MonitoredEntity> {
    let asset = |id: &str,
                 name: &str,
                 kind: &str,
                 location: &str,
                 status: AssetStatus,
                 metrics: [f64; 5],
                 last_update: DateTime<Utc>| MonitoredEntity {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        location: location.to_string(),
        status,
        metrics: MetricSet {
            cpu: metrics[0],
            memory: metrics[1],
            temperature: metrics[2],
            power: metrics[3],
            network: metrics[4],
        },
        last_update,
    };

    vec![
        asset(
            "1",
            "Manufacturing Line Alpha",
            "Industrial Robot",
            "Factory Floor A1",
            AssetStatus::Online,
            [78.0, 65.0, 72.0, 850.0, 94.0],
            now,
        ),
        asset(
            "2",
            "Quality Control System",
            "Vision AI",
            "QC Station 3",
            AssetStatus::Online,
            [92.0, 88.0, 68.0, 420.0, 98.0],
            now,
        ),
        asset(
            "3",
            "Autonomous Forklift #7",
            "AGV",
            "Warehouse B2",
            AssetStatus::Maintenance,
            [23.0, 45.0, 65.0, 0.0, 0.0],
            now - Duration::minutes(5),
        ),
        asset(
            "4",
            "Edge Computing Node",
            "NVIDIA Jetson",
            "Server Room",
            AssetStatus::Online,
            [56.0, 72.0, 74.0, 75.0, 89.0],
            now,
        ),
    ]
}

/// Owns the current fleet snapshot.
///
/// The snapshot is an immutable `Arc`; a tick builds the next one and swaps
/// it in whole, so a reader holding the previous `Arc` never sees a
/// half-updated fleet.
#[derive(Debug, Clone)]
pub struct AssetStore {
    snapshot: Arc<Vec<MonitoredEntity>>,
    table: ChannelTable,
    generation: u64,
}

impl AssetStore {
    pub fn new(entities: Vec<MonitoredEntity>, table: ChannelTable) -> Self {
        Self {
            snapshot: Arc::new(entities),
            table,
            generation: 0,
        }
    }

    pub fn with_default_fleet(table: ChannelTable, now: DateTime<Utc>) -> Self {
        Self::new(default_fleet(now), table)
    }

    pub fn snapshot(&self) -> Arc<Vec<MonitoredEntity>> {
        Arc::clone(&self.snapshot)
    }

    pub fn entities(&self) -> &[MonitoredEntity] {
        &self.snapshot
    }

    pub fn table(&self) -> &ChannelTable {
        &self.table
    }

    /// Number of ticks applied since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tick(&mut self, rng: &mut dyn RandomSource, now: DateTime<Utc>) -> u64 {
        let next = tick(&self.snapshot, &self.table, rng, now);
        self.snapshot = Arc::new(next);
        self.generation += 1;
        tracing::trace!(generation = self.generation, "fleet ticked");
        self.generation
    }

    /// Fleet-wide statistics, derived from the current snapshot on every call
    pub fn aggregate(&self) -> AggregateSnapshot {
        aggregate(&self.snapshot)
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.snapshot = Arc::new(default_fleet(now));
        self.generation = 0;
    }
}
