//! Plain-text and JSON output for the headless subcommands

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::sim::{
    AggregateSnapshot, HistoricalSample, HistoryBuffer, HistoryMetric, HistoryRange,
    MonitoredEntity,
};

const TRACKED: [HistoryMetric; 5] = [
    HistoryMetric::Cpu,
    HistoryMetric::Memory,
    HistoryMetric::Temperature,
    HistoryMetric::Power,
    HistoryMetric::Efficiency,
];

#[derive(Serialize)]
struct FleetReport<'a> {
    generation: u64,
    assets: &'a [MonitoredEntity],
    aggregate: AggregateSnapshot,
}

#[derive(Serialize)]
struct HistoryReport<'a> {
    range: HistoryRange,
    samples: Vec<&'a HistoricalSample>,
}

pub fn fleet_table(entities: &[MonitoredEntity], agg: &AggregateSnapshot) -> String {
    let now = Utc::now();
    let mut out = format!(
        "{:<28} {:<12} {:>6} {:>6} {:>7} {:>7} {:>6}  {}\n",
        "ASSET", "STATUS", "CPU%", "MEM%", "TEMP°F", "POWERW", "NET%", "UPDATED"
    );
    for e in entities {
        out.push_str(&format!(
            "{:<28} {:<12} {:>6.1} {:>6.1} {:>7.1} {:>7.0} {:>6.1}  {}\n",
            e.name,
            e.status.label(),
            e.metrics.cpu,
            e.metrics.memory,
            e.metrics.temperature,
            e.metrics.power,
            e.metrics.network,
            e.age_label(now),
        ));
    }
    out.push_str(&format!(
        "\n{}/{} online, {} maintenance, {} offline\n",
        agg.online_count, agg.total, agg.maintenance_count, agg.offline_count
    ));
    out.push_str(&format!(
        "avg cpu {:.0}%  avg temp {:.0}°F  total power {:.0}W\n",
        agg.avg_cpu, agg.avg_temperature, agg.total_power
    ));
    out
}

pub fn history_table(history: &HistoryBuffer) -> String {
    let mut out = format!(
        "range {} ({} samples)\n\n{:<12} {:>10} {:>10}\n",
        history.range(),
        history.len(),
        "METRIC",
        "CURRENT",
        "TREND"
    );
    for metric in TRACKED {
        out.push_str(&format!(
            "{:<12} {:>10.1} {:>+10.1}\n",
            metric.label(),
            history.current(metric),
            history.trend(metric),
        ));
    }
    out
}

pub fn print_fleet(
    generation: u64,
    entities: &[MonitoredEntity],
    agg: &AggregateSnapshot,
    json: bool,
) -> Result<()> {
    if json {
        let report = FleetReport {
            generation,
            assets: entities,
            aggregate: *agg,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("after {} ticks\n", generation);
        print!("{}", fleet_table(entities, agg));
    }
    Ok(())
}

pub fn print_history(history: &HistoryBuffer, json: bool) -> Result<()> {
    if json {
        let report = HistoryReport {
            range: history.range(),
            samples: history.iter().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", history_table(history));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{aggregate, fleet::default_fleet, ChaChaSource, SampleGenerator};
    use chrono::Local;

    #[test]
    fn fleet_table_lists_every_asset() {
        let fleet = default_fleet(Utc::now());
        let table = fleet_table(&fleet, &aggregate(&fleet));
        for asset in &fleet {
            assert!(table.contains(&asset.name));
        }
        assert!(table.contains("3/4 online, 1 maintenance, 0 offline"));
    }

    #[test]
    fn history_table_reports_window() {
        let mut history = HistoryBuffer::new(HistoryRange::OneHour);
        let mut rng = ChaChaSource::seeded(7);
        history.backfill(HistoryRange::OneHour, Local::now(), &SampleGenerator, &mut rng);
        let table = history_table(&history);
        assert!(table.starts_with("range 1h (13 samples)"));
        for metric in TRACKED {
            assert!(table.contains(metric.label()));
        }
    }

    #[test]
    fn fleet_json_carries_aggregate() {
        let fleet = default_fleet(Utc::now());
        let report = FleetReport {
            generation: 0,
            assets: &fleet,
            aggregate: aggregate(&fleet),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["aggregate"]["total"], 4);
        assert_eq!(value["assets"][2]["status"], "maintenance");
    }
}
