//! Analytics view model: KPIs derived from the chart window plus the
//! static asset-performance and alert tables.

use crate::sim::{HistoryBuffer, HistoryMetric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsTab {
    #[default]
    Performance,
    Efficiency,
    Assets,
    Alerts,
}

impl AnalyticsTab {
    pub const ALL: [AnalyticsTab; 4] = [
        Self::Performance,
        Self::Efficiency,
        Self::Assets,
        Self::Alerts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Efficiency => "Efficiency",
            Self::Assets => "Assets",
            Self::Alerts => "Alerts",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Headline figure with its change since the previous sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub trend: f64,
    /// Decimal places shown for value and trend
    pub precision: usize,
}

impl Kpi {
    pub fn rising(&self) -> bool {
        self.trend >= 0.0
    }

    pub fn value_text(&self) -> String {
        format!("{:.*}{}", self.precision, self.current, self.unit)
    }

    pub fn trend_text(&self) -> String {
        let arrow = if self.rising() { "▲" } else { "▼" };
        format!("{} {:.*}{}", arrow, self.precision, self.trend.abs(), self.unit)
    }
}

pub fn kpis(history: &HistoryBuffer) -> [Kpi; 4] {
    let kpi = |label: &'static str, unit: &'static str, metric: HistoryMetric, precision: usize| Kpi {
        label,
        unit,
        current: history.current(metric),
        trend: history.trend(metric),
        precision,
    };
    [
        kpi("CPU Usage", "%", HistoryMetric::Cpu, 1),
        kpi("Memory Usage", "%", HistoryMetric::Memory, 1),
        kpi("Temperature", "°F", HistoryMetric::Temperature, 1),
        kpi("Power Usage", "W", HistoryMetric::Power, 0),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetPerformance {
    pub name: &'static str,
    pub efficiency: u64,
    pub uptime: f64,
    pub errors: u32,
}

pub fn asset_performance() -> Vec<AssetPerformance> {
    vec![
        AssetPerformance {
            name: "Manufacturing Line Alpha",
            efficiency: 94,
            uptime: 99.2,
            errors: 2,
        },
        AssetPerformance {
            name: "Quality Control System",
            efficiency: 87,
            uptime: 98.5,
            errors: 5,
        },
        AssetPerformance {
            name: "Autonomous Forklift #7",
            efficiency: 76,
            uptime: 95.1,
            errors: 8,
        },
        AssetPerformance {
            name: "Edge Computing Node",
            efficiency: 91,
            uptime: 99.8,
            errors: 1,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Error,
    Warning,
    Success,
    Info,
}

impl AlertSeverity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "●",
            Self::Warning => "▲",
            Self::Success => "✓",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemAlert {
    pub severity: AlertSeverity,
    pub message: &'static str,
    pub time: &'static str,
}

pub fn system_alerts() -> Vec<SystemAlert> {
    vec![
        SystemAlert {
            severity: AlertSeverity::Warning,
            message: "High CPU usage detected on Manufacturing Line Alpha",
            time: "2 min ago",
        },
        SystemAlert {
            severity: AlertSeverity::Info,
            message: "Predictive maintenance scheduled for Forklift #7",
            time: "15 min ago",
        },
        SystemAlert {
            severity: AlertSeverity::Success,
            message: "System backup completed successfully",
            time: "1 hour ago",
        },
        SystemAlert {
            severity: AlertSeverity::Error,
            message: "Network connectivity issue resolved",
            time: "2 hours ago",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HistoricalSample;
    use chrono::Local;

    fn point(cpu: f64, power: f64) -> HistoricalSample {
        HistoricalSample {
            timestamp: Local::now(),
            cpu,
            memory: 60.0,
            temperature: 70.0,
            power,
            efficiency: 90.0,
        }
    }

    #[test]
    fn kpis_on_empty_history_are_zero() {
        let history = HistoryBuffer::with_window(5);
        for kpi in kpis(&history) {
            assert_eq!(kpi.current, 0.0);
            assert_eq!(kpi.trend, 0.0);
            assert!(kpi.rising());
        }
    }

    #[test]
    fn kpis_report_latest_and_delta() {
        let mut history = HistoryBuffer::with_window(5);
        history.append(point(70.0, 500.0));
        history.append(point(72.5, 480.0));

        let [cpu, _, _, power] = kpis(&history);
        assert_eq!(cpu.value_text(), "72.5%");
        assert_eq!(cpu.trend_text(), "▲ 2.5%");
        assert_eq!(power.value_text(), "480W");
        assert_eq!(power.trend_text(), "▼ 20W");
    }

    #[test]
    fn tab_cycle() {
        assert_eq!(AnalyticsTab::Alerts.next(), AnalyticsTab::Performance);
        assert_eq!(AnalyticsTab::Performance.prev(), AnalyticsTab::Alerts);
        assert_eq!(AnalyticsTab::Efficiency.next(), AnalyticsTab::Assets);
    }
}
