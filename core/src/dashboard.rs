//! Dashboard view: live metric cards fed by the ticker, the zone alert
//! banner and the static chart series.

use crate::{
    config::GridConfig,
    fixtures::{EnergyPoint, FixtureStore, WaterPoint},
    metrics::{group_thousands, LiveMetricsSnapshot},
    rng::RandomSource,
    ticker::MetricsTicker,
    zones::{alert_banner, AlertBanner, BadgeVariant},
};
use chrono::{Local, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Badge {
    pub variant: BadgeVariant,
    pub text:    String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub badge: Badge,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Insight {
    pub title:  &'static str,
    pub detail: &'static str,
}

pub const INSIGHTS: [Insight; 2] = [
    Insight {
        title:  "Energy Load Prediction",
        detail: "Expected 12% increase tomorrow due to high temperatures. Consider load balancing.",
    },
    Insight {
        title:  "Water Quality Alert",
        detail: "Minor pressure drop detected in Central Delhi. Maintenance recommended.",
    },
];

fn badge(variant: BadgeVariant, text: &str) -> Badge {
    Badge { variant, text: text.to_string() }
}

/// Cards for one snapshot, in display order.
pub fn metric_cards(snapshot: &LiveMetricsSnapshot) -> Vec<MetricCard> {
    let anomaly_badge = if snapshot.anomalies > 0 {
        badge(BadgeVariant::Warning, "Under Investigation")
    } else {
        badge(BadgeVariant::Success, "All Clear")
    };
    vec![
        MetricCard {
            title: "Total Energy Demand",
            value: format!("{} MW", group_thousands(snapshot.energy_demand)),
            badge: badge(BadgeVariant::Success, "+12% predicted tomorrow"),
        },
        MetricCard {
            title: "Water Flow Rate",
            value: format!("{} L/s", group_thousands(snapshot.water_flow)),
            badge: badge(BadgeVariant::Info, "Normal Range"),
        },
        MetricCard {
            title: "Detected Anomalies",
            value: snapshot.anomalies.to_string(),
            badge: anomaly_badge,
        },
        MetricCard {
            title: "Renewable Share",
            value: format!("{:.0}%", snapshot.renewable_percent),
            badge: badge(BadgeVariant::Success, &format!("Peak {} MW", group_thousands(snapshot.peak_load))),
        },
        MetricCard {
            title: "Water Tank Level",
            value: format!("{:.0}%", snapshot.water_tank_level),
            badge: badge(BadgeVariant::Info, "Reservoir"),
        },
    ]
}

/// `HH:MM:SS` of the snapshot's stamp, converted to local time.
pub fn last_updated_label(snapshot: &LiveMetricsSnapshot) -> String {
    snapshot.last_updated.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub struct DashboardView {
    fixtures: Arc<FixtureStore>,
    ticker:   MetricsTicker,
}

impl DashboardView {
    /// Seed a fresh snapshot from `config` and start ticking. Every mount
    /// starts from the same seed constants.
    pub fn mount<R>(fixtures: Arc<FixtureStore>, config: &GridConfig, rng: R) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        let initial = LiveMetricsSnapshot::seeded(&config.metrics_seed, Utc::now());
        let ticker = MetricsTicker::start(initial, rng, config.tick_period());
        log::info!("Dashboard mounted; ticking every {:?}", ticker.period());
        Self { fixtures, ticker }
    }

    pub fn snapshot(&self) -> LiveMetricsSnapshot {
        self.ticker.latest()
    }

    pub fn subscribe(&self) -> watch::Receiver<LiveMetricsSnapshot> {
        self.ticker.subscribe()
    }

    /// "Last updated" stamp in the host's local time.
    pub fn last_updated_label(&self) -> String {
        last_updated_label(&self.snapshot())
    }

    pub fn cards(&self) -> Vec<MetricCard> {
        metric_cards(&self.snapshot())
    }

    pub fn alert_banner(&self) -> Option<AlertBanner> {
        alert_banner(self.fixtures.zones())
    }

    pub fn energy_series(&self) -> &[EnergyPoint] {
        self.fixtures.energy_series()
    }

    pub fn water_series(&self) -> &[WaterPoint] {
        self.fixtures.water_series()
    }

    pub fn is_live(&self) -> bool {
        self.ticker.is_running()
    }

    /// Tear down: the timer stops before this returns.
    pub async fn unmount(self) {
        let DashboardView { ticker, .. } = self;
        ticker.shutdown().await;
        log::info!("Dashboard unmounted");
    }
}
