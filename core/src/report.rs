//! Templated "AI report" for a zone. Pure string interpolation over the
//! zone's fields; every optional field has a literal fallback.

use crate::fixtures::ZoneRecord;
use serde::Serialize;

pub const DEFAULT_RENEWABLE_PERCENT: f64 = 35.0;
pub const DEFAULT_POWER_STATUS: &str = "Normal";
pub const DEFAULT_TEMPERATURE_C: f64 = 30.0;
pub const DEFAULT_AIR_QUALITY: &str = "Good";
pub const NO_ALERTS: &str = "No critical alerts";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportMetric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReport {
    pub title:         String,
    pub analysis:      String,
    pub metrics:       Vec<ReportMetric>,
    /// Present only when the zone carries non-empty alert text.
    pub active_alerts: Option<String>,
}

impl ZoneReport {
    pub fn derive(zone: &ZoneRecord) -> Self {
        // Zero and empty values fall back the same way a missing one does.
        let renewable = zone
            .renewable_percent
            .filter(|v| *v != 0.0)
            .unwrap_or(DEFAULT_RENEWABLE_PERCENT);
        let temperature = zone
            .temperature
            .filter(|v| *v != 0.0)
            .unwrap_or(DEFAULT_TEMPERATURE_C);
        let power = non_empty(zone.power.as_deref()).unwrap_or(DEFAULT_POWER_STATUS);
        let air_quality = non_empty(zone.air_quality.as_deref()).unwrap_or(DEFAULT_AIR_QUALITY);
        let alert = zone.alert_text();

        let analysis = format!(
            "AI Analysis for {name}:\n\
             - Energy Demand is high ({energy} MW)\n\
             - Water Flow is stable ({flow} L/s)\n\
             - Renewable contribution: {renewable}%\n\
             - Predicted alerts: {alerts}",
            name = zone.name,
            energy = zone.energy_demand,
            flow = zone.water_flow,
            alerts = alert.unwrap_or(NO_ALERTS),
        );

        let metrics = vec![
            ReportMetric { label: "Energy Demand", value: format!("{} MW", zone.energy_demand) },
            ReportMetric { label: "Water Flow",    value: format!("{} L/s", zone.water_flow) },
            ReportMetric { label: "Renewable %",   value: format!("{renewable}%") },
            ReportMetric { label: "Power Status",  value: power.to_string() },
            ReportMetric { label: "Temperature",   value: format!("{temperature} °C") },
            ReportMetric { label: "Air Quality",   value: air_quality.to_string() },
        ];

        Self {
            title: format!("AI Report: {}", zone.name),
            analysis,
            metrics,
            active_alerts: alert.map(str::to_string),
        }
    }

    pub fn metric(&self, label: &str) -> Option<&str> {
        self.metrics.iter().find(|m| m.label == label).map(|m| m.value.as_str())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
