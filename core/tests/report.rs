//! AI report derivation: fixed template, literal fallbacks.

mod common;

use common::zone;
use ecogrid_core::{fixtures::ZoneStatus, report::ZoneReport};

#[test]
fn report_text_matches_the_template() {
    let z = zone("1", ZoneStatus::Critical, Some("High power load and low water pressure"));
    let report = ZoneReport::derive(&z);

    assert_eq!(
        report.analysis,
        "AI Analysis for Zone 1:\n\
         - Energy Demand is high (450 MW)\n\
         - Water Flow is stable (120 L/s)\n\
         - Renewable contribution: 40%\n\
         - Predicted alerts: High power load and low water pressure"
    );
    assert_eq!(report.active_alerts.as_deref(), Some("High power load and low water pressure"));
}

#[test]
fn missing_fields_take_their_defaults() {
    let mut z = zone("2", ZoneStatus::Normal, None);
    z.renewable_percent = None;
    let report = ZoneReport::derive(&z);

    assert!(report.analysis.contains("Renewable contribution: 35%"));
    assert!(report.analysis.ends_with("Predicted alerts: No critical alerts"));
    assert_eq!(report.metric("Renewable %"), Some("35%"));
    assert_eq!(report.metric("Power Status"), Some("Normal"));
    assert_eq!(report.metric("Temperature"), Some("30 °C"));
    assert_eq!(report.metric("Air Quality"), Some("Good"));
    assert_eq!(report.active_alerts, None);
}

#[test]
fn zero_and_empty_values_fall_back_like_missing_ones() {
    let mut z = zone("3", ZoneStatus::Warning, Some(""));
    z.renewable_percent = Some(0.0);
    z.temperature = Some(0.0);
    z.power = Some(String::new());
    let report = ZoneReport::derive(&z);

    assert_eq!(report.metric("Renewable %"), Some("35%"));
    assert_eq!(report.metric("Temperature"), Some("30 °C"));
    assert_eq!(report.metric("Power Status"), Some("Normal"));
    assert!(report.analysis.ends_with("No critical alerts"));
    assert_eq!(report.active_alerts, None);
}

#[test]
fn present_fields_are_copied_through() {
    let mut z = zone("4", ZoneStatus::Critical, None);
    z.power = Some("Overloaded".into());
    z.temperature = Some(36.5);
    z.air_quality = Some("Poor".into());
    let report = ZoneReport::derive(&z);

    let labels: Vec<_> = report.metrics.iter().map(|m| m.label).collect();
    assert_eq!(
        labels,
        vec!["Energy Demand", "Water Flow", "Renewable %", "Power Status", "Temperature", "Air Quality"]
    );
    assert_eq!(report.metric("Energy Demand"), Some("450 MW"));
    assert_eq!(report.metric("Water Flow"), Some("120 L/s"));
    assert_eq!(report.metric("Power Status"), Some("Overloaded"));
    assert_eq!(report.metric("Temperature"), Some("36.5 °C"));
    assert_eq!(report.metric("Air Quality"), Some("Poor"));
}
