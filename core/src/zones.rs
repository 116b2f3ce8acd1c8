//! Zone selection view-model and the derivations the zone-insights and
//! dashboard screens render from the fixture store.

use crate::{
    error::GridResult,
    fixtures::{FixtureStore, GeoPoint, ZoneRecord, ZoneStatus},
    metrics::group_thousands,
    report::{ZoneReport, DEFAULT_RENEWABLE_PERCENT},
    types::ZoneId,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

pub const MAP_CENTER: GeoPoint = GeoPoint { lat: 28.6519, lng: 77.2315 };
pub const MAP_ZOOM: u8 = 11;
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Visual variant shared by badges and alert banners.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Success,
    Warning,
    Error,
    Info,
}

/// Badge variant for a raw status string. Unrecognised strings map to
/// `Info` rather than failing.
pub fn status_badge_variant(status: &str) -> BadgeVariant {
    match status {
        "critical" => BadgeVariant::Error,
        "warning"  => BadgeVariant::Warning,
        "normal"   => BadgeVariant::Success,
        _          => BadgeVariant::Info,
    }
}

impl ZoneStatus {
    pub fn badge_variant(&self) -> BadgeVariant {
        status_badge_variant(self.as_str())
    }

    /// Marker fill colour on the map. Unknown statuses use the normal colour.
    pub fn marker_color(&self) -> &'static str {
        match self {
            Self::Critical => "#EF4444",
            Self::Warning  => "#F59E0B",
            Self::Normal | Self::Unknown => "#10B981",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertBanner {
    pub severity:   BadgeVariant,
    pub zone_count: usize,
}

impl AlertBanner {
    pub fn message(&self) -> String {
        format!("{} zone(s) require attention.", self.zone_count)
    }
}

/// Banner over the zones that need attention. `Error` as soon as one of them
/// is critical, `Warning` otherwise, absent when none need attention.
pub fn alert_banner(zones: &[ZoneRecord]) -> Option<AlertBanner> {
    let mut zone_count = 0;
    let mut any_critical = false;
    for zone in zones.iter().filter(|z| z.status.needs_attention()) {
        zone_count += 1;
        any_critical |= zone.status == ZoneStatus::Critical;
    }
    if zone_count == 0 {
        return None;
    }
    let severity = if any_critical { BadgeVariant::Error } else { BadgeVariant::Warning };
    Some(AlertBanner { severity, zone_count })
}

/// The zone currently under inspection. Sticky: only a new selection
/// replaces it.
#[derive(Debug, Clone, Default)]
pub struct ZoneSelection {
    selected: Option<ZoneRecord>,
}

impl ZoneSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection unconditionally. The zone is not checked
    /// against any fixture store.
    pub fn select(&mut self, zone: ZoneRecord) {
        log::info!("Zone selected: {} ({})", zone.name, zone.id);
        self.selected = Some(zone);
    }

    pub fn selected(&self) -> Option<&ZoneRecord> {
        self.selected.as_ref()
    }

    /// Recomputed from `fixtures` on every call.
    pub fn current_alert_banner(&self, fixtures: &FixtureStore) -> Option<AlertBanner> {
        alert_banner(fixtures.zones())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub zone_id:  ZoneId,
    pub name:     String,
    pub position: GeoPoint,
    pub status:   ZoneStatus,
    pub color:    &'static str,
    pub pulse:    bool,
    pub alert:    Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub name:  &'static str,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything the detail panel shows for the selected zone.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetail {
    pub name:          String,
    pub badge_label:   String,
    pub badge_variant: BadgeVariant,
    pub alert:         Option<String>,
    pub last_updated:  String,
    pub chart:         Vec<ChartPoint>,
    pub metrics:       Vec<MetricRow>,
}

impl ZoneDetail {
    pub fn from_zone(zone: &ZoneRecord) -> Self {
        let renewable = zone
            .renewable_percent
            .filter(|v| *v != 0.0)
            .unwrap_or(DEFAULT_RENEWABLE_PERCENT);
        Self {
            name:          zone.name.clone(),
            badge_label:   zone.status.as_str().to_uppercase(),
            badge_variant: zone.status.badge_variant(),
            alert:         zone.alert_text().map(str::to_string),
            last_updated:  format_timestamp(&zone.last_updated),
            chart: vec![
                ChartPoint { name: "Energy Demand",  value: Some(zone.energy_demand) },
                ChartPoint { name: "Water Pressure", value: Some(zone.water_pressure) },
                ChartPoint { name: "Water Flow",     value: Some(zone.water_flow) },
                ChartPoint { name: "Renewable %",    value: zone.renewable_percent },
            ],
            metrics: vec![
                MetricRow { label: "Energy Demand",  value: format!("{} MW", format_quantity(zone.energy_demand)) },
                MetricRow { label: "Water Pressure", value: format!("{} PSI", zone.water_pressure) },
                MetricRow { label: "Water Flow",     value: format!("{} L/s", zone.water_flow) },
                MetricRow { label: "Renewable %",    value: format!("{renewable}%") },
            ],
        }
    }
}

/// Render a fixture timestamp for display. Strings that are not
/// `YYYY-MM-DDTHH:MM:SS` are shown as authored.
pub fn format_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|t| t.format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        group_thousands(value as i64)
    } else {
        value.to_string()
    }
}

/// The zone-insights screen: map markers, the sticky selection and the
/// AI report dialog.
pub struct ZoneInsightsView {
    fixtures:    Arc<FixtureStore>,
    selection:   ZoneSelection,
    report_open: bool,
}

impl ZoneInsightsView {
    pub fn mount(fixtures: Arc<FixtureStore>) -> Self {
        Self { fixtures, selection: ZoneSelection::new(), report_open: false }
    }

    pub fn markers(&self) -> Vec<MapMarker> {
        self.fixtures
            .zones()
            .iter()
            .map(|z| MapMarker {
                zone_id:  z.id.clone(),
                name:     z.name.clone(),
                position: z.position,
                status:   z.status,
                color:    z.status.marker_color(),
                pulse:    z.status == ZoneStatus::Critical,
                alert:    z.alert_text().map(str::to_string),
            })
            .collect()
    }

    /// Marker click.
    pub fn select(&mut self, zone: ZoneRecord) {
        self.selection.select(zone);
    }

    pub fn select_by_id(&mut self, id: &str) -> GridResult<&ZoneRecord> {
        let zone = self.fixtures.zone(id)?;
        self.selection.select(zone.clone());
        Ok(zone)
    }

    pub fn selection(&self) -> &ZoneSelection {
        &self.selection
    }

    /// `None` renders the "click on a zone marker" empty state.
    pub fn detail(&self) -> Option<ZoneDetail> {
        self.selection.selected().map(ZoneDetail::from_zone)
    }

    pub fn alert_banner(&self) -> Option<AlertBanner> {
        self.selection.current_alert_banner(&self.fixtures)
    }

    /// Open the AI report for the selection. No-op without one.
    pub fn open_report(&mut self) -> Option<ZoneReport> {
        let zone = self.selection.selected()?;
        self.report_open = true;
        Some(ZoneReport::derive(zone))
    }

    pub fn close_report(&mut self) {
        self.report_open = false;
    }

    pub fn is_report_open(&self) -> bool {
        self.report_open
    }
}
