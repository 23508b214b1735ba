//! Terminal rendering of unit state.
//!
//! Renderers return plain `String`s; colouring is left to `colored`, which
//! drops escape codes when stdout is not a terminal.

use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::app::ActiveView;
use crate::fields::ResultView;
use crate::submitter::TrialSubmitter;
use crate::zones::{LthrZones, ZoneBand};

#[derive(Tabled)]
struct ZoneRow<'a> {
    #[tabled(rename = "Zone")]
    name: &'a str,
    #[tabled(rename = "Heart rate")]
    range: String,
    #[tabled(rename = "Detail")]
    detail: &'a str,
}

pub fn view_title(view: ActiveView) -> &'static str {
    match view {
        ActiveView::HalfMarathon => "Half Marathon Calculator",
        ActiveView::Lthr => "Lactate Threshold Heart Rate Zones",
    }
}

/// Zone table, or an empty string before the first calculation
pub fn render_zones(bands: &[ZoneBand]) -> String {
    if bands.is_empty() {
        return String::new();
    }

    let rows = bands.iter().map(|band| ZoneRow {
        name: band.name,
        range: band.range_text(),
        detail: band.detail,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One line naming the zone a heart rate falls in
pub fn render_band_lookup(hr: i64, band: Option<&ZoneBand>) -> String {
    match band {
        Some(band) => format!("{} bpm is in {} ({})", hr, band.name.bold(), band.range_text()),
        None => format!("{} bpm falls between zones", hr),
    }
}

/// Resolved result rows or the matching status line
pub fn render_result(view: &ResultView) -> String {
    match view {
        ResultView::Nothing => String::new(),
        ResultView::NoMatchingRow => "No matching row found.".to_string(),
        ResultView::NoSupportedFields => "No supported fields found in the result.".to_string(),
        ResultView::Fields(fields) => fields
            .iter()
            .map(|field| format!("  {}: {}", field.label.bold(), field.value_text()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_submitter(unit: &TrialSubmitter) -> String {
    let mut out = format!(
        "{}\nEnter test result (hh:mm:ss) [{}]",
        view_title(ActiveView::HalfMarathon).green().bold(),
        unit.button_label()
    );
    let result = render_result(&unit.view());
    if !result.is_empty() {
        out.push('\n');
        out.push_str(&result);
    }
    out
}

pub fn render_lthr(unit: &LthrZones) -> String {
    let mut out = format!(
        "{}\nEnter heart rate test result",
        view_title(ActiveView::Lthr).cyan().bold()
    );
    let table = render_zones(unit.zones());
    if !table.is_empty() {
        out.push('\n');
        out.push_str(&table);
    }
    out
}
