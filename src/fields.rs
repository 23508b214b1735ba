//! Reconciliation of estimator rows into a fixed set of display rows.
//!
//! The estimation service does not guarantee its key names, so each display
//! row lists the names it accepts in priority order.

use serde::Serialize;
use serde_json::{Map, Value};

/// A row of pace/time values as returned by the estimator
pub type EstimationRow = Map<String, Value>;

/// One output row and the source keys it may be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayField {
    pub label: &'static str,
    pub candidate_keys: &'static [&'static str],
}

/// Catalog of supported rows, in display order
pub const DISPLAY_FIELDS: [DisplayField; 7] = [
    DisplayField {
        label: "Estimated Half Marathon Time",
        candidate_keys: &["race_half_marathon", "race_half", "half_marathon"],
    },
    DisplayField {
        label: "Easy pace per mile",
        candidate_keys: &["easy_pace_per_mile", "easy_per_mile", "easy_mile_pace"],
    },
    DisplayField {
        label: "Easy pace per km",
        // the reference backend spells it "pase"
        candidate_keys: &[
            "easy_pace_per_km",
            "easy_pase_per_km",
            "easy_per_km",
            "easy_km_pace",
        ],
    },
    DisplayField {
        label: "Marathon pace per mile",
        candidate_keys: &[
            "marathon_pace_per_mile",
            "marathon_per_mile",
            "marathon_mile_pace",
        ],
    },
    DisplayField {
        label: "Marathon pace per km",
        candidate_keys: &["marathon_pace_per_km", "marathon_per_km", "marathon_km_pace"],
    },
    DisplayField {
        label: "Threshold pace per km",
        candidate_keys: &[
            "threshold_pace_per_km",
            "threshold_per_km",
            "threshold_km_pace",
        ],
    },
    DisplayField {
        label: "Threshold pace per mile",
        candidate_keys: &[
            "threshold_pace_per_mile",
            "threshold_per_mile",
            "threshold_mile_pace",
        ],
    },
];

/// A display row whose value was found in the estimator row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    pub label: &'static str,
    pub value: Value,
}

impl ResolvedField {
    /// Strings verbatim, everything else as JSON text
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// What the trial-result view should show
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// No submission has ever been attempted
    Nothing,
    /// Service answered without a row
    NoMatchingRow,
    /// A row arrived but none of its keys are in the catalog
    NoSupportedFields,
    Fields(Vec<ResolvedField>),
}

/// First candidate key present in `row` with a non-null value
pub fn pick_first_existing<'a>(row: &'a EstimationRow, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|value| !value.is_null())
}

/// Resolve every catalog entry against `row`, dropping the unresolved ones.
///
/// Output keeps catalog order.
pub fn reconcile(row: &EstimationRow, catalog: &[DisplayField]) -> Vec<ResolvedField> {
    catalog
        .iter()
        .filter_map(|field| {
            pick_first_existing(row, field.candidate_keys).map(|value| ResolvedField {
                label: field.label,
                value: value.clone(),
            })
        })
        .collect()
}

/// Classify an optional row for display
pub fn result_view(row: Option<&EstimationRow>, has_ever_submitted: bool) -> ResultView {
    match row {
        None if has_ever_submitted => ResultView::NoMatchingRow,
        None => ResultView::Nothing,
        Some(row) => {
            let fields = reconcile(row, &DISPLAY_FIELDS);
            if fields.is_empty() {
                ResultView::NoSupportedFields
            } else {
                ResultView::Fields(fields)
            }
        }
    }
}
