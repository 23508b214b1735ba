use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

/// Number of bands produced by every successful calculation
pub const ZONE_COUNT: usize = 7;

/// Range of one band, in whole beats per minute.
///
/// Each bound is rounded on its own, so the upper bound of one band and the
/// lower bound of the next may overlap or leave a one-beat gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneRange {
    /// `0–{max} bpm`
    UpTo { max: i64 },
    /// `{min}–{max} bpm`
    Between { min: i64, max: i64 },
    /// `{min}+ bpm`
    AtLeast { min: i64 },
    /// No meaningful heart-rate ceiling
    NotApplicable,
}

impl ZoneRange {
    pub fn contains(&self, hr: i64) -> bool {
        match *self {
            ZoneRange::UpTo { max } => (0..=max).contains(&hr),
            ZoneRange::Between { min, max } => (min..=max).contains(&hr),
            ZoneRange::AtLeast { min } => hr >= min,
            ZoneRange::NotApplicable => false,
        }
    }
}

impl fmt::Display for ZoneRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneRange::UpTo { max } => write!(f, "0–{} bpm", max),
            ZoneRange::Between { min, max } => write!(f, "{}–{} bpm", min, max),
            ZoneRange::AtLeast { min } => write!(f, "{}+ bpm", min),
            ZoneRange::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// One LTHR training-intensity band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneBand {
    pub level: u8,
    pub name: &'static str,
    pub range: ZoneRange,
    /// Percentage-of-LTHR and RPE summary, static per level
    pub detail: &'static str,
}

impl ZoneBand {
    pub fn range_text(&self) -> String {
        self.range.to_string()
    }
}

/// Percent multipliers of LTHR used by a band
#[derive(Debug, Clone, Copy)]
enum BandBounds {
    UpTo(i64),
    Between(i64, i64),
    AtLeast(i64),
    NotApplicable,
}

struct BandDef {
    name: &'static str,
    detail: &'static str,
    bounds: BandBounds,
}

// Levels 5 and 6 deliberately share one threshold; only their labels differ.
const BAND_TABLE: [BandDef; ZONE_COUNT] = [
    BandDef {
        name: "Level 1 (L1) – Walking/Jog",
        detail: "0-68% LTHR, 0-2 RPE",
        bounds: BandBounds::UpTo(68),
    },
    BandDef {
        name: "Level 2 (L2) – Easy pace",
        detail: "69-83% LTHR, 2-3 RPE",
        bounds: BandBounds::Between(69, 83),
    },
    BandDef {
        name: "Level 3 (L3) – Marathon pace",
        detail: "84-94% LTHR, 3-4 RPE",
        bounds: BandBounds::Between(84, 94),
    },
    BandDef {
        name: "Level 4 (L4) – Threshold pace",
        detail: "95-105% LTHR, 4-5 RPE",
        bounds: BandBounds::Between(95, 105),
    },
    BandDef {
        name: "Level 5 (L5) – Interval pace",
        detail: "106%< LTHR, 6-7 RPE",
        bounds: BandBounds::AtLeast(106),
    },
    BandDef {
        name: "Level 6 (L6) – Repetition pace",
        detail: "106%< LTHR, 7-10 RPE",
        bounds: BandBounds::AtLeast(106),
    },
    BandDef {
        name: "Level 7 (L7) – Max Effort",
        detail: "",
        bounds: BandBounds::NotApplicable,
    },
];

/// LTHR zone calculation utilities
pub struct ZoneCalculator;

impl ZoneCalculator {
    /// Parse free text as an LTHR value.
    ///
    /// Returns `None` for anything that is not a finite number; callers treat
    /// that as "not yet a valid request" rather than an error. Trailing text
    /// such as `"160 bpm"` is not accepted.
    pub fn parse_lthr(input: &str) -> Option<f64> {
        let value: f64 = input.trim().parse().ok()?;
        value.is_finite().then_some(value)
    }

    /// Derive all seven bands from a threshold heart rate
    pub fn zones_for(lthr: f64) -> Vec<ZoneBand> {
        let exact = Decimal::from_f64(lthr);
        BAND_TABLE
            .iter()
            .zip(1u8..)
            .map(|(def, level)| ZoneBand {
                level,
                name: def.name,
                detail: def.detail,
                range: match def.bounds {
                    BandBounds::UpTo(max) => ZoneRange::UpTo {
                        max: Self::percent_of(lthr, exact, max),
                    },
                    BandBounds::Between(min, max) => ZoneRange::Between {
                        min: Self::percent_of(lthr, exact, min),
                        max: Self::percent_of(lthr, exact, max),
                    },
                    BandBounds::AtLeast(min) => ZoneRange::AtLeast {
                        min: Self::percent_of(lthr, exact, min),
                    },
                    BandBounds::NotApplicable => ZoneRange::NotApplicable,
                },
            })
            .collect()
    }

    /// First band whose range contains `hr`.
    ///
    /// Band 6 shares its range with band 5 and is therefore never returned.
    pub fn band_for_heart_rate(hr: i64, bands: &[ZoneBand]) -> Option<&ZoneBand> {
        bands.iter().find(|band| band.range.contains(hr))
    }

    // Nearest whole bpm, half away from zero. Values beyond Decimal's range
    // go through f64 and saturate at the i64 bounds.
    fn percent_of(lthr: f64, exact: Option<Decimal>, percent: i64) -> i64 {
        exact
            .and_then(|value| value.checked_mul(Decimal::new(percent, 2)))
            .and_then(|scaled| {
                scaled
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .unwrap_or_else(|| (lthr * percent as f64 / 100.0).round() as i64)
    }
}

/// State owned by the LTHR calculator view
#[derive(Debug, Default, Clone)]
pub struct LthrZones {
    input: String,
    zones: Vec<ZoneBand>,
}

impl LthrZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Either empty or exactly seven bands
    pub fn zones(&self) -> &[ZoneBand] {
        &self.zones
    }

    /// Recompute the bands from the current input.
    ///
    /// Returns `false` and leaves the previous bands untouched when the input
    /// does not parse. The input text is never cleared.
    pub fn calculate_zones(&mut self) -> bool {
        let Some(lthr) = ZoneCalculator::parse_lthr(&self.input) else {
            tracing::debug!(input = %self.input, "LTHR input not numeric, ignoring");
            return false;
        };

        self.zones = ZoneCalculator::zones_for(lthr);
        tracing::debug!(%lthr, "Calculated LTHR zones");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(bands: &[ZoneBand]) -> Vec<String> {
        bands.iter().map(ZoneBand::range_text).collect()
    }

    #[test]
    fn test_zones_for_lthr_160() {
        let bands = ZoneCalculator::zones_for(160.0);

        assert_eq!(
            texts(&bands),
            vec![
                "0–109 bpm",   // 160 * 0.68 = 108.8 -> 109
                "110–133 bpm", // 110.4 -> 110, 132.8 -> 133
                "134–150 bpm", // 134.4 -> 134, 150.4 -> 150
                "152–168 bpm",
                "170+ bpm", // 169.6 -> 170
                "170+ bpm",
                "N/A",
            ]
        );
    }

    #[test]
    fn test_band_metadata_is_static() {
        let bands = ZoneCalculator::zones_for(172.0);

        assert_eq!(bands[0].name, "Level 1 (L1) – Walking/Jog");
        assert_eq!(bands[3].detail, "95-105% LTHR, 4-5 RPE");
        assert_eq!(bands[5].detail, "106%< LTHR, 7-10 RPE");
        assert_eq!(bands[6].detail, "");
        assert_eq!(
            bands.iter().map(|b| b.level).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // 150 * 0.69 = 103.5 exactly
        let bands = ZoneCalculator::zones_for(150.0);
        assert_eq!(bands[1].range, ZoneRange::Between { min: 104, max: 125 });
    }

    #[test]
    fn test_independent_rounding_is_kept() {
        // 0.83 * 145 = 120.35 -> 120, 0.84 * 145 = 121.8 -> 122: nothing covers 121
        let bands = ZoneCalculator::zones_for(145.0);
        assert_eq!(bands[1].range, ZoneRange::Between { min: 100, max: 120 });
        assert_eq!(bands[2].range, ZoneRange::Between { min: 122, max: 136 });
        assert!(ZoneCalculator::band_for_heart_rate(121, &bands).is_none());
    }

    #[test]
    fn test_parse_lthr() {
        assert_eq!(ZoneCalculator::parse_lthr("160"), Some(160.0));
        assert_eq!(ZoneCalculator::parse_lthr(" 162.5 "), Some(162.5));
        assert_eq!(ZoneCalculator::parse_lthr("1e29"), Some(1e29));
        assert_eq!(ZoneCalculator::parse_lthr("160 bpm"), None);
        assert_eq!(ZoneCalculator::parse_lthr("abc"), None);
        assert_eq!(ZoneCalculator::parse_lthr(""), None);
        assert_eq!(ZoneCalculator::parse_lthr("inf"), None);
        assert_eq!(ZoneCalculator::parse_lthr("NaN"), None);
    }

    #[test]
    fn test_huge_lthr_saturates_instead_of_failing() {
        let mut unit = LthrZones::new();

        // top of Decimal's range: the exact product overflows
        unit.set_input("79000000000000000000000000000");
        assert!(unit.calculate_zones());
        assert_eq!(unit.zones().len(), ZONE_COUNT);
        assert_eq!(unit.zones()[0].range, ZoneRange::UpTo { max: i64::MAX });
        assert_eq!(unit.zones()[6].range_text(), "N/A");

        // beyond Decimal's range entirely
        unit.set_input("1e29");
        assert!(unit.calculate_zones());
        assert_eq!(unit.zones().len(), ZONE_COUNT);
        assert_eq!(unit.zones()[4].range, ZoneRange::AtLeast { min: i64::MAX });
    }

    #[test]
    fn test_unparsable_input_keeps_previous_zones() {
        let mut unit = LthrZones::new();
        unit.set_input("160");
        assert!(unit.calculate_zones());
        let before = unit.zones().to_vec();

        unit.set_input("abc");
        assert!(!unit.calculate_zones());
        assert_eq!(unit.zones(), before.as_slice());
        assert_eq!(unit.input(), "abc");
    }

    #[test]
    fn test_unparsable_first_input_leaves_list_empty() {
        let mut unit = LthrZones::new();
        unit.set_input("abc");
        assert!(!unit.calculate_zones());
        assert!(unit.zones().is_empty());
    }

    #[test]
    fn test_recalculation_replaces_list() {
        let mut unit = LthrZones::new();
        unit.set_input("160");
        unit.calculate_zones();
        unit.set_input("180");
        unit.calculate_zones();

        assert_eq!(unit.zones().len(), ZONE_COUNT);
        assert_eq!(unit.zones()[4].range_text(), "191+ bpm"); // 180 * 1.06 = 190.8
        assert_eq!(unit.input(), "180");
    }

    #[test]
    fn test_band_for_heart_rate() {
        let bands = ZoneCalculator::zones_for(160.0);

        assert_eq!(ZoneCalculator::band_for_heart_rate(100, &bands).map(|b| b.level), Some(1));
        assert_eq!(ZoneCalculator::band_for_heart_rate(140, &bands).map(|b| b.level), Some(3));
        assert_eq!(ZoneCalculator::band_for_heart_rate(160, &bands).map(|b| b.level), Some(4));
        assert_eq!(ZoneCalculator::band_for_heart_rate(185, &bands).map(|b| b.level), Some(5));
        // 151 falls between L3 (..150) and L4 (152..)
        assert!(ZoneCalculator::band_for_heart_rate(151, &bands).is_none());
    }

    proptest! {
        #[test]
        fn test_always_seven_bands(lthr in 0u32..400u32, tenths in 0u32..10u32) {
            let value = lthr as f64 + tenths as f64 / 10.0;
            let bands = ZoneCalculator::zones_for(value);

            prop_assert_eq!(bands.len(), ZONE_COUNT);
            prop_assert_eq!(bands[6].range_text(), "N/A");
            prop_assert_eq!(bands[4].range, bands[5].range);
            prop_assert!(bands[0].range_text().starts_with("0–"));
        }

        #[test]
        fn test_any_finite_lthr_gives_seven_bands(lthr in 0f64..1e300) {
            let bands = ZoneCalculator::zones_for(lthr);
            prop_assert_eq!(bands.len(), ZONE_COUNT);
            prop_assert_eq!(bands[6].range_text(), "N/A");
        }

        #[test]
        fn test_parsed_input_matches_direct(lthr in 30u32..250u32) {
            let mut unit = LthrZones::new();
            unit.set_input(lthr.to_string());
            prop_assert!(unit.calculate_zones());

            let expected = ZoneCalculator::zones_for(lthr as f64);
            prop_assert_eq!(unit.zones(), expected.as_slice());
        }
    }
}
