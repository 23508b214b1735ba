//! Top-level tool selector.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::estimator::PaceEstimator;
use crate::submitter::{SubmitOutcome, TrialSubmitter};
use crate::zones::LthrZones;

/// Which calculator is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    #[serde(rename = "hm")]
    HalfMarathon,
    Lthr,
}

impl FromStr for ActiveView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hm" | "half" | "half-marathon" => Ok(ActiveView::HalfMarathon),
            "lthr" | "zones" => Ok(ActiveView::Lthr),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }
}

/// The mounted calculator and the state it owns
#[derive(Debug, Clone)]
pub enum ActiveUnit {
    HalfMarathon(TrialSubmitter),
    Lthr(LthrZones),
}

impl ActiveUnit {
    fn mount(view: ActiveView) -> Self {
        match view {
            ActiveView::HalfMarathon => ActiveUnit::HalfMarathon(TrialSubmitter::new()),
            ActiveView::Lthr => ActiveUnit::Lthr(LthrZones::new()),
        }
    }

    pub fn view(&self) -> ActiveView {
        match self {
            ActiveUnit::HalfMarathon(_) => ActiveView::HalfMarathon,
            ActiveUnit::Lthr(_) => ActiveView::Lthr,
        }
    }
}

/// What happened when a line of input reached the active unit
#[derive(Debug)]
pub enum InputOutcome {
    Submission(SubmitOutcome),
    /// `true` if the zone list was recalculated
    Zones(bool),
}

/// Tool selector owning the estimator and whichever unit is mounted
pub struct App<E> {
    estimator: E,
    unit: ActiveUnit,
}

impl<E: PaceEstimator> App<E> {
    pub fn new(estimator: E) -> Self {
        Self::with_view(estimator, ActiveView::default())
    }

    pub fn with_view(estimator: E, view: ActiveView) -> Self {
        Self {
            estimator,
            unit: ActiveUnit::mount(view),
        }
    }

    pub fn active_view(&self) -> ActiveView {
        self.unit.view()
    }

    pub fn unit(&self) -> &ActiveUnit {
        &self.unit
    }

    /// Switching to another view drops the current unit's state;
    /// re-selecting the active view keeps it.
    pub fn select(&mut self, view: ActiveView) {
        if self.unit.view() == view {
            return;
        }
        tracing::debug!(from = ?self.unit.view(), to = ?view, "Switching view");
        self.unit = ActiveUnit::mount(view);
    }

    /// Feed one line to the active unit as if typed and confirmed.
    pub fn handle_input(&mut self, text: &str) -> InputOutcome {
        match &mut self.unit {
            ActiveUnit::HalfMarathon(submitter) => {
                submitter.set_input(text);
                InputOutcome::Submission(submitter.submit(&self.estimator))
            }
            ActiveUnit::Lthr(zones) => {
                zones.set_input(text);
                InputOutcome::Zones(zones.calculate_zones())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;
    use crate::estimator::EstimateResponse;

    struct OfflineEstimator;

    impl PaceEstimator for OfflineEstimator {
        fn estimate(&self, _value: &str) -> Result<EstimateResponse, EstimatorError> {
            Err(EstimatorError::Transport("offline".to_string()))
        }
    }

    #[test]
    fn test_default_view_is_half_marathon() {
        let app = App::new(OfflineEstimator);
        assert_eq!(app.active_view(), ActiveView::HalfMarathon);
    }

    #[test]
    fn test_switching_view_remounts_unit() {
        let mut app = App::with_view(OfflineEstimator, ActiveView::Lthr);
        app.handle_input("160");
        match app.unit() {
            ActiveUnit::Lthr(zones) => assert_eq!(zones.zones().len(), 7),
            _ => panic!("expected LTHR unit"),
        }

        app.select(ActiveView::Lthr);
        match app.unit() {
            ActiveUnit::Lthr(zones) => assert_eq!(zones.input(), "160"),
            _ => panic!("expected LTHR unit"),
        }

        app.select(ActiveView::HalfMarathon);
        app.select(ActiveView::Lthr);
        match app.unit() {
            ActiveUnit::Lthr(zones) => {
                assert!(zones.zones().is_empty());
                assert_eq!(zones.input(), "");
            }
            _ => panic!("expected LTHR unit"),
        }
    }

    #[test]
    fn test_input_routes_to_active_unit() {
        let mut app = App::new(OfflineEstimator);
        assert!(matches!(
            app.handle_input("0:21:00"),
            InputOutcome::Submission(SubmitOutcome::Failed(_))
        ));

        app.select(ActiveView::Lthr);
        assert!(matches!(app.handle_input("abc"), InputOutcome::Zones(false)));
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!("hm".parse::<ActiveView>().unwrap(), ActiveView::HalfMarathon);
        assert_eq!("LTHR".parse::<ActiveView>().unwrap(), ActiveView::Lthr);
        assert!("bike".parse::<ActiveView>().is_err());
    }
}
