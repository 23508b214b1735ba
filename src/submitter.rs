//! Trial-result submission flow.
//!
//! `idle -> submitting -> idle`, with the outcome of the last completed
//! request kept for display. Only one request may be outstanding per unit.

use crate::error::EstimatorError;
use crate::estimator::{EstimateResponse, PaceEstimator};
use crate::fields::{result_view, EstimationRow, ResultView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

/// Result of one `submit` or `complete_submit` call
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent
    Skipped,
    /// A request is already outstanding; this attempt was ignored
    Busy,
    /// Response accepted and now on display
    Displayed,
    /// Request failed; the previous result is still on display
    Failed(EstimatorError),
}

/// A submission that has left `Idle` and is waiting for the estimator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub value: String,
}

/// State owned by the trial-result view
#[derive(Debug, Default, Clone)]
pub struct TrialSubmitter {
    input: String,
    state: SubmitState,
    last_row: Option<EstimationRow>,
    has_ever_submitted: bool,
}

impl TrialSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn has_ever_submitted(&self) -> bool {
        self.has_ever_submitted
    }

    pub fn last_row(&self) -> Option<&EstimationRow> {
        self.last_row.as_ref()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.state == SubmitState::Idle && !self.input.trim().is_empty()
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            SubmitState::Submitting => "Sending...",
            SubmitState::Idle => "Estimate",
        }
    }

    pub fn view(&self) -> ResultView {
        result_view(self.last_row.as_ref(), self.has_ever_submitted)
    }

    /// Move to `Submitting` and hand out the trimmed value to send.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitOutcome> {
        if self.state == SubmitState::Submitting {
            tracing::debug!("Submission already in flight, ignoring");
            return Err(SubmitOutcome::Busy);
        }

        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return Err(SubmitOutcome::Skipped);
        }

        let pending = PendingSubmission {
            value: trimmed.to_string(),
        };
        self.state = SubmitState::Submitting;
        self.has_ever_submitted = true;
        Ok(pending)
    }

    /// Apply the estimator's answer and return to `Idle`.
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<EstimateResponse, EstimatorError>,
    ) -> SubmitOutcome {
        self.state = SubmitState::Idle;

        match result {
            Ok(response) => {
                tracing::info!(value = %pending.value, has_row = response.row.is_some(), "Trial result estimated");
                self.last_row = response.row;
                self.input.clear();
                SubmitOutcome::Displayed
            }
            Err(err) => {
                tracing::error!(value = %pending.value, error = %err, "Failed to send trial result");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Full flow: begin, call the estimator, complete.
    pub fn submit<E: PaceEstimator + ?Sized>(&mut self, estimator: &E) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };

        let result = estimator.estimate(&pending.value);
        self.complete_submit(pending, result)
    }
}
