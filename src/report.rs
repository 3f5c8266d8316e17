//! Publish the batch result to the invoking pipeline

use crate::{batch::BatchReport, error::*};

/// Destination of step outputs
pub trait StepOutput {
    /// Set a named output value
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Mark the step as failed with a message
    fn set_failed(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed(String),
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Succeeded)
    }
}

/// Write `results`, `success-count` and `total-count`, then the overall status
pub fn publish<O: StepOutput>(report: &BatchReport, output: &mut O) -> Result<RunStatus> {
    let results = serde_json::to_string(&report.outcomes).map_err(std::io::Error::from)?;
    output.set_output("results", &results)?;
    output.set_output("success-count", &report.success_count.to_string())?;
    output.set_output("total-count", &report.total_count.to_string())?;

    if report.is_success() {
        log::info!(
            "Synced all {} image(s) successfully",
            report.total_count
        );
        return Ok(RunStatus::Succeeded);
    }
    let message = format!(
        "Failed to sync {} out of {} image(s)",
        report.failed_count(),
        report.total_count
    );
    output.set_failed(&message)?;
    Ok(RunStatus::Failed(message))
}
