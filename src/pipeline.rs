//! Sequential pipeline execution
//!
//! Runs the import plan one step at a time, blocking on each external
//! command. The default policy halts on the first failing step and names
//! it; keep-going mode runs every step regardless and collects failures,
//! matching the behavior of the shell script this tool replaces.

use crate::audit::AuditLogger;
use crate::config::Config;
use crate::error::PipelineError;
use crate::orchestrate::CommandOutcome;
use crate::plan::ImportPlan;
use tracing::{debug, warn};

/// Result type for pipeline operations
type Result<T> = std::result::Result<T, PipelineError>;

/// Outcome of one executed step
#[derive(Debug)]
pub struct StepReport {
    pub index: usize,
    pub description: String,
    pub outcome: CommandOutcome,
}

/// Outcome of a full run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<StepReport>,
}

impl RunSummary {
    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.outcome.success).count()
    }

    pub fn success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Executes an import plan against the external orchestrate CLI
pub struct Pipeline {
    config: Config,
    audit: AuditLogger,
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new(config: Config, audit: AuditLogger) -> Self {
        Self { config, audit }
    }

    /// Run every step of the plan in order
    pub async fn run(&mut self, plan: &ImportPlan) -> Result<RunSummary> {
        self.preflight()?;

        let total = plan.len();
        let bin = self.config.run.orchestrate_bin.clone();
        let mut summary = RunSummary::default();

        for (i, step) in plan.steps().iter().enumerate() {
            println!("\n[{}/{}] {}", i + 1, total, step.description);

            let outcome = match step.run(&bin).await {
                Ok(outcome) => outcome,
                Err(PipelineError::Spawn { command, source }) if self.config.run.keep_going => {
                    warn!("Failed to spawn `{}`: {}", command, source);
                    CommandOutcome::spawn_failure(command, &source)
                }
                Err(e) => return Err(e),
            };

            self.audit.log_step(&outcome);

            let success = outcome.success;
            let exit_code = outcome.exit_code;
            summary.reports.push(StepReport {
                index: i,
                description: step.description.clone(),
                outcome,
            });

            if !success {
                if self.config.run.keep_going {
                    warn!(
                        "Step {}/{} failed with exit code {}, continuing",
                        i + 1,
                        total,
                        exit_code
                    );
                } else {
                    self.audit.log_run(total, summary.failed_count());
                    return Err(PipelineError::StepFailed {
                        step: i + 1,
                        description: step.description.clone(),
                        exit_code,
                    });
                }
            }
        }

        self.audit.log_run(total, summary.failed_count());
        Ok(summary)
    }

    /// Verify input files exist before the first destructive command runs
    fn preflight(&self) -> Result<()> {
        for path in [&self.config.import.tool_file, &self.config.import.requirements] {
            if !path.exists() {
                return Err(PipelineError::Preflight(path.clone()));
            }
            debug!("Preflight: {} present", path.display());
        }
        Ok(())
    }
}
