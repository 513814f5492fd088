//! Campaign orchestration: repeated trials per project, then aggregation
//!
//! A campaign runs the external tool N times per project, extracts each
//! captured log, persists the per-trial artifacts, and finally folds them
//! into one merged table per artifact family. Everything is sequential:
//! one blocking trial at a time, no shared state between trials beyond the
//! filesystem artifacts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregate::{aggregate_project, MergeShape};
use crate::error::Result;
use crate::extract::LogExtractor;
use crate::invoke::ToolRunner;
use crate::layout::{project_name, ArtifactKind, ProjectLayout};

/// Status of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialStatus {
    /// Trial is created but not yet started.
    Pending,
    /// Trial is currently executing.
    Running,
    /// Trial completed and its artifacts were persisted.
    Completed,
    /// Trial failed during invocation or extraction.
    Failed,
}

/// Lifecycle record of one trial of one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrialRecord {
    project: String,
    round: usize,
    status: TrialStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl TrialRecord {
    /// Create a new record in Pending status.
    #[must_use]
    pub fn new(project: impl Into<String>, round: usize) -> Self {
        Self {
            project: project.into(),
            round,
            status: TrialStatus::Pending,
            started_at: None,
            ended_at: None,
        }
    }

    /// Get the project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Get the 1-based round number.
    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> TrialStatus {
        self.status
    }

    /// Get the start timestamp, if the trial has started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Get the end timestamp, if the trial has finished.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Mark the trial as running.
    pub fn start(&mut self) {
        self.status = TrialStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Mark the trial as finished with the given status.
    pub fn complete(&mut self, status: TrialStatus) {
        self.status = status;
        self.ended_at = Some(Utc::now());
    }
}

/// What to evaluate: the projects and how many independent trials each gets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignPlan {
    /// Project file names, e.g. `FruitCatcher.sb3`.
    pub projects: Vec<String>,
    /// Independent trials per project.
    pub trials: usize,
}

impl CampaignPlan {
    /// Load a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Drives one campaign: trial loop, extraction, persistence, aggregation.
#[derive(Debug)]
pub struct Campaign<R> {
    base: PathBuf,
    projects_dir: PathBuf,
    plan: CampaignPlan,
    runner: R,
    extractor: LogExtractor,
    test_export: Option<PathBuf>,
}

impl<R: ToolRunner> Campaign<R> {
    /// Create a campaign writing results under `base`, reading project files
    /// from `projects_dir`.
    pub fn new(
        base: impl Into<PathBuf>,
        projects_dir: impl Into<PathBuf>,
        plan: CampaignPlan,
        runner: R,
    ) -> Self {
        Self {
            base: base.into(),
            projects_dir: projects_dir.into(),
            plan,
            runner,
            extractor: LogExtractor::new(),
            test_export: None,
        }
    }

    /// Replace the default extractor, e.g. to widen the coverage window.
    #[must_use]
    pub fn with_extractor(mut self, extractor: LogExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Where the tool drops its exported test suite after each trial; when
    /// set and present, the file is moved into the project directory.
    #[must_use]
    pub fn with_test_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.test_export = Some(path.into());
        self
    }

    /// Run every trial of every project, then aggregate per-project results.
    ///
    /// Trials run strictly one after another. The first failing trial aborts
    /// the campaign; re-running is safe since directory bootstrap and
    /// aggregation are idempotent.
    ///
    /// # Errors
    ///
    /// Returns the first invocation, extraction, or aggregation error.
    pub fn run(&self) -> Result<Vec<TrialRecord>> {
        let mut records = Vec::new();
        for project_file in &self.plan.projects {
            let name = project_name(project_file);
            let layout = ProjectLayout::new(&self.base, name);
            layout.ensure_dirs()?;

            for round in 1..=self.plan.trials {
                let mut record = TrialRecord::new(name, round);
                record.start();
                match self.run_trial(&layout, project_file, round) {
                    Ok(()) => {
                        record.complete(TrialStatus::Completed);
                        info!(project = name, round, "finished trial");
                        records.push(record);
                    }
                    Err(error) => {
                        record.complete(TrialStatus::Failed);
                        warn!(project = name, round, error = %error, "trial failed");
                        return Err(error);
                    }
                }
            }

            aggregate_project(
                &layout,
                ArtifactKind::Coverage,
                self.plan.trials,
                MergeShape::SummaryRowPerTrial,
            )?;
            aggregate_project(
                &layout,
                ArtifactKind::NetworkFitness,
                self.plan.trials,
                MergeShape::RowPerIteration,
            )?;
        }
        Ok(records)
    }

    fn run_trial(&self, layout: &ProjectLayout, project_file: &str, round: usize) -> Result<()> {
        let project_path = self.projects_dir.join(project_file);
        let output = self.runner.run(&project_path)?;
        let extraction = self.extractor.extract(&output)?;

        if let Some(coverage_csv) = &extraction.coverage_csv {
            std::fs::write(layout.trial_csv(ArtifactKind::Coverage, round), coverage_csv)?;
        }
        if !extraction.table.is_empty() {
            extraction
                .table
                .to_table()
                .write_csv_path(layout.trial_csv(ArtifactKind::NetworkFitness, round))?;
        }
        if let Some(export) = &self.test_export {
            if export.is_file() {
                std::fs::rename(export, layout.test_export(round))?;
            }
        }
        Ok(())
    }
}
