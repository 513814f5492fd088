//! Result-directory layout for one project
//!
//! One directory per project with subdirectories per artifact kind; trial
//! artifacts are numbered `{project}{round}.csv` and the merged artifact is
//! named after the project. The base path is threaded explicitly; nothing
//! here touches the process working directory.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// The two artifact families a trial produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Coverage-summary tables (one summary row per trial)
    Coverage,
    /// Fitness-trajectory tables (one row per iteration)
    NetworkFitness,
}

impl ArtifactKind {
    /// Subdirectory name for this artifact family.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Coverage => "Coverage",
            Self::NetworkFitness => "NetworkFitness",
        }
    }
}

/// Paths of one project's result artifacts under an explicit base directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    base: PathBuf,
    project: String,
}

impl ProjectLayout {
    /// Create a layout rooted at `base` for the named project.
    pub fn new(base: impl Into<PathBuf>, project: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            project: project.into(),
        }
    }

    /// The project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The project's result directory.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.base.join(&self.project)
    }

    /// The directory holding one artifact family.
    #[must_use]
    pub fn artifact_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.project_dir().join(kind.dir_name())
    }

    /// The CSV written by one trial.
    #[must_use]
    pub fn trial_csv(&self, kind: ArtifactKind, round: usize) -> PathBuf {
        self.artifact_dir(kind)
            .join(format!("{}{round}.csv", self.project))
    }

    /// The merged CSV superseding the per-trial artifacts.
    #[must_use]
    pub fn merged_csv(&self, kind: ArtifactKind) -> PathBuf {
        self.artifact_dir(kind).join(format!("{}.csv", self.project))
    }

    /// Where one trial's exported test suite is stored.
    #[must_use]
    pub fn test_export(&self, round: usize) -> PathBuf {
        self.project_dir().join(format!("{}{round}.js", self.project))
    }

    /// The shared chart output directory under the base path.
    #[must_use]
    pub fn plots_dir(&self) -> PathBuf {
        self.base.join("Plots")
    }

    /// Create the project's directories if they do not exist yet.
    ///
    /// Re-running the pipeline over an existing tree is a no-op here.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.artifact_dir(ArtifactKind::Coverage),
            self.artifact_dir(ArtifactKind::NetworkFitness),
            self.plots_dir(),
        ] {
            if !dir.is_dir() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}

/// Derive a project name from its file name by dropping the extension,
/// e.g. `FruitCatcher.sb3` becomes `FruitCatcher`.
#[must_use]
pub fn project_name(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let layout = ProjectLayout::new("/tmp/results", "FruitCatcher");
        assert_eq!(
            layout.trial_csv(ArtifactKind::Coverage, 2),
            PathBuf::from("/tmp/results/FruitCatcher/Coverage/FruitCatcher2.csv")
        );
        assert_eq!(
            layout.merged_csv(ArtifactKind::NetworkFitness),
            PathBuf::from("/tmp/results/FruitCatcher/NetworkFitness/FruitCatcher.csv")
        );
        assert_eq!(
            layout.test_export(1),
            PathBuf::from("/tmp/results/FruitCatcher/FruitCatcher1.js")
        );
    }

    #[test]
    fn test_ensure_dirs_is_idempotent() {
        let base = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(base.path(), "SpaceJunk");
        layout.ensure_dirs().unwrap();
        layout.ensure_dirs().unwrap();
        assert!(layout.artifact_dir(ArtifactKind::Coverage).is_dir());
        assert!(layout.plots_dir().is_dir());
    }

    #[test]
    fn test_project_name_drops_extension() {
        assert_eq!(project_name("FruitCatcher.sb3"), "FruitCatcher");
        assert_eq!(project_name("Memory"), "Memory");
    }
}
