//! Filesystem aggregation integration tests

use evobench::aggregate::{aggregate_project, MergeShape, ROUND_COLUMN};
use evobench::layout::{ArtifactKind, ProjectLayout};
use evobench::table::Table;

fn write_summary_trial(layout: &ProjectLayout, round: usize, coverage: f64) {
    let mut table = Table::new(vec!["bestCoverage".to_owned(), "fitnessFunctionCount".to_owned()]);
    table
        .push_row(vec![coverage.to_string(), "10".to_owned()])
        .unwrap();
    table
        .write_csv_path(layout.trial_csv(ArtifactKind::Coverage, round))
        .unwrap();
}

#[test]
fn merges_n_trials_and_deletes_their_artifacts() {
    let base = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(base.path(), "Archery");
    layout.ensure_dirs().unwrap();
    for round in 1..=3 {
        write_summary_trial(&layout, round, 0.5 + 0.1 * round as f64);
    }

    let merged_path = aggregate_project(&layout, ArtifactKind::Coverage, 3, MergeShape::SummaryRowPerTrial)
        .unwrap()
        .expect("merge should run");

    // Exactly N rows tagged Round = 1..N, in order.
    let merged = Table::from_csv_path(&merged_path).unwrap();
    assert_eq!(merged.columns()[0], ROUND_COLUMN);
    assert_eq!(merged.column_f64(ROUND_COLUMN).unwrap(), [1.0, 2.0, 3.0]);
    assert_eq!(merged.column_f64("bestCoverage").unwrap(), [0.6, 0.7, 0.8]);

    // All per-trial artifacts, seed included, are gone; only the merged
    // artifact remains.
    for round in 1..=3 {
        assert!(!layout.trial_csv(ArtifactKind::Coverage, round).exists());
    }
    assert!(merged_path.is_file());
}

#[test]
fn missing_first_trial_skips_the_merge() {
    let base = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(base.path(), "Memory");
    layout.ensure_dirs().unwrap();

    let result =
        aggregate_project(&layout, ArtifactKind::Coverage, 5, MergeShape::SummaryRowPerTrial)
            .unwrap();

    assert!(result.is_none());
    assert!(!layout.merged_csv(ArtifactKind::Coverage).exists());
}

#[test]
fn zero_trials_is_a_no_op() {
    let base = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(base.path(), "Memory");
    layout.ensure_dirs().unwrap();

    let result =
        aggregate_project(&layout, ArtifactKind::Coverage, 0, MergeShape::SummaryRowPerTrial)
            .unwrap();
    assert!(result.is_none());
}

#[test]
fn single_trial_merge_only_adds_the_round_column() {
    let base = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(base.path(), "SpaceJunk");
    layout.ensure_dirs().unwrap();
    write_summary_trial(&layout, 1, 0.9);
    let original = Table::from_csv_path(layout.trial_csv(ArtifactKind::Coverage, 1)).unwrap();

    let merged_path =
        aggregate_project(&layout, ArtifactKind::Coverage, 1, MergeShape::SummaryRowPerTrial)
            .unwrap()
            .expect("merge should run");
    let merged = Table::from_csv_path(&merged_path).unwrap();

    let mut expected = original;
    expected
        .insert_column(0, ROUND_COLUMN, vec!["1".to_owned()])
        .unwrap();
    assert_eq!(merged, expected);
    assert!(!layout.trial_csv(ArtifactKind::Coverage, 1).exists());
}

#[test]
fn per_iteration_shape_tags_every_row_with_its_trial() {
    let base = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(base.path(), "FruitCatcher");
    layout.ensure_dirs().unwrap();

    for (round, rows) in [(1, 2), (2, 3)] {
        let mut table = Table::new(vec!["Iteration".to_owned(), "Highest Network Fitness".to_owned()]);
        for i in 0..rows {
            table
                .push_row(vec![i.to_string(), (round * 100 + i).to_string()])
                .unwrap();
        }
        table
            .write_csv_path(layout.trial_csv(ArtifactKind::NetworkFitness, round))
            .unwrap();
    }

    let merged_path =
        aggregate_project(&layout, ArtifactKind::NetworkFitness, 2, MergeShape::RowPerIteration)
            .unwrap()
            .expect("merge should run");
    let merged = Table::from_csv_path(&merged_path).unwrap();

    assert_eq!(merged.row_count(), 5);
    assert_eq!(
        merged.column_f64(ROUND_COLUMN).unwrap(),
        [1.0, 1.0, 2.0, 2.0, 2.0]
    );
}

#[test]
fn rerunning_after_a_merge_is_harmless() {
    let base = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(base.path(), "ChatBot");
    layout.ensure_dirs().unwrap();
    write_summary_trial(&layout, 1, 0.4);

    aggregate_project(&layout, ArtifactKind::Coverage, 1, MergeShape::SummaryRowPerTrial)
        .unwrap()
        .expect("merge should run");

    // The per-trial artifacts are gone now, so a re-run skips quietly and
    // leaves the merged artifact untouched.
    let result =
        aggregate_project(&layout, ArtifactKind::Coverage, 1, MergeShape::SummaryRowPerTrial)
            .unwrap();
    assert!(result.is_none());
    assert!(layout.merged_csv(ArtifactKind::Coverage).is_file());
}
