//! Property-based tests for alignment and aggregation invariants

use evobench::aggregate::{merge_trials, MergeShape};
use evobench::align::{pad_to_match, pad_with_last, subtract_bias, truncate_and_rescale};
use evobench::extract::LogExtractor;
use evobench::table::Table;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1000.0f64..1000.0, 1..=max_len)
}

fn arb_trial_tables() -> impl Strategy<Value = Vec<Table>> {
    proptest::collection::vec(proptest::collection::vec(0i64..10_000, 1..6), 1..6).prop_map(
        |trials| {
            trials
                .into_iter()
                .map(|values| {
                    let mut table = Table::new(vec!["value".to_owned()]);
                    for value in values {
                        table.push_row(vec![value.to_string()]).unwrap();
                    }
                    table
                })
                .collect()
        },
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: pad-to-match always yields equal lengths and never touches
    /// the longer series.
    #[test]
    fn prop_pad_to_match_equalizes_lengths(
        a in arb_series(32),
        b in arb_series(32),
    ) {
        let pair = pad_to_match(&a, &b).unwrap();
        prop_assert_eq!(pair.a.len(), pair.b.len());
        prop_assert_eq!(pair.a.len(), a.len().max(b.len()));
        if a.len() >= b.len() {
            prop_assert_eq!(&pair.a, &a);
        } else {
            prop_assert_eq!(&pair.b, &b);
        }
    }

    /// Property: every padded element equals the shorter series' final value.
    #[test]
    fn prop_padding_repeats_final_value(
        series in arb_series(16),
        extra in 1usize..16,
    ) {
        let target = series.len() + extra;
        let padded = pad_with_last(&series, target).unwrap();
        prop_assert_eq!(padded.len(), target);
        let last = series[series.len() - 1];
        for &value in &padded[series.len()..] {
            prop_assert_eq!(value, last);
        }
    }

    /// Property: truncate-and-rescale is a slice followed by a division.
    #[test]
    fn prop_truncate_and_rescale(
        series in arb_series(32),
        target in 1usize..32,
        scale in prop::sample::select(vec![2.0f64, 10.0, 1000.0]),
    ) {
        let scaled = truncate_and_rescale(&series, target, scale).unwrap();
        prop_assert_eq!(scaled.len(), series.len().min(target));
        for (original, rescaled) in series.iter().zip(&scaled) {
            prop_assert_eq!(*rescaled, original / scale);
        }
    }

    /// Property: bias subtraction shifts every element by the same amount.
    #[test]
    fn prop_bias_shifts_every_element(
        series in arb_series(32),
        bias in -100.0f64..100.0,
    ) {
        let shifted = subtract_bias(&series, bias);
        prop_assert_eq!(shifted.len(), series.len());
        for (original, value) in series.iter().zip(&shifted) {
            prop_assert_eq!(*value, original - bias);
        }
    }

    /// Property: a per-iteration merge keeps every row and tags each trial's
    /// rows with its 1-based index.
    #[test]
    fn prop_merge_preserves_rows_and_tags_rounds(tables in arb_trial_tables()) {
        let merged = merge_trials(&tables, MergeShape::RowPerIteration).unwrap();

        let expected_rows: usize = tables.iter().map(Table::row_count).sum();
        prop_assert_eq!(merged.row_count(), expected_rows);

        let rounds = merged.column_f64("Round").unwrap();
        let mut cursor = 0;
        for (index, table) in tables.iter().enumerate() {
            for _ in 0..table.row_count() {
                prop_assert_eq!(rounds[cursor], (index + 1) as f64);
                cursor += 1;
            }
        }
    }

    /// Property: a log with k iteration lines and k fitness lines extracts
    /// exactly k records, values taken verbatim in order.
    #[test]
    fn prop_extraction_is_length_preserving(values in proptest::collection::vec(0.0f64..1e6, 1..50)) {
        let mut log = String::new();
        for (i, value) in values.iter().enumerate() {
            log.push_str(&format!("INFO: Iteration: {i}\n"));
            log.push_str(&format!("INFO: Highest Network Fitness: {value}\n"));
        }

        let extraction = LogExtractor::new().extract(&log).unwrap();
        prop_assert_eq!(extraction.table.len(), values.len());
        let series = extraction.table.series("highestNetworkFitness");
        for (expected, actual) in values.iter().zip(&series) {
            prop_assert_eq!(actual, expected);
        }
    }
}
