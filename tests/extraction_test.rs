//! Log extraction integration tests
//!
//! Fixtures mimic the external tool's real output: banner noise, `INFO:`
//! level tags, forwarded browser-console lines, per-iteration metric lines,
//! and the two-line coverage-summary CSV block.

use evobench::extract::LogExtractor;
use evobench::table::Table;
use evobench::Error;

fn trajectory_log(iterations: usize) -> String {
    let mut log = String::from("Starting test-generation harness\nloading project...\n");
    for i in 0..iterations {
        log.push_str(&format!("INFO: Iteration: {i}\n"));
        log.push_str("INFO: Found 12 species\n");
        log.push_str(&format!("INFO: Highest Network Fitness: {}\n", 10 * (i + 1)));
        log.push_str(&format!(
            "INFO: Current Iteration Highest Network Fitness: {}\n",
            8 * (i + 1)
        ));
        log.push_str(&format!("INFO: Average Fitness: {}.5\n", 5 * (i + 1)));
    }
    log
}

#[test]
fn k_marker_lines_yield_k_records_in_order() {
    let extraction = LogExtractor::new().extract(&trajectory_log(7)).unwrap();

    assert_eq!(extraction.table.len(), 7);
    for (i, record) in extraction.table.records().iter().enumerate() {
        assert_eq!(record.iteration() as usize, i);
        assert_eq!(
            record.get("highestNetworkFitness"),
            Some(10.0 * (i + 1) as f64)
        );
        assert_eq!(
            record.get("currentIterationHighestFitness"),
            Some(8.0 * (i + 1) as f64)
        );
        assert_eq!(
            record.get("averageNetworkFitness"),
            Some(5.0 * (i + 1) as f64 + 0.5)
        );
    }
}

#[test]
fn extracted_table_round_trips_through_csv() {
    let extraction = LogExtractor::new().extract(&trajectory_log(3)).unwrap();
    let table = extraction.table.to_table();

    let mut buffer = Vec::new();
    table.write_csv(&mut buffer).unwrap();
    let read = Table::from_csv_str(std::str::from_utf8(&buffer).unwrap()).unwrap();

    assert_eq!(read.columns()[0], "Iteration");
    assert_eq!(read.row_count(), 3);
    assert_eq!(read.column_f64("Highest Network Fitness").unwrap(), [10.0, 20.0, 30.0]);
}

#[test]
fn coverage_block_becomes_a_one_row_table() {
    let log = "\
        INFO: Iteration: 0\n\
        INFO: Highest Network Fitness: 3\n\
        INFO: Current Iteration Highest Network Fitness: 3\n\
        INFO: Average Fitness: 1.5\n\
        INFO: fitnessFunctionCount,iterationCount,coveredFitnessFunctionCount,bestCoverage,timeToReachFullCoverage\n\
        INFO: 10,25,8,0.8,12000\n\
        INFO: Summary written\n";
    let extraction = LogExtractor::new().extract(log).unwrap();

    let coverage = Table::from_csv_str(&extraction.coverage_csv.unwrap()).unwrap();
    assert_eq!(coverage.row_count(), 1);
    assert_eq!(coverage.column_f64("bestCoverage").unwrap(), [0.8]);
    assert_eq!(coverage.column_f64("timeToReachFullCoverage").unwrap(), [12000.0]);

    // The metric records around the block are still extracted.
    assert_eq!(extraction.table.len(), 1);
}

#[test]
fn forwarded_console_lines_are_recognized() {
    let log = "\
        INFO: Forwarded: Iteration: 0\n\
        INFO: Forwarded: Highest Network Fitness: 2.25\n";
    let extraction = LogExtractor::new().extract(log).unwrap();
    assert_eq!(extraction.table.len(), 1);
    assert_eq!(
        extraction.table.records()[0].get("highestNetworkFitness"),
        Some(2.25)
    );
}

#[test]
fn unbalanced_families_are_reported_not_guessed() {
    // Three iterations but only two fitness lines: the trial is malformed.
    let log = "\
        Iteration: 0\n\
        Highest Network Fitness: 1\n\
        Iteration: 1\n\
        Highest Network Fitness: 2\n\
        Iteration: 2\n";
    let err = LogExtractor::new().extract(log).unwrap_err();
    assert!(matches!(err, Error::FamilyLengthMismatch { .. }));
}

#[test]
fn log_without_markers_yields_empty_extraction() {
    let extraction = LogExtractor::new()
        .extract("no metrics here\njust chatter\n")
        .unwrap();
    assert!(extraction.table.is_empty());
    assert!(extraction.coverage_csv.is_none());
}
