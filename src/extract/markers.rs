//! Declarative marker rules for the external tool's log lines.
//!
//! The tool reports metrics as free-text lines; recognition is prefix-based
//! against this table. New metrics are added by extending [`MARKER_RULES`],
//! not by touching the extractor's control flow.

/// One recognized line marker, bound to a metric field and its CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRule {
    /// Prefix of the normalized line that selects this rule
    pub prefix: &'static str,
    /// Internal field name on the extracted record
    pub field: &'static str,
    /// Column header used when the field is persisted to CSV
    pub header: &'static str,
}

/// Field name of the iteration marker, which keys every record.
pub const ITERATION_FIELD: &str = "iteration";

/// Marker rule table, evaluated in order against each normalized line.
pub const MARKER_RULES: &[MarkerRule] = &[
    MarkerRule {
        prefix: "Iteration:",
        field: ITERATION_FIELD,
        header: "Iteration",
    },
    MarkerRule {
        prefix: "Highest Network Fitness:",
        field: "highestNetworkFitness",
        header: "Highest Network Fitness",
    },
    MarkerRule {
        prefix: "Current Iteration Highest Network Fitness:",
        field: "currentIterationHighestFitness",
        header: "Iteration Highest Network Fitness",
    },
    MarkerRule {
        prefix: "Average Fitness:",
        field: "averageNetworkFitness",
        header: "Average Network Fitness",
    },
];

/// Prefix of the line that opens a coverage-summary capture window.
pub const COVERAGE_MARKER: &str = "fitness";

/// Noise tags stripped from both ends of every line before recognition:
/// the logging-level tag and the browser-console forwarding tag.
const NOISE_TAGS: &[&str] = &["INFO:", "Forwarded:"];

/// Normalize a raw log line: trim whitespace and strip the known noise tags
/// from either end.
#[must_use]
pub fn normalize(line: &str) -> &str {
    let mut text = line.trim();
    for tag in NOISE_TAGS {
        if let Some(rest) = text.strip_prefix(tag) {
            text = rest.trim();
        }
        if let Some(rest) = text.strip_suffix(tag) {
            text = rest.trim();
        }
    }
    text
}

/// Match a normalized line against the rule table.
///
/// Returns the rule index and the raw value text after the marker, or `None`
/// when no rule applies.
#[must_use]
pub fn match_rule(line: &str) -> Option<(usize, &str)> {
    MARKER_RULES.iter().enumerate().find_map(|(index, rule)| {
        line.strip_prefix(rule.prefix)
            .map(|value| (index, value.trim()))
    })
}

/// Look up the rule index for a field name.
#[must_use]
pub fn field_index(field: &str) -> Option<usize> {
    MARKER_RULES.iter().position(|rule| rule.field == field)
}
