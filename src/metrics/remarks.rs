//! Turns technical `flag_reason` codes into text fit for a report.

/// Known code-to-text mappings, checked before any heuristic formatting.
const REASON_MAP: &[(&str, &str)] = &[
    ("ok", "Within normal parameters"),
    ("rel_residual>30%", "Relative deviation exceeds 30% threshold"),
    ("rel_residual>30", "Relative deviation exceeds 30% threshold"),
    ("abs_residual>p95", "Absolute deviation exceeds 95th percentile"),
    ("abs_residual>95", "Absolute deviation exceeds 95th percentile"),
];

/// Convert a raw `flag_reason` code into readable text.
///
/// Exact matches against the known codes win; partial matches on the residual
/// code families come next; anything else gets mechanical cleanup (underscores
/// to spaces, `>` spelled out, capitalized) so unrecognized codes still read
/// acceptably instead of leaking raw identifiers into a report.
#[must_use]
pub fn describe_flag_reason(reason: &str) -> String {
    let reason = reason.trim();
    if reason.is_empty() || reason == "N/A" {
        return "No reason specified".to_owned();
    }

    for (code, text) in REASON_MAP {
        if reason == *code {
            return (*text).to_owned();
        }
    }

    let lowered = reason.to_lowercase();
    if lowered.contains("rel_residual") && reason.contains("30") {
        return "Relative deviation exceeds 30% threshold".to_owned();
    }
    if lowered.contains("abs_residual") && (reason.contains("p95") || reason.contains("95")) {
        return "Absolute deviation exceeds 95th percentile".to_owned();
    }
    if lowered == "ok" {
        return "Within normal parameters".to_owned();
    }

    let mut formatted = reason
        .replace('_', " ")
        .replace('>', " exceeds ")
        .replace("p95", "95th percentile")
        .replace("rel residual", "Relative deviation")
        .replace("abs residual", "Absolute deviation");

    if let Some(first) = formatted.get(..1) {
        let capitalized = first.to_uppercase();
        formatted.replace_range(..1, &capitalized);
    }

    formatted
}
