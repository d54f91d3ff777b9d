//! Interestingness classification for disclosure records.

use crate::DisclosureRecord;
use serde::{Deserialize, Serialize};

/// Severity at or above this score reads as critical.
const CRITICAL_SEVERITY: f64 = 9.0;
/// Severity at or above this score reads as high.
const HIGH_SEVERITY: f64 = 7.5;

/// Terms indicating a high-impact vulnerability.
const HIGH_IMPACT_TERMS: &[&str] = &[
    "remote code execution",
    "privilege escalation",
    "root access",
    "wormable",
    "arbitrary code execution",
    "full system compromise",
];

/// Terms indicating a clever exploitation method.
const CLEVER_METHOD_TERMS: &[&str] = &[
    "race condition",
    "side channel",
    "sandbox escape",
    "container escape",
    "type confusion",
    "chained exploit",
    "exploit chain",
];

/// Terms indicating a notable discovery.
const NOTABLE_DISCOVERY_TERMS: &[&str] = &[
    "first time",
    "first known",
    "previously unknown",
    "affects all",
    "multiple vendors",
    "multi-vendor",
];

/// The classifier's output: a boolean verdict plus human-readable reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the disclosure merits commentary
    pub interesting: bool,
    /// Why, one reason per matched category
    pub reasons: Vec<String>,
}

/// Scores a disclosure record for interestingness.
///
/// Pure and deterministic: matches the description (case-insensitive) against
/// three disjoint keyword categories, each contributing at most one reason
/// regardless of how many of its terms matched, and folds in a severity
/// reason when the score clears the high or critical threshold. The verdict
/// is interesting iff any reason accumulated; there is no denylist.
///
/// # Examples
///
/// ```
/// use vulncast_core::{DisclosureRecord, classify};
/// use chrono::Utc;
///
/// let record = DisclosureRecord {
///     id: "CVE-2024-0001".to_string(),
///     published_at: Utc::now(),
///     description: "A race condition allows remote code execution".to_string(),
///     references: vec![],
///     technical_writeups: vec![],
///     severity: Some(9.8),
///     interesting_factors: vec![],
///     processed: false,
/// };
///
/// let verdict = classify(&record);
/// assert!(verdict.interesting);
/// assert_eq!(verdict.reasons.len(), 3);
/// ```
pub fn classify(record: &DisclosureRecord) -> Verdict {
    let description = record.description.to_lowercase();
    let mut reasons = Vec::new();

    let categories: [(&[&str], &str); 3] = [
        (HIGH_IMPACT_TERMS, "high impact"),
        (CLEVER_METHOD_TERMS, "clever exploitation method"),
        (NOTABLE_DISCOVERY_TERMS, "notable discovery"),
    ];

    for (terms, reason) in categories {
        if terms.iter().any(|term| description.contains(term)) {
            reasons.push(reason.to_string());
        }
    }

    // Critical wins when both thresholds are met
    if let Some(score) = record.severity {
        if score >= CRITICAL_SEVERITY {
            reasons.push("critical severity".to_string());
        } else if score >= HIGH_SEVERITY {
            reasons.push("high severity".to_string());
        }
    }

    Verdict {
        interesting: !reasons.is_empty(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(description: &str, severity: Option<f64>) -> DisclosureRecord {
        DisclosureRecord {
            id: "CVE-2024-0001".to_string(),
            published_at: Utc::now(),
            description: description.to_string(),
            references: vec![],
            technical_writeups: vec![],
            severity,
            interesting_factors: vec![],
            processed: false,
        }
    }

    #[test]
    fn test_no_match_is_boring() {
        let verdict = classify(&record("A minor bug in the settings page", None));
        assert!(!verdict.interesting);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_categories_are_additive() {
        let verdict = classify(&record(
            "Race condition leading to Remote Code Execution, previously unknown",
            None,
        ));
        assert!(verdict.interesting);
        assert_eq!(
            verdict.reasons,
            vec![
                "high impact".to_string(),
                "clever exploitation method".to_string(),
                "notable discovery".to_string(),
            ]
        );
    }

    #[test]
    fn test_one_reason_per_category() {
        // Two high-impact terms still yield a single reason
        let verdict = classify(&record(
            "Wormable remote code execution in the mail daemon",
            None,
        ));
        assert_eq!(verdict.reasons, vec!["high impact".to_string()]);
    }

    #[test]
    fn test_severity_thresholds() {
        let critical = classify(&record("bug", Some(9.0)));
        assert_eq!(critical.reasons, vec!["critical severity".to_string()]);

        let high = classify(&record("bug", Some(7.5)));
        assert_eq!(high.reasons, vec!["high severity".to_string()]);

        let medium = classify(&record("bug", Some(7.4)));
        assert!(!medium.interesting);

        let absent = classify(&record("bug", None));
        assert!(!absent.interesting);
    }

    #[test]
    fn test_critical_wins_over_high() {
        let verdict = classify(&record("bug", Some(9.9)));
        assert_eq!(verdict.reasons, vec!["critical severity".to_string()]);
    }

    #[test]
    fn test_deterministic() {
        let input = record("sandbox escape (affects all versions)", Some(8.1));
        let first = classify(&input);
        let second = classify(&input);
        assert_eq!(first, second);
    }
}
