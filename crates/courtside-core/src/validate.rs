//! Semantic checks on category data that the JSON schema cannot express.
//!
//! Classification itself never rejects input. These checks are what
//! strict mode and `court check` use to refuse malformed category sets.

use std::collections::HashSet;

use crate::errors::{CheckIssue, EligibilityError};
use crate::spec::category::CategoryEligibilityData;

/// Run all category checks. `buffer_range` is checked too (E106).
pub fn validate_categories(
    categories: &[CategoryEligibilityData],
    buffer_range: f64,
) -> Vec<CheckIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (i, c) in categories.iter().enumerate() {
        let path = format!("$.categories[{i}]");

        if !c.min_elo.is_finite() || !c.max_elo.is_finite() {
            issues.push(issue(
                "E104",
                format!("category '{}' has a non-finite ELO bound", c.category),
                &path,
            ));
        } else if c.min_elo > c.max_elo {
            issues.push(issue(
                "E101",
                format!(
                    "category '{}' has min_elo {} above max_elo {}",
                    c.category, c.min_elo, c.max_elo
                ),
                &path,
            ));
        }

        if c.max_participants < 0 {
            issues.push(issue(
                "E102",
                format!(
                    "category '{}' has negative max_participants ({})",
                    c.category, c.max_participants
                ),
                &format!("{path}.max_participants"),
            ));
        }
        if c.current_participants < 0 {
            issues.push(issue(
                "E103",
                format!(
                    "category '{}' has negative current_participants ({})",
                    c.category, c.current_participants
                ),
                &format!("{path}.current_participants"),
            ));
        }

        if !seen.insert(c.category.as_str()) {
            issues.push(issue(
                "E105",
                format!("duplicate category '{}'", c.category),
                &format!("{path}.category"),
            ));
        }

        if c.max_participants >= 0 && c.current_participants > c.max_participants {
            issues.push(issue(
                "W101",
                format!(
                    "category '{}' is overbooked ({}/{})",
                    c.category, c.current_participants, c.max_participants
                ),
                &format!("{path}.current_participants"),
            ));
        }
    }

    check_overlaps(categories, &mut issues);

    if !buffer_range.is_finite() || buffer_range < 0.0 {
        issues.push(CheckIssue {
            code: "E106".to_string(),
            check: "buffer".to_string(),
            message: format!("buffer range {buffer_range} must be finite and non-negative"),
            path: None,
        });
    }

    issues
}

/// First error-level issue as a typed error, if any.
pub fn ensure_valid(
    categories: &[CategoryEligibilityData],
    buffer_range: f64,
) -> Result<(), EligibilityError> {
    if !buffer_range.is_finite() || buffer_range < 0.0 {
        return Err(EligibilityError::InvalidBuffer(buffer_range));
    }
    let issues = validate_categories(categories, buffer_range);
    let Some(first) = issues.iter().find(|i| i.is_error()) else {
        return Ok(());
    };
    let category = first
        .path
        .as_deref()
        .and_then(index_from_path)
        .and_then(|i| categories.get(i))
        .map(|c| c.category.clone())
        .unwrap_or_else(|| "?".into());
    Err(EligibilityError::InvalidCategory {
        category,
        message: first.message.clone(),
    })
}

// W102: two well-formed ranges share more than an endpoint.
fn check_overlaps(categories: &[CategoryEligibilityData], issues: &mut Vec<CheckIssue>) {
    let well_formed: Vec<(usize, &CategoryEligibilityData)> = categories
        .iter()
        .enumerate()
        .filter(|(_, c)| c.min_elo.is_finite() && c.max_elo.is_finite() && c.min_elo <= c.max_elo)
        .collect();

    for (n, (i, a)) in well_formed.iter().enumerate() {
        for (_, b) in well_formed.iter().skip(n + 1) {
            if a.category == b.category {
                continue;
            }
            if a.min_elo < b.max_elo && b.min_elo < a.max_elo {
                issues.push(issue(
                    "W102",
                    format!(
                        "ELO ranges of '{}' ({}-{}) and '{}' ({}-{}) overlap",
                        a.category, a.min_elo, a.max_elo, b.category, b.min_elo, b.max_elo
                    ),
                    &format!("$.categories[{i}]"),
                ));
            }
        }
    }
}

fn issue(code: &str, message: String, path: &str) -> CheckIssue {
    CheckIssue {
        code: code.to_string(),
        check: "categories".to_string(),
        message,
        path: Some(path.to_string()),
    }
}

fn index_from_path(path: &str) -> Option<usize> {
    let start = path.find('[')? + 1;
    let end = start + path[start..].find(']')?;
    path[start..end].parse().ok()
}
