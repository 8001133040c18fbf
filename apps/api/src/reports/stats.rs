//! Grant statistics aggregation.
//!
//! Pure and deterministic: no I/O, no clock. Budget strings are parsed on a
//! best-effort basis; a malformed budget on one grant contributes zero and
//! never aborts aggregation of the rest.

use serde::Serialize;

use crate::models::grant::FundingOpportunity;

#[derive(Debug, Clone, Serialize)]
pub struct GrantStats {
    pub total_applied: usize,
    pub won_count: usize,
    /// Percentage in [0, 100]; 0.0 for an empty grant set.
    pub success_rate: f64,
    /// Sum of the first budget amount of every won grant.
    pub total_funding_secured: f64,
}

pub fn aggregate(grants: &[FundingOpportunity]) -> GrantStats {
    let total_applied = grants.len();
    let won: Vec<&FundingOpportunity> = grants.iter().filter(|g| g.won).collect();
    let won_count = won.len();

    let success_rate = if total_applied == 0 {
        0.0
    } else {
        won_count as f64 / total_applied as f64 * 100.0
    };

    let total_funding_secured = won
        .iter()
        .map(|g| parse_budget_amount(&g.budget))
        .sum();

    GrantStats {
        total_applied,
        won_count,
        success_rate,
        total_funding_secured,
    }
}

/// Parses the first numeric amount out of a free-text budget string.
///
/// `"$50,000 - $200,000"` yields 50000.0: the currency symbol and thousands
/// separators are stripped and only the first segment of a range is read —
/// the upper bound is intentionally ignored. Anything unparseable yields 0.0.
pub fn parse_budget_amount(budget: &str) -> f64 {
    budget
        .replace('$', "")
        .replace(',', "")
        .split('-')
        .next()
        .and_then(|segment| segment.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_grant(budget: &str, won: bool) -> FundingOpportunity {
        FundingOpportunity {
            id: None,
            title: "Grant".to_string(),
            url: "https://example.com".to_string(),
            summary: "Summary".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            status: "Open".to_string(),
            budget: budget.to_string(),
            company_affinity: 80.0,
            won,
        }
    }

    #[test]
    fn test_empty_set_has_zero_success_rate() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_applied, 0);
        assert_eq!(stats.won_count, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.total_funding_secured, 0.0);
    }

    #[test]
    fn test_success_rate_bounded_0_to_100() {
        let grants = vec![
            make_grant("$100", true),
            make_grant("$100", true),
            make_grant("$100", false),
        ];
        let stats = aggregate(&grants);
        assert!((0.0..=100.0).contains(&stats.success_rate));

        let all_won = vec![make_grant("$100", true)];
        assert_eq!(aggregate(&all_won).success_rate, 100.0);
    }

    #[test]
    fn test_range_budget_contributes_first_segment_only() {
        let stats = aggregate(&[make_grant("$50,000 - $200,000", true)]);
        assert_eq!(stats.total_funding_secured, 50000.0);
    }

    #[test]
    fn test_single_amount_budget() {
        let stats = aggregate(&[make_grant("$150,000", true)]);
        assert_eq!(stats.total_funding_secured, 150000.0);
    }

    #[test]
    fn test_malformed_budget_contributes_zero_without_error() {
        let grants = vec![
            make_grant("not a number", true),
            make_grant("$150,000", true),
        ];
        let stats = aggregate(&grants);
        assert_eq!(stats.total_funding_secured, 150000.0);
        assert_eq!(stats.won_count, 2);
    }

    #[test]
    fn test_empty_budget_contributes_zero() {
        assert_eq!(parse_budget_amount(""), 0.0);
    }

    #[test]
    fn test_lost_grants_do_not_count_toward_funding() {
        let grants = vec![
            make_grant("$25,000 - $100,000", false),
            make_grant("$150,000", true),
        ];
        let stats = aggregate(&grants);
        assert_eq!(stats.total_funding_secured, 150000.0);
        assert_eq!(stats.total_applied, 2);
        assert_eq!(stats.won_count, 1);
        assert_eq!(stats.success_rate, 50.0);
    }
}
