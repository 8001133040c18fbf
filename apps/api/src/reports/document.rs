//! Report document construction.
//!
//! Builds the intermediate [`ReportDocument`] model the renderer consumes.
//! Pure functions: the caller supplies the profile and grant snapshot, and
//! no I/O happens here.

use crate::models::company::CompanyProfile;
use crate::models::grant::FundingOpportunity;
use crate::models::report::ReportKind;
use crate::reports::stats::aggregate;

pub const NO_GRANTS_WON_PLACEHOLDER: &str = "No grants won yet";
pub const NOT_SPECIFIED: &str = "Not specified";

/// A titled, sectioned document. Intermediate only — never persisted.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Builds the document for the requested report kind.
///
/// `text` is only consulted for [`ReportKind::FromText`]; callers validate
/// its presence before getting here.
pub fn build_document(
    profile: Option<&CompanyProfile>,
    grants: &[FundingOpportunity],
    kind: ReportKind,
    text: Option<&str>,
) -> ReportDocument {
    match kind {
        ReportKind::Generated => build_generated(profile, grants),
        ReportKind::FromText => ReportDocument {
            title: "API Report".to_string(),
            sections: vec![Section {
                title: "Report Content".to_string(),
                body: text.unwrap_or_default().to_string(),
            }],
        },
    }
}

fn build_generated(
    profile: Option<&CompanyProfile>,
    grants: &[FundingOpportunity],
) -> ReportDocument {
    let stats = aggregate(grants);

    let company_body = format!(
        "Name: {}\nWebsite: {}\nScope: {}",
        profile.map_or(NOT_SPECIFIED, |p| p.name.as_str()),
        profile.map_or(NOT_SPECIFIED, |p| p.url.as_str()),
        profile.map_or(NOT_SPECIFIED, |p| p.scope.as_str()),
    );

    let stats_body = format!(
        "Total Applications: {}\nGrants Won: {}\nSuccess Rate: {:.1}%\nTotal Funding Secured: {}",
        stats.total_applied,
        stats.won_count,
        stats.success_rate,
        format_currency(stats.total_funding_secured),
    );

    let won: Vec<&FundingOpportunity> = grants.iter().filter(|g| g.won).collect();
    let won_body = if won.is_empty() {
        NO_GRANTS_WON_PLACEHOLDER.to_string()
    } else {
        won.iter()
            .map(|g| {
                format!(
                    "{}\nBudget: {} | Deadline: {} | Affinity: {:.0}%",
                    g.title, g.budget, g.deadline, g.company_affinity
                )
            })
            .collect::<Vec<String>>()
            .join("\n\n")
    };

    ReportDocument {
        title: "Grant Funding Report".to_string(),
        sections: vec![
            Section {
                title: "Company Information".to_string(),
                body: company_body,
            },
            Section {
                title: "Grant Statistics".to_string(),
                body: stats_body,
            },
            Section {
                title: "Won Grants".to_string(),
                body: won_body,
            },
        ],
    }
}

/// Formats an amount as `$1,234,567.89`.
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_grant(title: &str, budget: &str, won: bool) -> FundingOpportunity {
        FundingOpportunity {
            id: None,
            title: title.to_string(),
            url: "https://example.com".to_string(),
            summary: "Summary".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: "Open".to_string(),
            budget: budget.to_string(),
            company_affinity: 85.0,
            won,
        }
    }

    fn make_profile() -> CompanyProfile {
        CompanyProfile {
            name: "Acme".to_string(),
            url: "https://acme.example".to_string(),
            scope: "Clean energy widgets".to_string(),
        }
    }

    #[test]
    fn test_from_text_yields_single_report_content_section() {
        let doc = build_document(None, &[], ReportKind::FromText, Some("hello"));
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Report Content");
        assert_eq!(doc.sections[0].body, "hello");
    }

    #[test]
    fn test_generated_has_three_sections_in_order() {
        let doc = build_document(Some(&make_profile()), &[], ReportKind::Generated, None);
        let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Company Information", "Grant Statistics", "Won Grants"]
        );
    }

    #[test]
    fn test_no_won_grants_uses_placeholder() {
        let grants = vec![make_grant("A", "$100", false)];
        let doc = build_document(None, &grants, ReportKind::Generated, None);
        assert_eq!(doc.sections[2].body, NO_GRANTS_WON_PLACEHOLDER);
    }

    #[test]
    fn test_missing_profile_falls_back_to_not_specified() {
        let doc = build_document(None, &[], ReportKind::Generated, None);
        let body = &doc.sections[0].body;
        assert_eq!(body.matches(NOT_SPECIFIED).count(), 3);
    }

    #[test]
    fn test_statistics_formatting() {
        let grants = vec![
            make_grant("A", "$50,000 - $200,000", true),
            make_grant("B", "$150,000", false),
            make_grant("C", "bad", false),
        ];
        let doc = build_document(None, &grants, ReportKind::Generated, None);
        let body = &doc.sections[1].body;
        assert!(body.contains("Total Applications: 3"));
        assert!(body.contains("Grants Won: 1"));
        assert!(body.contains("Success Rate: 33.3%"));
        assert!(body.contains("Total Funding Secured: $50,000.00"));
    }

    #[test]
    fn test_won_grants_listed_in_store_order() {
        let grants = vec![
            make_grant("First", "$100", true),
            make_grant("Skipped", "$100", false),
            make_grant("Second", "$100", true),
        ];
        let doc = build_document(None, &grants, ReportKind::Generated, None);
        let body = &doc.sections[2].body;
        let first = body.find("First").unwrap();
        let second = body.find("Second").unwrap();
        assert!(first < second);
        assert!(!body.contains("Skipped"));
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(50000.0), "$50,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
    }
}
