use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::model::{ClaimRecord, FraudIndicatorRecord, PolicyRecord, Table};
use super::stats::{ClaimsSummary, FraudSummary, PolicySummary};

// ---------------------------------------------------------------------------
// Dataset – which of the three files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dataset {
    Claims,
    Policies,
    FraudIndicators,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Claims, Dataset::Policies, Dataset::FraudIndicators];

    pub fn label(self) -> &'static str {
        match self {
            Dataset::Claims => "Claims Data",
            Dataset::Policies => "Policies Data",
            Dataset::FraudIndicators => "Fraud Indicators",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Claims => "claims_data.csv",
            Dataset::Policies => "policies_data.csv",
            Dataset::FraudIndicators => "fraud_indicators.csv",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DatasetOverview – the labelled statistics shown above each table
// ---------------------------------------------------------------------------

/// Human-readable statistics for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub dataset: Dataset,
    pub record_count: usize,
    /// Header in file order, passthrough columns included.
    pub columns: Vec<String>,
    /// `(label, value)` lines specific to the dataset.
    pub facts: Vec<(String, String)>,
}

impl DatasetOverview {
    pub fn claims(table: &Table<ClaimRecord>) -> Self {
        let summary = ClaimsSummary::from_claims(&table.rows);
        let claim_types: BTreeSet<_> = table.rows.iter().map(|c| &c.claim_type).collect();

        Self::new(Dataset::Claims, table, vec![
            fact("Claim Types", claim_types.len()),
            fact("Total Claim Amount", or_na(summary.total_amount.map(format_money))),
            fact("Average Claim Amount", or_na(summary.avg_amount.map(format_money))),
            fact(
                "Settlement Rate",
                or_na(summary.settlement_rate().map(|r| format!("{r:.1}%"))),
            ),
        ])
    }

    pub fn policies(table: &Table<PolicyRecord>) -> Self {
        let summary = PolicySummary::from_policies(&table.rows);
        let policy_types: BTreeSet<_> = table.rows.iter().map(|p| &p.policy_type).collect();

        Self::new(Dataset::Policies, table, vec![
            fact("Policy Types", policy_types.len()),
            fact("Total Premium Revenue", or_na(summary.total_premium.map(format_money))),
            fact("Average Premium", or_na(summary.avg_premium.map(format_money))),
            fact("Total Coverage", or_na(summary.total_coverage.map(format_money))),
        ])
    }

    pub fn fraud_indicators(table: &Table<FraudIndicatorRecord>) -> Self {
        let summary = FraudSummary::from_indicators(&table.rows);

        Self::new(Dataset::FraudIndicators, table, vec![
            fact("High Risk Indicators", summary.high_risk),
            fact("Medium Risk Indicators", summary.medium_risk),
            fact("Low Risk Indicators", summary.low_risk),
            fact("Flagged Cases", summary.flagged),
        ])
    }

    fn new<T>(dataset: Dataset, table: &Table<T>, facts: Vec<(String, String)>) -> Self {
        Self {
            dataset,
            record_count: table.rows.len(),
            columns: table.columns.clone(),
            facts,
        }
    }

    /// Every line including record count and columns, as a markdown list.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("**Dataset: {}**\n\n", self.dataset);
        out.push_str(&format!("- Total Records: {}\n", self.record_count));
        out.push_str(&format!("- Columns: {}\n", self.columns.join(", ")));
        for (label, value) in &self.facts {
            out.push_str(&format!("- {label}: {value}\n"));
        }
        out
    }
}

fn fact(label: &str, value: impl ToString) -> (String, String) {
    (label.to_string(), value.to_string())
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "n/a".to_string())
}

/// `$1,234,567.89`
pub fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2).abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}
