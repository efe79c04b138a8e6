use rust_decimal::Decimal;
use serde::Serialize;

use super::error::{AmountOverflow, DivisionUndefined};
use super::model::{
    ClaimRecord, ClaimStatus, FraudIndicatorRecord, PolicyRecord, PolicyType, RiskLevel,
    VerifiedStatus,
};

// ---------------------------------------------------------------------------
// Totals and means
// ---------------------------------------------------------------------------

/// Sum of the present amounts and how many there were.
pub fn checked_total(
    amounts: impl IntoIterator<Item = Option<Decimal>>,
) -> Result<(Decimal, usize), AmountOverflow> {
    amounts
        .into_iter()
        .flatten()
        .try_fold((Decimal::ZERO, 0usize), |(total, n), amount| {
            total
                .checked_add(amount)
                .map(|total| (total, n + 1))
                .ok_or(AmountOverflow)
        })
}

pub fn mean_decimal(total: Decimal, count: usize) -> Result<Decimal, DivisionUndefined> {
    if count == 0 {
        return Err(DivisionUndefined);
    }
    total
        .checked_div(Decimal::from(count))
        .ok_or(DivisionUndefined)
}

pub fn mean_f64(values: impl IntoIterator<Item = f64>) -> Result<f64, DivisionUndefined> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        Err(DivisionUndefined)
    } else {
        Ok(sum / count as f64)
    }
}

fn na<T>(value: Option<T>, show: impl Fn(T) -> String) -> String {
    value.map(show).unwrap_or_else(|| "n/a".to_string())
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// Averages are `None` when taken over zero amounts; totals are `None` when
/// they overflow, which leaves the matching average undefined as well.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimsSummary {
    pub total_claims: usize,
    pub total_amount: Option<Decimal>,
    pub avg_amount: Option<Decimal>,
    pub settled_claims: usize,
    pub pending_claims: usize,
    /// Over claims with `days_to_settle > 0` only.
    pub avg_settlement_days: Option<f64>,
}

impl ClaimsSummary {
    pub fn from_claims(claims: &[ClaimRecord]) -> Self {
        let amounts = checked_total(claims.iter().map(|c| c.claim_amount)).ok();
        let count_status =
            |status: ClaimStatus| claims.iter().filter(|c| c.claim_status == status).count();

        // Zero or missing means not settled yet, whatever the status says.
        let settled_days = claims
            .iter()
            .filter_map(|c| c.days_to_settle)
            .filter(|&d| d > 0)
            .map(|d| d as f64);

        Self {
            total_claims: claims.len(),
            total_amount: amounts.map(|(total, _)| total),
            avg_amount: amounts.and_then(|(total, n)| mean_decimal(total, n).ok()),
            settled_claims: count_status(ClaimStatus::Settled),
            pending_claims: count_status(ClaimStatus::InProgress),
            avg_settlement_days: mean_f64(settled_days).ok(),
        }
    }

    /// Field name and display value, in declaration order.
    pub fn labeled(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total_claims", self.total_claims.to_string()),
            ("total_amount", na(self.total_amount, |v| v.to_string())),
            ("avg_amount", na(self.avg_amount, |v| v.round_dp(2).to_string())),
            ("settled_claims", self.settled_claims.to_string()),
            ("pending_claims", self.pending_claims.to_string()),
            ("avg_settlement_days", na(self.avg_settlement_days, |v| format!("{v:.1}"))),
        ]
    }

    /// Settled share of all claims, in percent.
    pub fn settlement_rate(&self) -> Option<f64> {
        (self.total_claims > 0)
            .then(|| self.settled_claims as f64 / self.total_claims as f64 * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicySummary {
    pub total_policies: usize,
    pub total_premium: Option<Decimal>,
    pub avg_premium: Option<Decimal>,
    pub total_coverage: Option<Decimal>,
    pub avg_risk_score: Option<f64>,
    pub auto_policies: usize,
    pub home_policies: usize,
}

impl PolicySummary {
    pub fn from_policies(policies: &[PolicyRecord]) -> Self {
        let premiums = checked_total(policies.iter().map(|p| p.premium_amount)).ok();
        let coverage = checked_total(policies.iter().map(|p| p.coverage_amount)).ok();
        let count_type =
            |kind: PolicyType| policies.iter().filter(|p| p.policy_type == kind).count();

        Self {
            total_policies: policies.len(),
            total_premium: premiums.map(|(total, _)| total),
            avg_premium: premiums.and_then(|(total, n)| mean_decimal(total, n).ok()),
            total_coverage: coverage.map(|(total, _)| total),
            avg_risk_score: mean_f64(policies.iter().filter_map(|p| p.risk_score)).ok(),
            auto_policies: count_type(PolicyType::Auto),
            home_policies: count_type(PolicyType::Home),
        }
    }

    pub fn labeled(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total_policies", self.total_policies.to_string()),
            ("total_premium", na(self.total_premium, |v| v.to_string())),
            ("avg_premium", na(self.avg_premium, |v| v.round_dp(2).to_string())),
            ("total_coverage", na(self.total_coverage, |v| v.to_string())),
            ("avg_risk_score", na(self.avg_risk_score, |v| format!("{v:.3}"))),
            ("auto_policies", self.auto_policies.to_string()),
            ("home_policies", self.home_policies.to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Fraud indicators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FraudSummary {
    pub total_indicators: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub flagged: usize,
}

impl FraudSummary {
    pub fn from_indicators(indicators: &[FraudIndicatorRecord]) -> Self {
        let count_level =
            |level: RiskLevel| indicators.iter().filter(|f| f.risk_level == level).count();

        Self {
            total_indicators: indicators.len(),
            high_risk: count_level(RiskLevel::High),
            medium_risk: count_level(RiskLevel::Medium),
            low_risk: count_level(RiskLevel::Low),
            flagged: indicators
                .iter()
                .filter(|f| f.verified_status == VerifiedStatus::Flagged)
                .count(),
        }
    }

    pub fn labeled(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total_indicators", self.total_indicators.to_string()),
            ("high_risk", self.high_risk.to_string()),
            ("medium_risk", self.medium_risk.to_string()),
            ("low_risk", self.low_risk.to_string()),
            ("flagged", self.flagged.to_string()),
        ]
    }
}
