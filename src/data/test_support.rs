//! Record builders and on-disk fixtures shared by the data-layer tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use super::model::{ClaimRecord, ClaimStatus, ClaimType, Passthrough, PolicyRecord, PolicyType};

pub fn claim(
    policy_id: &str,
    claim_type: ClaimType,
    amount: i64,
    status: ClaimStatus,
    days_to_settle: Option<i64>,
) -> ClaimRecord {
    ClaimRecord {
        policy_id: policy_id.to_string(),
        claim_type,
        claim_amount: Some(Decimal::from(amount)),
        claim_status: status,
        claim_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        days_to_settle,
        extra: Passthrough::default(),
    }
}

/// An auto policy with a 1200 premium and 50000 coverage.
pub fn policy(policy_id: &str, risk_score: f64) -> PolicyRecord {
    PolicyRecord {
        policy_id: policy_id.to_string(),
        policy_type: PolicyType::Auto,
        premium_amount: Some(Decimal::from(1200)),
        coverage_amount: Some(Decimal::from(50_000)),
        risk_score: Some(risk_score),
        policy_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        policy_end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        extra: Passthrough::default(),
    }
}

pub const CLAIMS_CSV: &str = "\
claim_id,policy_id,claim_type,claim_amount,claim_status,claim_date,days_to_settle
CLM-1,POL-A-1001,Auto Collision,1000,Settled,2024-01-15,5
CLM-2,POL-B-2002,Home Fire,2000,In Progress,2024-02-01,0
CLM-3,POL-A-1003,Auto Theft,1500.25,Settled,2024-02-20,15
CLM-4,POL-Z-9999,Home Burglary,700,In Progress,2024-03-05,
CLM-5,POL-B-2002,Home Water Damage,300,Settled,2024-03-10,10
";

pub const POLICIES_CSV: &str = "\
policy_id,policy_type,premium_amount,coverage_amount,risk_score,policy_start_date,policy_end_date
POL-A-1001,Auto,1200,50000,0.35,2023-06-01,2024-06-01
POL-B-2002,Home,900.50,250000,0.72,2023-01-01,2024-01-01
POL-A-1003,Auto,1500,60000,0.4,2023-09-15,2024-09-15
";

pub const FRAUD_CSV: &str = "\
risk_level,verified_status,detection_date
High,Flagged,2024-01-20
Low,Verified,2024-02-02
Medium,Flagged,2024-02-11
Low,Unflagged,2024-03-01
";

/// A data directory holding the given file contents; `None` leaves a file out.
pub fn data_dir(claims: Option<&str>, policies: Option<&str>, fraud: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, body) in [
        ("claims_data.csv", claims),
        ("policies_data.csv", policies),
        ("fraud_indicators.csv", fraud),
    ] {
        if let Some(body) = body {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
    }
    dir
}

/// The standard fixture: every file present.
pub fn sample_dir() -> TempDir {
    data_dir(Some(CLAIMS_CSV), Some(POLICIES_CSV), Some(FRAUD_CSV))
}
