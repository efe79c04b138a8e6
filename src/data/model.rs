use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Declares a categorical column: known labels map to variants, anything
/// else is kept verbatim in `Other` so unexpected labels never fail a load.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Every label in the known vocabulary, in display order.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn from_label(label: &str) -> Self {
                match label.trim() {
                    $($label => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }

            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(s) => s.as_str(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

categorical!(
    /// Kind of loss reported on a claim.
    ClaimType {
        AutoCollision => "Auto Collision",
        AutoTheft => "Auto Theft",
        AutoVandalism => "Auto Vandalism",
        HomeFire => "Home Fire",
        HomeWaterDamage => "Home Water Damage",
        HomeBurglary => "Home Burglary",
        HomeStormDamage => "Home Storm Damage",
    }
);

categorical!(
    ClaimStatus {
        Settled => "Settled",
        InProgress => "In Progress",
    }
);

categorical!(
    PolicyType {
        Auto => "Auto",
        Home => "Home",
    }
);

categorical!(
    RiskLevel {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
);

categorical!(
    /// Review outcome of a fraud indicator.
    VerifiedStatus {
        Flagged => "Flagged",
        Unflagged => "Unflagged",
        Verified => "Verified",
    }
);

// ---------------------------------------------------------------------------
// Passthrough – columns beyond the required ones
// ---------------------------------------------------------------------------

/// Extra cells of one row as `(header, text)`, in header order.
///
/// Serializes as a map so it can be flattened into its record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Passthrough(Vec<(String, String)>);

impl Passthrough {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Set a cell, replacing an existing one in place or appending a new column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let (column, value) = (column.into(), value.into());
        match self.0.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, String)> for Passthrough {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut extra = Passthrough::default();
        for (column, value) in iter {
            extra.insert(column, value);
        }
        extra
    }
}

impl Serialize for Passthrough {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in &self.0 {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Records – one row of each source file
// ---------------------------------------------------------------------------

// Numeric cells left empty (or `NaN`) in the file are `None`.

/// One row of `claims_data.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRecord {
    pub policy_id: String,
    pub claim_type: ClaimType,
    pub claim_amount: Option<Decimal>,
    pub claim_status: ClaimStatus,
    pub claim_date: NaiveDate,
    /// Only meaningful once the claim is settled; `None` for empty cells.
    pub days_to_settle: Option<i64>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// One row of `policies_data.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRecord {
    /// `POL-<segment>-<number>`.
    pub policy_id: String,
    pub policy_type: PolicyType,
    pub premium_amount: Option<Decimal>,
    pub coverage_amount: Option<Decimal>,
    /// In `[0, 1]`.
    pub risk_score: Option<f64>,
    pub policy_start_date: NaiveDate,
    pub policy_end_date: NaiveDate,
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// One row of `fraud_indicators.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudIndicatorRecord {
    pub risk_level: RiskLevel,
    pub verified_status: VerifiedStatus,
    pub detection_date: NaiveDate,
    #[serde(flatten)]
    pub extra: Passthrough,
}

// ---------------------------------------------------------------------------
// MergedClaim – claims ⟕ policies
// ---------------------------------------------------------------------------

/// A claim with the policy it references, when that policy exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedClaim {
    pub claim: ClaimRecord,
    pub policy: Option<PolicyRecord>,
}

impl MergedClaim {
    /// Risk score of the matched policy; absent for unmatched claims and
    /// for policies without a score.
    pub fn risk_score(&self) -> Option<f64> {
        self.policy.as_ref().and_then(|p| p.risk_score)
    }
}

// ---------------------------------------------------------------------------
// Table – rows plus the header they were read with
// ---------------------------------------------------------------------------

/// Parsed rows of one file together with its header, in file order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    pub columns: Vec<String>,
    pub rows: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip_through_display() {
        for claim_type in ClaimType::KNOWN {
            assert_eq!(&ClaimType::from_label(claim_type.label()), claim_type);
        }
        assert_eq!(ClaimStatus::from_label(" In Progress "), ClaimStatus::InProgress);
    }

    #[test]
    fn unknown_labels_are_kept_verbatim() {
        let level = RiskLevel::from_label("Critical");
        assert_eq!(level, RiskLevel::Other("Critical".into()));
        assert_eq!(level.to_string(), "Critical");
    }

    #[test]
    fn merged_claim_serializes_label_strings() {
        let claim = ClaimRecord {
            policy_id: "POL-A-1".into(),
            claim_type: ClaimType::HomeFire,
            claim_amount: Some(Decimal::new(150050, 2)),
            claim_status: ClaimStatus::Settled,
            claim_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            days_to_settle: Some(12),
            extra: Passthrough::from_iter([
                ("claim_id".to_string(), "CLM-7".to_string()),
                ("severity".to_string(), "High".to_string()),
            ]),
        };
        let json = serde_json::to_value(MergedClaim { claim, policy: None }).unwrap();
        assert_eq!(json["claim"]["claim_type"], "Home Fire");
        assert_eq!(json["claim"]["claim_date"], "2024-03-01");
        assert_eq!(json["claim"]["severity"], "High");
        assert!(json["policy"].is_null());
    }

    #[test]
    fn passthrough_keeps_header_order_and_replaces_in_place() {
        let mut extra: Passthrough = [
            ("severity".to_string(), "Low".to_string()),
            ("claim_id".to_string(), "CLM-1".to_string()),
        ]
        .into_iter()
        .collect();
        extra.insert("severity", "High");
        extra.insert("adjuster", "Kim");

        assert_eq!(extra.columns().collect::<Vec<_>>(), ["severity", "claim_id", "adjuster"]);
        assert_eq!(extra.get("severity"), Some("High"));
        assert_eq!(extra.get("missing"), None);

        let json = serde_json::to_string(&extra).unwrap();
        assert_eq!(json, r#"{"severity":"High","claim_id":"CLM-1","adjuster":"Kim"}"#);
    }
}
