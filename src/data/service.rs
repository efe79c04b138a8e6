use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;
use super::filter::{self, ClaimFilter};
use super::join;
use super::loader;
use super::model::{
    ClaimRecord, ClaimType, FraudIndicatorRecord, MergedClaim, PolicyRecord, PolicyType,
    RiskLevel,
};
use super::overview::{Dataset, DatasetOverview};
use super::stats::{ClaimsSummary, FraudSummary, PolicySummary};

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// DatasetService
// ---------------------------------------------------------------------------

/// Read-only access to the three CSV files under one data directory.
///
/// Nothing is cached: every call reads its files afresh, so calls share no
/// state and the files may change between them.
#[derive(Debug, Clone)]
pub struct DatasetService {
    data_dir: PathBuf,
}

impl DatasetService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, dataset: Dataset) -> PathBuf {
        self.data_dir.join(dataset.file_name())
    }

    // -- Loading, with optional categorical filters --

    pub fn load_claims(&self, claim_types: Option<&BTreeSet<ClaimType>>) -> Result<Vec<ClaimRecord>> {
        let table = loader::load_claims(&self.path_of(Dataset::Claims))?;
        Ok(filter::retain_categories(table.rows, claim_types, |c| &c.claim_type))
    }

    pub fn load_policies(
        &self,
        policy_types: Option<&BTreeSet<PolicyType>>,
    ) -> Result<Vec<PolicyRecord>> {
        let table = loader::load_policies(&self.path_of(Dataset::Policies))?;
        Ok(filter::retain_categories(table.rows, policy_types, |p| &p.policy_type))
    }

    pub fn load_fraud_indicators(
        &self,
        risk_levels: Option<&BTreeSet<RiskLevel>>,
    ) -> Result<Vec<FraudIndicatorRecord>> {
        let table = loader::load_fraud_indicators(&self.path_of(Dataset::FraudIndicators))?;
        Ok(filter::retain_categories(table.rows, risk_levels, |f| &f.risk_level))
    }

    // -- Summaries --

    pub fn claims_summary(&self) -> Result<ClaimsSummary> {
        Ok(ClaimsSummary::from_claims(&self.load_claims(None)?))
    }

    pub fn policy_summary(&self) -> Result<PolicySummary> {
        Ok(PolicySummary::from_policies(&self.load_policies(None)?))
    }

    pub fn fraud_summary(&self) -> Result<FraudSummary> {
        Ok(FraudSummary::from_indicators(&self.load_fraud_indicators(None)?))
    }

    /// Statistics for the overview tab, computed over the unfiltered file.
    pub fn overview(&self, dataset: Dataset) -> Result<DatasetOverview> {
        let path = self.path_of(dataset);
        Ok(match dataset {
            Dataset::Claims => DatasetOverview::claims(&loader::load_claims(&path)?),
            Dataset::Policies => DatasetOverview::policies(&loader::load_policies(&path)?),
            Dataset::FraudIndicators => {
                DatasetOverview::fraud_indicators(&loader::load_fraud_indicators(&path)?)
            }
        })
    }

    // -- Claims ⟕ policies --

    /// Every claim, with its policy attached where one matches.
    pub fn merge_claims_with_policies(&self) -> Result<Vec<MergedClaim>> {
        let claims = self.load_claims(None)?;
        let policies = self.load_policies(None)?;
        let merged = join::left_join(claims, &policies);

        let unmatched = merged.iter().filter(|m| m.policy.is_none()).count();
        log::info!(
            "Merged claims with {} policies: {} rows, {unmatched} without a policy",
            policies.len(),
            merged.len()
        );
        Ok(merged)
    }

    /// Merged rows whose policy risk score is at least `threshold`; see
    /// [`join::DEFAULT_RISK_THRESHOLD`].
    pub fn high_risk_claims(&self, threshold: f64) -> Result<Vec<MergedClaim>> {
        Ok(join::high_risk(self.merge_claims_with_policies()?, threshold))
    }

    // -- Explorer queries --

    pub fn filter_claims(&self, criteria: &ClaimFilter) -> Result<Vec<ClaimRecord>> {
        Ok(criteria.apply(self.load_claims(None)?))
    }

    pub fn search_policies(&self, query: &str) -> Result<Vec<PolicyRecord>> {
        Ok(filter::search_policies(self.load_policies(None)?, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::join::DEFAULT_RISK_THRESHOLD;
    use crate::data::model::ClaimStatus;
    use crate::data::test_support::{data_dir, sample_dir, CLAIMS_CSV, POLICIES_CSV};
    use rust_decimal::Decimal;

    #[test]
    fn claim_type_filter_is_an_ordered_subsequence() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());
        let all = service.load_claims(None).unwrap();

        let selections = [
            BTreeSet::new(),
            BTreeSet::from([ClaimType::HomeFire]),
            BTreeSet::from([ClaimType::AutoCollision, ClaimType::HomeWaterDamage]),
            BTreeSet::from([ClaimType::HomeStormDamage]),
        ];
        for selected in &selections {
            let filtered = service.load_claims(Some(selected)).unwrap();
            let expected: Vec<_> = all
                .iter()
                .filter(|c| selected.is_empty() || selected.contains(&c.claim_type))
                .cloned()
                .collect();
            assert_eq!(filtered, expected);
        }
    }

    #[test]
    fn policy_and_risk_filters() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());

        let homes = service
            .load_policies(Some(&BTreeSet::from([PolicyType::Home])))
            .unwrap();
        assert_eq!(homes.len(), 1);
        assert_eq!(homes[0].policy_id, "POL-B-2002");

        let low = service
            .load_fraud_indicators(Some(&BTreeSet::from([RiskLevel::Low])))
            .unwrap();
        assert_eq!(low.len(), 2);
        assert_eq!(service.load_fraud_indicators(None).unwrap().len(), 4);
    }

    #[test]
    fn summary_total_matches_load() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());
        let summary = service.claims_summary().unwrap();

        assert_eq!(summary.total_claims, service.load_claims(None).unwrap().len());
        assert_eq!(summary.total_amount, Some(Decimal::new(550025, 2)));
        assert_eq!(summary.avg_amount, Some(Decimal::new(110005, 2)));
        assert_eq!(summary.settled_claims, 3);
        assert_eq!(summary.pending_claims, 2);
        assert_eq!(summary.avg_settlement_days, Some(10.0));
    }

    #[test]
    fn header_only_claims_file_has_undefined_averages() {
        let dir = data_dir(
            Some("policy_id,claim_type,claim_amount,claim_status,claim_date,days_to_settle\n"),
            None,
            None,
        );
        let summary = DatasetService::new(dir.path()).claims_summary().unwrap();
        assert_eq!(summary.total_claims, 0);
        assert_eq!(summary.avg_amount, None);
        assert_eq!(summary.avg_settlement_days, None);
    }

    #[test]
    fn policy_and_fraud_summaries() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());

        let policies = service.policy_summary().unwrap();
        assert_eq!(policies.total_policies, 3);
        assert_eq!(policies.total_premium, Some(Decimal::new(36005, 1)));
        assert_eq!(policies.auto_policies, 2);
        assert_eq!(policies.home_policies, 1);

        let fraud = service.fraud_summary().unwrap();
        assert_eq!(fraud.total_indicators, 4);
        assert_eq!(fraud.flagged, 2);
    }

    #[test]
    fn merge_keeps_every_claim() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());
        let claims = service.load_claims(None).unwrap();
        let merged = service.merge_claims_with_policies().unwrap();

        assert_eq!(merged.len(), claims.len());
        let unmatched: Vec<_> = merged.iter().filter(|m| m.policy.is_none()).collect();
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].claim.policy_id, "POL-Z-9999");
    }

    #[test]
    fn duplicate_policy_rows_grow_the_merge() {
        let duplicated = format!("{POLICIES_CSV}POL-A-1001,Auto,10,100,0.95,2023-01-01,2023-12-31\n");
        let dir = data_dir(Some(CLAIMS_CSV), Some(&duplicated), None);
        let service = DatasetService::new(dir.path());

        let merged = service.merge_claims_with_policies().unwrap();
        assert_eq!(merged.len(), service.load_claims(None).unwrap().len() + 1);
        assert_eq!(merged[0].risk_score(), Some(0.35));
        assert_eq!(merged[1].risk_score(), Some(0.95));
    }

    #[test]
    fn high_risk_uses_inclusive_threshold() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());

        let ids = |threshold| -> Vec<String> {
            service
                .high_risk_claims(threshold)
                .unwrap()
                .into_iter()
                .map(|m| m.claim.policy_id)
                .collect()
        };
        assert_eq!(ids(DEFAULT_RISK_THRESHOLD), ["POL-B-2002", "POL-A-1003", "POL-B-2002"]);
        assert_eq!(ids(0.7), ["POL-B-2002", "POL-B-2002"]);
        assert!(ids(0.99).is_empty());
        assert_eq!(ids(0.0).len(), 4);
    }

    #[test]
    fn blank_risk_score_drops_out_of_high_risk_only() {
        let policies = "\
policy_id,policy_type,premium_amount,coverage_amount,risk_score,policy_start_date,policy_end_date
POL-A-1001,Auto,1200,50000,0.9,2023-06-01,2024-06-01
POL-B-2002,Home,900.50,250000,,2023-01-01,2024-01-01
";
        let dir = data_dir(Some(CLAIMS_CSV), Some(policies), None);
        let service = DatasetService::new(dir.path());

        let merged = service.merge_claims_with_policies().unwrap();
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.iter().filter(|m| m.policy.is_some()).count(), 3);

        let hits = service.high_risk_claims(DEFAULT_RISK_THRESHOLD).unwrap();
        let ids: Vec<_> = hits.iter().map(|m| m.claim.policy_id.as_str()).collect();
        assert_eq!(ids, ["POL-A-1001"]);

        let summary = service.policy_summary().unwrap();
        assert_eq!(summary.avg_risk_score, Some(0.9));
    }

    #[test]
    fn huge_amounts_summarise_without_panicking() {
        let claims = "\
policy_id,claim_type,claim_amount,claim_status,claim_date,days_to_settle
POL-A-1001,Auto Theft,50000000000000000000000000000,Settled,2024-01-15,5
POL-A-1001,Auto Theft,50000000000000000000000000000,Settled,2024-01-16,7
";
        let dir = data_dir(Some(claims), None, None);
        let service = DatasetService::new(dir.path());

        let summary = service.claims_summary().unwrap();
        assert_eq!(summary.total_claims, 2);
        assert_eq!(summary.total_amount, None);
        assert_eq!(summary.avg_amount, None);

        let overview = service.overview(Dataset::Claims).unwrap();
        assert_eq!(overview.facts[1].1, "n/a");
    }

    #[test]
    fn explorer_queries() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());

        let pending = service
            .filter_claims(&ClaimFilter {
                claim_type: None,
                status: Some(ClaimStatus::InProgress),
            })
            .unwrap();
        assert_eq!(pending.len(), 2);

        let hits = service.search_policies("a-1").unwrap();
        let ids: Vec<_> = hits.iter().map(|p| p.policy_id.as_str()).collect();
        assert_eq!(ids, ["POL-A-1001", "POL-A-1003"]);
        assert!(service.search_policies("zzz").unwrap().is_empty());
    }

    #[test]
    fn missing_files_surface_as_load_errors() {
        let dir = data_dir(Some(CLAIMS_CSV), None, None);
        let service = DatasetService::new(dir.path());

        assert!(service.load_claims(None).is_ok());
        assert!(matches!(
            service.merge_claims_with_policies(),
            Err(DataLoadError::NotFound { .. })
        ));
        assert!(matches!(
            service.overview(Dataset::FraudIndicators),
            Err(DataLoadError::NotFound { .. })
        ));
    }

    #[test]
    fn overview_for_each_dataset() {
        let dir = sample_dir();
        let service = DatasetService::new(dir.path());
        for dataset in Dataset::ALL {
            let overview = service.overview(dataset).unwrap();
            assert_eq!(overview.dataset, dataset);
            assert!(overview.record_count > 0);
        }
    }
}
