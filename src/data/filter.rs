use std::collections::BTreeSet;

use super::model::{ClaimRecord, ClaimStatus, ClaimType, PolicyRecord, PolicyType, RiskLevel};

// ---------------------------------------------------------------------------
// Categorical set filters
// ---------------------------------------------------------------------------

/// Keep the rows whose category is a member of `selected`, in their
/// original order.  An absent or empty selection is no filter at all.
pub fn retain_categories<T, K: Ord>(
    rows: Vec<T>,
    selected: Option<&BTreeSet<K>>,
    category: impl Fn(&T) -> &K,
) -> Vec<T> {
    match selected {
        Some(set) if !set.is_empty() => rows
            .into_iter()
            .filter(|row| set.contains(category(row)))
            .collect(),
        _ => rows,
    }
}

/// Narrow a checkbox selection to the filter it actually imposes.
///
/// When every known value is ticked nothing is constrained, which also lets
/// rows with labels outside the known vocabulary through.
pub fn effective_selection<'a, K: Ord>(
    selected: &'a BTreeSet<K>,
    known: &[K],
) -> Option<&'a BTreeSet<K>> {
    if known.iter().all(|k| selected.contains(k)) {
        None
    } else {
        Some(selected)
    }
}

/// Checkbox state of the side panel, one set per dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFilters {
    pub claim_types: BTreeSet<ClaimType>,
    pub policy_types: BTreeSet<PolicyType>,
    pub risk_levels: BTreeSet<RiskLevel>,
}

impl Default for CategoryFilters {
    /// Everything selected, i.e. show every row.
    fn default() -> Self {
        Self {
            claim_types: ClaimType::KNOWN.iter().cloned().collect(),
            policy_types: PolicyType::KNOWN.iter().cloned().collect(),
            risk_levels: RiskLevel::KNOWN.iter().cloned().collect(),
        }
    }
}

/// Flip one value in a selection set.
pub fn toggle<K: Ord + Clone>(selected: &mut BTreeSet<K>, value: &K) {
    if !selected.remove(value) {
        selected.insert(value.clone());
    }
}

// ---------------------------------------------------------------------------
// Claims explorer: type and status, both optional
// ---------------------------------------------------------------------------

/// `None` on either field means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFilter {
    pub claim_type: Option<ClaimType>,
    pub status: Option<ClaimStatus>,
}

impl ClaimFilter {
    pub fn matches(&self, claim: &ClaimRecord) -> bool {
        self.claim_type
            .as_ref()
            .map_or(true, |t| *t == claim.claim_type)
            && self
                .status
                .as_ref()
                .map_or(true, |s| *s == claim.claim_status)
    }

    pub fn apply(&self, claims: Vec<ClaimRecord>) -> Vec<ClaimRecord> {
        claims.into_iter().filter(|c| self.matches(c)).collect()
    }
}

// ---------------------------------------------------------------------------
// Policy lookup
// ---------------------------------------------------------------------------

/// Case-insensitive substring search on `policy_id`.  Only the empty query
/// returns every policy; whitespace is matched like any other character.
pub fn search_policies(policies: Vec<PolicyRecord>, query: &str) -> Vec<PolicyRecord> {
    if query.is_empty() {
        return policies;
    }
    let needle = query.to_lowercase();
    policies
        .into_iter()
        .filter(|p| p.policy_id.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{claim, policy};

    #[test]
    fn selection_keeps_members_in_file_order() {
        let claims = vec![
            claim("POL-A-1", ClaimType::HomeFire, 100, ClaimStatus::Settled, Some(3)),
            claim("POL-A-2", ClaimType::AutoTheft, 200, ClaimStatus::Settled, Some(4)),
            claim("POL-A-3", ClaimType::HomeFire, 300, ClaimStatus::InProgress, None),
            claim("POL-A-4", ClaimType::AutoCollision, 400, ClaimStatus::Settled, Some(9)),
        ];
        let selected = BTreeSet::from([ClaimType::HomeFire, ClaimType::AutoCollision]);

        let kept = retain_categories(claims.clone(), Some(&selected), |c| &c.claim_type);
        let ids: Vec<_> = kept.iter().map(|c| c.policy_id.as_str()).collect();
        assert_eq!(ids, ["POL-A-1", "POL-A-3", "POL-A-4"]);

        let expected: Vec<_> = claims
            .iter()
            .filter(|c| selected.contains(&c.claim_type))
            .cloned()
            .collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn empty_or_absent_selection_is_no_filter() {
        let claims = vec![
            claim("POL-A-1", ClaimType::HomeFire, 100, ClaimStatus::Settled, Some(3)),
            claim("POL-A-2", ClaimType::AutoTheft, 200, ClaimStatus::Settled, Some(4)),
        ];
        let empty = BTreeSet::new();
        assert_eq!(retain_categories(claims.clone(), Some(&empty), |c| &c.claim_type), claims);
        assert_eq!(retain_categories(claims.clone(), None, |c| &c.claim_type), claims);
    }

    #[test]
    fn full_selection_is_not_a_constraint() {
        let filters = CategoryFilters::default();
        assert!(effective_selection(&filters.risk_levels, RiskLevel::KNOWN).is_none());

        let mut partial = filters.risk_levels.clone();
        toggle(&mut partial, &RiskLevel::Low);
        assert_eq!(
            effective_selection(&partial, RiskLevel::KNOWN),
            Some(&BTreeSet::from([RiskLevel::Medium, RiskLevel::High]))
        );
        toggle(&mut partial, &RiskLevel::Low);
        assert!(effective_selection(&partial, RiskLevel::KNOWN).is_none());
    }

    #[test]
    fn claim_filter_combines_type_and_status() {
        let claims = vec![
            claim("POL-A-1", ClaimType::HomeFire, 100, ClaimStatus::Settled, Some(3)),
            claim("POL-A-2", ClaimType::HomeFire, 200, ClaimStatus::InProgress, None),
            claim("POL-A-3", ClaimType::AutoTheft, 300, ClaimStatus::InProgress, None),
        ];

        let all = ClaimFilter::default().apply(claims.clone());
        assert_eq!(all.len(), 3);

        let filter = ClaimFilter {
            claim_type: Some(ClaimType::HomeFire),
            status: Some(ClaimStatus::InProgress),
        };
        let hits = filter.apply(claims);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].policy_id, "POL-A-2");
    }

    #[test]
    fn policy_search_is_case_insensitive_substring() {
        let policies = vec![policy("POL-A-1001", 0.2), policy("POL-B-2002", 0.7)];

        let hits = search_policies(policies.clone(), "A-1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].policy_id, "POL-A-1001");

        assert_eq!(search_policies(policies.clone(), "pol-b").len(), 1);
        assert!(search_policies(policies.clone(), "zzz").is_empty());
        assert_eq!(search_policies(policies.clone(), "").len(), 2);
        assert!(search_policies(policies.clone(), "  ").is_empty());
        assert!(search_policies(policies, " A-1 ").is_empty());
    }
}
