use std::collections::HashMap;

use super::model::{ClaimRecord, MergedClaim, PolicyRecord};

/// Default cut-off for [`high_risk`].
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.4;

/// Left outer join of claims onto policies by `policy_id`.
///
/// Every claim survives.  A claim whose policy is unknown gets `policy:
/// None`; a claim matching several policies with the same id is repeated
/// once per match, in policy file order.
pub fn left_join(claims: Vec<ClaimRecord>, policies: &[PolicyRecord]) -> Vec<MergedClaim> {
    let mut index: HashMap<&str, Vec<&PolicyRecord>> = HashMap::with_capacity(policies.len());
    for policy in policies {
        index.entry(policy.policy_id.as_str()).or_default().push(policy);
    }

    let mut merged = Vec::with_capacity(claims.len());
    for claim in claims {
        match index.get(claim.policy_id.as_str()) {
            Some(matches) => merged.extend(matches.iter().map(|&policy| MergedClaim {
                claim: claim.clone(),
                policy: Some(policy.clone()),
            })),
            None => merged.push(MergedClaim {
                claim,
                policy: None,
            }),
        }
    }
    merged
}

/// Rows whose matched policy has `risk_score >= threshold`.  Unmatched
/// rows and policies without a score never pass.
pub fn high_risk(merged: Vec<MergedClaim>, threshold: f64) -> Vec<MergedClaim> {
    merged
        .into_iter()
        .filter(|m| m.risk_score().is_some_and(|score| score >= threshold))
        .collect()
}
