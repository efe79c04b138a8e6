use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

/// Seeded xoshiro256** stream; the same seed always writes the same files.
struct SampleRng([u64; 4]);

impl SampleRng {
    /// Expand the seed with splitmix64 so no state word starts at zero.
    fn seeded(seed: u64) -> Self {
        let mut z = seed;
        let mut splitmix = || {
            z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut x = z;
            x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            x ^ (x >> 31)
        };
        SampleRng([splitmix(), splitmix(), splitmix(), splitmix()])
    }

    fn next_u64(&mut self) -> u64 {
        let [a, b, c, d] = &mut self.0;
        let out = b.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let shifted = *b << 17;
        *c ^= *a;
        *d ^= *b;
        *b ^= *c;
        *a ^= *d;
        *c ^= shifted;
        *d = d.rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `low..=high`.
    fn between(&mut self, low: u64, high: u64) -> u64 {
        low + self.next_u64() % (high - low + 1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64() as usize % items.len()]
    }

    /// Whole cents between two whole-dollar bounds.
    fn dollars(&mut self, low: u64, high: u64) -> Decimal {
        let cents = self.between(low * 100, high * 100);
        Decimal::new(cents as i64, 2)
    }

    /// A score in `[0, 1]` with two decimals.
    fn score(&mut self) -> Decimal {
        Decimal::new(self.between(0, 100) as i64, 2)
    }
}

const AUTO_CLAIMS: [&str; 3] = ["Auto Collision", "Auto Theft", "Auto Vandalism"];
const HOME_CLAIMS: [&str; 4] = [
    "Home Fire",
    "Home Water Damage",
    "Home Burglary",
    "Home Storm Damage",
];
const SEGMENTS: [&str; 4] = ["A", "B", "C", "D"];
const N_POLICIES: u64 = 200;
const N_CLAIMS: u64 = 500;
const N_INDICATORS: u64 = 150;

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "data".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SampleRng::seeded(42);
    let epoch = NaiveDate::from_ymd_opt(2023, 1, 1).context("invalid epoch date")?;
    let day = |offset: u64| {
        epoch
            .checked_add_days(Days::new(offset))
            .context("date out of range")
    };

    // ---- Policies ----
    let policies_path = out_dir.join("policies_data.csv");
    let mut policies = csv::Writer::from_path(&policies_path).context("creating policies file")?;
    policies.write_record([
        "policy_id",
        "policy_type",
        "premium_amount",
        "coverage_amount",
        "risk_score",
        "policy_start_date",
        "policy_end_date",
    ])?;

    let mut policy_ids = Vec::new();
    for i in 0..N_POLICIES {
        let segment = rng.pick(&SEGMENTS);
        let id = format!("POL-{segment}-{}", 1001 + i);
        let is_auto = rng.unit() < 0.55;
        let (premium, coverage) = if is_auto {
            (rng.dollars(400, 2500), rng.dollars(10_000, 100_000))
        } else {
            (rng.dollars(600, 4000), rng.dollars(100_000, 750_000))
        };
        let start_offset = rng.between(0, 364);
        let risk = rng.score().to_string();
        let (premium, coverage) = (premium.to_string(), coverage.to_string());

        let start = day(start_offset)?.to_string();
        let end = day(start_offset + 365)?.to_string();

        policies.write_record([
            id.as_str(),
            if is_auto { "Auto" } else { "Home" },
            premium.as_str(),
            coverage.as_str(),
            risk.as_str(),
            start.as_str(),
            end.as_str(),
        ])?;
        policy_ids.push((id, is_auto));
    }
    policies.flush()?;

    // ---- Claims ----
    let claims_path = out_dir.join("claims_data.csv");
    let mut claims = csv::Writer::from_path(&claims_path).context("creating claims file")?;
    claims.write_record([
        "claim_id",
        "policy_id",
        "claim_type",
        "claim_amount",
        "claim_status",
        "claim_date",
        "days_to_settle",
        "severity",
    ])?;

    for i in 0..N_CLAIMS {
        let (policy_id, is_auto) = rng.pick(&policy_ids);
        let claim_type = if *is_auto {
            *rng.pick(&AUTO_CLAIMS)
        } else {
            *rng.pick(&HOME_CLAIMS)
        };
        let amount = rng.dollars(250, 45_000).to_string();
        let settled = rng.unit() < 0.7;
        let days = if settled { rng.between(3, 120) } else { 0 };
        let severity = *rng.pick(&["Low", "Medium", "High"]);

        let claim_id = format!("CLM-{:05}", i + 1);
        let claim_date = day(rng.between(30, 700))?.to_string();
        let days = days.to_string();

        claims.write_record([
            claim_id.as_str(),
            policy_id.as_str(),
            claim_type,
            amount.as_str(),
            if settled { "Settled" } else { "In Progress" },
            claim_date.as_str(),
            days.as_str(),
            severity,
        ])?;
    }
    claims.flush()?;

    // ---- Fraud indicators ----
    let fraud_path = out_dir.join("fraud_indicators.csv");
    let mut fraud = csv::Writer::from_path(&fraud_path).context("creating fraud file")?;
    fraud.write_record(["indicator_id", "risk_level", "verified_status", "detection_date"])?;

    for i in 0..N_INDICATORS {
        let roll = rng.unit();
        let risk_level = if roll < 0.5 {
            "Low"
        } else if roll < 0.8 {
            "Medium"
        } else {
            "High"
        };
        let status = *rng.pick(&["Flagged", "Unflagged", "Verified"]);

        let indicator_id = format!("FRD-{:04}", i + 1);
        let detected = day(rng.between(30, 700))?.to_string();

        fraud.write_record([indicator_id.as_str(), risk_level, status, detected.as_str()])?;
    }
    fraud.flush()?;

    println!(
        "Wrote {N_POLICIES} policies, {N_CLAIMS} claims and {N_INDICATORS} fraud indicators to {}",
        out_dir.display()
    );
    Ok(())
}
