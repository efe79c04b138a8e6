use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use rust_decimal::Decimal;

use super::error::DataLoadError;
use super::model::{
    ClaimRecord, ClaimStatus, ClaimType, FraudIndicatorRecord, Passthrough, PolicyRecord,
    PolicyType, RiskLevel, Table, VerifiedStatus,
};

type Result<T> = std::result::Result<T, DataLoadError>;

pub const CLAIM_COLUMNS: [&str; 6] = [
    "policy_id",
    "claim_type",
    "claim_amount",
    "claim_status",
    "claim_date",
    "days_to_settle",
];

pub const POLICY_COLUMNS: [&str; 7] = [
    "policy_id",
    "policy_type",
    "premium_amount",
    "coverage_amount",
    "risk_score",
    "policy_start_date",
    "policy_end_date",
];

pub const FRAUD_COLUMNS: [&str; 3] = ["risk_level", "verified_status", "detection_date"];

// ---------------------------------------------------------------------------
// Public entry-points – one per dataset
// ---------------------------------------------------------------------------

/// Read `claims_data.csv`.  Extra columns are kept in `extra`.
pub fn load_claims(path: &Path) -> Result<Table<ClaimRecord>> {
    let (columns, records) = read_csv(path)?;
    let idx = resolve_columns(path, &columns, CLAIM_COLUMNS)?;
    let [policy_id, claim_type, amount, status, date, days] = idx;

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells = Cells::new(path, &columns, i, record);
            Ok(ClaimRecord {
                policy_id: cells.text(policy_id).to_string(),
                claim_type: ClaimType::from_label(cells.text(claim_type)),
                claim_amount: cells.optional_decimal(amount)?,
                claim_status: ClaimStatus::from_label(cells.text(status)),
                claim_date: cells.date(date)?,
                days_to_settle: cells.optional_int(days)?,
                extra: cells.passthrough(&idx),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} claims from {}", rows.len(), path.display());
    Ok(Table { columns, rows })
}

/// Read `policies_data.csv`.  A policy ending before it starts is rejected.
pub fn load_policies(path: &Path) -> Result<Table<PolicyRecord>> {
    let (columns, records) = read_csv(path)?;
    let idx = resolve_columns(path, &columns, POLICY_COLUMNS)?;
    let [policy_id, policy_type, premium, coverage, risk, start, end] = idx;

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells = Cells::new(path, &columns, i, record);
            let policy = PolicyRecord {
                policy_id: cells.text(policy_id).to_string(),
                policy_type: PolicyType::from_label(cells.text(policy_type)),
                premium_amount: cells.optional_decimal(premium)?,
                coverage_amount: cells.optional_decimal(coverage)?,
                risk_score: cells.optional_float(risk)?,
                policy_start_date: cells.date(start)?,
                policy_end_date: cells.date(end)?,
                extra: cells.passthrough(&idx),
            };
            if policy.policy_end_date < policy.policy_start_date {
                return Err(DataLoadError::InvalidDateRange {
                    path: path.to_path_buf(),
                    row: cells.row,
                    policy_id: policy.policy_id,
                    start: policy.policy_start_date,
                    end: policy.policy_end_date,
                });
            }
            Ok(policy)
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} policies from {}", rows.len(), path.display());
    Ok(Table { columns, rows })
}

/// Read `fraud_indicators.csv`.
pub fn load_fraud_indicators(path: &Path) -> Result<Table<FraudIndicatorRecord>> {
    let (columns, records) = read_csv(path)?;
    let idx = resolve_columns(path, &columns, FRAUD_COLUMNS)?;
    let [risk_level, verified, detected] = idx;

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells = Cells::new(path, &columns, i, record);
            Ok(FraudIndicatorRecord {
                risk_level: RiskLevel::from_label(cells.text(risk_level)),
                verified_status: VerifiedStatus::from_label(cells.text(verified)),
                detection_date: cells.date(detected)?,
                extra: cells.passthrough(&idx),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} fraud indicators from {}", rows.len(), path.display());
    Ok(Table { columns, rows })
}

// ---------------------------------------------------------------------------
// CSV plumbing
// ---------------------------------------------------------------------------

/// Read the header and every record.  Any structural CSV problem (ragged
/// rows, invalid UTF-8) aborts the whole load.
fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<StringRecord>)> {
    if !path.exists() {
        return Err(DataLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);
    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    Ok((columns, records))
}

/// Map required column names to their positions in the header.
fn resolve_columns<const N: usize>(
    path: &Path,
    columns: &[String],
    required: [&str; N],
) -> Result<[usize; N]> {
    let mut indices = [0usize; N];
    for (slot, name) in indices.iter_mut().zip(required) {
        *slot = columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;
    }
    Ok(indices)
}

/// One record plus the context needed to report a bad cell.
struct Cells<'a> {
    path: &'a Path,
    columns: &'a [String],
    /// 1-based data row (the header is not counted).
    row: usize,
    record: &'a StringRecord,
}

impl<'a> Cells<'a> {
    fn new(path: &'a Path, columns: &'a [String], index: usize, record: &'a StringRecord) -> Self {
        Self {
            path,
            columns,
            row: index + 1,
            record,
        }
    }

    fn text(&self, idx: usize) -> &'a str {
        self.record.get(idx).unwrap_or("")
    }

    fn invalid(&self, idx: usize) -> DataLoadError {
        DataLoadError::InvalidValue {
            path: self.path.to_path_buf(),
            row: self.row,
            column: self.columns[idx].clone(),
            value: self.text(idx).to_string(),
        }
    }

    /// Empty and `NaN` cells carry no number.
    fn blank(&self, idx: usize) -> bool {
        let s = self.text(idx);
        s.is_empty() || s.eq_ignore_ascii_case("nan")
    }

    fn optional_decimal(&self, idx: usize) -> Result<Option<Decimal>> {
        if self.blank(idx) {
            return Ok(None);
        }
        let s = self.text(idx);
        s.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(s))
            .map(Some)
            .map_err(|_| self.invalid(idx))
    }

    fn optional_float(&self, idx: usize) -> Result<Option<f64>> {
        if self.blank(idx) {
            return Ok(None);
        }
        self.text(idx)
            .parse::<f64>()
            .map(Some)
            .map_err(|_| self.invalid(idx))
    }

    /// Whole floats such as `12.0` are accepted since a column with gaps is
    /// often written as floats.
    fn optional_int(&self, idx: usize) -> Result<Option<i64>> {
        if self.blank(idx) {
            return Ok(None);
        }
        let s = self.text(idx);
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Some(i));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
            _ => Err(self.invalid(idx)),
        }
    }

    fn date(&self, idx: usize) -> Result<NaiveDate> {
        parse_date(self.text(idx)).ok_or_else(|| self.invalid(idx))
    }

    /// Every cell outside `used`, keyed by its header, in header order.
    fn passthrough(&self, used: &[usize]) -> Passthrough {
        self.record
            .iter()
            .enumerate()
            .filter(|(i, _)| !used.contains(i))
            .filter_map(|(i, value)| {
                self.columns
                    .get(i)
                    .map(|name| (name.clone(), value.to_string()))
            })
            .collect()
    }
}

/// Parse a calendar date, dropping any time-of-day component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
