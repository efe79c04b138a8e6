use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use serde::Serialize;

use crate::data::loader::{CLAIM_COLUMNS, FRAUD_COLUMNS, POLICY_COLUMNS};
use crate::data::model::{ClaimRecord, FraudIndicatorRecord, MergedClaim, Passthrough, PolicyRecord};

// ---------------------------------------------------------------------------
// TableView – records flattened to text for display
// ---------------------------------------------------------------------------

/// A tabular result ready for rendering, plus its JSON export.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub json: Option<String>,
}

impl TableView {
    pub fn claims(records: &[ClaimRecord]) -> Self {
        let extra = extra_columns(records.iter().map(|c| &c.extra));
        let mut columns = names(&CLAIM_COLUMNS);
        columns.extend(extra.iter().cloned());

        let rows = records
            .iter()
            .map(|c| {
                let mut row = claim_cells(c);
                row.extend(extra_cells(&extra, &c.extra));
                row
            })
            .collect();
        Self::new(columns, rows, records)
    }

    pub fn policies(records: &[PolicyRecord]) -> Self {
        let extra = extra_columns(records.iter().map(|p| &p.extra));
        let mut columns = names(&POLICY_COLUMNS);
        columns.extend(extra.iter().cloned());

        let rows = records
            .iter()
            .map(|p| {
                let mut row = policy_cells(p);
                row.extend(extra_cells(&extra, &p.extra));
                row
            })
            .collect();
        Self::new(columns, rows, records)
    }

    pub fn fraud_indicators(records: &[FraudIndicatorRecord]) -> Self {
        let extra = extra_columns(records.iter().map(|f| &f.extra));
        let mut columns = names(&FRAUD_COLUMNS);
        columns.extend(extra.iter().cloned());

        let rows = records
            .iter()
            .map(|f| {
                let mut row = vec![
                    f.risk_level.to_string(),
                    f.verified_status.to_string(),
                    f.detection_date.to_string(),
                ];
                row.extend(extra_cells(&extra, &f.extra));
                row
            })
            .collect();
        Self::new(columns, rows, records)
    }

    /// Claim columns, then policy columns, each followed by its own
    /// passthrough columns; `policy_id` appears once.
    pub fn merged(records: &[MergedClaim]) -> Self {
        let claim_extra = extra_columns(records.iter().map(|m| &m.claim.extra));
        let policy_extra = extra_columns(
            records
                .iter()
                .filter_map(|m| m.policy.as_ref())
                .map(|p| &p.extra),
        );

        let mut columns = names(&CLAIM_COLUMNS);
        columns.extend(claim_extra.iter().cloned());
        columns.extend(names(&POLICY_COLUMNS[1..]));
        columns.extend(policy_extra.iter().cloned());
        let blank_policy = vec![String::new(); POLICY_COLUMNS.len() - 1 + policy_extra.len()];

        let rows = records
            .iter()
            .map(|m| {
                let mut row = claim_cells(&m.claim);
                row.extend(extra_cells(&claim_extra, &m.claim.extra));
                match &m.policy {
                    Some(p) => {
                        row.extend(policy_cells(p).into_iter().skip(1));
                        row.extend(extra_cells(&policy_extra, &p.extra));
                    }
                    None => row.extend(blank_policy.iter().cloned()),
                }
                row
            })
            .collect();
        Self::new(columns, rows, records)
    }

    fn new<T: Serialize>(columns: Vec<String>, rows: Vec<Vec<String>>, records: &[T]) -> Self {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| log::warn!("JSON export failed: {e}"))
            .ok();
        Self { columns, rows, json }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn claim_cells(c: &ClaimRecord) -> Vec<String> {
    vec![
        c.policy_id.clone(),
        c.claim_type.to_string(),
        cell(c.claim_amount),
        c.claim_status.to_string(),
        c.claim_date.to_string(),
        cell(c.days_to_settle),
    ]
}

fn policy_cells(p: &PolicyRecord) -> Vec<String> {
    vec![
        p.policy_id.clone(),
        p.policy_type.to_string(),
        cell(p.premium_amount),
        cell(p.coverage_amount),
        p.risk_score.map(|r| format!("{r:.2}")).unwrap_or_default(),
        p.policy_start_date.to_string(),
        p.policy_end_date.to_string(),
    ]
}

/// Absent values render as an empty cell.
fn cell(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Union of passthrough column names across all rows, in first-seen order.
fn extra_columns<'a>(rows: impl Iterator<Item = &'a Passthrough>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in rows.flat_map(Passthrough::columns) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn extra_cells(columns: &[String], values: &Passthrough) -> Vec<String> {
    columns
        .iter()
        .map(|c| values.get(c).unwrap_or_default().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a table, or "No results" when it has no rows.
pub fn show_table(ui: &mut Ui, view: &TableView) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} rows", view.rows.len()));
        if let Some(json) = &view.json {
            if ui.small_button("Copy as JSON").clicked() {
                ui.ctx().copy_text(json.clone());
            }
        }
    });

    if view.is_empty() {
        ui.add_space(8.0);
        ui.label(RichText::new("No results").italics());
        return;
    }

    ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0), view.columns.len())
                .header(20.0, |mut header| {
                    for col in &view.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, view.rows.len(), |mut row| {
                        let cells = &view.rows[row.index()];
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.add(egui::Label::new(cell).truncate());
                            });
                        }
                    });
                });
        });
}
