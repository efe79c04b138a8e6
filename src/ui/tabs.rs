use eframe::egui::{self, Key, RichText, Ui};

use crate::data::model::{ClaimStatus, ClaimType};
use crate::data::overview::Dataset;
use crate::state::{AppState, Tab};
use crate::ui::table::show_table;

// ---------------------------------------------------------------------------
// Central panel – one view per tab
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    match state.tab {
        Tab::Overview => overview(ui, state),
        Tab::ClaimsExplorer => claims_explorer(ui, state),
        Tab::PolicyLookup => policy_lookup(ui, state),
        Tab::HighRisk => high_risk(ui, state),
        Tab::About => about(ui),
    }
}

fn overview(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select a dataset to view statistics and preview");
    ui.horizontal(|ui: &mut Ui| {
        for dataset in Dataset::ALL {
            if ui.radio(state.dataset == dataset, dataset.label()).clicked() {
                state.select_dataset(dataset);
            }
        }
    });
    ui.separator();

    if let Some(overview) = &state.overview {
        ui.strong(format!("Dataset: {}", overview.dataset));
        ui.label(format!("• Total Records: {}", overview.record_count));
        ui.label(format!("• Columns: {}", overview.columns.join(", ")));
        for (label, value) in &overview.facts {
            ui.label(format!("• {label}: {value}"));
        }
        if ui.small_button("Copy statistics").clicked() {
            ui.ctx().copy_text(overview.to_markdown());
        }
    }

    if let Some(summary) = &state.summary {
        egui::CollapsingHeader::new("Summary record")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                egui::Grid::new("summary_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        for (field, value) in summary {
                            ui.monospace(*field);
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            });
    }
    ui.separator();

    if let Some(table) = &state.overview_table {
        show_table(ui, table);
    }
}

fn claims_explorer(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter and explore claims data");
    ui.horizontal(|ui: &mut Ui| {
        let filter = &mut state.claim_filter;

        let type_text = filter
            .claim_type
            .as_ref()
            .map_or("All".to_string(), ToString::to_string);
        egui::ComboBox::from_id_salt("claim_type")
            .selected_text(type_text)
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut filter.claim_type, None, "All");
                for claim_type in ClaimType::KNOWN {
                    ui.selectable_value(
                        &mut filter.claim_type,
                        Some(claim_type.clone()),
                        claim_type.label(),
                    );
                }
            });

        let status_text = filter
            .status
            .as_ref()
            .map_or("All".to_string(), ToString::to_string);
        egui::ComboBox::from_id_salt("claim_status")
            .selected_text(status_text)
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut filter.status, None, "All");
                for status in ClaimStatus::KNOWN {
                    ui.selectable_value(&mut filter.status, Some(status.clone()), status.label());
                }
            });
    });

    if ui.button("Apply Filters").clicked() {
        state.apply_claim_filter();
    }
    ui.separator();

    if let Some(table) = &state.claims_table {
        show_table(ui, table);
    }
}

fn policy_lookup(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search for policies by ID");
    let mut submit = false;
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.policy_query)
                .hint_text("Policy ID, e.g. POL-A-1001"),
        );
        submit = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        submit |= ui.button("Search").clicked();
    });
    if submit {
        state.search_policies();
    }
    ui.separator();

    if let Some(table) = &state.policy_table {
        if table.is_empty() {
            ui.label("No policy found with that ID");
        } else {
            show_table(ui, table);
        }
    }
}

fn high_risk(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Claims on high-risk policies");
    ui.horizontal(|ui: &mut Ui| {
        ui.add(egui::Slider::new(&mut state.risk_threshold, 0.0..=1.0).text("Risk score ≥"));
        if ui.button("Show").clicked() {
            state.refresh_high_risk();
        }
    });
    ui.label(
        RichText::new("Claims without a matching policy have no risk score and are left out.")
            .weak(),
    );
    ui.separator();

    if let Some(table) = &state.high_risk_table {
        show_table(ui, table);
    }
}

fn about(ui: &mut Ui) {
    ui.heading("About these datasets");
    ui.label(
        "Synthetic insurance data for testing claims processing, fraud detection \
         and analytics tooling. No real insurers, policies or personal information.",
    );
    ui.add_space(8.0);
    for dataset in Dataset::ALL {
        let detail = match dataset {
            Dataset::Claims => "Auto and home claims with amounts and settlement info",
            Dataset::Policies => "Policies with premiums, coverage limits and risk scores",
            Dataset::FraudIndicators => "Fraud flags with risk levels and verification status",
        };
        ui.label(format!("• {} ({}): {detail}", dataset.label(), dataset.file_name()));
    }
    ui.add_space(8.0);
    ui.label(
        RichText::new("Regenerate the files with `cargo run --bin generate_sample -- <dir>`.")
            .monospace(),
    );
}
