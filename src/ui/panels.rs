use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::toggle;
use crate::data::model::{ClaimType, PolicyType, RiskLevel};
use crate::data::overview::Dataset;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – category filters for the overview table
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.tab != Tab::Overview {
        ui.label("Filters apply to the Dataset Overview tab.");
        return;
    }

    let mut changed = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let filters = &mut state.filters;
            changed = match state.dataset {
                Dataset::Claims => {
                    checkbox_group(ui, "Claim type", &mut filters.claim_types, ClaimType::KNOWN)
                }
                Dataset::Policies => {
                    checkbox_group(ui, "Policy type", &mut filters.policy_types, PolicyType::KNOWN)
                }
                Dataset::FraudIndicators => {
                    checkbox_group(ui, "Risk level", &mut filters.risk_levels, RiskLevel::KNOWN)
                }
            };
        });

    // Reload rows only when a checkbox actually moved.
    if changed {
        state.refresh_overview();
    }
}

/// One collapsible group of checkboxes.  Returns whether the selection changed.
fn checkbox_group<K>(ui: &mut Ui, title: &str, selected: &mut BTreeSet<K>, known: &[K]) -> bool
where
    K: Ord + Clone + std::fmt::Display,
{
    let mut changed = false;
    let header_text = format!("{title}  ({}/{})", selected.len(), known.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("All").clicked() {
                selected.extend(known.iter().cloned());
                changed = true;
            }
            for value in known {
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    toggle(selected, value);
                    changed = true;
                }
            }
            if selected.is_empty() {
                ui.label(RichText::new("Nothing ticked: showing all rows").weak());
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, tab strip and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.refresh_overview();
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }

        ui.separator();

        ui.label(format!("Data: {}", state.service.data_dir().display()));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open insurance data folder")
        .set_directory(state.service.data_dir())
        .pick_folder();

    if let Some(path) = folder {
        state.set_data_dir(path);
    }
}
