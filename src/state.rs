use crate::config::ExplorerConfig;
use crate::data::error::DataLoadError;
use crate::data::filter::{self, CategoryFilters, ClaimFilter};
use crate::data::model::{ClaimType, PolicyType, RiskLevel};
use crate::data::overview::{Dataset, DatasetOverview};
use crate::data::service::DatasetService;
use crate::ui::table::TableView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    ClaimsExplorer,
    PolicyLookup,
    HighRisk,
    About,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::ClaimsExplorer,
        Tab::PolicyLookup,
        Tab::HighRisk,
        Tab::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Dataset Overview",
            Tab::ClaimsExplorer => "Claims Explorer",
            Tab::PolicyLookup => "Policy Lookup",
            Tab::HighRisk => "High-Risk Claims",
            Tab::About => "About",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub service: DatasetService,
    pub tab: Tab,

    /// Overview tab: chosen dataset, its statistics and (filtered) rows.
    pub dataset: Dataset,
    pub overview: Option<DatasetOverview>,
    pub overview_table: Option<TableView>,
    /// Aggregate record of the chosen dataset as `(field, value)` pairs.
    pub summary: Option<Vec<(&'static str, String)>>,
    /// Side-panel checkbox selections.
    pub filters: CategoryFilters,

    /// Claims explorer: pending criteria and last result.
    pub claim_filter: ClaimFilter,
    pub claims_table: Option<TableView>,

    /// Policy lookup: query text and last result.
    pub policy_query: String,
    pub policy_table: Option<TableView>,

    pub risk_threshold: f64,
    pub high_risk_table: Option<TableView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &ExplorerConfig) -> Self {
        let mut state = Self {
            service: DatasetService::new(config.data_dir.clone()),
            tab: Tab::Overview,
            dataset: Dataset::Claims,
            overview: None,
            overview_table: None,
            summary: None,
            filters: CategoryFilters::default(),
            claim_filter: ClaimFilter::default(),
            claims_table: None,
            policy_query: String::new(),
            policy_table: None,
            risk_threshold: config.risk_threshold,
            high_risk_table: None,
            status_message: None,
        };
        state.refresh_overview();
        state
    }

    /// Point the service at another directory and drop every stale result.
    pub fn set_data_dir(&mut self, dir: std::path::PathBuf) {
        log::info!("Switching data directory to {}", dir.display());
        self.service = DatasetService::new(dir);
        self.claims_table = None;
        self.policy_table = None;
        self.high_risk_table = None;
        self.refresh_overview();
    }

    pub fn select_dataset(&mut self, dataset: Dataset) {
        if self.dataset != dataset {
            self.dataset = dataset;
            self.refresh_overview();
        }
    }

    /// Reload statistics and rows for the overview tab.
    pub fn refresh_overview(&mut self) {
        let result = self.service.overview(self.dataset).and_then(|overview| {
            let summary = self.summary_fields()?;
            let table = self.overview_rows()?;
            Ok((overview, summary, table))
        });
        match self.settle(result) {
            Some((overview, summary, table)) => {
                self.overview = Some(overview);
                self.summary = Some(summary);
                self.overview_table = Some(table);
            }
            None => {
                self.overview = None;
                self.summary = None;
                self.overview_table = None;
            }
        }
    }

    fn summary_fields(&self) -> Result<Vec<(&'static str, String)>, DataLoadError> {
        Ok(match self.dataset {
            Dataset::Claims => self.service.claims_summary()?.labeled(),
            Dataset::Policies => self.service.policy_summary()?.labeled(),
            Dataset::FraudIndicators => self.service.fraud_summary()?.labeled(),
        })
    }

    fn overview_rows(&self) -> Result<TableView, DataLoadError> {
        let f = &self.filters;
        Ok(match self.dataset {
            Dataset::Claims => TableView::claims(&self.service.load_claims(
                filter::effective_selection(&f.claim_types, ClaimType::KNOWN),
            )?),
            Dataset::Policies => TableView::policies(&self.service.load_policies(
                filter::effective_selection(&f.policy_types, PolicyType::KNOWN),
            )?),
            Dataset::FraudIndicators => {
                TableView::fraud_indicators(&self.service.load_fraud_indicators(
                    filter::effective_selection(&f.risk_levels, RiskLevel::KNOWN),
                )?)
            }
        })
    }

    pub fn apply_claim_filter(&mut self) {
        let result = self.service.filter_claims(&self.claim_filter);
        self.claims_table = self.settle(result).map(|rows| TableView::claims(&rows));
    }

    pub fn search_policies(&mut self) {
        let result = self.service.search_policies(&self.policy_query);
        self.policy_table = self.settle(result).map(|rows| TableView::policies(&rows));
    }

    pub fn refresh_high_risk(&mut self) {
        let result = self.service.high_risk_claims(self.risk_threshold);
        self.high_risk_table = self.settle(result).map(|rows| TableView::merged(&rows));
    }

    /// Record the outcome in the status line; errors never propagate past here.
    fn settle<T>(&mut self, result: Result<T, DataLoadError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.status_message = None;
                Some(value)
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                None
            }
        }
    }
}
