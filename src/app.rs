use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDateTime};
use eframe::egui;

use crate::config;
use crate::data::client::SimulationClient;
use crate::data::models::{self, SimulationRequest, SimulationResponse, SimulationResult};
use crate::strategy::{Strategy, StrategyConfig};
use crate::ui;

/// What one background submission hands back to the UI thread
type SubmissionOutcome = (SimulationRequest, Result<SimulationResponse>);

/// Submission gate: a symbol is chosen, a real strategy is selected,
/// and both date-time strings are non-empty. Date ordering and
/// parseability are checked later, at build time.
pub fn can_submit(
    symbol: Option<&str>,
    strategy: Strategy,
    start_date: &str,
    end_date: &str,
) -> bool {
    symbol.is_some()
        && strategy != Strategy::None
        && !start_date.is_empty()
        && !end_date.is_empty()
}

/// Parse a form date-time string: the minute-precision form shape
/// first, then the formats the wire parser already knows
pub fn parse_form_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M")
        .ok()
        .or_else(|| models::parse_point_date(s))
}

/// In-progress form values for the next simulation request
pub struct FormState {
    pub symbol: Option<&'static str>,
    pub strategy: Strategy,
    pub config: StrategyConfig,
    pub start_date: String,
    pub end_date: String,
}

impl Default for FormState {
    fn default() -> Self {
        // Default window: six months back until yesterday
        let now = Local::now().naive_local();
        let start = now - Duration::days(config::DEFAULT_WINDOW_DAYS);
        let end = now - Duration::days(1);
        Self {
            symbol: None,
            strategy: Strategy::None,
            config: StrategyConfig::default_for(Strategy::None),
            start_date: start.format("%Y-%m-%dT%H:%M").to_string(),
            end_date: end.format("%Y-%m-%dT%H:%M").to_string(),
        }
    }
}

impl FormState {
    /// Switch strategy, discarding the previous parameter values in
    /// favor of the new strategy's registered defaults
    pub fn select_strategy(&mut self, strategy: Strategy) {
        if strategy != self.strategy {
            self.strategy = strategy;
            self.config = StrategyConfig::default_for(strategy);
        }
    }

    pub fn can_submit(&self) -> bool {
        can_submit(
            self.symbol,
            self.strategy,
            &self.start_date,
            &self.end_date,
        )
    }

    /// Assemble the request, parsing the two date-time strings
    pub fn build_request(&self) -> Result<SimulationRequest> {
        let symbol = self.symbol.context("No symbol selected")?;
        let start_date = parse_form_date(&self.start_date)
            .with_context(|| format!("Invalid start date '{}'", self.start_date))?;
        let end_date = parse_form_date(&self.end_date)
            .with_context(|| format!("Invalid end date '{}'", self.end_date))?;

        Ok(SimulationRequest {
            symbol: symbol.to_string(),
            start_date,
            end_date,
            strategy: self.strategy,
            strategy_config: self.config.clone(),
        })
    }
}

/// Shared application state
pub struct AppState {
    pub form: FormState,
    /// Finished simulations, newest first; never mutated after insert
    pub results: Vec<SimulationResult>,
    pub is_loading: bool,
    /// Most recent submission failure, shown next to the submit button
    pub last_error: Option<String>,
    pub status_message: String,
    pub dark_mode: bool,
    pub chart_height: f32,
    /// Shared slot for the in-flight submission's outcome
    pub submission_slot: Option<Arc<Mutex<Option<SubmissionOutcome>>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: FormState::default(),
            results: Vec::new(),
            is_loading: false,
            last_error: None,
            status_message: "Ready. Pick a symbol and a strategy to run a simulation."
                .to_string(),
            dark_mode: true,
            chart_height: 380.0,
            submission_slot: None,
        }
    }
}

/// Main application struct for eframe
pub struct SimTraderApp {
    pub state: AppState,
    client: SimulationClient,
    tokio_rt: tokio::runtime::Runtime,
}

impl Default for SimTraderApp {
    fn default() -> Self {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        Self {
            state: AppState::default(),
            client: SimulationClient::new(config::api_base_url()),
            tokio_rt: rt,
        }
    }
}

impl SimTraderApp {
    /// Kick off the simulation described by the form. A no-op while a
    /// request is already in flight, so rapid double-clicks cannot
    /// produce duplicate submissions.
    fn start_simulation(&mut self) {
        if self.state.is_loading {
            return;
        }

        let request = match self.state.form.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.state.last_error = Some(format!("{e:#}"));
                return;
            }
        };

        self.state.is_loading = true;
        self.state.last_error = None;
        self.state.status_message = format!(
            "Running {} simulation for {}...",
            request.strategy.label(),
            request.symbol
        );

        let result_slot: Arc<Mutex<Option<SubmissionOutcome>>> = Arc::new(Mutex::new(None));
        self.state.submission_slot = Some(result_slot.clone());
        let client = self.client.clone();

        self.tokio_rt.spawn(async move {
            let outcome = client.submit(&request).await;
            if let Ok(mut slot) = result_slot.lock() {
                *slot = Some((request, outcome));
            }
        });
    }

    /// Drain the submission slot. Successes are prepended to the result
    /// list; failures are logged and surfaced, never thrown.
    fn check_submission_ready(&mut self) {
        let ready = self
            .state
            .submission_slot
            .as_ref()
            .and_then(|slot| slot.lock().ok()?.take());

        let Some((request, outcome)) = ready else {
            return;
        };
        self.state.submission_slot = None;
        self.state.is_loading = false;

        match outcome {
            Ok(response) => {
                self.state.status_message = format!(
                    "Simulation finished: {} trading days for {}.",
                    response.values.len(),
                    request.symbol
                );
                self.state
                    .results
                    .insert(0, SimulationResult::new(request, response));
            }
            Err(e) => {
                tracing::error!("Simulation submission failed: {:#}", e);
                self.state.last_error = Some(format!("{e:#}"));
                self.state.status_message = "Simulation failed.".to_string();
            }
        }
    }
}

impl eframe::App for SimTraderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for the in-flight submission
        self.check_submission_ready();
        if self.state.is_loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if ctx.style().visuals.dark_mode != self.state.dark_mode {
            ctx.set_visuals(if self.state.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Algo Sim Trader");
                ui.label("Gain insights with trading algorithm simulations");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if self.state.dark_mode { "🌙" } else { "☀" };
                    if ui.button(icon).on_hover_text("Toggle dark mode").clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
                let submit = ui::input_form::render(ui, &mut self.state);
                if submit {
                    self.start_simulation();
                }
                ui::results_view::render(ui, &mut self.state);
            });
        });
    }
}
